use af_app::{
    AppResult, PredictionRequest, RankedActuator, build_engine, catalog_service, load_request,
    predict_request, rank_actuators, resolve_actuator, resolve_fluid, sweep_pressure,
};
use af_engine::{PredictionEngine, PredictionResult};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "af-cli")]
#[command(about = "AtomFlow CLI - Spray actuator and fluid compatibility prediction", long_about = None)]
struct Cli {
    /// Calibration override file (YAML or JSON)
    #[arg(long, global = true)]
    calibration: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate catalog file syntax and every record
    Validate {
        /// Path to the catalog YAML/JSON file
        catalog_path: PathBuf,
    },
    /// Predict one actuator with one fluid
    Predict {
        /// Path to the catalog YAML/JSON file
        catalog_path: PathBuf,
        /// Actuator ID
        #[arg(long)]
        actuator: String,
        /// Fluid ID
        #[arg(long)]
        fluid: String,
        /// Operating pressure in bar
        #[arg(long)]
        pressure: f64,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a JSON prediction request file
    Request {
        /// Path to the catalog YAML/JSON file
        catalog_path: PathBuf,
        /// Path to the request JSON file
        request_path: PathBuf,
    },
    /// Rank every catalog actuator for one fluid
    Rank {
        /// Path to the catalog YAML/JSON file
        catalog_path: PathBuf,
        /// Fluid ID
        #[arg(long)]
        fluid: String,
        /// Operating pressure in bar
        #[arg(long)]
        pressure: f64,
        /// Show only the best N actuators
        #[arg(long)]
        top: Option<usize>,
        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare selected actuators side by side
    Compare {
        /// Path to the catalog YAML/JSON file
        catalog_path: PathBuf,
        /// Fluid ID
        #[arg(long)]
        fluid: String,
        /// Operating pressure in bar
        #[arg(long)]
        pressure: f64,
        /// Comma-separated actuator IDs
        #[arg(long, value_delimiter = ',', required = true)]
        actuators: Vec<String>,
    },
    /// Sweep operating pressure for one actuator and fluid
    Sweep {
        /// Path to the catalog YAML/JSON file
        catalog_path: PathBuf,
        /// Actuator ID
        #[arg(long)]
        actuator: String,
        /// Fluid ID
        #[arg(long)]
        fluid: String,
        /// Start pressure in bar
        #[arg(long)]
        from: f64,
        /// End pressure in bar
        #[arg(long)]
        to: f64,
        /// Number of points
        #[arg(long, default_value_t = 10)]
        points: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let engine = build_engine(cli.calibration.as_deref())?;
    tracing::debug!(calibration = ?cli.calibration, "prediction engine ready");

    match cli.command {
        Commands::Validate { catalog_path } => cmd_validate(&catalog_path),
        Commands::Predict {
            catalog_path,
            actuator,
            fluid,
            pressure,
            json,
        } => cmd_predict(&catalog_path, &actuator, &fluid, pressure, json, &engine),
        Commands::Request {
            catalog_path,
            request_path,
        } => cmd_request(&catalog_path, &request_path, &engine),
        Commands::Rank {
            catalog_path,
            fluid,
            pressure,
            top,
            json,
        } => cmd_rank(&catalog_path, &fluid, pressure, top, json, &engine),
        Commands::Compare {
            catalog_path,
            fluid,
            pressure,
            actuators,
        } => cmd_compare(&catalog_path, &fluid, pressure, &actuators, &engine),
        Commands::Sweep {
            catalog_path,
            actuator,
            fluid,
            from,
            to,
            points,
            output,
        } => cmd_sweep(
            &catalog_path,
            &actuator,
            &fluid,
            from,
            to,
            points,
            output.as_deref(),
            &engine,
        ),
    }
}

fn cmd_validate(catalog_path: &Path) -> AppResult<()> {
    println!("Validating catalog: {}", catalog_path.display());
    let catalog = catalog_service::load_catalog(catalog_path)?;
    let summary = catalog_service::validate_catalog(&catalog)?;
    println!("✓ Catalog is valid");
    println!(
        "  {} (v{}): {} actuators, {} fluids",
        summary.name, summary.version, summary.actuator_count, summary.fluid_count
    );
    Ok(())
}

fn cmd_predict(
    catalog_path: &Path,
    actuator_id: &str,
    fluid_id: &str,
    pressure: f64,
    json: bool,
    engine: &PredictionEngine,
) -> AppResult<()> {
    let catalog = catalog_service::load_catalog(catalog_path)?;
    let request = PredictionRequest::by_id(actuator_id, fluid_id, pressure);
    let result = predict_request(&catalog, &request, engine)?;

    if json {
        print_json(&result)?;
    } else {
        if let Some(def) = catalog.actuator(actuator_id) {
            println!("Actuator: {}", def.describe());
        }
        print_result(&result);
    }
    Ok(())
}

fn cmd_request(
    catalog_path: &Path,
    request_path: &Path,
    engine: &PredictionEngine,
) -> AppResult<()> {
    let catalog = catalog_service::load_catalog(catalog_path)?;
    let request = load_request(request_path)?;
    let result = predict_request(&catalog, &request, engine)?;
    print_json(&result)
}

fn cmd_rank(
    catalog_path: &Path,
    fluid_id: &str,
    pressure: f64,
    top: Option<usize>,
    json: bool,
    engine: &PredictionEngine,
) -> AppResult<()> {
    let catalog = catalog_service::load_catalog(catalog_path)?;
    let fluid = resolve_fluid(&catalog, fluid_id)?;
    let ranking = rank_actuators(&catalog, &fluid, pressure, engine)?;

    if json {
        return print_json(&ranking);
    }

    let shown = ranking.top(top.unwrap_or(ranking.entries.len()));
    println!(
        "Ranking for fluid '{}' at {:.1} bar ({} of {} actuators):",
        ranking.fluid_id,
        ranking.pressure_bar,
        shown.len(),
        ranking.entries.len()
    );
    for entry in shown {
        print_ranked(entry);
    }
    if !ranking.skipped.is_empty() {
        println!("\nSkipped:");
        for skipped in &ranking.skipped {
            println!("  {} - {}", skipped.actuator_id, skipped.reason);
        }
    }
    Ok(())
}

fn cmd_compare(
    catalog_path: &Path,
    fluid_id: &str,
    pressure: f64,
    actuator_ids: &[String],
    engine: &PredictionEngine,
) -> AppResult<()> {
    let catalog = catalog_service::load_catalog(catalog_path)?;
    let fluid = resolve_fluid(&catalog, fluid_id)?;
    let results = af_app::compare_actuators(&catalog, actuator_ids, &fluid, pressure, engine)?;

    println!(
        "{:<14} {:>6} {:>9} {:>10} {:>9} {:>8} {:>8}  {}",
        "actuator", "score", "v [m/s]", "Q [mL/min]", "Dv50[um]", "cone", "clog", "regime"
    );
    for r in &results {
        println!(
            "{:<14} {:>6} {:>9.3} {:>10.1} {:>9.0} {:>8.1} {:>8}  {}",
            r.actuator_id,
            r.compatibility_score,
            r.exit_velocity_m_s,
            r.flow_rate_ml_min,
            r.droplet_distribution.dv50_um,
            r.cone_angle_deg,
            r.clogging_risk.label(),
            r.atomization_regime.label()
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_sweep(
    catalog_path: &Path,
    actuator_id: &str,
    fluid_id: &str,
    from: f64,
    to: f64,
    points: usize,
    output: Option<&Path>,
    engine: &PredictionEngine,
) -> AppResult<()> {
    let catalog = catalog_service::load_catalog(catalog_path)?;
    let actuator = resolve_actuator(&catalog, actuator_id)?;
    let fluid = resolve_fluid(&catalog, fluid_id)?;
    let results = sweep_pressure(&actuator, &fluid, from, to, points, engine)?;

    let mut csv = String::from(
        "pressure_bar,exit_velocity_m_s,flow_rate_ml_min,dv10_um,dv50_um,dv90_um,\
         cone_angle_deg,weber_number,regime,score\n",
    );
    for r in &results {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            r.pressure_bar,
            r.exit_velocity_m_s,
            r.flow_rate_ml_min,
            r.droplet_distribution.dv10_um,
            r.droplet_distribution.dv50_um,
            r.droplet_distribution.dv90_um,
            r.cone_angle_deg,
            r.weber_number,
            r.atomization_regime.label(),
            r.compatibility_score
        ));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} sweep points to {}", results.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", text);
    Ok(())
}

fn print_ranked(entry: &RankedActuator) {
    let r = &entry.result;
    println!(
        "  {:>2}. {} - {} ({}, {} {})",
        entry.rank,
        r.actuator_id,
        entry.actuator_name,
        r.atomization_regime.label(),
        r.compatibility_score,
        r.compatibility_band.label()
    );
}

fn print_result(r: &PredictionResult) {
    println!(
        "Prediction: {} with {} at {:.1} bar",
        r.actuator_id, r.fluid_id, r.pressure_bar
    );
    println!(
        "  Score: {} ({})",
        r.compatibility_score,
        r.compatibility_band.label()
    );
    println!("  Regime: {}", r.atomization_regime.label());
    println!("  Exit velocity: {:.3} m/s", r.exit_velocity_m_s);
    println!(
        "  Flow: {:.1} mL/min ({:.3} g/s)",
        r.flow_rate_ml_min, r.delivery_rate_g_s
    );
    println!(
        "  Cone: {:.1} deg, width {:.1} mm at 100 mm",
        r.cone_angle_deg, r.spray_width_mm
    );
    let d = &r.droplet_distribution;
    println!(
        "  Droplets: Dv10 {} / Dv50 {} / Dv90 {} um (span {:.3})",
        d.dv10_um, d.dv50_um, d.dv90_um, d.span
    );
    println!(
        "  Re = {:.1}, We = {:.2}, Oh = {:.6}",
        r.reynolds_number, r.weber_number, r.ohnesorge_number
    );
    println!("  Apparent viscosity: {} cP", r.apparent_viscosity_cp);
    println!("  Clogging risk: {}", r.clogging_risk.label());

    let s = &r.material_stress;
    println!(
        "  Material stress: swelling={} stress-cracking={} leaching={}",
        s.swelling_risk, s.stress_cracking_risk, s.leaching_risk
    );

    if !r.safety_warnings.is_empty() {
        println!("\nWarnings:");
        for w in &r.safety_warnings {
            println!("  ! {}", w);
        }
    }
    if !r.required_ppe.is_empty() {
        println!("  Required PPE: {}", r.required_ppe.join(", "));
    }
}

//! Jet breakup regime classification.

use crate::calibration::{KindProfile, RegimeThresholds};
use serde::{Deserialize, Serialize};

/// Breakup regimes ordered from least to most atomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AtomizationRegime {
    #[serde(rename = "Rayleigh")]
    Rayleigh,
    #[serde(rename = "Wind-induced")]
    WindInduced,
    #[serde(rename = "Wind-stressed")]
    WindStressed,
    #[serde(rename = "Atomization")]
    Atomization,
}

impl AtomizationRegime {
    pub fn label(self) -> &'static str {
        match self {
            Self::Rayleigh => "Rayleigh",
            Self::WindInduced => "Wind-induced",
            Self::WindStressed => "Wind-stressed",
            Self::Atomization => "Atomization",
        }
    }

    fn rank(self) -> u32 {
        self as u32
    }

    /// Number of regime steps between `self` and the designed window of an
    /// actuator kind; zero inside the window.
    pub fn steps_outside(self, profile: &KindProfile) -> u32 {
        if self < profile.regime_min {
            profile.regime_min.rank() - self.rank()
        } else if self > profile.regime_max {
            self.rank() - profile.regime_max.rank()
        } else {
            0
        }
    }
}

/// Classify from the reported dimensionless groups.
///
/// Weber number picks the base regime; a high Ohnesorge number keeps the
/// jet out of full atomization, and a low Reynolds number caps it at
/// wind-induced.
pub fn classify_regime(re: f64, we: f64, oh: f64, t: &RegimeThresholds) -> AtomizationRegime {
    let by_weber = if we < t.we_wind_induced {
        AtomizationRegime::Rayleigh
    } else if we < t.we_wind_stressed {
        AtomizationRegime::WindInduced
    } else if we < t.we_atomization || oh >= t.oh_atomization_max {
        AtomizationRegime::WindStressed
    } else {
        AtomizationRegime::Atomization
    };

    if re < t.re_min_breakup {
        by_weber.min(AtomizationRegime::WindInduced)
    } else {
        by_weber
    }
}

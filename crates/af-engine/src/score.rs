//! Compatibility score and band.

use crate::calibration::{KindProfile, ScoreWeights};
use crate::regime::AtomizationRegime;
use crate::risk::{CloggingRisk, MaterialStress};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            65..=79 => Self::Good,
            50..=64 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

/// Everything the score depends on.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub over_pressure: bool,
    pub solvent_compatible: bool,
    pub clogging: CloggingRisk,
    pub regime: AtomizationRegime,
    pub profile: &'a KindProfile,
    pub stress: MaterialStress,
}

/// Weighted deductions from 100, clamped to `0..=100`.
pub fn compatibility_score(inputs: &ScoreInputs<'_>, w: &ScoreWeights) -> u8 {
    let mut score = 100.0;

    if inputs.over_pressure {
        score -= w.over_pressure;
    }
    if !inputs.solvent_compatible {
        score -= w.material_incompatibility;
    }
    score -= match inputs.clogging {
        CloggingRisk::High => w.clogging_high,
        CloggingRisk::Moderate => w.clogging_moderate,
        CloggingRisk::Low | CloggingRisk::None => 0.0,
    };

    let steps = inputs.regime.steps_outside(inputs.profile) as f64;
    score -= (steps * w.regime_step).min(w.regime_cap);
    score -= inputs.stress.count() as f64 * w.stress_flag;

    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::KindProfiles;

    fn clean(profile: &KindProfile) -> ScoreInputs<'_> {
        ScoreInputs {
            over_pressure: false,
            solvent_compatible: true,
            clogging: CloggingRisk::None,
            regime: AtomizationRegime::Atomization,
            profile,
            stress: MaterialStress::default(),
        }
    }

    #[test]
    fn clean_configuration_scores_full() {
        let kinds = KindProfiles::default();
        let score = compatibility_score(&clean(&kinds.spray), &ScoreWeights::default());
        assert_eq!(score, 100);
        assert_eq!(ScoreBand::from_score(score), ScoreBand::Excellent);
    }

    #[test]
    fn dominant_faults_alone_are_poor() {
        let kinds = KindProfiles::default();
        let w = ScoreWeights::default();

        let mut over = clean(&kinds.spray);
        over.over_pressure = true;
        assert!(compatibility_score(&over, &w) < 50);

        let mut incompatible = clean(&kinds.spray);
        incompatible.solvent_compatible = false;
        assert!(compatibility_score(&incompatible, &w) < 50);
    }

    #[test]
    fn everything_wrong_clamps_at_zero() {
        let kinds = KindProfiles::default();
        let inputs = ScoreInputs {
            over_pressure: true,
            solvent_compatible: false,
            clogging: CloggingRisk::High,
            regime: AtomizationRegime::Rayleigh,
            profile: &kinds.fine_mist,
            stress: MaterialStress {
                swelling_risk: true,
                stress_cracking_risk: true,
                leaching_risk: true,
            },
        };
        assert_eq!(compatibility_score(&inputs, &ScoreWeights::default()), 0);
    }

    #[test]
    fn regime_penalty_is_capped() {
        let kinds = KindProfiles::default();
        let w = ScoreWeights::default();
        let mut inputs = clean(&kinds.fine_mist);

        inputs.regime = AtomizationRegime::WindStressed;
        assert_eq!(compatibility_score(&inputs, &w), 92);

        inputs.regime = AtomizationRegime::Rayleigh;
        assert_eq!(compatibility_score(&inputs, &w), 80);
    }

    #[test]
    fn clogging_and_stress_deductions() {
        let kinds = KindProfiles::default();
        let w = ScoreWeights::default();
        let mut inputs = clean(&kinds.spray);
        inputs.clogging = CloggingRisk::Moderate;
        inputs.stress.swelling_risk = true;
        assert_eq!(compatibility_score(&inputs, &w), 87);

        inputs.clogging = CloggingRisk::High;
        assert_eq!(compatibility_score(&inputs, &w), 70);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::Good);
    }

    #[test]
    fn band_edges() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(65), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(64), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(49), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Poor);
    }
}

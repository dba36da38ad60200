//! Concrete stress limit criteria for precast elements, closure joints and
//! the deck.

use serde::{Deserialize, Serialize};

use super::{TensionLimitPair, TensionStressLimit};

/// Stress limits for prestressed precast segments (LRFD 5.9.2.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrestressedElementCriteria {
    /// Temporary stresses before losses, compression (× f'ci)
    pub compression_before_losses: f64,
    /// Temporary stresses before losses, tension
    pub tension_before_losses: TensionLimitPair,

    /// Check stresses at temporary strand removal and after deck placement.
    /// Always on for spliced girders.
    pub check_temporary_stresses: bool,
    pub compression_temporary_strand_removal: f64,
    pub tension_temporary_strand_removal: TensionLimitPair,
    pub compression_after_deck_placement: f64,
    pub tension_after_deck_placement: TensionStressLimit,

    /// Service limit state after losses, permanent loads only (× f'c)
    pub compression_permanent: f64,
    /// Service limit state after losses, all loads (× f'c)
    pub compression_all_loads: f64,
    /// Fatigue (Service IA / Fatigue I) compression (× f'c)
    pub compression_fatigue: f64,
    /// Service III tension in the precompressed tensile zone, moderate corrosion
    pub tension_service_iii_moderate: TensionStressLimit,
    /// Service III tension in the precompressed tensile zone, severe corrosion
    pub tension_service_iii_severe: TensionStressLimit,

    /// Check Service I tension under permanent loads at the final interval
    pub check_final_service_i_tension: bool,
    pub tension_service_i_permanent: TensionStressLimit,
}

impl Default for PrestressedElementCriteria {
    fn default() -> Self {
        PrestressedElementCriteria {
            compression_before_losses: 0.65,
            tension_before_losses: TensionLimitPair::new(
                TensionStressLimit::with_max(0.0948, 0.2),
                TensionStressLimit::new(0.24),
            ),
            check_temporary_stresses: true,
            compression_temporary_strand_removal: 0.65,
            tension_temporary_strand_removal: TensionLimitPair::new(
                TensionStressLimit::with_max(0.0948, 0.2),
                TensionStressLimit::new(0.24),
            ),
            compression_after_deck_placement: 0.60,
            tension_after_deck_placement: TensionStressLimit::with_max(0.19, 0.6),
            compression_permanent: 0.45,
            compression_all_loads: 0.60,
            compression_fatigue: 0.40,
            tension_service_iii_moderate: TensionStressLimit::with_max(0.19, 0.6),
            tension_service_iii_severe: TensionStressLimit::with_max(0.0948, 0.3),
            check_final_service_i_tension: false,
            tension_service_i_permanent: TensionStressLimit::new(0.0),
        }
    }
}

/// Stress limits for cast-in-place closure joints (LRFD Table 5.9.2.3.1b and
/// 5.9.2.3.2b). Tension limits distinguish the precompressed tensile zone
/// from other areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosureJointCriteria {
    pub compression_before_losses: f64,
    pub tension_in_ptz_before_losses: TensionLimitPair,
    pub tension_other_before_losses: TensionLimitPair,

    pub compression_permanent: f64,
    pub compression_all_loads: f64,
    pub compression_fatigue: f64,
    pub tension_in_ptz_after_losses: TensionLimitPair,
    pub tension_other_after_losses: TensionLimitPair,

    pub check_final_service_i_tension: bool,
    pub tension_service_i_permanent: TensionStressLimit,
}

impl Default for ClosureJointCriteria {
    fn default() -> Self {
        ClosureJointCriteria {
            compression_before_losses: 0.60,
            tension_in_ptz_before_losses: TensionLimitPair::new(
                TensionStressLimit::new(0.0),
                TensionStressLimit::new(0.0948),
            ),
            tension_other_before_losses: TensionLimitPair::new(
                TensionStressLimit::new(0.0),
                TensionStressLimit::new(0.19),
            ),
            compression_permanent: 0.45,
            compression_all_loads: 0.60,
            compression_fatigue: 0.40,
            tension_in_ptz_after_losses: TensionLimitPair::new(
                TensionStressLimit::new(0.0),
                TensionStressLimit::new(0.0948),
            ),
            tension_other_after_losses: TensionLimitPair::new(
                TensionStressLimit::new(0.0),
                TensionStressLimit::new(0.19),
            ),
            check_final_service_i_tension: false,
            tension_service_i_permanent: TensionStressLimit::new(0.0),
        }
    }
}

impl ClosureJointCriteria {
    pub fn tension_before_losses(&self, in_ptz: bool) -> TensionLimitPair {
        if in_ptz {
            self.tension_in_ptz_before_losses
        } else {
            self.tension_other_before_losses
        }
    }

    pub fn tension_after_losses(&self, in_ptz: bool) -> TensionLimitPair {
        if in_ptz {
            self.tension_in_ptz_after_losses
        } else {
            self.tension_other_after_losses
        }
    }
}

/// Stress limits for a cast-in-place deck acting compositely with spliced
/// girders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckCriteria {
    pub compression_permanent: f64,
    pub compression_all_loads: f64,
    pub compression_fatigue: f64,
    pub tension: TensionLimitPair,
}

impl Default for DeckCriteria {
    fn default() -> Self {
        DeckCriteria {
            compression_permanent: 0.45,
            compression_all_loads: 0.60,
            compression_fatigue: 0.40,
            tension: TensionLimitPair::new(TensionStressLimit::new(0.0948), TensionStressLimit::new(0.24)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_rebar_not_less_than_without() {
        let pe = PrestressedElementCriteria::default();
        assert!(pe.tension_before_losses.with_rebar.coefficient >= pe.tension_before_losses.without_rebar.coefficient);

        let cj = ClosureJointCriteria::default();
        for in_ptz in [true, false] {
            let before = cj.tension_before_losses(in_ptz);
            let after = cj.tension_after_losses(in_ptz);
            assert!(before.with_rebar.coefficient >= before.without_rebar.coefficient);
            assert!(after.with_rebar.coefficient >= after.without_rebar.coefficient);
        }
    }

    #[test]
    fn test_closure_zone_selection() {
        let cj = ClosureJointCriteria::default();
        assert_eq!(cj.tension_before_losses(true).with_rebar.coefficient, 0.0948);
        assert_eq!(cj.tension_before_losses(false).with_rebar.coefficient, 0.19);
    }
}

//! # Required Concrete Strength
//!
//! Inverts the stress limit formulas: given a stress demand, what concrete
//! strength makes the demand equal the limit?
//!
//! The answer is not always a compressive strength. UHPC tension limits are
//! written in terms of the cracking strength, so the solver returns a
//! [`RequiredStrength::Tensile`] value there, and callers must keep it out of
//! f'c fields. When no strength can satisfy the demand (a capped tension
//! limit, or a zero coefficient) the result is
//! [`RequiredStrength::NoneAvailable`].
//!
//! ```rust
//! use spec_core::required_strength::{required_compressive_strength, RequiredStrength};
//!
//! // -3.0 ksi demand against a 0.60 f'c limit needs 5 ksi
//! assert_eq!(required_compressive_strength(0.60, -3.0), RequiredStrength::Compressive(5.0));
//! assert_eq!(required_compressive_strength(0.0, -3.0), RequiredStrength::NoneAvailable);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SpecResult;
use crate::limit_state::StressType;
use crate::limits::{StressLimits, TensionFormula, TensionStressLimitParameters};
use crate::location::{PointOfInterest, StressLocation};
use crate::tasks::StressCheckTask;

/// Concrete strength needed to satisfy a stress demand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum RequiredStrength {
    /// Compressive strength, f'c or f'ci (ksi)
    Compressive(f64),
    /// UHPC cracking strength (ksi)
    Tensile(f64),
    /// No concrete strength satisfies the demand
    NoneAvailable,
}

impl RequiredStrength {
    /// The required strength, if one exists
    pub fn value(&self) -> Option<f64> {
        match self {
            RequiredStrength::Compressive(f) | RequiredStrength::Tensile(f) => Some(*f),
            RequiredStrength::NoneAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, RequiredStrength::NoneAvailable)
    }

    /// Strength for comparison, with `NoneAvailable` as infinitely strong
    pub fn rank(&self) -> f64 {
        self.value().unwrap_or(f64::INFINITY)
    }
}

/// Strength needed to hold a compressive demand (ksi, negative) within
/// `-coefficient·f'c`.
pub fn required_compressive_strength(coefficient: f64, demand: f64) -> RequiredStrength {
    if coefficient == 0.0 {
        return RequiredStrength::NoneAvailable;
    }
    RequiredStrength::Compressive((demand / -coefficient).max(0.0))
}

/// Strength needed to hold a tensile demand (ksi, positive) within a
/// resolved tension limit.
pub fn required_tensile_strength(params: &TensionStressLimitParameters, demand: f64) -> RequiredStrength {
    let coefficient = params.coefficient;
    match params.formula {
        TensionFormula::LambdaSqrtFc { lambda, .. } => {
            if params.max_value.is_some_and(|max| max < demand) {
                return RequiredStrength::NoneAvailable;
            }
            let scale = lambda * coefficient;
            if scale == 0.0 {
                return if demand > 0.0 {
                    RequiredStrength::NoneAvailable
                } else {
                    RequiredStrength::Compressive(0.0)
                };
            }
            let fc = demand.signum() * (demand / scale).powi(2);
            RequiredStrength::Compressive(fc.max(0.0))
        }
        TensionFormula::PciUhpc { f_fc, strength_ratio } => {
            let limit = coefficient * f_fc;
            match strength_ratio {
                // f = (2/3)·f_fc·√(f'ci/f'c28), solved for f'ci
                Some((_, fc28)) => {
                    if demand <= 0.0 {
                        RequiredStrength::Compressive(0.0)
                    } else if limit == 0.0 {
                        RequiredStrength::NoneAvailable
                    } else {
                        RequiredStrength::Compressive(fc28 * (demand / limit).powi(2))
                    }
                }
                // limit does not depend on strength after hauling
                None if demand <= limit => RequiredStrength::Compressive(0.0),
                None => RequiredStrength::NoneAvailable,
            }
        }
        TensionFormula::Uhpc { .. } => {
            if coefficient == 0.0 {
                return if demand > 0.0 {
                    RequiredStrength::NoneAvailable
                } else {
                    RequiredStrength::Tensile(0.0)
                };
            }
            RequiredStrength::Tensile((demand / coefficient).max(0.0))
        }
    }
}

/// Solves for required concrete strength at points of interest
pub struct RequiredStrengthSolver<'a> {
    limits: &'a StressLimits<'a>,
}

impl<'a> RequiredStrengthSolver<'a> {
    pub fn new(limits: &'a StressLimits<'a>) -> Self {
        RequiredStrengthSolver { limits }
    }

    /// Concrete strength for which `demand` equals the stress limit of
    /// `task` at the point of interest.
    pub fn compute_required_concrete_strength(
        &self,
        poi: &PointOfInterest,
        stress_location: StressLocation,
        demand: f64,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<RequiredStrength> {
        let location = self.limits.concrete_location(poi, stress_location);
        let required = match task.stress_type {
            StressType::Compression => {
                let coefficient = self.limits.compression_coefficient(&location, task)?;
                required_compressive_strength(coefficient, demand)
            }
            StressType::Tension => {
                let params = self.limits.tension_parameters(&location, task, with_rebar, in_ptz)?;
                required_tensile_strength(&params, demand)
            }
        };
        debug!(poi = poi.id, demand, ?required, "required concrete strength");
        Ok(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concrete::ConcreteMaterial;
    use crate::criteria::{SpecCriteria, TensionStressLimit};
    use crate::limit_state::LimitState;
    use crate::location::SegmentKey;
    use crate::model::BridgeModel;
    use proptest::prelude::*;

    fn conventional(coefficient: f64, max: Option<f64>) -> TensionStressLimitParameters {
        TensionStressLimitParameters {
            coefficient,
            max_value: max,
            formula: TensionFormula::LambdaSqrtFc { lambda: 1.0, fc: 0.0 },
        }
    }

    #[test]
    fn test_compression_clamped_to_zero() {
        assert_eq!(required_compressive_strength(0.45, 1.0), RequiredStrength::Compressive(0.0));
    }

    #[test]
    fn test_tension_inverse() {
        let required = required_tensile_strength(&conventional(0.19, None), 0.38);
        assert!((required.value().unwrap() - 4.0).abs() < 1e-12);
        // compressive demand needs no strength
        assert_eq!(required_tensile_strength(&conventional(0.19, None), -0.5), RequiredStrength::Compressive(0.0));
    }

    #[test]
    fn test_tension_cap_has_no_solution() {
        let params = conventional(0.0948, Some(0.2));
        assert_eq!(required_tensile_strength(&params, 0.25), RequiredStrength::NoneAvailable);
        assert!(required_tensile_strength(&params, 0.15).is_available());
    }

    #[test]
    fn test_zero_coefficient() {
        let params = conventional(0.0, None);
        assert_eq!(required_tensile_strength(&params, 0.1), RequiredStrength::NoneAvailable);
        assert_eq!(required_tensile_strength(&params, 0.0), RequiredStrength::Compressive(0.0));
    }

    #[test]
    fn test_pci_uhpc_inverse() {
        let params = TensionStressLimitParameters {
            coefficient: 2.0 / 3.0,
            max_value: None,
            formula: TensionFormula::PciUhpc {
                f_fc: 1.5,
                strength_ratio: Some((10.0, 16.0)),
            },
        };
        // demand of 0.75 ksi needs f'ci = 16·(0.75/1.0)² = 9
        let required = required_tensile_strength(&params, 0.75);
        assert!((required.value().unwrap() - 9.0).abs() < 1e-12);
        // plugging back in reproduces the demand
        let check = TensionStressLimitParameters {
            formula: TensionFormula::PciUhpc {
                f_fc: 1.5,
                strength_ratio: Some((9.0, 16.0)),
            },
            ..params
        };
        assert!((check.stress() - 0.75).abs() < 1e-12);

        let after = TensionStressLimitParameters {
            formula: TensionFormula::PciUhpc {
                f_fc: 1.5,
                strength_ratio: None,
            },
            ..params
        };
        assert_eq!(required_tensile_strength(&after, 0.9), RequiredStrength::Compressive(0.0));
        assert_eq!(required_tensile_strength(&after, 1.1), RequiredStrength::NoneAvailable);
    }

    #[test]
    fn test_uhpc_returns_tensile_strength() {
        let params = TensionStressLimitParameters {
            coefficient: 0.95 * 0.85,
            max_value: None,
            formula: TensionFormula::Uhpc { cracking_strength: 0.75 },
        };
        let required = required_tensile_strength(&params, 0.5);
        assert!(matches!(required, RequiredStrength::Tensile(f) if (f - 0.5 / (0.95 * 0.85)).abs() < 1e-12));
    }

    #[test]
    fn test_solver_at_release() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let limits = StressLimits::new(&criteria, model.document, &model, &model, &model, &model, &model);
        let solver = RequiredStrengthSolver::new(&limits);
        let poi = PointOfInterest::new(1, SegmentKey::new(0, 0, 0), 600.0);

        let compression = StressCheckTask::new(0, LimitState::ServiceI, StressType::Compression, false);
        let required = solver
            .compute_required_concrete_strength(&poi, StressLocation::BottomGirder, -3.25, &compression, false, false)
            .unwrap();
        assert!((required.value().unwrap() - 5.0).abs() < 1e-12);

        let tension = StressCheckTask::new(0, LimitState::ServiceI, StressType::Tension, false);
        let required = solver
            .compute_required_concrete_strength(&poi, StressLocation::TopGirder, 0.48, &tension, true, false)
            .unwrap();
        assert!((required.value().unwrap() - 4.0).abs() < 1e-12);

        let capped = solver
            .compute_required_concrete_strength(&poi, StressLocation::TopGirder, 0.21, &tension, false, false)
            .unwrap();
        assert_eq!(capped, RequiredStrength::NoneAvailable);
    }

    #[test]
    fn test_solver_uhpc_segment() {
        let key = SegmentKey::new(0, 0, 0);
        let mut model = BridgeModel::precast_demo();
        if let Some(segment) = model.segment_mut(&key) {
            segment.concrete = ConcreteMaterial::uhpc(14.0, 22.0, 0.8, 0.75, 0.85);
        }
        let criteria = SpecCriteria::default();
        let limits = StressLimits::new(&criteria, model.document, &model, &model, &model, &model, &model);
        let solver = RequiredStrengthSolver::new(&limits);
        let poi = PointOfInterest::new(1, key, 600.0);
        let task = StressCheckTask::new(8, LimitState::ServiceIII, StressType::Tension, true);
        let required = solver
            .compute_required_concrete_strength(&poi, StressLocation::BottomGirder, 0.5, &task, false, false)
            .unwrap();
        assert!(matches!(required, RequiredStrength::Tensile(_)));
    }

    proptest! {
        #[test]
        fn prop_tension_monotonic(
            coefficient in 0.0f64..0.3,
            max in proptest::option::of(0.05f64..1.0),
            a in 0.0f64..1.5,
            b in 0.0f64..1.5,
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let limit = TensionStressLimit { coefficient, max_value: max };
            let params = TensionStressLimitParameters::lambda_sqrt_fc(limit, 1.0, 0.0);
            let r_low = required_tensile_strength(&params, low).rank();
            let r_high = required_tensile_strength(&params, high).rank();
            prop_assert!(r_low <= r_high);
        }

        #[test]
        fn prop_compression_monotonic(coefficient in 0.0f64..1.0, a in 0.0f64..10.0, b in 0.0f64..10.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let r_low = required_compressive_strength(coefficient, -low).rank();
            let r_high = required_compressive_strength(coefficient, -high).rank();
            prop_assert!(r_low <= r_high);
        }

        #[test]
        fn prop_uhpc_monotonic(gamma in 0.1f64..1.0, a in 0.0f64..2.0, b in 0.0f64..2.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let params = TensionStressLimitParameters {
                coefficient: gamma,
                max_value: None,
                formula: TensionFormula::Uhpc { cracking_strength: 0.75 },
            };
            prop_assert!(required_tensile_strength(&params, low).rank() <= required_tensile_strength(&params, high).rank());
        }
    }
}

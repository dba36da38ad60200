//! # Lifting and Hauling Stability Criteria
//!
//! Builds the criteria a girder stability analysis checks against: factors
//! of safety, impact, tolerances, allowable stresses and the modulus of
//! rupture. Criteria are built fresh for each request from the
//! specification entry and the segment concrete.
//!
//! The concrete strength comes from the material model (f'ci at lifting,
//! f'c at hauling) unless a [`HandlingConfig`] supplies a trial strength, as
//! a design loop does.
//!
//! Tension limits depend on the concrete: conventional concrete uses the
//! published `coefficient·λ·√f'c` tables, the UHPC flavors use their
//! cracking strengths. [`HandlingTensionLimit`] carries whichever applies.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::collaborators::{Bridge, Intervals, Materials};
use crate::concrete::{ConcreteMaterial, ConcreteType};
use crate::criteria::{HaulTruck, HaulingSlope, PerSlope, SpecCriteria, TensionLimitPair, TensionStressLimit};
use crate::errors::{SpecError, SpecResult};
use crate::limits::CompressionLimitKind;
use crate::location::SegmentKey;
use crate::status::{StatusCategory, StatusCenter, StatusItem, StatusSeverity};

/// Trial values used in place of the as-built segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandlingConfig {
    /// Concrete strength during handling (ksi)
    pub concrete_strength: f64,
}

/// Tension limit during handling, by concrete variant.
///
/// `T` is a [`TensionLimitPair`] for lifting and a pair per roadway slope
/// for hauling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum HandlingTensionLimit<T> {
    Conventional { lambda: f64, limits: T },
    /// (2/3)·f_fc·√(f'c/f'c28)
    PciUhpc { fc28: f64, f_fc: f64 },
    /// γu·f_t,cr
    Uhpc { gamma_u: f64, ft_cr: f64 },
}

impl<T> HandlingTensionLimit<T> {
    /// Allowable tension (ksi) for a concrete strength. `pick` chooses the
    /// published limit for conventional concrete.
    pub fn allowable(&self, fc: f64, pick: impl Fn(&T) -> TensionStressLimit) -> f64 {
        match self {
            HandlingTensionLimit::Conventional { lambda, limits } => pick(limits).stress(*lambda, fc),
            HandlingTensionLimit::PciUhpc { fc28, f_fc } => {
                let ratio = if *fc28 > 0.0 { (fc.max(0.0) / fc28).sqrt() } else { 1.0 };
                2.0 / 3.0 * f_fc * ratio
            }
            HandlingTensionLimit::Uhpc { gamma_u, ft_cr } => gamma_u * ft_cr,
        }
    }
}

impl HandlingTensionLimit<TensionLimitPair> {
    pub fn allowable_tension(&self, fc: f64, with_rebar: bool) -> f64 {
        self.allowable(fc, |pair| pair.select(with_rebar))
    }
}

impl HandlingTensionLimit<PerSlope<TensionLimitPair>> {
    pub fn allowable_tension(&self, fc: f64, slope: HaulingSlope, with_rebar: bool) -> f64 {
        self.allowable(fc, |limits| limits.get(slope).select(with_rebar))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftingFactorsOfSafety {
    pub cracking: f64,
    pub failure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HaulingFactorsOfSafety {
    pub cracking: f64,
    pub rollover: f64,
}

/// Criteria for a lifting stability analysis. Stresses are ksi, lengths
/// inches; compression is negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftingStabilityCriteria {
    pub segment: SegmentKey,
    pub concrete_type: ConcreteType,
    /// Concrete strength at lifting
    pub fc: f64,
    pub factors_of_safety: LiftingFactorsOfSafety,
    pub impact_up: f64,
    pub impact_down: f64,
    pub pick_point_height: f64,
    pub lifting_loop_tolerance: f64,
    pub min_cable_inclination: f64,
    pub sweep_tolerance: f64,
    pub sweep_growth: f64,
    pub camber_multiplier: f64,
    pub wind_pressure: f64,
    pub compression_coefficient_global: f64,
    pub compression_coefficient_peak: f64,
    pub allowable_compression_global: f64,
    pub allowable_compression_peak: f64,
    pub modulus_of_rupture: f64,
    pub tension: HandlingTensionLimit<TensionLimitPair>,
}

impl LiftingStabilityCriteria {
    pub fn allowable_tension(&self, with_rebar: bool) -> f64 {
        self.tension.allowable_tension(self.fc, with_rebar)
    }
}

/// Criteria for a hauling stability analysis. Stresses are ksi, lengths
/// inches; compression is negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaulingStabilityCriteria {
    pub segment: SegmentKey,
    pub concrete_type: ConcreteType,
    /// Concrete strength at hauling
    pub fc: f64,
    pub haul_truck: HaulTruck,
    pub factors_of_safety: HaulingFactorsOfSafety,
    pub impact_up: f64,
    pub impact_down: f64,
    pub crown_slope: f64,
    pub max_superelevation: f64,
    pub sweep_tolerance: f64,
    pub sweep_growth: f64,
    pub support_placement_tolerance: f64,
    pub camber_multiplier: f64,
    pub wind_pressure: f64,
    pub hauling_speed: f64,
    pub turning_radius: f64,
    pub compression_coefficient_global: f64,
    pub compression_coefficient_peak: f64,
    pub allowable_compression_global: f64,
    pub allowable_compression_peak: f64,
    pub modulus_of_rupture: f64,
    pub tension: HandlingTensionLimit<PerSlope<TensionLimitPair>>,
}

impl HaulingStabilityCriteria {
    pub fn allowable_tension(&self, slope: HaulingSlope, with_rebar: bool) -> f64 {
        self.tension.allowable_tension(self.fc, slope, with_rebar)
    }
}

/// Builds lifting and hauling criteria for segments
pub struct HandlingCriteriaBuilder<'a> {
    criteria: &'a SpecCriteria,
    materials: &'a dyn Materials,
    intervals: &'a dyn Intervals,
    bridge: &'a dyn Bridge,
    status: &'a dyn StatusCenter,
}

impl<'a> HandlingCriteriaBuilder<'a> {
    pub fn new(
        criteria: &'a SpecCriteria,
        materials: &'a dyn Materials,
        intervals: &'a dyn Intervals,
        bridge: &'a dyn Bridge,
        status: &'a dyn StatusCenter,
    ) -> Self {
        HandlingCriteriaBuilder {
            criteria,
            materials,
            intervals,
            bridge,
            status,
        }
    }

    pub fn is_lifting_check_enabled(&self) -> bool {
        self.criteria.lifting.enabled
    }

    pub fn is_hauling_check_enabled(&self) -> bool {
        self.criteria.hauling.enabled
    }

    /// The bridge description changed; hauling problems posted earlier may
    /// no longer apply.
    pub fn on_bridge_changed(&self) {
        self.status.remove_by_category(StatusCategory::Hauling);
    }

    fn lifting_fc(&self, segment: &SegmentKey, config: Option<&HandlingConfig>) -> SpecResult<f64> {
        match config {
            Some(config) => Ok(config.concrete_strength),
            None => {
                let lifting = self.intervals.segment_milestones(segment)?.lifting;
                self.materials.segment_fc(segment, lifting)
            }
        }
    }

    fn hauling_fc(&self, segment: &SegmentKey, config: Option<&HandlingConfig>) -> SpecResult<f64> {
        match config {
            Some(config) => Ok(config.concrete_strength),
            None => {
                let hauling = self.intervals.segment_milestones(segment)?.hauling;
                self.materials.segment_fc(segment, hauling)
            }
        }
    }

    /// Tension limit for a segment during handling. Both handling stages
    /// come before the segment sees its final cracking strength.
    fn tension_limit<T>(&self, concrete: &ConcreteMaterial, conventional: T) -> SpecResult<HandlingTensionLimit<T>> {
        match concrete.concrete_type {
            ConcreteType::PciUhpc => {
                let props = concrete.pci_uhpc_properties()?;
                Ok(HandlingTensionLimit::PciUhpc {
                    fc28: concrete.fc28,
                    f_fc: props.f_fc,
                })
            }
            ConcreteType::Uhpc => {
                let props = concrete.uhpc_properties()?;
                Ok(HandlingTensionLimit::Uhpc {
                    gamma_u: props.fiber_orientation_factor,
                    ft_cr: props.ft_cri,
                })
            }
            _ => Ok(HandlingTensionLimit::Conventional {
                lambda: concrete.lambda,
                limits: conventional,
            }),
        }
    }

    /// Modulus of rupture (ksi). UHPC flavors crack at their published
    /// cracking strength.
    fn modulus_of_rupture(&self, concrete: &ConcreteMaterial, fc: f64, lifting: bool) -> SpecResult<f64> {
        match concrete.concrete_type {
            ConcreteType::PciUhpc => Ok(concrete.pci_uhpc_properties()?.f_fc),
            ConcreteType::Uhpc => Ok(concrete.uhpc_properties()?.ft_cri),
            concrete_type => {
                let coefficients = if lifting {
                    &self.criteria.lifting.modulus_of_rupture
                } else {
                    &self.criteria.hauling.modulus_of_rupture
                };
                let coefficient = coefficients.get(concrete_type, self.criteria.edition)?;
                Ok(coefficient * concrete.lambda * fc.max(0.0).sqrt())
            }
        }
    }

    pub fn lifting_factors_of_safety(&self) -> LiftingFactorsOfSafety {
        LiftingFactorsOfSafety {
            cracking: self.criteria.lifting.fs_cracking,
            failure: self.criteria.lifting.fs_failure,
        }
    }

    pub fn hauling_factors_of_safety(&self) -> HaulingFactorsOfSafety {
        HaulingFactorsOfSafety {
            cracking: self.criteria.hauling.fs_cracking,
            rollover: self.criteria.hauling.fs_rollover,
        }
    }

    /// Allowable tension during lifting (ksi)
    pub fn lifting_allowable_tensile_stress(&self, segment: &SegmentKey, with_rebar: bool) -> SpecResult<f64> {
        let concrete = self.materials.segment_concrete(segment)?;
        let fc = self.lifting_fc(segment, None)?;
        let limit = self.tension_limit(&concrete, self.criteria.lifting.tension)?;
        Ok(limit.allowable_tension(fc, with_rebar))
    }

    /// Allowable compression during lifting (ksi, ≤ 0)
    pub fn lifting_allowable_compressive_stress(&self, segment: &SegmentKey, kind: CompressionLimitKind) -> SpecResult<f64> {
        Ok(-self.criteria.lifting.compression_coefficient(kind) * self.lifting_fc(segment, None)?)
    }

    pub fn lifting_modulus_of_rupture(&self, segment: &SegmentKey) -> SpecResult<f64> {
        let concrete = self.materials.segment_concrete(segment)?;
        let fc = self.lifting_fc(segment, None)?;
        self.modulus_of_rupture(&concrete, fc, true)
    }

    /// Allowable tension during hauling (ksi) for a roadway slope case
    pub fn hauling_allowable_tensile_stress(
        &self,
        segment: &SegmentKey,
        slope: HaulingSlope,
        with_rebar: bool,
    ) -> SpecResult<f64> {
        let concrete = self.materials.segment_concrete(segment)?;
        let fc = self.hauling_fc(segment, None)?;
        let limit = self.tension_limit(&concrete, self.criteria.hauling.tension)?;
        Ok(limit.allowable_tension(fc, slope, with_rebar))
    }

    /// Allowable compression during hauling (ksi, ≤ 0)
    pub fn hauling_allowable_compressive_stress(&self, segment: &SegmentKey, kind: CompressionLimitKind) -> SpecResult<f64> {
        Ok(-self.criteria.hauling.compression_coefficient(kind) * self.hauling_fc(segment, None)?)
    }

    pub fn hauling_modulus_of_rupture(&self, segment: &SegmentKey) -> SpecResult<f64> {
        let concrete = self.materials.segment_concrete(segment)?;
        let fc = self.hauling_fc(segment, None)?;
        self.modulus_of_rupture(&concrete, fc, false)
    }

    /// Closest a lifting point may be to the end of the segment. A negative
    /// criteria value means the girder height.
    pub fn minimum_lifting_point_location(&self, segment: &SegmentKey) -> SpecResult<f64> {
        let min = self.criteria.lifting.min_lifting_point;
        if min < 0.0 {
            self.bridge.segment_height(segment)
        } else {
            Ok(min)
        }
    }

    /// Closest a truck support may be to the end of the segment. A negative
    /// criteria value means the girder height.
    pub fn minimum_hauling_support_location(&self, segment: &SegmentKey) -> SpecResult<f64> {
        let min = self.criteria.hauling.min_bunk_point;
        if min < 0.0 {
            self.bridge.segment_height(segment)
        } else {
            Ok(min)
        }
    }

    pub fn lifting_stability_criteria(
        &self,
        segment: &SegmentKey,
        config: Option<&HandlingConfig>,
    ) -> SpecResult<LiftingStabilityCriteria> {
        let lifting = &self.criteria.lifting;
        let concrete = self.materials.segment_concrete(segment)?;
        let fc = self.lifting_fc(segment, config)?;

        let criteria = LiftingStabilityCriteria {
            segment: *segment,
            concrete_type: concrete.concrete_type,
            fc,
            factors_of_safety: self.lifting_factors_of_safety(),
            impact_up: lifting.impact_up,
            impact_down: lifting.impact_down,
            pick_point_height: lifting.pick_point_height,
            lifting_loop_tolerance: lifting.lifting_loop_tolerance,
            min_cable_inclination: lifting.min_cable_inclination,
            sweep_tolerance: lifting.sweep_tolerance,
            sweep_growth: lifting.sweep_growth,
            camber_multiplier: lifting.camber_multiplier,
            wind_pressure: lifting.wind_pressure,
            compression_coefficient_global: -lifting.compression_coefficient(CompressionLimitKind::Global),
            compression_coefficient_peak: -lifting.compression_coefficient(CompressionLimitKind::Peak),
            allowable_compression_global: -lifting.compression_coefficient(CompressionLimitKind::Global) * fc,
            allowable_compression_peak: -lifting.compression_coefficient(CompressionLimitKind::Peak) * fc,
            modulus_of_rupture: self.modulus_of_rupture(&concrete, fc, true)?,
            tension: self.tension_limit(&concrete, lifting.tension)?,
        };
        debug!(segment = %segment, fc, "built lifting stability criteria");
        Ok(criteria)
    }

    /// Hauling criteria. The segment must have a haul truck; if it does not
    /// the problem is posted to the status center.
    pub fn hauling_stability_criteria(
        &self,
        segment: &SegmentKey,
        config: Option<&HandlingConfig>,
    ) -> SpecResult<HaulingStabilityCriteria> {
        let haul_truck = match self.bridge.haul_truck(segment) {
            Some(truck) => truck,
            None => {
                let message = format!("A haul truck is not assigned to {}.", segment);
                warn!(segment = %segment, "no haul truck assigned");
                let id = self.status.add(StatusItem::new(
                    StatusCategory::Hauling,
                    StatusSeverity::Error,
                    message.clone(),
                ));
                return Err(SpecError::configuration(message, Some(id)));
            }
        };

        let hauling = &self.criteria.hauling;
        let concrete = self.materials.segment_concrete(segment)?;
        let fc = self.hauling_fc(segment, config)?;

        let criteria = HaulingStabilityCriteria {
            segment: *segment,
            concrete_type: concrete.concrete_type,
            fc,
            haul_truck,
            factors_of_safety: self.hauling_factors_of_safety(),
            impact_up: hauling.impact_up,
            impact_down: hauling.impact_down,
            crown_slope: hauling.crown_slope,
            max_superelevation: hauling.max_superelevation,
            sweep_tolerance: hauling.sweep_tolerance,
            sweep_growth: hauling.sweep_growth,
            support_placement_tolerance: hauling.support_placement_tolerance,
            camber_multiplier: hauling.camber_multiplier,
            wind_pressure: hauling.wind_pressure,
            hauling_speed: hauling.hauling_speed,
            turning_radius: hauling.turning_radius,
            compression_coefficient_global: -hauling.compression_coefficient(CompressionLimitKind::Global),
            compression_coefficient_peak: -hauling.compression_coefficient(CompressionLimitKind::Peak),
            allowable_compression_global: -hauling.compression_coefficient(CompressionLimitKind::Global) * fc,
            allowable_compression_peak: -hauling.compression_coefficient(CompressionLimitKind::Peak) * fc,
            modulus_of_rupture: self.modulus_of_rupture(&concrete, fc, false)?,
            tension: self.tension_limit(&concrete, hauling.tension)?,
        };
        debug!(segment = %segment, fc, truck = %criteria.haul_truck.name, "built hauling stability criteria");
        Ok(criteria)
    }
}

//! # Concrete Stress Limits
//!
//! Allowable concrete stresses for precast segments, cast-in-place closure
//! joints and the deck, for every stress check task.
//!
//! Sign convention: compression is negative, tension positive. Coefficient
//! queries return positive numbers; limit queries return signed stresses.
//!
//! Each interval of a segment's timeline falls into one [`IntervalClass`]
//! and every coefficient choice is a `match` over that class, the limit
//! state and whether live load is part of the demand.
//!
//! ## Example
//!
//! ```rust
//! use spec_core::collaborators::DocumentType;
//! use spec_core::criteria::SpecCriteria;
//! use spec_core::limit_state::{LimitState, StressType};
//! use spec_core::limits::StressLimits;
//! use spec_core::location::SegmentKey;
//! use spec_core::model::BridgeModel;
//! use spec_core::tasks::StressCheckTask;
//!
//! let model = BridgeModel::precast_demo();
//! let criteria = SpecCriteria::default();
//! let limits = StressLimits::new(&criteria, DocumentType::PrecastGirder, &model, &model, &model, &model, &model);
//!
//! // 0.65 f'ci at release
//! let release = StressCheckTask::new(0, LimitState::ServiceI, StressType::Compression, false);
//! let limit = limits.segment_compression_limit(&SegmentKey::new(0, 0, 0), &release).unwrap();
//! assert!((limit + 0.65 * 7.5).abs() < 1e-9);
//! ```

mod closure;
mod deck;
mod interval;
mod segment;

pub use interval::IntervalClass;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::collaborators::{DocumentType, Environment, ExposureCondition, Intervals, Materials, PointsOfInterest, RatingSpecification};
use crate::concrete::{ConcreteMaterial, ConcreteType};
use crate::criteria::{SpecCriteria, TensionStressLimit};
use crate::edition::SpecEdition;
use crate::errors::{SpecError, SpecResult};
use crate::limit_state::{LimitState, StressType};
use crate::location::{ConcreteLocation, PoiKind, PointOfInterest, StressLocation};
use crate::tasks::StressCheckTask;

/// Which of the two handling compression limits is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompressionLimitKind {
    /// Stress from the girder self-weight and prestress alone
    Global,
    /// Peak stress including lateral bending from tilt and wind
    Peak,
}

impl CompressionLimitKind {
    pub const ALL: [CompressionLimitKind; 2] = [CompressionLimitKind::Global, CompressionLimitKind::Peak];
}

/// How a tension stress limit is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TensionFormula {
    /// coefficient · λ · √f'c
    LambdaSqrtFc { lambda: f64, fc: f64 },
    /// coefficient · f_fc, scaled by √(f'ci/f'c28) until the segment is hauled
    PciUhpc {
        f_fc: f64,
        strength_ratio: Option<(f64, f64)>,
    },
    /// coefficient · f_t,cr (or f_t,cri)
    Uhpc { cracking_strength: f64 },
}

/// A resolved tension stress limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensionStressLimitParameters {
    pub coefficient: f64,
    pub max_value: Option<f64>,
    pub formula: TensionFormula,
}

impl TensionStressLimitParameters {
    /// Conventional limit from a published table
    pub fn lambda_sqrt_fc(limit: TensionStressLimit, lambda: f64, fc: f64) -> Self {
        TensionStressLimitParameters {
            coefficient: limit.coefficient,
            max_value: limit.max_value,
            formula: TensionFormula::LambdaSqrtFc { lambda, fc },
        }
    }

    pub fn has_max_value(&self) -> bool {
        self.max_value.is_some()
    }

    /// Allowable tension (ksi, positive), never above `max_value`
    pub fn stress(&self) -> f64 {
        let f = match self.formula {
            TensionFormula::LambdaSqrtFc { lambda, fc } => self.coefficient * lambda * fc.max(0.0).sqrt(),
            TensionFormula::PciUhpc { f_fc, strength_ratio } => {
                let scale = match strength_ratio {
                    Some((fci, fc28)) if fc28 > 0.0 => (fci.max(0.0) / fc28).sqrt(),
                    _ => 1.0,
                };
                self.coefficient * f_fc * scale
            }
            TensionFormula::Uhpc { cracking_strength } => self.coefficient * cracking_strength,
        };
        match self.max_value {
            Some(max) => f.min(max),
            None => f,
        }
    }
}

/// Logs and builds a contract violation
pub(crate) fn violation(operation: &str, reason: impl Into<String>) -> SpecError {
    let reason = reason.into();
    error!(operation, reason = %reason, "contract violation");
    SpecError::contract_violation(operation, reason)
}

/// Concrete stress limit evaluator
pub struct StressLimits<'a> {
    criteria: &'a SpecCriteria,
    document: DocumentType,
    materials: &'a dyn Materials,
    intervals: &'a dyn Intervals,
    pois: &'a dyn PointsOfInterest,
    environment: &'a dyn Environment,
    rating: &'a dyn RatingSpecification,
}

impl<'a> StressLimits<'a> {
    pub fn new(
        criteria: &'a SpecCriteria,
        document: DocumentType,
        materials: &'a dyn Materials,
        intervals: &'a dyn Intervals,
        pois: &'a dyn PointsOfInterest,
        environment: &'a dyn Environment,
        rating: &'a dyn RatingSpecification,
    ) -> Self {
        StressLimits {
            criteria,
            document,
            materials,
            intervals,
            pois,
            environment,
            rating,
        }
    }

    pub fn criteria(&self) -> &SpecCriteria {
        self.criteria
    }

    fn edition(&self) -> SpecEdition {
        self.criteria.edition
    }

    fn check_temporary_stresses(&self) -> bool {
        self.criteria.check_temporary_stresses(self.document)
    }

    fn check_final_dead_load_tension(&self) -> bool {
        self.criteria.check_final_dead_load_tension(self.document)
    }

    /// Concrete element at a point of interest. Girder fibers resolve to the
    /// segment or closure joint; deck fibers to the deck casting region.
    pub fn concrete_location(&self, poi: &PointOfInterest, stress_location: StressLocation) -> ConcreteLocation {
        if stress_location.is_girder() {
            match self.pois.poi_kind(poi) {
                PoiKind::Segment => ConcreteLocation::Segment(poi.segment_key),
                PoiKind::ClosureJoint => ConcreteLocation::ClosureJoint(poi.segment_key),
            }
        } else {
            ConcreteLocation::Deck {
                segment: poi.segment_key,
                region: self.pois.deck_casting_region(poi),
            }
        }
    }

    fn location_concrete(&self, location: &ConcreteLocation) -> SpecResult<ConcreteMaterial> {
        match location {
            ConcreteLocation::Segment(segment) => self.materials.segment_concrete(segment),
            ConcreteLocation::ClosureJoint(closure) => self.materials.closure_concrete(closure),
            ConcreteLocation::Deck { region, .. } => self.materials.deck_concrete(*region),
        }
    }

    /// After-losses Service III tension limit for the site exposure
    fn service_iii_tension(&self) -> TensionStressLimit {
        let pe = &self.criteria.prestressed_element;
        match self.environment.exposure_condition() {
            ExposureCondition::Normal => pe.tension_service_iii_moderate,
            ExposureCondition::Severe => pe.tension_service_iii_severe,
        }
    }

    /// Rating tension limit for a rating limit state
    fn rating_tension(&self, limit_state: LimitState) -> Option<TensionStressLimit> {
        limit_state
            .rating_type()
            .map(|rating_type| self.rating.tension_stress_limit(rating_type))
    }

    /// Positive compression coefficient at any location
    pub fn compression_coefficient(&self, location: &ConcreteLocation, task: &StressCheckTask) -> SpecResult<f64> {
        match location {
            ConcreteLocation::Segment(segment) => self.segment_compression_coefficient(segment, task),
            ConcreteLocation::ClosureJoint(closure) => self.closure_compression_coefficient(closure, task),
            ConcreteLocation::Deck { .. } => self.deck_compression_coefficient(task),
        }
    }

    /// Compression limit (ksi, ≤ 0) at any location
    pub fn compression_stress_limit(&self, location: &ConcreteLocation, task: &StressCheckTask) -> SpecResult<f64> {
        match location {
            ConcreteLocation::Segment(segment) => self.segment_compression_limit(segment, task),
            ConcreteLocation::ClosureJoint(closure) => self.closure_compression_limit(closure, task),
            ConcreteLocation::Deck { region, .. } => self.deck_compression_limit(*region, task),
        }
    }

    /// Tension limit parameters at any location. `in_ptz` only matters in
    /// closure joints.
    pub fn tension_parameters(
        &self,
        location: &ConcreteLocation,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<TensionStressLimitParameters> {
        match location {
            ConcreteLocation::Segment(segment) => self.segment_tension_parameters(segment, task, with_rebar),
            ConcreteLocation::ClosureJoint(closure) => self.closure_tension_parameters(closure, task, with_rebar, in_ptz),
            ConcreteLocation::Deck { region, .. } => self.deck_tension_parameters(*region, task, with_rebar),
        }
    }

    /// Tension limit (ksi, ≥ 0) at any location
    pub fn tension_stress_limit(
        &self,
        location: &ConcreteLocation,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<f64> {
        Ok(self.tension_parameters(location, task, with_rebar, in_ptz)?.stress())
    }

    /// Stress limit at a point of interest for either stress type
    pub fn concrete_stress_limit(
        &self,
        poi: &PointOfInterest,
        stress_location: StressLocation,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<f64> {
        let location = self.concrete_location(poi, stress_location);
        match task.stress_type {
            StressType::Compression => self.compression_stress_limit(&location, task),
            StressType::Tension => self.tension_stress_limit(&location, task, with_rebar, in_ptz),
        }
    }

    /// Compression limits at each point of interest
    pub fn compression_stress_limits_for_pois(
        &self,
        pois: &[PointOfInterest],
        stress_location: StressLocation,
        task: &StressCheckTask,
    ) -> SpecResult<Vec<f64>> {
        pois.iter()
            .map(|poi| self.compression_stress_limit(&self.concrete_location(poi, stress_location), task))
            .collect()
    }

    /// Tension limits at each point of interest
    pub fn tension_stress_limits_for_pois(
        &self,
        pois: &[PointOfInterest],
        stress_location: StressLocation,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<Vec<f64>> {
        pois.iter()
            .map(|poi| self.tension_stress_limit(&self.concrete_location(poi, stress_location), task, with_rebar, in_ptz))
            .collect()
    }

    /// Whether a stress limit exists for the task at this location.
    pub fn is_concrete_stress_limit_applicable(
        &self,
        location: &ConcreteLocation,
        task: &StressCheckTask,
    ) -> SpecResult<bool> {
        let limit_state = task.limit_state;
        let is_tension = task.stress_type == StressType::Tension;

        // Service IA became Fatigue I with the 2009 interims
        let retired = if self.edition() < SpecEdition::FourthEditionWith2009Interims {
            LimitState::FatigueI
        } else {
            LimitState::ServiceIA
        };
        if limit_state == retired {
            return Ok(false);
        }

        let bridge = self.intervals.bridge_milestones();
        let live_load = bridge.live_load;

        if is_tension && !self.check_temporary_stresses() {
            let segment = match location {
                ConcreteLocation::Segment(key) | ConcreteLocation::ClosureJoint(key) => key,
                ConcreteLocation::Deck { segment, .. } => segment,
            };
            let erection = self.intervals.segment_milestones(segment)?.erection;
            if erection <= task.interval && task.interval <= bridge.last_noncomposite {
                return Ok(false);
            }
        }

        if limit_state == LimitState::ServiceI
            && is_tension
            && !task.include_live_load
            && live_load <= task.interval
            && !self.check_final_dead_load_tension()
        {
            return Ok(false);
        }

        if limit_state.is_service_iii_family() && (task.interval < live_load || !is_tension) {
            return Ok(false);
        }

        if limit_state.is_fatigue() {
            if task.interval < live_load {
                return Ok(false);
            }
            if is_tension && self.location_concrete(location)?.concrete_type != ConcreteType::Uhpc {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

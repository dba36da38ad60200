//! # Rules Engine
//!
//! [`SpecEngine`] wires one [`EngineConfig`] to a set of collaborators and
//! hands out the components: task enumeration, stress limits, the
//! required-strength solver, splitting checks, handling criteria and table
//! lookups. Components are cheap to build and borrow everything, so the
//! engine builds them on demand instead of caching.
//!
//! ## Example
//!
//! ```rust
//! use spec_core::config::EngineConfig;
//! use spec_core::engine::{Collaborators, SpecEngine};
//! use spec_core::location::SegmentKey;
//! use spec_core::model::BridgeModel;
//! use spec_core::status::StatusLog;
//!
//! let model = BridgeModel::spliced_demo();
//! let status = StatusLog::new();
//! let config = EngineConfig::new(Default::default(), model.document);
//! let engine = SpecEngine::new(&config, Collaborators::from_model(&model, &status));
//!
//! let rows = engine.segment_stress_limit_report(&SegmentKey::new(0, 0, 1)).unwrap();
//! assert!(rows.iter().any(|row| row.applicable));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::collaborators::{
    Bridge, DocumentType, EndZone, Environment, Intervals, Library, Materials, PointsOfInterest, RatingSpecification,
};
use crate::config::EngineConfig;
use crate::criteria::SpecCriteria;
use crate::errors::SpecResult;
use crate::handling::HandlingCriteriaBuilder;
use crate::limit_state::StressType;
use crate::limits::StressLimits;
use crate::location::{ConcreteLocation, PointOfInterest, SegmentKey, StressLocation};
use crate::model::BridgeModel;
use crate::required_strength::{RequiredStrength, RequiredStrengthSolver};
use crate::splitting::{SplittingCheckArtifact, SplittingContext, SplittingDesignConfig, SplittingEngineer};
use crate::status::StatusCenter;
use crate::tables::TableLookups;
use crate::tasks::{StressCheckTask, TaskEnumerator};

/// Borrowed collaborators the engine reads through
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub materials: &'a dyn Materials,
    pub intervals: &'a dyn Intervals,
    pub pois: &'a dyn PointsOfInterest,
    pub bridge: &'a dyn Bridge,
    pub end_zone: &'a dyn EndZone,
    pub environment: &'a dyn Environment,
    pub library: &'a dyn Library,
    pub rating: &'a dyn RatingSpecification,
    pub status: &'a dyn StatusCenter,
}

impl<'a> Collaborators<'a> {
    /// Every collaborator served by one in-memory model
    pub fn from_model(model: &'a BridgeModel, status: &'a dyn StatusCenter) -> Self {
        Collaborators {
            materials: model,
            intervals: model,
            pois: model,
            bridge: model,
            end_zone: model,
            environment: model,
            library: model,
            rating: model,
            status,
        }
    }
}

/// One line of a segment stress limit report. Limits are ksi; `None` when
/// no limit applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressLimitRow {
    pub task: StressCheckTask,
    pub location: StressLocation,
    pub applicable: bool,
    pub limit: Option<f64>,
    /// Tension limit where bonded reinforcement resists the tensile force
    pub limit_with_rebar: Option<f64>,
}

pub struct SpecEngine<'a> {
    config: &'a EngineConfig,
    collaborators: Collaborators<'a>,
}

impl<'a> SpecEngine<'a> {
    pub fn new(config: &'a EngineConfig, collaborators: Collaborators<'a>) -> Self {
        info!(
            criteria = %config.criteria.name,
            edition = %config.criteria.edition,
            document = ?config.document_type,
            "rules engine ready"
        );
        SpecEngine { config, collaborators }
    }

    pub fn criteria(&self) -> &'a SpecCriteria {
        &self.config.criteria
    }

    pub fn document_type(&self) -> DocumentType {
        self.config.document_type
    }

    pub fn tasks(&self) -> TaskEnumerator<'a> {
        let c = self.collaborators;
        TaskEnumerator::new(self.criteria(), self.document_type(), c.intervals, c.bridge, c.materials)
    }

    pub fn stress_limits(&self) -> StressLimits<'a> {
        let c = self.collaborators;
        StressLimits::new(
            self.criteria(),
            self.document_type(),
            c.materials,
            c.intervals,
            c.pois,
            c.environment,
            c.rating,
        )
    }

    pub fn handling(&self) -> HandlingCriteriaBuilder<'a> {
        let c = self.collaborators;
        HandlingCriteriaBuilder::new(self.criteria(), c.materials, c.intervals, c.bridge, c.status)
    }

    pub fn tables(&self) -> TableLookups<'a> {
        let c = self.collaborators;
        TableLookups::new(self.criteria(), c.library, c.bridge, c.end_zone)
    }

    pub fn splitting_context(&self) -> SplittingContext<'a> {
        SplittingContext {
            criteria: self.criteria(),
            materials: self.collaborators.materials,
            end_zone: self.collaborators.end_zone,
        }
    }

    /// The bridge description changed
    pub fn on_bridge_changed(&self) {
        self.handling().on_bridge_changed();
    }

    /// Required concrete strength at a point of interest
    pub fn required_concrete_strength(
        &self,
        poi: &PointOfInterest,
        stress_location: StressLocation,
        demand: f64,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<RequiredStrength> {
        let limits = self.stress_limits();
        RequiredStrengthSolver::new(&limits).compute_required_concrete_strength(
            poi,
            stress_location,
            demand,
            task,
            with_rebar,
            in_ptz,
        )
    }

    /// Splitting resistance check with the engineer the segment concrete
    /// calls for
    pub fn check_splitting(
        &self,
        segment: &SegmentKey,
        design: Option<&SplittingDesignConfig>,
    ) -> SpecResult<SplittingCheckArtifact> {
        let engineer = SplittingEngineer::for_segment(self.collaborators.materials, segment)?;
        engineer.check(&self.splitting_context(), segment, design)
    }

    /// Stress limits for every task of a segment at its start. Deck rows
    /// appear once the deck over the segment has been cast.
    pub fn segment_stress_limit_report(&self, segment: &SegmentKey) -> SpecResult<Vec<StressLimitRow>> {
        let limits = self.stress_limits();
        let bridge_milestones = self.collaborators.intervals.bridge_milestones();
        let poi = PointOfInterest::new(0, *segment, 0.0);

        let mut rows = Vec::new();
        for task in self.tasks().segment_tasks(segment, false)? {
            for location in StressLocation::ALL {
                let concrete = limits.concrete_location(&poi, location);
                if let ConcreteLocation::Deck { region, .. } = concrete {
                    let cast = bridge_milestones.cast_deck.get(region).copied();
                    let deck_in_place = self.collaborators.bridge.has_structural_deck()
                        && cast.is_some_and(|cast| cast < task.interval);
                    if !deck_in_place {
                        continue;
                    }
                }

                let applicable = limits.is_concrete_stress_limit_applicable(&concrete, &task)?;
                let (limit, limit_with_rebar) = match (applicable, task.stress_type) {
                    (false, _) => (None, None),
                    (true, StressType::Compression) => (Some(limits.compression_stress_limit(&concrete, &task)?), None),
                    (true, StressType::Tension) => (
                        Some(limits.tension_stress_limit(&concrete, &task, false, true)?),
                        Some(limits.tension_stress_limit(&concrete, &task, true, true)?),
                    ),
                };
                rows.push(StressLimitRow {
                    task,
                    location,
                    applicable,
                    limit,
                    limit_with_rebar,
                });
            }
        }
        debug!(segment = %segment, rows = rows.len(), "built stress limit report");
        Ok(rows)
    }
}

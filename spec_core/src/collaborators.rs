//! # Collaborator Interfaces
//!
//! The rules engine does not own a bridge model. Everything it needs to know
//! about materials, the construction timeline, geometry and the library is
//! read through these traits. Each component takes only the collaborators it
//! uses, as borrowed trait objects.
//!
//! [`crate::model::BridgeModel`] implements all of them for tools and tests.

use serde::{Deserialize, Serialize};

use crate::concrete::ConcreteMaterial;
use crate::criteria::{GirderEntry, HaulTruck, SpecCriteria, TensionStressLimit};
use crate::errors::SpecResult;
use crate::limit_state::RatingType;
use crate::location::{EndType, GirderKey, IntervalIndex, PoiKind, PointOfInterest, SegmentKey};

/// Kind of document being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    /// Single-segment precast girders
    #[default]
    PrecastGirder,
    /// Multi-segment post-tensioned spliced girders
    SplicedGirder,
}

/// Corrosion exposure of the structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExposureCondition {
    #[default]
    Normal,
    Severe,
}

/// Timeline milestones of one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMilestones {
    pub release: IntervalIndex,
    pub lifting: IntervalIndex,
    pub storage: IntervalIndex,
    pub hauling: IntervalIndex,
    pub erection: IntervalIndex,
    #[serde(default)]
    pub temporary_strand_removal: Option<IntervalIndex>,
    #[serde(default)]
    pub tendon_stressing: Option<IntervalIndex>,
}

/// Timeline milestones shared by the whole bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeMilestones {
    pub interval_count: usize,
    pub last_noncomposite: IntervalIndex,
    /// Deck casting interval of each casting region, by region
    pub cast_deck: Vec<IntervalIndex>,
    pub railing_system: IntervalIndex,
    #[serde(default)]
    pub overlay: Option<IntervalIndex>,
    pub live_load: IntervalIndex,
}

impl BridgeMilestones {
    pub fn final_interval(&self) -> IntervalIndex {
        self.interval_count.saturating_sub(1)
    }

    pub fn first_cast_deck(&self) -> Option<IntervalIndex> {
        self.cast_deck.iter().copied().min()
    }
}

/// Material properties
pub trait Materials {
    fn segment_concrete(&self, segment: &SegmentKey) -> SpecResult<ConcreteMaterial>;
    fn closure_concrete(&self, closure: &SegmentKey) -> SpecResult<ConcreteMaterial>;
    fn deck_concrete(&self, region: usize) -> SpecResult<ConcreteMaterial>;

    /// Design compressive strength during an interval (ksi)
    fn segment_fc(&self, segment: &SegmentKey, interval: IntervalIndex) -> SpecResult<f64>;
    fn closure_fc(&self, closure: &SegmentKey, interval: IntervalIndex) -> SpecResult<f64>;
    fn deck_fc(&self, region: usize, interval: IntervalIndex) -> SpecResult<f64>;

    /// Yield strength of the transverse reinforcement in the segment (ksi)
    fn segment_transverse_rebar_fy(&self, segment: &SegmentKey) -> SpecResult<f64>;
}

/// Construction timeline
pub trait Intervals {
    fn segment_milestones(&self, segment: &SegmentKey) -> SpecResult<SegmentMilestones>;
    fn bridge_milestones(&self) -> BridgeMilestones;
    fn girder_tendon_stressing_intervals(&self, girder: &GirderKey) -> Vec<IntervalIndex>;
    fn user_defined_load_intervals(&self, girder: &GirderKey) -> Vec<IntervalIndex>;
}

/// Point of interest classification
pub trait PointsOfInterest {
    fn poi_kind(&self, poi: &PointOfInterest) -> PoiKind;
    fn deck_casting_region(&self, poi: &PointOfInterest) -> usize;
}

/// Bridge description
pub trait Bridge {
    fn group_count(&self) -> usize;
    fn girder_count(&self, group: usize) -> usize;
    fn segment_count(&self, girder: &GirderKey) -> usize;
    fn has_structural_longitudinal_joints(&self) -> bool;
    fn has_structural_deck(&self) -> bool;
    fn has_temporary_strands(&self, segment: &SegmentKey) -> bool;
    fn storage_supports_differ_from_release(&self, segment: &SegmentKey) -> bool;
    fn erection_bearings_differ_from_storage(&self, segment: &SegmentKey) -> bool;
    /// Segment length (in)
    fn segment_length(&self, segment: &SegmentKey) -> SpecResult<f64>;
    /// Overall segment height (in)
    fn segment_height(&self, segment: &SegmentKey) -> SpecResult<f64>;
    fn haul_truck(&self, segment: &SegmentKey) -> Option<HaulTruck>;
    fn girder_entry_name(&self, segment: &SegmentKey) -> SpecResult<String>;
}

/// Prestressing strand group at the ends of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrandGroup {
    pub count: usize,
    pub debonded_at_start: usize,
    pub debonded_at_end: usize,
    /// Jacking stress, fpj (ksi)
    pub jacking_stress: f64,
    /// Loss at transfer, ΔfpT (ksi)
    pub loss_at_transfer: f64,
}

impl StrandGroup {
    pub fn empty() -> Self {
        StrandGroup {
            count: 0,
            debonded_at_start: 0,
            debonded_at_end: 0,
            jacking_stress: 0.0,
            loss_at_transfer: 0.0,
        }
    }

    /// Strands bonded at the given end
    pub fn bonded_at(&self, end: EndType) -> usize {
        let debonded = match end {
            EndType::Start => self.debonded_at_start,
            EndType::End => self.debonded_at_end,
        };
        self.count.saturating_sub(debonded)
    }
}

/// Strands in a pretensioned segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrandArrangement {
    /// Area of one strand (in²)
    pub strand_area: f64,
    pub straight: StrandGroup,
    pub harped: StrandGroup,
    pub temporary: StrandGroup,
    /// Temporary strands are pretensioned with the permanent strands
    pub temporary_pretensioned: bool,
}

/// End zone geometry and prestressing used by splitting checks
pub trait EndZone {
    /// Overall height of the member at the end, h (in)
    fn splitting_zone_height(&self, segment: &SegmentKey, end: EndType) -> SpecResult<f64>;
    /// Web width resisting splitting, bv (in)
    fn splitting_web_width(&self, segment: &SegmentKey, end: EndType) -> SpecResult<f64>;
    /// Area of vertical reinforcement within `zone_length` of the end (in²)
    fn splitting_av(&self, segment: &SegmentKey, end: EndType, zone_length: f64) -> SpecResult<f64>;
    fn strands(&self, segment: &SegmentKey) -> SpecResult<StrandArrangement>;
    /// Strand transfer length (in)
    fn transfer_length(&self, segment: &SegmentKey) -> SpecResult<f64>;
    /// Development length of debonded strand (in)
    fn development_length(&self, segment: &SegmentKey) -> SpecResult<f64>;
}

/// Site environment
pub trait Environment {
    fn exposure_condition(&self) -> ExposureCondition;
}

/// Library lookups
pub trait Library {
    fn spec_entry(&self, name: &str) -> Option<&SpecCriteria>;
    fn girder_entry(&self, name: &str) -> Option<&GirderEntry>;
}

/// Load rating criteria
pub trait RatingSpecification {
    /// Concrete tension limit for a Service III rating
    fn tension_stress_limit(&self, rating_type: RatingType) -> TensionStressLimit;
}

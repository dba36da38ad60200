//! # In-Memory Bridge Model
//!
//! A serializable bridge description that implements every collaborator
//! trait the rules engine reads. Tools load one from JSON; tests build one
//! from the demo constructors and tweak it.
//!
//! Concrete strength over time is a simple step: a segment has f'ci until
//! it is hauled, a closure joint until its tendons are stressed, a deck
//! region through its casting interval.

use serde::{Deserialize, Serialize};

use crate::collaborators::{
    Bridge, BridgeMilestones, DocumentType, EndZone, Environment, ExposureCondition, Intervals, Library, Materials,
    PointsOfInterest, RatingSpecification, SegmentMilestones, StrandArrangement, StrandGroup,
};
use crate::concrete::ConcreteMaterial;
use crate::criteria::{GirderEntry, HaulTruck, SpecCriteria, TensionStressLimit};
use crate::errors::{SpecError, SpecResult};
use crate::limit_state::RatingType;
use crate::location::{EndType, GirderKey, IntervalIndex, PoiKind, PointOfInterest, SegmentKey};

/// Splitting geometry at the ends of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndZoneModel {
    /// Web width, bv (in)
    pub web_width: f64,
    /// Vertical reinforcement near each end, Av/s (in²/in), start then end
    pub av_per_length: [f64; 2],
    /// Transverse reinforcement yield strength (ksi)
    pub transverse_fy: f64,
    /// Strand transfer length (in)
    pub transfer_length: f64,
    /// Development length of debonded strand (in)
    pub development_length: f64,
}

/// A precast segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentModel {
    pub concrete: ConcreteMaterial,
    pub milestones: SegmentMilestones,
    /// Length (in)
    pub length: f64,
    /// Height (in)
    pub height: f64,
    #[serde(default)]
    pub storage_supports_differ: bool,
    #[serde(default)]
    pub erection_bearings_differ: bool,
    #[serde(default)]
    pub haul_truck: Option<HaulTruck>,
    pub girder_entry: String,
    pub end_zone: EndZoneModel,
    pub strands: StrandArrangement,
    /// Deck casting region over this segment
    #[serde(default)]
    pub deck_region: usize,
}

/// A girder line within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GirderModel {
    pub segments: Vec<SegmentModel>,
    /// Closure joint concrete; closure `i` follows segment `i`
    #[serde(default)]
    pub closures: Vec<ConcreteMaterial>,
    #[serde(default)]
    pub tendon_stressing_intervals: Vec<IntervalIndex>,
    #[serde(default)]
    pub user_load_intervals: Vec<IntervalIndex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupModel {
    pub girders: Vec<GirderModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckModel {
    pub structural: bool,
    /// Concrete of each casting region
    pub regions: Vec<ConcreteMaterial>,
}

/// Service III tension limits used for load rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingTensionLimits {
    pub design: TensionStressLimit,
    pub legal: TensionStressLimit,
    pub permit: TensionStressLimit,
}

impl Default for RatingTensionLimits {
    fn default() -> Self {
        RatingTensionLimits {
            design: TensionStressLimit::with_max(0.19, 0.6),
            legal: TensionStressLimit::with_max(0.19, 0.6),
            permit: TensionStressLimit::with_max(0.19, 0.6),
        }
    }
}

/// Complete in-memory bridge description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeModel {
    pub document: DocumentType,
    #[serde(default)]
    pub exposure: ExposureCondition,
    pub milestones: BridgeMilestones,
    pub groups: Vec<GroupModel>,
    pub deck: DeckModel,
    #[serde(default)]
    pub has_longitudinal_joints: bool,
    #[serde(default)]
    pub rating: RatingTensionLimits,
    /// Specification library
    #[serde(default)]
    pub spec_entries: Vec<SpecCriteria>,
    /// Girder library
    #[serde(default)]
    pub girder_entries: Vec<GirderEntry>,
}

impl BridgeModel {
    /// Two identical 130 ft precast girders in a single span.
    ///
    /// Timeline: release, lifting, storage, hauling, erection, temporary
    /// strand removal, deck casting, railing, live load.
    pub fn precast_demo() -> Self {
        let milestones = SegmentMilestones {
            release: 0,
            lifting: 1,
            storage: 2,
            hauling: 3,
            erection: 4,
            temporary_strand_removal: Some(5),
            tendon_stressing: None,
        };
        let segment = demo_segment(milestones, 130.0 * 12.0, 72.0);
        let girder = GirderModel {
            segments: vec![segment],
            closures: Vec::new(),
            tendon_stressing_intervals: Vec::new(),
            user_load_intervals: Vec::new(),
        };
        BridgeModel {
            document: DocumentType::PrecastGirder,
            exposure: ExposureCondition::Normal,
            milestones: BridgeMilestones {
                interval_count: 9,
                last_noncomposite: 6,
                cast_deck: vec![6],
                railing_system: 7,
                overlay: None,
                live_load: 8,
            },
            groups: vec![GroupModel {
                girders: vec![girder.clone(), girder],
            }],
            deck: DeckModel {
                structural: true,
                regions: vec![ConcreteMaterial::normal(4.0, 4.0)],
            },
            has_longitudinal_joints: false,
            rating: RatingTensionLimits::default(),
            spec_entries: vec![SpecCriteria::default()],
            girder_entries: vec![GirderEntry::new("WF72G")],
        }
    }

    /// One three-segment spliced girder with two closure joints, one girder
    /// tendon and a deck cast in two regions.
    pub fn spliced_demo() -> Self {
        let segment_milestones = |erection| SegmentMilestones {
            release: 0,
            lifting: 1,
            storage: 2,
            hauling: 3,
            erection,
            temporary_strand_removal: None,
            tendon_stressing: None,
        };
        let mut segments = vec![
            demo_segment(segment_milestones(4), 100.0 * 12.0, 84.0),
            demo_segment(segment_milestones(5), 120.0 * 12.0, 84.0),
            demo_segment(segment_milestones(5), 100.0 * 12.0, 84.0),
        ];
        segments[1].deck_region = 1;

        BridgeModel {
            document: DocumentType::SplicedGirder,
            exposure: ExposureCondition::Normal,
            milestones: BridgeMilestones {
                interval_count: 14,
                last_noncomposite: 8,
                cast_deck: vec![8, 9],
                railing_system: 10,
                overlay: Some(12),
                live_load: 13,
            },
            groups: vec![GroupModel {
                girders: vec![GirderModel {
                    segments,
                    closures: vec![ConcreteMaterial::normal(5.0, 6.0), ConcreteMaterial::normal(5.0, 6.0)],
                    tendon_stressing_intervals: vec![7],
                    user_load_intervals: vec![11, 13],
                }],
            }],
            deck: DeckModel {
                structural: true,
                regions: vec![ConcreteMaterial::normal(4.0, 4.0), ConcreteMaterial::normal(4.0, 4.0)],
            },
            has_longitudinal_joints: false,
            rating: RatingTensionLimits::default(),
            spec_entries: vec![SpecCriteria::default()],
            girder_entries: vec![GirderEntry::new("WF84G")],
        }
    }

    /// Check every concrete definition and that the live load interval
    /// falls inside the timeline.
    pub fn validate(&self) -> SpecResult<()> {
        let milestones = &self.milestones;
        if milestones.live_load >= milestones.interval_count {
            return Err(SpecError::invalid_input(
                "milestones.live_load",
                milestones.live_load.to_string(),
                "Live load interval must be inside the timeline",
            ));
        }
        for group in &self.groups {
            for girder in &group.girders {
                for segment in &girder.segments {
                    segment.concrete.validate()?;
                }
                for closure in &girder.closures {
                    closure.validate()?;
                }
            }
        }
        for region in &self.deck.regions {
            region.validate()?;
        }
        Ok(())
    }

    fn girder(&self, girder: &GirderKey) -> SpecResult<&GirderModel> {
        self.groups
            .get(girder.group)
            .and_then(|group| group.girders.get(girder.girder))
            .ok_or_else(|| SpecError::not_found("girder", format!("{:?}", girder)))
    }

    pub fn segment(&self, segment: &SegmentKey) -> SpecResult<&SegmentModel> {
        self.girder(&segment.girder_key())?
            .segments
            .get(segment.segment)
            .ok_or_else(|| SpecError::not_found("segment", segment.to_string()))
    }

    pub fn segment_mut(&mut self, segment: &SegmentKey) -> Option<&mut SegmentModel> {
        self.groups
            .get_mut(segment.group)?
            .girders
            .get_mut(segment.girder)?
            .segments
            .get_mut(segment.segment)
    }

    fn closure(&self, closure: &SegmentKey) -> SpecResult<&ConcreteMaterial> {
        self.girder(&closure.girder_key())?
            .closures
            .get(closure.segment)
            .ok_or_else(|| SpecError::not_found("closure joint", closure.to_string()))
    }

    fn deck_region(&self, region: usize) -> SpecResult<&ConcreteMaterial> {
        self.deck
            .regions
            .get(region)
            .ok_or_else(|| SpecError::not_found("deck casting region", region.to_string()))
    }
}

fn demo_segment(milestones: SegmentMilestones, length: f64, height: f64) -> SegmentModel {
    SegmentModel {
        concrete: ConcreteMaterial::normal(7.5, 10.0),
        milestones,
        length,
        height,
        storage_supports_differ: false,
        erection_bearings_differ: false,
        haul_truck: Some(HaulTruck::default_truck()),
        girder_entry: if height > 80.0 { "WF84G" } else { "WF72G" }.to_string(),
        end_zone: EndZoneModel {
            web_width: 6.125,
            av_per_length: [0.62 / 2.5, 0.62 / 2.5],
            transverse_fy: 60.0,
            transfer_length: 36.0,
            development_length: 150.0,
        },
        strands: StrandArrangement {
            strand_area: 0.217,
            straight: StrandGroup {
                count: 30,
                debonded_at_start: 6,
                debonded_at_end: 6,
                jacking_stress: 202.5,
                loss_at_transfer: 16.0,
            },
            harped: StrandGroup {
                count: 12,
                debonded_at_start: 0,
                debonded_at_end: 0,
                jacking_stress: 202.5,
                loss_at_transfer: 16.0,
            },
            temporary: StrandGroup::empty(),
            temporary_pretensioned: true,
        },
        deck_region: 0,
    }
}

impl Materials for BridgeModel {
    fn segment_concrete(&self, segment: &SegmentKey) -> SpecResult<ConcreteMaterial> {
        Ok(self.segment(segment)?.concrete.clone())
    }

    fn closure_concrete(&self, closure: &SegmentKey) -> SpecResult<ConcreteMaterial> {
        self.closure(closure).cloned()
    }

    fn deck_concrete(&self, region: usize) -> SpecResult<ConcreteMaterial> {
        self.deck_region(region).cloned()
    }

    fn segment_fc(&self, segment: &SegmentKey, interval: IntervalIndex) -> SpecResult<f64> {
        let model = self.segment(segment)?;
        Ok(if interval < model.milestones.hauling {
            model.concrete.fci
        } else {
            model.concrete.fc28
        })
    }

    fn closure_fc(&self, closure: &SegmentKey, interval: IntervalIndex) -> SpecResult<f64> {
        let concrete = self.closure(closure)?;
        let first_stressing = self
            .girder(&closure.girder_key())?
            .tendon_stressing_intervals
            .iter()
            .copied()
            .min();
        Ok(match first_stressing {
            Some(stressing) if interval <= stressing => concrete.fci,
            _ => concrete.fc28,
        })
    }

    fn deck_fc(&self, region: usize, interval: IntervalIndex) -> SpecResult<f64> {
        let concrete = self.deck_region(region)?;
        let cast = self.milestones.cast_deck.get(region).copied().unwrap_or(0);
        Ok(if interval <= cast { concrete.fci } else { concrete.fc28 })
    }

    fn segment_transverse_rebar_fy(&self, segment: &SegmentKey) -> SpecResult<f64> {
        Ok(self.segment(segment)?.end_zone.transverse_fy)
    }
}

impl Intervals for BridgeModel {
    fn segment_milestones(&self, segment: &SegmentKey) -> SpecResult<SegmentMilestones> {
        Ok(self.segment(segment)?.milestones)
    }

    fn bridge_milestones(&self) -> BridgeMilestones {
        self.milestones.clone()
    }

    fn girder_tendon_stressing_intervals(&self, girder: &GirderKey) -> Vec<IntervalIndex> {
        self.girder(girder)
            .map(|g| g.tendon_stressing_intervals.clone())
            .unwrap_or_default()
    }

    fn user_defined_load_intervals(&self, girder: &GirderKey) -> Vec<IntervalIndex> {
        self.girder(girder).map(|g| g.user_load_intervals.clone()).unwrap_or_default()
    }
}

impl PointsOfInterest for BridgeModel {
    /// Points beyond the end of a segment lie in the closure joint that
    /// follows it.
    fn poi_kind(&self, poi: &PointOfInterest) -> PoiKind {
        match self.segment(&poi.segment_key) {
            Ok(segment) if poi.distance_from_start > segment.length => PoiKind::ClosureJoint,
            _ => PoiKind::Segment,
        }
    }

    fn deck_casting_region(&self, poi: &PointOfInterest) -> usize {
        self.segment(&poi.segment_key).map(|s| s.deck_region).unwrap_or(0)
    }
}

impl Bridge for BridgeModel {
    fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn girder_count(&self, group: usize) -> usize {
        self.groups.get(group).map(|g| g.girders.len()).unwrap_or(0)
    }

    fn segment_count(&self, girder: &GirderKey) -> usize {
        self.girder(girder).map(|g| g.segments.len()).unwrap_or(0)
    }

    fn has_structural_longitudinal_joints(&self) -> bool {
        self.has_longitudinal_joints
    }

    fn has_structural_deck(&self) -> bool {
        self.deck.structural
    }

    fn has_temporary_strands(&self, segment: &SegmentKey) -> bool {
        self.segment(segment).map(|s| s.strands.temporary.count > 0).unwrap_or(false)
    }

    fn storage_supports_differ_from_release(&self, segment: &SegmentKey) -> bool {
        self.segment(segment).map(|s| s.storage_supports_differ).unwrap_or(false)
    }

    fn erection_bearings_differ_from_storage(&self, segment: &SegmentKey) -> bool {
        self.segment(segment).map(|s| s.erection_bearings_differ).unwrap_or(false)
    }

    fn segment_length(&self, segment: &SegmentKey) -> SpecResult<f64> {
        Ok(self.segment(segment)?.length)
    }

    fn segment_height(&self, segment: &SegmentKey) -> SpecResult<f64> {
        Ok(self.segment(segment)?.height)
    }

    fn haul_truck(&self, segment: &SegmentKey) -> Option<HaulTruck> {
        self.segment(segment).ok().and_then(|s| s.haul_truck.clone())
    }

    fn girder_entry_name(&self, segment: &SegmentKey) -> SpecResult<String> {
        Ok(self.segment(segment)?.girder_entry.clone())
    }
}

impl EndZone for BridgeModel {
    fn splitting_zone_height(&self, segment: &SegmentKey, _end: EndType) -> SpecResult<f64> {
        Ok(self.segment(segment)?.height)
    }

    fn splitting_web_width(&self, segment: &SegmentKey, _end: EndType) -> SpecResult<f64> {
        Ok(self.segment(segment)?.end_zone.web_width)
    }

    fn splitting_av(&self, segment: &SegmentKey, end: EndType, zone_length: f64) -> SpecResult<f64> {
        let av_s = self.segment(segment)?.end_zone.av_per_length;
        let av_s = match end {
            EndType::Start => av_s[0],
            EndType::End => av_s[1],
        };
        Ok(av_s * zone_length)
    }

    fn strands(&self, segment: &SegmentKey) -> SpecResult<StrandArrangement> {
        Ok(self.segment(segment)?.strands)
    }

    fn transfer_length(&self, segment: &SegmentKey) -> SpecResult<f64> {
        Ok(self.segment(segment)?.end_zone.transfer_length)
    }

    fn development_length(&self, segment: &SegmentKey) -> SpecResult<f64> {
        Ok(self.segment(segment)?.end_zone.development_length)
    }
}

impl Environment for BridgeModel {
    fn exposure_condition(&self) -> ExposureCondition {
        self.exposure
    }
}

impl Library for BridgeModel {
    fn spec_entry(&self, name: &str) -> Option<&SpecCriteria> {
        self.spec_entries.iter().find(|entry| entry.name == name)
    }

    fn girder_entry(&self, name: &str) -> Option<&GirderEntry> {
        self.girder_entries.iter().find(|entry| entry.name == name)
    }
}

impl RatingSpecification for BridgeModel {
    fn tension_stress_limit(&self, rating_type: RatingType) -> TensionStressLimit {
        match rating_type {
            RatingType::DesignInventory | RatingType::DesignOperating => self.rating.design,
            RatingType::LegalRoutine | RatingType::LegalSpecial | RatingType::LegalEmergency => self.rating.legal,
            RatingType::PermitRoutine | RatingType::PermitSpecial => self.rating.permit,
        }
    }
}

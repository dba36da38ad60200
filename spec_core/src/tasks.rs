//! # Stress Check Tasks
//!
//! A [`StressCheckTask`] names one concrete stress check: an interval, a
//! limit state, a stress type and whether live load is part of the demand.
//! [`TaskEnumerator`] walks the construction timeline of a segment (or every
//! segment of a girder) and produces the checks the specification requires.
//!
//! Task lists are always sorted by (interval, limit state, stress type,
//! live load) and contain no duplicates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collaborators::{Bridge, DocumentType, Intervals, Materials};
use crate::concrete::ConcreteType;
use crate::criteria::SpecCriteria;
use crate::errors::SpecResult;
use crate::limit_state::{LimitState, StressType};
use crate::location::{GirderKey, GirderSelection, GroupSelector, IntervalIndex, SegmentKey};

/// One concrete stress check. Ordering is lexicographic in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StressCheckTask {
    pub interval: IntervalIndex,
    pub limit_state: LimitState,
    pub stress_type: StressType,
    pub include_live_load: bool,
}

impl StressCheckTask {
    pub fn new(interval: IntervalIndex, limit_state: LimitState, stress_type: StressType, include_live_load: bool) -> Self {
        StressCheckTask {
            interval,
            limit_state,
            stress_type,
            include_live_load,
        }
    }
}

impl std::fmt::Display for StressCheckTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Interval {} {} {}{}",
            self.interval + 1,
            self.limit_state,
            self.stress_type,
            if self.include_live_load { "" } else { " (without live load)" }
        )
    }
}

/// A segment, or every segment of a girder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskMember {
    Segment(SegmentKey),
    Girder(GirderKey),
}

/// Enumerates the stress checks required over the construction timeline.
pub struct TaskEnumerator<'a> {
    criteria: &'a SpecCriteria,
    document: DocumentType,
    intervals: &'a dyn Intervals,
    bridge: &'a dyn Bridge,
    materials: &'a dyn Materials,
}

impl<'a> TaskEnumerator<'a> {
    pub fn new(
        criteria: &'a SpecCriteria,
        document: DocumentType,
        intervals: &'a dyn Intervals,
        bridge: &'a dyn Bridge,
        materials: &'a dyn Materials,
    ) -> Self {
        TaskEnumerator {
            criteria,
            document,
            intervals,
            bridge,
            materials,
        }
    }

    /// Temporary stresses are always checked for spliced girders.
    pub fn check_temporary_stresses(&self) -> bool {
        self.criteria.check_temporary_stresses(self.document)
    }

    /// Service I tension under permanent loads at the final interval
    pub fn check_final_dead_load_tension(&self) -> bool {
        self.criteria.check_final_dead_load_tension(self.document)
    }

    pub fn stress_check_tasks(&self, member: TaskMember, design: bool) -> SpecResult<Vec<StressCheckTask>> {
        match member {
            TaskMember::Segment(segment) => self.segment_tasks(&segment, design),
            TaskMember::Girder(girder) => self.girder_tasks(&girder, design),
        }
    }

    /// Stress checks for one segment.
    ///
    /// In design mode temporary strand removal is checked even if the
    /// segment currently has no temporary strands, since the design may add
    /// them.
    pub fn segment_tasks(&self, segment: &SegmentKey, design: bool) -> SpecResult<Vec<StressCheckTask>> {
        let mut tasks = BTreeSet::new();
        self.collect_segment_tasks(segment, design, &mut tasks)?;
        debug!(segment = %segment, design, count = tasks.len(), "enumerated stress check tasks");
        Ok(tasks.into_iter().collect())
    }

    /// Stress checks for every segment of a girder
    pub fn girder_tasks(&self, girder: &GirderKey, design: bool) -> SpecResult<Vec<StressCheckTask>> {
        let mut tasks = BTreeSet::new();
        for segment in 0..self.bridge.segment_count(girder) {
            self.collect_segment_tasks(&girder.segment(segment), design, &mut tasks)?;
        }
        debug!(group = girder.group, girder = girder.girder, design, count = tasks.len(), "enumerated stress check tasks");
        Ok(tasks.into_iter().collect())
    }

    /// Distinct intervals with stress checks. With `GroupSelector::All` every
    /// group is visited, using the last girder of a group when the group has
    /// fewer girders than requested.
    pub fn stress_check_intervals(&self, selection: GirderSelection, design: bool) -> SpecResult<Vec<IntervalIndex>> {
        let groups = match selection.group {
            GroupSelector::All => 0..self.bridge.group_count(),
            GroupSelector::Group(group) => group..group + 1,
        };

        let mut intervals = BTreeSet::new();
        for group in groups {
            let girder_count = self.bridge.girder_count(group);
            if girder_count == 0 {
                continue;
            }
            let girder = GirderKey::new(group, selection.girder.min(girder_count - 1));
            intervals.extend(self.girder_tasks(&girder, design)?.into_iter().map(|task| task.interval));
        }
        Ok(intervals.into_iter().collect())
    }

    fn collect_segment_tasks(
        &self,
        segment: &SegmentKey,
        design: bool,
        tasks: &mut BTreeSet<StressCheckTask>,
    ) -> SpecResult<()> {
        let milestones = self.intervals.segment_milestones(segment)?;
        let bridge = self.intervals.bridge_milestones();
        let live_load = bridge.live_load;
        let final_interval = bridge.final_interval();

        tasks.insert(StressCheckTask::new(milestones.release, LimitState::ServiceI, StressType::Compression, false));
        tasks.insert(StressCheckTask::new(milestones.release, LimitState::ServiceI, StressType::Tension, false));

        if self.check_temporary_stresses() {
            if let Some(removal) = milestones.temporary_strand_removal {
                if design || self.bridge.has_temporary_strands(segment) {
                    add_service_tasks(tasks, removal, live_load);
                }
            }

            add_service_tasks(tasks, bridge.last_noncomposite, live_load);

            if self.bridge.has_structural_longitudinal_joints() && self.bridge.has_structural_deck() {
                if let Some(cast_deck) = bridge.first_cast_deck() {
                    add_service_tasks(tasks, cast_deck, live_load);
                }
            }
        }

        tasks.insert(StressCheckTask::new(final_interval, LimitState::ServiceI, StressType::Compression, false));
        if self.check_final_dead_load_tension() {
            tasks.insert(StressCheckTask::new(final_interval, LimitState::ServiceI, StressType::Tension, false));
        }
        tasks.insert(StressCheckTask::new(final_interval, LimitState::ServiceIII, StressType::Tension, true));
        tasks.insert(StressCheckTask::new(final_interval, LimitState::ServiceI, StressType::Compression, true));

        let fatigue = self.criteria.edition.fatigue_limit_state();
        tasks.insert(StressCheckTask::new(final_interval, fatigue, StressType::Compression, true));
        if self.materials.segment_concrete(segment)?.concrete_type == ConcreteType::Uhpc {
            tasks.insert(StressCheckTask::new(final_interval, fatigue, StressType::Tension, true));
        }

        if self.document == DocumentType::SplicedGirder {
            if self.bridge.storage_supports_differ_from_release(segment) {
                add_service_tasks(tasks, milestones.storage, live_load);
            }
            if self.bridge.erection_bearings_differ_from_storage(segment) {
                add_service_tasks(tasks, milestones.erection, live_load);
            }

            // erecting a later segment changes the support conditions of this one
            let girder = segment.girder_key();
            for other in 0..self.bridge.segment_count(&girder) {
                let erection = self.intervals.segment_milestones(&girder.segment(other))?.erection;
                if milestones.erection < erection {
                    add_service_tasks(tasks, erection, live_load);
                }
            }

            if let Some(stressing) = milestones.tendon_stressing {
                add_service_tasks(tasks, stressing, live_load);
            }
            for stressing in self.intervals.girder_tendon_stressing_intervals(&girder) {
                add_service_tasks(tasks, stressing, live_load);
            }
            for cast_deck in &bridge.cast_deck {
                add_service_tasks(tasks, *cast_deck, live_load);
            }
            for load in self.intervals.user_defined_load_intervals(&girder) {
                add_service_tasks(tasks, load, live_load);
            }
            add_service_tasks(tasks, bridge.railing_system, live_load);
            if let Some(overlay) = bridge.overlay {
                add_service_tasks(tasks, overlay, live_load);
            }
        }

        Ok(())
    }
}

/// Service I compression, plus tension checked with Service I before live
/// load is on the bridge and Service III afterwards.
fn add_service_tasks(tasks: &mut BTreeSet<StressCheckTask>, interval: IntervalIndex, live_load: IntervalIndex) {
    let with_live_load = live_load <= interval;
    let tension_limit_state = if with_live_load {
        LimitState::ServiceIII
    } else {
        LimitState::ServiceI
    };
    tasks.insert(StressCheckTask::new(interval, LimitState::ServiceI, StressType::Compression, with_live_load));
    tasks.insert(StressCheckTask::new(interval, tension_limit_state, StressType::Tension, with_live_load));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concrete::ConcreteMaterial;
    use crate::edition::SpecEdition;
    use crate::model::BridgeModel;

    fn enumerator<'a>(model: &'a BridgeModel, criteria: &'a SpecCriteria) -> TaskEnumerator<'a> {
        TaskEnumerator::new(criteria, model.document, model, model, model)
    }

    fn is_sorted_unique(tasks: &[StressCheckTask]) -> bool {
        tasks.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn test_precast_tasks() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let tasks = enumerator(&model, &criteria).segment_tasks(&SegmentKey::new(0, 0, 0), false).unwrap();
        assert!(is_sorted_unique(&tasks));

        let bridge = model.milestones.clone();
        let final_interval = bridge.final_interval();
        assert!(tasks.contains(&StressCheckTask::new(0, LimitState::ServiceI, StressType::Compression, false)));
        assert!(tasks.contains(&StressCheckTask::new(0, LimitState::ServiceI, StressType::Tension, false)));
        assert!(tasks.contains(&StressCheckTask::new(bridge.last_noncomposite, LimitState::ServiceI, StressType::Tension, false)));
        assert!(tasks.contains(&StressCheckTask::new(final_interval, LimitState::ServiceI, StressType::Compression, false)));
        assert!(tasks.contains(&StressCheckTask::new(final_interval, LimitState::ServiceIII, StressType::Tension, true)));
        assert!(tasks.contains(&StressCheckTask::new(final_interval, LimitState::ServiceI, StressType::Compression, true)));
        assert!(tasks.contains(&StressCheckTask::new(final_interval, LimitState::FatigueI, StressType::Compression, true)));
        // final dead load tension is off by default
        assert!(!tasks.contains(&StressCheckTask::new(final_interval, LimitState::ServiceI, StressType::Tension, false)));
    }

    #[test]
    fn test_stress_check_tasks_dispatch() {
        let model = BridgeModel::spliced_demo();
        let criteria = SpecCriteria::default();
        let e = enumerator(&model, &criteria);
        let segment = SegmentKey::new(0, 0, 1);
        assert_eq!(
            e.stress_check_tasks(TaskMember::Segment(segment), false).unwrap(),
            e.segment_tasks(&segment, false).unwrap()
        );
        let girder = GirderKey::new(0, 0);
        assert_eq!(
            e.stress_check_tasks(TaskMember::Girder(girder), true).unwrap(),
            e.girder_tasks(&girder, true).unwrap()
        );
    }

    #[test]
    fn test_final_dead_load_tension_policy() {
        let model = BridgeModel::precast_demo();
        let mut criteria = SpecCriteria::default();
        criteria.prestressed_element.check_final_service_i_tension = true;
        let tasks = enumerator(&model, &criteria).segment_tasks(&SegmentKey::new(0, 0, 0), false).unwrap();
        let final_interval = model.milestones.final_interval();
        assert!(tasks.contains(&StressCheckTask::new(final_interval, LimitState::ServiceI, StressType::Tension, false)));
    }

    #[test]
    fn test_service_ia_before_2009_interims() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::for_edition(SpecEdition::FourthEdition2007);
        let tasks = enumerator(&model, &criteria).segment_tasks(&SegmentKey::new(0, 0, 0), false).unwrap();
        assert!(tasks.iter().any(|t| t.limit_state == LimitState::ServiceIA));
        assert!(!tasks.iter().any(|t| t.limit_state == LimitState::FatigueI));
    }

    #[test]
    fn test_temporary_strand_removal_in_design_mode() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let removal = model.groups[0].girders[0].segments[0]
            .milestones
            .temporary_strand_removal
            .unwrap();
        let key = SegmentKey::new(0, 0, 0);
        let e = enumerator(&model, &criteria);

        // demo segment has no temporary strands
        let check = e.segment_tasks(&key, false).unwrap();
        assert!(!check.iter().any(|t| t.interval == removal));

        let design = e.segment_tasks(&key, true).unwrap();
        assert!(design.contains(&StressCheckTask::new(removal, LimitState::ServiceI, StressType::Compression, false)));
        assert!(design.contains(&StressCheckTask::new(removal, LimitState::ServiceI, StressType::Tension, false)));
    }

    #[test]
    fn test_temporary_stress_policy_off() {
        let model = BridgeModel::precast_demo();
        let mut criteria = SpecCriteria::default();
        criteria.prestressed_element.check_temporary_stresses = false;
        let tasks = enumerator(&model, &criteria).segment_tasks(&SegmentKey::new(0, 0, 0), true).unwrap();
        let last_noncomposite = model.milestones.last_noncomposite;
        assert!(!tasks.iter().any(|t| t.interval == last_noncomposite));
    }

    #[test]
    fn test_uhpc_adds_fatigue_tension() {
        let key = SegmentKey::new(0, 0, 0);
        let criteria = SpecCriteria::default();

        let mut uhpc = BridgeModel::precast_demo();
        uhpc.segment_mut(&key).unwrap().concrete = ConcreteMaterial::uhpc(14.0, 22.0, 0.75, 0.75, 0.85);
        let final_interval = uhpc.milestones.final_interval();
        let fatigue_tension = StressCheckTask::new(final_interval, LimitState::FatigueI, StressType::Tension, true);
        let tasks = enumerator(&uhpc, &criteria).segment_tasks(&key, false).unwrap();
        assert!(tasks.contains(&fatigue_tension));

        let mut pci = BridgeModel::precast_demo();
        pci.segment_mut(&key).unwrap().concrete = ConcreteMaterial::pci_uhpc(10.0, 17.4, 1.5, 0.75);
        let tasks = enumerator(&pci, &criteria).segment_tasks(&key, false).unwrap();
        assert!(!tasks.contains(&fatigue_tension));
    }

    #[test]
    fn test_storage_interval_policy() {
        let key = SegmentKey::new(0, 0, 1);
        let criteria = SpecCriteria::default();

        let model = BridgeModel::spliced_demo();
        let storage = model.groups[0].girders[0].segments[1].milestones.storage;
        let tasks = enumerator(&model, &criteria).segment_tasks(&key, false).unwrap();
        assert!(!tasks.iter().any(|t| t.interval == storage));

        let mut model = BridgeModel::spliced_demo();
        model.segment_mut(&key).unwrap().storage_supports_differ = true;
        let tasks = enumerator(&model, &criteria).segment_tasks(&key, false).unwrap();
        let at_storage: Vec<_> = tasks.iter().filter(|t| t.interval == storage).collect();
        assert_eq!(at_storage.len(), 2);
        assert!(tasks.contains(&StressCheckTask::new(storage, LimitState::ServiceI, StressType::Compression, false)));
        assert!(tasks.contains(&StressCheckTask::new(storage, LimitState::ServiceI, StressType::Tension, false)));
    }

    #[test]
    fn test_spliced_girder_triggers() {
        let model = BridgeModel::spliced_demo();
        let criteria = SpecCriteria::default();
        let e = enumerator(&model, &criteria);
        let girder = &model.groups[0].girders[0];

        // first segment sees the erection of the later segments
        let tasks = e.segment_tasks(&SegmentKey::new(0, 0, 0), false).unwrap();
        assert!(is_sorted_unique(&tasks));
        let later_erection = girder.segments[2].milestones.erection;
        assert!(tasks.iter().any(|t| t.interval == later_erection));

        for stressing in &girder.tendon_stressing_intervals {
            assert!(tasks.contains(&StressCheckTask::new(*stressing, LimitState::ServiceI, StressType::Tension, false)));
        }
        for cast in &model.milestones.cast_deck {
            assert!(tasks.iter().any(|t| t.interval == *cast));
        }
        assert!(tasks.iter().any(|t| t.interval == model.milestones.railing_system));

        // user loads after live load switch tension to Service III
        let live_load = model.milestones.live_load;
        for load in &girder.user_load_intervals {
            let expected = if *load < live_load { LimitState::ServiceI } else { LimitState::ServiceIII };
            assert!(tasks.contains(&StressCheckTask::new(*load, expected, StressType::Tension, live_load <= *load)));
        }

        // the last segment erected has no later erection tasks
        let last = e.segment_tasks(&SegmentKey::new(0, 0, 2), false).unwrap();
        assert!(!last.iter().any(|t| t.interval == girder.segments[0].milestones.erection));
    }

    #[test]
    fn test_girder_tasks_union() {
        let model = BridgeModel::spliced_demo();
        let criteria = SpecCriteria::default();
        let e = enumerator(&model, &criteria);
        let girder = e.girder_tasks(&GirderKey::new(0, 0), false).unwrap();
        assert!(is_sorted_unique(&girder));
        for segment in 0..3 {
            for task in e.segment_tasks(&SegmentKey::new(0, 0, segment), false).unwrap() {
                assert!(girder.contains(&task));
            }
        }
    }

    #[test]
    fn test_stress_check_intervals_all_groups() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let e = enumerator(&model, &criteria);
        let selection = GirderSelection {
            group: GroupSelector::All,
            girder: 99,
        };
        let intervals = e.stress_check_intervals(selection, false).unwrap();
        assert!(intervals.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(intervals[0], 0);
        assert_eq!(*intervals.last().unwrap(), model.milestones.final_interval());

        let single = e
            .stress_check_intervals(
                GirderSelection {
                    group: GroupSelector::Group(0),
                    girder: 0,
                },
                false,
            )
            .unwrap();
        assert_eq!(single, intervals);
    }

    #[test]
    fn test_task_display() {
        let task = StressCheckTask::new(3, LimitState::ServiceI, StressType::Compression, false);
        assert_eq!(task.to_string(), "Interval 4 Service I Compression (without live load)");
    }
}

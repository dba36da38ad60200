//! Interval classification for stress limit selection.

use serde::{Deserialize, Serialize};

use super::StressLimits;
use crate::collaborators::DocumentType;
use crate::errors::SpecResult;
use crate::location::{IntervalIndex, SegmentKey};

/// Where an interval falls in the life of a segment, as far as the stress
/// limits are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalClass {
    Lifting,
    /// Storage up to, but not including, hauling
    StorageThroughHauling,
    Hauling,
    TemporaryStrandRemoval,
    /// Release of the strands or stressing of a tendon
    Stressing,
    BeforeLiveLoad { before_railing: bool },
    LiveLoad,
}

impl IntervalClass {
    /// Before-losses limits govern
    pub fn is_before_losses(&self) -> bool {
        matches!(self, IntervalClass::StorageThroughHauling | IntervalClass::Stressing)
    }
}

impl<'a> StressLimits<'a> {
    /// Classify an interval for a precast segment. The first rule that
    /// matches wins.
    pub fn classify_segment_interval(&self, segment: &SegmentKey, interval: IntervalIndex) -> SpecResult<IntervalClass> {
        let milestones = self.intervals.segment_milestones(segment)?;
        let bridge = self.intervals.bridge_milestones();

        let class = if interval == milestones.lifting {
            IntervalClass::Lifting
        } else if milestones.storage <= interval && interval < milestones.hauling {
            IntervalClass::StorageThroughHauling
        } else if interval == milestones.hauling {
            IntervalClass::Hauling
        } else if self.document == DocumentType::PrecastGirder
            && self.check_temporary_stresses()
            && milestones.temporary_strand_removal == Some(interval)
        {
            IntervalClass::TemporaryStrandRemoval
        } else if interval == milestones.release
            || milestones.tendon_stressing == Some(interval)
            || self.is_girder_stressing_interval(segment, interval)
        {
            IntervalClass::Stressing
        } else if interval < bridge.live_load {
            IntervalClass::BeforeLiveLoad {
                before_railing: interval < bridge.railing_system,
            }
        } else {
            IntervalClass::LiveLoad
        };
        Ok(class)
    }

    /// Classify an interval for a closure joint. Closures are never handled
    /// and have no temporary strands.
    pub fn classify_closure_interval(&self, closure: &SegmentKey, interval: IntervalIndex) -> SpecResult<IntervalClass> {
        let bridge = self.intervals.bridge_milestones();
        let segment_stressing = self.intervals.segment_milestones(closure)?.tendon_stressing == Some(interval);

        let class = if segment_stressing || self.is_girder_stressing_interval(closure, interval) {
            IntervalClass::Stressing
        } else if interval < bridge.live_load {
            IntervalClass::BeforeLiveLoad {
                before_railing: interval < bridge.railing_system,
            }
        } else {
            IntervalClass::LiveLoad
        };
        Ok(class)
    }

    fn is_girder_stressing_interval(&self, segment: &SegmentKey, interval: IntervalIndex) -> bool {
        self.intervals
            .girder_tendon_stressing_intervals(&segment.girder_key())
            .contains(&interval)
    }
}

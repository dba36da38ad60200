//! Keys that identify girders, segments and points of interest.

use serde::{Deserialize, Serialize};

/// Index into the construction timeline
pub type IntervalIndex = usize;

/// A girder within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GirderKey {
    pub group: usize,
    pub girder: usize,
}

impl GirderKey {
    pub fn new(group: usize, girder: usize) -> Self {
        GirderKey { group, girder }
    }

    pub fn segment(&self, segment: usize) -> SegmentKey {
        SegmentKey {
            group: self.group,
            girder: self.girder,
            segment,
        }
    }
}

/// A precast segment. Closure joints share the key of the segment at their
/// start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    pub group: usize,
    pub girder: usize,
    pub segment: usize,
}

impl SegmentKey {
    pub fn new(group: usize, girder: usize, segment: usize) -> Self {
        SegmentKey { group, girder, segment }
    }

    pub fn girder_key(&self) -> GirderKey {
        GirderKey::new(self.group, self.girder)
    }
}

impl std::fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Group {} Girder {} Segment {}",
            self.group + 1,
            (b'A' + (self.girder % 26) as u8) as char,
            self.segment + 1
        )
    }
}

/// Which group(s) a girder query spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupSelector {
    All,
    Group(usize),
}

/// Girder selection for queries that may span every group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GirderSelection {
    pub group: GroupSelector,
    pub girder: usize,
}

/// A location along a segment where stresses are checked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: u64,
    pub segment_key: SegmentKey,
    /// Distance from the start of the segment (in)
    pub distance_from_start: f64,
}

impl PointOfInterest {
    pub fn new(id: u64, segment_key: SegmentKey, distance_from_start: f64) -> Self {
        PointOfInterest {
            id,
            segment_key,
            distance_from_start,
        }
    }
}

/// Kind of girder concrete at a point of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoiKind {
    Segment,
    ClosureJoint,
}

/// Fiber of the section where a stress is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressLocation {
    BottomGirder,
    TopGirder,
    BottomDeck,
    TopDeck,
}

impl StressLocation {
    pub const ALL: [StressLocation; 4] = [
        StressLocation::BottomGirder,
        StressLocation::TopGirder,
        StressLocation::BottomDeck,
        StressLocation::TopDeck,
    ];

    pub fn is_girder(&self) -> bool {
        matches!(self, StressLocation::BottomGirder | StressLocation::TopGirder)
    }
}

/// Concrete element a stress limit is evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcreteLocation {
    Segment(SegmentKey),
    ClosureJoint(SegmentKey),
    Deck { segment: SegmentKey, region: usize },
}

/// End of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndType {
    Start,
    End,
}

impl EndType {
    pub const BOTH: [EndType; 2] = [EndType::Start, EndType::End];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_key_display() {
        assert_eq!(SegmentKey::new(0, 1, 2).to_string(), "Group 1 Girder B Segment 3");
    }

    #[test]
    fn test_girder_key_roundtrip() {
        let girder = GirderKey::new(2, 3);
        assert_eq!(girder.segment(4).girder_key(), girder);
    }

    #[test]
    fn test_stress_location_is_girder() {
        assert!(StressLocation::TopGirder.is_girder());
        assert!(!StressLocation::BottomDeck.is_girder());
    }
}

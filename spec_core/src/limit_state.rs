//! Limit states, stress types and load rating types
//!
//! Declaration order of [`LimitState`] is its sort order. Stress check task
//! lists depend on that order, so new variants go at the end.

use serde::{Deserialize, Serialize};

/// AASHTO LRFD limit states that carry concrete stress checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LimitState {
    /// Service I - permanent and transient loads, compression and final tension
    ServiceI,
    /// Service IA - fatigue compression (editions before the 2009 interims)
    ServiceIA,
    /// Service III - tension in prestressed concrete
    ServiceIII,
    /// Fatigue I - replaces Service IA from the 2009 interims on
    FatigueI,
    /// Service III, design load rating, inventory level
    ServiceIIIInventory,
    /// Service III, design load rating, operating level
    ServiceIIIOperating,
    /// Service III, legal load rating, routine commercial traffic
    ServiceIIILegalRoutine,
    /// Service III, legal load rating, specialized hauling vehicles
    ServiceIIILegalSpecial,
    /// Service III, legal load rating, emergency vehicles
    ServiceIIILegalEmergency,
    /// Service I, permit load rating, routine permits
    ServiceIPermitRoutine,
    /// Service I, permit load rating, special permits
    ServiceIPermitSpecial,
}

impl LimitState {
    /// All limit states in sort order
    pub const ALL: [LimitState; 11] = [
        LimitState::ServiceI,
        LimitState::ServiceIA,
        LimitState::ServiceIII,
        LimitState::FatigueI,
        LimitState::ServiceIIIInventory,
        LimitState::ServiceIIIOperating,
        LimitState::ServiceIIILegalRoutine,
        LimitState::ServiceIIILegalSpecial,
        LimitState::ServiceIIILegalEmergency,
        LimitState::ServiceIPermitRoutine,
        LimitState::ServiceIPermitSpecial,
    ];

    /// Report label
    pub fn code(&self) -> &'static str {
        match self {
            LimitState::ServiceI => "Service I",
            LimitState::ServiceIA => "Service IA",
            LimitState::ServiceIII => "Service III",
            LimitState::FatigueI => "Fatigue I",
            LimitState::ServiceIIIInventory => "Service III (Inventory)",
            LimitState::ServiceIIIOperating => "Service III (Operating)",
            LimitState::ServiceIIILegalRoutine => "Service III (Legal Routine)",
            LimitState::ServiceIIILegalSpecial => "Service III (Legal Special)",
            LimitState::ServiceIIILegalEmergency => "Service III (Legal Emergency)",
            LimitState::ServiceIPermitRoutine => "Service I (Routine Permit)",
            LimitState::ServiceIPermitSpecial => "Service I (Special Permit)",
        }
    }

    /// Service IA or Fatigue I
    pub fn is_fatigue(&self) -> bool {
        matches!(self, LimitState::ServiceIA | LimitState::FatigueI)
    }

    /// Service III and its load rating variants
    pub fn is_service_iii_family(&self) -> bool {
        matches!(
            self,
            LimitState::ServiceIII
                | LimitState::ServiceIIIInventory
                | LimitState::ServiceIIIOperating
                | LimitState::ServiceIIILegalRoutine
                | LimitState::ServiceIIILegalSpecial
                | LimitState::ServiceIIILegalEmergency
        )
    }

    /// Service I and its permit rating variants
    pub fn is_service_i_family(&self) -> bool {
        matches!(
            self,
            LimitState::ServiceI | LimitState::ServiceIPermitRoutine | LimitState::ServiceIPermitSpecial
        )
    }

    /// Load rating limit states
    pub fn is_rating(&self) -> bool {
        self.rating_type().is_some()
    }

    /// Load rating type this limit state belongs to, if any
    pub fn rating_type(&self) -> Option<RatingType> {
        match self {
            LimitState::ServiceIIIInventory => Some(RatingType::DesignInventory),
            LimitState::ServiceIIIOperating => Some(RatingType::DesignOperating),
            LimitState::ServiceIIILegalRoutine => Some(RatingType::LegalRoutine),
            LimitState::ServiceIIILegalSpecial => Some(RatingType::LegalSpecial),
            LimitState::ServiceIIILegalEmergency => Some(RatingType::LegalEmergency),
            LimitState::ServiceIPermitRoutine => Some(RatingType::PermitRoutine),
            LimitState::ServiceIPermitSpecial => Some(RatingType::PermitSpecial),
            _ => None,
        }
    }
}

impl std::fmt::Display for LimitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Sense of a concrete stress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressType {
    Tension,
    Compression,
}

impl std::fmt::Display for StressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressType::Tension => write!(f, "Tension"),
            StressType::Compression => write!(f, "Compression"),
        }
    }
}

/// Load rating types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingType {
    DesignInventory,
    DesignOperating,
    LegalRoutine,
    LegalSpecial,
    LegalEmergency,
    PermitRoutine,
    PermitSpecial,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_state_families() {
        assert!(LimitState::ServiceIA.is_fatigue());
        assert!(LimitState::FatigueI.is_fatigue());
        assert!(!LimitState::ServiceIII.is_fatigue());

        for ls in LimitState::ALL {
            // every limit state belongs to exactly one family
            let families = [ls.is_fatigue(), ls.is_service_iii_family(), ls.is_service_i_family()];
            assert_eq!(families.iter().filter(|b| **b).count(), 1, "{:?}", ls);
        }
    }

    #[test]
    fn test_rating_types() {
        assert_eq!(LimitState::ServiceIIIInventory.rating_type(), Some(RatingType::DesignInventory));
        assert_eq!(LimitState::ServiceIPermitSpecial.rating_type(), Some(RatingType::PermitSpecial));
        assert!(!LimitState::ServiceIII.is_rating());
        assert!(LimitState::ServiceIIILegalRoutine.is_rating());
    }

    #[test]
    fn test_sort_order_follows_declaration() {
        let mut sorted = LimitState::ALL;
        sorted.sort();
        assert_eq!(sorted, LimitState::ALL);
        assert!(StressType::Tension < StressType::Compression);
    }
}

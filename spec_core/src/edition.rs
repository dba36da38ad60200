//! AASHTO LRFD Bridge Design Specification editions
//!
//! Editions are totally ordered by publication date, so edition gates are
//! written as plain comparisons:
//!
//! ```
//! use spec_core::edition::SpecEdition;
//!
//! let edition = SpecEdition::NinthEdition2020;
//! assert!(SpecEdition::FourthEditionWith2009Interims <= edition);
//! assert_eq!(edition.code(), "AASHTO LRFD 9th Edition, 2020");
//! ```

use serde::{Deserialize, Serialize};

/// Code section references used by edition-gated checks.
pub mod lrfd_ref {
    /// Splitting resistance of pretensioned anchorage zones (before 8th edition numbering)
    pub const SPLITTING: &str = "LRFD 5.10.10.1";
    /// Splitting resistance, 8th edition numbering
    pub const SPLITTING_2017: &str = "LRFD 5.9.4.4.1";
    /// Confinement reinforcement
    pub const CONFINEMENT: &str = "LRFD 5.9.4.4.2";
    /// Maximum transverse reinforcement spacing
    pub const MAX_STIRRUP_SPACING: &str = "LRFD 5.7.2.6";
    /// Tendon duct size and curvature
    pub const DUCTS: &str = "LRFD 5.4.6";
    /// Splitting resistance of UHPC anchorage zones
    pub const UHPC_SPLITTING: &str = "GS 1.9.4.4.1";
    /// Splitting resistance of PCI-UHPC anchorage zones
    pub const PCI_UHPC_SPLITTING: &str = "PCI UHPC SDG E.9.4.4.1";
}

/// Specification edition, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecEdition {
    FirstEdition1994,
    FirstEditionWith1996Interims,
    FirstEditionWith1997Interims,
    SecondEdition1998,
    SecondEditionWith1999Interims,
    SecondEditionWith2000Interims,
    SecondEditionWith2001Interims,
    SecondEditionWith2002Interims,
    SecondEditionWith2003Interims,
    ThirdEdition2004,
    ThirdEditionWith2005Interims,
    ThirdEditionWith2006Interims,
    FourthEdition2007,
    FourthEditionWith2008Interims,
    FourthEditionWith2009Interims,
    FifthEdition2010,
    SixthEdition2012,
    SixthEditionWith2013Interims,
    SeventhEdition2014,
    SeventhEditionWith2015Interims,
    SeventhEditionWith2016Interims,
    EighthEdition2017,
    NinthEdition2020,
    TenthEdition2024,
}

impl SpecEdition {
    /// All editions, oldest first
    pub const ALL: [SpecEdition; 24] = [
        SpecEdition::FirstEdition1994,
        SpecEdition::FirstEditionWith1996Interims,
        SpecEdition::FirstEditionWith1997Interims,
        SpecEdition::SecondEdition1998,
        SpecEdition::SecondEditionWith1999Interims,
        SpecEdition::SecondEditionWith2000Interims,
        SpecEdition::SecondEditionWith2001Interims,
        SpecEdition::SecondEditionWith2002Interims,
        SpecEdition::SecondEditionWith2003Interims,
        SpecEdition::ThirdEdition2004,
        SpecEdition::ThirdEditionWith2005Interims,
        SpecEdition::ThirdEditionWith2006Interims,
        SpecEdition::FourthEdition2007,
        SpecEdition::FourthEditionWith2008Interims,
        SpecEdition::FourthEditionWith2009Interims,
        SpecEdition::FifthEdition2010,
        SpecEdition::SixthEdition2012,
        SpecEdition::SixthEditionWith2013Interims,
        SpecEdition::SeventhEdition2014,
        SpecEdition::SeventhEditionWith2015Interims,
        SpecEdition::SeventhEditionWith2016Interims,
        SpecEdition::EighthEdition2017,
        SpecEdition::NinthEdition2020,
        SpecEdition::TenthEdition2024,
    ];

    /// Latest supported edition
    pub const LATEST: SpecEdition = SpecEdition::TenthEdition2024;

    /// Human-readable edition name
    pub fn code(&self) -> &'static str {
        match self {
            SpecEdition::FirstEdition1994 => "AASHTO LRFD 1st Edition, 1994",
            SpecEdition::FirstEditionWith1996Interims => "AASHTO LRFD 1st Edition with 1996 interim provisions",
            SpecEdition::FirstEditionWith1997Interims => "AASHTO LRFD 1st Edition with 1996 and 1997 interim provisions",
            SpecEdition::SecondEdition1998 => "AASHTO LRFD 2nd Edition, 1998",
            SpecEdition::SecondEditionWith1999Interims => "AASHTO LRFD 2nd Edition with 1999 interim provisions",
            SpecEdition::SecondEditionWith2000Interims => "AASHTO LRFD 2nd Edition with 1999 - 2000 interim provisions",
            SpecEdition::SecondEditionWith2001Interims => "AASHTO LRFD 2nd Edition with 1999 - 2001 interim provisions",
            SpecEdition::SecondEditionWith2002Interims => "AASHTO LRFD 2nd Edition with 1999 - 2002 interim provisions",
            SpecEdition::SecondEditionWith2003Interims => "AASHTO LRFD 2nd Edition with 1999 - 2003 interim provisions",
            SpecEdition::ThirdEdition2004 => "AASHTO LRFD 3rd Edition, 2004",
            SpecEdition::ThirdEditionWith2005Interims => "AASHTO LRFD 3rd Edition with 2005 interim provisions",
            SpecEdition::ThirdEditionWith2006Interims => "AASHTO LRFD 3rd Edition with 2005 and 2006 interim provisions",
            SpecEdition::FourthEdition2007 => "AASHTO LRFD 4th Edition, 2007",
            SpecEdition::FourthEditionWith2008Interims => "AASHTO LRFD 4th Edition with 2008 interim provisions",
            SpecEdition::FourthEditionWith2009Interims => "AASHTO LRFD 4th Edition with 2008 and 2009 interim provisions",
            SpecEdition::FifthEdition2010 => "AASHTO LRFD 5th Edition, 2010",
            SpecEdition::SixthEdition2012 => "AASHTO LRFD 6th Edition, 2012",
            SpecEdition::SixthEditionWith2013Interims => "AASHTO LRFD 6th Edition with 2013 interim provisions",
            SpecEdition::SeventhEdition2014 => "AASHTO LRFD 7th Edition, 2014",
            SpecEdition::SeventhEditionWith2015Interims => "AASHTO LRFD 7th Edition with 2015 interim provisions",
            SpecEdition::SeventhEditionWith2016Interims => "AASHTO LRFD 7th Edition with 2016 interim provisions",
            SpecEdition::EighthEdition2017 => "AASHTO LRFD 8th Edition, 2017",
            SpecEdition::NinthEdition2020 => "AASHTO LRFD 9th Edition, 2020",
            SpecEdition::TenthEdition2024 => "AASHTO LRFD 10th Edition, 2024",
        }
    }

    /// Short key used on the command line (e.g. "9th2020")
    pub fn key(&self) -> &'static str {
        match self {
            SpecEdition::FirstEdition1994 => "1st1994",
            SpecEdition::FirstEditionWith1996Interims => "1st1996",
            SpecEdition::FirstEditionWith1997Interims => "1st1997",
            SpecEdition::SecondEdition1998 => "2nd1998",
            SpecEdition::SecondEditionWith1999Interims => "2nd1999",
            SpecEdition::SecondEditionWith2000Interims => "2nd2000",
            SpecEdition::SecondEditionWith2001Interims => "2nd2001",
            SpecEdition::SecondEditionWith2002Interims => "2nd2002",
            SpecEdition::SecondEditionWith2003Interims => "2nd2003",
            SpecEdition::ThirdEdition2004 => "3rd2004",
            SpecEdition::ThirdEditionWith2005Interims => "3rd2005",
            SpecEdition::ThirdEditionWith2006Interims => "3rd2006",
            SpecEdition::FourthEdition2007 => "4th2007",
            SpecEdition::FourthEditionWith2008Interims => "4th2008",
            SpecEdition::FourthEditionWith2009Interims => "4th2009",
            SpecEdition::FifthEdition2010 => "5th2010",
            SpecEdition::SixthEdition2012 => "6th2012",
            SpecEdition::SixthEditionWith2013Interims => "6th2013",
            SpecEdition::SeventhEdition2014 => "7th2014",
            SpecEdition::SeventhEditionWith2015Interims => "7th2015",
            SpecEdition::SeventhEditionWith2016Interims => "7th2016",
            SpecEdition::EighthEdition2017 => "8th2017",
            SpecEdition::NinthEdition2020 => "9th2020",
            SpecEdition::TenthEdition2024 => "10th2024",
        }
    }

    /// Parse a key produced by [`SpecEdition::key`]
    pub fn from_key(key: &str) -> Option<SpecEdition> {
        SpecEdition::ALL.iter().copied().find(|e| e.key() == key)
    }

    /// Fatigue limit state used for concrete compression checks.
    ///
    /// Service IA was replaced by Fatigue I in the 2009 interim provisions.
    pub fn fatigue_limit_state(&self) -> crate::limit_state::LimitState {
        if *self < SpecEdition::FourthEditionWith2009Interims {
            crate::limit_state::LimitState::ServiceIA
        } else {
            crate::limit_state::LimitState::FatigueI
        }
    }

    /// All-lightweight and sand-lightweight concrete share one set of
    /// factors starting with the 2016 interim provisions.
    pub fn merges_lightweight_concrete(&self) -> bool {
        SpecEdition::SeventhEditionWith2016Interims <= *self
    }
}

impl Default for SpecEdition {
    fn default() -> Self {
        SpecEdition::NinthEdition2020
    }
}

impl std::fmt::Display for SpecEdition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unit system a specification entry is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecUnits {
    #[default]
    US,
    SI,
}

//! Girder library entries: debonding limits for a girder family.

use serde::{Deserialize, Serialize};

/// Limits on the debonded length of a strand. Each rule that is enabled can
/// only shorten the default limit of half the girder length less the
/// development length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxDebondLength {
    /// Limit to a fraction of the girder length
    pub span_fraction: Option<f64>,
    /// Limit to a fixed length (in)
    pub hard_length: Option<f64>,
}

/// A girder library entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GirderEntry {
    pub name: String,
    /// Max fraction of all strands that may be debonded
    pub max_debond_fraction_total: f64,
    /// Max fraction of the strands in a row that may be debonded
    pub max_debond_fraction_per_row: f64,
    /// Max number of strands whose debonding terminates at one section
    pub max_debonded_per_section: usize,
    /// Max fraction of debonded strands terminating at one section
    pub max_debond_fraction_per_section: f64,
    /// Min distance between debond termination sections (in)
    pub min_debond_section_distance: f64,
    pub max_debond_length: MaxDebondLength,
}

impl GirderEntry {
    /// Typical limits used by the AASHTO LRFD commentary
    pub fn new(name: impl Into<String>) -> Self {
        GirderEntry {
            name: name.into(),
            max_debond_fraction_total: 0.25,
            max_debond_fraction_per_row: 0.40,
            max_debonded_per_section: 4,
            max_debond_fraction_per_section: 0.40,
            min_debond_section_distance: 36.0,
            max_debond_length: MaxDebondLength {
                span_fraction: None,
                hard_length: None,
            },
        }
    }
}

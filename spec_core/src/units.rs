//! # Unit Types
//!
//! Lightweight newtype wrappers for lengths published in mixed units.
//! Internally the engine works in US customary units:
//! - Length: inches (in)
//! - Stress: kips per square inch (ksi)
//! - Force: kips
//!
//! Specification entries written in SI units still produce values in these
//! units; table constants published in millimetres are converted on the way
//! out.
//!
//! ## Example
//!
//! ```rust
//! use spec_core::units::{Feet, Inches, Millimeters};
//!
//! let radius: Inches = Feet(20.0).into();
//! assert_eq!(radius.0, 240.0);
//!
//! let web: Inches = Millimeters(127.0).into();
//! assert!((web.0 - 5.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(mm.0 / MM_PER_INCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let inches: Inches = Feet(12.0).into();
        assert_eq!(inches.0, 144.0);
    }

    #[test]
    fn test_millimeters_to_inches() {
        let inches: Inches = Millimeters(50.8).into();
        assert!((inches.0 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Inches(0.5)).unwrap();
        assert_eq!(json, "0.5");
    }
}

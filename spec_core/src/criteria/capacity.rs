//! Resistance factors, end zone, duct size and prestressing steel criteria.

use serde::{Deserialize, Serialize};

use super::ByConcreteType;

/// Flexural resistance factors for one concrete type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlexureResistanceFactors {
    /// Tension-controlled prestressed sections
    pub tension_ps: f64,
    /// Tension-controlled reinforced sections
    pub tension_rc: f64,
    /// Tension-controlled spliced girder sections
    pub tension_spliced: f64,
    /// Compression-controlled sections
    pub compression: f64,
}

impl FlexureResistanceFactors {
    pub const fn new(tension_ps: f64, tension_rc: f64, tension_spliced: f64, compression: f64) -> Self {
        FlexureResistanceFactors {
            tension_ps,
            tension_rc,
            tension_spliced,
            compression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentCapacityCriteria {
    pub phi: ByConcreteType<FlexureResistanceFactors>,
    pub phi_closure_joint: ByConcreteType<f64>,
    /// Modulus of rupture for cracking moment (× λ√f'c)
    pub modulus_of_rupture: ByConcreteType<f64>,
}

impl Default for MomentCapacityCriteria {
    fn default() -> Self {
        let conventional = FlexureResistanceFactors::new(1.00, 0.90, 1.00, 0.75);
        MomentCapacityCriteria {
            phi: ByConcreteType::new(
                conventional,
                conventional,
                conventional,
                conventional,
                FlexureResistanceFactors::new(0.90, 0.90, 1.00, 0.75),
            ),
            phi_closure_joint: ByConcreteType::new(0.95, 0.90, 0.90, 0.95, 0.95),
            modulus_of_rupture: ByConcreteType::new(0.37, 0.17, 0.20, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShearCapacityCriteria {
    pub phi: ByConcreteType<f64>,
    /// Applies to sections with debonded strands, 8th edition and later
    pub phi_debonded: ByConcreteType<f64>,
    pub phi_closure_joint: ByConcreteType<f64>,
    /// Coefficients on dv for low and high shear stress
    pub stirrup_spacing_coefficient: [f64; 2],
    /// Absolute maximum spacing for low and high shear stress (in)
    pub max_stirrup_spacing: [f64; 2],
}

impl Default for ShearCapacityCriteria {
    fn default() -> Self {
        ShearCapacityCriteria {
            phi: ByConcreteType::new(0.9, 0.7, 0.7, 0.9, 0.9),
            phi_debonded: ByConcreteType::new(0.85, 0.85, 0.85, 0.9, 0.9),
            phi_closure_joint: ByConcreteType::new(0.90, 0.70, 0.70, 0.90, 0.90),
            stirrup_spacing_coefficient: [0.8, 0.4],
            max_stirrup_spacing: [24.0, 12.0],
        }
    }
}

/// Tendon duct size limits (LRFD 5.4.6.2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuctSizeCriteria {
    /// Max ratio of strand area to duct area, push method
    pub area_ratio_push: f64,
    /// Max ratio of strand area to duct area, pull method
    pub area_ratio_pull: f64,
    /// Max ratio of duct diameter to web thickness
    pub diameter_ratio: f64,
}

impl Default for DuctSizeCriteria {
    fn default() -> Self {
        DuctSizeCriteria {
            area_ratio_push: 0.4,
            area_ratio_pull: 0.5,
            diameter_ratio: 0.4,
        }
    }
}

/// Splitting and confinement design at member ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndZoneCriteria {
    pub check_splitting: bool,
    pub design_splitting: bool,
    /// n in the splitting zone length h/n
    pub splitting_zone_length_factor: f64,
    pub check_confinement: bool,
    pub design_confinement: bool,
}

impl Default for EndZoneCriteria {
    fn default() -> Self {
        EndZoneCriteria {
            check_splitting: true,
            design_splitting: true,
            splitting_zone_length_factor: 4.0,
            check_confinement: true,
            design_confinement: true,
        }
    }
}

/// Coefficients for stress-relieved and low-relaxation strand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrandStressCoefficients {
    pub stress_relieved: f64,
    pub low_relaxation: f64,
}

/// Prestressing steel stress limits (LRFD Table 5.9.2.2-1). Jacking and
/// transfer limits multiply fpu; the after-losses limit multiplies fpy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrandStressCriteria {
    pub check_at_jacking: bool,
    pub at_jacking: StrandStressCoefficients,
    pub check_before_transfer: bool,
    pub before_transfer: StrandStressCoefficients,
    pub check_after_transfer: bool,
    pub after_transfer: StrandStressCoefficients,
    pub check_after_losses: bool,
    pub after_losses: StrandStressCoefficients,
}

impl Default for StrandStressCriteria {
    fn default() -> Self {
        StrandStressCriteria {
            check_at_jacking: false,
            at_jacking: StrandStressCoefficients {
                stress_relieved: 0.72,
                low_relaxation: 0.78,
            },
            check_before_transfer: true,
            before_transfer: StrandStressCoefficients {
                stress_relieved: 0.70,
                low_relaxation: 0.75,
            },
            check_after_transfer: false,
            after_transfer: StrandStressCoefficients {
                stress_relieved: 0.70,
                low_relaxation: 0.74,
            },
            check_after_losses: true,
            after_losses: StrandStressCoefficients {
                stress_relieved: 0.80,
                low_relaxation: 0.80,
            },
        }
    }
}

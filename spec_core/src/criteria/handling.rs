//! Lifting and hauling criteria, and haul truck definitions.

use serde::{Deserialize, Serialize};

use super::{TensionLimitPair, TensionStressLimit};
use crate::concrete::ConcreteType;
use crate::edition::SpecEdition;
use crate::errors::{SpecError, SpecResult};
use crate::limits::CompressionLimitKind;

/// Roadway slope case considered during hauling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HaulingSlope {
    CrownSlope,
    Superelevation,
}

impl HaulingSlope {
    pub const ALL: [HaulingSlope; 2] = [HaulingSlope::CrownSlope, HaulingSlope::Superelevation];
}

/// A value for each hauling slope case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerSlope<T> {
    pub crown_slope: T,
    pub superelevation: T,
}

impl<T: Copy> PerSlope<T> {
    pub fn get(&self, slope: HaulingSlope) -> T {
        match slope {
            HaulingSlope::CrownSlope => self.crown_slope,
            HaulingSlope::Superelevation => self.superelevation,
        }
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> PerSlope<U> {
        PerSlope {
            crown_slope: f(self.crown_slope),
            superelevation: f(self.superelevation),
        }
    }
}

/// Modulus of rupture coefficients (× λ√f'c, √ksi) for conventional concrete.
/// UHPC variants crack at their own published cracking strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModulusOfRuptureCoefficients {
    pub normal: f64,
    pub sand_lightweight: f64,
    pub all_lightweight: f64,
}

impl ModulusOfRuptureCoefficients {
    pub fn get(&self, concrete_type: ConcreteType, edition: SpecEdition) -> SpecResult<f64> {
        match concrete_type {
            ConcreteType::Normal => Ok(self.normal),
            ConcreteType::SandLightweight => Ok(self.sand_lightweight),
            ConcreteType::AllLightweight if edition.merges_lightweight_concrete() => Ok(self.sand_lightweight),
            ConcreteType::AllLightweight => Ok(self.all_lightweight),
            ConcreteType::PciUhpc | ConcreteType::Uhpc => Err(SpecError::contract_violation(
                "modulus_of_rupture_coefficient",
                format!("{} has no modulus of rupture coefficient", concrete_type),
            )),
        }
    }
}

impl Default for ModulusOfRuptureCoefficients {
    fn default() -> Self {
        ModulusOfRuptureCoefficients {
            normal: 0.24,
            sand_lightweight: 0.21,
            all_lightweight: 0.18,
        }
    }
}

/// Lifting stability criteria from the specification entry.
///
/// Lengths are inches. A negative `min_lifting_point` means "use the girder
/// height".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftingCriteria {
    pub enabled: bool,
    pub fs_cracking: f64,
    pub fs_failure: f64,
    pub impact_up: f64,
    pub impact_down: f64,
    pub pick_point_height: f64,
    pub lifting_loop_tolerance: f64,
    /// Minimum cable inclination from horizontal (degrees)
    pub min_cable_inclination: f64,
    /// Sweep tolerance (in/in of girder length)
    pub sweep_tolerance: f64,
    pub sweep_growth: f64,
    pub camber_multiplier: f64,
    /// Wind pressure (ksf)
    pub wind_pressure: f64,
    pub min_lifting_point: f64,
    pub lifting_point_accuracy: f64,
    pub compression_global: f64,
    pub compression_peak: f64,
    pub tension: TensionLimitPair,
    pub modulus_of_rupture: ModulusOfRuptureCoefficients,
}

impl Default for LiftingCriteria {
    fn default() -> Self {
        LiftingCriteria {
            enabled: true,
            fs_cracking: 1.0,
            fs_failure: 1.5,
            impact_up: 0.0,
            impact_down: 0.0,
            pick_point_height: 0.0,
            lifting_loop_tolerance: 1.0,
            min_cable_inclination: 90.0,
            sweep_tolerance: 1.0 / 16.0 / 120.0,
            sweep_growth: 0.0,
            camber_multiplier: 1.0,
            wind_pressure: 0.0,
            min_lifting_point: -1.0,
            lifting_point_accuracy: 3.0,
            compression_global: 0.65,
            compression_peak: 0.70,
            tension: TensionLimitPair::new(TensionStressLimit::with_max(0.0948, 0.2), TensionStressLimit::new(0.24)),
            modulus_of_rupture: ModulusOfRuptureCoefficients::default(),
        }
    }
}

impl LiftingCriteria {
    /// Positive compression coefficient (× f'ci)
    pub fn compression_coefficient(&self, kind: CompressionLimitKind) -> f64 {
        match kind {
            CompressionLimitKind::Global => self.compression_global,
            CompressionLimitKind::Peak => self.compression_peak,
        }
    }
}

/// Hauling stability criteria (WSDOT method).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaulingCriteria {
    pub enabled: bool,
    pub fs_cracking: f64,
    pub fs_rollover: f64,
    pub impact_up: f64,
    pub impact_down: f64,
    /// Normal roadway crown slope (ft/ft)
    pub crown_slope: f64,
    /// Maximum roadway superelevation (ft/ft)
    pub max_superelevation: f64,
    pub sweep_tolerance: f64,
    pub sweep_growth: f64,
    pub support_placement_tolerance: f64,
    pub camber_multiplier: f64,
    /// Wind pressure (ksf)
    pub wind_pressure: f64,
    /// Hauling speed (mph)
    pub hauling_speed: f64,
    /// Turning radius (ft)
    pub turning_radius: f64,
    pub min_bunk_point: f64,
    pub bunk_point_accuracy: f64,
    pub compression_global: f64,
    pub compression_peak: f64,
    pub tension: PerSlope<TensionLimitPair>,
    pub modulus_of_rupture: ModulusOfRuptureCoefficients,
}

impl Default for HaulingCriteria {
    fn default() -> Self {
        HaulingCriteria {
            enabled: true,
            fs_cracking: 1.0,
            fs_rollover: 1.5,
            impact_up: 0.2,
            impact_down: 0.2,
            crown_slope: 0.02,
            max_superelevation: 0.06,
            sweep_tolerance: 1.0 / 8.0 / 120.0,
            sweep_growth: 1.0,
            support_placement_tolerance: 1.0,
            camber_multiplier: 1.0,
            wind_pressure: 0.015,
            hauling_speed: 0.0,
            turning_radius: 120.0,
            min_bunk_point: -1.0,
            bunk_point_accuracy: 6.0,
            compression_global: 0.60,
            compression_peak: 0.70,
            tension: PerSlope {
                crown_slope: TensionLimitPair::new(
                    TensionStressLimit::with_max(0.0948, 0.2),
                    TensionStressLimit::new(0.24),
                ),
                superelevation: TensionLimitPair::new(
                    TensionStressLimit::with_max(0.19, 0.6),
                    TensionStressLimit::new(0.24),
                ),
            },
            modulus_of_rupture: ModulusOfRuptureCoefficients::default(),
        }
    }
}

impl HaulingCriteria {
    /// Positive compression coefficient (× f'c)
    pub fn compression_coefficient(&self, kind: CompressionLimitKind) -> f64 {
        match kind {
            CompressionLimitKind::Global => self.compression_global,
            CompressionLimitKind::Peak => self.compression_peak,
        }
    }
}

/// A haul truck from the library. Lengths are inches, weights kips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaulTruck {
    pub name: String,
    pub max_girder_weight: f64,
    pub max_distance_between_supports: f64,
    pub max_leading_overhang: f64,
    pub height_of_girder_bottom: f64,
    pub height_of_roll_center: f64,
    pub axle_width: f64,
    /// Roll stiffness (kip-in/rad)
    pub roll_stiffness: f64,
}

impl HaulTruck {
    /// Typical WSDOT three-axle tractor with steerable trailer
    pub fn default_truck() -> Self {
        HaulTruck {
            name: "Default".to_string(),
            max_girder_weight: 200.0,
            max_distance_between_supports: 130.0 * 12.0,
            max_leading_overhang: 15.0 * 12.0,
            height_of_girder_bottom: 72.0,
            height_of_roll_center: 24.0,
            axle_width: 72.0,
            roll_stiffness: 40000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_coefficient_by_kind() {
        let lifting = LiftingCriteria::default();
        let hauling = HaulingCriteria::default();
        assert_eq!(lifting.compression_coefficient(CompressionLimitKind::Global), 0.65);
        assert_eq!(lifting.compression_coefficient(CompressionLimitKind::Peak), 0.70);
        assert_eq!(hauling.compression_coefficient(CompressionLimitKind::Global), 0.60);
        assert_eq!(hauling.compression_coefficient(CompressionLimitKind::Peak), 0.70);
    }

    #[test]
    fn test_per_slope_get() {
        let tension = HaulingCriteria::default().tension;
        assert_eq!(tension.get(HaulingSlope::CrownSlope).without_rebar.max_value, Some(0.2));
        assert_eq!(tension.get(HaulingSlope::Superelevation).without_rebar.coefficient, 0.19);
        let coefficients = tension.map(|pair| pair.with_rebar.coefficient);
        assert_eq!(coefficients.crown_slope, 0.24);
    }

    #[test]
    fn test_modulus_of_rupture_lookup() {
        let mor = ModulusOfRuptureCoefficients::default();
        assert_eq!(mor.get(ConcreteType::Normal, SpecEdition::NinthEdition2020).unwrap(), 0.24);
        assert_eq!(mor.get(ConcreteType::AllLightweight, SpecEdition::SixthEdition2012).unwrap(), 0.18);
        assert_eq!(mor.get(ConcreteType::AllLightweight, SpecEdition::NinthEdition2020).unwrap(), 0.21);
        assert!(mor.get(ConcreteType::Uhpc, SpecEdition::NinthEdition2020).is_err());
    }
}

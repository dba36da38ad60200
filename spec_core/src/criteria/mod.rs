//! # Specification Criteria
//!
//! A specification library entry: every coefficient, policy flag and limit
//! the rules engine reads. Defaults follow AASHTO LRFD 9th Edition and the
//! WSDOT handling practice, so `SpecCriteria::default()` is a usable entry.
//!
//! Stress coefficients are stored as positive numbers. Compression
//! coefficients multiply f'c; tension coefficients multiply λ√f'c with f'c
//! in ksi.
//!
//! ## Example
//!
//! ```rust
//! use spec_core::criteria::{SpecCriteria, TensionStressLimit};
//!
//! let criteria = SpecCriteria::default();
//! assert!(criteria.validate().is_ok());
//!
//! // 0.0948·λ·√f'ci, at most 0.2 ksi
//! let limit = TensionStressLimit::with_max(0.0948, 0.2);
//! assert!((limit.stress(1.0, 4.0) - 0.1896).abs() < 1e-9);
//! assert_eq!(limit.stress(1.0, 9.0), 0.2);
//! ```

mod capacity;
mod girder;
mod handling;
mod stress;

pub use capacity::{
    DuctSizeCriteria, EndZoneCriteria, FlexureResistanceFactors, MomentCapacityCriteria,
    ShearCapacityCriteria, StrandStressCoefficients, StrandStressCriteria,
};
pub use girder::{GirderEntry, MaxDebondLength};
pub use handling::{
    HaulTruck, HaulingCriteria, HaulingSlope, LiftingCriteria, ModulusOfRuptureCoefficients, PerSlope,
};
pub use stress::{ClosureJointCriteria, DeckCriteria, PrestressedElementCriteria};

use serde::{Deserialize, Serialize};

use crate::collaborators::DocumentType;
use crate::concrete::ConcreteType;
use crate::edition::{SpecEdition, SpecUnits};
use crate::errors::{SpecError, SpecResult};

/// Fatigue reduction applied to the UHPC tension limit
pub const UHPC_FATIGUE_TENSION_FACTOR: f64 = 0.95;

/// A published tension stress limit: `coefficient·λ·√f'c`, optionally capped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensionStressLimit {
    /// Coefficient on λ√f'c (√ksi)
    pub coefficient: f64,
    /// Upper bound on the limit (ksi)
    #[serde(default)]
    pub max_value: Option<f64>,
}

impl TensionStressLimit {
    /// Limit without an upper bound
    pub const fn new(coefficient: f64) -> Self {
        TensionStressLimit {
            coefficient,
            max_value: None,
        }
    }

    /// Limit with an upper bound
    pub const fn with_max(coefficient: f64, max_value: f64) -> Self {
        TensionStressLimit {
            coefficient,
            max_value: Some(max_value),
        }
    }

    pub fn has_max_value(&self) -> bool {
        self.max_value.is_some()
    }

    /// Tension stress limit for a concrete strength (ksi, positive)
    pub fn stress(&self, lambda: f64, fc: f64) -> f64 {
        let f = self.coefficient * lambda * fc.max(0.0).sqrt();
        match self.max_value {
            Some(max) => f.min(max),
            None => f,
        }
    }

    fn validate(&self, field: &str) -> SpecResult<()> {
        if self.coefficient < 0.0 {
            return Err(SpecError::invalid_input(
                field,
                self.coefficient.to_string(),
                "Tension coefficient must not be negative",
            ));
        }
        if let Some(max) = self.max_value {
            if max < 0.0 {
                return Err(SpecError::invalid_input(field, max.to_string(), "Maximum tension must not be negative"));
            }
        }
        Ok(())
    }
}

/// Tension limits for areas without and with bonded reinforcement sufficient
/// to resist the tensile force in the concrete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensionLimitPair {
    pub without_rebar: TensionStressLimit,
    pub with_rebar: TensionStressLimit,
}

impl TensionLimitPair {
    pub const fn new(without_rebar: TensionStressLimit, with_rebar: TensionStressLimit) -> Self {
        TensionLimitPair {
            without_rebar,
            with_rebar,
        }
    }

    pub fn select(&self, with_rebar: bool) -> TensionStressLimit {
        if with_rebar {
            self.with_rebar
        } else {
            self.without_rebar
        }
    }

    fn validate(&self, field: &str) -> SpecResult<()> {
        self.without_rebar.validate(field)?;
        self.with_rebar.validate(field)
    }
}

/// One value per concrete type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByConcreteType<T> {
    pub normal: T,
    pub all_lightweight: T,
    pub sand_lightweight: T,
    pub pci_uhpc: T,
    pub uhpc: T,
}

impl<T: Copy> ByConcreteType<T> {
    pub const fn new(normal: T, all_lightweight: T, sand_lightweight: T, pci_uhpc: T, uhpc: T) -> Self {
        ByConcreteType {
            normal,
            all_lightweight,
            sand_lightweight,
            pci_uhpc,
            uhpc,
        }
    }

    /// Value for a concrete type. From the 2016 interims on, all-lightweight
    /// concrete uses the sand-lightweight value.
    pub fn get(&self, concrete_type: ConcreteType, edition: SpecEdition) -> T {
        match concrete_type {
            ConcreteType::Normal => self.normal,
            ConcreteType::AllLightweight if edition.merges_lightweight_concrete() => self.sand_lightweight,
            ConcreteType::AllLightweight => self.all_lightweight,
            ConcreteType::SandLightweight => self.sand_lightweight,
            ConcreteType::PciUhpc => self.pci_uhpc,
            ConcreteType::Uhpc => self.uhpc,
        }
    }
}

/// A specification library entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecCriteria {
    /// Library entry name
    pub name: String,
    pub description: String,
    pub edition: SpecEdition,
    pub units: SpecUnits,
    pub prestressed_element: PrestressedElementCriteria,
    pub closure_joint: ClosureJointCriteria,
    pub deck: DeckCriteria,
    pub lifting: LiftingCriteria,
    pub hauling: HaulingCriteria,
    pub end_zone: EndZoneCriteria,
    pub moment_capacity: MomentCapacityCriteria,
    pub shear_capacity: ShearCapacityCriteria,
    pub duct_size: DuctSizeCriteria,
    pub strand_stress: StrandStressCriteria,
}

impl Default for SpecCriteria {
    fn default() -> Self {
        SpecCriteria {
            name: "AASHTO LRFD 9th Edition".to_string(),
            description: "Default criteria based on AASHTO LRFD 9th Edition, 2020".to_string(),
            edition: SpecEdition::NinthEdition2020,
            units: SpecUnits::US,
            prestressed_element: PrestressedElementCriteria::default(),
            closure_joint: ClosureJointCriteria::default(),
            deck: DeckCriteria::default(),
            lifting: LiftingCriteria::default(),
            hauling: HaulingCriteria::default(),
            end_zone: EndZoneCriteria::default(),
            moment_capacity: MomentCapacityCriteria::default(),
            shear_capacity: ShearCapacityCriteria::default(),
            duct_size: DuctSizeCriteria::default(),
            strand_stress: StrandStressCriteria::default(),
        }
    }
}

impl SpecCriteria {
    /// Default criteria for a given edition
    pub fn for_edition(edition: SpecEdition) -> Self {
        SpecCriteria {
            name: format!("AASHTO LRFD ({})", edition.key()),
            description: edition.code().to_string(),
            edition,
            ..SpecCriteria::default()
        }
    }

    /// Temporary stresses are always checked for spliced girders.
    pub fn check_temporary_stresses(&self, document: DocumentType) -> bool {
        document == DocumentType::SplicedGirder || self.prestressed_element.check_temporary_stresses
    }

    /// Service I tension under permanent loads after live load is applied
    pub fn check_final_dead_load_tension(&self, document: DocumentType) -> bool {
        self.prestressed_element.check_final_service_i_tension
            || (document == DocumentType::SplicedGirder && self.closure_joint.check_final_service_i_tension)
    }

    /// Check every coefficient for values no stress limit can be built from.
    pub fn validate(&self) -> SpecResult<()> {
        let compression = [
            ("prestressed_element.compression_before_losses", self.prestressed_element.compression_before_losses),
            (
                "prestressed_element.compression_temporary_strand_removal",
                self.prestressed_element.compression_temporary_strand_removal,
            ),
            (
                "prestressed_element.compression_after_deck_placement",
                self.prestressed_element.compression_after_deck_placement,
            ),
            ("prestressed_element.compression_permanent", self.prestressed_element.compression_permanent),
            ("prestressed_element.compression_all_loads", self.prestressed_element.compression_all_loads),
            ("prestressed_element.compression_fatigue", self.prestressed_element.compression_fatigue),
            ("closure_joint.compression_before_losses", self.closure_joint.compression_before_losses),
            ("closure_joint.compression_permanent", self.closure_joint.compression_permanent),
            ("closure_joint.compression_all_loads", self.closure_joint.compression_all_loads),
            ("closure_joint.compression_fatigue", self.closure_joint.compression_fatigue),
            ("deck.compression_permanent", self.deck.compression_permanent),
            ("deck.compression_all_loads", self.deck.compression_all_loads),
            ("deck.compression_fatigue", self.deck.compression_fatigue),
            ("lifting.compression_global", self.lifting.compression_global),
            ("lifting.compression_peak", self.lifting.compression_peak),
            ("hauling.compression_global", self.hauling.compression_global),
            ("hauling.compression_peak", self.hauling.compression_peak),
        ];
        for (field, value) in compression {
            if !(0.0..=1.0).contains(&value) {
                return Err(SpecError::invalid_input(
                    field,
                    value.to_string(),
                    "Compression coefficient must be between 0 and 1",
                ));
            }
        }

        let pe = &self.prestressed_element;
        pe.tension_before_losses.validate("prestressed_element.tension_before_losses")?;
        pe.tension_temporary_strand_removal
            .validate("prestressed_element.tension_temporary_strand_removal")?;
        pe.tension_after_deck_placement
            .validate("prestressed_element.tension_after_deck_placement")?;
        pe.tension_service_iii_moderate
            .validate("prestressed_element.tension_service_iii_moderate")?;
        pe.tension_service_iii_severe
            .validate("prestressed_element.tension_service_iii_severe")?;
        pe.tension_service_i_permanent
            .validate("prestressed_element.tension_service_i_permanent")?;

        let cj = &self.closure_joint;
        cj.tension_in_ptz_before_losses.validate("closure_joint.tension_in_ptz_before_losses")?;
        cj.tension_other_before_losses.validate("closure_joint.tension_other_before_losses")?;
        cj.tension_in_ptz_after_losses.validate("closure_joint.tension_in_ptz_after_losses")?;
        cj.tension_other_after_losses.validate("closure_joint.tension_other_after_losses")?;
        cj.tension_service_i_permanent.validate("closure_joint.tension_service_i_permanent")?;

        self.deck.tension.validate("deck.tension")?;
        self.lifting.tension.validate("lifting.tension")?;
        self.hauling.tension.crown_slope.validate("hauling.tension.crown_slope")?;
        self.hauling.tension.superelevation.validate("hauling.tension.superelevation")?;

        if self.end_zone.splitting_zone_length_factor <= 0.0 {
            return Err(SpecError::invalid_input(
                "end_zone.splitting_zone_length_factor",
                self.end_zone.splitting_zone_length_factor.to_string(),
                "Splitting zone length factor must be positive",
            ));
        }
        if self.lifting.fs_cracking <= 0.0 || self.lifting.fs_failure <= 0.0 {
            return Err(SpecError::invalid_input(
                "lifting.fs",
                format!("{}/{}", self.lifting.fs_cracking, self.lifting.fs_failure),
                "Factors of safety must be positive",
            ));
        }
        if self.hauling.fs_cracking <= 0.0 || self.hauling.fs_rollover <= 0.0 {
            return Err(SpecError::invalid_input(
                "hauling.fs",
                format!("{}/{}", self.hauling.fs_cracking, self.hauling.fs_rollover),
                "Factors of safety must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_validate() {
        assert!(SpecCriteria::default().validate().is_ok());
    }

    #[test]
    fn test_tension_limit_cap() {
        let limit = TensionStressLimit::with_max(0.24, 0.6);
        assert!((limit.stress(1.0, 4.0) - 0.48).abs() < 1e-12);
        assert_eq!(limit.stress(1.0, 16.0), 0.6);
        assert!(limit.has_max_value());
        assert!(!TensionStressLimit::new(0.19).has_max_value());
    }

    #[test]
    fn test_tension_limit_lambda() {
        let limit = TensionStressLimit::new(0.19);
        assert!((limit.stress(0.75, 4.0) - 0.285).abs() < 1e-12);
    }

    #[test]
    fn test_negative_coefficient_rejected() {
        let mut criteria = SpecCriteria::default();
        criteria.prestressed_element.tension_service_iii_moderate = TensionStressLimit::new(-0.19);
        let err = criteria.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_compression_coefficient_range() {
        let mut criteria = SpecCriteria::default();
        criteria.hauling.compression_peak = 1.2;
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_by_concrete_type_lightweight_merge() {
        let table = ByConcreteType::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_eq!(table.get(ConcreteType::AllLightweight, SpecEdition::SeventhEdition2014), 2.0);
        assert_eq!(table.get(ConcreteType::AllLightweight, SpecEdition::NinthEdition2020), 3.0);
        assert_eq!(table.get(ConcreteType::Uhpc, SpecEdition::NinthEdition2020), 5.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let criteria: SpecCriteria = serde_json::from_str(r#"{"name":"WSDOT","edition":"EighthEdition2017"}"#).unwrap();
        assert_eq!(criteria.name, "WSDOT");
        assert_eq!(criteria.edition, SpecEdition::EighthEdition2017);
        assert_eq!(criteria.prestressed_element, PrestressedElementCriteria::default());
    }

    #[test]
    fn test_temporary_stresses_always_checked_for_spliced() {
        let mut criteria = SpecCriteria::default();
        criteria.prestressed_element.check_temporary_stresses = false;
        assert!(!criteria.check_temporary_stresses(DocumentType::PrecastGirder));
        assert!(criteria.check_temporary_stresses(DocumentType::SplicedGirder));
    }

    #[test]
    fn test_closure_final_tension_only_for_spliced() {
        let mut criteria = SpecCriteria::default();
        criteria.closure_joint.check_final_service_i_tension = true;
        assert!(!criteria.check_final_dead_load_tension(DocumentType::PrecastGirder));
        assert!(criteria.check_final_dead_load_tension(DocumentType::SplicedGirder));
    }

    #[test]
    fn test_for_edition() {
        let criteria = SpecCriteria::for_edition(SpecEdition::FourthEdition2007);
        assert_eq!(criteria.edition, SpecEdition::FourthEdition2007);
        assert!(criteria.name.contains("4th2007"));
    }
}

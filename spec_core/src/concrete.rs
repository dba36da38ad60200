//! Concrete material variants and the material properties the stress limits
//! are built from.

use serde::{Deserialize, Serialize};

use crate::errors::{SpecError, SpecResult};

/// Concrete material variant.
///
/// The variant decides which tension-limit formula applies and which
/// splitting engineer checks the segment ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ConcreteType {
    #[default]
    Normal,
    AllLightweight,
    SandLightweight,
    /// PCI UHPC structural design guidance
    PciUhpc,
    /// AASHTO UHPC guide specification
    Uhpc,
}

impl ConcreteType {
    pub const ALL: [ConcreteType; 5] = [
        ConcreteType::Normal,
        ConcreteType::AllLightweight,
        ConcreteType::SandLightweight,
        ConcreteType::PciUhpc,
        ConcreteType::Uhpc,
    ];

    /// Either UHPC flavor
    pub fn is_uhpc(&self) -> bool {
        matches!(self, ConcreteType::PciUhpc | ConcreteType::Uhpc)
    }

    pub fn is_lightweight(&self) -> bool {
        matches!(self, ConcreteType::AllLightweight | ConcreteType::SandLightweight)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConcreteType::Normal => "Normal weight",
            ConcreteType::AllLightweight => "All lightweight",
            ConcreteType::SandLightweight => "Sand lightweight",
            ConcreteType::PciUhpc => "PCI-UHPC",
            ConcreteType::Uhpc => "UHPC",
        }
    }
}

impl std::fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Cracking strengths of PCI-UHPC (ksi)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PciUhpcProperties {
    /// First-cracking (flexural) strength, f_fc
    pub f_fc: f64,
    /// Post-cracking residual tensile strength, f_rr
    pub f_rr: f64,
}

/// Tensile properties of AASHTO UHPC (ksi)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UhpcProperties {
    /// Effective cracking strength at release, f_t,cri
    pub ft_cri: f64,
    /// Effective cracking strength, f_t,cr
    pub ft_cr: f64,
    /// Fiber orientation reduction factor, gamma_u
    pub fiber_orientation_factor: f64,
}

/// Concrete definition for one segment, closure joint, or deck region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteMaterial {
    pub concrete_type: ConcreteType,
    /// 28-day compressive strength (ksi)
    pub fc28: f64,
    /// Compressive strength at release/continuity (ksi)
    pub fci: f64,
    /// Concrete density modification factor
    pub lambda: f64,
    #[serde(default)]
    pub pci_uhpc: Option<PciUhpcProperties>,
    #[serde(default)]
    pub uhpc: Option<UhpcProperties>,
}

impl ConcreteMaterial {
    /// Normal weight concrete
    pub fn normal(fci: f64, fc28: f64) -> Self {
        ConcreteMaterial {
            concrete_type: ConcreteType::Normal,
            fc28,
            fci,
            lambda: 1.0,
            pci_uhpc: None,
            uhpc: None,
        }
    }

    /// Lightweight concrete with its density modification factor
    pub fn lightweight(concrete_type: ConcreteType, fci: f64, fc28: f64, lambda: f64) -> Self {
        ConcreteMaterial {
            concrete_type,
            lambda,
            ..ConcreteMaterial::normal(fci, fc28)
        }
    }

    /// PCI-UHPC
    pub fn pci_uhpc(fci: f64, fc28: f64, f_fc: f64, f_rr: f64) -> Self {
        ConcreteMaterial {
            concrete_type: ConcreteType::PciUhpc,
            pci_uhpc: Some(PciUhpcProperties { f_fc, f_rr }),
            ..ConcreteMaterial::normal(fci, fc28)
        }
    }

    /// AASHTO UHPC
    pub fn uhpc(fci: f64, fc28: f64, ft_cri: f64, ft_cr: f64, gamma_u: f64) -> Self {
        ConcreteMaterial {
            concrete_type: ConcreteType::Uhpc,
            uhpc: Some(UhpcProperties {
                ft_cri,
                ft_cr,
                fiber_orientation_factor: gamma_u,
            }),
            ..ConcreteMaterial::normal(fci, fc28)
        }
    }

    /// PCI-UHPC properties, required when the concrete is PCI-UHPC
    pub fn pci_uhpc_properties(&self) -> SpecResult<PciUhpcProperties> {
        self.pci_uhpc
            .ok_or_else(|| SpecError::not_found("PCI-UHPC cracking strengths", self.concrete_type.to_string()))
    }

    /// UHPC properties, required when the concrete is UHPC
    pub fn uhpc_properties(&self) -> SpecResult<UhpcProperties> {
        self.uhpc
            .ok_or_else(|| SpecError::not_found("UHPC tensile properties", self.concrete_type.to_string()))
    }

    /// Check the material for values the stress limits cannot work with.
    pub fn validate(&self) -> SpecResult<()> {
        if self.fci <= 0.0 {
            return Err(SpecError::invalid_input("fci", self.fci.to_string(), "Release strength must be positive"));
        }
        if self.fc28 <= 0.0 {
            return Err(SpecError::invalid_input("fc28", self.fc28.to_string(), "28-day strength must be positive"));
        }
        if self.lambda <= 0.0 || self.lambda > 1.0 {
            return Err(SpecError::invalid_input(
                "lambda",
                self.lambda.to_string(),
                "Density modification factor must be in (0, 1]",
            ));
        }
        match self.concrete_type {
            ConcreteType::PciUhpc => {
                self.pci_uhpc_properties()?;
            }
            ConcreteType::Uhpc => {
                let props = self.uhpc_properties()?;
                if props.fiber_orientation_factor <= 0.0 || props.fiber_orientation_factor > 1.0 {
                    return Err(SpecError::invalid_input(
                        "fiber_orientation_factor",
                        props.fiber_orientation_factor.to_string(),
                        "Fiber orientation factor must be in (0, 1]",
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uhpc_flags() {
        assert!(ConcreteType::Uhpc.is_uhpc());
        assert!(ConcreteType::PciUhpc.is_uhpc());
        assert!(!ConcreteType::SandLightweight.is_uhpc());
        assert!(ConcreteType::SandLightweight.is_lightweight());
    }

    #[test]
    fn test_validate_missing_uhpc_properties() {
        let mut conc = ConcreteMaterial::normal(14.0, 22.0);
        conc.concrete_type = ConcreteType::Uhpc;
        let err = conc.validate().unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_validate_ok() {
        assert!(ConcreteMaterial::normal(6.0, 8.0).validate().is_ok());
        assert!(ConcreteMaterial::uhpc(14.0, 22.0, 0.75, 0.75, 0.85).validate().is_ok());
        assert!(ConcreteMaterial::lightweight(ConcreteType::SandLightweight, 5.0, 7.0, 0.85).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_lambda() {
        let conc = ConcreteMaterial::lightweight(ConcreteType::AllLightweight, 5.0, 7.0, 1.2);
        assert!(conc.validate().is_err());
    }
}

//! # Table Lookups
//!
//! Published constants and small tables: confinement reinforcement, stirrup
//! spacing, minimum component thickness, resistance factors, duct limits,
//! rebar strain limits, debonding limits and prestressing steel limits.
//!
//! Lengths come back in inches whichever unit system the specification
//! entry is written in. SI entries use the metric table values, converted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collaborators::{Bridge, EndZone, Library};
use crate::concrete::ConcreteType;
use crate::criteria::{FlexureResistanceFactors, GirderEntry, SpecCriteria, StrandStressCoefficients};
use crate::edition::{SpecEdition, SpecUnits};
use crate::errors::{SpecError, SpecResult};
use crate::location::SegmentKey;
use crate::units::{Feet, Inches, Millimeters, MM_PER_INCH};

/// Area of a #3 bar (in²)
const NO_3_BAR_AREA: f64 = 0.11;
/// Area of a 10M bar (mm²)
const BAR_10M_AREA_MM2: f64 = 100.0;

/// Minimum confinement reinforcement at pretensioned member ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfinementRequirements {
    /// Minimum bar size designation
    pub min_bar: String,
    /// Area of the minimum bar (in²)
    pub min_bar_area: f64,
    /// Maximum spacing (in)
    pub max_spacing: f64,
    /// Minimum Av/s (in²/in)
    pub min_av_per_length: f64,
    /// Confinement extends this many member heights from the end
    pub zone_length_factor: f64,
}

/// Minimum thickness of girder components (in)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumThickness {
    pub top_flange: f64,
    pub web: f64,
    pub bottom_flange: f64,
}

/// Tendon duct limits. Radii are inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctLimits {
    /// Max strand area / duct area, push method
    pub area_ratio_push: f64,
    /// Max strand area / duct area, pull method
    pub area_ratio_pull: f64,
    /// Max duct diameter / web thickness
    pub diameter_ratio: f64,
    pub min_radius: f64,
    pub min_radius_in_anchorage: f64,
}

impl DuctLimits {
    /// Largest duct that fits a web (in)
    pub fn max_duct_diameter(&self, web_thickness: f64) -> f64 {
        self.diameter_ratio * web_thickness
    }
}

/// Reinforcing bar grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RebarGrade {
    Grade40,
    Grade60,
    Grade75,
    Grade80,
    Grade100,
}

impl RebarGrade {
    pub const ALL: [RebarGrade; 5] = [
        RebarGrade::Grade40,
        RebarGrade::Grade60,
        RebarGrade::Grade75,
        RebarGrade::Grade80,
        RebarGrade::Grade100,
    ];

    /// Yield strength (ksi)
    pub fn fy(&self) -> f64 {
        match self {
            RebarGrade::Grade40 => 40.0,
            RebarGrade::Grade60 => 60.0,
            RebarGrade::Grade75 => 75.0,
            RebarGrade::Grade80 => 80.0,
            RebarGrade::Grade100 => 100.0,
        }
    }
}

/// Net tensile strain limits bounding the flexural resistance factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainLimits {
    /// Compression-controlled strain limit, εcl
    pub compression_controlled: f64,
    /// Tension-controlled strain limit, εtl
    pub tension_controlled: f64,
}

/// Debonding limits from a girder library entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebondLimits {
    pub max_fraction_total: f64,
    pub max_fraction_per_row: f64,
    pub max_debonded_per_section: usize,
    pub max_fraction_per_section: f64,
    /// Min distance between termination sections (in)
    pub min_section_distance: f64,
}

impl From<&GirderEntry> for DebondLimits {
    fn from(entry: &GirderEntry) -> Self {
        DebondLimits {
            max_fraction_total: entry.max_debond_fraction_total,
            max_fraction_per_row: entry.max_debond_fraction_per_row,
            max_debonded_per_section: entry.max_debonded_per_section,
            max_fraction_per_section: entry.max_debond_fraction_per_section,
            min_section_distance: entry.min_debond_section_distance,
        }
    }
}

/// Rule controlling the maximum debond length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebondLengthRule {
    /// Half the segment length less the development length
    HalfLengthLessDevelopment,
    /// A fraction of the segment length
    SpanFraction,
    /// A fixed length
    HardLength,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebondLengthLimit {
    /// Length (in, ≥ 0)
    pub length: f64,
    pub controlling: DebondLengthRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrandType {
    StressRelieved,
    LowRelaxation,
}

impl StrandType {
    /// fpy as a fraction of fpu
    pub fn yield_ratio(&self) -> f64 {
        match self {
            StrandType::StressRelieved => 0.85,
            StrandType::LowRelaxation => 0.90,
        }
    }
}

/// Prestressing steel stress limits (ksi). A limit is `None` when the
/// criteria do not check that stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrandStressLimits {
    pub at_jacking: Option<f64>,
    pub before_transfer: Option<f64>,
    pub after_transfer: Option<f64>,
    pub after_losses: Option<f64>,
}

/// Table lookups for one specification entry
pub struct TableLookups<'a> {
    criteria: &'a SpecCriteria,
    library: &'a dyn Library,
    bridge: &'a dyn Bridge,
    end_zone: &'a dyn EndZone,
}

impl<'a> TableLookups<'a> {
    pub fn new(
        criteria: &'a SpecCriteria,
        library: &'a dyn Library,
        bridge: &'a dyn Bridge,
        end_zone: &'a dyn EndZone,
    ) -> Self {
        TableLookups {
            criteria,
            library,
            bridge,
            end_zone,
        }
    }

    fn is_si(&self) -> bool {
        self.criteria.units == SpecUnits::SI
    }

    /// A length published as `us` inches or `si` millimetres
    fn length(&self, us: f64, si: f64) -> f64 {
        if self.is_si() {
            Inches::from(Millimeters(si)).0
        } else {
            us
        }
    }

    pub fn confinement_requirements(&self) -> ConfinementRequirements {
        let (min_bar, min_bar_area) = if self.is_si() {
            ("10M", BAR_10M_AREA_MM2 / (MM_PER_INCH * MM_PER_INCH))
        } else {
            ("#3", NO_3_BAR_AREA)
        };
        let max_spacing = self.length(6.0, 150.0);
        ConfinementRequirements {
            min_bar: min_bar.to_string(),
            min_bar_area,
            max_spacing,
            min_av_per_length: min_bar_area / max_spacing,
            zone_length_factor: 1.5,
        }
    }

    /// Maximum stirrup spacing for low and high shear stress (in)
    pub fn max_stirrup_spacing(&self, dv: f64) -> SpecResult<(f64, f64)> {
        if dv <= 0.0 {
            return Err(SpecError::contract_violation(
                "max_stirrup_spacing",
                format!("effective shear depth must be positive, got {}", dv),
            ));
        }
        let shear = &self.criteria.shear_capacity;
        let [k1, k2] = shear.stirrup_spacing_coefficient;
        let [s1, s2] = shear.max_stirrup_spacing;
        Ok(((k1 * dv).min(s1), (k2 * dv).min(s2)))
    }

    /// Minimum clear stirrup spacing for an aggregate size and bar diameter (in)
    pub fn min_stirrup_spacing(&self, max_aggregate_size: f64, bar_diameter: f64) -> SpecResult<f64> {
        if max_aggregate_size <= 0.0 {
            return Err(SpecError::contract_violation(
                "min_stirrup_spacing",
                format!("aggregate size must be positive, got {}", max_aggregate_size),
            ));
        }
        if bar_diameter <= 0.0 {
            return Err(SpecError::contract_violation(
                "min_stirrup_spacing",
                format!("bar diameter must be positive, got {}", bar_diameter),
            ));
        }
        let absolute = self.length(1.0, 25.0);
        Ok((1.33 * max_aggregate_size).max(bar_diameter).max(absolute) + bar_diameter)
    }

    pub fn minimum_thickness(&self) -> MinimumThickness {
        MinimumThickness {
            top_flange: self.length(2.0, 50.0),
            web: self.length(5.0, 125.0),
            bottom_flange: self.length(5.0, 125.0),
        }
    }

    pub fn flexure_resistance_factors(&self, concrete_type: ConcreteType) -> FlexureResistanceFactors {
        self.criteria.moment_capacity.phi.get(concrete_type, self.criteria.edition)
    }

    pub fn closure_joint_flexure_resistance_factor(&self, concrete_type: ConcreteType) -> f64 {
        self.criteria
            .moment_capacity
            .phi_closure_joint
            .get(concrete_type, self.criteria.edition)
    }

    /// Shear resistance factor. Sections with debonded strands get their
    /// own factor starting with the 8th edition.
    pub fn shear_resistance_factor(&self, concrete_type: ConcreteType, debonded: bool) -> f64 {
        let shear = &self.criteria.shear_capacity;
        if debonded && SpecEdition::EighthEdition2017 <= self.criteria.edition {
            shear.phi_debonded.get(concrete_type, self.criteria.edition)
        } else {
            shear.phi.get(concrete_type, self.criteria.edition)
        }
    }

    pub fn closure_joint_shear_resistance_factor(&self, concrete_type: ConcreteType) -> f64 {
        self.criteria
            .shear_capacity
            .phi_closure_joint
            .get(concrete_type, self.criteria.edition)
    }

    pub fn duct_limits(&self) -> DuctLimits {
        let ducts = &self.criteria.duct_size;
        let (min_radius, min_radius_in_anchorage) = if self.is_si() {
            (Inches::from(Millimeters(6000.0)).0, Inches::from(Millimeters(3600.0)).0)
        } else {
            (Inches::from(Feet(20.0)).0, Inches::from(Feet(12.0)).0)
        };
        DuctLimits {
            area_ratio_push: ducts.area_ratio_push,
            area_ratio_pull: ducts.area_ratio_pull,
            diameter_ratio: ducts.diameter_ratio,
            min_radius,
            min_radius_in_anchorage,
        }
    }

    pub fn strain_limits(&self, grade: RebarGrade) -> StrainLimits {
        let (compression_controlled, tension_controlled) = match grade {
            RebarGrade::Grade40 => (0.0014, 0.005),
            RebarGrade::Grade60 => (0.002, 0.005),
            RebarGrade::Grade75 => (0.0026, 0.0054),
            RebarGrade::Grade80 => (0.0028, 0.0056),
            RebarGrade::Grade100 => (0.004, 0.008),
        };
        StrainLimits {
            compression_controlled,
            tension_controlled,
        }
    }

    fn girder_entry(&self, segment: &SegmentKey) -> SpecResult<&'a GirderEntry> {
        let name = self.bridge.girder_entry_name(segment)?;
        self.library
            .girder_entry(&name)
            .ok_or_else(|| SpecError::not_found("girder library entry", name))
    }

    pub fn debond_limits(&self, segment: &SegmentKey) -> SpecResult<DebondLimits> {
        Ok(DebondLimits::from(self.girder_entry(segment)?))
    }

    /// Longest a strand may be debonded, and the rule that controls
    pub fn max_debond_length(&self, segment: &SegmentKey) -> SpecResult<DebondLengthLimit> {
        let entry = self.girder_entry(segment)?;
        let length = self.bridge.segment_length(segment)?;
        let ld = self.end_zone.development_length(segment)?;

        let mut result = DebondLengthLimit {
            length: length / 2.0 - ld,
            controlling: DebondLengthRule::HalfLengthLessDevelopment,
        };
        if let Some(fraction) = entry.max_debond_length.span_fraction {
            let limit = fraction * length;
            if limit < result.length {
                result = DebondLengthLimit {
                    length: limit,
                    controlling: DebondLengthRule::SpanFraction,
                };
            }
        }
        if let Some(hard) = entry.max_debond_length.hard_length {
            if hard < result.length {
                result = DebondLengthLimit {
                    length: hard,
                    controlling: DebondLengthRule::HardLength,
                };
            }
        }
        result.length = result.length.max(0.0);
        debug!(segment = %segment, length = result.length, rule = ?result.controlling, "max debond length");
        Ok(result)
    }

    /// Prestressing steel stress limits for a strand type and tensile
    /// strength fpu (ksi)
    pub fn strand_stress_limits(&self, strand_type: StrandType, fpu: f64) -> StrandStressLimits {
        let strand = &self.criteria.strand_stress;
        let coefficient = |check: bool, c: &StrandStressCoefficients| {
            check.then(|| match strand_type {
                StrandType::StressRelieved => c.stress_relieved,
                StrandType::LowRelaxation => c.low_relaxation,
            })
        };
        let fpy = strand_type.yield_ratio() * fpu;
        StrandStressLimits {
            at_jacking: coefficient(strand.check_at_jacking, &strand.at_jacking).map(|c| c * fpu),
            before_transfer: coefficient(strand.check_before_transfer, &strand.before_transfer).map(|c| c * fpu),
            after_transfer: coefficient(strand.check_after_transfer, &strand.after_transfer).map(|c| c * fpu),
            after_losses: coefficient(strand.check_after_losses, &strand.after_losses).map(|c| c * fpy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BridgeModel;

    const KEY: SegmentKey = SegmentKey {
        group: 0,
        girder: 0,
        segment: 0,
    };

    fn tables<'a>(model: &'a BridgeModel, criteria: &'a SpecCriteria) -> TableLookups<'a> {
        TableLookups::new(criteria, model, model, model)
    }

    fn si_criteria() -> SpecCriteria {
        SpecCriteria {
            units: SpecUnits::SI,
            ..SpecCriteria::default()
        }
    }

    #[test]
    fn test_confinement() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let c = tables(&model, &criteria).confinement_requirements();
        assert_eq!(c.min_bar, "#3");
        assert_eq!(c.max_spacing, 6.0);
        assert!((c.min_av_per_length - 0.11 / 6.0).abs() < 1e-12);
        assert_eq!(c.zone_length_factor, 1.5);

        let si = si_criteria();
        let c = tables(&model, &si).confinement_requirements();
        assert_eq!(c.min_bar, "10M");
        assert!((c.max_spacing - 150.0 / 25.4).abs() < 1e-12);
    }

    #[test]
    fn test_stirrup_spacing() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let t = tables(&model, &criteria);
        assert_eq!(t.max_stirrup_spacing(20.0).unwrap(), (16.0, 8.0));
        assert_eq!(t.max_stirrup_spacing(60.0).unwrap(), (24.0, 12.0));
        assert!(t.max_stirrup_spacing(0.0).is_err());

        // 1.33·0.75 + 0.5 < 1 + 0.5
        assert!((t.min_stirrup_spacing(0.75, 0.5).unwrap() - 1.5).abs() < 1e-12);
        assert!((t.min_stirrup_spacing(1.5, 0.5).unwrap() - (1.995 + 0.5)).abs() < 1e-12);
        // #9 bar larger than 1.33 times the aggregate
        assert!((t.min_stirrup_spacing(0.75, 1.128).unwrap() - 2.256).abs() < 1e-12);
        let err = t.min_stirrup_spacing(0.0, 0.5).unwrap_err();
        assert_eq!(err.error_code(), "CONTRACT_VIOLATION");
        assert!(t.min_stirrup_spacing(0.75, -1.0).is_err());
    }

    #[test]
    fn test_minimum_thickness() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let thickness = tables(&model, &criteria).minimum_thickness();
        assert_eq!(thickness.top_flange, 2.0);
        assert_eq!(thickness.web, 5.0);
        let si = si_criteria();
        let thickness = tables(&model, &si).minimum_thickness();
        assert!((thickness.bottom_flange - 125.0 / 25.4).abs() < 1e-12);
    }

    #[test]
    fn test_shear_factor_debonded_by_edition() {
        let model = BridgeModel::precast_demo();
        let old = SpecCriteria::for_edition(SpecEdition::SeventhEditionWith2016Interims);
        let new = SpecCriteria::for_edition(SpecEdition::EighthEdition2017);
        assert_eq!(tables(&model, &old).shear_resistance_factor(ConcreteType::Normal, true), 0.9);
        assert_eq!(tables(&model, &new).shear_resistance_factor(ConcreteType::Normal, true), 0.85);
        assert_eq!(tables(&model, &new).shear_resistance_factor(ConcreteType::Normal, false), 0.9);
        assert_eq!(tables(&model, &new).closure_joint_shear_resistance_factor(ConcreteType::Normal), 0.9);
    }

    #[test]
    fn test_flexure_factors() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let t = tables(&model, &criteria);
        let phi = t.flexure_resistance_factors(ConcreteType::Normal);
        assert_eq!(phi.tension_ps, 1.0);
        assert_eq!(phi.compression, 0.75);
        assert_eq!(t.flexure_resistance_factors(ConcreteType::Uhpc).tension_ps, 0.90);
        assert_eq!(t.closure_joint_flexure_resistance_factor(ConcreteType::Normal), 0.95);
    }

    #[test]
    fn test_duct_limits() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let ducts = tables(&model, &criteria).duct_limits();
        assert_eq!(ducts.min_radius, 240.0);
        assert_eq!(ducts.min_radius_in_anchorage, 144.0);
        assert_eq!(ducts.area_ratio_pull, 0.5);
        assert!((ducts.max_duct_diameter(7.0) - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_strain_limits() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let t = tables(&model, &criteria);
        for grade in RebarGrade::ALL {
            let limits = t.strain_limits(grade);
            assert!(limits.compression_controlled < limits.tension_controlled);
        }
        assert_eq!(t.strain_limits(RebarGrade::Grade75).tension_controlled, 0.0054);
    }

    #[test]
    fn test_debond_limits() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let limits = tables(&model, &criteria).debond_limits(&KEY).unwrap();
        assert_eq!(limits.max_fraction_total, 0.25);
        assert_eq!(limits.max_debonded_per_section, 4);
    }

    #[test]
    fn test_debond_limits_missing_entry() {
        let mut model = BridgeModel::precast_demo();
        model.girder_entries.clear();
        let criteria = SpecCriteria::default();
        let err = tables(&model, &criteria).debond_limits(&KEY).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_max_debond_length_controlling_rule() {
        let mut model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        // 1560/2 - 150
        let l = tables(&model, &criteria).max_debond_length(&KEY).unwrap();
        assert_eq!(l.length, 630.0);
        assert_eq!(l.controlling, DebondLengthRule::HalfLengthLessDevelopment);

        model.girder_entries[0].max_debond_length.span_fraction = Some(0.2);
        let l = tables(&model, &criteria).max_debond_length(&KEY).unwrap();
        assert_eq!(l.length, 312.0);
        assert_eq!(l.controlling, DebondLengthRule::SpanFraction);

        model.girder_entries[0].max_debond_length.hard_length = Some(120.0);
        let l = tables(&model, &criteria).max_debond_length(&KEY).unwrap();
        assert_eq!(l.length, 120.0);
        assert_eq!(l.controlling, DebondLengthRule::HardLength);
    }

    #[test]
    fn test_max_debond_length_clamped() {
        let mut model = BridgeModel::precast_demo();
        if let Some(segment) = model.segment_mut(&KEY) {
            segment.length = 240.0;
        }
        let criteria = SpecCriteria::default();
        let l = tables(&model, &criteria).max_debond_length(&KEY).unwrap();
        assert_eq!(l.length, 0.0);
    }

    #[test]
    fn test_strand_stress_limits() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let limits = tables(&model, &criteria).strand_stress_limits(StrandType::LowRelaxation, 270.0);
        assert_eq!(limits.at_jacking, None);
        assert!((limits.before_transfer.unwrap() - 202.5).abs() < 1e-9);
        assert_eq!(limits.after_transfer, None);
        assert!((limits.after_losses.unwrap() - 0.8 * 243.0).abs() < 1e-9);
    }
}

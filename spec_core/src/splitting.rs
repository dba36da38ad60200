//! # Splitting Resistance of Pretensioned Anchorage Zones
//!
//! Checks the vertical reinforcement near each end of a segment against the
//! splitting (bursting) force from the prestressing at transfer.
//!
//! All three engineers share the LRFD calculation:
//!
//! - Splitting zone length, `Lz = h/n` (n from the criteria, usually 4)
//! - Splitting force, `Ps = 0.04·ΣAps·(fpj − ΔfpT)` over the strands bonded
//!   at that end
//! - Resistance, `Pr = fs·Avs` with `fs = min(fy, 20 ksi)`
//!
//! UHPC variants add a concrete contribution `Pc`, and PCI-UHPC also checks
//! a bursting force `Pb` from the prestress before transfer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collaborators::{EndZone, Materials, StrandArrangement, StrandGroup};
use crate::concrete::ConcreteType;
use crate::criteria::SpecCriteria;
use crate::edition::{lrfd_ref, SpecEdition};
use crate::errors::{SpecError, SpecResult};
use crate::location::{EndType, SegmentKey};

/// Maximum stress in splitting reinforcement (ksi)
pub const MAX_SPLITTING_STRESS: f64 = 20.0;

/// Splitting force as a fraction of the prestressing force at transfer
pub const SPLITTING_FORCE_FACTOR: f64 = 0.04;

/// PCI-UHPC bursting force coefficient
pub const PCI_UHPC_BURSTING_FACTOR: f64 = 0.021;

/// Trial values used in place of the as-built segment during design
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SplittingDesignConfig {
    /// Strand counts and debonding
    #[serde(default)]
    pub strands: Option<StrandArrangement>,
    /// Vertical reinforcement area within the splitting zone, start then end (in²)
    #[serde(default)]
    pub avs: Option<[f64; 2]>,
}

/// Everything a splitting engineer reads
#[derive(Clone, Copy)]
pub struct SplittingContext<'a> {
    pub criteria: &'a SpecCriteria,
    pub materials: &'a dyn Materials,
    pub end_zone: &'a dyn EndZone,
}

/// Results at one end of a segment. Forces are kips, lengths inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplittingEndResult {
    pub end: EndType,
    /// Splitting zone height, h
    pub h: f64,
    pub zone_length: f64,
    /// Splitting force, Ps
    pub splitting_force: f64,
    /// Bursting force, Pb (PCI-UHPC only)
    pub bursting_force: Option<f64>,
    /// Concrete contribution, Pc
    pub concrete_capacity: f64,
    /// Web width, bv
    pub bv: f64,
    pub avs: f64,
    pub fs: f64,
    /// Reinforcement resistance, Pr
    pub resistance: f64,
    pub passed: bool,
}

impl SplittingEndResult {
    /// Force the reinforcement and concrete must resist
    pub fn demand(&self) -> f64 {
        match self.bursting_force {
            Some(pb) => self.splitting_force.max(pb),
            None => self.splitting_force,
        }
    }
}

/// Splitting check of one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplittingCheckArtifact {
    pub segment: SegmentKey,
    pub engineer: SplittingEngineer,
    pub is_applicable: bool,
    pub zone_length_factor: f64,
    pub ends: [SplittingEndResult; 2],
    /// Required Av/s over the splitting zone (in²/in)
    pub as_required: f64,
    pub check_name: String,
    pub specification_reference: String,
}

impl SplittingCheckArtifact {
    pub fn end(&self, end: EndType) -> &SplittingEndResult {
        match end {
            EndType::Start => &self.ends[0],
            EndType::End => &self.ends[1],
        }
    }

    pub fn passed(&self) -> bool {
        !self.is_applicable || self.ends.iter().all(|end| end.passed)
    }
}

/// Splitting check method, chosen by the segment concrete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplittingEngineer {
    /// AASHTO LRFD, no concrete contribution
    Lrfd,
    /// PCI UHPC structural design guidance
    PciUhpc,
    /// AASHTO UHPC guide specification
    Uhpc,
}

impl SplittingEngineer {
    pub fn for_concrete(concrete_type: ConcreteType) -> Self {
        match concrete_type {
            ConcreteType::Normal | ConcreteType::AllLightweight | ConcreteType::SandLightweight => SplittingEngineer::Lrfd,
            ConcreteType::PciUhpc => SplittingEngineer::PciUhpc,
            ConcreteType::Uhpc => SplittingEngineer::Uhpc,
        }
    }

    /// Engineer for the concrete of a segment
    pub fn for_segment(materials: &dyn Materials, segment: &SegmentKey) -> SpecResult<Self> {
        Ok(SplittingEngineer::for_concrete(materials.segment_concrete(segment)?.concrete_type))
    }

    /// "Bursting" before the 2008 interims, "Splitting" after
    pub fn check_name(&self, edition: SpecEdition) -> &'static str {
        if edition < SpecEdition::FourthEditionWith2008Interims {
            "Bursting"
        } else {
            "Splitting"
        }
    }

    pub fn specification_reference(&self, edition: SpecEdition) -> &'static str {
        match self {
            SplittingEngineer::Lrfd if edition < SpecEdition::EighthEdition2017 => lrfd_ref::SPLITTING,
            SplittingEngineer::Lrfd => lrfd_ref::SPLITTING_2017,
            SplittingEngineer::PciUhpc => lrfd_ref::PCI_UHPC_SPLITTING,
            SplittingEngineer::Uhpc => lrfd_ref::UHPC_SPLITTING,
        }
    }

    /// Splitting zone length, h/n
    pub fn splitting_zone_length(&self, ctx: &SplittingContext<'_>, segment: &SegmentKey, end: EndType) -> SpecResult<f64> {
        let n = ctx.criteria.end_zone.splitting_zone_length_factor;
        if n <= 0.0 {
            return Err(SpecError::invalid_input(
                "end_zone.splitting_zone_length_factor",
                n.to_string(),
                "Splitting zone length factor must be positive",
            ));
        }
        Ok(ctx.end_zone.splitting_zone_height(segment, end)? / n)
    }

    /// Check both ends of a segment
    pub fn check(
        &self,
        ctx: &SplittingContext<'_>,
        segment: &SegmentKey,
        design: Option<&SplittingDesignConfig>,
    ) -> SpecResult<SplittingCheckArtifact> {
        let edition = ctx.criteria.edition;
        let strands = match design.and_then(|d| d.strands) {
            Some(strands) => strands,
            None => ctx.end_zone.strands(segment)?,
        };
        let fy = ctx.materials.segment_transverse_rebar_fy(segment)?;
        let fs = fy.min(MAX_SPLITTING_STRESS);

        let mut ends = Vec::with_capacity(2);
        for (index, end) in EndType::BOTH.into_iter().enumerate() {
            let h = ctx.end_zone.splitting_zone_height(segment, end)?;
            let zone_length = self.splitting_zone_length(ctx, segment, end)?;
            let bv = ctx.end_zone.splitting_web_width(segment, end)?;
            let avs = match design.and_then(|d| d.avs) {
                Some(avs) => avs[index],
                None => ctx.end_zone.splitting_av(segment, end, zone_length)?,
            };

            let splitting_force = SPLITTING_FORCE_FACTOR * effective_force(&strands, end);
            let (concrete_capacity, bursting_force) = self.concrete_capacity(ctx, segment, &strands, end, h, zone_length, bv)?;
            let resistance = fs * avs;

            let mut result = SplittingEndResult {
                end,
                h,
                zone_length,
                splitting_force,
                bursting_force,
                concrete_capacity,
                bv,
                avs,
                fs,
                resistance,
                passed: false,
            };
            result.passed = result.demand() <= resistance + concrete_capacity;
            ends.push(result);
        }

        let ends: [SplittingEndResult; 2] = [ends[0], ends[1]];
        let mut artifact = SplittingCheckArtifact {
            segment: *segment,
            engineer: *self,
            is_applicable: ctx.criteria.end_zone.check_splitting,
            zone_length_factor: ctx.criteria.end_zone.splitting_zone_length_factor,
            ends,
            as_required: 0.0,
            check_name: self.check_name(edition).to_string(),
            specification_reference: self.specification_reference(edition).to_string(),
        };
        artifact.as_required = self.as_required(&artifact);

        debug!(
            segment = %segment,
            engineer = ?self,
            as_required = artifact.as_required,
            passed = artifact.passed(),
            "checked splitting resistance"
        );
        Ok(artifact)
    }

    /// Required Av/s over the splitting zone, the larger of the two ends
    pub fn as_required(&self, artifact: &SplittingCheckArtifact) -> f64 {
        artifact
            .ends
            .iter()
            .map(|end| {
                let denominator = end.fs * end.zone_length;
                if denominator <= 0.0 {
                    return 0.0;
                }
                ((end.demand() - end.concrete_capacity) / denominator).max(0.0)
            })
            .fold(0.0, f64::max)
    }

    #[allow(clippy::too_many_arguments)]
    fn concrete_capacity(
        &self,
        ctx: &SplittingContext<'_>,
        segment: &SegmentKey,
        strands: &StrandArrangement,
        end: EndType,
        h: f64,
        zone_length: f64,
        bv: f64,
    ) -> SpecResult<(f64, Option<f64>)> {
        match self {
            SplittingEngineer::Lrfd => Ok((0.0, None)),
            SplittingEngineer::PciUhpc => {
                let props = ctx.materials.segment_concrete(segment)?.pci_uhpc_properties()?;
                let pc = props.f_rr / 2.0 * zone_length * bv;
                let lt = ctx.end_zone.transfer_length(segment)?;
                let pb = if lt > 0.0 {
                    PCI_UHPC_BURSTING_FACTOR * (h / lt) * effective_force(strands, end)
                } else {
                    0.0
                };
                Ok((pc, Some(pb)))
            }
            SplittingEngineer::Uhpc => {
                let props = ctx.materials.segment_concrete(segment)?.uhpc_properties()?;
                Ok((props.fiber_orientation_factor * props.ft_cri * bv * zone_length, None))
            }
        }
    }
}

/// Bonded strand groups at an end. Temporary strands only count when they
/// are pretensioned.
fn bonded_groups(strands: &StrandArrangement) -> impl Iterator<Item = &StrandGroup> {
    let temporary = strands.temporary_pretensioned.then_some(&strands.temporary);
    [&strands.straight, &strands.harped].into_iter().chain(temporary)
}

/// Σ Aps·(fpj − ΔfpT) over bonded strands
fn effective_force(strands: &StrandArrangement, end: EndType) -> f64 {
    bonded_groups(strands)
        .map(|group| group.bonded_at(end) as f64 * strands.strand_area * (group.jacking_stress - group.loss_at_transfer))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concrete::ConcreteMaterial;
    use crate::model::BridgeModel;

    const KEY: SegmentKey = SegmentKey {
        group: 0,
        girder: 0,
        segment: 0,
    };

    fn context<'a>(model: &'a BridgeModel, criteria: &'a SpecCriteria) -> SplittingContext<'a> {
        SplittingContext {
            criteria,
            materials: model,
            end_zone: model,
        }
    }

    #[test]
    fn test_engineer_selection() {
        assert_eq!(SplittingEngineer::for_concrete(ConcreteType::Normal), SplittingEngineer::Lrfd);
        assert_eq!(SplittingEngineer::for_concrete(ConcreteType::AllLightweight), SplittingEngineer::Lrfd);
        assert_eq!(SplittingEngineer::for_concrete(ConcreteType::SandLightweight), SplittingEngineer::Lrfd);
        assert_eq!(SplittingEngineer::for_concrete(ConcreteType::PciUhpc), SplittingEngineer::PciUhpc);
        assert_eq!(SplittingEngineer::for_concrete(ConcreteType::Uhpc), SplittingEngineer::Uhpc);

        let model = BridgeModel::precast_demo();
        let first = SplittingEngineer::for_segment(&model, &KEY).unwrap();
        assert_eq!(first, SplittingEngineer::for_segment(&model, &KEY).unwrap());
    }

    #[test]
    fn test_names_by_edition() {
        let e = SplittingEngineer::Lrfd;
        assert_eq!(e.check_name(SpecEdition::FourthEdition2007), "Bursting");
        assert_eq!(e.check_name(SpecEdition::FourthEditionWith2008Interims), "Splitting");
        assert_eq!(e.specification_reference(SpecEdition::SeventhEditionWith2016Interims), "LRFD 5.10.10.1");
        assert_eq!(e.specification_reference(SpecEdition::EighthEdition2017), "LRFD 5.9.4.4.1");
    }

    #[test]
    fn test_lrfd_check() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let ctx = context(&model, &criteria);
        let artifact = SplittingEngineer::Lrfd.check(&ctx, &KEY, None).unwrap();

        let start = artifact.end(EndType::Start);
        assert_eq!(start.h, 72.0);
        assert_eq!(start.zone_length, 18.0);
        assert_eq!(start.fs, 20.0);
        // 24 bonded straight + 12 harped at 0.217 in², 186.5 ksi after transfer
        let ps = 0.04 * 36.0 * 0.217 * (202.5 - 16.0);
        assert!((start.splitting_force - ps).abs() < 1e-9);
        assert_eq!(start.concrete_capacity, 0.0);
        let avs = 0.62 / 2.5 * 18.0;
        assert!((start.resistance - 20.0 * avs).abs() < 1e-9);
        assert!(artifact.passed());
        assert_eq!(artifact.check_name, "Splitting");

        let expected = ps / (20.0 * 18.0);
        assert!((artifact.as_required - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zone_length_matches_check() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let ctx = context(&model, &criteria);
        let artifact = SplittingEngineer::Lrfd.check(&ctx, &KEY, None).unwrap();
        for end in EndType::BOTH {
            let zl = SplittingEngineer::Lrfd.splitting_zone_length(&ctx, &KEY, end).unwrap();
            assert_eq!(zl, artifact.end(end).zone_length);
        }
    }

    #[test]
    fn test_unpretensioned_temporary_strands_ignored() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let ctx = context(&model, &criteria);
        let mut strands = model.segment(&KEY).unwrap().strands;
        strands.temporary = StrandGroup {
            count: 4,
            debonded_at_start: 0,
            debonded_at_end: 0,
            jacking_stress: 202.5,
            loss_at_transfer: 16.0,
        };

        strands.temporary_pretensioned = false;
        let design = SplittingDesignConfig {
            strands: Some(strands),
            avs: None,
        };
        let without = SplittingEngineer::Lrfd.check(&ctx, &KEY, Some(&design)).unwrap();
        let built = SplittingEngineer::Lrfd.check(&ctx, &KEY, None).unwrap();
        assert_eq!(without.ends[0].splitting_force, built.ends[0].splitting_force);

        strands.temporary_pretensioned = true;
        let design = SplittingDesignConfig {
            strands: Some(strands),
            avs: None,
        };
        let with = SplittingEngineer::Lrfd.check(&ctx, &KEY, Some(&design)).unwrap();
        assert!(with.ends[0].splitting_force > built.ends[0].splitting_force);
    }

    #[test]
    fn test_design_avs_override() {
        let model = BridgeModel::precast_demo();
        let criteria = SpecCriteria::default();
        let ctx = context(&model, &criteria);
        let design = SplittingDesignConfig {
            strands: None,
            avs: Some([0.1, 5.0]),
        };
        let artifact = SplittingEngineer::Lrfd.check(&ctx, &KEY, Some(&design)).unwrap();
        assert!(!artifact.end(EndType::Start).passed);
        assert!(artifact.end(EndType::End).passed);
        assert!(!artifact.passed());
    }

    #[test]
    fn test_uhpc_concrete_contribution() {
        let mut model = BridgeModel::precast_demo();
        if let Some(segment) = model.segment_mut(&KEY) {
            segment.concrete = ConcreteMaterial::uhpc(14.0, 22.0, 0.8, 0.75, 0.85);
        }
        let criteria = SpecCriteria::default();
        let ctx = context(&model, &criteria);
        let engineer = SplittingEngineer::for_segment(&model, &KEY).unwrap();
        let artifact = engineer.check(&ctx, &KEY, None).unwrap();
        let start = artifact.end(EndType::Start);
        assert!((start.concrete_capacity - 0.85 * 0.8 * 6.125 * 18.0).abs() < 1e-9);
        // concrete carries the whole splitting force
        assert_eq!(artifact.as_required, 0.0);
        assert_eq!(artifact.specification_reference, lrfd_ref::UHPC_SPLITTING);
    }

    #[test]
    fn test_pci_uhpc_bursting_demand() {
        let mut model = BridgeModel::precast_demo();
        if let Some(segment) = model.segment_mut(&KEY) {
            segment.concrete = ConcreteMaterial::pci_uhpc(10.0, 17.4, 1.5, 0.75);
        }
        let criteria = SpecCriteria::default();
        let ctx = context(&model, &criteria);
        let artifact = SplittingEngineer::PciUhpc.check(&ctx, &KEY, None).unwrap();
        let start = artifact.end(EndType::Start);

        assert!((start.concrete_capacity - 0.75 / 2.0 * 18.0 * 6.125).abs() < 1e-9);
        // prestress after transfer losses, the same force that drives Ps
        let ppo = 36.0 * 0.217 * (202.5 - 16.0);
        assert!((start.splitting_force / 0.04 - ppo).abs() < 1e-9);
        let pb = 0.021 * (72.0 / 36.0) * ppo;
        assert!((start.bursting_force.unwrap() - pb).abs() < 1e-9);
        assert_eq!(start.demand(), start.splitting_force.max(pb));
    }
}

//! Stress limits for precast segments.

use super::{violation, CompressionLimitKind, IntervalClass, StressLimits, TensionFormula, TensionStressLimitParameters};
use crate::concrete::ConcreteType;
use crate::criteria::{TensionStressLimit, UHPC_FATIGUE_TENSION_FACTOR};
use crate::errors::SpecResult;
use crate::limit_state::LimitState;
use crate::location::SegmentKey;
use crate::tasks::StressCheckTask;

impl<'a> StressLimits<'a> {
    /// Positive compression coefficient for a segment.
    ///
    /// Lifting and hauling each have a global and a peak limit; ask for them
    /// with [`Self::lifting_compression_coefficient`] and
    /// [`Self::hauling_compression_coefficient`].
    pub fn segment_compression_coefficient(&self, segment: &SegmentKey, task: &StressCheckTask) -> SpecResult<f64> {
        let pe = &self.criteria.prestressed_element;
        let class = self.classify_segment_interval(segment, task.interval)?;
        match class {
            IntervalClass::Lifting | IntervalClass::Hauling => Err(violation(
                "segment_compression_coefficient",
                format!("{:?} has separate global and peak compression limits", class),
            )),
            // keep the before-losses limit until hauling; the after-losses
            // limit would jump up at storage
            IntervalClass::StorageThroughHauling | IntervalClass::Stressing => Ok(pe.compression_before_losses),
            IntervalClass::TemporaryStrandRemoval => Ok(pe.compression_temporary_strand_removal),
            IntervalClass::BeforeLiveLoad { before_railing } => {
                if before_railing && self.check_temporary_stresses() {
                    Ok(pe.compression_after_deck_placement)
                } else {
                    Ok(pe.compression_permanent)
                }
            }
            IntervalClass::LiveLoad => self.after_losses_compression(
                "segment_compression_coefficient",
                task,
                pe.compression_permanent,
                pe.compression_all_loads,
                pe.compression_fatigue,
            ),
        }
    }

    /// Compression limit for a segment (ksi, ≤ 0)
    pub fn segment_compression_limit(&self, segment: &SegmentKey, task: &StressCheckTask) -> SpecResult<f64> {
        let coefficient = self.segment_compression_coefficient(segment, task)?;
        let fc = self.materials.segment_fc(segment, task.interval)?;
        Ok(-coefficient * fc)
    }

    /// Positive lifting compression coefficient (× f'ci)
    pub fn lifting_compression_coefficient(&self, kind: CompressionLimitKind) -> f64 {
        self.criteria.lifting.compression_coefficient(kind)
    }

    /// Positive hauling compression coefficient (× f'c)
    pub fn hauling_compression_coefficient(&self, kind: CompressionLimitKind) -> f64 {
        self.criteria.hauling.compression_coefficient(kind)
    }

    /// Lifting compression limit (ksi, ≤ 0)
    pub fn lifting_compression_limit(&self, segment: &SegmentKey, kind: CompressionLimitKind) -> SpecResult<f64> {
        let lifting = self.intervals.segment_milestones(segment)?.lifting;
        Ok(-self.lifting_compression_coefficient(kind) * self.materials.segment_fc(segment, lifting)?)
    }

    /// Hauling compression limit (ksi, ≤ 0)
    pub fn hauling_compression_limit(&self, segment: &SegmentKey, kind: CompressionLimitKind) -> SpecResult<f64> {
        let hauling = self.intervals.segment_milestones(segment)?.hauling;
        Ok(-self.hauling_compression_coefficient(kind) * self.materials.segment_fc(segment, hauling)?)
    }

    /// Tension limit parameters for a segment.
    pub fn segment_tension_parameters(
        &self,
        segment: &SegmentKey,
        task: &StressCheckTask,
        with_rebar: bool,
    ) -> SpecResult<TensionStressLimitParameters> {
        let concrete = self.materials.segment_concrete(segment)?;
        let hauling = self.intervals.segment_milestones(segment)?.hauling;
        let at_or_before_hauling = task.interval <= hauling;

        match concrete.concrete_type {
            ConcreteType::PciUhpc => {
                let props = concrete.pci_uhpc_properties()?;
                Ok(TensionStressLimitParameters {
                    coefficient: 2.0 / 3.0,
                    max_value: None,
                    formula: TensionFormula::PciUhpc {
                        f_fc: props.f_fc,
                        strength_ratio: at_or_before_hauling.then_some((concrete.fci, concrete.fc28)),
                    },
                })
            }
            ConcreteType::Uhpc => {
                let props = concrete.uhpc_properties()?;
                let k = if task.limit_state.is_fatigue() {
                    UHPC_FATIGUE_TENSION_FACTOR
                } else {
                    1.0
                };
                Ok(TensionStressLimitParameters {
                    coefficient: k * props.fiber_orientation_factor,
                    max_value: None,
                    formula: TensionFormula::Uhpc {
                        cracking_strength: if at_or_before_hauling { props.ft_cri } else { props.ft_cr },
                    },
                })
            }
            _ => {
                let limit = self.segment_tension_limit(segment, task, with_rebar)?;
                let fc = self.materials.segment_fc(segment, task.interval)?;
                Ok(TensionStressLimitParameters::lambda_sqrt_fc(limit, concrete.lambda, fc))
            }
        }
    }

    /// Tension limit for a segment (ksi, ≥ 0)
    pub fn segment_tension_stress_limit(
        &self,
        segment: &SegmentKey,
        task: &StressCheckTask,
        with_rebar: bool,
    ) -> SpecResult<f64> {
        Ok(self.segment_tension_parameters(segment, task, with_rebar)?.stress())
    }

    /// Published tension limit for conventional concrete
    fn segment_tension_limit(
        &self,
        segment: &SegmentKey,
        task: &StressCheckTask,
        with_rebar: bool,
    ) -> SpecResult<TensionStressLimit> {
        let pe = &self.criteria.prestressed_element;
        match self.classify_segment_interval(segment, task.interval)? {
            IntervalClass::StorageThroughHauling | IntervalClass::Stressing => Ok(pe.tension_before_losses.select(with_rebar)),
            IntervalClass::Lifting => Ok(self.criteria.lifting.tension.select(with_rebar)),
            IntervalClass::Hauling => Ok(self.criteria.hauling.tension.crown_slope.select(with_rebar)),
            IntervalClass::TemporaryStrandRemoval => Ok(pe.tension_temporary_strand_removal.select(with_rebar)),
            IntervalClass::BeforeLiveLoad { before_railing } => {
                if before_railing && self.check_temporary_stresses() {
                    Ok(pe.tension_after_deck_placement)
                } else {
                    let limit = self.service_iii_tension();
                    // zero tension is meant for the final condition, not for
                    // intermediate intervals
                    if limit.coefficient == 0.0 && self.check_final_dead_load_tension() {
                        Ok(pe.tension_service_i_permanent)
                    } else {
                        Ok(limit)
                    }
                }
            }
            IntervalClass::LiveLoad => {
                if let Some(limit) = self.rating_tension(task.limit_state) {
                    return Ok(limit);
                }
                match task.limit_state {
                    LimitState::ServiceI if !task.include_live_load => Ok(pe.tension_service_i_permanent),
                    LimitState::ServiceIII => Ok(self.service_iii_tension()),
                    _ => Err(violation(
                        "segment_tension_parameters",
                        format!("no tension limit for {} in conventional concrete", task),
                    )),
                }
            }
        }
    }

    /// After-losses compression coefficient once live load is on the bridge
    pub(super) fn after_losses_compression(
        &self,
        operation: &str,
        task: &StressCheckTask,
        permanent: f64,
        all_loads: f64,
        fatigue: f64,
    ) -> SpecResult<f64> {
        if !task.include_live_load {
            return Ok(permanent);
        }
        let limit_state = task.limit_state;
        if limit_state.is_fatigue() {
            Ok(fatigue)
        } else if limit_state.is_service_i_family() {
            Ok(all_loads)
        } else {
            Err(violation(operation, format!("{} has no compression limit", limit_state)))
        }
    }
}

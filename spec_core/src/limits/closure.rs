//! Stress limits for cast-in-place closure joints.

use super::{violation, IntervalClass, StressLimits, TensionStressLimitParameters};
use crate::criteria::TensionStressLimit;
use crate::errors::SpecResult;
use crate::limit_state::LimitState;
use crate::location::SegmentKey;
use crate::tasks::StressCheckTask;

impl<'a> StressLimits<'a> {
    /// Positive compression coefficient for a closure joint
    pub fn closure_compression_coefficient(&self, closure: &SegmentKey, task: &StressCheckTask) -> SpecResult<f64> {
        let cj = &self.criteria.closure_joint;
        match self.classify_closure_interval(closure, task.interval)? {
            IntervalClass::LiveLoad => self.after_losses_compression(
                "closure_compression_coefficient",
                task,
                cj.compression_permanent,
                cj.compression_all_loads,
                cj.compression_fatigue,
            ),
            IntervalClass::BeforeLiveLoad { .. } => Ok(cj.compression_permanent),
            _ => Ok(cj.compression_before_losses),
        }
    }

    /// Compression limit for a closure joint (ksi, ≤ 0)
    pub fn closure_compression_limit(&self, closure: &SegmentKey, task: &StressCheckTask) -> SpecResult<f64> {
        let coefficient = self.closure_compression_coefficient(closure, task)?;
        let fc = self.materials.closure_fc(closure, task.interval)?;
        Ok(-coefficient * fc)
    }

    /// Tension limit parameters for a closure joint. Tension limits differ
    /// inside and outside the precompressed tensile zone.
    pub fn closure_tension_parameters(
        &self,
        closure: &SegmentKey,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<TensionStressLimitParameters> {
        let concrete = self.materials.closure_concrete(closure)?;
        if concrete.concrete_type.is_uhpc() {
            return Err(violation(
                "closure_tension_parameters",
                format!("tension limits are not defined for {} closure joints", concrete.concrete_type),
            ));
        }

        let limit = self.closure_tension_limit(closure, task, with_rebar, in_ptz)?;
        let fc = self.materials.closure_fc(closure, task.interval)?;
        Ok(TensionStressLimitParameters::lambda_sqrt_fc(limit, concrete.lambda, fc))
    }

    /// Tension limit for a closure joint (ksi, ≥ 0)
    pub fn closure_tension_stress_limit(
        &self,
        closure: &SegmentKey,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<f64> {
        Ok(self.closure_tension_parameters(closure, task, with_rebar, in_ptz)?.stress())
    }

    fn closure_tension_limit(
        &self,
        closure: &SegmentKey,
        task: &StressCheckTask,
        with_rebar: bool,
        in_ptz: bool,
    ) -> SpecResult<TensionStressLimit> {
        let cj = &self.criteria.closure_joint;
        match self.classify_closure_interval(closure, task.interval)? {
            IntervalClass::LiveLoad => {
                if let Some(limit) = self.rating_tension(task.limit_state) {
                    return Ok(limit);
                }
                match task.limit_state {
                    LimitState::ServiceI if !task.include_live_load => Ok(cj.tension_service_i_permanent),
                    LimitState::ServiceIII => Ok(cj.tension_after_losses(in_ptz).select(with_rebar)),
                    _ => Err(violation(
                        "closure_tension_parameters",
                        format!("no tension limit for {} in a closure joint", task),
                    )),
                }
            }
            IntervalClass::BeforeLiveLoad { .. } => {
                let limit = cj.tension_after_losses(in_ptz).select(with_rebar);
                if limit.coefficient == 0.0 && self.check_final_dead_load_tension() {
                    Ok(cj.tension_service_i_permanent)
                } else {
                    Ok(limit)
                }
            }
            _ => Ok(cj.tension_before_losses(in_ptz).select(with_rebar)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::limits;
    use super::*;
    use crate::concrete::ConcreteMaterial;
    use crate::criteria::SpecCriteria;
    use crate::limit_state::StressType;
    use crate::model::BridgeModel;

    const CLOSURE: SegmentKey = SegmentKey {
        group: 0,
        girder: 0,
        segment: 0,
    };

    #[test]
    fn test_closure_compression() {
        let model = BridgeModel::spliced_demo();
        let criteria = SpecCriteria::default();
        let l = limits(&model, &criteria);
        let at = |interval, limit_state, with_live_load| {
            let task = StressCheckTask::new(interval, limit_state, StressType::Compression, with_live_load);
            l.closure_compression_coefficient(&CLOSURE, &task).unwrap()
        };
        // tendon stressing
        assert_eq!(at(7, LimitState::ServiceI, false), 0.60);
        assert_eq!(at(10, LimitState::ServiceI, false), 0.45);
        assert_eq!(at(13, LimitState::ServiceI, true), 0.60);
        assert_eq!(at(13, LimitState::FatigueI, true), 0.40);

        // closure strength steps to f'c after stressing
        let task = StressCheckTask::new(13, LimitState::ServiceI, StressType::Compression, true);
        assert!((l.closure_compression_limit(&CLOSURE, &task).unwrap() + 0.60 * 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_closure_tension_zones() {
        let model = BridgeModel::spliced_demo();
        let criteria = SpecCriteria::default();
        let l = limits(&model, &criteria);
        let stressing = StressCheckTask::new(7, LimitState::ServiceI, StressType::Tension, false);
        let in_ptz = l.closure_tension_parameters(&CLOSURE, &stressing, true, true).unwrap();
        let other = l.closure_tension_parameters(&CLOSURE, &stressing, true, false).unwrap();
        assert_eq!(in_ptz.coefficient, 0.0948);
        assert_eq!(other.coefficient, 0.19);

        let service = StressCheckTask::new(13, LimitState::ServiceIII, StressType::Tension, true);
        let without = l.closure_tension_parameters(&CLOSURE, &service, false, true).unwrap();
        assert_eq!(without.coefficient, 0.0);
        assert_eq!(without.stress(), 0.0);
    }

    #[test]
    fn test_closure_permanent_table_after_live_load() {
        let model = BridgeModel::spliced_demo();
        let mut criteria = SpecCriteria::default();
        criteria.closure_joint.tension_service_i_permanent = TensionStressLimit::new(0.0948);
        let l = limits(&model, &criteria);
        let task = StressCheckTask::new(13, LimitState::ServiceI, StressType::Tension, false);
        let params = l.closure_tension_parameters(&CLOSURE, &task, false, true).unwrap();
        assert_eq!(params.coefficient, 0.0948);
    }

    #[test]
    fn test_uhpc_closure_tension_is_violation() {
        let mut model = BridgeModel::spliced_demo();
        model.groups[0].girders[0].closures[0] = ConcreteMaterial::uhpc(14.0, 22.0, 0.75, 0.75, 0.85);
        let criteria = SpecCriteria::default();
        let l = limits(&model, &criteria);
        let task = StressCheckTask::new(7, LimitState::ServiceI, StressType::Tension, false);
        let err = l.closure_tension_parameters(&CLOSURE, &task, true, true).unwrap_err();
        assert_eq!(err.error_code(), "CONTRACT_VIOLATION");
        // compression still has a limit
        let task = StressCheckTask::new(7, LimitState::ServiceI, StressType::Compression, false);
        assert!(l.closure_compression_limit(&CLOSURE, &task).is_ok());
    }
}

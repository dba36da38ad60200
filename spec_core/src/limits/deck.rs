//! Stress limits for the cast-in-place deck.

use super::{violation, StressLimits, TensionStressLimitParameters};
use crate::errors::SpecResult;
use crate::tasks::StressCheckTask;

impl<'a> StressLimits<'a> {
    /// Positive compression coefficient for the deck
    pub fn deck_compression_coefficient(&self, task: &StressCheckTask) -> SpecResult<f64> {
        let deck = &self.criteria.deck;
        let live_load = self.intervals.bridge_milestones().live_load;
        if task.interval < live_load {
            return Ok(deck.compression_permanent);
        }
        self.after_losses_compression(
            "deck_compression_coefficient",
            task,
            deck.compression_permanent,
            deck.compression_all_loads,
            deck.compression_fatigue,
        )
    }

    /// Compression limit for a deck casting region (ksi, ≤ 0)
    pub fn deck_compression_limit(&self, region: usize, task: &StressCheckTask) -> SpecResult<f64> {
        let coefficient = self.deck_compression_coefficient(task)?;
        Ok(-coefficient * self.materials.deck_fc(region, task.interval)?)
    }

    /// Tension limit parameters for a deck casting region
    pub fn deck_tension_parameters(
        &self,
        region: usize,
        task: &StressCheckTask,
        with_rebar: bool,
    ) -> SpecResult<TensionStressLimitParameters> {
        let concrete = self.materials.deck_concrete(region)?;
        if concrete.concrete_type.is_uhpc() {
            return Err(violation(
                "deck_tension_parameters",
                format!("tension limits are not defined for {} decks", concrete.concrete_type),
            ));
        }
        let limit = self.criteria.deck.tension.select(with_rebar);
        let fc = self.materials.deck_fc(region, task.interval)?;
        Ok(TensionStressLimitParameters::lambda_sqrt_fc(limit, concrete.lambda, fc))
    }

    /// Tension limit for a deck casting region (ksi, ≥ 0)
    pub fn deck_tension_stress_limit(&self, region: usize, task: &StressCheckTask, with_rebar: bool) -> SpecResult<f64> {
        Ok(self.deck_tension_parameters(region, task, with_rebar)?.stress())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::limits;
    use crate::concrete::ConcreteMaterial;
    use crate::criteria::SpecCriteria;
    use crate::limit_state::{LimitState, StressType};
    use crate::model::BridgeModel;
    use crate::tasks::StressCheckTask;

    #[test]
    fn test_deck_compression() {
        let model = BridgeModel::spliced_demo();
        let criteria = SpecCriteria::default();
        let l = limits(&model, &criteria);
        let at = |interval, limit_state, with_live_load| {
            let task = StressCheckTask::new(interval, limit_state, StressType::Compression, with_live_load);
            l.deck_compression_coefficient(&task).unwrap()
        };
        assert_eq!(at(10, LimitState::ServiceI, false), 0.45);
        assert_eq!(at(13, LimitState::ServiceI, false), 0.45);
        assert_eq!(at(13, LimitState::ServiceI, true), 0.60);
        assert_eq!(at(13, LimitState::FatigueI, true), 0.40);
    }

    #[test]
    fn test_deck_tension() {
        let model = BridgeModel::spliced_demo();
        let criteria = SpecCriteria::default();
        let l = limits(&model, &criteria);
        let task = StressCheckTask::new(13, LimitState::ServiceIII, StressType::Tension, true);
        let without = l.deck_tension_stress_limit(1, &task, false).unwrap();
        let with = l.deck_tension_stress_limit(1, &task, true).unwrap();
        assert!((without - 0.0948 * 2.0).abs() < 1e-12);
        assert!((with - 0.24 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_uhpc_deck_tension_is_violation() {
        let mut model = BridgeModel::spliced_demo();
        model.deck.regions[0] = ConcreteMaterial::pci_uhpc(10.0, 17.4, 1.5, 0.75);
        let criteria = SpecCriteria::default();
        let l = limits(&model, &criteria);
        let task = StressCheckTask::new(13, LimitState::ServiceIII, StressType::Tension, true);
        assert!(l.deck_tension_parameters(0, &task, false).is_err());
        assert!(l.deck_tension_parameters(1, &task, false).is_ok());
    }
}

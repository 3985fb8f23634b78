//! Random source for adjusted values, shareable across request handlers.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{CastingTemperature, ParameterPredictor, PredictionReport};

/// Where adjusted values draw their entropy from.
///
/// `ThreadLocal` gives every handler thread its own generator. `Seeded`
/// shares one reproducible generator behind a mutex, so concurrent requests
/// consume a single deterministic sequence.
#[derive(Debug, Clone, Default)]
pub enum AdjustmentSource {
    #[default]
    ThreadLocal,
    Seeded(Arc<Mutex<StdRng>>),
}

impl AdjustmentSource {
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(Self::ThreadLocal, Self::seeded)
    }

    pub const fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }

    /// Run the predictor with this source.
    pub fn compute(
        &self,
        predictor: &ParameterPredictor,
        casting_temp: CastingTemperature,
    ) -> PredictionReport {
        match self {
            Self::ThreadLocal => predictor.compute(casting_temp, &mut rand::thread_rng()),
            Self::Seeded(rng) => {
                // Sampling cannot leave the generator half-updated.
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                predictor.compute(casting_temp, &mut *rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let predictor = ParameterPredictor::new();
        let t = CastingTemperature::new(30.0).unwrap();
        let a = AdjustmentSource::seeded(11);
        let b = AdjustmentSource::seeded(11);
        for _ in 0..3 {
            assert_eq!(a.compute(&predictor, t), b.compute(&predictor, t));
        }
    }

    #[test]
    fn test_clones_share_one_generator() {
        let predictor = ParameterPredictor::new();
        let t = CastingTemperature::new(30.0).unwrap();
        let shared = AdjustmentSource::seeded(5);
        let clone = shared.clone();
        let reference = AdjustmentSource::seeded(5);

        let first = shared.compute(&predictor, t);
        let second = clone.compute(&predictor, t);
        assert_eq!(first, reference.compute(&predictor, t));
        assert_eq!(second, reference.compute(&predictor, t));
    }

    #[test]
    fn test_from_seed() {
        assert!(!AdjustmentSource::from_seed(None).is_seeded());
        assert!(AdjustmentSource::from_seed(Some(1)).is_seeded());
    }

    #[test]
    fn test_concurrent_draws_stay_in_range() {
        let predictor = ParameterPredictor::new();
        let source = AdjustmentSource::seeded(8);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let source = source.clone();
                std::thread::spawn(move || {
                    let t = CastingTemperature::new(f64::from(i) * 100.0).unwrap();
                    (0..50)
                        .map(|_| source.compute(&predictor, t).metrics.percentage_optimum_adjusted)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for h in handles {
            for pct in h.join().unwrap() {
                assert_eq!(pct, 100.0);
            }
        }
    }
}

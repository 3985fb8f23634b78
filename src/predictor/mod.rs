//! Parameter Predictor - casting temperature to process parameter report
//!
//! Evaluates the fixed parameter table at one casting temperature:
//!
//! - **Predicted value**: linear formula output, deterministic per temperature
//! - **Adjusted value**: uniform draw from the optimum range, taken from an
//!   injected random source
//! - **Aggregate**: share of parameters inside their optimum range, for both
//!
//! ## Usage
//!
//! ```
//! use casting_predictor::predictor::{CastingTemperature, ParameterPredictor};
//! use rand::SeedableRng;
//!
//! let predictor = ParameterPredictor::new();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let report = predictor.compute(CastingTemperature::new(30.0).unwrap(), &mut rng);
//! assert_eq!(report.metrics.percentage_optimum_adjusted, 100.0);
//! ```

mod parameters;
mod source;
mod temperature;

pub use parameters::{
    LinearFormula, OptimumRange, Parameter, ParameterSpec, PARAMETER_COUNT, PARAMETER_TABLE,
};
pub use source::AdjustmentSource;
pub use temperature::{CastingTemperature, PredictError};

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

// ============================================================================
// Report Types
// ============================================================================

/// Classification of a value against its optimum range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptimumStatus {
    #[serde(rename = "Optimum")]
    Optimum,
    #[serde(rename = "Not Optimum")]
    NotOptimum,
}

impl OptimumStatus {
    pub const fn from_in_range(in_range: bool) -> Self {
        if in_range {
            Self::Optimum
        } else {
            Self::NotOptimum
        }
    }

    pub const fn is_optimum(self) -> bool {
        matches!(self, Self::Optimum)
    }
}

/// Predicted and adjusted values for a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterPrediction {
    pub predicted_value: f64,
    pub status_predicted: OptimumStatus,
    pub adjusted_value: f64,
    pub status_adjusted: OptimumStatus,
}

/// Percentage of parameters inside their optimum range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub percentage_optimum_predicted: f64,
    pub percentage_optimum_adjusted: f64,
}

impl AggregateMetrics {
    fn from_counts(predicted: usize, adjusted: usize) -> Self {
        Self {
            percentage_optimum_predicted: percentage(predicted),
            percentage_optimum_adjusted: percentage(adjusted),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(count: usize) -> f64 {
    (count as f64 / PARAMETER_COUNT as f64) * 100.0
}

/// Full response for one casting temperature.
///
/// Serializes to the `/predict` wire shape: `prediction_info` keyed by
/// parameter name, with both percentages at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub prediction_info: BTreeMap<Parameter, ParameterPrediction>,
    #[serde(flatten)]
    pub metrics: AggregateMetrics,
}

impl PredictionReport {
    pub fn get(&self, parameter: Parameter) -> Option<&ParameterPrediction> {
        self.prediction_info.get(&parameter)
    }
}

// ============================================================================
// Predictor
// ============================================================================

/// Stateless evaluator over the parameter table.
#[derive(Debug, Clone, Copy)]
pub struct ParameterPredictor {
    table: &'static [ParameterSpec; PARAMETER_COUNT],
}

impl Default for ParameterPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterPredictor {
    pub const fn new() -> Self {
        Self {
            table: &PARAMETER_TABLE,
        }
    }

    pub const fn table(&self) -> &'static [ParameterSpec; PARAMETER_COUNT] {
        self.table
    }

    /// Formula outputs for every parameter, in table order.
    pub fn predicted_values(&self, casting_temp: CastingTemperature) -> [(Parameter, f64); PARAMETER_COUNT] {
        let temp = casting_temp.value();
        self.table.map(|spec| (spec.parameter, spec.formula.evaluate(temp)))
    }

    /// Build the full report, drawing adjusted values from `rng`.
    pub fn compute<R: Rng + ?Sized>(
        &self,
        casting_temp: CastingTemperature,
        rng: &mut R,
    ) -> PredictionReport {
        let temp = casting_temp.value();
        let mut prediction_info = BTreeMap::new();
        let mut optimum_predicted = 0;
        let mut optimum_adjusted = 0;

        for spec in self.table {
            let predicted_value = spec.formula.evaluate(temp);
            let status_predicted = OptimumStatus::from_in_range(spec.range.contains(predicted_value));

            let adjusted_value = spec.range.sample(rng);
            let status_adjusted = OptimumStatus::from_in_range(spec.range.contains(adjusted_value));

            if status_predicted.is_optimum() {
                optimum_predicted += 1;
            }
            if status_adjusted.is_optimum() {
                optimum_adjusted += 1;
            }

            prediction_info.insert(
                spec.parameter,
                ParameterPrediction {
                    predicted_value,
                    status_predicted,
                    adjusted_value,
                    status_adjusted,
                },
            );
        }

        let metrics = AggregateMetrics::from_counts(optimum_predicted, optimum_adjusted);
        debug!(
            casting_temp = temp,
            predicted_pct = metrics.percentage_optimum_predicted,
            adjusted_pct = metrics.percentage_optimum_adjusted,
            "Computed parameter report"
        );

        PredictionReport {
            prediction_info,
            metrics,
        }
    }
}

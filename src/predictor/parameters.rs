//! Fixed casting parameter table
//!
//! Every derived parameter shares one shape: a linear response to casting
//! temperature (`slope * temp + intercept`) and an inclusive optimum band.
//! The table below is the single source of truth for parameter names, so the
//! per-request report and the aggregate denominator can never drift from it.

use rand::Rng;
use serde::Serialize;

/// Number of derived process parameters.
pub const PARAMETER_COUNT: usize = 9;

/// Derived process parameters, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    CoolingWaterTemp,
    CastingSpeed,
    ChemicalComposition,
    AmbientHumidity,
    EnergyConsumption,
    GrainSize,
    Uts,
    Elongation,
    Conductivity,
}

impl Parameter {
    /// All parameters in table order.
    pub const ALL: [Self; PARAMETER_COUNT] = [
        Self::CoolingWaterTemp,
        Self::CastingSpeed,
        Self::ChemicalComposition,
        Self::AmbientHumidity,
        Self::EnergyConsumption,
        Self::GrainSize,
        Self::Uts,
        Self::Elongation,
        Self::Conductivity,
    ];

    /// Wire name used in JSON payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CoolingWaterTemp => "cooling_water_temp",
            Self::CastingSpeed => "casting_speed",
            Self::ChemicalComposition => "chemical_composition",
            Self::AmbientHumidity => "ambient_humidity",
            Self::EnergyConsumption => "energy_consumption",
            Self::GrainSize => "grain_size",
            Self::Uts => "uts",
            Self::Elongation => "elongation",
            Self::Conductivity => "conductivity",
        }
    }

    /// Formula and optimum range for this parameter.
    pub fn spec(self) -> &'static ParameterSpec {
        &PARAMETER_TABLE[self as usize]
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `slope * temp + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFormula {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFormula {
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    pub fn evaluate(&self, casting_temp: f64) -> f64 {
        self.slope * casting_temp + self.intercept
    }
}

/// Inclusive optimum band `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimumRange {
    #[serde(rename = "optimum_min")]
    pub min: f64,
    #[serde(rename = "optimum_max")]
    pub max: f64,
}

impl OptimumRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `min <= value <= max`. NaN is never inside.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Draw a value uniformly from the closed interval.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // Clamp absorbs rounding in `low + u * (high - low)` at the upper edge.
        rng.gen_range(self.min..=self.max).clamp(self.min, self.max)
    }
}

/// One row of the parameter table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    #[serde(rename = "name")]
    pub parameter: Parameter,
    #[serde(flatten)]
    pub formula: LinearFormula,
    #[serde(flatten)]
    pub range: OptimumRange,
}

impl ParameterSpec {
    const fn new(parameter: Parameter, formula: LinearFormula, range: OptimumRange) -> Self {
        Self {
            parameter,
            formula,
            range,
        }
    }
}

/// The process-wide parameter table, indexed by `Parameter as usize`.
pub static PARAMETER_TABLE: [ParameterSpec; PARAMETER_COUNT] = [
    ParameterSpec::new(
        Parameter::CoolingWaterTemp,
        LinearFormula::new(0.5, 2.0),
        OptimumRange::new(20.0, 35.0),
    ),
    ParameterSpec::new(
        Parameter::CastingSpeed,
        LinearFormula::new(0.8, 1000.0),
        OptimumRange::new(6.0, 12.0),
    ),
    ParameterSpec::new(
        Parameter::ChemicalComposition,
        LinearFormula::new(0.01, 0.5),
        OptimumRange::new(0.99, 1.01),
    ),
    ParameterSpec::new(
        Parameter::AmbientHumidity,
        LinearFormula::new(0.2, 60.0),
        OptimumRange::new(60.0, 70.0),
    ),
    ParameterSpec::new(
        Parameter::EnergyConsumption,
        LinearFormula::new(0.3, 50.0),
        OptimumRange::new(60.0, 80.0),
    ),
    ParameterSpec::new(
        Parameter::GrainSize,
        LinearFormula::new(0.005, 0.1),
        OptimumRange::new(0.2, 0.8),
    ),
    ParameterSpec::new(
        Parameter::Uts,
        LinearFormula::new(0.7, 200.0),
        OptimumRange::new(300.0, 500.0),
    ),
    ParameterSpec::new(
        Parameter::Elongation,
        LinearFormula::new(0.1, 5.0),
        OptimumRange::new(7.0, 15.0),
    ),
    ParameterSpec::new(
        Parameter::Conductivity,
        LinearFormula::new(0.4, 60.0),
        OptimumRange::new(85.0, 100.0),
    ),
];

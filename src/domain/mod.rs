//! Domain layer: Core types and pure functions.
//!
//! Nothing here performs I/O or touches shared state. All operations are
//! deterministic given their inputs.

mod advisory;
mod features;
mod metrics;
pub mod population;
mod risk;
mod sentiment;

pub use advisory::{
    advise, weight_tier, Advisory, AdvisoryList, BMI_OBESE, BMI_OVERWEIGHT, CHOLESTEROL_HIGH,
    CLOSING_REMARK, GLUCOSE_HIGH,
};
pub use features::{encode, FeatureValue, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use metrics::{
    ActivityLevel, Gender, HealthMetrics, YesNo, AGE_RANGE, BLOOD_PRESSURE_RANGE, BMI_RANGE,
    CHOLESTEROL_RANGE, GLUCOSE_RANGE,
};
pub use population::PopulationChart;
pub use risk::{format_risk, Assessment, RiskLabel};
pub use sentiment::{SentimentLabel, SentimentResult};

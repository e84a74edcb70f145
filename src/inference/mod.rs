//! Statistical inference (standard errors, p-values, confidence intervals).

mod coefficient;
mod fit;
mod prediction;

pub use coefficient::CoefficientInference;
pub use fit::FitStatistics;
pub use prediction::prediction_interval;

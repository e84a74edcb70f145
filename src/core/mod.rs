//! Core types for regression analysis.

mod dataset;
mod listwise;
mod options;
mod prediction;
mod result;
mod selection;
mod value;

pub use dataset::Dataset;
pub use listwise::ListwiseInfo;
pub use options::{
    ConstantResponse, OptionsError, RegressionOptions, RegressionOptionsBuilder,
    DEFAULT_INTERCEPT_LABEL,
};
pub(crate) use options::validate_confidence_level;
pub use prediction::{IntervalType, PredictionInterval};
pub use result::{RegressionCoefficient, RegressionResult};
pub use selection::VariableSelection;
pub use value::{coerce_cell, CellValue, Row};

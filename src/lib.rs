// BMI Calculator - Core Library
// Exposes the engine and form state for the terminal shell and tests

pub mod config;
pub mod engine;
pub mod form;

// Re-export commonly used types
pub use config::{parse_mode, Config, Mode};
pub use engine::{
    classify, compute_bmi, evaluate,
    Assessment, Category, Field, InputError,
};
pub use form::Form;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ⚖️ BMI Engine - pure computation and classification
// Text in, number and category out. No state, no side effects.
//
// BMI = weight (kg) / height (m)²
// Invalid input is not an error condition for the shell: it simply means
// there is nothing to display.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Below this value a reading is underweight
pub const UNDERWEIGHT_BELOW: f64 = 18.5;

/// Inclusive upper bound of the normal band
pub const NORMAL_UP_TO: f64 = 24.9;

/// Inclusive upper bound of the first obesity band
pub const OBESE_CLASS_1_UP_TO: f64 = 29.9;

// ============================================================================
// FIELD
// ============================================================================

/// The two user-editable inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Height in centimeters
    Height,

    /// Weight in kilograms
    Weight,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Height => "height",
            Field::Weight => "weight",
        }
    }

    /// Capitalized name for titles
    pub fn title(&self) -> &'static str {
        match self {
            Field::Height => "Height",
            Field::Weight => "Weight",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Field::Height => "cm",
            Field::Weight => "kg",
        }
    }

    /// The other field (used for focus cycling)
    pub fn other(&self) -> Self {
        match self {
            Field::Height => Field::Weight,
            Field::Weight => Field::Height,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

/// One of four fixed, non-overlapping BMI bands.
///
/// The label of the top band is "Overweight" even though standard scales
/// call anything above 29.9 obese. It is kept as the product defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// bmi < 18.5
    Underweight,

    /// 18.5 <= bmi <= 24.9
    NormalWeight,

    /// 24.9 < bmi <= 29.9
    ObeseClass1,

    /// bmi > 29.9
    Overweight,
}

impl Category {
    /// All bands, lowest first
    pub const ALL: [Category; 4] = [
        Category::Underweight,
        Category::NormalWeight,
        Category::ObeseClass1,
        Category::Overweight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Underweight => "Underweight",
            Category::NormalWeight => "Normal weight",
            Category::ObeseClass1 => "Obese (class 1)",
            Category::Overweight => "Overweight",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why a pair of inputs produced no BMI.
///
/// The interactive shell never shows these; they exist for the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} is empty")]
    Empty(Field),

    #[error("{0} is not a number: {1:?}")]
    NotANumber(Field, String),

    #[error("{0} must be a positive number")]
    NotPositive(Field),

    #[error("height and weight do not produce a finite positive BMI")]
    OutOfRange,
}

impl InputError {
    /// Field that caused the rejection, if a single one did
    pub fn field(&self) -> Option<Field> {
        match self {
            InputError::Empty(field)
            | InputError::NotANumber(field, _)
            | InputError::NotPositive(field) => Some(*field),
            InputError::OutOfRange => None,
        }
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

/// A computed BMI together with its band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Unrounded quotient
    pub bmi: f64,
    pub category: Category,
}

impl Assessment {
    pub fn new(bmi: f64) -> Self {
        Assessment {
            bmi,
            category: classify(bmi),
        }
    }

    /// Value rounded to one decimal place for display, ties away from zero
    pub fn display_value(&self) -> String {
        format!("{:.1}", (self.bmi * 10.0).round() / 10.0)
    }

    pub fn summary(&self) -> String {
        format!("BMI: {} ({})", self.display_value(), self.category.label())
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Parse one field. Surrounding whitespace is ignored, anything else must be
/// a plain decimal number.
fn parse_field(field: Field, text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty(field));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(field, trimmed.to_string()))?;

    // "inf" and "NaN" parse as f64 but are never valid measurements
    if !value.is_finite() || value <= 0.0 {
        return Err(InputError::NotPositive(field));
    }

    Ok(value)
}

/// Validate both inputs and compute the assessment.
///
/// Height is checked before weight, so the error names the first bad field.
pub fn evaluate(height_cm_text: &str, weight_kg_text: &str) -> Result<Assessment, InputError> {
    let height_cm = parse_field(Field::Height, height_cm_text)?;
    let weight_kg = parse_field(Field::Weight, weight_kg_text)?;

    let height_m = height_cm / 100.0;
    if height_m <= 0.0 {
        return Err(InputError::NotPositive(Field::Height));
    }

    let bmi = weight_kg / (height_m * height_m);
    // Overflow to infinity or underflow to zero
    if !bmi.is_finite() || bmi <= 0.0 {
        return Err(InputError::OutOfRange);
    }

    let assessment = Assessment::new(bmi);
    debug!(
        height_cm,
        weight_kg,
        bmi,
        category = assessment.category.label(),
        "computed bmi"
    );
    Ok(assessment)
}

/// BMI for the two raw field texts, or `None` when either is empty,
/// non-numeric or not strictly positive. Not rounded.
pub fn compute_bmi(height_cm_text: &str, weight_kg_text: &str) -> Option<f64> {
    match evaluate(height_cm_text, weight_kg_text) {
        Ok(assessment) => Some(assessment.bmi),
        Err(e) => {
            debug!(reason = %e, "no bmi for input");
            None
        }
    }
}

/// Band for a valid (positive, finite) BMI value
pub fn classify(bmi: f64) -> Category {
    if bmi < UNDERWEIGHT_BELOW {
        Category::Underweight
    } else if bmi <= NORMAL_UP_TO {
        Category::NormalWeight
    } else if bmi <= OBESE_CLASS_1_UP_TO {
        Category::ObeseClass1
    } else {
        Category::Overweight
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 📝 Measurement Form - the two editable fields behind the calculator
// Holds raw text only. The assessment is derived on every read, never stored.

use crate::engine::{evaluate, Assessment, Field};
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    /// Height text as typed (centimeters)
    pub height: String,

    /// Weight text as typed (kilograms)
    pub weight: String,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Height => &self.height,
            Field::Weight => &self.weight,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Height => &mut self.height,
            Field::Weight => &mut self.weight,
        }
    }

    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        *self.field_mut(field) = text.into();
        trace!(%field, text = self.field(field), "field set");
    }

    pub fn set_height(&mut self, text: impl Into<String>) {
        self.set(Field::Height, text);
    }

    pub fn set_weight(&mut self, text: impl Into<String>) {
        self.set(Field::Weight, text);
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.field_mut(field).push(c);
        trace!(%field, text = self.field(field), "field edited");
    }

    pub fn pop_char(&mut self, field: Field) {
        self.field_mut(field).pop();
        trace!(%field, text = self.field(field), "field edited");
    }

    /// Current result, recomputed from the text
    pub fn assessment(&self) -> Option<Assessment> {
        evaluate(&self.height, &self.weight).ok()
    }

    /// Reset is only offered while a result is on screen
    pub fn can_reset(&self) -> bool {
        self.assessment().is_some()
    }

    /// Clear both fields back to empty
    pub fn reset(&mut self) {
        self.height.clear();
        self.weight.clear();
        trace!("form reset");
    }

    pub fn is_empty(&self) -> bool {
        self.height.is_empty() && self.weight.is_empty()
    }
}

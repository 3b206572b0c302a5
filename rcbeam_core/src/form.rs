//! # Form State Holder
//!
//! Holds the parameter bundle behind the input form together with the raw
//! text of every field. Raw text is what the widgets display; the bundle is
//! what gets submitted.
//!
//! Range hints are advisory: [`BeamForm::advisories`] reports out-of-range
//! values, but [`BeamForm::snapshot`] always returns the bundle as-is.
//!
//! ```rust
//! use rcbeam_core::form::BeamForm;
//! use rcbeam_core::params::Field;
//!
//! let mut form = BeamForm::new();
//! form.edit(Field::Width, "2000").unwrap();
//! assert_eq!(form.advisories().len(), 1);
//! assert_eq!(form.snapshot().b, 2000.0);
//! ```

use std::collections::BTreeMap;

use crate::errors::FormError;
use crate::params::{BeamParameters, ConcreteGrade, Field, LoadType, SteelGrade};

/// A numeric value outside its advisory range
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAdvisory {
    pub field: Field,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl RangeAdvisory {
    /// One-line hint for the form
    pub fn message(&self) -> String {
        format!(
            "{} is outside the recommended range {}-{}",
            self.field.label(),
            self.min,
            self.max
        )
    }
}

/// Editable form state.
#[derive(Debug, Clone)]
pub struct BeamForm {
    params: BeamParameters,
    raw: BTreeMap<Field, String>,
    invalid: BTreeMap<Field, FormError>,
}

impl Default for BeamForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BeamForm {
    /// Form populated with the default bundle
    pub fn new() -> Self {
        Self::from_params(BeamParameters::default())
    }

    /// Form populated from an existing bundle
    pub fn from_params(params: BeamParameters) -> Self {
        let raw = Field::ALL
            .into_iter()
            .map(|field| (field, params.display_value(field)))
            .collect();
        Self {
            params,
            raw,
            invalid: BTreeMap::new(),
        }
    }

    /// Apply one raw edit.
    ///
    /// The raw text is always kept for display. The bundle only changes when
    /// the text coerces; otherwise the field is flagged and the error returned.
    pub fn edit(&mut self, field: Field, raw: impl Into<String>) -> Result<(), FormError> {
        let raw = raw.into();
        let outcome = self.params.apply(field, &raw);
        self.raw.insert(field, raw);
        match outcome {
            Ok(()) => {
                self.invalid.remove(&field);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(field = field.key(), error = %e, "rejected form edit");
                self.invalid.insert(field, e.clone());
                Err(e)
            }
        }
    }

    pub fn select_concrete_grade(&mut self, grade: ConcreteGrade) {
        self.set_select(Field::Fck, grade.to_string());
        self.params.fck = grade;
    }

    pub fn select_steel_grade(&mut self, grade: SteelGrade) {
        self.set_select(Field::Fy, grade.to_string());
        self.params.fy = grade;
    }

    pub fn select_load_type(&mut self, load_type: LoadType) {
        self.set_select(Field::LoadType, load_type.to_string());
        self.params.load_type = load_type;
    }

    fn set_select(&mut self, field: Field, raw: String) {
        self.raw.insert(field, raw);
        self.invalid.remove(&field);
    }

    /// Text currently shown for a field
    pub fn raw(&self, field: Field) -> &str {
        self.raw.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Current bundle (read-only)
    pub fn params(&self) -> &BeamParameters {
        &self.params
    }

    /// Owned copy of the bundle for submission
    pub fn snapshot(&self) -> BeamParameters {
        self.params.clone()
    }

    /// Error from the last rejected edit of a field, if it is still pending
    pub fn field_error(&self, field: Field) -> Option<&FormError> {
        self.invalid.get(&field)
    }

    /// Whether any field currently shows text the bundle could not take
    pub fn has_invalid_fields(&self) -> bool {
        !self.invalid.is_empty()
    }

    /// Numeric fields outside their advisory ranges
    pub fn advisories(&self) -> Vec<RangeAdvisory> {
        Field::ALL
            .into_iter()
            .filter_map(|field| {
                let (min, max) = field.range()?;
                let value = self.params.numeric(field)?;
                (value < min || value > max).then_some(RangeAdvisory {
                    field,
                    value,
                    min,
                    max,
                })
            })
            .collect()
    }

    /// Restore the default bundle
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

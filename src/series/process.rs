//! Series data processing: rows plus configuration in, domains and a value
//! matrix out.

use tracing::debug;

use crate::data::{Datum, Value};
use crate::error::{Error, Result};

/// Fully processed series data.
///
/// Computed as a whole and replaced as a whole: a failed pass never leaves a
/// partially updated instance behind. Recomputing from unchanged inputs
/// yields an equal value, which is what makes processing idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSeries {
    categories: Vec<String>,
    value_domain: (f32, f32),
    values: Vec<Vec<f32>>,
}

impl ProcessedSeries {
    /// Process `rows` under the given field configuration.
    ///
    /// The category domain is each row's category-field value in row order;
    /// the value matrix holds one vector per row, one entry per value field
    /// in field order. The value domain covers every bar the layout pass
    /// will emit: per-group extremes when `grouped`, signed stack extents
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCategoryValue`] when a category value is not a
    /// string, [`Error::InvalidValueField`] when a value entry does not
    /// coerce to a finite number. Absent fields raise the same errors.
    pub fn compute(
        rows: &[Datum],
        category_field: &str,
        value_fields: &[String],
        grouped: bool,
    ) -> Result<Self> {
        let categories = rows
            .iter()
            .map(|row| {
                let value = row.get(category_field);
                value
                    .and_then(Value::as_str)
                    .map(ToString::to_string)
                    .ok_or_else(|| Error::InvalidCategoryValue {
                        field: category_field.to_string(),
                        value: render(value),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let values = rows
            .iter()
            .map(|row| {
                value_fields
                    .iter()
                    .map(|field| {
                        let value = row.get(field);
                        value.and_then(Value::as_num).ok_or_else(|| {
                            Error::InvalidValueField {
                                field: field.clone(),
                                value: render(value),
                            }
                        })
                    })
                    .collect::<Result<Vec<f32>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let value_domain = if grouped {
            grouped_domain(&values)
        } else {
            stacked_domain(&values)
        };

        debug!(
            categories = categories.len(),
            fields = value_fields.len(),
            grouped,
            min = value_domain.0,
            max = value_domain.1,
            "processed series data"
        );

        Ok(Self { categories, value_domain, values })
    }

    /// Ordered category keys, one per input row.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The `(min, max)` extent the value axis must cover.
    #[must_use]
    pub const fn value_domain(&self) -> (f32, f32) {
        self.value_domain
    }

    /// One numeric vector per category, one entry per value field.
    #[must_use]
    pub fn values(&self) -> &[Vec<f32>] {
        &self.values
    }
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "missing".to_string(), ToString::to_string)
}

/// Value domain for grouped composition.
///
/// Every group's baseline is forced to zero or below so a group of
/// all-positive bars still rises from a visible baseline instead of having
/// its shortest bar clipped to zero height.
fn grouped_domain(values: &[Vec<f32>]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for group in values {
        min = min.min(group.iter().fold(0.0, |m, &v| m.min(v)));
        max = max.max(group.iter().fold(f32::NEG_INFINITY, |m, &v| m.max(v)));
    }
    (min, max)
}

/// Value domain for stacked composition.
///
/// Positive and negative entries stack independently from zero, so the
/// extents are the most negative per-category negative sum and the largest
/// per-category positive sum.
fn stacked_domain(values: &[Vec<f32>]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mut min = 0.0f32;
    let mut max = f32::NEG_INFINITY;
    for stack in values {
        let neg_sum: f32 = stack.iter().filter(|&&v| v < 0.0).sum();
        let pos_sum: f32 = stack.iter().filter(|&&v| v > 0.0).sum();
        min = min.min(neg_sum);
        max = max.max(pos_sum);
    }
    (min, max)
}

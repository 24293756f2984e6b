//! Error types for barscene operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while processing series data.
///
/// Both variants are fatal for the processing pass that raised them: the
/// series keeps its previously computed domains and the scene graph is left
/// untouched. Conditions that are routine during setup (empty data, unset
/// fields, unresolved axes) are not errors; they skip work silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A row's category-field value is not a string.
    #[error(
        "the `{field}` value `{value}` is not a string; \
         use `set_data_and_fields` to replace data and fields together"
    )]
    InvalidCategoryValue {
        /// Name of the configured category field.
        field: String,
        /// Rendering of the offending value.
        value: String,
    },

    /// A row's value-field value is not numeric.
    #[error(
        "the `{field}` value `{value}` is not a number; \
         use `set_data_and_fields` to replace data and fields together"
    )]
    InvalidValueField {
        /// Name of the configured value field.
        field: String,
        /// Rendering of the offending value.
        value: String,
    },
}

//! # turntimer-core - Core Domain Types
//!
//! Foundation crate for Turn Timer. Provides the player entry domain types,
//! field validation rules, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, serde_json, thiserror, regex, tracing, tracing-subscriber,
//! tracing-appender, dirs).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Entry`] - One editable form row (raw name and time plus a stable key)
//! - [`EntryKey`] - Opaque identity of an entry, never reused
//! - [`Attribute`] - The editable fields of an entry
//! - [`Player`] - A validated `{name, time}` pair handed to the timer
//!
//! ### Validation (`validation`)
//! - [`Rule`] - A single pure check on a raw value
//! - [`Validators`] - Attribute to rules mapping
//! - [`ValidationResult`] - Per entry, per attribute outcome plus aggregate
//! - [`TimeRepresentation`] - Digit-only text or numeric time values
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding context to foreign errors
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use turntimer_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;
pub mod validation;

/// Prelude for common imports used throughout all Turn Timer crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use types::{Attribute, Entry, EntryKey, Player};
pub use validation::{
    CollectionError, EntryValidation, FieldError, Rule, TimeRepresentation, ValidateFn,
    ValidationResult, Validators, DIGITS_MESSAGE, NUMERIC_MESSAGE, REQUIRED_MESSAGE,
};

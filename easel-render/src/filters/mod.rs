//! Liquid helper filters registered into every render environment.
//!
//! Each module mirrors one helper concern: numeric formatting, data
//! shaping, string/markup helpers, unique-id generation, localization.
//! The renderer builds a fresh parser per render and registers all of
//! them; nothing here is shared across concurrent renders.

pub mod data;
pub mod localization;
pub mod numbers;
pub mod string_markup;
pub mod uniqueness;

pub use data::{Json, Keys};
pub use localization::LDate;
pub use numbers::{NumberToCurrency, NumberWithDelimiter};
pub use string_markup::{Pluralize, Titleize};
pub use uniqueness::UniqueId;

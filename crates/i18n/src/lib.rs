//! Bilingual (English / Lithuanian) labels for the pension dashboard.
//!
//! The metrics code never touches this crate directly: it receives a
//! `core_types::Placeholders` implementation built from a [`Catalog`].

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, LocalizedPlaceholders};
pub use error::I18nError;

pub mod enums;
pub mod error;
pub mod lenient;
pub mod placeholders;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Language, Period};
pub use error::CoreError;
pub use placeholders::{FixedPlaceholders, Placeholders};
pub use structs::{DAYS_PER_YEAR, DateRange, Observation, RawObservation, Selection, years_between};

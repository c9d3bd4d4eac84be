//! Filter state and query building.
//!
//! # Overview
//!
//! The filter module owns every filter control value and turns them into a
//! single [`QueryDescriptor`] for the catalog API:
//!
//! - [`units`]: size-unit selectors and byte conversion
//! - [`engine`]: the filter state engine (field edits, sort toggling,
//!   per-field removal, full reset, active filter tracking)
//!
//! # Example
//!
//! ```
//! use filehub::filters::{FilterEngine, FilterField, SortKey};
//!
//! let mut engine = FilterEngine::new();
//! engine.update_field(FilterField::Search, "report");
//! engine.update_field(FilterField::MinSize, "1");
//! engine.update_field(FilterField::MinSizeUnit, "KB");
//!
//! let query = engine.submit();
//! assert_eq!(query.search.as_deref(), Some("report"));
//! assert_eq!(query.min_size, Some(1024));
//! assert_eq!(query.ordering, "-uploaded_at");
//!
//! let query = engine.toggle_sort(SortKey::Size);
//! assert_eq!(query.ordering, "-size");
//! ```

pub mod engine;
pub mod units;

use thiserror::Error;

pub use engine::{
    ActiveFilterSet, FilterAction, FilterEngine, FilterField, FilterState, QueryDescriptor,
    SortDirection, SortKey, SortSpec,
};
pub use units::{size_to_bytes, SizeUnit};

/// Errors raised while interpreting filter input.
///
/// None of these escape query building: an unparseable unit or sort value
/// simply makes the affected field fall back to absent or default. They are
/// returned only where a caller names something that must exist, such as a
/// field name typed into the shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The name does not match any recognized filter field.
    #[error("unknown filter field '{name}'{}", hint(.suggestion))]
    UnknownField {
        /// The name as given
        name: String,
        /// Closest recognized field name, if any is close enough
        suggestion: Option<&'static str>,
    },

    /// The size unit selector could not be parsed.
    #[error("unknown size unit '{0}' (expected B, KB, MB or GB)")]
    UnknownUnit(String),

    /// The sort field is not one the catalog can order by.
    #[error("unknown sort field '{0}' (expected name, size, date or type)")]
    UnknownSortKey(String),

    /// The sort direction is neither ascending nor descending.
    #[error("unknown sort direction '{0}' (expected asc or desc)")]
    UnknownDirection(String),
}

fn hint(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{name}'?)"),
        None => String::new(),
    }
}

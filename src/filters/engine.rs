//! Filter state engine.
//!
//! # Overview
//!
//! [`FilterEngine`] is the single source of truth for filter inputs:
//! - Raw field values exactly as typed ([`FilterState`])
//! - The active filter set of the last emitted query ([`ActiveFilterSet`])
//! - The last emitted [`QueryDescriptor`]
//!
//! # Architecture
//!
//! Field edits only mutate state. A query is emitted by [`FilterEngine::submit`],
//! [`FilterEngine::toggle_sort`], [`FilterEngine::remove_field`] and
//! [`FilterEngine::clear_all`]; each returns the descriptor and forwards it to
//! the registered listener. Building a query is a pure function of the state,
//! so emitting twice without an edit in between yields the same descriptor.
//!
//! # Example
//!
//! ```
//! use filehub::filters::{FilterEngine, FilterField};
//!
//! let mut engine = FilterEngine::new();
//! engine.update_field(FilterField::Search, "invoice");
//! engine.update_field(FilterField::FileType, "application/pdf");
//! engine.submit();
//!
//! let query = engine.remove_field(FilterField::FileType);
//! assert_eq!(query.file_type, None);
//! assert_eq!(query.search.as_deref(), Some("invoice"));
//! assert!(!engine.active_filters().contains(FilterField::FileType));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::units::raw_size_to_bytes;
use super::FilterError;

/// Descending marker prefixed to the ordering token.
pub const DESCENDING_MARKER: char = '-';

/// A recognized filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    /// Free-text search over filename and type
    Search,
    /// Exact file type (MIME string)
    FileType,
    /// Minimum size, numeric part
    MinSize,
    /// Maximum size, numeric part
    MaxSize,
    /// Unit selector for the minimum size
    MinSizeUnit,
    /// Unit selector for the maximum size
    MaxSizeUnit,
    /// Lower bound on upload date
    UploadedAfter,
    /// Upper bound on upload date
    UploadedBefore,
    /// Field the listing is ordered by
    SortField,
    /// Ascending or descending order
    SortDirection,
}

impl FilterField {
    /// Every recognized field.
    pub const ALL: [FilterField; 10] = [
        FilterField::Search,
        FilterField::FileType,
        FilterField::MinSize,
        FilterField::MaxSize,
        FilterField::MinSizeUnit,
        FilterField::MaxSizeUnit,
        FilterField::UploadedAfter,
        FilterField::UploadedBefore,
        FilterField::SortField,
        FilterField::SortDirection,
    ];

    /// Fields that can contribute a constraint to a query, in query order.
    pub const QUERY_ORDER: [FilterField; 6] = [
        FilterField::Search,
        FilterField::FileType,
        FilterField::MinSize,
        FilterField::MaxSize,
        FilterField::UploadedAfter,
        FilterField::UploadedBefore,
    ];

    /// Field name as used in queries and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::FileType => "file_type",
            Self::MinSize => "min_size",
            Self::MaxSize => "max_size",
            Self::MinSizeUnit => "min_size_unit",
            Self::MaxSizeUnit => "max_size_unit",
            Self::UploadedAfter => "uploaded_after",
            Self::UploadedBefore => "uploaded_before",
            Self::SortField => "sort_field",
            Self::SortDirection => "sort_direction",
        }
    }

    /// Human label for chips and prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::FileType => "File Type",
            Self::MinSize => "Min Size",
            Self::MaxSize => "Max Size",
            Self::MinSizeUnit => "Min Size Unit",
            Self::MaxSizeUnit => "Max Size Unit",
            Self::UploadedAfter => "Uploaded After",
            Self::UploadedBefore => "Uploaded Before",
            Self::SortField => "Sort Field",
            Self::SortDirection => "Sort Direction",
        }
    }

    /// Value the field holds after a reset.
    #[must_use]
    pub fn default_value(self) -> &'static str {
        match self {
            Self::MinSizeUnit | Self::MaxSizeUnit => "B",
            Self::SortField => SortKey::default().name(),
            Self::SortDirection => SortDirection::default().as_str(),
            _ => "",
        }
    }

    fn closest(name: &str) -> Option<&'static str> {
        Self::ALL
            .iter()
            .map(|f| (f.name(), strsim::jaro_winkler(name, f.name())))
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let field = match normalized.as_str() {
            "search" | "q" => Self::Search,
            "file_type" | "type" => Self::FileType,
            "min_size" | "min" => Self::MinSize,
            "max_size" | "max" => Self::MaxSize,
            "min_size_unit" | "min_unit" => Self::MinSizeUnit,
            "max_size_unit" | "max_unit" => Self::MaxSizeUnit,
            "uploaded_after" | "after" => Self::UploadedAfter,
            "uploaded_before" | "before" => Self::UploadedBefore,
            "sort_field" | "sort" => Self::SortField,
            "sort_direction" | "direction" | "dir" => Self::SortDirection,
            _ => {
                return Err(FilterError::UnknownField {
                    name: s.to_string(),
                    suggestion: Self::closest(&normalized),
                })
            }
        };
        Ok(field)
    }
}

/// A field the catalog can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Original filename
    #[serde(rename = "original_filename")]
    Name,
    /// Size in bytes
    Size,
    /// Upload timestamp
    #[default]
    UploadedAt,
    /// MIME type
    FileType,
}

impl SortKey {
    /// Every sort key.
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Size,
        SortKey::UploadedAt,
        SortKey::FileType,
    ];

    /// Backend field name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "original_filename",
            Self::Size => "size",
            Self::UploadedAt => "uploaded_at",
            Self::FileType => "file_type",
        }
    }

    /// Human label for sort controls.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::UploadedAt => "Date",
            Self::FileType => "Type",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "original_filename" | "name" | "filename" => Ok(Self::Name),
            "size" => Ok(Self::Size),
            "uploaded_at" | "date" | "uploaded" => Ok(Self::UploadedAt),
            "file_type" | "type" => Ok(Self::FileType),
            _ => Err(FilterError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Sort order.
///
/// New sort keys start descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest / oldest / A first
    Asc,
    /// Largest / newest / Z first
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Raw value stored in filter state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "up" => Ok(Self::Asc),
            "desc" | "descending" | "down" => Ok(Self::Desc),
            _ => Err(FilterError::UnknownDirection(s.to_string())),
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to order by
    pub key: SortKey,
    /// Order direction
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a sort spec.
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Encode as a single ordering token, e.g. `-size` or `size`.
    #[must_use]
    pub fn ordering_token(&self) -> String {
        match self.direction {
            SortDirection::Desc => format!("{DESCENDING_MARKER}{}", self.key.name()),
            SortDirection::Asc => self.key.name().to_string(),
        }
    }
}

/// Raw filter control values.
///
/// Values are stored exactly as entered; nothing is validated until a query
/// is built. Mutation goes through [`FilterEngine`] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    search: String,
    file_type: String,
    min_size: String,
    max_size: String,
    min_size_unit: String,
    max_size_unit: String,
    uploaded_after: String,
    uploaded_before: String,
    sort_field: String,
    sort_direction: String,
}

impl Default for FilterState {
    fn default() -> Self {
        let mut state = Self {
            search: String::new(),
            file_type: String::new(),
            min_size: String::new(),
            max_size: String::new(),
            min_size_unit: String::new(),
            max_size_unit: String::new(),
            uploaded_after: String::new(),
            uploaded_before: String::new(),
            sort_field: String::new(),
            sort_direction: String::new(),
        };
        for field in FilterField::ALL {
            state.reset(field);
        }
        state
    }
}

impl FilterState {
    /// Current raw value of a field.
    #[must_use]
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search,
            FilterField::FileType => &self.file_type,
            FilterField::MinSize => &self.min_size,
            FilterField::MaxSize => &self.max_size,
            FilterField::MinSizeUnit => &self.min_size_unit,
            FilterField::MaxSizeUnit => &self.max_size_unit,
            FilterField::UploadedAfter => &self.uploaded_after,
            FilterField::UploadedBefore => &self.uploaded_before,
            FilterField::SortField => &self.sort_field,
            FilterField::SortDirection => &self.sort_direction,
        }
    }

    fn slot(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Search => &mut self.search,
            FilterField::FileType => &mut self.file_type,
            FilterField::MinSize => &mut self.min_size,
            FilterField::MaxSize => &mut self.max_size,
            FilterField::MinSizeUnit => &mut self.min_size_unit,
            FilterField::MaxSizeUnit => &mut self.max_size_unit,
            FilterField::UploadedAfter => &mut self.uploaded_after,
            FilterField::UploadedBefore => &mut self.uploaded_before,
            FilterField::SortField => &mut self.sort_field,
            FilterField::SortDirection => &mut self.sort_direction,
        }
    }

    fn set(&mut self, field: FilterField, value: String) {
        *self.slot(field) = value;
    }

    fn reset(&mut self, field: FilterField) {
        self.set(field, field.default_value().to_string());
    }

    /// Check whether every field holds its default value.
    #[must_use]
    pub fn is_default(&self) -> bool {
        FilterField::ALL
            .iter()
            .all(|&f| self.get(f) == f.default_value())
    }

    /// Effective sort, falling back to defaults for unrecognized values.
    #[must_use]
    pub fn sort(&self) -> SortSpec {
        let key = self.sort_field.parse::<SortKey>().unwrap_or_else(|e| {
            log::trace!("Using default sort field: {}", e);
            SortKey::default()
        });
        let direction = self
            .sort_direction
            .parse::<SortDirection>()
            .unwrap_or_else(|e| {
                log::trace!("Using default sort direction: {}", e);
                SortDirection::default()
            });
        SortSpec::new(key, direction)
    }

    /// Byte value of a size field under the presence policy.
    fn size_bytes(&self, field: FilterField) -> Option<u64> {
        let unit = match field {
            FilterField::MinSize => &self.min_size_unit,
            FilterField::MaxSize => &self.max_size_unit,
            _ => return None,
        };
        raw_size_to_bytes(self.get(field), unit)
    }

    /// Text value of a field if non-empty.
    fn text(&self, field: FilterField) -> Option<String> {
        let value = self.get(field);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

/// Normalized query sent to the catalog API.
///
/// Only non-empty filters are present. `ordering` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Free-text search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// File type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// Minimum size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u64>,
    /// Maximum size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    /// Lower upload date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_after: Option<String>,
    /// Upper upload date bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_before: Option<String>,
    /// Ordering token, `-` prefixed when descending
    pub ordering: String,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self::unfiltered(SortSpec::default())
    }
}

impl QueryDescriptor {
    /// Descriptor with no filters and the given sort.
    #[must_use]
    pub fn unfiltered(sort: SortSpec) -> Self {
        Self {
            search: None,
            file_type: None,
            min_size: None,
            max_size: None,
            uploaded_after: None,
            uploaded_before: None,
            ordering: sort.ordering_token(),
        }
    }

    /// Number of filter keys present (ordering excluded).
    #[must_use]
    pub fn filter_count(&self) -> usize {
        [
            self.search.is_some(),
            self.file_type.is_some(),
            self.min_size.is_some(),
            self.max_size.is_some(),
            self.uploaded_after.is_some(),
            self.uploaded_before.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Check whether any filter key is present.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.filter_count() > 0
    }

    /// Key/value pairs in query order, ordering last.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        if let Some(v) = &self.search {
            pairs.push(("search", v.clone()));
        }
        if let Some(v) = &self.file_type {
            pairs.push(("file_type", v.clone()));
        }
        if let Some(v) = self.min_size {
            pairs.push(("min_size", v.to_string()));
        }
        if let Some(v) = self.max_size {
            pairs.push(("max_size", v.to_string()));
        }
        if let Some(v) = &self.uploaded_after {
            pairs.push(("uploaded_after", v.clone()));
        }
        if let Some(v) = &self.uploaded_before {
            pairs.push(("uploaded_before", v.clone()));
        }
        pairs.push(("ordering", self.ordering.clone()));
        pairs
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .to_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// Filter fields contributing to the last emitted query, in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilterSet(Vec<FilterField>);

impl ActiveFilterSet {
    /// Check whether a field is active.
    #[must_use]
    pub fn contains(&self, field: FilterField) -> bool {
        self.0.contains(&field)
    }

    /// Number of active filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate active fields in query order.
    pub fn iter(&self) -> impl Iterator<Item = FilterField> + '_ {
        self.0.iter().copied()
    }

    /// Active field names in query order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|f| f.name()).collect()
    }
}

/// A user intention that changes filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Set one field's raw value
    Update(FilterField, String),
    /// Build and emit the query for the current state
    Submit,
    /// Toggle sorting by the given key and emit
    ToggleSort(SortKey),
    /// Clear one field and emit
    Remove(FilterField),
    /// Reset every field and emit
    ClearAll,
}

/// Callback invoked with every emitted query.
pub type QueryListener = Box<dyn FnMut(&QueryDescriptor) + Send>;

/// Filter state engine.
///
/// Owns the raw filter values and produces query descriptors and active
/// filter sets from them.
///
/// # Thread Safety
///
/// Mutated from one context only; the listener must be `Send` so the engine
/// can move onto whichever thread drives input.
pub struct FilterEngine {
    /// Raw control values
    state: FilterState,
    /// Active filters of the last emitted query
    active: ActiveFilterSet,
    /// Last emitted query
    last_query: Option<QueryDescriptor>,
    /// Receives every emitted query
    listener: Option<QueryListener>,
}

impl fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEngine")
            .field("state", &self.state)
            .field("active", &self.active)
            .field("last_query", &self.last_query)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// Create an engine with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FilterState::default(),
            active: ActiveFilterSet::default(),
            last_query: None,
            listener: None,
        }
    }

    /// Create an engine that forwards every emitted query to `listener`.
    #[must_use]
    pub fn with_listener<F>(listener: F) -> Self
    where
        F: FnMut(&QueryDescriptor) + Send + 'static,
    {
        let mut engine = Self::new();
        engine.set_listener(listener);
        engine
    }

    /// Replace the query listener.
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&QueryDescriptor) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    // ==================== State Access ====================

    /// Current raw filter values.
    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Active filters of the last emitted query.
    #[must_use]
    pub fn active_filters(&self) -> &ActiveFilterSet {
        &self.active
    }

    /// The last emitted query, if any.
    #[must_use]
    pub fn last_query(&self) -> Option<&QueryDescriptor> {
        self.last_query.as_ref()
    }

    /// Effective sort of the current state.
    #[must_use]
    pub fn sort(&self) -> SortSpec {
        self.state.sort()
    }

    // ==================== Field Edits ====================

    /// Set one field's raw value.
    ///
    /// The value is not validated and no query is emitted.
    pub fn update_field(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        log::trace!("Update {} = {:?}", field, value);
        self.state.set(field, value);
    }

    /// Set a field addressed by name.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownField`] if the name is not recognized.
    pub fn update_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<FilterField, FilterError> {
        let field: FilterField = name.parse()?;
        self.update_field(field, value);
        Ok(field)
    }

    // ==================== Query Building ====================

    /// Build the query and active filter set for the current state.
    ///
    /// Text fields are included when non-empty. Size fields are included when
    /// they convert to a non-zero byte count. Ordering is always included.
    #[must_use]
    pub fn build_query(&self) -> (QueryDescriptor, ActiveFilterSet) {
        let state = &self.state;
        let mut query = QueryDescriptor::unfiltered(state.sort());
        let mut active = Vec::new();

        for field in FilterField::QUERY_ORDER {
            let present = match field {
                FilterField::Search => {
                    query.search = state.text(field);
                    query.search.is_some()
                }
                FilterField::FileType => {
                    query.file_type = state.text(field);
                    query.file_type.is_some()
                }
                FilterField::MinSize => {
                    query.min_size = state.size_bytes(field);
                    query.min_size.is_some()
                }
                FilterField::MaxSize => {
                    query.max_size = state.size_bytes(field);
                    query.max_size.is_some()
                }
                FilterField::UploadedAfter => {
                    query.uploaded_after = state.text(field);
                    query.uploaded_after.is_some()
                }
                FilterField::UploadedBefore => {
                    query.uploaded_before = state.text(field);
                    query.uploaded_before.is_some()
                }
                _ => false,
            };
            if present {
                active.push(field);
            }
        }

        (query, ActiveFilterSet(active))
    }

    /// Build the query, record its active filters and emit it.
    pub fn submit(&mut self) -> QueryDescriptor {
        let (query, active) = self.build_query();
        log::debug!(
            "Emitting query [{}] with {} active filter(s)",
            query,
            active.len()
        );
        self.active = active;
        self.last_query = Some(query.clone());
        if let Some(listener) = self.listener.as_mut() {
            listener(&query);
        }
        query
    }

    // ==================== Sorting ====================

    /// Toggle sorting by `key` and emit.
    ///
    /// The same key flips direction; a different key starts descending.
    pub fn toggle_sort(&mut self, key: SortKey) -> QueryDescriptor {
        let current = self.state.sort();
        let direction = if current.key == key {
            current.direction.flipped()
        } else {
            SortDirection::Desc
        };
        log::debug!(
            "Sort {}:{} -> {}:{}",
            current.key,
            current.direction.as_str(),
            key,
            direction.as_str()
        );
        self.state.set(FilterField::SortField, key.name().to_string());
        self.state
            .set(FilterField::SortDirection, direction.as_str().to_string());
        self.submit()
    }

    // ==================== Removal ====================

    /// Clear one field and emit.
    ///
    /// Size fields lose their number but keep their unit selector. Unit and
    /// sort fields return to their defaults.
    pub fn remove_field(&mut self, field: FilterField) -> QueryDescriptor {
        log::debug!("Removing filter {}", field);
        self.state.reset(field);
        self.submit()
    }

    /// Reset every field to its default and emit.
    pub fn clear_all(&mut self) -> QueryDescriptor {
        log::debug!("Clearing all filters");
        self.state = FilterState::default();
        self.submit()
    }

    // ==================== Action Handling ====================

    /// Apply an action.
    ///
    /// Returns the emitted query, or `None` for plain field edits.
    pub fn handle_action(&mut self, action: FilterAction) -> Option<QueryDescriptor> {
        log::trace!("Handling filter action: {:?}", action);

        match action {
            FilterAction::Update(field, value) => {
                self.update_field(field, value);
                None
            }
            FilterAction::Submit => Some(self.submit()),
            FilterAction::ToggleSort(key) => Some(self.toggle_sort(key)),
            FilterAction::Remove(field) => Some(self.remove_field(field)),
            FilterAction::ClearAll => Some(self.clear_all()),
        }
    }
}

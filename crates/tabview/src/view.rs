//! View composition and the stateful engine facade.
//!
//! [`compute_view`] runs the fixed pipeline
//!
//! ```text
//! filter -> search -> sort -> paginate
//! ```
//!
//! Filtering and search only narrow, so their relative order does not
//! change the result. Sorting runs on the narrowed set and pagination on
//! the sorted one.
//!
//! [`TabularViewEngine`] keeps the most recent [`ViewSpec`] and the
//! [`Selection`] between renders, with a fluent builder for setting up a
//! table screen.

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::filter::{apply_filters, FilterSpec};
use crate::ordering::{apply_sort, Dir, SortSpec};
use crate::page::{paginate, PageSpec};
use crate::search::{apply_search, SearchSpec};
use crate::selection::{Selection, SelectionSummary};
use crate::value::Value;

/// Everything that shapes one table view.
///
/// Deserializes from partial JSON; missing parts take their defaults (no
/// filters, blank search, input order, first page of
/// [`DEFAULT_PAGE_SIZE`](crate::DEFAULT_PAGE_SIZE) rows).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSpec {
    pub filters: Vec<FilterSpec>,
    pub search: SearchSpec,
    pub sort: Option<SortSpec>,
    pub page: PageSpec,
}

impl ViewSpec {
    pub fn new() -> Self {
        ViewSpec::default()
    }

    /// Parses and validates a JSON view spec.
    ///
    /// ```
    /// use tabview::{ViewSpec, SortSpec};
    ///
    /// let spec = ViewSpec::from_json(r#"{"sort": {"field": "price"}, "page": {"size": 25}}"#).unwrap();
    /// assert_eq!(spec.sort, Some(SortSpec::asc("price")));
    /// assert_eq!(spec.page.size, 25);
    /// assert_eq!(spec.page.index, 0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: ViewSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Checks every filter and the page size.
    pub fn validate(&self) -> Result<()> {
        self.page.validate()?;
        for filter in &self.filters {
            filter.validate()?;
        }
        Ok(())
    }
}

/// The visible page plus the counts a table footer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<'a, T> {
    /// Records on the served page, in display order.
    pub records: Vec<&'a T>,
    /// Records left after filtering and search, before paging.
    pub total_matched: usize,
    pub total_pages: usize,
    /// Page actually served, after clamping.
    pub page_index: usize,
}

impl<T> ViewResult<'_, T> {
    /// Nothing matched: the "no results found" state.
    pub fn is_empty(&self) -> bool {
        self.total_matched == 0
    }
}

/// Computes one view of `records`.
///
/// Pure: the same records and spec always give the same page.
pub fn compute_view<'a, T, I, F>(records: I, spec: &ViewSpec, accessor: F) -> ViewResult<'a, T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let all: Vec<&'a T> = records.into_iter().collect();
    let total = all.len();

    let filtered = apply_filters(all, &spec.filters, &accessor);
    trace!(remaining = filtered.len(), "filters applied");

    let searched = apply_search(filtered, &spec.search, &accessor);
    trace!(remaining = searched.len(), "search applied");

    let total_matched = searched.len();
    let sorted = apply_sort(searched, spec.sort.as_ref(), &accessor);
    let page = paginate(sorted, spec.page);

    debug!(
        total,
        total_matched,
        page = page.index,
        total_pages = page.total_pages,
        "computed view"
    );

    ViewResult {
        records: page.records,
        total_matched,
        total_pages: page.total_pages,
        page_index: page.index,
    }
}

/// A computed view together with its selection state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot<'a, T, K> {
    pub view: ViewResult<'a, T>,
    /// Ids of the rows on the served page, in display order.
    pub visible_ids: Vec<K>,
    /// Header checkbox state for the page. `selected_count` only counts
    /// selected ids whose records are still in the collection, so it is the
    /// figure to render; stale ids stay in [`Selection`] until purged.
    pub selection: SelectionSummary,
}

/// Stateful facade over the view pipeline for one table screen.
///
/// Holds the current [`ViewSpec`] and [`Selection`]; every
/// [`compute`](TabularViewEngine::compute) starts from scratch.
///
/// # Example
///
/// ```
/// use tabview::{TabularViewEngine, FilterSpec, Dir, Value};
///
/// struct User {
///     id: u32,
///     name: String,
///     role: String,
/// }
///
/// fn accessor<'a>(user: &'a User, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::text(&user.name),
///         "role" => Value::text(&user.role),
///         _ => Value::Null,
///     }
/// }
///
/// let users = vec![
///     User { id: 1, name: "Zoe".into(), role: "student".into() },
///     User { id: 2, name: "adam".into(), role: "teacher".into() },
///     User { id: 3, name: "Mia".into(), role: "student".into() },
/// ];
///
/// let mut engine = TabularViewEngine::new()
///     .with_filter(FilterSpec::choice("role", "student"))
///     .sort_by("name", Dir::Asc)
///     .page_size(10);
///
/// engine.toggle(3);
/// let snapshot = engine.compute(&users, accessor, |u| u.id);
///
/// assert_eq!(snapshot.visible_ids, vec![3, 1]);
/// assert_eq!(snapshot.view.total_matched, 2);
/// assert!(snapshot.selection.is_any_visible_selected);
/// ```
#[derive(Debug, Clone)]
pub struct TabularViewEngine<K: Eq + Hash> {
    spec: ViewSpec,
    selection: Selection<K>,
}

impl<K: Eq + Hash + Clone> Default for TabularViewEngine<K> {
    fn default() -> Self {
        TabularViewEngine::with_spec(ViewSpec::default())
    }
}

impl<K: Eq + Hash + Clone> TabularViewEngine<K> {
    pub fn new() -> Self {
        TabularViewEngine::default()
    }

    pub fn with_spec(spec: ViewSpec) -> Self {
        TabularViewEngine {
            spec,
            selection: Selection::new(),
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Adds a filter.
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.spec.filters.push(filter);
        self
    }

    /// Sets the search query and the fields it looks at.
    pub fn with_search<I, S>(mut self, query: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.search = SearchSpec::new(query, fields);
        self
    }

    /// Sets the fields searched, keeping the query.
    pub fn searching<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.search.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort_by(mut self, field: &str, dir: Dir) -> Self {
        self.spec.sort = Some(SortSpec::new(field, dir));
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.spec.page = PageSpec::first(size);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn spec(&self) -> &ViewSpec {
        &self.spec
    }

    pub fn selection(&self) -> &Selection<K> {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection<K> {
        &mut self.selection
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// New search text. Returns to the first page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.spec.search.query = query.into();
        self.spec.page.index = 0;
    }

    /// Replaces the filter on the same field, or adds it. Returns to the
    /// first page.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        match self
            .spec
            .filters
            .iter_mut()
            .find(|existing| existing.field == filter.field)
        {
            Some(existing) => *existing = filter,
            None => self.spec.filters.push(filter),
        }
        self.spec.page.index = 0;
    }

    /// Drops every filter on `field`. Returns to the first page.
    pub fn remove_filter(&mut self, field: &str) {
        self.spec.filters.retain(|f| f.field != field);
        self.spec.page.index = 0;
    }

    pub fn clear_filters(&mut self) {
        self.spec.filters.clear();
        self.spec.page.index = 0;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.spec.sort = sort;
    }

    /// Column-header click on `field`.
    pub fn toggle_sort(&mut self, field: &str) {
        self.spec.sort = Some(SortSpec::toggled(self.spec.sort.as_ref(), field));
    }

    pub fn set_page(&mut self, index: usize) {
        self.spec.page.index = index;
    }

    /// New page size for a view of `total_matched` rows.
    pub fn set_page_size(&mut self, size: usize, total_matched: usize) {
        self.spec.page = self.spec.page.resize(size, total_matched);
    }

    pub fn toggle(&mut self, id: K) -> bool {
        self.selection.toggle(id)
    }

    pub fn select_all_visible(&mut self, visible: &[K]) {
        self.selection.select_all_visible(visible);
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Computes the current view of `records`.
    ///
    /// `id_of` maps a record to the id used for selection.
    pub fn compute<'a, T, F, G>(&self, records: &'a [T], accessor: F, id_of: G) -> ViewSnapshot<'a, T, K>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
        G: Fn(&T) -> K,
    {
        let view = compute_view(records, &self.spec, accessor);
        let visible_ids: Vec<K> = view.records.iter().map(|record| id_of(*record)).collect();
        let all_ids: Vec<K> = records.iter().map(&id_of).collect();
        let selection = SelectionSummary {
            selected_count: self.selection.live_count(&all_ids),
            ..self.selection.summary(&visible_ids)
        };

        ViewSnapshot {
            view,
            visible_ids,
            selection,
        }
    }
}

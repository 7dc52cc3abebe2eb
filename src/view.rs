//! Explicit view state threaded through the event handlers.
//!
//! A [`ViewState`] is never mutated. Each handler derives a complete new
//! state from the previous one, recomputing the paginated view from scratch.
//! When a handler fails the caller simply keeps the state it already has.

use std::sync::Arc;
use tracing::{debug, info};

use crate::dedupe::dedupe;
use crate::domain::{ColumnDescriptor, Field, PipelineError, Record, SortOrder};
use crate::paginate::{paginate, total_pages};
use crate::search::filter_by_substring;
use crate::sort::{sort_by_column, sort_records};

#[derive(Debug, Clone)]
pub struct ViewState {
    records: Arc<Vec<Record>>, // Deduplicated dataset, shared between states
    columns: Vec<ColumnDescriptor>,
    search_term: String,
    active: Vec<Record>,
    pages: Vec<Vec<Record>>,
    page_size: usize,
    current_page: usize, // 1-based
}

impl ViewState {
    /// Builds the initial view: deduplicated records, unsorted default columns, page 1.
    pub fn new(records: &[Record], page_size: usize) -> Result<Self, PipelineError> {
        let unique = dedupe(records);
        let pages = paginate(&unique, page_size)?;
        info!(
            "View created with {} unique records of {}",
            unique.len(),
            records.len()
        );
        Ok(Self {
            active: unique.clone(),
            records: Arc::new(unique),
            columns: ColumnDescriptor::defaults(),
            search_term: String::new(),
            pages,
            page_size,
            current_page: 1,
        })
    }

    /// Filters the dataset by `term` and re-applies the sort in effect.
    pub fn on_search_submit(&self, term: &str) -> Result<Self, PipelineError> {
        let filtered = filter_by_substring(&self.records, term);
        let active = match self.sort_in_effect()? {
            Some((field, order)) => sort_records(&filtered, field, order),
            None => filtered,
        };
        debug!("Search \"{}\" leaves {} records", term, active.len());
        self.derive(active, self.columns.clone(), term.to_string())
    }

    /// Sorts the active records by the column at `column_index`.
    pub fn on_column_header_click(&self, column_index: usize) -> Result<Self, PipelineError> {
        let (sorted, columns) = sort_by_column(&self.active, &self.columns, column_index)?;
        self.derive(sorted, columns, self.search_term.clone())
    }

    /// Selects the 1-based page `new_index`. Bounds are the caller's concern.
    pub fn on_page_index_change(&self, new_index: usize) -> Self {
        Self {
            current_page: new_index,
            ..self.clone()
        }
    }

    fn derive(
        &self,
        active: Vec<Record>,
        columns: Vec<ColumnDescriptor>,
        search_term: String,
    ) -> Result<Self, PipelineError> {
        let pages = paginate(&active, self.page_size)?;
        Ok(Self {
            records: Arc::clone(&self.records),
            columns,
            search_term,
            active,
            pages,
            page_size: self.page_size,
            current_page: 1,
        })
    }

    fn sort_in_effect(&self) -> Result<Option<(Field, SortOrder)>, PipelineError> {
        match self.columns.iter().find(|c| c.order != SortOrder::Unset) {
            Some(column) => Ok(Some((Field::resolve(&column.name)?, column.order))),
            None => Ok(None),
        }
    }

    /// Records of the selected page, `None` if the index is outside the view.
    pub fn current_page(&self) -> Option<&[Record]> {
        self.current_page
            .checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .map(Vec::as_slice)
    }

    pub fn page_index(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        // page_size was validated when the state was created
        total_pages(self.active.len(), self.page_size).unwrap_or(0)
    }

    pub fn pages(&self) -> &[Vec<Record>] {
        &self.pages
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn active(&self) -> &[Record] {
        &self.active
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn influencer(name: &str, city: &str, priority: i64) -> Record {
        Record {
            name: name.into(),
            city: city.into(),
            priority,
            ..Record::default()
        }
    }

    fn dataset() -> Vec<Record> {
        vec![
            influencer("Alice Smith", "Boston", 3),
            influencer("Bob Jones", "Austin", 1),
            influencer("Alice Smith", "Denver", 9),
            influencer("Carla Ali", "Chicago", 2),
            influencer("Dan Brown", "Austin", 5),
        ]
    }

    #[test]
    fn new_dedupes_and_paginates() {
        let view = ViewState::new(&dataset(), 2).unwrap();
        assert_eq!(view.records().len(), 4);
        assert_eq!(view.pages().len(), 2);
        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.page_index(), 1);
        assert_eq!(view.current_page().unwrap()[0].city, "Boston");
        assert!(view.columns().iter().all(|c| c.order == SortOrder::Unset));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = ViewState::new(&dataset(), 0).unwrap_err();
        assert_eq!(err, PipelineError::InvalidPageSize(0));
    }

    #[test]
    fn search_filters_the_full_dataset() {
        let view = ViewState::new(&dataset(), 20).unwrap();
        let searched = view.on_search_submit("Ali").unwrap();
        let names: Vec<&str> = searched.active().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice Smith", "Carla Ali"]);

        // A second search starts again from the whole dataset.
        let searched = searched.on_search_submit("Bob").unwrap();
        assert_eq!(searched.active().len(), 1);

        let cleared = searched.on_search_submit("").unwrap();
        assert_eq!(cleared.active(), view.records());
    }

    #[test]
    fn header_click_sorts_active_records_and_resets_page() {
        let view = ViewState::new(&dataset(), 2)
            .unwrap()
            .on_page_index_change(2);
        let sorted = view.on_column_header_click(5).unwrap();

        assert_eq!(sorted.page_index(), 1);
        assert_eq!(sorted.columns()[5].order, SortOrder::Ascending);
        let priorities: Vec<i64> = sorted.active().iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3, 5]);

        let sorted = sorted.on_column_header_click(5).unwrap();
        let priorities: Vec<i64> = sorted.active().iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![5, 3, 2, 1]);
    }

    #[test]
    fn search_keeps_sort_in_effect() {
        let view = ViewState::new(&dataset(), 20).unwrap();
        let sorted = view.on_column_header_click(1).unwrap(); // City ascending
        let searched = sorted.on_search_submit("a").unwrap();

        assert_eq!(searched.columns()[1].order, SortOrder::Ascending);
        let cities: Vec<&str> = searched.active().iter().map(|r| r.city.as_str()).collect();
        // Case sensitive: only "Carla Ali" and "Dan Brown" contain a lowercase "a"
        assert_eq!(cities, vec!["Austin", "Chicago"]);
    }

    #[test]
    fn failed_click_leaves_state_usable() {
        let view = ViewState::new(&dataset(), 20).unwrap();
        let err = view.on_column_header_click(6).unwrap_err();
        assert_eq!(err, PipelineError::SortIndexOutOfRange { index: 6, len: 6 });
        assert_eq!(view.active().len(), 4);
    }

    #[test]
    fn page_index_is_not_bounds_checked() {
        let view = ViewState::new(&dataset(), 2).unwrap();
        let moved = view.on_page_index_change(2);
        assert_eq!(moved.current_page().unwrap()[0].name, "Carla Ali");
        assert!(view.on_page_index_change(3).current_page().is_none());
        assert!(view.on_page_index_change(0).current_page().is_none());
    }

    #[test]
    fn empty_search_result_has_one_empty_page() {
        let view = ViewState::new(&dataset(), 20).unwrap();
        let none = view.on_search_submit("zzz").unwrap();
        assert_eq!(none.pages().len(), 1);
        assert_eq!(none.current_page(), Some(&[][..]));
        assert_eq!(none.total_pages(), 0);
    }
}

//! # itv
//!
//! A terminal table over influencer records that can be searched by name,
//! sorted by any column and browsed page by page.
//!
//! The data handling is a small pipeline of pure functions:
//!
//! - [`dedupe`] drops records whose `name` was already seen.
//! - [`filter_by_substring`] keeps records whose `name` contains a term.
//! - [`sort_by_column`] toggles a column's order and stably sorts by it.
//! - [`paginate`] splits the result into fixed size pages.
//!
//! [`ViewState`] threads these through the three user actions (search submit,
//! column heading click and page change), producing a new state each time.
//!
//! ```
//! use itv::{Record, ViewState};
//!
//! let records = vec![
//!     Record { name: "Alice".into(), priority: 2, ..Record::default() },
//!     Record { name: "Bob".into(), priority: 1, ..Record::default() },
//!     Record { name: "Alice".into(), priority: 9, ..Record::default() },
//! ];
//!
//! let view = ViewState::new(&records, 20).unwrap();
//! assert_eq!(view.records().len(), 2);
//!
//! // Column 5 is "Priority"
//! let view = view.on_column_header_click(5).unwrap();
//! assert_eq!(view.active()[0].name, "Bob");
//! ```

pub mod controller;
pub mod dedupe;
pub mod domain;
pub mod inputter;
pub mod loader;
pub mod logging;
pub mod model;
pub mod paginate;
pub mod search;
pub mod sort;
pub mod ui;
pub mod view;

pub use dedupe::dedupe;
pub use domain::{
    ColumnDescriptor, ErrorKind, Field, ITVError, PipelineError, Record, SortOrder, TVConfig,
};
pub use paginate::{paginate, total_pages};
pub use search::{contains_substring, filter_by_substring};
pub use sort::{sort_by_column, sort_records, toggle_columns};
pub use view::ViewState;

pub mod prelude {
    pub use crate::dedupe::dedupe;
    pub use crate::domain::{ColumnDescriptor, ErrorKind, Field, PipelineError, Record, SortOrder};
    pub use crate::paginate::{paginate, total_pages};
    pub use crate::search::{contains_substring, filter_by_substring};
    pub use crate::sort::{sort_by_column, sort_records, toggle_columns};
    pub use crate::view::ViewState;
}

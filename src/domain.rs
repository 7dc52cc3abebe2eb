use std::io::Error;
use std::path::PathBuf;

use derive_setters::Setters;
use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;
use thiserror::Error as ThisError;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Column headings shown by default, in display order.
pub const DEFAULT_COLUMNS: [&str; 6] = ["Name", "City", "State", "Position", "Hospital", "Priority"];

pub const HELP_TEXT: &str = "\
Left / h      select previous column
Right / l     select next column
Enter / s     sort by selected column
/             search influencers by name
:             go to page
n / PageDown  next page
p / PageUp    previous page
g / Home      first page
G / End       last page
?             show this help
Esc           close popup / cancel input
q / Ctrl-C    quit";

/// One influencer entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub name: String,
    pub city: String,
    pub state: String,
    pub position: String,
    pub hospital: String,
    pub priority: i64,
}

impl Record {
    /// Returns the value of `field` as a comparable key.
    pub fn key(&self, field: Field) -> SortKey<'_> {
        match field {
            Field::Name => SortKey::Text(&self.name),
            Field::City => SortKey::Text(&self.city),
            Field::State => SortKey::Text(&self.state),
            Field::Position => SortKey::Text(&self.position),
            Field::Hospital => SortKey::Text(&self.hospital),
            Field::Priority => SortKey::Number(self.priority),
        }
    }

    /// Cell values in the order of [`DEFAULT_COLUMNS`].
    pub fn cells(&self) -> [String; 6] {
        [
            self.name.clone(),
            self.city.clone(),
            self.state.clone(),
            self.position.clone(),
            self.hospital.clone(),
            self.priority.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(i64),
}

/// A sortable attribute of [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    City,
    State,
    Position,
    Hospital,
    Priority,
}

impl Field {
    /// Resolves a column name to a record attribute, ignoring case.
    pub fn resolve(column_name: &str) -> Result<Self, PipelineError> {
        match column_name.to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "city" => Ok(Field::City),
            "state" => Ok(Field::State),
            "position" => Ok(Field::Position),
            "hospital" => Ok(Field::Hospital),
            "priority" => Ok(Field::Priority),
            _ => Err(PipelineError::UnknownField(column_name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    Descending,
    #[default]
    Unset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub order: SortOrder,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: SortOrder::Unset,
        }
    }

    /// The default heading row, every column unsorted.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_COLUMNS.iter().map(|&name| Self::new(name)).collect()
    }
}

/// Failure category reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
}

/// Errors raised by the transformation pipeline.
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("sort index {index} is out of range for {len} columns")]
    SortIndexOutOfRange { index: usize, len: usize },

    #[error("unknown sort field \"{0}\"")]
    UnknownField(String),

    #[error("page size must be positive, got {0}")]
    InvalidPageSize(usize),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::SortIndexOutOfRange { .. }
            | PipelineError::UnknownField(_)
            | PipelineError::InvalidPageSize(_) => ErrorKind::InvalidArgument,
        }
    }
}

// Application level error, everything the binary can fail with.
#[derive(Debug)]
pub enum ITVError {
    IoError(Error),
    PolarsError(PolarsError),
    Pipeline(PipelineError),
    LoadingFailed(String),
    LoggingFailed(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
}

impl From<Error> for ITVError {
    fn from(err: Error) -> Self {
        ITVError::IoError(err)
    }
}

impl From<PolarsError> for ITVError {
    fn from(err: PolarsError) -> Self {
        ITVError::PolarsError(err)
    }
}

impl From<PipelineError> for ITVError {
    fn from(err: PipelineError) -> Self {
        ITVError::Pipeline(err)
    }
}

#[derive(Debug, Clone, Setters)]
pub struct TVConfig {
    pub page_size: usize,
    pub event_poll_time: u64,
    pub max_column_width: usize,
    pub log_file: PathBuf,
}

impl Default for TVConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            event_poll_time: 100,
            max_column_width: 30,
            log_file: PathBuf::from("itv.log"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CMDMode {
    Search,
    GotoPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Quit,
    MoveLeft,
    MoveRight,
    SortColumn,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    Search,
    GotoPage,
    Help,
    Exit,
    RawKey(KeyEvent),
}

use polars::prelude::*;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::domain::{ITVError, Record};

/// Columns every dataset has to provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["name", "city", "state", "position", "hospital", "priority"];

#[derive(Debug, PartialEq)]
pub enum FileType {
    CSV,
    JSON,
}

#[derive(Debug)]
pub struct FileInfo {
    pub path: PathBuf,
    pub file_size: u64,
    pub file_type: FileType,
}

/// Expands `~` and environment variables in a user supplied path.
pub fn expand_path(raw: &str) -> Result<PathBuf, ITVError> {
    let expanded = shellexpand::full(raw).map_err(|e| ITVError::LoadingFailed(e.to_string()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Reads the influencer dataset from a JSON array or a CSV file.
pub fn load_records(path: &Path) -> Result<Vec<Record>, ITVError> {
    let file_info = get_file_info(path.to_path_buf())?;
    debug!("Loading {:?}", file_info);

    let start_time = Instant::now();
    let df = match file_info.file_type {
        FileType::CSV => load_csv(&file_info.path)?.collect()?,
        FileType::JSON => load_json(&file_info.path)?,
    };
    let records = records_from_frame(&df)?;

    let data_loading_duration = start_time.elapsed().as_millis();
    info!(
        "Loaded {} records from {} in {data_loading_duration}ms ...",
        records.len(),
        file_info.path.display()
    );
    Ok(records)
}

pub fn detect_file_type(path: &Path) -> Result<FileType, ITVError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("CSV") => Ok(FileType::CSV),
        Some("JSON") => Ok(FileType::JSON),
        _ => Err(ITVError::UnknownFileType),
    }
}

fn get_file_info(path: PathBuf) -> Result<FileInfo, ITVError> {
    let metadata = fs::metadata(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ITVError::FileNotFound,
        ErrorKind::PermissionDenied => ITVError::PermissionDenied,
        _ => ITVError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(ITVError::LoadingFailed("Not a file!".into()));
    }

    let file_type = detect_file_type(&path)?;

    Ok(FileInfo {
        path,
        file_size: metadata.len(),
        file_type,
    })
}

fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.into()))
        .with_has_header(true)
        .finish()
}

fn load_json(path: &Path) -> Result<DataFrame, ITVError> {
    let file = File::open(path)?;
    Ok(JsonReader::new(file).finish()?)
}

fn records_from_frame(df: &DataFrame) -> Result<Vec<Record>, ITVError> {
    for required in REQUIRED_COLUMNS {
        if df.column(required).is_err() {
            return Err(ITVError::LoadingFailed(format!(
                "Missing column \"{required}\""
            )));
        }
    }

    let names = string_column(df, "name")?;
    let cities = string_column(df, "city")?;
    let states = string_column(df, "state")?;
    let positions = string_column(df, "position")?;
    let hospitals = string_column(df, "hospital")?;
    let priorities = integer_column(df, "priority")?;

    let records = names
        .into_iter()
        .zip(cities)
        .zip(states)
        .zip(positions)
        .zip(hospitals)
        .zip(priorities)
        .map(
            |(((((name, city), state), position), hospital), priority)| Record {
                name,
                city,
                state,
                position,
                hospital,
                priority,
            },
        )
        .collect();
    Ok(records)
}

// Missing values become empty strings
fn string_column(df: &DataFrame, col_name: &str) -> Result<Vec<String>, PolarsError> {
    let col = df.column(col_name)?.cast(&DataType::String)?;
    let series = col.str()?;
    Ok(series
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect())
}

// Missing or non-numeric values become 0
fn integer_column(df: &DataFrame, col_name: &str) -> Result<Vec<i64>, PolarsError> {
    let col = df.column(col_name)?.cast(&DataType::Int64)?;
    let series = col.i64()?;
    Ok(series.into_iter().map(|value| value.unwrap_or(0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn detects_supported_extensions() {
        assert_eq!(detect_file_type(Path::new("a/b.json")).unwrap(), FileType::JSON);
        assert_eq!(detect_file_type(Path::new("b.CSV")).unwrap(), FileType::CSV);
        assert!(matches!(
            detect_file_type(Path::new("b.parquet")),
            Err(ITVError::UnknownFileType)
        ));
        assert!(matches!(
            detect_file_type(Path::new("noext")),
            Err(ITVError::UnknownFileType)
        ));
    }

    #[test]
    fn loads_json_fixture() {
        let records = load_records(&fixture("influencers.json")).unwrap();
        assert_eq!(records.len(), 26);
        assert_eq!(records[0].name, "Amelia Hart");
        assert_eq!(records[0].city, "Boston");
        assert_eq!(records[0].state, "MA");
        assert_eq!(records[0].position, "Chief of Cardiology");
        assert_eq!(records[0].hospital, "Massachusetts General");
        assert_eq!(records[0].priority, 3);
    }

    #[test]
    fn loads_csv_fixture_with_missing_values() {
        let records = load_records(&fixture("influencers.csv")).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].name, "Bruno Diaz");
        assert_eq!(records[1].hospital, "");
        assert_eq!(records[2].priority, 0);
        assert_eq!(records[3].priority, 7);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = load_records(&fixture("missing_priority.json")).unwrap_err();
        match err {
            ITVError::LoadingFailed(msg) => assert!(msg.contains("priority")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_file_and_directory() {
        assert!(matches!(
            load_records(&fixture("does_not_exist.json")),
            Err(ITVError::FileNotFound)
        ));
        assert!(matches!(
            load_records(&fixture("")),
            Err(ITVError::LoadingFailed(_))
        ));
    }

    #[test]
    fn expand_path_handles_plain_and_undefined() {
        assert_eq!(
            expand_path("data/influencers.json").unwrap(),
            PathBuf::from("data/influencers.json")
        );
        assert!(matches!(
            expand_path("$ITV_UNDEFINED_TEST_VARIABLE/influencers.json"),
            Err(ITVError::LoadingFailed(_))
        ));
    }
}

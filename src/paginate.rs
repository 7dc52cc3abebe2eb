use tracing::trace;

use crate::domain::{PipelineError, Record};

/// Groups `records` into pages of at most `page_size` records.
///
/// Every page but the last is full. An empty input yields a single empty page
/// so page 0 can always be indexed.
pub fn paginate(records: &[Record], page_size: usize) -> Result<Vec<Vec<Record>>, PipelineError> {
    if page_size == 0 {
        return Err(PipelineError::InvalidPageSize(page_size));
    }

    let mut pages: Vec<Vec<Record>> = vec![Vec::with_capacity(page_size)];
    for record in records {
        // Start a new page once the current one is full
        if pages.last().is_some_and(|page| page.len() == page_size) {
            pages.push(Vec::with_capacity(page_size));
        }
        if let Some(page) = pages.last_mut() {
            page.push(record.clone());
        }
    }

    trace!(
        "Paginated {} records into {} pages of {}",
        records.len(),
        pages.len(),
        page_size
    );
    Ok(pages)
}

/// Number of pages needed for `record_count` records, `0` when there are none.
pub fn total_pages(record_count: usize, page_size: usize) -> Result<usize, PipelineError> {
    if page_size == 0 {
        return Err(PipelineError::InvalidPageSize(page_size));
    }
    Ok(record_count.div_ceil(page_size))
}

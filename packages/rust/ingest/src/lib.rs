//! Raw extract ingestion for HotelScrub.
//!
//! Reads the delimited scrape export in one pass, resolves its header
//! against the expected schema, and produces [`RawListing`] values for the
//! cleaning stage. Rows the CSV layer itself rejects (broken quoting,
//! invalid UTF-8) are counted, not fatal — only schema-level problems abort
//! the run.

pub mod schema;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use hotelscrub_shared::{HotelScrubError, RawListing, Result};

pub use schema::{Column, ColumnMap, resolve_columns};

/// Everything read from the raw extract.
#[derive(Debug)]
pub struct RawBatch {
    /// Rows the CSV layer could produce, in input order.
    pub rows: Vec<RawListing>,
    /// Rows rejected by the CSV layer before field extraction.
    pub malformed: u64,
}

impl RawBatch {
    /// Total data rows encountered in the input (header excluded).
    pub fn rows_read(&self) -> u64 {
        self.rows.len() as u64 + self.malformed
    }
}

/// Read the raw extract from a file path.
pub fn read_listings(path: &Path, delimiter: u8) -> Result<RawBatch> {
    let file = File::open(path).map_err(|e| HotelScrubError::io(path, e))?;
    read_listings_from(file, delimiter)
}

/// Read the raw extract from any reader (tests use in-memory input).
pub fn read_listings_from<R: Read>(reader: R, delimiter: u8) -> Result<RawBatch> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| HotelScrubError::Csv(e.to_string()))?;
    let map = resolve_columns(headers)?;
    debug!(?map, "header resolved");

    let mut rows = Vec::new();
    let mut malformed = 0u64;

    for record in rdr.records() {
        match record {
            Ok(record) => rows.push(extract_row(&map, &record)),
            Err(e) => {
                warn!(error = %e, "skipping malformed row");
                malformed += 1;
            }
        }
    }

    debug!(rows = rows.len(), malformed, "raw extract read");

    Ok(RawBatch { rows, malformed })
}

/// Pull one [`RawListing`] out of a CSV record using the resolved columns.
///
/// Cells beyond the record's length (short row under the flexible reader,
/// or an absent optional column) read as empty.
fn extract_row(map: &ColumnMap, record: &csv::StringRecord) -> RawListing {
    let cell = |idx: usize| record.get(idx).unwrap_or_default().to_string();
    let opt_cell = |idx: Option<usize>| idx.map(&cell).unwrap_or_default();

    RawListing {
        name: cell(map.name),
        location: cell(map.location),
        price: cell(map.price),
        score: cell(map.score),
        review_count: cell(map.review_count),
        review_category: opt_cell(map.review_category),
        free_cancellation: opt_cell(map.free_cancellation),
        rooms_left: opt_cell(map.rooms_left),
        description: opt_cell(map.description),
        source_url: cell(map.source_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "name,location,price,score,review_count,source_url";

    #[test]
    fn reads_basic_rows() {
        let data = format!(
            "{HEADER}\nSample Inn,Dublin,€150,8.5,120,https://example.com/a\n\
             Quay House,Galway,€99,7.9,80,https://example.com/b\n"
        );
        let batch = read_listings_from(data.as_bytes(), b',').expect("read");
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.malformed, 0);
        assert_eq!(batch.rows_read(), 2);
        assert_eq!(batch.rows[0].name, "Sample Inn");
        assert_eq!(batch.rows[1].price, "€99");
        // Optional columns absent from the header read as empty.
        assert_eq!(batch.rows[0].rooms_left, "");
    }

    #[test]
    fn short_rows_read_missing_fields_as_empty() {
        let data = format!("{HEADER}\nSample Inn,Dublin,€150\n");
        let batch = read_listings_from(data.as_bytes(), b',').expect("read");
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].score, "");
        assert_eq!(batch.rows[0].source_url, "");
    }

    #[test]
    fn semicolon_delimiter() {
        let data = "name;location;price;score;review_count;source_url\n\
                    Sample Inn;Dublin;150;8.5;120;u\n";
        let batch = read_listings_from(data.as_bytes(), b';').expect("read");
        assert_eq!(batch.rows[0].location, "Dublin");
    }

    #[test]
    fn invalid_utf8_row_counted_as_malformed() {
        let mut data: Vec<u8> = Vec::new();
        writeln!(data, "{HEADER}").unwrap();
        data.extend_from_slice(b"Bad \xff Hotel,Dublin,150,8.5,120,u\n");
        data.extend_from_slice(b"Good Hotel,Dublin,150,8.5,120,u\n");

        let batch = read_listings_from(data.as_slice(), b',').expect("read");
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.malformed, 1);
        assert_eq!(batch.rows_read(), 2);
    }

    #[test]
    fn missing_required_column_aborts() {
        let data = "name,location,score,review_count,source_url\nA,B,8.5,10,u\n";
        let err = read_listings_from(data.as_bytes(), b',').unwrap_err();
        assert!(err.to_string().contains("schema error"));
    }

    #[test]
    fn empty_input_aborts() {
        let err = read_listings_from(&b""[..], b',').unwrap_err();
        assert!(err.to_string().contains("schema error"));
    }

    #[test]
    fn reads_from_file_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("raw.csv");
        std::fs::write(&path, format!("{HEADER}\nA,Dublin,1,2,3,u\n")).expect("write");

        let batch = read_listings(&path, b',').expect("read");
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].name, "A");
    }
}

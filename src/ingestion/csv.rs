//! CSV ingestion implementation.

use crate::error::{IngestionError, IngestionResult};
use crate::types::Table;

use super::normalize::{coerce_text, table_from_grid};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Delimiters tried by [`sniff_delimiter`], in tie-break order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Parse an in-memory CSV buffer into a [`Table`].
///
/// Rules:
///
/// - The first non-blank record is the header.
/// - Records may have differing lengths; short records are padded with nulls.
/// - Each cell is coerced independently (there is no schema).
/// - The delimiter is sniffed from the first non-blank line (see [`sniff_delimiter`]).
/// - Content containing NUL bytes is rejected as binary.
pub fn parse_csv(bytes: &[u8]) -> IngestionResult<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.contains(&0) {
        return Err(IngestionError::ParseFailure {
            message: "content is binary, not delimited text".to_string(),
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(bytes))
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    parse_csv_from_reader(&mut rdr)
}

/// Pick the most frequent of `,` `\t` `;` `|` outside double quotes in the first non-blank line.
///
/// Ties go to the earlier candidate in [`CANDIDATE_DELIMITERS`]; a line with none of them is
/// comma-delimited.
pub fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .find(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
        .unwrap_or_default();

    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for &b in first_line {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if !in_quotes {
            if let Some(i) = CANDIDATE_DELIMITERS.iter().position(|&d| d == b) {
                counts[i] += 1;
            }
        }
    }

    let best = counts
        .iter()
        .enumerate()
        .fold(0, |best, (i, &c)| if c > counts[best] { i } else { best });
    CANDIDATE_DELIMITERS[best]
}

/// Parse CSV data from an existing CSV reader.
///
/// The reader should be built with `has_headers(false)`; header handling happens here so that
/// header cells go through the same naming rules as spreadsheet headers.
pub fn parse_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<Table> {
    let mut grid = Vec::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(record.iter().map(coerce_text).collect());
    }
    Ok(table_from_grid(grid))
}

//! Discovers a category's CSV files and concatenates them into one table.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::category::Category;
use crate::parser::parse_raw_cell;
use crate::stats::MergeStats;
use crate::table::{Cell, CategoryTable};

/// One CSV file as read from disk, before merging.
#[derive(Debug)]
pub struct RawFile {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub lossy_rows: usize,
}

/// Lists the `*.csv` files directly under `dir`, sorted by file name.
///
/// A directory that does not exist holds zero files.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Reads a CSV file with a header row. Short rows are accepted.
///
/// Bytes that are not valid UTF-8 are replaced rather than failing the file;
/// such rows are counted in `lossy_rows`.
pub fn read_file(path: &Path) -> Result<RawFile> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .byte_headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows = Vec::new();
    let mut lossy_rows = 0;
    for result in rdr.byte_records() {
        let record = result.with_context(|| format!("decoding {}", path.display()))?;

        let mut lossy = false;
        let row: Vec<Cell> = record
            .iter()
            .map(|field| {
                let text = String::from_utf8_lossy(field);
                lossy |= matches!(text, Cow::Owned(_));
                parse_raw_cell(&text)
            })
            .collect();

        if lossy {
            lossy_rows += 1;
        }
        rows.push(row);
    }

    if lossy_rows > 0 {
        warn!(path = %path.display(), lossy_rows, "Replaced invalid UTF-8 in CSV rows");
    }
    debug!(path = %path.display(), rows = rows.len(), "Read CSV file");

    Ok(RawFile {
        path: path.to_path_buf(),
        headers,
        rows,
        lossy_rows,
    })
}

/// Concatenates files in the given order, then within-file order.
///
/// The merged schema is the union of all headers in first-seen order; a file
/// lacking a column contributes nulls for it.
pub fn merge_files(category: Category, files: Vec<RawFile>) -> CategoryTable {
    let mut columns: Vec<String> = Vec::new();
    for file in &files {
        for header in &file.headers {
            if !columns.contains(header) {
                columns.push(header.clone());
            }
        }
    }

    let width = columns.len();
    let mut rows = Vec::with_capacity(files.iter().map(|f| f.rows.len()).sum());

    for file in files {
        let mapping: Vec<usize> = file
            .headers
            .iter()
            .filter_map(|h| columns.iter().position(|c| c == h))
            .collect();

        for raw in file.rows {
            let mut row = vec![Cell::Null; width];
            for (cell, &target) in raw.into_iter().zip(&mapping) {
                row[target] = cell;
            }
            rows.push(row);
        }
    }

    CategoryTable::new(category, columns, rows)
}

/// Merges every CSV under `<base_dir>/<category dir>` into one table.
///
/// Finding no files is not an error: the table is empty and the zero count
/// shows up in the returned stats.
pub fn merge_category(base_dir: &Path, category: Category) -> Result<(CategoryTable, MergeStats)> {
    let dir = base_dir.join(category.dir_name());
    let paths = discover_files(&dir)?;

    info!(category = %category, files = paths.len(), "Found files");
    if paths.is_empty() {
        warn!(category = %category, dir = %dir.display(), "No input files for category");
        let stats = MergeStats::default();
        return Ok((CategoryTable::empty(category), stats));
    }

    let files = paths
        .iter()
        .map(|p| read_file(p))
        .collect::<Result<Vec<_>>>()?;

    let stats = MergeStats {
        files: files.len(),
        rows: files.iter().map(|f| f.rows.len()).sum(),
        lossy_rows: files.iter().map(|f| f.lossy_rows).sum(),
    };

    let table = merge_files(category, files);
    info!(category = %category, rows = table.len(), "Merged category");

    Ok((table, stats))
}

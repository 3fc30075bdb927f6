// src/process/read.rs
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, instrument};

use crate::process::{classify::FIELD_SEPARATOR, write::WrittenTable};

/// A table as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// First line of the file; empty if that line is empty.
    pub fields: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse a table produced by [`crate::process::write::write_table`].
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading table {:?}", path))?;

    let (head, body) = text.split_once('\n').unwrap_or((text.as_str(), ""));
    let head = head.trim_end_matches('\r');
    let fields = if head.is_empty() {
        Vec::new()
    } else {
        parse_records(head)
            .with_context(|| format!("header of {:?}", path))?
            .into_iter()
            .next()
            .unwrap_or_default()
    };
    let rows = parse_records(body).with_context(|| format!("rows of {:?}", path))?;

    Ok(Table { fields, rows })
}

fn parse_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(FIELD_SEPARATOR as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

/// Re-read every written table and compare its row count with what was
/// written. For repeated paths only the last write is checked.
#[instrument(level = "info", skip(tables), fields(tables = tables.len()))]
pub fn verify_tables(tables: &[WrittenTable]) -> Result<()> {
    let mut expected: BTreeMap<&Path, usize> = BTreeMap::new();
    for table in tables {
        expected.insert(table.path.as_path(), table.rows);
    }

    for (path, rows) in expected {
        let found = read_table(path)?.rows.len();
        if found != rows {
            bail!(
                "{} holds {} rows, expected {}",
                path.display(),
                found,
                rows
            );
        }
        debug!(path = %path.display(), rows, "verified");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{
        section::{FlushPolicy, Section},
        split::split_text,
        write::{write_table, TableWriter},
    };
    use anyhow::Result;
    use tempfile::tempdir;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_written_section_reads_back_unchanged() -> Result<()> {
        let dir = tempdir()?;
        let input = "$Stop Point:ID;CODE;NAME\n1;A;Main \"Gate\"\n2;;Depot 2\n3;C; padded \n";
        let (sections, _) = split_text(input, Vec::<Section>::new(), FlushPolicy::default())?;
        let mut writer = TableWriter::new(dir.path());
        for section in sections.clone() {
            writer.write_section(section)?;
        }

        let table = read_table(dir.path().join("stop_point.csv"))?;
        assert_eq!(table.fields, sections[0].fields);
        assert_eq!(table.rows, sections[0].rows);
        Ok(())
    }

    #[test]
    fn test_headerless_table_reads_back_with_empty_fields() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("loose.csv");
        let rows = vec![row(&["1", "2"]), row(&["", ""])];
        write_table(&path, &[], &rows)?;

        let table = read_table(&path)?;
        assert!(table.fields.is_empty());
        assert_eq!(table.rows, rows);
        Ok(())
    }

    #[test]
    fn test_header_only_table() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv");
        write_table(&path, &row(&["A", "B"]), &[])?;

        let table = read_table(&path)?;
        assert_eq!(table.fields, row(&["A", "B"]));
        assert!(table.rows.is_empty());
        Ok(())
    }

    #[test]
    fn test_verify_detects_row_mismatch() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("arcs.csv");
        write_table(&path, &row(&["A", "B"]), &[row(&["1", "2"])])?;

        let good = WrittenTable {
            name: "ARCS".into(),
            path: path.clone(),
            rows: 1,
        };
        verify_tables(std::slice::from_ref(&good))?;

        let bad = WrittenTable { rows: 2, ..good };
        assert!(verify_tables(&[bad]).is_err());
        Ok(())
    }

    #[test]
    fn test_verify_checks_last_write_of_repeated_path() -> Result<()> {
        let dir = tempdir()?;
        let mut writer = TableWriter::new(dir.path());
        let mut first = Section::new("ARCS", row(&["A", "B"]), 1);
        first.rows = vec![row(&["1", "2"]), row(&["3", "4"])];
        let mut second = Section::new("ARCS", row(&["A", "B"]), 4);
        second.rows = vec![row(&["5", "6"])];
        writer.write_section(first)?;
        writer.write_section(second)?;

        verify_tables(writer.written())?;
        Ok(())
    }
}

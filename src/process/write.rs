// src/process/write.rs
use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::process::{classify::FIELD_SEPARATOR, section::Section, split::SectionSink};

/// Extension appended to every output table.
pub const TABLE_EXTENSION: &str = "csv";

/// Record of one table file produced during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// `"Vehicle Type"` -> `"vehicle_type.csv"`
pub fn table_file_name(section_name: &str) -> String {
    let stem: String = section_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{}.{}", stem, TABLE_EXTENSION)
}

/// Writes finalized sections as `;`-delimited tables into one directory.
///
/// The directory (and its parents) is created lazily before the first table,
/// so a run that finalizes nothing leaves the filesystem untouched.
pub struct TableWriter {
    out_dir: PathBuf,
    dir_ready: bool,
    seen: HashSet<PathBuf>,
    written: Vec<WrittenTable>,
}

impl TableWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            dir_ready: false,
            seen: HashSet::new(),
            written: Vec::new(),
        }
    }

    /// Tables written so far, in input order.
    pub fn written(&self) -> &[WrittenTable] {
        &self.written
    }

    pub fn into_written(self) -> Vec<WrittenTable> {
        self.written
    }

    fn ensure_dir(&mut self) -> Result<()> {
        if self.dir_ready {
            return Ok(());
        }
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("creating output directory {:?}", &self.out_dir))?;
        info!(dir = %self.out_dir.display(), "output directory ready");
        self.dir_ready = true;
        Ok(())
    }

    /// Serialize one section to `<out_dir>/<file name>`.
    pub fn write_section(&mut self, section: Section) -> Result<&WrittenTable> {
        self.ensure_dir()?;

        let path = self.out_dir.join(table_file_name(&section.name));
        if !self.seen.insert(path.clone()) {
            warn!(
                section = %section.name,
                path = %path.display(),
                "section name repeats; overwriting earlier table"
            );
        }

        write_table(&path, &section.fields, &section.rows)
            .with_context(|| format!("writing section {} to {:?}", section.name, &path))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        info!("  → {}: {} rows", file_name, section.rows.len());

        self.written.push(WrittenTable {
            name: section.name,
            path,
            rows: section.rows.len(),
        });
        Ok(&self.written[self.written.len() - 1])
    }
}

impl SectionSink for TableWriter {
    fn accept(&mut self, section: Section) -> Result<()> {
        self.write_section(section).map(|_| ())
    }
}

/// First line holds `fields`, then one line per row, each ended by `\r\n`.
/// An empty `fields` still yields an (empty) first line.
pub fn write_table(path: &Path, fields: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    if fields.is_empty() {
        file.write_all(b"\r\n")?;
    }

    let mut wtr = WriterBuilder::new()
        .delimiter(FIELD_SEPARATOR as u8)
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_writer(file);
    if !fields.is_empty() {
        wtr.write_record(fields)?;
    }
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

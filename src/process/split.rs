// src/process/split.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::process::{
    classify::{classify_line, LineKind},
    section::{FlushPolicy, Section},
    write::{TableWriter, WrittenTable},
};

/// Receives each section the moment it is finalized.
pub trait SectionSink {
    fn accept(&mut self, section: Section) -> Result<()>;
}

/// Collects sections in memory instead of writing them.
impl SectionSink for Vec<Section> {
    fn accept(&mut self, section: Section) -> Result<()> {
        self.push(section);
        Ok(())
    }
}

/// Tallies of what a pass saw. Purely informational.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitCounts {
    pub lines: usize,
    pub headers: usize,
    /// Rows appended to some section, whether or not it was later written.
    pub rows: usize,
    /// Data lines before any header, and lines without a separator.
    pub discarded_lines: usize,
    pub finalized_sections: usize,
    pub dropped_sections: usize,
}

enum State {
    Idle,
    Accumulating(Section),
}

/// Single forward pass over the instance lines.
///
/// Header lines close the active section (handing it to the sink if it is
/// complete) and open a new one; data lines extend the active section.
pub struct Splitter<S: SectionSink> {
    sink: S,
    policy: FlushPolicy,
    state: State,
    counts: SplitCounts,
}

impl<S: SectionSink> Splitter<S> {
    pub fn new(sink: S, policy: FlushPolicy) -> Self {
        Self {
            sink,
            policy,
            state: State::Idle,
            counts: SplitCounts::default(),
        }
    }

    pub fn counts(&self) -> SplitCounts {
        self.counts
    }

    /// Feed one raw line; `line_no` is 1-based and only used for logging.
    pub fn push_line(&mut self, line_no: usize, raw: &str) -> Result<()> {
        self.counts.lines += 1;
        match classify_line(raw) {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Header { name, fields } => {
                self.finalize()?;
                debug!(section = name, line = line_no, "processing section");
                self.counts.headers += 1;
                self.state = State::Accumulating(Section::new(name, fields, line_no));
            }
            LineKind::Data(cells) => match &mut self.state {
                State::Accumulating(section) => {
                    section.rows.push(cells);
                    self.counts.rows += 1;
                }
                State::Idle => {
                    debug!(line = line_no, "data line before any section header, skipping");
                    self.counts.discarded_lines += 1;
                }
            },
            LineKind::Stray => {
                debug!(line = line_no, "line without separator, skipping");
                self.counts.discarded_lines += 1;
            }
        }
        Ok(())
    }

    /// Hand the active section to the sink if it qualifies, then go idle.
    fn finalize(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Accumulating(section) if section.is_complete(self.policy) => {
                self.counts.finalized_sections += 1;
                self.sink.accept(section)
            }
            State::Accumulating(section) => {
                debug!(
                    section = %section.name,
                    line = section.line,
                    fields = section.fields.len(),
                    rows = section.rows.len(),
                    "dropping incomplete section"
                );
                self.counts.dropped_sections += 1;
                Ok(())
            }
            State::Idle => Ok(()),
        }
    }

    /// Flush the trailing section and return the sink.
    pub fn finish(mut self) -> Result<(S, SplitCounts)> {
        self.finalize()?;
        Ok((self.sink, self.counts))
    }
}

/// Run the splitter over in-memory text.
pub fn split_text<S: SectionSink>(
    text: &str,
    sink: S,
    policy: FlushPolicy,
) -> Result<(S, SplitCounts)> {
    let mut splitter = Splitter::new(sink, policy);
    for (idx, line) in text.lines().enumerate() {
        splitter.push_line(idx + 1, line)?;
    }
    splitter.finish()
}

/// Outcome of [`split_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    pub tables: Vec<WrittenTable>,
    pub counts: SplitCounts,
}

impl SplitSummary {
    /// Number of table writes, one per finalized section.
    pub fn files(&self) -> usize {
        self.tables.len()
    }

    pub fn rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// Read `config.input` and write one table per complete section into
/// `config.output_dir`.
#[instrument(level = "info", skip(config), fields(input = %config.input.display()))]
pub fn split_file(config: &Config) -> Result<SplitSummary> {
    let start = Instant::now();

    if !config.input.is_file() {
        return Err(anyhow!(
            "input file does not exist: {}",
            config.input.display()
        ));
    }
    info!("reading {}", config.input.display());
    let text = fs::read_to_string(&config.input)
        .with_context(|| format!("reading instance file {:?}", &config.input))?;

    let writer = TableWriter::new(&config.output_dir);
    let (writer, counts) = split_text(&text, writer, config.flush_policy())?;

    let summary = SplitSummary {
        tables: writer.into_written(),
        counts,
    };
    info!(
        files = summary.files(),
        rows = summary.rows(),
        dropped = counts.dropped_sections,
        discarded_lines = counts.discarded_lines,
        "completed in {:?}",
        start.elapsed()
    );
    Ok(summary)
}

// src/process/mod.rs
//! Splitting a section-delimited instance file into one table per section.
//!
//! `classify` decides what each line is, `split` accumulates rows under the
//! active header and hands finished sections to a [`split::SectionSink`],
//! `write` turns them into `;`-delimited files and `read` parses those back.

pub mod classify;
pub mod read;
pub mod section;
pub mod split;
pub mod write;

pub use read::{read_table, verify_tables, Table};
pub use section::{FlushPolicy, Section};
pub use split::{split_file, split_text, SectionSink, SplitCounts, SplitSummary, Splitter};
pub use write::{table_file_name, TableWriter, WrittenTable};

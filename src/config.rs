// src/config.rs
//! Run configuration. Defaults reproduce the historical fixed paths; a YAML
//! file and then command-line flags may override any of them.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::process::section::FlushPolicy;

/// Instance file read when nothing else is configured.
pub const DEFAULT_INPUT: &str = "/workspace/data/short.txt";
/// Directory receiving the tables when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "/workspace/data/short";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Section-delimited MDVSP instance file.
    pub input: PathBuf,
    /// Where `<section>.csv` files are written.
    pub output_dir: PathBuf,
    /// Write sections that have a header but no data rows.
    pub keep_empty_sections: bool,
    /// Write sections whose header line has no column list.
    pub keep_headerless_sections: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            keep_empty_sections: false,
            keep_headerless_sections: false,
        }
    }
}

impl Config {
    /// Load a YAML config file. Absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config file {:?}", path))
    }

    /// `load` when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn flush_policy(&self) -> FlushPolicy {
        FlushPolicy {
            keep_empty: self.keep_empty_sections,
            keep_headerless: self.keep_headerless_sections,
        }
    }
}

// src/process/section.rs

/// One `$`-introduced block of the instance file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Name from the header line, e.g. `ARCS` for `$ARCS:FROM;TO;COST`.
    pub name: String,
    /// Column names after the colon. Empty when the header has no colon.
    pub fields: Vec<String>,
    /// Each accepted data line, split on `;`.
    pub rows: Vec<Vec<String>>,
    /// 1-based line number of the header, for log output only.
    pub line: usize,
}

/// Which incomplete sections are still handed to the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushPolicy {
    /// Write sections that never received a data row as header-only tables.
    pub keep_empty: bool,
    /// Write sections whose header carries no column names.
    pub keep_headerless: bool,
}

impl Section {
    pub fn new(name: impl Into<String>, fields: Vec<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            fields,
            rows: Vec::new(),
            line,
        }
    }

    /// Whether this section may be finalized under `policy`.
    /// An anonymous section never is, whatever the policy says.
    pub fn is_complete(&self, policy: FlushPolicy) -> bool {
        if self.name.is_empty() {
            return false;
        }
        if self.fields.is_empty() && !policy.keep_headerless {
            return false;
        }
        !self.rows.is_empty() || policy.keep_empty
    }
}

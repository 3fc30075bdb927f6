use anyhow::Result;
use clap::Parser;
use mdvsp_split::{
    config::Config,
    process::{split_file, verify_tables},
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "mdvsp-split")]
#[command(about = "Split a section-delimited MDVSP instance file into one CSV file per section")]
struct Args {
    /// Instance file to split [default: /workspace/data/short.txt]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for the per-section CSV files [default: /workspace/data/short]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML file providing any of the settings; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write sections that have a header but no data rows (`=false` to turn off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    keep_empty_sections: Option<bool>,

    /// Also write sections whose header has no column list (`=false` to turn off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    keep_headerless_sections: Option<bool>,

    /// Re-read every written file and check its row count
    #[arg(long)]
    verify: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut cfg = Config::load_or_default(self.config.as_deref())?;
        if let Some(input) = self.input {
            cfg.input = input;
        }
        if let Some(output) = self.output {
            cfg.output_dir = output;
        }
        if let Some(keep) = self.keep_empty_sections {
            cfg.keep_empty_sections = keep;
        }
        if let Some(keep) = self.keep_headerless_sections {
            cfg.keep_headerless_sections = keep;
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    fmt().with_env_filter(env).with_target(false).init();

    let verify = args.verify;
    let cfg = args.into_config()?;
    info!("input: {}", cfg.input.display());
    info!("output directory: {}", cfg.output_dir.display());

    let summary = split_file(&cfg)?;

    if verify {
        verify_tables(&summary.tables)?;
        info!("verified {} tables", summary.files());
    }

    info!(
        "done: {} CSV files ({} rows) in {}",
        summary.files(),
        summary.rows(),
        cfg.output_dir.display()
    );
    Ok(())
}

// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::Result;
use crate::processing::{Export, PipelineOptions};

/// Settings for a single invocation, loadable from JSON.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct RunConfig {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub export: Export,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default)]
    pub strict_histogram: bool,
    #[serde(default)]
    pub json: bool,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Layer command-line flags over this configuration.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        self.debug |= cli.debug;
        self.strict_histogram |= cli.strict_histogram;
        self.json |= cli.json;
        if cli.mask {
            self.export = Export::Mask;
        }
        if let Some(output) = &cli.output {
            self.output = Some(output.clone());
        }
        if cli.threads.is_some() {
            self.threads = cli.threads;
        }
        self
    }

    /// Resolve the configuration for `cli`, reading `--config` if given.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_cli(cli))
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            debug: self.debug,
            strict_histogram: self.strict_histogram,
        }
    }
}

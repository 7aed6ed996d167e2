//! Run configuration
//!
//! Parameters are validated before any file is indexed, so a bad damping
//! factor or a missing path never costs a scan.

use crate::error::{DankerError, DankerResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// PageRank parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Damping factor, strictly between 0 and 1 (usually 0.85)
    pub damping: f64,
    /// Number of iterations; there is no convergence check
    pub iterations: usize,
    /// Seed rank of every node before the first iteration
    pub start_value: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            iterations: 40,
            start_value: 0.1,
        }
    }
}

impl RankConfig {
    pub fn new(damping: f64, iterations: usize, start_value: f64) -> Self {
        Self {
            damping,
            iterations,
            start_value,
        }
    }

    /// Validate parameters
    pub fn validate(&self) -> DankerResult<()> {
        if self.iterations == 0 {
            return Err(DankerError::InvalidArgument(
                "iterations must be a positive integer".to_string(),
            ));
        }
        // Also rejects NaN
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(DankerError::InvalidArgument(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if !self.start_value.is_finite() {
            return Err(DankerError::InvalidArgument(format!(
                "start value must be finite, got {}",
                self.start_value
            )));
        }
        Ok(())
    }
}

/// How the node table is laid out while indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Keep predecessor lists ("bigmem")
    InMemory,
    /// Keep only degrees and ranks; re-scan the target-sorted file ("smallmem")
    Streaming,
}

/// Execution mode selected by the presence of a right-sorted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<'a> {
    InMemory,
    Streaming { right_sorted: &'a Path },
}

impl Mode<'_> {
    pub fn strategy(&self) -> Strategy {
        match self {
            Mode::InMemory => Strategy::InMemory,
            Mode::Streaming { .. } => Strategy::Streaming,
        }
    }
}

/// Everything one run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Edge file sorted ascending by source
    pub left_sorted: PathBuf,
    /// Same edges sorted ascending by target; selects streaming mode
    #[serde(default)]
    pub right_sorted: Option<PathBuf>,
    #[serde(default)]
    pub rank: RankConfig,
}

impl RunConfig {
    pub fn new(left_sorted: impl Into<PathBuf>) -> Self {
        Self {
            left_sorted: left_sorted.into(),
            right_sorted: None,
            rank: RankConfig::default(),
        }
    }

    pub fn with_right_sorted(mut self, right_sorted: impl Into<PathBuf>) -> Self {
        self.right_sorted = Some(right_sorted.into());
        self
    }

    pub fn with_rank(mut self, rank: RankConfig) -> Self {
        self.rank = rank;
        self
    }

    /// Load a YAML configuration file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> DankerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> DankerResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn mode(&self) -> Mode<'_> {
        match &self.right_sorted {
            Some(right_sorted) => Mode::Streaming {
                right_sorted: right_sorted.as_path(),
            },
            None => Mode::InMemory,
        }
    }

    /// Validate parameters and check every input path can be opened
    pub fn validate(&self) -> DankerResult<()> {
        self.rank.validate()?;
        check_readable(&self.left_sorted)?;
        if let Some(right_sorted) = &self.right_sorted {
            check_readable(right_sorted)?;
        }
        Ok(())
    }
}

fn check_readable(path: &Path) -> DankerResult<()> {
    let unreadable = |reason: String| {
        DankerError::InvalidArgument(format!("cannot read \"{}\": {}", path.display(), reason))
    };
    let file = File::open(path).map_err(|e| unreadable(e.to_string()))?;
    let metadata = file.metadata().map_err(|e| unreadable(e.to_string()))?;
    if !metadata.is_file() {
        return Err(unreadable("not a regular file".to_string()));
    }
    Ok(())
}

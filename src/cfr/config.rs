//! Configuration options for the trainer.
//!
//! [`TrainerConfig`] controls iteration count, metric-logging cadence,
//! verbosity, and which CFR variant the solver applies. Configs serialize as
//! JSON so the binaries can load them from a file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cfr::variant::CfrVariant;

/// How often the trainer takes an average-strategy snapshot and emits a
/// metrics record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogInterval {
    /// One record every `max(1, num_iterations / 10_000)` iterations.
    #[default]
    Auto,
    /// One record every `n` iterations. Zero is rejected by `validate`.
    Every(u64),
    /// No metric snapshots; the logger collaborator is never invoked.
    Disabled,
}

impl LogInterval {
    /// Concrete cadence for a run of `num_iterations`, or `None` when
    /// logging is disabled.
    pub fn resolve(self, num_iterations: u64) -> Option<u64> {
        match self {
            LogInterval::Auto => Some((num_iterations / 10_000).max(1)),
            LogInterval::Every(n) => Some(n),
            LogInterval::Disabled => None,
        }
    }
}

/// Configuration for a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of CFR iterations to run. Must be positive.
    pub num_iterations: u64,

    /// Metric-snapshot cadence.
    #[serde(default)]
    pub log_interval: LogInterval,

    /// Print percentage milestones and positive-regret diagnostics while
    /// training.
    #[serde(default)]
    pub verbose: bool,

    /// Which accumulation rules to apply.
    #[serde(default)]
    pub variant: CfrVariant,
}

impl TrainerConfig {
    /// Create a configuration for `num_iterations` with default settings
    /// (auto log interval, quiet, vanilla CFR).
    pub fn new(num_iterations: u64) -> Self {
        Self {
            num_iterations,
            log_interval: LogInterval::default(),
            verbose: false,
            variant: CfrVariant::default(),
        }
    }

    /// Builder method: set the CFR variant.
    pub fn with_variant(mut self, variant: CfrVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Builder method: set the metric-logging cadence.
    pub fn with_log_interval(mut self, interval: LogInterval) -> Self {
        self.log_interval = interval;
        self
    }

    /// Builder method: set verbosity.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: TrainerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.log_interval == LogInterval::Every(0) {
            return Err(ConfigError::ZeroLogInterval);
        }
        Ok(())
    }
}

/// Errors from building or loading a [`TrainerConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// `num_iterations` was zero.
    ZeroIterations,
    /// `log_interval = every(0)` was requested.
    ZeroLogInterval,
    /// The config file could not be read.
    Io(std::io::Error),
    /// The config file was not valid JSON for a `TrainerConfig`.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroIterations => write!(f, "num_iterations must be positive"),
            ConfigError::ZeroLogInterval => write!(f, "log interval must be positive"),
            ConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Statistics from a completed training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainStats {
    /// Total iterations completed.
    pub iterations: u64,

    /// Unique information sets discovered.
    pub info_sets: usize,

    /// Wall-clock training time in seconds.
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,
}

impl TrainStats {
    /// Recompute the iteration rate from the elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}

//! Configuration system for shiftwise.
//!
//! Load solver configuration from TOML or YAML to control the deadline,
//! search parallelism, acceptor and objective weights without code changes.
//!
//! # Examples
//!
//! ```
//! use shiftwise_config::{AcceptorConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!     search_workers = { count = 2 }
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [local_search.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 200
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(30));
//! assert_eq!(config.search_worker_count(), 2);
//! assert!(matches!(config.local_search.acceptor, AcceptorConfig::LateAcceptance(_)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use shiftwise_config::SolverConfig;
//!
//! let config = SolverConfig::load("shiftwise.toml").unwrap_or_default();
//! assert_eq!(config.search_worker_count(), 4);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default deadline when none is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);

/// Longest deadline the orchestrator will honor.
pub const MAX_TIME_LIMIT: Duration = Duration::from_secs(600);

const MAX_AUTO_WORKERS: usize = 8;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
///
/// Passed explicitly into every solving run; there is no process-wide state.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Base seed; search worker `i` uses `seed + i`. `None` draws from the OS.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of independent multi-start search workers.
    #[serde(default)]
    pub search_workers: SearchWorkerCount,

    #[serde(default)]
    pub termination: TerminationConfig,

    #[serde(default)]
    pub construction: ConstructionConfig,

    #[serde(default)]
    pub local_search: LocalSearchConfig,

    #[serde(default)]
    pub objective: ObjectiveWeights,

    #[serde(default)]
    pub difficulty: DifficultyWeights,

    /// Memory budget for the whole multi-worker search, in bytes.
    #[serde(default)]
    pub memory_limit_bytes: Option<u64>,

    /// Shift count above which the conflict cache is built in parallel.
    #[serde(default = "default_parallel_conflict_threshold")]
    pub parallel_conflict_threshold: usize,
}

fn default_parallel_conflict_threshold() -> usize {
    256
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            search_workers: SearchWorkerCount::default(),
            termination: TerminationConfig::default(),
            construction: ConstructionConfig::default(),
            local_search: LocalSearchConfig::default(),
            objective: ObjectiveWeights::default(),
            difficulty: DifficultyWeights::default(),
            memory_limit_bytes: None,
            parallel_conflict_threshold: default_parallel_conflict_threshold(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_workers == SearchWorkerCount::Count(0) {
            return Err(ConfigError::Invalid(
                "search_workers count must be at least 1".to_string(),
            ));
        }
        if self.local_search.moves_per_step == 0 {
            return Err(ConfigError::Invalid(
                "local_search.moves_per_step must be at least 1".to_string(),
            ));
        }
        match &self.local_search.acceptor {
            AcceptorConfig::LateAcceptance(la) if la.late_acceptance_size == Some(0) => {
                return Err(ConfigError::Invalid(
                    "late_acceptance_size must be at least 1".to_string(),
                ));
            }
            AcceptorConfig::SimulatedAnnealing(sa)
                if sa.decay_rate.is_some_and(|r| !(r > 0.0 && r <= 1.0)) =>
            {
                return Err(ConfigError::Invalid(
                    "simulated annealing decay_rate must be in (0, 1]".to_string(),
                ));
            }
            _ => {}
        }
        if self.difficulty.rate_divisor <= 0.0 {
            return Err(ConfigError::Invalid(
                "difficulty.rate_divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the deadline.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.termination.seconds_spent_limit = None;
        self.termination.millis_spent_limit = Some(limit.as_millis() as u64);
        self
    }

    /// Sets the deadline in whole seconds.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.millis_spent_limit = None;
        self.termination.seconds_spent_limit = Some(seconds);
        self
    }

    /// Stops each search worker after `steps` local search steps.
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.termination.step_count_limit = Some(steps);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_search_workers(mut self, count: usize) -> Self {
        self.search_workers = SearchWorkerCount::Count(count);
        self
    }

    pub fn with_acceptor(mut self, acceptor: AcceptorConfig) -> Self {
        self.local_search.acceptor = acceptor;
        self
    }

    pub fn with_worker_priority(mut self, priority: WorkerPriorityType) -> Self {
        self.construction.worker_priority = priority;
        self
    }

    pub fn with_memory_limit(mut self, bytes: u64) -> Self {
        self.memory_limit_bytes = Some(bytes);
        self
    }

    /// Effective deadline: 60 s by default, never more than 600 s.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftwise_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// assert_eq!(SolverConfig::new().time_limit(), Duration::from_secs(60));
    /// assert_eq!(
    ///     SolverConfig::new().with_termination_seconds(3600).time_limit(),
    ///     Duration::from_secs(600)
    /// );
    /// ```
    pub fn time_limit(&self) -> Duration {
        self.termination
            .time_limit()
            .unwrap_or(DEFAULT_TIME_LIMIT)
            .min(MAX_TIME_LIMIT)
    }

    /// Resolved number of search workers.
    pub fn search_worker_count(&self) -> usize {
        match self.search_workers {
            SearchWorkerCount::Auto => std::thread::available_parallelism()
                .map(|n| n.get().min(MAX_AUTO_WORKERS))
                .unwrap_or(1),
            SearchWorkerCount::Count(n) => n.max(1),
        }
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Workers stop as soon as any of them reaches the objective lower bound.
    #[default]
    NonReproducible,

    /// Workers never stop each other; equal seeds and step limits give equal schedules.
    Reproducible,
}

/// Search worker count configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchWorkerCount {
    /// One per available core, up to eight.
    Auto,

    /// Specific number of workers.
    Count(usize),
}

impl Default for SearchWorkerCount {
    fn default() -> Self {
        SearchWorkerCount::Count(4)
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving; added to the seconds limit.
    pub millis_spent_limit: Option<u64>,

    /// Maximum local search steps per search worker.
    pub step_count_limit: Option<u64>,

    /// Maximum steps without a new best before a worker stops.
    pub unimproved_step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the configured time limit, if any. Zero is a valid limit.
    pub fn time_limit(&self) -> Option<Duration> {
        if self.seconds_spent_limit.is_none() && self.millis_spent_limit.is_none() {
            return None;
        }
        Some(
            Duration::from_secs(self.seconds_spent_limit.unwrap_or(0))
                + Duration::from_millis(self.millis_spent_limit.unwrap_or(0)),
        )
    }
}

/// Construction heuristic configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionConfig {
    #[serde(default)]
    pub worker_priority: WorkerPriorityType,
}

/// Which worker the greedy construction tries first for an open seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerPriorityType {
    /// Hardest-to-place workers first.
    #[default]
    DifficultyFirst,

    /// Lowest hourly rate first.
    CheapestFirst,

    /// Fewest hours already assigned first.
    LeastLoaded,
}

/// Local search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    #[serde(default)]
    pub acceptor: AcceptorConfig,

    /// Moves sampled per step; the best accepted one is applied.
    #[serde(default = "default_moves_per_step")]
    pub moves_per_step: usize,
}

fn default_moves_per_step() -> usize {
    16
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            acceptor: AcceptorConfig::default(),
            moves_per_step: default_moves_per_step(),
        }
    }
}

/// Acceptor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Only accept improving moves.
    HillClimbing,

    /// Late acceptance acceptor.
    LateAcceptance(LateAcceptanceConfig),

    /// Simulated annealing acceptor.
    SimulatedAnnealing(SimulatedAnnealingConfig),
}

impl Default for AcceptorConfig {
    fn default() -> Self {
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig::default())
    }
}

/// Late acceptance configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Size of late acceptance list. Defaults to 400.
    pub late_acceptance_size: Option<usize>,
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Starting temperature in objective units. Defaults to 100.
    pub starting_temperature: Option<f64>,

    /// Multiplicative cooling per step. Defaults to 0.999.
    pub decay_rate: Option<f64>,
}

/// Weights of the soft objective terms.
///
/// These are tunable defaults, not a contract; only their relative size matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ObjectiveWeights {
    /// Per cent of labor cost.
    pub cost: i64,
    /// Per cent spent above the soft target.
    pub target_overrun: i64,
    /// Per unit of summed squared worker hours (minutes² / 3600).
    pub hours_balance: i64,
    /// Per shift of count spread beyond the allowed imbalance.
    pub shift_imbalance: i64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            cost: 1,
            target_overrun: 10,
            hours_balance: 1,
            shift_imbalance: 500,
        }
    }
}

/// Weights of the worker difficulty score.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DifficultyWeights {
    /// Scales the inverse of the worker's skill count.
    pub skill_weight: f64,
    /// Scales the inverse of the worker's availability window count.
    pub availability_weight: f64,
    /// Hourly rate in dollars is divided by this.
    pub rate_divisor: f64,
}

impl Default for DifficultyWeights {
    fn default() -> Self {
        Self {
            skill_weight: 10.0,
            availability_weight: 20.0,
            rate_divisor: 5.0,
        }
    }
}

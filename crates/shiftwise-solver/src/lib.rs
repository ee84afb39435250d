//! shiftwise solver engine
//!
//! This crate turns a validated [`Problem`](shiftwise_core::Problem) into a schedule:
//! - Difficulty ranking and the greedy construction heuristic
//! - The constraint model builder with its shift conflict cache
//! - Incremental schedule state, moves, acceptors and terminations
//! - The multi-worker search orchestrator
//! - Infeasibility diagnosis and result metrics
//! - The typed pipeline tying the phases together

pub mod construction;
pub mod diagnose;
pub mod localsearch;
pub mod metrics;
pub mod model;
pub mod orchestrator;
pub mod pipeline;
pub mod ranking;
pub mod result;
pub mod scope;
pub mod state;
pub mod stats;
pub mod termination;

pub use construction::{ConstructionHeuristic, Seed};
pub use diagnose::{Diagnostic, InfeasibilityDiagnoser};
pub use localsearch::{
    Acceptor, ConfiguredAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor, LocalSearchPhase,
    MoveSelector, ScheduleMove, SimulatedAnnealingAcceptor,
};
pub use metrics::{
    fairness_score, BudgetReport, CoverageGap, CoverageSummary, GapReason, HoursSummary,
    MetricsReporter, ScheduleMetrics, WorkerLoad,
};
pub use model::{HardConstraint, ModelBuilder, ObjectiveTerm, ScheduleModel, Slot, SlotIdx};
pub use orchestrator::{SearchOutcome, SolverOrchestrator, WorkerResult};
pub use pipeline::{solve_problem, ModelResult, SeedResult, SolveResult, ValidationResult};
pub use ranking::{rank_workers, CheapestFirst, DifficultyFirst, LeastLoaded, WorkerPriority, WorkerRanking};
pub use result::{ScheduleResult, SolveStatus};
pub use scope::SearchScope;
pub use state::{Blocker, ScheduleState};
pub use stats::SearchStats;
pub use termination::{
    BestScoreTermination, DeadlineTermination, ExternalTermination, OrTermination,
    StepCountTermination, Termination, UnimprovedStepCountTermination,
};

//! Colorful console output for solving runs.
//!
//! A `tracing` layer that renders the lifecycle events of the solver crate.
//!
//! ## Log Levels
//!
//! - **INFO**: solve start and end, model and seed summaries, diagnosis,
//!   a seed kept when no search worker ran
//! - **DEBUG**: per-worker start and end
//! - **WARN**: the single-worker fallback

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static SOLVE_START: Mutex<Option<Instant>> = Mutex::new(None);

const DEFAULT_DIRECTIVE: &str = "shiftwise_solver=info";

/// Installs the console subscriber.
///
/// Safe to call multiple times; only the first call has effect. `RUST_LOG`
/// overrides the default `shiftwise_solver=info` filter. Does nothing if
/// another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ScheduleConsoleLayer)
            .try_init();
    });
}

/// Restarts the elapsed-time column for a new run.
fn mark_solve_start(at: Instant) {
    if let Ok(mut start) = SOLVE_START.lock() {
        *start = Some(at);
    }
}

fn elapsed_secs() -> f64 {
    SOLVE_START
        .lock()
        .ok()
        .and_then(|start| *start)
        .map_or(0.0, |start| start.elapsed().as_secs_f64())
}

/// A tracing layer that formats solver events with colors.
pub struct ScheduleConsoleLayer;

impl<S: Subscriber> Layer<S> for ScheduleConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("shiftwise") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    score: Option<String>,
    cause: Option<String>,
    reason: Option<String>,
    priority: Option<String>,
    acceptance_rate: Option<String>,
    workers: Option<u64>,
    worker: Option<u64>,
    shifts: Option<u64>,
    slots: Option<u64>,
    variables: Option<u64>,
    hard_constraints: Option<u64>,
    objective_terms: Option<u64>,
    assigned: Option<u64>,
    assignments: Option<u64>,
    unfilled: Option<u64>,
    diagnostics: Option<u64>,
    steps: Option<u64>,
    moves: Option<u64>,
    moves_per_sec: Option<u64>,
    lower_bound: Option<u64>,
    time_limit_ms: Option<u64>,
    elapsed_ms: Option<u64>,
    fallback: Option<bool>,
}

impl EventVisitor {
    fn record_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "status" => self.status = Some(value),
            "score" => self.score = Some(value),
            "cause" => self.cause = Some(value),
            "reason" => self.reason = Some(value),
            "priority" => self.priority = Some(value),
            "acceptance_rate" => self.acceptance_rate = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_text(field, s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "workers" => self.workers = Some(value),
            "worker" | "best_worker" => self.worker = Some(value),
            "shifts" => self.shifts = Some(value),
            "slots" => self.slots = Some(value),
            "variables" => self.variables = Some(value),
            "hard_constraints" => self.hard_constraints = Some(value),
            "objective_terms" => self.objective_terms = Some(value),
            "assigned" => self.assigned = Some(value),
            "assignments" => self.assignments = Some(value),
            "unfilled" => self.unfilled = Some(value),
            "diagnostics" => self.diagnostics = Some(value),
            "steps" => self.steps = Some(value),
            "moves" => self.moves = Some(value),
            "moves_per_sec" => self.moves_per_sec = Some(value),
            "lower_bound" => self.lower_bound = Some(value),
            "time_limit_ms" => self.time_limit_ms = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "fallback" {
            self.fallback = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field, value.to_string());
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "model_built" => format_model_built(v),
        "construction_end" => format_construction_end(v),
        "construction_kept" => format_construction_kept(v),
        "worker_end" => format_worker_end(v),
        "fallback_single_worker" => format_fallback(v),
        "search_end" => format_search_end(v),
        "diagnosis" => format_diagnosis(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs()).bright_black().to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start(Instant::now());
    format!(
        "{} {} Scheduling │ {} workers │ {} shifts │ {} limit",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.workers).bright_yellow(),
        count(v.shifts).bright_yellow(),
        format_duration_ms(v.time_limit_ms.unwrap_or(0)).bright_yellow(),
    )
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} {} Model │ {} slots │ {} variables │ {} hard │ {} objective terms │ bound {}",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.slots).white(),
        count(v.variables).white(),
        count(v.hard_constraints).white(),
        count(v.objective_terms).white(),
        count(v.lower_bound).bright_magenta(),
    )
}

fn format_construction_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Seed ({}) │ {} assigned │ {} open │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        v.priority.as_deref().unwrap_or("greedy").white().bold(),
        count(v.assigned).white(),
        count(v.unfilled).yellow(),
        format_score(v.score.as_deref().unwrap_or("N/A")),
    )
}

fn format_construction_kept(v: &EventVisitor) -> String {
    format!(
        "{} {} No search time left, keeping the seed │ {} assignments │ {}",
        format_elapsed(),
        "◀".bright_yellow(),
        count(v.assignments).white(),
        format_score(v.score.as_deref().unwrap_or("N/A")),
    )
}

fn format_worker_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Worker {} │ {} steps │ {} moves │ {} moves/s",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(v.worker),
        count(v.steps).white(),
        count(v.moves).white(),
        count(v.moves_per_sec).bright_magenta().bold(),
    );
    if let Some(ref rate) = v.acceptance_rate {
        output.push_str(&format!(" │ {} accepted", rate.bright_yellow()));
    }
    output.push_str(&format!(
        " │ {}",
        format_score(v.score.as_deref().unwrap_or("N/A"))
    ));
    output
}

fn format_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} Retrying with one search worker │ {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        v.reason.as_deref().unwrap_or("resources exhausted").yellow(),
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let Some(score) = v.score.as_deref() else {
        return format!(
            "{} {} Search ended without a schedule",
            format_elapsed(),
            "■".bright_red().bold(),
        );
    };
    let mut output = format!(
        "{} {} Search │ {} workers │ best from worker {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.workers),
        count(v.worker),
        format_score(score),
    );
    if v.fallback == Some(true) {
        output.push_str(&format!(" │ {}", "single-worker retry".yellow()));
    }
    output
}

fn format_diagnosis(v: &EventVisitor) -> String {
    format!(
        "{} {} {}",
        format_elapsed(),
        "✗".bright_red(),
        v.cause.as_deref().unwrap_or("no cause found").bright_red(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("UNKNOWN");
    let colored = match status {
        "OPTIMAL" | "FEASIBLE" => status.bright_green().bold().to_string(),
        _ => status.bright_red().bold().to_string(),
    };

    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;

    let mut output = format!(
        "{} {} Scheduling complete │ {}\n\n",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow(),
    );
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&format!(
        "{}{}{}{}{}\n",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    for (label, value) in [
        ("Assignments:", count(v.assignments)),
        ("Diagnostics:", count(v.diagnostics)),
    ] {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}\n",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
    }
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

/// Colors each level of a `"0hard/-1medium/-9000soft"` score.
fn format_score(score: &str) -> String {
    let parts: Vec<&str> = score.split('/').collect();
    if parts.len() != 3 {
        return score.white().to_string();
    }
    let level = |part: &str, suffix: &str, bad: fn(&str) -> String| {
        let value: i64 = part.trim_end_matches(suffix).parse().unwrap_or(0);
        if value < 0 {
            bad(part)
        } else {
            part.bright_green().to_string()
        }
    };
    format!(
        "{}/{}/{}",
        level(parts[0], "hard", |p| p.bright_red().to_string()),
        level(parts[1], "medium", |p| p.bright_yellow().to_string()),
        level(parts[2], "soft", |p| p.yellow().to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_format_score_keeps_text() {
        let out = format_score("0hard/-1medium/-9036soft");
        assert!(out.contains("0hard"));
        assert!(out.contains("-1medium"));
        assert!(out.contains("-9036soft"));
        assert_eq!(format_score("N/A"), "N/A".white().to_string());
    }

    #[test]
    fn test_unknown_events_render_nothing() {
        let v = EventVisitor {
            event: Some("slot_encoded".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(&v).is_empty());
    }

    #[test]
    fn test_solve_start_restarts_the_clock() {
        mark_solve_start(Instant::now() - Duration::from_secs(30));
        let v = EventVisitor {
            event: Some("solve_start".into()),
            ..EventVisitor::default()
        };
        assert!(!format_event(&v).is_empty());
        assert!(elapsed_secs() < 30.0);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}

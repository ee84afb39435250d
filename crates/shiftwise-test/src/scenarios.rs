//! Hand-built problems with known outcomes.

use shiftwise_core::{
    BudgetParameters, ConstraintParameters, FairnessParameters, Money, Problem, Shift, Worker,
};

use crate::builders::{shift, window, worker};

/// Raw input for one solving run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub workers: Vec<Worker>,
    pub shifts: Vec<Shift>,
    pub params: ConstraintParameters,
}

impl Scenario {
    pub fn new(workers: Vec<Worker>, shifts: Vec<Shift>) -> Self {
        Self {
            workers,
            shifts,
            params: ConstraintParameters::default(),
        }
    }

    pub fn with_params(mut self, params: ConstraintParameters) -> Self {
        self.params = params;
        self
    }

    /// The validated problem. Panics when the scenario is malformed.
    pub fn problem(&self) -> Problem {
        Problem::new(&self.workers, &self.shifts, &self.params)
            .unwrap_or_else(|e| panic!("scenario failed validation: {e}"))
    }
}

/// One $15/h server, one six-hour lunch shift. Cost is $90.
pub fn single_server() -> Scenario {
    Scenario::new(
        vec![worker("alice", 15.0, 40.0, &["Server"], &[0])],
        vec![shift("mon-lunch", 0, "11:00", "17:00", "Server", 1)],
    )
}

/// One server, two overlapping shifts on the same day.
pub fn overlapping_pair() -> Scenario {
    Scenario::new(
        vec![worker("ben", 15.0, 40.0, &["Server"], &[0])],
        vec![
            shift("mon-lunch", 0, "11:00", "17:00", "Server", 1),
            shift("mon-mid", 0, "14:00", "20:00", "Server", 1),
        ],
    )
}

/// Full cover costs at least $320 against a $200 weekly cap.
pub fn budget_shortfall() -> Scenario {
    Scenario::new(
        vec![
            worker("cara", 20.0, 40.0, &["Cook"], &[0, 1]),
            worker("cody", 25.0, 40.0, &["Cook"], &[0, 1]),
        ],
        vec![
            shift("mon-kitchen", 0, "09:00", "17:00", "Cook", 1),
            shift("tue-kitchen", 1, "09:00", "17:00", "Cook", 1),
        ],
    )
    .with_params(ConstraintParameters::default().with_budget(
        BudgetParameters::default().with_weekly_cap(Money::from_dollars(200.0)),
    ))
}

/// Sixteen required hours against a ten-hour roster.
pub fn hours_shortfall() -> Scenario {
    Scenario::new(
        vec![worker("dana", 18.0, 10.0, &["Server"], &[0, 1])],
        vec![
            shift("mon-day", 0, "09:00", "17:00", "Server", 1),
            shift("tue-day", 1, "09:00", "17:00", "Server", 1),
        ],
    )
}

/// One worker eligible for five consecutive daily shifts, at most three in a row.
pub fn consecutive_days() -> Scenario {
    let shifts = (0..5)
        .map(|day| shift(&format!("day-{day}"), day, "10:00", "16:00", "Server", 1))
        .collect();
    Scenario::new(
        vec![worker("erin", 16.0, 40.0, &["Server"], &[0, 1, 2, 3, 4])],
        shifts,
    )
    .with_params(ConstraintParameters::default().with_fairness(
        FairnessParameters::default().with_max_consecutive_days(3),
    ))
}

/// A 23:00-02:00 close followed by a 07:00 open with ten hours of rest required.
pub fn clopening() -> Scenario {
    let closer = Worker::new("finn", Money::from_dollars(17.0), 40.0)
        .with_skill("Server")
        .available(window(0, "18:00", "04:00"))
        .available(window(1, "06:00", "14:00"));
    Scenario::new(
        vec![closer],
        vec![
            shift("mon-close", 0, "23:00", "02:00", "Server", 1).with_closing_duties(true),
            shift("tue-open", 1, "07:00", "12:00", "Server", 1).with_opening_duties(true),
        ],
    )
    .with_params(ConstraintParameters::default().with_fairness(
        FairnessParameters::default().with_min_rest_hours(10.0),
    ))
}

/// A small but realistic week: three roles, seven workers, two shifts a day.
pub fn small_restaurant() -> Scenario {
    let workers = vec![
        worker("ana", 15.0, 32.0, &["Server"], &[0, 1, 2, 3, 4]),
        worker("ben", 16.0, 32.0, &["Server", "Host"], &[0, 1, 2, 3, 4]),
        worker("cam", 14.0, 24.0, &["Server"], &[2, 3, 4]),
        worker("dee", 22.0, 40.0, &["Cook"], &[0, 1, 2, 3, 4]),
        worker("eli", 20.0, 32.0, &["Cook"], &[0, 1, 2, 3, 4]),
        worker("fay", 13.0, 20.0, &["Host"], &[0, 1, 2, 3, 4]),
        worker("gus", 18.0, 40.0, &["Server", "Cook"], &[0, 1, 3, 4]),
    ];
    let mut shifts = Vec::new();
    for day in 0..5 {
        shifts.push(
            Shift::parse(format!("d{day}-lunch"), day, "11:00", "16:00")
                .unwrap_or_else(|e| panic!("{e}"))
                .require("Server", 1)
                .require("Cook", 1),
        );
        shifts.push(
            Shift::parse(format!("d{day}-dinner"), day, "17:00", "23:00")
                .unwrap_or_else(|e| panic!("{e}"))
                .require("Server", 2)
                .require("Cook", 1)
                .require("Host", 1),
        );
    }
    Scenario::new(workers, shifts).with_params(ConstraintParameters::new(
        BudgetParameters::default().with_target(Money::from_dollars(1_400.0)),
        FairnessParameters::recommended(),
    ))
}

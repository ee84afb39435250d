use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shiftwise_test::{scenarios, RandomProblem};

use super::*;
use crate::model::ModelBuilder;
use crate::scope::SearchScope;
use crate::state::ScheduleState;
use crate::termination::{OrTermination, StepCountTermination, UnimprovedStepCountTermination};

#[test]
fn test_change_move_roundtrip() {
    let problem = scenarios::budget_shortfall().problem();
    let model = ModelBuilder::new(&problem).build();
    let mut state = ScheduleState::from_assignments(&model, &[(0, 1)]);
    let before = state.score();

    let mv = ScheduleMove::Change {
        slot: 0,
        from: 1,
        to: 0,
    };
    assert!(mv.try_apply(&mut state));
    assert_eq!(state.assignments(), vec![(0, 0)]);
    assert!(state.score() > before);
    mv.undo(&mut state);
    assert_eq!(state.assignments(), vec![(0, 1)]);
    assert_eq!(state.score(), before);
}

#[test]
fn test_failed_move_leaves_state() {
    let problem = scenarios::overlapping_pair().problem();
    let model = ModelBuilder::new(&problem).build();
    let mut state = ScheduleState::from_assignments(&model, &[(0, 0)]);
    let before = state.assignments();

    assert!(!ScheduleMove::Assign { slot: 1, worker: 0 }.try_apply(&mut state));
    assert!(!ScheduleMove::Unassign { slot: 1, worker: 0 }.try_apply(&mut state));
    assert!(!ScheduleMove::Change {
        slot: 1,
        from: 0,
        to: 0
    }
    .try_apply(&mut state));
    assert_eq!(state.assignments(), before);
}

#[test]
fn test_swap_move() {
    let scenario = shiftwise_test::Scenario::new(
        vec![
            shiftwise_test::worker("a", 15.0, 40.0, &["Server", "Cook"], &[0, 1]),
            shiftwise_test::worker("b", 20.0, 40.0, &["Server", "Cook"], &[0, 1]),
        ],
        vec![
            shiftwise_test::shift("mon", 0, "09:00", "13:00", "Server", 1),
            shiftwise_test::shift("tue", 1, "09:00", "17:00", "Cook", 1),
        ],
    );
    let problem = scenario.problem();
    let model = ModelBuilder::new(&problem).build();
    let mut state = ScheduleState::from_assignments(&model, &[(0, 0), (1, 1)]);
    let before = state.score();

    let mv = ScheduleMove::Swap {
        a: 0,
        worker_a: 0,
        b: 1,
        worker_b: 1,
    };
    assert!(mv.try_apply(&mut state));
    assert_eq!(state.assignments(), vec![(0, 1), (1, 0)]);
    // The cheaper worker now holds the longer shift.
    assert!(state.score() > before);
    mv.undo(&mut state);
    assert_eq!(state.score(), before);
}

#[test]
fn test_selector_only_proposes_candidates() {
    let scenario = RandomProblem::new(3).generate();
    let problem = scenario.problem();
    let model = ModelBuilder::new(&problem).build();
    let state = ScheduleState::new(&model);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..200 {
        if let Some(ScheduleMove::Assign { slot, worker }) = MoveSelector.sample(&state, &mut rng) {
            assert!(model.slot(slot).is_candidate(worker));
        }
    }
}

#[test]
fn test_phase_improves_and_stays_feasible() {
    for seed in 0..5 {
        let scenario = RandomProblem::new(seed).workers(10).generate();
        let problem = scenario.problem();
        let model = ModelBuilder::new(&problem).build();
        let mut state = ScheduleState::new(&model);
        let initial = state.score();
        let mut scope = SearchScope::new(0, seed, &state);

        let mut phase = LocalSearchPhase::new(LateAcceptanceAcceptor::new(50), 16);
        let termination = OrTermination((
            StepCountTermination::new(2_000),
            UnimprovedStepCountTermination::new(500),
        ));
        phase.solve(&mut state, &mut scope, &termination);

        let (best, assignments, stats) = scope.finish();
        assert!(best >= initial);
        assert!(stats.step_count > 0);
        assert_eq!(model.count_violations(&assignments), 0);
        assert_eq!(model.count_violations(&state.assignments()), 0);
    }
}

#[test]
fn test_phase_reaches_single_server_optimum() {
    let problem = scenarios::single_server().problem();
    let model = ModelBuilder::new(&problem).build();
    let mut state = ScheduleState::new(&model);
    let mut scope = SearchScope::new(0, 9, &state);
    let mut phase = LocalSearchPhase::new(HillClimbingAcceptor, 8);
    phase.solve(&mut state, &mut scope, &StepCountTermination::new(50));
    assert_eq!(scope.best_score().unfilled(), 0);
    assert_eq!(scope.best_score().objective(), model.lower_bound());
}

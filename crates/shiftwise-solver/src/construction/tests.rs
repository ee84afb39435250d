use shiftwise_config::DifficultyWeights;
use shiftwise_test::{scenarios, shift, worker, RandomProblem, Scenario};

use super::*;
use crate::model::ModelBuilder;
use crate::ranking::{rank_workers, CheapestFirst, DifficultyFirst, LeastLoaded};

#[test]
fn test_single_server_seed() {
    let problem = scenarios::single_server().problem();
    let model = ModelBuilder::new(&problem).build();
    let seed = ConstructionHeuristic::new(&model, CheapestFirst).run();
    assert_eq!(seed.assignments, vec![(0, 0)]);
    assert_eq!(seed.unfilled, 0);
    assert_eq!(seed.score.objective(), model.lower_bound());
}

#[test]
fn test_overlapping_pair_fills_one() {
    let problem = scenarios::overlapping_pair().problem();
    let model = ModelBuilder::new(&problem).build();
    let seed = ConstructionHeuristic::new(&model, LeastLoaded).run();
    assert_eq!(seed.assignments.len(), 1);
    assert_eq!(seed.unfilled, 1);
}

#[test]
fn test_scarce_shift_first() {
    let scenario = Scenario::new(
        vec![
            worker("a", 15.0, 40.0, &["Server"], &[0]),
            worker("b", 15.0, 40.0, &["Server", "Cook"], &[0]),
        ],
        vec![
            shift("early", 0, "08:00", "12:00", "Server", 1),
            shift("late", 0, "10:00", "14:00", "Cook", 1),
        ],
    );
    let problem = scenario.problem();
    let model = ModelBuilder::new(&problem).build();
    let heuristic = ConstructionHeuristic::new(&model, CheapestFirst);
    assert_eq!(heuristic.shift_order(), vec![1, 0]);

    // The cook shift takes b, leaving the server shift to a.
    let seed = heuristic.run();
    assert_eq!(seed.assignments, vec![(0, 0), (1, 1)]);
    assert_eq!(seed.unfilled, 0);
}

#[test]
fn test_ties_prefer_lower_cost() {
    let scenario = Scenario::new(
        vec![
            worker("pricey", 20.0, 40.0, &["Server"], &[0]),
            worker("cheap", 14.0, 40.0, &["Server"], &[0]),
        ],
        vec![shift("mon", 0, "11:00", "17:00", "Server", 1)],
    );
    let problem = scenario.problem();
    let model = ModelBuilder::new(&problem).build();
    let seed = ConstructionHeuristic::new(&model, LeastLoaded).run();
    assert_eq!(seed.assignments, vec![(0, 1)]);
}

#[test]
fn test_deterministic_and_feasible() {
    for seed in 0..8 {
        let scenario = RandomProblem::new(seed).workers(10).generate();
        let problem = scenario.problem();
        let model = ModelBuilder::new(&problem).build();
        let ranking = rank_workers(&problem, &DifficultyWeights::default());

        let first = ConstructionHeuristic::new(&model, DifficultyFirst::new(ranking.clone())).run();
        let second = ConstructionHeuristic::new(&model, DifficultyFirst::new(ranking)).run();
        assert_eq!(first, second);
        assert_eq!(model.count_violations(&first.assignments), 0);
        assert_eq!(
            first.unfilled + first.assignments.len() as u64,
            model.total_seats()
        );
    }
}

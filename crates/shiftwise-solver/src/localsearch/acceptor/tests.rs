use shiftwise_config::{AcceptorConfig, LateAcceptanceConfig, SimulatedAnnealingConfig};
use shiftwise_core::ScheduleScore;

use super::*;

fn soft(value: i64) -> ScheduleScore {
    ScheduleScore::of(0, 0, value)
}

#[test]
fn test_hill_climbing() {
    let mut acceptor = HillClimbingAcceptor;
    assert!(acceptor.is_accepted(&soft(-10), &soft(-5)));
    assert!(acceptor.is_accepted(&soft(-10), &soft(-10)));
    assert!(!acceptor.is_accepted(&soft(-10), &soft(-11)));
}

#[test]
fn test_late_acceptance_uses_history() {
    let mut acceptor = LateAcceptanceAcceptor::new(2);
    acceptor.phase_started(&soft(-100));
    // Worse than last step but not worse than the late score.
    assert!(acceptor.is_accepted(&soft(-50), &soft(-80)));
    assert!(!acceptor.is_accepted(&soft(-50), &soft(-120)));

    acceptor.step_ended(&soft(-50));
    acceptor.step_ended(&soft(-40));
    // History is now [-50, -40], index back at 0.
    assert!(!acceptor.is_accepted(&soft(-40), &soft(-60)));
    assert!(acceptor.is_accepted(&soft(-40), &soft(-45)));
}

#[test]
fn test_simulated_annealing_never_opens_seats() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(1e12, 1.0, 7);
    acceptor.phase_started(&soft(0));
    let last = ScheduleScore::of(0, 0, -1_000);
    let gap = ScheduleScore::of(0, -1, 0);
    for _ in 0..100 {
        assert!(!acceptor.is_accepted(&last, &gap));
    }
}

#[test]
fn test_simulated_annealing_cools() {
    let mut acceptor = SimulatedAnnealingAcceptor::new(100.0, 0.5, 7);
    acceptor.phase_started(&soft(0));
    acceptor.step_ended(&soft(0));
    acceptor.step_ended(&soft(0));
    assert_eq!(acceptor.temperature(), 25.0);

    // A huge worsening at near-zero temperature is rejected.
    for _ in 0..20 {
        acceptor.step_ended(&soft(0));
    }
    for _ in 0..100 {
        assert!(!acceptor.is_accepted(&soft(0), &soft(-1_000_000)));
    }
    acceptor.phase_started(&soft(0));
    assert_eq!(acceptor.temperature(), 100.0);
}

#[test]
fn test_configured_acceptor() {
    let la = ConfiguredAcceptor::from_config(&AcceptorConfig::default(), 0);
    match la {
        ConfiguredAcceptor::LateAcceptance(a) => assert_eq!(a.late_acceptance_size(), 400),
        other => panic!("unexpected {other:?}"),
    }

    let config = AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
        late_acceptance_size: Some(5),
    });
    match ConfiguredAcceptor::from_config(&config, 0) {
        ConfiguredAcceptor::LateAcceptance(a) => assert_eq!(a.late_acceptance_size(), 5),
        other => panic!("unexpected {other:?}"),
    }

    let config = AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default());
    let mut sa = ConfiguredAcceptor::from_config(&config, 0);
    sa.phase_started(&soft(0));
    assert!(sa.is_accepted(&soft(-10), &soft(0)));

    let mut hc = ConfiguredAcceptor::from_config(&AcceptorConfig::HillClimbing, 0);
    assert!(!hc.is_accepted(&soft(0), &soft(-1)));
}

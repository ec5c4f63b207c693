//! Determinism verification tests
//!
//! The engine makes no reproducibility promise, but a seeded generator must
//! replay the same colony history.

use hive_core::{HiveConfig, HiveSimulation};
use hive_events::HiveStatistics;

fn run(seed: u64, cycles: u64) -> (Vec<HiveStatistics>, usize) {
    let mut config = HiveConfig::default();
    config.simulation.cycle_delay_ms = 0;

    let mut sim = HiveSimulation::seeded(config, seed);
    let mut history = Vec::new();
    let mut events = 0;
    sim.run_with(cycles, |sim, _| {
        history.push(sim.get_statistics());
        events += sim.drain_events().len();
    });
    (history, events)
}

#[test]
fn test_same_seed_same_history() {
    let (first, first_events) = run(42, 30);
    let (second, second_events) = run(42, 30);

    assert_eq!(first, second, "Statistics should be identical with same seed");
    assert_eq!(first_events, second_events);
}

#[test]
fn test_different_seeds_diverge() {
    let (first, _) = run(42, 30);
    let (second, _) = run(43, 30);

    assert_ne!(first, second, "Different seeds should produce different histories");
}

#[test]
fn test_founding_colony_is_seeded() {
    let a = HiveSimulation::seeded(HiveConfig::default(), 5);
    let b = HiveSimulation::seeded(HiveConfig::default(), 5);

    let ages_a: Vec<u32> = a.organisms().map(|o| o.age).collect();
    let ages_b: Vec<u32> = b.organisms().map(|o| o.age).collect();
    assert_eq!(ages_a, ages_b);
}

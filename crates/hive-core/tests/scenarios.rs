//! Colony scenarios
//!
//! End-to-end cycles through the public engine API.

use hive_core::config::InitialPopulation;
use hive_core::{CycleOutcome, FixedRng, HiveConfig, HiveSimulation, RandomSource};
use hive_events::{BirthOrigin, CasteType, CollapseReason, HiveEventKind, ThreatLevel};

fn quiet_config() -> HiveConfig {
    let mut config = HiveConfig::default();
    config.simulation.cycle_delay_ms = 0;
    config
}

/// Population counts must match the living organisms after every cycle.
fn assert_ledger_consistent<R: RandomSource>(sim: &HiveSimulation<R>) {
    for caste in CasteType::ALL {
        let living = sim
            .organisms()
            .filter(|o| o.active && o.caste == caste)
            .count() as u32;
        assert_eq!(
            sim.hive().population().get(caste),
            living,
            "{} count drifted at cycle {}",
            caste,
            sim.cycle_count()
        );
    }

    let stats = sim.get_statistics();
    assert_eq!(stats.caste_sum(), stats.total_population);
    assert!(stats.current_structure <= 100);
    assert!(sim.organisms().all(|o| o.age < o.max_lifespan));
}

#[test]
fn test_fresh_hive_one_cycle_at_midpoints() {
    let mut sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());

    assert!(sim.simulate_cycle());

    let stats = sim.get_statistics();
    assert_eq!(stats.total_cycles, 1);
    assert_eq!(stats.total_population, 23);
    assert_eq!(stats.total_births, 0);
    assert_eq!(stats.total_deaths, 0);
    // 100 + 50 gathered + 15 recycled - 11 eaten
    assert_eq!(stats.current_food, 154);
    assert_eq!(stats.current_waste, 0);
    // architects repair to the cap, decay removes the midpoint 2
    assert_eq!(stats.current_structure, 98);
    assert_eq!(stats.current_threat, "NONE");
    assert_ledger_consistent(&sim);
}

#[test]
fn test_zero_structure_collapses_on_third_cycle() {
    let mut sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());

    let mut results = Vec::new();
    for _ in 0..3 {
        sim.hive_mut().set_structure(0);
        results.push(sim.simulate_cycle());
    }

    assert_eq!(results, vec![true, true, false]);
    assert_eq!(sim.collapse(), Some(CollapseReason::StructuralFailure));
    assert_eq!(sim.cycle_count(), 2);
}

#[test]
fn test_queenless_hive_gets_emergency_queen() {
    let mut sim = HiveSimulation::with_rng(quiet_config(), FixedRng::midpoint());
    assert_eq!(sim.remove_caste(CasteType::Queen), 1);

    assert!(sim.simulate_cycle());
    assert_eq!(sim.hive().population().get(CasteType::Queen), 1);

    let events = sim.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, HiveEventKind::SuccessionTriggered)));
    assert!(events.iter().any(|e| matches!(
        e.kind,
        HiveEventKind::Birth {
            caste: CasteType::Queen,
            origin: BirthOrigin::EmergencyQueen,
            ..
        }
    )));
    assert_ledger_consistent(&sim);
}

#[test]
fn test_queenless_hive_collapses_without_emergency_spawn() {
    let mut config = quiet_config();
    config.succession.emergency_queen = false;
    let mut sim = HiveSimulation::with_rng(config, FixedRng::midpoint());
    sim.remove_caste(CasteType::Queen);

    assert_eq!(sim.step(), CycleOutcome::Collapsed(CollapseReason::Queenless));
}

#[test]
fn test_undefended_hive_dies_when_every_roll_hits() {
    let mut config = quiet_config();
    config.colony.population.breeder = 0;
    config.colony.population.soldier = 0;
    config.colony.threat = ThreatLevel::High;

    let mut sim = HiveSimulation::with_rng(config, FixedRng::new(0.0));
    assert_eq!(
        sim.step(),
        CycleOutcome::Collapsed(CollapseReason::UndefendedExtinction)
    );
    assert_eq!(sim.get_statistics().total_population, 0);
    assert_eq!(sim.hive().total_deaths, 16);
}

#[test]
fn test_undefended_hive_eventually_collapses() {
    let mut config = quiet_config();
    config.colony.population = InitialPopulation {
        queen: 1,
        worker: 6,
        cleaner: 4,
        ..InitialPopulation::empty()
    };
    config.colony.threat = ThreatLevel::High;

    for seed in [1, 7, 42] {
        let mut sim = HiveSimulation::seeded(config.clone(), seed);
        let mut collapsed = false;
        for _ in 0..200 {
            let survived = sim.simulate_cycle();
            if !survived {
                collapsed = true;
                break;
            }
            assert_ledger_consistent(&sim);
        }

        assert!(collapsed, "seed {} survived 200 undefended cycles", seed);
        assert!(sim.hive().total_deaths > 0);
    }
}

#[test]
fn test_ledger_stays_consistent_over_a_long_run() {
    let mut sim = HiveSimulation::seeded(quiet_config(), 2024);
    for _ in 0..100 {
        let survived = sim.simulate_cycle();
        let stats = sim.get_statistics();
        assert!(stats.current_structure <= 100);
        if !survived {
            break;
        }
        assert_ledger_consistent(&sim);
    }
}

#[test]
fn test_breeders_never_add_a_second_queen() {
    let mut sim = HiveSimulation::seeded(quiet_config(), 99);
    for _ in 0..60 {
        if !sim.simulate_cycle() {
            break;
        }
        let bred_queens = sim
            .drain_events()
            .into_iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    HiveEventKind::Birth {
                        caste: CasteType::Queen,
                        origin: BirthOrigin::QueenOrder | BirthOrigin::Natural,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(bred_queens, 0);
        assert!(sim.hive().population().get(CasteType::Queen) >= 1);
    }
}

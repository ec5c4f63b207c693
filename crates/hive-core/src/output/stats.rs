//! Statistics Output
//!
//! Collects per-cycle summaries during a run and produces the final report.

use hive_events::{
    generate_run_id, CollapseReason, CycleSummary, EventCategory, HiveEvent, HiveEventKind,
    HiveStatistics, SimulationReport,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::components::HiveState;
use crate::error::HiveError;

/// Accumulates statistics while a simulation runs
#[derive(Debug, Default)]
pub struct StatsCollector {
    pub history: Vec<CycleSummary>,
    pub peak_population: u32,
    pub total_events: usize,
    pub events_by_category: HashMap<EventCategory, usize>,
    pub collapse: Option<CollapseReason>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the hive after cycle `cycle` completed
    pub fn record_cycle(&mut self, cycle: u64, hive: &HiveState) {
        let population = hive.total_population();
        self.peak_population = self.peak_population.max(population);
        self.history.push(CycleSummary {
            cycle,
            population,
            births: hive.total_births,
            deaths: hive.total_deaths,
            food: hive.food_level,
            waste: hive.waste_level,
            structure: hive.structural_integrity,
            threat: hive.threat_level,
        });
    }

    /// Record events drained from the engine
    pub fn record_events(&mut self, events: &[HiveEvent]) {
        for event in events {
            self.total_events += 1;
            *self.events_by_category.entry(event.category()).or_insert(0) += 1;
            if let HiveEventKind::Collapsed { reason } = event.kind {
                self.collapse = Some(reason);
            }
        }
    }

    /// Number of recorded events in `category`
    pub fn count(&self, category: EventCategory) -> usize {
        self.events_by_category.get(&category).copied().unwrap_or(0)
    }

    /// Generate the final report
    pub fn finish(self, final_statistics: HiveStatistics) -> SimulationReport {
        let peak_population = self.peak_population.max(final_statistics.total_population);
        SimulationReport {
            run_id: generate_run_id(),
            cycles_completed: final_statistics.total_cycles,
            peak_population,
            collapse: self.collapse,
            final_statistics,
            history: self.history,
        }
    }
}

/// Write a report as pretty JSON, creating parent directories as needed
pub fn write_report(report: &SimulationReport, path: impl AsRef<Path>) -> Result<(), HiveError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, report.to_json_pretty()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HiveConfig;
    use crate::rng::FixedRng;
    use crate::simulation::HiveSimulation;

    fn quiet_sim() -> HiveSimulation<FixedRng> {
        let mut config = HiveConfig::default();
        config.simulation.cycle_delay_ms = 0;
        HiveSimulation::with_rng(config, FixedRng::midpoint())
    }

    #[test]
    fn test_stats_collector_new() {
        let collector = StatsCollector::new();
        assert_eq!(collector.total_events, 0);
        assert!(collector.history.is_empty());
        assert_eq!(collector.count(EventCategory::Birth), 0);
    }

    #[test]
    fn test_history_and_peak() {
        let mut sim = quiet_sim();
        let mut collector = StatsCollector::new();
        for _ in 0..3 {
            assert!(sim.simulate_cycle());
            collector.record_cycle(sim.cycle_count(), sim.hive());
            collector.record_events(&sim.drain_events());
        }

        assert_eq!(collector.history.len(), 3);
        assert_eq!(collector.history[0].cycle, 1);
        assert_eq!(collector.peak_population, 23);

        let report = collector.finish(sim.get_statistics());
        assert!(report.survived());
        assert_eq!(report.cycles_completed, 3);
        assert!(report.run_id.starts_with("run_"));
    }

    #[test]
    fn test_collapse_recorded_from_events() {
        let mut collector = StatsCollector::new();
        collector.record_events(&[
            HiveEvent::new(2, HiveEventKind::SuccessionTriggered),
            HiveEvent::new(
                2,
                HiveEventKind::Collapsed {
                    reason: CollapseReason::Queenless,
                },
            ),
        ]);
        assert_eq!(collector.total_events, 2);
        assert_eq!(collector.count(EventCategory::Succession), 1);
        assert_eq!(collector.collapse, Some(CollapseReason::Queenless));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("stats.json");
        let report = StatsCollector::new().finish(quiet_sim().get_statistics());

        write_report(&report, &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"peak_population\": 23"));
    }
}

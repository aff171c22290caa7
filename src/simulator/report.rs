//! Simulation report generation.

use super::runner::rarity_slot;
use crate::catalog::{FishRarity, FishingRod};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters from one simulated session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub casts: u64,
    pub catches: u64,
    pub xp_gained: u64,
    pub currency_gained: u64,
    pub level_ups: u64,
    pub starting_level: u32,
    pub final_level: u32,
    pub unique_species: usize,
    /// Catches per rarity, indexed like `FishRarity::ALL`
    pub rarity_counts: [u64; 6],
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub casts_per_run: u32,
    pub rod_id: String,
    pub rod_name: String,
    pub starting_level: u32,

    pub total_casts: u64,
    pub total_catches: u64,
    pub catch_rate: f64,
    pub expected_catch_rate: f64,
    pub rarity_counts: [u64; 6],

    pub avg_xp_gained: f64,
    pub avg_currency_gained: f64,
    pub avg_final_level: f64,
    pub avg_unique_species: f64,
    pub level_distribution: BTreeMap<u32, u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(
        runs: Vec<RunStats>,
        rod: &FishingRod,
        casts_per_run: u32,
        expected_catch_rate: f64,
    ) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;

        let total_casts: u64 = runs.iter().map(|r| r.casts).sum();
        let total_catches: u64 = runs.iter().map(|r| r.catches).sum();
        let catch_rate = if total_casts > 0 {
            total_catches as f64 / total_casts as f64
        } else {
            0.0
        };

        let mut rarity_counts = [0u64; 6];
        for run in &runs {
            for (total, count) in rarity_counts.iter_mut().zip(run.rarity_counts) {
                *total += count;
            }
        }

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        Self {
            num_runs,
            casts_per_run,
            rod_id: rod.id.clone(),
            rod_name: rod.name.clone(),
            starting_level: runs.first().map(|r| r.starting_level).unwrap_or(1),
            total_casts,
            total_catches,
            catch_rate,
            expected_catch_rate,
            rarity_counts,
            avg_xp_gained: runs.iter().map(|r| r.xp_gained as f64).sum::<f64>() / divisor,
            avg_currency_gained: runs.iter().map(|r| r.currency_gained as f64).sum::<f64>()
                / divisor,
            avg_final_level: runs.iter().map(|r| r.final_level as f64).sum::<f64>() / divisor,
            avg_unique_species: runs.iter().map(|r| r.unique_species as f64).sum::<f64>()
                / divisor,
            level_distribution,
            run_stats: runs,
        }
    }

    /// Share of all catches that were `rarity`.
    pub fn rarity_share(&self, rarity: FishRarity) -> f64 {
        if self.total_catches == 0 {
            return 0.0;
        }
        self.rarity_counts[rarity_slot(rarity)] as f64 / self.total_catches as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} x {} casts with {} ({}), starting at level {}\n\n",
            self.num_runs, self.casts_per_run, self.rod_name, self.rod_id, self.starting_level
        ));

        report.push_str("── CATCHES ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Catch Rate:          {:.1}% (expected {:.1}%)\n",
            self.catch_rate * 100.0,
            self.expected_catch_rate * 100.0
        ));
        report.push_str(&format!(
            "  Total:               {} of {} casts\n\n",
            self.total_catches, self.total_casts
        ));

        report.push_str("── RARITY ───────────────────────────────────────────────────────\n");
        for rarity in FishRarity::ALL {
            let pct = self.rarity_share(rarity) * 100.0;
            let bar_len = (pct / 2.0) as usize;
            let bar: String = "█".repeat(bar_len);
            report.push_str(&format!(
                "  {:<10} {:>8} {:>6.2}% {}\n",
                rarity.label(),
                self.rarity_counts[rarity_slot(rarity)],
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── PROGRESSION (per run) ────────────────────────────────────────\n");
        report.push_str(&format!("  Avg XP Gained:       {:.0}\n", self.avg_xp_gained));
        report.push_str(&format!(
            "  Avg HOOK Gained:     {:.0}\n",
            self.avg_currency_gained
        ));
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!(
            "  Avg Unique Species:  {:.1}\n\n",
            self.avg_unique_species
        ));

        report.push_str("── FINAL LEVELS ─────────────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            report.push_str(&format!("  Level {:3}: {:>5.1}%\n", level, pct));
        }

        if (self.catch_rate - self.expected_catch_rate).abs() > 0.05 && self.total_casts >= 1_000 {
            report.push_str("\n  ⚠️  Observed catch rate is far from the configured rate\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn run(catches: u64, final_level: u32, rare: u64) -> RunStats {
        let mut rarity_counts = [0; 6];
        rarity_counts[0] = catches - rare;
        rarity_counts[2] = rare;
        RunStats {
            casts: 100,
            catches,
            xp_gained: catches * 20,
            currency_gained: catches * 4,
            level_ups: 2,
            starting_level: 1,
            final_level,
            unique_species: 5,
            rarity_counts,
        }
    }

    #[test]
    fn test_report_generation() {
        let catalog = Catalog::standard();
        let report = SimReport::from_runs(
            vec![run(70, 4, 10), run(60, 3, 0)],
            catalog.starter_rod(),
            100,
            0.7,
        );
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.total_casts, 200);
        assert_eq!(report.total_catches, 130);
        assert!((report.catch_rate - 0.65).abs() < 1e-9);
        assert!((report.avg_final_level - 3.5).abs() < 1e-9);
        assert!((report.rarity_share(FishRarity::Rare) - 10.0 / 130.0).abs() < 1e-9);
        assert_eq!(report.level_distribution.get(&4), Some(&1));

        let text = report.to_text();
        assert!(text.contains("SIMULATION REPORT"));
        assert!(text.contains("Driftwood Initiate Rod"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["total_catches"], 130);
    }

    #[test]
    fn test_empty_report_has_no_nans() {
        let catalog = Catalog::standard();
        let report = SimReport::from_runs(Vec::new(), catalog.starter_rod(), 0, 0.7);
        assert_eq!(report.catch_rate, 0.0);
        assert_eq!(report.avg_xp_gained, 0.0);
        assert_eq!(report.rarity_share(FishRarity::Mythic), 0.0);
    }
}

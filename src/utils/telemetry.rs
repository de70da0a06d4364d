//! Scan Telemetry
//!
//! Aggregate counters over wallet and domain scans for the /stats endpoint
//! and the on-shutdown export. Privacy-first: no addresses or domains are
//! retained, only counts and latencies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::types::RiskLevel;
use crate::utils::constants::THREAT_SCORE_THRESHOLD;

/// What was scanned
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScanKind {
    Wallet,
    Domain,
}

/// Aggregated statistics
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanStats {
    pub total_scans: u64,
    pub wallet_scans: u64,
    pub domain_scans: u64,
    /// Scans with risk score above 0.7
    pub threats_detected: u64,
    /// Scan count per risk level name
    pub scans_by_level: HashMap<String, u64>,
    pub avg_latency_ms: f64,
    pub period_start: u64,
    pub period_end: u64,
}

impl ScanStats {
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.2}\n",
            self.period_start,
            self.period_end,
            self.total_scans,
            self.wallet_scans,
            self.domain_scans,
            self.threats_detected,
            self.avg_latency_ms,
        )
    }
}

/// Telemetry collector shared across request handlers
pub struct ScanTelemetry {
    total_scans: AtomicU64,
    wallet_scans: AtomicU64,
    domain_scans: AtomicU64,
    threats_detected: AtomicU64,
    total_latency_ms: AtomicU64,
    level_counts: RwLock<HashMap<RiskLevel, u64>>,
    session_start: u64,
    export_dir: PathBuf,
}

impl ScanTelemetry {
    pub fn new() -> Self {
        Self::with_export_dir(PathBuf::from("./telemetry"))
    }

    pub fn with_export_dir(export_dir: PathBuf) -> Self {
        Self {
            total_scans: AtomicU64::new(0),
            wallet_scans: AtomicU64::new(0),
            domain_scans: AtomicU64::new(0),
            threats_detected: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            level_counts: RwLock::new(HashMap::new()),
            session_start: current_timestamp(),
            export_dir,
        }
    }

    /// Record one completed scan
    pub fn record_scan(&self, kind: ScanKind, level: RiskLevel, risk_score: f64, latency_ms: u64) {
        self.total_scans.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);

        match kind {
            ScanKind::Wallet => self.wallet_scans.fetch_add(1, Ordering::Relaxed),
            ScanKind::Domain => self.domain_scans.fetch_add(1, Ordering::Relaxed),
        };

        if risk_score > THREAT_SCORE_THRESHOLD {
            self.threats_detected.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut counts) = self.level_counts.write() {
            *counts.entry(level).or_insert(0) += 1;
        }
    }

    pub fn get_stats(&self) -> ScanStats {
        let total_scans = self.total_scans.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency_ms = if total_scans > 0 {
            total_latency as f64 / total_scans as f64
        } else {
            0.0
        };

        let scans_by_level = self
            .level_counts
            .read()
            .map(|counts| {
                counts
                    .iter()
                    .map(|(level, n)| (level.as_str().to_string(), *n))
                    .collect()
            })
            .unwrap_or_default();

        ScanStats {
            total_scans,
            wallet_scans: self.wallet_scans.load(Ordering::Relaxed),
            domain_scans: self.domain_scans.load(Ordering::Relaxed),
            threats_detected: self.threats_detected.load(Ordering::Relaxed),
            scans_by_level,
            avg_latency_ms,
            period_start: self.session_start,
            period_end: current_timestamp(),
        }
    }

    /// Write current stats to `stats_<unix>.json` in the export directory
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;
        let stats = self.get_stats();
        let path = self
            .export_dir
            .join(format!("stats_{}.json", current_timestamp()));

        let json = serde_json::to_string_pretty(&stats)?;
        fs::write(&path, json)?;

        Ok(path)
    }

    /// Append current stats to the CSV history
    pub fn export_stats_csv(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;
        let stats = self.get_stats();
        let path = self.export_dir.join("scan_history.csv");

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        // Header for a fresh file
        if file.metadata()?.len() == 0 {
            writeln!(
                file,
                "period_start,period_end,total_scans,wallet_scans,domain_scans,threats_detected,avg_latency_ms"
            )?;
        }

        write!(file, "{}", stats.to_csv_row())?;

        Ok(path)
    }
}

impl Default for ScanTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

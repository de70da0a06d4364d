//! Configuration module for Ruster Shield
//!
//! Reference data is an explicit, immutable value injected into the engine.
//! Built-in datasets come from utils/constants.rs; an operator can replace
//! them with JSON files (the reference-data provider boundary).

use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    BLACKLISTED_ADDRESSES, BRAND_KEYWORDS, DEFAULT_CACHE_TTL_SECS, DEFAULT_PORT,
    DEFAULT_RATE_LIMIT, DUST_COUNT_THRESHOLD, DUST_DESCRIPTION, DUST_RISK, DUST_VALUE_THRESHOLD,
    GAS_CONSISTENCY_THRESHOLD, GAS_PATTERN_DESCRIPTION, GAS_PATTERN_RISK, GAS_VARIANCE_THRESHOLD,
    HIGH_RISK_JURISDICTIONS, MEDIUM_RISK_JURISDICTIONS, RAPID_TX_DESCRIPTION, RAPID_TX_RISK,
    RAPID_TX_THRESHOLD, RATE_LIMIT_WINDOW_SECS, ROUND_AMOUNT_DESCRIPTION, ROUND_AMOUNT_FREQUENCY,
    ROUND_AMOUNT_RISK, SUSPICIOUS_PATTERNS, SUSPICIOUS_SUBDOMAINS, SUSPICIOUS_TLDS, TYPOSQUATTING,
    WEIGHT_BEHAVIOR, WEIGHT_CONTRACT, WEIGHT_GEO, WEIGHT_WALLET,
};

// ============================================
// BEHAVIOR RULES
// ============================================

/// Threshold rule: fires when the observed value exceeds `threshold`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorRule {
    pub threshold: f64,
    pub risk_score: f64,
    pub description: String,
}

/// Dust attack rule: many transactions below `value_threshold`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DustAttackRule {
    pub value_threshold: f64,
    pub count: u32,
    pub risk_score: f64,
    pub description: String,
}

/// Frequent round-amount transfers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundAmountRule {
    pub frequency: u32,
    pub risk_score: f64,
    pub description: String,
}

/// Automated gas pricing: low variance across many transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasPatternRule {
    pub gas_price_variance: f64,
    pub consistency_threshold: u32,
    pub risk_score: f64,
    pub description: String,
}

/// Named behavior rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorRules {
    pub rapid_transactions: BehaviorRule,
    pub dust_attacks: DustAttackRule,
    pub round_amounts: RoundAmountRule,
    pub gas_optimization: GasPatternRule,
}

impl Default for BehaviorRules {
    fn default() -> Self {
        Self {
            rapid_transactions: BehaviorRule {
                threshold: RAPID_TX_THRESHOLD,
                risk_score: RAPID_TX_RISK,
                description: RAPID_TX_DESCRIPTION.to_string(),
            },
            dust_attacks: DustAttackRule {
                value_threshold: DUST_VALUE_THRESHOLD,
                count: DUST_COUNT_THRESHOLD,
                risk_score: DUST_RISK,
                description: DUST_DESCRIPTION.to_string(),
            },
            round_amounts: RoundAmountRule {
                frequency: ROUND_AMOUNT_FREQUENCY,
                risk_score: ROUND_AMOUNT_RISK,
                description: ROUND_AMOUNT_DESCRIPTION.to_string(),
            },
            gas_optimization: GasPatternRule {
                gas_price_variance: GAS_VARIANCE_THRESHOLD,
                consistency_threshold: GAS_CONSISTENCY_THRESHOLD,
                risk_score: GAS_PATTERN_RISK,
                description: GAS_PATTERN_DESCRIPTION.to_string(),
            },
        }
    }
}

// ============================================
// WALLET REFERENCE DATABASE
// ============================================

/// Serialized form of the wallet reference database.
/// Missing sections fall back to the built-in dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    pub blacklisted_addresses: Vec<String>,
    pub suspicious_patterns: Vec<String>,
    pub behavior_thresholds: BehaviorRules,
    pub high_risk_jurisdictions: Vec<String>,
    pub medium_risk_jurisdictions: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            blacklisted_addresses: to_strings(BLACKLISTED_ADDRESSES),
            suspicious_patterns: to_strings(SUSPICIOUS_PATTERNS),
            behavior_thresholds: BehaviorRules::default(),
            high_risk_jurisdictions: to_strings(HIGH_RISK_JURISDICTIONS),
            medium_risk_jurisdictions: to_strings(MEDIUM_RISK_JURISDICTIONS),
        }
    }
}

/// Immutable reference data for wallet scoring
#[derive(Debug, Clone)]
pub struct ReferenceDatabase {
    blacklisted_addresses: HashSet<String>,
    suspicious_patterns: Vec<Regex>,
    behavior_rules: BehaviorRules,
    high_risk_jurisdictions: HashSet<String>,
    medium_risk_jurisdictions: HashSet<String>,
}

impl ReferenceDatabase {
    /// Built-in threat intelligence dataset
    pub fn builtin() -> AppResult<Self> {
        Self::from_data(ReferenceData::default())
    }

    /// Compile patterns and normalize the blacklist
    pub fn from_data(data: ReferenceData) -> AppResult<Self> {
        let suspicious_patterns = data
            .suspicious_patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| AppError::invalid_pattern(p, e)))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            blacklisted_addresses: data
                .blacklisted_addresses
                .iter()
                .map(|a| a.trim().to_lowercase())
                .collect(),
            suspicious_patterns,
            behavior_rules: data.behavior_thresholds,
            high_risk_jurisdictions: data.high_risk_jurisdictions.into_iter().collect(),
            medium_risk_jurisdictions: data.medium_risk_jurisdictions.into_iter().collect(),
        })
    }

    /// Parse reference data from JSON
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let data: ReferenceData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Load reference data from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                crate::models::errors::ErrorCode::ConfigMissingReferenceData,
                format!("Cannot read reference database {}", path.display()),
                e,
            )
        })?;
        let db = Self::from_json_str(&json)?;
        info!(
            "📚 Reference database loaded from {} ({} addresses, {} patterns)",
            path.display(),
            db.blacklisted_addresses.len(),
            db.suspicious_patterns.len()
        );
        Ok(db)
    }

    /// Case-insensitive blacklist membership
    #[inline]
    pub fn is_blacklisted(&self, address: &str) -> bool {
        self.blacklisted_addresses.contains(&address.to_lowercase())
    }

    pub fn suspicious_patterns(&self) -> &[Regex] {
        &self.suspicious_patterns
    }

    pub fn behavior_rules(&self) -> &BehaviorRules {
        &self.behavior_rules
    }

    pub fn is_high_risk_jurisdiction(&self, country: &str) -> bool {
        self.high_risk_jurisdictions.contains(country)
    }

    pub fn is_medium_risk_jurisdiction(&self, country: &str) -> bool {
        self.medium_risk_jurisdictions.contains(country)
    }

    pub fn blacklist_len(&self) -> usize {
        self.blacklisted_addresses.len()
    }
}

// ============================================
// DOMAIN REFERENCE DATABASE
// ============================================

/// Reference lists for the domain heuristic (all lower-case)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainReferenceDatabase {
    pub typosquatting: Vec<String>,
    pub suspicious_tlds: Vec<String>,
    pub suspicious_subdomains: Vec<String>,
    pub brand_keywords: Vec<String>,
}

impl Default for DomainReferenceDatabase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DomainReferenceDatabase {
    pub fn builtin() -> Self {
        Self {
            typosquatting: to_strings(TYPOSQUATTING),
            suspicious_tlds: to_strings(SUSPICIOUS_TLDS),
            suspicious_subdomains: to_strings(SUSPICIOUS_SUBDOMAINS),
            brand_keywords: to_strings(BRAND_KEYWORDS),
        }
    }

    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let mut db: Self = serde_json::from_str(json)?;
        db.normalize();
        Ok(db)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                crate::models::errors::ErrorCode::ConfigMissingReferenceData,
                format!("Cannot read domain database {}", path.display()),
                e,
            )
        })?;
        let db = Self::from_json_str(&json)?;
        info!("📚 Domain database loaded from {}", path.display());
        Ok(db)
    }

    fn normalize(&mut self) {
        for list in [
            &mut self.typosquatting,
            &mut self.suspicious_tlds,
            &mut self.suspicious_subdomains,
            &mut self.brand_keywords,
        ] {
            for entry in list.iter_mut() {
                *entry = entry.to_lowercase();
            }
        }
    }
}

// ============================================
// SCORING WEIGHTS
// ============================================

/// How the exercised weights combine on the wallet path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightMode {
    /// Wallet 0.4 + behavior 0.2 + geo 0.1; composite caps at 0.7
    #[default]
    AsCoded,
    /// Exercised weights divided by their sum; composite reaches 1.0
    Renormalized,
}

/// Per-dimension weights. Contract weight is reserved for contract scans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub wallet: f64,
    pub contract: f64,
    pub behavior: f64,
    pub geo: f64,
    pub mode: WeightMode,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            wallet: WEIGHT_WALLET,
            contract: WEIGHT_CONTRACT,
            behavior: WEIGHT_BEHAVIOR,
            geo: WEIGHT_GEO,
            mode: WeightMode::AsCoded,
        }
    }
}

impl ScoringWeights {
    pub fn renormalized() -> Self {
        Self {
            mode: WeightMode::Renormalized,
            ..Self::default()
        }
    }

    /// Effective (wallet, behavior, geo) weights for the wallet path
    pub fn effective(&self) -> (f64, f64, f64) {
        match self.mode {
            WeightMode::AsCoded => (self.wallet, self.behavior, self.geo),
            WeightMode::Renormalized => {
                let sum = self.wallet + self.behavior + self.geo;
                if sum <= 0.0 {
                    return (0.0, 0.0, 0.0);
                }
                (self.wallet / sum, self.behavior / sum, self.geo / sum)
            }
        }
    }

    /// Highest composite reachable on the wallet path
    pub fn max_wallet_composite(&self) -> f64 {
        let (w, b, g) = self.effective();
        (w + b + g).min(1.0)
    }

    /// Weighted sum of the three wallet-path sub-values, clamped to [0, 1]
    pub fn composite(&self, wallet: f64, behavior: f64, geo: f64) -> f64 {
        let (w, b, g) = self.effective();
        crate::models::types::clamp_unit(wallet * w + behavior * b + geo * g)
    }
}

// ============================================
// ENGINE CONFIG
// ============================================

/// Engine configuration resolved from the environment
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Wallet reference database JSON; built-in when unset
    pub reference_db_path: Option<PathBuf>,
    /// Domain reference database JSON; built-in when unset
    pub domain_db_path: Option<PathBuf>,
    pub weights: ScoringWeights,
}

impl EngineConfig {
    /// Reads RUSTER_REFERENCE_DB, RUSTER_DOMAIN_DB, RUSTER_RENORMALIZE_WEIGHTS
    pub fn from_env() -> Self {
        let renormalize = env_flag("RUSTER_RENORMALIZE_WEIGHTS");
        Self {
            reference_db_path: std::env::var("RUSTER_REFERENCE_DB").ok().map(PathBuf::from),
            domain_db_path: std::env::var("RUSTER_DOMAIN_DB").ok().map(PathBuf::from),
            weights: if renormalize {
                ScoringWeights::renormalized()
            } else {
                ScoringWeights::default()
            },
        }
    }

    pub fn load_reference_database(&self) -> AppResult<ReferenceDatabase> {
        match &self.reference_db_path {
            Some(path) => ReferenceDatabase::from_json_file(path),
            None => ReferenceDatabase::builtin(),
        }
    }

    pub fn load_domain_database(&self) -> AppResult<DomainReferenceDatabase> {
        match &self.domain_db_path {
            Some(path) => DomainReferenceDatabase::from_json_file(path),
            None => Ok(DomainReferenceDatabase::builtin()),
        }
    }
}

// ============================================
// SERVER CONFIG
// ============================================

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Accepted API keys; empty means open access
    pub api_keys: HashSet<String>,
    /// Requests per window per client
    pub rate_limit: u32,
    pub rate_limit_window: Duration,
    pub cache_ttl: Duration,
    /// Telemetry export directory
    pub telemetry_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            api_keys: HashSet::new(),
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_limit_window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            telemetry_dir: PathBuf::from("./telemetry"),
        }
    }
}

impl ServerConfig {
    /// PORT is honoured before RUSTER_PORT for container platforms
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let port = match std::env::var("PORT").or_else(|_| std::env::var("RUSTER_PORT")) {
            Ok(p) => p
                .parse()
                .map_err(|_| AppError::invalid_config(format!("Invalid port: {}", p)))?,
            Err(_) => defaults.port,
        };

        let rate_limit = match std::env::var("RUSTER_RATE_LIMIT") {
            Ok(v) => v
                .parse()
                .map_err(|_| AppError::invalid_config(format!("Invalid RUSTER_RATE_LIMIT: {}", v)))?,
            Err(_) => defaults.rate_limit,
        };

        let api_keys = std::env::var("RUSTER_API_KEYS")
            .map(|keys| parse_api_keys(&keys))
            .unwrap_or_default();
        if !api_keys.is_empty() {
            // Key values are never logged
            info!("🔑 {} API key(s) configured", api_keys.len());
        }

        Ok(Self {
            host: std::env::var("RUSTER_HOST").unwrap_or(defaults.host),
            port,
            api_keys,
            rate_limit,
            telemetry_dir: std::env::var("RUSTER_TELEMETRY_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.telemetry_dir),
            ..defaults
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Helper functions

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

fn parse_api_keys(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

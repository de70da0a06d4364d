//! Constants Module - Single Source of Truth
//!
//! Every weight, threshold, confidence and built-in dataset used by the
//! scoring engine is defined here. Other modules reference these names
//! instead of repeating literals.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "RusterShield";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// DIMENSION WEIGHTS
// ============================================

/// Wallet (blacklist / pattern) dimension weight
pub const WEIGHT_WALLET: f64 = 0.4;
/// Contract dimension weight; never computed on the wallet path
pub const WEIGHT_CONTRACT: f64 = 0.3;
/// Transaction behavior dimension weight
pub const WEIGHT_BEHAVIOR: f64 = 0.2;
/// Geographic jurisdiction dimension weight
pub const WEIGHT_GEO: f64 = 0.1;

// ============================================
// SUB-SCORE CONSTANTS
// ============================================

/// Score increment per matching suspicious pattern
pub const PATTERN_MATCH_INCREMENT: f64 = 0.3;

/// Fixed confidences per dimension
pub const CONFIDENCE_BLACKLISTED: f64 = 1.0;
pub const CONFIDENCE_WALLET: f64 = 0.8;
pub const CONFIDENCE_BEHAVIOR: f64 = 0.7;
pub const CONFIDENCE_GEO: f64 = 0.6;
pub const CONFIDENCE_DOMAIN: f64 = 0.8;

/// Jurisdiction sub-scores
pub const GEO_HIGH_RISK_SCORE: f64 = 0.9;
pub const GEO_MEDIUM_RISK_SCORE: f64 = 0.5;

// Flag strings
pub const FLAG_BLACKLISTED: &str = "Blacklisted address";
pub const FLAG_SUSPICIOUS_PATTERN: &str = "Suspicious address pattern";
pub const FLAG_NO_TRANSACTION_DATA: &str = "No transaction data";
pub const FLAG_NO_GEO_DATA: &str = "No geographical data";
pub const FLAG_HIGH_RISK_JURISDICTION: &str = "High-risk jurisdiction";
pub const FLAG_MEDIUM_RISK_JURISDICTION: &str = "Medium-risk jurisdiction";

// ============================================
// RISK LEVEL BANDS (lower bound inclusive)
// ============================================

pub const LEVEL_CRITICAL_MIN: f64 = 0.8;
pub const LEVEL_HIGH_MIN: f64 = 0.6;
pub const LEVEL_MEDIUM_MIN: f64 = 0.4;
pub const LEVEL_LOW_MIN: f64 = 0.2;

// ============================================
// COMPLIANCE CUT POINTS (independent of the level bands)
// ============================================

/// AML compliant while score is strictly below this
pub const AML_COMPLIANT_BELOW: f64 = 0.8;
/// KYC required above this
pub const KYC_REQUIRED_ABOVE: f64 = 0.4;
/// Enhanced due diligence required above this
pub const EDD_REQUIRED_ABOVE: f64 = 0.6;
/// Regulatory reporting required above this
pub const REPORTING_REQUIRED_ABOVE: f64 = 0.7;

/// Scans above this score count as detected threats
pub const THREAT_SCORE_THRESHOLD: f64 = 0.7;

// ============================================
// BEHAVIOR RULES
// ============================================

pub const RAPID_TX_THRESHOLD: f64 = 50.0;
pub const RAPID_TX_RISK: f64 = 0.7;
pub const RAPID_TX_DESCRIPTION: &str = "Unusually high transaction frequency";

pub const DUST_VALUE_THRESHOLD: f64 = 0.001;
pub const DUST_COUNT_THRESHOLD: u32 = 10;
pub const DUST_RISK: f64 = 0.6;
pub const DUST_DESCRIPTION: &str = "Multiple dust transactions (potential tracking)";

pub const ROUND_AMOUNT_FREQUENCY: u32 = 5;
pub const ROUND_AMOUNT_RISK: f64 = 0.4;
pub const ROUND_AMOUNT_DESCRIPTION: &str = "Frequent round amount transfers (bot behavior)";

pub const GAS_VARIANCE_THRESHOLD: f64 = 0.05;
pub const GAS_CONSISTENCY_THRESHOLD: u32 = 10;
pub const GAS_PATTERN_RISK: f64 = 0.5;
pub const GAS_PATTERN_DESCRIPTION: &str = "Automated gas price patterns";

// ============================================
// DOMAIN HEURISTIC
// ============================================

pub const DOMAIN_TYPOSQUAT_INCREMENT: f64 = 0.8;
pub const DOMAIN_TLD_INCREMENT: f64 = 0.6;
pub const DOMAIN_SUBDOMAIN_INCREMENT: f64 = 0.7;
pub const DOMAIN_IMPERSONATION_INCREMENT: f64 = 0.9;

pub const DOMAIN_REC_TYPOSQUAT: &str = "CRITICAL: This appears to be a typosquatted domain";
pub const DOMAIN_REC_TLD: &str = "WARNING: Domain uses suspicious top-level domain";
pub const DOMAIN_REC_SUBDOMAIN: &str = "HIGH RISK: Suspicious subdomain pattern detected";
pub const DOMAIN_REC_IMPERSONATION: &str =
    "CRITICAL: Possible impersonation of legitimate crypto service";
pub const DOMAIN_REC_SAFE: &str = "Domain appears safe based on known patterns";

// ============================================
// BUILT-IN THREAT INTELLIGENCE
// ============================================

/// Known exploit, sanctioned and scam addresses
pub const BLACKLISTED_ADDRESSES: &[&str] = &[
    // Ronin Bridge
    "0x098B716B8Aaf21512996dC57EB0615e2383E2f96",
    "0x67d40EE1A85bf4a4Bb7Ffae16De985e8427B6b45",
    // Wormhole Bridge
    "0x629e7Da20197a5429d30da36E77d06CdF796b71A",
    "0x4456eeE7bFcF96d2C58c82f32beA4dd3f7F1b0f8",
    // FTX drainer
    "0x59448FE20378357f206880C58068f095ae63d5A5",
    "0x8f00eCfBb8bf1b16C7bE4C82Cc0f62d2FbF5a52a",
    "0x1D31F5a107F9E87D8B0c1b0E6e01A56d3Db4aB7E",
    // Terra collapse
    "0x8789337679aA4d2e5aE5Bc173177C47E6eAf7E23",
    "0xF977814e90dA44bFA03b6295A0616a897441aceC",
    // Tornado Cash (OFAC)
    "0x8589427373D6D84E98730D7795D8f6f8731FDA16",
    "0x722122dF12D4e14e13Ac3b6895a86e84145b6967",
    "0xD4B88Df4D29F5CedD6857912842cff3b20C8cfa3",
    "0x910Cbd523D972eb0a6f4cAe4618aD62622b39DbF",
    "0xA160cdAB225685dA1d56aa342Ad8841c3b53f291",
    // BNB Chain bridge
    "0x489A8756C18C0b8B24EC2a2b9FF3D4d447F79BEc",
    "0x0D0707963952f2fBA59dD06f2b425ace40b492Fe",
    // Harmony bridge
    "0x9e91ae672e7f7330fc6b9bab9c259bd94cd08715",
    "0x3f4c6dae456af0c8dab0e15f0add86bb3ee26c44",
    // Misc high-risk
    "0x742d35Cc6481C2C2f4B03F6A4A1D77ff58BB3E0E",
    "0x8765432109876543210987654321098765432109",
    "0x1234567890123456789012345678901234567890",
    "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
    "0xa0b86a33e6776827d0db6b3a5b3d1f5c8b4e8a3f",
];

/// Suspicious address patterns, tested in order against the raw address.
/// The last entry is a run of nine or more identical characters of any kind.
pub const SUSPICIOUS_PATTERNS: &[&str] = &[
    r"(?i)^0x000000000000000000000000000000000000",
    r"(?i)^0xffffffffffffffffffffffffffffffffffffffff",
    r"(?i)^0x123456789abcdef",
    r"(?i)^0xdeadbeef",
    r"(?i)(.)\1{8,}",
];

pub const HIGH_RISK_JURISDICTIONS: &[&str] = &[
    "North Korea",
    "Iran",
    "Syria",
    "Cuba",
    "Venezuela",
    "Myanmar",
    "Belarus",
    "Russia",
    "Afghanistan",
];

pub const MEDIUM_RISK_JURISDICTIONS: &[&str] =
    &["China", "Pakistan", "Nigeria", "Bangladesh", "Philippines"];

pub const TYPOSQUATTING: &[&str] = &[
    "etherium",
    "etherieum",
    "etheruim",
    "etherem",
    "metamaask",
    "metamsk",
    "metmask",
    "metamask-wallet",
    "uniwsap",
    "uniswapp",
    "unisawp",
    "uniswap-app",
    "binanse",
    "coinbas",
    "kucoin",
    "okx-exchange",
];

pub const SUSPICIOUS_TLDS: &[&str] = &[
    ".tk", ".ml", ".ga", ".cf", ".gq", ".click", ".download", ".zip", ".top",
];

pub const SUSPICIOUS_SUBDOMAINS: &[&str] = &[
    "secure-", "verify-", "update-", "confirm-", "wallet-", "support-", "help-", "recovery-",
];

pub const BRAND_KEYWORDS: &[&str] = &[
    "metamask", "uniswap", "pancake", "binance", "coinbase", "wallet",
];

// ============================================
// API CONSTANTS
// ============================================

/// Default server port
pub const DEFAULT_PORT: u16 = 8080;

/// Default report cache TTL (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default requests per rate-limit window
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Rate-limit window (seconds)
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Maximum addresses per batch request
pub const MAX_BATCH_SIZE: usize = 100;

/// Batch concurrency bounds
pub const DEFAULT_BATCH_CONCURRENCY: usize = 10;
pub const MAX_BATCH_CONCURRENCY: usize = 50;

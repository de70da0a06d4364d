//! API Request Handlers

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use super::middleware::{RateLimitConfig, RateLimiter};
use super::types::*;
use crate::core::analyzer::FraudAnalyzer;
use crate::models::config::ServerConfig;
use crate::models::errors::AppError;
use crate::utils::cache::ReportCache;
use crate::utils::constants::{APP_VERSION, MAX_BATCH_CONCURRENCY, MAX_BATCH_SIZE, THREAT_SCORE_THRESHOLD};
use crate::utils::telemetry::{ScanKind, ScanTelemetry};

/// Error half of every handler result
pub type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

/// Shared application state
pub struct AppState {
    pub analyzer: FraudAnalyzer,
    pub telemetry: Arc<ScanTelemetry>,
    pub cache: Arc<ReportCache>,
    pub rate_limiter: Arc<RateLimiter>,
    /// Accepted API keys; empty means open access
    pub api_keys: HashSet<String>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(analyzer: FraudAnalyzer, config: &ServerConfig) -> Self {
        Self {
            analyzer,
            telemetry: Arc::new(ScanTelemetry::with_export_dir(config.telemetry_dir.clone())),
            cache: Arc::new(ReportCache::new(config.cache_ttl)),
            rate_limiter: Arc::new(RateLimiter::new(RateLimitConfig {
                requests_per_window: config.rate_limit,
                window_duration: config.rate_limit_window,
            })),
            api_keys: config.api_keys.clone(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn failure(status: StatusCode, error: ApiError, start: Instant) -> ApiFailure {
    (status, Json(ApiResponse::error(error, elapsed_ms(start))))
}

/// Map an engine error to its HTTP status
fn app_failure(err: &AppError, start: Instant) -> ApiFailure {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    failure(status, ApiError::from(err), start)
}

fn malformed_body(rejection: JsonRejection, start: Instant) -> ApiFailure {
    warn!("⚠️ Malformed request body: {}", rejection.body_text());
    failure(
        StatusCode::BAD_REQUEST,
        ApiError::bad_request(rejection.body_text()),
        start,
    )
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        blacklist_entries: state.analyzer.reference().blacklist_len(),
        max_wallet_score: state.analyzer.weights().max_wallet_composite(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Wallet Scan
// ============================================

pub async fn scan_wallet(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WalletScanRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<WalletScanData>>, ApiFailure> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|r| malformed_body(r, start))?;

    let address = req.address.as_deref().unwrap_or_default();
    if address.trim().is_empty() {
        warn!("⚠️ Wallet scan rejected: address missing");
        return Err(app_failure(&AppError::invalid_argument("address"), start));
    }

    let tx = req.transaction_data.as_ref();
    let geo = req.geo_data.as_ref();
    let key = ReportCache::key(address, tx, geo);

    let (report, cached) = match state.cache.get(&key) {
        Some(report) => (report, true),
        None => {
            let report = state.analyzer.scan_wallet(address, tx, geo).map_err(|e| {
                error!("❌ Wallet scan failed: {}", e);
                app_failure(&e, start)
            })?;
            state.cache.set(key, report.clone());
            (report, false)
        }
    };

    let latency = start.elapsed().as_millis() as u64;
    state.telemetry.record_scan(
        ScanKind::Wallet,
        report.assessment.risk_level,
        report.assessment.risk_score,
        latency,
    );

    info!(
        "{} Wallet scan {}: {} ({:.3}){}",
        report.assessment.risk_level.emoji(),
        report.address,
        report.assessment.risk_level,
        report.assessment.risk_score,
        if cached { " [cached]" } else { "" }
    );

    let data = WalletScanData::from_report(uuid::Uuid::new_v4().to_string(), report, cached);
    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Domain Scan
// ============================================

pub async fn scan_domain(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DomainScanRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DomainScanData>>, ApiFailure> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|r| malformed_body(r, start))?;

    let domain = req.domain.unwrap_or_default();
    let assessment = state
        .analyzer
        .scan_domain(&domain)
        .map_err(|e| app_failure(&e, start))?;

    let latency = start.elapsed().as_millis() as u64;
    state.telemetry.record_scan(
        ScanKind::Domain,
        assessment.risk_level,
        assessment.risk_score(),
        latency,
    );

    info!(
        "{} Domain scan {}: {} ({:.2})",
        assessment.risk_level.emoji(),
        assessment.domain,
        assessment.risk_level,
        assessment.risk_score()
    );

    let data = DomainScanData::from_assessment(uuid::Uuid::new_v4().to_string(), assessment);
    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Batch Scan
// ============================================

pub async fn scan_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchScanRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BatchScanData>>, ApiFailure> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|r| malformed_body(r, start))?;

    if req.addresses.is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            ApiError::bad_request("addresses array cannot be empty"),
            start,
        ));
    }

    if req.addresses.len() > MAX_BATCH_SIZE {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            ApiError::bad_request(format!(
                "Maximum {} addresses per batch request",
                MAX_BATCH_SIZE
            )),
            start,
        ));
    }

    let concurrency = req.concurrency.clamp(1, MAX_BATCH_CONCURRENCY);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut handles = Vec::with_capacity(req.addresses.len());

    for address in req.addresses.iter().cloned() {
        let sem = semaphore.clone();
        let analyzer = state.analyzer.clone();

        // Scoring is CPU-only; run it off the async workers
        let handle = tokio::spawn(async move {
            let _permit = sem.acquire_owned().await.ok();
            let item_start = Instant::now();
            let scanned = {
                let address = address.clone();
                tokio::task::spawn_blocking(move || analyzer.scan_wallet(&address, None, None))
                    .await
            };

            match scanned {
                Ok(Ok(report)) => BatchWalletResult::success(&report, elapsed_ms(item_start)),
                Ok(Err(e)) => BatchWalletResult::failure(address, e.to_string(), elapsed_ms(item_start)),
                Err(e) => BatchWalletResult::failure(
                    address,
                    format!("Scan task failed: {}", e),
                    elapsed_ms(item_start),
                ),
            }
        });

        handles.push(handle);
    }

    // Awaiting in spawn order keeps results aligned with the input
    let mut results = Vec::with_capacity(handles.len());
    for (handle, address) in handles.into_iter().zip(req.addresses.iter()) {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => results.push(BatchWalletResult::failure(
                address.clone(),
                format!("Scan task failed: {}", e),
                0.0,
            )),
        }
    }

    for result in &results {
        if let (Some(level), Some(score)) = (result.risk_level, result.risk_score) {
            state
                .telemetry
                .record_scan(ScanKind::Wallet, level, score, result.latency_ms as u64);
        }
    }

    let total_processed = results.iter().filter(|r| r.status == "success").count();
    let total_flagged = results
        .iter()
        .filter(|r| r.risk_score.is_some_and(|s| s > THREAT_SCORE_THRESHOLD))
        .count();

    info!(
        "📦 Batch scan: {}/{} processed, {} flagged",
        total_processed,
        req.addresses.len(),
        total_flagged
    );

    let data = BatchScanData {
        total_requested: req.addresses.len(),
        total_processed,
        total_flagged,
        results,
        processing_time_ms: elapsed_ms(start),
    };

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let cache_stats = state.cache.stats();

    info!(
        "📊 Cache Stats: {} entries, {:.1}% hit rate ({} hits / {} misses)",
        cache_stats.entries, cache_stats.hit_rate, cache_stats.hits, cache_stats.misses
    );

    let data = StatsData {
        scans: state.telemetry.get_stats(),
        cache: cache_stats,
        uptime_seconds: state.uptime_seconds(),
        api_version: APP_VERSION.to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

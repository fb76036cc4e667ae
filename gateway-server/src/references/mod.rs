//! Brand/Model Reference Cache
//!
//! The UI populates its brand and model filters from reference lists that
//! change rarely but are expensive to assemble (one paginated upstream query
//! per brand). A background job rebuilds them on a schedule, persists them
//! as flat JSON files under the work dir and swaps an in-memory snapshot
//! that request handlers read lock-free-ish (one `RwLock` read, the payload
//! is behind an `Arc`). Readers never observe a half-written cache.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

use crate::client::upstream::ListingsApi;
use crate::utils::{AppError, AppResult};
use shared::models::search::FiltersRequest;

/// Pause between paginated upstream requests
const PAGE_DELAY: Duration = Duration::from_millis(500);
/// Models page size
const PAGE_LIMIT: u32 = 50;

pub const BRANDS_FILE: &str = "brands.json";
pub const MODELS_FILE: &str = "models.json";
pub const LAST_UPDATE_FILE: &str = "last-update.json";

/// Immutable reference snapshot served to the UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceCache {
    pub brands: Vec<String>,
    /// Brand → normalized model names
    pub models: BTreeMap<String, Vec<String>>,
    pub last_update: Option<DateTime<Utc>>,
}

/// Outcome of one refresh run
#[derive(Debug, Clone, Serialize)]
pub struct RefreshStats {
    pub brands: usize,
    pub models: usize,
    pub duration_secs: f64,
}

/// Reference cache with flat-file persistence
pub struct ReferenceStore {
    data_dir: PathBuf,
    cache: RwLock<Arc<ReferenceCache>>,
}

impl ReferenceStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: RwLock::new(Arc::new(ReferenceCache::default())),
        }
    }

    /// Current snapshot; cheap to call per request
    pub async fn snapshot(&self) -> Arc<ReferenceCache> {
        self.cache.read().await.clone()
    }

    /// Warm the in-memory cache from the flat files of a previous run
    ///
    /// Returns false when no files exist yet (cold start).
    pub async fn load_from_disk(&self) -> AppResult<bool> {
        let brands_path = self.data_dir.join(BRANDS_FILE);
        let models_path = self.data_dir.join(MODELS_FILE);
        if !brands_path.exists() || !models_path.exists() {
            return Ok(false);
        }

        #[derive(Deserialize)]
        struct BrandsFile {
            values: Vec<String>,
        }

        let brands: BrandsFile = read_json(&brands_path)?;
        let models: BTreeMap<String, Vec<String>> = read_json(&models_path)?;

        let last_update = read_json::<serde_json::Value>(&self.data_dir.join(LAST_UPDATE_FILE))
            .ok()
            .and_then(|meta| {
                meta.get("lastUpdate")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse().ok())
            });

        let cache = Arc::new(ReferenceCache {
            brands: brands.values,
            models,
            last_update,
        });
        *self.cache.write().await = cache;
        Ok(true)
    }

    /// Rebuild the cache from upstream and persist it
    ///
    /// One `getAvailableFilters` call for the brand list, then one paginated
    /// query per brand for its models. A brand whose model query fails is
    /// kept with whatever pages were fetched - the refresh is best-effort
    /// per brand but fails outright when the brand list itself is
    /// unavailable.
    pub async fn refresh(&self, api: &dyn ListingsApi) -> AppResult<RefreshStats> {
        let started = std::time::Instant::now();
        let now = Utc::now();

        let response = api
            .available_filters(&FiltersRequest::for_field("brandname"))
            .await?;
        let brands = extract_values(&response);
        if brands.is_empty() {
            return Err(AppError::upstream("brand list came back empty"));
        }
        tracing::info!(brands = brands.len(), "reference refresh started");

        let mut models = BTreeMap::new();
        let mut total_models = 0usize;
        for (index, brand) in brands.iter().enumerate() {
            let brand_models = fetch_models_for_brand(api, brand).await;
            total_models += brand_models.len();
            models.insert(brand.clone(), brand_models);

            if (index + 1) % 10 == 0 {
                tracing::info!(progress = index + 1, total = brands.len(), "reference refresh progress");
            }
        }

        let cache = Arc::new(ReferenceCache {
            brands,
            models,
            last_update: Some(now),
        });

        let stats = RefreshStats {
            brands: cache.brands.len(),
            models: total_models,
            duration_secs: started.elapsed().as_secs_f64(),
        };

        write_files(&self.data_dir, &cache, &stats)?;
        *self.cache.write().await = cache;

        tracing::info!(
            brands = stats.brands,
            models = stats.models,
            duration_secs = stats.duration_secs,
            "reference refresh finished"
        );
        Ok(stats)
    }
}

/// Paginate the model list of one brand; failures end the pagination early
async fn fetch_models_for_brand(api: &dyn ListingsApi, brand: &str) -> Vec<String> {
    let mut all_models = Vec::new();
    let mut offset = 0;

    loop {
        let request = FiltersRequest {
            fields_to_extract: "seriesname".to_string(),
            filters: Some(json!({ "brandname": brand })),
            limit: PAGE_LIMIT,
            offset,
        };

        let page = match api.available_filters(&request).await {
            Ok(response) => extract_values(&response),
            Err(e) => {
                tracing::warn!(brand, offset, error = %e, "model page fetch failed");
                break;
            }
        };

        let page_len = page.len();
        all_models.extend(page.into_iter().map(|m| normalize_model_name(&m)));

        if page_len < PAGE_LIMIT as usize {
            break;
        }
        offset += PAGE_LIMIT;
        tokio::time::sleep(PAGE_DELAY).await;
    }

    all_models
}

/// Distinct values from a `getAvailableFilters` envelope
/// (`data.data.values` in the upstream shape)
fn extract_values(envelope: &serde_json::Value) -> Vec<String> {
    envelope
        .pointer("/data/data/values")
        .and_then(|v| v.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::internal(format!("read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::internal(format!("parse {}: {e}", path.display())))
}

fn write_files(dir: &Path, cache: &ReferenceCache, stats: &RefreshStats) -> AppResult<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::internal(format!("create {}: {e}", dir.display())))?;

    write_json(&dir.join(BRANDS_FILE), &json!({ "values": cache.brands }))?;
    write_json(&dir.join(MODELS_FILE), &cache.models)?;
    write_json(
        &dir.join(LAST_UPDATE_FILE),
        &json!({
            "lastUpdate": cache.last_update,
            "brandsCount": stats.brands,
            "modelsCount": stats.models,
            "durationSecs": stats.duration_secs,
        }),
    )
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let raw = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("serialize {}: {e}", path.display())))?;
    std::fs::write(path, raw)
        .map_err(|e| AppError::internal(format!("write {}: {e}", path.display())))
}

/// Normalize an upstream model name for display
///
/// Observed upstream quirks: English "(Imported)" markers, lowercased trim
/// suffixes ("A4l"), inconsistent casing of e-tron/RS/SQ/TT. Whitespace is
/// collapsed as a side effect of tokenization.
pub fn normalize_model_name(name: &str) -> String {
    name.split_whitespace()
        .map(normalize_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_token(token: &str) -> String {
    if token.eq_ignore_ascii_case("(imported)") {
        return "(Импорт)".to_string();
    }
    if token.eq_ignore_ascii_case("e-tron") {
        return "E-tron".to_string();
    }
    match token {
        "Rs" => return "RS".to_string(),
        "Sq" => return "SQ".to_string(),
        "Tt" => return "TT".to_string(),
        "Tts" => return "TTS".to_string(),
        _ => {}
    }
    uppercase_trim_suffix(token)
}

/// `A4l` → `A4L`: an uppercase letter, digits, then a single lowercase trim
/// letter at the end of the token
fn uppercase_trim_suffix(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let n = chars.len();
    if n < 3 || !chars[n - 1].is_ascii_lowercase() {
        return token.to_string();
    }

    let mut i = n - 1;
    while i > 0 && chars[i - 1].is_ascii_digit() {
        i -= 1;
    }
    // at least one digit, preceded by an uppercase letter
    if i == n - 1 || i == 0 || !chars[i - 1].is_ascii_uppercase() {
        return token.to_string();
    }

    let mut result: String = chars[..n - 1].iter().collect();
    result.push(chars[n - 1].to_ascii_uppercase());
    result
}

/// Periodic refresh loop, spawned at startup
pub async fn run_refresh_loop(
    store: Arc<ReferenceStore>,
    api: Arc<dyn ListingsApi>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // the first tick fires immediately; skip it when disk state is warm
    ticker.tick().await;
    if store.snapshot().await.brands.is_empty() {
        if let Err(e) = store.refresh(api.as_ref()).await {
            tracing::error!(error = %e, "initial reference refresh failed");
        }
    }

    loop {
        ticker.tick().await;
        if let Err(e) = store.refresh(api.as_ref()).await {
            tracing::error!(error = %e, "reference refresh failed");
        }
    }
}

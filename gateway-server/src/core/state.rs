//! Shared Application State

use std::sync::Arc;
use std::time::Duration;

use crate::client::{ListingsApi, TariffClient, UpstreamClient};
use crate::core::Config;
use crate::pricing::PricingConfig;
use crate::references::{ReferenceStore, run_refresh_loop};

/// Everything request handlers need, cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn ListingsApi>,
    /// Present only when the external tariff enrichment path is configured
    pub tariff: Option<Arc<TariffClient>>,
    pub references: Arc<ReferenceStore>,
    pub pricing: Arc<PricingConfig>,
}

impl AppState {
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        if config.upstream_api_token.is_empty() {
            tracing::warn!("UPSTREAM_API_TOKEN is empty, upstream requests will be rejected");
        }

        let upstream: Arc<dyn ListingsApi> = Arc::new(UpstreamClient::new(
            &config.upstream_api_url,
            &config.upstream_api_token,
        ));

        let tariff = config.tariff_api_url.as_ref().map(|url| {
            tracing::info!(url = %url, "tariff enrichment enabled");
            Arc::new(TariffClient::new(url, config.tariff_timeout_ms))
        });

        let references = Arc::new(ReferenceStore::new(
            std::path::Path::new(&config.work_dir).join("data"),
        ));
        match references.load_from_disk().await {
            Ok(true) => tracing::info!("reference cache warmed from disk"),
            Ok(false) => tracing::info!("no reference cache on disk, starting cold"),
            Err(e) => tracing::warn!(error = %e, "reference cache load failed, starting cold"),
        }

        Ok(Self {
            config: Arc::new(config.clone()),
            upstream,
            tariff,
            references,
            pricing: Arc::new(PricingConfig::default()),
        })
    }

    /// Spawn the periodic background jobs
    pub fn start_background_tasks(&self) {
        if self.config.reference_refresh_secs == 0 {
            tracing::info!("reference refresh disabled");
            return;
        }

        let store = self.references.clone();
        let api = self.upstream.clone();
        let interval = Duration::from_secs(self.config.reference_refresh_secs);
        tokio::spawn(run_refresh_loop(store, api, interval));
    }
}

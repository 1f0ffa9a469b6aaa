use crate::validator;
use chrono::Utc;
use easel_core::EaselError;
use easel_core::config::FetchConfig;
use easel_core::plugin::{Plugin, PollingVerb};
use easel_store::PluginStore;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a refresh call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Payload fetched, validated, and committed to the store
    Updated,
    /// Plugin is not configured for polling; nothing was fetched
    Skipped,
}

/// Issues one polling fetch per call and commits validated payloads.
///
/// No retries and no backoff live here; the caller owns retry policy and
/// serializes concurrent refreshes of the same plugin.
pub struct Fetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, EaselError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EaselError::Config(e.to_string()))?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Refresh one plugin's cached payload.
    ///
    /// Every failure is returned to the caller unmodified, and none of
    /// the failure paths touch the store — the previous payload and
    /// timestamp survive intact.
    pub async fn refresh(
        &self,
        store: &PluginStore,
        plugin: &Plugin,
    ) -> Result<RefreshOutcome, EaselError> {
        if !plugin.is_pollable() {
            debug!(
                plugin = %plugin.id,
                strategy = plugin.refresh_strategy.as_str(),
                "Refresh skipped: not configured for polling"
            );
            return Ok(RefreshOutcome::Skipped);
        }
        // is_pollable guarantees the URL is present.
        let url = plugin.polling_url.as_deref().unwrap_or_default();

        let headers = self.build_headers(plugin);

        let mut request = match plugin.polling_verb {
            PollingVerb::Post => self.client.post(url),
            PollingVerb::Get => self.client.get(url),
        };
        request = request.headers(headers);
        if plugin.polling_verb == PollingVerb::Post {
            if let Some(body) = &plugin.polling_body {
                request = request.body(body.clone());
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| EaselError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if !status_accepted(status) {
            return Err(EaselError::HttpStatus(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EaselError::Transport(e.to_string()))?;

        // A literal `null` body decodes to JSON null and is handled by
        // validation, not treated as a parse failure.
        let value: Value = serde_json::from_str(&body).map_err(|_| EaselError::InvalidJson)?;

        if let Err(err) = validator::validate(&value) {
            warn!(plugin = %plugin.id, kind = err.kind(), "Response validation failed");
            return Err(err);
        }

        store.commit_payload(&plugin.id, value, Utc::now())?;
        info!(plugin = %plugin.id, "Payload refreshed");
        Ok(RefreshOutcome::Updated)
    }

    /// Fixed baseline first, then the plugin's header lines in order so
    /// later lines win on collision.
    fn build_headers(&self, plugin: &Plugin) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(ua) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in plugin.polling_headers() {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(plugin = %plugin.id, header = %name, "Ignoring malformed polling header"),
            }
        }
        headers
    }
}

/// 2xx only — informational and redirect statuses are failures too.
fn status_accepted(status: u16) -> bool {
    (200..=299).contains(&status)
}

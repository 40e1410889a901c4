use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::state::credentials::CredentialMode;

pub const DEFAULT_LOGIN_LATENCY_MS: u32 = 800;
pub const DEFAULT_REVALIDATE_INTERVAL_SECS: u32 = 60;
pub const DEFAULT_EMAIL_DOMAIN: &str = "campus.edu";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Only accept the built-in allow-list of accounts.
    pub restrict_credentials: Option<bool>,
    pub login_latency_ms: Option<u32>,
    pub revalidate_interval_secs: Option<u32>,
    pub email_domain: Option<String>,
}

impl RuntimeConfig {
    pub fn credential_mode(&self) -> CredentialMode {
        if self.restrict_credentials.unwrap_or(false) {
            CredentialMode::Restricted
        } else {
            CredentialMode::Unrestricted
        }
    }

    pub fn login_latency_ms(&self) -> u32 {
        self.login_latency_ms.unwrap_or(DEFAULT_LOGIN_LATENCY_MS)
    }

    pub fn revalidate_interval_ms(&self) -> u32 {
        self.revalidate_interval_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REVALIDATE_INTERVAL_SECS)
            .saturating_mul(1000)
    }

    pub fn email_domain(&self) -> String {
        self.email_domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
            .unwrap_or(DEFAULT_EMAIL_DOMAIN)
            .to_string()
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn get_from_env_js() -> Option<RuntimeConfig> {
    // Expect optional global object: window.__CAMPUSBOARD_ENV = { restrict_credentials: true, ... }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__CAMPUSBOARD_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let raw = js_sys::JSON::stringify(&any).ok()?.as_string()?;
    match serde_json::from_str::<RuntimeConfig>(&raw) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("ignoring malformed __CAMPUSBOARD_ENV: {}", err);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_from_env_js() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    match resp.json::<RuntimeConfig>().await {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("ignoring malformed config.json: {}", err);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn cache_config(cfg: RuntimeConfig) -> RuntimeConfig {
    let _ = RUNTIME_CONFIG.set(cfg);
    current()
}

/// Resolved configuration, or defaults when `init` has not finished.
pub fn current() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

pub async fn await_runtime_config() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    if let Some(existing) = get_from_env_js() {
        return cache_config(existing);
    }
    if let Some(cfg) = fetch_runtime_config().await {
        return cache_config(cfg);
    }
    log::info!("no runtime config found, using defaults");
    cache_config(RuntimeConfig::default())
}

pub async fn init() {
    let _ = await_runtime_config().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_missing() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.credential_mode(), CredentialMode::Unrestricted);
        assert_eq!(cfg.login_latency_ms(), DEFAULT_LOGIN_LATENCY_MS);
        assert_eq!(cfg.revalidate_interval_ms(), 60_000);
        assert_eq!(cfg.email_domain(), "campus.edu");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str(
            r#"{"restrict_credentials":true,"login_latency_ms":0,"revalidate_interval_secs":5,"email_domain":" uni.example "}"#,
        )
        .unwrap();
        assert_eq!(cfg.credential_mode(), CredentialMode::Restricted);
        assert_eq!(cfg.login_latency_ms(), 0);
        assert_eq!(cfg.revalidate_interval_ms(), 5_000);
        assert_eq!(cfg.email_domain(), "uni.example");
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let cfg = RuntimeConfig {
            revalidate_interval_secs: Some(0),
            email_domain: Some("  ".into()),
            ..RuntimeConfig::default()
        };
        assert_eq!(cfg.revalidate_interval_ms(), 60_000);
        assert_eq!(cfg.email_domain(), DEFAULT_EMAIL_DOMAIN);
    }
}

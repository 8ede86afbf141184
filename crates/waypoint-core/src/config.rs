use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Base address of the setup endpoint used for discovery.
pub const DEFAULT_BASE_URL: &str = "https://gamandroid.cyou/app.php";

/// Value of the `action` query parameter sent to the setup endpoint.
pub const DEFAULT_SETUP_ACTION: &str = "check_info";

/// Default store namespace. Key names inside it are this crate's own (`PrefKey`).
pub const DEFAULT_NAMESPACE: &str = "game_prefs";

/// HTTP timeouts (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/waypoint/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointConfig {
    /// Setup endpoint; discovery posts to `{base_url}?action={setup_action}`.
    pub base_url: String,
    pub setup_action: String,
    /// Namespace of the persisted key-value store.
    pub namespace: String,
    /// Client signature sent as `User-Agent` on every call. None = built-in default.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional timeouts; if missing, built-in defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            setup_action: DEFAULT_SETUP_ACTION.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            user_agent: None,
            http: None,
        }
    }
}

impl WaypointConfig {
    /// The user agent string, resolved once at startup and reused for all calls.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(default_user_agent)
    }

    pub fn http(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }
}

pub fn default_user_agent() -> String {
    format!("waypoint/{}", env!("CARGO_PKG_VERSION"))
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("waypoint")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WaypointConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WaypointConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: WaypointConfig = toml::from_str(&data)?;
    Ok(cfg)
}

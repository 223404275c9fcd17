use camino::Utf8PathBuf;

use crate::error::ConfigError;

/// Default shared secret for the admin expander. Deployments should
/// override this from their config file.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Public Nominatim instance. Swap this out for a self-hosted mirror (or a
/// stub in tests) via the config file.
pub const DEFAULT_GEOCODER_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// App-level settings, passed explicitly into the handlers that need them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Where the database file lives.
    pub data_dir: Utf8PathBuf,

    /// Where uploaded dish images are written.
    pub image_dir: Utf8PathBuf,

    /// Plaintext shared secret gating the recipe-of-the-day action.
    pub admin_password: String,

    /// Base URL of the Nominatim-style geocoding service.
    pub geocoder_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from("data"),
            image_dir: Utf8PathBuf::from("data/images"),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            geocoder_endpoint: DEFAULT_GEOCODER_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Attempts to read a `Config` from disk.
    pub async fn from_disk(path: &camino::Utf8Path) -> Result<Self, ConfigError> {
        // read the config from disk
        let s = tokio::fs::read_to_string(path)
            .await
            .map_err(ConfigError::ReadFailed)?;

        // parse with `toml` crate
        let conf: Self = toml::from_str(s.as_str()).map_err(ConfigError::ParseFailed)?;
        Ok(conf)
    }

    /// Reads a `Config` from disk, falling back to defaults when the file
    /// isn't there yet (first run).
    pub async fn from_disk_or_default(path: &camino::Utf8Path) -> Self {
        match Self::from_disk(path).await {
            Ok(conf) => conf,
            Err(e) => {
                tracing::debug!("No usable config at `{path}`, using defaults. err: {e}");
                Self::default()
            }
        }
    }
}

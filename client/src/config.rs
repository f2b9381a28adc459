use {
    anyhow::{Context as _, Result},
    serde::{Deserialize, Serialize},
    std::{
        path::{Path, PathBuf},
        time::Duration,
    },
    url::Url,
};

pub const CONFIG_FILE_NAME: &str = "sealpost.json5";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Upload endpoint.
    #[serde(default = "default_server_url")]
    pub server_url: Url,
    /// Connection timeout. The whole upload may additionally take 1 µs per byte.
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    #[serde(default = "default_encryption_timeout", with = "humantime_serde")]
    pub encryption_timeout: Duration,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout: default_request_timeout(),
            encryption_timeout: default_encryption_timeout(),
            log_file: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Loads the config from `path`, or from the default location if `path` is `None`.
    ///
    /// A missing file at the default location yields the default config.
    #[inline]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = if let Some(path) = path {
            path.to_owned()
        } else {
            let Some(config_dir) = dirs::config_dir() else {
                return Ok(Self::default());
            };
            let path = config_dir.join(CONFIG_FILE_NAME);
            if !path.try_exists()? {
                return Ok(Self::default());
            }
            path
        };
        Self::parse(&fs_err::read_to_string(&path)?)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    #[inline]
    pub fn parse(text: &str) -> Result<Self> {
        Ok(json5::from_str(text)?)
    }
}

#[expect(clippy::expect_used, reason = "constant url")]
fn default_server_url() -> Url {
    Url::parse("http://localhost:4000/").expect("valid default url")
}

fn default_request_timeout() -> Duration {
    sealpost_sdk::client::DEFAULT_TIMEOUT
}

fn default_encryption_timeout() -> Duration {
    sealpost_sdk::orchestrator::DEFAULT_ENCRYPTION_TIMEOUT
}

fn default_log_filter() -> String {
    "info".into()
}

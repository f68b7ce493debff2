use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_PATH: &str = "data/1926-2024_COMBINED_NFL_SCORES.csv";
pub const DEFAULT_POLL_SECS: u64 = 60;

/// Where the historical games CSV comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    Url { url: String, token: Option<String> },
}

impl DataSource {
    pub fn parse(raw: &str, token: Option<String>) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url {
                url: raw.to_owned(),
                token: token.filter(|t| !t.trim().is_empty()),
            }
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Url { url, .. } => url.clone(),
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::File(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub data_source: DataSource,
    pub poll_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            data_source: DataSource::default(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
        }
    }
}

impl AppSettings {
    /// Settings from `NFLTUI_*` environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_source = var("NFLTUI_DATA")
            .map(|raw| DataSource::parse(&raw, var("NFLTUI_DATA_TOKEN")))
            .unwrap_or_default();
        let poll_interval = var("NFLTUI_POLL_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(Duration::from_secs(DEFAULT_POLL_SECS), Duration::from_secs);
        let log_level = var("NFLTUI_LOG").and_then(|raw| raw.trim().parse::<LevelFilter>().ok());

        Self { full_screen: false, log_level, data_source, poll_interval }
    }

    /// `--data` on the command line wins over the environment.
    pub fn override_data(&mut self, raw: &str) {
        let token = match &self.data_source {
            DataSource::Url { token, .. } => token.clone(),
            DataSource::File(_) => std::env::var("NFLTUI_DATA_TOKEN").ok(),
        };
        self.data_source = DataSource::parse(raw, token);
    }
}

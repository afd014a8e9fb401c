use std::env;
use std::path::PathBuf;

/// Dataset used when `ZIP_DATASET` is unset
pub const DEFAULT_DATASET: &str = "USZip2016.csv";
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            dataset: lookup("ZIP_DATASET")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET)),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

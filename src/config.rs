//! Configuration management for the Syllabus Extractor

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::document::CacheConfig;
use crate::syllabus::{EndWindow, SearchConfig, StartWindow, TocEntry};

/// Published location of the computing programmes syllabus
pub const DEFAULT_SYLLABUS_URL: &str =
    "https://webstor.srmist.edu.in/web_assets/downloads/2023/computing-programmes-syllabus-2021.pdf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read manual entries from {path}: {source}")]
    ManualEntriesIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manual entries file {path}: {source}")]
    ManualEntriesParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub search: SearchConfig,
    pub artifacts: ArtifactConfig,
    pub cache: CacheConfig,
    /// Directory holding `index.html` and other static assets
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the syllabus PDF comes from
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Remote URL; also the cache key
    pub url: String,
    /// Local copy, preferred when it exists
    pub local_path: PathBuf,
    /// Download timeout
    pub timeout_secs: u64,
}

/// Output PDF settings
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    /// Outputs smaller than this are treated as broken
    pub min_bytes: u64,
    /// Age after which outputs are deleted; 0 keeps them forever
    pub ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            source: SourceConfig {
                url: DEFAULT_SYLLABUS_URL.to_string(),
                local_path: PathBuf::from("main pdf/computing-programmes-syllabus-2021.pdf"),
                timeout_secs: 30,
            },
            search: SearchConfig::default(),
            artifacts: ArtifactConfig {
                dir: env::temp_dir(),
                min_bytes: 1000,
                ttl_secs: 3600,
            },
            cache: CacheConfig::default(),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Read and parse an env var, keeping `default` when it is unset or malformed
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let manual_entries = match env::var("MANUAL_ENTRIES_PATH") {
            Ok(path) => load_manual_entries(PathBuf::from(path))?,
            Err(_) => defaults.search.manual_entries.clone(),
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env_or("SERVER_PORT", defaults.server.port),
            },
            source: SourceConfig {
                url: env::var("SYLLABUS_URL").unwrap_or(defaults.source.url),
                local_path: env::var("SYLLABUS_LOCAL_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.source.local_path),
                timeout_secs: env_or("FETCH_TIMEOUT_SECS", defaults.source.timeout_secs),
            },
            search: SearchConfig {
                threshold: env_or("SEARCH_THRESHOLD", defaults.search.threshold),
                toc_scan_pages: env_or("TOC_SCAN_PAGES", defaults.search.toc_scan_pages),
                start_window: StartWindow {
                    before: env_or("START_WINDOW_BEFORE", defaults.search.start_window.before),
                    after: env_or("START_WINDOW_AFTER", defaults.search.start_window.after),
                },
                end_window: EndWindow {
                    scan: env_or("END_WINDOW", defaults.search.end_window.scan),
                    default_span: env_or("DEFAULT_SPAN", defaults.search.end_window.default_span),
                },
                manual_entries,
            },
            artifacts: ArtifactConfig {
                dir: env::var("ARTIFACT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.artifacts.dir),
                min_bytes: env_or("MIN_ARTIFACT_BYTES", defaults.artifacts.min_bytes),
                ttl_secs: env_or("ARTIFACT_TTL_SECS", defaults.artifacts.ttl_secs),
            },
            cache: CacheConfig {
                max_documents: env_or("DOCUMENT_CACHE_CAPACITY", defaults.cache.max_documents),
            },
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        })
    }
}

/// Load manually curated TOC entries from a JSON array
pub fn load_manual_entries(path: PathBuf) -> Result<Vec<TocEntry>, ConfigError> {
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::ManualEntriesIo {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::ManualEntriesParse { path, source })
}

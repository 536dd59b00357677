//! Gateway Configuration
//!
//! Command line flags (each also readable from the environment) are parsed once in
//! `main` and split into explicit config values handed to constructors. Nothing in the
//! library reads the environment on its own.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// JSON-RPC `search_objects` gateway in front of Elasticsearch
#[derive(Parser, Debug, Clone)]
#[command(name = "search-gateway")]
#[command(about = "JSON-RPC search gateway with public/private visibility filtering")]
pub struct Args {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:5000", env = "SEARCH_GATEWAY_LISTEN")]
    pub listen: SocketAddr,

    /// Elasticsearch base URL
    #[arg(long, default_value = "http://localhost:9200", env = "ELASTICSEARCH_URL")]
    pub elasticsearch_url: String,

    /// Prefix prepended to every logical index name (empty disables prefixing)
    #[arg(long, default_value = "search2", env = "INDEX_PREFIX")]
    pub index_prefix: String,

    /// Delimiter between the prefix and the logical index name
    #[arg(long, default_value = ".", env = "PREFIX_DELIMITER")]
    pub prefix_delimiter: String,

    /// Delimiter between an index name and its trailing version number
    #[arg(long, default_value = "_", env = "SUFFIX_DELIMITER")]
    pub suffix_delimiter: String,

    /// Timeout for a whole backend request, in milliseconds
    #[arg(long, default_value = "30000", env = "BACKEND_TIMEOUT_MS")]
    pub backend_timeout_ms: u64,

    /// Timeout for establishing a backend connection, in milliseconds
    #[arg(long, default_value = "5000", env = "CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: u64,
}

/// Index naming scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub index_prefix: String,
    pub prefix_delimiter: String,
    /// Separates a versioned index name from its version, e.g. `genome_2`.
    pub suffix_delimiter: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_prefix: "search2".to_string(),
            prefix_delimiter: ".".to_string(),
            suffix_delimiter: "_".to_string(),
        }
    }
}

/// Where and how to reach the search backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL without a trailing slash.
    pub url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl BackendConfig {
    pub fn new(url: &str, request_timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            url: url.trim().trim_end_matches('/').to_string(),
            request_timeout,
            connect_timeout,
        }
    }
}

impl Args {
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            index_prefix: self.index_prefix.trim().to_string(),
            prefix_delimiter: self.prefix_delimiter.clone(),
            suffix_delimiter: self.suffix_delimiter.clone(),
        }
    }

    pub fn backend_config(&self) -> anyhow::Result<BackendConfig> {
        if self.backend_timeout_ms == 0 {
            anyhow::bail!("--backend-timeout-ms must be greater than zero");
        }
        if self.connect_timeout_ms == 0 {
            anyhow::bail!("--connect-timeout-ms must be greater than zero");
        }
        if !self.elasticsearch_url.starts_with("http://")
            && !self.elasticsearch_url.starts_with("https://")
        {
            anyhow::bail!(
                "--elasticsearch-url must start with http:// or https://, got '{}'",
                self.elasticsearch_url
            );
        }

        Ok(BackendConfig::new(
            &self.elasticsearch_url,
            Duration::from_millis(self.backend_timeout_ms),
            Duration::from_millis(self.connect_timeout_ms),
        ))
    }
}

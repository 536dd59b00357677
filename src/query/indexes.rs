//! Index Resolver
//!
//! Maps caller-facing, case-insensitive index names onto backend-qualified names.
//! The public API never sees the prefixing scheme; only this resolver does.

use super::types::ResolvedIndexSet;
use crate::config::IndexConfig;
use crate::rpc::error::RpcError;
use regex::Regex;
use std::sync::LazyLock;

/// Characters the backend accepts in an index name, after lower-casing.
static INDEX_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_.\-]*$").expect("static index name pattern"));

#[derive(Debug, Clone)]
pub struct IndexResolver {
    /// Full prefix including the delimiter, e.g. `search2.`. Empty disables prefixing.
    prefix: String,
    suffix_delimiter: String,
}

impl IndexResolver {
    pub fn new(config: &IndexConfig) -> Self {
        let prefix = if config.index_prefix.is_empty() {
            String::new()
        } else {
            format!(
                "{}{}",
                config.index_prefix.to_lowercase(),
                config.prefix_delimiter.to_lowercase()
            )
        };
        Self {
            prefix,
            suffix_delimiter: config.suffix_delimiter.clone(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Lower-cases, prefixes and deduplicates `names`, keeping first-occurrence order.
    ///
    /// Names that already carry the prefix are left as they are, so resolving a resolved
    /// set again yields the same set.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<ResolvedIndexSet, RpcError> {
        if names.is_empty() {
            return Err(RpcError::InvalidIndexSet(
                "at least one index is required".to_string(),
            ));
        }

        let mut resolved: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let qualified = self.qualify(name.as_ref())?;
            if !resolved.contains(&qualified) {
                resolved.push(qualified);
            }
        }

        Ok(ResolvedIndexSet::new(resolved))
    }

    /// Strips the prefix from a backend-qualified name.
    pub fn logical_name<'a>(&self, qualified: &'a str) -> &'a str {
        qualified.strip_prefix(self.prefix.as_str()).unwrap_or(qualified)
    }

    /// Logical names for a comma-joined list of backend-qualified names.
    pub fn logical_names(&self, qualified: &str) -> String {
        qualified
            .split(',')
            .map(|name| self.logical_name(name.trim()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Splits a backend-qualified name into its logical name and version.
    ///
    /// `search2.genome_2` gives `("genome", 2)`. Names without a numeric suffix after the
    /// last delimiter are version 0.
    pub fn split_version(&self, qualified: &str) -> (String, u32) {
        let logical = self.logical_name(qualified);
        if self.suffix_delimiter.is_empty() {
            return (logical.to_string(), 0);
        }

        match logical.rsplit_once(self.suffix_delimiter.as_str()) {
            Some((name, version)) if !name.is_empty() => match version.parse::<u32>() {
                Ok(version) => (name.to_string(), version),
                Err(_) => (logical.to_string(), 0),
            },
            _ => (logical.to_string(), 0),
        }
    }

    fn qualify(&self, name: &str) -> Result<String, RpcError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(RpcError::InvalidIndexSet(
                "index names must not be empty".to_string(),
            ));
        }

        let qualified = if name.starts_with(&self.prefix) {
            name
        } else {
            format!("{}{}", self.prefix, name)
        };

        let logical = self.logical_name(&qualified);
        if !INDEX_NAME.is_match(logical) || !INDEX_NAME.is_match(&qualified) {
            return Err(RpcError::InvalidIndexSet(format!(
                "'{}' is not a valid index name",
                logical
            )));
        }

        Ok(qualified)
    }
}

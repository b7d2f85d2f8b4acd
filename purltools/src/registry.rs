//! Querying package registries for package metadata.
//!
//! Supports npm, PyPI, crates.io, and Packagist. Each registry has its own
//! module describing the endpoint and the shape of its response;
//! [`RegistryClient`] dispatches to them by [`PurlType`].

use std::{str::FromStr, time::Duration};

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    Error, Purl, PurlType,
    error::fatal,
    http::{DEFAULT_TIMEOUT, HttpClient, endpoint},
};

mod crates;
mod npm;
mod packagist;
mod pypi;

/// The kind of metadata to request from a registry.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MetadataKind {
    /// The latest released version.
    Latest,

    /// The URL of the source code repository.
    Repository,
}

/// Base URLs of the supported registries.
///
/// Defaults point at the public registries; override them to use a mirror.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct RegistryEndpoints {
    /// npm registry, e.g. `https://registry.npmjs.org`.
    #[builder(into, default = "https://registry.npmjs.org".to_string())]
    pub npm: String,

    /// PyPI JSON API, e.g. `https://pypi.org/pypi`.
    #[builder(into, default = "https://pypi.org/pypi".to_string())]
    pub pypi: String,

    /// crates.io API, e.g. `https://crates.io/api/v1`.
    #[builder(into, default = "https://crates.io/api/v1".to_string())]
    pub crates: String,

    /// Packagist metadata repository, e.g. `https://repo.packagist.org`.
    #[builder(into, default = "https://repo.packagist.org".to_string())]
    pub packagist: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RegistryEndpoints {
    /// Point every registry at the same base URL.
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self::builder()
            .npm(base.clone())
            .pypi(base.clone())
            .crates(base.clone())
            .packagist(base)
            .build()
    }
}

/// Fetches package metadata from registries.
#[derive(Clone, Debug)]
pub struct RegistryClient {
    http: HttpClient,
    endpoints: RegistryEndpoints,
}

impl RegistryClient {
    /// Create a client for the public registries with the default timeout.
    pub fn new() -> Result<Self, Error> {
        Self::with_endpoints(RegistryEndpoints::default(), DEFAULT_TIMEOUT)
    }

    /// Create a client for the given registries.
    pub fn with_endpoints(endpoints: RegistryEndpoints, timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            http: HttpClient::new(timeout)?,
            endpoints,
        })
    }

    /// The latest version of the named package.
    pub fn latest_version(
        &self,
        purl_type: &str,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<String, Error> {
        self.fetch(purl_type, namespace, name, MetadataKind::Latest)
    }

    /// The source repository URL of the named package.
    pub fn repository_url(
        &self,
        purl_type: &str,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<String, Error> {
        self.fetch(purl_type, namespace, name, MetadataKind::Repository)
    }

    /// Fetch the metadata named by `info` (`latest` or `repository`) for a purl.
    ///
    /// ```rust,no_run
    /// # use purltools::registry::RegistryClient;
    /// let client = RegistryClient::new().unwrap();
    /// let version = client.metadata("pkg:cargo/bitflags", "latest").unwrap();
    /// ```
    #[tracing::instrument(skip(self))]
    pub fn metadata(&self, purl: &str, info: &str) -> Result<String, Error> {
        let purl = Purl::parse(purl)?;
        tracing::debug!(?purl, "parsed purl");

        let kind = MetadataKind::from_str(info).map_err(|_| Error::InvalidInfo(info.to_string()))?;
        self.fetch(&purl.package_type().to_string(), purl.namespace(), purl.name(), kind)
    }

    #[tracing::instrument(skip(self))]
    fn fetch(
        &self,
        purl_type: &str,
        namespace: Option<&str>,
        name: &str,
        kind: MetadataKind,
    ) -> Result<String, Error> {
        let namespace = namespace.filter(|ns| !ns.is_empty());
        let value = match PurlType::from_str(purl_type) {
            Ok(PurlType::Npm) => npm::fetch(self, namespace, name, kind)?,
            Ok(PurlType::Pypi) => pypi::fetch(self, name, kind)?,
            Ok(PurlType::Cargo) => crates::fetch(self, name, kind)?,
            Ok(PurlType::Composer) => packagist::fetch(self, namespace, name, kind)?,
            _ => fatal!(Error::UnsupportedType(purl_type.to_string())),
        };

        value
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::MissingMetadata {
                package: package_name(namespace, name),
                field: match kind {
                    MetadataKind::Latest => "latest version",
                    MetadataKind::Repository => "repository url",
                },
            })
    }

    /// GET `base` with `segments` appended as encoded path segments.
    fn get<'a, T: for<'de> Deserialize<'de>>(
        &self,
        base: &str,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<T, Error> {
        let url = endpoint(base, segments)?;
        Ok(self.http.get_json(url, None)?)
    }
}

/// Joins namespace and name the way registries spell package names, e.g. `@scope/name`.
fn package_name(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(namespace) => format!("{namespace}/{name}"),
        None => name.to_string(),
    }
}

/// Strips the decorations registries put around git URLs,
/// e.g. `git+https://github.com/foo/bar.git` becomes `https://github.com/foo/bar`.
fn clean_git_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

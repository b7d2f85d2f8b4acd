//! Resolving GitHub tags to the commits they point at.
//!
//! A purl like `pkg:github/actions/checkout@v4` names a tag, which can move;
//! ClearlyDefined coordinates want the immutable commit hash instead.
//! [`GithubTagResolver`] asks the GitHub REST API for `refs/tags/<tag>`,
//! dereferences annotated tags, and retries once with a `v` prefix when the
//! tag is not found, since purls often carry `1.2.3` for a `v1.2.3` tag.

use std::time::Duration;

use bon::Builder;
use derive_more::Debug;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::http::{DEFAULT_TIMEOUT, HttpClient, HttpError, endpoint};

/// The public GitHub REST API.
pub const GITHUB_API: &str = "https://api.github.com";

/// Environment variables consulted, in order, by [`GithubConfig::from_env`].
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Prefix conventionally used for version tags.
const VERSION_TAG_PREFIX: &str = "v";

/// Resolves a tag in a repository to a commit.
///
/// Implemented by [`GithubTagResolver`]; callers converting purls accept any
/// implementation so that the network can be substituted.
pub trait TagResolver {
    /// Resolve `tag` in `owner/repo`.
    ///
    /// Returns [`TagResolution::Fallback`] with the original tag when the tag
    /// could not be found, and an error for any other failure.
    fn resolve_tag(&self, owner: &str, repo: &str, tag: &str)
    -> Result<TagResolution, ResolveError>;
}

impl<T: TagResolver + ?Sized> TagResolver for &T {
    fn resolve_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> Result<TagResolution, ResolveError> {
        (**self).resolve_tag(owner, repo, tag)
    }
}

/// The outcome of resolving a tag.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TagResolution {
    /// The tag was found; this is the SHA of the commit it points at.
    Resolved(String),

    /// Neither the tag nor its `v`-prefixed form exist; this is the original tag.
    Fallback(String),
}

impl TagResolution {
    /// Whether the tag was resolved to a commit.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The revision to use: the commit SHA, or the original tag on fallback.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Resolved(revision) | Self::Fallback(revision) => revision,
        }
    }

    /// Consume the resolution, returning the revision to use.
    pub fn into_revision(self) -> String {
        match self {
            Self::Resolved(revision) | Self::Fallback(revision) => revision,
        }
    }
}

/// Errors encountered while resolving a tag, other than the tag not existing.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveError {
    /// The GitHub API request failed.
    #[error("resolve tag '{tag}' in {owner}/{repo}: {source}")]
    Http {
        /// The repository owner.
        owner: String,

        /// The repository name.
        repo: String,

        /// The tag being resolved.
        tag: String,

        /// The failed request.
        source: HttpError,
    },

    /// The tag points at an object that is not a commit.
    #[error("tag '{tag}' in {owner}/{repo} points at a {kind} object, expected a commit")]
    UnexpectedObject {
        /// The repository owner.
        owner: String,

        /// The repository name.
        repo: String,

        /// The tag being resolved.
        tag: String,

        /// The type of the object the tag points at.
        kind: String,
    },
}

/// Configuration for [`GithubTagResolver`].
///
/// ```rust
/// # use purltools::github::GithubConfig;
/// let config = GithubConfig::builder().token("ghp_example").build();
/// assert_eq!(config.api_url, purltools::github::GITHUB_API);
/// ```
#[derive(Builder, Clone, Debug)]
pub struct GithubConfig {
    /// Base URL of the GitHub REST API.
    #[builder(into, default = GITHUB_API.to_string())]
    pub api_url: String,

    /// Token sent as a bearer credential; requests are anonymous without one.
    #[builder(into)]
    #[debug(skip)]
    pub token: Option<String>,

    /// Per-request timeout.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GithubConfig {
    /// Configuration for the public API, with a token from the first
    /// non-blank variable in [`TOKEN_ENV_VARS`].
    pub fn from_env() -> Self {
        let token = TOKEN_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|token| token.trim().to_string())
            .find(|token| !token.is_empty());
        if token.is_none() {
            debug!("no GitHub token configured, using anonymous requests");
        }
        Self::builder().maybe_token(token).build()
    }
}

/// Resolves tags through the GitHub REST API.
#[derive(Clone, Debug)]
pub struct GithubTagResolver {
    http: HttpClient,
    api_url: String,
    #[debug(skip)]
    token: Option<String>,
}

impl GithubTagResolver {
    /// Create a resolver from explicit configuration.
    pub fn new(config: GithubConfig) -> Result<Self, HttpError> {
        Ok(Self {
            http: HttpClient::new(config.timeout)?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    /// Create a resolver for the public API using [`GithubConfig::from_env`].
    pub fn from_env() -> Result<Self, HttpError> {
        Self::new(GithubConfig::from_env())
    }

    /// GET `repos/{owner}/{repo}/git/{path..}` from the API.
    fn get_git<'a, T: for<'de> Deserialize<'de>>(
        &self,
        owner: &'a str,
        repo: &'a str,
        path: impl IntoIterator<Item = &'a str>,
    ) -> Result<T, HttpError> {
        let prefix = ["repos", owner, repo, "git"];
        let url = endpoint(&self.api_url, prefix.into_iter().chain(path))?;
        self.http.get_json(url, self.token.as_deref())
    }

    /// Look up `refs/tags/<tag>` and return the commit it points at,
    /// or `None` if the reference does not exist.
    fn lookup(&self, owner: &str, repo: &str, tag: &str) -> Result<Option<String>, ResolveError> {
        let http_err = |source| ResolveError::Http {
            owner: owner.to_string(),
            repo: repo.to_string(),
            tag: tag.to_string(),
            source,
        };

        // Nested tags such as `release/1.0` keep their slashes as path separators.
        let path = ["ref", "tags"].into_iter().chain(tag.split('/'));
        let reference: GitRef = match self.get_git(owner, repo, path) {
            Ok(reference) => reference,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(http_err(err)),
        };

        let object = match reference.object.kind.as_str() {
            "commit" => reference.object,
            "tag" => {
                // Annotated tags point at a tag object, which points at the commit.
                let path = ["tags", reference.object.sha.as_str()];
                self.get_git::<GitTag>(owner, repo, path)
                    .map_err(http_err)?
                    .object
            }
            _ => reference.object,
        };

        if object.kind != "commit" {
            return Err(ResolveError::UnexpectedObject {
                owner: owner.to_string(),
                repo: repo.to_string(),
                tag: tag.to_string(),
                kind: object.kind,
            });
        }
        Ok(Some(object.sha))
    }
}

impl TagResolver for GithubTagResolver {
    #[tracing::instrument(skip(self))]
    fn resolve_tag(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
    ) -> Result<TagResolution, ResolveError> {
        if let Some(sha) = self.lookup(owner, repo, tag)? {
            return Ok(TagResolution::Resolved(sha));
        }

        let prefixed = format!("{VERSION_TAG_PREFIX}{tag}");
        debug!(%prefixed, "tag not found, retrying with version prefix");
        if let Some(sha) = self.lookup(owner, repo, &prefixed)? {
            return Ok(TagResolution::Resolved(sha));
        }

        warn!(
            owner,
            repo, tag, "tag not found with or without version prefix, using the tag as revision"
        );
        Ok(TagResolution::Fallback(tag.to_string()))
    }
}

/// A git reference as returned by `GET /repos/{owner}/{repo}/git/ref/{ref}`.
#[derive(Deserialize, Debug)]
struct GitRef {
    object: GitObject,
}

/// An annotated tag as returned by `GET /repos/{owner}/{repo}/git/tags/{sha}`.
#[derive(Deserialize, Debug)]
struct GitTag {
    object: GitObject,
}

#[derive(Deserialize, Debug)]
struct GitObject {
    #[serde(rename = "type")]
    kind: String,
    sha: String,
}

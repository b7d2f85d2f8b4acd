//! Logic for converting Package URLs (PURLs) to ClearlyDefined [`Coordinate`]s.
//!
//! See the [ClearlyDefined coordinates documentation](https://docs.clearlydefined.io/docs/resources/glossary#coordinates).
//!
//! Each supported [`PurlType`] has its own rule module; dispatch is an
//! exhaustive match in [`Purl::try_into_coordinate`], so adding a type to
//! [`PurlType`] forces a rule to be written for it.

use std::str::FromStr;

use bon::Builder;
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Purl, PurlType, github::TagResolver};

mod cargo;
mod cocoapods;
mod composer;
mod conda;
mod deb;
mod gem;
mod github;
mod npm;
mod pypi;

/// Placeholder rendered in the namespace slot when a coordinate has no namespace.
pub const NO_NAMESPACE: &str = "-";

/// The `type` segment of a ClearlyDefined coordinate.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[non_exhaustive]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CoordinateType {
    /// CocoaPods pods.
    Pod,

    /// Rust crates.
    Crate,

    /// PHP Composer packages.
    Composer,

    /// Conda packages.
    Conda,

    /// Debian binary packages.
    Deb,

    /// Debian source packages.
    #[serde(rename = "debsrc")]
    #[strum(serialize = "debsrc")]
    DebSrc,

    /// Ruby gems.
    Gem,

    /// Git repositories.
    Git,

    /// Python packages.
    Pypi,

    /// npm packages.
    Npm,
}

/// A ClearlyDefined coordinate, e.g. `crate/cratesio/-/bitflags/1.0.4`.
///
/// Coordinates always render as five `/`-separated segments:
/// ```ignore
/// {type}/{provider}/{namespace}/{name}/{revision}
/// ```
/// where `namespace` is [`NO_NAMESPACE`] (`-`) when absent.
/// The rendered form is suitable for use as a path in the ClearlyDefined API.
///
/// ```rust
/// # use purltools::{Coordinate, CoordinateType};
/// # use non_empty_string::NonEmptyString;
/// let coordinate = Coordinate::builder()
///     .kind(CoordinateType::Crate)
///     .provider("cratesio")
///     .name("bitflags")
///     .revision(NonEmptyString::new("1.0.4".to_string()).unwrap())
///     .build();
/// assert_eq!(coordinate.to_string(), "crate/cratesio/-/bitflags/1.0.4");
/// ```
#[derive(Builder, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, derive_more::Display)]
#[display(
    "{kind}/{provider}/{}/{name}/{revision}",
    namespace.as_deref().unwrap_or(NO_NAMESPACE)
)]
pub struct Coordinate {
    /// The coordinate type.
    pub kind: CoordinateType,

    /// The provider of the package, e.g. `npmjs` or `anaconda-main`.
    #[builder(into)]
    pub provider: String,

    /// The namespace of the package, if it has one.
    #[builder(into)]
    pub namespace: Option<String>,

    /// The name of the package.
    #[builder(into)]
    pub name: String,

    /// The revision of the package: a version or a commit hash.
    pub revision: NonEmptyString,
}

impl Coordinate {
    /// Parse a coordinate from its rendered form.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        let input = input.as_ref();
        let invalid = || Error::InvalidCoordinate(input.to_string());

        let segments = input.trim().splitn(5, '/').collect::<Vec<_>>();
        let [kind, provider, namespace, name, revision] = segments.as_slice() else {
            return Err(invalid());
        };
        if [provider, namespace, name].iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }

        Ok(Self {
            kind: CoordinateType::from_str(kind).map_err(|_| invalid())?,
            provider: provider.to_string(),
            namespace: (*namespace != NO_NAMESPACE).then(|| namespace.to_string()),
            name: name.to_string(),
            revision: NonEmptyString::new(revision.to_string()).map_err(|_| invalid())?,
        })
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Coordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        Self::parse(&input).map_err(serde::de::Error::custom)
    }
}

impl Purl {
    /// Converts this purl into a ClearlyDefined [`Coordinate`].
    ///
    /// GitHub purls whose version is not a commit hash are resolved through
    /// `resolver`; no other type touches the network.
    ///
    /// This is a fallible operation, see the [`Error`] enum for possible errors.
    /// In particular every rule requires a non-empty version.
    pub fn try_into_coordinate(&self, resolver: &impl TagResolver) -> Result<Coordinate, Error> {
        let purl_type = self.purl_type()?;
        let version = self.required_version()?;

        match purl_type {
            PurlType::Cocoapods => cocoapods::purl_to_coordinate(self, version),
            PurlType::Cargo => cargo::purl_to_coordinate(self, version),
            PurlType::Composer => composer::purl_to_coordinate(self, version),
            PurlType::Conda => conda::purl_to_coordinate(self, version),
            PurlType::Deb => deb::purl_to_coordinate(self, version),
            PurlType::Gem => gem::purl_to_coordinate(self, version),
            PurlType::Github => github::purl_to_coordinate(self, version, resolver),
            PurlType::Pypi => pypi::purl_to_coordinate(self, version),
            PurlType::Npm => npm::purl_to_coordinate(self, version),
        }
    }
}

/// Convert a purl string into a rendered ClearlyDefined coordinate.
///
/// ```rust,no_run
/// # use purltools::github::GithubTagResolver;
/// let resolver = GithubTagResolver::from_env().unwrap();
/// let coordinate = purltools::purl2clearlydefined("pkg:cargo/bitflags@1.0.4", &resolver).unwrap();
/// assert_eq!(coordinate, "crate/cratesio/-/bitflags/1.0.4");
/// ```
#[tracing::instrument(skip(resolver))]
pub fn purl2clearlydefined(purl: &str, resolver: &impl TagResolver) -> Result<String, Error> {
    let purl = Purl::parse(purl)?;
    tracing::debug!(?purl, "parsed purl");
    purl.try_into_coordinate(resolver).map(|c| c.to_string())
}

/// Build the revision segment of a coordinate from a version string.
///
/// Rules only call this with versions checked by [`Purl::required_version`]
/// or strings derived from them, so an empty value means a rule is broken.
fn revision(purl: &Purl, value: impl Into<String>) -> Result<NonEmptyString, Error> {
    NonEmptyString::new(value.into()).map_err(|_| Error::MissingVersion {
        purl: purl.to_string(),
    })
}

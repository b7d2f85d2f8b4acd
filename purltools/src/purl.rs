//! Parsing Package URLs (PURLs) and reading the parts the converters rely on.
//!
//! See the [Package URL specification](https://github.com/package-url/purl-spec).
//!
//! Exposes the [`Purl`] struct, which is a thin wrapper around [`purl::GenericPurl`],
//! and [`PurlType`], the closed set of package types this crate knows how to map.

use std::str::FromStr;

use derive_more::{Deref, DerefMut, From};
use purl::GenericPurl;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::Error;

/// A Package URL (PURL).
///
/// A package URL is a standardized way to identify and locate software packages.
/// Read more about PURLs in the [spec](https://github.com/package-url/purl-spec).
///
/// This struct is a thin wrapper around [`purl::GenericPurl`], which is an
/// external crate implementation of the PURL spec. Namespace, name, version,
/// and qualifier values are percent-decoded by the parser, so
/// `pkg:npm/%40vitest/utils@3.0.5` and `pkg:npm/@vitest/utils@3.0.5`
/// expose the same namespace (`@vitest`).
///
/// ```rust
/// # use purltools::{Purl, PurlType};
/// let purl = Purl::parse("pkg:cargo/bitflags@1.0.4").unwrap();
/// assert_eq!(purl.purl_type().unwrap(), PurlType::Cargo);
/// assert_eq!(purl.name(), "bitflags");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deref, DerefMut, From)]
pub struct Purl(GenericPurl<String>);

impl FromStr for Purl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Purl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Purl {
    /// Parse a purl from a string.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, Error> {
        let input = input.as_ref();
        GenericPurl::from_str(input.trim())
            .map(Purl)
            .map_err(|error| Error::Parse {
                input: input.to_string(),
                error,
            })
    }

    /// Determines the supported [`PurlType`] for this purl.
    ///
    /// Types outside of the supported set report [`Error::UnsupportedType`].
    pub fn purl_type(&self) -> Result<PurlType, Error> {
        let package_type = self.package_type().to_string();
        PurlType::from_str(&package_type).map_err(|_| Error::UnsupportedType(package_type))
    }

    /// The version of the purl, which must be present and non-empty.
    pub fn required_version(&self) -> Result<&str, Error> {
        match self.version() {
            Some(version) if !version.is_empty() => Ok(version),
            _ => Err(Error::MissingVersion {
                purl: self.to_string(),
            }),
        }
    }

    /// The value of the named qualifier, if it is present and non-empty.
    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers().get(key).filter(|value| !value.is_empty())
    }

    /// The value of the named qualifier, which the rule for `purl_type` requires.
    pub fn required_qualifier(
        &self,
        purl_type: PurlType,
        qualifier: &'static str,
    ) -> Result<&str, Error> {
        self.qualifier(qualifier)
            .ok_or_else(|| Error::MissingQualifier {
                purl_type,
                purl: self.to_string(),
                qualifier,
            })
    }

    /// The namespace of the purl, which the rule for `purl_type` requires.
    ///
    /// `meaning` describes what the namespace represents in that ecosystem
    /// and is reported in the error.
    pub fn required_namespace(
        &self,
        purl_type: PurlType,
        meaning: &'static str,
    ) -> Result<&str, Error> {
        self.namespace()
            .filter(|namespace| !namespace.is_empty())
            .ok_or_else(|| Error::MissingNamespace {
                purl_type,
                purl: self.to_string(),
                meaning,
            })
    }
}

/// Identifies the purl package types supported by this crate.
///
/// Each variant renders and parses as its purl type string,
/// e.g. [`PurlType::Cocoapods`] is `cocoapods`.
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
pub enum PurlType {
    /// CocoaPods pods.
    Cocoapods,

    /// Rust crates from crates.io.
    Cargo,

    /// PHP packages from Packagist.
    Composer,

    /// Conda packages from Anaconda channels.
    Conda,

    /// Debian binary and source packages.
    Deb,

    /// Ruby gems from RubyGems.
    Gem,

    /// Repositories hosted on GitHub.
    Github,

    /// Python packages from PyPI.
    Pypi,

    /// JavaScript packages from the npm registry.
    Npm,
}

use miette::Diagnostic;
use thiserror::Error;

use crate::{PurlType, github::ResolveError, http::HttpError};

/// Records all errors reported by this library.
#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input could not be parsed as a Package URL.
    #[error("parse purl '{input}': {error}")]
    #[diagnostic(code(purltools::parse))]
    Parse {
        /// The input originally provided.
        input: String,

        /// The error reported by the purl parser.
        #[source]
        error: purl::ParseError,
    },

    /// The purl has no version (or an empty one), which every coordinate requires.
    #[error("purl '{purl}' has no version, which is required to build a coordinate")]
    #[diagnostic(
        code(purltools::missing_version),
        help("add a version, for example 'pkg:cargo/bitflags@1.0.4'")
    )]
    MissingVersion {
        /// The purl that was missing a version.
        purl: String,
    },

    /// A qualifier required by the ecosystem rule is absent or empty.
    #[error("{purl_type} purl '{purl}' is missing required qualifier '{qualifier}'")]
    #[diagnostic(code(purltools::missing_qualifier))]
    MissingQualifier {
        /// The ecosystem whose rule needed the qualifier.
        purl_type: PurlType,

        /// The purl that was missing the qualifier.
        purl: String,

        /// The name of the missing qualifier.
        qualifier: &'static str,
    },

    /// A namespace required by the ecosystem rule is absent.
    #[error("{purl_type} purl '{purl}' requires a namespace ({meaning})")]
    #[diagnostic(code(purltools::missing_namespace))]
    MissingNamespace {
        /// The ecosystem whose rule needed the namespace.
        purl_type: PurlType,

        /// The purl that was missing the namespace.
        purl: String,

        /// What the namespace means for this ecosystem.
        meaning: &'static str,
    },

    /// The purl type is not supported by the requested operation.
    #[error("unsupported purl type: {0}")]
    #[diagnostic(code(purltools::unsupported_type))]
    UnsupportedType(String),

    /// Resolving a GitHub tag failed for a reason other than "not found".
    #[error(transparent)]
    #[diagnostic(code(purltools::resolve))]
    Resolve(#[from] ResolveError),

    /// A registry request failed.
    #[error(transparent)]
    #[diagnostic(code(purltools::http))]
    Http(#[from] HttpError),

    /// The requested kind of registry metadata is not known.
    #[error("invalid info type '{0}'")]
    #[diagnostic(
        code(purltools::invalid_info),
        help("supported info types are 'latest' and 'repository'")
    )]
    InvalidInfo(String),

    /// The registry answered, but the response did not contain the requested field.
    #[error("registry response for '{package}' has no {field}")]
    #[diagnostic(code(purltools::missing_metadata))]
    MissingMetadata {
        /// The package that was queried.
        package: String,

        /// The field that was absent or empty.
        field: &'static str,
    },

    /// The URL does not match any known package URL shape.
    #[error("no purl mapping for url '{0}'")]
    #[diagnostic(code(purltools::unsupported_url))]
    UnsupportedUrl(String),

    /// The purl lacks a part needed to build its URL.
    #[error("no url for purl '{purl}': {reason}")]
    #[diagnostic(code(purltools::no_url))]
    NoUrl {
        /// The purl being converted.
        purl: String,

        /// Why no URL could be built.
        reason: &'static str,
    },

    /// The input is not a well formed ClearlyDefined coordinate.
    #[error("input '{0}' is not a coordinate of the form type/provider/namespace/name/revision")]
    #[diagnostic(code(purltools::invalid_coordinate))]
    InvalidCoordinate(String),
}

/// Shorthand for conversion into [`Error`] and returning.
macro_rules! fatal {
    ($err:expr) => {
        return Err($crate::error::Error::from($err))
    };
}
pub(crate) use fatal;

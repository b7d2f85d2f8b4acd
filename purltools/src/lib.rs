#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod coordinate;
mod error;
pub mod github;
pub mod http;
mod purl;
pub mod registry;
pub mod url;

pub use coordinate::{Coordinate, CoordinateType, NO_NAMESPACE, purl2clearlydefined};
pub use error::*;
pub use github::{GithubConfig, GithubTagResolver, TagResolution, TagResolver};
pub use purl::{Purl, PurlType};
pub use registry::{MetadataKind, RegistryClient, RegistryEndpoints};
pub use url::{purl2url, url2purl};

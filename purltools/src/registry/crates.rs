use serde::Deserialize;

use super::{MetadataKind, RegistryClient};
use crate::Error;

/// Response of `GET {crates}/crates/{name}`.
#[derive(Deserialize, Debug)]
struct Response {
    #[serde(rename = "crate")]
    krate: Crate,
}

#[derive(Deserialize, Debug)]
struct Crate {
    default_version: Option<String>,
    repository: Option<String>,
}

pub fn fetch(
    client: &RegistryClient,
    name: &str,
    kind: MetadataKind,
) -> Result<Option<String>, Error> {
    // e.g. https://crates.io/api/v1/crates/bitflags
    let Response { krate } = client.get(&client.endpoints.crates, ["crates", name])?;

    Ok(match kind {
        MetadataKind::Latest => krate.default_version,
        MetadataKind::Repository => krate.repository,
    })
}

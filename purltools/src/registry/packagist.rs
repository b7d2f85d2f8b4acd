use std::collections::HashMap;

use serde::Deserialize;

use super::{MetadataKind, RegistryClient, clean_git_url, package_name};
use crate::Error;

/// Response of `GET {packagist}/p2/{vendor}/{name}.json`.
///
/// Releases are listed newest first.
#[derive(Deserialize, Debug)]
struct Response {
    #[serde(default)]
    packages: HashMap<String, Vec<Release>>,
}

#[derive(Deserialize, Debug)]
struct Release {
    version: Option<String>,
    source: Option<Source>,
}

#[derive(Deserialize, Debug)]
struct Source {
    url: Option<String>,
}

pub fn fetch(
    client: &RegistryClient,
    vendor: Option<&str>,
    name: &str,
    kind: MetadataKind,
) -> Result<Option<String>, Error> {
    // e.g. https://repo.packagist.org/p2/symfony/polyfill-mbstring.json
    let package = package_name(vendor, name);
    let file = format!("{name}.json");
    let segments = ["p2"].into_iter().chain(vendor).chain([file.as_str()]);
    let Response { mut packages } = client.get(&client.endpoints.packagist, segments)?;

    let Some(latest) = packages
        .remove(&package)
        .and_then(|releases| releases.into_iter().next())
    else {
        return Ok(None);
    };

    Ok(match kind {
        MetadataKind::Latest => latest.version,
        MetadataKind::Repository => latest
            .source
            .and_then(|source| source.url)
            .map(|url| clean_git_url(&url)),
    })
}

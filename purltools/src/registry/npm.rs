use serde::Deserialize;

use super::{MetadataKind, RegistryClient, clean_git_url};
use crate::Error;

/// Response of `GET {registry}/{package}/latest`.
#[derive(Deserialize, Debug)]
struct Manifest {
    version: Option<String>,
    repository: Option<Repository>,
}

/// npm accepts both the shorthand string and the `{ type, url }` object.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Repository {
    Url(String),
    Object { url: Option<String> },
}

pub fn fetch(
    client: &RegistryClient,
    scope: Option<&str>,
    name: &str,
    kind: MetadataKind,
) -> Result<Option<String>, Error> {
    // e.g. https://registry.npmjs.org/@db-ui/v-elements/latest
    let segments = scope.into_iter().chain([name, "latest"]);
    let manifest = client.get::<Manifest>(&client.endpoints.npm, segments)?;

    Ok(match kind {
        MetadataKind::Latest => manifest.version,
        MetadataKind::Repository => match manifest.repository {
            Some(Repository::Url(url)) | Some(Repository::Object { url: Some(url) }) => {
                Some(clean_git_url(&url))
            }
            _ => None,
        },
    })
}

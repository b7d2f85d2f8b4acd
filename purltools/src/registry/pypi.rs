use std::collections::HashMap;

use serde::Deserialize;

use super::{MetadataKind, RegistryClient};
use crate::Error;

/// Project URL labels that point at the source, in order of preference.
const SOURCE_LABELS: [&str; 2] = ["Code", "Source"];

/// Response of `GET {pypi}/{name}/json`.
#[derive(Deserialize, Debug)]
struct Project {
    info: Info,
}

#[derive(Deserialize, Debug)]
struct Info {
    version: Option<String>,
    project_urls: Option<HashMap<String, String>>,
}

pub fn fetch(
    client: &RegistryClient,
    name: &str,
    kind: MetadataKind,
) -> Result<Option<String>, Error> {
    // e.g. https://pypi.org/pypi/charset-normalizer/json
    let Project { info } = client.get(&client.endpoints.pypi, [name, "json"])?;

    Ok(match kind {
        MetadataKind::Latest => info.version,
        MetadataKind::Repository => {
            let urls = info.project_urls.unwrap_or_default();
            SOURCE_LABELS
                .iter()
                .filter_map(|label| urls.get(*label))
                .find(|url| !url.is_empty())
                .cloned()
        }
    })
}

use lazy_regex::regex_is_match;
use tracing::debug;

use crate::{
    Coordinate, CoordinateType, Error, Purl, PurlType,
    github::{TagResolution, TagResolver},
};

pub fn purl_to_coordinate(
    purl: &Purl,
    version: &str,
    resolver: &impl TagResolver,
) -> Result<Coordinate, Error> {
    let owner = purl.required_namespace(PurlType::Github, "repository owner")?;
    let repo = purl.name();

    let revision = if is_commit_hash(version) {
        version.to_string()
    } else {
        match resolver.resolve_tag(owner, repo, version)? {
            TagResolution::Resolved(sha) => sha,
            TagResolution::Fallback(tag) => {
                debug!(%purl, %tag, "coordinate uses the unresolved tag");
                tag
            }
        }
    };

    Ok(Coordinate::builder()
        .kind(CoordinateType::Git)
        .provider("github")
        .namespace(owner)
        .name(repo)
        .revision(super::revision(purl, revision)?)
        .build())
}

/// Whether `version` is a full 40 character commit SHA.
fn is_commit_hash(version: &str) -> bool {
    regex_is_match!("^[0-9a-fA-F]{40}$", version)
}

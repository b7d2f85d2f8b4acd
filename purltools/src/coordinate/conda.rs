use crate::{Coordinate, CoordinateType, Error, Purl, PurlType};

/// Channel assumed when the purl does not name one.
const DEFAULT_CHANNEL: &str = "main";

pub fn purl_to_coordinate(purl: &Purl, version: &str) -> Result<Coordinate, Error> {
    // The channel selects the provider, e.g. `anaconda-main` or `anaconda-r`,
    // and the platform subdirectory takes the namespace slot.
    let channel = purl.qualifier("channel").unwrap_or(DEFAULT_CHANNEL);
    let subdir = purl.required_qualifier(PurlType::Conda, "subdir")?;
    let build = purl.required_qualifier(PurlType::Conda, "build")?;

    Ok(Coordinate::builder()
        .kind(CoordinateType::Conda)
        .provider(format!("anaconda-{channel}"))
        .namespace(subdir)
        .name(purl.name())
        .revision(super::revision(purl, format!("{version}-{build}"))?)
        .build())
}

use crate::{Coordinate, CoordinateType, Error, Purl, PurlType};

pub fn purl_to_coordinate(purl: &Purl, version: &str) -> Result<Coordinate, Error> {
    let vendor = purl.required_namespace(PurlType::Composer, "vendor name")?;

    Ok(Coordinate::builder()
        .kind(CoordinateType::Composer)
        .provider("packagist")
        .namespace(vendor)
        .name(purl.name())
        .revision(super::revision(purl, version)?)
        .build())
}

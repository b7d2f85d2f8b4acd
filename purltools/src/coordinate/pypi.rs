use crate::{Coordinate, CoordinateType, Error, Purl};

pub fn purl_to_coordinate(purl: &Purl, version: &str) -> Result<Coordinate, Error> {
    Ok(Coordinate::builder()
        .kind(CoordinateType::Pypi)
        .provider("pypi")
        .name(purl.name())
        .revision(super::revision(purl, version)?)
        .build())
}

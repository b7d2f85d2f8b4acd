use crate::{Coordinate, CoordinateType, Error, Purl};

pub fn purl_to_coordinate(purl: &Purl, version: &str) -> Result<Coordinate, Error> {
    // Scopes arrive percent-decoded from the parser, so `%40vitest` is already `@vitest`.
    let scope = purl.namespace().filter(|scope| !scope.is_empty());

    Ok(Coordinate::builder()
        .kind(CoordinateType::Npm)
        .provider("npmjs")
        .maybe_namespace(scope)
        .name(purl.name())
        .revision(super::revision(purl, version)?)
        .build())
}

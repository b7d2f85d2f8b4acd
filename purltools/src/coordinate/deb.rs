use crate::{Coordinate, CoordinateType, Error, Purl, PurlType};

/// The `arch` qualifier value that denotes a source package.
const SOURCE_ARCH: &str = "source";

pub fn purl_to_coordinate(purl: &Purl, version: &str) -> Result<Coordinate, Error> {
    let arch = purl.required_qualifier(PurlType::Deb, "arch")?;

    // Source packages live under their own type and carry no architecture.
    let (kind, revision) = if arch == SOURCE_ARCH {
        (CoordinateType::DebSrc, version.to_string())
    } else {
        (CoordinateType::Deb, format!("{version}_{arch}"))
    };

    Ok(Coordinate::builder()
        .kind(kind)
        .provider("debian")
        .name(purl.name())
        .revision(super::revision(purl, revision)?)
        .build())
}

use color_eyre::{Result, eyre::Context};
use pretty_assertions::assert_eq;
use purltools::{Coordinate, Purl, PurlType, purl2url, url2purl};

#[test]
fn error_wrappable_context() -> Result<()> {
    const INPUT: &str = "pkg:cargo/bitflags@1.0.4";

    let purl = Purl::parse(INPUT).context("can wrap")?;
    assert_eq!(purl.purl_type().context("can wrap")?, PurlType::Cargo);

    let url = purl2url(INPUT).context("can wrap")?;
    assert_eq!(url2purl(&url).context("can wrap")?, INPUT);

    let coordinate = Coordinate::parse("crate/cratesio/-/bitflags/1.0.4").context("can wrap")?;
    assert_eq!(coordinate.name, "bitflags");

    Ok(())
}

#[test]
fn error_wrappable_withcontext() -> Result<()> {
    let err = Purl::parse("pkg:maven/org.apache/commons@1.0")
        .and_then(|purl| purl.purl_type())
        .with_context(|| "unsupported types report an error")
        .expect_err("maven is not supported");
    assert_eq!(err.to_string(), "unsupported types report an error");

    Ok(())
}

#[test]
fn error_diagnostic_code() {
    use miette::Diagnostic;

    let err = Purl::parse("pkg:cargo/bitflags")
        .and_then(|purl| purl.required_version().map(str::to_string))
        .expect_err("version is missing");
    let code = err.code().map(|code| code.to_string());
    assert_eq!(code.as_deref(), Some("purltools::missing_version"));
}

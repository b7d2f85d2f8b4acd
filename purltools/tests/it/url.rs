use assert_matches::assert_matches;
use purltools::{Error, purl2url, url2purl};
use simple_test_case::test_case;

#[test_case("pkg:cargo/bitflags@1.0.4"; "cargo")]
#[test_case("pkg:composer/symfony/polyfill-mbstring@v1.11.0"; "composer")]
#[test_case("pkg:gem/sorbet@0.5.11798"; "gem")]
#[test_case("pkg:github/package-url/purl-spec@v1.0.0"; "github")]
#[test_case("pkg:npm/%40vitest/utils@3.0.5"; "npm_scoped")]
#[test_case("pkg:pypi/github-org-manager@0.5.6"; "pypi")]
#[test_case("pkg:golang/github.com/gorilla/context@v1.1.1"; "golang")]
#[test_case("pkg:hackage/cli-extras@0.2.0.0"; "hackage")]
#[test]
fn purl_survives_url_conversion(purl: &str) {
    let url = purl2url(purl).expect("convert to url");
    pretty_assertions::assert_eq!(url2purl(&url).expect("convert back"), purl, "via {url}");
}

#[test]
fn cocoapods_url_drops_version() {
    let url = purl2url("pkg:cocoapods/AFNetworking@4.0.1").expect("convert to url");
    pretty_assertions::assert_eq!(url2purl(&url).expect("convert back"), "pkg:cocoapods/AFNetworking");
}

#[test]
fn invalid_purl() {
    assert_matches!(purl2url("cargo/bitflags"), Err(Error::Parse { .. }));
}

use assert_matches::assert_matches;
use mockito::{Matcher, Server};
use purltools::{
    Error, GithubConfig, GithubTagResolver, TagResolution, TagResolver, purl2clearlydefined,
};
use simple_test_case::test_case;

const SHA: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

fn resolver(server: &Server) -> GithubTagResolver {
    let config = GithubConfig::builder()
        .api_url(server.url())
        .token("test-token")
        .build();
    GithubTagResolver::new(config).expect("create resolver")
}

fn commit_ref(sha: &str) -> String {
    format!(r#"{{"ref":"refs/tags/x","object":{{"type":"commit","sha":"{sha}"}}}}"#)
}

#[test]
fn github_tag_resolves_to_commit() {
    let mut server = Server::new();
    let tag = server
        .mock("GET", "/repos/openrailassociation/github-org-manager/git/ref/tags/v0.5.7")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(commit_ref(SHA))
        .expect(1)
        .create();

    let coordinate = purl2clearlydefined(
        "pkg:github/openrailassociation/github-org-manager@v0.5.7",
        &resolver(&server),
    )
    .expect("convert");

    tag.assert();
    pretty_assertions::assert_eq!(
        coordinate,
        format!("git/github/openrailassociation/github-org-manager/{SHA}")
    );
}

#[test]
fn github_tag_retries_with_prefix() {
    let mut server = Server::new();
    let bare = server
        .mock("GET", "/repos/org/repo/git/ref/tags/5")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .expect(1)
        .create();
    let prefixed = server
        .mock("GET", "/repos/org/repo/git/ref/tags/v5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(commit_ref(SHA))
        .expect(1)
        .create();

    let coordinate = purl2clearlydefined("pkg:github/org/repo@5", &resolver(&server)).expect("convert");

    bare.assert();
    prefixed.assert();
    pretty_assertions::assert_eq!(coordinate, format!("git/github/org/repo/{SHA}"));
}

#[test]
fn github_tag_falls_back_to_version() {
    let mut server = Server::new();
    let lookups = server
        .mock("GET", Matcher::Regex(r"^/repos/org/repo/git/ref/tags/v?5$".to_string()))
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .expect(2)
        .create();

    let coordinate = purl2clearlydefined("pkg:github/org/repo@5", &resolver(&server)).expect("convert");

    lookups.assert();
    pretty_assertions::assert_eq!(coordinate, "git/github/org/repo/5");
}

#[test]
fn github_commit_hash_skips_lookup() {
    let mut server = Server::new();
    let lookups = server
        .mock("GET", Matcher::Any)
        .with_status(500)
        .expect(0)
        .create();

    let purl = format!("pkg:github/org/repo@{SHA}");
    let coordinate = purl2clearlydefined(&purl, &resolver(&server)).expect("convert");

    lookups.assert();
    pretty_assertions::assert_eq!(coordinate, format!("git/github/org/repo/{SHA}"));
}

#[test]
fn github_tag_with_reserved_characters() {
    let mut server = Server::new();
    let truncated = server
        .mock("GET", "/repos/org/repo/git/ref/tags/release")
        .with_body(commit_ref("2222222222222222222222222222222222222222"))
        .expect(0)
        .create();
    let exact = server
        .mock("GET", "/repos/org/repo/git/ref/tags/release%231")
        .with_header("content-type", "application/json")
        .with_body(commit_ref(SHA))
        .expect(1)
        .create();

    let coordinate =
        purl2clearlydefined("pkg:github/org/repo@release%231", &resolver(&server)).expect("convert");

    truncated.assert();
    exact.assert();
    pretty_assertions::assert_eq!(coordinate, format!("git/github/org/repo/{SHA}"));
}

#[test]
fn github_server_error_propagates() {
    let mut server = Server::new();
    let _lookup = server
        .mock("GET", "/repos/org/repo/git/ref/tags/1.0.0")
        .with_status(500)
        .create();

    let result = purl2clearlydefined("pkg:github/org/repo@1.0.0", &resolver(&server));
    assert_matches!(result, Err(Error::Resolve(_)));
}

#[test]
fn resolver_reports_fallback() {
    let mut server = Server::new();
    let _lookups = server
        .mock("GET", Matcher::Regex(r"^/repos/org/repo/git/ref/tags/".to_string()))
        .with_status(404)
        .create();

    let resolution = resolver(&server).resolve_tag("org", "repo", "1.0").expect("resolve");
    pretty_assertions::assert_eq!(resolution, TagResolution::Fallback("1.0".to_string()));
}

#[test_case("pkg:cocoapods/AFNetworking@4.0.1", "pod/cocoapods/-/AFNetworking/4.0.1"; "cocoapods")]
#[test_case("pkg:cargo/bitflags@1.0.4", "crate/cratesio/-/bitflags/1.0.4"; "cargo")]
#[test_case("pkg:composer/symfony/polyfill-mbstring@v1.11.0", "composer/packagist/symfony/polyfill-mbstring/v1.11.0"; "composer")]
#[test_case("pkg:conda/absl-py@0.4.1?build=py36h06a4308_0&subdir=linux-64", "conda/anaconda-main/linux-64/absl-py/0.4.1-py36h06a4308_0"; "conda")]
#[test_case("pkg:deb/debian/attr@2.4.47-2?arch=source", "debsrc/debian/-/attr/2.4.47-2"; "deb_source")]
#[test_case("pkg:deb/debian/curl@7.50.3-1?arch=i386", "deb/debian/-/curl/7.50.3-1_i386"; "deb_binary")]
#[test_case("pkg:gem/sorbet@0.5.11798", "gem/rubygems/-/sorbet/0.5.11798"; "gem")]
#[test_case("pkg:pypi/github-org-manager@0.5.6", "pypi/pypi/-/github-org-manager/0.5.6"; "pypi")]
#[test_case("pkg:npm/%40vitest/utils@3.0.5", "npm/npmjs/@vitest/utils/3.0.5"; "npm_scoped")]
#[test_case("pkg:npm/ansi-styles@6.2.1", "npm/npmjs/-/ansi-styles/6.2.1"; "npm")]
#[test]
fn offline_conversions_never_touch_github(purl: &str, expected: &str) {
    let mut server = Server::new();
    let lookups = server.mock("GET", Matcher::Any).expect(0).create();

    let coordinate = purl2clearlydefined(purl, &resolver(&server)).expect("convert");

    lookups.assert();
    pretty_assertions::assert_eq!(coordinate, expected);
}

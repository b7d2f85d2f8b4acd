use assert_matches::assert_matches;
use mockito::Server;
use pretty_assertions::assert_eq;
use purltools::{Error, RegistryClient, RegistryEndpoints, http::DEFAULT_TIMEOUT};
use serde_json::json;

fn client(server: &Server) -> RegistryClient {
    RegistryClient::with_endpoints(RegistryEndpoints::all(server.url()), DEFAULT_TIMEOUT)
        .expect("build client")
}

#[test]
fn metadata_for_each_registry() {
    let mut server = Server::new();
    let _npm = server
        .mock("GET", "/@db-ui/v-elements/latest")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "version": "3.0.2",
                "repository": "git+https://github.com/db-ui/elements.git"
            })
            .to_string(),
        )
        .create();
    let _pypi = server
        .mock("GET", "/github-org-manager/json")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "info": {
                    "version": "0.5.7",
                    "project_urls": { "Source": "https://github.com/OpenRailAssociation/github-org-manager" }
                }
            })
            .to_string(),
        )
        .create();
    let _crates = server
        .mock("GET", "/crates/bitflags")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "crate": {
                    "name": "bitflags",
                    "default_version": "2.9.0",
                    "repository": "https://github.com/bitflags/bitflags"
                }
            })
            .to_string(),
        )
        .create();
    let _packagist = server
        .mock("GET", "/p2/symfony/polyfill-mbstring.json")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "packages": {
                    "symfony/polyfill-mbstring": [{
                        "version": "v1.31.0",
                        "source": { "type": "git", "url": "https://github.com/symfony/polyfill-mbstring.git" }
                    }]
                }
            })
            .to_string(),
        )
        .create();

    let client = client(&server);
    let cases = [
        ("pkg:npm/%40db-ui/v-elements", "3.0.2", "https://github.com/db-ui/elements"),
        (
            "pkg:pypi/github-org-manager",
            "0.5.7",
            "https://github.com/OpenRailAssociation/github-org-manager",
        ),
        ("pkg:cargo/bitflags", "2.9.0", "https://github.com/bitflags/bitflags"),
        (
            "pkg:composer/symfony/polyfill-mbstring",
            "v1.31.0",
            "https://github.com/symfony/polyfill-mbstring",
        ),
    ];
    for (purl, latest, repository) in cases {
        assert_eq!(client.metadata(purl, "latest").expect("latest"), latest, "{purl}");
        assert_eq!(client.metadata(purl, "repository").expect("repository"), repository, "{purl}");
    }
}

#[test]
fn metadata_rejects_unknown_info() {
    let server = Server::new();
    let result = client(&server).metadata("pkg:cargo/bitflags", "license");
    assert_matches!(result, Err(Error::InvalidInfo(info)) if info == "license");
}

#[test]
fn metadata_rejects_unsupported_type() {
    let server = Server::new();
    let result = client(&server).metadata("pkg:gem/sorbet", "latest");
    assert_matches!(result, Err(Error::UnsupportedType(t)) if t == "gem");
}

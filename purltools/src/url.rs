//! Converting between purls and the web pages of the packages they name.
//!
//! [`purl2url`] renders the package page on the ecosystem's public website;
//! [`url2purl`] recognizes those same pages and builds the purl back.

use lazy_regex::regex_captures;

use crate::{Error, Purl};

/// The parts of a purl recognized from a URL.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Parts<'a> {
    package_type: &'static str,
    namespace: Option<&'a str>,
    name: &'a str,
    version: Option<&'a str>,
}

impl<'a> Parts<'a> {
    /// Regex captures report optional groups that did not match as empty strings.
    fn new(package_type: &'static str, namespace: &'a str, name: &'a str, version: &'a str) -> Self {
        let present = |s: &'a str| (!s.is_empty()).then_some(s);
        Self {
            package_type,
            namespace: present(namespace),
            name,
            version: present(version),
        }
    }

    fn render(&self) -> String {
        let mut purl = format!("pkg:{}/", self.package_type);
        if let Some(namespace) = self.namespace {
            // `@` separates the version, so npm scopes must be encoded.
            purl.push_str(&namespace.replace('@', "%40"));
            purl.push('/');
        }
        purl.push_str(self.name);
        if let Some(version) = self.version {
            purl.push('@');
            purl.push_str(version);
        }
        purl
    }
}

/// Convert a purl into the URL of the package's page.
///
/// ```rust
/// let url = purltools::purl2url("pkg:composer/symfony/polyfill-mbstring@v1.11.0").unwrap();
/// assert_eq!(url, "https://packagist.org/packages/symfony/polyfill-mbstring#v1.11.0");
/// ```
pub fn purl2url(purl: &str) -> Result<String, Error> {
    let purl = Purl::parse(purl)?;
    let name = purl.name();
    let version = purl.version().filter(|v| !v.is_empty());
    let namespace = || {
        purl.namespace()
            .filter(|ns| !ns.is_empty())
            .ok_or_else(|| Error::NoUrl {
                purl: purl.to_string(),
                reason: "namespace is required",
            })
    };
    let suffix = |prefix: &str| version.map(|v| format!("{prefix}{v}")).unwrap_or_default();

    let url = match purl.package_type().as_str() {
        "bitbucket" => format!("https://bitbucket.org/{}/{name}{}", namespace()?, suffix("/src/")),
        "cargo" => format!("https://crates.io/crates/{name}{}", suffix("/")),
        "cocoapods" => format!("https://cocoapods.org/pods/{name}"),
        "composer" => format!("https://packagist.org/packages/{}/{name}{}", namespace()?, suffix("#")),
        "gem" => format!("https://rubygems.org/gems/{name}{}", suffix("/versions/")),
        "github" => format!("https://github.com/{}/{name}{}", namespace()?, suffix("/tree/")),
        "gitlab" => format!("https://gitlab.com/{}/{name}{}", namespace()?, suffix("/-/tree/")),
        "golang" => format!("https://pkg.go.dev/{}/{name}{}", namespace()?, suffix("@")),
        "hackage" => format!("https://hackage.haskell.org/package/{name}{}", suffix("-")),
        "hex" => format!("https://hex.pm/packages/{name}{}", suffix("/")),
        "npm" => match purl.namespace().filter(|ns| !ns.is_empty()) {
            Some(scope) => format!("https://www.npmjs.com/package/{scope}/{name}{}", suffix("/v/")),
            None => format!("https://www.npmjs.com/package/{name}{}", suffix("/v/")),
        },
        "nuget" => format!("https://www.nuget.org/packages/{name}{}", suffix("/")),
        "pub" => format!("https://pub.dev/packages/{name}{}", suffix("/versions/")),
        "pypi" => format!("https://pypi.org/project/{name}{}", suffix("/")),
        other => return Err(Error::UnsupportedType(other.to_string())),
    };
    Ok(url)
}

/// Convert the URL of a package's page into a purl.
///
/// ```rust
/// let purl = purltools::url2purl("http://pypi.org/project/github-org-manager/0.5.6/").unwrap();
/// assert_eq!(purl, "pkg:pypi/github-org-manager@0.5.6");
/// ```
pub fn url2purl(url: &str) -> Result<String, Error> {
    let url = url.trim();
    let parts = recognize(url).ok_or_else(|| Error::UnsupportedUrl(url.to_string()))?;

    let purl = parts.render();
    Purl::parse(&purl)?;
    Ok(purl)
}

/// Match `url` against the known package page shapes.
fn recognize(url: &str) -> Option<Parts<'_>> {
    if let Some((_, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?pypi\.(?:python\.)?org/project/([^/]+)(?:/([^/]+))?/?$",
        url
    ) {
        return Some(Parts::new("pypi", "", name, version));
    }
    if let Some((_, scope, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?npmjs\.com/package/(?:(@[^/]+)/)?([^/@]+)(?:/v/([^/]+))?/?$",
        url
    ) {
        return Some(Parts::new("npm", scope, name, version));
    }
    if let Some((_, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?crates\.io/crates/([^/]+)(?:/([^/]+))?/?$",
        url
    ) {
        return Some(Parts::new("cargo", "", name, version));
    }
    if let Some((_, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?rubygems\.org/gems/([^/]+)(?:/versions/([^/]+))?/?$",
        url
    ) {
        return Some(Parts::new("gem", "", name, version));
    }
    if let Some((_, vendor, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?packagist\.org/packages/([^/]+)/([^/#]+)/?(?:#(.+))?$",
        url
    ) {
        return Some(Parts::new("composer", vendor, name, version));
    }
    if let Some((_, owner, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?github\.com/([^/]+)/([^/]+?)(?:\.git)?(?:/tree/(.+?))?/?$",
        url
    ) {
        return Some(Parts::new("github", owner, name, version));
    }
    if let Some((_, owner, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?gitlab\.com/([^/]+)/([^/]+?)(?:\.git)?(?:/-/tree/(.+?))?/?$",
        url
    ) {
        return Some(Parts::new("gitlab", owner, name, version));
    }
    if let Some((_, owner, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?bitbucket\.org/([^/]+)/([^/]+?)(?:\.git)?(?:/src/(.+?))?/?$",
        url
    ) {
        return Some(Parts::new("bitbucket", owner, name, version));
    }
    if let Some((_, name, version)) = regex_captures!(
        r"^https?://(?:www\.)?nuget\.org/packages/([^/]+)(?:/([^/]+))?/?$",
        url
    ) {
        return Some(Parts::new("nuget", "", name, version));
    }
    if let Some((_, namespace, name, version)) = regex_captures!(
        r"^https?://pkg\.go\.dev/(.+)/([^/@]+)(?:@([^/]+))?/?$",
        url
    ) {
        return Some(Parts::new("golang", namespace, name, version));
    }
    if let Some((_, name, version)) = regex_captures!(
        r"^https?://hackage\.haskell\.org/package/([A-Za-z0-9-]+?)(?:-([0-9][0-9.]*))?/?$",
        url
    ) {
        return Some(Parts::new("hackage", "", name, version));
    }
    if let Some((_, name)) = regex_captures!(r"^https?://(?:www\.)?cocoapods\.org/pods/([^/]+)/?$", url) {
        return Some(Parts::new("cocoapods", "", name, ""));
    }
    if let Some((_, name, version)) = regex_captures!(
        r"^https?://pub\.dev/packages/([^/]+)(?:/versions/([^/]+))?/?$",
        url
    ) {
        return Some(Parts::new("pub", "", name, version));
    }
    if let Some((_, name, version)) = regex_captures!(
        r"^https?://hex\.pm/packages/([^/]+)(?:/([^/]+))?/?$",
        url
    ) {
        return Some(Parts::new("hex", "", name, version));
    }
    None
}

use url::Url;

/// Same-authority restriction anchored on the seed URL.
///
/// Two URLs share a scope when their `host[:port]` parts are textually
/// equal. A candidate without any host (e.g. `mailto:` or `data:`) is
/// considered in scope, since relative references are resolved before
/// the check and can never produce such a URL on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainScope {
    authority: String,
}

impl DomainScope {
    pub fn new(reference: &Url) -> Self {
        Self {
            authority: authority(reference),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn contains(&self, candidate: &Url) -> bool {
        let other = authority(candidate);
        other.is_empty() || other == self.authority
    }
}

/// Pure form of the scope check working on raw strings.
///
/// Strings that do not parse as absolute URLs have an empty authority and
/// are therefore treated as same-domain.
pub fn belongs_to_scope(reference: &str, candidate: &str) -> bool {
    let reference = Url::parse(reference)
        .map(|u| authority(&u))
        .unwrap_or_default();
    let candidate = Url::parse(candidate)
        .map(|u| authority(&u))
        .unwrap_or_default();
    candidate.is_empty() || candidate == reference
}

/// `host[:port]` of a URL, or an empty string when it has no host.
pub fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

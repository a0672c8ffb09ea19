//! Domain gate
//!
//! Decides whether a URL may be fetched at all. Runs before any network
//! access and again on every redirect hop.

use url::Url;

/// Domains operated by the VIP Leilões group
pub const VIP_LEILOES_DOMAINS: &[&str] = &[
    "vipleiloes.com.br",
    "leilaovip.com.br",
    "correios.vipleiloes.com.br",
];

/// Group label used in rejection messages for [`VIP_LEILOES_DOMAINS`]
pub const VIP_LEILOES_GROUP: &str = "VIP Leilões";

/// Immutable set of allowed domain suffixes
///
/// A host is allowed when it equals one of the domains or is a proper
/// subdomain of one (`a.b.example.com` for `example.com`). Plain substring
/// containment is never enough: `notexample.com` and
/// `example.com.evil.net` are both rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedDomains {
    group: String,
    domains: Vec<String>,
}

impl AllowedDomains {
    /// Create a set from a group label and its domains
    ///
    /// Domains are lowercased and stripped of surrounding dots and
    /// whitespace; empty entries are dropped.
    pub fn new<I, S>(group: impl Into<String>, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().trim_matches('.').to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();

        Self {
            group: group.into(),
            domains,
        }
    }

    /// The built-in VIP Leilões allowlist
    pub fn vip_leiloes() -> Self {
        Self::new(VIP_LEILOES_GROUP, VIP_LEILOES_DOMAINS.iter().copied())
    }

    /// Group label shown to callers
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Configured domains, in configuration order
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Returns true if the URL's host is an allowed domain or a subdomain of one
    pub fn is_allowed(&self, url: &str) -> bool {
        self.is_allowed_host(&host_of(url))
    }

    /// Same check as [`is_allowed`](Self::is_allowed) on an already parsed URL
    pub fn is_allowed_url(&self, url: &Url) -> bool {
        self.is_allowed_host(&url.host_str().unwrap_or_default().to_lowercase())
    }

    fn is_allowed_host(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }
        self.domains.iter().any(|domain| {
            host == domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Message returned to callers when a URL is refused
    pub fn rejection_reason(&self) -> String {
        format!("URL not permitted — only {} domains are allowed", self.group)
    }
}

impl Default for AllowedDomains {
    fn default() -> Self {
        Self::vip_leiloes()
    }
}

/// Extract the lowercase host of a URL
///
/// Returns an empty string when the URL does not parse or has no host.
pub fn host_of(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_lowercase))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_domains_allowed() {
        let gate = AllowedDomains::vip_leiloes();
        assert!(gate.is_allowed("https://vipleiloes.com.br/leilao/1"));
        assert!(gate.is_allowed("https://leilaovip.com.br"));
        assert!(gate.is_allowed("http://correios.vipleiloes.com.br/"));
    }

    #[test]
    fn test_subdomains_allowed() {
        let gate = AllowedDomains::vip_leiloes();
        assert!(gate.is_allowed("https://www.vipleiloes.com.br/"));
        assert!(gate.is_allowed("https://correios.vipleiloes.com.br/track"));
        assert!(gate.is_allowed("https://a.b.leilaovip.com.br/x?y=1"));
    }

    #[test]
    fn test_host_is_case_insensitive() {
        let gate = AllowedDomains::vip_leiloes();
        assert!(gate.is_allowed("https://VIPLEILOES.COM.BR/Leilao"));
        assert!(gate.is_allowed("https://Www.LeilaoVip.com.br"));
    }

    #[test]
    fn test_port_and_userinfo_ignored() {
        let gate = AllowedDomains::vip_leiloes();
        assert!(gate.is_allowed("https://vipleiloes.com.br:8443/leilao"));
        assert!(gate.is_allowed("https://user:pw@vipleiloes.com.br/"));
        assert!(!gate.is_allowed("https://vipleiloes.com.br@evil.com/"));
    }

    #[test]
    fn test_unrelated_domains_rejected() {
        let gate = AllowedDomains::vip_leiloes();
        assert!(!gate.is_allowed("https://evil.com/"));
        assert!(!gate.is_allowed("https://example.com.br/"));
        assert!(!gate.is_allowed("https://com.br/"));
    }

    #[test]
    fn test_substring_without_boundary_rejected() {
        let gate = AllowedDomains::vip_leiloes();
        assert!(!gate.is_allowed("https://notvipleiloes.com.br/"));
        assert!(!gate.is_allowed("https://vipleiloes.com.br.evil.com/"));
        assert!(!gate.is_allowed("https://evil.com/vipleiloes.com.br"));
        assert!(!gate.is_allowed("https://evil.com/?u=https://vipleiloes.com.br"));
    }

    #[test]
    fn test_malformed_urls_rejected() {
        let gate = AllowedDomains::vip_leiloes();
        assert!(!gate.is_allowed(""));
        assert!(!gate.is_allowed("vipleiloes.com.br"));
        assert!(!gate.is_allowed("not a url"));
        assert!(!gate.is_allowed("https://"));
        assert!(!gate.is_allowed("mailto:someone@vipleiloes.com.br"));
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://VipLeiloes.com.br:443/a"), "vipleiloes.com.br");
        assert_eq!(host_of("http://127.0.0.1:8080/"), "127.0.0.1");
        assert_eq!(host_of("garbage"), "");
        assert_eq!(host_of(""), "");
    }

    #[test]
    fn test_domains_normalized() {
        let gate = AllowedDomains::new("Test", [" Example.COM ", ".sub.example.org.", ""]);
        assert_eq!(gate.domains(), &["example.com", "sub.example.org"]);
        assert!(gate.is_allowed("https://www.example.com/"));
        assert!(gate.is_allowed("https://sub.example.org/"));
        assert!(!gate.is_allowed("https://example.org/"));
    }

    #[test]
    fn test_empty_set_rejects_everything() {
        let gate = AllowedDomains::new("Nobody", Vec::<String>::new());
        assert!(!gate.is_allowed("https://vipleiloes.com.br/"));
    }

    #[test]
    fn test_rejection_reason_names_group() {
        let gate = AllowedDomains::vip_leiloes();
        assert_eq!(
            gate.rejection_reason(),
            "URL not permitted — only VIP Leilões domains are allowed"
        );
    }
}

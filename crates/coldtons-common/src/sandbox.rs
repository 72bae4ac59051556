use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::ColdtonsError;

/// An HTTP client that only talks to approved astronomy data hosts.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with the default allowlist.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ColdtonsError> {
        let domains = [
            "heasarc.gsfc.nasa.gov", // HEASARC TAP (NICER master catalog)
            "www.atnf.csiro.au",     // ATNF pulsar catalogue
            "localhost",
            "127.0.0.1",
        ];
        let allowlist = domains.iter().map(|d| d.to_string()).collect();

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("coldtons/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, allowlist })
    }

    /// Appends a hostname (and its subdomains) to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        // Exact match or a subdomain of an allowed domain
        self.allowlist
            .iter()
            .any(|allowed| host == allowed || host.ends_with(&format!(".{}", allowed)))
    }

    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, ColdtonsError> {
        self.check(url)?;
        Ok(self.client.get(url))
    }

    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, ColdtonsError> {
        self.check(url)?;
        Ok(self.client.post(url))
    }

    fn check(&self, url: &str) -> Result<(), ColdtonsError> {
        if self.is_allowed(url) {
            Ok(())
        } else {
            Err(ColdtonsError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heasarc_and_atnf_allowed() {
        let client = SandboxClient::with_timeout(Duration::from_secs(1)).unwrap();
        assert!(client.is_allowed("https://heasarc.gsfc.nasa.gov/xamin/vo/tap/sync"));
        assert!(client.is_allowed("https://www.atnf.csiro.au/research/pulsar/psrcat/"));
        assert!(client.is_allowed("http://127.0.0.1:8080/psrcat.db"));
    }

    #[test]
    fn test_unknown_host_rejected() {
        let client = SandboxClient::with_timeout(Duration::from_secs(1)).unwrap();
        assert!(!client.is_allowed("https://example.com/psrcat.db"));
        assert!(!client.is_allowed("not a url"));
        assert!(matches!(
            client.get("https://example.com/"),
            Err(ColdtonsError::Security(_))
        ));
    }

    #[test]
    fn test_suffix_lookalike_rejected() {
        let client = SandboxClient::with_timeout(Duration::from_secs(1)).unwrap();
        assert!(!client.is_allowed("https://evilheasarc.gsfc.nasa.gov.example.org/"));
        assert!(!client.is_allowed("https://notlocalhost/"));
    }

    #[test]
    fn test_allow_domain_extends_policy() {
        let mut client = SandboxClient::with_timeout(Duration::from_secs(1)).unwrap();
        client.allow_domain("mirror.example.org");
        assert!(client.is_allowed("https://mirror.example.org/psrcat.db"));
        assert!(client.is_allowed("https://eu.mirror.example.org/psrcat.db"));
    }
}

//! Client-portal detection.
//!
//! Rules run as an ordered list of tiers. Each tier looks at the same
//! [`PortalScan`] and either decides the page or passes it on. A WordPress
//! admin login by itself is never read as a client portal.

use url::Url;

use super::rules::{
    CLIENT_PATH_KEYWORDS, CMS_ADMIN_LOGIN, CMS_ASSET_PREFIXES, GENERIC_LOGIN_WORDS,
    PORTAL_STRONG_PHRASES, PORTAL_VENDOR_DOMAINS,
};
use crate::domain::{Classification, PageEvidence, PageLink};

pub const NO_SIGNALS: &str = "No client-portal signals found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    Match(String),
    Reject(String),
    Continue,
}

pub struct Tier {
    pub name: &'static str,
    pub eval: fn(&PortalScan<'_>) -> TierOutcome,
}

pub const TIERS: [Tier; 5] = [
    Tier {
        name: "vendor-link",
        eval: vendor_link,
    },
    Tier {
        name: "cms-login-gate",
        eval: cms_login_gate,
    },
    Tier {
        name: "strong-phrase",
        eval: strong_phrase,
    },
    Tier {
        name: "linked-login",
        eval: linked_login,
    },
    Tier {
        name: "unlinked-label",
        eval: unlinked_label,
    },
];

/// Evidence plus the page-wide facts several tiers share.
pub struct PortalScan<'a> {
    evidence: &'a PageEvidence,
    page_host: Option<String>,
    cms_login_present: bool,
    client_link_present: bool,
}

impl<'a> PortalScan<'a> {
    pub fn new(evidence: &'a PageEvidence) -> Self {
        let page_host = evidence.url.host_str().map(bare_host);
        let mut scan = Self {
            evidence,
            page_host,
            cms_login_present: false,
            client_link_present: false,
        };
        scan.cms_login_present = evidence
            .links_with_target()
            .any(|(_, target)| is_cms_login(target));
        scan.client_link_present = evidence
            .links_with_target()
            .any(|(_, target)| !is_cms_login(target) && scan.is_client_target(target));
        scan
    }

    /// A CMS login exists and nothing else on the page backs up a portal.
    fn gate_active(&self) -> bool {
        self.cms_login_present && !self.client_link_present
    }

    fn is_same_origin(&self, target: &Url) -> bool {
        match (&self.page_host, target.host_str()) {
            (Some(page), Some(host)) => *page == bare_host(host),
            _ => false,
        }
    }

    fn is_client_path(&self, target: &Url) -> bool {
        if !self.is_same_origin(target) {
            return false;
        }
        let path = target.path().to_ascii_lowercase();
        if CMS_ASSET_PREFIXES.iter().any(|prefix| path.contains(prefix)) {
            return false;
        }
        CLIENT_PATH_KEYWORDS.iter().any(|keyword| path.contains(keyword))
    }

    fn is_client_target(&self, target: &Url) -> bool {
        vendor_domain(target).is_some() || self.is_client_path(target)
    }
}

pub fn classify(evidence: &PageEvidence) -> Classification {
    let scan = PortalScan::new(evidence);
    for tier in &TIERS {
        match (tier.eval)(&scan) {
            TierOutcome::Match(message) => {
                tracing::debug!(target: "classify", tier = tier.name, url = %evidence.url, "portal match");
                return Classification::confirmed(message);
            }
            TierOutcome::Reject(message) => {
                tracing::debug!(target: "classify", tier = tier.name, url = %evidence.url, "portal rejected");
                return Classification::absent(message);
            }
            TierOutcome::Continue => {}
        }
    }
    Classification::absent(NO_SIGNALS)
}

fn vendor_link(scan: &PortalScan<'_>) -> TierOutcome {
    scan.evidence
        .links_with_target()
        .filter(|(_, target)| !is_cms_login(target))
        .find_map(|(_, target)| {
            vendor_domain(target).map(|vendor| {
                TierOutcome::Match(format!("Found portal vendor link ({vendor}): {target}"))
            })
        })
        .unwrap_or(TierOutcome::Continue)
}

fn cms_login_gate(scan: &PortalScan<'_>) -> TierOutcome {
    if scan.gate_active() {
        TierOutcome::Reject(
            "Only a WordPress admin login was found; not treated as a client portal.".into(),
        )
    } else {
        TierOutcome::Continue
    }
}

fn strong_phrase(scan: &PortalScan<'_>) -> TierOutcome {
    match find_phrase(&scan.evidence.text, PORTAL_STRONG_PHRASES) {
        Some(phrase) => TierOutcome::Match(format!("Found '{phrase}' in page text.")),
        None => TierOutcome::Continue,
    }
}

fn linked_login(scan: &PortalScan<'_>) -> TierOutcome {
    for (link, target) in scan.evidence.links_with_target() {
        if is_cms_login(target) {
            continue;
        }
        let Some(cue) = login_cue(link) else {
            continue;
        };
        // A bare /login is generic site auth, not a portal.
        if scan.is_client_target(target) {
            return TierOutcome::Match(format!("Found '{cue}' link to {target}"));
        }
    }
    TierOutcome::Continue
}

fn unlinked_label(scan: &PortalScan<'_>) -> TierOutcome {
    if scan.gate_active() {
        return TierOutcome::Continue;
    }
    scan.evidence
        .links
        .iter()
        .filter(|link| link.target.is_none())
        .find_map(|link| find_phrase(&link.label, PORTAL_STRONG_PHRASES))
        .map(|phrase| TierOutcome::Match(format!("Found '{phrase}' button.")))
        .unwrap_or(TierOutcome::Continue)
}

fn login_cue(link: &PageLink) -> Option<&'static str> {
    find_phrase(&link.label, PORTAL_STRONG_PHRASES)
        .or_else(|| find_phrase(&link.label, GENERIC_LOGIN_WORDS))
}

fn find_phrase(haystack: &str, phrases: &[&'static str]) -> Option<&'static str> {
    phrases.iter().copied().find(|phrase| haystack.contains(phrase))
}

fn is_cms_login(target: &Url) -> bool {
    CMS_ADMIN_LOGIN.is_match(target.as_str())
}

fn vendor_domain(target: &Url) -> Option<&'static str> {
    let host = target.host_str()?.to_ascii_lowercase();
    PORTAL_VENDOR_DOMAINS.iter().copied().find(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

fn bare_host(host: &str) -> String {
    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

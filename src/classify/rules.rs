//! Constant rule tables shared by the classifiers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Hosts of third-party services that run client portals for firms.
/// A link host matches when it equals an entry or is a subdomain of one.
pub static PORTAL_VENDOR_DOMAINS: &[&str] = &[
    "sharefile.com",
    "sharefile.eu",
    "citrixdata.com",
    "smartvault.com",
    "onvio.us",
    "onvio.com",
    "canopytax.com",
    "taxdome.com",
    "karbonhq.com",
    "liscio.me",
    "suralink.com",
    "securefilepro.com",
    "verifyle.com",
    "clientportal.com",
    "cchaxcess.com",
    "netclient.com",
    "clio.com",
    "mycase.com",
    "practicepanther.com",
    "rightworks.com",
];

/// WordPress admin login, the login most often mistaken for a client portal.
pub static CMS_ADMIN_LOGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/(?:wp-login\.php|wp-admin)(?:[/?#]|$)").expect("valid cms login regex")
});

/// Phrases that on their own indicate a client-facing portal.
pub static PORTAL_STRONG_PHRASES: &[&str] = &[
    "client portal",
    "client login",
    "client log in",
    "client sign in",
    "client access",
    "client center",
    "client area",
    "customer portal",
    "secure portal",
    "secure login",
    "secure client",
    "secure file",
    "secure upload",
    "file exchange",
    "document portal",
    "upload documents",
    "upload files",
    "upload your documents",
];

/// Generic authentication wording; not enough without a corroborating target.
pub static GENERIC_LOGIN_WORDS: &[&str] = &["login", "log in", "sign in", "signin", "my account"];

/// Path fragments that mark a same-site link as client-facing.
pub static CLIENT_PATH_KEYWORDS: &[&str] = &[
    "client",
    "portal",
    "secure",
    "upload",
    "file-exchange",
    "customer",
];

/// CMS media and asset directories; never client-facing whatever their path says.
pub static CMS_ASSET_PREFIXES: &[&str] = &["/wp-content/", "/wp-includes/"];

/// Guessed portal locations tried when the home page shows nothing.
pub static PORTAL_PROBE_PATHS: &[&str] = &[
    "/client-portal",
    "/portal",
    "/client-login",
    "/clients",
    "/login",
];

/// Donation and fundraising vocabulary, checked in order.
pub static DONATION_TERMS: &[&str] = &[
    "donate",
    "donation",
    "give online",
    "online giving",
    "give now",
    "give today",
    "ways to give",
    "make a gift",
    "planned giving",
    "tithes and offerings",
    "tithe",
    "tithing",
    "offering",
    "pledge",
    "fundraiser",
    "fundraising",
    "fund raising",
    "capital campaign",
    "annual fund",
    "support our mission",
    "support our work",
    "support us",
    "become a sponsor",
    "sponsorship",
    "contribute",
    "contribution",
    "endowment",
    "charitable",
    "philanthropy",
    "stewardship",
    "benevolence",
    "tax-deductible",
    "tax deductible",
    "crowdfunding",
    "gofundme",
];

/// Link labels that suggest a careers page.
pub static CAREERS_WORDS: &[&str] = &[
    "careers",
    "jobs",
    "open roles",
    "open positions",
    "join us",
    "join our team",
    "work with us",
    "we're hiring",
];

pub static CAREERS_PROBE_PATH: &str = "/careers";

pub static REACT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\breact(?:\.?js|\s*js)?\b").expect("valid react regex"));

/// Words that contain "react" but say nothing about the library.
pub static REACT_FALSE_FRIENDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\breact(?:ive(?:ly)?|ions?|s|ors?|ants?)\b").expect("valid react context regex")
});

pub static US_PHRASES: &[&str] = &[
    "united states",
    "u.s.",
    "u.s.a.",
    "usa",
    "us only",
    "us-only",
    "us based",
    "us-based",
    "remote - us",
    "remote (us)",
    "remote us",
    "authorized to work in the us",
    "work authorization in the us",
    "us citizenship",
    "us citizen",
];

pub static US_STATES: &[&str] = &[
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new hampshire",
    "new jersey",
    "new mexico",
    "new york",
    "north carolina",
    "north dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode island",
    "south carolina",
    "south dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west virginia",
    "wisconsin",
    "wyoming",
    "district of columbia",
    "washington, dc",
    "washington dc",
    "puerto rico",
    "guam",
    "u.s. virgin islands",
];

pub static US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "PR", "GU", "VI",
];

/// Any US phrase or state name, bounded by non-letters. Matched on lowercase text.
pub static US_TERMS: Lazy<Regex> = Lazy::new(|| {
    let alternatives = US_PHRASES
        .iter()
        .chain(US_STATES)
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?:^|[^a-z])(?:{alternatives})(?:$|[^a-z])"))
        .expect("valid us terms regex")
});

/// "Denver, CO". Case-sensitive, so it runs on text that kept its casing.
pub static CITY_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b[A-Z][a-zA-Z]+,\s?(?:{})\b",
        US_STATE_CODES.join("|")
    ))
    .expect("valid city/state regex")
});

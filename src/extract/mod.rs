//! Turns a fetched HTML document into [`PageEvidence`].
//!
//! Extraction never fails: broken markup just yields less text and fewer
//! links.

mod jsonld;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::domain::{LinkKind, PageEvidence, PageLink};

pub use jsonld::job_postings;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Parse JSON-LD JobPosting blocks.
    pub jobs: bool,
}

static BODY: Lazy<Selector> = Lazy::new(|| selector("body"));
static CLICKABLES: Lazy<Selector> = Lazy::new(|| {
    selector(
        "a, area, button, [role=button], input[type=submit], input[type=button], form",
    )
});

const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

pub fn page_evidence(url: &Url, body: &str, options: ExtractOptions) -> PageEvidence {
    let document = Html::parse_document(body);

    let raw_text = visible_text(&document);
    let text = raw_text.to_lowercase();
    let links = collect_links(&document, url);
    let jobs = if options.jobs {
        job_postings(&document)
    } else {
        Vec::new()
    };

    PageEvidence {
        url: url.clone(),
        text,
        raw_text,
        links,
        jobs,
    }
}

/// Collapses runs of whitespace to a single space and trims the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn normalize_label(value: &str) -> String {
    collapse_whitespace(value).to_lowercase()
}

fn visible_text(document: &Html) -> String {
    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());
    collapse_whitespace(&element_text(root))
}

fn element_text(element: ElementRef<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in element.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
        });
        if !hidden {
            parts.push(text);
        }
    }
    parts.join(" ")
}

fn collect_links(document: &Html, base: &Url) -> Vec<PageLink> {
    document
        .select(&CLICKABLES)
        .map(|element| {
            let value = element.value();
            let kind = match value.name() {
                "a" | "area" => LinkKind::Anchor,
                "form" => LinkKind::Form,
                _ => LinkKind::Button,
            };
            let raw_target = match kind {
                LinkKind::Anchor => value.attr("href"),
                LinkKind::Form => value.attr("action"),
                LinkKind::Button => ["formaction", "data-href", "data-url"]
                    .iter()
                    .find_map(|attr| value.attr(attr)),
            };
            PageLink {
                label: element_label(element, kind),
                target: raw_target.and_then(|raw| resolve_target(base, raw)),
                kind,
            }
        })
        .collect()
}

fn element_label(element: ElementRef<'_>, kind: LinkKind) -> String {
    // A form's own text is every field label inside it; only its attributes name it.
    let text = match kind {
        LinkKind::Form => String::new(),
        _ => normalize_label(&element_text(element)),
    };
    if !text.is_empty() {
        return text;
    }
    ["aria-label", "title", "value"]
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .map(normalize_label)
        .find(|label| !label.is_empty())
        .unwrap_or_default()
}

fn resolve_target(base: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') || raw.to_ascii_lowercase().starts_with("javascript:")
    {
        return None;
    }
    base.join(raw).ok()
}

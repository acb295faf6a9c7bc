use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Anchor,
    Button,
    Form,
}

/// A clickable element: its normalized label and resolved target, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    pub target: Option<Url>,
    pub kind: LinkKind,
}

/// A schema.org JobPosting pulled from a JSON-LD block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobRecord {
    pub title: String,
    pub description: String,
    pub locations: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEvidence {
    pub url: Url,
    /// Lowercased, whitespace-collapsed visible text.
    pub text: String,
    /// Same text with casing preserved.
    pub raw_text: String,
    pub links: Vec<PageLink>,
    pub jobs: Vec<JobRecord>,
}

impl PageEvidence {
    pub fn links_with_target(&self) -> impl Iterator<Item = (&PageLink, &Url)> {
        self.links
            .iter()
            .filter_map(|link| link.target.as_ref().map(|target| (link, target)))
    }
}

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    classify::{
        self,
        rules::{CAREERS_PROBE_PATH, CAREERS_WORDS, PORTAL_PROBE_PATHS},
    },
    domain::{CheckKind, Classification, PageEvidence, ProbeOrigin, ProbeTarget, Signal, Verdict},
    extract,
    web_content::PageFetcher,
};

pub struct Prober {
    fetcher: Arc<PageFetcher>,
    kind: CheckKind,
}

impl Prober {
    pub fn new(fetcher: Arc<PageFetcher>, kind: CheckKind) -> Self {
        Self { fetcher, kind }
    }

    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    /// Classifies `url`, then tries the secondary targets in order until one
    /// matches. Only a failure of the first request becomes a `FetchError`.
    pub async fn probe(&self, url: &str) -> Verdict {
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(err) => {
                warn!(target: "probe", url, error = %err, "primary fetch failed");
                return Verdict::FetchError(format!("Request failed: {err}"));
            }
        };

        let evidence = extract::page_evidence(
            &page.url,
            &page.body,
            classify::extract_options(self.kind),
        );
        let primary = classify::classify(self.kind, &evidence);
        if primary.is_confirmed() {
            info!(target: "probe", url, kind = %self.kind, "match on primary page");
            return primary.into_verdict();
        }

        let mut fallback: Option<String> = None;
        for target in secondary_targets(self.kind, &evidence) {
            let Some(result) = self.classify_target(&target).await else {
                continue;
            };
            if result.is_confirmed() {
                info!(target: "probe", url, found_at = %target.url, "match on secondary page");
                return Verdict::Match(format!("{}: {}", target.provenance(), result.message));
            }
            if result.signal == Signal::Partial && fallback.is_none() {
                fallback = Some(format!("{}: {}", target.provenance(), result.message));
            }
        }

        match fallback {
            Some(message) if primary.signal != Signal::Partial => Verdict::NoMatch(message),
            _ => primary.into_verdict(),
        }
    }

    /// Secondary fetch failures count as "no evidence".
    async fn classify_target(&self, target: &ProbeTarget) -> Option<Classification> {
        match self.fetcher.fetch_url(target.url.clone()).await {
            Ok(page) => {
                let evidence = extract::page_evidence(
                    &page.url,
                    &page.body,
                    classify::extract_options(self.kind),
                );
                Some(classify::classify(self.kind, &evidence))
            }
            Err(err) => {
                debug!(target: "probe", url = %target.url, error = %err, "secondary fetch failed");
                None
            }
        }
    }
}

pub fn secondary_targets(kind: CheckKind, evidence: &PageEvidence) -> Vec<ProbeTarget> {
    match kind {
        CheckKind::Portal => {
            let mut targets: Vec<ProbeTarget> = Vec::new();
            for path in PORTAL_PROBE_PATHS {
                let Ok(url) = evidence.url.join(path) else {
                    continue;
                };
                if url == evidence.url || targets.iter().any(|t| t.url == url) {
                    continue;
                }
                targets.push(ProbeTarget {
                    url,
                    origin: ProbeOrigin::GuessedPath,
                });
            }
            targets
        }
        CheckKind::ReactJob => {
            let careers_link = evidence
                .links_with_target()
                .find(|(link, target)| {
                    matches!(target.scheme(), "http" | "https")
                        && **target != evidence.url
                        && CAREERS_WORDS.iter().any(|word| link.label.contains(word))
                })
                .map(|(_, target)| ProbeTarget {
                    url: target.clone(),
                    origin: ProbeOrigin::CareersLink,
                });
            let guessed = || {
                evidence
                    .url
                    .join(CAREERS_PROBE_PATH)
                    .ok()
                    .filter(|url| *url != evidence.url)
                    .map(|url| ProbeTarget {
                        url,
                        origin: ProbeOrigin::GuessedPath,
                    })
            };
            careers_link.or_else(guessed).into_iter().collect()
        }
        CheckKind::Donation => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use url::Url;

    use super::*;
    use crate::config::FetchConfig;
    use crate::extract::{page_evidence, ExtractOptions};

    fn prober(kind: CheckKind) -> Prober {
        let fetcher = PageFetcher::new(&FetchConfig {
            timeout: Duration::from_secs(5),
            ..FetchConfig::default()
        })
        .unwrap();
        Prober::new(Arc::new(fetcher), kind)
    }

    #[tokio::test]
    async fn primary_failure_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(503);
            })
            .await;

        let verdict = prober(CheckKind::Portal).probe(&server.url("/")).await;
        match verdict {
            Verdict::FetchError(message) => assert!(message.starts_with("Request failed:")),
            other => panic!("unexpected verdict {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_url_is_fetch_error() {
        let verdict = prober(CheckKind::Donation).probe("not a url").await;
        assert!(matches!(verdict, Verdict::FetchError(_)));
    }

    #[tokio::test]
    async fn portal_found_on_guessed_path() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("<body><h1>Smith &amp; Co</h1></body>");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/portal");
                then.status(200)
                    .body("<body><h1>Client Portal</h1><a href='/portal/login'>Sign in</a></body>");
            })
            .await;
        let later = server
            .mock_async(|when, then| {
                when.method(GET).path("/client-login");
                then.status(200).body("<body>client portal</body>");
            })
            .await;

        let verdict = prober(CheckKind::Portal).probe(&server.url("/")).await;
        assert_eq!(
            verdict,
            Verdict::Match(format!(
                "Found via probe {}: Found 'client portal' in page text.",
                server.url("/portal")
            ))
        );
        later.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn failed_probes_keep_primary_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("<body><p>Nothing here</p></body>");
            })
            .await;

        let verdict = prober(CheckKind::Portal).probe(&server.url("/")).await;
        assert_eq!(
            verdict,
            Verdict::NoMatch(classify::portal::NO_SIGNALS.to_string())
        );
    }

    #[tokio::test]
    async fn donation_never_probes() {
        let server = MockServer::start_async().await;
        let any = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).body("<body>Welcome</body>");
            })
            .await;

        let verdict = prober(CheckKind::Donation).probe(&server.url("/")).await;
        assert!(matches!(verdict, Verdict::NoMatch(_)));
        any.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn react_job_follows_one_careers_link() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200)
                    .body("<body><a href='/about'>About</a><a href='/work'>Careers</a></body>");
            })
            .await;
        let careers = server
            .mock_async(|when, then| {
                when.method(GET).path("/work");
                then.status(200)
                    .body("<body><h2>React Developer</h2><p>Austin, TX</p></body>");
            })
            .await;

        let verdict = prober(CheckKind::ReactJob).probe(&server.url("/")).await;
        assert_eq!(
            verdict,
            Verdict::Match(format!(
                "Found via careers page {}: {}",
                server.url("/work"),
                classify::react_job::TEXT_MATCH
            ))
        );
        careers.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn react_partial_from_careers_page_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("<body><a href='/jobs'>Jobs</a></body>");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/jobs");
                then.status(200).body("<body>React Engineer, Lisbon</body>");
            })
            .await;

        let verdict = prober(CheckKind::ReactJob).probe(&server.url("/")).await;
        assert_eq!(
            verdict,
            Verdict::NoMatch(format!(
                "Found via careers page {}: {}",
                server.url("/jobs"),
                classify::react_job::TEXT_PARTIAL
            ))
        );
    }

    #[tokio::test]
    async fn primary_partial_message_wins_over_careers_partial() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200)
                    .body("<body><p>React Engineer, Lisbon</p><a href='/jobs'>Jobs</a></body>");
            })
            .await;
        let careers = server
            .mock_async(|when, then| {
                when.method(GET).path("/jobs");
                then.status(200).body("<body>React Developer, Berlin</body>");
            })
            .await;

        let verdict = prober(CheckKind::ReactJob).probe(&server.url("/")).await;
        assert_eq!(
            verdict,
            Verdict::NoMatch(classify::react_job::TEXT_PARTIAL.to_string())
        );
        careers.assert_hits_async(1).await;
    }

    #[test]
    fn careers_link_must_be_fetchable() {
        let url = Url::parse("https://acme.example/").unwrap();
        let evidence = page_evidence(
            &url,
            "<a href='mailto:jobs@acme.example'>Jobs</a><a href='/team'>Careers</a>",
            ExtractOptions::default(),
        );
        let targets = secondary_targets(CheckKind::ReactJob, &evidence);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].url.as_str(), "https://acme.example/team");
        assert_eq!(targets[0].origin, ProbeOrigin::CareersLink);
    }

    #[test]
    fn portal_targets_resolve_against_final_url() {
        let url = Url::parse("https://firm.example/home/index.html").unwrap();
        let evidence = page_evidence(&url, "", ExtractOptions::default());
        let targets: Vec<String> = secondary_targets(CheckKind::Portal, &evidence)
            .into_iter()
            .map(|t| t.url.to_string())
            .collect();
        assert_eq!(
            targets,
            vec![
                "https://firm.example/client-portal",
                "https://firm.example/portal",
                "https://firm.example/client-login",
                "https://firm.example/clients",
                "https://firm.example/login",
            ]
        );
    }

    #[test]
    fn react_targets_fall_back_to_guessed_careers_path() {
        let url = Url::parse("https://acme.example/").unwrap();
        let evidence = page_evidence(&url, "<a href='/blog'>Blog</a>", ExtractOptions::default());
        let targets = secondary_targets(CheckKind::ReactJob, &evidence);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].url.as_str(), "https://acme.example/careers");
        assert_eq!(targets[0].origin, ProbeOrigin::GuessedPath);
    }
}

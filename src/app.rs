use std::{io::Write, sync::Arc};

use anyhow::{Context, Result};

use crate::{
    config::AppConfig,
    domain::CheckKind,
    report::BatchReport,
    tasks::prober::Prober,
    web_content::PageFetcher,
};

pub struct SiteCheckApp {
    prober: Prober,
}

impl SiteCheckApp {
    pub fn initialize(config: &AppConfig, kind: CheckKind) -> Result<Self> {
        let fetcher = PageFetcher::new(&config.fetch).context("failed to build HTTP client")?;
        let prober = Prober::new(Arc::new(fetcher), kind);
        Ok(Self { prober })
    }

    /// Probes every URL in order, writing progress lines to `progress`.
    pub async fn run(&self, urls: &[String], progress: &mut dyn Write) -> Result<BatchReport> {
        let kind = self.prober.kind();
        let mut report = BatchReport::new(kind);
        tracing::info!(target: "app", total = urls.len(), check = %kind, "batch started");

        for url in urls {
            writeln!(progress, "Currently checking: {url}")?;
            let verdict = self.prober.probe(url).await;
            tracing::info!(target: "app", url = %url, verdict = ?verdict, "checked");
            report.push(url.as_str(), verdict);
        }

        writeln!(progress, "Check completed!")?;
        tracing::info!(
            target: "app",
            confirmed = report.confirmed.len(),
            needs_investigation = report.needs_investigation.len(),
            "batch finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;

    use super::*;
    use crate::config::{DirectoryConfig, FetchConfig};
    use crate::config::env::LoggingConfig;
    use crate::domain::Verdict;

    fn config(timeout: Duration) -> AppConfig {
        AppConfig {
            directories: DirectoryConfig {
                logs_dir: "logs".into(),
            },
            logging: LoggingConfig {
                level: "info".into(),
            },
            fetch: FetchConfig {
                timeout,
                ..FetchConfig::default()
            },
            default_check: CheckKind::Portal,
        }
    }

    #[tokio::test]
    async fn batch_buckets_timeout_direct_and_probed_matches() {
        let slow = MockServer::start_async().await;
        slow.mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .delay(Duration::from_secs(3))
                .body("<body>client portal</body>");
        })
        .await;

        let direct = MockServer::start_async().await;
        direct
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200)
                    .body("<body><p>Log in to our Client Portal to share files.</p></body>");
            })
            .await;

        let probed = MockServer::start_async().await;
        probed
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("<body><h1>Jones Tax Services</h1></body>");
            })
            .await;
        probed
            .mock_async(|when, then| {
                when.method(GET).path("/clients");
                then.status(200).body(
                    "<body><a href='https://jones.smartvault.com/'>Open vault</a></body>",
                );
            })
            .await;

        let app = SiteCheckApp::initialize(&config(Duration::from_millis(300)), CheckKind::Portal)
            .unwrap();
        let urls = vec![slow.url("/"), direct.url("/"), probed.url("/")];
        let mut progress = Vec::new();
        let report = app.run(&urls, &mut progress).await.unwrap();

        let progress = String::from_utf8(progress).unwrap();
        assert_eq!(
            progress,
            format!(
                "Currently checking: {}\nCurrently checking: {}\nCurrently checking: {}\nCheck completed!\n",
                urls[0], urls[1], urls[2]
            )
        );

        assert_eq!(report.needs_investigation.len(), 1);
        assert_eq!(report.needs_investigation[0].url, urls[0]);
        assert!(matches!(
            &report.needs_investigation[0].verdict,
            Verdict::FetchError(message) if message.starts_with("Request failed:")
        ));

        assert_eq!(report.confirmed.len(), 2);
        assert_eq!(report.confirmed[0].url, urls[1]);
        assert_eq!(report.confirmed[1].url, urls[2]);
        assert!(report.confirmed[1]
            .verdict
            .message()
            .starts_with(&format!("Found via probe {}", probed.url("/clients"))));
    }
}

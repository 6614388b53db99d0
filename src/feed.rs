//! Compromised-package list providers.
//!
//! The scan entry points take a plain list of package names; this
//! module supplies that list, either from the published IoC feed or
//! from names given on the command line.

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Default feed: the wiz-research IoC list for the shai-hulud campaign.
pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/wiz-sec-public/wiz-research-iocs/main/reports/shai-hulud-2-packages.csv";

/// Source of compromised package names.
#[async_trait]
pub trait PatternSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &'static str;

    /// Fetches the ordered list of package-name patterns.
    async fn fetch(&self) -> Result<Vec<String>>;
}

/// Fetches the package list from a CSV feed over HTTP.
///
/// The feed is a CSV with a header row; the package name is the first
/// column of every following row.
pub struct FeedSource {
    client: reqwest::Client,
    url: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

#[async_trait]
impl PatternSource for FeedSource {
    fn name(&self) -> &'static str {
        "compromised-package feed"
    }

    async fn fetch(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("failed to fetch package feed from {}", self.url))?
            .error_for_status()
            .context("package feed request failed")?;

        let body = response.text().await.context("failed to read feed body")?;
        Ok(parse_feed_csv(&body))
    }
}

/// Wraps an explicit, caller-supplied pattern list.
pub struct StaticSource {
    patterns: Vec<String>,
}

impl StaticSource {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }
}

#[async_trait]
impl PatternSource for StaticSource {
    fn name(&self) -> &'static str {
        "command-line patterns"
    }

    async fn fetch(&self) -> Result<Vec<String>> {
        Ok(self.patterns.clone())
    }
}

/// Parses the feed CSV: skips the header row, takes the first column of
/// each non-empty line, trimmed. Feed order is preserved.
fn parse_feed_csv(data: &str) -> Vec<String> {
    data.lines()
        .skip(1)
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let name = line.split(',').next()?.trim();
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

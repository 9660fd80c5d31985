//! We Work Remotely — scraped HTML listing page.
//!
//! Only the category listing page is fetched. Detail pages are not, so the
//! description is a fixed summary and `published_at` is the fetch time.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::jobs::models::{JobListing, JobSourceKind};
use crate::jobs::source::{get_text, FetchError, JobSource};

/// Fields read straight off one `<li>` of the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedListing {
    pub title: String,
    pub company: String,
    /// Detail page URL, already resolved against the listing page.
    pub url: String,
}

impl ScrapedListing {
    pub fn into_listing(self, fetched_at: &str) -> JobListing {
        JobListing {
            id: listing_id(&self.url),
            description: format!("Remote position at {} - {}", self.company, self.title),
            title: self.title,
            company: self.company,
            url: self.url,
            published_at: fetched_at.to_string(),
            source: JobSourceKind::WeWorkRemotely,
        }
    }
}

/// `weworkremotely_<n>` with `n` a stable hash of the detail URL, mod 1e6.
/// Unique only modulo collisions.
fn listing_id(url: &str) -> String {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    format!("{}_{}", JobSourceKind::WeWorkRemotely, hasher.finish() % 1_000_000)
}

fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("hard-coded selector is valid")
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts every listing from a category page.
///
/// Looks at each `li` inside each `section.jobs`. Items without a link, a
/// company label, or a title label are skipped; malformed markup is expected.
pub fn parse_listing_page(html: &str, base_url: &Url) -> Vec<ScrapedListing> {
    let document = Html::parse_document(html);
    let section_sel = css("section.jobs");
    let item_sel = css("li");
    let anchor_sel = css("a[href]");
    let company_sel = css("span.company");
    let title_sel = css("span.title");

    let mut listings = Vec::new();
    for section in document.select(&section_sel) {
        for item in section.select(&item_sel) {
            let Some(href) = item
                .select(&anchor_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                continue;
            };
            let Ok(url) = base_url.join(href) else {
                continue;
            };
            let (Some(company), Some(title)) = (
                item.select(&company_sel).next(),
                item.select(&title_sel).next(),
            ) else {
                continue;
            };

            listings.push(ScrapedListing {
                title: element_text(title),
                company: element_text(company),
                url: url.to_string(),
            });
        }
    }
    listings
}

pub struct WeWorkRemotelySource {
    client: Client,
    page_url: String,
}

impl WeWorkRemotelySource {
    pub fn new(client: Client, page_url: String) -> Self {
        Self { client, page_url }
    }
}

#[async_trait]
impl JobSource for WeWorkRemotelySource {
    fn kind(&self) -> JobSourceKind {
        JobSourceKind::WeWorkRemotely
    }

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError> {
        let base_url = Url::parse(&self.page_url).map_err(|e| FetchError::Url {
            url: self.page_url.clone(),
            reason: e.to_string(),
        })?;
        let html = get_text(&self.client, &self.page_url).await?;

        let fetched_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let listings: Vec<JobListing> = parse_listing_page(&html, &base_url)
            .into_iter()
            .map(|scraped| scraped.into_listing(&fetched_at))
            .collect();

        info!(source = "weworkremotely", count = listings.len(), "Scraped listings");
        Ok(listings)
    }
}

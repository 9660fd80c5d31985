use crate::jobs::models::JobListing;

/// Post-hoc search criteria. All present criteria must hold; absent or blank
/// ones are ignored.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive substring of title, description or company.
    pub query: Option<String>,
    /// Case-insensitive substring of company.
    pub company: Option<String>,
    /// Exact source tag, compared lowercased.
    pub source: Option<String>,
}

fn normalized(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

impl JobFilter {
    /// Keeps the matching listings in their input order. Never re-sorts.
    pub fn apply(&self, listings: Vec<JobListing>) -> Vec<JobListing> {
        let query = normalized(&self.query);
        let company = normalized(&self.company);
        let source = normalized(&self.source);
        listings
            .into_iter()
            .filter(|l| matches_normalized(l, query.as_deref(), company.as_deref(), source.as_deref()))
            .collect()
    }
}

fn matches_normalized(
    listing: &JobListing,
    query: Option<&str>,
    company: Option<&str>,
    source: Option<&str>,
) -> bool {
    if let Some(q) = query {
        let hit = listing.title.to_lowercase().contains(q)
            || listing.description.to_lowercase().contains(q)
            || listing.company.to_lowercase().contains(q);
        if !hit {
            return false;
        }
    }
    if let Some(c) = company {
        if !listing.company.to_lowercase().contains(c) {
            return false;
        }
    }
    if let Some(s) = source {
        if listing.source.as_str() != s {
            return false;
        }
    }
    true
}

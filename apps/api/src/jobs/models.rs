use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream provider of listings. Serialized as its lowercase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSourceKind {
    Remotive,
    #[serde(rename = "weworkremotely")]
    WeWorkRemotely,
}

impl JobSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSourceKind::Remotive => "remotive",
            JobSourceKind::WeWorkRemotely => "weworkremotely",
        }
    }
}

impl fmt::Display for JobSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized remote-job record. Every field is always present; upstream
/// gaps become empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub url: String,
    /// ISO-8601. For scraped listings this is the fetch time, not the posting time.
    pub published_at: String,
    pub source: JobSourceKind,
}

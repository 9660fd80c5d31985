// Remote-job aggregation: two upstream sources fetched concurrently,
// normalized into `JobListing`, merged newest-first, then filtered.
// Upstream failures degrade to empty lists; nothing here is cached.

pub mod aggregator;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod remotive;
pub mod source;
pub mod weworkremotely;

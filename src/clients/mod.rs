pub mod endpoints;
pub mod http_fetcher;
pub mod resource_fetcher;

pub use http_fetcher::HttpFetcher;
pub use resource_fetcher::{classify_status, ResourceFetcher};

#[cfg(test)]
pub use resource_fetcher::MockResourceFetcher;

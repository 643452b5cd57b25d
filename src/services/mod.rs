pub mod collapse_state;
pub mod content_service;
pub mod test_case_orderer;

pub use collapse_state::CollapseState;
pub use content_service::{ContentService, ProblemDetail};

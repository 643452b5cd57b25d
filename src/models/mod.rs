pub mod bundle;
pub mod de;
pub mod listing;
pub mod status;
pub mod submission;
pub mod test_case;

pub use bundle::{ContentBundle, ContentSection, WELL_KNOWN_SECTIONS};
pub use listing::{ContestSummary, ProblemSummary, SolutionDoc};
pub use status::VerdictStatus;
pub use submission::{CaseVerdict, Language, SubmissionRecord, SubmissionRequest, SubmissionResult};
pub use test_case::{SampleCase, TestCase, TestCaseSet};

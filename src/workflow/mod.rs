pub mod submission_flow;
pub mod view_state;

pub use submission_flow::{SubmissionState, SubmissionWorkflow, SubmitOutcome};
pub use view_state::{LoadState, PendingLoad, Settled, Ticket, ViewState};

pub mod commit;

pub use commit::{CommitOutcome, CommitWorkflow, ReviewsOutcome};

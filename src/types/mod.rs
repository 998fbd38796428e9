pub mod comment;
pub mod issue;
pub mod run;

pub use comment::{comment_key, ExistingComment, ExistingComments, PendingComment};
pub use issue::{Issue, IssueLevel};
pub use run::{ScanPass, ScanRun};

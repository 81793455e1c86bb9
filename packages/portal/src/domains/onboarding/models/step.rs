use serde::{Deserialize, Serialize};

/// Steps of the provider portal signup flow, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Practice information; creates the provider record and session marker
    Entry,
    Qualifications,
    ProfileContent,
    Completion,
}

impl Step {
    /// Default route for the step
    pub fn route(self) -> &'static str {
        match self {
            Step::Entry => "/provider-portal",
            Step::Qualifications => "/qualifications",
            Step::ProfileContent => "/profile-content",
            Step::Completion => "/completion",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Entry => write!(f, "entry"),
            Step::Qualifications => write!(f, "qualifications"),
            Step::ProfileContent => write!(f, "profile_content"),
            Step::Completion => write!(f, "completion"),
        }
    }
}

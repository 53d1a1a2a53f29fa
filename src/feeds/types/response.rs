#![allow(
    clippy::module_name_repetitions,
    reason = "Response suffix is intentional for clarity"
)]

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{DisplayFromStr, NoneAsEmptyString, serde_as};

use crate::serde_helpers::Sequence;

/// Status of a submitted feed.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct FeedSubmissionInfo {
    pub feed_submission_id: String,
    pub feed_type: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub submitted_date: Option<DateTime<Utc>>,
    /// `_SUBMITTED_`, `_IN_PROGRESS_`, `_DONE_`, ...
    pub feed_processing_status: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub started_processing_date: Option<DateTime<Utc>>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub completed_processing_date: Option<DateTime<Utc>>,
}

/// Result of `GetFeedSubmissionList`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct FeedSubmissionPage {
    #[serde_as(as = "Sequence")]
    #[serde(rename = "FeedSubmissionInfo", default)]
    pub submissions: Vec<FeedSubmissionInfo>,
    pub next_token: Option<String>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub has_next: Option<bool>,
}

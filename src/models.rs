use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_ERROR, STATUS_RUNNING};

/// Body returned by `GET /queue/{workflowId}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueueResponse {
    pub cwltool_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcome of one successful status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Error { message: String },
    Done,
}

impl From<QueueResponse> for JobStatus {
    /// Anything other than `RUNNING` or `ERROR` counts as finished.
    fn from(resp: QueueResponse) -> Self {
        match resp.cwltool_status.as_str() {
            STATUS_RUNNING => JobStatus::Running,
            STATUS_ERROR => JobStatus::Error {
                message: resp.message.unwrap_or_default(),
            },
            _ => JobStatus::Done,
        }
    }
}

/// One presentation of a logical workflow element: a node in the rendered
/// diagram (by DOM id) or a row of the step table (by document order).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementRef {
    Node(String),
    Row(usize),
}

impl ElementRef {
    pub fn node(id: impl Into<String>) -> Self {
        ElementRef::Node(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_response_maps_to_job_status() {
        let running: QueueResponse =
            serde_json::from_str(r#"{"cwltoolStatus":"RUNNING"}"#).unwrap();
        assert_eq!(JobStatus::from(running), JobStatus::Running);

        let failed: QueueResponse =
            serde_json::from_str(r#"{"cwltoolStatus":"ERROR","message":"boom"}"#).unwrap();
        assert_eq!(
            JobStatus::from(failed),
            JobStatus::Error {
                message: "boom".into()
            }
        );

        let other: QueueResponse =
            serde_json::from_str(r#"{"cwltoolStatus":"SUCCESS"}"#).unwrap();
        assert_eq!(JobStatus::from(other), JobStatus::Done);
    }

    #[test]
    fn error_without_message_is_empty_string() {
        let failed: QueueResponse = serde_json::from_str(r#"{"cwltoolStatus":"ERROR"}"#).unwrap();
        assert_eq!(
            JobStatus::from(failed),
            JobStatus::Error {
                message: String::new()
            }
        );
    }
}

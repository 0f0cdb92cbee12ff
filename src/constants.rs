// Polling defaults - single source of truth for retry timing
pub const JOB_STATUS_RETRY_MS: u32 = 3000;
pub const ARTIFACT_RETRY_MS: u32 = 5000;

// Pan/zoom is attached after the renderer's fade-in transition finishes
pub const PAN_ZOOM_ATTACH_DELAY_MS: u32 = 1000;

// Status values reported by the queue endpoint
pub const STATUS_RUNNING: &str = "RUNNING";
pub const STATUS_ERROR: &str = "ERROR";

// Rendered diagram markup
pub const GRAPH_CONTAINER_SELECTOR: &str = "#graph";
pub const GRAPH_NODE_SELECTOR: &str = "#graph g.node";
pub const GRAPH_EDGE_TITLE_SELECTOR: &str = "#graph g.edge > title";
pub const TABLE_ROW_SELECTOR: &str = "table tbody tr";
pub const EDGE_DELIMITER: &str = "->";

// Selection / hover classes shared by both presentations
pub const SELECTED_CLASS: &str = "selected";
pub const HOVER_CLASS: &str = "hover";

// Form messages
pub const MSG_SSH_UNSUPPORTED: &str =
    "SSH is not supported as a protocol, please provide a HTTPS URL to clone";
pub const MSG_BRANCH_REQUIRED: &str = "You must provide a branch name for the workflow";
pub const MSG_PATH_REQUIRED: &str =
    "You must provide a path to the workflow or a directory of workflows";
pub const MSG_UNSUPPORTED_URL: &str =
    "Must be a URL to a workflow or directory of workflows on Gitlab or Github, or a Git repository URL";

pub const DOT_DATA_URI_PREFIX: &str = "data:text/plain;charset=utf-8,";

//! URL classification for the add-workflow form.
//!
//! Three shapes are recognised: GitHub and GitLab web URLs (which carry the
//! branch and path in the URL itself) and generic Git clone URLs, which need
//! the branch and path typed into the extra inputs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::{
    MSG_BRANCH_REQUIRED, MSG_PATH_REQUIRED, MSG_SSH_UNSUPPORTED, MSG_UNSUPPORTED_URL,
};
use crate::errors::{FormField, ValidationError};

// owner / repo, then optionally tree|blob / branch / path.  Word characters
// are ASCII only throughout, as browsers match them.
const HOSTED_TAIL: &str =
    r"/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/?(?:(?:tree|blob)/([^/]+)/?(.*)?)?$";

lazy_static! {
    static ref GITHUB_URL: Regex = Regex::new(&format!(r"^https?://github\.com{}", HOSTED_TAIL))
        .expect("GitHub URL pattern must compile");
    static ref GITLAB_URL: Regex = Regex::new(&format!(r"^https?://gitlab\.com{}", HOSTED_TAIL))
        .expect("GitLab URL pattern must compile");
    static ref GIT_URL: Regex =
        Regex::new(r"^((git|ssh|http(s)?)|(git@[A-Za-z0-9_.]+))(:(//)?)([A-Za-z0-9_.@:/\-~]+)(\.git)(/)?$")
            .expect("Git URL pattern must compile");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    GitHub,
    GitLab,
    /// Any clone URL ending in `.git`.
    Git,
    Unsupported,
}

/// Classify a repository URL.  Generic Git URLs win over the hosted shapes,
/// so `https://github.com/o/r.git` asks for branch and path.
pub fn classify_url(input: &str) -> UrlKind {
    if GIT_URL.is_match(input) {
        UrlKind::Git
    } else if GITHUB_URL.is_match(input) {
        UrlKind::GitHub
    } else if GITLAB_URL.is_match(input) {
        UrlKind::GitLab
    } else {
        UrlKind::Unsupported
    }
}

/// Whether the branch/path inputs should be visible for this URL.
pub fn needs_git_details(input: &str) -> bool {
    classify_url(input) == UrlKind::Git
}

fn is_ssh(input: &str) -> bool {
    input.starts_with("ssh") || input.starts_with("git@")
}

/// Values of the add-workflow form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowForm {
    pub url: String,
    pub branch: String,
    pub path: String,
}

impl WorkflowForm {
    pub fn new(url: impl Into<String>, branch: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            branch: branch.into(),
            path: path.into(),
        }
    }

    /// Check the form.  Every problem is reported, one per field.
    pub fn validate(&self) -> Result<UrlKind, Vec<ValidationError>> {
        let url = self.url.trim();
        let kind = classify_url(url);
        let mut errors = Vec::new();

        match kind {
            UrlKind::Git if is_ssh(url) => {
                errors.push(ValidationError::new(FormField::Url, MSG_SSH_UNSUPPORTED));
            }
            UrlKind::Git => {
                if self.branch.is_empty() {
                    errors.push(ValidationError::new(FormField::Branch, MSG_BRANCH_REQUIRED));
                }
                if self.path.is_empty() {
                    errors.push(ValidationError::new(FormField::Path, MSG_PATH_REQUIRED));
                }
            }
            UrlKind::Unsupported => {
                errors.push(ValidationError::new(FormField::Url, MSG_UNSUPPORTED_URL));
            }
            UrlKind::GitHub | UrlKind::GitLab => {}
        }

        if errors.is_empty() {
            Ok(kind)
        } else {
            Err(errors)
        }
    }
}

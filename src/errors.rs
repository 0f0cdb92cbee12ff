//! Error types for the viewer.
//!
//! Only [`ValidationError`] and the job message carried by
//! [`PollFailure`](crate::polling::PollFailure) ever reach the user.  Transport
//! errors are retried and graph errors are logged.

use std::fmt;

use thiserror::Error;
use wasm_bindgen::JsValue;

/// A status query that did not produce a usable answer.  Always retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status query for '{target}' failed: {reason}")]
pub struct TransportError {
    pub target: String,
    pub reason: String,
}

impl TransportError {
    pub fn new(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Fields of the add-workflow form that can carry an inline warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Url,
    Branch,
    Path,
}

impl FormField {
    /// DOM id of the `<input>` for this field.
    pub fn element_id(self) -> &'static str {
        match self {
            FormField::Url => "url",
            FormField::Branch => "branch",
            FormField::Path => "path",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Form input that does not match an accepted shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Internal consistency errors raised while building the selection model
/// from rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// Two rendered nodes share the same DOM id.
    #[error("duplicate diagram node id: {id}")]
    DuplicateNode { id: String },

    /// An edge title without the `->` delimiter or with an empty endpoint.
    #[error("malformed edge title: '{title}'")]
    MalformedEdge { title: String },

    /// An edge references a node title that was never registered.
    #[error("edge '{title}' references unknown node '{endpoint}'")]
    DanglingEdge { title: String, endpoint: String },

    /// A lookup by node id that is not part of the model.
    #[error("unknown diagram node: {id}")]
    UnknownNode { id: String },

    /// A row index past the end of the scanned table.
    #[error("unknown table row: {index}")]
    UnknownRow { index: usize },

    /// The scan found no nodes; the renderer has not produced the SVG yet.
    #[error("diagram has not been rendered")]
    EmptyDiagram,
}

pub type GraphResult<T> = Result<T, GraphError>;

impl From<GraphError> for JsValue {
    fn from(err: GraphError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<TransportError> for JsValue {
    fn from(err: TransportError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

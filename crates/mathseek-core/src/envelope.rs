use crate::Error;
use crate::decode::{RawResponse, normalize};
use crate::document::{SolveDocument, non_blank};
use crate::lenient;
use crate::render::{PresentationTree, error_tree, render};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply of the solve endpoint: `{ result?, error?, query_id? }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveEnvelope {
    /// Raw model output, as JSON text or an already structured object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
}

/// What a response amounts to once decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A document, which may itself be a refusal.
    Document(SolveDocument),
    /// The request failed upstream; the message is shown verbatim.
    Failure(String),
    /// Nothing usable came back.
    Empty,
}

impl SolveEnvelope {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Wraps model output as a successful envelope.
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            result: Some(Value::String(result.into())),
            ..Default::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Decodes the envelope.
    ///
    /// A decodable `result` wins. Otherwise a non-blank `error` becomes a
    /// [`Outcome::Failure`]; with neither the outcome is [`Outcome::Empty`].
    /// The envelope's `query_id` is copied onto a document that has none.
    pub fn outcome(&self) -> Outcome {
        let raw = self.result.clone().and_then(RawResponse::from_value);
        if let Some(mut doc) = normalize(raw) {
            if doc.query_id.is_none() {
                doc.query_id = self.query_id.clone();
            }
            return Outcome::Document(doc);
        }

        if self.result.is_some() {
            log::warn!("Solve result could not be decoded");
        }
        match non_blank(&self.error) {
            Some(message) => Outcome::Failure(message.to_string()),
            None => Outcome::Empty,
        }
    }
}

impl Outcome {
    pub fn document(&self) -> Option<&SolveDocument> {
        match self {
            Outcome::Document(doc) => Some(doc),
            _ => None,
        }
    }
}

/// Renders an outcome: a document normally, a failure as a lone error section,
/// and nothing at all for an empty outcome.
pub fn render_outcome(outcome: &Outcome) -> PresentationTree {
    match outcome {
        Outcome::Document(doc) => render(doc),
        Outcome::Failure(message) => error_tree(message),
        Outcome::Empty => PresentationTree::default(),
    }
}

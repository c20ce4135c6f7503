use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// The normalized shape of one solver response.
///
/// Every field is optional on the wire. Text fields marked *mixed* hold prose
/// with embedded math spans; fields marked *math* hold bare (or singly
/// delimited) math markup.
///
/// A document with [`error`](Self::error) set is a refusal from the model and
/// none of its other fields are displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveDocument {
    /// Echo of the problem (mixed).
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub problem_text: Option<String>,
    /// Older responses echoed the problem under this key.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub problem_latex: Option<String>,
    /// Domain and variable assumptions (mixed).
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<String>,
    #[serde(default, deserialize_with = "lenient::items", skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepItem>,
    /// One entry per solution (math).
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub solution_set: Vec<String>,
    /// One concluding sentence (mixed).
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub final_answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub formats: Option<Formats>,
    /// Remarks on special cases and branches (mixed).
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Id of the stored query this response belongs to.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
}

impl SolveDocument {
    /// Builds a document from an already-decoded JSON object.
    ///
    /// Returns `None` for anything that is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::warn!("Failed to read solve document: {}", e);
                None
            }
        }
    }

    /// The refusal message, if this is an error document.
    ///
    /// Any non-empty `error` marks a refusal, including one holding only
    /// whitespace; only an absent or empty value does not.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }

    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }

    /// The problem echo, falling back to the legacy field. Blank values count as absent.
    pub fn problem(&self) -> Option<&str> {
        non_blank(&self.problem_text).or_else(|| non_blank(&self.problem_latex))
    }
}

/// One step of the worked solution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepItem {
    /// Short label for the rule applied (mixed).
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub step: String,
    /// The resulting expression (math).
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub expression: String,
    /// The theorem or identity used (mixed).
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "lenient::items", skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckItem>,
    #[serde(default, deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub extraneous_solutions: Vec<String>,
}

impl Verification {
    /// True when there is anything worth showing.
    pub fn has_content(&self) -> bool {
        non_blank(&self.method).is_some()
            || !self.checks.is_empty()
            || !self.extraneous_solutions.is_empty()
    }
}

/// Substitution of one candidate back into the problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckItem {
    /// The candidate solution (math).
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub candidate: String,
    /// The substitution or inequality check (mixed).
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub residual_or_truth: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Formats {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub exact: Option<String>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub approx_decimal: Option<ApproxDecimal>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub interval_notation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproxDecimal {
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub precision: Option<Precision>,
}

/// Number of decimal places, sent either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Precision {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(Precision::Number(n)),
            Value::String(s) => Ok(Precision::Text(s)),
            Value::Bool(b) => Ok(Precision::Text(b.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or string for precision, found {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Number(n) => write!(f, "{}", n),
            Precision::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

/// `Some` only for values with visible content.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

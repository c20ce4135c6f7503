//! Stored queries as delivered by the history endpoints.

use crate::Error;
use crate::decode::{RawResponse, normalize};
use crate::document::{SolveDocument, non_blank};
use crate::lenient;
use crate::render::{PresentationTree, render};
use mathseek_markup::{Segment, sanitize, split};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One saved query.
///
/// The listing endpoint omits `result`; fetching a single record includes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Accepts numeric ids as well as UUID strings.
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub equation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl StoredRecord {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The sanitized equation, used as the record's label.
    pub fn label(&self) -> String {
        sanitize(&self.equation)
    }

    /// The label split into text and math for display.
    pub fn equation_segments(&self) -> Vec<Segment> {
        split(&self.label())
    }

    /// Decodes the stored model output.
    pub fn document(&self) -> Option<SolveDocument> {
        let mut doc = normalize(self.result.clone().and_then(RawResponse::from_value))?;
        if doc.query_id.is_none() && !self.id.is_empty() {
            doc.query_id = Some(self.id.clone());
        }
        Some(doc)
    }

    /// Renders the stored output; records without a decodable result render empty.
    pub fn render(&self) -> PresentationTree {
        self.document().map(|doc| render(&doc)).unwrap_or_default()
    }
}

/// Reply of the listing endpoint: `{ queries?, error? }`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryList {
    #[serde(default, deserialize_with = "lenient::items")]
    pub queries: Vec<StoredRecord>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryList {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn find(&self, id: &str) -> Option<&StoredRecord> {
        self.queries.iter().find(|record| record.id == id)
    }

    pub fn error_message(&self) -> Option<&str> {
        non_blank(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_sanitizes_equation() {
        let record = StoredRecord {
            equation: r"\int x \differentialD x".into(),
            ..Default::default()
        };
        assert_eq!(record.label(), r"\int x \,dx");
        assert_eq!(
            record.equation_segments(),
            vec![Segment::Math(r"\int x \,dx".into())]
        );
    }

    #[test]
    fn test_document_takes_record_id() {
        let record: StoredRecord = serde_json::from_value(json!({
            "id": 7,
            "equation": "x+1=2",
            "result": "{\"final_answer\":\"$x=1$\"}",
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.id, "7");
        let doc = record.document().unwrap();
        assert_eq!(doc.query_id.as_deref(), Some("7"));
        assert_eq!(doc.final_answer.as_deref(), Some("$x=1$"));
    }

    #[test]
    fn test_record_without_result_renders_empty() {
        let record = StoredRecord {
            id: "a".into(),
            equation: "x".into(),
            ..Default::default()
        };
        assert!(record.document().is_none());
        assert!(record.render().is_empty());
    }

    #[test]
    fn test_query_list_find() {
        let list = QueryList::from_json(
            r#"{"queries":[{"id":"a","equation":"x=1"},{"id":"b","equation":"y=2"},"junk"]}"#,
        )
        .unwrap();
        assert_eq!(list.queries.len(), 2);
        assert_eq!(list.find("b").unwrap().equation, "y=2");
        assert!(list.find("c").is_none());
        assert!(list.error_message().is_none());
    }

    #[test]
    fn test_query_list_error() {
        let list = QueryList::from_json(r#"{"error":"Not authenticated"}"#).unwrap();
        assert!(list.queries.is_empty());
        assert_eq!(list.error_message(), Some("Not authenticated"));
    }
}

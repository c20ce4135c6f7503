use mathseek_markup::Segment;
use serde::{Deserialize, Serialize};

/// Display-agnostic rendering of a solve document.
///
/// Sections appear in display order. Leaves hold either plain text, split
/// mixed content, or bare math markup ready for a typesetter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationTree {
    pub sections: Vec<Section>,
}

impl PresentationTree {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub children: Vec<Node>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Error,
    Problem,
    Steps,
    FinalAnswer,
    Formats,
    Verification,
    Notes,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Error => "Error",
            SectionKind::Problem => "Problem",
            SectionKind::Steps => "Steps",
            SectionKind::FinalAnswer => "Final answer",
            SectionKind::Formats => "Formats",
            SectionKind::Verification => "Verification",
            SectionKind::Notes => "Notes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Node {
    /// Verbatim text, never typeset.
    Text(String),
    /// Prose with embedded math.
    Mixed(Vec<Segment>),
    /// A single math span.
    Math(MathSpan),
    /// Pass/fail marker of a verification check.
    Badge(Badge),
    /// Labeled sub-tree.
    Group { label: String, children: Vec<Node> },
    /// Collapsible solution step, numbered from 1.
    Step {
        number: usize,
        label: Vec<Segment>,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn group(label: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Group {
            label: label.into(),
            children,
        }
    }
}

/// Bare math markup; delimiters are already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathSpan {
    pub markup: String,
    /// Block (centered) rather than inline placement.
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub valid: bool,
}

impl Badge {
    pub fn validity(valid: bool) -> Self {
        Self {
            label: if valid { "Valid" } else { "Invalid" }.to_string(),
            valid,
        }
    }
}

//! Document rendering.
//!
//! [`render`] walks a [`SolveDocument`] and produces a [`PresentationTree`]:
//! mixed fields go through [`mathseek_markup::split`], pure math fields through
//! [`mathseek_markup::strip_delimiters`]. A missing or blank field only ever
//! removes its own node or section.

mod text;
mod tree;


pub use tree::{Badge, MathSpan, Node, PresentationTree, Section, SectionKind};

use crate::document::{CheckItem, Formats, SolveDocument, StepItem, Verification, non_blank};
use mathseek_markup::{split, strip_delimiters};

pub const NO_PROBLEM: &str = "No problem provided.";
pub const NO_FINAL_ANSWER: &str = "No final answer provided.";
/// Shown for a refusal whose message is only whitespace.
pub const NO_ERROR_MESSAGE: &str = "The solver declined this problem.";

/// Renders a document into display sections.
///
/// An error document renders a single [`SectionKind::Error`] section and
/// nothing else.
pub fn render(doc: &SolveDocument) -> PresentationTree {
    if let Some(message) = doc.error_message() {
        let message = if message.trim().is_empty() {
            NO_ERROR_MESSAGE
        } else {
            message
        };
        return error_tree(message);
    }

    let mut sections = vec![problem_section(doc)];

    if !doc.steps.is_empty() {
        let mut section = Section::new(SectionKind::Steps);
        section.children = doc
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| step_node(index + 1, step))
            .collect();
        sections.push(section);
    }

    let final_answer = non_blank(&doc.final_answer);
    if final_answer.is_some() || !doc.solution_set.is_empty() {
        sections.push(final_answer_section(final_answer, &doc.solution_set));
    }

    if let Some(formats) = &doc.formats {
        sections.push(formats_section(formats));
    }

    if let Some(verification) = doc.verification.as_ref().filter(|v| v.has_content()) {
        sections.push(verification_section(verification));
    }

    if let Some(notes) = non_blank(&doc.notes) {
        let mut section = Section::new(SectionKind::Notes);
        section.children.push(mixed(notes));
        sections.push(section);
    }

    PresentationTree { sections }
}

/// A tree holding only an error section with `message` verbatim.
pub fn error_tree(message: &str) -> PresentationTree {
    let mut section = Section::new(SectionKind::Error);
    section.children.push(Node::Text(message.to_string()));
    PresentationTree {
        sections: vec![section],
    }
}

fn problem_section(doc: &SolveDocument) -> Section {
    let mut section = Section::new(SectionKind::Problem);
    section.children.push(match doc.problem() {
        Some(problem) => mixed(problem),
        None => Node::Text(NO_PROBLEM.to_string()),
    });
    if let Some(assumptions) = non_blank(&doc.assumptions) {
        section
            .children
            .push(Node::group("Assumptions", vec![mixed(assumptions)]));
    }
    section
}

fn step_node(number: usize, step: &StepItem) -> Node {
    let mut children = Vec::new();
    children.extend(math(&step.expression, true));
    if let Some(justification) = non_blank(&step.justification) {
        children.push(Node::group("Justification", vec![mixed(justification)]));
    }
    Node::Step {
        number,
        label: split(&step.step),
        children,
    }
}

fn final_answer_section(final_answer: Option<&str>, solution_set: &[String]) -> Section {
    let mut section = Section::new(SectionKind::FinalAnswer);
    section.children.push(match final_answer {
        Some(answer) => mixed(answer),
        None => Node::Text(NO_FINAL_ANSWER.to_string()),
    });
    if !solution_set.is_empty() {
        let solutions = solution_set.iter().filter_map(|s| math(s, false)).collect();
        section.children.push(Node::group("Solution set", solutions));
    }
    section
}

fn formats_section(formats: &Formats) -> Section {
    let mut section = Section::new(SectionKind::Formats);

    if let Some(exact) = non_blank(&formats.exact) {
        section.children.push(Node::group("Exact", vec![mixed(exact)]));
    }

    if let Some(approx) = &formats.approx_decimal {
        if !approx.value.trim().is_empty() {
            let mut children = vec![mixed(&approx.value)];
            let precision = approx
                .precision
                .as_ref()
                .map(ToString::to_string)
                .filter(|p| !p.trim().is_empty());
            if let Some(precision) = precision {
                children.push(Node::Text(format!("Precision: {} decimal places", precision)));
            }
            section.children.push(Node::group("Approx.", children));
        }
    }

    if let Some(interval) = non_blank(&formats.interval_notation) {
        section
            .children
            .push(Node::group("Interval notation", vec![mixed(interval)]));
    }

    section
}

fn verification_section(verification: &Verification) -> Section {
    let mut section = Section::new(SectionKind::Verification);

    if let Some(method) = non_blank(&verification.method) {
        section.children.push(Node::group("Method", vec![mixed(method)]));
    }

    if !verification.checks.is_empty() {
        let checks = verification
            .checks
            .iter()
            .enumerate()
            .map(|(index, check)| check_node(index + 1, check))
            .collect();
        section.children.push(Node::group("Checks", checks));
    }

    if !verification.extraneous_solutions.is_empty() {
        let extraneous = verification
            .extraneous_solutions
            .iter()
            .filter_map(|s| math(s, false))
            .collect();
        section
            .children
            .push(Node::group("Extraneous solutions", extraneous));
    }

    section
}

fn check_node(number: usize, check: &CheckItem) -> Node {
    let mut children = Vec::new();
    if let Some(candidate) = math(&check.candidate, false) {
        children.push(Node::group("Candidate", vec![candidate]));
    }
    if !check.residual_or_truth.trim().is_empty() {
        children.push(Node::group("Residual/Truth", vec![mixed(&check.residual_or_truth)]));
    }
    children.push(Node::Badge(Badge::validity(check.valid)));
    Node::group(format!("Check {}", number), children)
}

fn mixed(text: &str) -> Node {
    Node::Mixed(split(text))
}

fn math(markup: &str, display: bool) -> Option<Node> {
    strip_delimiters(markup).map(|markup| {
        Node::Math(MathSpan {
            markup: markup.to_string(),
            display,
        })
    })
}

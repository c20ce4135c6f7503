use mathseek_core::render::{MathSpan, NO_PROBLEM};
use mathseek_core::{
    Node, Outcome, QueryList, SectionKind, SolveEnvelope, StoredRecord, render_outcome,
};
use mathseek_markup::Segment;

#[test]
fn test_string_result_renders_problem_and_answer() {
    let envelope = SolveEnvelope::from_json(
        r#"{"result":"{\"problem_text\":\"x+1=2\",\"final_answer\":\"The solution is $x=1$.\"}"}"#,
    )
    .unwrap();
    let tree = render_outcome(&envelope.outcome());

    let kinds: Vec<SectionKind> = tree.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::Problem, SectionKind::FinalAnswer]);

    // No delimiters and no math commands, so the problem stays text.
    assert_eq!(
        tree.sections[0].children,
        vec![Node::Mixed(vec![Segment::Text("x+1=2".into())])]
    );
    assert_eq!(
        tree.sections[1].children,
        vec![Node::Mixed(vec![
            Segment::Text("The solution is ".into()),
            Segment::Math("x=1".into()),
            Segment::Text(".".into()),
        ])]
    );
}

#[test]
fn test_error_envelope_renders_single_error_section() {
    let envelope =
        SolveEnvelope::from_json(r#"{"error":"Provider error: 502 - upstream down"}"#).unwrap();
    let outcome = envelope.outcome();
    assert!(matches!(outcome, Outcome::Failure(_)));

    let tree = render_outcome(&outcome);
    assert_eq!(tree.sections.len(), 1);
    assert_eq!(tree.sections[0].kind, SectionKind::Error);
    assert_eq!(
        tree.sections[0].children,
        vec![Node::Text("Provider error: 502 - upstream down".into())]
    );
}

#[test]
fn test_fenced_object_result() {
    let envelope = SolveEnvelope::success("```json\n{\"steps\":[{\"step\":\"Expand\",\"expression\":\"$$x^2+2x+1$$\"}]}\n```");
    let tree = render_outcome(&envelope.outcome());
    assert_eq!(tree.sections[0].children, vec![Node::Text(NO_PROBLEM.into())]);
    let steps = tree.section(SectionKind::Steps).unwrap();
    assert_eq!(
        steps.children,
        vec![Node::Step {
            number: 1,
            label: vec![Segment::Text("Expand".into())],
            children: vec![Node::Math(MathSpan {
                markup: "x^2+2x+1".into(),
                display: true,
            })],
        }]
    );
}

#[test]
fn test_mistyped_fields_are_dropped_not_fatal() {
    let envelope = SolveEnvelope::success(
        r#"{"problem_text":"x=1","steps":"not a list","formats":[1,2],"verification":{"checks":[{"candidate":"1","residual_or_truth":"1=1","valid":"TRUE"},7]}}"#,
    );
    let doc = envelope.outcome().document().cloned().unwrap();
    assert!(doc.steps.is_empty());
    assert!(doc.formats.is_none());
    let checks = &doc.verification.unwrap().checks;
    assert_eq!(checks.len(), 1);
    assert!(checks[0].valid);
}

#[test]
fn test_stored_record_sanitizes_label() {
    let record = StoredRecord::from_json(
        r#"{"id":"5c1e","equation":"```\\int x \\differentialD x```","created_at":"2025-03-01T12:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(record.label(), "\\int x \\,dx");

    let record = StoredRecord {
        equation: "\\differentialD x".into(),
        ..Default::default()
    };
    assert_eq!(record.label(), "\\,dx");
}

#[test]
fn test_history_select_and_render() {
    let list = QueryList::from_json(
        r#"{"queries":[
            {"id":2,"equation":"$x^2=9$","result":"{\"solution_set\":[\"x=3\",\"x=-3\"]}"},
            {"id":1,"equation":"x+1=2"}
        ]}"#,
    )
    .unwrap();
    let record = list.find("2").unwrap();
    let tree = record.render();
    let final_answer = tree.section(SectionKind::FinalAnswer).unwrap();
    assert_eq!(final_answer.children.len(), 2);
    assert!(list.find("1").unwrap().render().is_empty());
}

#[test]
fn test_whitespace_refusal_hides_solution_fields() {
    let envelope = SolveEnvelope::success(r#"{"error":"   ","problem_text":"x"}"#);
    let tree = render_outcome(&envelope.outcome());
    let kinds: Vec<SectionKind> = tree.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::Error]);
}

//! Prompt construction for the solve and step-question requests.

use crate::Error;
use crate::document::{StepItem, non_blank};

/// Shape the model is asked to answer with. Mirrors [`crate::SolveDocument`].
pub const RESPONSE_SCHEMA: &str = r#"{
  "problem_text": "echo of the input latex",
  "assumptions": "latex stating domain, variable or constraint assumptions",
  "steps": [
    {
      "step": "short latex description of the rule applied",
      "expression": "latex expression after applying the rule, one sub-step at a time",
      "justification": "optional latex naming the theorem, property or identity"
    }
  ],
  "solution_set": ["each solution in latex"],
  "final_answer": "one latex sentence stating the result",
  "verification": {
    "method": "latex description of how the result was checked",
    "checks": [
      {
        "candidate": "latex for a candidate solution",
        "residual_or_truth": "latex showing the substitution or inequality truth",
        "valid": true
      }
    ],
    "extraneous_solutions": ["discarded solutions in latex"]
  },
  "formats": {
    "exact": "exact latex form with radicals and fractions kept",
    "approx_decimal": {
      "value": "optional decimal approximation in latex",
      "precision": "number of decimal places"
    },
    "interval_notation": "interval notation in latex for inequalities or domains"
  },
  "notes": "optional latex remarks on special cases or branches"
}"#;

const SOLVE_RULES: &str = "\
Rules:
- Use pure latex for math tokens, without surrounding $, $$ or \\( \\).
- Prefer exact, simplified symbolic forms. Rationalize denominators and factor where natural.
- State domain restrictions from denominators, logarithms, even roots and trigonometry, and drop roots that violate them.
- List every solution or branch in \"solution_set\".
- For inequalities give the solution in \"formats.interval_notation\".
- For indefinite integrals include +C; for definite integrals state the limits.
- If the input is an expression rather than an equation, simplify or evaluate it and state the aim in \"assumptions\".
- If the problem is ambiguous, ill-posed or not math, return only { \"error\": \"brief reason in latex\" }.
- Output only the JSON object.";

/// Builds the solve instruction for `equation`.
///
/// The equation is trimmed; a blank equation is rejected.
pub fn solve_prompt(equation: &str) -> Result<String, Error> {
    let equation = equation.trim();
    if equation.is_empty() {
        return Err(Error::InvalidEquation);
    }

    Ok(format!(
        "You are a highly reliable math solver. You receive a math problem in latex and \
         return a strict JSON object only, with no markdown, code fences or commentary.\n\n\
         Return JSON matching this schema exactly, with double quotes and escaped backslashes:\n\
         {}\n\n{}\n\nSolve the following problem (latex): {}",
        RESPONSE_SCHEMA, SOLVE_RULES, equation
    ))
}

/// Builds a follow-up question about one step of a solution.
///
/// The model is asked to answer in delimited latex so the reply can go
/// straight through [`mathseek_markup::split`].
pub fn step_question_prompt(problem: &str, step: &StepItem, question: &str) -> Result<String, Error> {
    let question = question.trim();
    if question.is_empty() {
        return Err(Error::InvalidQuestion);
    }

    let mut prompt = String::from("I have the following math problem and one of its solution steps.\n");
    prompt.push_str(&format!("Problem: {}\n", problem.trim()));
    prompt.push_str(&format!("Step: {}\n", step.step));
    prompt.push_str(&format!("Expression: {}\n", step.expression));
    if let Some(justification) = non_blank(&step.justification) {
        prompt.push_str(&format!("Justification: {}\n", justification));
    }
    prompt.push_str(&format!(
        "\nAnswer the following question about this step:\n{}\n\n\
         Respond only with latex, enclosed in $$...$$ or \\[...\\]. \
         The first character of the answer must be $ or \\.",
        question
    ));
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolveDocument;

    #[test]
    fn test_solve_prompt_embeds_trimmed_equation() {
        let prompt = solve_prompt("  x^2 = 4 \n").unwrap();
        assert!(prompt.ends_with("(latex): x^2 = 4"));
        assert!(prompt.contains("\"solution_set\""));
    }

    #[test]
    fn test_solve_prompt_rejects_blank() {
        assert!(matches!(solve_prompt(""), Err(Error::InvalidEquation)));
        let err = solve_prompt(" \t").unwrap_err();
        assert_eq!(err.to_string(), "Invalid equation provided.");
    }

    #[test]
    fn test_schema_is_valid_document_json() {
        let value: serde_json::Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
        let doc = SolveDocument::from_value(value).unwrap();
        assert_eq!(doc.steps.len(), 1);
        assert!(doc.verification.unwrap().checks[0].valid);
    }

    #[test]
    fn test_step_question_prompt() {
        let step = StepItem {
            step: "Factor".into(),
            expression: "(x-2)(x+2)=0".into(),
            justification: None,
        };
        let prompt = step_question_prompt("x^2-4=0", &step, "Why factor?").unwrap();
        assert!(prompt.contains("Problem: x^2-4=0\n"));
        assert!(prompt.contains("Expression: (x-2)(x+2)=0\n"));
        assert!(!prompt.contains("Justification"));
        assert!(prompt.contains("Why factor?"));

        assert!(matches!(
            step_question_prompt("x", &step, "  "),
            Err(Error::InvalidQuestion)
        ));
    }
}

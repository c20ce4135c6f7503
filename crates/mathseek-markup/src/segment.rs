use crate::delimiters::{DelimiterPair, strip_delimiters};
use regex::Regex;
use serde::{Deserialize, Serialize};
use once_cell::sync::Lazy;

/// A classified run of mixed content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Segment {
    /// Plain prose, rendered verbatim.
    Text(String),
    /// Bare math markup with its delimiters already removed.
    Math(String),
}

impl Segment {
    pub fn content(&self) -> &str {
        match self {
            Segment::Text(s) | Segment::Math(s) => s,
        }
    }

    pub fn is_math(&self) -> bool {
        matches!(self, Segment::Math(_))
    }
}

/// Control sequences that mark an undelimited string as math.
///
/// Matched as whole command names, so `\in` does not fire on `\instance`.
pub const MATH_COMMANDS: &[&str] = &[
    // Structure
    "frac", "dfrac", "tfrac", "sqrt", "binom", "left", "right", "mathbb", "mathrm",
    // Operators
    "cdot", "times", "div", "pm", "mp", "sum", "prod", "int", "oint", "lim", "infty",
    "partial", "nabla",
    // Relations
    "leq", "geq", "neq", "le", "ge", "ne", "approx", "equiv", "in", "subset", "cup",
    "cap", "to",
    // Functions
    "log", "ln", "exp", "sin", "cos", "tan", "sec", "csc", "cot", "arcsin", "arccos",
    "arctan",
    // Greek
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta",
    "vartheta", "iota", "kappa", "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau",
    "upsilon", "phi", "varphi", "chi", "psi", "omega", "Gamma", "Delta", "Theta",
    "Lambda", "Xi", "Pi", "Sigma", "Phi", "Psi", "Omega",
];

/// Any of the four delimited spans, non-greedy, display forms first.
static MATH_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\$\$.*?\$\$|\\\[.*?\\\]|\$.*?\$|\\\(.*?\\\)").expect("valid regex literal")
});

static LOOKS_LIKE_MATH: Lazy<Regex> = Lazy::new(|| {
    let commands = MATH_COMMANDS.join("|");
    Regex::new(&format!(r"\\(?:{commands})(?:[^a-zA-Z]|$)|[\^_]")).expect("valid regex literal")
});

/// Splits mixed prose into ordered text and math segments.
///
/// The input is trimmed, then every delimited math span is cut out with one
/// layer of delimiters removed. Text between spans is kept verbatim; a span
/// whose body is blank (`$ $`) stays text so no empty math is produced.
///
/// When the whole input is a single text run with no delimiter characters that
/// still reads as math markup (see [`looks_like_math`]), it is returned as one
/// math segment. Models regularly drop the delimiters around a bare answer.
///
/// Joining the result with [`join`] gives back the input with every span
/// rewritten in `$...$` form.
///
/// # Examples
///
/// ```
/// use mathseek_markup::{split, Segment};
///
/// assert_eq!(split("x^2+1"), vec![Segment::Math("x^2+1".into())]);
/// assert_eq!(split("no math here"), vec![Segment::Text("no math here".into())]);
/// assert!(split("   ").is_empty());
/// ```
pub fn split(text: &str) -> Vec<Segment> {
    let text = text.trim();
    let mut segments = Vec::new();
    let mut last = 0;

    for span in MATH_SPAN.find_iter(text) {
        if span.start() > last {
            push_text(&mut segments, &text[last..span.start()]);
        }
        match strip_delimiters(span.as_str()) {
            Some(body) => segments.push(Segment::Math(body.to_string())),
            None => push_text(&mut segments, span.as_str()),
        }
        last = span.end();
    }
    if last < text.len() {
        push_text(&mut segments, &text[last..]);
    }

    if let [Segment::Text(only)] = segments.as_slice() {
        if !has_delimiter_chars(only) && looks_like_math(only) {
            return vec![Segment::Math(only.clone())];
        }
    }

    segments
}

/// Reassembles segments, wrapping each math segment in `$...$`.
pub fn join(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.clone(),
            Segment::Math(markup) => DelimiterPair::InlineDollar.wrap(markup),
        })
        .collect()
}

/// Heuristic for undelimited math: a known control sequence, or a `^`/`_`
/// superscript/subscript marker.
pub fn looks_like_math(text: &str) -> bool {
    LOOKS_LIKE_MATH.is_match(text)
}

fn has_delimiter_chars(text: &str) -> bool {
    text.contains('$')
        || DelimiterPair::ALL
            .into_iter()
            .filter(|pair| !pair.open().starts_with('$'))
            .any(|pair| text.contains(pair.open()) || text.contains(pair.close()))
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Text(previous)) = segments.last_mut() {
        previous.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}

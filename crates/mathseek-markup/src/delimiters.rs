use serde::{Deserialize, Serialize};

/// One of the four recognized math delimiter pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelimiterPair {
    /// `$$ .. $$`
    DisplayDollar,
    /// `\[ .. \]`
    DisplayBracket,
    /// `$ .. $`
    InlineDollar,
    /// `\( .. \)`
    InlineParen,
}

impl DelimiterPair {
    /// All pairs in matching priority: display forms before inline forms.
    pub const ALL: [DelimiterPair; 4] = [
        DelimiterPair::DisplayDollar,
        DelimiterPair::DisplayBracket,
        DelimiterPair::InlineDollar,
        DelimiterPair::InlineParen,
    ];

    pub fn open(self) -> &'static str {
        match self {
            DelimiterPair::DisplayDollar => "$$",
            DelimiterPair::DisplayBracket => "\\[",
            DelimiterPair::InlineDollar => "$",
            DelimiterPair::InlineParen => "\\(",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            DelimiterPair::DisplayDollar => "$$",
            DelimiterPair::DisplayBracket => "\\]",
            DelimiterPair::InlineDollar => "$",
            DelimiterPair::InlineParen => "\\)",
        }
    }

    /// Number of bytes removed from each end when this pair is stripped.
    pub fn width(self) -> usize {
        self.open().len()
    }

    /// Returns the highest-priority pair that both opens and closes `text`.
    ///
    /// `text` is expected to be trimmed already. The open and close tokens may
    /// overlap (`$$$` opens and closes with `$$`); stripping such a string yields
    /// nothing.
    pub fn enclosing(text: &str) -> Option<DelimiterPair> {
        Self::ALL
            .into_iter()
            .find(|pair| text.starts_with(pair.open()) && text.ends_with(pair.close()))
    }

    /// Wraps `markup` in this pair.
    pub fn wrap(self, markup: &str) -> String {
        format!("{}{}{}", self.open(), markup, self.close())
    }
}

/// Removes a single layer of surrounding math delimiters.
///
/// The input is trimmed, one enclosing [`DelimiterPair`] is removed if present,
/// and the remainder is trimmed again. Markup without delimiters comes back
/// trimmed but otherwise unchanged. Delimiters nested inside the body are left
/// alone.
///
/// Returns `None` when nothing renderable is left, so callers never emit an
/// empty math span.
///
/// # Examples
///
/// ```
/// use mathseek_markup::strip_delimiters;
///
/// assert_eq!(strip_delimiters("$$x^2$$"), Some("x^2"));
/// assert_eq!(strip_delimiters(r"\( \alpha \)"), Some(r"\alpha"));
/// assert_eq!(strip_delimiters("x^2"), Some("x^2"));
/// assert_eq!(strip_delimiters("$$$$"), None);
/// assert_eq!(strip_delimiters(""), None);
/// ```
pub fn strip_delimiters(markup: &str) -> Option<&str> {
    let trimmed = markup.trim();

    let body = match DelimiterPair::enclosing(trimmed) {
        Some(pair) => {
            let width = pair.width();
            if trimmed.len() < width * 2 {
                ""
            } else {
                &trimmed[width..trimmed.len() - width]
            }
        }
        None => trimmed,
    };

    let body = body.trim();
    if body.is_empty() { None } else { Some(body) }
}

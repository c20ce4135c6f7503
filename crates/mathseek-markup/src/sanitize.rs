use once_cell::sync::Lazy;
use regex::Regex;

const FENCE: &str = "```";

static BACKSLASH_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\{2,}").expect("valid regex literal"));

/// `\differentialD x`, `\differentiald x`, `\DifferentialD  t`, ...
static DIFFERENTIAL_MACRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:\\differentiald)\s*([a-zA-Z])").expect("valid regex literal")
});

static SPACED_DIFFERENTIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\,\s*d([a-zA-Z])").expect("valid regex literal"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid regex literal"));

/// Normalizes a raw math-markup string.
///
/// Used on the equation a user typed before it is echoed back (history labels)
/// and on markup pulled out of stored records. The rewrites run in a fixed
/// order, each one relying on the previous ones:
///
/// 1. Code-fence tokens (```` ``` ````) are removed, their content is kept.
/// 2. A literal `\n` (backslash, `n`) becomes a space.
/// 3. Runs of backslashes collapse to a single backslash.
/// 4. `\differentialD x` (any letter case) becomes `\,dx`.
/// 5. Every `\,dx` is normalized to ` \,dx`.
/// 6. Whitespace runs collapse to one space; the result is trimmed.
///
/// The function is total and idempotent.
///
/// # Examples
///
/// ```
/// use mathseek_markup::sanitize;
///
/// assert_eq!(sanitize(r"\int x \differentialD x"), r"\int x \,dx");
/// assert_eq!(sanitize(r"\\frac{1}{2}\n"), r"\frac{1}{2}");
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(raw: &str) -> String {
    let s = raw.replace(FENCE, "");
    let s = s.replace("\\n", " ");
    let s = BACKSLASH_RUN.replace_all(&s, "\\");
    let s = DIFFERENTIAL_MACRO.replace_all(&s, r"\,d${1}");
    let s = SPACED_DIFFERENTIAL.replace_all(&s, r" \,d${1}");
    let s = WHITESPACE_RUN.replace_all(&s, " ");

    s.trim().to_string()
}

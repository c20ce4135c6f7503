//! # MathSeek Markup
//!
//! String-level handling of the math markup that comes back from the solver model.
//!
//! ## Overview
//!
//! Model output mixes prose with LaTeX-style math and is rarely consistent about
//! it: spans arrive wrapped in any of four delimiter styles, escape sequences are
//! doubled, newlines show up as a literal `\n`, and code fences leak into fields.
//! This crate turns such strings into something a math typesetter can consume:
//!
//! - [`sanitize`] - collapses escape noise and canonicalizes differentials
//! - [`strip_delimiters`] - removes one layer of surrounding math delimiters
//! - [`split`] - splits prose into ordered [`Segment::Text`] / [`Segment::Math`] runs
//!
//! All functions are pure, never panic, and allocate only their output.
//!
//! ## Delimiters
//!
//! | Pair        | Style   | Width |
//! |-------------|---------|-------|
//! | `$$ .. $$`  | display | 2     |
//! | `\[ .. \]`  | display | 2     |
//! | `$ .. $`    | inline  | 1     |
//! | `\( .. \)`  | inline  | 1     |
//!
//! Display pairs always take priority so `$$x$$` is never read as two empty
//! inline spans around `x`.
//!
//! ## Examples
//!
//! ```
//! use mathseek_markup::{split, strip_delimiters, Segment};
//!
//! assert_eq!(strip_delimiters("$$x^2$$"), Some("x^2"));
//!
//! let segments = split("The answer is $x=2$.");
//! assert_eq!(
//!     segments,
//!     vec![
//!         Segment::Text("The answer is ".into()),
//!         Segment::Math("x=2".into()),
//!         Segment::Text(".".into()),
//!     ]
//! );
//! ```

pub mod delimiters;
pub mod sanitize;
pub mod segment;


pub use delimiters::{DelimiterPair, strip_delimiters};
pub use sanitize::sanitize;
pub use segment::{Segment, join, looks_like_math, split};

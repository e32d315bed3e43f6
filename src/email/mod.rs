//! Email extraction and validation
//!
//! Extraction runs several independent patterns over raw page text, folds the
//! obfuscated spellings (`[at]`, `(at)`, ` at `, spaced `@` and dots) into a
//! plain `local@domain` form, and then hands each candidate to the validator.
//! The validator is an ordered table of rejection rules that weeds out the
//! look-alikes a page is full of: image file names, `768x960` dimension markers,
//! `@2x` retina suffixes and screenshot/avatar naming.

mod extract;
mod rules;

pub use extract::{extract_candidates, extract_emails, normalize_candidate};
pub use rules::{is_valid_email, rejection, ValidationRule, RULES};

//! Query and document tokenization
//!
//! This module provides:
//! - tokenize: split text into alphanumeric-with-hyphen tokens
//! - ngram_windows: every n-gram window over a token list, widest first
//!
//! The same tokenizer runs over subjects, bodies, and queries so that index
//! keys and query keys always agree.

// ============================================================================
// Tokenization
// ============================================================================

/// Split text into tokens
///
/// A token is a maximal run of ASCII alphanumerics and hyphens; everything
/// else separates tokens. Case is preserved so that callers can apply their
/// own case rules.
///
/// # Example
///
/// ```
/// use mailsim_search::tokenizer::tokenize;
///
/// assert_eq!(
///     tokenize("Re: Q3-budget review!"),
///     vec!["Re", "Q3-budget", "review"],
/// );
/// assert!(tokenize("...").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .filter(|t| !t.is_empty())
        .collect()
}

// ============================================================================
// N-gram windows
// ============================================================================

/// Iterate every n-gram window over a token list
///
/// Windows are produced widest first: all windows of length `max_n` in
/// left-to-right order, then length `max_n - 1`, down to single tokens.
/// Lengths that exceed the token list produce nothing.
///
/// # Example
///
/// ```
/// use mailsim_search::tokenizer::ngram_windows;
///
/// let tokens = vec!["a", "b", "c"];
/// let windows: Vec<&[&str]> = ngram_windows(&tokens, 2).collect();
/// assert_eq!(windows, vec![
///     &["a", "b"][..],
///     &["b", "c"][..],
///     &["a"][..],
///     &["b"][..],
///     &["c"][..],
/// ]);
/// ```
pub fn ngram_windows<'a>(
    tokens: &'a [&'a str],
    max_n: usize,
) -> impl Iterator<Item = &'a [&'a str]> {
    (1..=max_n).rev().flat_map(move |n| tokens.windows(n))
}

// ============================================================================
// Tests
// ============================================================================

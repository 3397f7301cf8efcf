// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Word tokenization for display names.
//!
//! A token is a contiguous run of word characters (alphanumerics or `_`).
//! Everything else, including hyphens and apostrophes, separates tokens, so
//! `"Mary-Kate O'Neil"` yields `Mary`, `Kate`, `O`, `Neil`.

/// Iterate over the word tokens of `full_name` in order.
pub fn name_tokens(full_name: &str) -> impl Iterator<Item = &str> {
    full_name
        .split(|ch: char| !is_word_char(ch))
        .filter(|token| !token.is_empty())
}

/// First word token, if the name has one.
pub fn first_name(full_name: &str) -> Option<&str> {
    name_tokens(full_name).next()
}

/// Second word token, if the name has at least two.
pub fn last_name(full_name: &str) -> Option<&str> {
    name_tokens(full_name).nth(1)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

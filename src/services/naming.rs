// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display-name and file-name derivation.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Longest slug produced by [`slugify`].
pub const MAX_SLUG_LEN: usize = 48;

/// Shorten a full name for the ticket.
///
/// First given name plus the second-to-last token, which skips middle
/// names and the second surname: "Mixtli Omar Fonseca Vega" becomes
/// "Mixtli Fonseca".
pub fn to_ticket_name(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    match parts.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} {second}"),
        [first, .., family, _] => format!("{first} {family}"),
    }
}

/// Lowercase ASCII slug with diacritics stripped and runs of anything
/// else collapsed into single hyphens.
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // Slug is pure ASCII, so byte truncation is safe.
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// File name offered when a ticket is downloaded.
pub fn ticket_file_name(display_name: &str) -> String {
    let slug = slugify(display_name);
    if slug.is_empty() {
        "ticket-guest.png".to_string()
    } else {
        format!("ticket-{slug}.png")
    }
}

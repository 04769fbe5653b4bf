//! Identifier normalization
//!
//! Turns human-authored event paths and parameter names into legal C#
//! identifiers. Both functions are pure: the same input always yields the same
//! identifier, independent of run or call order.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use crate::keywords::is_reserved;

/// Runs of characters that separate camel-case tokens.
static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("static regex"));

/// Anything that may not appear in an identifier.
static NON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static regex"));

/// How a raw name is turned into an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierStyle {
    /// Path/extension stripping plus camel-case join (event labels)
    CamelCase,
    /// Spelling kept as authored, only illegal characters removed (enum members
    /// that are looked up by name at runtime)
    Verbatim,
}

impl IdentifierStyle {
    pub fn apply(self, raw: &str) -> String {
        match self {
            IdentifierStyle::CamelCase => normalize(raw),
            IdentifierStyle::Verbatim => sanitize_verbatim(raw),
        }
    }
}

/// Normalize an event path or label into a camel-case identifier.
///
/// `"SFX/Door_Open.wav"` becomes `doorOpen`, `"3D Ambience"` becomes
/// `_3DAmbience` and `"class"` becomes `_class`.
///
/// A name without any ASCII letter or digit normalizes to the empty string;
/// callers reject that before emitting anything.
pub fn normalize(raw: &str) -> String {
    let name = base_name(raw);

    let mut ident = String::with_capacity(name.len() + 1);
    for (i, token) in TOKEN_SEPARATOR
        .split(name)
        .filter(|t| !t.is_empty())
        .enumerate()
    {
        let mut chars = token.chars();
        let Some(first) = chars.next() else { continue };
        if i == 0 {
            ident.push(first.to_ascii_lowercase());
            ident.push_str(chars.as_str());
        } else {
            ident.push(first.to_ascii_uppercase());
            ident.push_str(&chars.as_str().to_ascii_lowercase());
        }
    }

    escape(ident)
}

/// Keep the authored spelling, dropping characters C# does not allow and
/// escaping leading digits and keywords.
pub fn sanitize_verbatim(raw: &str) -> String {
    let stripped = NON_IDENTIFIER.replace_all(raw, "").into_owned();
    escape_prefix(stripped)
}

/// True when `ident` may be emitted as a declaration name.
pub fn is_valid(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !is_reserved(ident)
}

/// Last path segment with a trailing extension removed.
///
/// A leading dot (`".hidden"`) is part of the name, not an extension.
fn base_name(raw: &str) -> &str {
    let name = match raw.rfind('/') {
        Some(slash) => &raw[slash + 1..],
        None => raw,
    };
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

fn escape(ident: String) -> String {
    let ident = escape_prefix(ident);
    // Tokens are alphanumeric, so this only matters if the rules above change.
    NON_IDENTIFIER.replace_all(&ident, "").into_owned()
}

fn escape_prefix(mut ident: String) -> String {
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if is_reserved(&ident) {
        ident.insert(0, '_');
    }
    ident
}

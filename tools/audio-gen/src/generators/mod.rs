//! Artifact renderers
//!
//! One render function per artifact kind. Rendering is a pure function of the
//! model and [`RenderOptions`]: same input, byte-identical output.

pub mod events;
pub mod parameters;

use std::fmt::Write as FmtWrite;

/// Indentation unit of generated C#
pub(crate) const INDENT: &str = "    ";

/// Names the generated code refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub namespace: String,
    pub events_class: String,
    pub slot_type: String,
    pub slot_import: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            namespace: "AudioManagement".to_string(),
            events_class: "AudioEvents".to_string(),
            slot_type: "EventReference".to_string(),
            slot_import: "FMODUnity".to_string(),
        }
    }
}

/// Banner that marks a file as generated
pub(crate) fn write_header(output: &mut String) -> std::fmt::Result {
    writeln!(output, "// GENERATED FILE - DO NOT EDIT")?;
    writeln!(output, "// Generator: audio-gen")?;
    writeln!(output)
}

/// Escape a value for a regular (non-verbatim) C# string literal.
pub(crate) fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_string_literal() {
        assert_eq!(escape_string_literal("event:/SFX/Door"), "event:/SFX/Door");
        assert_eq!(escape_string_literal(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_string_literal("tab\there"), "tab\\there");
    }

    #[test]
    fn test_header_ends_with_blank_line() {
        let mut output = String::new();
        write_header(&mut output).unwrap();
        assert!(output.starts_with("// GENERATED FILE - DO NOT EDIT\n"));
        assert!(output.ends_with("\n\n"));
    }
}

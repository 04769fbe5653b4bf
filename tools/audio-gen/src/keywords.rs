//! Reserved words of the target language (C#)
//!
//! Every emitter goes through [`is_reserved`]; there is no other keyword table.

/// C# reserved keywords. Contextual keywords (`var`, `async`, ...) are legal
/// identifiers and are deliberately absent.
pub const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Case-sensitive membership test against [`CSHARP_KEYWORDS`].
pub fn is_reserved(word: &str) -> bool {
    CSHARP_KEYWORDS.binary_search(&word).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_for_binary_search() {
        let mut sorted = CSHARP_KEYWORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, CSHARP_KEYWORDS);
    }

    #[test]
    fn test_reserved_is_case_sensitive() {
        assert!(is_reserved("class"));
        assert!(is_reserved("while"));
        assert!(!is_reserved("Class"));
        assert!(!is_reserved("var"));
        assert!(!is_reserved(""));
    }
}

//! Parameter enum generator

use std::fmt::Write as FmtWrite;

use super::{INDENT, RenderOptions, write_header};
use crate::model::{ParameterEnums, ParameterGroup};

/// Render `GlobalAudioParameter` and `LocalAudioParameter` into one file.
pub fn render_parameters(
    enums: &ParameterEnums,
    options: &RenderOptions,
) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    write_header(&mut output)?;

    writeln!(output, "namespace {}", options.namespace)?;
    writeln!(output, "{{")?;

    for (i, group) in enums.groups().into_iter().enumerate() {
        if i > 0 {
            writeln!(output)?;
        }
        write_enum(&mut output, group)?;
    }

    writeln!(output, "}}")?;
    Ok(output)
}

fn write_enum(output: &mut String, group: &ParameterGroup) -> std::fmt::Result {
    writeln!(output, "{INDENT}public enum {}", group.scope.enum_name())?;
    writeln!(output, "{INDENT}{{")?;

    if group.members.is_empty() {
        writeln!(output, "{INDENT}{INDENT}// No parameters listed")?;
    }
    for member in &group.members {
        writeln!(output, "{INDENT}{INDENT}{member},")?;
    }

    writeln!(output, "{INDENT}}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::IdentifierStyle;

    fn enums(global: &[&str], local: &[&str]) -> ParameterEnums {
        ParameterEnums::build(global, local, IdentifierStyle::Verbatim).unwrap()
    }

    #[test]
    fn test_render_full_file() {
        let enums = enums(&["Volume", "Pitch", "Volume"], &["RPM"]);
        let rendered = render_parameters(&enums, &RenderOptions::default()).unwrap();

        let expected = "\
// GENERATED FILE - DO NOT EDIT
// Generator: audio-gen

namespace AudioManagement
{
    public enum GlobalAudioParameter
    {
        Volume,
        Pitch,
    }

    public enum LocalAudioParameter
    {
        RPM,
    }
}
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_empty_group_renders_placeholder() {
        let rendered =
            render_parameters(&enums(&[], &["Speed"]), &RenderOptions::default()).unwrap();
        assert!(rendered.contains(
            "    public enum GlobalAudioParameter\n    {\n        // No parameters listed\n    }\n"
        ));
        assert!(rendered.contains("        Speed,\n"));
    }

    #[test]
    fn test_namespace_is_configurable() {
        let options = RenderOptions {
            namespace: "Game.Audio".to_string(),
            ..RenderOptions::default()
        };
        let rendered = render_parameters(&enums(&[], &[]), &options).unwrap();
        assert!(rendered.contains("namespace Game.Audio\n{\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let model = enums(&["B", "A"], &["C"]);
        let options = RenderOptions::default();
        assert_eq!(
            render_parameters(&model, &options).unwrap(),
            render_parameters(&model, &options).unwrap()
        );
    }
}

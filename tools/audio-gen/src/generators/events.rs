//! Event table generator
//!
//! Two shapes share one class: path constants for the bank listing pathway,
//! and reference slots plus a once-only `Initialize` for the authored pathway.

use std::fmt::Write as FmtWrite;

use super::{INDENT, RenderOptions, escape_string_literal, write_header};
use crate::model::{EventForm, EventRecord, EventTable, INIT_FLAG, INIT_FN, PARAM_SUFFIX};

/// Render the events class for `table`.
pub fn render_events(
    table: &EventTable,
    options: &RenderOptions,
) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    write_header(&mut output)?;

    if table.form == EventForm::ReferenceSlot {
        writeln!(output, "using {};", options.slot_import)?;
        writeln!(output)?;
    }

    writeln!(output, "namespace {}", options.namespace)?;
    writeln!(output, "{{")?;
    writeln!(output, "{INDENT}public static class {}", options.events_class)?;
    writeln!(output, "{INDENT}{{")?;

    match table.form {
        EventForm::PathConstant => write_constants(&mut output, &table.records)?,
        EventForm::ReferenceSlot => {
            writeln!(
                output,
                "{INDENT}{INDENT}public static bool {INIT_FLAG} {{ get; private set; }}"
            )?;
            writeln!(output)?;
            write_slots(&mut output, &table.records, &options.slot_type)?;
            writeln!(output)?;
            write_initializer(&mut output, &table.records, options)?;
        }
    }

    writeln!(output, "{INDENT}}}")?;
    writeln!(output, "}}")?;
    Ok(output)
}

fn write_constants(output: &mut String, records: &[EventRecord]) -> std::fmt::Result {
    if records.is_empty() {
        return writeln!(output, "{INDENT}{INDENT}// No events listed");
    }

    write_grouped(output, records, |output, record| {
        writeln!(
            output,
            "{INDENT}{INDENT}public static string {} = \"{}\";",
            record.label,
            escape_string_literal(&record.path)
        )
    })
}

fn write_slots(output: &mut String, records: &[EventRecord], slot_type: &str) -> std::fmt::Result {
    if records.is_empty() {
        return writeln!(output, "{INDENT}{INDENT}// No events listed");
    }

    write_grouped(output, records, |output, record| {
        writeln!(output, "{INDENT}{INDENT}public static {slot_type} {};", record.label)
    })
}

/// Emit one declaration per record, with a `// group` heading whenever the
/// authored group changes.
fn write_grouped(
    output: &mut String,
    records: &[EventRecord],
    mut declare: impl FnMut(&mut String, &EventRecord) -> std::fmt::Result,
) -> std::fmt::Result {
    let mut current_group: Option<&str> = None;

    for (i, record) in records.iter().enumerate() {
        let group = record.group.as_deref();
        if group.is_some() && group != current_group {
            if i > 0 {
                writeln!(output)?;
            }
            if let Some(label) = group {
                writeln!(output, "{INDENT}{INDENT}// {}", single_line(label))?;
            }
        }
        current_group = group;
        declare(output, record)?;
    }

    Ok(())
}

/// Once-only initializer: binds every slot from its `<label>Reference`
/// parameter, then sets the flag. Later calls return immediately.
///
/// Slots are assigned through the class name; a parameter may share its name
/// with another slot (`door` and `doorReference`).
fn write_initializer(
    output: &mut String,
    records: &[EventRecord],
    options: &RenderOptions,
) -> std::fmt::Result {
    let body = format!("{INDENT}{INDENT}{INDENT}");
    let slot_type = &options.slot_type;
    let class = &options.events_class;

    if records.is_empty() {
        writeln!(output, "{INDENT}{INDENT}public static void {INIT_FN}()")?;
    } else {
        writeln!(output, "{INDENT}{INDENT}public static void {INIT_FN}(")?;
        for (i, record) in records.iter().enumerate() {
            let line_end = if i + 1 < records.len() { "," } else { ")" };
            writeln!(output, "{body}{slot_type} {}{PARAM_SUFFIX}{line_end}", record.label)?;
        }
    }

    writeln!(output, "{INDENT}{INDENT}{{")?;
    writeln!(output, "{body}if ({INIT_FLAG}) return;")?;
    writeln!(output)?;

    if !records.is_empty() {
        for record in records {
            writeln!(output, "{body}{class}.{0} = {0}{PARAM_SUFFIX};", record.label)?;
        }
        writeln!(output)?;
    }

    writeln!(output, "{body}{INIT_FLAG} = true;")?;
    writeln!(output, "{INDENT}{INDENT}}}")
}

fn single_line(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventEntry;

    fn table(form: EventForm, entries: &[EventEntry]) -> EventTable {
        EventTable::build(form, entries, "AudioEvents").unwrap()
    }

    #[test]
    fn test_path_constants() {
        let rendered = render_events(
            &table(
                EventForm::PathConstant,
                &[
                    EventEntry::new("event:/Music/Main Theme"),
                    EventEntry::new("event:/SFX/Door_Open"),
                ],
            ),
            &RenderOptions::default(),
        )
        .unwrap();

        let expected = "\
// GENERATED FILE - DO NOT EDIT
// Generator: audio-gen

namespace AudioManagement
{
    public static class AudioEvents
    {
        public static string mainTheme = \"event:/Music/Main Theme\";
        public static string doorOpen = \"event:/SFX/Door_Open\";
    }
}
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_reference_slots_with_initializer() {
        let rendered = render_events(
            &table(
                EventForm::ReferenceSlot,
                &[
                    EventEntry::grouped("event:/Music/Main Theme", "Music"),
                    EventEntry::grouped("event:/SFX/Jump", "SFX"),
                    EventEntry::grouped("event:/SFX/Land", "SFX"),
                ],
            ),
            &RenderOptions::default(),
        )
        .unwrap();

        let expected = "\
// GENERATED FILE - DO NOT EDIT
// Generator: audio-gen

using FMODUnity;

namespace AudioManagement
{
    public static class AudioEvents
    {
        public static bool IsInitialized { get; private set; }

        // Music
        public static EventReference mainTheme;

        // SFX
        public static EventReference jump;
        public static EventReference land;

        public static void Initialize(
            EventReference mainThemeReference,
            EventReference jumpReference,
            EventReference landReference)
        {
            if (IsInitialized) return;

            AudioEvents.mainTheme = mainThemeReference;
            AudioEvents.jump = jumpReference;
            AudioEvents.land = landReference;

            IsInitialized = true;
        }
    }
}
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_empty_slot_table_still_has_initializer() {
        let rendered =
            render_events(&table(EventForm::ReferenceSlot, &[]), &RenderOptions::default())
                .unwrap();
        let initializer = "        public static void Initialize()
        {
            if (IsInitialized) return;

            IsInitialized = true;
        }
";
        assert!(rendered.contains("        // No events listed\n"));
        assert!(rendered.contains(initializer));
    }

    #[test]
    fn test_empty_constant_table() {
        let rendered =
            render_events(&table(EventForm::PathConstant, &[]), &RenderOptions::default())
                .unwrap();
        assert!(rendered.contains("        // No events listed\n"));
        assert!(!rendered.contains("Initialize"));
        assert!(!rendered.contains("using "));
    }

    #[test]
    fn test_paths_are_escaped_in_literals() {
        let rendered = render_events(
            &table(EventForm::PathConstant, &[EventEntry::new(r#"event:/SFX/Say "Hi""#)]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(rendered.contains(r#"public static string sayHi = "event:/SFX/Say \"Hi\"";"#));
    }

    #[test]
    fn test_group_heading_stays_on_one_line() {
        let rendered = render_events(
            &table(
                EventForm::ReferenceSlot,
                &[EventEntry::grouped("event:/A", "Line one\nline two")],
            ),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(rendered.contains("        // Line one line two\n"));
    }

    #[test]
    fn test_slot_type_and_import_are_configurable() {
        let options = RenderOptions {
            slot_type: "SoundHandle".to_string(),
            slot_import: "Game.Audio".to_string(),
            ..RenderOptions::default()
        };
        let rendered = render_events(
            &table(EventForm::ReferenceSlot, &[EventEntry::new("event:/A")]),
            &options,
        )
        .unwrap();
        assert!(rendered.starts_with(
            "// GENERATED FILE - DO NOT EDIT\n// Generator: audio-gen\n\nusing Game.Audio;\n"
        ));
        assert!(rendered.contains("public static SoundHandle a;"));
        assert!(rendered.contains("SoundHandle aReference)"));
    }

    #[test]
    fn test_parameter_named_like_another_slot_still_binds_its_own_slot() {
        let rendered = render_events(
            &table(
                EventForm::ReferenceSlot,
                &[
                    EventEntry::new("event:/SFX/Door"),
                    EventEntry::new("event:/SFX/Door Reference"),
                ],
            ),
            &RenderOptions::default(),
        )
        .unwrap();

        assert!(rendered.contains(concat!(
            "            EventReference doorReference,\n",
            "            EventReference doorReferenceReference)\n",
        )));
        assert!(rendered.contains("            AudioEvents.door = doorReference;\n"));
        assert!(rendered.contains("AudioEvents.doorReference = doorReferenceReference;\n"));
        assert!(!rendered.contains(" doorReference = doorReferenceReference;"));
    }
}

//! In-memory representation of the artifacts to emit
//!
//! Built fresh from raw names on every run and dropped afterwards. Builders run
//! every name through a [`Deduplicator`], so a model that exists only contains
//! unique, valid identifiers.

use std::path::PathBuf;

use crate::dedup::Deduplicator;
use crate::error::IdentifierError;
use crate::ident::IdentifierStyle;

/// Members the events class declares itself.
pub const INIT_FLAG: &str = "IsInitialized";
pub const INIT_FN: &str = "Initialize";
/// Appended to a slot label to name its `Initialize` parameter.
pub const PARAM_SUFFIX: &str = "Reference";

/// Parameter partition, one enum each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterScope {
    Global,
    Local,
}

impl ParameterScope {
    /// Name of the generated enum
    pub fn enum_name(self) -> &'static str {
        match self {
            ParameterScope::Global => "GlobalAudioParameter",
            ParameterScope::Local => "LocalAudioParameter",
        }
    }
}

/// One enum worth of members, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterGroup {
    pub scope: ParameterScope,
    pub members: Vec<String>,
}

impl ParameterGroup {
    pub fn build<S: AsRef<str>>(
        scope: ParameterScope,
        raw_names: &[S],
        style: IdentifierStyle,
    ) -> Result<Self, IdentifierError> {
        let mut dedup = Deduplicator::new(style);
        for raw in raw_names {
            let raw = raw.as_ref();
            if let Some(member) = dedup.insert(raw)? {
                if member != raw {
                    tracing::warn!(
                        "{} member '{}' emitted as '{}'; lookups by the original name \
                         will not match",
                        scope.enum_name(),
                        raw,
                        member
                    );
                }
            }
        }
        Ok(Self {
            scope,
            members: dedup.into_identifiers(),
        })
    }
}

/// Both parameter enums of the parameters artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterEnums {
    pub global: ParameterGroup,
    pub local: ParameterGroup,
}

impl ParameterEnums {
    pub fn build<S: AsRef<str>>(
        global: &[S],
        local: &[S],
        style: IdentifierStyle,
    ) -> Result<Self, IdentifierError> {
        Ok(Self {
            global: ParameterGroup::build(ParameterScope::Global, global, style)?,
            local: ParameterGroup::build(ParameterScope::Local, local, style)?,
        })
    }

    /// Emission order: global first, then local
    pub fn groups(&self) -> [&ParameterGroup; 2] {
        [&self.global, &self.local]
    }
}

/// How events are declared in the events artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventForm {
    /// `public static string label = "path";` (bank listing pathway)
    PathConstant,
    /// Empty reference slots bound once by `Initialize` (authored pathway)
    ReferenceSlot,
}

/// An event as delivered by a metadata source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    pub path: String,
    /// Authored grouping ("Music", "SFX"), if any
    pub group: Option<String>,
}

impl EventEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            group: None,
        }
    }

    pub fn grouped(path: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            group: Some(group.into()),
        }
    }
}

/// An event path paired with its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub path: String,
    pub label: String,
    pub group: Option<String>,
}

/// Everything the events artifact declares, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTable {
    pub form: EventForm,
    pub records: Vec<EventRecord>,
}

impl EventTable {
    /// Label every entry, collapsing repeated paths onto their first occurrence.
    pub fn build(
        form: EventForm,
        entries: &[EventEntry],
        class_name: &str,
    ) -> Result<Self, IdentifierError> {
        let mut dedup = Deduplicator::new(IdentifierStyle::CamelCase);
        dedup.reserve(class_name, "<events class>");
        if form == EventForm::ReferenceSlot {
            dedup.reserve(INIT_FLAG, "<initialization flag>");
            dedup.reserve(INIT_FN, "<initializer>");
        }

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            match dedup.insert(&entry.path)? {
                Some(label) => {
                    tracing::debug!("Event {} -> {}", entry.path, label);
                    // Initialize assigns `Class.slot`; a parameter named like the
                    // class would hide it.
                    let parameter = format!("{label}{PARAM_SUFFIX}");
                    if form == EventForm::ReferenceSlot && parameter == class_name {
                        return Err(IdentifierError::Collision {
                            raw: entry.path.clone(),
                            existing: "<events class>".to_string(),
                            identifier: class_name.to_string(),
                        });
                    }
                    records.push(EventRecord {
                        path: entry.path.clone(),
                        label: label.to_string(),
                        group: entry.group.clone(),
                    });
                }
                None => tracing::debug!("Event {} listed more than once", entry.path),
            }
        }

        Ok(Self { form, records })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.label.as_str())
    }
}

/// A target path with its fully rendered contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_groups_are_independent_scopes() {
        let enums = ParameterEnums::build(
            &["Volume", "Pitch", "Volume"],
            &["Volume", "RPM"],
            IdentifierStyle::Verbatim,
        )
        .unwrap();
        assert_eq!(enums.global.members, vec!["Volume", "Pitch"]);
        assert_eq!(enums.local.members, vec!["Volume", "RPM"]);
        assert_eq!(enums.groups()[0].scope, ParameterScope::Global);
    }

    #[test]
    fn test_event_table_collapses_repeated_paths() {
        let entries = vec![
            EventEntry::grouped("event:/Music/Main Theme", "Music"),
            EventEntry::new("event:/SFX/Jump"),
            EventEntry::grouped("event:/Music/Main Theme", "Ambience"),
        ];
        let table = EventTable::build(EventForm::PathConstant, &entries, "AudioEvents").unwrap();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["mainTheme", "jump"]);
        assert_eq!(table.records[0].group.as_deref(), Some("Music"));
    }

    #[test]
    fn test_event_label_colliding_with_class_name_is_rejected() {
        let entries = vec![EventEntry::new("event:/audio Events")];
        let err = EventTable::build(EventForm::ReferenceSlot, &entries, "audioEvents").unwrap_err();
        assert!(matches!(
            err,
            IdentifierError::Collision { identifier, .. } if identifier == "audioEvents"
        ));
    }

    #[test]
    fn test_initializer_parameter_colliding_with_class_name_is_rejected() {
        let entries = vec![EventEntry::new("event:/SFX/Audio")];
        let err =
            EventTable::build(EventForm::ReferenceSlot, &entries, "audioReference").unwrap_err();
        assert!(matches!(
            err,
            IdentifierError::Collision { identifier, .. } if identifier == "audioReference"
        ));

        // Constants have no initializer parameters.
        assert!(EventTable::build(EventForm::PathConstant, &entries, "audioReference").is_ok());
    }

    #[test]
    fn test_slot_labels_may_end_in_the_parameter_suffix() {
        let entries = vec![
            EventEntry::new("event:/SFX/Door"),
            EventEntry::new("event:/SFX/Door Reference"),
        ];
        let table = EventTable::build(EventForm::ReferenceSlot, &entries, "AudioEvents").unwrap();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["door", "doorReference"]);
    }

    #[test]
    fn test_empty_parameter_name_fails_the_group() {
        let err = ParameterGroup::build(ParameterScope::Local, &["  "], IdentifierStyle::Verbatim)
            .unwrap_err();
        assert!(matches!(err, IdentifierError::Empty { .. }));
    }
}

//! Metadata and template providers
//!
//! Discovery itself lives outside this crate: a bank listing exported from the
//! audio tool, or lists authored by hand. Events and parameters are fetched
//! separately so one failing does not take the other down.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::model::{EventEntry, EventForm};

/// Raw parameter names, split by scope, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterNames {
    pub global: Vec<String>,
    pub local: Vec<String>,
}

/// Supplies raw names for one generation run
pub trait MetadataSource {
    /// Declaration shape this pathway produces
    fn event_form(&self) -> EventForm;

    fn events(&self) -> Result<Vec<EventEntry>, SourceError>;

    fn parameters(&self) -> Result<ParameterNames, SourceError>;
}

/// Supplies the static scaffold text
pub trait TemplateSource {
    fn scaffold(&self) -> Result<String, SourceError>;
}

fn read_text(what: &'static str, path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Unavailable {
        what,
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Bank listing (JSON export of the built banks)
// =============================================================================

#[derive(Debug, Deserialize)]
struct BankListing {
    #[serde(default)]
    banks: Vec<Bank>,
    #[serde(default)]
    global_parameters: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Bank {
    #[serde(default)]
    events: Vec<BankEvent>,
}

#[derive(Debug, Deserialize)]
struct BankEvent {
    path: String,
    #[serde(default)]
    parameters: Vec<String>,
}

/// Reads a bank listing; events become path constants.
///
/// Local parameters are every event's parameters in discovery order.
pub struct BankListingSource {
    path: PathBuf,
}

impl BankListingSource {
    const WHAT: &'static str = "Bank listing";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BankListing, SourceError> {
        let text = read_text(Self::WHAT, &self.path)?;
        serde_json::from_str(&text).map_err(|e| SourceError::Malformed {
            what: Self::WHAT,
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

impl MetadataSource for BankListingSource {
    fn event_form(&self) -> EventForm {
        EventForm::PathConstant
    }

    fn events(&self) -> Result<Vec<EventEntry>, SourceError> {
        let listing = self.load()?;
        Ok(listing
            .banks
            .into_iter()
            .flat_map(|bank| bank.events)
            .map(|event| EventEntry::new(event.path))
            .collect())
    }

    fn parameters(&self) -> Result<ParameterNames, SourceError> {
        let listing = self.load()?;
        let local = listing
            .banks
            .into_iter()
            .flat_map(|bank| bank.events)
            .flat_map(|event| event.parameters)
            .inspect(|name| tracing::debug!("Found local parameter {}", name))
            .collect();
        for name in &listing.global_parameters {
            tracing::debug!("Found global parameter {}", name);
        }
        Ok(ParameterNames {
            global: listing.global_parameters,
            local,
        })
    }
}

// =============================================================================
// Authored lists (TOML edited by hand)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthoredLists {
    #[serde(default)]
    global_parameters: Vec<String>,
    #[serde(default)]
    local_parameters: Vec<String>,
    #[serde(default)]
    event_groups: Vec<AuthoredGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthoredGroup {
    label: String,
    #[serde(default)]
    events: Vec<String>,
}

/// Reads hand-authored lists; events become reference slots bound by the
/// generated initializer.
pub struct AuthoredSource {
    path: PathBuf,
}

impl AuthoredSource {
    const WHAT: &'static str = "Authored lists";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<AuthoredLists, SourceError> {
        let text = read_text(Self::WHAT, &self.path)?;
        toml::from_str(&text).map_err(|e| SourceError::Malformed {
            what: Self::WHAT,
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

impl MetadataSource for AuthoredSource {
    fn event_form(&self) -> EventForm {
        EventForm::ReferenceSlot
    }

    fn events(&self) -> Result<Vec<EventEntry>, SourceError> {
        let lists = self.load()?;
        Ok(lists
            .event_groups
            .into_iter()
            .flat_map(|group| {
                let label = group.label;
                group
                    .events
                    .into_iter()
                    .map(move |path| EventEntry::grouped(path, label.clone()))
            })
            .collect())
    }

    fn parameters(&self) -> Result<ParameterNames, SourceError> {
        let lists = self.load()?;
        Ok(ParameterNames {
            global: lists.global_parameters,
            local: lists.local_parameters,
        })
    }
}

// =============================================================================
// Scaffold template
// =============================================================================

/// Scaffold shipped with the tool
pub const BUILTIN_SCAFFOLD: &str = include_str!("../templates/AudioManager.cs.txt");

/// Scaffold text read from a file, or the built-in scaffold when no file is
/// configured or the configured one does not exist.
pub struct FileTemplate {
    path: Option<PathBuf>,
}

impl FileTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn builtin() -> Self {
        Self { path: None }
    }
}

impl TemplateSource for FileTemplate {
    fn scaffold(&self) -> Result<String, SourceError> {
        let Some(path) = &self.path else {
            return Ok(BUILTIN_SCAFFOLD.to_string());
        };
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "Scaffold template {} not found, using the built-in scaffold",
                    path.display()
                );
                Ok(BUILTIN_SCAFFOLD.to_string())
            }
            Err(source) => Err(SourceError::Unavailable {
                what: "Scaffold template",
                path: path.clone(),
                source,
            }),
        }
    }
}

//! Generation pipeline
//!
//! Sequences each artifact independently: fetch raw names, build the model,
//! render, then hand the text to the diff gate. A failure in one artifact is
//! recorded in the report and the remaining artifacts still run.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::diff_gate::{self, SyncState, WriteOutcome};
use crate::error::GenError;
use crate::generators::RenderOptions;
use crate::generators::events::render_events;
use crate::generators::parameters::render_parameters;
use crate::ident;
use crate::lock::RunGuard;
use crate::model::{Artifact, EventTable, ParameterEnums};
use crate::source::{MetadataSource, TemplateSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Parameters,
    Events,
    Scaffold,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Parameters => write!(f, "parameters"),
            ArtifactKind::Events => write!(f, "events"),
            ArtifactKind::Scaffold => write!(f, "scaffold"),
        }
    }
}

/// What one run did to one artifact
#[derive(Debug)]
pub enum ArtifactStatus {
    Written,
    Unchanged,
    /// Source or template unavailable; nothing was touched
    Skipped(String),
    /// Names or I/O failed; nothing was touched
    Failed(GenError),
}

impl ArtifactStatus {
    pub fn is_problem(&self) -> bool {
        matches!(self, ArtifactStatus::Skipped(_) | ArtifactStatus::Failed(_))
    }
}

#[derive(Debug)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

/// Overall result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// At least one artifact was skipped or failed
    Warnings,
}

/// Per-artifact summary of one `generate()` call
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub artifacts: Vec<ArtifactReport>,
}

impl GenerationReport {
    pub fn outcome(&self) -> Outcome {
        if self.artifacts.iter().any(|a| a.status.is_problem()) {
            Outcome::Warnings
        } else {
            Outcome::Success
        }
    }

    /// Number of files actually written
    pub fn writes(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| matches!(a.status, ArtifactStatus::Written))
            .count()
    }

    pub fn get(&self, kind: ArtifactKind) -> Option<&ArtifactReport> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}

/// Per-artifact summary of one `check()` call
#[derive(Debug, Default)]
pub struct CheckReport {
    pub artifacts: Vec<(ArtifactKind, PathBuf, Result<SyncState, GenError>)>,
}

impl CheckReport {
    pub fn in_sync(&self) -> bool {
        self.artifacts
            .iter()
            .all(|(_, _, state)| matches!(state, Ok(SyncState::InSync)))
    }
}

pub struct Generator {
    config: Config,
    options: RenderOptions,
    metadata: Box<dyn MetadataSource>,
    template: Box<dyn TemplateSource>,
}

impl Generator {
    /// Generator using the sources named in `config`
    pub fn from_config(config: Config) -> Result<Self, GenError> {
        let metadata = config.metadata_source();
        let template = Box::new(config.template_source());
        Self::new(config, metadata, template)
    }

    pub fn new(
        config: Config,
        metadata: Box<dyn MetadataSource>,
        template: Box<dyn TemplateSource>,
    ) -> Result<Self, GenError> {
        let options = config.codegen.render_options();
        validate_options(&options)?;
        Ok(Self {
            config,
            options,
            metadata,
            template,
        })
    }

    /// Regenerate every enabled artifact.
    ///
    /// Safe to call repeatedly: unchanged metadata produces no writes. Only a
    /// concurrent run holding the lock is an error for the whole call.
    pub fn generate(&self) -> Result<GenerationReport, GenError> {
        let _guard = RunGuard::acquire(&self.config.output.dir)?;
        let mut report = GenerationReport::default();

        if self.config.artifacts.parameters {
            let path = self.config.parameters_path();
            let result = self
                .parameters_artifact(&path)
                .and_then(|a| diff_gate::write_if_changed(&a.path, &a.contents));
            report.artifacts.push(settle(ArtifactKind::Parameters, path, result));
        }

        if self.config.artifacts.events {
            let path = self.config.events_path();
            let result = self
                .events_artifact(&path)
                .and_then(|a| diff_gate::write_if_changed(&a.path, &a.contents));
            report.artifacts.push(settle(ArtifactKind::Events, path, result));
        }

        if self.config.scaffold.enabled {
            let path = self.config.scaffold.path.clone();
            let result = self.copy_scaffold(&path);
            report.artifacts.push(settle(ArtifactKind::Scaffold, path, result));
        }

        tracing::debug!(
            "Generation finished: {} artifact(s), {} written",
            report.artifacts.len(),
            report.writes()
        );
        Ok(report)
    }

    /// Render every generated artifact and compare against disk without
    /// writing. The scaffold is never compared.
    ///
    /// Takes no lock: writes are atomic renames, so a concurrent `generate()`
    /// is seen either before or after.
    pub fn check(&self) -> CheckReport {
        let mut report = CheckReport::default();

        if self.config.artifacts.parameters {
            let path = self.config.parameters_path();
            let state = self.parameters_artifact(&path).and_then(|a| compare(&a));
            report.artifacts.push((ArtifactKind::Parameters, path, state));
        }

        if self.config.artifacts.events {
            let path = self.config.events_path();
            let state = self.events_artifact(&path).and_then(|a| compare(&a));
            report.artifacts.push((ArtifactKind::Events, path, state));
        }

        report
    }

    fn parameters_artifact(&self, path: &Path) -> Result<Artifact, GenError> {
        let names = self.metadata.parameters()?;
        let enums = ParameterEnums::build(
            names.global.as_slice(),
            names.local.as_slice(),
            self.config.codegen.parameter_style,
        )?;
        Ok(Artifact {
            path: path.to_path_buf(),
            contents: render_parameters(&enums, &self.options)?,
        })
    }

    fn events_artifact(&self, path: &Path) -> Result<Artifact, GenError> {
        let entries = self.metadata.events()?;
        let table = EventTable::build(
            self.metadata.event_form(),
            &entries,
            &self.options.events_class,
        )?;
        Ok(Artifact {
            path: path.to_path_buf(),
            contents: render_events(&table, &self.options)?,
        })
    }

    fn copy_scaffold(&self, path: &Path) -> Result<WriteOutcome, GenError> {
        // Existing scaffolds belong to the user; the template is not even read.
        if path.exists() {
            tracing::debug!("{} already exists", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
        let text = self.template.scaffold()?;
        diff_gate::create_if_absent(path, &text)
    }
}

fn compare(artifact: &Artifact) -> Result<SyncState, GenError> {
    diff_gate::check(&artifact.path, &artifact.contents)
        .map_err(|e| GenError::io(&artifact.path, e))
}

/// Turn one artifact's result into a report entry, logging problems.
fn settle(
    kind: ArtifactKind,
    path: PathBuf,
    result: Result<WriteOutcome, GenError>,
) -> ArtifactReport {
    let status = match result {
        Ok(WriteOutcome::Written) => ArtifactStatus::Written,
        Ok(WriteOutcome::Unchanged) => ArtifactStatus::Unchanged,
        Err(GenError::Source(e)) => {
            tracing::warn!("Skipping {} artifact: {}", kind, e);
            ArtifactStatus::Skipped(e.to_string())
        }
        Err(e) => {
            tracing::warn!("Failed to generate {} artifact {}: {}", kind, path.display(), e);
            ArtifactStatus::Failed(e)
        }
    };
    ArtifactReport { kind, path, status }
}

/// Names from the config end up verbatim in generated code.
fn validate_options(options: &RenderOptions) -> Result<(), GenError> {
    let dotted = |name: &str| !name.is_empty() && name.split('.').all(ident::is_valid);

    if !dotted(&options.namespace) {
        return Err(GenError::Config(format!("'{}' is not a valid namespace", options.namespace)));
    }
    if !dotted(&options.slot_import) {
        return Err(GenError::Config(format!("'{}' is not a valid namespace", options.slot_import)));
    }
    let names = [
        ("events class", &options.events_class),
        ("slot type", &options.slot_type),
    ];
    for (what, name) in names {
        if !ident::is_valid(name) {
            return Err(GenError::Config(format!("'{}' is not a valid {}", name, what)));
        }
    }
    Ok(())
}

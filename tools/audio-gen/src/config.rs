//! Configuration file parsing
//!
//! Parses `audio-gen.toml`. Every section is optional; relative paths resolve
//! against the directory that holds the config file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::generators::RenderOptions;
use crate::ident::IdentifierStyle;
use crate::source::{AuthoredSource, BankListingSource, FileTemplate, MetadataSource};

pub const DEFAULT_CONFIG_FILE: &str = "audio-gen.toml";

/// Root config structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
    #[serde(default)]
    pub artifacts: ArtifactToggles,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_parameters_file")]
    pub parameters_file: String,
    #[serde(default = "default_events_file")]
    pub events_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            parameters_file: default_parameters_file(),
            events_file: default_events_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Assets/Plugins/Audio Management/Generated")
}

fn default_parameters_file() -> String {
    "AudioParameters.cs".to_string()
}

fn default_events_file() -> String {
    "AudioEvents.cs".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodegenConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_events_class")]
    pub events_class: String,
    #[serde(default = "default_slot_type")]
    pub slot_type: String,
    #[serde(default = "default_slot_import")]
    pub slot_import: String,
    /// How parameter names become enum members
    #[serde(default = "default_parameter_style")]
    pub parameter_style: IdentifierStyle,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            events_class: default_events_class(),
            slot_type: default_slot_type(),
            slot_import: default_slot_import(),
            parameter_style: default_parameter_style(),
        }
    }
}

fn default_namespace() -> String {
    RenderOptions::default().namespace
}

fn default_events_class() -> String {
    RenderOptions::default().events_class
}

fn default_slot_type() -> String {
    RenderOptions::default().slot_type
}

fn default_slot_import() -> String {
    RenderOptions::default().slot_import
}

fn default_parameter_style() -> IdentifierStyle {
    IdentifierStyle::Verbatim
}

impl CodegenConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            namespace: self.namespace.clone(),
            events_class: self.events_class.clone(),
            slot_type: self.slot_type.clone(),
            slot_import: self.slot_import.clone(),
        }
    }
}

/// Which pathway drives generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// JSON listing of built banks; events become path constants
    #[default]
    Banks,
    /// Hand-authored TOML lists; events become reference slots
    Authored,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: default_source_path(),
        }
    }
}

fn default_source_path() -> PathBuf {
    PathBuf::from("banks.json")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Custom template; the built-in scaffold is used when unset
    #[serde(default)]
    pub template: Option<PathBuf>,
    #[serde(default = "default_scaffold_path")]
    pub path: PathBuf,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            template: None,
            path: default_scaffold_path(),
        }
    }
}

fn default_scaffold_path() -> PathBuf {
    PathBuf::from("Assets/Plugins/Audio Management/AudioManager.cs")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactToggles {
    #[serde(default = "default_true")]
    pub parameters: bool,
    #[serde(default = "default_true")]
    pub events: bool,
}

impl Default for ArtifactToggles {
    fn default() -> Self {
        Self {
            parameters: true,
            events: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Make every relative path relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.output.dir);
        resolve(&mut self.source.path);
        if let Some(template) = &mut self.scaffold.template {
            resolve(template);
        }
        resolve(&mut self.scaffold.path);
        self
    }

    pub fn parameters_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.parameters_file)
    }

    pub fn events_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.events_file)
    }

    /// Metadata provider for the configured pathway
    pub fn metadata_source(&self) -> Box<dyn MetadataSource> {
        match self.source.kind {
            SourceKind::Banks => Box::new(BankListingSource::new(&self.source.path)),
            SourceKind::Authored => Box::new(AuthoredSource::new(&self.source.path)),
        }
    }

    pub fn template_source(&self) -> FileTemplate {
        match &self.scaffold.template {
            Some(path) => FileTemplate::new(path),
            None => FileTemplate::builtin(),
        }
    }
}

/// Load and parse a config file, resolving its relative paths
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
}

/// Source file `audio-gen init` points the config at
pub fn default_source_file(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Banks => "banks.json",
        SourceKind::Authored => "audio-lists.toml",
    }
}

/// Empty metadata for a fresh project, so the first `generate` succeeds
pub fn starter_source_text(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Banks => STARTER_BANK_LISTING,
        SourceKind::Authored => STARTER_AUTHORED_LISTS,
    }
}

const STARTER_BANK_LISTING: &str = r#"{
  "global_parameters": [],
  "banks": []
}
"#;

const STARTER_AUTHORED_LISTS: &str = r#"# Audio lists read by audio-gen
# Parameter names become enum members. Event paths become slots that
# AudioEvents.Initialize binds once at startup.

global_parameters = []
local_parameters = []

# [[event_groups]]
# label = "SFX"
# events = ["event:/SFX/Jump"]
"#;

/// Default config with explanatory comments, written by `audio-gen init`
pub fn default_config_text(kind: SourceKind) -> String {
    let kind_name = match kind {
        SourceKind::Banks => "banks",
        SourceKind::Authored => "authored",
    };
    let source_path = default_source_file(kind);

    let mut content = String::new();
    content.push_str("# audio-gen configuration\n");
    content.push_str("# Paths are relative to this file.\n\n");

    content.push_str("[output]\n");
    content.push_str("dir = \"Assets/Plugins/Audio Management/Generated\"\n");
    content.push_str("parameters_file = \"AudioParameters.cs\"\n");
    content.push_str("events_file = \"AudioEvents.cs\"\n\n");

    content.push_str("[codegen]\n");
    content.push_str("namespace = \"AudioManagement\"\n");
    content.push_str("events_class = \"AudioEvents\"\n");
    content.push_str("# Type and import used for event slots (authored lists only)\n");
    content.push_str("slot_type = \"EventReference\"\n");
    content.push_str("slot_import = \"FMODUnity\"\n");
    content.push_str("# \"verbatim\" keeps parameter spelling, \"camel_case\" normalizes it\n");
    content.push_str("parameter_style = \"verbatim\"\n\n");

    content.push_str("[source]\n");
    content.push_str("# \"banks\": JSON listing exported from built banks\n");
    content.push_str("#   (events become string fields)\n");
    content.push_str("# \"authored\": hand-edited TOML lists\n");
    content.push_str("#   (events become slots bound by Initialize)\n");
    content.push_str(&format!("kind = \"{}\"\n", kind_name));
    content.push_str(&format!("path = \"{}\"\n\n", source_path));

    content.push_str("[scaffold]\n");
    content.push_str("# Copied once if missing, never overwritten\n");
    content.push_str("enabled = true\n");
    content.push_str("# Custom scaffold template; the built-in scaffold is used when unset\n");
    content.push_str("# template = \"templates/AudioManager.cs.txt\"\n");
    content.push_str("path = \"Assets/Plugins/Audio Management/AudioManager.cs\"\n\n");

    content.push_str("[artifacts]\n");
    content.push_str("parameters = true\n");
    content.push_str("events = true\n");
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.source.kind, SourceKind::Banks);
        assert_eq!(config.codegen.parameter_style, IdentifierStyle::Verbatim);
        assert_eq!(config.codegen.render_options(), RenderOptions::default());
        assert!(config.scaffold.enabled);
        assert!(config.scaffold.template.is_none());
        assert!(config.artifacts.parameters && config.artifacts.events);
    }

    #[test]
    fn test_default_config_text_round_trips() {
        for kind in [SourceKind::Banks, SourceKind::Authored] {
            let config: Config = toml::from_str(&default_config_text(kind)).unwrap();
            assert_eq!(config.source.kind, kind);
            assert_eq!(config.output.parameters_file, "AudioParameters.cs");
        }
    }

    #[test]
    fn test_starter_sources_parse_as_empty_metadata() {
        let dir = tempdir().unwrap();
        for kind in [SourceKind::Banks, SourceKind::Authored] {
            let path = dir.path().join(default_source_file(kind));
            std::fs::write(&path, starter_source_text(kind)).unwrap();

            let config = Config {
                source: SourceConfig { kind, path },
                ..Config::default()
            };
            let source = config.metadata_source();
            assert!(source.events().unwrap().is_empty());
            assert_eq!(source.parameters().unwrap(), crate::source::ParameterNames::default());
        }
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "[output]\ndir = \"gen\"\n[source]\nkind = \"authored\"\npath = \"lists.toml\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output.dir, dir.path().join("gen"));
        assert_eq!(config.source.path, dir.path().join("lists.toml"));
        assert_eq!(config.events_path(), dir.path().join("gen").join("AudioEvents.cs"));
        assert_eq!(config.metadata_source().event_form(), crate::model::EventForm::ReferenceSlot);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("[output]\ndirectory = \"x\"\n").is_err());
    }
}

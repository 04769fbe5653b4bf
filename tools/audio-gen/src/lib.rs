//! Audio binding generator library
//!
//! Generates C# parameter enums and event tables from audio project metadata.
//! Output is deterministic, and files are only rewritten when their contents
//! change, so regenerating with unchanged metadata touches nothing.

pub mod binding;
pub mod config;
pub mod dedup;
pub mod diff_gate;
pub mod error;
pub mod generators;
pub mod ident;
pub mod keywords;
pub mod lock;
pub mod model;
pub mod orchestrator;
pub mod source;

pub use config::{Config, SourceKind, load_config};
pub use error::{GenError, IdentifierError, SourceError};
pub use ident::normalize;
pub use orchestrator::{
    ArtifactKind, ArtifactStatus, CheckReport, GenerationReport, Generator, Outcome,
};

//! Command map loading and lookup.
//!
//! A command map is a JSON file naming a global prefix and an ordered list of
//! commands:
//!
//! ```json
//! {
//!   "prefix": "sink: ",
//!   "commands": [
//!     { "name": "echo", "run": "/bin/echo" },
//!     { "name": "uptime", "run": "/usr/bin/uptime" }
//!   ]
//! }
//! ```
//!
//! The list order is the match priority. The map is validated once at load
//! and is immutable afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single named command backed by an external executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// The word that selects this command after the global prefix.
    #[serde(alias = "Name")]
    pub name: String,

    /// Path to the executable to run.
    #[serde(alias = "Run")]
    pub run: PathBuf,
}

impl CommandDefinition {
    pub fn new(name: impl Into<String>, run: impl Into<PathBuf>) -> Self {
        CommandDefinition {
            name: name.into(),
            run: run.into(),
        }
    }
}

/// The on-disk shape of a command map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMapDefinition {
    /// Global prefix a comment must start with to be considered a command.
    #[serde(alias = "Prefix")]
    pub prefix: String,

    /// Commands in match priority order.
    #[serde(alias = "Commands", default)]
    pub commands: Vec<CommandDefinition>,
}

/// Errors from loading or validating a command map.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The file could not be read.
    #[error("failed to read command map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid command map document.
    #[error("failed to parse command map {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A command has an empty (or whitespace-only) name.
    #[error("command at position {index} has an empty name")]
    EmptyName { index: usize },

    /// A command has an empty executable path.
    #[error("command {name:?} has an empty run path")]
    EmptyRun { name: String },

    /// Two commands share the same name.
    #[error("duplicate command name {name:?}")]
    DuplicateName { name: String },
}

/// A validated, immutable command map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRegistry {
    definition: CommandMapDefinition,
}

impl CommandRegistry {
    /// Validates a definition and builds a registry from it.
    ///
    /// Rejects empty names, empty run paths and duplicate names.
    pub fn new(definition: CommandMapDefinition) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for (index, command) in definition.commands.iter().enumerate() {
            if command.name.trim().is_empty() {
                return Err(RegistryError::EmptyName { index });
            }
            if command.run.as_os_str().is_empty() {
                return Err(RegistryError::EmptyRun {
                    name: command.name.clone(),
                });
            }
            if !seen.insert(command.name.as_str()) {
                return Err(RegistryError::DuplicateName {
                    name: command.name.clone(),
                });
            }
        }
        Ok(CommandRegistry { definition })
    }

    /// Loads and validates a command map file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let bytes = std::fs::read(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let definition: CommandMapDefinition =
            serde_json::from_slice(&bytes).map_err(|source| RegistryError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(definition)
    }

    /// Returns the global prefix.
    pub fn prefix(&self) -> &str {
        &self.definition.prefix
    }

    /// Returns the commands in match priority order.
    pub fn commands(&self) -> &[CommandDefinition] {
        &self.definition.commands
    }

    /// Returns the first command whose name is a prefix of `text`.
    pub fn lookup(&self, text: &str) -> Option<&CommandDefinition> {
        self.definition
            .commands
            .iter()
            .find(|command| text.starts_with(command.name.as_str()))
    }
}

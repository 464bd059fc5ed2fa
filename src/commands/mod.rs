//! Comment commands.
//!
//! This module turns GitHub comment text into local command runs:
//!
//! - [`registry`] loads and validates the command map file
//! - [`dispatch`] matches comments against the map
//! - [`exec`] runs the matched executable with a timeout
//! - [`responder`] is the seam the webhook receiver calls through
//!
//! # Example
//!
//! ```
//! use sink::commands::{CommandDefinition, CommandMapDefinition, CommandRegistry, resolve};
//!
//! let registry = CommandRegistry::new(CommandMapDefinition {
//!     prefix: "sink: ".to_string(),
//!     commands: vec![CommandDefinition::new("echo", "/bin/echo")],
//! })
//! .unwrap();
//!
//! let invocation = resolve(&registry, "sink: echo hello world").unwrap();
//! assert_eq!(invocation.command.name, "echo");
//! assert_eq!(invocation.args, vec!["hello", "world"]);
//!
//! assert!(resolve(&registry, "just chatting").is_none());
//! ```

pub mod dispatch;
pub mod exec;
pub mod registry;
pub mod responder;

pub use dispatch::{Dispatcher, Invocation, resolve, strip_command_prefix};
pub use exec::{CommandError, DEFAULT_COMMAND_TIMEOUT, ExecConfig, run_command};
pub use registry::{CommandDefinition, CommandMapDefinition, CommandRegistry, RegistryError};
pub use responder::{CommandResponder, EchoResponder, Responder};

//! Shadreg - shadcn registry manifest generator
//!
//! Shadreg is a CLI tool and library for generating shadcn-compatible
//! `registry.json` manifests from MDX content collections. It parses each
//! component's description file, statically analyzes the imports of the
//! component's source files, reconciles undeclared dependencies with the
//! user, and emits the final registry manifest.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `logger`: Prefixed terminal logger and spinner
//! - `prompt`: Interactive prompt capability (console, auto, scripted)
//! - `registry`: Core engine (entries, import analysis, reconciliation,
//!   manifest building)

pub mod cli;
pub mod config;
pub mod logger;
pub mod prompt;
pub mod registry;

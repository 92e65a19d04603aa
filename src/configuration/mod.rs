//! Application configuration of the `kitten-config` tool.
//!
//! This is the configuration of the tool itself (where to log, where the settings
//! files live), not the automation settings it operates on.
//!
//! Your starting point should probably be [`Configuration::load_from_default_path`].
//!
//! # Internals
//! The TOML file is first deserialized into an unvalidated ("unresolved")
//! structure. Its `resolve` method then validates each table, expands path
//! placeholders and creates missing directories, producing the final
//! [`Configuration`]. Any check that needs more than deserialization belongs in
//! [`resolve`][traits::ResolvableConfiguration::resolve].

#![allow(rustdoc::private_intra_doc_links)]

mod structure;
mod traits;
mod utilities;

pub use structure::*;

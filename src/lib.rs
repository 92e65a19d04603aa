//! Settings model for the Kitten Scientists automation engine.
//!
//! The crate owns the full settings tree ([`EngineSettings`]), the merge ("load")
//! semantics used to apply one tree onto another, the conversion to and from the
//! flat legacy key/value format ([`LegacyStorage`]) that older versions persisted,
//! and the drift validation against the entity lists reported by the live game.
//!
//! Everything here is synchronous and side-effect free apart from in-place mutation
//! of the tree that is passed in and warnings emitted through a [`DriftSink`].

pub mod input;
pub mod legacy;
pub mod settings;
pub mod validation;

pub use legacy::{LegacyStorage, LegacyValue, LegacyWriter};
pub use settings::EngineSettings;
pub use validation::{DriftReport, DriftSink, DriftSummary, GameEntities, TracingDriftSink};

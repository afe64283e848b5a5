//! Public types exposed by the `wordbook-core` crate.

pub mod definition;
pub mod options;
pub mod profile;

pub use definition::{DefinitionPayload, License, Meaning, Phonetic, Sense, TrimLimits};
pub use options::{WordbookConfig, WordbookConfigBuilder};
pub use profile::UserProfile;

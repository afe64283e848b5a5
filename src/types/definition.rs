//! Definition payloads as returned by the remote dictionary API.
//!
//! Field names follow the API's camelCase wire format so cached records and
//! responses share one serde representation.

use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_CACHED_ANTONYMS, MAX_CACHED_DEFINITIONS, MAX_CACHED_MEANINGS, MAX_CACHED_SYNONYMS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub url: String,
}

/// One pronunciation variant of a headword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phonetic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

/// A single sense within a meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// Senses grouped under one part of speech.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Sense>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionPayload {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(default)]
    pub source_urls: Vec<String>,
}

/// Upper bounds applied to a payload before it is written to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimLimits {
    pub meanings: usize,
    pub definitions: usize,
    pub synonyms: usize,
    pub antonyms: usize,
}

impl Default for TrimLimits {
    fn default() -> Self {
        Self {
            meanings: MAX_CACHED_MEANINGS,
            definitions: MAX_CACHED_DEFINITIONS,
            synonyms: MAX_CACHED_SYNONYMS,
            antonyms: MAX_CACHED_ANTONYMS,
        }
    }
}

impl DefinitionPayload {
    /// Copy of this payload cut down to `limits`. Phonetics, license and
    /// source URLs are kept as-is.
    #[must_use]
    pub fn trimmed(&self, limits: &TrimLimits) -> Self {
        let meanings = self
            .meanings
            .iter()
            .take(limits.meanings)
            .map(|meaning| Meaning {
                part_of_speech: meaning.part_of_speech.clone(),
                definitions: meaning
                    .definitions
                    .iter()
                    .take(limits.definitions)
                    .map(|sense| Sense {
                        definition: sense.definition.clone(),
                        example: sense.example.clone(),
                        synonyms: head(&sense.synonyms, limits.synonyms),
                        antonyms: head(&sense.antonyms, limits.antonyms),
                    })
                    .collect(),
                synonyms: head(&meaning.synonyms, limits.synonyms),
                antonyms: head(&meaning.antonyms, limits.antonyms),
            })
            .collect();

        Self {
            word: self.word.clone(),
            phonetic: self.phonetic.clone(),
            phonetics: self.phonetics.clone(),
            meanings,
            license: self.license.clone(),
            source_urls: self.source_urls.clone(),
        }
    }
}

fn head(items: &[String], limit: usize) -> Vec<String> {
    items.iter().take(limit).cloned().collect()
}

//! Offline stand-ins for the remote dictionary endpoints.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use wordbook_core::{
    DefinitionPayload, DefinitionSource, Meaning, Result, Sense, WordListSource, WordbookError,
};

/// Answers every word except those listed as missing, recording each request.
#[derive(Default)]
pub struct StubDefinitions {
    missing: Vec<String>,
    requests: Mutex<Vec<String>>,
}

impl StubDefinitions {
    pub fn with_missing(missing: &[&str]) -> Self {
        Self {
            missing: missing.iter().map(ToString::to_string).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl DefinitionSource for StubDefinitions {
    fn fetch_definition(&self, word: &str) -> Result<Vec<DefinitionPayload>> {
        self.requests.lock().unwrap().push(word.to_string());
        if self.missing.iter().any(|missing| missing == word) {
            return Err(WordbookError::WordNotFound {
                word: word.to_string(),
            });
        }
        Ok(vec![sample_payload(word, 5, 10)])
    }
}

pub fn sample_payload(word: &str, meanings: usize, senses: usize) -> DefinitionPayload {
    DefinitionPayload {
        word: word.to_string(),
        phonetic: Some(format!("/{word}/")),
        meanings: (0..meanings)
            .map(|m| Meaning {
                part_of_speech: format!("pos{m}"),
                definitions: (0..senses)
                    .map(|d| Sense {
                        definition: format!("{word}: sense {m}.{d}"),
                        example: Some(format!("an example of {word}")),
                        synonyms: (0..8).map(|s| format!("syn{s}")).collect(),
                        antonyms: (0..8).map(|s| format!("ant{s}")).collect(),
                    })
                    .collect(),
                synonyms: (0..8).map(|s| format!("msyn{s}")).collect(),
                antonyms: (0..8).map(|s| format!("mant{s}")).collect(),
            })
            .collect(),
        source_urls: vec![format!("https://en.wiktionary.org/wiki/{word}")],
        ..DefinitionPayload::default()
    }
}

/// Serves a fixed word list and counts fetches.
pub struct StubWordList {
    words: Vec<String>,
    fetches: AtomicUsize,
}

impl StubWordList {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl WordListSource for StubWordList {
    fn fetch_word_list(&self) -> Result<Vec<String>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.words.clone())
    }
}

/// Deterministic, sorted, lowercase word list with shared prefixes.
pub fn word_list(n: usize) -> Vec<String> {
    const SYLLABLES: [&str; 8] = ["ba", "ce", "di", "fo", "gu", "ka", "lo", "mi"];
    let mut words: Vec<String> = (0..n)
        .map(|i| {
            let mut word = String::new();
            let mut rest = i;
            for _ in 0..4 {
                word.push_str(SYLLABLES[rest % SYLLABLES.len()]);
                rest /= SYLLABLES.len();
            }
            word
        })
        .collect();
    words.sort();
    words
}

//! Basic usage example: load the word list, page through it, search by prefix,
//! and look up a definition twice to show the cache at work.
//!
//! Run with: cargo run --example basic_usage
//!
//! Needs network access on first run. Data lands in a temporary directory
//! unless `WORDBOOK_DATA_DIR` is set.

use std::time::Instant;

use tempfile::tempdir;

use wordbook_core::{DEFAULT_SEARCH_LIMIT, Dictionary, Result, WordbookConfig, WordbookError};

fn main() -> Result<()> {
    let dir = tempdir()?;
    let mut config = WordbookConfig::from_env()?;
    if std::env::var_os("WORDBOOK_DATA_DIR").is_none() {
        config.data_dir = dir.path().to_path_buf();
    }

    println!("=== wordbook-core basic usage ===\n");
    println!("1. Opening dictionary at {:?}", config.data_dir);
    let dict = Dictionary::open(config)?;

    println!("\n2. Loading the word list...");
    let start = Instant::now();
    let words = dict.index().try_load_words()?;
    println!("   {} words in {:?}", words.len(), start.elapsed());

    println!("\n3. First page (20 per page, {} pages):", dict.index().page_count(20));
    for word in dict.index().words_paginated(0, 20) {
        println!("   - {word}");
    }

    println!("\n4. Prefix search for \"Seren\":");
    for word in dict.index().search_words("Seren", DEFAULT_SEARCH_LIMIT) {
        println!("   - {word}");
    }

    println!("\n5. Looking up \"serendipity\"...");
    for attempt in 1..=2 {
        let start = Instant::now();
        let entries = dict.lookup("serendipity")?;
        println!(
            "   attempt {attempt}: {} entries in {:?}",
            entries.len(),
            start.elapsed()
        );
    }
    if let Some(entry) = dict.lookup("serendipity")?.first() {
        for meaning in &entry.meanings {
            println!("   [{}]", meaning.part_of_speech);
            for sense in &meaning.definitions {
                println!("     * {}", sense.definition);
            }
        }
    }

    println!("\n6. Looking up a word that does not exist...");
    match dict.lookup("xyzzynotaword") {
        Err(WordbookError::WordNotFound { word }) => println!("   not found: {word}"),
        Err(err) => println!("   lookup failed: {err}"),
        Ok(_) => println!("   unexpectedly found"),
    }

    println!("\n7. History: {:?}", dict.history());
    println!("\n=== done ===");
    Ok(())
}

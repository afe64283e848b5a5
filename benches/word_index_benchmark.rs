//! Word index benchmarks: prefix search, pagination and a cold load from
//! chunked storage.
//!
//! # Running
//!
//! ```bash
//! cargo bench --bench word_index_benchmark
//! ```

use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;

use criterion::{Criterion, criterion_group, criterion_main};
use wordbook_core::{
    DEFAULT_SEARCH_LIMIT, MemoryStore, Result, WordIndex, WordListSource, write_chunked,
};

const CORPUS_SIZE: usize = 370_000;

struct FixedWords(Vec<String>);

impl WordListSource for FixedWords {
    fn fetch_word_list(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Sorted synthetic headwords, roughly the size of the English list.
fn corpus() -> Vec<String> {
    let letters: Vec<char> = ('a'..='z').collect();
    let mut words: Vec<String> = (0..CORPUS_SIZE)
        .map(|i| {
            let mut word = String::new();
            let mut rest = i;
            loop {
                word.push(letters[rest % letters.len()]);
                rest /= letters.len();
                if rest == 0 {
                    break;
                }
            }
            word
        })
        .collect();
    words.sort();
    words
}

fn loaded_index() -> WordIndex {
    let index = WordIndex::new(
        Arc::new(MemoryStore::new()),
        Arc::new(FixedWords(corpus())),
        "bench:words",
    );
    let _ = index.load_words();
    index
}

fn bench_search(c: &mut Criterion) {
    let index = loaded_index();

    c.bench_function("search_words_short_prefix", |b| {
        b.iter(|| black_box(index.search_words(black_box("ab"), DEFAULT_SEARCH_LIMIT)));
    });
    c.bench_function("search_words_mixed_case", |b| {
        b.iter(|| black_box(index.search_words(black_box("QuZ"), DEFAULT_SEARCH_LIMIT)));
    });
    c.bench_function("search_words_no_match", |b| {
        b.iter(|| black_box(index.search_words(black_box("zzzzzz"), DEFAULT_SEARCH_LIMIT)));
    });
}

fn bench_paginate(c: &mut Criterion) {
    let index = loaded_index();

    c.bench_function("words_paginated_deep_page", |b| {
        b.iter(|| black_box(index.words_paginated(black_box(15_000), 20)));
    });
}

fn bench_cold_load(c: &mut Criterion) {
    let words = corpus();
    let store = Arc::new(MemoryStore::new());
    write_chunked(store.as_ref(), "bench:words", &words, 500).unwrap();

    c.bench_function("load_words_from_chunks", |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let index = WordIndex::new(
                    store.clone(),
                    Arc::new(FixedWords(Vec::new())),
                    "bench:words",
                );
                let start = Instant::now();
                black_box(index.load_words());
                total += start.elapsed();
            }
            total
        });
    });
}

criterion_group!(benches, bench_search, bench_paginate, bench_cold_load);
criterion_main!(benches);

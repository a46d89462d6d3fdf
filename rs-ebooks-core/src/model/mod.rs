//! Corpus model and sentence recombination.
//!
//! This module provides:
//! - Token interning (`TokenTable`)
//! - The tokenized corpus and its persistence (`CorpusModel`)
//! - Splice point indexing over a sentence pool (`SuffixIndex`)
//! - Suffix recombination (`Generator`)
//! - Status and reply synthesis, implemented on `CorpusModel`

/// Interning of token strings to compact ids ("tikis").
pub mod token_table;

/// Tokenized corpus: ingestion, persistence and accessors.
///
/// Status synthesis and reply matching extend `CorpusModel` from the
/// `status` and `relevance` modules.
pub mod corpus_model;

/// Unigram and bigram index of splice points over a sentence pool.
///
/// Built per generation call, never stored in the model.
pub mod suffix_index;

/// Recombination passes over a seed sentence.
pub mod generator;

/// Generation parameters (`GenerationInput`) and gram modes.
pub mod generation_input;

/// Validation and retry loop producing the final status text.
mod status;

/// Donor pool selection for replies.
pub mod relevance;

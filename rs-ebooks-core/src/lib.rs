//! Sentence-recombination text generation library.
//!
//! This crate turns a corpus of short statuses into new statuses and
//! context-aware replies by splicing suffixes of real sentences together,
//! rather than sampling a probabilistic language model:
//! - Token interning and tokenized corpus models
//! - Unigram/bigram splice point indexes
//! - Bounded recombination with verbatim avoidance and retries
//! - JSON and binary model persistence
//!
//! Most users only need `CorpusModel`:
//!
//! ```no_run
//! use rs_ebooks_core::{CorpusModel, RawCorpus};
//!
//! let corpus = RawCorpus { statuses: Some(vec!["hello world!".to_owned()]), mentions: None };
//! let model = CorpusModel::consume(&corpus)?;
//! println!("{}", model.generate_status(140));
//! # Ok::<(), rs_ebooks_core::EbooksError>(())
//! ```

/// Corpus model, suffix index and generation logic.
pub mod model;

/// Text utilities (tokenization, reconstruction, classifiers).
pub mod text;

/// Error type of ingestion and persistence.
pub mod error;

/// I/O utilities (corpus files, cache paths, data folders).
pub mod io;

pub use error::EbooksError;
pub use model::corpus_model::{CorpusModel, RawCorpus, Sentence};
pub use model::generation_input::{GenerationInput, GramMode};
pub use model::generator::Generator;
pub use model::suffix_index::{Site, SuffixIndex};
pub use model::token_table::{TikiId, TokenTable};
pub use text::{EnglishText, TextUtilities};

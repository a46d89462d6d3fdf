/// Default character limit of a generated status.
pub const DEFAULT_LIMIT: usize = 140;

/// Default number of retries when a candidate is invalid.
pub const DEFAULT_RETRY_LIMIT: usize = 10;

/// Default number of recombination passes per attempt.
pub const DEFAULT_PASSES: usize = 3;

/// Recombination strategy used by the generator.
///
/// # Variants
/// - `Unigram`: splice wherever a single token matches (loose).
/// - `Bigram`: splice only where an ordered token pair matches (conservative).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GramMode {
	Unigram,
	Bigram,
}

/// Input parameters for status and reply generation.
///
/// # Responsibilities
/// - Bound the length of the generated text (`limit`)
/// - Bound the work spent on retries (`retry_limit`)
/// - Set how many recombination passes an attempt runs (`passes`)
///
/// The retry budget is an upper bound: at least one attempt is always made
/// and the last one is returned even when invalid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationInput {
	/// Maximum number of characters of the reconstructed text.
	pub limit: usize,

	/// Number of attempts before giving up on validity.
	pub retry_limit: usize,

	/// Recombination passes per attempt.
	pub passes: usize,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self { limit: DEFAULT_LIMIT, retry_limit: DEFAULT_RETRY_LIMIT, passes: DEFAULT_PASSES }
	}
}

impl GenerationInput {
	/// Default parameters with a custom character limit.
	pub fn with_limit(limit: usize) -> Self {
		Self { limit, ..Self::default() }
	}
}

/// Errors surfaced by model ingestion and persistence.
///
/// Generation itself never fails; it degrades to a best-effort result.
#[derive(Debug, thiserror::Error)]
pub enum EbooksError {
	#[error("invalid corpus: at least one of `statuses` or `mentions` must be present")]
	InvalidCorpus,

	#[error("json model error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("binary model error: {0}")]
	Binary(#[from] postcard::Error),

	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}

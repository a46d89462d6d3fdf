use std::collections::HashMap;

/// Minimum number of characters for a keyword candidate.
const MIN_KEYWORD_LEN: usize = 2;

/// Ranked keywords of a text, most important first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keywords {
	ranked: Vec<(String, usize)>,
}

impl Keywords {
	/// Ranks candidate terms by frequency.
	///
	/// Terms are lower-cased; stopwords, tokens without any letter and tokens
	/// shorter than `MIN_KEYWORD_LEN` are ignored. Ties keep first-occurrence
	/// order.
	pub(crate) fn rank<'a, I, F>(tokens: I, is_stopword: F) -> Self
	where
		I: IntoIterator<Item = &'a str>,
		F: Fn(&str) -> bool,
	{
		let mut positions: HashMap<String, usize> = HashMap::new();
		let mut ranked: Vec<(String, usize)> = Vec::new();

		for token in tokens {
			let term = token.to_lowercase();
			if term.chars().count() < MIN_KEYWORD_LEN
				|| !term.chars().any(char::is_alphabetic)
				|| is_stopword(&term)
			{
				continue;
			}

			match positions.get(&term) {
				Some(position) => ranked[*position].1 += 1,
				None => {
					positions.insert(term.clone(), ranked.len());
					ranked.push((term, 1));
				}
			}
		}

		// Stable sort keeps first-occurrence order among equal counts
		ranked.sort_by(|a, b| b.1.cmp(&a.1));
		Self { ranked }
	}

	/// Returns the `n` highest ranked terms.
	pub fn top(&self, n: usize) -> Vec<String> {
		self.ranked.iter().take(n).map(|(term, _)| term.clone()).collect()
	}

	pub fn len(&self) -> usize {
		self.ranked.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ranked.is_empty()
	}
}

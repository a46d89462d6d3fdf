use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Index of a token inside a `TokenTable`, also called a "tiki".
pub type TikiId = usize;

/// Interning table mapping token strings to compact integer ids.
///
/// The table is append-only: ids are assigned sequentially on first sight of a
/// string and stay valid for the lifetime of the table.
///
/// # Invariants
/// - `tokens[tikis[t]] == t` for every interned token `t`
/// - `tikis` holds exactly one entry per element of `tokens`
///
/// Serialized as the plain ordered token list; the reverse map is rebuilt
/// when loading.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TokenTable {
	/// Tokens in id order.
	tokens: Vec<String>,

	/// Reverse lookup token -> tiki.
	tikis: HashMap<String, TikiId>,
}

impl TokenTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the id of `token`, appending it to the table if unseen.
	///
	/// Interning the same string twice yields the same id and only the
	/// first call grows the table.
	pub fn intern(&mut self, token: &str) -> TikiId {
		if let Some(tiki) = self.lookup(token) {
			return tiki;
		}
		let tiki = self.tokens.len();
		self.tokens.push(token.to_owned());
		self.tikis.insert(token.to_owned(), tiki);
		tiki
	}

	/// Returns the token string of `tiki`, if it exists.
	pub fn get(&self, tiki: TikiId) -> Option<&str> {
		self.tokens.get(tiki).map(String::as_str)
	}

	/// Returns the id of an already interned token.
	pub(crate) fn lookup(&self, token: &str) -> Option<TikiId> {
		self.tikis.get(token).copied()
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// All tokens, in id order.
	pub fn as_slice(&self) -> &[String] {
		&self.tokens
	}
}

impl PartialEq for TokenTable {
	fn eq(&self, other: &Self) -> bool {
		// The reverse map is derived from `tokens`
		self.tokens == other.tokens
	}
}

impl Eq for TokenTable {}

impl From<Vec<String>> for TokenTable {
	fn from(tokens: Vec<String>) -> Self {
		let mut tikis = HashMap::with_capacity(tokens.len());
		for (tiki, token) in tokens.iter().enumerate() {
			tikis.entry(token.clone()).or_insert(tiki);
		}
		Self { tokens, tikis }
	}
}

impl From<TokenTable> for Vec<String> {
	fn from(table: TokenTable) -> Self {
		table.tokens
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn intern_is_idempotent() {
		let mut table = TokenTable::new();
		let first = table.intern("hello");
		let len = table.len();
		let second = table.intern("hello");

		assert_eq!(first, second);
		assert_eq!(table.len(), len);
	}

	#[test]
	fn ids_are_sequential() {
		let mut table = TokenTable::new();
		assert_eq!(table.intern("a"), 0);
		assert_eq!(table.intern("b"), 1);
		assert_eq!(table.intern("a"), 0);
		assert_eq!(table.intern("c"), 2);
		assert_eq!(table.get(1), Some("b"));
		assert_eq!(table.get(3), None);
		assert_eq!(table.lookup("c"), Some(2));
		assert_eq!(table.lookup("d"), None);
	}

	#[test]
	fn reverse_map_is_rebuilt_from_list() {
		let table = TokenTable::from(vec!["x".to_owned(), "y".to_owned()]);
		assert_eq!(table.lookup("y"), Some(1));

		let mut table = table;
		assert_eq!(table.intern("x"), 0);
		assert_eq!(table.intern("z"), 2);
	}
}

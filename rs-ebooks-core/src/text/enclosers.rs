use std::sync::LazyLock;

use regex::Regex;

/// Opening and closing markers checked for balance.
const ENCLOSERS: &[(&str, &str)] = &[("*", "*"), ("\"", "\""), ("(", ")"), ("[", "]"), ("`", "`"), ("'", "'")];

/// Per encloser pair: a token opening it and a token closing it.
static PATTERNS: LazyLock<Vec<(Regex, Regex)>> = LazyLock::new(|| {
	ENCLOSERS
		.iter()
		.map(|(open, close)| {
			let starter = format!(r"(?:\W|^){}\S", regex::escape(open));
			let ender = format!(r"\S{}(?:\W|$)", regex::escape(close));
			(Regex::new(&starter).unwrap(), Regex::new(&ender).unwrap())
		})
		.collect()
});

/// Whether any encloser pair is unbalanced across `tokens`.
///
/// A pair is unbalanced when a closing token appears before its opening one
/// or when the counts differ at the end.
pub(crate) fn unmatched(tokens: &[String]) -> bool {
	PATTERNS.iter().any(|(starter, ender)| {
		let mut opened: isize = 0;
		for token in tokens {
			if starter.is_match(token) {
				opened += 1;
			}
			if ender.is_match(token) {
				opened -= 1;
			}
			if opened < 0 {
				return true;
			}
		}
		opened != 0
	})
}

#[cfg(test)]
mod tests {
	use super::unmatched;

	fn tokens(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn balanced_text() {
		assert!(!unmatched(&tokens("a (small) \"quoted\" [thing]")));
		assert!(!unmatched(&tokens("no enclosers at all")));
		assert!(!unmatched(&tokens("it's fine")));
	}

	#[test]
	fn unbalanced_text() {
		assert!(unmatched(&tokens("a (dangling thought")));
		assert!(unmatched(&tokens("closing first) then (open")));
		assert!(unmatched(&tokens("\"half quoted")));
	}
}

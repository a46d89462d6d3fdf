/// Named entities understood by `decode`.
const NAMED: &[(&str, &str)] = &[
	("amp", "&"),
	("lt", "<"),
	("gt", ">"),
	("quot", "\""),
	("apos", "'"),
	("nbsp", "\u{a0}"),
	("hellip", "\u{2026}"),
	("mdash", "\u{2014}"),
	("ndash", "\u{2013}"),
	("lsquo", "\u{2018}"),
	("rsquo", "\u{2019}"),
	("ldquo", "\u{201c}"),
	("rdquo", "\u{201d}"),
	("copy", "\u{a9}"),
	("reg", "\u{ae}"),
	("trade", "\u{2122}"),
	("euro", "\u{20ac}"),
	("pound", "\u{a3}"),
	("deg", "\u{b0}"),
];

/// Longest entity body accepted between `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Decodes HTML character references.
///
/// Handles the named entities of `NAMED` plus decimal (`&#39;`) and
/// hexadecimal (`&#x27;`) references. Anything unrecognised is kept as-is.
pub(crate) fn decode(text: &str) -> String {
	let mut decoded = String::with_capacity(text.len());
	let mut rest = text;

	while let Some(start) = rest.find('&') {
		decoded.push_str(&rest[..start]);
		let candidate = &rest[start + 1..];

		let replacement = candidate
			.find(';')
			.filter(|end| *end > 0 && *end <= MAX_ENTITY_LEN)
			.and_then(|end| resolve(&candidate[..end]).map(|r| (r, end)));

		match replacement {
			Some((value, end)) => {
				decoded.push_str(&value);
				rest = &candidate[end + 1..];
			}
			None => {
				decoded.push('&');
				rest = candidate;
			}
		}
	}
	decoded.push_str(rest);

	decoded
}

fn resolve(entity: &str) -> Option<String> {
	if let Some(numeric) = entity.strip_prefix('#') {
		let code = match numeric.strip_prefix(['x', 'X']) {
			Some(hex) => u32::from_str_radix(hex, 16).ok()?,
			None => numeric.parse::<u32>().ok()?,
		};
		return char::from_u32(code).map(String::from);
	}

	NAMED
		.iter()
		.find(|(name, _)| *name == entity)
		.map(|(_, value)| (*value).to_owned())
}

#[cfg(test)]
mod tests {
	use super::decode;

	#[test]
	fn decodes_named_and_numeric() {
		assert_eq!(decode("fish &amp; chips"), "fish & chips");
		assert_eq!(decode("&lt;3 &#39;quoted&#x27;"), "<3 'quoted'");
	}

	#[test]
	fn keeps_unknown_references() {
		assert_eq!(decode("AT&T &bogus; &"), "AT&T &bogus; &");
		assert_eq!(decode("&#xZZ;"), "&#xZZ;");
	}
}

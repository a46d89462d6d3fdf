use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Extensions recognised as corpus files.
pub const CORPUS_EXTENSIONS: &[&str] = &["json", "txt"];

/// Reads a plain text corpus, one status per line.
///
/// - Splits on `\n` / `\r\n`
/// - Blank lines are skipped
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let contents = fs::read_to_string(filename)?;
	Ok(contents
		.lines()
		.filter(|line| !line.trim().is_empty())
		.map(str::to_owned)
		.collect())
}

/// Path of the binary model cache of a corpus file.
///
/// Example:
/// `data/corpus.json` + `"bin"` → `data/corpus.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(input_path: P, output_extension: &str) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();
	if input_path.file_stem().is_none() {
		return Err(io::Error::new(io::ErrorKind::InvalidInput, "Corpus path has no filename"));
	}
	Ok(input_path.with_extension(output_extension))
}

/// Name of a corpus: its filename without extension.
///
/// `"./data/corpus.json"` → `"corpus"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a data folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists the corpus names (file stems) found directly in `dir`.
///
/// Only files with one of `CORPUS_EXTENSIONS` are listed; names are sorted
/// and deduplicated (`a.json` and `a.txt` give one `a`).
pub fn list_corpora<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	let mut names = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		let is_corpus = path.is_file()
			&& path
				.extension()
				.and_then(OsStr::to_str)
				.is_some_and(|ext| CORPUS_EXTENSIONS.contains(&ext));

		if is_corpus {
			names.push(get_filename(&path)?);
		}
	}

	names.sort();
	names.dedup();
	Ok(names)
}

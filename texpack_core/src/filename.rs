/// A filename argument read from the text that follows a command name.
///
/// ```text
/// \includegraphics[width=\linewidth]{ plots/result.pdf }rest
///                 ^option_end       ^brace_open         ^consumed
/// ```
///
/// All offsets are relative to the start of the text passed to
/// [`extract_filename`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameGroup {
	/// Bytes up to and including the closing `}`.
	pub consumed: usize,
	/// Offset of the `]` closing the option group, if there is one.
	pub option_end: Option<usize>,
	/// Offset of the `{` opening the filename group.
	pub brace_open: usize,
	/// The filename with surrounding whitespace trimmed.
	pub name: String,
}

/// Why a filename group could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameError {
	/// A `[` opened an option group that was never closed.
	UnclosedOptionGroup,
	/// No `{...}` group follows the command.
	MissingGroup,
}

/// Read the `[options]{filename}` arguments at the start of `text`.
///
/// The option group is skipped only when `text` starts with `[`; it ends at
/// the first `]`. The filename group ends at the first `}` after its `{`, so
/// braces nested inside a filename are not supported.
pub fn extract_filename(text: &str) -> Result<FilenameGroup, FilenameError> {
	let option_end = if text.starts_with('[') {
		Some(text.find(']').ok_or(FilenameError::UnclosedOptionGroup)?)
	} else {
		None
	};

	let search_from = option_end.unwrap_or(0);
	let brace_open = text[search_from..]
		.find('{')
		.map(|offset| search_from + offset)
		.ok_or(FilenameError::MissingGroup)?;
	let brace_close = text[brace_open..]
		.find('}')
		.map(|offset| brace_open + offset)
		.ok_or(FilenameError::MissingGroup)?;

	Ok(FilenameGroup {
		consumed: brace_close + 1,
		option_end,
		brace_open,
		name: text[brace_open + 1..brace_close].trim().to_string(),
	})
}

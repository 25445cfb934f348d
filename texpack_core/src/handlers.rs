use std::path::PathBuf;

use tracing::info;

use crate::Counters;
use crate::DirectiveKind;
use crate::Document;
use crate::Notice;
use crate::PackResult;
use crate::Transducer;
use crate::assets::copy_asset;
use crate::directive::COMMENT_MARKER;
use crate::directive::INPUT;
use crate::filename::extract_filename;

/// What a handler did with the text at its directive: how many bytes it
/// consumed and what to emit in their place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
	pub consumed: usize,
	pub text: String,
}

impl Replacement {
	pub fn new(consumed: usize, text: impl Into<String>) -> Self {
		Self {
			consumed,
			text: text.into(),
		}
	}
}

/// Handle a comment starting at the first byte of `rest`.
///
/// The whole line, terminator included, is consumed. It is kept verbatim
/// when it holds nothing but comment markers and whitespace, and dropped
/// otherwise. Without a terminator the marker and the character after it
/// are replaced by a bare `%\n`.
pub fn handle_comment(rest: &str) -> Replacement {
	let Some(newline) = rest.find('\n') else {
		let consumed = rest.chars().take(2).map(char::len_utf8).sum();
		return Replacement::new(consumed, format!("{COMMENT_MARKER}\n"));
	};

	let line = &rest[..=newline];
	let is_separator = line
		.chars()
		.filter(|c| !c.is_whitespace())
		.all(|c| COMMENT_MARKER.starts_with(c));

	if is_separator {
		Replacement::new(line.len(), line)
	} else {
		Replacement::new(line.len(), "")
	}
}

/// Handle `\begin{figure}` or `\begin{figure*}`: the opener is kept and a
/// new figure slot starts.
pub fn handle_figure_open(kind: DirectiveKind, counters: Counters) -> (Replacement, Counters) {
	let marker = kind.marker();
	(
		Replacement::new(marker.len(), marker),
		counters.open_figure(),
	)
}

/// Handle `\includegraphics` or `\begin{overpic}`: copy the referenced asset
/// under its figure name and point the command at the copy.
///
/// A graphics directive with no open figure slot starts its own. A top-level
/// graphic closes its slot; a sub-figure leaves it open for its siblings.
pub(crate) fn handle_graphics(
	transducer: &mut Transducer,
	document: &Document,
	rest: &str,
	kind: DirectiveKind,
	counters: Counters,
) -> PackResult<(Replacement, Counters)> {
	let command = kind.marker();
	let arguments = &rest[command.len()..];
	let group = extract_filename(arguments).map_err(|error| document.malformed(command, error))?;

	let mut counters = if counters.slot_open {
		counters
	} else {
		counters.open_figure()
	};

	let is_subfigure = kind.is_subfigure();
	let name = copy_asset(
		&group.name,
		&document.base_dir,
		&document.path,
		transducer.output_dir(),
		&counters,
		is_subfigure,
	)?;

	info!(graphic = %name, source = %group.name, "replacing graphic");
	transducer.record(Notice::Graphic(name.clone()));

	let text = format!("{command}{}{{{name}}}", &arguments[..group.brace_open]);
	counters.subfigure += 1;
	if !is_subfigure {
		counters.slot_open = false;
	}

	Ok((Replacement::new(command.len() + group.consumed, text), counters))
}

/// Handle `\input`: pack the referenced sub-document and reference its copy
/// by file name.
///
/// The target is resolved against the including document's directory. The
/// sub-document resolves its own references against its own directory, and
/// the including document's directory is untouched for later siblings.
pub(crate) fn handle_input(
	transducer: &mut Transducer,
	document: &Document,
	rest: &str,
	counters: Counters,
) -> PackResult<(Replacement, Counters)> {
	let arguments = &rest[INPUT.len()..];
	let group = extract_filename(arguments).map_err(|error| document.malformed(INPUT, error))?;

	let mut target = PathBuf::from(&group.name);
	if target.extension().is_none() {
		target.set_extension(transducer.default_extension());
	}

	let counters = transducer.process_document(&document.base_dir.join(&target), counters)?;

	let file_name = target
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default();
	let text = format!("{INPUT}{{{file_name}}}");

	Ok((Replacement::new(INPUT.len() + group.consumed, text), counters))
}

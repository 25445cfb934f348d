use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;
use tracing::trace;

use crate::Counters;
use crate::DirectiveKind;
use crate::PackError;
use crate::PackResult;
use crate::config::DEFAULT_EXTENSION;
use crate::directive::scan;
use crate::filename::FilenameError;
use crate::handlers::Replacement;
use crate::handlers::handle_comment;
use crate::handlers::handle_figure_open;
use crate::handlers::handle_graphics;
use crate::handlers::handle_input;

/// One source document of a packing run.
#[derive(Debug, Clone)]
pub struct Document {
	/// Absolute path of the document.
	pub path: PathBuf,
	/// Directory that relative asset and `\input` paths are resolved against.
	pub base_dir: PathBuf,
	pub content: String,
}

impl Document {
	/// Read a document from disk.
	pub fn read(path: &Path) -> PackResult<Self> {
		let read_error = |source| {
			PackError::ReadDocument {
				path: path.to_path_buf(),
				source,
			}
		};
		let content = std::fs::read_to_string(path).map_err(read_error)?;
		let path = std::fs::canonicalize(path).map_err(read_error)?;
		let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

		Ok(Self {
			path,
			base_dir,
			content,
		})
	}

	/// The file name the packed copy is written under.
	pub fn file_name(&self) -> String {
		self.path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default()
	}

	pub(crate) fn malformed(&self, command: &str, error: FilenameError) -> PackError {
		let command = command.to_string();
		let document = self.path.clone();
		match error {
			FilenameError::UnclosedOptionGroup => PackError::UnclosedOptionGroup { command, document },
			FilenameError::MissingGroup => PackError::MissingFilenameGroup { command, document },
		}
	}
}

/// Something worth telling the user about, recorded in run order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
	/// A document was processed and written under this name.
	Document(String),
	/// A graphics asset was copied under this name.
	Graphic(String),
	/// The compiled bibliography was copied under this name.
	Bibliography(String),
}

/// A piece of the packed output.
#[derive(Debug)]
enum Segment<'a> {
	/// Source text copied unchanged.
	Verbatim(&'a str),
	/// Text a handler produced for a directive.
	Replacement(String),
}

impl Segment<'_> {
	fn as_str(&self) -> &str {
		match self {
			Self::Verbatim(text) => text,
			Self::Replacement(text) => text,
		}
	}
}

/// Collects output segments in source order and joins them once at the end.
#[derive(Debug)]
struct OutputBuilder<'a> {
	source: &'a str,
	/// End of the source text already accounted for.
	cursor: usize,
	segments: Vec<Segment<'a>>,
}

impl<'a> OutputBuilder<'a> {
	fn new(source: &'a str) -> Self {
		Self {
			source,
			cursor: 0,
			segments: Vec::new(),
		}
	}

	fn cursor(&self) -> usize {
		self.cursor
	}

	/// Emit the gap since the cursor verbatim, then the replacement for the
	/// span starting at `offset`.
	fn replace(&mut self, offset: usize, replacement: Replacement) {
		assert!(
			offset >= self.cursor,
			"replacement at {offset} overlaps text consumed up to {}",
			self.cursor
		);
		assert!(replacement.consumed > 0, "replacement at {offset} consumes nothing");

		if offset > self.cursor {
			self.segments
				.push(Segment::Verbatim(&self.source[self.cursor..offset]));
		}
		trace!(offset, consumed = replacement.consumed, "emit replacement");
		self.segments.push(Segment::Replacement(replacement.text));
		self.cursor = (offset + replacement.consumed).min(self.source.len());
	}

	fn finish(mut self) -> String {
		if self.cursor < self.source.len() {
			self.segments
				.push(Segment::Verbatim(&self.source[self.cursor..]));
		}

		let capacity = self.segments.iter().map(|segment| segment.as_str().len()).sum();
		let mut output = String::with_capacity(capacity);
		for segment in &self.segments {
			output.push_str(segment.as_str());
		}
		output
	}
}

/// Rewrites documents into a flat output directory, recursing into every
/// `\input` it meets.
#[derive(Debug)]
pub struct Transducer {
	output_dir: PathBuf,
	default_extension: String,
	notices: Vec<Notice>,
	/// Documents currently being processed, outermost first.
	active: Vec<PathBuf>,
}

impl Transducer {
	pub fn new(output_dir: impl Into<PathBuf>) -> Self {
		Self {
			output_dir: output_dir.into(),
			default_extension: DEFAULT_EXTENSION.to_string(),
			notices: Vec::new(),
			active: Vec::new(),
		}
	}

	/// Set the extension appended to `\input` targets that have none.
	#[must_use]
	pub fn with_default_extension(mut self, extension: &str) -> Self {
		self.default_extension = extension.trim_start_matches('.').to_string();
		self
	}

	pub fn output_dir(&self) -> &Path {
		&self.output_dir
	}

	pub fn default_extension(&self) -> &str {
		&self.default_extension
	}

	/// Notices recorded so far, in run order.
	pub fn notices(&self) -> &[Notice] {
		&self.notices
	}

	pub fn into_notices(self) -> Vec<Notice> {
		self.notices
	}

	pub(crate) fn record(&mut self, notice: Notice) {
		self.notices.push(notice);
	}

	/// Pack the document at `path` into the output directory and return the
	/// counters after its last directive.
	///
	/// The document is scanned once, every directive is applied left to
	/// right, and the result is written under the document's file name.
	/// Directives that start inside text an earlier directive consumed (for
	/// example a command in a deleted comment) are skipped.
	pub fn process_document(&mut self, path: &Path, counters: Counters) -> PackResult<Counters> {
		let document = Document::read(path)?;
		if self.active.contains(&document.path) {
			return Err(PackError::InclusionCycle {
				path: document.path,
			});
		}

		let file_name = document.file_name();
		info!(document = %file_name, "processing document");
		self.record(Notice::Document(file_name.clone()));
		self.active.push(document.path.clone());

		let directives = scan(&document.content);
		debug!(
			document = %file_name,
			directives = directives.len(),
			"located directives"
		);

		let mut builder = OutputBuilder::new(&document.content);
		let mut counters = counters;

		for directive in directives {
			if directive.offset < builder.cursor() {
				trace!(offset = directive.offset, kind = ?directive.kind, "skipping consumed directive");
				continue;
			}

			let rest = &document.content[directive.offset..];
			let (replacement, next) = match directive.kind {
				DirectiveKind::Comment => (handle_comment(rest), counters),
				DirectiveKind::FigureOpen | DirectiveKind::FigureOpenStarred => {
					handle_figure_open(directive.kind, counters)
				}
				DirectiveKind::Graphics
				| DirectiveKind::GraphicsSub
				| DirectiveKind::Overlay
				| DirectiveKind::OverlaySub => {
					handle_graphics(self, &document, rest, directive.kind, counters)?
				}
				DirectiveKind::Input => handle_input(self, &document, rest, counters)?,
			};

			counters = next;
			builder.replace(directive.offset, replacement);
		}

		let target = self.output_dir.join(&file_name);
		std::fs::write(&target, builder.finish()).map_err(|source| {
			PackError::WriteDocument {
				path: target.clone(),
				source,
			}
		})?;

		self.active.pop();
		Ok(counters)
	}
}

/// Pack a single document tree with default settings. See
/// [`Transducer::process_document`].
pub fn process_document(
	path: &Path,
	output_dir: &Path,
	counters: Counters,
) -> PackResult<Counters> {
	Transducer::new(output_dir).process_document(path, counters)
}

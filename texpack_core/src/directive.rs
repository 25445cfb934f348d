//! Directive location and classification.
//!
//! Locating is purely lexical: every literal occurrence of a marker is
//! reported, whether or not it sits inside a comment. The transducer later
//! drops occurrences that fall inside text already consumed by an earlier
//! directive.

/// Comment marker.
pub const COMMENT_MARKER: &str = "%";
/// Escape character that turns the comment marker into a literal.
pub const ESCAPE_CHAR: u8 = b'\\';
pub const FIGURE_OPEN: &str = r"\begin{figure}";
pub const FIGURE_OPEN_STARRED: &str = r"\begin{figure*}";
pub const INCLUDE_GRAPHICS: &str = r"\includegraphics";
pub const OVERPIC_OPEN: &str = r"\begin{overpic}";
pub const INPUT: &str = r"\input";

/// The handler a located directive is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
	Comment,
	FigureOpen,
	FigureOpenStarred,
	/// `\includegraphics` with its own figure slot.
	Graphics,
	/// `\includegraphics` sharing a figure slot with other graphics.
	GraphicsSub,
	/// `\begin{overpic}` with its own figure slot.
	Overlay,
	/// `\begin{overpic}` sharing a figure slot with other graphics.
	OverlaySub,
	Input,
}

impl DirectiveKind {
	/// The literal marker this kind is located by.
	pub fn marker(self) -> &'static str {
		match self {
			Self::Comment => COMMENT_MARKER,
			Self::FigureOpen => FIGURE_OPEN,
			Self::FigureOpenStarred => FIGURE_OPEN_STARRED,
			Self::Graphics | Self::GraphicsSub => INCLUDE_GRAPHICS,
			Self::Overlay | Self::OverlaySub => OVERPIC_OPEN,
			Self::Input => INPUT,
		}
	}

	pub fn is_figure_open(self) -> bool {
		matches!(self, Self::FigureOpen | Self::FigureOpenStarred)
	}

	pub fn is_graphics(self) -> bool {
		matches!(
			self,
			Self::Graphics | Self::GraphicsSub | Self::Overlay | Self::OverlaySub
		)
	}

	pub fn is_subfigure(self) -> bool {
		matches!(self, Self::GraphicsSub | Self::OverlaySub)
	}

	/// The sub-figure variant of a graphics kind. Other kinds are returned
	/// unchanged.
	fn as_subfigure(self) -> Self {
		match self {
			Self::Graphics => Self::GraphicsSub,
			Self::Overlay => Self::OverlaySub,
			other => other,
		}
	}
}

/// A located directive: where it starts and which handler consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
	/// Byte offset of the first marker byte.
	pub offset: usize,
	pub kind: DirectiveKind,
}

impl Directive {
	pub fn new(offset: usize, kind: DirectiveKind) -> Self {
		Self { offset, kind }
	}
}

/// Markers located by the figure scan, in scan order.
const FIGURE_SCAN: [DirectiveKind; 4] = [
	DirectiveKind::FigureOpen,
	DirectiveKind::FigureOpenStarred,
	DirectiveKind::Graphics,
	DirectiveKind::Overlay,
];

/// Find the first occurrence of `needle` in `haystack`.
pub(crate) fn memstr(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack
		.windows(needle.len())
		.position(|window| window == needle)
}

/// Return every offset at which one of the given markers literally occurs,
/// tagged with its kind and sorted ascending by offset. The sort is stable so
/// directives at equal offsets keep the order of `kinds`.
pub fn locate(content: &str, kinds: &[DirectiveKind]) -> Vec<Directive> {
	let bytes = content.as_bytes();
	let mut directives = Vec::new();

	for &kind in kinds {
		let marker = kind.marker().as_bytes();
		let mut search_from = 0;

		while search_from < bytes.len() {
			let Some(found) = memstr(&bytes[search_from..], marker) else {
				break;
			};
			let offset = search_from + found;
			directives.push(Directive::new(offset, kind));
			search_from = offset + 1;
		}
	}

	directives.sort_by_key(|directive| directive.offset);
	directives
}

/// Locate every unescaped comment marker.
pub fn locate_comments(content: &str) -> Vec<Directive> {
	let bytes = content.as_bytes();
	locate(content, &[DirectiveKind::Comment])
		.into_iter()
		.filter(|directive| directive.offset == 0 || bytes[directive.offset - 1] != ESCAPE_CHAR)
		.collect()
}

/// Locate figure-environment openers and graphics directives, classified
/// into top-level figures and sub-figures.
pub fn locate_figures(content: &str) -> Vec<Directive> {
	classify(&locate(content, &FIGURE_SCAN))
}

/// Locate every sub-document inclusion.
pub fn locate_inputs(content: &str) -> Vec<Directive> {
	locate(content, &[DirectiveKind::Input])
}

/// Reclassify graphics directives that share a figure slot.
///
/// A graphics directive becomes a sub-figure when the previous graphics
/// directive already was one, or when the directive immediately after it is
/// another graphics directive rather than a figure-environment opener. Any
/// non-graphics directive ends the current run. Lookahead always reads the
/// unclassified input, never the output of this pass.
pub fn classify(directives: &[Directive]) -> Vec<Directive> {
	let mut in_subfigure_run = false;

	directives
		.iter()
		.enumerate()
		.map(|(index, directive)| {
			if !directive.kind.is_graphics() {
				in_subfigure_run = false;
				return *directive;
			}

			let next_is_graphics = directives
				.get(index + 1)
				.is_some_and(|next| !next.kind.is_figure_open());

			if in_subfigure_run || next_is_graphics {
				in_subfigure_run = true;
				Directive::new(directive.offset, directive.kind.as_subfigure())
			} else {
				*directive
			}
		})
		.collect()
}

/// Run all three scans and merge them into one list ordered by offset.
/// Equal offsets keep scan order: comments, then figures, then inputs.
pub fn scan(content: &str) -> Vec<Directive> {
	let mut directives = locate_comments(content);
	directives.extend(locate_figures(content));
	directives.extend(locate_inputs(content));
	directives.sort_by_key(|directive| directive.offset);
	directives
}

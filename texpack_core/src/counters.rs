/// Figure numbering state threaded through a packing run.
///
/// A single value is seeded at the root document, passed into every handler
/// and every recursive transduction, and handed back updated. Numbering is
/// therefore continuous across `\input` boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
	/// Number of the current figure slot. Starts at 0, so the first figure of
	/// a run is `fig1`.
	pub figure: usize,
	/// Running graphics index inside the current figure slot. Sub-figures
	/// take their letter from it.
	pub subfigure: usize,
	/// Whether the current figure number is claimed by an open figure slot
	/// that the next graphics directive may use.
	pub slot_open: bool,
}

impl Counters {
	pub fn new(figure: usize, subfigure: usize) -> Self {
		Self {
			figure,
			subfigure,
			slot_open: false,
		}
	}

	/// Start a new figure slot.
	#[must_use]
	pub fn open_figure(self) -> Self {
		Self {
			figure: self.figure + 1,
			subfigure: 0,
			slot_open: true,
		}
	}
}

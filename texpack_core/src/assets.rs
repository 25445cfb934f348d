use std::path::Path;

use tracing::debug;

use crate::Counters;
use crate::PackError;
use crate::PackResult;

/// Letters used to tell the sub-figures of one figure apart.
pub const SUBFIGURE_LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Prefix of every generated figure name.
pub const FIGURE_PREFIX: &str = "fig";

/// Compute the canonical name of a figure asset: `fig<N><ext>` for a
/// top-level figure and `fig<N><letter><ext>` for a sub-figure. The source
/// extension is kept as is; a source without one yields a name without one.
pub fn figure_name(source: &str, counters: &Counters, is_subfigure: bool) -> PackResult<String> {
	let extension = Path::new(source)
		.extension()
		.map(|ext| format!(".{}", ext.to_string_lossy()))
		.unwrap_or_default();
	let figure = counters.figure;

	if !is_subfigure {
		return Ok(format!("{FIGURE_PREFIX}{figure}{extension}"));
	}

	let Some(&letter) = SUBFIGURE_LETTERS.get(counters.subfigure) else {
		return Err(PackError::SubfigureOverflow {
			figure,
			index: counters.subfigure,
		});
	};

	Ok(format!(
		"{FIGURE_PREFIX}{figure}{}{extension}",
		char::from(letter)
	))
}

/// Copy a figure asset into the output directory under its canonical name
/// and return that name.
///
/// `source` is resolved against `base_dir`, the directory of the document
/// that references it. `document` is only used for error reporting.
pub fn copy_asset(
	source: &str,
	base_dir: &Path,
	document: &Path,
	output_dir: &Path,
	counters: &Counters,
	is_subfigure: bool,
) -> PackResult<String> {
	let from = base_dir.join(source);
	if !from.is_file() {
		return Err(PackError::MissingAsset {
			path: from,
			document: document.to_path_buf(),
		});
	}

	let name = figure_name(source, counters, is_subfigure)?;
	let to = output_dir.join(&name);
	let bytes = std::fs::copy(&from, &to).map_err(|source| {
		PackError::CopyAsset {
			from: from.clone(),
			to: to.clone(),
			source,
		}
	})?;
	debug!(from = %from.display(), to = %to.display(), bytes, "copied asset");

	Ok(name)
}

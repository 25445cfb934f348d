use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::Counters;
use crate::Notice;
use crate::PackError;
use crate::PackResult;
use crate::Transducer;
use crate::config::DEFAULT_EXTENSION;
use crate::config::TexpackConfig;

/// Settings for one packing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
	/// Directory the packed documents and figures are written to. Created if
	/// missing.
	pub output_dir: PathBuf,
	/// Copy `<root-stem>.bbl` from the root document's directory if it
	/// exists.
	pub copy_bibliography: bool,
	/// Extension appended to `\input` targets that have none.
	pub default_extension: String,
}

impl PackOptions {
	pub fn new(output_dir: impl Into<PathBuf>) -> Self {
		Self {
			output_dir: output_dir.into(),
			copy_bibliography: true,
			default_extension: DEFAULT_EXTENSION.to_string(),
		}
	}

	/// Options taken from a loaded config, writing to `output_dir`.
	pub fn from_config(config: &TexpackConfig, output_dir: impl Into<PathBuf>) -> Self {
		Self {
			output_dir: output_dir.into(),
			copy_bibliography: config.bibliography,
			default_extension: config.default_extension.clone(),
		}
	}
}

/// Result of a packing run.
#[derive(Debug, Clone)]
pub struct PackReport {
	/// Absolute path of the root document.
	pub root: PathBuf,
	pub output_dir: PathBuf,
	/// Everything that happened, in run order.
	pub notices: Vec<Notice>,
	/// Counters after the last directive of the run.
	pub counters: Counters,
}

impl PackReport {
	/// Number of documents written.
	pub fn document_count(&self) -> usize {
		self.notices
			.iter()
			.filter(|notice| matches!(notice, Notice::Document(_)))
			.count()
	}

	/// Number of figure assets copied.
	pub fn graphic_count(&self) -> usize {
		self.notices
			.iter()
			.filter(|notice| matches!(notice, Notice::Graphic(_)))
			.count()
	}
}

/// Pack the document tree rooted at `root` into `options.output_dir`.
///
/// Numbering starts at zero, so the first figure of the run is `fig1`. A
/// failure aborts the run and leaves whatever was already written on disk.
pub fn pack(root: &Path, options: &PackOptions) -> PackResult<PackReport> {
	if !root.is_file() {
		return Err(PackError::RootNotFile {
			path: root.to_path_buf(),
		});
	}
	let root = std::fs::canonicalize(root)?;

	if !options.output_dir.is_dir() {
		std::fs::create_dir_all(&options.output_dir).map_err(|source| {
			PackError::CreateOutputDir {
				path: options.output_dir.clone(),
				source,
			}
		})?;
	}

	let mut transducer =
		Transducer::new(&options.output_dir).with_default_extension(&options.default_extension);
	let counters = transducer.process_document(&root, Counters::default())?;
	let mut notices = transducer.into_notices();

	if options.copy_bibliography {
		let bibliography = root.with_extension("bbl");
		if let Some(name) = bibliography.file_name().filter(|_| bibliography.is_file()) {
			std::fs::copy(&bibliography, options.output_dir.join(name))?;
			let name = name.to_string_lossy().into_owned();
			info!(bibliography = %name, "copied bibliography");
			notices.push(Notice::Bibliography(name));
		}
	}

	Ok(PackReport {
		root,
		output_dir: options.output_dir.clone(),
		notices,
		counters,
	})
}

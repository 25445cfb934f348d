use std::path::Path;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use texpack_core::PackOptions;
use texpack_core::config::TexpackConfig;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Pack a LaTeX project into a clean, uncommented, flat directory.",
	long_about = "texpack reads a root LaTeX document and writes a self-contained copy of it \
	              into an output directory.\n\nComments are stripped, every `\\input` document is \
	              packed recursively and referenced by file name, and every figure included with \
	              `\\includegraphics` or `\\begin{overpic}` is copied as `fig<N>` (or `fig<N><letter>` \
	              for sub-figures).\n\nSettings can also be read from a `texpack.toml` next to the \
	              root document."
)]
pub struct TexpackCli {
	/// Path to the root document.
	pub root: PathBuf,

	/// Directory under which the packed output is stored. Defaults to the
	/// `output` config value, else `./pack<yymmdd>`.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Do not copy the compiled bibliography (`<root>.bbl`).
	#[arg(long, default_value_t = false)]
	pub exclude_bbl: bool,

	/// Extension appended to `\input` targets that have none.
	#[arg(long)]
	pub default_extension: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl TexpackCli {
	/// Directory holding the root document, where the config file is looked
	/// up.
	pub fn root_dir(&self) -> PathBuf {
		match self.root.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
			_ => PathBuf::from("."),
		}
	}
}

/// The output directory used when neither the command line nor the config
/// names one: `pack<yymmdd>` in the working directory.
pub fn default_output_dir(today: NaiveDate) -> PathBuf {
	PathBuf::from(format!("pack{}", today.format("%y%m%d")))
}

/// Combine command-line flags, the config file found in `config_dir` and the
/// built-in defaults, in that order of precedence.
pub fn resolve_options(
	args: &TexpackCli,
	config: Option<&TexpackConfig>,
	config_dir: &Path,
	today: NaiveDate,
) -> PackOptions {
	let defaults = TexpackConfig::default();
	let config = config.unwrap_or(&defaults);

	let output_dir = args
		.output
		.clone()
		.or_else(|| config.output_dir(config_dir))
		.unwrap_or_else(|| default_output_dir(today));

	let mut options = PackOptions::from_config(config, output_dir);
	if args.exclude_bbl {
		options.copy_bibliography = false;
	}
	if let Some(extension) = &args.default_extension {
		options.default_extension = extension.trim_start_matches('.').to_string();
	}

	options
}

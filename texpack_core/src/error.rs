use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum PackError {
	#[error(transparent)]
	#[diagnostic(code(texpack::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read document `{path}`")]
	#[diagnostic(
		code(texpack::read_document),
		help("check that the file exists and is valid UTF-8")
	)]
	ReadDocument {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write packed document `{path}`")]
	#[diagnostic(code(texpack::write_document))]
	WriteDocument {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("missing asset `{path}` referenced from `{document}`")]
	#[diagnostic(
		code(texpack::missing_asset),
		help("graphics paths are resolved relative to the directory of the including document")
	)]
	MissingAsset { path: PathBuf, document: PathBuf },

	#[error("failed to copy `{from}` to `{to}`")]
	#[diagnostic(code(texpack::copy_asset))]
	CopyAsset {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("unclosed option group after `{command}` in `{document}`")]
	#[diagnostic(
		code(texpack::unclosed_option_group),
		help("add the closing `]` to the option group")
	)]
	UnclosedOptionGroup { command: String, document: PathBuf },

	#[error("missing `{{...}}` filename group after `{command}` in `{document}`")]
	#[diagnostic(
		code(texpack::missing_filename_group),
		help("the command must be followed by a braced filename, e.g. `{command}{{name}}`")
	)]
	MissingFilenameGroup { command: String, document: PathBuf },

	#[error("figure {figure} has more than 26 sub-figures (index {index})")]
	#[diagnostic(
		code(texpack::subfigure_overflow),
		help("sub-figures are lettered `a` through `z`; split the figure into several figures")
	)]
	SubfigureOverflow { figure: usize, index: usize },

	#[error("inclusion cycle detected at `{path}`")]
	#[diagnostic(
		code(texpack::inclusion_cycle),
		help("a document must not `\\input` itself, directly or through other documents")
	)]
	InclusionCycle { path: PathBuf },

	#[error("the root document `{path}` is not a file")]
	#[diagnostic(code(texpack::root_not_file))]
	RootNotFile { path: PathBuf },

	#[error("failed to create output directory `{path}`")]
	#[diagnostic(code(texpack::create_output_dir))]
	CreateOutputDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(texpack::config_parse),
		help("check that texpack.toml is valid TOML with `output`, `bibliography` and `default_extension` keys")
	)]
	ConfigParse(String),
}

pub type PackResult<T> = Result<T, PackError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;

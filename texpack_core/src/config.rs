use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::PackError;
use crate::PackResult;

/// Extension appended to `\input` targets that have none.
pub const DEFAULT_EXTENSION: &str = "tex";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["texpack.toml", ".texpack.toml", ".config/texpack.toml"];

/// Configuration loaded from a `texpack.toml` file next to the root
/// document.
///
/// ```toml
/// output = "submission"
/// bibliography = true
/// default_extension = "tex"
/// ```
///
/// Every key is optional. Command-line flags take precedence over the file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TexpackConfig {
	/// Output directory, relative to the directory holding the config file.
	#[serde(default)]
	pub output: Option<PathBuf>,
	/// Copy the compiled bibliography (`<root>.bbl`) into the output.
	#[serde(default = "default_bibliography")]
	pub bibliography: bool,
	/// Extension appended to `\input` targets that have none.
	#[serde(default = "default_extension")]
	pub default_extension: String,
}

fn default_bibliography() -> bool {
	true
}

fn default_extension() -> String {
	DEFAULT_EXTENSION.to_string()
}

impl Default for TexpackConfig {
	fn default() -> Self {
		Self {
			output: None,
			bibliography: default_bibliography(),
			default_extension: default_extension(),
		}
	}
}

impl TexpackConfig {
	/// Return the first config file that exists in `dir`.
	pub fn resolve_path(dir: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| dir.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file in `dir`.
	/// Returns `None` if there is none.
	pub fn load(dir: &Path) -> PackResult<Option<TexpackConfig>> {
		let Some(config_path) = Self::resolve_path(dir) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: TexpackConfig =
			toml::from_str(&content).map_err(|e| PackError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// The configured output directory resolved against `dir`.
	pub fn output_dir(&self, dir: &Path) -> Option<PathBuf> {
		self.output.as_ref().map(|output| dir.join(output))
	}
}

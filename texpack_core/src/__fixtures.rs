use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::AnyResult;

/// Fake PNG payload. Only the bytes matter, never the image.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDRfixture";
pub const PDF_BYTES: &[u8] = b"%PDF-1.5\n%fixture\n";

/// A scratch LaTeX project with a sibling output directory.
pub struct Project {
	tmp: TempDir,
}

impl Project {
	pub fn new() -> AnyResult<Self> {
		let tmp = tempfile::tempdir()?;
		std::fs::create_dir_all(tmp.path().join("src"))?;
		std::fs::create_dir_all(tmp.path().join("out"))?;
		Ok(Self { tmp })
	}

	/// Directory holding the source documents.
	pub fn src(&self) -> PathBuf {
		self.tmp.path().join("src")
	}

	pub fn out(&self) -> PathBuf {
		self.tmp.path().join("out")
	}

	/// Write a file under the source directory, creating parents.
	pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> AnyResult<PathBuf> {
		let path = self.src().join(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, content)?;
		Ok(path)
	}

	pub fn read_output(&self, name: &str) -> AnyResult<String> {
		Ok(std::fs::read_to_string(self.out().join(name))?)
	}

	pub fn read_output_bytes(&self, name: &str) -> AnyResult<Vec<u8>> {
		Ok(std::fs::read(self.out().join(name))?)
	}

	/// Sorted file names in the output directory.
	pub fn output_names(&self) -> AnyResult<Vec<String>> {
		list_names(&self.out())
	}
}

fn list_names(dir: &Path) -> AnyResult<Vec<String>> {
	let mut names = Vec::new();
	for entry in std::fs::read_dir(dir)? {
		names.push(entry?.file_name().to_string_lossy().into_owned());
	}
	names.sort();
	Ok(names)
}

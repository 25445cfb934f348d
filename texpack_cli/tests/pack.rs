mod common;

use common::texpack_cmd;
use common::write;
use predicates::prelude::PredicateBooleanExt;
use texpack_core::AnyEmptyResult;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfixture";

#[test]
fn pack_writes_flat_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let src = tmp.path().join("paper");
	write(&src, "figures/a.png", PNG_BYTES)?;
	write(&src, "figures/b.png", PNG_BYTES)?;
	write(&src, "sections/intro.tex", "Intro % todo\n\\input{details}\n")?;
	write(&src, "sections/details.tex", "Details.\n")?;
	write(
		&src,
		"main.tex",
		"\\input{sections/intro}\n\\begin{figure}\n\\includegraphics{figures/a.png}\n\\\
		 includegraphics{figures/b.png}\n\\end{figure}\n",
	)?;
	let out = tmp.path().join("out");

	texpack_cmd()
		.arg(src.join("main.tex"))
		.arg("--output")
		.arg(&out)
		.assert()
		.success()
		.stdout(predicates::str::contains("Processing 'main.tex'..."))
		.stdout(predicates::str::contains("Processing 'intro.tex'..."))
		.stdout(predicates::str::contains("Processing 'details.tex'..."))
		.stdout(predicates::str::contains(" --> Replacing graphic 'fig1a.png'..."))
		.stdout(predicates::str::contains(" --> Replacing graphic 'fig1b.png'..."))
		.stdout(predicates::str::contains("DONE in"));

	assert!(out.join("intro.tex").is_file());
	assert!(out.join("details.tex").is_file());
	assert_eq!(std::fs::read(out.join("fig1a.png"))?, PNG_BYTES);
	assert_eq!(
		std::fs::read_to_string(out.join("intro.tex"))?,
		"Intro \\input{details.tex}\n"
	);

	let main = std::fs::read_to_string(out.join("main.tex"))?;
	insta::assert_snapshot!(main, @r"
	\input{intro.tex}
	\begin{figure}
	\includegraphics{fig1a.png}
	\includegraphics{fig1b.png}
	\end{figure}
	");

	Ok(())
}

#[test]
fn pack_copies_bibliography_by_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "main.tex", "Text.\n")?;
	write(tmp.path(), "main.bbl", "bbl\n")?;
	let out = tmp.path().join("out");

	texpack_cmd()
		.arg(tmp.path().join("main.tex"))
		.arg("--output")
		.arg(&out)
		.assert()
		.success()
		.stdout(predicates::str::contains("Copied bibliography file 'main.bbl'."));

	assert!(out.join("main.bbl").is_file());

	Ok(())
}

#[test]
fn pack_excludes_bibliography_on_request() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "main.tex", "Text.\n")?;
	write(tmp.path(), "main.bbl", "bbl\n")?;
	let out = tmp.path().join("out");

	texpack_cmd()
		.arg(tmp.path().join("main.tex"))
		.arg("--output")
		.arg(&out)
		.arg("--exclude-bbl")
		.assert()
		.success()
		.stdout(predicates::str::contains("bibliography").not());

	assert!(!out.join("main.bbl").exists());
	assert!(out.join("main.tex").is_file());

	Ok(())
}

#[test]
fn pack_uses_config_output_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "main.tex", "Text.\n")?;
	write(tmp.path(), "texpack.toml", "output = \"submission\"\n")?;

	texpack_cmd()
		.arg(tmp.path().join("main.tex"))
		.assert()
		.success();

	assert!(tmp.path().join("submission/main.tex").is_file());

	Ok(())
}

#[test]
fn output_flag_overrides_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "main.tex", "Text.\n")?;
	write(tmp.path(), ".texpack.toml", "output = \"submission\"\n")?;
	let out = tmp.path().join("explicit");

	texpack_cmd()
		.arg(tmp.path().join("main.tex"))
		.arg("-o")
		.arg(&out)
		.assert()
		.success();

	assert!(out.join("main.tex").is_file());
	assert!(!tmp.path().join("submission").exists());

	Ok(())
}

#[test]
fn pack_defaults_to_dated_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "main.tex", "Text.\n")?;

	texpack_cmd()
		.current_dir(tmp.path())
		.arg("main.tex")
		.assert()
		.success();

	let packed: Vec<_> = std::fs::read_dir(tmp.path())?
		.filter_map(Result::ok)
		.map(|entry| entry.file_name().to_string_lossy().into_owned())
		.filter(|name| name.starts_with("pack") && name.len() == "pack".len() + 6)
		.collect();
	assert_eq!(packed.len(), 1);
	assert!(tmp.path().join(&packed[0]).join("main.tex").is_file());

	Ok(())
}

#[test]
fn missing_root_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	texpack_cmd()
		.arg(tmp.path().join("absent.tex"))
		.arg("--output")
		.arg(tmp.path().join("out"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("is not a file"));

	Ok(())
}

#[test]
fn missing_figure_fails_with_diagnostic() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "main.tex", "\\includegraphics{nowhere.png}\n")?;

	texpack_cmd()
		.arg(tmp.path().join("main.tex"))
		.arg("--output")
		.arg(tmp.path().join("out"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("missing asset"))
		.stderr(predicates::str::contains("texpack::missing_asset"));

	Ok(())
}

#[test]
fn malformed_option_group_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "main.tex", "\\includegraphics[width=3cm{a.png}\n")?;

	texpack_cmd()
		.arg(tmp.path().join("main.tex"))
		.arg("--output")
		.arg(tmp.path().join("out"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unclosed option group"));

	Ok(())
}

#[test]
fn invalid_config_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "main.tex", "Text.\n")?;
	write(tmp.path(), "texpack.toml", "bibliography = \"maybe\"\n")?;

	texpack_cmd()
		.arg(tmp.path().join("main.tex"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

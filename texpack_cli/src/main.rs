use std::process;
use std::time::Instant;

use clap::Parser;
use owo_colors::OwoColorize;
use texpack_cli::TexpackCli;
use texpack_cli::resolve_options;
use texpack_core::Notice;
use texpack_core::config::TexpackConfig;
use texpack_core::pack;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = TexpackCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	// --verbose shows the core's progress events, otherwise RUST_LOG decides.
	let filter = if args.verbose {
		EnvFilter::new("texpack_core=debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.init();

	if let Err(e) = run(&args) {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<texpack_core::PackError>() {
			Ok(pack_err) => {
				let report: miette::Report = (*pack_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn run(args: &TexpackCli) -> Result<(), Box<dyn std::error::Error>> {
	let start = Instant::now();
	let root_dir = args.root_dir();
	let config = TexpackConfig::load(&root_dir)?;

	if args.verbose {
		match TexpackConfig::resolve_path(&root_dir) {
			Some(path) => println!("Using config: {}", path.display()),
			None => println!("No config file found in {}", root_dir.display()),
		}
	}

	let today = chrono::Local::now().date_naive();
	let options = resolve_options(args, config.as_ref(), &root_dir, today);
	let report = pack(&args.root, &options)?;

	for notice in &report.notices {
		match notice {
			Notice::Document(name) => println!("Processing '{name}'..."),
			Notice::Graphic(name) => println!(" --> Replacing graphic '{name}'..."),
			Notice::Bibliography(name) => println!("Copied bibliography file '{name}'."),
		}
	}

	if args.verbose {
		println!();
		println!("{}", colored!("Summary", bold));
		println!("{:<16} {}", "root", report.root.display());
		println!("{:<16} {}", "output", report.output_dir.display());
		println!("{:<16} {}", "documents", report.document_count());
		println!("{:<16} {}", "figures", report.graphic_count());
	}

	println!(
		"\n{} in {:.3}s",
		colored!("DONE", green),
		start.elapsed().as_secs_f64()
	);

	Ok(())
}

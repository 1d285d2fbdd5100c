//! cmtheme CLI - convert .tmTheme files into CodeMirror stylesheets.

use std::path::PathBuf;
use std::time::Instant;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use cmtheme::{BatchOptions, Conversion, ConvertOptions, DEFAULT_OUTPUT_DIR, Error};
use miette::{Result, miette};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Convert TextMate / Sublime Text themes into CodeMirror stylesheets.
///
/// Log verbosity follows RUST_LOG (default: warn).
#[derive(Debug, Parser)]
#[command(name = "cmtheme", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a single .tmTheme file
    Convert {
        /// Theme display name, e.g. "Solarized Dark"
        ///
        /// Lower-cased and hyphenated, it becomes the `cm-s-<name>` root class
        /// and the output file name.
        name: String,

        /// Path to the .tmTheme file
        theme_path: PathBuf,

        /// Directory to write the stylesheet to
        #[arg(default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Print the conversion tree as JSON before writing
        #[arg(short, long)]
        debug: bool,
    },

    /// Convert every .tmTheme file found under a directory
    Batch {
        /// Directory to search (recursively)
        themes_dir: PathBuf,

        /// Directory to write the stylesheets to
        #[arg(default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Print each conversion tree as JSON before writing
        #[arg(short, long)]
        debug: bool,
    },
}

fn main() -> Result<()> {
    // Install Miette's graphical error handler for nice CLI diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().build())
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Convert {
            name,
            theme_path,
            output_dir,
            debug,
        } => {
            let options = ConvertOptions::new(utf8(theme_path)?)
                .with_name(name)
                .with_output_dir(utf8(output_dir)?)
                .with_debug(debug);

            let conversion = cmtheme::convert_file(&options)?;
            print_converted(&conversion);
        }
        Command::Batch {
            themes_dir,
            output_dir,
            debug,
        } => {
            let options = BatchOptions {
                themes_dir: utf8(themes_dir)?,
                output_dir: utf8(output_dir)?,
                debug,
            };
            batch(&options)?;
        }
    }

    Ok(())
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf, Error> {
    Utf8PathBuf::from_path_buf(path).map_err(Error::NonUtf8Path)
}

fn print_converted(conversion: &Conversion) {
    println!(
        "  {} Converted theme: {} → {}",
        "✓".green(),
        conversion.name.bold(),
        conversion.output_path.cyan()
    );

    let unsupported = conversion.tree.unsupported().len();
    if unsupported > 0 {
        println!(
            "    {} {} unsupported scopes (use --debug to list them)",
            "Note:".yellow(),
            unsupported
        );
    }
}

fn batch(options: &BatchOptions) -> Result<()> {
    eprintln!(
        "{} Converting themes in {}",
        "●".cyan(),
        options.themes_dir.cyan()
    );

    let start = Instant::now();
    let stats = cmtheme::convert_dir(options)?;
    let elapsed = start.elapsed();

    for conversion in &stats.converted {
        print_converted(conversion);
    }
    for path in &stats.skipped {
        eprintln!(
            "  {} skipped non UTF-8 path: {}",
            "Note:".yellow(),
            path.display()
        );
    }

    let converted = stats.converted.len();
    let unsupported = stats.unsupported_scopes();
    let failed = stats.failed.len();

    for failure in stats.failed {
        eprintln!("  {} {}", "✗".red(), failure.path);
        eprintln!("{:?}", miette::Report::new(failure.error));
    }

    eprintln!("\n{}", "Results:".bold());
    eprintln!("  {} themes converted", converted.to_string().green());
    eprintln!(
        "  {} unsupported scopes",
        unsupported.to_string().yellow()
    );
    if failed > 0 {
        eprintln!("  {} themes failed", failed.to_string().red());
    }
    eprintln!("\n  Completed in {:.2}s", elapsed.as_secs_f64());

    if failed > 0 {
        return Err(miette!(
            "{failed} of {} themes failed to convert",
            converted + failed
        ));
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use rollup_sheet::config::{
    DEFAULT_DISPLAY_LEVEL, LEVEL_CEILING, ParseOptions, ReadOptions,
};
use rollup_sheet::grid;
use rollup_sheet::json_export;
use rollup_sheet::render;
use rollup_sheet::summary::{self, markers};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("target").args(["export", "json"]).multiple(true)))]
struct Cli {
    /// Summary CSV file path
    #[arg(required = true)]
    file_path: PathBuf,

    /// Encoding used when the file has no byte order mark (e.g. shift_jis, utf-8)
    #[arg(long, short = 'e', default_value = "shift_jis")]
    encoding: String,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Deepest level accepted in the file
    #[arg(
        long,
        default_value_t = LEVEL_CEILING,
        value_parser = clap::value_parser!(u8).range(1..=5)
    )]
    max_level: u8,

    /// Level to display; repeat for several. Defaults to levels 1 to 4
    #[arg(long, short = 'l', value_parser = clap::value_parser!(u8).range(1..=5))]
    level: Vec<u8>,

    /// Print the component tree instead of the level tables
    #[arg(long, short = 't')]
    tree: bool,

    /// Print JSON to stdout: 'tree', 'levels' or 'all'
    #[arg(long, short = 'j', num_args = 0..=1, default_missing_value = "all")]
    json: Option<String>,

    /// Export the table of this level to CSV
    #[arg(
        long,
        short = 'x',
        conflicts_with = "json",
        value_parser = clap::value_parser!(u8).range(1..=5)
    )]
    export: Option<u8>,

    /// Output path for --export (default: timestamped file next to the input) or --json
    #[arg(long, short = 'o', requires = "target")]
    output: Option<PathBuf>,

    /// Skip the check that level-1 columns line up with the total column
    #[arg(long)]
    no_verify_totals: bool,

    /// Log more (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rollup_sheet={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let read_options = ReadOptions::new(&cli.encoding, cli.delimiter)?;
    let parse_options = ParseOptions {
        verify_totals: !cli.no_verify_totals,
        ..ParseOptions::default()
    }
    .with_max_level(cli.max_level);

    let loaded = grid::load(&cli.file_path, &read_options)
        .with_context(|| format!("Unable to read summary file: {}", cli.file_path.display()))?;
    let tree = summary::parse_grid(&loaded.grid, &parse_options)
        .with_context(|| format!("Unable to parse summary file: {}", cli.file_path.display()))?;

    let levels: Vec<u8> = if cli.level.is_empty() {
        (1..=DEFAULT_DISPLAY_LEVEL.min(parse_options.max_level)).collect()
    } else {
        cli.level.clone()
    };

    // Export a single level table and exit
    if let Some(level) = cli.export {
        let table = summary::project_level(&tree, level);
        let path = cli
            .output
            .clone()
            .unwrap_or_else(|| grid::default_export_path(&cli.file_path, level));

        // Written back in the encoding the input was actually read with
        grid::write_table(&table, &path, &loaded.write_options())
            .with_context(|| format!("Failed to export level {}: {}", level, path.display()))?;
        eprintln!("Exported level {} to {}", level, path.display());

        return Ok(());
    }

    if let Some(scope) = &cli.json {
        let scope = match json_export::JsonScope::from_str(scope) {
            Ok(scope) => scope,
            Err(_) => anyhow::bail!("Invalid JSON scope: {}", scope),
        };

        let summary = json_export::generate_summary_json(&tree, &levels, scope);
        match &cli.output {
            Some(path) => {
                json_export::write_json_to_file(&summary, path)?;
                eprintln!("Wrote JSON to {}", path.display());
            }
            None => println!("{}", json_export::serialize_to_json(&summary)?),
        }

        return Ok(());
    }

    if cli.tree {
        print!("{}", render::render_tree(&tree));
        return Ok(());
    }

    for level in levels {
        let table = summary::project_level(&tree, level);
        println!("[{}]", markers::level_marker(level));
        print!("{}", render::render_table(&table));
        println!();
    }

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use log::info;
use trng_gen::{emit, logger, VariantTable};

/// Command line options for the TRNG variant generator. The variant table
/// itself is compiled in, so the flags only choose where the generated
/// files land and how chatty the run is — two runs over the same table
/// always produce byte-identical artifacts.
///
/// The generator emits, per variant: the structural wrapper source, the
/// behavioural model source, and a flow directory with 'config.json' and
/// 'pin_order.cfg'. The aggregated stream on stdout (macro placements,
/// path-list sections, instantiation snippets, build chain) is consumed
/// positionally by the packaging script, so keep stdout clean of anything
/// else.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory that receives the generated sources and flow configs
    #[arg(short, long, value_name = "DIR", default_value = "trng_configs")]
    output: PathBuf,

    /// Print the aggregated stream only, without writing any files
    #[arg(short, long, value_name = "BOOL", default_value = "false")]
    dry_run: bool,

    /// Verbosity
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Verbosity of generated output?
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();
    let level: String = args.log_level.unwrap_or("info".to_string());
    logger::configure(level.as_str(), args.verbose > 0)?;

    let table = VariantTable::builtin()?;
    info!("Variant table holds {} entries", table.len());

    if args.verbose > 0 {
        eprintln!("{}", table);
    }

    if args.dry_run {
        info!("Dry run, skipping file writes");
    } else {
        emit::write_artifacts(&table, &args.output)?;
        info!("Artifacts written below '{}'", args.output.display());
    }

    print!("{}", emit::stream(&table));

    Ok(())
}

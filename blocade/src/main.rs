use std::{
    fs,
    io::{self, BufWriter, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use blocade::{decoder, Options, Target};
use clap::Parser;
use tracing::debug;

/// Converts BLoC programs into binary lambda calculus.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input file, `-` for standard input
    #[arg(short, long, default_value = "-")]
    input: String,
    /// Output target: unblc, unbblc, blc or bblc
    #[arg(short, long)]
    target: String,
    /// Output file [default: standard output]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Only bind shared entries reachable from the root (blc, bblc)
    #[arg(long)]
    prune: bool,
    /// Print diagnostic traces to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    let mut buffer = vec![];
    if input == "-" {
        debug!("reading from stdin");
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("can't read from stdin")?;
    } else {
        debug!(path = input, "reading input");
        buffer = fs::read(input).with_context(|| format!("can't read file {input}"))?;
    }
    Ok(buffer)
}

fn main() -> Result<()> {
    let args = Args::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        e.print().ok();
        std::process::exit(code)
    });
    util::logging::init(args.verbose)?;

    let target: Target = args.target.parse()?;
    let options = Options {
        prune_unreachable: args.prune,
    };
    let input = read_input(&args.input)?;
    let table = decoder::decode(&input)?;
    debug!(%target, entries = table.len(), "converting");

    match &args.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("can't open file {}", path.display()))?;
            target.convert(&table, BufWriter::new(file), options)?;
        }
        None => {
            target.convert(&table, BufWriter::new(io::stdout().lock()), options)?;
        }
    }
    debug!("done");
    Ok(())
}

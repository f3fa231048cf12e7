//! Bitcoin chainstate UTXO dump CLI

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use utxo_dump::{Dumper, Error, Field, FieldSet, Network, Store};

#[derive(Parser)]
#[command(name = "utxo-dump")]
#[command(about = "Dump every UTXO in a bitcoin chainstate database to a CSV file")]
#[command(version)]
struct Cli {
    /// Location of the bitcoin chainstate LevelDB directory
    /// (default: $HOME/.bitcoin/chainstate)
    #[arg(long = "db")]
    db: Option<PathBuf>,

    /// File to write the CSV rows to
    #[arg(long = "o", default_value = "utxodump.csv")]
    output: PathBuf,

    /// Comma-separated output columns
    /// [count,txid,vout,height,coinbase,amount,nsize,script,type,address]
    #[arg(long = "f", default_value = "count,txid,vout,amount,type,address")]
    fields: String,

    /// The chainstate belongs to testnet (otherwise detected from the
    /// db path)
    #[arg(long = "testnet")]
    testnet: bool,

    /// Print each row to stdout while dumping (noticeably slower)
    #[arg(long = "v")]
    verbose: bool,

    /// Also write the end-of-run stats as JSON to this file
    #[arg(long = "stats")]
    stats: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    // Refuse to touch the database while a node is using it.
    ensure_node_stopped()?;

    let db = match cli.db {
        Some(path) => path,
        None => default_chainstate_dir()?,
    };
    let db_display = db.display().to_string();

    let network = Network::detect(cli.testnet, &db_display);
    let fields = FieldSet::parse(&cli.fields)?;

    let mut store = Store::open(&db)?;

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let mut writer = BufWriter::new(file);

    info!(
        "processing {} and writing results to {}",
        db_display,
        cli.output.display()
    );

    let mut dumper = Dumper::new(fields.clone(), network);
    writeln!(writer, "{}", dumper.header()).map_err(Error::SinkWrite)?;

    let progress = if cli.verbose {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {human_pos} utxos ({per_sec})")?,
        );
        pb
    };

    for (key, value) in store.entries()? {
        if let Some(row) = dumper.process(&key, &value)? {
            writeln!(writer, "{row}").map_err(Error::SinkWrite)?;
            if cli.verbose {
                println!("{row}");
            } else {
                progress.inc(1);
            }
        }
    }

    writer.flush().map_err(Error::SinkWrite)?;
    progress.finish_and_clear();

    let stats = dumper.into_stats();

    println!();
    println!("Total UTXOs: {}", stats.utxo_count);
    if fields.contains(Field::Amount) {
        println!("Total BTC:   {}", stats.total_btc());
    }
    if fields.contains(Field::Type) {
        println!("Script Types:");
        for (label, count) in stats.type_counts() {
            println!(" {label:<12} {count}");
        }
    }

    if let Some(path) = cli.stats {
        stats.save(&path)?;
        info!("stats written to {}", path.display());
    }

    Ok(())
}

/// A node answering RPC means the chainstate is live; reading it now
/// risks corrupting the node's view.
fn ensure_node_stopped() -> Result<(), Error> {
    match Command::new("bitcoin-cli").arg("getnetworkinfo").output() {
        Ok(output) if output.status.success() => Err(Error::HostNodeRunning),
        _ => Ok(()),
    }
}

fn default_chainstate_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").context("HOME is not set; pass --db explicitly")?;
    Ok(PathBuf::from(home).join(".bitcoin").join("chainstate"))
}

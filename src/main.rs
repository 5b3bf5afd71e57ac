// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app_config::BuilderConfig;
use atom_builder::{Document, APP_NAME, LOG_TARGETS};
use clap::{Parser, Subcommand};
use periodic_table::{Element, PRESETS};

#[derive(Parser)]
#[command(name = APP_NAME, version, about = "Build and inspect atom builder documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the element presets
    Presets,
    /// Build the neutral atom of an element and write it as JSON
    Preset {
        /// Chemical symbol, case-insensitive
        symbol: String,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed for ids and placement jitter
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the composition of a saved document
    Info { file: PathBuf },
}

fn catalog_listing() -> String {
    PRESETS
        .iter()
        .map(|preset| {
            format!(
                "{:<2}  {:<9}  Z={:<3} N={}\n",
                preset.symbol, preset.name, preset.protons, preset.neutrons
            )
        })
        .collect()
}

fn composition(document: &Document) -> String {
    let element = document
        .element()
        .map_or("unknown element", |element| element.name());
    format!(
        "{element}\nZ={} N={} A={} electrons={} charge={:+}\n",
        document.proton_count(),
        document.neutron_count(),
        document.mass_number(),
        document.electron_count(),
        document.net_charge(),
    )
}

fn build_preset(symbol: &str, seed: Option<u64>) -> Result<Document> {
    let element =
        Element::from_symbol(symbol).ok_or_else(|| anyhow!("unknown element symbol {symbol:?}"))?;
    let mut document = Document::with_config(&BuilderConfig::load(), seed);
    document.load_element(element);
    Ok(document)
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Presets => print!("{}", catalog_listing()),
        Command::Preset {
            symbol,
            output,
            seed,
        } => {
            let document = build_preset(&symbol, seed)?;
            match output {
                Some(path) => document
                    .save_to_path(&path)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", document.save_json()?),
            }
        }
        Command::Info { file } => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let mut document = Document::new();
            document
                .load_json(&json)
                .with_context(|| format!("loading {}", file.display()))?;
            print!("{}", composition(&document));
        }
    }
    Ok(())
}

fn main() {
    logging::init(LOG_TARGETS);

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("because: {}", cause);
        }
        std::process::exit(1);
    }
}


// End of File

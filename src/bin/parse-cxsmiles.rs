use clap::Parser;
use lute_cxsmiles::prelude::*;
use std::io::stderr;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Stop at the first marker that doesn't start a known layer
    #[arg(short, long)]
    strict: bool,
    /// Input is just the suffix, not a whole `SMILES |layers| title` record
    #[arg(short, long)]
    layers_only: bool,
    /// Check atom indices against this many atoms
    #[arg(short, long)]
    atoms: Option<usize>,
    input: String,
}

fn init_tracing() {
    use tracing_subscriber::filter::*;
    use tracing_subscriber::prelude::*;
    let targets = match std::env::var("RUST_LOG") {
        Ok(var) => var.parse::<Targets>().unwrap_or_else(|e| {
            eprintln!("Ignoring `RUST_LOG={var:?}`: {e}");
            Targets::new().with_default(tracing::Level::ERROR)
        }),
        Err(e) => {
            if e != std::env::VarError::NotPresent {
                eprintln!("Ignoring `RUST_LOG`: {e}");
            }
            Targets::new().with_default(tracing::Level::ERROR)
        }
    };
    let fmt = tracing_subscriber::fmt::layer().with_writer(stderr);
    tracing_subscriber::registry()
        .with(targets)
        .with(fmt)
        .init();
}

fn report(outcome: &CxOutcome, atoms: Option<usize>) {
    println!("{:#?}", outcome.state);
    println!("layers: {:?}", &outcome.layers[..]);
    println!("written: {}", outcome.state);
    if let Some(err) = &outcome.error {
        tracing::error!("{err}");
    }
    if let Some(n) = atoms {
        if let Err(err) = outcome.state.check_atom_count(n) {
            tracing::error!("{err}");
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    if cli.layers_only {
        let outcome = CxSmilesParser::new(&cli.input)
            .with_strict(cli.strict)
            .parse();
        report(&outcome, cli.atoms);
    } else {
        let record = Record::parse_with(&cli.input, cli.strict);
        println!("smiles: {}", record.smiles);
        if !record.title.is_empty() {
            println!("title: {}", record.title);
        }
        match &record.cx {
            Some(outcome) => report(outcome, cli.atoms),
            None => println!("no CXSMILES layers"),
        }
    }
}

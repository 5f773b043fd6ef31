use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use mosdex_core::InMemoryModel;
use mosdex_format::WriterConfig;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert a model file to a MOSDEX interchange document"
)]
struct Cli {
    /// Model file with its symbol dictionary
    model: PathBuf,

    /// Indentation width of the written JSON
    #[arg(long)]
    indent: Option<usize>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    mosdex_cli::logging::init()?;

    let text = mosdex_cli::read_input(&cli.model)?;
    let model = InMemoryModel::from_json(&text)?;
    let mut config = WriterConfig::new();
    if let Some(width) = cli.indent {
        config = config.with_indent(width);
    }
    let document = mosdex_format::convert(&model, &config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use mosdex_gams::GamsConfig;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Regenerate GAMS source from a MOSDEX interchange document"
)]
struct Cli {
    /// MOSDEX document to read
    document: PathBuf,

    /// Leave out the Model and Solve statements
    #[arg(long)]
    no_solve: bool,
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

    let text = mosdex_cli::read_input(&cli.document)?;
    let document = mosdex_format::parse_document(&text)?;
    let config = GamsConfig::new().with_solve_statement(!cli.no_solve);
    let source = mosdex_gams::emit(&document, &config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(source.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

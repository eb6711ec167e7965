use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rich_text_html::{html_to_rich_text, rich_text_to_html, CellText};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "richtext", author, version, about = "Convert between editor HTML and spreadsheet rich text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// HTML fragment -> rich text runs as JSON.
    ToRuns {
        /// Input HTML file (fragment or full document). Reads stdin when omitted.
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Output JSON path (default: stdout).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },

    /// Rich text JSON (a string or an array of runs) -> HTML.
    ToHtml {
        /// Input JSON file. Reads stdin when omitted.
        #[arg(long)]
        json_file: Option<PathBuf>,

        /// Output HTML path (default: stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// HTML -> rich text -> HTML, to preview what a cell will hold.
    RoundTrip {
        /// Input HTML file. Reads stdin when omitted.
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Output HTML path (default: stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut buf = String::new();
    match path {
        Some(p) => {
            File::open(p)
                .with_context(|| format!("open {}", p.display()))?
                .read_to_string(&mut buf)
                .with_context(|| format!("read {}", p.display()))?;
        }
        None => {
            io::stdin().read_to_string(&mut buf).context("read stdin")?;
        }
    }
    Ok(buf)
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(p) => {
            let mut f = File::create(p).with_context(|| format!("create {}", p.display()))?;
            f.write_all(contents.as_bytes())
                .with_context(|| format!("write {}", p.display()))?;
            info!(path = %p.display(), bytes = contents.len(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn to_runs(html_file: Option<&Path>, out: Option<&Path>, pretty: bool) -> Result<()> {
    let html = read_input(html_file)?;
    let cell = html_to_rich_text(&html);
    write_output(out, &cell.to_json(pretty)?)
}

fn to_html(json_file: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let json = read_input(json_file)?;
    if json.trim().is_empty() {
        return Err(anyhow!("empty json"));
    }
    let cell = CellText::from_json(&json).context("decode rich text json")?;
    write_output(out, &rich_text_to_html(&cell))
}

fn round_trip(html_file: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let html = read_input(html_file)?;
    let cell = html_to_rich_text(&html);
    write_output(out, &rich_text_to_html(&cell))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::ToRuns {
            html_file,
            out,
            pretty,
        } => to_runs(html_file.as_deref(), out.as_deref(), pretty),
        Command::ToHtml { json_file, out } => to_html(json_file.as_deref(), out.as_deref()),
        Command::RoundTrip { html_file, out } => round_trip(html_file.as_deref(), out.as_deref()),
    }
}

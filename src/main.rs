use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use atomwriter::atom::writer::{write_atom, DEFAULT_ENCODING};
use atomwriter::feed::{load_source, to_document};

#[derive(Parser, Debug)]
#[command(
    name = "atomwriter",
    about = "Convert RSS/Atom/RDF feeds into Atom 0.3 XML on stdout"
)]
struct Args {
    /// Feed sources: http(s) URLs or local file paths
    #[arg(required = true, value_name = "SOURCE")]
    sources: Vec<String>,

    /// Character encoding label for the XML output
    #[arg(long, default_value = DEFAULT_ENCODING)]
    encoding: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let client = reqwest::Client::new();
    let stdout = std::io::stdout();

    for source in &args.sources {
        let bytes = load_source(&client, source)
            .await
            .with_context(|| format!("Failed to load feed source '{}'", source))?;
        let feed = feed_rs::parser::parse(bytes.as_slice())
            .with_context(|| format!("Failed to parse feed from '{}'", source))?;
        let document = to_document(feed);

        let mut out = stdout.lock();
        write_atom(&document, &mut out, &args.encoding)
            .with_context(|| format!("Failed to write Atom output for '{}'", source))?;
        out.flush()?;
    }

    Ok(())
}

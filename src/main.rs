// Command-line shell: fetch one documentation page, write the generated PDF
// next to the working directory.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use docpress::{export_docs_to_pdf, DEFAULT_DOCS_URL};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DOCS_URL.to_string());

    println!("Generating PDF from {url} ...");
    let artifact = match export_docs_to_pdf(&url) {
        Ok(artifact) => artifact,
        Err(err) => {
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    };

    std::fs::write(&artifact.filename, &artifact.bytes)
        .with_context(|| format!("failed to write {}", artifact.filename))?;
    println!(
        "PDF generated successfully: {} ({} bytes)",
        artifact.filename,
        artifact.bytes.len()
    );
    Ok(())
}

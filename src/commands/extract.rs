//! Extract command - prints the text of a document.

use std::io::Write;

use anyhow::{Context, Result};
use docx_editor::ooxml::docx::{Package, extract_text};

use crate::cli::ExtractArgs;

pub fn run(args: ExtractArgs) -> Result<()> {
    let package = Package::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let text = extract_text(package.document())?;

    match &args.output {
        Some(path) => std::fs::write(path, &text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text).context("failed to write to stdout")?;
        },
    }

    tracing::info!(input = %args.input.display(), chars = text.chars().count(), "extracted text");
    Ok(())
}

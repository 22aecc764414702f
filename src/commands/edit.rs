//! Edit command - replaces whole paragraphs of a document on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docx_editor::ooxml::docx::{Package, ReplacementMap, apply_replacements, derive_text_map, extract_text};

use crate::cli::EditArgs;

/// `edited_<name>` next to the input.
fn default_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.docx".to_string());
    input.with_file_name(format!("edited_{}", name))
}

fn load_map(args: &EditArgs, package: &Package) -> Result<ReplacementMap> {
    if let Some(path) = &args.text_map {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return ReplacementMap::from_json(&json)
            .with_context(|| format!("{} is not a JSON object of strings", path.display()));
    }

    let path = args
        .edited
        .as_ref()
        .context("either --text-map or --edited is required")?;
    let edited = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let original = extract_text(package.document())?;
    Ok(derive_text_map(&original, &edited))
}

pub fn run(args: EditArgs) -> Result<()> {
    let mut package = Package::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let map = load_map(&args, &package)?;

    let report = apply_replacements(package.document_mut(), &map)?;

    let output = args.output.clone().unwrap_or_else(|| default_output(&args.input));
    package
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(
        input = %args.input.display(),
        output = %output.display(),
        entries = map.len(),
        visited = report.visited,
        replaced = report.replaced,
        "edited document"
    );
    println!(
        "Replaced {} of {} paragraphs; wrote {}",
        report.replaced,
        report.visited,
        output.display()
    );
    Ok(())
}

//! CLI argument definitions for the docx-editor binary.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

/// Whole-paragraph text replacement and text extraction for Word documents
#[derive(Parser, Debug)]
#[command(name = "docx-editor")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve(ServeArgs),
    /// Replace whole paragraphs of a document
    Edit(EditArgs),
    /// Print the text of a document
    Extract(ExtractArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "DOCX_EDITOR_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000, env = "DOCX_EDITOR_PORT")]
    pub port: u16,

    /// Origin allowed to call the service (repeatable; comma separated in the
    /// environment). Defaults to the editor front ends.
    #[arg(
        long = "allowed-origin",
        env = "DOCX_EDITOR_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,

    /// Largest accepted upload, in MiB
    #[arg(long, default_value_t = 25, env = "DOCX_EDITOR_MAX_UPLOAD_MB")]
    pub max_upload_mb: usize,
}

/// Arguments for the edit command
#[derive(clap::Args, Debug)]
#[command(group(
    ArgGroup::new("replacements")
        .required(true)
        .args(["text_map", "edited"])
))]
pub struct EditArgs {
    /// Document to edit
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON file mapping trimmed paragraph text to replacement text
    #[arg(short, long)]
    pub text_map: Option<PathBuf>,

    /// Edited copy of the extracted text; paragraphs are paired with the
    /// original by position
    #[arg(short, long)]
    pub edited: Option<PathBuf>,

    /// Where to write the result. Defaults to `edited_<input name>` next to
    /// the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the extract command
#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    /// Document to read
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the text here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_edit_requires_replacements() {
        assert!(Cli::try_parse_from(["docx-editor", "edit", "-i", "a.docx"]).is_err());
        assert!(
            Cli::try_parse_from([
                "docx-editor", "edit", "-i", "a.docx", "-t", "map.json", "-e", "edited.txt"
            ])
            .is_err()
        );

        let cli = Cli::try_parse_from(["docx-editor", "edit", "-i", "a.docx", "-t", "map.json"]).unwrap();
        match cli.command {
            Commands::Edit(args) => {
                assert_eq!(args.text_map, Some(PathBuf::from("map.json")));
                assert!(args.output.is_none());
            },
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_serve_origins() {
        let cli = Cli::try_parse_from([
            "docx-editor",
            "serve",
            "--port",
            "9000",
            "--allowed-origin",
            "http://a.test,http://b.test",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 9000);
                assert_eq!(args.allowed_origins, ["http://a.test", "http://b.test"]);
            },
            other => panic!("unexpected command {:?}", other),
        }
    }
}

//! docx2html - Word document to HTML converter

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use docx2html::{DocxParser, HeuristicProfile, ParserConfig, StyleSheet};

#[derive(Parser)]
#[command(name = "docx2html")]
#[command(version, about = "Convert Word documents to HTML fragments", long_about = None)]
#[command(after_help = "EXAMPLES:
    docx2html report.docx                   Write report.html next to the input
    docx2html report.docx -o out.html       Choose the output file
    docx2html *.docx --images-dir assets    Batch convert, images under assets/
    docx2html report.docx --settings s.json Styles and exclusions from a file")]
struct Cli {
    /// Input files (.docx)
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (single input only; default: input with .html extension)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Directory for extracted images
    #[arg(long, default_value = "images")]
    images_dir: PathBuf,

    /// Literal strings to suppress (repeatable)
    #[arg(long = "exclude", value_name = "TEXT")]
    exclude: Vec<String>,

    /// JSON settings file (styles, exclusions, heuristics)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Emit bare tags without style attributes
    #[arg(long)]
    unstyled: bool,

    /// Suppress progress messages
    #[arg(short, long)]
    quiet: bool,
}

/// Shape of the optional JSON settings file.
#[derive(Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FileSettings {
    images_dir: Option<PathBuf>,
    exclude: Vec<String>,
    styles: Option<BTreeMap<String, BTreeMap<String, String>>>,
    profile: Option<HeuristicProfile>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.output.is_some() && cli.inputs.len() > 1 {
        eprintln!("error: --output requires exactly one input file");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool, String> {
    let settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => FileSettings::default(),
    };

    let mut config = ParserConfig {
        images_dir: settings.images_dir.unwrap_or_else(|| cli.images_dir.clone()),
        exclude: settings.exclude,
        profile: settings.profile.unwrap_or_default(),
    };
    config.exclude.extend(cli.exclude.iter().cloned());
    if cli.unstyled {
        config.profile.styled = false;
    }
    let styles = settings
        .styles
        .map(StyleSheet::from)
        .unwrap_or_default();

    let mut parser = DocxParser::new(config, styles).map_err(|e| e.to_string())?;

    let mut clean = true;
    for input in &cli.inputs {
        let html = parser.parse_file(input);
        for error in parser.take_errors() {
            eprintln!("{}: {error}", input.display());
            clean = false;
        }

        let output = match &cli.output {
            Some(path) => path.clone(),
            None => input.with_extension("html"),
        };
        std::fs::write(&output, &html)
            .map_err(|e| format!("couldn't write {}: {e}", output.display()))?;
        if !cli.quiet {
            println!("{} -> {}", input.display(), output.display());
        }
    }
    Ok(clean)
}

fn load_settings(path: &Path) -> Result<FileSettings, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("couldn't read settings {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("invalid settings {}: {e}", path.display()))
}

//! Export a plain-text lesson plan to PDF
//!
//! Usage:
//!   cargo run --bin lesson_pdf -- --title "Fractions" --input plan.txt
//!   cat plan.txt | cargo run --bin lesson_pdf -- --title "Fractions" --variant worksheet
//!   cargo run --bin lesson_pdf -- --title "Fractions" --input plan.txt --output out.pdf -v
//!
//! Set `RUST_LOG=debug` to see per-stage diagnostics.

use lesson_pdf::api::{ExportRequest, ExportVariant, PdfExport};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

struct CliConfig {
    title: Option<String>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    variant: ExportVariant,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, Box<dyn std::error::Error>> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            title: None,
            input: None,
            output: None,
            variant: ExportVariant::default(),
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--title" | "-t" => {
                    i += 1;
                    config.title = args.get(i).cloned();
                },
                "--input" | "-i" => {
                    i += 1;
                    config.input = args.get(i).filter(|p| p.as_str() != "-").map(PathBuf::from);
                },
                "--output" | "-o" => {
                    i += 1;
                    config.output = args.get(i).map(PathBuf::from);
                },
                "--variant" => {
                    i += 1;
                    if let Some(v) = args.get(i) {
                        config.variant = v.parse()?;
                    }
                },
                "--verbose" | "-v" => {
                    config.verbose = true;
                },
                other => {
                    return Err(format!("unknown argument '{}'", other).into());
                },
            }
            i += 1;
        }

        Ok(config)
    }

    fn read_body(&self) -> std::io::Result<String> {
        match &self.input {
            Some(path) => fs::read_to_string(path),
            None => {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                Ok(body)
            },
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_args()?;
    let body = config.read_body()?;

    let request = ExportRequest {
        title: config.title.clone(),
        body: Some(body),
        variant: config.variant,
    };
    let response = PdfExport::new().export(&request)?;

    let output = config
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&response.filename));
    response.save(&output)?;

    if config.verbose {
        println!("  ✅ Exported to: {}", output.display());
        println!(
            "  📊 Size: {} bytes ({:.2} KB)",
            response.bytes.len(),
            response.bytes.len() as f64 / 1024.0
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docx_extract::document::OCTET_STREAM_MIME_TYPE;
use docx_extract::{
    DocumentPayload, Extractor, ExtractorConfig, MessageStream, OutputFormat, ToolMessage,
    WORD_MIME_TYPE,
};

#[derive(Parser, Debug)]
#[command(
    name = "docx-extract",
    version,
    about = "Extract text and embedded images from .docx files"
)]
struct Cli {
    /// Path to the .docx file
    input: PathBuf,

    /// Declared media type of the input (inferred from the extension when omitted)
    #[arg(long)]
    mime_type: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Directory to write extracted images into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries the extraction output
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = ExtractorConfig::load(cli.config.as_deref())?;

    let data = fs::read(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let media_type = cli
        .mime_type
        .clone()
        .unwrap_or_else(|| declared_media_type(&cli.input).to_string());

    let mut payload = DocumentPayload::new(data, media_type);
    if let Some(name) = cli.input.file_name().and_then(|name| name.to_str()) {
        payload = payload.with_file_name(name);
    }

    if let Some(dir) = &cli.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let extractor = Extractor::new(config);
    let mut out = io::stdout().lock();
    let mut failed = false;

    for message in MessageStream::new(&extractor, payload) {
        if let (Some(dir), ToolMessage::Blob { file_name, data, .. }) =
            (&cli.output_dir, &message)
        {
            let target = dir.join(file_name);
            fs::write(&target, data)
                .with_context(|| format!("Failed to write {}", target.display()))?;
        }

        match cli.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, &message)?;
                writeln!(out)?;
            }
            OutputFormat::Text => match &message {
                ToolMessage::Blob {
                    media_type,
                    file_name,
                    data,
                } => writeln!(out, "[image] {file_name} ({media_type}, {} bytes)", data.len())?,
                ToolMessage::Text { data } => writeln!(out, "{data}")?,
                ToolMessage::Error { message } => eprintln!("Error: {message}"),
            },
        }

        failed |= message.is_error();
    }

    out.flush()?;
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Media type the host declares for a file it was handed
fn declared_media_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("docx") => WORD_MIME_TYPE,
        _ => OCTET_STREAM_MIME_TYPE,
    }
}

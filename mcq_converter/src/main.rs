use anyhow::{Context, Result};
use clap::Parser;
use mcq_converter::{convert, save_questions};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Convert a plain-text question bank to the quiz system's JSON import format")]
struct Args {
    /// Path to the question-bank text file
    input: PathBuf,
    /// Question bank id to stamp on every record
    #[arg(long)]
    qb_id: Option<String>,
    /// Author recorded on every record
    #[arg(long)]
    created_by: String,
    /// Output JSON path
    #[arg(long, default_value = "questions.json")]
    out: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    common::logger::init_logger(&args.log_level, "logs/mcq_converter.log", true);

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let questions = convert(&source, args.qb_id.as_deref(), &args.created_by);
    save_questions(&args.out, &questions)
        .with_context(|| format!("writing {}", args.out.display()))?;

    Ok(())
}

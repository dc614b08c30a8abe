use analyzer::insight::Insight;
use analyzer::insight::azure::AzureInsight;
use analyzer::insight::offline::OfflineInsight;
use anyhow::Result;
use clap::Parser;
use extractor::{FOCUS_PROMPTS, render_sections, run};
use util::config::AppConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Fetch coding submissions for a test attempt and produce an analysis report")]
struct Args {
    /// The result URL from the admin panel (must carry a testId= parameter)
    url: String,
    /// Authorization token for the assessment API
    #[arg(long, env = "EXAMLY_AUTH_TOKEN", hide_env_values = true)]
    token: String,
    /// Analysis focus: 1-5 selects a canned prompt, anything else is used verbatim
    #[arg(long, default_value = "1")]
    focus: String,
    /// Override the report output path from the configuration
    #[arg(long)]
    out: Option<String>,
    /// Skip the AI narrative and use the deterministic offline summary
    #[arg(long)]
    no_ai: bool,
    /// Print the four report sections to stdout after the run
    #[arg(long)]
    print_sections: bool,
}

/// "1".."5" select a canned focus prompt; anything else is a custom focus.
fn resolve_focus(focus: &str) -> &str {
    focus
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| FOCUS_PROMPTS.get(i))
        .copied()
        .unwrap_or(focus)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    {
        let cfg = AppConfig::global();
        common::logger::init_logger(&cfg.log_level, &cfg.log_file, cfg.log_to_stdout);
    }
    if let Some(out) = &args.out {
        AppConfig::set_report_output_path(out.clone());
    }

    let insight: Box<dyn Insight + Send + Sync> = if args.no_ai {
        Box::new(OfflineInsight)
    } else {
        Box::new(AzureInsight)
    };

    let focus = resolve_focus(&args.focus);
    let (submissions, document) = run(&args.url, &args.token, focus, &*insight).await?;

    log::info!(
        "analyzed {} submission(s), report at {}",
        submissions.len(),
        AppConfig::global().report_output_path
    );

    if args.print_sections {
        println!("{}", render_sections(&document));
    }

    Ok(())
}

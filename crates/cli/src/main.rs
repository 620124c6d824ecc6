use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use termimad::MadSkin;
use termimad::crossterm::style::Color;
use tracing_subscriber::EnvFilter;
use viraltube_core::{
    AnalysisSession, AnalysisState, ContentNiche, CopyFeedback, CopyTarget, ResultView, SystemClipboard,
    VideoMetadata, ViralTube, config::Config, init,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Video concept or script to analyze
    prompt: Vec<String>,

    /// Content niche (tech-review, gaming, tutorial, app-showcase, news)
    #[arg(short, long, default_value = "tech-review")]
    niche: ContentNiche,

    /// Screenshot or clip to send along with the prompt
    #[arg(short, long)]
    attach: Option<PathBuf>,

    /// Override the model defined in .env
    #[arg(short, long)]
    model: Option<String>,

    /// Copy a field to the clipboard: title:N, hashtag:N or description
    #[arg(short, long)]
    copy: Option<CopyTarget>,

    /// Print the raw metadata as JSON instead of the formatted panel
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Open the desktop analyzer window
    #[arg(long)]
    gui: bool,

    /// List available niches and exit
    #[arg(long)]
    list_niches: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    init();
    init_tracing();
    let args = Args::parse();

    // Handle --list-niches
    if args.list_niches {
        println!("Available niches:");
        for niche in ContentNiche::ALL {
            println!("  {:<14} {}", niche.key(), niche.label());
        }
        return Ok(());
    }

    // Load config and override model if specified via CLI
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(m) = args.model {
        config.model_name = m;
    }

    let app = ViralTube::with_config(config).context("Failed to create Gemini client")?;

    if args.gui {
        return app.run_interactive().context("Failed to run the analyzer window");
    }

    let mut session = AnalysisSession::new();
    session.niche = args.niche;
    session.prompt = args.prompt.join(" ");

    // If prompt was empty, ask now
    if session.prompt.trim().is_empty() {
        print!("Describe your video: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        session.prompt = input.trim().to_string();
    }

    if let Some(path) = args.attach {
        if !session.select_attachment(&path) {
            eprintln!(
                "Warning: {} does not look like an image or video, sending it anyway",
                path.display()
            );
        }
    }

    let Some(submission) = session.submit() else {
        bail!("{}", session.state().error().unwrap_or_default());
    };

    // Send to API
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(format!("Analyzing insights with {}...", app.config().model_name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = app
        .analyze(
            &submission.prompt,
            submission.niche,
            submission.attachment_path.as_deref(),
        )
        .await;

    spinner.finish_and_clear();
    session.complete(submission.ticket, outcome);

    match session.state() {
        AnalysisState::Success(metadata) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(metadata)?);
            } else {
                print_markdown(&ResultView::from_metadata(metadata).to_markdown());
            }

            if let Some(target) = args.copy {
                copy_field(metadata, target);
            }
            Ok(())
        }
        AnalysisState::Failure(message) => bail!("{}", message),
        AnalysisState::Idle | AnalysisState::Analyzing => bail!("analysis did not complete"),
    }
}

/// Logs go to stderr so `--json` output stays clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

/// Copies one field of the result, reporting the outcome on the terminal.
fn copy_field(metadata: &VideoMetadata, target: CopyTarget) {
    let Some(text) = target.text_in(metadata) else {
        eprintln!("Warning: {} does not exist in this result", target);
        return;
    };

    match SystemClipboard::new() {
        Ok(mut clipboard) => {
            let mut feedback = CopyFeedback::default();
            match feedback.copy(&mut clipboard, target, text, Instant::now()) {
                Ok(()) => println!("(Copied {} to clipboard)", target),
                Err(e) => eprintln!("Warning: {}", e),
            }
        }
        Err(e) => eprintln!("Warning: {}", e),
    }
}

/// Helper to print markdown
fn print_markdown(text: &str) {
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Green);
    skin.italic.set_fg(Color::DarkGreen);
    skin.inline_code.set_fg(Color::Magenta);
    for header in skin.headers.iter_mut() {
        header.set_fg(Color::Red);
    }

    skin.print_text(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn niche_defaults_to_tech_review() {
        let args = Args::parse_from(["viraltube", "Pixel", "9", "camera", "review"]);
        assert_eq!(args.niche, ContentNiche::TechReview);
        assert_eq!(args.prompt.join(" "), "Pixel 9 camera review");
        assert!(args.attach.is_none());
    }

    #[test]
    fn parses_niche_attachment_and_copy_target() {
        let args = Args::parse_from([
            "viraltube",
            "--niche",
            "app-showcase",
            "--attach",
            "frame.png",
            "--copy",
            "hashtag:2",
            "Launcher",
            "tour",
        ]);
        assert_eq!(args.niche, ContentNiche::AppShowcase);
        assert_eq!(args.attach, Some(PathBuf::from("frame.png")));
        assert_eq!(args.copy, Some(CopyTarget::Hashtag(1)));
        assert_eq!(args.prompt, vec!["Launcher", "tour"]);
    }

    #[test]
    fn options_after_prompt_words_are_parsed() {
        let args = Args::parse_from(["viraltube", "Pixel", "9", "--niche", "gaming", "--json"]);
        assert_eq!(args.niche, ContentNiche::Gaming);
        assert!(args.json);
        assert_eq!(args.prompt, vec!["Pixel", "9"]);
    }

    #[test]
    fn rejects_unknown_niche() {
        assert!(Args::try_parse_from(["viraltube", "--niche", "cooking", "x"]).is_err());
    }
}

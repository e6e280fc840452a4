use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::style::Stylize;
use crossterm::terminal;
use snapquiz::app::{AppState, QuizApp};
use snapquiz::clients::gemini::{GeminiClient, GeminiConfig};
use snapquiz::images::{acquire_from_file, acquire_from_url, MAX_IMAGES};
use snapquiz::quiz::{OptionOutcome, QuizSession};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "🧠 Turn up to three images into a quiz question", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    GEMINI_API_KEY     API key for the Gemini endpoint (.env files are honored)
    RUST_LOG           Tracing filter, e.g. snapquiz=debug

EXAMPLES:
    snapquiz worksheet.png                        # One local image
    snapquiz page1.jpg page2.jpg diagram.png      # Up to three local images
    snapquiz --url https://drive.google.com/file/d/FILE_ID/view
    snapquiz notes.png --model gemini-2.5-flash")]
struct Args {
    /// Image files to include (up to three inputs total)
    #[arg(value_name = "IMAGE")]
    files: Vec<PathBuf>,

    /// Fetch an image from a URL instead of a local file (repeatable)
    #[arg(short, long)]
    url: Vec<String>,

    /// Gemini model id to use
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args = Args::parse();

    let mut config = GeminiConfig::default();
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    let mut app = QuizApp::new(GeminiClient::new(config));

    let http = reqwest::Client::new();
    for path in &args.files {
        if app.images().is_full() {
            eprintln!("⚠️  Only {MAX_IMAGES} images are used per question, skipping the rest");
            break;
        }
        match acquire_from_file(path).await {
            Ok(image) => {
                app.add_image(image);
            }
            Err(e) => eprintln!("⚠️  Skipping {}: {e}", path.display()),
        }
    }
    for url in &args.url {
        if app.images().is_full() {
            eprintln!("⚠️  Only {MAX_IMAGES} images are used per question, skipping the rest");
            break;
        }
        match acquire_from_url(&http, url).await {
            Ok(image) => {
                app.add_image(image);
            }
            Err(e) => eprintln!(
                "⚠️  Could not fetch {url}: {e}\n    Download the image and pass it as a file instead."
            ),
        }
    }

    if app.images().is_empty() {
        eprintln!("No images to work with. Pass up to {MAX_IMAGES} image files or --url links.");
        std::process::exit(1);
    }

    println!(
        "🧠 Generating a question from {} image(s), hang tight...",
        app.images().len()
    );
    app.generate().await;

    loop {
        match app.state().clone() {
            AppState::Success(record) => {
                run_quiz_round(QuizSession::new(record))?;
                app.reset();
                println!();
                println!("👋 Run snapquiz again with new images for another round.");
                break;
            }
            AppState::Error(message) => {
                println!();
                println!("{}", format!("❌ {message}").red());
                if prompt_retry()? {
                    println!("🔁 Retrying...");
                    app.retry().await;
                } else {
                    break;
                }
            }
            AppState::Idle | AppState::Loading => break,
        }
    }

    Ok(())
}

/// Show the question, take a single keypress, reveal the outcome.
fn run_quiz_round(mut session: QuizSession) -> Result<()> {
    println!();
    println!("{}", session.record().question_text.clone().bold());
    println!();
    for (idx, option) in session.record().options.iter().enumerate() {
        println!("  {}. {option}", idx + 1);
    }
    println!();
    println!("Press 1-4 to answer (Esc quits).");

    let picked = read_option_key()?;
    session.select(picked);

    println!();
    for (idx, option) in session.record().options.iter().enumerate() {
        let line = format!("  {}. {option}", idx + 1);
        match session.outcome(idx) {
            OptionOutcome::Correct => println!("{}", line.green().bold()),
            OptionOutcome::WrongPick => println!("{}", line.red().bold()),
            OptionOutcome::Dimmed => println!("{}", line.dim()),
            OptionOutcome::Pending => println!("{line}"),
        }
    }

    if let Some(correct) = session.answered_correctly() {
        println!();
        if correct {
            println!("{}", "✅ Correct!".green().bold());
        } else {
            println!("{}", "❌ Not quite.".red().bold());
        }
    }

    if let Some(explanation) = session.explanation() {
        println!();
        println!("{} {explanation}", "Explanation:".bold());
    }

    Ok(())
}

/// Block until the user presses 1-4, returning the zero-based option index.
fn read_option_key() -> Result<usize> {
    terminal::enable_raw_mode()?;
    let picked = loop {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char(c @ '1'..='4') => break (c as usize) - ('1' as usize),
                KeyCode::Esc => {
                    terminal::disable_raw_mode()?;
                    std::process::exit(0);
                }
                _ => {}
            }
        }
    };
    terminal::disable_raw_mode()?;
    Ok(picked)
}

fn prompt_retry() -> Result<bool> {
    println!("Press r to retry or q to quit.");
    terminal::enable_raw_mode()?;
    let retry = loop {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('r' | 'R') => break true,
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => break false,
                _ => {}
            }
        }
    };
    terminal::disable_raw_mode()?;
    Ok(retry)
}

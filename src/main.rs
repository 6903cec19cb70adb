use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hr_assistant::{
    app::App,
    constants::{self, DEFAULT_ENDPOINT, ENDPOINT_ENV},
    events::{handle_key_event, handle_paste},
    ui::draw_ui,
    AnswerClient, QuestionForm,
};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// URL the question is POSTed to.
    #[arg(long, global = true, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Open the interactive question form.
    Form,
    /// Ask a single question and print the answer.
    Ask {
        #[arg(help = "The question to send.")]
        question: String,
    },
    /// Check that the answering service is up.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (HR_ASSISTANT_URL, HR_ASSISTANT_LOG_DIR)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = AnswerClient::new(&cli.endpoint)?;

    match cli.command {
        Commands::Form => {
            // The terminal is busy drawing the form, so log to a file.
            let file_appender =
                tracing_appender::rolling::never(constants::LOG_DIR.as_str(), constants::LOG_FILE_NAME);
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("hr_assistant=debug")),
                )
                .init();

            info!(endpoint = %client.endpoint(), "Starting question form");
            run_form(client).await.context("Question form failed")?;
            info!("Question form closed");
        }
        Commands::Ask { question } => {
            init_stderr_logging();
            let mut form = QuestionForm::new();
            form.set_question(question);
            let Some(question) = form.begin_submit() else {
                info!("Empty question, nothing sent");
                return Ok(());
            };
            let outcome = client.ask(&question).await;
            let failed = outcome.is_err();
            form.settle(outcome);

            if let Some(answer) = form.answer_panel() {
                println!("{}", answer);
            }
            if failed {
                bail!("No answer from {}", client.endpoint());
            }
        }
        Commands::Check => {
            init_stderr_logging();
            match client.health().await {
                Ok(greeting) => println!("{}", greeting),
                Err(e) => {
                    error!(error = %e, "Health check failed");
                    bail!("Answering service at {} is not reachable", client.endpoint());
                }
            }
        }
    }

    Ok(())
}

// Reads the log level from RUST_LOG (e.g. RUST_LOG=hr_assistant=debug)
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

async fn run_form(client: AnswerClient) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.process_outcomes();

        terminal.draw(|f| draw_ui(f, &app.form))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(app, key) {
                        return Ok(());
                    }
                }
                Event::Paste(data) => handle_paste(app, &data),
                _ => {}
            }
        }
    }
}

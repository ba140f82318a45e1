//! IntelliSQL - query a SQLite database using plain English.

use intellisql::app::{Answer, Orchestrator};
use intellisql::cli::Cli;
use intellisql::config::{Config, Settings};
use intellisql::db::seed_demo;
use intellisql::error::Result;
use intellisql::llm::factory::API_KEY_ENV;
use intellisql::logging;
use intellisql::tui;
use intellisql::tui::widgets::table::ResultTable;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    // One-shot and seeding output goes to the terminal, so logs go to stderr
    let logs_to_stderr = cli.is_one_shot() || cli.seed_demo;
    if logs_to_stderr {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    if let Err(e) = run(cli).await {
        // The stderr message below already reaches the terminal
        if !logs_to_stderr {
            error!("{}: {}", e.category(), e);
        }
        eprintln!("{}: {}", e.category(), e);
        eprintln!("{}", e.hint());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let settings = cli.resolve_settings(&config)?;

    if cli.seed_demo {
        seed(&settings).await?;
        if !cli.is_one_shot() {
            return Ok(());
        }
    }

    let api_key = std::env::var(API_KEY_ENV).ok();
    let orchestrator = Orchestrator::from_settings(&settings, api_key)?;

    info!(
        database = %orchestrator.database_location(),
        llm = %orchestrator.llm_description(),
        policy = %orchestrator.policy(),
        "Ready"
    );

    match cli.question.as_deref() {
        Some(question) => {
            // The SQL is shown even when running it fails
            let sql = orchestrator.translate(question).await?;
            print_sql(&sql);
            let answer = orchestrator.execute(&sql).await?;
            print_result(&answer);
            Ok(())
        }
        None => tui::run(&orchestrator).await,
    }
}

async fn seed(settings: &Settings) -> Result<()> {
    let path = &settings.database_path;
    let inserted = seed_demo(path).await?;
    if inserted == 0 {
        println!(
            "Students table in {} already has rows; nothing inserted.",
            path.display()
        );
    } else {
        println!("Inserted {} rows into {}.", inserted, path.display());
    }
    Ok(())
}

fn print_sql(sql: &str) {
    println!("Generated SQL:");
    println!("{}", sql);
}

fn print_result(answer: &Answer) {
    if let Some(warning) = &answer.classification.warning {
        println!("{}", warning);
    }
    println!();
    println!("Query Result:");
    println!("{}", ResultTable::new(&answer.result).to_plain_text());
}


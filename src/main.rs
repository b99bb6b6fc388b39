/*!
# Confide - A Conversational Journaling Companion

This file contains the main application flow: logging setup, configuration,
database and HTTP client construction, and dispatch to the requested
operation.

## Usage

```
confide [OPTIONS] [COMMAND]

Commands:
  chat     Start an interactive journaling session (the default)
  history  Show past entries, most recent first
  search   Search entries by date or content (case-sensitive)
  show     Show the entry for a specific date
  stats    Show journaling statistics
  weekly   Generate the weekly wrap for the past 7 days
  mood     Set today's mood color
  delete   Delete an entry by id

Options:
      --db <DB>    Path to the journal database (overrides CONFIDE_DB)
  -v, --verbose    Print verbose output
```

## Configuration

- `GROQ_API_KEY`: API key for the chat-completions endpoint (required)
- `CONFIDE_DB`: Path to the journal database (defaults to ~/.confide/journal.db)
- `HF_API_TOKEN`: Token for the hosted inference API (optional)
*/

use clap::Parser;
use confide::ai::{ChatClient, InferenceClient};
use confide::cli::{parse_date, CliArgs, Command};
use confide::config::Config;
use confide::errors::{AppError, AppResult};
use confide::db::Database;
use confide::ops::{self, mood, render};
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting confide");
    debug!("CLI arguments: {:?}", args);

    let mut config = Config::load()?;
    config.validate()?;
    if let Some(db_path) = args.db {
        config.db_path = db_path;
    }
    debug!("Configuration: {:?}", config);

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;

    let analyzer = InferenceClient::new(
        &config.inference_url,
        config.inference_api_token.clone(),
        &config.sentiment_model,
        &config.theme_model,
    );
    let chat = ChatClient::new(&config.chat_url, &config.chat_api_key);

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => ops::start_chat(&db, &analyzer, &chat, &config.chat_model),
        Command::History { limit } => {
            let entries = db.list_entries(limit)?;
            println!("{}", render::render_history(&entries));
            Ok(())
        }
        Command::Search { term } => {
            let entries = db.search(&term)?;
            println!("{}", render::render_search_results(&term, &entries));
            Ok(())
        }
        Command::Show { date } => {
            let date = parse_date(&date)
                .map_err(|e| AppError::Journal(format!("Invalid date format: {}", e)))?;
            match db.entry_by_date(date)? {
                Some(entry) => println!("{}", render::render_entry(&entry)),
                None => println!("No entry for {}", date),
            }
            Ok(())
        }
        Command::Stats => {
            let stats = db.stats()?;
            println!("{}", render::render_stats_bar(&stats));
            println!();
            println!("{}", render::render_stats_sidebar(&stats));
            Ok(())
        }
        Command::Weekly => {
            let wrap = ops::weekly_wrap(&db, &chat, &config.chat_model)?;
            println!("{}", wrap);
            Ok(())
        }
        Command::Mood { name } => {
            let status = mood::set_today_mood(&db, &name)?;
            println!("{}", status);
            Ok(())
        }
        Command::Delete { id } => {
            db.delete_entry(id)?;
            println!("Deleted entry #{}", id);
            Ok(())
        }
    }
}

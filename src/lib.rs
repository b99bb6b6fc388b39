/*!
# Confide

Confide is a conversational journaling companion for the command line. The
user writes free-text entries in an interactive chat; each message is
analyzed for sentiment and topical themes by hosted classification models,
answered with one empathetic follow-up question by a hosted chat model, and
aggregated into a single stored record per calendar day.

## Core Features

- Interactive journaling chat with per-message sentiment and theme analysis
- One aggregated entry per day, with the day's full conversation preserved
- History browsing and case-sensitive search over dates and content
- A daily mood color picked from a fixed six-color palette
- A weekly wrap summarizing gratitude and learnings from the past 7 days
- Optional whole-file mirroring of the journal database to a remote drive

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `constants`: Fixed vocabularies, thresholds and defaults
- `ai`: Hosted model clients, prompts and the analyzer/chat traits
- `db`: SQLite journal store with the after-write sync hook
- `sync`: Drive-style remote mirroring of the database file
- `ops`: User-facing operations composing the layers above

## Usage Example

```rust,no_run
use confide::{Config, Database};
use confide::ai::{ChatClient, InferenceClient};
use confide::ops;

fn main() -> confide::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;

    let analyzer = InferenceClient::new(
        &config.inference_url,
        config.inference_api_token.clone(),
        &config.sentiment_model,
        &config.theme_model,
    );
    let chat = ChatClient::new(&config.chat_url, &config.chat_api_key);

    ops::start_chat(&db, &analyzer, &chat, &config.chat_model)
}
```
*/

/// Hosted model integrations: analysis, chat completions, prompts
pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Constants used throughout the application
pub mod constants;
/// SQLite journal store
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// High-level journal operations
pub mod ops;
/// Remote mirroring of the journal database
pub mod sync;

// Re-export important types for convenience
pub use ai::{Analysis, ChatModel, EntryAnalyzer};
pub use cli::CliArgs;
pub use config::Config;
pub use db::Database;
pub use errors::{AppError, AppResult};

//! Interactive journaling session on stdin/stdout.

use crate::ai::{ChatModel, EntryAnalyzer};
use crate::db::Database;
use crate::errors::AppResult;
use crate::ops::{mood, turn};
use std::io::{self, Write};
use tracing::info;

/// Starts the interactive journaling loop.
///
/// # Flow
///
/// 1. Print a welcome banner with today's mood status
/// 2. Read journal input in a loop
/// 3. For each message: analyze, reply, persist, print the reply with the
///    analysis summary and refreshed stats
/// 4. Exit on "quit", "exit", or empty input
///
/// A failed turn (analyzer or database error) is reported and the loop
/// continues; nothing from that turn is stored.
pub fn start_chat(
    db: &Database,
    analyzer: &dyn EntryAnalyzer,
    chat: &dyn ChatModel,
    chat_model: &str,
) -> AppResult<()> {
    info!("Starting interactive journaling session");

    println!("\nConfide - your journaling companion");
    println!("----------------------------------------");
    println!("Write about your day, thoughts, or feelings.");
    println!("Iris will listen, analyze, and respond with care.");
    println!();
    println!("  - Type an entry and press Enter");
    println!("  - 'quit' or 'exit' (or empty input) to leave");
    println!("----------------------------------------");
    println!("{}\n", mood::mood_status(db)?);

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty()
            || input.eq_ignore_ascii_case("quit")
            || input.eq_ignore_ascii_case("exit")
        {
            println!("\nTake care. See you tomorrow.");
            break;
        }

        match turn::journal_turn(db, analyzer, chat, chat_model, input) {
            Ok(Some(outcome)) => {
                println!("\nIris: {}\n", outcome.reply);
                println!("{}", outcome.analysis_view);
                println!("{}\n", outcome.stats_bar);
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("\nCouldn't process that entry: {}", e);
                eprintln!("Nothing was saved. Please try again.\n");
            }
        }
    }

    Ok(())
}

use crate::constants::{APP_DESCRIPTION, APP_NAME, DEFAULT_HISTORY_LIMIT};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// A conversational journaling companion
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Path to the journal database (overrides CONFIDE_DB)
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive journaling session (the default)
    Chat,

    /// Show past entries, most recent first
    History {
        /// Maximum number of days to show
        #[clap(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },

    /// Search entries by date or content (case-sensitive)
    Search {
        /// Substring to look for
        term: String,
    },

    /// Show the entry for a specific date (YYYY-MM-DD or YYYYMMDD)
    Show { date: String },

    /// Show journaling statistics
    Stats,

    /// Generate the weekly wrap for the past 7 days
    Weekly,

    /// Set today's mood color (calm, happy, energetic, anxious, sad, angry)
    Mood { name: String },

    /// Delete an entry by id
    Delete { id: i64 },
}

impl CliArgs {
    /// Parse command-line arguments.
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::from_str(date_str).or_else(|_| NaiveDate::parse_from_str(date_str, "%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_default_is_no_subcommand() {
        let args = CliArgs::parse_from(vec!["confide"]);
        assert!(args.command.is_none());
        assert!(args.db.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_history_default_limit() {
        let args = CliArgs::parse_from(vec!["confide", "history"]);
        match args.command {
            Some(Command::History { limit }) => assert_eq!(limit, DEFAULT_HISTORY_LIMIT),
            other => panic!("expected history command, got {:?}", other),
        }
    }

    #[test]
    fn test_history_custom_limit() {
        let args = CliArgs::parse_from(vec!["confide", "history", "--limit", "7"]);
        match args.command {
            Some(Command::History { limit }) => assert_eq!(limit, 7),
            other => panic!("expected history command, got {:?}", other),
        }
    }

    #[test]
    fn test_search_term() {
        let args = CliArgs::parse_from(vec!["confide", "search", "hiking"]);
        match args.command {
            Some(Command::Search { term }) => assert_eq!(term, "hiking"),
            other => panic!("expected search command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_with_subcommand() {
        let args = CliArgs::parse_from(vec!["confide", "stats", "--verbose", "--db", "/tmp/j.db"]);
        assert!(args.verbose);
        assert_eq!(args.db, Some(PathBuf::from("/tmp/j.db")));
        assert!(matches!(args.command, Some(Command::Stats)));
    }

    #[test]
    fn test_mood_name() {
        let args = CliArgs::parse_from(vec!["confide", "mood", "happy"]);
        match args.command {
            Some(Command::Mood { name }) => assert_eq!(name, "happy"),
            other => panic!("expected mood command, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_id() {
        let args = CliArgs::parse_from(vec!["confide", "delete", "42"]);
        match args.command {
            Some(Command::Delete { id }) => assert_eq!(id, 42),
            other => panic!("expected delete command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let iso = parse_date("2023-01-15").unwrap();
        assert_eq!((iso.year(), iso.month(), iso.day()), (2023, 1, 15));

        let compact = parse_date("20230115").unwrap();
        assert_eq!(compact, iso);

        assert!(parse_date("not-a-date").is_err());
    }
}

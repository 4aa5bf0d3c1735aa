//! Command-line interface definition for chatsweep
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for scanning, inspecting, and deleting chats.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chatsweep - Chat store inventory and cleanup
///
/// List stored chats by serialized size, inspect their attachments,
/// and reclaim space by deleting whole chats or single attachments.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsweep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "chatsweep.yaml")]
    pub config: String,

    /// Path to the chat store database (overrides config)
    #[arg(long, env = "CHATSWEEP_STORE")]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for chatsweep
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List all chats ranked by size, largest first
    Scan {
        /// Emit the full report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one chat's summary and its attachments
    Show {
        /// Chat id
        id: String,

        /// Emit the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a whole chat record
    DeleteChat {
        /// Chat id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete a single attachment from a chat
    DeleteAttachment {
        /// Chat id
        id: String,

        /// Message index from `show`
        #[arg(short, long)]
        message: usize,

        /// Part index from `show`
        #[arg(short, long)]
        part: usize,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Import chat records from a JSON file into the store
    Import {
        /// Path to a JSON object mapping chat ids to records
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::try_parse_from(["chatsweep", "scan"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Scan { json } = cli.command {
            assert!(!json);
        } else {
            panic!("Expected Scan command");
        }
    }

    #[test]
    fn test_cli_parse_scan_json() {
        let cli = Cli::try_parse_from(["chatsweep", "scan", "--json"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Scan { json } = cli.command {
            assert!(json);
        } else {
            panic!("Expected Scan command");
        }
    }

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::try_parse_from(["chatsweep", "show", "chat-42"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Show { id, json } = cli.command {
            assert_eq!(id, "chat-42");
            assert!(!json);
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn test_cli_parse_delete_chat() {
        let cli = Cli::try_parse_from(["chatsweep", "delete-chat", "chat-42"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::DeleteChat { id, yes } = cli.command {
            assert_eq!(id, "chat-42");
            assert!(!yes);
        } else {
            panic!("Expected DeleteChat command");
        }
    }

    #[test]
    fn test_cli_parse_delete_chat_with_yes() {
        let cli = Cli::try_parse_from(["chatsweep", "delete-chat", "chat-42", "-y"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::DeleteChat { yes, .. } = cli.command {
            assert!(yes);
        } else {
            panic!("Expected DeleteChat command");
        }
    }

    #[test]
    fn test_cli_parse_delete_attachment() {
        let cli = Cli::try_parse_from([
            "chatsweep",
            "delete-attachment",
            "chat-42",
            "--message",
            "3",
            "--part",
            "1",
            "--yes",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::DeleteAttachment {
            id,
            message,
            part,
            yes,
        } = cli.command
        {
            assert_eq!(id, "chat-42");
            assert_eq!(message, 3);
            assert_eq!(part, 1);
            assert!(yes);
        } else {
            panic!("Expected DeleteAttachment command");
        }
    }

    #[test]
    fn test_cli_parse_delete_attachment_short_flags() {
        let cli = Cli::try_parse_from([
            "chatsweep",
            "delete-attachment",
            "chat-42",
            "-m",
            "0",
            "-p",
            "2",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::DeleteAttachment {
            message, part, yes, ..
        } = cli.command
        {
            assert_eq!(message, 0);
            assert_eq!(part, 2);
            assert!(!yes);
        } else {
            panic!("Expected DeleteAttachment command");
        }
    }

    #[test]
    fn test_cli_parse_delete_attachment_requires_indices() {
        let cli = Cli::try_parse_from(["chatsweep", "delete-attachment", "chat-42"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_import() {
        let cli = Cli::try_parse_from(["chatsweep", "import", "chats.json"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Import { file } = cli.command {
            assert_eq!(file, PathBuf::from("chats.json"));
        } else {
            panic!("Expected Import command");
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::try_parse_from(["chatsweep", "--config", "custom.yaml", "scan"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.config, "custom.yaml");
    }

    #[test]
    fn test_cli_parse_with_verbose() {
        let cli = Cli::try_parse_from(["chatsweep", "-v", "scan"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(cli.verbose);
    }

    #[test]
    #[serial]
    fn test_cli_parse_store_flag() {
        std::env::remove_var("CHATSWEEP_STORE");
        let cli = Cli::try_parse_from(["chatsweep", "--store", "/tmp/chats.sled", "scan"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/chats.sled")));
    }

    #[test]
    #[serial]
    fn test_cli_store_from_env() {
        std::env::set_var("CHATSWEEP_STORE", "/tmp/env.sled");
        let cli = Cli::try_parse_from(["chatsweep", "scan"]);
        std::env::remove_var("CHATSWEEP_STORE");

        assert!(cli.is_ok());
        assert_eq!(cli.unwrap().store, Some(PathBuf::from("/tmp/env.sled")));
    }

    #[test]
    fn test_cli_parse_missing_command() {
        let cli = Cli::try_parse_from(["chatsweep"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_invalid_command() {
        let cli = Cli::try_parse_from(["chatsweep", "invalid"]);
        assert!(cli.is_err());
    }
}

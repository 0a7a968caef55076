use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shell_words::split;

use crate::{CodeNestError, Result, TutorialId};

/// Main CLI application arguments
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "CodeNest - a cozy place for your code & notes"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Start with an empty collection instead of the sample tutorials
    #[clap(long)]
    pub no_samples: bool,

    /// Command that receives copied text on stdin
    #[clap(long, value_parser)]
    pub clipboard_command: Option<String>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,
}

/// One line typed into the session shell
#[derive(Parser, Debug)]
#[clap(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Commands available inside a session
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Go to the home view
    Home,

    /// Browse tutorials with the current search and tag filters
    #[clap(alias = "tutorials")]
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Set the search term, or clear it when none is given
    Search {
        /// Words to search for in titles and summaries
        terms: Vec<String>,
    },

    /// Select a tag filter, or deselect it if already selected
    Tag {
        /// Tag name
        name: String,
    },

    /// List all tags in use
    Tags,

    /// Deselect all tag filters
    ClearTags,

    /// Read a tutorial
    Open {
        /// ID of the tutorial
        id: TutorialId,
    },

    /// Show the tutorial being read in another format
    Show {
        /// Format output as raw JSON
        #[clap(short, long, conflicts_with = "html")]
        json: bool,

        /// Output the rendered HTML
        #[clap(long)]
        html: bool,
    },

    /// Leave the tutorial being read
    Back,

    /// List the code blocks of the tutorial being read
    Blocks,

    /// Copy a code block of the tutorial being read
    Copy {
        /// Block number as listed by `blocks`
        index: usize,
    },

    /// Copy the first code block of a tutorial from the list
    CopyPreview {
        /// ID of the tutorial
        id: TutorialId,
    },

    /// Add a new tutorial
    Add {
        /// Title of the tutorial
        #[clap(short = 'T', long)]
        title: String,

        /// Tags to associate with the tutorial (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Display date, defaults to today
        #[clap(short, long)]
        date: Option<String>,

        /// Link to a related project
        #[clap(short, long)]
        link: Option<String>,

        /// Short description shown in the list
        #[clap(short, long)]
        summary: Option<String>,

        /// Content of the tutorial, fenced code allowed
        #[clap(short, long, conflicts_with_all = ["file", "edit"])]
        content: Option<String>,

        /// Path to a file containing the tutorial's content
        #[clap(short, long, conflicts_with = "edit")]
        file: Option<PathBuf>,

        /// Write the content in an editor
        #[clap(short, long)]
        edit: bool,
    },

    /// End the session
    #[clap(alias = "exit")]
    Quit,
}

/// Parses one shell line. Blank lines yield `None`.
pub fn parse_shell_line(line: &str) -> Result<Option<Commands>> {
    let args = split(line).map_err(|e| CodeNestError::InvalidCommand {
        message: format!("Failed to parse command: {}", e),
    })?;

    if args.is_empty() {
        return Ok(None);
    }

    ShellLine::try_parse_from(args)
        .map(|parsed| Some(parsed.command))
        .map_err(|e| CodeNestError::InvalidCommand {
            message: e.to_string(),
        })
}

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stickies")]
#[command(about = "Sticky notes for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "a")]
    Add {
        /// Initial text (optional, opens the editor if not provided)
        #[arg(required = false)]
        text: Option<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// List notes, newest first
    #[command(alias = "ls")]
    List,

    /// Print a note in full
    #[command(alias = "v")]
    View {
        /// Position in the list (e.g. 1)
        position: usize,
    },

    /// Edit a note in the editor
    #[command(alias = "e")]
    Edit {
        /// Position in the list (e.g. 1)
        position: usize,
    },

    /// Replace a note's text from the command line
    Set {
        /// Position in the list (e.g. 1)
        position: usize,

        /// New text
        text: String,
    },

    /// Delete one or more notes
    #[command(alias = "rm")]
    Delete {
        /// Positions of the notes (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        positions: Vec<usize>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., debounce-ms)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

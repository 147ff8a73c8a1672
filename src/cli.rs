use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Add a new task.
    Add {
        /// The task title.
        #[structopt()]
        title: String,

        /// Deadline date (yyyy-mm-dd).
        #[structopt()]
        deadline: String,

        /// Free-form category label.
        #[structopt()]
        category: String,

        /// Importance from 1 (low) to 5 (high).
        #[structopt()]
        importance: String,

        /// Estimated effort in minutes.
        #[structopt()]
        minutes: String,
    },
    /// Overwrite every field of the task at a row.
    Edit {
        #[structopt()]
        row: usize,

        title: String,

        /// Deadline date (yyyy-mm-dd).
        deadline: String,

        category: String,

        /// Importance from 1 (low) to 5 (high).
        importance: String,

        /// Estimated effort in minutes.
        minutes: String,
    },
    /// Remove the task at a row.
    Rm {
        #[structopt()]
        row: usize,
    },
    /// Mark the task at a row as done.
    Done {
        #[structopt()]
        row: usize,
    },
    /// List all tasks, highest priority first.
    List,
    /// List tasks whose title or category contains a keyword.
    Search {
        #[structopt()]
        keyword: String,
    },
    /// Show completion counts and overdue tasks.
    Summary,
    /// List the tasks due today.
    Today,
    /// Export all tasks to tasks_exported.csv in the current directory.
    Export,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Prio",
    about = "A smart task prioritizer for your terminal."
)]
pub struct CommandLineArgs {
    #[structopt(subcommand)]
    pub action: Command,

    /// Use a different task file.
    #[structopt(parse(from_os_str), short, long)]
    pub task_file: Option<PathBuf>,
}

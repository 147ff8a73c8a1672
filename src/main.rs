#[macro_use]
extern crate prettytable;

use anyhow::anyhow;
use directories::ProjectDirs;
use std::path::PathBuf;
use structopt::StructOpt;

mod cli;
mod error;
mod interface;
mod model;
mod storage;
mod store;

use cli::{Command::*, CommandLineArgs};
use storage::FileStorage;
use store::TaskStore;

fn find_default_task_file() -> Option<PathBuf> {
    if let Some(base_dirs) = ProjectDirs::from("com", "prio", "prio") {
        let root_dir = base_dirs.data_dir();
        if !root_dir.exists() {
            std::fs::create_dir_all(root_dir).expect("Failed to create directory.");
        }
        let mut path = PathBuf::from(root_dir);
        path.push("tasks.csv");
        Some(path)
    } else {
        None
    }
}

fn main() -> anyhow::Result<()> {
    // Get the command-line arguments.
    let CommandLineArgs { action, task_file } = CommandLineArgs::from_args();

    // Unpack the task file.
    let task_file = task_file
        .or_else(find_default_task_file)
        .ok_or(anyhow!("Failed to find task file."))?;

    let backend = FileStorage::new(task_file);

    // A task file that cannot be read is not fatal; the list starts empty
    // and will be rewritten by the next mutation.
    let mut store = TaskStore::new();
    if let Err(err) = store.load(&backend) {
        eprintln!(
            "warning: could not read {}, starting empty: {}",
            backend.path().display(),
            err
        );
    }

    // Perform the action.
    match action {
        Add {
            title,
            deadline,
            category,
            importance,
            minutes,
        } => interface::add_task(
            &mut store, &backend, &title, &deadline, &category, &importance, &minutes,
        ),
        Edit {
            row,
            title,
            deadline,
            category,
            importance,
            minutes,
        } => interface::edit_task(
            &mut store, &backend, row, &title, &deadline, &category, &importance, &minutes,
        ),
        Rm { row } => interface::remove_task(&mut store, &backend, row),
        Done { row } => interface::complete_task(&mut store, &backend, row),
        List => interface::list(&store),
        Search { keyword } => interface::search(&store, &keyword),
        Summary => interface::summary(&store),
        Today => interface::today(&store),
        Export => interface::export(&store),
    }?;
    Ok(())
}

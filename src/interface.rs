use std::path::PathBuf;

use chrono::NaiveDate;
use prettytable::Table;

use crate::error::{Result, TaskError};
use crate::model::Task;
use crate::storage::{FileStorage, Storage};
use crate::store::TaskStore;

/// Fixed target of the explicit export action, written in the current
/// directory.
const EXPORT_FILE: &str = "tasks_exported.csv";

const TITLE_WIDTH: usize = 40;

pub fn add_task(
    store: &mut TaskStore,
    backend: &dyn Storage,
    title: &str,
    deadline: &str,
    category: &str,
    importance: &str,
    minutes: &str,
) -> Result<()> {
    store.add(title, deadline, category, importance, minutes)?;
    store.save(backend)?;
    println!("{}. {} (due {})", store.len(), title, deadline);
    Ok(())
}

pub fn edit_task(
    store: &mut TaskStore,
    backend: &dyn Storage,
    row: usize,
    title: &str,
    deadline: &str,
    category: &str,
    importance: &str,
    minutes: &str,
) -> Result<()> {
    let index = index(row)?;
    at_row(
        store.edit(index, title, deadline, category, importance, minutes),
        row,
    )?;
    store.save(backend)?;
    println!("Updated row {}.", row);
    Ok(())
}

pub fn remove_task(store: &mut TaskStore, backend: &dyn Storage, row: usize) -> Result<()> {
    let index = index(row)?;
    at_row(store.delete(index), row)?;
    store.save(backend)?;
    println!("Removed row {}.", row);
    Ok(())
}

pub fn complete_task(store: &mut TaskStore, backend: &dyn Storage, row: usize) -> Result<()> {
    let index = index(row)?;
    at_row(store.mark_complete(index), row)?;
    store.save(backend)?;
    println!("Done: row {}.", row);
    Ok(())
}

pub fn list(store: &TaskStore) -> Result<()> {
    render(&store.list_sorted(), store.today());
    Ok(())
}

pub fn search(store: &TaskStore, keyword: &str) -> Result<()> {
    let matches = store.filter(keyword);
    if matches.is_empty() {
        println!("No tasks match {:?}.", keyword);
    } else {
        render(&matches, store.today());
    }
    Ok(())
}

pub fn summary(store: &TaskStore) -> Result<()> {
    let summary = store.summary();
    println!(
        "Completed tasks: {} / {} ({:.1}%)",
        summary.completed_count, summary.total_count, summary.completion_percentage
    );
    if summary.overdue.is_empty() {
        println!("No overdue tasks.");
    } else {
        println!("\nOverdue tasks:");
        for (title, deadline) in &summary.overdue {
            println!("- {} [due: {}]", title, deadline);
        }
    }
    Ok(())
}

pub fn today(store: &TaskStore) -> Result<()> {
    let due = store.due_today();
    if due.is_empty() {
        println!("Nothing due today.");
    } else {
        println!("Tasks due today:");
        for title in &due {
            println!("- {}", title);
        }
    }
    Ok(())
}

pub fn export(store: &TaskStore) -> Result<()> {
    let target = FileStorage::new(PathBuf::from(EXPORT_FILE));
    store.save(&target)?;
    println!("Tasks exported to {}", EXPORT_FILE);
    Ok(())
}

// Rows are 1-based on the command line; the store counts from zero.
fn index(row: usize) -> Result<usize> {
    row.checked_sub(1).ok_or(TaskError::NotFound(row))
}

// Report out-of-range errors with the row the user typed, not the
// zero-based index the store saw.
fn at_row<T>(result: Result<T>, row: usize) -> Result<T> {
    result.map_err(|err| match err {
        TaskError::NotFound(_) => TaskError::NotFound(row),
        other => other,
    })
}

/// Print the task table. Rows are numbered by their displayed position;
/// scores of 40 and up are tinted red, 30 and up yellow.
fn render(tasks: &[&Task], today: NaiveDate) {
    let mut table = Table::new();
    table.add_row(row![
        "#", "task", "deadline", "category", "imp.", "effort", "score", "done"
    ]);

    for (position, task) in tasks.iter().enumerate() {
        let score = task.priority_score(today);
        let title = textwrap::fill(&task.title, TITLE_WIDTH);
        let done = if task.completed { "yes" } else { "" };

        let row = if score >= 40 {
            row![Fr =>
                position + 1, title, task.deadline, task.category,
                task.importance, task.estimated_minutes, score, done
            ]
        } else if score >= 30 {
            row![Fy =>
                position + 1, title, task.deadline, task.category,
                task.importance, task.estimated_minutes, score, done
            ]
        } else {
            row![
                position + 1, title, task.deadline, task.category,
                task.importance, task.estimated_minutes, score, done
            ]
        };
        table.add_row(row);
    }

    table.printstd();
}

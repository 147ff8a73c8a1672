use chrono::{Local, NaiveDate};

use crate::error::{Result, TaskError};
use crate::model::Task;
use crate::storage::Storage;

/// The in-memory task list and every operation on it.
///
/// Tasks have no stable identifier: mutating operations address a task by
/// its position in insertion order, and deleting shifts later positions
/// down. The clock is injectable so that scoring and the date-based
/// reports are deterministic under test.
pub struct TaskStore {
    tasks: Vec<Task>,
    clock: Box<dyn Fn() -> NaiveDate>,
}

/// Completion counts plus the overdue list, as shown by the summary
/// report.
#[derive(Debug, PartialEq)]
pub struct Summary {
    pub completed_count: usize,
    pub total_count: usize,
    pub completion_percentage: f64,
    /// `(title, deadline)` of incomplete tasks already past due, in
    /// insertion order.
    pub overdue: Vec<(String, String)>,
}

impl TaskStore {
    /// A store that follows the local wall clock.
    pub fn new() -> TaskStore {
        TaskStore::with_clock(|| Local::now().date_naive())
    }

    /// A store with a substitute clock, for tests.
    pub fn with_clock(clock: impl Fn() -> NaiveDate + 'static) -> TaskStore {
        TaskStore {
            tasks: Vec::new(),
            clock: Box::new(clock),
        }
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new, incomplete task. Importance and the effort estimate
    /// arrive as raw user input and must parse as integers; bad input
    /// leaves the list untouched.
    pub fn add(
        &mut self,
        title: &str,
        deadline: &str,
        category: &str,
        importance: &str,
        estimated_minutes: &str,
    ) -> Result<()> {
        let importance = parse_number(importance)?;
        let estimated_minutes = parse_number(estimated_minutes)?;
        self.tasks.push(Task::new(
            title.to_string(),
            deadline.to_string(),
            category.to_string(),
            importance,
            estimated_minutes,
        ));
        Ok(())
    }

    /// Overwrite every field of the task at `index`, keeping its
    /// completion state. Validates the numeric input before touching the
    /// task, so a rejected edit changes nothing.
    pub fn edit(
        &mut self,
        index: usize,
        title: &str,
        deadline: &str,
        category: &str,
        importance: &str,
        estimated_minutes: &str,
    ) -> Result<()> {
        if index >= self.tasks.len() {
            return Err(TaskError::NotFound(index));
        }
        let importance = parse_number(importance)?;
        let estimated_minutes = parse_number(estimated_minutes)?;

        let task = &mut self.tasks[index];
        task.title = title.to_string();
        task.deadline = deadline.to_string();
        task.category = category.to_string();
        task.importance = importance;
        task.estimated_minutes = estimated_minutes;
        Ok(())
    }

    /// Remove the task at `index`, shifting later tasks down by one.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        if index >= self.tasks.len() {
            return Err(TaskError::NotFound(index));
        }
        self.tasks.remove(index);
        Ok(())
    }

    pub fn mark_complete(&mut self, index: usize) -> Result<()> {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.completed = true;
                Ok(())
            }
            None => Err(TaskError::NotFound(index)),
        }
    }

    /// Every task, highest priority score first. The sort is stable, so
    /// tasks with equal scores keep their insertion order.
    pub fn list_sorted(&self) -> Vec<&Task> {
        let today = self.today();
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by_key(|task| std::cmp::Reverse(task.priority_score(today)));
        view
    }

    /// The sorted subset whose title or category contains `keyword`,
    /// case-insensitively. An empty keyword matches everything.
    pub fn filter(&self, keyword: &str) -> Vec<&Task> {
        let keyword = keyword.to_lowercase();
        self.list_sorted()
            .into_iter()
            .filter(|task| {
                task.title.to_lowercase().contains(&keyword)
                    || task.category.to_lowercase().contains(&keyword)
            })
            .collect()
    }

    /// Completion counts and the overdue list.
    ///
    /// "Overdue" here compares the deadline *text* against today's
    /// `YYYY-MM-DD` string, while scoring parses deadlines as dates. The
    /// two agree for well-formed dates but diverge on malformed ones;
    /// both behaviors are kept as-is.
    pub fn summary(&self) -> Summary {
        let today = self.today().format("%Y-%m-%d").to_string();
        let completed_count = self.tasks.iter().filter(|t| t.completed).count();
        let total_count = self.tasks.len();
        let completion_percentage = if total_count > 0 {
            100.0 * completed_count as f64 / total_count as f64
        } else {
            0.0
        };
        let overdue = self
            .tasks
            .iter()
            .filter(|t| !t.completed && t.deadline.as_str() < today.as_str())
            .map(|t| (t.title.clone(), t.deadline.clone()))
            .collect();
        Summary {
            completed_count,
            total_count,
            completion_percentage,
            overdue,
        }
    }

    /// Titles of incomplete tasks whose deadline is exactly today's date
    /// string, in insertion order.
    pub fn due_today(&self) -> Vec<String> {
        let today = self.today().format("%Y-%m-%d").to_string();
        self.tasks
            .iter()
            .filter(|t| !t.completed && t.deadline == today)
            .map(|t| t.title.clone())
            .collect()
    }

    /// Replace the collection wholesale from a backend. On failure the
    /// store is left empty.
    pub fn load(&mut self, backend: &dyn Storage) -> Result<()> {
        self.tasks.clear();
        self.tasks = backend.load()?;
        Ok(())
    }

    /// Flush the collection wholesale to a backend.
    pub fn save(&self, backend: &dyn Storage) -> Result<()> {
        backend.save(&self.tasks)
    }
}

fn parse_number(input: &str) -> Result<i32> {
    input
        .parse()
        .map_err(|_| TaskError::Validation(input.to_string()))
}

use chrono::NaiveDate;

/// A single task, saved as one line in the task file.
///
/// The deadline is kept as opaque `YYYY-MM-DD` text; only the scoring
/// function ever parses it. Importance is meant to be 1-5 and the effort
/// estimate positive, but neither is enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub deadline: String,
    pub category: String,
    pub importance: i32,
    pub estimated_minutes: i32,
    pub completed: bool,
}

impl Task {
    pub fn new(
        title: String,
        deadline: String,
        category: String,
        importance: i32,
        estimated_minutes: i32,
    ) -> Task {
        Task {
            title,
            deadline,
            category,
            importance,
            estimated_minutes,
            completed: false,
        }
    }

    /// Compute the priority score used for sort ordering and color-coding.
    ///
    /// Base score is `importance * 8`. A deadline bonus is added for tasks
    /// that are overdue (25), due today (15) or due tomorrow (7), then an
    /// effort adjustment of `max(1, estimated_minutes / 10)` is subtracted.
    /// A deadline that does not parse as a date simply earns no bonus.
    ///
    /// Pure with respect to `today`, so tests can pin the date.
    pub fn priority_score(&self, today: NaiveDate) -> i32 {
        let base = self.importance * 8;
        let effort_adjustment = std::cmp::max(1, self.estimated_minutes / 10);

        let bonus = match NaiveDate::parse_from_str(&self.deadline, "%Y-%m-%d") {
            Ok(due) => match (due - today).num_days() {
                d if d < 0 => 25,
                0 => 15,
                1 => 7,
                _ => 0,
            },
            Err(_) => 0,
        };

        base + bonus - effort_adjustment
    }
}

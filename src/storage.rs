use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::Result;
use crate::model::Task;

/// A persistence backend for the task list. The real backend writes the
/// flat task file; tests substitute an in-memory stub.
pub trait Storage {
    /// Read the whole collection. A backend with nothing stored yet
    /// returns an empty list, not an error.
    fn load(&self) -> Result<Vec<Task>>;

    /// Overwrite the whole collection.
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

/// Flat-file backend: one task per line, six comma-joined fields in the
/// order `title,deadline,category,importance,estimated_minutes,completed`.
/// No header and no escaping of embedded commas, so a field containing a
/// comma saves fine but the line is dropped on the next load. This is a
/// known format limitation.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> FileStorage {
        FileStorage { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Vec<Task>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(contents.lines().filter_map(parse_line).collect())
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let mut out = String::new();
        for task in tasks {
            out.push_str(&format_line(task));
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }
}

/// Parse one line of the task file. Lines that do not split into exactly
/// six fields, or whose numeric fields do not parse, are skipped silently.
fn parse_line(line: &str) -> Option<Task> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 6 {
        return None;
    }
    let importance = fields[3].parse().ok()?;
    let estimated_minutes = fields[4].parse().ok()?;
    Some(Task {
        title: fields[0].to_string(),
        deadline: fields[1].to_string(),
        category: fields[2].to_string(),
        importance,
        estimated_minutes,
        completed: fields[5].eq_ignore_ascii_case("true"),
    })
}

fn format_line(task: &Task) -> String {
    format!(
        "{},{},{},{},{},{}",
        task.title,
        task.deadline,
        task.category,
        task.importance,
        task.estimated_minutes,
        task.completed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, completed: bool) -> Task {
        Task {
            title: title.to_string(),
            deadline: "2021-06-15".to_string(),
            category: "home".to_string(),
            importance: 4,
            estimated_minutes: 25,
            completed,
        }
    }

    #[test]
    fn round_trips_comma_free_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("tasks.csv"));

        let tasks = vec![task("water plants", false), task("pay rent", true)];
        storage.save(&tasks).unwrap();

        assert_eq!(storage.load().unwrap(), tasks);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nope.csv"));
        assert_eq!(storage.load().unwrap(), Vec::new());
    }

    #[test]
    fn skips_lines_with_wrong_field_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(
            &path,
            "pay rent,2021-06-15,home,4,25,true\n\
             too,few,fields\n\
             \n\
             water plants,2021-06-16,home,2,10,false\n",
        )
        .unwrap();

        let loaded = FileStorage::new(path).load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "pay rent");
        assert_eq!(loaded[1].title, "water plants");
    }

    #[test]
    fn skips_lines_with_unparseable_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(
            &path,
            "pay rent,2021-06-15,home,high,25,true\n\
             water plants,2021-06-16,home,2,ten,false\n\
             call mom,2021-06-17,family,3,15,false\n",
        )
        .unwrap();

        let loaded = FileStorage::new(path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "call mom");
    }

    #[test]
    fn embedded_comma_drops_the_line_on_reload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("tasks.csv"));

        let tasks = vec![task("buy milk, eggs", false), task("pay rent", true)];
        storage.save(&tasks).unwrap();

        // The comma in the first title makes that line split into 7 fields.
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "pay rent");
    }

    #[test]
    fn completed_flag_parses_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(
            &path,
            "pay rent,2021-06-15,home,4,25,TRUE\n\
             water plants,2021-06-16,home,2,10,yes\n",
        )
        .unwrap();

        let loaded = FileStorage::new(path).load().unwrap();
        assert!(loaded[0].completed);
        // Anything that is not "true" reads as false.
        assert!(!loaded[1].completed);
    }
}

use chrono::NaiveDate;

use crate::core::task::{Task, TaskStatus};

/// Tasks not yet finished.
pub fn open_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.status != TaskStatus::Done).count()
}

/// Per-status totals in fixed board order.
pub fn status_counts(tasks: &[Task]) -> [(TaskStatus, usize); 4] {
    TaskStatus::ALL.map(|status| {
        let count = tasks.iter().filter(|t| t.status == status).count();
        (status, count)
    })
}

/// Tasks past their due date and still open.
pub fn overdue_count(tasks: &[Task], today: NaiveDate) -> usize {
    tasks.iter().filter(|t| t.is_overdue(today)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        let mut review = Task::new(1, "Review launch copy");
        review.status = TaskStatus::Review;
        review.due_date = NaiveDate::from_ymd_opt(2025, 3, 8);

        let mut shipped = Task::new(2, "Ship beta");
        shipped.status = TaskStatus::Done;
        shipped.due_date = NaiveDate::from_ymd_opt(2025, 3, 1);

        let mut draft = Task::new(3, "Draft roadmap");
        draft.due_date = NaiveDate::from_ymd_opt(2025, 3, 20);

        vec![review, shipped, draft]
    }

    #[test]
    fn open_count_excludes_done() {
        assert_eq!(open_count(&sample_tasks()), 2);
    }

    #[test]
    fn status_counts_cover_all_buckets() {
        let counts = status_counts(&sample_tasks());
        assert_eq!(counts[0], (TaskStatus::Todo, 1));
        assert_eq!(counts[1], (TaskStatus::InProgress, 0));
        assert_eq!(counts[2], (TaskStatus::Review, 1));
        assert_eq!(counts[3], (TaskStatus::Done, 1));
    }

    #[test]
    fn overdue_ignores_finished_tasks() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        // "Ship beta" is past due but Done; only the review task counts.
        assert_eq!(overdue_count(&sample_tasks(), today), 1);
    }
}

use crate::core::task::Task;
use crate::core::user::SessionUser;

/// Only the assignee may change a task's status or progress.
pub fn can_update_status_or_progress(user: Option<&SessionUser>, task: &Task) -> bool {
    matches!(
        (user.and_then(|u| u.id), task.assignee_id),
        (Some(current), Some(assignee)) if current == assignee
    )
}

/// Only the creator may hand a task to someone else.
pub fn can_reassign(user: Option<&SessionUser>, task: &Task) -> bool {
    matches!(
        (user.and_then(|u| u.id), task.creator_id),
        (Some(current), Some(creator)) if current == creator
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_of(assignee: Option<i64>, creator: Option<i64>) -> Task {
        let mut task = Task::new(1, "Wire the login form");
        task.assignee_id = assignee;
        task.creator_id = creator;
        task
    }

    #[test]
    fn assignee_gate_requires_matching_ids() {
        let me = SessionUser::new(Some(7), "Dana");
        assert!(can_update_status_or_progress(
            Some(&me),
            &task_of(Some(7), Some(2))
        ));
        assert!(!can_update_status_or_progress(
            Some(&me),
            &task_of(Some(8), Some(7))
        ));
        assert!(!can_update_status_or_progress(
            Some(&me),
            &task_of(None, Some(7))
        ));
    }

    #[test]
    fn creator_gate_requires_matching_ids() {
        let me = SessionUser::new(Some(7), "Dana");
        assert!(can_reassign(Some(&me), &task_of(Some(2), Some(7))));
        assert!(!can_reassign(Some(&me), &task_of(Some(7), Some(2))));
        assert!(!can_reassign(Some(&me), &task_of(Some(7), None)));
    }

    #[test]
    fn anonymous_users_can_do_nothing() {
        let task = task_of(Some(7), Some(7));
        assert!(!can_update_status_or_progress(None, &task));
        assert!(!can_reassign(None, &task));

        let idless = SessionUser::new(None, "Ghost");
        assert!(!can_update_status_or_progress(Some(&idless), &task));
        assert!(!can_reassign(Some(&idless), &task));
    }
}

use thiserror::Error;

use super::permissions::can_update_status_or_progress;
use crate::core::task::{Task, TaskId, TaskStatus};
use crate::core::user::SessionUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Only the assignee can move this task")]
    NotAssignee,
    #[error("Task is not on the board")]
    UnknownTask,
}

/// Receipt for an optimistic drag, held until the server answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTicket {
    pub task_id: TaskId,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl MoveTicket {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// The kanban board: one flat task list in server order, grouped into the
/// four status buckets on read. Rewriting a status in place keeps every
/// task's position within its bucket stable across moves and rollbacks.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    tasks: Vec<Task>,
}

impl BoardState {
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// One board column, in server order.
    pub fn bucket(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    /// Column-header counts in board order.
    pub fn counts(&self) -> [(TaskStatus, usize); 4] {
        TaskStatus::ALL.map(|status| (status, self.count(status)))
    }

    pub fn can_drag(&self, user: Option<&SessionUser>, task_id: TaskId) -> bool {
        self.task(task_id)
            .is_some_and(|task| can_update_status_or_progress(user, task))
    }

    /// Apply the optimistic rewrite for a drag and hand back the receipt the
    /// caller needs for `commit` or `roll_back` once the request resolves.
    pub fn begin_move(
        &mut self,
        user: Option<&SessionUser>,
        task_id: TaskId,
        to: TaskStatus,
    ) -> Result<MoveTicket, MoveError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(MoveError::UnknownTask)?;
        if !can_update_status_or_progress(user, task) {
            return Err(MoveError::NotAssignee);
        }
        let ticket = MoveTicket {
            task_id,
            from: task.status,
            to,
        };
        task.status = to;
        Ok(ticket)
    }

    /// The server accepted the move; the board already shows it.
    pub fn commit(&mut self, ticket: MoveTicket) {
        log::debug!(
            "Move of task {} to {} confirmed",
            ticket.task_id,
            ticket.to.as_keyword()
        );
    }

    /// The server rejected the move; put the task back where it was. A task
    /// that vanished in the meantime is left alone.
    pub fn roll_back(&mut self, ticket: MoveTicket) {
        match self.tasks.iter_mut().find(|t| t.id == ticket.task_id) {
            Some(task) => task.status = ticket.from,
            None => log::debug!(
                "Task {} disappeared before rollback; nothing to restore",
                ticket.task_id
            ),
        }
    }

    /// Newly created tasks lead the list, matching the server's newest-first
    /// ordering on the next fetch.
    pub fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Swap in a server-updated task, keeping its position.
    pub fn replace(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    pub fn remove(&mut self, task_id: TaskId) {
        self.tasks.retain(|t| t.id != task_id);
    }
}

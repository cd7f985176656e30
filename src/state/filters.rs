use super::fetch::{FetchGate, Generation};
use crate::core::project::{Project, ProjectId, ProjectStatus};
use crate::core::task::{TaskFilters, TaskPriority, TaskScope};

/// Toolbar state for the task board. Every change invalidates in-flight
/// fetches so a slow response for the old filters cannot overwrite the new
/// ones.
#[derive(Debug, Clone, Default)]
pub struct TaskFilterState {
    scope: TaskScope,
    project_id: Option<ProjectId>,
    priority: Option<TaskPriority>,
    search: String,
    gate: FetchGate,
}

impl TaskFilterState {
    pub fn scope(&self) -> TaskScope {
        self.scope
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_scope(&mut self, scope: TaskScope) {
        if self.scope != scope {
            self.scope = scope;
            self.gate.invalidate();
        }
    }

    pub fn set_project(&mut self, project_id: Option<ProjectId>) {
        if self.project_id != project_id {
            self.project_id = project_id;
            self.gate.invalidate();
        }
    }

    pub fn set_priority(&mut self, priority: Option<TaskPriority>) {
        if self.priority != priority {
            self.priority = priority;
            self.gate.invalidate();
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.search != search {
            self.search = search;
            self.gate.invalidate();
        }
    }

    pub fn filters(&self) -> TaskFilters {
        TaskFilters {
            scope: self.scope,
            project_id: self.project_id,
            priority: self.priority,
            search: match self.search.trim() {
                "" => None,
                s => Some(s.to_string()),
            },
        }
    }

    /// Snapshot for a fetch: the query to send plus the generation the
    /// response must still match.
    pub fn begin_fetch(&self) -> (TaskFilters, Generation) {
        (self.filters(), self.gate.begin())
    }

    /// True when a response from `begin_fetch` may still be applied.
    pub fn accept(&self, generation: Generation) -> bool {
        self.gate.is_current(generation)
    }

    /// Drop a project filter whose project no longer exists.
    pub fn reconcile_projects(&mut self, projects: &[Project]) {
        if let Some(id) = self.project_id {
            if !projects.iter().any(|p| p.id == id) {
                self.set_project(None);
            }
        }
    }
}

/// The projects page: server-filtered by status, locally filtered by name.
#[derive(Debug, Clone, Default)]
pub struct ProjectListState {
    projects: Vec<Project>,
    status_filter: Option<ProjectStatus>,
    search: String,
    gate: FetchGate,
}

impl ProjectListState {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn status_filter(&self) -> Option<ProjectStatus> {
        self.status_filter
    }

    pub fn set_status_filter(&mut self, status: Option<ProjectStatus>) {
        if self.status_filter != status {
            self.status_filter = status;
            self.gate.invalidate();
        }
    }

    /// The name search never refetches; it narrows what is already loaded.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn begin_fetch(&self) -> (Option<ProjectStatus>, Generation) {
        (self.status_filter, self.gate.begin())
    }

    pub fn accept(&mut self, generation: Generation, projects: Vec<Project>) -> bool {
        if !self.gate.is_current(generation) {
            return false;
        }
        self.projects = projects;
        true
    }

    /// Case-insensitive name-contains filter over the loaded list.
    pub fn filter_by_name(&self) -> Vec<&Project> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.projects.iter().collect();
        }
        self.projects
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn prepend(&mut self, project: Project) {
        self.projects.insert(0, project);
    }

    pub fn replace(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project,
            None => self.projects.push(project),
        }
    }

    pub fn remove(&mut self, project_id: ProjectId) {
        self.projects.retain(|p| p.id != project_id);
    }
}

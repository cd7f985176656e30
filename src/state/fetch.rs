use crate::core::project::{AssigneeOption, Project, ProjectId};

pub type Generation = u64;

/// Monotonic fence between list state and in-flight fetches. A fetch snapshots
/// the generation with `begin`; filter changes call `invalidate`; the response
/// is applied only while its generation is still current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchGate {
    current: Generation,
}

impl FetchGate {
    pub fn begin(&self) -> Generation {
        self.current
    }

    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation
    }
}

/// Assignee options for the task modals, keyed by the selected project.
/// Responses for a project that is no longer selected are dropped.
#[derive(Debug, Clone, Default)]
pub struct AssigneePicker {
    project_id: Option<ProjectId>,
    options: Vec<AssigneeOption>,
    gate: FetchGate,
}

impl AssigneePicker {
    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn options(&self) -> &[AssigneeOption] {
        &self.options
    }

    /// Switch projects. Returns the fetch key for the newly selected project,
    /// or None when nothing needs loading (deselected or unchanged).
    pub fn select_project(
        &mut self,
        project_id: Option<ProjectId>,
    ) -> Option<(ProjectId, Generation)> {
        if self.project_id == project_id {
            return None;
        }
        self.project_id = project_id;
        self.options.clear();
        self.gate.invalidate();
        project_id.map(|id| (id, self.gate.begin()))
    }

    /// Apply a fetched option list if it still matches the selection.
    pub fn accept(
        &mut self,
        project_id: ProjectId,
        generation: Generation,
        options: Vec<AssigneeOption>,
    ) -> bool {
        if self.project_id != Some(project_id) || !self.gate.is_current(generation) {
            return false;
        }
        self.options = options;
        true
    }

    /// Clear the selection when its project vanished from the list.
    pub fn reconcile(&mut self, projects: &[Project]) {
        if let Some(id) = self.project_id {
            if !projects.iter().any(|p| p.id == id) {
                self.select_project(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: i64, name: &str) -> AssigneeOption {
        AssigneeOption {
            id,
            name: name.to_string(),
            email: None,
            role: None,
        }
    }

    #[test]
    fn gate_rejects_stale_generations() {
        let mut gate = FetchGate::default();
        let first = gate.begin();
        assert!(gate.is_current(first));

        gate.invalidate();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(gate.begin()));
    }

    #[test]
    fn stale_assignee_response_is_dropped() {
        let mut picker = AssigneePicker::default();
        let (first_project, first_gen) = picker.select_project(Some(1)).unwrap();
        let (second_project, second_gen) = picker.select_project(Some(2)).unwrap();

        // The slow response for project 1 lands after the switch.
        assert!(!picker.accept(first_project, first_gen, vec![option(10, "Dana")]));
        assert!(picker.options().is_empty());

        assert!(picker.accept(second_project, second_gen, vec![option(20, "Kai")]));
        assert_eq!(picker.options()[0].name, "Kai");
    }

    #[test]
    fn reselecting_the_same_project_does_not_refetch() {
        let mut picker = AssigneePicker::default();
        let (id, generation) = picker.select_project(Some(5)).unwrap();
        assert!(picker.accept(id, generation, vec![option(1, "Dana")]));

        assert!(picker.select_project(Some(5)).is_none());
        assert_eq!(picker.options().len(), 1);
    }

    #[test]
    fn deselecting_clears_options() {
        let mut picker = AssigneePicker::default();
        let (id, generation) = picker.select_project(Some(5)).unwrap();
        picker.accept(id, generation, vec![option(1, "Dana")]);

        assert!(picker.select_project(None).is_none());
        assert!(picker.options().is_empty());
        assert_eq!(picker.project_id(), None);
    }

    #[test]
    fn reconcile_drops_vanished_project() {
        let mut picker = AssigneePicker::default();
        let (id, generation) = picker.select_project(Some(5)).unwrap();
        picker.accept(id, generation, vec![option(1, "Dana")]);

        picker.reconcile(&[Project::new(6, "Other")]);
        assert_eq!(picker.project_id(), None);
        assert!(picker.options().is_empty());

        let mut kept = AssigneePicker::default();
        kept.select_project(Some(6));
        kept.reconcile(&[Project::new(6, "Other")]);
        assert_eq!(kept.project_id(), Some(6));
    }
}

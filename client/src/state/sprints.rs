//! Sprint list state, including which sprint is current.

#[cfg(test)]
#[path = "sprints_test.rs"]
mod sprints_test;

use model::Sprint;
use uuid::Uuid;

/// Sprints as last fetched from `/api/sprints`.
#[derive(Clone, Debug, Default)]
pub struct SprintsState {
    pub items: Vec<Sprint>,
    pub current_sprint_id: Option<Uuid>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SprintsState {
    /// The current sprint, if it is among the loaded items.
    pub fn current(&self) -> Option<&Sprint> {
        let id = self.current_sprint_id?;
        self.items.iter().find(|sprint| sprint.id == id)
    }

    pub fn is_current(&self, sprint_id: Uuid) -> bool {
        self.current_sprint_id == Some(sprint_id)
    }

    /// Insert or replace `sprint`, keeping the list ordered the way
    /// `/api/sprints` returns it: start date, then name, then id.
    pub fn insert_sorted(&mut self, sprint: Sprint) {
        self.items.retain(|existing| existing.id != sprint.id);
        let at = self
            .items
            .partition_point(|existing| sort_key(existing) <= sort_key(&sprint));
        self.items.insert(at, sprint);
    }

    /// Drop a deleted sprint, clearing the current pointer if it matched.
    pub fn remove(&mut self, sprint_id: Uuid) {
        self.items.retain(|sprint| sprint.id != sprint_id);
        if self.current_sprint_id == Some(sprint_id) {
            self.current_sprint_id = None;
        }
    }
}

fn sort_key(sprint: &Sprint) -> (time::OffsetDateTime, &str, Uuid) {
    (sprint.start_date, sprint.name.as_str(), sprint.id)
}

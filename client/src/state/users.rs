//! User directory state used to label task assignees.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use model::User;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct UsersState {
    pub items: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UsersState {
    pub fn name_of(&self, user_id: Uuid) -> Option<String> {
        self.items.iter().find(|user| user.id == user_id).map(|user| user.name.clone())
    }
}

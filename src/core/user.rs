use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// The authenticated account, as resolved from the profile endpoint.
///
/// `id` can be absent when the backend returns a trimmed profile payload;
/// permission checks treat that as "not the assignee/creator".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Option<UserId>,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
}

impl SessionUser {
    pub fn new(id: Option<UserId>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            role: None,
            avatar_url: None,
        }
    }

    pub fn initials(&self) -> String {
        initials_of(&self.name)
    }
}

/// Up to two uppercase initials for an avatar badge.
pub fn initials_of(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

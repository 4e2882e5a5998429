//! Lifecycle records for mocks bound to variables

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MockState {
    Created,
    Released,
}

/// A spy or stub assigned to `name` in the scope being walked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRecord {
    pub name: String,
    pub state: MockState,
}

impl MockRecord {
    pub fn created(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: MockState::Created,
        }
    }

    pub fn is_released(&self) -> bool {
        self.state == MockState::Released
    }
}

//! A username paired with the scope it is working in.

use std::fmt;

use crate::scope::SessionScope;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SessionContext {
    pub username: String,
    pub scope: SessionScope,
}

impl SessionContext {
    pub fn new(username: impl Into<String>, scope: SessionScope) -> Self {
        Self {
            username: username.into(),
            scope,
        }
    }
}

/// Diagnostics rendering: `bob -- deadbeef [a1b2c3d4]`. Not a wire format.
impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)?;
        if self.scope.has_project() {
            write!(f, " -- {}", self.scope.project())?;
        }
        if self.scope.has_id() {
            write!(f, " [{}]", self.scope.id())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_full_scope() {
        let context = SessionContext::new("bob", SessionScope::from_project_id("deadbeef", "a1b2c3d4"));
        assert_eq!(context.to_string(), "bob -- deadbeef [a1b2c3d4]");
    }

    #[test]
    fn test_display_username_only() {
        let context = SessionContext::new("bob", SessionScope::default());
        assert_eq!(context.to_string(), "bob");
    }

    #[test]
    fn test_display_id_without_project() {
        let context = SessionContext::new("bob", SessionScope::from_project_id("", "a1b2c3d4"));
        assert_eq!(context.to_string(), "bob [a1b2c3d4]");
    }
}

//! Team model.
//!
//! A team is an opaque participant identity. The scheduler reads its ID
//! and, for group-phase round robins, its group label. It never mutates
//! either.

use serde::{Deserialize, Serialize};

/// A participant in a round-robin tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team identifier.
    pub id: String,
    /// Group label. `None` = ungrouped.
    pub group: Option<String>,
}

impl Team {
    /// Creates a new ungrouped team with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: None,
        }
    }

    /// Places the team in a group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_builder() {
        let team = Team::new("T1").with_group("A");
        assert_eq!(team.id, "T1");
        assert_eq!(team.group.as_deref(), Some("A"));
        assert_eq!(Team::new("T2").group, None);
    }

    #[test]
    fn test_team_json_without_group() {
        let team: Team = serde_json::from_str(r#"{"id": "T1", "group": null}"#).unwrap();
        assert_eq!(team, Team::new("T1"));
    }
}

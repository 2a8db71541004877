//! Pairing model.

use serde::{Deserialize, Serialize};

/// An unordered pair of teams due to meet once.
///
/// `team_a`/`team_b` order carries no meaning beyond generation order;
/// home/away is decided later on the [`Match`](super::Match).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    /// Position in generation order. Used as the final deterministic tie-break.
    pub index: usize,
    /// First team ID.
    pub team_a: String,
    /// Second team ID.
    pub team_b: String,
    /// Group label shared by both teams, if any.
    pub group: Option<String>,
}

impl Pairing {
    /// Creates a new ungrouped pairing.
    pub fn new(index: usize, team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self {
            index,
            team_a: team_a.into(),
            team_b: team_b.into(),
            group: None,
        }
    }

    /// Sets the group label.
    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    /// Canonical (sorted) team key, for set membership checks.
    pub fn key(&self) -> (&str, &str) {
        if self.team_a <= self.team_b {
            (&self.team_a, &self.team_b)
        } else {
            (&self.team_b, &self.team_a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_key_is_unordered() {
        let p1 = Pairing::new(0, "A", "B");
        let p2 = Pairing::new(7, "B", "A");
        assert_eq!(p1.key(), ("A", "B"));
        assert_eq!(p1.key(), p2.key());
        assert_ne!(p1.key(), Pairing::new(1, "A", "C").key());
    }

    #[test]
    fn test_pairing_group() {
        let p = Pairing::new(2, "A", "B").with_group(Some("G".into()));
        assert_eq!(p.index, 2);
        assert_eq!(p.group.as_deref(), Some("G"));
    }
}

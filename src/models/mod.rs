//! Tournament scheduling domain models.
//!
//! Provides the data types consumed and produced by a scheduling run.
//! Teams and pairings go in; a schedule of matches comes out.
//!
//! # Domain Mappings
//!
//! | u-fixture | Football | Esports | Chess |
//! |-----------|----------|---------|-------|
//! | Team | Club | Roster | Player |
//! | Slot | Kick-off time | Match window | Round |
//! | Field | Pitch | Server | Board |
//! | Match | Fixture | Series | Game |

mod pairing;
mod schedule;
mod team;

pub use pairing::Pairing;
pub use schedule::{Match, Schedule, Violation, ViolationType};
pub use team::Team;

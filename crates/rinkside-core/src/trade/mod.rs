// Trade sides: roster entries, draft-pick assets, and roster management.

pub mod asset;
pub mod roster;

pub use asset::{PickRound, Resolved, RosterEntry};
pub use roster::{AddOutcome, Roster};

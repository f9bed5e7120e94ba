//! Game progression for a single round

mod input;
mod machine;
mod record;

pub use input::InputBuffer;
pub use machine::{
    Game, INITIAL_ATTEMPTS, MAX_ATTEMPTS, Phase, Rejection, RestoreError, SubmitOutcome,
};
pub use record::{LifetimeStats, Round};

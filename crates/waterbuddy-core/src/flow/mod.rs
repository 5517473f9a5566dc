mod command;
mod engine;
mod phase;

pub use command::{Command, CommandKind};
pub use engine::{HydrationEngine, SessionSnapshot};
pub use phase::Phase;

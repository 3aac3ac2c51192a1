mod classify;
mod combo;
mod compare;

pub use classify::classify;
pub use combo::{Classification, ComboKind, Play, ROCKET_RANK, UnrecognizedPlay};
pub use compare::beats;

mod classify;
pub use classify::*;

//! Cursor and nesting bookkeeping shared by both scanners

mod cursor;
mod scanner;
mod state;

pub(crate) use self::{cursor::Cursor, scanner::Scanner, state::StateTracker};
pub use self::state::DEFAULT_MAX_DEPTH;

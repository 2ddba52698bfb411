use crate::error::ParseErrorKind;

/// Nesting limit used unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 2048;

/// Used to bound how deep containers may nest.
///
/// Atoms (integers and strings) have depth zero, and lists and dicts have a depth
/// equal to the depth of their deepest member plus one. An empty list or dict has
/// depth 1.
#[derive(Debug, Clone)]
pub struct StateTracker {
    depth: usize,
    max_depth: usize,
}

impl Default for StateTracker {
    fn default() -> Self {
        StateTracker {
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl StateTracker {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    pub fn set_max_depth(&mut self, new_max_depth: usize) {
        self.max_depth = new_max_depth
    }

    /// Observe the start of a container.
    pub fn enter(&mut self) -> Result<(), ParseErrorKind> {
        if self.depth >= self.max_depth {
            return Err(ParseErrorKind::NestingTooDeep {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Observe the end of a container.
    pub fn leave(&mut self) {
        debug_assert!(self.depth > 0, "left more containers than were entered");
        self.depth = self.depth.saturating_sub(1);
    }
}

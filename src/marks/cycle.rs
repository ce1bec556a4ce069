use super::slot::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Rotating position over the occupied slots.
///
/// The index always refers to the list passed to [`CycleCursor::advance`], which is
/// recomputed on every call, so after marks change the cursor wraps within the new
/// membership instead of keeping an absolute slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleCursor {
    index: Option<usize>,
}

impl CycleCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = None;
    }

    /// Moves one step over `occupied` (ascending) and returns the slot landed on.
    /// An empty list leaves the cursor untouched.
    pub fn advance(&mut self, occupied: &[Slot], direction: Direction) -> Option<Slot> {
        let len = occupied.len();
        if len == 0 {
            return None;
        }

        let next = match (self.index, direction) {
            (Some(i), Direction::Next) if i < len => (i + 1) % len,
            (Some(i), Direction::Prev) if i < len => (i + len - 1) % len,
            (_, Direction::Next) => 0,
            (_, Direction::Prev) => len - 1,
        };

        self.index = Some(next);
        occupied.get(next).copied()
    }
}

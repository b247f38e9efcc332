//! Brace-driven indentation depth.

/// Scope counter turning brace nesting into indentation levels.
///
/// An opener is emitted at the depth *before* it increments; a closer
/// decrements *before* anything after it is emitted. Depth never goes below
/// zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentTracker {
    depth: usize,
}

impl IndentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a scope. Returns the depth the opener line is emitted at.
    pub fn open(&mut self) -> usize {
        let at = self.depth;
        self.depth += 1;
        at
    }

    /// Leave a scope. Returns `false` when the depth was already zero and the
    /// close was clamped.
    pub fn close(&mut self) -> bool {
        match self.depth.checked_sub(1) {
            Some(d) => {
                self.depth = d;
                true
            }
            None => false,
        }
    }

    /// Render the leading whitespace for `depth` at `width` spaces per level.
    pub fn render(depth: usize, width: usize) -> String {
        " ".repeat(depth * width)
    }
}

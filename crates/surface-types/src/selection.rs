//! # Positions and selections
//!
//! ## Overview
//!
//! A [Selection] is a pair of boundary [positions](Position): the *anchor*, where the selection
//! was started, and the *head*, where it currently ends. When both are equal the selection is a
//! caret.
//!
//! ## Example
//!
//! ```
//! use surface_types::selection::{Position, Selection};
//!
//! let sel = Selection::new(Position::from(8), Position::from(3));
//!
//! assert!(sel.is_backward());
//! assert_eq!(sel.start(), Position::from(3));
//! assert_eq!(sel.end(), Position::from(8));
//! assert_eq!(sel.normalized(), Selection::new(3.into(), 8.into()));
//! ```
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A boundary point within an editable surface.
///
/// The `node` is a host-defined index of the container holding the boundary; surfaces that only
/// contain a single run of text always use node 0. The `offset` counts characters from the start
/// of that container.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Container index.
    pub node: usize,

    /// Character offset within the container.
    pub offset: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(node: usize, offset: usize) -> Self {
        Position { node, offset }
    }
}

impl From<usize> for Position {
    fn from(offset: usize) -> Self {
        Position { node: 0, offset }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node.cmp(&other.node).then(self.offset.cmp(&other.offset))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.offset)
    }
}

/// A selected range, or a caret when collapsed.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started.
    pub anchor: Position,

    /// Where the selection currently ends.
    pub head: Position,
}

impl Selection {
    /// Create a selection running from `anchor` to `head`.
    pub fn new(anchor: Position, head: Position) -> Self {
        Selection { anchor, head }
    }

    /// Create a collapsed selection at `pos`.
    pub fn caret(pos: Position) -> Self {
        Selection { anchor: pos, head: pos }
    }

    /// Returns true if the anchor and head are the same position.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Returns true if the head comes before the anchor.
    pub fn is_backward(&self) -> bool {
        self.head < self.anchor
    }

    /// The earlier of the two boundary points.
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// The later of the two boundary points.
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Returns this selection with the anchor placed before the head.
    pub fn normalized(&self) -> Selection {
        Selection::new(self.start(), self.end())
    }

    /// Returns true if `pos` lies within the selected range, inclusive of both ends.
    pub fn contains(&self, pos: &Position) -> bool {
        self.start() <= *pos && *pos <= self.end()
    }

    /// Map both boundary points through `f`.
    pub fn map<F>(&self, mut f: F) -> Selection
    where
        F: FnMut(Position) -> Position,
    {
        Selection::new(f(self.anchor), f(self.head))
    }
}

impl From<Position> for Selection {
    fn from(pos: Position) -> Self {
        Selection::caret(pos)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_collapsed() {
            write!(f, "{}", self.head)
        } else {
            write!(f, "{}-{}", self.anchor, self.head)
        }
    }
}

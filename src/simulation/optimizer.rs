//! Path shortening by pattern collapse.
//!
//! Each pattern is "turn into a branch, U-turn at its dead end, turn again at
//! the same junction", which is equivalent to a single turn at that junction.

use crate::simulation::heading::Relative::{self, Back, Front, Left, Right};
use crate::simulation::path::Path;

/// A three-symbol window and the single symbol it collapses to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rewrite {
    pub window: [Relative; 3],
    pub replacement: Relative,
}

/// Rewrites in priority order.
pub const REWRITES: [Rewrite; 6] = [
    Rewrite {
        window: [Left, Back, Right],
        replacement: Back,
    },
    Rewrite {
        window: [Left, Back, Front],
        replacement: Right,
    },
    Rewrite {
        window: [Right, Back, Left],
        replacement: Back,
    },
    Rewrite {
        window: [Front, Back, Left],
        replacement: Right,
    },
    Rewrite {
        window: [Front, Back, Front],
        replacement: Back,
    },
    Rewrite {
        window: [Left, Back, Left],
        replacement: Front,
    },
];

/// Applies the highest-priority rewrite that matches, at its leftmost match.
///
/// Returns whether anything changed.
pub fn collapse_once(path: &mut Path) -> bool {
    for rewrite in &REWRITES {
        if let Some(at) = path.find(&rewrite.window) {
            path.splice_collapse(at, rewrite.window.len(), rewrite.replacement);
            return true;
        }
    }
    false
}

/// Collapses `path` in place until no rewrite matches. Returns the number of
/// rewrites applied.
pub fn optimize_in_place(path: &mut Path) -> usize {
    let mut rewrites = 0;
    while collapse_once(path) {
        rewrites += 1;
    }
    rewrites
}

/// Returns the collapsed copy of `path`, keeping its capacity.
#[must_use]
pub fn optimize(path: &Path) -> Path {
    let mut shortened = path.clone();
    let rewrites = optimize_in_place(&mut shortened);
    tracing::debug!(
        before = %path,
        after = %shortened,
        rewrites,
        "path optimized"
    );
    shortened
}

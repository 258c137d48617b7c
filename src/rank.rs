//! The league's official standings tiebreak, centralized so that every ranking in
//! the engine — clinch evaluation, per-universe qualification, threshold
//! estimation — resolves ties identically.

use std::cmp::Ordering;

/// Sort key for a standings ranking: points first, regulation wins to break ties.
/// Both compare descending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankKey {
    pub points: u16,
    pub regulation_wins: u16,
}
impl RankKey {
    pub fn new(points: u16, regulation_wins: u16) -> Self {
        Self {
            points,
            regulation_wins,
        }
    }
}

pub fn standings_cmp(a: &RankKey, b: &RankKey) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.regulation_wins.cmp(&a.regulation_wins))
}

/// Sorts entries into ranking order. The sort is stable: entries with identical
/// keys keep their incoming order, so callers control tie determinism through the
/// base order they supply.
pub fn sort_desc<T>(entries: &mut [T], mut key: impl FnMut(&T) -> RankKey) {
    entries.sort_by(|a, b| standings_cmp(&key(a), &key(b)));
}

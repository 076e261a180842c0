use std::fmt;
use std::ops::RangeInclusive;

/// Set of region IDs kept as sorted, disjoint, non-adjacent inclusive spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionSet {
    spans: Vec<(u32, u32)>,
}

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated list of IDs and `n-m` ranges, e.g. `1-4,8,10-12`.
    ///
    /// A token holding `n-m` anywhere is the inclusive range of the first
    /// such pair: `1-4-6` is `1..=4`, while `1 - 4` (spaces around the dash)
    /// is not a range and matches nothing. Any other token must be a plain
    /// integer after trimming. Empty tokens are skipped rather than read as
    /// region 0. A token that fits neither form contributes nothing, and a
    /// reversed range (`9-3`) is empty.
    pub fn parse(text: &str) -> Self {
        let mut set = Self::new();
        for token in text.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match parse_token(token) {
                Some(range) => {
                    if range.is_empty() {
                        log::debug!("region range {:?} is reversed; it matches nothing", token);
                    }
                    set.insert_range(range);
                }
                None => log::warn!("ignoring unparsable region token {:?}", token),
            }
        }
        set
    }

    pub fn insert(&mut self, id: u32) {
        self.insert_range(id..=id);
    }

    pub fn insert_range(&mut self, range: RangeInclusive<u32>) {
        let (lo, hi) = range.into_inner();
        if lo > hi {
            return;
        }
        // First span that overlaps or touches [lo, hi].
        let start = self
            .spans
            .partition_point(|&(_, h)| h.saturating_add(1) < lo);
        let mut end = start;
        let (mut merged_lo, mut merged_hi) = (lo, hi);
        while end < self.spans.len() && self.spans[end].0 <= hi.saturating_add(1) {
            merged_lo = merged_lo.min(self.spans[end].0);
            merged_hi = merged_hi.max(self.spans[end].1);
            end += 1;
        }
        self.spans
            .splice(start..end, std::iter::once((merged_lo, merged_hi)));
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        let i = self.spans.partition_point(|&(_, h)| h < id);
        self.spans.get(i).is_some_and(|&(lo, _)| lo <= id)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of IDs in the set.
    pub fn len(&self) -> u64 {
        self.spans
            .iter()
            .map(|&(lo, hi)| u64::from(hi - lo) + 1)
            .sum()
    }

    pub fn spans(&self) -> impl Iterator<Item = RangeInclusive<u32>> + '_ {
        self.spans.iter().map(|&(lo, hi)| lo..=hi)
    }

    /// Every ID in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.spans.iter().flat_map(|&(lo, hi)| lo..=hi)
    }

    /// True when the two sets share at least one ID.
    pub fn intersects(&self, other: &RegionSet) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.spans.len() && j < other.spans.len() {
            let (a_lo, a_hi) = self.spans[i];
            let (b_lo, b_hi) = other.spans[j];
            if a_lo <= b_hi && b_lo <= a_hi {
                return true;
            }
            if a_hi < b_hi {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }
}

// The first `digits-digits` run anywhere in the token is a range, so
// `1-4-6` reads as 1..=4 and `1 - 4` is not a range. Otherwise the trimmed
// token must be a plain integer.
fn parse_token(token: &str) -> Option<RangeInclusive<u32>> {
    let bytes = token.as_bytes();
    for (i, _) in token.match_indices('-') {
        let before = bytes[..i].iter().rev().take_while(|b| b.is_ascii_digit()).count();
        let after = bytes[i + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if before > 0 && after > 0 {
            let lo = token[i - before..i].parse().ok()?;
            let hi = token[i + 1..i + 1 + after].parse().ok()?;
            return Some(lo..=hi);
        }
    }
    token.trim().parse().ok().map(|id| id..=id)
}

impl fmt::Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(lo, hi)) in self.spans.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if lo == hi {
                write!(f, "{}", lo)?;
            } else {
                write!(f, "{}-{}", lo, hi)?;
            }
        }
        Ok(())
    }
}

// Copyright 2025 Lars Brubaker
// License: MIT
//
// Shell pairing: decides which shells are swept together.
//
// Shells whose bounding boxes cannot touch cannot overlap each other, so each
// is swept on its own. Shells whose boxes do touch are merged into one edge
// set and swept jointly.

use std::collections::BTreeMap;

use tracing::debug;

use crate::mesh::{EdgeKey, UvEdge};
use crate::shell::UvShell;

/// How overlapping shells are grouped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ShellMerge {
    /// Every overlapping pair becomes its own edge set. If A overlaps B and
    /// B overlaps C, {A, B} and {B, C} are checked separately and A against
    /// C is never tested.
    #[default]
    Pairwise,
    /// Connected components of the overlap graph are merged once, so chains
    /// of overlapping shells are checked as one set.
    Connected,
}

/// Edges to sweep together, with the shells they came from.
#[derive(Clone, Debug, Default)]
pub struct EdgeSet {
    pub shells: Vec<u32>,
    pub edges: Vec<UvEdge>,
}

impl EdgeSet {
    pub fn from_shell(shell: &UvShell) -> Self {
        EdgeSet {
            shells: vec![shell.index],
            edges: shell.edges.values().copied().collect(),
        }
    }

    fn merged<'s>(shells: impl IntoIterator<Item = &'s UvShell>) -> Self {
        let mut indices = Vec::new();
        let mut union: BTreeMap<EdgeKey, UvEdge> = BTreeMap::new();
        for shell in shells {
            indices.push(shell.index);
            union.extend(shell.edges.iter().map(|(k, e)| (*k, *e)));
        }
        EdgeSet {
            shells: indices,
            edges: union.into_values().collect(),
        }
    }
}

/// Split `shells` into edge sets by bounding-box overlap.
///
/// All shell pairs are tested, in (0, 1), (0, 2) .. (1, 2) .. order. Merged
/// sets come first, followed by every shell that overlapped nothing.
pub fn pair_shells(shells: &[UvShell], merge: ShellMerge) -> Vec<EdgeSet> {
    if shells.len() == 1 {
        return vec![EdgeSet::from_shell(&shells[0])];
    }

    let mut pairs = Vec::new();
    for i in 0..shells.len() {
        for j in (i + 1)..shells.len() {
            if shells[i].bbox.overlaps(&shells[j].bbox) {
                debug!(a = shells[i].index, b = shells[j].index, "shell bounds overlap");
                pairs.push((i, j));
            }
        }
    }

    let mut merged = vec![false; shells.len()];
    let mut sets = Vec::new();
    match merge {
        ShellMerge::Pairwise => {
            for &(i, j) in &pairs {
                sets.push(EdgeSet::merged([&shells[i], &shells[j]]));
                merged[i] = true;
                merged[j] = true;
            }
        }
        ShellMerge::Connected => {
            let mut parent: Vec<usize> = (0..shells.len()).collect();
            for &(i, j) in &pairs {
                union(&mut parent, i, j);
                merged[i] = true;
                merged[j] = true;
            }
            let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
            for i in (0..shells.len()).filter(|&i| merged[i]) {
                components.entry(find(&mut parent, i)).or_default().push(i);
            }
            let mut groups: Vec<Vec<usize>> = components.into_values().collect();
            groups.sort_by_key(|g| g[0]);
            for group in groups {
                sets.push(EdgeSet::merged(group.iter().map(|&i| &shells[i])));
            }
        }
    }

    for (i, shell) in shells.iter().enumerate() {
        if !merged[i] {
            sets.push(EdgeSet::from_shell(shell));
        }
    }
    sets
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let (ra, rb) = (find(parent, a), find(parent, b));
    if ra != rb {
        // Smaller index is the root, keeping component order stable.
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi] = lo;
    }
}

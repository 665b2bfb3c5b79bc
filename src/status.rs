// Copyright 2025 Lars Brubaker
// License: MIT
//
// The sweep status: the edges currently crossing the sweep line, ordered by
// the u at which they cross it.
//
// Edges are referenced by their EdgeIdx in the edge set. A position table
// maps every edge to its current slot (INVALID while inactive), so finding an
// edge by identity is a lookup rather than a scan. The table is rebuilt after
// every re-sort and patched after every removal.

use crate::geom::Real;
use crate::mesh::{EdgeIdx, UvEdge, INVALID};

pub struct Status {
    /// Active edges in sweep order.
    order: Vec<EdgeIdx>,
    /// position[edge] = slot of `edge` in `order`, or INVALID.
    position: Vec<u32>,
    /// Sweep coordinate of each edge at the last `advance`.
    sweep_u: Vec<Real>,
}

impl Status {
    pub fn new(edge_count: usize) -> Self {
        Status {
            order: Vec::with_capacity(edge_count),
            position: vec![INVALID; edge_count],
            sweep_u: vec![0.0; edge_count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append `edge` after the last active edge. Order is restored by the
    /// next `advance`.
    pub fn push(&mut self, edge: EdgeIdx) {
        self.position[edge as usize] = self.order.len() as u32;
        self.order.push(edge);
    }

    /// Move the sweep line to `v`: recompute every active edge's sweep
    /// coordinate and re-sort.
    ///
    /// Ties are broken by slope and then by edge key, so edges leaving the
    /// same point always come out in the same order.
    pub fn advance(&mut self, edges: &[UvEdge], v: Real) {
        for &e in &self.order {
            self.sweep_u[e as usize] = edges[e as usize].sweep_u(v);
        }
        let sweep_u = &self.sweep_u;
        self.order.sort_by(|&a, &b| {
            let (ea, eb) = (&edges[a as usize], &edges[b as usize]);
            sweep_u[a as usize]
                .total_cmp(&sweep_u[b as usize])
                .then_with(|| ea.slope().total_cmp(&eb.slope()))
                .then_with(|| ea.key.cmp(&eb.key))
        });
        self.reindex(0);
    }

    /// Current slot of `edge`, if it is active.
    #[inline]
    pub fn position(&self, edge: EdgeIdx) -> Option<usize> {
        match self.position.get(edge as usize) {
            Some(&p) if p != INVALID => Some(p as usize),
            _ => None,
        }
    }

    /// Edge at `slot`.
    #[inline]
    pub fn key(&self, slot: usize) -> Option<EdgeIdx> {
        self.order.get(slot).copied()
    }

    /// Remove `edge`, returning the slot it occupied.
    pub fn remove(&mut self, edge: EdgeIdx) -> Option<usize> {
        let slot = self.position(edge)?;
        self.order.remove(slot);
        self.position[edge as usize] = INVALID;
        self.reindex(slot);
        Some(slot)
    }

    #[inline]
    pub fn sweep_u(&self, edge: EdgeIdx) -> Real {
        self.sweep_u[edge as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        self.order.iter().copied()
    }

    fn reindex(&mut self, from: usize) {
        for (slot, &e) in self.order.iter().enumerate().skip(from) {
            self.position[e as usize] = slot as u32;
        }
    }
}

// Copyright 2025 Lars Brubaker
// License: MIT
//
// UV points and edges: the value types the shell builder produces and the
// sweep consumes. Edges are canonicalised so that `begin` precedes `end` in
// sweep order, independent of the face winding they came from.

use std::cmp::Ordering;

use crate::geom::{eval_u_at_v, segment_intersect, uv_cmp, Intersection, Real};

/// Index of an edge inside one edge set.
pub type EdgeIdx = u32;

/// Null index for edge lookups and position tables.
pub const INVALID: u32 = u32::MAX;

/// A texture coordinate together with the UV index it was read from.
#[derive(Clone, Copy, Debug)]
pub struct UvPoint {
    pub u: Real,
    pub v: Real,
    /// Host UV index; this is what overlap results report.
    pub index: u32,
    pub shell: u32,
}

impl UvPoint {
    pub fn new(u: Real, v: Real, index: u32, shell: u32) -> Self {
        UvPoint { u, v, index, shell }
    }

    #[inline]
    pub fn coords(&self) -> [Real; 2] {
        [self.u, self.v]
    }

    /// Sweep order: v first, then u.
    #[inline]
    pub fn sweep_cmp(&self, other: &UvPoint) -> Ordering {
        uv_cmp(self.coords(), other.coords())
    }

    pub fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }
}

/// Identity of an undirected UV edge: its two UV indices, smaller first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub lo: u32,
    pub hi: u32,
}

impl EdgeKey {
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            EdgeKey { lo: a, hi: b }
        } else {
            EdgeKey { lo: b, hi: a }
        }
    }
}

/// A UV edge with `begin <= end` in sweep order.
#[derive(Clone, Copy, Debug)]
pub struct UvEdge {
    pub begin: UvPoint,
    pub end: UvPoint,
    pub key: EdgeKey,
}

impl UvEdge {
    pub fn new(p1: UvPoint, p2: UvPoint) -> Self {
        let key = EdgeKey::new(p1.index, p2.index);
        let (begin, end) = if p1.sweep_cmp(&p2) == Ordering::Greater {
            (p2, p1)
        } else {
            (p1, p2)
        };
        UvEdge { begin, end, key }
    }

    /// Both UV indices, begin first.
    #[inline]
    pub fn indices(&self) -> [u32; 2] {
        [self.begin.index, self.end.index]
    }

    pub fn is_finite(&self) -> bool {
        self.begin.is_finite() && self.end.is_finite()
    }

    /// The edge's u where the sweep line at `v` crosses it.
    #[inline]
    pub fn sweep_u(&self, v: Real) -> Real {
        eval_u_at_v(self.begin.coords(), self.end.coords(), v)
    }

    /// du/dv; horizontal edges are +inf so they order after every edge
    /// leaving the same point.
    pub fn slope(&self) -> Real {
        let dv = self.end.v - self.begin.v;
        if dv == 0.0 {
            Real::INFINITY
        } else {
            (self.end.u - self.begin.u) / dv
        }
    }

    pub fn intersect(&self, other: &UvEdge, tol: Real) -> Option<Intersection> {
        segment_intersect(
            self.begin.coords(),
            self.end.coords(),
            other.begin.coords(),
            other.end.coords(),
            tol,
        )
    }
}

/// Edges are the same edge when their keys match; geometry is not compared.
impl PartialEq for UvEdge {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for UvEdge {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_key_is_symmetric() {
        assert_eq!(EdgeKey::new(25, 1), EdgeKey::new(1, 25));
        assert_eq!(EdgeKey::new(7, 3), EdgeKey { lo: 3, hi: 7 });
    }

    #[test]
    fn edge_key_has_no_digit_collisions() {
        // "1" + "1" + "25" == "1" + "12" + "5" under string concatenation.
        assert_ne!(EdgeKey::new(1, 25), EdgeKey::new(12, 5));
    }

    #[test]
    fn edge_is_canonicalised_in_sweep_order() {
        let a = UvPoint::new(0.0, 1.0, 4, 0);
        let b = UvPoint::new(1.0, 0.0, 9, 0);
        let e = UvEdge::new(a, b);
        assert_eq!(e.begin.index, 9);
        assert_eq!(e.end.index, 4);
        assert_eq!(e, UvEdge::new(b, a));
    }

    #[test]
    fn horizontal_edge_begins_at_smaller_u() {
        let e = UvEdge::new(UvPoint::new(3.0, 0.5, 1, 0), UvPoint::new(1.0, 0.5, 2, 0));
        assert_eq!(e.begin.index, 2);
        assert_eq!(e.slope(), Real::INFINITY);
        assert_eq!(e.sweep_u(0.5), 1.0);
    }

    #[test]
    fn sweep_u_interpolates() {
        let e = UvEdge::new(UvPoint::new(0.0, 0.0, 0, 0), UvPoint::new(1.0, 2.0, 1, 0));
        assert!((e.sweep_u(1.0) - 0.5).abs() < 1e-12);
        assert!((e.slope() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn non_finite_points_are_detected() {
        let e = UvEdge::new(UvPoint::new(Real::NAN, 0.0, 0, 0), UvPoint::new(1.0, 1.0, 1, 0));
        assert!(!e.is_finite());
    }
}

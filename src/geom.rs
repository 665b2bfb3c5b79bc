// Copyright 2025 Lars Brubaker
// License: MIT
//
// Pure geometric functions operating on (u, v) texture coordinates.
//
// The sweep line moves along v, so every ordering predicate in this module is
// v-major with u as the secondary key. Coordinates are passed as `[u, v]`.

use std::cmp::Ordering;

pub type Real = f64;

/// Default coincidence tolerance, in UV units.
pub const DEFAULT_TOLERANCE: Real = 1e-6;

/// Returns true if a <= b in sweep order (v first, then u).
#[inline]
pub fn uv_leq(a: [Real; 2], b: [Real; 2]) -> bool {
    a[1] < b[1] || (a[1] == b[1] && a[0] <= b[0])
}

/// Total sweep order (v first, then u). NaN sorts after every finite value.
#[inline]
pub fn uv_cmp(a: [Real; 2], b: [Real; 2]) -> Ordering {
    a[1].total_cmp(&b[1]).then(a[0].total_cmp(&b[0]))
}

#[inline]
pub fn cross(a: [Real; 2], b: [Real; 2]) -> Real {
    a[0] * b[1] - a[1] * b[0]
}

#[inline]
pub fn dot(a: [Real; 2], b: [Real; 2]) -> Real {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
fn sub(a: [Real; 2], b: [Real; 2]) -> [Real; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

#[inline]
fn length(a: [Real; 2]) -> Real {
    a[0].hypot(a[1])
}

/// Evaluates the u coordinate of segment (o, d) at height `v`.
///
/// `v` is clamped to the segment's span. A horizontal segment returns `o`'s u.
/// Interpolation starts from the nearer endpoint so the result stays between
/// the two endpoint u values.
pub fn eval_u_at_v(o: [Real; 2], d: [Real; 2], v: Real) -> Real {
    let span = d[1] - o[1];
    if span == 0.0 {
        return o[0];
    }
    let t = ((v - o[1]) / span).clamp(0.0, 1.0);
    if t <= 0.5 {
        o[0] + (d[0] - o[0]) * t
    } else {
        d[0] + (o[0] - d[0]) * (1.0 - t)
    }
}

/// Result of a positive segment/segment test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub u: Real,
    pub v: Real,
    /// The segments are collinear and share more than a single point.
    /// `u`, `v` is then the midpoint of the shared interval.
    pub parallel: bool,
}

/// Tests segments (a0, a1) and (b0, b1) for a transversal crossing or a
/// collinear overlap.
///
/// Endpoint policy, with every distance measured in UV units against `tol`:
/// - a contact where an endpoint of one segment meets an endpoint of the other
///   is not reported (adjacent mesh edges share vertices);
/// - an endpoint lying strictly inside the other segment is reported;
/// - collinear segments are reported only when the shared interval is longer
///   than `tol`;
/// - segments shorter than `tol` are never reported.
pub fn segment_intersect(
    a0: [Real; 2],
    a1: [Real; 2],
    b0: [Real; 2],
    b1: [Real; 2],
    tol: Real,
) -> Option<Intersection> {
    let r = sub(a1, a0);
    let s = sub(b1, b0);
    let len_r = length(r);
    let len_s = length(s);
    if len_r <= tol || len_s <= tol {
        return None;
    }

    let qp = sub(b0, a0);
    let denom = cross(r, s);

    if denom.abs() <= tol * len_r * len_s {
        // Nearly parallel: collinear if both ends of b sit on a's line.
        let d0 = cross(qp, r).abs() / len_r;
        let d1 = cross(sub(b1, a0), r).abs() / len_r;
        if d0 <= tol && d1 <= tol {
            return collinear_overlap(a0, r, len_r, qp, s, tol);
        }
        if denom == 0.0 {
            return None;
        }
    }

    let t = cross(qp, s) / denom;
    let w = cross(qp, r) / denom;
    let ta = tol / len_r;
    let tb = tol / len_s;
    if t < -ta || t > 1.0 + ta || w < -tb || w > 1.0 + tb {
        return None;
    }

    let a_at_end = t <= ta || t >= 1.0 - ta;
    let b_at_end = w <= tb || w >= 1.0 - tb;
    if a_at_end && b_at_end {
        return None;
    }

    Some(Intersection {
        u: a0[0] + r[0] * t,
        v: a0[1] + r[1] * t,
        parallel: false,
    })
}

fn collinear_overlap(
    a0: [Real; 2],
    r: [Real; 2],
    len_r: Real,
    qp: [Real; 2],
    s: [Real; 2],
    tol: Real,
) -> Option<Intersection> {
    let rr = len_r * len_r;
    let t0 = dot(qp, r) / rr;
    let t1 = t0 + dot(s, r) / rr;
    let lo = t0.min(t1).max(0.0);
    let hi = t0.max(t1).min(1.0);
    if (hi - lo) * len_r <= tol {
        return None;
    }
    let mid = 0.5 * (lo + hi);
    Some(Intersection {
        u: a0[0] + r[0] * mid,
        v: a0[1] + r[1] * mid,
        parallel: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Real = DEFAULT_TOLERANCE;

    #[test]
    fn uv_leq_is_v_major() {
        assert!(uv_leq([5.0, 0.0], [0.0, 1.0]));
        assert!(uv_leq([0.0, 1.0], [1.0, 1.0]));
        assert!(uv_leq([1.0, 1.0], [1.0, 1.0]));
        assert!(!uv_leq([0.0, 2.0], [9.0, 1.0]));
    }

    #[test]
    fn uv_cmp_matches_uv_leq() {
        assert_eq!(uv_cmp([5.0, 0.0], [0.0, 1.0]), Ordering::Less);
        assert_eq!(uv_cmp([1.0, 1.0], [0.0, 1.0]), Ordering::Greater);
        assert_eq!(uv_cmp([1.0, 1.0], [1.0, 1.0]), Ordering::Equal);
    }

    #[test]
    fn eval_u_midpoint() {
        let u = eval_u_at_v([0.0, 0.0], [2.0, 2.0], 1.0);
        assert!((u - 1.0).abs() < 1e-12, "got {}", u);
    }

    #[test]
    fn eval_u_clamps_outside_span() {
        assert_eq!(eval_u_at_v([0.0, 0.0], [2.0, 2.0], -1.0), 0.0);
        assert_eq!(eval_u_at_v([0.0, 0.0], [2.0, 2.0], 5.0), 2.0);
    }

    #[test]
    fn eval_u_horizontal_returns_origin() {
        assert_eq!(eval_u_at_v([0.25, 1.0], [3.0, 1.0], 1.0), 0.25);
    }

    #[test]
    fn crossing_diagonals() {
        let hit = segment_intersect([0.0, 0.0], [1.0, 1.0], [0.0, 1.0], [1.0, 0.0], TOL)
            .expect("diagonals cross");
        assert!(!hit.parallel);
        assert!((hit.u - 0.5).abs() < 1e-12);
        assert!((hit.v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn shared_endpoint_is_not_an_overlap() {
        // Two sides of a quad meeting at a corner.
        assert!(segment_intersect([0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [1.0, 1.0], TOL).is_none());
    }

    #[test]
    fn coincident_corners_within_tolerance_are_ignored() {
        let eps = TOL * 0.1;
        assert!(
            segment_intersect([0.0, 0.0], [1.0, 0.0], [1.0 + eps, 0.0], [2.0, 1.0], TOL).is_none()
        );
    }

    #[test]
    fn t_junction_is_an_overlap() {
        let hit = segment_intersect([0.0, 0.0], [2.0, 0.0], [1.0, 0.0], [1.0, 1.0], TOL)
            .expect("endpoint inside the other segment");
        assert!(!hit.parallel);
        assert!((hit.u - 1.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_overlap_is_parallel() {
        let hit = segment_intersect([0.0, 0.0], [2.0, 0.0], [1.0, 0.0], [3.0, 0.0], TOL)
            .expect("collinear segments overlap on [1, 2]");
        assert!(hit.parallel);
        assert!((hit.u - 1.5).abs() < 1e-12);
    }

    #[test]
    fn collinear_touching_end_to_end_is_ignored() {
        assert!(segment_intersect([0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [2.0, 0.0], TOL).is_none());
    }

    #[test]
    fn parallel_offset_segments_do_not_intersect() {
        assert!(segment_intersect([0.0, 0.0], [1.0, 0.0], [0.0, 0.5], [1.0, 0.5], TOL).is_none());
    }

    #[test]
    fn disjoint_segments_do_not_intersect() {
        assert!(segment_intersect([0.0, 0.0], [1.0, 1.0], [2.0, 0.0], [3.0, -1.0], TOL).is_none());
    }

    #[test]
    fn degenerate_segment_is_ignored() {
        assert!(segment_intersect([0.5, 0.5], [0.5, 0.5], [0.0, 0.0], [1.0, 1.0], TOL).is_none());
    }
}

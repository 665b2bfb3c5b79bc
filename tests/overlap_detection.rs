// Copyright 2025 Lars Brubaker
// End-to-end overlap detection on small hand-built layouts.

mod helpers;

use helpers::{bowtie, grid, square};
use uv_overlap::geom::segment_intersect;
use uv_overlap::mesh::{UvEdge, UvPoint};
use uv_overlap::pairing::pair_shells;
use uv_overlap::shell::build_shells;
use uv_overlap::sweep::find_overlaps;
use uv_overlap::{
    find_uv_overlaps, CheckError, CheckOptions, OverlapChecker, OverlapSet, Real, ShellMerge,
    UvLayout, DEFAULT_TOLERANCE,
};

fn edge(a: (Real, Real, u32), b: (Real, Real, u32)) -> UvEdge {
    UvEdge::new(UvPoint::new(a.0, a.1, a.2, 0), UvPoint::new(b.0, b.1, b.2, 0))
}

fn sweep(edges: &[UvEdge]) -> OverlapSet {
    let mut results = OverlapSet::new();
    find_overlaps(edges, DEFAULT_TOLERANCE, &mut results).expect("sweep failed");
    results
}

fn set(indices: &[u32]) -> OverlapSet {
    indices.iter().copied().collect()
}

#[test]
fn lone_edge_has_nothing_to_overlap() {
    assert!(sweep(&[edge((0.0, 0.0, 0), (1.0, 1.0, 1))]).is_empty());

    // A two-corner face collapses to a single edge.
    let mut layout = UvLayout::new(1);
    let a = layout.add_uv(0.0, 0.0, 0);
    let b = layout.add_uv(1.0, 1.0, 0);
    layout.add_mapped_face(&[a, b]);
    assert!(find_uv_overlaps(&layout).unwrap().is_clean());
}

#[test]
fn crossing_diagonals_report_all_four_endpoints() {
    let x = edge((0.0, 0.0, 0), (1.0, 1.0, 1));
    let y = edge((0.0, 1.0, 2), (1.0, 0.0, 3));
    assert_eq!(sweep(&[x, y]), set(&[0, 1, 2, 3]));
}

#[test]
fn simple_quad_is_clean() {
    let mut layout = UvLayout::new(1);
    square(&mut layout, 0.0, 0.0, 1.0, 0);
    assert!(find_uv_overlaps(&layout).unwrap().is_clean());
}

#[test]
fn collinear_overlap_is_reported_without_a_crossing_event() {
    let a = edge((0.0, 0.0, 0), (2.0, 0.0, 1));
    let b = edge((1.0, 0.0, 2), (3.0, 0.0, 3));
    let hit = segment_intersect(
        a.begin.coords(),
        a.end.coords(),
        b.begin.coords(),
        b.end.coords(),
        DEFAULT_TOLERANCE,
    )
    .expect("collinear segments overlap");
    assert!(hit.parallel);

    let mut results = OverlapSet::new();
    let stats = find_overlaps(&[a, b], DEFAULT_TOLERANCE, &mut results).unwrap();
    assert_eq!(results, set(&[0, 1, 2, 3]));
    assert_eq!(stats.intersect_events, 0);
}

#[test]
fn disjoint_shells_are_never_merged() {
    let mut layout = UvLayout::new(2);
    bowtie(&mut layout, 0.0, 0.0, 0);
    bowtie(&mut layout, 3.0, 0.0, 1);
    let build = build_shells(&layout).unwrap();
    let sets = pair_shells(&build.shells, ShellMerge::Pairwise);
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].shells, vec![0]);
    assert_eq!(sets[1].shells, vec![1]);

    // Each bowtie only reports itself.
    let report = find_uv_overlaps(&layout).unwrap();
    assert_eq!(report.overlapping, set(&[0, 1, 2, 3, 4, 5, 6, 7]));
    assert_eq!(report.edge_set_count, 2);
}

#[test]
fn half_overlapping_squares_are_merged() {
    let mut layout = UvLayout::new(2);
    square(&mut layout, 0.0, 0.0, 1.0, 0);
    square(&mut layout, 0.5, 0.0, 1.0, 1);
    let build = build_shells(&layout).unwrap();
    let sets = pair_shells(&build.shells, ShellMerge::Pairwise);
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].shells, vec![0, 1]);
    assert_eq!(sets[0].edges.len(), 8);
}

#[test]
fn grid_is_clean() {
    let mut layout = UvLayout::new(1);
    grid(&mut layout, 0.0, 0.0, 8, 0.125, 0);
    let report = find_uv_overlaps(&layout).unwrap();
    assert!(report.is_clean(), "unexpected overlaps: {:?}", report.overlapping);
}

#[test]
fn offset_grids_overlap_each_other() {
    let mut layout = UvLayout::new(2);
    grid(&mut layout, 0.0, 0.0, 4, 1.0, 0);
    let second = grid(&mut layout, 0.5, 0.5, 4, 1.0, 1);
    let report = find_uv_overlaps(&layout).unwrap();
    assert_eq!(report.edge_set_count, 1);
    // Both grids are clean on their own, so every hit involves both.
    assert!(report.overlapping.iter().any(|&i| i < second));
    assert!(report.overlapping.iter().any(|&i| i >= second));
}

#[test]
fn repeated_checks_are_identical() {
    let mut layout = UvLayout::new(3);
    grid(&mut layout, 0.0, 0.0, 3, 1.0, 0);
    grid(&mut layout, 0.5, 0.5, 3, 1.0, 1);
    bowtie(&mut layout, 10.0, 10.0, 2);
    for merge in [ShellMerge::Pairwise, ShellMerge::Connected] {
        let checker = OverlapChecker::new(CheckOptions::default().with_merge(merge));
        let first = checker.check(&layout).unwrap();
        for _ in 0..3 {
            assert_eq!(checker.check(&layout).unwrap().overlapping, first.overlapping);
        }
    }
}

#[test]
fn empty_layout_is_an_error() {
    assert_eq!(
        find_uv_overlaps(&UvLayout::new(0)).unwrap_err(),
        CheckError::NoUvShells
    );
}

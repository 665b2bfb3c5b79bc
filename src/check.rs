// Copyright 2025 Lars Brubaker
// License: MIT
//
// The overlap check: builds shells from a UV layout, pairs them by bounding
// box, sweeps every edge set and gathers the overlapping UV indices.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{CheckError, CheckResult};
use crate::geom::{Real, DEFAULT_TOLERANCE};
use crate::pairing::{pair_shells, ShellMerge};
use crate::shell::{build_shells, UvLayout};
use crate::sweep::{find_overlaps, OverlapSet};

// ─────────────────────────────── Options ───────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CheckOptions {
    /// Endpoint and coincidence tolerance, in UV units.
    pub tolerance: Real,
    pub merge: ShellMerge,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            tolerance: DEFAULT_TOLERANCE,
            merge: ShellMerge::default(),
        }
    }
}

impl CheckOptions {
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_merge(mut self, merge: ShellMerge) -> Self {
        self.merge = merge;
        self
    }
}

// ─────────────────────────────── Report ────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct OverlapReport {
    /// UV indices belonging to at least one overlapping edge pair.
    pub overlapping: OverlapSet,
    /// Non-empty shells.
    pub shell_count: usize,
    pub edge_set_count: usize,
    /// Edge sets whose sweep was abandoned.
    pub failed_edge_sets: usize,
    pub empty_shells: Vec<u32>,
    pub unmapped_corners: usize,
    /// Shell building and pairing.
    pub init_time: Duration,
    /// Sweeping every edge set.
    pub check_time: Duration,
}

impl OverlapReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.overlapping.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.overlapping.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.overlapping.is_empty()
    }

    /// Overlapping UVs as component names: `"<object>.map[<index>]"`.
    pub fn component_paths(&self, object: &str) -> Vec<String> {
        self.overlapping
            .iter()
            .map(|i| format!("{object}.map[{i}]"))
            .collect()
    }
}

// ─────────────────────────────── Checker ───────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct OverlapChecker {
    options: CheckOptions,
}

impl OverlapChecker {
    pub fn new(options: CheckOptions) -> Self {
        OverlapChecker { options }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Find every UV whose edges overlap another edge of the same shell or of
    /// a shell whose bounds touch it.
    pub fn check(&self, layout: &UvLayout) -> CheckResult<OverlapReport> {
        let tolerance = self.options.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CheckError::InvalidTolerance { tolerance });
        }

        let start = Instant::now();
        let build = build_shells(layout)?;
        if build.shells.is_empty() {
            return Err(CheckError::NoUvShells);
        }
        let edge_sets = pair_shells(&build.shells, self.options.merge);
        let init_time = start.elapsed();
        info!(
            shells = build.shells.len(),
            edge_sets = edge_sets.len(),
            elapsed = ?init_time,
            "initialization done"
        );

        let start = Instant::now();
        let mut report = OverlapReport {
            shell_count: build.shells.len(),
            edge_set_count: edge_sets.len(),
            empty_shells: build.empty_shells,
            unmapped_corners: build.unmapped_corners,
            init_time,
            ..Default::default()
        };
        for set in &edge_sets {
            // A failed sweep may have recorded some hits before stopping;
            // those are kept.
            match find_overlaps(&set.edges, tolerance, &mut report.overlapping) {
                Ok(stats) => debug!(
                    shells = ?set.shells,
                    edges = set.edges.len(),
                    events = stats.events,
                    hits = stats.hits,
                    "edge set swept"
                ),
                Err(err) => {
                    warn!(shells = ?set.shells, %err, "edge set check failed");
                    report.failed_edge_sets += 1;
                }
            }
        }
        report.check_time = start.elapsed();
        info!(
            overlapping = report.overlapping.len(),
            failed_edge_sets = report.failed_edge_sets,
            elapsed = ?report.check_time,
            "check completed"
        );
        Ok(report)
    }
}

/// Check `layout` with default options.
pub fn find_uv_overlaps(layout: &UvLayout) -> CheckResult<OverlapReport> {
    OverlapChecker::default().check(layout)
}

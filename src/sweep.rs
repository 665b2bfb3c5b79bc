// Copyright 2025 Lars Brubaker
// License: MIT
//
// The sweep line algorithm for finding overlapping UV edges.
//
// A Bentley-Ottmann style plane sweep along v. Every edge contributes a Begin
// and an End event; the status holds the edges crossing the sweep line,
// ordered by u. Edges are only ever tested against their neighbours in the
// status, and every crossing found schedules an Intersect event that re-tests
// the edges which become adjacent once the pair swaps.
//
// The status is only re-sorted at Begin events, and each edge pair schedules
// at most one Intersect event. With several crossings between two Begin
// events the neighbour tests can run against a stale order, so some crossings
// go unreported. Every reported pair does overlap: the sweep may miss
// overlaps but never invents one.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use tracing::{trace, warn};

use crate::error::SweepError;
use crate::geom::{uv_cmp, Real};
use crate::mesh::{EdgeIdx, UvEdge};
use crate::priorityq::PriorityQ;
use crate::status::Status;

/// UV indices that are endpoints of an overlapping edge pair.
pub type OverlapSet = BTreeSet<u32>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind {
    Begin(EdgeIdx),
    End(EdgeIdx),
    Intersect(EdgeIdx, EdgeIdx),
}

#[derive(Clone, Copy, Debug)]
pub struct Event {
    pub kind: EventKind,
    pub u: Real,
    pub v: Real,
    /// Creation order; breaks ties between events at the same position.
    pub seq: u32,
}

impl Event {
    #[inline]
    pub fn coords(&self) -> [Real; 2] {
        [self.u, self.v]
    }
}

/// Processing order: v, then u, then creation sequence.
pub fn event_cmp(a: &Event, b: &Event) -> Ordering {
    uv_cmp(a.coords(), b.coords()).then(a.seq.cmp(&b.seq))
}

pub fn event_leq(a: &Event, b: &Event) -> bool {
    event_cmp(a, b) != Ordering::Greater
}

/// Counters for one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Events processed, Intersect events included.
    pub events: usize,
    /// Edge pairs found to intersect or overlap.
    pub hits: usize,
    pub intersect_events: usize,
    /// End events whose edge was not in the status.
    pub missing_edges: usize,
}

pub struct Sweep<'a> {
    edges: &'a [UvEdge],
    tolerance: Real,
    queue: PriorityQ<Event>,
    status: Status,
    /// Unordered edge pairs that already have an Intersect event.
    scheduled: HashSet<(EdgeIdx, EdgeIdx)>,
    next_seq: u32,
    stats: SweepStats,
}

impl<'a> Sweep<'a> {
    pub fn new(edges: &'a [UvEdge], tolerance: Real) -> Result<Self, SweepError> {
        let mut queue = PriorityQ::new(edges.len() * 2, event_leq);
        let mut next_seq = 0u32;
        for (i, edge) in edges.iter().enumerate() {
            if let Some(p) = [edge.begin, edge.end].iter().find(|p| !p.is_finite()) {
                return Err(SweepError::NonFiniteCoordinate { point: p.index });
            }
            let e = i as EdgeIdx;
            queue.insert(Event {
                kind: EventKind::Begin(e),
                u: edge.begin.u,
                v: edge.begin.v,
                seq: next_seq,
            });
            queue.insert(Event {
                kind: EventKind::End(e),
                u: edge.end.u,
                v: edge.end.v,
                seq: next_seq + 1,
            });
            next_seq += 2;
        }
        queue.init();

        Ok(Sweep {
            edges,
            tolerance,
            queue,
            status: Status::new(edges.len()),
            scheduled: HashSet::new(),
            next_seq,
            stats: SweepStats::default(),
        })
    }

    /// Process every event, adding the endpoints of each overlapping pair to
    /// `results`.
    pub fn run(mut self, results: &mut OverlapSet) -> Result<SweepStats, SweepError> {
        while let Some(event) = self.queue.extract_min() {
            self.stats.events += 1;
            match event.kind {
                EventKind::Begin(e) => self.do_begin(e, event.v, results)?,
                EventKind::End(e) => self.do_end(e, results)?,
                EventKind::Intersect(a, b) => self.do_cross(a, b, results)?,
            }
        }
        Ok(self.stats)
    }

    #[inline]
    fn edge(&self, e: EdgeIdx) -> Result<&'a UvEdge, SweepError> {
        let edges: &'a [UvEdge] = self.edges;
        edges
            .get(e as usize)
            .ok_or(SweepError::UnknownEdge { edge: e })
    }

    fn do_begin(&mut self, e: EdgeIdx, v: Real, results: &mut OverlapSet) -> Result<(), SweepError> {
        self.edge(e)?;
        self.status.push(e);
        if self.status.len() == 1 {
            return Ok(());
        }

        self.status.advance(self.edges, v);
        trace!(
            edge = e,
            v,
            status = ?self.status.iter().collect::<Vec<_>>(),
            "status re-sorted"
        );

        let Some(slot) = self.status.position(e) else {
            return Ok(());
        };
        if let Some(next) = self.status.key(slot + 1) {
            self.check_edges_and_create_event(e, next, results)?;
        }
        if slot > 0 {
            if let Some(prev) = self.status.key(slot - 1) {
                self.check_edges_and_create_event(e, prev, results)?;
            }
        }
        Ok(())
    }

    fn do_end(&mut self, e: EdgeIdx, results: &mut OverlapSet) -> Result<(), SweepError> {
        self.edge(e)?;
        let Some(slot) = self.status.position(e) else {
            warn!(edge = e, "ending edge is missing from the sweep status");
            self.stats.missing_edges += 1;
            return Ok(());
        };

        // The neighbours on either side become adjacent once `e` is gone.
        let len = self.status.len();
        if len > 2 && slot > 0 && slot < len - 1 {
            if let (Some(prev), Some(next)) = (self.status.key(slot - 1), self.status.key(slot + 1)) {
                self.check_edges_and_create_event(prev, next, results)?;
            }
        }

        self.status.remove(e);
        Ok(())
    }

    /// Two edges cross here. Their order flips past this point, so the edges
    /// just outside the pair are tested against the pair member that will
    /// face them. The status itself is left alone; the next Begin re-sorts.
    fn do_cross(&mut self, a: EdgeIdx, b: EdgeIdx, results: &mut OverlapSet) -> Result<(), SweepError> {
        self.edge(a)?;
        self.edge(b)?;
        let len = self.status.len();
        if len <= 2 {
            return Ok(());
        }
        let (Some(pa), Some(pb)) = (self.status.position(a), self.status.position(b)) else {
            trace!(a, b, "crossing pair no longer active");
            return Ok(());
        };
        let (small, big) = if pa < pb { (pa, pb) } else { (pb, pa) };

        if small == 0 {
            self.check_slots(small, big + 1, results)?;
        } else if big == len - 1 {
            self.check_slots(small - 1, big, results)?;
        } else {
            self.check_slots(small - 1, big, results)?;
            self.check_slots(small, big + 1, results)?;
        }
        Ok(())
    }

    fn check_slots(&mut self, a: usize, b: usize, results: &mut OverlapSet) -> Result<(), SweepError> {
        match (self.status.key(a), self.status.key(b)) {
            (Some(ea), Some(eb)) => self.check_edges_and_create_event(ea, eb, results),
            _ => Ok(()),
        }
    }

    /// The only place overlaps are recorded. A transversal crossing also
    /// schedules an Intersect event, once per edge pair.
    fn check_edges_and_create_event(
        &mut self,
        a: EdgeIdx,
        b: EdgeIdx,
        results: &mut OverlapSet,
    ) -> Result<(), SweepError> {
        if a == b {
            return Ok(());
        }
        let (ea, eb) = (self.edge(a)?, self.edge(b)?);
        let Some(hit) = ea.intersect(eb, self.tolerance) else {
            return Ok(());
        };

        self.stats.hits += 1;
        results.extend(ea.indices());
        results.extend(eb.indices());
        if hit.parallel {
            return Ok(());
        }

        let pair = if a < b { (a, b) } else { (b, a) };
        if !self.scheduled.insert(pair) {
            return Ok(());
        }
        trace!(
            a,
            b,
            u = hit.u,
            v = hit.v,
            a_u = self.status.sweep_u(a),
            b_u = self.status.sweep_u(b),
            "scheduling crossing"
        );
        self.queue.insert(Event {
            kind: EventKind::Intersect(a, b),
            u: hit.u,
            v: hit.v,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.stats.intersect_events += 1;
        Ok(())
    }
}

/// Run the sweep over one edge set.
pub fn find_overlaps(
    edges: &[UvEdge],
    tolerance: Real,
    results: &mut OverlapSet,
) -> Result<SweepStats, SweepError> {
    Sweep::new(edges, tolerance)?.run(results)
}

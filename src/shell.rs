// Copyright 2025 Lars Brubaker
// License: MIT
//
// UV shells: the host's UV layout grouped into per-shell edge sets with
// bounding boxes.
//
// Shell membership is an input. The host labels every UV with a shell id
// (usually the connected component of the UV layout) and this module only
// groups by that label.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{CheckError, CheckResult};
use crate::geom::Real;
use crate::mesh::{EdgeKey, UvEdge, UvPoint};

/// A mesh's UV layout as supplied by the host.
///
/// Faces are stored flat: `corners[face_starts[f]..face_starts[f + 1]]` are
/// the UV indices of face `f` in winding order, `None` where a corner has no
/// UV mapped.
#[derive(Clone, Debug, Default)]
pub struct UvLayout {
    uvs: Vec<[Real; 2]>,
    shell_ids: Vec<u32>,
    shell_count: u32,
    corners: Vec<Option<u32>>,
    face_starts: Vec<usize>,
}

impl UvLayout {
    pub fn new(shell_count: u32) -> Self {
        UvLayout {
            shell_count,
            face_starts: vec![0],
            ..Default::default()
        }
    }

    /// Build from parallel coordinate and shell id arrays.
    pub fn from_parts(
        uvs: Vec<[Real; 2]>,
        shell_ids: Vec<u32>,
        shell_count: u32,
    ) -> CheckResult<Self> {
        if uvs.len() != shell_ids.len() {
            return Err(CheckError::LengthMismatch {
                uvs: uvs.len(),
                shell_ids: shell_ids.len(),
            });
        }
        Ok(UvLayout {
            uvs,
            shell_ids,
            shell_count,
            corners: Vec::new(),
            face_starts: vec![0],
        })
    }

    /// Add a UV, returning its index.
    pub fn add_uv(&mut self, u: Real, v: Real, shell: u32) -> u32 {
        self.uvs.push([u, v]);
        self.shell_ids.push(shell);
        (self.uvs.len() - 1) as u32
    }

    /// Add a face by its corner UV indices, in winding order.
    pub fn add_face(&mut self, corners: &[Option<u32>]) {
        if self.face_starts.is_empty() {
            self.face_starts.push(0);
        }
        self.corners.extend_from_slice(corners);
        self.face_starts.push(self.corners.len());
    }

    /// Add a face whose corners are all mapped.
    pub fn add_mapped_face(&mut self, corners: &[u32]) {
        let mapped: Vec<Option<u32>> = corners.iter().copied().map(Some).collect();
        self.add_face(&mapped);
    }

    #[inline]
    pub fn uv_count(&self) -> usize {
        self.uvs.len()
    }

    #[inline]
    pub fn shell_count(&self) -> u32 {
        self.shell_count
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_starts.len().saturating_sub(1)
    }

    pub fn uv(&self, index: u32) -> Option<[Real; 2]> {
        self.uvs.get(index as usize).copied()
    }

    pub fn shell_id(&self, index: u32) -> Option<u32> {
        self.shell_ids.get(index as usize).copied()
    }

    pub fn face(&self, face: usize) -> &[Option<u32>] {
        match (self.face_starts.get(face), self.face_starts.get(face + 1)) {
            (Some(&start), Some(&end)) => &self.corners[start..end],
            _ => &[],
        }
    }
}

/// Axis-aligned UV bounds, closed on every side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub u_min: Real,
    pub u_max: Real,
    pub v_min: Real,
    pub v_max: Real,
}

impl BoundingBox {
    pub fn from_point(u: Real, v: Real) -> Self {
        BoundingBox {
            u_min: u,
            u_max: u,
            v_min: v,
            v_max: v,
        }
    }

    pub fn include(&mut self, u: Real, v: Real) {
        self.u_min = self.u_min.min(u);
        self.u_max = self.u_max.max(u);
        self.v_min = self.v_min.min(v);
        self.v_max = self.v_max.max(v);
    }

    /// True unless the boxes are strictly apart on u or on v. Boxes that
    /// touch along an edge or at a corner overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.u_max < other.u_min
            || self.u_min > other.u_max
            || self.v_max < other.v_min
            || self.v_min > other.v_max)
    }
}

/// One UV shell's edges, deduplicated by key, and its bounds.
#[derive(Clone, Debug)]
pub struct UvShell {
    pub index: u32,
    pub edges: BTreeMap<EdgeKey, UvEdge>,
    pub bbox: BoundingBox,
    pub point_count: usize,
}

/// Output of `build_shells`.
#[derive(Clone, Debug, Default)]
pub struct ShellBuild {
    /// Shells with at least one UV, ordered by shell index.
    pub shells: Vec<UvShell>,
    /// Shell ids that had no UVs.
    pub empty_shells: Vec<u32>,
    /// Face corners without a mapped UV.
    pub unmapped_corners: usize,
}

/// Group the layout's UVs and face edges into shells.
///
/// Fails only on malformed input: no shells at all, a shell id past
/// `shell_count`, or a face corner past the UV array. Unmapped corners and
/// empty shells are skipped with a warning.
pub fn build_shells(layout: &UvLayout) -> CheckResult<ShellBuild> {
    let shell_count = layout.shell_count();
    if shell_count == 0 {
        return Err(CheckError::NoUvShells);
    }

    let mut bounds: Vec<Option<BoundingBox>> = vec![None; shell_count as usize];
    let mut counts = vec![0usize; shell_count as usize];
    for (i, (&[u, v], &shell)) in layout.uvs.iter().zip(&layout.shell_ids).enumerate() {
        let slot = bounds
            .get_mut(shell as usize)
            .ok_or(CheckError::ShellIdOutOfRange {
                uv: i as u32,
                shell,
                shell_count,
            })?;
        *slot = Some(match *slot {
            Some(mut bbox) => {
                bbox.include(u, v);
                bbox
            }
            None => BoundingBox::from_point(u, v),
        });
        counts[shell as usize] += 1;
    }

    let mut edge_maps: Vec<BTreeMap<EdgeKey, UvEdge>> = vec![BTreeMap::new(); shell_count as usize];
    let mut unmapped_corners = 0usize;
    for face in 0..layout.face_count() {
        let corners = layout.face(face);
        unmapped_corners += corners.iter().filter(|c| c.is_none()).count();
        let n = corners.len();
        for i in 0..n {
            let (Some(a), Some(b)) = (corners[i], corners[(i + 1) % n]) else {
                continue;
            };
            if a == b {
                continue;
            }
            let pa = point(layout, face, a)?;
            let pb = point(layout, face, b)?;
            if pa.shell != pb.shell {
                debug!(face, a, b, "edge spans two shells; using the first corner's shell");
            }
            let edge = UvEdge::new(pa, UvPoint { shell: pa.shell, ..pb });
            edge_maps[pa.shell as usize].entry(edge.key).or_insert(edge);
        }
    }
    if unmapped_corners > 0 {
        warn!(unmapped_corners, "faces with unmapped UVs were found");
    }

    let mut build = ShellBuild {
        unmapped_corners,
        ..Default::default()
    };
    for (index, (edges, bbox)) in edge_maps.into_iter().zip(bounds).enumerate() {
        let index = index as u32;
        let Some(bbox) = bbox else {
            warn!(shell = index, "UV shell has no UVs");
            build.empty_shells.push(index);
            continue;
        };
        debug!(shell = index, edges = edges.len(), ?bbox, "built UV shell");
        build.shells.push(UvShell {
            index,
            edges,
            bbox,
            point_count: counts[index as usize],
        });
    }
    Ok(build)
}

fn point(layout: &UvLayout, face: usize, uv: u32) -> CheckResult<UvPoint> {
    match (layout.uv(uv), layout.shell_id(uv)) {
        (Some([u, v]), Some(shell)) => Ok(UvPoint::new(u, v, uv, shell)),
        _ => Err(CheckError::UvIndexOutOfRange {
            face,
            uv,
            uv_count: layout.uv_count(),
        }),
    }
}

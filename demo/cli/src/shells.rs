// Copyright 2025 Lars Brubaker
// License: MIT
//
// UV shell labelling: UVs joined by a face edge belong to the same shell.

use tracing::debug;
use uv_overlap::UvLayout;

use crate::obj::ObjMesh;

/// Shell id of every UV, numbered in order of each shell's lowest UV index,
/// and the number of shells.
pub fn label_shells(mesh: &ObjMesh) -> (Vec<u32>, u32) {
    let mut parent: Vec<usize> = (0..mesh.uvs.len()).collect();
    for face in &mesh.faces {
        let n = face.len();
        for i in 0..n {
            if let (Some(a), Some(b)) = (face[i], face[(i + 1) % n]) {
                union(&mut parent, a as usize, b as usize);
            }
        }
    }

    let mut ids = vec![u32::MAX; mesh.uvs.len()];
    let mut count = 0u32;
    for uv in 0..mesh.uvs.len() {
        let root = find(&mut parent, uv);
        if ids[root] == u32::MAX {
            ids[root] = count;
            count += 1;
        }
        ids[uv] = ids[root];
    }
    (ids, count)
}

/// Convert an OBJ mesh into a labelled UV layout.
pub fn to_layout(mesh: &ObjMesh) -> UvLayout {
    let (ids, count) = label_shells(mesh);
    debug!(uvs = mesh.uvs.len(), shells = count, "labelled UV shells");
    let mut layout = UvLayout::new(count);
    for (&[u, v], &shell) in mesh.uvs.iter().zip(&ids) {
        layout.add_uv(u, v, shell);
    }
    for face in &mesh.faces {
        layout.add_face(face);
    }
    layout
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
        parent[ra.max(rb)] = ra.min(rb);
    }
}

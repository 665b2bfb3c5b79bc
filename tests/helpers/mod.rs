// Copyright 2025 Lars Brubaker
// Shared layout builders for uv-overlap tests.

#![allow(dead_code)]

use uv_overlap::{Real, UvLayout};

/// Add a four-corner face with the given UVs, returning their indices.
pub fn quad(layout: &mut UvLayout, corners: [(Real, Real); 4], shell: u32) -> [u32; 4] {
    let ids = corners.map(|(u, v)| layout.add_uv(u, v, shell));
    layout.add_mapped_face(&ids);
    ids
}

/// Axis-aligned square of side `size` with its lower corner at `(u0, v0)`.
pub fn square(layout: &mut UvLayout, u0: Real, v0: Real, size: Real, shell: u32) -> [u32; 4] {
    quad(
        layout,
        [(u0, v0), (u0 + size, v0), (u0 + size, v0 + size), (u0, v0 + size)],
        shell,
    )
}

/// Unit square with corners 1 and 2 swapped, so its sides cross.
pub fn bowtie(layout: &mut UvLayout, u0: Real, v0: Real, shell: u32) -> [u32; 4] {
    quad(
        layout,
        [(u0, v0), (u0 + 1.0, v0), (u0, v0 + 1.0), (u0 + 1.0, v0 + 1.0)],
        shell,
    )
}

/// `n` x `n` grid of quads sharing their UVs, with cells of side `cell`.
/// Returns the first UV index of the grid.
pub fn grid(layout: &mut UvLayout, u0: Real, v0: Real, n: u32, cell: Real, shell: u32) -> u32 {
    let first = layout.uv_count() as u32;
    for j in 0..=n {
        for i in 0..=n {
            layout.add_uv(u0 + i as Real * cell, v0 + j as Real * cell, shell);
        }
    }
    let at = |i: u32, j: u32| first + j * (n + 1) + i;
    for j in 0..n {
        for i in 0..n {
            layout.add_mapped_face(&[at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]);
        }
    }
    first
}

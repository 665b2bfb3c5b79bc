// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error types. CheckError stops a whole check; SweepError stops one edge set
// and is reported alongside the results of the others.

use thiserror::Error;

use crate::geom::Real;
use crate::mesh::EdgeIdx;

pub type CheckResult<T> = Result<T, CheckError>;

#[derive(Debug, Error, PartialEq)]
pub enum CheckError {
    /// The layout has no UV shells at all.
    #[error("no UVs are found")]
    NoUvShells,

    #[error("UV {uv} is assigned to shell {shell}, but the layout has {shell_count} shells")]
    ShellIdOutOfRange {
        uv: u32,
        shell: u32,
        shell_count: u32,
    },

    #[error("face {face} references UV {uv}, but the layout has {uv_count} UVs")]
    UvIndexOutOfRange { face: usize, uv: u32, uv_count: usize },

    #[error("{uvs} UV coordinates but {shell_ids} shell ids")]
    LengthMismatch { uvs: usize, shell_ids: usize },

    /// Tolerance must be finite and not negative.
    #[error("invalid tolerance {tolerance}")]
    InvalidTolerance { tolerance: Real },
}

/// Failure of a single edge set's sweep.
#[derive(Debug, Error, PartialEq)]
pub enum SweepError {
    #[error("UV {point} has a non-finite coordinate")]
    NonFiniteCoordinate { point: u32 },

    /// An event referenced an edge outside the edge set.
    #[error("event references unknown edge {edge}")]
    UnknownEdge { edge: EdgeIdx },
}

// uv-overlap: sweep-line detection of overlapping UV edges
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod check;
pub mod error;
pub mod geom;
pub mod mesh;
pub mod pairing;
pub mod priorityq;
pub mod shell;
pub mod status;
pub mod sweep;

pub use check::{find_uv_overlaps, CheckOptions, OverlapChecker, OverlapReport};
pub use error::{CheckError, CheckResult, SweepError};
pub use geom::{Real, DEFAULT_TOLERANCE};
pub use pairing::ShellMerge;
pub use shell::UvLayout;
pub use sweep::OverlapSet;

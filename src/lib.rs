//! Greedy rectangle cover of binarized video frames.
//!
//! Frames are thresholded into [`decompose::BinaryMask`]s, each mask is
//! covered with disjoint boxes by a [`decompose::Decomposer`], the
//! [`orchestrate::Orchestrator`] runs that over a whole frame sequence on
//! a worker pool, and [`output`] serializes the result.

pub mod binarize;
pub mod capture;
pub mod decompose;
pub mod error;
pub mod orchestrate;
pub mod output;

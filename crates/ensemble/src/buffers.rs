//! Half buffers and the two-stage reduction.

use ndarray::{Array3, ArrayView1, ArrayView2, Axis};
use tracing::warn;

use floodprep_stats::Reduction;

use crate::constants::{CONTROL_MEMBER, SECOND_HALF_LEN};
use crate::error::EnsembleError;
use crate::splice::{splice_control, spliced_len};

/// Which half buffers a member filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberFill {
    /// Ordinary member: first and second half.
    Both,
    /// Control member: first half only.
    FirstOnly,
    /// Shape did not match; nothing stored.
    Skipped,
}

/// Per-stream, per-member discharge, split at the first-half boundary.
///
/// Both halves are `[stream][member][time]`. A member's slot only takes part
/// in the statistics of a half it actually filled.
#[derive(Debug, Clone)]
pub struct EnsembleBuffers {
    first: Array3<f64>,
    second: Array3<f64>,
    first_filled: Vec<bool>,
    second_filled: Vec<bool>,
}

impl EnsembleBuffers {
    /// Allocate buffers for `n_streams` streams and `n_members` member slots.
    pub fn new(n_streams: usize, n_members: usize, first_half_len: usize) -> Self {
        Self {
            first: Array3::zeros((n_streams, n_members, first_half_len)),
            second: Array3::zeros((n_streams, n_members, SECOND_HALF_LEN)),
            first_filled: vec![false; n_members],
            second_filled: vec![false; n_members],
        }
    }

    /// Number of streams.
    pub fn n_streams(&self) -> usize {
        self.first.len_of(Axis(0))
    }

    /// Number of member slots.
    pub fn n_members(&self) -> usize {
        self.first.len_of(Axis(1))
    }

    /// Width of the first half.
    pub fn first_half_len(&self) -> usize {
        self.first.len_of(Axis(2))
    }

    /// Store one member's `[stream][time]` block in `slot`.
    ///
    /// Members below the control number are split at the first-half
    /// boundary and both halves must match their widths exactly. The control
    /// member is spliced and fills the first half only. Higher member
    /// numbers are ignored. Any mismatch skips the member with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`EnsembleError::SlotOutOfRange`] or
    /// [`EnsembleError::StreamCount`] if the block does not fit the buffers.
    pub fn add_member(
        &mut self,
        slot: usize,
        member: u32,
        qout: ArrayView2<'_, f64>,
    ) -> Result<MemberFill, EnsembleError> {
        if slot >= self.n_members() {
            return Err(EnsembleError::SlotOutOfRange {
                slot,
                n_members: self.n_members(),
            });
        }
        if qout.nrows() != self.n_streams() {
            return Err(EnsembleError::StreamCount {
                member,
                expected: self.n_streams(),
                got: qout.nrows(),
            });
        }

        let first_len = self.first_half_len();
        let size_time = qout.ncols();

        if member > CONTROL_MEMBER {
            warn!(member, "ignoring ensemble member above the control member");
            return Ok(MemberFill::Skipped);
        }

        if member == CONTROL_MEMBER {
            let width = spliced_len(first_len, size_time);
            if width != first_len {
                warn!(
                    member,
                    size_time,
                    spliced_len = width,
                    expected = first_len,
                    "control member does not align with the first half, skipping"
                );
                return Ok(MemberFill::Skipped);
            }
            for (s, series) in qout.outer_iter().enumerate() {
                let spliced = splice_control(first_len, &series.to_vec());
                self.first
                    .slice_mut(ndarray::s![s, slot, ..])
                    .assign(&ArrayView1::from(&spliced[..]));
            }
            self.first_filled[slot] = true;
            return Ok(MemberFill::FirstOnly);
        }

        if size_time != first_len + SECOND_HALF_LEN {
            warn!(
                member,
                size_time,
                expected = first_len + SECOND_HALF_LEN,
                "ensemble member length does not match the half buffers, skipping"
            );
            return Ok(MemberFill::Skipped);
        }
        self.first
            .slice_mut(ndarray::s![.., slot, ..])
            .assign(&qout.slice(ndarray::s![.., ..first_len]));
        self.second
            .slice_mut(ndarray::s![.., slot, ..])
            .assign(&qout.slice(ndarray::s![.., first_len..]));
        self.first_filled[slot] = true;
        self.second_filled[slot] = true;
        Ok(MemberFill::Both)
    }

    /// Number of member slots that filled the first and second half.
    pub fn filled_counts(&self) -> (usize, usize) {
        (
            self.first_filled.iter().filter(|f| **f).count(),
            self.second_filled.iter().filter(|f| **f).count(),
        )
    }

    /// Two-stage statistic for every stream.
    ///
    /// Each half is collapsed across its filled members with `method_x`,
    /// the halves are concatenated, and the series is reduced with
    /// `method_y`. A half no member filled contributes nothing.
    pub fn reduce(&self, method_x: Reduction, method_y: Reduction) -> Vec<f64> {
        (0..self.n_streams())
            .map(|s| {
                let mut series = collapse_members(
                    self.first.index_axis(Axis(0), s),
                    &self.first_filled,
                    method_x,
                );
                series.extend(collapse_members(
                    self.second.index_axis(Axis(0), s),
                    &self.second_filled,
                    method_x,
                ));
                method_y.apply(&series)
            })
            .collect()
    }
}

/// Collapse a `[member][time]` block across members for each time step.
///
/// Only rows with `filled[member]` set take part. With no filled rows the
/// result is empty.
pub fn collapse_members(
    block: ArrayView2<'_, f64>,
    filled: &[bool],
    method: Reduction,
) -> Vec<f64> {
    let rows: Vec<usize> = filled
        .iter()
        .enumerate()
        .filter_map(|(m, f)| f.then_some(m))
        .filter(|&m| m < block.nrows())
        .collect();
    if rows.is_empty() {
        return Vec::new();
    }
    let mut scratch = Vec::with_capacity(rows.len());
    block
        .axis_iter(Axis(1))
        .map(|column| {
            scratch.clear();
            scratch.extend(rows.iter().map(|&m| column[m]));
            method.apply(&scratch)
        })
        .collect()
}

/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

use itertools::iproduct;

use ndarray::{Array5, Axis, Slice, Zip};

use hyperwave_grid::{AXES, COMPONENTS};

/// Component axis of a rank-5 field tensor.
pub const COMPONENT_AXIS: usize = 4;

/// Source component fed into target component `k` by the difference along
/// axis `a`; equal to `k ^ a ^ 3` for every pair.
pub const SOURCE_COMPONENT: [[usize; AXES]; COMPONENTS] = [
    [3, 2, 1, 0],
    [2, 3, 0, 1],
    [1, 0, 3, 2],
    [0, 1, 2, 3],
];

/// Signs of the E update, rows indexed by target component, columns by axis.
///
/// Rows 0-2 are the four-dimensional curl extended with the gradient of the
/// time-like component; row 3 is the divergence-like closure. The time-like
/// column is uniformly negative.
pub const E_SIGNS: [[f32; AXES]; COMPONENTS] = [
    [-1.0, 1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0, -1.0],
    [1.0, 1.0, 1.0, -1.0],
];

/// Signs of the H update: spatial columns negated relative to [`E_SIGNS`],
/// time-like column unchanged. Together with the reversed difference
/// direction this makes `update_h` the negated adjoint of `update_e`.
pub const H_SIGNS: [[f32; AXES]; COMPONENTS] = [
    [1.0, -1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0, -1.0],
    [-1.0, 1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0, -1.0],
];

/// Orientation of the one-sided finite difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difference {
    /// Value at `i` uses the source at `i` and `i - 1`; the first cell along
    /// the axis is untouched.
    Forward,
    /// Value at `i` uses the source at `i + 1` and `i`; the last cell along
    /// the axis is untouched.
    Backward,
}

impl Difference {
    /// Slices `(target, upwind, downwind)` realizing the difference along
    /// one axis. On an axis of extent one every slice is empty, so
    /// degenerate axes contribute nothing by construction.
    pub fn slices(self) -> (Slice, Slice, Slice) {
        match self {
            Difference::Forward => (Slice::from(1..), Slice::from(1..), Slice::from(..-1)),
            Difference::Backward => (Slice::from(..-1), Slice::from(1..), Slice::from(..-1)),
        }
    }
}

/// Advances E in place from the staged H tensor.
///
/// The caller stages the source as `Cn · ds · H`; this routine only applies
/// the signed forward differences of the update table. No allocation.
pub fn update_e(e: &mut Array5<f32>, h: &Array5<f32>) {
    accumulate(e, h, &E_SIGNS, Difference::Forward);
}

/// Advances H in place from the staged E tensor; backward differences with
/// the mirrored sign table.
pub fn update_h(h: &mut Array5<f32>, e: &Array5<f32>) {
    accumulate(h, e, &H_SIGNS, Difference::Backward);
}

fn accumulate(
    target: &mut Array5<f32>,
    source: &Array5<f32>,
    signs: &[[f32; AXES]; COMPONENTS],
    difference: Difference,
) {
    let (written, upwind, downwind) = difference.slices();
    for (k, a) in iproduct!(0..COMPONENTS, 0..AXES) {
        let sign = signs[k][a];
        let j = SOURCE_COMPONENT[k][a];

        let out = target
            .slice_axis_mut(Axis(a), written)
            .index_axis_move(Axis(COMPONENT_AXIS), k);
        let hi = source
            .slice_axis(Axis(a), upwind)
            .index_axis_move(Axis(COMPONENT_AXIS), j);
        let lo = source
            .slice_axis(Axis(a), downwind)
            .index_axis_move(Axis(COMPONENT_AXIS), j);

        Zip::from(out)
            .and(hi)
            .and(lo)
            .par_for_each(|v, &hi, &lo| *v += sign * (hi - lo));
    }
}

/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

use ndarray::{Array5, Axis, Zip};

use hyperwave_grid::AXES;

/// Wrap-around boundary condition.
///
/// Forward differences leave the first cell of an axis stale, backward
/// differences the last; so E copies the last hyperplane into the first and
/// H the first into the last. Identifying those two hyperplanes makes the
/// grid an exact ring of period `N − 1` on every flagged axis.
pub struct Periodic {
    axes: [bool; AXES],
}

impl Periodic {
    /// Flags wrap-around per axis, in `(x, y, z, t)` order.
    pub fn new(x: bool, y: bool, z: bool, t: bool) -> Self {
        Self {
            axes: [x, y, z, t],
        }
    }

    /// Per-axis wrap flags.
    pub fn axes(&self) -> [bool; AXES] {
        self.axes
    }

    pub(crate) fn post_update_e(&self, e: &mut Array5<f32>) {
        for axis in self.wrapped(e) {
            let extent = e.len_of(Axis(axis));
            let (first, rest) = e.view_mut().split_at(Axis(axis), 1);
            let target = first.index_axis_move(Axis(axis), 0);
            let source = rest.index_axis_move(Axis(axis), extent - 2);

            Zip::from(target).and(&source).for_each(|d, &s| *d = s);
        }
    }

    pub(crate) fn post_update_h(&self, h: &mut Array5<f32>) {
        for axis in self.wrapped(h) {
            let extent = h.len_of(Axis(axis));
            let (rest, last) = h.view_mut().split_at(Axis(axis), extent - 1);
            let target = last.index_axis_move(Axis(axis), 0);
            let source = rest.index_axis_move(Axis(axis), 0);

            Zip::from(target).and(&source).for_each(|d, &s| *d = s);
        }
    }

    /// Flagged axes wide enough to wrap; a one-cell wrap is the identity.
    fn wrapped<'a>(&'a self, field: &Array5<f32>) -> impl Iterator<Item = usize> + 'a {
        let dims: Vec<usize> = (0..AXES).map(|a| field.len_of(Axis(a))).collect();

        (0..AXES).filter(move |&a| self.axes[a] && dims[a] >= 2)
    }
}

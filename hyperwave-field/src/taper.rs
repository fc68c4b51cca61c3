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

use hyperwave_grid::{Lattice, AXES};

/// Fraction of the squared ramp fed into the per-step loss.
const LOSS_STRENGTH: f32 = 0.1;

/// Precomputed absorbing masks over the padded grid.
///
/// Along every absorbing axis the scalar profile ramps linearly from 0 at
/// the outermost cell to 1 at the inner edge of the margin; profiles
/// multiply across axes and broadcast over the component axis. From the
/// combined profile `linear`:
///
/// ```text
/// ds   = 1 − (1 − linear)²
/// loss = 1 − (1 − linear)² · 0.1
/// ```
///
/// `ds` scales the stencil input, `loss` attenuates the fields once per
/// half-step. `loss` is forced to exactly 0 on the two extreme hyperplanes
/// of each absorbing axis, pinning the grid edge. Both masks are immutable
/// after construction and lie in `[0, 1]`.
pub struct LossyTaper {
    ds: Array5<f32>,
    loss: Array5<f32>,
}

impl LossyTaper {
    pub fn new(lattice: &Lattice) -> Self {
        let padded = lattice.padded();
        let absorbing = lattice.absorbing();
        let margin = lattice.margin();

        let profiles: Vec<Vec<f32>> = (0..AXES)
            .map(|axis| profile(padded[axis], absorbing[axis], margin))
            .collect();

        let dim = lattice.padded_dim();
        let mut ds = Array5::zeros(dim);
        let mut loss = Array5::zeros(dim);

        Zip::indexed(&mut ds)
            .and(&mut loss)
            .par_for_each(|(x, y, z, t, _), d, l| {
                let linear = profiles[0][x] * profiles[1][y] * profiles[2][z] * profiles[3][t];
                let damp = (1.0 - linear) * (1.0 - linear);
                *d = 1.0 - damp;
                *l = 1.0 - damp * LOSS_STRENGTH;
            });

        // Pin the outermost hyperplane on each absorbing axis to zero.
        for axis in 0..AXES {
            if absorbing[axis] {
                loss.index_axis_mut(Axis(axis), 0).fill(0.0);
                loss.index_axis_mut(Axis(axis), padded[axis] - 1).fill(0.0);
            }
        }

        Self { ds, loss }
    }

    pub fn ds(&self) -> &Array5<f32> {
        &self.ds
    }

    pub fn loss(&self) -> &Array5<f32> {
        &self.loss
    }

    /// Stages `scratch = cn · ds · field`, the tensor the stencil differences.
    pub fn scale_into(&self, cn: f32, field: &Array5<f32>, scratch: &mut Array5<f32>) {
        Zip::from(scratch)
            .and(field)
            .and(&self.ds)
            .par_for_each(|s, &f, &d| *s = cn * d * f);
    }

    /// Applies the per-step multiplicative loss in place.
    pub fn attenuate(&self, field: &mut Array5<f32>) {
        Zip::from(field)
            .and(&self.loss)
            .par_for_each(|f, &l| *f *= l);
    }
}

/// One-dimensional taper profile: 1 across the user region, `j / margin` at
/// `j` cells from either end of an absorbing axis.
fn profile(extent: usize, absorbing: bool, margin: usize) -> Vec<f32> {
    let mut values = vec![1.0; extent];
    if absorbing {
        for j in 0..margin {
            let ramp = j as f32 / margin as f32;
            values[j] = ramp;
            values[extent - 1 - j] = ramp;
        }
    }

    values
}

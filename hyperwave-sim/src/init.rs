/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

//! Helpers for seeding initial conditions.
//!
//! The solver has no sources beyond the initial state, so everything a run
//! shows comes from what these write into `e_init`/`h_init`.

use ndarray::{Array5, Zip};

use ndarray_rand::RandomExt;

use rand::{rngs::StdRng, thread_rng, SeedableRng};

use rand_distr::Uniform;

/// Sets a single cell of one component.
///
/// # Arguments
///
/// * `cell` - grid index in `(x, y, z, t)` order.
///
/// * `component` - polarization index, 0..=3.
pub fn point(field: &mut Array5<f32>, cell: [usize; 4], component: usize, amplitude: f32) {
    field[[cell[0], cell[1], cell[2], cell[3], component]] = amplitude;
}

/// Fills one component with an isotropic Gaussian pulse.
///
/// The pulse is centered on `center` with standard deviation `width` cells
/// in every axis. A smooth pulse keeps the excitation inside the
/// well-resolved part of the spectrum, which is what the absorbing
/// boundaries are designed for.
pub fn gaussian(
    field: &mut Array5<f32>,
    center: [usize; 4],
    width: f32,
    component: usize,
    amplitude: f32,
) {
    let spread = 2.0 * width * width;
    Zip::indexed(field).for_each(|(x, y, z, t, c), value| {
        if c != component {
            return;
        }
        let distance: f32 = [x, y, z, t]
            .iter()
            .zip(center.iter())
            .map(|(&i, &c)| {
                let d = i as f32 - c as f32;
                d * d
            })
            .sum();
        *value = amplitude * (-distance / spread).exp();
    });
}

/// Fills the whole tensor with uniform noise from `U(low, high)`.
pub fn uniform(field: &mut Array5<f32>, low: f32, high: f32) {
    field.assign(&Array5::random_using(
        field.raw_dim(),
        Uniform::new(low, high),
        &mut thread_rng(),
    ));
}

/// Reproducible variant of [`uniform`].
pub fn uniform_with_seed(field: &mut Array5<f32>, low: f32, high: f32, seed: u64) {
    field.assign(&Array5::random_using(
        field.raw_dim(),
        Uniform::new(low, high),
        &mut StdRng::seed_from_u64(seed),
    ));
}

/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

use ndarray::{Array5, Array6, Axis};

use hyperwave_grid::Lattice;

/// The two live field tensors over the padded grid, plus the staging buffer
/// that holds `Cn · ds · field` between the taper pass and the stencil.
///
/// Everything is allocated once at the start of a run; the step loop only
/// rewrites these buffers in place.
pub struct FieldStore {
    pub e: Array5<f32>,
    pub h: Array5<f32>,
    pub scratch: Array5<f32>,
}

impl FieldStore {
    /// Zero-initialized buffers over the padded grid.
    pub fn new(lattice: &Lattice) -> Self {
        let dim = lattice.padded_dim();

        Self {
            e: Array5::zeros(dim),
            h: Array5::zeros(dim),
            scratch: Array5::zeros(dim),
        }
    }

    /// Copies the user-shaped initial conditions into the measurement slice.
    pub fn seed(&mut self, lattice: &Lattice, e_init: &Array5<f32>, h_init: &Array5<f32>) {
        lattice.interior_mut(&mut self.e).assign(e_init);
        lattice.interior_mut(&mut self.h).assign(h_init);
    }
}

/// Preallocated per-step trajectory of the measurement slice.
///
/// The leading axis has extent `steps + 1`: slot 0 holds the initial state,
/// slot `s + 1` the state after step `s`. Recorded slices are never mutated
/// afterwards.
pub struct History {
    e: Array6<f32>,
    h: Array6<f32>,
}

impl History {
    pub fn new(lattice: &Lattice, steps: usize) -> Self {
        let (x, y, z, t, c) = lattice.field_dim();
        let dim = (steps + 1, x, y, z, t, c);

        Self {
            e: Array6::zeros(dim),
            h: Array6::zeros(dim),
        }
    }

    /// Stores the measurement slice of both fields at `slot`.
    pub fn record(&mut self, slot: usize, lattice: &Lattice, store: &FieldStore) {
        self.e
            .index_axis_mut(Axis(0), slot)
            .assign(&lattice.interior(&store.e));
        self.h
            .index_axis_mut(Axis(0), slot)
            .assign(&lattice.interior(&store.h));
    }

    pub fn into_parts(self) -> (Array6<f32>, Array6<f32>) {
        (self.e, self.h)
    }
}

/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

mod face;

pub use face::*;

use ndarray::Array5;

use rayon::prelude::*;

use hyperwave_grid::{Error, Lattice, AXES};

/// Convolutional perfectly-matched absorbing boundary.
///
/// A composite of up to eight single-face CPML records, two sides for each
/// axis with a non-zero thickness. The faces are (re)built when the
/// condition is bound to a grid, so every run starts with a fresh
/// convolution history.
pub struct Absorbing {
    thickness: [usize; AXES],
    faces: Vec<Face>,
}

impl Absorbing {
    /// CPML thickness per axis in cells, in `(x, y, z, t)` order; zero
    /// disables the axis.
    pub fn new(x: usize, y: usize, z: usize, t: usize) -> Self {
        Self {
            thickness: [x, y, z, t],
            faces: Vec::new(),
        }
    }

    /// Per-axis slab thickness.
    pub fn thickness(&self) -> [usize; AXES] {
        self.thickness
    }

    pub(crate) fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub(crate) fn init(&mut self, lattice: &Lattice, cn: f32) -> Result<(), Error> {
        self.faces.clear();
        for side in [Side::Low, Side::High] {
            for axis in 0..AXES {
                let width = self.thickness[axis];
                if width == 0 {
                    continue;
                }
                if lattice.is_degenerate(axis) {
                    return Err(Error::DegenerateAbsorber { axis });
                }
                self.faces.push(Face::new(lattice, axis, side, width, cn)?);
            }
        }

        Ok(())
    }

    // The pre hooks only touch per-face state, so the faces run in
    // parallel; the post hooks add into slabs that overlap at corners and
    // stay sequential.

    pub(crate) fn pre_update_e(&mut self, h: &Array5<f32>) {
        self.faces
            .par_iter_mut()
            .for_each(|face| face.pre_update_e(h));
    }

    pub(crate) fn pre_update_h(&mut self, e: &Array5<f32>) {
        self.faces
            .par_iter_mut()
            .for_each(|face| face.pre_update_h(e));
    }

    pub(crate) fn post_update_e(&self, e: &mut Array5<f32>) {
        for face in &self.faces {
            face.post_update_e(e);
        }
    }

    pub(crate) fn post_update_h(&self, h: &mut Array5<f32>) {
        for face in &self.faces {
            face.post_update_h(h);
        }
    }
}

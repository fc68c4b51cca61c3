/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

use ndarray::{Array5, ArrayView5, ArrayViewMut5, Axis, Slice};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::Error;

/// Number of lattice axes.
pub const AXES: usize = 4;

/// Size of the trailing component axis: three spatial-like polarizations and
/// one time-like polarization.
pub const COMPONENTS: usize = 4;

/// Documented default Courant number.
pub const DEFAULT_COURANT: f32 = 0.5;

/// Default absorbing-margin thickness in cells.
pub const DEFAULT_MARGIN: usize = 30;

/// Geometry of the simulation grid.
///
/// A lattice couples the user-declared shape `(Nx, Ny, Nz, Nt)` with the
/// per-axis absorbing mask and the margin thickness. Axes flagged absorbing
/// are enlarged by `2 · margin` cells internally; the central sub-cuboid of
/// the padded grid (the *measurement slice*) always has the user shape.
///
/// Axes of extent one are degenerate: they carry no stencil contribution and
/// cannot absorb.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    shape: [usize; AXES],
    absorbing: [bool; AXES],
    margin: usize,
}

impl Lattice {
    /// Creates a lattice with the default margin.
    ///
    /// # Arguments
    ///
    /// * `shape` - user-visible extent of each of the four axes.
    ///
    /// * `absorbing` - per-axis absorbing flags; flagged axes are padded.
    pub fn new(shape: [usize; AXES], absorbing: [bool; AXES]) -> Result<Self, Error> {
        for (axis, &extent) in shape.iter().enumerate() {
            if extent == 0 {
                return Err(Error::EmptyAxis { axis });
            }
            if absorbing[axis] && extent < 2 {
                return Err(Error::DegenerateAbsorber { axis });
            }
        }

        Ok(Self {
            shape,
            absorbing,
            margin: DEFAULT_MARGIN,
        })
    }

    /// Replaces the absorbing-margin thickness.
    pub fn with_margin(mut self, margin: usize) -> Result<Self, Error> {
        if margin == 0 && self.absorbing.iter().any(|&flag| flag) {
            return Err(Error::MarginTooThin);
        }
        self.margin = margin;

        Ok(self)
    }

    /// User-visible extents.
    pub fn shape(&self) -> [usize; AXES] {
        self.shape
    }

    /// Per-axis absorbing flags.
    pub fn absorbing(&self) -> [bool; AXES] {
        self.absorbing
    }

    /// Absorbing-margin thickness in cells.
    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Whether an axis has extent one and therefore no stencil contribution.
    pub fn is_degenerate(&self, axis: usize) -> bool {
        self.shape[axis] < 2
    }

    /// Extents of the internal grid: the user shape plus `2 · margin` along
    /// every absorbing axis.
    pub fn padded(&self) -> [usize; AXES] {
        let mut padded = self.shape;
        for (extent, &flag) in padded.iter_mut().zip(self.absorbing.iter()) {
            if flag {
                *extent += 2 * self.margin;
            }
        }

        padded
    }

    /// Dimension of a padded field tensor, component axis included.
    pub fn padded_dim(&self) -> (usize, usize, usize, usize, usize) {
        let [x, y, z, t] = self.padded();

        (x, y, z, t, COMPONENTS)
    }

    /// Dimension of a user-shaped field tensor, component axis included.
    pub fn field_dim(&self) -> (usize, usize, usize, usize, usize) {
        let [x, y, z, t] = self.shape;

        (x, y, z, t, COMPONENTS)
    }

    /// The measurement slice of a padded field: the central user-shaped
    /// sub-cuboid.
    pub fn interior<'a>(&self, field: &'a Array5<f32>) -> ArrayView5<'a, f32> {
        let mut view = field.view();
        for axis in 0..AXES {
            view.slice_axis_inplace(Axis(axis), self.axis_slice(axis));
        }

        view
    }

    /// Mutable measurement slice of a padded field.
    pub fn interior_mut<'a>(&self, field: &'a mut Array5<f32>) -> ArrayViewMut5<'a, f32> {
        let mut view = field.view_mut();
        for axis in 0..AXES {
            view.slice_axis_inplace(Axis(axis), self.axis_slice(axis));
        }

        view
    }

    fn axis_slice(&self, axis: usize) -> Slice {
        if self.absorbing[axis] {
            let margin = self.margin as isize;
            Slice::from(margin..-margin)
        } else {
            Slice::from(..)
        }
    }
}

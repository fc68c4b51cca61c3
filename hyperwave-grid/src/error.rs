/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

use thiserror::Error;

/// Everything that can go wrong while configuring a lattice or a simulation.
///
/// All of these surface at construction time or at the start of a run; the
/// step loop itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A grid axis was declared with extent zero.
    #[error("axis {axis} has extent 0, every axis needs at least one cell")]
    EmptyAxis { axis: usize },

    /// An initial field does not match the declared grid shape.
    #[error("initial field has shape {found:?}, the declared grid expects {expected:?}")]
    FieldShape {
        expected: [usize; 5],
        found: Vec<usize>,
    },

    /// An absorbing flag or thickness was requested on an axis of extent one.
    #[error("axis {axis} is degenerate and cannot absorb")]
    DegenerateAbsorber { axis: usize },

    /// The Courant number must lie in `(0, 1]`.
    #[error("Courant number {0} is outside (0, 1]")]
    CourantRange(f32),

    /// An absorbing margin of zero cells cannot host a taper.
    #[error("absorbing margin must be at least one cell")]
    MarginTooThin,

    /// A boundary slab does not fit its axis.
    #[error("boundary width {width} does not fit axis {axis} of padded extent {extent}")]
    WidthExceedsAxis {
        axis: usize,
        width: usize,
        extent: usize,
    },
}

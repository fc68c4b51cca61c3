/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

//! Boundary conditions hooked around the stencil update: wrap-around
//! periodicity and the convolutional perfectly-matched absorbing layer.

mod absorbing;
mod periodic;

pub use absorbing::*;
pub use periodic::*;

use ndarray::Array5;

use hyperwave_grid::{Error, Lattice};

/// A boundary condition attached to a simulator.
///
/// One tagged variant with a uniform hook interface instead of a class
/// hierarchy: the simulator calls `pre_update_*` before each stencil pass
/// (read-only observation of the opposite field) and `post_update_*` after
/// it (in-place correction of the advanced field).
pub enum BoundaryCondition {
    Periodic(Periodic),
    Absorbing(Absorbing),
}

impl BoundaryCondition {
    /// Binds the condition to a grid. Called once at the start of every run;
    /// absorbing state (ψ history) is rebuilt from scratch each time.
    pub fn init(&mut self, lattice: &Lattice, cn: f32) -> Result<(), Error> {
        match self {
            BoundaryCondition::Periodic(_) => Ok(()),
            BoundaryCondition::Absorbing(absorbing) => absorbing.init(lattice, cn),
        }
    }

    /// Observes H before E is advanced.
    pub fn pre_update_e(&mut self, h: &Array5<f32>) {
        if let BoundaryCondition::Absorbing(absorbing) = self {
            absorbing.pre_update_e(h);
        }
    }

    /// Observes E before H is advanced.
    pub fn pre_update_h(&mut self, e: &Array5<f32>) {
        if let BoundaryCondition::Absorbing(absorbing) = self {
            absorbing.pre_update_h(e);
        }
    }

    /// Corrects E after the stencil, before the loss pass.
    pub fn post_update_e(&mut self, e: &mut Array5<f32>) {
        match self {
            BoundaryCondition::Periodic(periodic) => periodic.post_update_e(e),
            BoundaryCondition::Absorbing(absorbing) => absorbing.post_update_e(e),
        }
    }

    /// Corrects H after the stencil, before the loss pass.
    pub fn post_update_h(&mut self, h: &mut Array5<f32>) {
        match self {
            BoundaryCondition::Periodic(periodic) => periodic.post_update_h(h),
            BoundaryCondition::Absorbing(absorbing) => absorbing.post_update_h(h),
        }
    }
}

impl From<Periodic> for BoundaryCondition {
    fn from(periodic: Periodic) -> Self {
        BoundaryCondition::Periodic(periodic)
    }
}

impl From<Absorbing> for BoundaryCondition {
    fn from(absorbing: Absorbing) -> Self {
        BoundaryCondition::Absorbing(absorbing)
    }
}

/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

//! The simulation driver: configuration, validation, and the step loop
//! sequencing boundary hooks, stencil updates, and the lossy taper.

use log::{debug, trace};

use ndarray::{Array5, Array6};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use hyperwave_boundary::BoundaryCondition;

use hyperwave_field::{update_e, update_h, FieldStore, History, LossyTaper};

use hyperwave_grid::{Error, Lattice, DEFAULT_COURANT};

pub mod init;

/// Fields returned by a run, restricted to the measurement slice.
///
/// `e`/`h` always hold the final state in the user shape
/// `(Nx, Ny, Nz, Nt, 4)`. When history recording is enabled the full
/// trajectories are returned as well, with leading extent `steps + 1`
/// (slot 0 is the initial state).
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub e: Array5<f32>,
    pub h: Array5<f32>,
    pub e_history: Option<Array6<f32>>,
    pub h_history: Option<Array6<f32>>,
}

/// Explicit leapfrog solver for the coupled four-dimensional field pair.
///
/// A simulator owns its grid geometry, the writable initial conditions, and
/// the attached boundary conditions. `run` allocates the padded fields,
/// precomputes the taper masks, binds the boundary conditions, and then
/// steps; each step sequences
///
/// ```text
/// pre_E → stencil E → post_E → loss → pre_H → stencil H → post_H → loss
/// ```
///
/// so every boundary condition sees the post-stencil, pre-loss field in its
/// post hook and the freshest opposite field in its pre hook. The loop
/// itself is allocation-free and infallible; all validation happens before
/// step one. Numerical garbage from an unstable Courant number is not
/// detected (see [`Simulator::set_courant`]).
pub struct Simulator {
    lattice: Lattice,
    cn: f32,
    record: bool,
    boundaries: Vec<BoundaryCondition>,
    /// Initial E over the user shape; written into the measurement slice at
    /// the start of every run.
    pub e_init: Array5<f32>,
    /// Initial H over the user shape.
    pub h_init: Array5<f32>,
}

impl Simulator {
    /// Creates a simulator over the user shape `(Nx, Ny, Nz, Nt)`.
    ///
    /// # Arguments
    ///
    /// * `shape` - extent of each axis; every axis needs at least one cell.
    ///
    /// * `boundary` - per-axis absorbing flags. Flagged axes are padded by
    ///   the margin on both sides and tapered; unflagged axes are left as
    ///   hard grid edges.
    pub fn new(
        shape: (usize, usize, usize, usize),
        boundary: (bool, bool, bool, bool),
    ) -> Result<Self, Error> {
        let lattice = Lattice::new(
            [shape.0, shape.1, shape.2, shape.3],
            [boundary.0, boundary.1, boundary.2, boundary.3],
        )?;
        let dim = lattice.field_dim();

        Ok(Self {
            lattice,
            cn: DEFAULT_COURANT,
            record: false,
            boundaries: Vec::new(),
            e_init: Array5::zeros(dim),
            h_init: Array5::zeros(dim),
        })
    }

    /// The grid geometry, margin included.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Current Courant number.
    pub fn courant(&self) -> f32 {
        self.cn
    }

    /// Replaces the Courant number (default 0.5).
    ///
    /// Values outside `(0, 1]` are rejected. Within that range the scheme is
    /// only conditionally stable: with three non-degenerate axes the default
    /// 0.5 diverges and 0.45 is marginal, with four active axes stay at or
    /// below roughly 0.4. Instability is not detected at run time.
    pub fn set_courant(&mut self, cn: f32) -> Result<(), Error> {
        if !(cn > 0.0 && cn <= 1.0) {
            return Err(Error::CourantRange(cn));
        }
        self.cn = cn;

        Ok(())
    }

    /// Replaces the absorbing-margin thickness (default 30 cells).
    pub fn set_margin(&mut self, margin: usize) -> Result<(), Error> {
        self.lattice = self.lattice.clone().with_margin(margin)?;

        Ok(())
    }

    /// Enables or disables trajectory recording (default off, bounding
    /// memory at one padded grid per field).
    pub fn record_history(&mut self, record: bool) {
        self.record = record;
    }

    /// Attaches a boundary condition; hooks run in attachment order.
    pub fn add_boundary(&mut self, boundary: impl Into<BoundaryCondition>) {
        self.boundaries.push(boundary.into());
    }

    /// Runs `steps` leapfrog steps and returns the measurement slice.
    ///
    /// Fails before the first step on an initial-condition shape mismatch
    /// or an unsatisfiable boundary configuration; once stepping starts it
    /// cannot fail.
    pub fn run(&mut self, steps: usize) -> Result<RunOutput, Error> {
        let dim = self.lattice.field_dim();
        for initial in [&self.e_init, &self.h_init] {
            if initial.dim() != dim {
                let (x, y, z, t, c) = dim;
                return Err(Error::FieldShape {
                    expected: [x, y, z, t, c],
                    found: initial.shape().to_vec(),
                });
            }
        }

        debug!(
            "running {} steps: padded grid {:?}, cn {}, {} boundary condition(s)",
            steps,
            self.lattice.padded(),
            self.cn,
            self.boundaries.len()
        );

        let mut store = FieldStore::new(&self.lattice);
        store.seed(&self.lattice, &self.e_init, &self.h_init);
        let taper = LossyTaper::new(&self.lattice);
        for boundary in &mut self.boundaries {
            boundary.init(&self.lattice, self.cn)?;
        }

        let mut history = if self.record {
            let mut history = History::new(&self.lattice, steps);
            history.record(0, &self.lattice, &store);
            Some(history)
        } else {
            None
        };

        for step in 0..steps {
            trace!("step {step}");
            for boundary in &mut self.boundaries {
                boundary.pre_update_e(&store.h);
            }
            taper.scale_into(self.cn, &store.h, &mut store.scratch);
            update_e(&mut store.e, &store.scratch);
            for boundary in &mut self.boundaries {
                boundary.post_update_e(&mut store.e);
            }
            taper.attenuate(&mut store.e);

            for boundary in &mut self.boundaries {
                boundary.pre_update_h(&store.e);
            }
            taper.scale_into(self.cn, &store.e, &mut store.scratch);
            update_h(&mut store.h, &store.scratch);
            for boundary in &mut self.boundaries {
                boundary.post_update_h(&mut store.h);
            }
            taper.attenuate(&mut store.h);

            if let Some(history) = history.as_mut() {
                history.record(step + 1, &self.lattice, &store);
            }
        }

        let (e_history, h_history) = match history {
            Some(history) => {
                let (e, h) = history.into_parts();
                (Some(e), Some(h))
            }
            None => (None, None),
        };

        Ok(RunOutput {
            e: self.lattice.interior(&store.e).to_owned(),
            h: self.lattice.interior(&store.h).to_owned(),
            e_history,
            h_history,
        })
    }
}

/// Total squared field `Σ (E² + H²)` over a pair of equally-shaped tensors.
pub fn field_energy(e: &Array5<f32>, h: &Array5<f32>) -> f32 {
    e.iter().map(|v| v * v).sum::<f32>() + h.iter().map(|v| v * v).sum::<f32>()
}

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

use ndarray::{Array5, Array6, Axis, Slice, Zip};

use hyperwave_field::{Difference, COMPONENT_AXIS, E_SIGNS, H_SIGNS, SOURCE_COMPONENT};

use hyperwave_grid::{Error, Lattice, AXES, COMPONENTS};

/// Keeps `c = (b − 1)·σ/(σ + ε)` branch-free: it evaluates to 0 where σ = 0.
const EPSILON: f32 = 1e-8;

/// Which end of the axis a face covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Low,
    High,
}

/// A single absorbing face: the CPML state for one side of one axis.
///
/// All per-face arrays are slab-local. They span the full grid on the three
/// transverse axes but only `width + 1` cells along the face axis: the slab
/// itself plus one interior *guard* cell. The guard realizes the mask
/// truncation of a full-grid formulation: its damping `b`, gain `c`, staged
/// field value, and therefore its ψ stay exactly zero, so the slab-local
/// recurrence reproduces the masked full-grid one cell for cell.
///
/// Per update of the observed field `F` (H for the E-side, E for the
/// H-side), with the face's one-sided difference `Δ` and the shared
/// flavor/axis source table:
///
/// ```text
/// ψ[f][…, a]  = b[…, a] · ψ[f][…, a] + c[…, a] · Δ_a F[…, comp(f, a)]
/// φ[…, k]     = Σ_a s(k, a) · ψ[k][…, a]
/// F'[slab]   += Cn · φ
/// ```
///
/// where `s` is the corresponding stencil sign table.
pub struct Face {
    axis: usize,
    side: Side,
    width: usize,
    guard: usize,
    cn: f32,
    slab: Slice,
    b_e: Array5<f32>,
    c_e: Array5<f32>,
    b_h: Array5<f32>,
    c_h: Array5<f32>,
    psi_e: Array6<f32>,
    psi_h: Array6<f32>,
    phi_e: Array5<f32>,
    phi_h: Array5<f32>,
    window: Array5<f32>,
}

impl Face {
    /// Builds the face state for one side of `axis` with the given slab
    /// `width`, reading the padded extent and `cn` from the simulation.
    pub fn new(
        lattice: &Lattice,
        axis: usize,
        side: Side,
        width: usize,
        cn: f32,
    ) -> Result<Self, Error> {
        let extent = lattice.padded()[axis];
        let span = width + 1;
        if 2 * span > extent {
            return Err(Error::WidthExceedsAxis {
                axis,
                width,
                extent,
            });
        }

        let (slab, guard) = match side {
            Side::Low => (Slice::from(..span as isize), width),
            Side::High => (Slice::from(-(span as isize)..), 0),
        };

        let mut dim = lattice.padded_dim();
        match axis {
            0 => dim.0 = span,
            1 => dim.1 = span,
            2 => dim.2 = span,
            _ => dim.3 = span,
        }
        let psi_dim = (COMPONENTS, dim.0, dim.1, dim.2, dim.3, dim.4);

        let sigma_e = sigma_profile(side, width, span, Stagger::Half);
        let sigma_h = sigma_profile(side, width, span, Stagger::Whole);

        let mut b_e = Array5::zeros(dim);
        let mut c_e = Array5::zeros(dim);
        let mut b_h = Array5::zeros(dim);
        let mut c_h = Array5::zeros(dim);
        coefficients(&mut b_e, &mut c_e, &sigma_e, axis, guard, cn);
        coefficients(&mut b_h, &mut c_h, &sigma_h, axis, guard, cn);

        Ok(Self {
            axis,
            side,
            width,
            guard,
            cn,
            slab,
            b_e,
            c_e,
            b_h,
            c_h,
            psi_e: Array6::zeros(psi_dim),
            psi_h: Array6::zeros(psi_dim),
            phi_e: Array5::zeros(dim),
            phi_h: Array5::zeros(dim),
            window: Array5::zeros(dim),
        })
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn guard(&self) -> usize {
        self.guard
    }

    pub(crate) fn psi_e(&self) -> &Array6<f32> {
        &self.psi_e
    }

    pub(crate) fn psi_h(&self) -> &Array6<f32> {
        &self.psi_h
    }

    /// Decays ψE and accumulates the masked H gradients into it, then folds
    /// the four flavors into φE.
    pub(crate) fn pre_update_e(&mut self, h: &Array5<f32>) {
        self.stage(h);
        decay(&mut self.psi_e, &self.b_e);
        charge(
            &mut self.psi_e,
            &self.window,
            &self.c_e,
            Difference::Forward,
        );
        combine(&mut self.phi_e, &self.psi_e, &E_SIGNS);
    }

    /// Mirror of [`Face::pre_update_e`] with backward differences and the
    /// H-side tables.
    pub(crate) fn pre_update_h(&mut self, e: &Array5<f32>) {
        self.stage(e);
        decay(&mut self.psi_h, &self.b_h);
        charge(
            &mut self.psi_h,
            &self.window,
            &self.c_h,
            Difference::Backward,
        );
        combine(&mut self.phi_h, &self.psi_h, &H_SIGNS);
    }

    pub(crate) fn post_update_e(&self, e: &mut Array5<f32>) {
        let cn = self.cn;
        let slab = e.slice_axis_mut(Axis(self.axis), self.slab);
        Zip::from(slab)
            .and(&self.phi_e)
            .par_for_each(|v, &phi| *v += cn * phi);
    }

    pub(crate) fn post_update_h(&self, h: &mut Array5<f32>) {
        let cn = self.cn;
        let slab = h.slice_axis_mut(Axis(self.axis), self.slab);
        Zip::from(slab)
            .and(&self.phi_h)
            .par_for_each(|v, &phi| *v += cn * phi);
    }

    /// Copies the slab of the observed field and zeroes the guard layer,
    /// the slab-local equivalent of multiplying by the boundary mask.
    fn stage(&mut self, field: &Array5<f32>) {
        self.window
            .assign(&field.slice_axis(Axis(self.axis), self.slab));
        self.window
            .index_axis_mut(Axis(self.axis), self.guard)
            .fill(0.0);
    }
}

/// Whether a profile is sampled at half-integer or integer depths.
#[derive(Clone, Copy)]
enum Stagger {
    Half,
    Whole,
}

/// Polynomial damping profile `σ(d) = 40·d³/(width + 1)⁴` sampled along the
/// slab, deepest at the outer grid edge. The E profile sits on half-integer
/// depths and covers every slab cell; the staggered H profile carries one
/// sample fewer (its integer depths run `1..width`), so one slab cell per
/// side stays undamped. Guard cells are always zero.
fn sigma_profile(side: Side, width: usize, span: usize, stagger: Stagger) -> Vec<f32> {
    let scale = ((width + 1) as f32).powi(4);
    let graded = |depth: f32| 40.0 * depth.powi(3) / scale;

    let mut values = vec![0.0; span];
    match (side, stagger) {
        // Slab cells 0..width, guard at `width`; local 0 is the grid edge.
        (Side::Low, Stagger::Half) => {
            for (local, value) in values.iter_mut().enumerate().take(width) {
                *value = graded(width as f32 - local as f32 - 0.5);
            }
        }
        (Side::Low, Stagger::Whole) => {
            for (local, value) in values.iter_mut().enumerate().take(width.saturating_sub(1)) {
                *value = graded((width - 1 - local) as f32);
            }
        }
        // Guard at local 0; local `width` is the grid edge.
        (Side::High, Stagger::Half) => {
            for (local, value) in values.iter_mut().enumerate().skip(1) {
                *value = graded(local as f32 - 0.5);
            }
        }
        (Side::High, Stagger::Whole) => {
            for (local, value) in values.iter_mut().enumerate().take(width).skip(1) {
                *value = graded(local as f32);
            }
        }
    }

    values
}

/// Fills `b = exp(−(σ + ε)·cn)·mask` and `c = (b − 1)·σ/(σ + ε)`, with σ on
/// the component slot matching the face axis and zero elsewhere, and the
/// mask zero only on the guard layer.
fn coefficients(
    b: &mut Array5<f32>,
    c: &mut Array5<f32>,
    sigma: &[f32],
    axis: usize,
    guard: usize,
    cn: f32,
) {
    Zip::indexed(b)
        .and(c)
        .par_for_each(|(x, y, z, t, slot), b, c| {
            let local = [x, y, z, t][axis];
            let sigma = if slot == axis { sigma[local] } else { 0.0 };
            let mask = if local == guard { 0.0 } else { 1.0 };
            *b = (-(sigma + EPSILON) * cn).exp() * mask;
            *c = (*b - 1.0) * sigma / (sigma + EPSILON);
        });
}

fn decay(psi: &mut Array6<f32>, b: &Array5<f32>) {
    for flavor in 0..COMPONENTS {
        Zip::from(psi.index_axis_mut(Axis(0), flavor))
            .and(b)
            .par_for_each(|p, &b| *p *= b);
    }
}

/// Accumulates, for every flavor `f` and axis `a`, the `a`-difference of the
/// staged field's component `comp(f, a)` into ψ slot `a`, weighted by `c`.
fn charge(psi: &mut Array6<f32>, window: &Array5<f32>, c: &Array5<f32>, difference: Difference) {
    let (written, upwind, downwind) = difference.slices();
    for (f, a) in iproduct!(0..COMPONENTS, 0..AXES) {
        let j = SOURCE_COMPONENT[f][a];

        let mut flavor = psi.index_axis_mut(Axis(0), f);
        let target = flavor
            .slice_axis_mut(Axis(a), written)
            .index_axis_move(Axis(COMPONENT_AXIS), a);
        let gain = c
            .slice_axis(Axis(a), written)
            .index_axis_move(Axis(COMPONENT_AXIS), a);
        let hi = window
            .slice_axis(Axis(a), upwind)
            .index_axis_move(Axis(COMPONENT_AXIS), j);
        let lo = window
            .slice_axis(Axis(a), downwind)
            .index_axis_move(Axis(COMPONENT_AXIS), j);

        Zip::from(target)
            .and(hi)
            .and(lo)
            .and(gain)
            .par_for_each(|p, &hi, &lo, &c| *p += (hi - lo) * c);
    }
}

/// Folds the four ψ flavors into the correction φ with the stencil's sign
/// table: `φ[…, k] = Σ_a s(k, a)·ψ[k][…, a]`.
fn combine(
    phi: &mut Array5<f32>,
    psi: &Array6<f32>,
    signs: &[[f32; AXES]; COMPONENTS],
) {
    for k in 0..COMPONENTS {
        let flavor = psi.index_axis(Axis(0), k);
        let mut target = phi.index_axis_mut(Axis(COMPONENT_AXIS), k);
        target.fill(0.0);
        for a in 0..AXES {
            let sign = signs[k][a];
            Zip::from(&mut target)
                .and(flavor.index_axis(Axis(COMPONENT_AXIS), a))
                .par_for_each(|p, &v| *p += sign * v);
        }
    }
}

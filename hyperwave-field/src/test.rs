/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

use approx::assert_abs_diff_eq;

use ndarray::{Array5, Axis};

use rand::{rngs::StdRng, Rng, SeedableRng};

use hyperwave_grid::Lattice;

use super::*;

fn random_field(dim: (usize, usize, usize, usize, usize), seed: u64) -> Array5<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array5::from_shape_fn(dim, |_| rng.gen_range(-1.0..1.0))
}

/// Transliteration of the update tables with one explicit statement per
/// table row, used to pin the axis-parameterized kernel against the
/// documented signs and source components.
fn reference_update_e(e: &mut Array5<f32>, h: &Array5<f32>) {
    let (nx, ny, nz, nt, _) = e.dim();
    for x in 1..nx {
        for y in 0..ny {
            for z in 0..nz {
                for t in 0..nt {
                    e[[x, y, z, t, 0]] -= h[[x, y, z, t, 3]] - h[[x - 1, y, z, t, 3]];
                    e[[x, y, z, t, 1]] -= h[[x, y, z, t, 2]] - h[[x - 1, y, z, t, 2]];
                    e[[x, y, z, t, 2]] += h[[x, y, z, t, 1]] - h[[x - 1, y, z, t, 1]];
                    e[[x, y, z, t, 3]] += h[[x, y, z, t, 0]] - h[[x - 1, y, z, t, 0]];
                }
            }
        }
    }
    for x in 0..nx {
        for y in 1..ny {
            for z in 0..nz {
                for t in 0..nt {
                    e[[x, y, z, t, 0]] += h[[x, y, z, t, 2]] - h[[x, y - 1, z, t, 2]];
                    e[[x, y, z, t, 1]] -= h[[x, y, z, t, 3]] - h[[x, y - 1, z, t, 3]];
                    e[[x, y, z, t, 2]] -= h[[x, y, z, t, 0]] - h[[x, y - 1, z, t, 0]];
                    e[[x, y, z, t, 3]] += h[[x, y, z, t, 1]] - h[[x, y - 1, z, t, 1]];
                }
            }
        }
    }
    for x in 0..nx {
        for y in 0..ny {
            for z in 1..nz {
                for t in 0..nt {
                    e[[x, y, z, t, 0]] -= h[[x, y, z, t, 1]] - h[[x, y, z - 1, t, 1]];
                    e[[x, y, z, t, 1]] += h[[x, y, z, t, 0]] - h[[x, y, z - 1, t, 0]];
                    e[[x, y, z, t, 2]] -= h[[x, y, z, t, 3]] - h[[x, y, z - 1, t, 3]];
                    e[[x, y, z, t, 3]] += h[[x, y, z, t, 2]] - h[[x, y, z - 1, t, 2]];
                }
            }
        }
    }
    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                for t in 1..nt {
                    for k in 0..4 {
                        e[[x, y, z, t, k]] -= h[[x, y, z, t, k]] - h[[x, y, z, t - 1, k]];
                    }
                }
            }
        }
    }
}

fn reference_update_h(h: &mut Array5<f32>, e: &Array5<f32>) {
    let (nx, ny, nz, nt, _) = h.dim();
    for x in 0..nx.saturating_sub(1) {
        for y in 0..ny {
            for z in 0..nz {
                for t in 0..nt {
                    h[[x, y, z, t, 0]] += e[[x + 1, y, z, t, 3]] - e[[x, y, z, t, 3]];
                    h[[x, y, z, t, 1]] += e[[x + 1, y, z, t, 2]] - e[[x, y, z, t, 2]];
                    h[[x, y, z, t, 2]] -= e[[x + 1, y, z, t, 1]] - e[[x, y, z, t, 1]];
                    h[[x, y, z, t, 3]] -= e[[x + 1, y, z, t, 0]] - e[[x, y, z, t, 0]];
                }
            }
        }
    }
    for x in 0..nx {
        for y in 0..ny.saturating_sub(1) {
            for z in 0..nz {
                for t in 0..nt {
                    h[[x, y, z, t, 0]] -= e[[x, y + 1, z, t, 2]] - e[[x, y, z, t, 2]];
                    h[[x, y, z, t, 1]] += e[[x, y + 1, z, t, 3]] - e[[x, y, z, t, 3]];
                    h[[x, y, z, t, 2]] += e[[x, y + 1, z, t, 0]] - e[[x, y, z, t, 0]];
                    h[[x, y, z, t, 3]] -= e[[x, y + 1, z, t, 1]] - e[[x, y, z, t, 1]];
                }
            }
        }
    }
    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz.saturating_sub(1) {
                for t in 0..nt {
                    h[[x, y, z, t, 0]] += e[[x, y, z + 1, t, 1]] - e[[x, y, z, t, 1]];
                    h[[x, y, z, t, 1]] -= e[[x, y, z + 1, t, 0]] - e[[x, y, z, t, 0]];
                    h[[x, y, z, t, 2]] += e[[x, y, z + 1, t, 3]] - e[[x, y, z, t, 3]];
                    h[[x, y, z, t, 3]] -= e[[x, y, z + 1, t, 2]] - e[[x, y, z, t, 2]];
                }
            }
        }
    }
    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                for t in 0..nt.saturating_sub(1) {
                    for k in 0..4 {
                        h[[x, y, z, t, k]] -= e[[x, y, z, t + 1, k]] - e[[x, y, z, t, k]];
                    }
                }
            }
        }
    }
}

#[test]
fn zero_sources_leave_the_target_untouched() {
    let dim = (4, 4, 4, 4, 4);
    let mut e = random_field(dim, 1);
    let before = e.clone();

    update_e(&mut e, &Array5::zeros(dim));

    assert_eq!(e, before);
}

#[test]
fn update_e_matches_the_documented_table() {
    let dim = (5, 4, 3, 4, 4);
    let h = random_field(dim, 2);
    let mut fast = Array5::zeros(dim);
    let mut reference = Array5::zeros(dim);

    update_e(&mut fast, &h);
    reference_update_e(&mut reference, &h);

    assert_eq!(fast, reference);
}

#[test]
fn update_h_matches_the_documented_table() {
    let dim = (5, 4, 3, 4, 4);
    let e = random_field(dim, 3);
    let mut fast = Array5::zeros(dim);
    let mut reference = Array5::zeros(dim);

    update_h(&mut fast, &e);
    reference_update_h(&mut reference, &e);

    assert_eq!(fast, reference);
}

#[test]
fn updates_accumulate_on_top_of_existing_values() {
    let dim = (4, 4, 1, 4, 4);
    let h = random_field(dim, 4);
    let mut fast = random_field(dim, 5);
    let mut reference = fast.clone();

    update_e(&mut fast, &h);
    reference_update_e(&mut reference, &h);

    assert_eq!(fast, reference);
}

#[test]
fn degenerate_axes_contribute_nothing() {
    let dim = (1, 1, 1, 1, 4);
    let h = random_field(dim, 6);
    let mut e = Array5::zeros(dim);

    update_e(&mut e, &h);

    assert_eq!(e, Array5::zeros(dim));
}

#[test]
fn single_pulse_spreads_along_one_axis_only() {
    // A lone H3 pulse drives E0 through the x-difference: -Δx H3.
    let dim = (3, 1, 1, 1, 4);
    let mut h = Array5::zeros(dim);
    h[[1, 0, 0, 0, 3]] = 1.0;
    let mut e = Array5::zeros(dim);

    update_e(&mut e, &h);

    assert_eq!(e[[1, 0, 0, 0, 0]], -1.0);
    assert_eq!(e[[2, 0, 0, 0, 0]], 1.0);
    assert_eq!(e[[0, 0, 0, 0, 0]], 0.0);
    assert_eq!(e.iter().map(|v| v.abs()).sum::<f32>(), 2.0);
}

#[test]
fn source_component_table_is_k_xor_a_xor_3() {
    for (k, row) in SOURCE_COMPONENT.iter().enumerate() {
        for (a, &j) in row.iter().enumerate() {
            assert_eq!(j, k ^ a ^ 3);
        }
    }
}

#[test]
fn taper_profile_ramps_and_pins() {
    let lattice = Lattice::new([6, 1, 1, 1], [true, false, false, false])
        .unwrap()
        .with_margin(2)
        .unwrap();
    let taper = LossyTaper::new(&lattice);
    let ds = taper.ds();
    let loss = taper.loss();

    // linear profile along x: 0, 0.5, 1, 1, 1, 1, 1, 1, 0.5, 0
    assert_abs_diff_eq!(ds[[0, 0, 0, 0, 0]], 0.0);
    assert_abs_diff_eq!(ds[[1, 0, 0, 0, 0]], 0.75);
    assert_abs_diff_eq!(ds[[2, 0, 0, 0, 0]], 1.0);
    assert_abs_diff_eq!(ds[[5, 0, 0, 0, 3]], 1.0);
    assert_abs_diff_eq!(ds[[8, 0, 0, 0, 0]], 0.75);
    assert_abs_diff_eq!(ds[[9, 0, 0, 0, 0]], 0.0);

    // loss = 1 - (1 - linear)^2 * 0.1, then pinned at the grid edge
    assert_eq!(loss[[0, 0, 0, 0, 0]], 0.0);
    assert_eq!(loss[[9, 0, 0, 0, 2]], 0.0);
    assert_abs_diff_eq!(loss[[1, 0, 0, 0, 0]], 0.975);
    assert_abs_diff_eq!(loss[[4, 0, 0, 0, 0]], 1.0);

    assert!(ds.iter().all(|&v| (0.0..=1.0).contains(&v)));
    assert!(loss.iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn taper_is_flat_on_non_absorbing_grids() {
    let lattice = Lattice::new([3, 3, 3, 3], [false; 4]).unwrap();
    let taper = LossyTaper::new(&lattice);

    assert!(taper.ds().iter().all(|&v| v == 1.0));
    assert!(taper.loss().iter().all(|&v| v == 1.0));
}

#[test]
fn scale_into_stages_the_product() {
    let lattice = Lattice::new([4, 1, 1, 1], [false; 4]).unwrap();
    let taper = LossyTaper::new(&lattice);
    let field = random_field(lattice.padded_dim(), 7);
    let mut scratch = Array5::zeros(lattice.padded_dim());

    taper.scale_into(0.5, &field, &mut scratch);

    for (s, f) in scratch.iter().zip(field.iter()) {
        assert_abs_diff_eq!(*s, 0.5 * f);
    }
}

#[test]
fn seed_places_initial_conditions_in_the_interior() {
    let lattice = Lattice::new([2, 1, 1, 2], [true, false, false, false])
        .unwrap()
        .with_margin(2)
        .unwrap();
    let e_init = random_field(lattice.field_dim(), 8);
    let h_init = random_field(lattice.field_dim(), 9);
    let mut store = FieldStore::new(&lattice);

    store.seed(&lattice, &e_init, &h_init);

    assert_eq!(lattice.interior(&store.e), e_init);
    assert_eq!(lattice.interior(&store.h), h_init);
    assert_eq!(store.e[[0, 0, 0, 0, 0]], 0.0);
    assert_eq!(store.e[[5, 0, 0, 1, 3]], 0.0);
}

#[test]
fn history_records_the_measurement_slice() {
    let lattice = Lattice::new([2, 2, 1, 1], [false; 4]).unwrap();
    let mut store = FieldStore::new(&lattice);
    store.e.fill(2.0);
    store.h.fill(3.0);

    let mut history = History::new(&lattice, 2);
    history.record(0, &lattice, &store);
    store.e.fill(4.0);
    history.record(1, &lattice, &store);

    let (e_hist, h_hist) = history.into_parts();
    assert_eq!(e_hist.dim(), (3, 2, 2, 1, 1, 4));
    assert!(e_hist.index_axis(Axis(0), 0).iter().all(|&v| v == 2.0));
    assert!(e_hist.index_axis(Axis(0), 1).iter().all(|&v| v == 4.0));
    assert!(e_hist.index_axis(Axis(0), 2).iter().all(|&v| v == 0.0));
    assert!(h_hist.index_axis(Axis(0), 0).iter().all(|&v| v == 3.0));
}

/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

use hyperwave::boundary::Absorbing;
use hyperwave::grid::Error;
use hyperwave::{field_energy, init, Simulator};

fn main() -> Result<(), Error> {
    // A point excitation in the middle of a 50×50×1×50 grid, absorbed on
    // the x, y, and t boundaries.
    let mut fdtd = Simulator::new((50, 50, 1, 50), (true, true, false, true))?;
    fdtd.set_courant(0.45)?;
    fdtd.record_history(true);
    fdtd.add_boundary(Absorbing::new(10, 10, 0, 10));
    init::point(&mut fdtd.e_init, [25, 25, 0, 25], 3, 1.0);

    let output = fdtd.run(70)?;

    let e_history = output.e_history.expect("history was enabled");
    let h_history = output.h_history.expect("history was enabled");
    for step in (0..=70).step_by(10) {
        let e = e_history.index_axis(ndarray::Axis(0), step).to_owned();
        let h = h_history.index_axis(ndarray::Axis(0), step).to_owned();
        println!("step {step:>2}: measured energy {:.6}", field_energy(&e, &h));
    }

    Ok(())
}

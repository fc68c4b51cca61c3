/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

pub use hyperwave_sim::*;

pub mod boundary {
    pub use hyperwave_boundary::*;
}

pub mod field {
    pub use hyperwave_field::*;
}

pub mod grid {
    pub use hyperwave_grid::*;
}

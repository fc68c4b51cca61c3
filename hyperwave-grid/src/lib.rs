/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

//! Lattice geometry for the four-dimensional field solver: user shape,
//! absorbing padding, and the measurement slice connecting the two.

mod error;
mod lattice;

pub use error::*;
pub use lattice::*;

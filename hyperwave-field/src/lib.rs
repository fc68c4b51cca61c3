/*
 * This source file is part of the hyperwave open source project
 *
 * Copyright (c) 2026 hyperwave project authors
 * This program and the accompanying materials are made available under
 * the terms of the MIT License which is available at https://opensource.org/license/mit
 *
 * See https://github.com/hyperwave-sim/hyperwave for more information
 */

//! The numeric engine: field buffers, the coupled four-dimensional stencil,
//! and the lossy-taper masks applied around it.

mod stencil;
mod store;
mod taper;

pub use stencil::*;
pub use store::*;
pub use taper::*;

#[cfg(test)]
mod test;

//! Simulation engine composition for frame advancement and actor actions.
//! This file wires focused engine submodules together.

use super::*;

mod actions;
mod advance;

#[cfg(test)]
mod tests;

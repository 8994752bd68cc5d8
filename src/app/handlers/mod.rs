// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by the subsystem they talk to.

pub mod capture;
pub mod label;
pub mod permission;

#[cfg(test)]
pub(crate) mod test_support;

// Library crate: the voxel editing engine plus the headless harness and
// command protocol used by integration tests and the CLI driver.

pub mod color;
pub mod command;
pub mod config;
pub mod fixtures;
pub mod generation;
pub mod harness;
pub mod i18n;
pub mod state;

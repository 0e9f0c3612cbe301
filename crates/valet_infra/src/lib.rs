#![forbid(unsafe_code)]

pub mod config;
pub mod console;
pub mod report;

pub fn infra_bootstrapped() -> bool {
    valet_core::crate_bootstrapped()
}

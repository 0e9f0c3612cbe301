#![forbid(unsafe_code)]

pub mod alloc;
pub mod lifecycle;
pub mod lot;
pub mod system;
pub mod types;

pub fn crate_bootstrapped() -> bool {
    true
}

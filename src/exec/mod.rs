// src/exec/mod.rs

//! Process replacement layer.
//!
//! - [`image`] captures the argument vector and environment at restart time
//!   and turns them into raw `execve` arguments (or a `std::process::Command`
//!   off unix).
//! - [`backend`] provides the `Restarter` trait and the production
//!   `ExecRestarter`, which tests replace with a recording fake.

pub mod backend;
pub mod image;

pub use backend::{ExecRestarter, Restarter};
#[cfg(unix)]
pub use image::ExecArguments;
pub use image::ProcessImage;

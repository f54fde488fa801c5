// Application layer: concrete pipelines and the commands the binaries run.

#[cfg(feature = "cli")]
pub mod commands;
pub mod pipelines;

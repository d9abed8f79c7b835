//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod expand;
pub(crate) mod print;

pub(crate) use build::BuildArgs;
pub(crate) use expand::ExpandArgs;
pub(crate) use print::PrintArgs;

// crates/covergen-cli/src/cmd/mod.rs

pub mod palette;
pub mod render;

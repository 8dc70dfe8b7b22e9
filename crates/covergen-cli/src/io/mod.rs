// crates/covergen-cli/src/io/mod.rs

pub mod png;

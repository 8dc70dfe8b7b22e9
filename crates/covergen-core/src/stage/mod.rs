// crates/covergen-core/src/stage/mod.rs
//
// Pipeline stages, in run order:
//   gradient -> flow -> blur -> vibrancy
// Each takes a buffer by reference and returns a freshly allocated one.

pub mod blur;
pub mod flow;
pub mod gradient;
pub mod vibrancy;

pub use blur::{gaussian_blur, multi_scale_blur};
pub use flow::{flow_distort, FlowField};
pub use gradient::{composite, place_centers, render_gradient, ColorCenter};
pub use vibrancy::{enhance_vibrancy, VibrancyParams};

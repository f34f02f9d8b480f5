mod canvas;
pub mod nebula;

pub use canvas::NebulaCanvas;

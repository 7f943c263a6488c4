pub mod consts;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod io;
pub mod lut;
pub mod pipeline;
pub mod project;
pub mod sampler;
pub mod template;

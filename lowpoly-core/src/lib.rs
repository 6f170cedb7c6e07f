pub mod colorizer;
pub mod coord;
pub mod delaunay;
pub mod generator;
pub mod importance;
pub mod mesh;
pub mod raster;
pub mod sampler;
pub mod settings;
pub mod source;
pub mod triangle;

/// Scalar type.
pub type Scalar = f32;

/// RGB color.
pub type Color = [u8; 3];

pub mod prelude {
    pub use crate::{
        colorizer::*, coord::*, delaunay::*, generator::*, importance::*, mesh::*, raster::*,
        sampler::*, settings::*, source::*, triangle::*, Color, Scalar,
    };
}

#[cfg(feature = "parallel")]
macro_rules! into_iter {
    ($v:expr) => {
        $v.into_par_iter()
    };
}

#[cfg(not(feature = "parallel"))]
macro_rules! into_iter {
    ($v:expr) => {
        $v.into_iter()
    };
}

pub(crate) use into_iter;

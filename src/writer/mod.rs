pub mod colormap;
pub mod table;
#[cfg(feature = "mosaic")]
pub mod vrt;

pub use colormap::{ColorMap, ColorMapWriter, ColorPoint};
pub use table::write_rating_curve;
#[cfg(feature = "mosaic")]
pub use vrt::build_vrt;

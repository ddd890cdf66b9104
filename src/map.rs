//! The map snapshot consumed by a composition.

mod extent;
mod layer;
mod scene;
mod view;

pub use extent::{Extent, SpatialReference};
pub use layer::LayerDescriptor;
pub use scene::LiveScene;
pub use view::{MapView, MapViewBuilder};

mod backing;
mod factory;
mod transform;
#[allow(clippy::module_inception)]
mod view;

pub use backing::Backing;
pub use factory::{IntoView, ViewFactory, ViewFactory1D, ViewFactory2D, ViewFactory3D, unmodifiable};
pub use transform::Transform;
pub use view::View;

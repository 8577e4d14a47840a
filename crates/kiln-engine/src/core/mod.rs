//! Application-facing layer contract.

mod draw_layer;
mod layer;
mod stack;

pub use draw_layer::StaticDrawLayer;
pub use layer::{EventFlow, Layer};
pub use stack::LayerStack;

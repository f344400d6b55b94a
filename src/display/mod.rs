/// Display region, input field and the node tree rendered into them
pub mod node;
pub mod page;
pub mod region;

pub use node::Node;
pub use page::html_document;
pub use region::{DisplayRegion, InputField, Surface};

#[cfg(test)]
pub use region::MockSurface;

pub mod euclid;
pub mod shapes;

pub use euclid::*;
pub use shapes::*;

pub mod carts;
pub mod members;
pub mod products;
pub mod system;

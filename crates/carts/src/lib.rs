//! Cart domain module.
//!
//! A cart is not an aggregate that owns products: it is a set of association
//! rows, each linking one member to one product. Neither side's lifecycle is
//! owned here.

pub mod cart;
pub mod member;

pub use cart::Cart;
pub use member::Member;

//! Domain types shared by the storage and API layers.

pub mod id;
pub mod product;

pub use id::ProductId;
pub use product::Product;

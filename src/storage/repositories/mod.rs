//! Repository modules for data access

pub mod product;

pub use product::{
    CreateProductRequest, ProductRepository, SqlxProductRepository, UpdateProductRequest,
};

//! HTTP request handlers organized by resource type

pub mod products;

pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    toggle_availability_handler, update_product_handler,
};

//! Rule sets for the product routes
//!
//! The messages are part of the public API contract; clients match on them.

use super::{FieldRules, Rule, RuleSet};

pub const MSG_ID_GET: &str = "Id no valido";
pub const MSG_ID: &str = "ID no valido";
pub const MSG_NAME_EMPTY: &str = "El nombre del producto no puede ir vacio";
pub const MSG_PRICE_NOT_NUMERIC: &str = "Valor no valido";
pub const MSG_PRICE_EMPTY: &str = "El precio del producto no puede ir vacio";
pub const MSG_PRICE_NOT_POSITIVE: &str = "Precio no valido";
pub const MSG_AVAILABILITY: &str = "Valor para disponibilidad no valido";

fn name_rules() -> FieldRules {
    FieldRules::body("name").rule(Rule::NotEmpty, MSG_NAME_EMPTY)
}

fn price_rules() -> FieldRules {
    FieldRules::body("price")
        .rule(Rule::IsNumeric, MSG_PRICE_NOT_NUMERIC)
        .rule(Rule::NotEmpty, MSG_PRICE_EMPTY)
        .rule(Rule::Positive, MSG_PRICE_NOT_POSITIVE)
}

fn id_rules(message: &'static str) -> FieldRules {
    FieldRules::param("id").rule(Rule::IsInt, message)
}

/// GET `/:id`
pub fn get_product_rules() -> RuleSet {
    RuleSet::new().field(id_rules(MSG_ID_GET))
}

/// POST `/`
pub fn create_product_rules() -> RuleSet {
    RuleSet::new().field(name_rules()).field(price_rules())
}

/// PUT `/:id`
pub fn update_product_rules() -> RuleSet {
    RuleSet::new()
        .field(id_rules(MSG_ID))
        .field(name_rules())
        .field(price_rules())
        .field(FieldRules::body("availability").rule(Rule::IsBoolean, MSG_AVAILABILITY))
}

/// PATCH `/:id` and DELETE `/:id`
pub fn product_id_rules() -> RuleSet {
    RuleSet::new().field(id_rules(MSG_ID))
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Menu creation input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuInput {
    pub title: String,
    pub description: String,
}

/// Menu partial update: absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmenuInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmenuPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishInput {
    pub title: String,
    pub description: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Menu as returned to clients, with counts computed at read time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuWithCounts {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub submenus_count: u64,
    pub dishes_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmenuWithDishCount {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub menu_id: Uuid,
    pub dishes_count: u64,
}

/// Price is serialized as a string with exactly two decimals, e.g. `"12.50"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub submenu_id: Uuid,
}

impl From<models::dish::Model> for Dish {
    fn from(m: models::dish::Model) -> Self {
        let mut price = m.price;
        price.rescale(2);
        Self { id: m.id, title: m.title, description: m.description, price, submenu_id: m.submenu_id }
    }
}

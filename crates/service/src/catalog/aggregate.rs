//! Read-time aggregation of submenu and dish counts.
//!
//! Nothing here is persisted: the store reports one [`SubmenuTally`] per
//! submenu and the counts for menus are folded from those rows, so
//! `dishes_count(menu)` is by construction the sum over its submenus.

use std::collections::HashMap;

use uuid::Uuid;

use super::domain::{MenuWithCounts, SubmenuWithDishCount};

/// One submenu and the number of dishes it currently owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmenuTally {
    pub submenu_id: Uuid,
    pub menu_id: Uuid,
    pub dishes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuCounts {
    pub submenus: u64,
    pub dishes: u64,
}

/// Fold per-submenu tallies into per-menu counts.
pub fn menu_counts(tallies: &[SubmenuTally]) -> HashMap<Uuid, MenuCounts> {
    let mut out: HashMap<Uuid, MenuCounts> = HashMap::new();
    for t in tallies {
        let entry = out.entry(t.menu_id).or_default();
        entry.submenus += 1;
        entry.dishes += t.dishes;
    }
    out
}

/// Dish count per submenu.
pub fn dish_counts(tallies: &[SubmenuTally]) -> HashMap<Uuid, u64> {
    tallies.iter().map(|t| (t.submenu_id, t.dishes)).collect()
}

pub fn menu_view(m: models::menu::Model, counts: &HashMap<Uuid, MenuCounts>) -> MenuWithCounts {
    let c = counts.get(&m.id).copied().unwrap_or_default();
    MenuWithCounts {
        id: m.id,
        title: m.title,
        description: m.description,
        submenus_count: c.submenus,
        dishes_count: c.dishes,
    }
}

pub fn submenu_view(s: models::submenu::Model, counts: &HashMap<Uuid, u64>) -> SubmenuWithDishCount {
    SubmenuWithDishCount {
        dishes_count: counts.get(&s.id).copied().unwrap_or(0),
        id: s.id,
        title: s.title,
        description: s.description,
        menu_id: s.menu_id,
    }
}

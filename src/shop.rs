// server/src/shop.rs
//
// Fixed shop catalog and affordability checks. The catalog is declared as
// static data and seeded into the shop_item table when the module
// initializes, the same way item definitions are seeded elsewhere in this
// codebase. The shop is read-only for now: no reducer commits a purchase,
// so titles and inventory only change through that future extension point.

use log;
use serde::Serialize;
use spacetimedb::{ReducerContext, Table};

use crate::chat::send_private_reply;
use crate::profile;

/// Static catalog entry, declared in display order.
#[derive(Clone, Debug, Serialize)]
pub struct ShopItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u64,
    /// Honorific granted when a purchase lands.
    pub title: &'static str,
    /// Display hint (hex color) for the item's shop embed.
    pub color: &'static str,
}

pub const SHOP_CATALOG: [ShopItemDef; 3] = [
    ShopItemDef {
        id: "witch_hat",
        name: "Witch's Hat",
        cost: 50,
        title: "Certified Witch",
        color: "#9b59b6",
    },
    ShopItemDef {
        id: "pumpkin_crown",
        name: "Pumpkin Crown",
        cost: 150,
        title: "Pumpkin Royalty",
        color: "#e67e22",
    },
    ShopItemDef {
        id: "golden_ghost",
        name: "Golden Ghost",
        cost: 500,
        title: "Spectral Legend",
        color: "#f1c40f",
    },
];

#[spacetimedb::table(name = shop_item, public)]
#[derive(Clone, Debug)]
pub struct ShopItem {
    #[primary_key]
    pub id: String,
    /// Declaration order of the static catalog; listing sorts on this.
    pub sort_order: u32,
    pub name: String,
    pub cost: u64,
    pub title: String,
    pub color: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordability {
    Owned,
    Buyable,
    TooExpensive,
}

/// Validates the static catalog: non-empty unique ids and positive costs.
/// A violation here is a configuration error and fails module init.
pub fn validate_catalog(defs: &[ShopItemDef]) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for def in defs {
        if def.id.is_empty() {
            return Err("Shop item with empty id in catalog.".to_string());
        }
        if !seen.insert(def.id) {
            return Err(format!("Duplicate shop item id '{}' in catalog.", def.id));
        }
        if def.cost == 0 {
            return Err(format!("Shop item '{}' must have a positive cost.", def.id));
        }
    }
    Ok(())
}

/// The static catalog as table rows, in declaration order.
pub fn catalog_rows() -> Vec<ShopItem> {
    SHOP_CATALOG
        .iter()
        .enumerate()
        .map(|(order, def)| ShopItem {
            id: def.id.to_string(),
            sort_order: order as u32,
            name: def.name.to_string(),
            cost: def.cost,
            title: def.title.to_string(),
            color: def.color.to_string(),
        })
        .collect()
}

pub fn seed_shop_catalog(ctx: &ReducerContext) -> Result<(), String> {
    validate_catalog(&SHOP_CATALOG)?;

    let items = ctx.db.shop_item();
    if items.iter().count() > 0 {
        log::info!("Shop catalog already seeded. Skipping.");
        return Ok(());
    }

    for row in catalog_rows() {
        let id = row.id.clone();
        items
            .try_insert(row)
            .map_err(|e| format!("Failed to seed shop item '{}': {}", id, e))?;
    }
    log::info!("Seeded {} shop items.", SHOP_CATALOG.len());
    Ok(())
}

/// The catalog in declaration order. Idempotent: the table is only written
/// during init.
pub fn list_items(ctx: &ReducerContext) -> Vec<ShopItem> {
    let mut items: Vec<ShopItem> = ctx.db.shop_item().iter().collect();
    items.sort_by_key(|item| item.sort_order);
    items
}

/// Validated lookup. An unknown id is an explicit error; profiles must
/// never reference an item the catalog does not contain.
pub fn find_item(ctx: &ReducerContext, id: &str) -> Result<ShopItem, String> {
    ctx.db
        .shop_item()
        .id()
        .find(&id.to_string())
        .ok_or_else(|| format!("Unknown shop item id '{}'.", id))
}

pub fn affordability(candy: u64, inventory: &[String], item: &ShopItem) -> Affordability {
    if inventory.iter().any(|owned| owned == &item.id) {
        Affordability::Owned
    } else if candy >= item.cost {
        Affordability::Buyable
    } else {
        Affordability::TooExpensive
    }
}

fn affordability_label(status: Affordability) -> &'static str {
    match status {
        Affordability::Owned => "Owned",
        Affordability::Buyable => "You can afford this!",
        Affordability::TooExpensive => "Not enough candy",
    }
}

/// Shows the catalog with per-item affordability, privately to the caller.
#[spacetimedb::reducer]
pub fn show_shop(ctx: &ReducerContext) -> Result<(), String> {
    let prof = profile::get_or_default(ctx, ctx.sender);
    let items = list_items(ctx);
    if items.is_empty() {
        log::error!("Shop catalog table is empty; seeding never ran?");
        return Err("The shop is unavailable right now.".to_string());
    }

    let mut lines = vec!["The Spooky Shop".to_string()];
    for item in &items {
        let status = affordability(prof.candy, &prof.inventory, item);
        lines.push(format!(
            "{} | {} candy | grants the title \"{}\" | {}",
            item.name,
            item.cost,
            item.title,
            affordability_label(status)
        ));
    }
    send_private_reply(ctx, lines.join("\n"), None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_is_valid() {
        assert_eq!(SHOP_CATALOG.len(), 3);
        assert!(validate_catalog(&SHOP_CATALOG).is_ok());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let defs = [
            ShopItemDef {
                id: "witch_hat",
                name: "Witch's Hat",
                cost: 50,
                title: "Certified Witch",
                color: "#9b59b6",
            },
            ShopItemDef {
                id: "witch_hat",
                name: "Another Hat",
                cost: 60,
                title: "Hat Hoarder",
                color: "#ffffff",
            },
        ];
        assert!(validate_catalog(&defs).is_err());
    }

    #[test]
    fn zero_cost_rejected() {
        let defs = [ShopItemDef {
            id: "freebie",
            name: "Freebie",
            cost: 0,
            title: "Freeloader",
            color: "#000000",
        }];
        assert!(validate_catalog(&defs).is_err());
    }

    #[test]
    fn catalog_rows_keep_declaration_order_and_repeat_identically() {
        let first = catalog_rows();
        let second = catalog_rows();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.sort_order, b.sort_order);
            assert_eq!(a.cost, b.cost);
        }
        for (order, (row, def)) in first.iter().zip(SHOP_CATALOG.iter()).enumerate() {
            assert_eq!(row.sort_order, order as u32);
            assert_eq!(row.id, def.id);
        }
    }

    #[test]
    fn affordability_branches() {
        let rows = catalog_rows();
        let witch_hat = &rows[0];
        let owned = vec!["witch_hat".to_string()];
        assert_eq!(affordability(0, &owned, witch_hat), Affordability::Owned);
        // Ownership wins even when the balance would also cover the cost.
        assert_eq!(affordability(999, &owned, witch_hat), Affordability::Owned);
        assert_eq!(affordability(50, &[], witch_hat), Affordability::Buyable);
        assert_eq!(affordability(49, &[], witch_hat), Affordability::TooExpensive);
    }
}

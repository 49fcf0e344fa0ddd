// server/src/inventory.rs
//
// The /inventory command: balance, title, and owned shop items, shown
// privately to the caller. Fresh users see the defaults without a profile
// row being created.

use log;
use spacetimedb::ReducerContext;

use crate::chat::send_private_reply;
use crate::profile;
use crate::shop;

#[spacetimedb::reducer]
pub fn show_inventory(ctx: &ReducerContext) -> Result<(), String> {
    let prof = profile::get_or_default(ctx, ctx.sender);

    let mut lines = vec![
        format!("{} \"{}\"", prof.username, prof.title),
        format!("Candy: {}", prof.candy),
    ];
    if prof.inventory.is_empty() {
        lines.push("Items: none yet. Check out the /shop!".to_string());
    } else {
        let mut names = Vec::with_capacity(prof.inventory.len());
        for item_id in &prof.inventory {
            // An inventory entry the catalog does not know is a
            // data-integrity error, not a display fallback.
            let item = shop::find_item(ctx, item_id).map_err(|e| {
                log::error!(
                    "Profile {:?} references unknown shop item '{}'.",
                    ctx.sender,
                    item_id
                );
                e
            })?;
            names.push(item.name);
        }
        lines.push(format!("Items: {}", names.join(", ")));
    }

    send_private_reply(ctx, lines.join("\n"), None);
    Ok(())
}

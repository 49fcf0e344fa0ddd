// server/src/trick_or_treat.rs
//
// The trick-or-treat reward action: cooldown gate, random outcome, and the
// balance commit. The whole reducer runs as one transaction, so the balance
// read here is the same balance the commit applies to; concurrent actions
// for one user serialize on the profile row and no update is lost.

use log;
use spacetimedb::ReducerContext;

use crate::chat::send_private_reply;
use crate::cooldown::{self, CooldownStatus};
use crate::profile::{self, timestamp_to_ms};
use crate::reward;
use crate::TRICK_OR_TREAT_COOLDOWN_MS;

/// Runs one reward action for the calling user. `username` is the current
/// display name supplied by the invoking platform and is persisted as the
/// last-seen value on success.
#[spacetimedb::reducer]
pub fn trick_or_treat(ctx: &ReducerContext, username: String) -> Result<(), String> {
    let user_id = ctx.sender;
    let mut prof = profile::get_or_default(ctx, user_id);

    let now_ms = timestamp_to_ms(ctx.timestamp);
    let last_used_ms = timestamp_to_ms(prof.last_used);
    if let CooldownStatus::Blocked { remaining_ms } =
        cooldown::check(last_used_ms, now_ms, TRICK_OR_TREAT_COOLDOWN_MS)
    {
        log::debug!(
            "Player {:?} is on cooldown ({} ms remaining).",
            user_id,
            remaining_ms
        );
        send_private_reply(
            ctx,
            format!(
                "You already went trick-or-treating! Come back in {}.",
                cooldown::format_remaining(remaining_ms)
            ),
            None,
        );
        return Ok(());
    }

    // Draw and clamp against the transaction's own read of the balance.
    let outcome = reward::compute_outcome(prof.candy, &mut ctx.rng());
    let new_candy = reward::apply(prof.candy, outcome.candy_change);

    if !username.is_empty() {
        prof.username = username;
    }
    prof.candy = new_candy;
    prof.last_used = ctx.timestamp;
    profile::commit(ctx, prof);

    log::info!(
        "Player {:?} trick-or-treated: {:?} tier {:?}, delta {}, balance {}.",
        user_id,
        outcome.kind,
        outcome.tier,
        outcome.candy_change,
        new_candy
    );
    send_private_reply(
        ctx,
        format!("{} You now have {} candy.", outcome.message, new_candy),
        Some(outcome.color.to_string()),
    );
    Ok(())
}

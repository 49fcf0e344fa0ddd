// server/src/leaderboard.rs
//
// Global candy ranking for the /topspook command. Ranking is pure; the
// reducer collects rows from the flat profile table (one row per identity,
// the authoritative layout for the all-profiles query) and posts the
// rendered board to public chat.

use log;
use spacetimedb::{ReducerContext, Table};

use crate::chat::send_system_message;
use crate::profile::{self, profile as ProfileTableTrait};
use crate::LEADERBOARD_SIZE;

/// One profile's ranking inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardRow {
    /// Canonical text form of the identity; the deterministic tie-break
    /// key (ascending).
    pub user_key: String,
    pub username: String,
    pub title: String,
    pub candy: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardEntry {
    /// 1-based, strictly sequential; ties never share a rank.
    pub rank: u32,
    pub username: String,
    pub title: String,
    pub candy: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaderboardView {
    /// The all-profiles query could not be served. Distinct from an empty
    /// population so a degraded store never reads as "no players".
    Unavailable,
    Empty,
    Ranked(Vec<BoardEntry>),
}

/// Ranks the profile population. `None` marks the all-profiles capability
/// as unavailable. Sort key: candy descending, then user key ascending.
pub fn rank_top_n(rows: Option<Vec<BoardRow>>, n: usize) -> LeaderboardView {
    let Some(mut rows) = rows else {
        return LeaderboardView::Unavailable;
    };
    if rows.is_empty() {
        return LeaderboardView::Empty;
    }
    rows.sort_by(|a, b| {
        b.candy
            .cmp(&a.candy)
            .then_with(|| a.user_key.cmp(&b.user_key))
    });
    rows.truncate(n);
    LeaderboardView::Ranked(
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| BoardEntry {
                rank: (i + 1) as u32,
                username: row.username,
                title: row.title,
                candy: row.candy,
            })
            .collect(),
    )
}

pub fn render_view(view: &LeaderboardView) -> String {
    match view {
        LeaderboardView::Unavailable => {
            "The leaderboard is unavailable right now. Try again later.".to_string()
        }
        LeaderboardView::Empty => {
            "Nobody has gone trick-or-treating yet. Be the first!".to_string()
        }
        LeaderboardView::Ranked(entries) => {
            let mut lines = vec!["Top Spooks".to_string()];
            for entry in entries {
                lines.push(format!(
                    "#{} {} \"{}\" with {} candy",
                    entry.rank, entry.username, entry.title, entry.candy
                ));
            }
            lines.join("\n")
        }
    }
}

/// Posts the global ranking to public chat, visible to everyone.
#[spacetimedb::reducer]
pub fn show_leaderboard(ctx: &ReducerContext) -> Result<(), String> {
    log::info!("[Command] Player {:?} requested the leaderboard.", ctx.sender);

    let rows: Vec<BoardRow> = ctx
        .db
        .profile()
        .iter()
        .map(|p| BoardRow {
            user_key: profile::display_key(&p.user_id),
            username: p.username,
            title: p.title,
            candy: p.candy,
        })
        .collect();

    let view = rank_top_n(Some(rows), LEADERBOARD_SIZE);
    send_system_message(ctx, render_view(&view));
    Ok(())
}

//! Ranking of players by cumulative score.

use crate::domain::state::{GameState, Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based place; tied scores share a place.
    pub place: usize,
    pub seat: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub score: i32,
}

/// Players ordered by score, highest first. Ties keep seating order.
pub fn standings(state: &GameState) -> Vec<Standing> {
    let mut seated: Vec<(usize, &Player)> = state.players().iter().enumerate().collect();
    // sort_by is stable, so equal scores stay in seat order
    seated.sort_by(|a, b| b.1.score.cmp(&a.1.score));

    let mut out: Vec<Standing> = Vec::with_capacity(seated.len());
    for (idx, (seat, player)) in seated.into_iter().enumerate() {
        let place = match out.last() {
            Some(prev) if prev.score == player.score => prev.place,
            _ => idx + 1,
        };
        out.push(Standing {
            place,
            seat,
            player_id: player.id.clone(),
            name: player.name.clone(),
            score: player.score,
        });
    }
    out
}

/// Current leader (the winner once the game is finished).
pub fn leader(state: &GameState) -> Option<Standing> {
    standings(state).into_iter().next()
}

//! Running per-session aggregate and the fold step

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::riot::messages::{MatchRecord, Participant};

/// Multi-kill counters, serialized in the completion payload as `kills`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiKills {
    pub penta_kills: u64,
    pub quadra_kills: u64,
    pub triple_kills: u64,
    pub double_kills: u64,
}

/// Running sums behind the persona label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonaTotals {
    pub damage_to_champions: u64,
    pub damage_taken: u64,
    pub vision_score: u64,
    pub damage_to_objectives: u64,
}

/// Snapshot of a single standout game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHighlight {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub champion_name: String,
}

impl GameHighlight {
    fn of(participant: &Participant) -> Self {
        Self {
            kills: participant.kills,
            deaths: participant.deaths,
            assists: participant.assists,
            champion_name: participant.champion_name.clone(),
        }
    }
}

/// Best kills/deaths game; only games with at least one death qualify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KdaHighlight {
    pub kd: f64,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub champion_name: String,
}

/// Games shared with one teammate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartnerRecord {
    pub games: u32,
    pub wins: u32,
}

/// Everything a session accumulates for its target player.
///
/// One value per session, mutated only through [`AggregateState::fold`].
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    pub games_played: u32,
    pub kills: u64,
    pub deaths: u64,
    pub assists: u64,
    pub time_dead: u64,
    pub multi_kills: MultiKills,
    pub wins: u32,
    pub losses: u32,
    pub roles: IndexMap<String, u32>,
    pub persona: PersonaTotals,
    pub most_kills_game: Option<GameHighlight>,
    pub most_deaths_game: Option<GameHighlight>,
    pub best_kda_game: Option<KdaHighlight>,
    pub partners: IndexMap<String, PartnerRecord>,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one match into the aggregate.
    ///
    /// Returns `false` without touching anything when `puuid` did not
    /// play in the match.
    pub fn fold(&mut self, record: &MatchRecord, puuid: &str) -> bool {
        let Some(player) = record.participant(puuid) else {
            return false;
        };

        self.add_totals(player);
        self.update_highlights(player);
        self.update_best_kda(player);
        self.update_partners(record, player);
        true
    }

    fn add_totals(&mut self, player: &Participant) {
        self.games_played += 1;
        self.kills += u64::from(player.kills);
        self.deaths += u64::from(player.deaths);
        self.assists += u64::from(player.assists);
        self.time_dead += player.total_time_spent_dead;

        self.multi_kills.penta_kills += u64::from(player.penta_kills);
        self.multi_kills.quadra_kills += u64::from(player.quadra_kills);
        self.multi_kills.triple_kills += u64::from(player.triple_kills);
        self.multi_kills.double_kills += u64::from(player.double_kills);

        *self
            .roles
            .entry(player.team_position.clone())
            .or_default() += 1;

        if player.win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        self.persona.damage_to_champions += player.total_damage_dealt_to_champions;
        self.persona.damage_taken += player.total_damage_taken;
        self.persona.vision_score += player.vision_score;
        self.persona.damage_to_objectives += player.damage_dealt_to_objectives;
    }

    fn update_highlights(&mut self, player: &Participant) {
        let more_kills = self
            .most_kills_game
            .as_ref()
            .map_or(true, |best| player.kills > best.kills);
        if more_kills {
            self.most_kills_game = Some(GameHighlight::of(player));
        }

        let more_deaths = self
            .most_deaths_game
            .as_ref()
            .map_or(true, |worst| player.deaths > worst.deaths);
        if more_deaths {
            self.most_deaths_game = Some(GameHighlight::of(player));
        }
    }

    fn update_best_kda(&mut self, player: &Participant) {
        if player.deaths == 0 {
            return;
        }

        let kd = f64::from(player.kills) / f64::from(player.deaths);
        let replace = match &self.best_kda_game {
            None => true,
            Some(best) => kd > best.kd || (kd == best.kd && player.kills > best.kills),
        };

        if replace {
            self.best_kda_game = Some(KdaHighlight {
                kd,
                kills: player.kills,
                deaths: player.deaths,
                assists: player.assists,
                champion_name: player.champion_name.clone(),
            });
        }
    }

    fn update_partners(&mut self, record: &MatchRecord, player: &Participant) {
        let teammates = record
            .info
            .participants
            .iter()
            .filter(|p| p.team_id == player.team_id && p.puuid != player.puuid);

        for teammate in teammates {
            let partner = self.partners.entry(teammate.puuid.clone()).or_default();
            partner.games += 1;
            if player.win {
                partner.wins += 1;
            }
        }
    }
}

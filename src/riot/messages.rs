//! Riot match-v5 wire types

use serde::{Deserialize, Serialize};

/// Match detail as returned by `/lol/match/v5/matches/{matchId}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

impl MatchRecord {
    /// Find the entry for the given player, if they played in this match
    pub fn participant(&self, puuid: &str) -> Option<&Participant> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    #[serde(default)]
    pub match_id: String,
    /// Participant puuids in the same order as `info.participants`
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default)]
    pub game_creation: i64,
    #[serde(default)]
    pub game_duration: i64,
    #[serde(default)]
    pub queue_id: i32,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// Per-player facts for one match. Absent numeric fields decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participant {
    pub puuid: String,
    pub champion_name: String,
    pub team_id: u32,
    /// TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY or empty for modes without lanes
    pub team_position: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_time_spent_dead: u64,
    pub double_kills: u32,
    pub triple_kills: u32,
    pub quadra_kills: u32,
    pub penta_kills: u32,
    pub total_damage_dealt_to_champions: u64,
    pub total_damage_taken: u64,
    pub vision_score: u64,
    pub damage_dealt_to_objectives: u64,
}

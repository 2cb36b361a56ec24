//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use match_insights::common::errors::{ClientError, Result};
use match_insights::riot::messages::{MatchInfo, MatchMetadata, MatchRecord, Participant};
use match_insights::{MatchId, MatchSource, Region};
use once_cell::sync::Lazy;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Player every fixture analyzes
pub const TARGET: &str = "target-puuid";

/// Create a participant with the main stat line set
pub fn participant(puuid: &str, team_id: u32, kills: u32, deaths: u32, assists: u32, win: bool) -> Participant {
    Participant {
        puuid: puuid.to_string(),
        champion_name: "Ahri".to_string(),
        team_id,
        team_position: "MIDDLE".to_string(),
        win,
        kills,
        deaths,
        assists,
        ..Default::default()
    }
}

/// Create a match record from its participants
pub fn match_record(match_id: &str, participants: Vec<Participant>) -> MatchRecord {
    MatchRecord {
        metadata: MatchMetadata {
            match_id: match_id.to_string(),
            participants: participants.iter().map(|p| p.puuid.clone()).collect(),
        },
        info: MatchInfo {
            participants,
            ..Default::default()
        },
    }
}

/// One scripted response of [`ScriptedSource`]
#[derive(Debug, Clone)]
pub enum Step {
    Match(MatchRecord),
    RateLimited(Option<u64>),
    NotFound,
    Forbidden,
}

/// In-memory match source replaying scripted responses per match id
#[derive(Default)]
pub struct ScriptedSource {
    steps: Mutex<HashMap<String, VecDeque<Step>>>,
    pages: Mutex<VecDeque<Vec<MatchId>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue responses for a match id, consumed in order
    pub fn script(self, match_id: &str, steps: Vec<Step>) -> Self {
        self.steps
            .lock()
            .unwrap()
            .entry(match_id.to_string())
            .or_default()
            .extend(steps);
        self
    }

    /// Queue a match that answers immediately
    pub fn with_match(self, record: MatchRecord) -> Self {
        let id = record.metadata.match_id.clone();
        self.script(&id, vec![Step::Match(record)])
    }

    /// Queue one page of the id listing
    pub fn with_page(self, ids: Vec<MatchId>) -> Self {
        self.pages.lock().unwrap().push_back(ids);
        self
    }

    /// Match ids requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MatchSource for ScriptedSource {
    async fn fetch_match_detail(&self, match_id: &str, _region: Region) -> Result<MatchRecord> {
        self.calls.lock().unwrap().push(match_id.to_string());
        let step = self
            .steps
            .lock()
            .unwrap()
            .get_mut(match_id)
            .and_then(|queue| queue.pop_front());

        match step {
            Some(Step::Match(record)) => Ok(record),
            Some(Step::RateLimited(retry_after_seconds)) => Err(ClientError::RateLimit {
                message: "Rate limit exceeded".to_string(),
                retry_after_seconds,
            }),
            Some(Step::Forbidden) => Err(ClientError::Authentication("Forbidden".to_string())),
            Some(Step::NotFound) | None => Err(ClientError::NotFound(match_id.to_string())),
        }
    }

    async fn list_match_ids(
        &self,
        _puuid: &str,
        _region: Region,
        _start_time: i64,
        _offset: u32,
        _count: u32,
    ) -> Result<Vec<MatchId>> {
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Sample API responses for testing
pub mod api_responses {
    use super::*;

    /// Sample match detail with the target on team 100 next to one ally
    pub static MATCH_DETAIL: Lazy<serde_json::Value> = Lazy::new(|| {
        serde_json::json!({
            "metadata": {
                "matchId": "EUW1_7000000001",
                "participants": [TARGET, "ally-puuid", "enemy-puuid"]
            },
            "info": {
                "gameCreation": 1767300000000i64,
                "gameDuration": 1712,
                "queueId": 420,
                "participants": [
                    {
                        "puuid": TARGET,
                        "championName": "Thresh",
                        "teamId": 100,
                        "teamPosition": "UTILITY",
                        "win": true,
                        "kills": 2,
                        "deaths": 3,
                        "assists": 17,
                        "totalTimeSpentDead": 64,
                        "doubleKills": 0,
                        "tripleKills": 0,
                        "quadraKills": 0,
                        "pentaKills": 0,
                        "totalDamageDealtToChampions": 8400,
                        "totalDamageTaken": 21000,
                        "visionScore": 71,
                        "damageDealtToObjectives": 1200
                    },
                    {
                        "puuid": "ally-puuid",
                        "championName": "Jinx",
                        "teamId": 100,
                        "teamPosition": "BOTTOM",
                        "win": true,
                        "kills": 11,
                        "deaths": 2,
                        "assists": 6
                    },
                    {
                        "puuid": "enemy-puuid",
                        "championName": "Darius",
                        "teamId": 200,
                        "teamPosition": "TOP",
                        "win": false,
                        "kills": 4,
                        "deaths": 7,
                        "assists": 1
                    }
                ]
            }
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_match_detail_parses() {
        let record: MatchRecord =
            serde_json::from_value(api_responses::MATCH_DETAIL.clone()).unwrap();
        assert_eq!(record.info.participants.len(), 3);
        assert_eq!(record.participant(TARGET).unwrap().vision_score, 71);
    }
}

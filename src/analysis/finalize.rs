//! Derived summary computed once from a finished aggregate

use serde::{Deserialize, Serialize};

use super::aggregate::{AggregateState, GameHighlight, KdaHighlight, MultiKills};

/// Role label reported when no match contributed a role
pub const UNKNOWN_ROLE: &str = "UNKNOWN";

/// Minimum shared games before a teammate can be the best duo
pub const MIN_DUO_GAMES: u32 = 5;

/// Play-style label picked from the largest persona total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "The Carry")]
    Carry,
    #[serde(rename = "The Unkillable Tank")]
    UnkillableTank,
    #[serde(rename = "The Visionary")]
    Visionary,
    #[serde(rename = "The Objective Fiend")]
    ObjectiveFiend,
    #[serde(rename = "The All-Rounder")]
    AllRounder,
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Persona::Carry => "The Carry",
            Persona::UnkillableTank => "The Unkillable Tank",
            Persona::Visionary => "The Visionary",
            Persona::ObjectiveFiend => "The Objective Fiend",
            Persona::AllRounder => "The All-Rounder",
        };
        write!(f, "{}", label)
    }
}

/// Teammate with the best win rate over at least [`MIN_DUO_GAMES`] games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestDuo {
    pub puuid: String,
    pub games: u32,
    /// Percentage, 0 to 100
    pub win_rate: f64,
}

/// Payload of the `complete` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub most_common_role: String,
    pub kills: MultiKills,
    /// Two-decimal string, e.g. `"3.67"`
    pub total_kda: String,
    pub total_time_dead: u64,
    pub most_kills_game: Option<GameHighlight>,
    pub most_deaths_game: Option<GameHighlight>,
    pub best_kda_game: Option<KdaHighlight>,
    pub player_persona: Persona,
    pub best_duo: Option<BestDuo>,
    pub wins: u32,
    pub losses: u32,
}

/// Left-to-right scan keeping the first item with the largest score.
/// Later items replace the incumbent only when strictly greater.
fn first_max_by<T, S, F>(items: impl IntoIterator<Item = T>, mut score: F) -> Option<T>
where
    S: PartialOrd,
    F: FnMut(&T) -> S,
{
    let mut best: Option<(T, S)> = None;
    for item in items {
        let value = score(&item);
        let replace = match &best {
            None => true,
            Some((_, top)) => value > *top,
        };
        if replace {
            best = Some((item, value));
        }
    }
    best.map(|(item, _)| item)
}

/// (kills + assists) / deaths to two decimals, with zero deaths counted
/// as one. Exact halves round up.
pub fn total_kda(state: &AggregateState) -> String {
    let deaths = state.deaths.max(1);
    let hundredths = ((state.kills + state.assists) * 200 + deaths) / (2 * deaths);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

pub fn most_common_role(state: &AggregateState) -> String {
    first_max_by(state.roles.iter(), |(_, count)| **count)
        .map(|(role, _)| role.to_string())
        .unwrap_or_else(|| UNKNOWN_ROLE.to_string())
}

pub fn player_persona(state: &AggregateState) -> Persona {
    let totals = [
        (Persona::Carry, state.persona.damage_to_champions),
        (Persona::UnkillableTank, state.persona.damage_taken),
        (Persona::Visionary, state.persona.vision_score),
        (Persona::ObjectiveFiend, state.persona.damage_to_objectives),
    ];

    first_max_by(totals, |(_, total)| *total)
        .map(|(persona, _)| persona)
        .unwrap_or(Persona::AllRounder)
}

pub fn best_duo(state: &AggregateState) -> Option<BestDuo> {
    let eligible = state
        .partners
        .iter()
        .filter(|(_, record)| record.games >= MIN_DUO_GAMES);

    first_max_by(eligible, |(_, record)| {
        f64::from(record.wins) / f64::from(record.games)
    })
    .map(|(puuid, record)| BestDuo {
        puuid: puuid.to_string(),
        games: record.games,
        win_rate: f64::from(record.wins) / f64::from(record.games) * 100.0,
    })
}

/// Compute every derived field of the completion payload
pub fn finalize(state: &AggregateState) -> AnalysisSummary {
    AnalysisSummary {
        most_common_role: most_common_role(state),
        kills: state.multi_kills,
        total_kda: total_kda(state),
        total_time_dead: state.time_dead,
        most_kills_game: state.most_kills_game.clone(),
        most_deaths_game: state.most_deaths_game.clone(),
        best_kda_game: state.best_kda_game.clone(),
        player_persona: player_persona(state),
        best_duo: best_duo(state),
        wins: state.wins,
        losses: state.losses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::PartnerRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_total_kda_rounding_and_zero_deaths() {
        let mut state = AggregateState::new();
        state.kills = 7;
        state.assists = 4;
        state.deaths = 3;
        assert_eq!(total_kda(&state), "3.67");

        state.deaths = 0;
        assert_eq!(total_kda(&state), "11.00");

        assert_eq!(total_kda(&AggregateState::new()), "0.00");

        state.kills = 3;
        state.assists = 2;
        state.deaths = 8;
        assert_eq!(total_kda(&state), "0.63");

        state.kills = 1;
        state.assists = 0;
        assert_eq!(total_kda(&state), "0.13");

        state.deaths = 3;
        assert_eq!(total_kda(&state), "0.33");
    }

    #[test]
    fn test_most_common_role_first_max_wins() {
        let mut state = AggregateState::new();
        assert_eq!(most_common_role(&state), UNKNOWN_ROLE);

        *state.roles.entry("JUNGLE".to_string()).or_default() += 2;
        *state.roles.entry("TOP".to_string()).or_default() += 2;
        assert_eq!(most_common_role(&state), "JUNGLE");

        *state.roles.entry("TOP".to_string()).or_default() += 1;
        assert_eq!(most_common_role(&state), "TOP");
    }

    #[test]
    fn test_persona_selection() {
        let mut state = AggregateState::new();
        // all zero: first entry in the fixed order
        assert_eq!(player_persona(&state), Persona::Carry);

        state.persona.damage_to_champions = 100;
        state.persona.damage_taken = 250;
        state.persona.damage_to_objectives = 250;
        assert_eq!(player_persona(&state), Persona::UnkillableTank);

        state.persona.vision_score = 900;
        assert_eq!(player_persona(&state), Persona::Visionary);
    }

    #[test]
    fn test_persona_labels_serialize() {
        let json = serde_json::to_string(&Persona::ObjectiveFiend).unwrap();
        assert_eq!(json, "\"The Objective Fiend\"");
        assert_eq!(Persona::AllRounder.to_string(), "The All-Rounder");
    }

    #[test]
    fn test_best_duo_threshold_and_rate() {
        let mut state = AggregateState::new();
        state.partners.insert("four".to_string(), PartnerRecord { games: 4, wins: 4 });
        assert_eq!(best_duo(&state), None);

        state.partners.insert("b".to_string(), PartnerRecord { games: 10, wins: 9 });
        state.partners.insert("a".to_string(), PartnerRecord { games: 5, wins: 5 });
        let duo = best_duo(&state).unwrap();
        assert_eq!(duo.puuid, "a");
        assert_eq!(duo.games, 5);
        assert_eq!(duo.win_rate, 100.0);
    }

    #[test]
    fn test_best_duo_tie_keeps_first_seen() {
        let mut state = AggregateState::new();
        state.partners.insert("first".to_string(), PartnerRecord { games: 6, wins: 3 });
        state.partners.insert("second".to_string(), PartnerRecord { games: 10, wins: 5 });
        let duo = best_duo(&state).unwrap();
        assert_eq!(duo.puuid, "first");
        assert_eq!(duo.win_rate, 50.0);
    }

    #[test]
    fn test_summary_serializes_wire_names() {
        let summary = finalize(&AggregateState::new());
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["mostCommonRole"], "UNKNOWN");
        assert_eq!(value["totalKda"], "0.00");
        assert_eq!(value["kills"]["pentaKills"], 0);
        assert!(value["bestKdaGame"].is_null());
        assert!(value["bestDuo"].is_null());
        assert_eq!(value["playerPersona"], "The Carry");
    }
}

mod rotation;
mod standings;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use landlord_bot::bot::{BotDifficulty, BotParams, UnseenTracker};
use landlord_bot::policy::{Decision, HeuristicPolicy, Policy, PolicyContext};
use landlord_core::game::match_state::MatchState;
use landlord_core::model::deck::DeckConfig;
use landlord_core::model::player::{Player, PlayerId};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AgentConfig, AgentKind, BenchmarkConfig, ResolvedOutputs};
use crate::logging::telemetry_path;

use rotation::SeatRotations;
pub use standings::{AgentStanding, Standings};

const MIN_SEATS: usize = 3;
const MAX_SEATS: usize = u8::MAX as usize;
/// Turns after which a game is abandoned as stalled.
pub const MAX_TURNS: usize = 5_000;

/// Primary entry point for orchestrating tournaments.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    rotations: SeatRotations,
    logging_enabled: bool,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub games_played: usize,
    pub rotations: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
    pub standings: Standings,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;

        if !(MIN_SEATS..=MAX_SEATS).contains(&agents.len()) {
            return Err(RunnerError::SeatCount {
                found: agents.len(),
            });
        }

        if config.games.rotations > agents.len() {
            return Err(RunnerError::RotationLimit {
                requested: config.games.rotations,
                max: agents.len(),
            });
        }

        let rotations = SeatRotations::new(agents.len(), config.games.rotations);

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
            rotations,
        })
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut standings = Standings::new(self.agents.iter().map(|agent| agent.name.clone()));
        let mut rows_written = 0usize;

        for game_index in 0..self.config.games.games {
            let game_seed = rng.next_u64();

            for (rotation_index, seating) in self.rotations.as_slice().iter().enumerate() {
                let outcome = self.play_game(game_index, rotation_index, game_seed, seating)?;
                standings.record_game(&outcome);
                rows_written += write_game_rows(
                    &mut writer,
                    &self.config,
                    game_index,
                    rotation_index,
                    game_seed,
                    &outcome,
                )?;
            }
        }

        writer.flush()?;
        standings.write_markdown(
            &self.outputs.summary_md,
            &self.config.run_id,
            self.config.games.games,
            self.rotations.as_slice().len(),
        )?;

        Ok(RunSummary {
            games_played: self.config.games.games,
            rotations: self.rotations.as_slice().len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path: self
                .logging_enabled
                .then(|| telemetry_path(&self.outputs)),
            standings,
        })
    }

    fn play_game(
        &self,
        game_index: usize,
        rotation_index: usize,
        game_seed: u64,
        seating: &[usize],
    ) -> Result<GameOutcome, RunnerError> {
        let mut seats = build_seat_states(seating, &self.agents)?;
        let roster = seats
            .iter()
            .map(|seat| Player::new(seat.id.0, seat.agent_name.clone()))
            .collect();
        let deck = DeckConfig::with_copies(self.config.table.deck_copies);
        let mut match_state = MatchState::with_seed(roster, deck, game_seed)
            .map_err(|err| RunnerError::game(format!("table setup failed: {err}")))?;

        let mut turns = 0usize;
        while !match_state.is_finished() {
            if turns >= MAX_TURNS {
                return Err(RunnerError::Stalled {
                    game_index,
                    rotation_index,
                    turns,
                });
            }

            let actor = match_state.turn_holder();
            let view = match_state.project_state(actor).ok_or_else(|| {
                RunnerError::game(format!("no seat for turn holder {actor}"))
            })?;
            let seat = &mut seats[actor.index()];
            let tracker = UnseenTracker::from_view(&view);

            let start = Instant::now();
            let decision = seat.policy.decide(&PolicyContext::new(&view, &tracker));
            let elapsed_ms = seat.metrics.record(start.elapsed());

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                let action = if decision.is_pass() { "pass" } else { "play" };
                let cards = decision
                    .play()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                event!(
                    target: "landlord_bench::play",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    game_index = game_index as u32,
                    rotation_index = rotation_index as u32,
                    seat = %actor,
                    agent = %seat.agent_name,
                    action,
                    cards = %cards,
                    hand_before = view.hand.len() as u32,
                    elapsed_ms
                );
            }

            match decision {
                Decision::Play(play) => {
                    seat.plays += 1;
                    match_state.apply_play(actor, play.cards()).map_err(|err| {
                        RunnerError::game(format!("{actor} played {play}: {err}"))
                    })?;
                }
                Decision::Pass => {
                    seat.passes += 1;
                    match_state
                        .pass(actor)
                        .map_err(|err| RunnerError::game(format!("{actor} passed: {err}")))?;
                }
            }
            turns += 1;
        }

        let winner = match_state
            .winner()
            .ok_or_else(|| RunnerError::game("game finished without a winner".to_string()))?;

        let seating = seats
            .iter()
            .map(|seat| SeatSnapshot {
                seat: seat.id.to_string(),
                agent: seat.agent_name.clone(),
            })
            .collect();

        let mut seat_results = Vec::with_capacity(seats.len());
        for mut seat in seats {
            seat.policy.observe_winner(winner);
            seat_results.push(SeatResult {
                cards_left: match_state.round().card_count(seat.id).unwrap_or(0),
                won: seat.id == winner,
                agent_index: seat.agent_index,
                agent_name: seat.agent_name,
                seat: seat.id,
                plays: seat.plays,
                passes: seat.passes,
                metrics: seat.metrics.finalize(),
            });
        }

        Ok(GameOutcome {
            seating,
            seat_results,
            winner,
            turns,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_rows(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    game_index: usize,
    rotation_index: usize,
    game_seed: u64,
    outcome: &GameOutcome,
) -> Result<usize, RunnerError> {
    let game_id = format!("G{game_index:05}_R{rotation_index:02}");

    let mut rows_written = 0usize;
    for seat_result in &outcome.seat_results {
        let row = GameLogRow {
            run_id: config.run_id.clone(),
            game_id: game_id.clone(),
            game_index,
            rotation_index,
            game_seed,
            deck_copies: config.table.deck_copies,
            seat: seat_result.seat.to_string(),
            agent: seat_result.agent_name.clone(),
            seating: outcome.seating.clone(),
            winner: seat_result.won,
            cards_left: seat_result.cards_left,
            plays: seat_result.plays,
            passes: seat_result.passes,
            turns: outcome.turns,
            speed_ms_turn: seat_result.metrics.avg_ms_per_decision,
            decisions: seat_result.metrics.decisions,
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn build_seat_states(
    seating: &[usize],
    agents: &[AgentBlueprint],
) -> Result<Vec<SeatState>, RunnerError> {
    let mut seats = Vec::with_capacity(seating.len());
    for (seat_idx, agent_idx) in seating.iter().enumerate() {
        let agent = agents.get(*agent_idx).ok_or(RunnerError::InvalidSeating {
            index: seat_idx,
            agent_index: *agent_idx,
        })?;
        let id = u8::try_from(seat_idx)
            .map_err(|_| RunnerError::SeatCount {
                found: seating.len(),
            })
            .map(PlayerId)?;
        seats.push(SeatState::new(id, *agent_idx, agent));
    }
    Ok(seats)
}

struct SeatState {
    id: PlayerId,
    agent_index: usize,
    agent_name: String,
    policy: Box<dyn Policy>,
    plays: u32,
    passes: u32,
    metrics: DecisionMetrics,
}

impl SeatState {
    fn new(id: PlayerId, agent_index: usize, agent: &AgentBlueprint) -> Self {
        Self {
            id,
            agent_index,
            agent_name: agent.name.clone(),
            policy: agent.spawn_policy(),
            plays: 0,
            passes: 0,
            metrics: DecisionMetrics::default(),
        }
    }
}

pub struct GameOutcome {
    pub seating: Vec<SeatSnapshot>,
    pub seat_results: Vec<SeatResult>,
    pub winner: PlayerId,
    pub turns: usize,
}

#[derive(Clone, Serialize)]
pub struct SeatSnapshot {
    pub seat: String,
    pub agent: String,
}

pub struct SeatResult {
    /// Position of the agent in the configuration's `agents` list.
    pub agent_index: usize,
    pub agent_name: String,
    pub seat: PlayerId,
    pub won: bool,
    pub cards_left: usize,
    pub plays: u32,
    pub passes: u32,
    pub metrics: DecisionSummary,
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) -> f64 {
        self.total += duration;
        self.decisions += 1;
        duration.as_secs_f64() * 1000.0
    }

    fn finalize(self) -> DecisionSummary {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            total_ms: self.total.as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Clone)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
    pub total_ms: f64,
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    rotation_index: usize,
    game_seed: u64,
    deck_copies: u8,
    seat: String,
    agent: String,
    seating: Vec<SeatSnapshot>,
    winner: bool,
    cards_left: usize,
    plays: u32,
    passes: u32,
    turns: usize,
    speed_ms_turn: f64,
    decisions: u32,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("game {game_index} rotation {rotation_index} stalled after {turns} turns")]
    Stalled {
        game_index: usize,
        rotation_index: usize,
        turns: usize,
    },
    #[error("a table seats 3 to 255 agents but found {found}")]
    SeatCount { found: usize },
    #[error("requested {requested} seat rotations exceeds maximum of {max}")]
    RotationLimit { requested: usize, max: usize },
    #[error("seat {index} references invalid agent index {agent_index}")]
    InvalidSeating { index: usize, agent_index: usize },
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid heuristic parameter for agent '{name}': {message}")]
    InvalidHeuristicParam { name: String, message: String },
}

struct AgentBlueprint {
    name: String,
    implementation: AgentImplementation,
}

enum AgentImplementation {
    Heuristic(HeuristicOptions),
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, AgentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let implementation = match config.kind {
            AgentKind::Heuristic => {
                let options = HeuristicOptions::from_params(&config.name, &config.params)?;
                AgentImplementation::Heuristic(options)
            }
        };

        Ok(Self {
            name: config.name.clone(),
            implementation,
        })
    }

    fn spawn_policy(&self) -> Box<dyn Policy> {
        match &self.implementation {
            AgentImplementation::Heuristic(opts) => {
                Box::new(HeuristicPolicy::with_params(opts.difficulty, opts.params))
            }
        }
    }
}

/// Raw `params` block of a heuristic agent. Every field is optional and
/// falls back to the bot's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HeuristicParamsBlock {
    difficulty: Option<String>,
    high_card_weight: Option<i32>,
    break_cost_limit: Option<f32>,
    pair_leftover_cost: Option<f32>,
    single_leftover_cost: Option<f32>,
    endgame_fraction: Option<f32>,
    midgame_fraction: Option<f32>,
    bomb_owner_cards: Option<usize>,
    bomb_self_cards: Option<usize>,
}

struct HeuristicOptions {
    difficulty: BotDifficulty,
    params: BotParams,
}

impl HeuristicOptions {
    fn from_params(name: &str, params: &serde_yaml::Value) -> Result<Self, AgentError> {
        let invalid = |message: String| AgentError::InvalidHeuristicParam {
            name: name.to_string(),
            message,
        };

        let block: HeuristicParamsBlock = if params.is_null() {
            HeuristicParamsBlock::default()
        } else {
            serde_yaml::from_value(params.clone()).map_err(|err| invalid(err.to_string()))?
        };

        let difficulty = match block.difficulty.as_deref() {
            None => BotDifficulty::Normal,
            Some(text) => BotDifficulty::parse(text)
                .ok_or_else(|| invalid(format!("unknown difficulty '{text}'")))?,
        };

        let mut bot = BotParams::default();
        if let Some(value) = block.high_card_weight {
            bot.high_card_weight = value;
        }
        if let Some(value) = block.break_cost_limit {
            bot.break_cost_limit = value;
        }
        if let Some(value) = block.pair_leftover_cost {
            bot.pair_leftover_cost = value;
        }
        if let Some(value) = block.single_leftover_cost {
            bot.single_leftover_cost = value;
        }
        if let Some(value) = block.endgame_fraction {
            bot.endgame_fraction = value;
        }
        if let Some(value) = block.midgame_fraction {
            bot.midgame_fraction = value;
        }
        if let Some(value) = block.bomb_owner_cards {
            bot.bomb_owner_cards = value;
        }
        if let Some(value) = block.bomb_self_cards {
            bot.bomb_self_cards = value;
        }

        if !(0.0..=1.0).contains(&bot.endgame_fraction)
            || !(0.0..=1.0).contains(&bot.midgame_fraction)
            || bot.endgame_fraction > bot.midgame_fraction
        {
            return Err(invalid(
                "phase fractions must satisfy 0 <= endgame <= midgame <= 1".to_string(),
            ));
        }

        Ok(Self {
            difficulty,
            params: bot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> serde_yaml::Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn heuristic_params_default_to_normal() {
        let params = serde_yaml::Value::Mapping(Default::default());
        let options = HeuristicOptions::from_params("bot", &params).unwrap();
        assert_eq!(options.difficulty, BotDifficulty::Normal);
        assert_eq!(options.params, BotParams::default());
    }

    #[test]
    fn heuristic_params_parse_easy_and_overrides() {
        let params = yaml("difficulty: easy\nbreak_cost_limit: 5.5\nbomb_owner_cards: 2\n");
        let options = HeuristicOptions::from_params("bot", &params).unwrap();
        assert_eq!(options.difficulty, BotDifficulty::Easy);
        assert_eq!(options.params.break_cost_limit, 5.5);
        assert_eq!(options.params.bomb_owner_cards, 2);
        assert_eq!(options.params.high_card_weight, 2);
    }

    #[test]
    fn heuristic_params_reject_unknown_keys_and_difficulties() {
        let err = HeuristicOptions::from_params("bot", &yaml("difficulty: brutal\n"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("brutal"));

        assert!(HeuristicOptions::from_params("bot", &yaml("style: cautious\n")).is_err());
        assert!(
            HeuristicOptions::from_params("bot", &yaml("endgame_fraction: 0.9\n")).is_err()
        );
    }

    #[test]
    fn seat_states_follow_the_rotation() {
        let configs: Vec<AgentConfig> = ["a", "b", "c"]
            .into_iter()
            .map(|name| AgentConfig {
                name: name.to_string(),
                kind: AgentKind::Heuristic,
                params: serde_yaml::Value::Null,
            })
            .collect();
        let agents = AgentBlueprint::from_configs(&configs).unwrap();

        let seats = build_seat_states(&[2, 0, 1], &agents).unwrap();
        let names: Vec<&str> = seats.iter().map(|s| s.agent_name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(seats[0].id, PlayerId(0));

        assert!(matches!(
            build_seat_states(&[0, 1, 7], &agents),
            Err(RunnerError::InvalidSeating { index: 2, agent_index: 7 })
        ));
    }
}

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use super::GameOutcome;

/// Running totals for one configured agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentStanding {
    pub name: String,
    pub games: usize,
    pub wins: usize,
    pub cards_left: usize,
    pub decisions: u64,
    pub total_ms: f64,
}

impl AgentStanding {
    fn new(name: String) -> Self {
        Self {
            name,
            games: 0,
            wins: 0,
            cards_left: 0,
            decisions: 0,
            total_ms: 0.0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    pub fn avg_cards_left(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.cards_left as f64 / self.games as f64
        }
    }

    pub fn avg_ms_per_decision(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.total_ms / self.decisions as f64
        }
    }
}

/// Win tally across every table of a run, in configuration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    agents: Vec<AgentStanding>,
}

impl Standings {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            agents: names.into_iter().map(AgentStanding::new).collect(),
        }
    }

    pub fn agents(&self) -> &[AgentStanding] {
        &self.agents
    }

    pub fn total_wins(&self) -> usize {
        self.agents.iter().map(|agent| agent.wins).sum()
    }

    pub fn record_game(&mut self, outcome: &GameOutcome) {
        for result in &outcome.seat_results {
            let Some(agent) = self.agents.get_mut(result.agent_index) else {
                continue;
            };
            agent.games += 1;
            agent.wins += usize::from(result.won);
            agent.cards_left += result.cards_left;
            agent.decisions += u64::from(result.metrics.decisions);
            agent.total_ms += result.metrics.total_ms;
        }
    }

    /// Ranked by wins, then fewer cards left; ties keep configuration order.
    pub fn ranked(&self) -> Vec<&AgentStanding> {
        let mut ranked: Vec<&AgentStanding> = self.agents.iter().collect();
        ranked.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| a.cards_left.cmp(&b.cards_left))
        });
        ranked
    }

    pub fn render_markdown(&self, run_id: &str, games: usize, rotations: usize) -> String {
        let mut out = String::new();
        out.push_str("# Tournament Summary\n\n");
        let _ = writeln!(
            out,
            "Run `{run_id}`: {games} deals x {rotations} rotations ({} tables)\n",
            games * rotations
        );
        out.push_str("| Agent | Games | Wins | Win % | Avg cards left | Avg ms/decision |\n");
        out.push_str("|-------|-------|------|-------|----------------|-----------------|\n");

        for agent in self.ranked() {
            let _ = writeln!(
                out,
                "| {name} | {games} | {wins} | {win:.1}% | {left:.2} | {latency:.3} |",
                name = agent.name,
                games = agent.games,
                wins = agent.wins,
                win = agent.win_rate() * 100.0,
                left = agent.avg_cards_left(),
                latency = agent.avg_ms_per_decision(),
            );
        }
        out
    }

    pub fn write_markdown(
        &self,
        path: impl AsRef<Path>,
        run_id: &str,
        games: usize,
        rotations: usize,
    ) -> io::Result<()> {
        fs::write(path, self.render_markdown(run_id, games, rotations))
    }
}

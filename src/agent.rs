use std::fmt;

use log::{debug, info};

use crate::board::{Color, Move, Position, Rules};
use crate::clock::{Clock, MonotonicClock};
use crate::deepening::{IterativeDeepening, SearchReport};
use crate::error::{AgentError, ConfigError};
use crate::evaluation::Evaluator;
use crate::search::Search;
use crate::time::{Deadline, RoundBudget};
use crate::types::AgentConfig;

/// Everything that carries over from one of the agent's turns to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnState {
    pub budget: RoundBudget,
    /// The position the agent last moved from.
    pub previous: Option<Position>,
}

impl TurnState {
    pub fn new(budget: RoundBudget) -> Self {
        Self { budget, previous: None }
    }
}

/// The agent's answer for one turn.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub mv: Move,
    /// State to pass into the next `choose_move`.
    pub next: TurnState,
    /// `None` when the move was forced and no search ran.
    pub report: Option<SearchReport>,
}

/// Decision-making unit for one color: budget, evaluator and deepening driver around a search.
pub struct Agent<R, S, C = MonotonicClock> {
    config: AgentConfig,
    color: Color,
    evaluator: Evaluator,
    driver: IterativeDeepening,
    rules: R,
    search: S,
    clock: C,
}

impl<R: Rules, S: Search, C: Clock> Agent<R, S, C> {
    pub fn new(config: AgentConfig, color: Color, rules: R, search: S, clock: C) -> Result<Self, AgentError> {
        config.validate()?;
        let evaluator = Evaluator::new(config.preset.profile()).with_draw_threshold(config.draw_threshold);
        let driver = IterativeDeepening::new(config.schedule())?.with_max_depth(config.max_depth);
        info!(
            "{:?} agent '{}' ready: {:?} per {} turns, setup {:?}",
            color, config.preset, config.time_per_k_turns, config.k, config.setup_time
        );
        Ok(Self { config, color, evaluator, driver, rules, search, clock })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    /// State for the agent's first turn: a full round, no history.
    pub fn initial_state(&self) -> Result<TurnState, ConfigError> {
        RoundBudget::from_config(&self.config).map(TurnState::new)
    }

    /// Picks a move for `position` and returns it with the state for the next turn.
    pub fn choose_move(&mut self, state: &TurnState, position: &Position) -> Result<Decision, AgentError> {
        let start = self.clock.now();
        let deadline = Deadline::new(start, state.budget.start_turn());

        if position.side_to_move() != self.color {
            return Err(AgentError::WrongSide { agent: self.color, to_move: position.side_to_move() });
        }

        let legal_moves = self.rules.legal_moves(position);
        let (mv, report) = match legal_moves.as_slice() {
            [] => return Err(AgentError::NoLegalMoves),
            [only] => {
                debug!("single legal move {}, no search", only);
                (only.clone(), None)
            }
            _ => {
                let rules = &self.rules;
                let evaluator = &self.evaluator;
                let color = self.color;
                let previous = state.previous.as_ref();
                let utility = |p: &Position| evaluator.score(rules, p, color, previous);

                let report = self.driver.choose_move(
                    &mut self.search,
                    &self.clock,
                    deadline,
                    position,
                    &legal_moves,
                    color,
                    &utility,
                )?;
                debug!(
                    "chose {} at depth {} (score {}, {:?})",
                    report.best_move, report.depth, report.score, report.stop_reason
                );
                (report.best_move.clone(), Some(report))
            }
        };

        let elapsed = deadline.elapsed(self.clock.now());
        let next = TurnState {
            budget: state.budget.end_turn(elapsed),
            previous: Some(position.clone()),
        };
        Ok(Decision { mv, next, report })
    }
}

/// Holds its own `TurnState` so callers can just ask for moves.
pub struct Player<R, S, C = MonotonicClock> {
    agent: Agent<R, S, C>,
    state: TurnState,
}

impl<R: Rules, S: Search, C: Clock> Player<R, S, C> {
    pub fn new(agent: Agent<R, S, C>) -> Result<Self, AgentError> {
        let state = agent.initial_state()?;
        Ok(Self { agent, state })
    }

    pub fn get_move(&mut self, position: &Position) -> Result<Move, AgentError> {
        let decision = self.agent.choose_move(&self.state, position)?;
        self.state = decision.next;
        Ok(decision.mv)
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn agent(&self) -> &Agent<R, S, C> {
        &self.agent
    }
}

impl<R, S, C> fmt::Display for Player<R, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.agent.color, self.agent.config.preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::clock::ManualClock;
    use crate::error::SearchFault;
    use crate::search::{SearchHooks, SearchOutcome};
    use crate::types::SCORE_WIN;
    use crate::weights::Preset;
    use std::time::Duration;

    struct FixedRules {
        moves: Vec<Move>,
    }

    impl Rules for FixedRules {
        fn legal_moves(&self, _position: &Position) -> Vec<Move> {
            self.moves.clone()
        }

        fn apply(&self, position: &Position, _mv: &Move) -> Position {
            position.clone()
        }
    }

    /// Picks the last legal move at every depth and charges `cost` per call.
    struct Counting {
        calls: u32,
        pick: Move,
        clock: ManualClock,
        cost: Duration,
    }

    impl Search for Counting {
        fn search(
            &mut self,
            hooks: &SearchHooks<'_>,
            position: &Position,
            depth: u32,
            _alpha: f64,
            _beta: f64,
            _maximizing: bool,
        ) -> Result<SearchOutcome, SearchFault> {
            self.calls += 1;
            self.clock.advance(self.cost);
            if (hooks.out_of_time)() {
                return Err(SearchFault::DeadlineExceeded);
            }
            let score = if depth >= 3 { SCORE_WIN } else { (hooks.utility)(position) };
            Ok(SearchOutcome { score, best_move: Some(self.pick.clone()) })
        }
    }

    fn two_moves() -> Vec<Move> {
        vec![
            Move::step(Coord::new(2, 2), Coord::new(3, 3)),
            Move::step(Coord::new(2, 4), Coord::new(3, 5)),
        ]
    }

    fn agent(moves: Vec<Move>, cost: Duration) -> (Agent<FixedRules, Counting, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let pick = moves.last().cloned().unwrap();
        let search = Counting { calls: 0, pick, clock: clock.clone(), cost };
        let config = AgentConfig::new(Duration::from_secs(1), Duration::from_secs(10), 3, Preset::Presser);
        let agent = Agent::new(config, Color::Red, FixedRules { moves }, search, clock.clone()).unwrap();
        (agent, clock)
    }

    #[test]
    fn test_single_move_skips_search() {
        let only = vec![Move::step(Coord::new(2, 2), Coord::new(3, 3))];
        let (mut agent, _) = agent(only.clone(), Duration::from_millis(10));
        let state = agent.initial_state().unwrap();
        let decision = agent.choose_move(&state, &Position::initial()).unwrap();
        assert_eq!(decision.mv, only[0]);
        assert!(decision.report.is_none());
        assert_eq!(agent.search().calls, 0);
        assert_eq!(decision.next.budget.turns_remaining(), 2);
        assert_eq!(decision.next.previous, Some(Position::initial()));
    }

    #[test]
    fn test_searches_and_charges_budget() {
        let (mut agent, _) = agent(two_moves(), Duration::from_millis(100));
        let state = agent.initial_state().unwrap();
        let decision = agent.choose_move(&state, &Position::initial()).unwrap();
        assert_eq!(decision.mv, two_moves()[1]);
        let report = decision.report.unwrap();
        assert_eq!(report.depth, 3);
        assert_eq!(agent.search().calls, 3);
        assert_eq!(decision.next.budget.turns_remaining(), 2);
        assert!((decision.next.budget.time_remaining() - 9.7).abs() < 1e-9);
    }

    #[test]
    fn test_no_legal_moves_is_an_error() {
        let (mut agent, _) = agent(Vec::new(), Duration::ZERO);
        let state = agent.initial_state().unwrap();
        let err = agent.choose_move(&state, &Position::initial()).unwrap_err();
        assert_eq!(err, AgentError::NoLegalMoves);
    }

    #[test]
    fn test_wrong_side_is_an_error() {
        let (mut agent, _) = agent(two_moves(), Duration::ZERO);
        let state = agent.initial_state().unwrap();
        let pos = Position::empty(Color::Black);
        assert!(matches!(agent.choose_move(&state, &pos), Err(AgentError::WrongSide { .. })));
    }

    #[test]
    fn test_player_threads_state() {
        let (agent, _) = agent(two_moves(), Duration::ZERO);
        let mut player = Player::new(agent).unwrap();
        for expected in [2, 1, 3, 2] {
            player.get_move(&Position::initial()).unwrap();
            assert_eq!(player.state().budget.turns_remaining(), expected);
        }
        assert_eq!(player.to_string(), "Red improved_better_h");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let clock = ManualClock::new();
        let search = Counting { calls: 0, pick: two_moves()[0].clone(), clock: clock.clone(), cost: Duration::ZERO };
        let config = AgentConfig { k: 0, ..AgentConfig::default() };
        let result = Agent::new(config, Color::Red, FixedRules { moves: two_moves() }, search, clock);
        assert!(matches!(result, Err(AgentError::Config(ConfigError::ZeroTurnsPerRound))));
    }
}

use crate::battle::engine::{BattleEngine, CommandOutcome, IgnoreReason};
use crate::battle::state::{BattleMessage, BattleSession};
use crate::config::BattleConfig;
use crate::rng::ScriptedRandom;
use std::time::Duration;

/// Opponent level roll consumed by `start_battle` in `started_engine`.
pub const TEST_OPPONENT_LEVEL: u32 = 12;

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Creates an engine in the lobby with default config and the given rolls.
pub fn scripted_engine(rolls: Vec<u32>) -> BattleEngine<ScriptedRandom> {
    BattleEngine::new(BattleConfig::default(), ScriptedRandom::new_for_test(rolls))
}

/// Creates an engine that has already started a battle against a level 12 opponent.
/// `rolls` are the damage rolls consumed afterwards, in order.
/// The start snapshot is drained so tests only see what they trigger.
pub fn started_engine(rolls: Vec<u32>) -> BattleEngine<ScriptedRandom> {
    let mut outcomes = vec![TEST_OPPONENT_LEVEL];
    outcomes.extend(rolls);
    let mut engine = scripted_engine(outcomes);
    assert_eq!(engine.start_battle(), CommandOutcome::Accepted);
    engine.drain_snapshots();
    engine
}

/// The parts of a session a guarded no-op must leave untouched.
pub fn observable(session: &BattleSession) -> (u32, u32, u32, BattleMessage) {
    (
        session.my_hp(),
        session.opponent_hp(),
        session.potions(),
        session.message().clone(),
    )
}

pub fn assert_ignored(outcome: CommandOutcome, reason: IgnoreReason) {
    assert_eq!(outcome, CommandOutcome::Ignored(reason));
}

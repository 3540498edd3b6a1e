pub mod engine;
pub mod scheduler;
pub mod state;

pub use engine::{BattleEngine, BattleStep, CommandOutcome, IgnoreReason};
pub use state::{
    Actor, ActorAction, BattleMessage, BattleOutcome, BattleSession, BattleSnapshot, Inventory,
    Item, Phase, SnapshotBus,
};

#[cfg(test)]
mod tests;

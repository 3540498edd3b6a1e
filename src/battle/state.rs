use crate::config::BattleConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lobby,
    Battle,
    Result,
}

/// Which side of the battle a step applies to
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Player,
    Opponent,
}

/// Per-actor animation tag. Anything other than `Idle` means the actor is mid-animation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorAction {
    Idle,
    Attack,
    Hit,
    Heal,
    Death,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Item {
    Potion,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    counts: BTreeMap<Item, u32>,
}

impl Inventory {
    pub fn with_potions(potions: u32) -> Self {
        let mut counts = BTreeMap::new();
        counts.insert(Item::Potion, potions);
        Self { counts }
    }

    pub fn count(&self, item: Item) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    /// Removes one `item`. Returns false (and changes nothing) when none are left.
    pub fn take(&mut self, item: Item) -> bool {
        match self.counts.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set(&mut self, item: Item, count: u32) {
        self.counts.insert(item, count);
    }
}

/// Status line shown under the battle scene.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum BattleMessage {
    WaitingForChallenger,
    ChooseMove,
    AttackUsed,
    DamageDealt { amount: u32 },
    OpponentDefeated,
    Guarding,
    NoPotionsLeft,
    UsingPotion,
    HpRestored { amount: u32 },
    OpponentAttacks,
    DamageTaken { amount: u32, defended: bool },
    PlayerDefeated,
    BattleOver { outcome: BattleOutcome },
}

impl fmt::Display for BattleMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleMessage::WaitingForChallenger => write!(f, "Waiting for a challenger..."),
            BattleMessage::ChooseMove => write!(f, "What will you do?"),
            BattleMessage::AttackUsed => write!(f, "You used Attack!"),
            BattleMessage::DamageDealt { amount } => write!(f, "It dealt {} damage!", amount),
            BattleMessage::OpponentDefeated => write!(f, "The opponent fainted!"),
            BattleMessage::Guarding => write!(f, "You brace yourself and guard!"),
            BattleMessage::NoPotionsLeft => write!(f, "No potions left!"),
            BattleMessage::UsingPotion => write!(f, "You used a Potion!"),
            BattleMessage::HpRestored { amount } => write!(f, "Restored {} HP!", amount),
            BattleMessage::OpponentAttacks => write!(f, "The opponent attacks!"),
            BattleMessage::DamageTaken { amount, defended: true } => {
                write!(f, "You guarded! Took only {} damage.", amount)
            }
            BattleMessage::DamageTaken { amount, defended: false } => {
                write!(f, "You took {} damage!", amount)
            }
            BattleMessage::PlayerDefeated => write!(f, "Your creature fainted..."),
            BattleMessage::BattleOver { outcome: BattleOutcome::Victory } => write!(f, "Victory!"),
            BattleMessage::BattleOver { outcome: BattleOutcome::Defeat } => write!(f, "Defeat..."),
        }
    }
}

/// Mutable state of one battle encounter. Only the engine mutates it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleSession {
    pub(crate) phase: Phase,
    pub(crate) my_hp: u32,
    pub(crate) opponent_hp: u32,
    pub(crate) my_level: u32,
    pub(crate) opponent_level: u32,
    pub(crate) inventory: Inventory,
    pub(crate) is_defending: bool,
    pub(crate) player_action: ActorAction,
    pub(crate) opponent_action: ActorAction,
    pub(crate) message: BattleMessage,
    pub(crate) outcome: Option<BattleOutcome>,
    pub(crate) max_hp: u32,
}

impl BattleSession {
    /// A fresh session sitting in the lobby.
    pub fn lobby(config: &BattleConfig) -> Self {
        Self {
            phase: Phase::Lobby,
            my_hp: config.max_hp,
            opponent_hp: config.max_hp,
            my_level: config.player_level,
            opponent_level: config.opponent_level.low(),
            inventory: Inventory::with_potions(config.starting_potions),
            is_defending: false,
            player_action: ActorAction::Idle,
            opponent_action: ActorAction::Idle,
            message: BattleMessage::WaitingForChallenger,
            outcome: None,
            max_hp: config.max_hp,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn my_hp(&self) -> u32 {
        self.my_hp
    }

    pub fn opponent_hp(&self) -> u32 {
        self.opponent_hp
    }

    pub fn my_level(&self) -> u32 {
        self.my_level
    }

    pub fn opponent_level(&self) -> u32 {
        self.opponent_level
    }

    pub fn potions(&self) -> u32 {
        self.inventory.count(Item::Potion)
    }

    pub fn is_defending(&self) -> bool {
        self.is_defending
    }

    pub fn action_of(&self, actor: Actor) -> ActorAction {
        match actor {
            Actor::Player => self.player_action,
            Actor::Opponent => self.opponent_action,
        }
    }

    pub fn message(&self) -> &BattleMessage {
        &self.message
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn both_idle(&self) -> bool {
        self.player_action == ActorAction::Idle && self.opponent_action == ActorAction::Idle
    }

    pub(crate) fn set_action(&mut self, actor: Actor, action: ActorAction) {
        match actor {
            Actor::Player => self.player_action = action,
            Actor::Opponent => self.opponent_action = action,
        }
    }

    /// Subtracts `amount` from `actor`'s HP, stopping at 0. Returns the new HP.
    pub(crate) fn deal_damage(&mut self, actor: Actor, amount: u32) -> u32 {
        let hp = match actor {
            Actor::Player => &mut self.my_hp,
            Actor::Opponent => &mut self.opponent_hp,
        };
        *hp = hp.saturating_sub(amount);
        *hp
    }

    /// Adds up to `amount` HP to `actor`, capped at max HP. Returns the HP actually restored.
    pub(crate) fn heal(&mut self, actor: Actor, amount: u32) -> u32 {
        let max_hp = self.max_hp;
        let hp = match actor {
            Actor::Player => &mut self.my_hp,
            Actor::Opponent => &mut self.opponent_hp,
        };
        let before = *hp;
        *hp = hp.saturating_add(amount).min(max_hp);
        *hp - before
    }
}

/// A copy of the session taken right after a transition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleSnapshot {
    /// Engine clock at the time of the transition
    pub at: Duration,
    pub session: BattleSession,
}

impl fmt::Display for BattleSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.session;
        write!(
            f,
            "[{:>6}ms] {:?} | you {:>3} HP ({:?}) | opponent Lv{} {:>3} HP ({:?}) | potions {} | {}",
            self.at.as_millis(),
            s.phase,
            s.my_hp,
            s.player_action,
            s.opponent_level,
            s.opponent_hp,
            s.opponent_action,
            s.potions(),
            s.message
        )
    }
}

/// Ordered log of the snapshots emitted by the engine.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBus {
    snapshots: Vec<BattleSnapshot>,
}

impl SnapshotBus {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: BattleSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn snapshots(&self) -> &[BattleSnapshot] {
        &self.snapshots
    }

    /// Takes every snapshot recorded so far, leaving the bus empty.
    pub fn drain(&mut self) -> Vec<BattleSnapshot> {
        std::mem::take(&mut self.snapshots)
    }

    pub fn messages(&self) -> Vec<&BattleMessage> {
        self.snapshots.iter().map(|s| &s.session.message).collect()
    }

    pub fn print_debug(&self) {
        for snapshot in &self.snapshots {
            println!("  {}", snapshot);
        }
    }

    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}

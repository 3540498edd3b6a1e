use crate::battle::scheduler::{Scheduler, TaskId};
use crate::battle::state::{
    Actor, ActorAction, BattleMessage, BattleOutcome, BattleSession, BattleSnapshot, Item, Phase,
    SnapshotBus,
};
use crate::config::{BattleConfig, BattleTimings};
use crate::rng::{RandomSource, ThreadRandom};
use std::time::Duration;
use tracing::{debug, info};

/// Timed steps of a turn. Each one fires exactly once unless the session is reset first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStep {
    /// The player's attack animation finished; roll and apply damage
    PlayerStrikeLands,
    OpponentFaints,
    /// The player's guard is up; hand control to the opponent
    HandOverToOpponent,
    PotionTakesEffect,
    PotionSettles,
    /// Revert the "no potions left" notice
    RestorePrompt,
    /// Opponent turn lead-in finished; start its attack animation
    OpponentWindUp,
    OpponentStrikeLands,
    PlayerFaints,
    PlayerRecovers,
    Conclude(BattleOutcome),
}

/// Why a player command had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotInBattle,
    /// An actor is mid-animation
    ActorBusy,
    /// Steps of the current turn are still pending
    TurnInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted,
    /// The potion command was valid but the bag was empty. No turn is taken.
    NoPotionsLeft,
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, CommandOutcome::Accepted)
    }
}

/// Turn-based battle between the player and a scripted opponent.
///
/// The UI issues `start_battle`, `attack`, `defend`, `use_potion` and
/// `reset_to_lobby`; everything that follows a command is a chain of
/// [`BattleStep`]s on a virtual clock, fired by [`BattleEngine::advance`].
/// A snapshot of the session is recorded after every transition.
pub struct BattleEngine<R: RandomSource = ThreadRandom> {
    config: BattleConfig,
    session: BattleSession,
    scheduler: Scheduler<BattleStep>,
    snapshots: SnapshotBus,
    rng: R,
    /// Pending revert of the "no potions left" notice, dropped when the next command is taken
    notice: Option<TaskId>,
}

impl BattleEngine<ThreadRandom> {
    pub fn with_thread_rng(config: BattleConfig) -> Self {
        Self::new(config, ThreadRandom)
    }
}

impl<R: RandomSource> BattleEngine<R> {
    pub fn new(config: BattleConfig, rng: R) -> Self {
        let session = BattleSession::lobby(&config);
        Self {
            config,
            session,
            scheduler: Scheduler::new(),
            snapshots: SnapshotBus::new(),
            rng,
            notice: None,
        }
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn snapshots(&self) -> &SnapshotBus {
        &self.snapshots
    }

    pub fn drain_snapshots(&mut self) -> Vec<BattleSnapshot> {
        self.snapshots.drain()
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut BattleSession {
        &mut self.session
    }

    /// Engine clock.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn is_turn_in_progress(&self) -> bool {
        !self.scheduler.is_idle()
    }

    /// Time left before the next pending step fires.
    pub fn time_until_next_step(&self) -> Option<Duration> {
        self.scheduler
            .next_due()
            .map(|due| due.saturating_sub(self.scheduler.now()))
    }

    // === Player commands ===

    /// Starts (or restarts) a battle from any phase. Pending steps of a previous battle are dropped.
    pub fn start_battle(&mut self) -> CommandOutcome {
        self.cancel_pending();
        let (low, high) = (self.config.opponent_level.low(), self.config.opponent_level.high());
        let opponent_level = self.rng.range_inclusive(low, high, "opponent level");

        let session = &mut self.session;
        session.phase = Phase::Battle;
        session.my_hp = self.config.max_hp;
        session.opponent_hp = self.config.max_hp;
        session.my_level = self.config.player_level;
        session.opponent_level = opponent_level;
        session.inventory.set(Item::Potion, self.config.starting_potions);
        session.is_defending = false;
        session.player_action = ActorAction::Idle;
        session.opponent_action = ActorAction::Idle;
        session.message = BattleMessage::ChooseMove;
        session.outcome = None;

        info!(opponent_level, "battle started");
        self.record();
        CommandOutcome::Accepted
    }

    pub fn attack(&mut self) -> CommandOutcome {
        if let Err(reason) = self.ready_for_command("attack") {
            return CommandOutcome::Ignored(reason);
        }
        self.dismiss_notice();
        self.session.set_action(Actor::Player, ActorAction::Attack);
        self.session.message = BattleMessage::AttackUsed;
        self.record();
        self.schedule(self.timings().attack_animation_ms, BattleStep::PlayerStrikeLands);
        CommandOutcome::Accepted
    }

    pub fn defend(&mut self) -> CommandOutcome {
        if let Err(reason) = self.ready_for_command("defend") {
            return CommandOutcome::Ignored(reason);
        }
        self.dismiss_notice();
        self.session.is_defending = true;
        self.session.message = BattleMessage::Guarding;
        self.record();
        self.schedule(self.timings().defend_delay_ms, BattleStep::HandOverToOpponent);
        CommandOutcome::Accepted
    }

    pub fn use_potion(&mut self) -> CommandOutcome {
        if let Err(reason) = self.ready_for_command("use_potion") {
            return CommandOutcome::Ignored(reason);
        }
        self.dismiss_notice();
        if !self.session.inventory.take(Item::Potion) {
            self.session.message = BattleMessage::NoPotionsLeft;
            self.record();
            let restore_ms = self.timings().prompt_restore_ms;
            self.notice = Some(self.schedule(restore_ms, BattleStep::RestorePrompt));
            return CommandOutcome::NoPotionsLeft;
        }
        self.session.is_defending = false;
        self.session.set_action(Actor::Player, ActorAction::Heal);
        self.session.message = BattleMessage::UsingPotion;
        self.record();
        self.schedule(self.timings().potion_heal_ms, BattleStep::PotionTakesEffect);
        CommandOutcome::Accepted
    }

    /// Returns to the lobby from any phase, restoring HP and dropping pending steps.
    pub fn reset_to_lobby(&mut self) -> CommandOutcome {
        self.cancel_pending();
        self.session = BattleSession::lobby(&self.config);
        debug!("returned to lobby");
        self.record();
        CommandOutcome::Accepted
    }

    // === Clock ===

    /// Moves the clock forward by `elapsed`, firing every step that comes due on the way,
    /// including steps scheduled by steps fired during this call.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;
        while let Some(step) = self.scheduler.pop_due(target) {
            self.apply(step);
        }
        self.scheduler.advance_to(target);
    }

    /// Fires pending steps until none are left.
    pub fn run_until_idle(&mut self) {
        while let Some(wait) = self.time_until_next_step() {
            self.advance(wait);
        }
    }

    /// Same as [`run_until_idle`](Self::run_until_idle) but waits out each delay in real time.
    pub async fn play_out(&mut self) {
        while let Some(wait) = self.time_until_next_step() {
            tokio::time::sleep(wait).await;
            self.advance(wait);
        }
    }

    // === Steps ===

    fn apply(&mut self, step: BattleStep) {
        debug!(?step, at_ms = self.scheduler.now().as_millis() as u64, "battle step");
        let timings = self.timings().clone();

        match step {
            BattleStep::PlayerStrikeLands => {
                self.session.set_action(Actor::Player, ActorAction::Idle);
                let (low, high) = (self.config.player_damage.low(), self.config.player_damage.high());
                let damage = self.rng.range_inclusive(low, high, "player attack damage");
                let remaining = self.session.deal_damage(Actor::Opponent, damage);
                self.session.set_action(Actor::Opponent, ActorAction::Hit);
                self.session.message = BattleMessage::DamageDealt { amount: damage };
                self.record();

                if remaining == 0 {
                    self.schedule(timings.death_animation_ms, BattleStep::OpponentFaints);
                } else {
                    self.begin_opponent_turn();
                }
            }
            BattleStep::OpponentFaints => {
                self.session.set_action(Actor::Opponent, ActorAction::Death);
                self.session.message = BattleMessage::OpponentDefeated;
                self.record();
                self.schedule(timings.result_delay_ms, BattleStep::Conclude(BattleOutcome::Victory));
            }
            BattleStep::HandOverToOpponent => {
                self.begin_opponent_turn();
            }
            BattleStep::PotionTakesEffect => {
                let restored = self.session.heal(Actor::Player, self.config.heal_amount);
                self.session.message = BattleMessage::HpRestored { amount: restored };
                self.record();
                self.schedule(timings.potion_settle_ms, BattleStep::PotionSettles);
            }
            BattleStep::PotionSettles => {
                self.session.set_action(Actor::Player, ActorAction::Idle);
                self.record();
                self.begin_opponent_turn();
            }
            BattleStep::RestorePrompt => {
                self.notice = None;
                self.session.message = BattleMessage::ChooseMove;
                self.record();
            }
            BattleStep::OpponentWindUp => {
                self.session.set_action(Actor::Opponent, ActorAction::Attack);
                self.session.message = BattleMessage::OpponentAttacks;
                self.record();
                self.schedule(timings.opponent_attack_ms, BattleStep::OpponentStrikeLands);
            }
            BattleStep::OpponentStrikeLands => {
                self.session.set_action(Actor::Opponent, ActorAction::Idle);
                let (low, high) = (self.config.opponent_damage.low(), self.config.opponent_damage.high());
                let roll = self.rng.range_inclusive(low, high, "opponent attack damage");
                let defended = self.session.is_defending;
                let damage = if defended { roll / 2 } else { roll };
                let remaining = self.session.deal_damage(Actor::Player, damage);
                self.session.set_action(Actor::Player, ActorAction::Hit);
                self.session.message = BattleMessage::DamageTaken { amount: damage, defended };
                self.session.is_defending = false;
                self.record();

                if remaining == 0 {
                    self.schedule(timings.death_animation_ms, BattleStep::PlayerFaints);
                } else {
                    self.schedule(timings.hit_recovery_ms, BattleStep::PlayerRecovers);
                }
            }
            BattleStep::PlayerFaints => {
                self.session.set_action(Actor::Player, ActorAction::Death);
                self.session.message = BattleMessage::PlayerDefeated;
                self.record();
                self.schedule(timings.result_delay_ms, BattleStep::Conclude(BattleOutcome::Defeat));
            }
            BattleStep::PlayerRecovers => {
                self.session.set_action(Actor::Player, ActorAction::Idle);
                self.session.message = BattleMessage::ChooseMove;
                self.record();
            }
            BattleStep::Conclude(outcome) => {
                self.session.phase = Phase::Result;
                self.session.outcome = Some(outcome);
                self.session.message = BattleMessage::BattleOver { outcome };
                info!(?outcome, "battle concluded");
                self.record();
            }
        }
    }

    /// Opponent-turn algorithm entry point: lead-in, attack animation, damage.
    fn begin_opponent_turn(&mut self) {
        self.schedule(self.timings().opponent_lead_in_ms, BattleStep::OpponentWindUp);
    }

    // --- Private Helper Functions ---

    /// The IDLE guard: commands are only taken in BATTLE, with both actors idle and no turn pending.
    /// A showing "no potions left" notice is not a turn.
    fn ready_for_command(&self, command: &str) -> Result<(), IgnoreReason> {
        let verdict = if self.session.phase != Phase::Battle {
            Err(IgnoreReason::NotInBattle)
        } else if !self.session.both_idle() {
            Err(IgnoreReason::ActorBusy)
        } else if self.notice.is_none() && !self.scheduler.is_idle() {
            Err(IgnoreReason::TurnInProgress)
        } else {
            Ok(())
        };
        if let Err(reason) = verdict {
            debug!(command, ?reason, "command ignored");
        }
        verdict
    }

    fn timings(&self) -> &BattleTimings {
        &self.config.timings
    }

    fn schedule(&mut self, delay_ms: u64, step: BattleStep) -> TaskId {
        self.scheduler.schedule(Duration::from_millis(delay_ms), step)
    }

    fn dismiss_notice(&mut self) {
        if let Some(id) = self.notice.take() {
            self.scheduler.cancel(id);
        }
    }

    fn cancel_pending(&mut self) {
        self.notice = None;
        let dropped = self.scheduler.cancel_all();
        if dropped > 0 {
            debug!(dropped, "cancelled pending battle steps");
        }
    }

    fn record(&mut self) {
        self.snapshots.push(BattleSnapshot {
            at: self.scheduler.now(),
            session: self.session.clone(),
        });
    }
}

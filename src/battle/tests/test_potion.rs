#[cfg(test)]
mod tests {
    use crate::battle::engine::CommandOutcome;
    use crate::battle::state::{Actor, ActorAction, BattleMessage, Item, Phase};
    use crate::battle::tests::common::{ms, started_engine};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_potion_heals_then_opponent_takes_its_turn() {
        let mut engine = started_engine(vec![10]);
        engine.session_mut().my_hp = 50;
        engine.session_mut().inventory.set(Item::Potion, 1);

        assert_eq!(engine.use_potion(), CommandOutcome::Accepted);
        assert_eq!(engine.session().potions(), 0);
        assert_eq!(engine.session().action_of(Actor::Player), ActorAction::Heal);
        assert_eq!(engine.session().message(), &BattleMessage::UsingPotion);

        engine.advance(ms(500));
        assert_eq!(engine.session().my_hp(), 80);
        assert_eq!(engine.session().message(), &BattleMessage::HpRestored { amount: 30 });

        engine.advance(ms(500));
        assert_eq!(engine.session().action_of(Actor::Player), ActorAction::Idle);

        engine.advance(ms(1_000));
        assert_eq!(engine.session().message(), &BattleMessage::OpponentAttacks);

        engine.advance(ms(500));
        assert_eq!(engine.session().my_hp(), 70);

        engine.advance(ms(500));
        assert_eq!(engine.session().message(), &BattleMessage::ChooseMove);
        assert!(!engine.is_turn_in_progress());
        assert_eq!(engine.now(), ms(3_000));
    }

    #[test]
    fn test_potion_never_heals_past_max_hp() {
        let mut engine = started_engine(vec![10]);
        engine.session_mut().my_hp = 90;

        engine.use_potion();
        engine.advance(ms(500));

        assert_eq!(engine.session().my_hp(), 100);
        assert_eq!(engine.session().message().to_string(), "Restored 10 HP!");
        assert_eq!(engine.session().potions(), 2);
    }

    #[test]
    fn test_potion_drops_an_active_guard() {
        let mut engine = started_engine(vec![12]);
        engine.session_mut().is_defending = true;

        engine.use_potion();
        assert!(!engine.session().is_defending());
        engine.run_until_idle();

        assert_eq!(engine.session().my_hp(), 88);
    }

    #[test]
    fn test_empty_bag_takes_no_turn() {
        let mut engine = started_engine(vec![]);
        engine.session_mut().my_hp = 40;
        engine.session_mut().inventory.set(Item::Potion, 0);

        assert_eq!(engine.use_potion(), CommandOutcome::NoPotionsLeft);
        assert_eq!(engine.session().message().to_string(), "No potions left!");
        assert_eq!(engine.session().my_hp(), 40);
        assert_eq!(engine.session().potions(), 0);
        assert_eq!(engine.session().phase(), Phase::Battle);
        assert!(engine.session().both_idle());

        engine.advance(ms(1_000));
        assert_eq!(engine.session().message(), &BattleMessage::ChooseMove);
        assert!(!engine.is_turn_in_progress());
        assert_eq!(engine.session().my_hp(), 40);
        assert_eq!(engine.rng().remaining(), 0);
    }

    #[test]
    fn test_commands_are_taken_while_the_empty_bag_notice_shows() {
        let mut engine = started_engine(vec![20, 15]);
        engine.session_mut().inventory.set(Item::Potion, 0);
        engine.use_potion();
        engine.advance(ms(200));
        engine.drain_snapshots();

        assert_eq!(engine.attack(), CommandOutcome::Accepted);
        engine.run_until_idle();

        // The pending prompt revert at 1000ms was dropped with the notice.
        let times: Vec<u128> = engine.snapshots().snapshots().iter().map(|s| s.at.as_millis()).collect();
        assert_eq!(times, vec![200, 700, 1_700, 2_200, 2_700]);
        assert_eq!(engine.session().opponent_hp(), 80);
        assert_eq!(engine.session().my_hp(), 85);
        assert_eq!(engine.session().message(), &BattleMessage::ChooseMove);
    }

    #[test]
    fn test_pressing_potion_again_on_an_empty_bag_restarts_the_notice() {
        let mut engine = started_engine(vec![]);
        engine.session_mut().inventory.set(Item::Potion, 0);

        assert_eq!(engine.use_potion(), CommandOutcome::NoPotionsLeft);
        engine.advance(ms(600));
        assert_eq!(engine.use_potion(), CommandOutcome::NoPotionsLeft);

        engine.advance(ms(999));
        assert_eq!(engine.session().message(), &BattleMessage::NoPotionsLeft);
        engine.advance(ms(1));
        assert_eq!(engine.session().message(), &BattleMessage::ChooseMove);
        assert!(!engine.is_turn_in_progress());
    }

    #[test]
    fn test_three_potions_then_empty() {
        let mut engine = started_engine(vec![10, 10, 10]);

        for expected_left in [2, 1, 0] {
            assert_eq!(engine.use_potion(), CommandOutcome::Accepted);
            assert_eq!(engine.session().potions(), expected_left);
            engine.run_until_idle();
        }

        assert_eq!(engine.use_potion(), CommandOutcome::NoPotionsLeft);
        engine.run_until_idle();
        assert_eq!(engine.session().potions(), 0);
    }
}

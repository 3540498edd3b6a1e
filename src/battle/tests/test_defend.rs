#[cfg(test)]
mod tests {
    use crate::battle::engine::CommandOutcome;
    use crate::battle::state::{Actor, ActorAction, BattleMessage};
    use crate::battle::tests::common::{ms, started_engine};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("odd roll rounds down", 15, 7)]
    #[case("highest roll", 19, 9)]
    #[case("lowest roll", 10, 5)]
    fn test_defend_halves_incoming_damage(#[case] desc: &str, #[case] roll: u32, #[case] expected: u32) {
        let mut engine = started_engine(vec![roll]);

        assert_eq!(engine.defend(), CommandOutcome::Accepted);
        assert!(engine.session().is_defending());
        engine.run_until_idle();

        assert_eq!(engine.session().my_hp(), 100 - expected, "{}", desc);
        assert_eq!(engine.session().opponent_hp(), 100);
    }

    #[test]
    fn test_defend_timeline() {
        let mut engine = started_engine(vec![15]);
        engine.defend();
        assert_eq!(engine.session().message(), &BattleMessage::Guarding);
        assert_eq!(engine.session().action_of(Actor::Player), ActorAction::Idle);

        engine.advance(ms(1_499));
        assert_eq!(engine.session().action_of(Actor::Opponent), ActorAction::Idle);
        engine.advance(ms(1));
        assert_eq!(engine.session().message(), &BattleMessage::OpponentAttacks);

        engine.advance(ms(500));
        assert_eq!(engine.session().my_hp(), 93);
        assert_eq!(
            engine.session().message().to_string(),
            "You guarded! Took only 7 damage."
        );

        engine.advance(ms(500));
        assert_eq!(engine.session().message(), &BattleMessage::ChooseMove);
        assert!(!engine.is_turn_in_progress());
    }

    #[test]
    fn test_guard_lasts_for_a_single_hit() {
        // Defend, then attack: the second opponent hit lands in full.
        let mut engine = started_engine(vec![15, 20, 15]);

        engine.defend();
        engine.run_until_idle();
        assert!(!engine.session().is_defending());
        assert_eq!(engine.session().my_hp(), 93);

        engine.attack();
        engine.run_until_idle();
        assert_eq!(engine.session().my_hp(), 78);
        assert_eq!(
            engine.session().message(),
            &BattleMessage::ChooseMove
        );
        assert_eq!(engine.rng().remaining(), 0);
    }
}

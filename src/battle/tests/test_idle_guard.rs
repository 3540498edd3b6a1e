#[cfg(test)]
mod tests {
    use crate::battle::engine::IgnoreReason;
    use crate::battle::state::Phase;
    use crate::battle::tests::common::{assert_ignored, ms, observable, scripted_engine, started_engine};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_commands_are_ignored_in_the_lobby() {
        let mut engine = scripted_engine(vec![]);
        let before = observable(engine.session());

        assert_ignored(engine.attack(), IgnoreReason::NotInBattle);
        assert_ignored(engine.defend(), IgnoreReason::NotInBattle);
        assert_ignored(engine.use_potion(), IgnoreReason::NotInBattle);

        assert_eq!(observable(engine.session()), before);
        assert_eq!(engine.session().phase(), Phase::Lobby);
        assert!(engine.snapshots().is_empty());
    }

    #[test]
    fn test_commands_mid_animation_change_nothing() {
        let mut engine = started_engine(vec![20, 15]);
        engine.attack();

        for checkpoint in [0, 500, 1_500, 2_000] {
            engine.advance(ms(checkpoint) - engine.now());
            let before = observable(engine.session());
            let snapshots_before = engine.snapshots().len();

            assert!(!engine.attack().is_accepted(), "attack at {}ms", checkpoint);
            assert!(!engine.defend().is_accepted(), "defend at {}ms", checkpoint);
            assert!(!engine.use_potion().is_accepted(), "potion at {}ms", checkpoint);

            assert_eq!(observable(engine.session()), before);
            assert_eq!(engine.snapshots().len(), snapshots_before);
        }

        engine.run_until_idle();
        assert_eq!(engine.session().opponent_hp(), 80);
        assert_eq!(engine.session().my_hp(), 85);
        assert_eq!(engine.rng().remaining(), 0);
    }

    #[test]
    fn test_busy_actor_is_reported() {
        let mut engine = started_engine(vec![20]);
        engine.attack();

        assert_ignored(engine.attack(), IgnoreReason::ActorBusy);
    }

    #[test]
    fn test_commands_during_a_lead_in_are_ignored() {
        // Both actors idle, but the opponent's turn is already queued.
        let mut engine = started_engine(vec![15]);
        engine.defend();
        engine.advance(ms(700));
        assert!(engine.session().both_idle());

        assert_ignored(engine.attack(), IgnoreReason::TurnInProgress);
        assert_ignored(engine.use_potion(), IgnoreReason::TurnInProgress);
        assert_eq!(engine.session().potions(), 3);
    }

    #[test]
    fn test_commands_after_the_battle_are_ignored() {
        let mut engine = started_engine(vec![24]);
        engine.session_mut().opponent_hp = 5;
        engine.attack();
        engine.run_until_idle();
        assert_eq!(engine.session().phase(), Phase::Result);

        assert_ignored(engine.attack(), IgnoreReason::NotInBattle);
        assert_ignored(engine.use_potion(), IgnoreReason::NotInBattle);
    }
}

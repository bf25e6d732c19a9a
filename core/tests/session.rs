use flashgrid_core::*;

fn memorize_then_select(session: &mut GameSession) {
    let deadline = session.now() + session.config().timing.memorize_ms;
    session.advance_to(deadline);
    assert_eq!(session.phase(), Phase::Selecting);
}

fn remembered_targets(session: &GameSession) -> Vec<CellIndex> {
    assert_eq!(session.phase(), Phase::Memorizing);
    assert!(session.flash_visible());
    session.flashing_cells().collect()
}

#[test]
fn perfect_play_through_every_level() {
    let mut session = GameSession::default();
    let mut expected_total = 0;

    for level_index in 0..session.level_count() {
        session.select_level(level_index);
        let targets = remembered_targets(&session);
        memorize_then_select(&mut session);

        for &index in &targets {
            assert!(session.toggle_selection(index).has_update());
        }
        let delta = session.submit().delta().unwrap();

        assert_eq!(delta as usize, targets.len());
        let result = session.result().unwrap();
        assert_eq!(result.correct.len(), targets.len());
        assert!(result.incorrect.is_empty());

        expected_total += delta;
        assert_eq!(session.score().total(), expected_total);
    }

    assert_eq!(session.score().total(), 13 + 9 + 9 + 5 + 8);
    assert_eq!(session.score().rounds_scored(), 5);
}

#[test]
fn score_never_decreases_across_mixed_rounds() {
    let mut session = GameSession::default();
    let mut previous = 0;

    for picks in [vec![1, 3, 5], vec![0, 2], vec![], vec![0, 1, 2, 3, 4, 5, 6]] {
        session.reset();
        memorize_then_select(&mut session);
        for index in picks {
            session.toggle_selection(index);
        }
        session.submit();

        assert!(session.score().total() >= previous);
        previous = session.score().total();
    }

    // 0 + 2 + 0 + (4 correct - 3 wrong)
    assert_eq!(previous, 3);
}

#[test]
fn no_timer_activity_after_memorizing_ends() {
    let mut session = GameSession::default();
    memorize_then_select(&mut session);
    let remaining = session.remaining_secs();

    for _ in 0..50 {
        assert!(!session.advance_by(600));
        assert!(!session.flash_visible());
        assert_eq!(session.remaining_secs(), remaining);
    }
    assert_eq!(session.next_deadline(), None);
}

#[test]
fn reset_during_memorizing_restarts_countdown() {
    let mut session = GameSession::default();
    session.advance_by(6_500);
    assert_eq!(session.remaining_secs(), 4);

    session.reset();

    assert_eq!(session.phase(), Phase::Memorizing);
    assert_eq!(session.remaining_secs(), 10);
    assert!(session.flash_visible());

    // the old round would have ended at 10s, the new one ends at 16.5s
    session.advance_to(10_000);
    assert_eq!(session.phase(), Phase::Memorizing);
    session.advance_to(16_500);
    assert_eq!(session.phase(), Phase::Selecting);
}

#[test]
fn reset_after_result_starts_a_fresh_round() {
    let mut session = GameSession::default();
    memorize_then_select(&mut session);
    session.toggle_selection(0);
    session.submit();
    assert_eq!(session.phase(), Phase::Resulted);

    session.reset();

    assert_eq!(session.phase(), Phase::Memorizing);
    assert!(session.selection().is_empty());
    assert!(session.result().is_none());
    assert_eq!(session.score().total(), 1);
}

#[test]
fn interactions_outside_selecting_are_ignored() {
    let mut session = GameSession::default();

    assert_eq!(session.toggle_selection(0), SelectOutcome::NoChange);
    assert_eq!(session.submit(), SubmitOutcome::NoChange);
    assert_eq!(session.score().rounds_scored(), 0);
}

#[test]
fn flash_is_only_visible_every_other_interval() {
    let mut session = GameSession::default();

    let lit: Vec<bool> = (0..6)
        .map(|_| {
            let lit = session.flashing_cells().next().is_some();
            session.advance_by(600);
            lit
        })
        .collect();

    assert_eq!(lit, [true, false, true, false, true, false]);
}

// Whole-round scenarios driven through the public API with the recording
// platform. No wasm needed; these run on the host with `cargo test`.

use drop_catcher::consts::{TRY_AGAIN_MESSAGES, WIN_MESSAGES};
use drop_catcher::platform::{Control, MessageTone, PortCall, Recorder, TextSlot};
use drop_catcher::random::ScriptedRandom;
use drop_catcher::sim::GamePhase;
use drop_catcher::{Difficulty, Game};

fn new_game(difficulty: Difficulty, unit: f64, screen: &Recorder) -> Game {
    Game::new(
        difficulty,
        Box::new(ScriptedRandom::constant(unit)),
        Box::new(screen.clone()),
        Box::new(screen.clone()),
    )
    .with_celebration(Box::new(screen.clone()))
}

/// Click every live drop, returns how many clicks counted
fn click_all(game: &mut Game) -> usize {
    let ids: Vec<_> = game.session().drops().iter().map(|d| d.id).collect();
    ids.into_iter().filter(|&id| game.click_drop(id)).count()
}

#[test]
fn normal_round_won_with_twenty_water_clicks() {
    let screen = Recorder::new(600.0);
    // 0.9 never rolls mud on normal
    let mut game = new_game(Difficulty::Normal, 0.9, &screen);
    game.start();

    let mut clicks = 0;
    while clicks < 20 {
        assert!(game.is_running(), "ran out of time after {clicks} clicks");
        let ids: Vec<_> = game.session().drops().iter().map(|d| d.id).collect();
        for id in ids {
            if clicks < 20 && game.click_drop(id) {
                clicks += 1;
            }
        }
        game.advance(250.0);
    }
    assert_eq!(game.session().score(), 20);
    assert_eq!(screen.last_progress(), Some(100.0));

    // The round only ends when the clock runs out
    assert!(game.is_running());
    game.advance(30_000.0);
    assert_eq!(game.phase(), GamePhase::Ended);

    let outcome = game.last_outcome().expect("round finished");
    assert!(outcome.won);
    assert_eq!(outcome.score, 20);
    assert!(WIN_MESSAGES.contains(&outcome.message));
    assert!(outcome.celebrated);
    assert_eq!(screen.count(|c| *c == PortCall::Celebrate), 1);
    assert_eq!(screen.last_message().map(|(_, tone)| tone), Some(MessageTone::Highlight));
}

#[test]
fn normal_round_lost_on_timeout_without_clicks() {
    let screen = Recorder::new(600.0);
    let mut game = new_game(Difficulty::Normal, 0.4, &screen);
    game.start();
    game.advance(29_000.0);
    assert!(game.is_running());
    assert_eq!(game.session().time_remaining(), 1);

    game.advance(1_000.0);
    let outcome = game.last_outcome().expect("round finished");
    assert!(!outcome.won);
    assert_eq!(outcome.score, 0);
    assert!(TRY_AGAIN_MESSAGES.contains(&outcome.message));
    assert_eq!(screen.count(|c| *c == PortCall::Celebrate), 0);
    assert_eq!(
        screen.last_message(),
        Some((outcome.message.to_string(), MessageTone::Neutral))
    );
}

#[test]
fn win_without_any_celebration_hook() {
    let screen = Recorder::new(600.0);
    let mut game = Game::new(
        Difficulty::Easy,
        Box::new(ScriptedRandom::constant(0.9)),
        Box::new(screen.clone()),
        Box::new(screen.clone()),
    );
    game.start();
    while game.is_running() {
        click_all(&mut game);
        game.advance(500.0);
    }
    let outcome = game.last_outcome().expect("round finished");
    assert!(outcome.won);
    assert!(!outcome.celebrated);
}

#[test]
fn switching_difficulty_mid_round_resets_and_uses_new_profile() {
    let screen = Recorder::new(600.0);
    // 0.3: water on normal (mud 0.25), mud on hard (mud 0.35)
    let mut game = new_game(Difficulty::Normal, 0.3, &screen);
    game.start();
    game.advance(5_000.0);
    click_all(&mut game);
    assert!(game.session().score() > 0);

    game.select_difficulty(Difficulty::Hard);
    assert_eq!(game.phase(), GamePhase::Idle);
    assert_eq!(game.session().score(), 0);
    assert_eq!(screen.last_text(TextSlot::Time).as_deref(), Some("22"));
    assert!(screen.drops_on_screen().is_empty());

    // Nothing from the old round may fire
    screen.clear_calls();
    game.advance(60_000.0);
    assert!(screen.calls().is_empty());

    game.start();
    assert_eq!(game.session().time_remaining(), 22);
    assert!(game.session().drops().iter().all(|d| d.is_mud()));

    // Hard interval with 0.3: 350 + 0.3 * 350 = 455ms
    game.advance(454.0);
    assert_eq!(game.session().drops().len(), 1);
    game.advance(1.0);
    assert_eq!(game.session().drops().len(), 2);

    game.advance(22_000.0);
    assert_eq!(game.phase(), GamePhase::Ended);
    assert_eq!(game.last_outcome().map(|o| o.score), Some(0));
}

#[test]
fn reset_mid_round_clears_drops_and_stops_timers() {
    let screen = Recorder::new(600.0);
    let mut game = new_game(Difficulty::Normal, 0.9, &screen);
    game.start();
    game.advance(4_000.0);
    assert!(!screen.drops_on_screen().is_empty());

    game.reset();
    assert!(screen.drops_on_screen().is_empty());
    assert!(game.session().drops().is_empty());
    assert_eq!(game.pending_timers(), 0);
    assert_eq!(screen.control_enabled(Control::Start), Some(true));
    assert_eq!(screen.control_enabled(Control::Reset), Some(false));
    assert_eq!(screen.control_enabled(Control::Difficulty), Some(true));
    assert_eq!(screen.calls().last(), Some(&PortCall::StopMusic));

    screen.clear_calls();
    game.advance(10_000.0);
    assert_eq!(screen.count(|c| matches!(c, PortCall::CreateDrop(_))), 0);
    assert_eq!(screen.count(|c| matches!(c, PortCall::SetText(TextSlot::Time, _))), 0);

    // Start works again afterwards
    game.start();
    assert!(game.is_running());
    assert_eq!(game.session().drops().len(), 1);
}

#[test]
fn every_drop_fits_the_container() {
    let screen = Recorder::new(60.0);
    let mut game = Game::new(
        Difficulty::Hard,
        Box::new(drop_catcher::random::GameRng::new(1234)),
        Box::new(screen.clone()),
        Box::new(screen.clone()),
    );
    game.start();
    game.advance(22_000.0);

    let drops: Vec<_> = screen
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            PortCall::CreateDrop(d) => Some(d),
            _ => None,
        })
        .collect();
    assert!(drops.len() > 20);
    for d in drops {
        assert!(d.left >= 0.0);
        assert!(d.left + d.size as f64 <= 60.0);
    }
}

#[test]
fn mud_click_never_drives_score_negative() {
    let screen = Recorder::new(600.0);
    // 0.0 rolls mud every time
    let mut game = new_game(Difficulty::Normal, 0.0, &screen);
    game.start();
    for _ in 0..10 {
        click_all(&mut game);
        game.advance(500.0);
    }
    assert_eq!(game.session().score(), 0);
    assert_eq!(screen.last_text(TextSlot::Score).as_deref(), Some("0"));
    assert!(screen.calls().contains(&PortCall::Flash(Some(drop_catcher::platform::Flash::Bad))));
}

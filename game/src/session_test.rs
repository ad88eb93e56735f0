#![allow(clippy::float_cmp)]

use super::*;

fn question(id: &str) -> Question {
    Question { id: id.to_owned(), topic: "arrays".to_owned(), difficulty: "easy".to_owned(), ..Question::default() }
}

fn loaded(ids: &[&str]) -> GameState {
    let mut game = GameState::new();
    game.load(ids.iter().map(|id| question(id)).collect());
    game
}

fn answer(game: &mut GameState, correct: bool) {
    let ticket = game.begin_submit("x").unwrap();
    game.apply_result(&ticket, &graded(correct, 10));
}

fn graded(correct: bool, xp_earned: u64) -> SubmitAnswerResponse {
    SubmitAnswerResponse {
        correct,
        xp_earned,
        explanation: if correct { "Nice".to_owned() } else { "Try again! Check your logic.".to_owned() },
        hints_used: 0,
        total_xp: None,
        questions_solved: None,
    }
}

// --- load ---

#[test]
fn new_game_is_idle() {
    let game = GameState::new();
    assert_eq!(game.phase(), Phase::Idle);
    assert!(game.current_question().is_none());
    assert_eq!(game.level(), 1);
}

#[test]
fn load_activates_first_question() {
    let game = loaded(&["q1", "q2"]);
    assert_eq!(game.phase(), Phase::QuestionActive);
    assert_eq!(game.index(), 0);
    assert_eq!(game.current_question().map(|q| q.id.as_str()), Some("q1"));
}

#[test]
fn load_empty_list_stays_idle() {
    let game = loaded(&[]);
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn reload_keeps_xp_and_resets_index() {
    let mut game = loaded(&["q1", "q2"]);
    let ticket = game.begin_submit("x").unwrap();
    game.apply_result(&ticket, &graded(true, 10));
    game.next();
    game.load(vec![question("q9")]);
    assert_eq!(game.index(), 0);
    assert_eq!(game.xp(), 10);
    assert_eq!(game.solved(), 1);
    assert!(game.feedback().is_none());
}

// --- submit ---

#[test]
fn correct_answer_adds_exact_xp_and_one_solve() {
    let mut game = loaded(&["q1"]);
    let ticket = game.begin_submit("[3, 2, 1]").unwrap();
    let event = game.apply_result(&ticket, &graded(true, 10));
    assert_eq!(game.xp(), 10);
    assert_eq!(game.solved(), 1);
    assert_eq!(game.attempts(), 1);
    assert_eq!(game.phase(), Phase::AnswerSubmitted(Verdict::Correct));
    let event = event.unwrap();
    assert!(event.correct);
    assert_eq!(event.question_id, "q1");
}

#[test]
fn incorrect_answer_keeps_state_and_offers_retry() {
    let mut game = loaded(&["q1", "q2"]);
    let ticket = game.begin_submit("nope").unwrap();
    let event = game.apply_result(&ticket, &graded(false, 0));
    assert!(event.is_none());
    assert_eq!(game.xp(), 0);
    assert_eq!(game.solved(), 0);
    assert_eq!(game.attempts(), 1);
    assert_eq!(game.index(), 0);
    assert_eq!(game.phase(), Phase::AnswerSubmitted(Verdict::Incorrect));
    assert!(game.retry());
    assert_eq!(game.phase(), Phase::QuestionActive);
    assert!(game.feedback().is_none());
}

#[test]
fn blank_answer_is_rejected() {
    let game = loaded(&["q1"]);
    assert_eq!(game.begin_submit("   \n"), Err(SubmitError::BlankAnswer));
}

#[test]
fn submit_without_questions_is_rejected() {
    let game = GameState::new();
    assert_eq!(game.begin_submit("x"), Err(SubmitError::NoActiveQuestion));
}

#[test]
fn second_submit_while_feedback_showing_is_rejected() {
    let mut game = loaded(&["q1"]);
    let ticket = game.begin_submit("x").unwrap();
    game.apply_result(&ticket, &graded(true, 10));
    assert_eq!(game.begin_submit("x"), Err(SubmitError::AlreadyAnswered));
}

#[test]
fn ticket_carries_time_spent() {
    let mut game = loaded(&["q1"]);
    for _ in 0..42 {
        game.tick();
    }
    let ticket = game.begin_submit("x").unwrap();
    assert_eq!(ticket.time_taken, 42.0);
    let event = game.apply_result(&ticket, &graded(true, 15)).unwrap();
    assert_eq!(event.time_taken, 42.0);
}

#[test]
fn network_failure_shows_fallback_and_allows_retry() {
    let mut game = loaded(&["q1"]);
    let ticket = game.begin_submit("x").unwrap();
    game.apply_failure(&ticket);
    let feedback = game.feedback().unwrap();
    assert!(!feedback.correct);
    assert_eq!(feedback.explanation, SUBMIT_FAILED_EXPLANATION);
    assert_eq!(game.attempts(), 0);
    assert!(game.retry());
    assert!(game.begin_submit("x").is_ok());
}

#[test]
fn stale_ticket_is_ignored() {
    let mut game = loaded(&["q1", "q2"]);
    let ticket = game.begin_submit("x").unwrap();
    game.load(vec![question("q9")]);
    assert!(game.apply_result(&ticket, &graded(true, 10)).is_none());
    assert_eq!(game.xp(), 0);
    assert_eq!(game.phase(), Phase::QuestionActive);
}

#[test]
fn solved_never_exceeds_attempts() {
    let mut game = loaded(&["q1", "q2", "q3"]);
    for correct in [false, true, true, false, true] {
        if game.phase() != Phase::QuestionActive {
            break;
        }
        let ticket = game.begin_submit("x").unwrap();
        game.apply_result(&ticket, &graded(correct, 10));
        assert!(game.solved() <= game.attempts());
        if correct {
            game.next();
        } else {
            game.retry();
        }
    }
}

#[test]
fn level_tracks_xp_after_each_update() {
    let mut game = loaded(&["q1", "q2", "q3", "q4", "q5", "q6"]);
    for xp in [25, 25, 25, 30, 10] {
        let ticket = game.begin_submit("x").unwrap();
        game.apply_result(&ticket, &graded(true, xp));
        assert_eq!(u64::from(game.level()), game.xp() / 100 + 1);
        game.next();
    }
    assert_eq!(game.xp(), 115);
    assert_eq!(game.level(), 2);
}

// --- next ---

#[test]
fn next_advances_and_resets_timer() {
    let mut game = loaded(&["q1", "q2"]);
    game.tick();
    answer(&mut game, true);
    assert_eq!(game.next(), Advance::Moved(1));
    assert_eq!(game.time_spent(), 0);
    assert_eq!(game.current_question().map(|q| q.id.as_str()), Some("q2"));
}

#[test]
fn passing_last_question_completes_exactly_once() {
    let mut game = loaded(&["q1", "q2"]);
    answer(&mut game, true);
    assert_eq!(game.next(), Advance::Moved(1));
    answer(&mut game, true);
    assert_eq!(game.next(), Advance::Completed);
    assert!(game.is_complete());
    assert!(game.feedback().is_some_and(|f| f.all_complete && f.explanation == ALL_COMPLETE_MESSAGE));
    assert_eq!(game.next(), Advance::Stayed);
    assert_eq!(game.next(), Advance::Stayed);
    assert_eq!(game.index(), 1);
}

#[test]
fn next_on_idle_stays() {
    let mut game = GameState::new();
    assert_eq!(game.next(), Advance::Stayed);
}

#[test]
fn next_before_answering_stays() {
    let mut game = loaded(&["q1", "q2", "q3"]);
    game.tick();
    assert_eq!(game.next(), Advance::Stayed);
    assert_eq!(game.index(), 0);
    assert_eq!(game.phase(), Phase::QuestionActive);
    assert_eq!(game.time_spent(), 1);
    assert_eq!(game.attempts(), 0);
}

#[test]
fn next_after_wrong_answer_moves_on() {
    let mut game = loaded(&["q1", "q2"]);
    answer(&mut game, false);
    assert_eq!(game.next(), Advance::Moved(1));
    assert_eq!(game.solved(), 0);
    assert_eq!(game.attempts(), 1);
}

#[test]
fn tick_stops_when_complete() {
    let mut game = loaded(&["q1"]);
    answer(&mut game, true);
    assert_eq!(game.next(), Advance::Completed);
    game.tick();
    assert_eq!(game.time_spent(), 0);
}

#[test]
fn retry_after_correct_answer_is_refused() {
    let mut game = loaded(&["q1"]);
    let ticket = game.begin_submit("x").unwrap();
    game.apply_result(&ticket, &graded(true, 10));
    assert!(!game.retry());
}

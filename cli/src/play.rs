//! Terminal game loop.
//!
//! Lines typed on stdin are answers unless they start with `:`, which makes
//! them commands. A one-second ticker drives the question timer and shows
//! new hint recommendations and notices as they arrive.

#[cfg(test)]
#[path = "play_test.rs"]
mod play_test;

use std::sync::Arc;
use std::time::Duration;

use client::net::questions::QuestionService;
use client::pages::game::{GamePage, Notice};
use client::pages::home::HomePage;
use client::pages::results::ResultsPage;
use client::webcam::still::StillImageDevices;
use client::{ApiClient, ClientConfig};
use game::hints::{accept_label, title};
use game::progress::{format_time, level_for_xp, level_progress_percent, xp_to_next_level};
use game::session::Advance;
use game::story::building_label;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::warn;
use wire::HintRecommendation;

use crate::{CliError, PlayArgs, logged_in, print_results};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Answer(String),
    Next,
    Retry,
    Hint,
    Accept,
    Dismiss,
    Status,
    Quit,
    Unknown(String),
    Empty,
}

impl Input {
    pub(crate) fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        let Some(command) = trimmed.strip_prefix(':') else {
            return Self::Answer(trimmed.to_owned());
        };
        match command.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Self::Next,
            "r" | "retry" => Self::Retry,
            "h" | "hint" => Self::Hint,
            "a" | "accept" => Self::Accept,
            "d" | "dismiss" => Self::Dismiss,
            "s" | "status" => Self::Status,
            "q" | "quit" => Self::Quit,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

pub(crate) async fn run(api: ApiClient, config: &ClientConfig, args: PlayArgs) -> Result<(), CliError> {
    let mut auth = logged_in(api.clone()).await?;
    let mut home = HomePage::load(&auth).await?;
    home.select_topic(&args.topic)?;
    home.select_difficulty(args.difficulty);
    if let Some(chapter) = home.take_intro() {
        println!("== {} ==\n{}\n", chapter.title, chapter.intro);
    }

    let mut questions = QuestionService::new(api.clone());
    let mut page = GamePage::start(&auth, config, &mut questions, &home.game_params()).await?;
    if let Some(path) = args.frames {
        if page.attach_camera(Arc::new(StillImageDevices::new(path))).await.is_err() {
            eprintln!("{}", page.webcam_error().unwrap_or("camera unavailable"));
        }
    }
    println!("Commands: :next :retry :hint :accept :dismiss :status :quit");
    print_question(&page);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let second = Duration::from_secs(1);
    let mut ticker = tokio::time::interval_at(Instant::now() + second, second);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut login_required = api.login_required();
    let mut last_hint: Option<HintRecommendation> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                page.tick();
                let visible = page.poll_hint().cloned();
                if visible != last_hint {
                    if let Some(hint) = &visible {
                        print_hint(hint);
                    }
                    last_hint = visible;
                }
            }
            changed = login_required.changed() => {
                if changed.is_ok() {
                    auth.sync_with_token();
                    return Err(CliError::NotLoggedIn);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::Empty => {}
                    Input::Answer(answer) => match page.submit(&answer, &mut auth).await {
                        Ok(()) => print_feedback(&page),
                        Err(e) => eprintln!("{e}"),
                    },
                    Input::Next => match page.next() {
                        Advance::Moved(_) => {
                            last_hint = None;
                            print_question(&page);
                        }
                        Advance::Completed => print_feedback(&page),
                        Advance::Stayed if page.state().is_complete() => {
                            println!("Session is over; :quit to see results.");
                        }
                        Advance::Stayed => println!("Answer this question first."),
                    },
                    Input::Retry => {
                        if page.retry() {
                            print_question(&page);
                        } else {
                            println!("Nothing to retry.");
                        }
                    }
                    Input::Hint => match page.poll_hint() {
                        Some(hint) => print_hint(hint),
                        None => println!("No hint right now."),
                    },
                    Input::Accept => match page.accept_hint() {
                        Some(hint) => print_accepted(&hint),
                        None => println!("No hint to accept."),
                    },
                    Input::Dismiss => page.dismiss_hint(),
                    Input::Status => print_status(&page),
                    Input::Unknown(command) => eprintln!("unknown command `:{command}`"),
                }
            }
        }
        for notice in page.take_notices() {
            print_notice(&notice);
        }
    }

    let session_id = page.session_id().to_owned();
    drop(page);
    match ResultsPage::load(&api, Some(session_id.as_str())).await {
        Ok(results) => print_results(results.summary()),
        Err(e) => warn!(%session_id, error = %e, "failed to load results"),
    }
    Ok(())
}

fn print_question(page: &GamePage) {
    let state = page.state();
    let Some(question) = state.current_question() else {
        println!("No questions available.");
        return;
    };
    println!("\nQuestion {}/{}  [{}]", state.index() + 1, state.questions().len(), question.difficulty);
    println!("{}", question.question);
    if !question.example_input.is_empty() {
        println!("  input:  {}", question.example_input);
    }
    if !question.example_output.is_empty() {
        println!("  output: {}", question.example_output);
    }
}

fn print_feedback(page: &GamePage) {
    let Some(feedback) = page.state().feedback() else {
        return;
    };
    if feedback.all_complete {
        println!("{}", feedback.explanation);
        return;
    }
    if feedback.correct {
        println!("Correct! +{} XP", feedback.xp_earned);
    } else {
        println!("Not quite. :retry to try again or :next to move on.");
    }
    if !feedback.explanation.is_empty() {
        println!("{}", feedback.explanation);
    }
}

fn print_status(page: &GamePage) {
    let state = page.state();
    let emotion = page.current_emotion();
    println!(
        "Level {}  XP {}  solved {}/{}  time {}  {} {}",
        state.level(),
        state.xp(),
        state.solved(),
        state.attempts(),
        format_time(state.time_spent()),
        emotion.emoji(),
        emotion
    );
    println!("{}", level_progress_line(state.xp()));
    let city = page.city();
    println!("City {}/{} restored", city.restored_count(), city.total());
}

pub(crate) fn level_progress_line(xp: u64) -> String {
    format!(
        "Level progress {}%  {} XP to level {}",
        level_progress_percent(xp),
        xp_to_next_level(xp),
        level_for_xp(xp).saturating_add(1)
    )
}

fn print_hint(hint: &HintRecommendation) {
    println!("\n[{}]", title(hint));
    if let Some(message) = &hint.message {
        println!("{message}");
    }
    if let Some(label) = accept_label(&hint.action) {
        println!("{label}: type :accept, or :dismiss");
    }
}

fn print_accepted(hint: &HintRecommendation) {
    if let Some(text) = hint.hint.as_ref().or(hint.content.as_ref()) {
        println!("{text}");
    }
    for mistake in &hint.common_mistakes {
        println!("  - {mistake}");
    }
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::LevelUp(level) => println!("*** Level up! You reached level {level} ***"),
        Notice::BuildingRestored { building_id, building } => {
            let name = if building.name.is_empty() { building_label(building_id) } else { building.name.clone() };
            println!("*** {name} restored! ***");
            if !building.restoration_text.is_empty() {
                println!("{}", building.restoration_text);
            }
        }
    }
}

//! Dot Count entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this plays one scripted session headlessly and logs it.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use dot_count::QuizSession;
    use dot_count::platform::clock_seed;
    use dot_count::quiz::Phase;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    log::info!("Dot Count (native) starting with seed {}", seed);

    let mut session = QuizSession::with_defaults(seed);
    let settings = session.settings().clone();
    if let Err(e) = session.start(settings) {
        log::error!("Could not start session: {}", e);
        return;
    }

    // Simulated player: usually right, sometimes wrong, sometimes too slow
    let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let frame = Duration::from_millis(100);
    while session.phase() == Phase::Playing {
        let snap = session.snapshot();
        let roll: f32 = player.random();
        if roll < 0.15 {
            while session.tick(frame).is_none() {}
            continue;
        }

        let choice = if roll < 0.7 {
            snap.current_answer
        } else {
            snap.choices[player.random_range(0..snap.choices.len())]
        };
        match session.submit_answer(choice) {
            Ok(outcome) => log::info!(
                "Question {}: picked {} ({}), difficulty now {}",
                snap.question_index + 1,
                choice,
                if outcome.correct { "correct" } else { "wrong" },
                outcome.new_difficulty
            ),
            Err(e) => log::warn!("Answer rejected: {}", e),
        }
    }

    let hud = session.hud();
    if let Some(panel) = hud.game_over {
        println!("{}: {}", panel.title, panel.score_line);
    }
    session.dispose();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}

//! Matchstick Dodge native runner
//!
//! The game itself runs in the browser through `DodgeGame`. Natively this
//! plays one headless session with a simple autopilot, which is handy for
//! checking difficulty codes from the terminal:
//!
//! `RUST_LOG=info cargo run -- fire-2025 3000`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use matchstick_dodge::platform::InputEvent;
    use matchstick_dodge::sim::{GameEvent, Surface};
    use matchstick_dodge::{Engine, Settings};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let code = args.next().unwrap_or_default();
    let frames: u32 = args.next().and_then(|n| n.parse().ok()).unwrap_or(3600);

    let mut settings = Settings::with_code(code);
    settings.seed = Some(2025);
    let mut engine = Engine::new(settings, Surface::new(800.0, 600.0), 0);
    engine.start();

    let mut rising = false;
    let mut frame = 0;
    while frame < frames {
        let want_rise = autopilot_wants_rise(&engine);
        if want_rise != rising {
            engine.post(if want_rise {
                InputEvent::RisePressed
            } else {
                InputEvent::RiseReleased
            });
            rising = want_rise;
        }

        let events = engine.step(16.0);
        frame += 1;
        if let Some(GameEvent::GameOver(score)) = events
            .iter()
            .find(|e| matches!(e, GameEvent::GameOver(_)))
        {
            log::info!("Burnt out after {} frames", frame);
            println!("{}", serde_json::json!({ "frames": frame, "score": score }));
            return;
        }
    }

    log::info!("Survived all {} frames", frames);
    println!(
        "{}",
        serde_json::json!({ "frames": frames, "score": engine.score() })
    );
}

/// Steer toward the middle of the nearest gap still ahead of the player
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_rise(engine: &matchstick_dodge::Engine) -> bool {
    use matchstick_dodge::sim::GapLayout;

    let state = engine.state();
    let player = &state.player;
    let target = state
        .obstacles
        .iter()
        .filter(|ob| ob.right() >= player.pos.x && ob.pos.y == 0.0)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .map(|top| top.size.y + GapLayout::gap_height(state.surface) / 2.0)
        .unwrap_or(state.surface.height / 2.0);

    let center = player.pos.y + player.size.y / 2.0;
    center > target && player.vel_y > -2.0
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host page drives the game through `DodgeGame`
}

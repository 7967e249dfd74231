//! Headless demo driver
//!
//! Runs each cabinet for a while under scripted input on a synthetic
//! clock, which exercises the full loop wiring: scheduler → sampled
//! intents → simulation → audio cues → draw list.

use retroverse_arcade::audio::{AudioPort, LogAudio, play_cues};
use retroverse_arcade::games::invaders::InvadersGame;
use retroverse_arcade::games::pong::PongGame;
use retroverse_arcade::games::snake::SnakeGame;
use retroverse_arcade::games::tetris::TetrisGame;
use retroverse_arcade::input::{Dir, InputSource};
use retroverse_arcade::persistence::{GameId, MemoryStore, PersistencePort};
use retroverse_arcade::{ArcadeGame, Phase, Scheduler, Settings, TickInput};

const DEMO_SEED: u64 = 0x5EED;
/// Wall-clock budget per cabinet, in synthetic milliseconds.
const DEMO_BUDGET_MS: f64 = 60_000.0;

fn main() {
    env_logger::init();

    let settings = Settings::default();
    let mut audio = LogAudio;
    let mut store = MemoryStore::new();
    log::info!(
        "demo starting (volume {:.1}, pong difficulty {:?})",
        settings.effective_volume(),
        settings.pong_difficulty
    );

    run_snake(&mut store, &mut audio);

    let mut pong = PongGame::new(DEMO_SEED, 0, settings.pong_difficulty);
    drive(&mut pong, &mut store, &mut audio, |tick| {
        // Chase nothing in particular; the computer carries the rally.
        let dir = if (tick / 40) % 2 == 0 { Dir::Up } else { Dir::Down };
        TickInput::default().with_dir_held(dir)
    });

    let mut tetris = TetrisGame::new(DEMO_SEED, 0);
    drive(&mut tetris, &mut store, &mut audio, |tick| TickInput {
        action_pressed: tick % 90 == 0,
        queued_dir: match tick % 30 {
            0 => Some(Dir::Left),
            15 => Some(Dir::Up),
            _ => None,
        },
        ..TickInput::default()
    });

    let mut invaders = InvadersGame::new(DEMO_SEED, 0);
    drive(&mut invaders, &mut store, &mut audio, |tick| {
        let input = TickInput {
            action_held: true,
            ..TickInput::default()
        };
        let dir = if (tick / 50) % 2 == 0 { Dir::Right } else { Dir::Left };
        input.with_dir_held(dir)
    });

    for game in GameId::ALL {
        log::info!(
            "{game:?} high score: {}",
            store.high_score(game).unwrap_or(0)
        );
    }
}

/// Snake gets a real bot: greedily steer toward the food and let the rule
/// set reject anything illegal.
fn run_snake(store: &mut dyn PersistencePort, audio: &mut dyn AudioPort) {
    let mut game = SnakeGame::new(DEMO_SEED, store.high_score(GameId::Snake).unwrap_or(0));
    let mut input = InputSource::new();
    input.key_down(" ");

    let mut scheduler = Scheduler::new(game.tick_interval_ms());
    scheduler.start(0.0);

    let mut now = 0.0;
    while game.phase() != Phase::GameOver && now < DEMO_BUDGET_MS {
        now += 5.0;
        for _ in 0..scheduler.tick(now) {
            let head = *game.body().front().unwrap_or(&(0, 0));
            let food = game.food();
            let code = if (food.0 - head.0).abs() >= (food.1 - head.1).abs() {
                if food.0 > head.0 { "d" } else { "a" }
            } else if food.1 > head.1 {
                "s"
            } else {
                "w"
            };
            input.key_down(code);
            let sampled = input.sample();
            input.key_up(code);

            game.tick(&sampled, store);
            play_cues(audio, game.drain_cues());
            scheduler.set_interval_ms(game.tick_interval_ms());
        }
        let _frame = game.draw();
    }
    scheduler.stop();
    input.clear();
    log::info!(
        "snake finished at {:?} with score {}",
        game.phase(),
        game.score().score
    );
}

/// Generic driver for the scripted cabinets.
fn drive<G, F>(game: &mut G, store: &mut dyn PersistencePort, audio: &mut dyn AudioPort, script: F)
where
    G: ArcadeGame,
    F: Fn(u64) -> TickInput,
{
    let mut scheduler = Scheduler::new(game.tick_interval_ms());
    scheduler.start(0.0);

    game.tick(
        &TickInput {
            start: true,
            ..TickInput::default()
        },
        store,
    );

    let mut now = 0.0;
    let mut ticks = 0u64;
    while game.phase() != Phase::GameOver && now < DEMO_BUDGET_MS {
        now += 5.0;
        for _ in 0..scheduler.tick(now) {
            ticks += 1;
            game.tick(&script(ticks), store);
            play_cues(audio, game.drain_cues());
            scheduler.set_interval_ms(game.tick_interval_ms());
        }
        let _frame = game.draw();
    }
    scheduler.stop();
    log::info!(
        "{:?} finished at {:?} with score {}",
        game.id(),
        game.phase(),
        game.score().score
    );
}

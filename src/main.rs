//! Mole Mallet entry point
//!
//! The window/render collaborator is out of scope here, so the binary wires
//! the real load path together and then runs a deterministic headless demo
//! round on a simulated clock, auto-playing the way a player would.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use glam::{Mat4, Vec2, Vec3};

use mole_mallet::assets::AssetCatalog;
use mole_mallet::consts::AIM_PLANE_Y;
use mole_mallet::history::{MatchHistory, MatchRecord};
use mole_mallet::settings::Settings;
use mole_mallet::sim::{ClickRay, GameEvent, GameState, SlotRegistry, TickInput, Viewport, tick};
use mole_mallet::ui::Menu;
use mole_mallet::view::FrameView;

#[derive(Parser, Debug)]
#[command(name = "mole-mallet", about = "First-person whack-a-mole arena")]
struct Args {
    /// Primary scene file (required)
    scene: PathBuf,

    /// Slot layout file, one `x y z [type]` per line
    #[arg(long, default_value = "slots.txt")]
    slots: PathBuf,

    /// Settings file (JSON)
    #[arg(long, default_value = "mole-mallet-settings.json")]
    settings: PathBuf,

    /// Match history file
    #[arg(long, default_value = "mole-mallet-history.txt")]
    history: PathBuf,

    /// Simulation seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // The primary scene is the one fatal load.
    let catalog = match AssetCatalog::load(&args.scene, None, None) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            process::exit(1);
        }
    };
    log::info!("assets ready: {catalog:?}");

    let settings = Settings::load(&args.settings);
    let mut history = match MatchHistory::load(&args.history) {
        Ok(history) => history,
        Err(err) => {
            log::warn!("could not read match history ({err}), starting fresh");
            MatchHistory::new()
        }
    };

    let mut state = GameState::new(args.seed, SlotRegistry::default());
    // Missing or bad slot file degrades to an empty registry: no targets,
    // but the game still runs.
    match SlotRegistry::load_file(&args.slots, None, &mut state.rng) {
        Ok(slots) => state.replace_slots(slots, 0),
        Err(err) => log::warn!("slot file unavailable ({err}), no targets loaded"),
    }

    run_demo_round(&mut state, &settings, &mut history);

    if let Err(err) = history.save(&args.history) {
        log::warn!("failed to save match history: {err}");
    }
    settings.save(&args.settings);

    // Show the in-scene history page the way the menu renders it.
    let mut menu = Menu::default();
    menu.toggle_open();
    menu.move_selection(4);
    menu.activate();
    println!("\nMatch history:");
    for line in menu.lines(&settings, &history) {
        println!("  {line}");
    }
}

/// Simulate one full round at 60 fps, clicking each mole as it appears.
fn run_demo_round(state: &mut GameState, settings: &Settings, history: &mut MatchHistory) {
    const FRAME_MS: u64 = 16;
    const DT: f32 = FRAME_MS as f32 / 1000.0;

    let mut now: u64 = 0;
    tick(
        state,
        &TickInput {
            start_round: true,
            ..Default::default()
        },
        settings,
        now,
        DT,
    );

    loop {
        now += FRAME_MS;

        let mut input = TickInput::default();
        if state.hammer.is_idle() {
            if let Some(slot) = state.scheduler.visible_slot() {
                if let Some(target) = state.slots.get(slot) {
                    input.click = Some(aim_click(state, target.position));
                }
            }
        }

        tick(state, &input, settings, now, DT);

        let mut round_over = false;
        for event in state.drain_events() {
            match event {
                GameEvent::SwingHit { slot, points } => {
                    println!("[{now:>6} ms] whack! slot {slot} for {points:+} points")
                }
                GameEvent::SwingMiss => println!("[{now:>6} ms] swing missed"),
                GameEvent::RoundEnded { score } => {
                    println!("[{now:>6} ms] round over, final score {score}");
                    history.push(MatchRecord {
                        finished_at: chrono::Local::now().naive_local(),
                        score,
                    });
                    round_over = true;
                }
                _ => {}
            }
        }
        if round_over {
            break;
        }

        // One captured frame per simulated second, as a renderer would see it.
        if now % 1000 < FRAME_MS {
            let view = FrameView::capture(state, settings, now);
            log::debug!(
                "t={}s score={} remaining={}s mole={:?}",
                now / 1000,
                view.hud.score,
                view.hud.remaining_s,
                view.mole.map(|m| m.slot)
            );
        }
    }
}

/// Synthesize the click a player would make: a ray through the screen center
/// of a camera looking at the mole's position on the aim plane.
fn aim_click(state: &GameState, slot_pos: Vec3) -> ClickRay {
    let eye = state.camera.position;
    let aim = Vec3::new(slot_pos.x, AIM_PLANE_Y, slot_pos.z);
    ClickRay {
        screen: Vec2::new(400.0, 300.0),
        view: Mat4::look_at_rh(eye, aim, Vec3::Y),
        proj: Mat4::perspective_rh_gl(60f32.to_radians(), 4.0 / 3.0, 0.1, 100.0),
        viewport: Viewport::new(800.0, 600.0),
    }
}

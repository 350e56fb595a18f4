//! Per-frame update
//!
//! Single-threaded and cooperative: the embedder calls `tick` once per frame
//! with the frame's inputs and a monotonic millisecond clock reading. Within
//! one tick the ordering is fixed - round controls, camera, click handling,
//! hammer advancement, hit test, score mutation, scheduler housekeeping,
//! finalize-on-timeout - so every draw sees a consistent state.

use glam::{Mat4, Vec2};

use crate::consts::AIM_PLANE_Y;
use crate::direction_between;
use crate::settings::Settings;
use crate::sim::hammer::resolve_hit;
use crate::sim::ray::{Ray, Viewport};
use crate::sim::scheduler::Transition;
use crate::sim::state::{GameEvent, GameState};

/// A pointer click plus the transforms the renderer drew the frame with.
#[derive(Debug, Clone, Copy)]
pub struct ClickRay {
    pub screen: Vec2,
    pub view: Mat4,
    pub proj: Mat4,
    pub viewport: Viewport,
}

/// Input commands for a single frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw mouse motion (pixels)
    pub mouse_delta: Vec2,
    /// Key axes, -1/0/+1
    pub move_forward: f32,
    pub move_strafe: f32,
    /// Swing action
    pub click: Option<ClickRay>,
    pub start_round: bool,
    pub stop_round: bool,
    pub toggle_pause: bool,
}

/// Advance the game by one frame.
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings, now_ms: u64, dt: f32) {
    state.camera.sensitivity = settings.mouse_sensitivity;
    state.scheduler.show_ms = settings.mole_show_ms;
    state.scheduler.hide_ms = settings.mole_hide_ms;

    if input.start_round {
        start_round(state, settings, now_ms);
    }
    if input.toggle_pause {
        toggle_pause(state, now_ms);
    }
    if input.stop_round {
        stop_round(state);
    }

    // Camera stays live even while paused; only the timers halt.
    if input.mouse_delta != Vec2::ZERO {
        state
            .camera
            .apply_mouse_delta(input.mouse_delta.x, input.mouse_delta.y);
    }
    state.camera.move_by(input.move_forward, input.move_strafe, dt);
    state.camera.update_reorient();

    if state.round.is_paused() {
        return;
    }

    if let Some(click) = &input.click {
        handle_click(state, click);
    }

    let reorient_progress = state.camera.reorient_progress();
    if let Some(impact) = state.hammer.advance(reorient_progress) {
        match resolve_hit(
            impact.point,
            &mut state.slots,
            &state.scheduler,
            settings.hit_radius,
        ) {
            Some((slot, kind)) => {
                let points = settings.points_for_tier(kind);
                state.score += i64::from(points);
                state.scheduler.hide_now(now_ms);
                log::debug!("hit slot {slot} for {points} points");
                state.push_event(GameEvent::SwingHit { slot, points });
            }
            None => state.push_event(GameEvent::SwingMiss),
        }
    }

    if let Some(transition) = {
        let GameState {
            scheduler,
            slots,
            rng,
            ..
        } = state;
        scheduler.poll(now_ms, slots, rng)
    } {
        state.push_event(match transition {
            Transition::Shown { slot } => GameEvent::MoleShown { slot },
            Transition::Hidden { slot } => GameEvent::MoleHidden { slot },
        });
    }

    if state.round.poll_expired(now_ms) {
        state.scheduler.stop();
        log::info!("round ended with score {}", state.score);
        state.push_event(GameEvent::RoundEnded { score: state.score });
    }
}

/// Start a fresh round, or resume a paused one keeping its remaining time
/// and score. Re-entrant starts while running are no-ops.
fn start_round(state: &mut GameState, settings: &Settings, now_ms: u64) {
    if state.round.is_paused() {
        resume(state, now_ms);
    } else if state.round.start(now_ms, settings.round_duration_ms()) {
        state.score = 0;
        state.scheduler.start(now_ms, &state.slots);
        state.push_event(GameEvent::RoundStarted {
            duration_ms: settings.round_duration_ms(),
        });
    }
}

fn toggle_pause(state: &mut GameState, now_ms: u64) {
    if state.round.pause(now_ms) {
        state.scheduler.stop();
        state.push_event(GameEvent::RoundPaused {
            remaining_ms: state.round.remaining_ms(now_ms),
        });
    } else {
        resume(state, now_ms);
    }
}

fn resume(state: &mut GameState, now_ms: u64) {
    if state.round.resume(now_ms) {
        state.scheduler.start(now_ms, &state.slots);
        state.push_event(GameEvent::RoundResumed {
            remaining_ms: state.round.remaining_ms(now_ms),
        });
    }
}

/// User stop: halts without recording history, unlike a natural timeout.
fn stop_round(state: &mut GameState) {
    if state.round == crate::sim::round::RoundTimer::Idle && !state.scheduler.is_active() {
        return;
    }
    state.round.stop();
    state.scheduler.stop();
    state.push_event(GameEvent::RoundStopped);
}

/// Ray-cast a click. Rays that miss the aim plane (near-parallel, or the
/// intersection behind the origin) are expected and change nothing. A click
/// while the hammer is mid-swing is ignored entirely - no camera turn either.
fn handle_click(state: &mut GameState, click: &ClickRay) {
    if !state.hammer.is_idle() {
        return;
    }
    let Some(ray) = Ray::from_screen(click.screen, click.view, click.proj, click.viewport) else {
        return;
    };
    let Some(point) = ray.intersect_plane_y(AIM_PLANE_Y) else {
        return;
    };

    if let Some(dir) = direction_between(state.camera.position, point) {
        state.camera.begin_reorient(dir);
    }
    state.hammer.begin_swing(&state.camera, point);
    state.push_event(GameEvent::SwingStarted);
}

//! Game settings and preferences
//!
//! Everything tunable-but-not-law lives here, most importantly the tier to
//! point-value mapping, which gets rebalanced per deployment and is
//! therefore configuration rather than a fixed rule.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    HIT_RADIUS, LOOK_SENSITIVITY, MOLE_HIDE_MS, MOLE_SHOW_MS, ROUND_DURATIONS_S, TIER_COUNT,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Round length in seconds; cycled through `ROUND_DURATIONS_S`
    pub round_duration_s: u32,
    /// Mouse look sensitivity (radians per pixel)
    pub mouse_sensitivity: f32,
    /// Purely visual: textured scene vs flat colors
    pub textured: bool,
    /// History listing order: newest first when true
    pub history_newest_first: bool,
    /// Mole visible duration (ms)
    pub mole_show_ms: u64,
    /// Gap between moles (ms)
    pub mole_hide_ms: u64,
    /// Planar distance within which a swing scores
    pub hit_radius: f32,
    /// Signed point delta per tier; one tier is deliberately penalizing
    pub tier_points: [i32; TIER_COUNT],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_duration_s: 60,
            mouse_sensitivity: LOOK_SENSITIVITY,
            textured: true,
            history_newest_first: true,
            mole_show_ms: MOLE_SHOW_MS,
            mole_hide_ms: MOLE_HIDE_MS,
            hit_radius: HIT_RADIUS,
            tier_points: [10, 20, 30, -15],
        }
    }
}

impl Settings {
    pub fn round_duration_ms(&self) -> u64 {
        u64::from(self.round_duration_s) * 1000
    }

    /// Point delta for a slot tier (tier is already reduced modulo 4).
    pub fn points_for_tier(&self, tier: u8) -> i32 {
        self.tier_points[tier as usize % TIER_COUNT]
    }

    /// Step to the next round-duration option, wrapping.
    pub fn cycle_round_duration(&mut self) {
        let pos = ROUND_DURATIONS_S
            .iter()
            .position(|&d| d == self.round_duration_s);
        self.round_duration_s = match pos {
            Some(i) => ROUND_DURATIONS_S[(i + 1) % ROUND_DURATIONS_S.len()],
            // A hand-edited value off the menu snaps back to the first option.
            None => ROUND_DURATIONS_S[0],
        };
    }

    /// Load from a JSON file, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("settings file corrupt ({err}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Save as JSON; best-effort, failures are logged and swallowed.
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save settings: {err}");
                } else {
                    log::info!("settings saved");
                }
            }
            Err(err) => log::warn!("failed to serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_one_penalizing_tier() {
        let s = Settings::default();
        assert_eq!(s.tier_points.iter().filter(|&&p| p < 0).count(), 1);
    }

    #[test]
    fn test_cycle_round_duration_wraps() {
        let mut s = Settings::default();
        assert_eq!(s.round_duration_s, 60);
        s.cycle_round_duration();
        assert_eq!(s.round_duration_s, 120);
        s.cycle_round_duration();
        assert_eq!(s.round_duration_s, 30);
        s.cycle_round_duration();
        assert_eq!(s.round_duration_s, 60);
    }

    #[test]
    fn test_off_menu_duration_snaps_to_first() {
        let mut s = Settings {
            round_duration_s: 45,
            ..Default::default()
        };
        s.cycle_round_duration();
        assert_eq!(s.round_duration_s, 30);
    }

    #[test]
    fn test_points_for_tier_reduced_mod_4() {
        let s = Settings::default();
        assert_eq!(s.points_for_tier(1), 20);
        assert_eq!(s.points_for_tier(5), 20);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let s = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(s.round_duration_s, Settings::default().round_duration_s);
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = Settings::default();
        s.tier_points = [1, 2, 3, -4];
        s.round_duration_s = 120;
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tier_points, [1, 2, 3, -4]);
        assert_eq!(back.round_duration_s, 120);
    }
}

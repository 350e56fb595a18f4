//! Slot registry
//!
//! Slots are the fixed target sites, loaded from a line-oriented text file:
//! `x y z [type]` per line, type 0-3. Loads are all-or-nothing; a failed
//! load leaves whatever registry the caller already has untouched.

use std::fs;
use std::path::Path;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TIER_COUNT;

/// A fixed target site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Slot {
    /// World position; immutable once loaded
    pub position: Vec3,
    /// Color/score tier, always reduced modulo 4
    pub kind: u8,
    /// Has this appearance already been scored
    pub clicked: bool,
}

impl Slot {
    pub fn new(position: Vec3, kind: u8) -> Self {
        Self {
            position,
            kind: kind % TIER_COUNT as u8,
            clicked: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum SlotLoadError {
    #[error("failed to read slot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("slot file has {found} valid lines, {required} required")]
    TooFewSlots { found: usize, required: usize },
    #[error("slot file contains no valid lines")]
    Empty,
}

/// The full set of clickable target sites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl SlotRegistry {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Parse slot records from text.
    ///
    /// Each significant line is `x y z [type]`; blank and malformed lines are
    /// skipped, carriage returns stripped. A missing or out-of-range type is
    /// assigned uniformly at random. With `required = Some(n)` the first `n`
    /// valid records are taken and fewer than `n` is an error; with `None`
    /// any count of at least one is accepted.
    pub fn parse<R: Rng>(
        text: &str,
        required: Option<usize>,
        rng: &mut R,
    ) -> Result<Self, SlotLoadError> {
        let mut slots = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r').trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line, rng) {
                Some(slot) => slots.push(slot),
                None => log::warn!("skipping malformed slot line {}: {:?}", lineno + 1, line),
            }
            if let Some(n) = required {
                if slots.len() == n {
                    break;
                }
            }
        }

        match required {
            Some(n) if slots.len() < n => Err(SlotLoadError::TooFewSlots {
                found: slots.len(),
                required: n,
            }),
            _ if slots.is_empty() => Err(SlotLoadError::Empty),
            _ => Ok(Self { slots }),
        }
    }

    /// Load a registry from a file. Returns a whole new registry so the
    /// caller's existing set stays untouched on failure.
    pub fn load_file<R: Rng>(
        path: &Path,
        required: Option<usize>,
        rng: &mut R,
    ) -> Result<Self, SlotLoadError> {
        let text = fs::read_to_string(path)?;
        let registry = Self::parse(&text, required, rng)?;
        log::info!("loaded {} slots from {}", registry.len(), path.display());
        Ok(registry)
    }
}

fn parse_line<R: Rng>(line: &str, rng: &mut R) -> Option<Slot> {
    let mut parts = line.split_whitespace();
    let x: f32 = parts.next()?.parse().ok()?;
    let y: f32 = parts.next()?.parse().ok()?;
    let z: f32 = parts.next()?.parse().ok()?;

    let kind = match parts.next() {
        Some(tok) => match tok.parse::<i64>() {
            Ok(k) if (0..TIER_COUNT as i64).contains(&k) => k as u8,
            // Out-of-range or unparseable type: randomize rather than reject.
            _ => rng.random_range(0..TIER_COUNT as u8),
        },
        None => rng.random_range(0..TIER_COUNT as u8),
    };

    Some(Slot::new(Vec3::new(x, y, z), kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_parse_basic_lines() {
        let text = "0 0 0 0\n1 0 0 1\n2 0 0 2\n";
        let reg = SlotRegistry::parse(text, None, &mut rng()).unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.get(1).unwrap().kind, 1);
        assert!((reg.get(2).unwrap().position.x - 2.0).abs() < 1e-6);
        assert!(reg.iter().all(|s| !s.clicked));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let text = "0 0 0 0\nnot a slot\n1.5\n\n2 0 0 2\r\n";
        let reg = SlotRegistry::parse(text, None, &mut rng()).unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_missing_or_bad_type_randomized_in_range() {
        let text = "0 0 0\n1 0 0 9\n2 0 0 -3\n";
        let reg = SlotRegistry::parse(text, None, &mut rng()).unwrap();
        assert_eq!(reg.len(), 3);
        assert!(reg.iter().all(|s| s.kind < 4));
    }

    #[test]
    fn test_fixed_count_shortfall_rejected() {
        use crate::consts::FIXED_SLOT_COUNT;
        let text = "0 0 0 0\n1 0 0 1\n";
        let err = SlotRegistry::parse(text, Some(FIXED_SLOT_COUNT), &mut rng()).unwrap_err();
        match err {
            SlotLoadError::TooFewSlots { found, required } => {
                assert_eq!(found, 2);
                assert_eq!(required, FIXED_SLOT_COUNT);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fixed_count_takes_first_n() {
        use crate::consts::FIXED_SLOT_COUNT;
        let text: String = (0..12).map(|i| format!("{i} 0 0 1\n")).collect();
        let reg = SlotRegistry::parse(&text, Some(FIXED_SLOT_COUNT), &mut rng()).unwrap();
        assert_eq!(reg.len(), FIXED_SLOT_COUNT);
        assert!((reg.get(7).unwrap().position.x - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            SlotRegistry::parse("\n\n# nothing here\n", None, &mut rng()),
            Err(SlotLoadError::Empty | SlotLoadError::TooFewSlots { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SlotRegistry::load_file(Path::new("/nonexistent/slots.txt"), None, &mut rng())
            .unwrap_err();
        assert!(matches!(err, SlotLoadError::Io(_)));
    }
}

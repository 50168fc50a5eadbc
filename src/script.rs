//! Scripted input timelines for headless runs.
//!
//! A script is a comma-separated list of `KEYS:FRAMES` segments. `KEYS` is
//! any combination of `L` (left), `R` (right) and `J` (jump), or `N` for no
//! input. `R:60,RJ:1,N:30` holds right for 60 steps, right plus jump for one
//! step, then nothing for 30 steps. Steps past the end of the script get no
//! input.

use std::str::FromStr;

use crate::error::SimError;
use crate::resources::input::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSegment {
    pub input: InputState,
    pub frames: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    segments: Vec<ScriptSegment>,
}

fn parse_keys(keys: &str) -> Result<InputState, SimError> {
    let mut input = InputState::default();
    for key in keys.chars() {
        match key.to_ascii_uppercase() {
            'L' => input.move_left = true,
            'R' => input.move_right = true,
            'J' => input.jump = true,
            'N' => {}
            other => {
                return Err(SimError::Script(format!(
                    "unknown key '{}' in segment '{}'",
                    other, keys
                )));
            }
        }
    }
    Ok(input)
}

impl FromStr for InputScript {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (keys, frames) = part
                .split_once(':')
                .ok_or_else(|| SimError::Script(format!("segment '{}' lacks ':FRAMES'", part)))?;
            let frames = frames
                .trim()
                .parse::<u32>()
                .map_err(|e| SimError::Script(format!("segment '{}': {}", part, e)))?;
            segments.push(ScriptSegment {
                input: parse_keys(keys.trim())?,
                frames,
            });
        }
        Ok(Self { segments })
    }
}

impl InputScript {
    pub fn segments(&self) -> &[ScriptSegment] {
        &self.segments
    }

    /// Total number of scripted steps.
    pub fn len(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.frames)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Input for the zero-based step `frame`.
    pub fn input_at(&self, frame: u64) -> InputState {
        let mut start = 0u64;
        for segment in &self.segments {
            let end = start + u64::from(segment.frames);
            if frame < end {
                return segment.input;
            }
            start = end;
        }
        InputState::default()
    }
}

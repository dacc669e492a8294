//! Snapshot consumers
//!
//! The simulation never draws. Anything that wants to show the game gets a
//! read-only `&GameState` once per draw cycle through [`Renderer`].

use std::io::Write;

use crate::consts::WIN_SCORE;
use crate::sim::{GameState, GameStatus};

/// Something that presents a game snapshot
pub trait Renderer {
    fn draw(&mut self, state: &GameState) -> std::io::Result<()>;
}

/// Score/target line as shown at the top of the playfield
pub fn hud_line(state: &GameState) -> String {
    let status = match state.status {
        GameStatus::Start => "READY",
        GameStatus::Playing => "DEFENDING",
        GameStatus::Won => "VICTORY",
        GameStatus::Lost => "DEFEATED",
    };
    let ammo: Vec<String> = state
        .batteries
        .iter()
        .map(|b| {
            if b.is_destroyed {
                "--".to_string()
            } else {
                b.missiles.to_string()
            }
        })
        .collect();
    format!(
        "SCORE: {:05}  TARGET: {}  AMMO: {}  {}",
        state.score,
        WIN_SCORE,
        ammo.join("/"),
        status
    )
}

/// Writes one JSON snapshot per line
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Number of snapshots written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn draw(&mut self, state: &GameState) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, state)?;
        self.out.write_all(b"\n")?;
        self.frames += 1;
        Ok(())
    }
}

/// Logs the HUD line whenever it changes
#[derive(Debug, Default)]
pub struct LogRenderer {
    last: String,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, state: &GameState) -> std::io::Result<()> {
        let line = hud_line(state);
        if line != self.last {
            log::debug!("{}", line);
            self.last = line;
        }
        Ok(())
    }
}

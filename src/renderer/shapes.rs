//! Frame display list
//!
//! The render pass is a pure function of `&GameState`: it emits a list of
//! `DrawCmd`s which a backend (the canvas 2D painter on the web) executes.

use crate::consts::HEAD_HEIGHT;
use crate::sim::{GamePhase, GameState, Obstacle, Player};

pub const BACKGROUND_TOP: &str = "#071022";
pub const BACKGROUND_BOTTOM: &str = "#07132a";
pub const BODY_COLOR: &str = "#a06030";
pub const HEAD_LIT: &str = "#ffd56b";
pub const HEAD_BURNT: &str = "#222";
pub const SMOKE_COLOR: &str = "#bbb";
pub const SHADOW_COLOR: &str = "rgba(0,0,0,0.15)";
pub const TEXT_COLOR: &str = "#fff";
pub const HUD_COLOR: &str = "rgba(255,255,255,0.85)";
pub const ENDED_DIM: &str = "rgba(0,0,0,0.55)";
pub const PAUSED_DIM: &str = "rgba(0,0,0,0.45)";

pub const FLAME_GLYPH: &str = "\u{1F525}";
pub const GLYPH_SIZE: f32 = 24.0;
const GLYPH_FONT: &str = "24px serif";
const SMOKE_PUFFS: usize = 4;

pub const RISE_HINT: &str = "Hold Space / \u{2191} or touch/hold to rise";
pub const RESTART_HINT: &str = "Click or tap to restart";
pub const RESUME_HINT: &str = "Click or press P to resume";

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        width: f32,
        height: f32,
    },
    VerticalGradient {
        width: f32,
        height: f32,
        top: &'static str,
        bottom: &'static str,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: &'static str,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: &'static str,
        alpha: f32,
    },
    /// Text drawn with a middle baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        font: &'static str,
        color: &'static str,
        align: TextAlign,
    },
}

/// Per-frame inputs to the render pass that are not world state
#[derive(Debug, Clone, Default)]
pub struct FrameView {
    /// Wall-clock time (ms) driving decorative motion
    pub time_ms: f64,
    pub reduced_motion: bool,
    /// Uppercased difficulty code, shown as a badge
    pub mode_label: Option<String>,
}

/// Vertical flicker offset for a flame glyph
pub fn flicker_offset(time_ms: f64, x: f32) -> f32 {
    ((time_ms / 250.0) as f32 + x).sin() * 4.0
}

/// Build the full display list for one frame
pub fn build_frame(state: &GameState, view: &FrameView) -> Vec<DrawCmd> {
    let (w, h) = (state.surface.width, state.surface.height);
    let mut cmds = vec![
        DrawCmd::Clear {
            width: w,
            height: h,
        },
        DrawCmd::VerticalGradient {
            width: w,
            height: h,
            top: BACKGROUND_TOP,
            bottom: BACKGROUND_BOTTOM,
        },
    ];

    for ob in &state.obstacles {
        obstacle(&mut cmds, ob, view);
    }
    player(&mut cmds, &state.player, state.phase == GamePhase::Ended, view);
    hud(&mut cmds, state, view);

    match state.phase {
        GamePhase::Paused => paused_panel(&mut cmds, w, h),
        GamePhase::Ended => ended_panel(&mut cmds, w, h, state.score),
        GamePhase::Ready | GamePhase::Running => {}
    }
    cmds
}

/// Flame glyphs stacked down the obstacle's height
fn obstacle(cmds: &mut Vec<DrawCmd>, ob: &Obstacle, view: &FrameView) {
    let cx = ob.pos.x + ob.size.x / 2.0;
    let rows = (ob.size.y / GLYPH_SIZE).floor().max(1.0) as usize;
    let pitch = ob.size.y / rows as f32;
    for row in 0..rows {
        let base_y = ob.pos.y + pitch * (row as f32 + 0.5);
        let flicker = if view.reduced_motion {
            0.0
        } else {
            flicker_offset(view.time_ms, ob.pos.x + row as f32)
        };
        cmds.push(DrawCmd::Text {
            text: FLAME_GLYPH.to_string(),
            x: cx,
            y: base_y + flicker,
            font: GLYPH_FONT,
            color: TEXT_COLOR,
            align: TextAlign::Center,
        });
    }
}

fn player(cmds: &mut Vec<DrawCmd>, player: &Player, burnt: bool, view: &FrameView) {
    let x = player.pos.x.round();
    let y = player.pos.y.round();
    let (w, h) = (player.size.x, player.size.y);

    cmds.push(DrawCmd::Rect {
        x,
        y,
        w,
        h: h - HEAD_HEIGHT,
        color: BODY_COLOR,
    });

    cmds.push(DrawCmd::Rect {
        x,
        y: y - HEAD_HEIGHT,
        w,
        h: HEAD_HEIGHT,
        color: if burnt { HEAD_BURNT } else { HEAD_LIT },
    });
    if burnt {
        // Smoke rising off the burnt head
        for i in 0..SMOKE_PUFFS {
            let fi = i as f32;
            let sway = if view.reduced_motion {
                0.0
            } else {
                ((view.time_ms / 300.0) as f32 + fi).sin() * 6.0
            };
            cmds.push(DrawCmd::Circle {
                x: x + w / 2.0 + sway,
                y: y - 22.0 - fi * 12.0,
                radius: 10.0 + fi * 3.0,
                color: SMOKE_COLOR,
                alpha: 0.3 + 0.15 * fi,
            });
        }
    }

    cmds.push(DrawCmd::Rect {
        x: x - 2.0,
        y,
        w: 2.0,
        h: h - HEAD_HEIGHT,
        color: SHADOW_COLOR,
    });
}

fn hud(cmds: &mut Vec<DrawCmd>, state: &GameState, view: &FrameView) {
    let (w, h) = (state.surface.width, state.surface.height);
    cmds.push(DrawCmd::Text {
        text: format!("Score: {}", state.score),
        x: 16.0,
        y: 24.0,
        font: "20px monospace",
        color: HUD_COLOR,
        align: TextAlign::Left,
    });
    if let Some(label) = &view.mode_label {
        cmds.push(DrawCmd::Text {
            text: format!("Mode: {label}"),
            x: w - 16.0,
            y: 24.0,
            font: "14px monospace",
            color: HUD_COLOR,
            align: TextAlign::Right,
        });
    }
    if state.phase == GamePhase::Running {
        cmds.push(DrawCmd::Text {
            text: RISE_HINT.to_string(),
            x: w / 2.0,
            y: h - 20.0,
            font: "14px monospace",
            color: HUD_COLOR,
            align: TextAlign::Center,
        });
    }
}

fn dim(cmds: &mut Vec<DrawCmd>, w: f32, h: f32, color: &'static str) {
    cmds.push(DrawCmd::Rect {
        x: 0.0,
        y: 0.0,
        w,
        h,
        color,
    });
}

fn centered(cmds: &mut Vec<DrawCmd>, text: String, x: f32, y: f32, font: &'static str) {
    cmds.push(DrawCmd::Text {
        text,
        x,
        y,
        font,
        color: TEXT_COLOR,
        align: TextAlign::Center,
    });
}

fn paused_panel(cmds: &mut Vec<DrawCmd>, w: f32, h: f32) {
    dim(cmds, w, h, PAUSED_DIM);
    centered(cmds, "Paused".into(), w / 2.0, h / 2.0 - 10.0, "36px monospace");
    centered(cmds, RESUME_HINT.into(), w / 2.0, h / 2.0 + 30.0, "16px monospace");
}

fn ended_panel(cmds: &mut Vec<DrawCmd>, w: f32, h: f32, score: u32) {
    dim(cmds, w, h, ENDED_DIM);
    centered(cmds, "Game Over".into(), w / 2.0, h / 2.0 - 20.0, "42px monospace");
    centered(cmds, format!("Score: {score}"), w / 2.0, h / 2.0 + 16.0, "20px monospace");
    centered(cmds, RESTART_HINT.into(), w / 2.0, h / 2.0 + 54.0, "16px monospace");
}

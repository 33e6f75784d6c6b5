//! Edit scripts: a JSON array of editor actions replayed in order.
//!
//! ```json
//! [
//!   { "op": "add_sticker", "sticker": "crown" },
//!   { "op": "drag", "from": { "x": 210, "y": 210 }, "to": { "x": 300, "y": 120 } },
//!   { "op": "set_filter", "filter": "neon" },
//!   { "op": "undo" }
//! ]
//! ```

use anyhow::{Context, Result, bail};
use kurbo::Point;
use serde::Deserialize;
use stickerboard_core::catalog::{AnimationPreset, FilterPreset, FontFamily, StickerId};
use stickerboard_core::serialize::BackgroundRecord;
use stickerboard_core::{Color, Editor, ElementId, ElementPatch};

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddEmoji { glyph: String },
    AddSticker { sticker: StickerId },
    AddText { text: String },
    AddImage { uri: String },
    Click { x: f64, y: f64 },
    /// Press at `from`, move to `to`, release.
    Drag { from: Point, to: Point },
    Delete,
    Duplicate,
    SetScale { scale: f64 },
    SetRotation { degrees: f64 },
    SetText {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        font_family: Option<FontFamily>,
        #[serde(default)]
        font_size: Option<f64>,
        #[serde(default)]
        color: Option<Color>,
    },
    SetAnimation { animation: AnimationPreset },
    SetFilter { filter: FilterPreset },
    Background { background: BackgroundRecord },
    Undo,
    Redo,
    Reset,
}

pub fn parse(json: &str) -> Result<Vec<Command>> {
    serde_json::from_str(json).context("invalid edit script")
}

/// Replay `commands` against `editor`. Commands that act on the selection
/// fail when nothing is selected.
pub fn run(editor: &mut Editor, commands: &[Command]) -> Result<()> {
    for (step, command) in commands.iter().enumerate() {
        log::debug!("step {step}: {command:?}");
        apply(editor, command).with_context(|| format!("step {step} failed"))?;
    }
    Ok(())
}

fn selected(editor: &Editor) -> Result<ElementId> {
    editor.selection().context("no element selected")
}

/// A slider-style adjustment: live update, then one commit on release.
fn adjust(editor: &mut Editor, patch: ElementPatch) -> Result<()> {
    let id = selected(editor)?;
    editor.update_element(id, &patch);
    editor.commit();
    Ok(())
}

fn apply(editor: &mut Editor, command: &Command) -> Result<()> {
    match command {
        Command::AddEmoji { glyph } => {
            editor.add_emoji(glyph);
        }
        Command::AddSticker { sticker } => {
            editor.add_sticker(*sticker);
        }
        Command::AddText { text } => {
            if editor.add_text(text).is_none() {
                log::warn!("blank text ignored");
            }
        }
        Command::AddImage { uri } => {
            if editor.add_image(uri).is_none() {
                bail!("image URI is empty");
            }
        }
        Command::Click { x, y } => {
            editor.click_at(Point::new(*x, *y));
        }
        Command::Drag { from, to } => {
            if editor.pointer_down_at(*from).is_none() {
                bail!("nothing to drag at ({}, {})", from.x, from.y);
            }
            editor.pointer_move(*to);
            editor.pointer_up(*to);
        }
        Command::Delete => {
            let id = selected(editor)?;
            editor.remove_element(id);
        }
        Command::Duplicate => {
            let id = selected(editor)?;
            editor.duplicate_element(id);
        }
        Command::SetScale { scale } => adjust(editor, ElementPatch::scale(*scale))?,
        Command::SetRotation { degrees } => adjust(editor, ElementPatch::rotation(*degrees))?,
        Command::SetText { text, font_family, font_size, color } => {
            let patch = ElementPatch {
                text: text.clone(),
                font_family: *font_family,
                font_size: *font_size,
                color: *color,
                ..ElementPatch::default()
            };
            adjust(editor, patch)?;
        }
        Command::SetAnimation { animation } => {
            let id = selected(editor)?;
            editor.set_animation(id, *animation);
        }
        Command::SetFilter { filter } => {
            let id = selected(editor)?;
            editor.set_filter(id, *filter);
        }
        Command::Background { background } => editor.set_background(background.clone().into()),
        Command::Undo => {
            editor.undo();
        }
        Command::Redo => {
            editor.redo();
        }
        Command::Reset => editor.reset(),
    }
    Ok(())
}

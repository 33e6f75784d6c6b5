//! Stickerboard Core Library
//!
//! Canvas document, edit history and serialization for emoji, sticker,
//! text and image compositions. Rendering is left to the caller.

pub mod catalog;
pub mod color;
pub mod config;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod history;
pub mod interaction;
pub mod persistence;
pub mod serialize;
pub mod storage;

pub use catalog::{AnimationPreset, EMOJI_LIBRARY, FilterPreset, FontFamily, STICKERS, StickerId};
pub use color::Color;
pub use config::{ConfigError, EditorConfig};
pub use document::{Background, Document};
pub use editor::Editor;
pub use element::{
    Element, ElementContent, ElementId, ElementKind, ElementPatch, Geometry, TextStyle,
};
pub use error::{EditorError, EditorResult};
pub use history::History;
pub use interaction::{Gesture, PointerEvent};
pub use persistence::{CreationId, InvalidRequest, SaveRequest, StoredCreation};
pub use serialize::{DesignPayload, deserialize, serialize};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

//! Canvas elements: emoji, stickers, text and images.

use crate::catalog::{AnimationPreset, FilterPreset, FontFamily, StickerId};
use crate::color::Color;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Rendered size of an emoji glyph at scale 1.
pub const EMOJI_SIZE: f64 = 60.0;
/// Rendered size of a sticker icon at scale 1.
pub const STICKER_SIZE: f64 = 48.0;
/// Bounding box an image is fitted into at scale 1.
pub const IMAGE_MAX_SIZE: f64 = 200.0;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Mint a new unique element ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Element kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Emoji,
    Sticker,
    Text,
    Image,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Emoji => "emoji",
            ElementKind::Sticker => "sticker",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typography for text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: FontFamily,
    /// Font size in pixels.
    pub font_size: f64,
    pub color: Color,
}

impl TextStyle {
    pub const DEFAULT_FONT_SIZE: f64 = 24.0;
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: Self::DEFAULT_FONT_SIZE,
            color: Color::black(),
        }
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    /// A literal emoji glyph.
    Emoji(String),
    /// A reference into the sticker catalog.
    Sticker(StickerId),
    /// A styled text run.
    Text { text: String, style: TextStyle },
    /// An image URI.
    Image(String),
}

impl ElementContent {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::Emoji(_) => ElementKind::Emoji,
            ElementContent::Sticker(_) => ElementKind::Sticker,
            ElementContent::Text { .. } => ElementKind::Text,
            ElementContent::Image(_) => ElementKind::Image,
        }
    }

    /// Unscaled size used for hit-testing and selection outlines.
    pub fn extent(&self) -> Size {
        match self {
            ElementContent::Emoji(_) => Size::new(EMOJI_SIZE, EMOJI_SIZE),
            ElementContent::Sticker(_) => Size::new(STICKER_SIZE, STICKER_SIZE),
            ElementContent::Text { text, style } => {
                // Approximate: average glyph is ~0.6em wide, line is 1.2em tall.
                let chars = text.chars().count().max(1) as f64;
                Size::new(chars * style.font_size * 0.6, style.font_size * 1.2)
            }
            ElementContent::Image(_) => Size::new(IMAGE_MAX_SIZE, IMAGE_MAX_SIZE),
        }
    }
}

/// Initial placement of a new element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub position: Point,
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Geometry {
    pub fn at(position: Point) -> Self {
        Self { position, ..Self::default() }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

/// A single placeable item on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub(crate) id: ElementId,
    content: ElementContent,
    /// Top-left corner in canvas coordinates. Not clamped to the canvas.
    pub position: Point,
    pub scale: f64,
    /// Rotation in degrees, stored as received.
    pub rotation: f64,
    pub animation: AnimationPreset,
    pub filter: FilterPreset,
}

impl Element {
    /// Create a new element with a freshly minted id.
    pub fn new(content: ElementContent, geometry: Geometry) -> Self {
        Self::with_id(ElementId::new(), content, geometry)
    }

    pub(crate) fn with_id(id: ElementId, content: ElementContent, geometry: Geometry) -> Self {
        Self {
            id,
            content,
            position: geometry.position,
            scale: geometry.scale,
            rotation: geometry.rotation,
            animation: AnimationPreset::default(),
            filter: FilterPreset::default(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    pub fn content(&self) -> &ElementContent {
        &self.content
    }

    /// Text style, for text elements only.
    pub fn text_style(&self) -> Option<&TextStyle> {
        match &self.content {
            ElementContent::Text { style, .. } => Some(style),
            _ => None,
        }
    }

    /// Copy of this element under a new id, shifted by `offset`.
    pub fn duplicate(&self, offset: Vec2) -> Self {
        Self {
            id: ElementId::new(),
            position: self.position + offset,
            ..self.clone()
        }
    }

    /// Apply the fields present in `patch`. Text-only fields are ignored on
    /// other kinds; the kind itself never changes.
    pub fn apply(&mut self, patch: &ElementPatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(animation) = patch.animation {
            self.animation = animation;
        }
        if let Some(filter) = patch.filter {
            self.filter = filter;
        }
        if let ElementContent::Text { text, style } = &mut self.content {
            if let Some(new_text) = &patch.text {
                text.clone_from(new_text);
            }
            if let Some(family) = patch.font_family {
                style.font_family = family;
            }
            if let Some(size) = patch.font_size {
                style.font_size = size;
            }
            if let Some(color) = patch.color {
                style.color = color;
            }
        }
    }

    /// Center of the element's unscaled box; scale and rotation pivot here.
    pub fn center(&self) -> Point {
        let size = self.content.extent();
        self.position + Vec2::new(size.width / 2.0, size.height / 2.0)
    }

    /// Transform from element-local to canvas coordinates.
    fn local_transform(&self) -> Affine {
        let center = self.center().to_vec2();
        Affine::translate(center)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }

    /// Axis-aligned bounds after scale and rotation.
    pub fn bounds(&self) -> Rect {
        let rect = Rect::from_origin_size(self.position, self.content.extent());
        self.local_transform().transform_rect_bbox(rect)
    }

    /// Check if a point (in canvas coordinates) hits this element.
    pub fn hit_test(&self, point: Point) -> bool {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return false;
        }
        let local = self.local_transform().inverse() * point;
        Rect::from_origin_size(self.position, self.content.extent()).contains(local)
    }
}

/// Partial update of an element. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub position: Option<Point>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub animation: Option<AnimationPreset>,
    pub filter: Option<FilterPreset>,
    pub text: Option<String>,
    pub font_family: Option<FontFamily>,
    pub font_size: Option<f64>,
    pub color: Option<Color>,
}

impl ElementPatch {
    pub fn position(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    pub fn scale(scale: f64) -> Self {
        Self { scale: Some(scale), ..Self::default() }
    }

    pub fn rotation(degrees: f64) -> Self {
        Self { rotation: Some(degrees), ..Self::default() }
    }

    pub fn animation(animation: AnimationPreset) -> Self {
        Self { animation: Some(animation), ..Self::default() }
    }

    pub fn filter(filter: FilterPreset) -> Self {
        Self { filter: Some(filter), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

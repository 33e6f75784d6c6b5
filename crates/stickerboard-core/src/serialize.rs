//! Design payloads: the transport form of a document.
//!
//! A payload is what the save flow stores as `design_data` and what the
//! load/template flow hands back. Serializing is a pure function of the
//! document. Deserializing either yields a complete document or an
//! [`EditorError::MalformedPayload`]; nothing is applied partially.
//!
//! ```json
//! {
//!   "elements": [
//!     { "id": "…", "kind": "emoji", "content": "😀", "x": 200, "y": 200,
//!       "scale": 1, "rotation": 0, "animation": "none", "filter": "none" },
//!     { "kind": "text", "content": "hi", "fontFamily": "Arial",
//!       "fontSize": 24, "color": "#000000" }
//!   ],
//!   "background": { "type": "gradient", "from": "#ff6b6b", "to": "#4ecdc4" }
//! }
//! ```

use crate::catalog::{AnimationPreset, FilterPreset, FontFamily, StickerId, UnknownPreset};
use crate::color::Color;
use crate::document::{Background, Document};
use crate::element::{Element, ElementContent, ElementId, ElementKind, Geometry, TextStyle};
use crate::error::{EditorError, EditorResult};
use kurbo::Point;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

/// Serialized element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    /// Kept when it is a UUID string. Any other id (older designs used
    /// integers) is replaced by a fresh one on load.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<ElementId>,
    pub kind: ElementKind,
    /// Glyph, sticker id, text or image URI depending on `kind`.
    pub content: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, deserialize_with = "lenient_preset")]
    pub animation: AnimationPreset,
    #[serde(default, deserialize_with = "lenient_preset")]
    pub filter: FilterPreset,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_font"
    )]
    pub font_family: Option<FontFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

fn default_scale() -> f64 {
    1.0
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<ElementId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match s.parse::<Uuid>() {
            Ok(uuid) => Some(ElementId::from_uuid(uuid)),
            Err(_) => {
                log::debug!("element id {s:?} is not a UUID, minting a new one");
                None
            }
        },
        Some(other) => {
            log::debug!("element id {other} is not a UUID, minting a new one");
            None
        }
    })
}

/// Unknown preset names fall back to the default rather than failing the load.
fn lenient_preset<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownPreset> + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| parse_or_default(&s)).unwrap_or_default())
}

fn lenient_font<'de, D>(deserializer: D) -> Result<Option<FontFamily>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| parse_or_default(&s)))
}

fn parse_or_default<T>(s: &str) -> T
where
    T: FromStr<Err = UnknownPreset> + Default,
{
    s.parse().unwrap_or_else(|err| {
        log::warn!("{err}, using default");
        T::default()
    })
}

/// Serialized background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackgroundRecord {
    Solid { color: Color },
    Gradient { from: Color, to: Color },
    Image { uri: String },
}

impl Default for BackgroundRecord {
    fn default() -> Self {
        BackgroundRecord::from(&Background::default())
    }
}

/// Transport form of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPayload {
    pub elements: Vec<ElementRecord>,
    #[serde(default)]
    pub background: BackgroundRecord,
}

impl From<&Element> for ElementRecord {
    fn from(element: &Element) -> Self {
        let (content, style) = match element.content() {
            ElementContent::Emoji(glyph) => (glyph.clone(), None),
            ElementContent::Sticker(sticker) => (sticker.id().to_string(), None),
            ElementContent::Text { text, style } => (text.clone(), Some(style)),
            ElementContent::Image(uri) => (uri.clone(), None),
        };
        Self {
            id: Some(element.id()),
            kind: element.kind(),
            content,
            x: element.position.x,
            y: element.position.y,
            scale: element.scale,
            rotation: element.rotation,
            animation: element.animation,
            filter: element.filter,
            font_family: style.map(|s| s.font_family),
            font_size: style.map(|s| s.font_size),
            color: style.map(|s| s.color),
        }
    }
}

impl TryFrom<ElementRecord> for Element {
    type Error = EditorError;

    fn try_from(record: ElementRecord) -> EditorResult<Self> {
        let content = match record.kind {
            ElementKind::Emoji => {
                if record.content.is_empty() {
                    return Err(EditorError::malformed("emoji element has empty content"));
                }
                ElementContent::Emoji(record.content)
            }
            ElementKind::Sticker => {
                let sticker = record
                    .content
                    .parse::<StickerId>()
                    .map_err(|err| EditorError::malformed(err.to_string()))?;
                ElementContent::Sticker(sticker)
            }
            ElementKind::Text => {
                let defaults = TextStyle::default();
                ElementContent::Text {
                    text: record.content,
                    style: TextStyle {
                        font_family: record.font_family.unwrap_or(defaults.font_family),
                        font_size: record.font_size.unwrap_or(defaults.font_size),
                        color: record.color.unwrap_or(defaults.color),
                    },
                }
            }
            ElementKind::Image => {
                if record.content.trim().is_empty() {
                    return Err(EditorError::malformed("image element has empty URI"));
                }
                ElementContent::Image(record.content)
            }
        };

        let geometry = Geometry {
            position: Point::new(record.x, record.y),
            scale: record.scale,
            rotation: record.rotation,
        };
        let mut element = Element::with_id(record.id.unwrap_or_default(), content, geometry);
        element.animation = record.animation;
        element.filter = record.filter;
        Ok(element)
    }
}

impl From<&Background> for BackgroundRecord {
    fn from(background: &Background) -> Self {
        match background {
            Background::Solid(color) => BackgroundRecord::Solid { color: *color },
            Background::LinearGradient { from, to } => {
                BackgroundRecord::Gradient { from: *from, to: *to }
            }
            Background::Image(uri) => BackgroundRecord::Image { uri: uri.clone() },
        }
    }
}

impl From<BackgroundRecord> for Background {
    fn from(record: BackgroundRecord) -> Self {
        match record {
            BackgroundRecord::Solid { color } => Background::Solid(color),
            BackgroundRecord::Gradient { from, to } => Background::LinearGradient { from, to },
            BackgroundRecord::Image { uri } => Background::Image(uri),
        }
    }
}

/// Produce the transport form of `document`.
pub fn serialize(document: &Document) -> DesignPayload {
    DesignPayload {
        elements: document.elements().iter().map(ElementRecord::from).collect(),
        background: BackgroundRecord::from(document.background()),
    }
}

/// Rebuild a document from a stored design blob.
pub fn deserialize(payload: &Value) -> EditorResult<Document> {
    let payload = DesignPayload::deserialize(payload)?;
    payload.into_document()
}

impl DesignPayload {
    /// Validate and convert into a document.
    pub fn into_document(self) -> EditorResult<Document> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        let mut elements = Vec::with_capacity(self.elements.len());
        for (index, record) in self.elements.into_iter().enumerate() {
            let element = Element::try_from(record)
                .map_err(|err| EditorError::malformed(format!("element {index}: {err}")))?;
            if !seen.insert(element.id()) {
                return Err(EditorError::malformed(format!(
                    "element {index}: duplicate id {}",
                    element.id()
                )));
            }
            elements.push(element);
        }
        Ok(Document::from_parts(elements, self.background.into()))
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Document {
    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&serialize(self))
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        deserialize(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementPatch;
    use serde_json::json;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        let emoji = doc.add_element(
            ElementContent::Emoji("😎".into()),
            Geometry { position: Point::new(-15.0, 640.0), scale: 2.5, rotation: 90.0 },
        );
        doc.update_element(
            emoji,
            &ElementPatch {
                animation: Some(AnimationPreset::Wobble),
                filter: Some(FilterPreset::Neon),
                ..ElementPatch::default()
            },
        )
        .unwrap();
        doc.add_element(ElementContent::Sticker(StickerId::Crown), Geometry::default());
        doc.add_element(
            ElementContent::Text {
                text: "hello".into(),
                style: TextStyle {
                    font_family: FontFamily::ComicSans,
                    font_size: 36.0,
                    color: Color::rgb(0x12, 0x34, 0x56),
                },
            },
            Geometry::at(Point::new(10.0, 20.0)),
        );
        doc.add_element(
            ElementContent::Image("https://cdn.example.com/cat.gif".into()),
            Geometry::default(),
        );
        doc.set_background(Background::default_gradient());
        doc
    }

    #[test]
    fn test_round_trip() {
        let doc = sample_document();
        let value = serialize(&doc).to_value().unwrap();
        let restored = deserialize(&value).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample_document();
        let json = doc.to_json().unwrap();
        assert_eq!(Document::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_serialize_is_pure() {
        let doc = sample_document();
        assert_eq!(serialize(&doc), serialize(&doc));
    }

    #[test]
    fn test_wire_shape() {
        let mut doc = Document::new();
        doc.add_element(
            ElementContent::Sticker(StickerId::Zap),
            Geometry::at(Point::new(1.0, 2.0)),
        );
        let value = serialize(&doc).to_value().unwrap();

        let element = &value["elements"][0];
        assert_eq!(element["kind"], "sticker");
        assert_eq!(element["content"], "zap");
        assert_eq!(element["x"], 1.0);
        assert_eq!(element["animation"], "none");
        assert!(element.get("fontSize").is_none());
        assert_eq!(value["background"], json!({ "type": "solid", "color": "#ffffff" }));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let value = json!({
            "elements": [
                { "kind": "emoji", "content": "🥳" },
                { "kind": "text", "content": "plain" }
            ]
        });
        let doc = deserialize(&value).unwrap();
        let emoji = &doc.elements()[0];
        assert_eq!(emoji.scale, 1.0);
        assert_eq!(emoji.rotation, 0.0);
        assert_eq!(emoji.position, Point::ZERO);
        assert_eq!(emoji.animation, AnimationPreset::None);
        assert_eq!(emoji.filter, FilterPreset::None);
        assert_eq!(doc.elements()[1].text_style(), Some(&TextStyle::default()));
        assert_eq!(doc.background(), &Background::default());
        assert_ne!(doc.elements()[0].id(), doc.elements()[1].id());
    }

    #[test]
    fn test_unknown_presets_fall_back() {
        let value = json!({
            "elements": [
                {
                    "kind": "emoji",
                    "content": "🥳",
                    "animation": "moonwalk",
                    "filter": "vaporwave",
                    "fontFamily": "Papyrus"
                }
            ]
        });
        let doc = deserialize(&value).unwrap();
        assert_eq!(doc.elements()[0].animation, AnimationPreset::None);
        assert_eq!(doc.elements()[0].filter, FilterPreset::None);
    }

    #[test]
    fn test_missing_kind_is_malformed() {
        let value = json!({ "elements": [ { "content": "😀", "x": 1, "y": 2 } ] });
        assert!(matches!(deserialize(&value), Err(EditorError::MalformedPayload(_))));
    }

    #[test]
    fn test_missing_content_is_malformed() {
        let value = json!({ "elements": [ { "kind": "emoji" } ] });
        assert!(matches!(deserialize(&value), Err(EditorError::MalformedPayload(_))));
    }

    #[test]
    fn test_wrong_shapes_are_malformed() {
        let cases = [
            json!({ "elements": [ { "kind": "emoji", "content": 42 } ] }),
            json!({ "elements": [ { "kind": "sticker", "content": "unicorn" } ] }),
            json!({ "elements": [ { "kind": "image", "content": "  " } ] }),
            json!({ "elements": [ { "kind": "hologram", "content": "x" } ] }),
            json!({ "elements": [ { "kind": "text", "content": "x", "color": "red" } ] }),
            json!({ "elements": [ { "kind": "emoji", "content": "😀", "scale": "big" } ] }),
            json!({ "elements": {} }),
            json!({ "background": { "type": "solid", "color": "#fff" } }),
            json!("not a design"),
        ];
        for case in cases {
            assert!(
                matches!(deserialize(&case), Err(EditorError::MalformedPayload(_))),
                "expected malformed: {case}"
            );
        }
    }

    #[test]
    fn test_duplicate_ids_are_malformed() {
        let id = ElementId::new().to_string();
        let value = json!({
            "elements": [
                { "id": id, "kind": "emoji", "content": "😀" },
                { "id": id, "kind": "emoji", "content": "😃" }
            ]
        });
        assert!(matches!(deserialize(&value), Err(EditorError::MalformedPayload(_))));
    }

    #[test]
    fn test_non_uuid_ids_are_replaced() {
        let value = json!({
            "elements": [
                { "id": 1712345678901u64, "kind": "emoji", "content": "😀", "x": 200, "y": 200 },
                { "id": 1712345678901u64, "kind": "sticker", "content": "star" },
                { "id": "el-7", "kind": "text", "content": "hi" },
                { "id": null, "kind": "emoji", "content": "😃" }
            ]
        });
        let doc = deserialize(&value).unwrap();
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.elements()[0].position, Point::new(200.0, 200.0));

        let ids: HashSet<_> = doc.elements().iter().map(Element::id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_uuid_ids_are_kept() {
        let id = ElementId::new();
        let value = json!({
            "elements": [
                { "id": id.to_string(), "kind": "emoji", "content": "😀" },
                { "id": 42, "kind": "emoji", "content": "😃" }
            ]
        });
        let doc = deserialize(&value).unwrap();
        assert_eq!(doc.elements()[0].id(), id);
        assert_ne!(doc.elements()[1].id(), id);
    }

    #[test]
    fn test_background_variants() {
        for background in [
            Background::Solid(Color::rgb(1, 2, 3)),
            Background::default_gradient(),
            Background::Image("https://cdn.example.com/bg.png".into()),
        ] {
            let record = BackgroundRecord::from(&background);
            assert_eq!(Background::from(record), background);
        }
    }
}

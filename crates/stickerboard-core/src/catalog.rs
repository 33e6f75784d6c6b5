//! Static preset catalogs: emoji, stickers, animations, filters and fonts.
//!
//! Catalogs are fixed at compile time. Elements reference entries by id; how
//! an entry is drawn is left to whichever front end renders the composition.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emoji offered by the picker, in display order.
pub const EMOJI_LIBRARY: &[&str] = &[
    "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃",
    "😉", "😊", "😇", "🥰", "😍", "🤩", "😘", "😗", "😚", "😙",
    "😋", "😛", "😜", "🤪", "😝", "🤑", "🤗", "🤭", "🤫", "🤔",
    "🤐", "🤨", "😐", "😑", "😶", "😏", "😒", "🙄", "😬", "🤥",
    "😔", "😪", "🤤", "😴", "😷", "🤒", "🤕", "🤢", "🤮", "🤧",
    "🥵", "🥶", "🥴", "😵", "🤯", "🤠", "🥳", "😎", "🤓", "🧐",
];

/// Error returned when a catalog id is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {catalog} id: {id:?}")]
pub struct UnknownPreset {
    pub catalog: &'static str,
    pub id: String,
}

/// Sticker catalog ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerId {
    Crown,
    Heart,
    Glasses,
    Star,
    Smile,
    Sun,
    Moon,
    Zap,
}

/// A sticker catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sticker {
    pub id: StickerId,
    pub display_name: &'static str,
    pub color_hint: Color,
    /// Name of the icon glyph the front end draws for this sticker.
    pub icon: &'static str,
}

/// All stickers, in display order.
pub const STICKERS: &[Sticker] = &[
    Sticker {
        id: StickerId::Crown,
        display_name: "Crown",
        color_hint: Color::rgb(0xFF, 0xD7, 0x00),
        icon: "crown",
    },
    Sticker {
        id: StickerId::Heart,
        display_name: "Heart",
        color_hint: Color::rgb(0xFF, 0x69, 0xB4),
        icon: "heart",
    },
    Sticker {
        id: StickerId::Glasses,
        display_name: "Glasses",
        color_hint: Color::rgb(0x00, 0x00, 0x00),
        icon: "glasses",
    },
    Sticker {
        id: StickerId::Star,
        display_name: "Star",
        color_hint: Color::rgb(0xFF, 0xD7, 0x00),
        icon: "star",
    },
    Sticker {
        id: StickerId::Smile,
        display_name: "Smile",
        color_hint: Color::rgb(0xFF, 0xA5, 0x00),
        icon: "smile",
    },
    Sticker {
        id: StickerId::Sun,
        display_name: "Sun",
        color_hint: Color::rgb(0xFF, 0xD7, 0x00),
        icon: "sun",
    },
    Sticker {
        id: StickerId::Moon,
        display_name: "Moon",
        color_hint: Color::rgb(0xC0, 0xC0, 0xC0),
        icon: "moon",
    },
    Sticker {
        id: StickerId::Zap,
        display_name: "Lightning",
        color_hint: Color::rgb(0xFF, 0xFF, 0x00),
        icon: "zap",
    },
];

impl StickerId {
    /// Catalog entry for this sticker.
    pub fn entry(self) -> &'static Sticker {
        // STICKERS lists every variant in declaration order.
        &STICKERS[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.entry().icon
    }
}

impl FromStr for StickerId {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STICKERS
            .iter()
            .find(|sticker| sticker.icon == s)
            .map(|sticker| sticker.id)
            .ok_or_else(|| UnknownPreset { catalog: "sticker", id: s.to_string() })
    }
}

/// Defines a fieldless preset enum with a wire id, display name and `all()`.
macro_rules! preset_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $catalog:literal {
            $($variant:ident => ($id:literal, $display:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl $name {
            /// Get all presets in display order.
            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// Id used in serialized designs.
            pub fn id(&self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }

            /// Get display name for UI.
            pub fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $display),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownPreset;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::all()
                    .iter()
                    .copied()
                    .find(|preset| preset.id() == s)
                    .ok_or_else(|| UnknownPreset { catalog: $catalog, id: s.to_string() })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

preset_enum! {
    /// Per-element animation preset.
    AnimationPreset, "animation" {
        None => ("none", "None"),
        Bounce => ("bounce", "Bounce"),
        Shake => ("shake", "Shake"),
        Spin => ("spin", "Spin"),
        Glow => ("glow", "Glow"),
        Zoom => ("zoom", "Zoom"),
        Pulse => ("pulse", "Pulse"),
        Wobble => ("wobble", "Wobble"),
        Flip => ("flip", "Flip"),
    }
}

preset_enum! {
    /// Per-element filter preset.
    FilterPreset, "filter" {
        None => ("none", "None"),
        Neon => ("neon", "Neon Glow"),
        Rainbow => ("rainbow", "Rainbow"),
        Blur => ("blur", "Blur"),
        Sepia => ("sepia", "Sepia"),
        Grayscale => ("grayscale", "Grayscale"),
        Invert => ("invert", "Invert"),
        Brightness => ("brightness", "Bright"),
    }
}

/// Font family options for text elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Arial")]
    Arial,
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    #[serde(rename = "Courier New")]
    CourierNew,
    #[serde(rename = "Comic Sans MS")]
    ComicSans,
}

impl FontFamily {
    /// Get the font family name as used by the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::CourierNew => "Courier New",
            FontFamily::ComicSans => "Comic Sans MS",
        }
    }

    /// Get all available font families.
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Arial,
            FontFamily::Helvetica,
            FontFamily::TimesNewRoman,
            FontFamily::CourierNew,
            FontFamily::ComicSans,
        ]
    }
}

impl FromStr for FontFamily {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontFamily::all()
            .iter()
            .copied()
            .find(|family| family.name() == s)
            .ok_or_else(|| UnknownPreset { catalog: "font", id: s.to_string() })
    }
}

use serde::Deserialize;

/// One of the ten named hues the document API uses for text, backgrounds and
/// select options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hue {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
}

impl Hue {
    /// Every hue in palette order.
    pub const ALL: [Hue; 10] = [
        Hue::Default,
        Hue::Gray,
        Hue::Brown,
        Hue::Orange,
        Hue::Yellow,
        Hue::Green,
        Hue::Blue,
        Hue::Purple,
        Hue::Pink,
        Hue::Red,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Hue::Default => "default",
            Hue::Gray => "gray",
            Hue::Brown => "brown",
            Hue::Orange => "orange",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
            Hue::Blue => "blue",
            Hue::Purple => "purple",
            Hue::Pink => "pink",
            Hue::Red => "red",
        }
    }

    /// Parses a hue name, returning `None` for anything outside the palette.
    pub fn parse(name: &str) -> Option<Hue> {
        Hue::ALL.into_iter().find(|hue| hue.as_str() == name)
    }

    /// Theme token for text in this hue.
    pub fn text_token(self) -> String {
        format!("var(--color-text-{})", self.as_str())
    }

    /// Theme token for backgrounds in this hue.
    pub fn background_token(self) -> String {
        format!("var(--color-bg-{})", self.as_str())
    }
}

/// A text or background color as written by the API (`"red"`,
/// `"red_background"`, `"default"`).
///
/// Unknown names collapse to the default color rather than failing the
/// surrounding payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub struct Color {
    pub hue: Hue,
    pub background: bool,
}

impl Color {
    pub const DEFAULT: Color = Color {
        hue: Hue::Default,
        background: false,
    };

    pub fn text(hue: Hue) -> Self {
        Self {
            hue,
            background: false,
        }
    }

    pub fn background(hue: Hue) -> Self {
        Self {
            hue,
            background: true,
        }
    }

    pub fn is_default(&self) -> bool {
        self.hue == Hue::Default && !self.background
    }

    /// Inline CSS declaration for this color, e.g. `color:var(--color-text-red);`.
    pub fn style(&self) -> Option<String> {
        if self.is_default() {
            return None;
        }
        Some(if self.background {
            format!("background-color:{};", self.hue.background_token())
        } else {
            format!("color:{};", self.hue.text_token())
        })
    }

    /// Class contributed to a block's own element: `bg-<hue>` for background
    /// colors, `text-<hue>` for foreground colors.
    pub fn class(&self) -> Option<String> {
        if self.is_default() {
            return None;
        }
        Some(if self.background {
            format!("bg-{}", self.hue.as_str())
        } else {
            format!("text-{}", self.hue.as_str())
        })
    }
}

impl From<String> for Color {
    fn from(raw: String) -> Self {
        Color::from(raw.as_str())
    }
}

impl From<&str> for Color {
    fn from(raw: &str) -> Self {
        match raw.strip_suffix("_background") {
            Some(name) => Color::background(Hue::parse(name).unwrap_or_default()),
            None => Color::text(Hue::parse(raw).unwrap_or_default()),
        }
    }
}

use std::fmt::{self, Display};
use std::str::FromStr;

/// Settings read by every rendering stage.
///
/// The defaults turn on everything except superscript.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct Config {
    /// Pound sign and underlined headers.
    pub headers: HeaderSettings,
    /// Ordered and unordered lists.
    pub lists: ListSettings,
    /// Explicit links and autolinks.
    pub links: LinkSettings,
    /// `**bold**`
    pub bold: BoldSettings,
    /// `*italics*`
    pub italics: ItalicSettings,
    /// `~~strikethrough~~`
    pub strikethrough: StrikethroughSettings,
    /// `` `monospace` ``
    pub monospace: MonospaceSettings,
    /// `^superscript` and `^(superscript chains)`
    pub superscript: SuperscriptSettings,
}

/// Header rendering settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct HeaderSettings {
    /// Render `# Header` lines.
    pub render_pound_sign_headers: bool,
    /// Render headers underlined with `===` or `---` on the following line.
    pub render_line_headers: bool,
    /// Styling for each header level, starting at level 1.
    /// Levels beyond the end of this list are not rendered as headers.
    pub levels: Vec<HeaderLevel>,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            render_pound_sign_headers: true,
            render_line_headers: true,
            levels: vec![
                HeaderLevel::new(2.0, true, true, 0.45),
                HeaderLevel::new(1.7, true, true, 0.3),
                HeaderLevel::new(1.5, true, false, 0.0),
                HeaderLevel::new(1.3, true, false, 0.0),
            ],
        }
    }
}

/// How a single header level is styled.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct HeaderLevel {
    /// Font size in `em`.
    pub size: f32,
    /// Wrap the header in `<b>`.
    pub bold: bool,
    /// Wrap the header in `<u>`.
    pub underline: bool,
    /// Letter case transform applied to the header.
    pub case: HeaderCase,
    /// Vertical whitespace below the header in font units.
    pub vertical_spacing: f32,
}

impl HeaderLevel {
    /// Create a header level without a case transform.
    pub fn new(size: f32, bold: bool, underline: bool, vertical_spacing: f32) -> Self {
        Self {
            size,
            bold,
            underline,
            case: HeaderCase::None,
            vertical_spacing,
        }
    }
}

/// Letter case transform for headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HeaderCase {
    /// Leave the text as written.
    #[default]
    None,
    /// `<uppercase>`
    Uppercase,
    /// `<smallcaps>`
    Smallcaps,
    /// `<lowercase>`
    Lowercase,
}

impl HeaderCase {
    /// The rich text tag name for this case, if any.
    pub(crate) fn tag_name(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Uppercase => Some("uppercase"),
            Self::Smallcaps => Some("smallcaps"),
            Self::Lowercase => Some("lowercase"),
        }
    }
}

/// Error returned when parsing a [`HeaderCase`] from a string.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseHeaderCaseError(String);

impl Display for ParseHeaderCaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown header case `{}`, expected one of none, uppercase, smallcaps, lowercase",
            self.0
        )
    }
}

impl std::error::Error for ParseHeaderCaseError {}

impl FromStr for HeaderCase {
    type Err = ParseHeaderCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "uppercase" => Ok(Self::Uppercase),
            "smallcaps" => Ok(Self::Smallcaps),
            "lowercase" => Ok(Self::Lowercase),
            _ => Err(ParseHeaderCaseError(s.to_owned())),
        }
    }
}

/// List rendering settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ListSettings {
    /// Render lines starting with `- ` or `* `.
    pub render_unordered_lists: bool,
    /// Render lines starting with `1. ` and friends.
    pub render_ordered_lists: bool,
    /// Glyph drawn in front of unordered list items.
    pub unordered_list_bullet: String,
    /// Written after the number of ordered list items.
    pub ordered_list_number_suffix: String,
    /// Vertical whitespace between a list and the text around it, in font units.
    pub vertical_offset: f32,
    /// Width of the right aligned bullet column, in pixels.
    pub bullet_offset_pixels: f32,
    /// Gap between the bullet column and the item text, in pixels.
    pub content_separation_pixels: f32,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            render_unordered_lists: true,
            render_ordered_lists: true,
            unordered_list_bullet: "•".to_owned(),
            ordered_list_number_suffix: ".".to_owned(),
            vertical_offset: 0.76,
            bullet_offset_pixels: 100.0,
            content_separation_pixels: 20.0,
        }
    }
}

/// Link rendering settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct LinkSettings {
    /// Render `[text](target)` links.
    pub render_links: bool,
    /// Turn bare `http://` and `https://` URLs into links.
    pub render_auto_links: bool,
    /// Text color of links.
    pub link_color: Color,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            render_links: true,
            render_auto_links: true,
            link_color: Color::rgba(29, 124, 234, 255),
        }
    }
}

/// Bold rendering settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct BoldSettings {
    /// Render `**bold**`.
    pub render_bold: bool,
}

impl Default for BoldSettings {
    fn default() -> Self {
        Self { render_bold: true }
    }
}

/// Italics rendering settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ItalicSettings {
    /// Render `*italics*`.
    pub render_italics: bool,
}

impl Default for ItalicSettings {
    fn default() -> Self {
        Self {
            render_italics: true,
        }
    }
}

/// Strikethrough rendering settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct StrikethroughSettings {
    /// Render `~~strikethrough~~`.
    pub render_strikethrough: bool,
}

impl Default for StrikethroughSettings {
    fn default() -> Self {
        Self {
            render_strikethrough: true,
        }
    }
}

/// Monospace rendering settings. Each enabled option contributes its own tag pair.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct MonospaceSettings {
    /// Render `` `monospace` ``.
    pub render_monospace: bool,
    /// Switch to [`font_path`](MonospaceSettings::font_path) inside monospace spans.
    pub use_custom_font: bool,
    /// Font asset used when [`use_custom_font`](MonospaceSettings::use_custom_font) is set.
    pub font_path: String,
    /// Highlight monospace spans with a colored overlay.
    pub draw_overlay: bool,
    /// Overlay color.
    pub overlay_color: Color,
    /// Horizontal overlay padding in pixels.
    pub overlay_padding_pixels: f32,
    /// Force a fixed advance for every character.
    pub manually_set_character_spacing: bool,
    /// Fixed character advance in `em`.
    pub character_spacing: f32,
    /// Add horizontal space around monospace spans.
    pub add_separation_spacing: bool,
    /// Horizontal space around monospace spans in `em`.
    pub separation_spacing: f32,
}

impl Default for MonospaceSettings {
    fn default() -> Self {
        Self {
            render_monospace: true,
            use_custom_font: true,
            font_path: "Noto/Noto Mono/NotoMono-Regular".to_owned(),
            draw_overlay: true,
            overlay_color: Color::rgba(0, 0, 0, 60),
            overlay_padding_pixels: 25.0,
            manually_set_character_spacing: false,
            character_spacing: 0.69,
            add_separation_spacing: true,
            separation_spacing: 0.3,
        }
    }
}

/// Superscript rendering settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct SuperscriptSettings {
    /// Render `^word` up to the next space.
    pub render_superscript: bool,
    /// Render `^(several words)`. Only applies when
    /// [`render_superscript`](SuperscriptSettings::render_superscript) is set.
    pub render_chain_superscript: bool,
}

impl Default for SuperscriptSettings {
    fn default() -> Self {
        Self {
            render_superscript: false,
            render_chain_superscript: true,
        }
    }
}

/// An RGBA color. Displays as `RRGGBBAA` in uppercase hex, the way rich text tags expect it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "String")
)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Create a color from its channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Some error occured when parsing a [`Color`] from a `&str`.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseColorError {
    /// Expected 6 or 8 hex digits.
    InvalidLength(usize),
    /// Found a character that isn't a hex digit.
    InvalidDigit(char),
}

impl Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "expected 6 or 8 hex digits in color, found {len}")
            }
            Self::InvalidDigit(c) => write!(f, "invalid hex digit `{c}` in color"),
        }
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let digits = hex
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|digit| digit as u8)
                    .ok_or(ParseColorError::InvalidDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let channel = |i: usize| digits[2 * i] << 4 | digits[2 * i + 1];
        match digits.len() {
            6 => Ok(Self::rgba(channel(0), channel(1), channel(2), u8::MAX)),
            8 => Ok(Self::rgba(channel(0), channel(1), channel(2), channel(3))),
            len => Err(ParseColorError::InvalidLength(len)),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

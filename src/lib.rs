//! Render a small markdown dialect into tag-based rich text, the kind understood by TextMeshPro
//! style text renderers.
//!
//! Supported markup: `# pound sign` and underlined headers, `- unordered` and `1. ordered` lists,
//! `[explicit](links)` and bare `https://` autolinks, `**bold**`, `*italics*`,
//! `~~strikethrough~~`, `` `monospace` ``, and (off by default) `^superscript`. A `\` escapes the
//! character after it.
//!
//! # Getting Started
//!
//! ```rust
//! use markdown_richtext::markdown_to_rich_text;
//!
//! let output = markdown_to_rich_text("Some **bold** and ~~struck~~ text");
//! assert_eq!(output, "Some <b>bold</b> and <s>struck</s> text");
//! ```
//!
//! Headers and lists add vertical spacing in the form of sized spacer lines:
//!
//! ```rust
//! # use markdown_richtext::markdown_to_rich_text;
//! let output = markdown_to_rich_text("# Welcome\n\nHello");
//! assert_eq!(
//!     output,
//!     "<size=2em><u><b>Welcome</b></u></size>\n<size=0.45em>\u{200B}</size>\nHello"
//! );
//! ```
//!
//! # Using the [Builder](RendererBuilder)
//!
//! The builder takes a [`Config`] and any number of [`LinePreprocessor`]s that run before the
//! built-in markdown rendering.
//!
//! ```rust
//! use markdown_richtext::{markdown_to_rich_text_with_builder, Config, LineBuffer, RendererBuilder};
//!
//! let mut config = Config::default();
//! config.superscript.render_superscript = true;
//!
//! let mut builder = RendererBuilder::with_config(config);
//! builder.preprocessor(|line: &mut LineBuffer| {
//!     if line.starts_with("//") {
//!         line.delete_after_processing();
//!     }
//! });
//!
//! let output = markdown_to_rich_text_with_builder("// a comment\nx^2 + y^2", builder);
//! assert_eq!(output, "x<sup>2</sup> + y<sup>2</sup> ");
//! ```

mod builder;
mod config;
mod escape;
mod headers;
mod line;
mod links;
mod list;
mod preprocessor;
mod renderer;
mod stage;
mod tags;
#[cfg(test)]
mod test;

pub use builder::RendererBuilder;
pub use config::{
    BoldSettings, Color, Config, HeaderCase, HeaderLevel, HeaderSettings, ItalicSettings,
    LinkSettings, ListSettings, MonospaceSettings, ParseColorError, ParseHeaderCaseError,
    StrikethroughSettings, SuperscriptSettings,
};
pub use escape::ESCAPE_CHARACTER;
pub use line::LineBuffer;
pub use preprocessor::LinePreprocessor;
pub use renderer::MarkdownRenderer;

/// Render a markdown snippet with all the default settings.
///
/// ```rust
/// # use markdown_richtext::markdown_to_rich_text;
/// let markdown = "Read [the book](https://doc.rust-lang.org/book/) \\*now\\*";
/// let rich_text =
///     "Read <color=#1D7CEAFF><link=\"https://doc.rust-lang.org/book/\">the book</link></color> *now*";
/// assert_eq!(markdown_to_rich_text(markdown), rich_text);
/// ```
pub fn markdown_to_rich_text(input: &str) -> String {
    MarkdownRenderer::default().render(input)
}

/// Render a markdown snippet with a custom [`Config`].
///
/// ```rust
/// # use markdown_richtext::{markdown_to_rich_text_with_config, Config};
/// let mut config = Config::default();
/// config.lists.unordered_list_bullet = "-".to_owned();
/// config.lists.bullet_offset_pixels = 40.0;
/// config.lists.content_separation_pixels = 10.0;
///
/// let output = markdown_to_rich_text_with_config("* item", &config);
/// assert_eq!(
///     output,
///     "<line-height=0%><width=40><align=right>-</width></align>\n</line-height><indent=50>item</indent>"
/// );
/// ```
pub fn markdown_to_rich_text_with_config(input: &str, config: &Config) -> String {
    MarkdownRenderer::with_config(config.clone()).render(input)
}

/// Render a markdown snippet with user specified settings and preprocessors.
///
/// ```rust
/// # use markdown_richtext::{markdown_to_rich_text_with_builder, LineBuffer, RendererBuilder};
/// let builder = RendererBuilder::with_preprocessor(|line: &mut LineBuffer| {
///     if line.starts_with("    ") {
///         line.disable_future_processing();
///     }
/// });
///
/// let output = markdown_to_rich_text_with_builder("*a*\n    *b*", builder);
/// assert_eq!(output, "<i>a</i>\n    *b*");
/// ```
pub fn markdown_to_rich_text_with_builder(input: &str, builder: RendererBuilder) -> String {
    tracing::trace!(?builder);
    builder.build().render(input)
}

//! Inline tags delimited by an opening and closing indicator, like `**bold**`.
//!
//! Matching works left to right. For each unescaped open indicator the next unescaped close
//! indicator after it closes the tag, unless the text between them can't carry the tag (see
//! [`InlineTag::is_invalid_content`]). In that case the search moves one character past the open
//! indicator and tries again, so within a run of indicator characters the last indicator wins:
//! `*****x***` pairs the final `**` of the leading run with the first `**` of the trailing run.

use std::borrow::Cow;

use crate::escape::ESCAPE_CHARACTER;
use crate::stage::Stage;
use crate::{Config, LineBuffer, MonospaceSettings};

/// A symmetric markdown tag and the rich text it turns into.
#[derive(Debug)]
pub(crate) struct InlineTag {
    pub(crate) markdown_open: &'static str,
    pub(crate) markdown_close: &'static str,
    pub(crate) rich_text_open: Cow<'static, str>,
    pub(crate) rich_text_close: Cow<'static, str>,
    /// Content made only of this character (and escapes) is left alone, so `~~~~~` stays five
    /// tildes instead of a struck out tilde.
    pub(crate) ignore_contents: Option<char>,
    /// An open indicator without a close indicator runs to the end of the line.
    pub(crate) line_end_closes: bool,
}

impl InlineTag {
    const fn simple(
        indicator: &'static str,
        rich_text_open: &'static str,
        rich_text_close: &'static str,
        ignore_contents: char,
    ) -> Self {
        Self {
            markdown_open: indicator,
            markdown_close: indicator,
            rich_text_open: Cow::Borrowed(rich_text_open),
            rich_text_close: Cow::Borrowed(rich_text_close),
            ignore_contents: Some(ignore_contents),
            line_end_closes: false,
        }
    }

    /// Replace every matched pair of indicators in `line`.
    pub(crate) fn apply(&self, line: &mut LineBuffer) {
        let open_len = self.markdown_open.len();
        let close_len = self.markdown_close.len();
        let step = self.markdown_open.chars().next().map_or(1, char::len_utf8);

        let mut index = 0;
        while index + open_len < line.len() {
            let Some(open) = line.unescaped_find(self.markdown_open, index) else {
                break;
            };
            let content_start = open + open_len;

            match line.unescaped_find(self.markdown_close, content_start) {
                Some(close) => {
                    // `**` on its own is just two asterisks.
                    if content_start == close
                        || self.is_invalid_content(&line.as_str()[content_start..close])
                    {
                        index = open + step;
                        continue;
                    }
                    tracing::trace!(open, close, tag = self.markdown_open, "matched inline tag");
                    line.replace(close, close + close_len, &self.rich_text_close);
                    line.replace(open, content_start, &self.rich_text_open);
                    index = open
                        + self.rich_text_open.len()
                        + (close - content_start)
                        + self.rich_text_close.len();
                }
                None if self.line_end_closes => {
                    if content_start == line.len() {
                        break;
                    }
                    if self.is_invalid_content(&line.as_str()[content_start..]) {
                        index = open + step;
                        continue;
                    }
                    tracing::trace!(open, tag = self.markdown_open, "inline tag runs to line end");
                    line.replace(open, content_start, &self.rich_text_open);
                    line.append(&self.rich_text_close);
                    break;
                }
                None => break,
            }
        }
    }

    /// Check if the text between two indicators can't be tagged.
    fn is_invalid_content(&self, content: &str) -> bool {
        let (Some(first), Some(last)) = (content.chars().next(), content.chars().next_back())
        else {
            return true;
        };

        // Content starting with the indicator means this indicator is not the last in its run.
        if self.markdown_open.starts_with(first) {
            return true;
        }

        // `* example*` is not italicized.
        if first.is_whitespace() || last.is_whitespace() {
            return true;
        }

        content
            .chars()
            .all(|c| Some(c) == self.ignore_contents || c == ESCAPE_CHARACTER)
    }
}

const BOLD: InlineTag = InlineTag::simple("**", "<b>", "</b>", '*');
const ITALICS: InlineTag = InlineTag::simple("*", "<i>", "</i>", '*');
const STRIKETHROUGH: InlineTag = InlineTag::simple("~~", "<s>", "</s>", '~');

const SUPERSCRIPT_SINGLE: InlineTag = InlineTag {
    markdown_open: "^",
    markdown_close: " ",
    rich_text_open: Cow::Borrowed("<sup>"),
    rich_text_close: Cow::Borrowed("</sup> "),
    ignore_contents: Some('^'),
    line_end_closes: true,
};

const SUPERSCRIPT_CHAIN: InlineTag = InlineTag {
    markdown_open: "^(",
    markdown_close: ")",
    rich_text_open: Cow::Borrowed("<sup>"),
    rich_text_close: Cow::Borrowed("</sup>"),
    ignore_contents: None,
    line_end_closes: false,
};

fn monospace(settings: &MonospaceSettings) -> InlineTag {
    let mut open = String::new();
    let mut close = String::new();

    if settings.add_separation_spacing {
        open.push_str(&format!("<space={}em>", settings.separation_spacing));
    }
    if settings.use_custom_font {
        open.push_str(&format!("<font=\"{}\">", settings.font_path));
    }
    if settings.draw_overlay {
        let padding = settings.overlay_padding_pixels;
        open.push_str(&format!(
            "<mark=#{} padding=\"{padding},{padding},0,0\">",
            settings.overlay_color
        ));
    }
    if settings.manually_set_character_spacing {
        open.push_str(&format!("<mspace={}em>", settings.character_spacing));
    }

    // Close in reverse order so the tags nest.
    if settings.manually_set_character_spacing {
        close.push_str("</mspace>");
    }
    if settings.draw_overlay {
        close.push_str("</mark>");
    }
    if settings.use_custom_font {
        close.push_str("</font>");
    }
    if settings.add_separation_spacing {
        close.push_str(&format!("<space={}em>", settings.separation_spacing));
    }

    InlineTag {
        markdown_open: "`",
        markdown_close: "`",
        rich_text_open: open.into(),
        rich_text_close: close.into(),
        ignore_contents: Some('`'),
        line_end_closes: false,
    }
}

/// The inline tag stages, in no particular order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TagStage {
    Bold,
    Italics,
    Strikethrough,
    Monospace,
    SuperscriptSingle,
    SuperscriptChain,
}

impl TagStage {
    fn tag(self, config: &Config) -> InlineTag {
        match self {
            Self::Bold => BOLD,
            Self::Italics => ITALICS,
            Self::Strikethrough => STRIKETHROUGH,
            Self::Monospace => monospace(&config.monospace),
            Self::SuperscriptSingle => SUPERSCRIPT_SINGLE,
            Self::SuperscriptChain => SUPERSCRIPT_CHAIN,
        }
    }
}

impl Stage for TagStage {
    fn name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italics => "italics",
            Self::Strikethrough => "strikethrough",
            Self::Monospace => "monospace",
            Self::SuperscriptSingle => "superscript",
            Self::SuperscriptChain => "superscript chain",
        }
    }

    fn is_enabled(&self, config: &Config) -> bool {
        match self {
            Self::Bold => config.bold.render_bold,
            Self::Italics => config.italics.render_italics,
            Self::Strikethrough => config.strikethrough.render_strikethrough,
            Self::Monospace => config.monospace.render_monospace,
            Self::SuperscriptSingle => config.superscript.render_superscript,
            Self::SuperscriptChain => {
                config.superscript.render_superscript
                    && config.superscript.render_chain_superscript
            }
        }
    }

    fn process(&self, lines: &mut [LineBuffer], config: &Config) {
        // Monospace builds its tags from the config, so only do that once per document.
        let tag = self.tag(config);
        for line in lines
            .iter_mut()
            .filter(|line| !line.is_processing_disabled())
        {
            tag.apply(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(tag: &InlineTag, text: &str) -> String {
        let mut line = LineBuffer::new(text);
        tag.apply(&mut line);
        line.as_str().to_owned()
    }

    #[test]
    fn bold_and_italics() {
        assert_eq!(apply(&BOLD, "a **b** c"), "a <b>b</b> c");
        assert_eq!(apply(&ITALICS, "a *b* c *d*"), "a <i>b</i> c <i>d</i>");
    }

    #[test]
    fn bold_leaves_single_asterisks_for_italics() {
        let bolded = apply(&BOLD, "**bold** and *italic*");
        assert_eq!(bolded, "<b>bold</b> and *italic*");
        assert_eq!(apply(&ITALICS, &bolded), "<b>bold</b> and <i>italic</i>");
    }

    #[test]
    fn last_indicator_of_a_run_wins() {
        let bolded = apply(&BOLD, "*****x***");
        assert_eq!(bolded, "***<b>x</b>*");
        assert_eq!(apply(&ITALICS, &bolded), "**<i><b>x</b></i>");
    }

    #[test]
    fn empty_and_padded_content_is_not_tagged() {
        assert_eq!(apply(&BOLD, "****"), "****");
        assert_eq!(apply(&ITALICS, "* example*"), "* example*");
        assert_eq!(apply(&ITALICS, "*example *"), "*example *");
        assert_eq!(apply(&ITALICS, "2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn ignored_contents_are_not_tagged() {
        assert_eq!(apply(&STRIKETHROUGH, "~~~~~"), "~~~~~");
        assert_eq!(apply(&STRIKETHROUGH, "~~gone~~"), "<s>gone</s>");
    }

    #[test]
    fn escaped_indicators_are_skipped() {
        assert_eq!(apply(&ITALICS, r"\*a\*"), r"\*a\*");
        assert_eq!(apply(&ITALICS, r"\*a* *b*"), r"\*a* <i>b</i>");
    }

    #[test]
    fn unclosed_tags_are_left_alone() {
        assert_eq!(apply(&BOLD, "**open"), "**open");
    }

    #[test]
    fn superscript_single_closes_at_space_or_line_end() {
        assert_eq!(apply(&SUPERSCRIPT_SINGLE, "x^2 y"), "x<sup>2</sup> y");
        assert_eq!(apply(&SUPERSCRIPT_SINGLE, "x^2"), "x<sup>2</sup> ");
        assert_eq!(apply(&SUPERSCRIPT_SINGLE, "x^"), "x^");
        assert_eq!(apply(&SUPERSCRIPT_SINGLE, "a ^ b"), "a ^ b");
    }

    #[test]
    fn superscript_chain() {
        assert_eq!(apply(&SUPERSCRIPT_CHAIN, "e^(i pi)"), "e<sup>i pi</sup>");
    }

    #[test]
    fn monospace_fragments_follow_settings() {
        let tag = monospace(&MonospaceSettings::default());
        assert_eq!(
            apply(&tag, "run `cargo`"),
            "run <space=0.3em><font=\"Noto/Noto Mono/NotoMono-Regular\">\
             <mark=#0000003C padding=\"25,25,0,0\">cargo</mark></font><space=0.3em>"
        );

        let tag = monospace(&MonospaceSettings {
            use_custom_font: false,
            draw_overlay: false,
            add_separation_spacing: false,
            manually_set_character_spacing: true,
            ..Default::default()
        });
        assert_eq!(apply(&tag, "`x`"), "<mspace=0.69em>x</mspace>");
    }

    #[test]
    fn monospace_fragments_nest_with_every_option_on() {
        let tag = monospace(&MonospaceSettings {
            manually_set_character_spacing: true,
            ..Default::default()
        });
        assert_eq!(
            apply(&tag, "`x`"),
            "<space=0.3em><font=\"Noto/Noto Mono/NotoMono-Regular\">\
             <mark=#0000003C padding=\"25,25,0,0\"><mspace=0.69em>x\
             </mspace></mark></font><space=0.3em>"
        );
    }

    #[test]
    fn chain_superscript_needs_single_superscript() {
        let mut config = Config::default();
        config.superscript.render_chain_superscript = true;
        assert!(!TagStage::SuperscriptChain.is_enabled(&config));
        config.superscript.render_superscript = true;
        assert!(TagStage::SuperscriptChain.is_enabled(&config));
    }
}

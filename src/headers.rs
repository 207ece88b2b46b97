use crate::stage::Stage;
use crate::{Config, HeaderLevel, LineBuffer};

const POUND_SIGN: char = '#';

/// Renders `# Pound sign` headers and headers underlined with `===` or `---`.
///
/// Empty lines right after a header are dropped, since every header level brings its own
/// spacing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Headers;

impl Stage for Headers {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.headers.render_pound_sign_headers || config.headers.render_line_headers
    }

    fn process(&self, lines: &mut [LineBuffer], config: &Config) {
        let settings = &config.headers;
        let mut in_wake_of_header = false;

        for i in 0..lines.len() {
            if lines[i].is_processing_disabled() {
                continue;
            }

            if in_wake_of_header {
                if lines[i].is_empty() {
                    lines[i].delete_after_processing();
                    continue;
                }
                in_wake_of_header = false;
            }

            if settings.render_pound_sign_headers {
                if let Some(level) = pound_sign_level(&lines[i], settings.levels.len()) {
                    tracing::debug!(line = i, level, "pound sign header");
                    lines[i].remove(0, level * POUND_SIGN.len_utf8());
                    make_line_header(&mut lines[i], &settings.levels[level - 1]);
                    in_wake_of_header = true;
                    continue;
                }
            }

            if settings.render_line_headers && i > 0 {
                let Some(level) = underline_level(&lines[i]) else {
                    continue;
                };
                let Some(header_level) = settings.levels.get(level - 1) else {
                    continue;
                };

                let (before, rest) = lines.split_at_mut(i);
                let previous = &mut before[i - 1];
                if previous.is_processing_disabled() {
                    continue;
                }

                tracing::debug!(line = i - 1, level, "underlined header");
                make_line_header(previous, header_level);
                rest[0].delete_after_processing();
                in_wake_of_header = true;
            }
        }
    }
}

/// The level of a `## Header` line, if it has one that's configured.
fn pound_sign_level(line: &LineBuffer, level_count: usize) -> Option<usize> {
    let text = line.as_str();
    let level = text.chars().take_while(|&c| c == POUND_SIGN).count();
    let followed_by_space = text[level * POUND_SIGN.len_utf8()..].starts_with(' ');
    (followed_by_space && (1..=level_count).contains(&level)).then_some(level)
}

fn underline_level(line: &LineBuffer) -> Option<usize> {
    if line.is_exclusively('=') {
        Some(1)
    } else if line.is_exclusively('-') {
        Some(2)
    } else {
        None
    }
}

fn make_line_header(line: &mut LineBuffer, level: &HeaderLevel) {
    line.trim_start(' ');

    // Built outside in, closed inside out.
    let mut open = format!("<size={}em>", level.size);
    let mut close = String::new();
    if let Some(case) = level.case.tag_name() {
        open.push_str(&format!("<{case}>"));
    }
    if level.underline {
        open.push_str("<u>");
    }
    if level.bold {
        open.push_str("<b>");
        close.push_str("</b>");
    }
    if level.underline {
        close.push_str("</u>");
    }
    if let Some(case) = level.case.tag_name() {
        close.push_str(&format!("</{case}>"));
    }
    close.push_str("</size>");

    line.prepend(&open).append(&close);
    line.add_vertical_whitespace_after(level.vertical_spacing);
    line.disable_future_processing();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{lines, texts};
    use crate::HeaderCase;

    fn render(source: &[&str]) -> Vec<LineBuffer> {
        let mut document = lines(source);
        Headers.process(&mut document, &Config::default());
        document
    }

    fn kept(document: &[LineBuffer]) -> Vec<&str> {
        texts(document)
            .into_iter()
            .zip(document)
            .filter(|(_, line)| !line.is_marked_for_deletion())
            .map(|(text, _)| text)
            .collect()
    }

    #[test]
    fn pound_sign_headers() {
        let document = render(&["# Title", "## Sub", "### Third", "#### Fourth"]);
        assert_eq!(
            texts(&document),
            [
                "<size=2em><u><b>Title</b></u></size>",
                "<size=1.7em><u><b>Sub</b></u></size>",
                "<size=1.5em><b>Third</b></size>",
                "<size=1.3em><b>Fourth</b></size>",
            ]
        );
        assert!(document.iter().all(LineBuffer::is_processing_disabled));
    }

    #[test]
    fn pound_sign_needs_a_space() {
        assert_eq!(texts(&render(&["#Title"])), ["#Title"]);
        assert_eq!(texts(&render(&["#"])), ["#"]);
    }

    #[test]
    fn unconfigured_levels_are_left_alone() {
        assert_eq!(texts(&render(&["##### Fifth"])), ["##### Fifth"]);
    }

    #[test]
    fn extra_spaces_after_pound_signs_are_trimmed() {
        assert_eq!(
            texts(&render(&["#    Title"])),
            ["<size=2em><u><b>Title</b></u></size>"]
        );
    }

    #[test]
    fn underlined_headers() {
        let document = render(&["Title", "=====", "Sub", "-", "text"]);
        assert_eq!(
            kept(&document),
            [
                "<size=2em><u><b>Title</b></u></size>",
                "<size=1.7em><u><b>Sub</b></u></size>",
                "text"
            ]
        );
    }

    #[test]
    fn underline_needs_a_line_above_it() {
        let document = render(&["===", "x"]);
        assert_eq!(kept(&document), ["===", "x"]);
    }

    #[test]
    fn underline_turns_an_empty_line_into_a_header() {
        let document = render(&["a", "", "---"]);
        assert_eq!(
            texts(&document),
            ["a", "<size=1.7em><u><b></b></u></size>", "---"]
        );
        assert!(!document[1].is_marked_for_deletion());
        assert!(document[2].is_marked_for_deletion());
    }

    #[test]
    fn underline_skips_disabled_lines() {
        let mut document = lines(&["Title", "==="]);
        document[0].disable_future_processing();
        Headers.process(&mut document, &Config::default());
        assert_eq!(kept(&document), ["Title", "==="]);
    }

    #[test]
    fn empty_lines_after_headers_are_dropped() {
        let document = render(&["# Title", "", "", "text", ""]);
        assert_eq!(kept(&document), ["<size=2em><u><b>Title</b></u></size>", "text", ""]);
    }

    #[test]
    fn whitespace_lines_end_the_wake() {
        let document = render(&["# Title", " ", ""]);
        assert_eq!(
            kept(&document),
            ["<size=2em><u><b>Title</b></u></size>", " ", ""]
        );
    }

    #[test]
    fn headers_get_spacing_below() {
        let document = render(&["# Title"]);
        assert_eq!(
            document[0].clone().finish(),
            "<size=2em><u><b>Title</b></u></size>\n<size=0.45em>\u{200B}</size>"
        );
    }

    #[test]
    fn header_case() {
        let mut config = Config::default();
        config.headers.levels = vec![HeaderLevel {
            size: 3.0,
            bold: false,
            underline: false,
            case: HeaderCase::Smallcaps,
            vertical_spacing: 0.0,
        }];
        let mut document = lines(&["# Title"]);
        Headers.process(&mut document, &config);
        assert_eq!(
            texts(&document),
            ["<size=3em><smallcaps>Title</smallcaps></size>"]
        );
    }

    #[test]
    fn header_kinds_can_be_turned_off() {
        let mut config = Config::default();
        config.headers.render_pound_sign_headers = false;
        let mut document = lines(&["# Title", "Other", "==="]);
        Headers.process(&mut document, &config);
        assert_eq!(
            kept(&document),
            ["# Title", "<size=2em><u><b>Other</b></u></size>"]
        );
    }
}

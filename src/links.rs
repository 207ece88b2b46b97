use crate::stage::Stage;
use crate::{Config, LineBuffer};

const LINK_CLOSE: &str = "</link></color>";

/// Rewrites `[text](target)` into a colored rich text link.
///
/// Anything malformed stops link processing for the rest of the line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Links;

impl Stage for Links {
    fn name(&self) -> &'static str {
        "links"
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.links.render_links
    }

    fn process_line(&self, line: &mut LineBuffer, config: &Config) {
        let color = config.links.link_color.to_string();

        let mut search_from = 0;
        while let Some(text_start) = line.unescaped_index_of('[', search_from) {
            let Some(text_end) = line.unescaped_index_of(']', text_start + 1) else {
                return;
            };

            // The target has to follow the text directly: `[text](target)`
            let target_start = text_end + 1;
            if !line.as_str()[target_start..].starts_with('(') {
                return;
            }

            let Some(target_end) = line.unescaped_index_of(')', target_start + 1) else {
                return;
            };
            if target_end - target_start < 2 {
                tracing::trace!(text_start, "link without a target");
                return;
            }

            let text = line.snip(text_start + 1, text_end);
            let target = line.snip(target_start + 1, target_end);
            tracing::debug!(%text, %target, "found link");

            line.remove(text_start, target_end + 1 - text_start);
            search_from = line.insert_chain(
                text_start,
                &[
                    "<color=#", &color, ">", "<link=\"", &target, "\">", &text, LINK_CLOSE,
                ],
            );
        }
    }
}

/// Turns bare URLs starting with a scheme like `https://` into links.
///
/// A URL only counts when it starts a word and has a `.` somewhere after the scheme, before its
/// last character. The URL ends at the next whitespace.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AutoLinks {
    scheme: &'static str,
}

impl AutoLinks {
    pub(crate) const HTTP: Self = Self { scheme: "http://" };
    pub(crate) const HTTPS: Self = Self { scheme: "https://" };
}

impl Stage for AutoLinks {
    fn name(&self) -> &'static str {
        self.scheme
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.links.render_auto_links
    }

    fn process_line(&self, line: &mut LineBuffer, config: &Config) {
        let color = config.links.link_color.to_string();
        let scheme_len = self.scheme.len();

        let mut search_from = 0;
        while let Some(start) = line.find(self.scheme, search_from, true) {
            let starts_word = line.as_str()[..start]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if !starts_word {
                search_from = start + scheme_len;
                continue;
            }

            let end = line
                .index_of_whitespace(start + scheme_len)
                .unwrap_or(line.len());
            if end - start <= scheme_len {
                search_from = start + scheme_len;
                continue;
            }

            let looks_like_domain = line
                .index_of('.', start + scheme_len, false)
                .is_some_and(|dot| dot + 1 < end);
            if !looks_like_domain {
                search_from = end;
                continue;
            }

            let url = line.snip(start, end);
            tracing::debug!(%url, "found autolink");
            let open_end =
                line.insert_chain(start, &["<color=#", &color, ">", "<link=\"", &url, "\">"]);
            let close_start = open_end + url.len();
            line.insert(close_start, LINK_CLOSE);
            search_from = close_start + LINK_CLOSE.len();
        }
    }
}

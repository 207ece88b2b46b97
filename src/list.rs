//! Ordered and unordered lists.
//!
//! We want the bullets right aligned and the item text left aligned, like this:
//!
//! ```text
//!   8. On top of the empire state building
//!   9. In the alley behind the bakery
//!  10. In an airplane bathroom
//! ```
//!
//! Rich text can't mix two alignments on one line, so every item becomes two lines: a right
//! aligned bullet line squashed to 0% height, followed by the indented item text. The two end up
//! drawn on top of each other.

use crate::stage::Stage;
use crate::{Config, LineBuffer};

const LIST_LINE_CLOSE: &str = "</indent>";

/// The syntax of one kind of list.
pub(crate) trait ListStyle {
    /// What [`parse_item`](ListStyle::parse_item) learns about a list line.
    type Item;
    /// State carried from one item to the next within a single list. Reset for every new list.
    type RunState: Default;

    fn name(&self) -> &'static str;

    fn is_enabled(&self, config: &Config) -> bool;

    /// Check if `text` is an item of this kind of list.
    fn parse_item(&self, text: &str) -> Option<Self::Item>;

    /// Length of the marker at the start of the line, like `-` or `12.`.
    fn marker_len(&self, item: &Self::Item) -> usize;

    /// Text drawn in the bullet column. `list_line_count` is the 0-based position in the list.
    fn bullet(
        &self,
        item: &Self::Item,
        list_line_count: usize,
        state: &mut Self::RunState,
        config: &Config,
    ) -> String;
}

/// Runs a [`ListStyle`] over a document.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ListStage<S>(pub(crate) S);

impl<S> Stage for ListStage<S>
where
    S: ListStyle,
{
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn is_enabled(&self, config: &Config) -> bool {
        self.0.is_enabled(config)
    }

    fn process(&self, lines: &mut [LineBuffer], config: &Config) {
        let settings = &config.lists;
        let before_bullet = format!(
            "<line-height=0%><width={}><align=right>",
            settings.bullet_offset_pixels
        );
        let after_bullet = format!(
            "</width></align>\n</line-height><indent={}>",
            settings.bullet_offset_pixels + settings.content_separation_pixels
        );

        let mut previous_line_was_list_line = false;
        let mut list_line_count = 0;
        let mut state = S::RunState::default();

        for i in 0..lines.len() {
            let line = &lines[i];
            let item = if line.is_processing_disabled() || line.is_empty_or_whitespace() {
                None
            } else {
                self.0.parse_item(line.as_str())
            };

            let Some(item) = item else {
                if previous_line_was_list_line {
                    handle_list_ends(lines, i - 1, list_line_count, settings.vertical_offset);
                }
                previous_line_was_list_line = false;
                list_line_count = 0;
                state = S::RunState::default();
                continue;
            };

            if previous_line_was_list_line {
                list_line_count += 1;
            }

            let bullet = self.0.bullet(&item, list_line_count, &mut state, config);
            tracing::trace!(line = i, list_line_count, %bullet, "list item");

            let line = &mut lines[i];
            line.remove(0, self.0.marker_len(&item));
            line.trim_start(' ');
            line.insert_chain(0, &[&before_bullet, &bullet, &after_bullet]);
            line.append(LIST_LINE_CLOSE);

            previous_line_was_list_line = true;
        }

        if previous_line_was_list_line {
            handle_list_ends(
                lines,
                lines.len() - 1,
                list_line_count,
                settings.vertical_offset,
            );
        }
    }
}

/// Space a finished list away from its surroundings.
///
/// Empty lines right around the list are deleted since the list brings its own spacing. Lines
/// holding only whitespace are kept, so an author can still add extra room by hand.
fn handle_list_ends(
    lines: &mut [LineBuffer],
    list_end_line_index: usize,
    list_line_count: usize,
    vertical_offset: f32,
) {
    let list_start_line_index = list_end_line_index - list_line_count;
    tracing::debug!(list_start_line_index, list_end_line_index, "list ends");

    if list_start_line_index > 0 {
        lines[list_start_line_index].add_vertical_whitespace_before(vertical_offset);
    }
    if list_end_line_index + 1 < lines.len() {
        lines[list_end_line_index].add_vertical_whitespace_after(vertical_offset);
    }

    for line in lines[..list_start_line_index]
        .iter_mut()
        .rev()
        .take_while(|line| line.is_empty())
    {
        line.delete_after_processing();
    }
    for line in lines[list_end_line_index + 1..]
        .iter_mut()
        .take_while(|line| line.is_empty())
    {
        line.delete_after_processing();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UnorderedListMarker {
    Asterisk,
    Hyphen,
}

impl From<UnorderedListMarker> for char {
    fn from(value: UnorderedListMarker) -> Self {
        match value {
            UnorderedListMarker::Asterisk => '*',
            UnorderedListMarker::Hyphen => '-',
        }
    }
}

impl TryFrom<char> for UnorderedListMarker {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '*' => Ok(UnorderedListMarker::Asterisk),
            '-' => Ok(UnorderedListMarker::Hyphen),
            _ => Err(value),
        }
    }
}

/// `- item` or `* item`
#[derive(Clone, Copy, Debug)]
pub(crate) struct Unordered;

impl ListStyle for Unordered {
    type Item = UnorderedListMarker;
    type RunState = ();

    fn name(&self) -> &'static str {
        "unordered lists"
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.lists.render_unordered_lists
    }

    fn parse_item(&self, text: &str) -> Option<Self::Item> {
        let mut chars = text.chars();
        let marker = UnorderedListMarker::try_from(chars.next()?).ok()?;
        (chars.next() == Some(' ')).then_some(marker)
    }

    fn marker_len(&self, item: &Self::Item) -> usize {
        char::from(*item).len_utf8()
    }

    fn bullet(&self, _: &Self::Item, _: usize, _: &mut (), config: &Config) -> String {
        config.lists.unordered_list_bullet.clone()
    }
}

/// An ordered list line like `12. item`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OrderedListItem {
    /// Everything before the `.`, exactly as written.
    numeral: String,
    number: i64,
}

/// Numbering policy for one ordered list.
///
/// A list written entirely with `1.` is numbered automatically: `1, 2, 3, ...`. Any other
/// number, on the first line or later, is shown as written from then on.
#[derive(Debug, Default)]
pub(crate) struct Numbering {
    auto_numbered: bool,
}

/// `1. item`
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ordered;

impl ListStyle for Ordered {
    type Item = OrderedListItem;
    type RunState = Numbering;

    fn name(&self) -> &'static str {
        "ordered lists"
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.lists.render_ordered_lists
    }

    fn parse_item(&self, text: &str) -> Option<Self::Item> {
        let dot_index = text.find('.')?;
        if dot_index < 1 || !text[dot_index + 1..].starts_with(' ') {
            return None;
        }

        let numeral = &text[..dot_index];
        let number = numeral.trim().parse().ok()?;
        Some(OrderedListItem {
            numeral: numeral.to_owned(),
            number,
        })
    }

    fn marker_len(&self, item: &Self::Item) -> usize {
        item.numeral.len() + '.'.len_utf8()
    }

    fn bullet(
        &self,
        item: &Self::Item,
        list_line_count: usize,
        numbering: &mut Numbering,
        config: &Config,
    ) -> String {
        let list_line_number = list_line_count + 1;
        let is_first_line_of_list = list_line_count == 0;

        let number = if is_first_line_of_list {
            numbering.auto_numbered = item.number == 1;
            if numbering.auto_numbered {
                list_line_number.to_string()
            } else {
                item.numeral.clone()
            }
        } else if numbering.auto_numbered && item.number == 1 {
            list_line_number.to_string()
        } else {
            numbering.auto_numbered = false;
            item.numeral.clone()
        };

        format!("{number}{}", config.lists.ordered_list_number_suffix)
    }
}

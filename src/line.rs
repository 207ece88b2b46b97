use crate::escape::remove_escapes;

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// A single line of markdown as it moves through the rendering stages.
///
/// Stages never remove lines from a document. They flag them instead, so line indices stay stable
/// until every stage has run and the renderer compacts the document.
///
/// Indices taken and returned by the methods on this type are byte offsets into [`as_str`]
/// and must fall on `char` boundaries. Out of range indices panic.
///
/// [`as_str`]: LineBuffer::as_str
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineBuffer {
    text: String,
    disable_future_processing: bool,
    delete_after_processing: bool,
    vertical_whitespace_before: f32,
    vertical_whitespace_after: f32,
}

impl LineBuffer {
    /// Create a buffer for one line of source text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        debug_assert!(!text.contains('\n'), "lines are split before processing");
        Self {
            text,
            ..Default::default()
        }
    }

    /// The current text of the line.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the line in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if no stage may touch this line anymore.
    ///
    /// Lines flagged for deletion count as disabled too.
    pub fn is_processing_disabled(&self) -> bool {
        self.disable_future_processing || self.delete_after_processing
    }

    /// Exempt this line from every stage that runs after this point.
    pub fn disable_future_processing(&mut self) {
        self.disable_future_processing = true;
    }

    /// Check if the line will be dropped from the output.
    pub fn is_marked_for_deletion(&self) -> bool {
        self.delete_after_processing
    }

    /// Drop this line from the output once every stage has run.
    pub fn delete_after_processing(&mut self) {
        self.delete_after_processing = true;
    }

    /// Request vertical whitespace above the line, in font units. Requests add up.
    pub fn add_vertical_whitespace_before(&mut self, font_units: f32) {
        self.vertical_whitespace_before += font_units;
    }

    /// Request vertical whitespace below the line, in font units. Requests add up.
    pub fn add_vertical_whitespace_after(&mut self, font_units: f32) {
        self.vertical_whitespace_after += font_units;
    }

    /// Insert `s` at `index`.
    pub fn insert(&mut self, index: usize, s: &str) {
        self.text.insert_str(index, s);
    }

    /// Insert every fragment at `index` in one go, returning the index right after the last one.
    pub fn insert_chain(&mut self, index: usize, fragments: &[&str]) -> usize {
        let chain = fragments.concat();
        self.text.insert_str(index, &chain);
        index + chain.len()
    }

    /// Remove `len` bytes starting at `start`.
    pub fn remove(&mut self, start: usize, len: usize) {
        self.text.replace_range(start..start + len, "");
    }

    /// Replace the bytes in `start..end` with `replacement`.
    pub fn replace(&mut self, start: usize, end: usize, replacement: &str) {
        self.text.replace_range(start..end, replacement);
    }

    /// Add `s` to the end of the line.
    pub fn append(&mut self, s: &str) -> &mut Self {
        self.text.push_str(s);
        self
    }

    /// Add `s` to the start of the line.
    pub fn prepend(&mut self, s: &str) -> &mut Self {
        self.text.insert_str(0, s);
        self
    }

    /// Copy out the text in `start..end` without removing it.
    pub fn snip(&self, start: usize, end: usize) -> String {
        self.text[start..end].to_owned()
    }

    /// Remove every leading occurrence of `c`.
    pub fn trim_start(&mut self, c: char) {
        let trimmed = self.text.len() - self.text.trim_start_matches(c).len();
        self.remove(0, trimmed);
    }

    /// Produce the final rich text for this line: escape markers are dropped and pending vertical
    /// whitespace becomes sized spacer lines around the text.
    pub(crate) fn finish(self) -> String {
        debug_assert!(!self.delete_after_processing, "deleted lines are never finished");

        let text = remove_escapes(&self.text);
        let mut output = String::with_capacity(text.len());
        if !is_pretty_close_to_zero(self.vertical_whitespace_before) {
            output.push_str(&spacer_line(self.vertical_whitespace_before));
            output.push('\n');
        }
        output.push_str(&text);
        if !is_pretty_close_to_zero(self.vertical_whitespace_after) {
            output.push('\n');
            output.push_str(&spacer_line(self.vertical_whitespace_after));
        }
        output
    }
}

// The spacer needs some content or the renderer ignores its size.
fn spacer_line(font_units: f32) -> String {
    format!("<size={font_units}em>{ZERO_WIDTH_SPACE}</size>")
}

fn is_pretty_close_to_zero(value: f32) -> bool {
    value.abs() < 0.0001
}

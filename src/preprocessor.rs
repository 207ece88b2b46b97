use crate::LineBuffer;

/// Custom processing that runs on every line before the built-in markdown stages.
///
/// Preprocessors run in the order they were added to the [`RendererBuilder`], and only see lines
/// that an earlier preprocessor hasn't disabled. Calling
/// [`disable_future_processing`](LineBuffer::disable_future_processing) exempts a line from all
/// markdown rendering.
///
/// Any `Fn(&mut LineBuffer)` closure is a preprocessor:
///
/// ```rust
/// # use markdown_richtext::{markdown_to_rich_text_with_builder, LineBuffer, RendererBuilder};
/// let mut builder = RendererBuilder::default();
/// builder.preprocessor(|line: &mut LineBuffer| {
///     if line.starts_with("> ") {
///         line.disable_future_processing();
///     }
/// });
///
/// let output = markdown_to_rich_text_with_builder("> **quoted**\n**bold**", builder);
/// assert_eq!(output, "> **quoted**\n<b>bold</b>");
/// ```
///
/// [`RendererBuilder`]: crate::RendererBuilder
pub trait LinePreprocessor {
    /// Process a single line.
    fn process_line(&self, line: &mut LineBuffer);
}

impl<F> LinePreprocessor for F
where
    F: Fn(&mut LineBuffer),
{
    fn process_line(&self, line: &mut LineBuffer) {
        self(line)
    }
}

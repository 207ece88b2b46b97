use crate::{Config, LineBuffer};

/// One step of the markdown to rich text pipeline.
///
/// Stages are stateless values. Anything that has to survive from one line to the next lives in
/// locals of [`process`](Stage::process), so a single stage can render any number of documents.
pub(crate) trait Stage {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Check if the configuration turns this stage on.
    fn is_enabled(&self, config: &Config) -> bool;

    /// Run the stage over the whole document.
    ///
    /// Line-local stages only implement [`process_line`](Stage::process_line).
    fn process(&self, lines: &mut [LineBuffer], config: &Config) {
        for line in lines
            .iter_mut()
            .filter(|line| !line.is_processing_disabled())
        {
            self.process_line(line, config);
        }
    }

    /// Rewrite a single line that hasn't been disabled.
    fn process_line(&self, _line: &mut LineBuffer, _config: &Config) {}
}

#[cfg(test)]
pub(crate) fn lines(source: &[&str]) -> Vec<LineBuffer> {
    source.iter().copied().map(LineBuffer::new).collect()
}

#[cfg(test)]
pub(crate) fn texts(lines: &[LineBuffer]) -> Vec<&str> {
    lines.iter().map(LineBuffer::as_str).collect()
}

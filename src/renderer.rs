use itertools::Itertools;

use crate::headers::Headers;
use crate::links::{AutoLinks, Links};
use crate::list::{ListStage, Ordered, Unordered};
use crate::stage::Stage;
use crate::tags::TagStage;
use crate::{Config, LineBuffer, LinePreprocessor};

/// Every built-in stage, in the order they run.
///
/// Explicit links go before autolinks, which only wrap URLs that start a word, so a link target
/// is never wrapped twice. Headers go last because they disable the lines they render.
pub(crate) const BUILT_IN_STAGES: &[&dyn Stage] = &[
    &Links,
    &AutoLinks::HTTP,
    &AutoLinks::HTTPS,
    &ListStage(Unordered),
    &ListStage(Ordered),
    &TagStage::Bold,
    &TagStage::Italics,
    &TagStage::Strikethrough,
    &TagStage::SuperscriptChain,
    &TagStage::SuperscriptSingle,
    &TagStage::Monospace,
    &Headers,
];

/// Renders markdown into rich text.
///
/// A renderer holds no per-document state, so one renderer can render any number of documents.
pub struct MarkdownRenderer {
    pub(crate) config: Config,
    pub(crate) preprocessors: Vec<Box<dyn LinePreprocessor>>,
}

impl MarkdownRenderer {
    /// Create a [`MarkdownRenderer`] with a custom [`Config`] and no preprocessors.
    ///
    /// ```rust
    /// # use markdown_richtext::{Config, MarkdownRenderer};
    /// let mut config = Config::default();
    /// config.bold.render_bold = false;
    /// let renderer = MarkdownRenderer::with_config(config);
    /// assert_eq!(renderer.render("**not bold**"), "**not bold**");
    /// ```
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            preprocessors: Vec::new(),
        }
    }

    /// The [`Config`] used for rendering.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render a markdown document.
    ///
    /// ```rust
    /// # use markdown_richtext::MarkdownRenderer;
    /// let renderer = MarkdownRenderer::default();
    /// assert_eq!(renderer.render("~~old~~ *new*\n"), "<s>old</s> <i>new</i>\n");
    /// ```
    pub fn render(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }

        let mut lines = input.lines().map(LineBuffer::new).collect::<Vec<_>>();
        tracing::debug!(lines = lines.len(), "rendering markdown");

        for preprocessor in &self.preprocessors {
            for line in lines
                .iter_mut()
                .filter(|line| !line.is_processing_disabled())
            {
                preprocessor.process_line(line);
            }
        }

        for stage in BUILT_IN_STAGES {
            if !stage.is_enabled(&self.config) {
                tracing::trace!(stage = stage.name(), "stage disabled");
                continue;
            }
            tracing::trace!(stage = stage.name(), "running stage");
            stage.process(&mut lines, &self.config);
        }

        let mut output = lines
            .into_iter()
            .filter(|line| !line.is_marked_for_deletion())
            .map(LineBuffer::finish)
            .join("\n");
        if input.ends_with('\n') {
            output.push('\n');
        }
        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl std::fmt::Debug for MarkdownRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownRenderer")
            .field("config", &self.config)
            .field("preprocessors", &self.preprocessors.len())
            .finish()
    }
}

use crate::{Config, LinePreprocessor, MarkdownRenderer};

/// Configures a [`MarkdownRenderer`].
#[derive(Default)]
pub struct RendererBuilder {
    config: Config,
    preprocessors: Vec<Box<dyn LinePreprocessor>>,
}

impl RendererBuilder {
    /// Create a [`RendererBuilder`] with a custom [`Config`].
    ///
    /// ```rust
    /// # use markdown_richtext::{Config, RendererBuilder};
    /// let mut config = Config::default();
    /// config.superscript.render_superscript = true;
    /// let builder = RendererBuilder::with_config(config);
    /// ```
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Create a [`RendererBuilder`] with a single [`LinePreprocessor`] and the default
    /// [`Config`].
    pub fn with_preprocessor<P>(preprocessor: P) -> Self
    where
        P: LinePreprocessor + 'static,
    {
        let mut builder = Self::default();
        builder.preprocessor(preprocessor);
        builder
    }

    /// Replace the [`Config`].
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Add a [`LinePreprocessor`] that runs after the ones already added.
    pub fn preprocessor<P>(&mut self, preprocessor: P) -> &mut Self
    where
        P: LinePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Create a [`MarkdownRenderer`] using the builder's settings.
    pub fn build(self) -> MarkdownRenderer {
        MarkdownRenderer {
            config: self.config,
            preprocessors: self.preprocessors,
        }
    }
}

impl std::fmt::Debug for RendererBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererBuilder")
            .field("config", &self.config)
            .field("preprocessors", &self.preprocessors.len())
            .finish()
    }
}

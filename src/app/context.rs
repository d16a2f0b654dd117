use crate::domain::GenerationConfig;
use crate::ports::{ContentStore, HeadlineSource, TextGenerator};

/// Application context holding dependencies for daily generation.
pub struct AppContext<G: TextGenerator, H: HeadlineSource, C: ContentStore> {
    generator: G,
    headlines: Option<H>,
    store: C,
    settings: GenerationConfig,
}

impl<G: TextGenerator, H: HeadlineSource, C: ContentStore> AppContext<G, H, C> {
    pub fn new(generator: G, headlines: Option<H>, store: C, settings: GenerationConfig) -> Self {
        Self { generator, headlines, store, settings }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Headline source, present only when headline mode is wired.
    pub fn headlines(&self) -> Option<&H> {
        self.headlines.as_ref()
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn settings(&self) -> &GenerationConfig {
        &self.settings
    }
}

//! Sentence corpus extraction, without alignment.
use log::info;

use crate::config::ExtractConfig;
use crate::error::Error;
use crate::io::ArtifactLayout;
use crate::pipelines::Pipeline;
use crate::side::PerSide;

pub struct Extract {
    config: ExtractConfig,
}

impl Extract {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }
}

impl Pipeline<PerSide<usize>> for Extract {
    /// Writes `sentences.{src,trg}` (and `urls.{src,trg}`) into the destination
    /// and returns the number of sentences per side.
    fn run(&self) -> Result<PerSide<usize>, Error> {
        let r = super::reconstruct(&self.config.inputs, self.config.with_urls)?;
        let layout = ArtifactLayout::new(&self.config.dst);
        r.corpus.write(&layout)?;
        info!("artifacts written to {:?}", layout.dir());

        Ok(PerSide::new(
            r.corpus.src.sentences.len(),
            r.corpus.trg.sentences.len(),
        ))
    }
}

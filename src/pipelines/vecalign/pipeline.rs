use log::info;

use super::{Orchestrator, ProcessRunner, ToolRunner};
use crate::config::AlignConfig;
use crate::error::Error;
use crate::io::ArtifactLayout;
use crate::pipelines::Pipeline;

/// Sentence alignment of aligned documents.
///
/// 1. The selection index is built from the document aligner output,
/// 1. the manifest is streamed to rebuild the corpus of selected documents,
/// 1. `sentences.*` (and `urls.*` for the delegated strategy) are written in the temporary directory,
/// 1. vecalign is run over them.
pub struct Vecalign<R = ProcessRunner> {
    config: AlignConfig,
    runner: R,
}

impl Vecalign<ProcessRunner> {
    pub fn new(config: AlignConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R> Vecalign<R>
where
    R: ToolRunner + Clone,
{
    /// Use a custom [ToolRunner] to invoke the external tools.
    pub fn with_runner(config: AlignConfig, runner: R) -> Self {
        Self { config, runner }
    }
}

impl<R> Pipeline<()> for Vecalign<R>
where
    R: ToolRunner + Clone,
{
    fn run(&self) -> Result<(), Error> {
        let layout = ArtifactLayout::new(&self.config.tmp_dir);
        let with_urls = self.config.aligner.strategy.tracks_urls();

        // the corpus is dropped as soon as it is on disk
        {
            let r = crate::pipelines::reconstruct(&self.config.inputs, with_urls)?;
            r.corpus.write(&layout)?;
        }
        info!("sentence files written to {:?}", layout.dir());

        let mut orchestrator =
            Orchestrator::new(self.config.aligner.clone(), layout, self.runner.clone());
        orchestrator.run()
    }
}

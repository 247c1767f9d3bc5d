/*! Sentence aligner orchestration

Drives the external sentence aligner through a fixed, linear sequence of stages:

```text
OVERLAP(src) -> OVERLAP(trg) -> [EMBED(src) -> EMBED(trg)] -> ALIGN
```

Every stage goes through the same step: remove any leftover of its declared output files,
run the tool, require a zero exit code, then require each declared output file to exist.
The final alignment is written on the aligner's stdout and is only checked through its exit code.

The embedding stages only happen with [EmbeddingStrategy::Precomputed].
With [EmbeddingStrategy::Delegated] the aligner embeds the overlaps itself and also receives the provenance URLs.
!*/
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, info, log_enabled, Level};

use super::runner::{Output, ToolCommand, ToolRunner};
use super::{Stage, State};
use crate::error::Error;
use crate::io::ArtifactLayout;
use crate::side::{PerSide, Side};

/// Overlap generation script, relative to the vecalign directory.
pub const OVERLAP_SCRIPT: &str = "overlap.py";
/// Aligner script, relative to the vecalign directory.
pub const ALIGN_SCRIPT: &str = "vecalign.py";
/// Embedding script, relative to the embedding toolkit root.
pub const EMBED_SCRIPT: &str = "tasks/embed/embed.sh";

/// How overlap embeddings are obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingStrategy {
    /// Embeddings are computed beforehand with the toolkit installed at `toolkit_dir`.
    Precomputed { toolkit_dir: PathBuf },
    /// The aligner embeds the overlaps itself. Provenance URLs are passed along.
    Delegated { dim: usize, batch_size: usize },
}

impl EmbeddingStrategy {
    /// Whether this strategy needs the `urls.{src,trg}` artifacts.
    pub fn tracks_urls(&self) -> bool {
        matches!(self, EmbeddingStrategy::Delegated { .. })
    }
}

/// Everything needed to build the tool command lines.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignerSettings {
    pub vecalign_dir: PathBuf,
    pub langs: PerSide<String>,
    pub num_overlaps: usize,
    pub alignment_max_size: usize,
    pub threshold: Option<f32>,
    pub strategy: EmbeddingStrategy,
}

/// A planned stage, along with what its command line needs beyond the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Overlap(Side),
    Embed { side: Side, toolkit_dir: &'a Path },
    Align,
}

impl Step<'_> {
    pub fn stage(&self) -> Stage {
        match self {
            Step::Overlap(side) => Stage::Overlap(*side),
            Step::Embed { side, .. } => Stage::Embed(*side),
            Step::Align => Stage::Align,
        }
    }
}

pub struct Orchestrator<R> {
    settings: AlignerSettings,
    layout: ArtifactLayout,
    runner: R,
    state: State,
}

impl<R: ToolRunner> Orchestrator<R> {
    pub fn new(settings: AlignerSettings, layout: ArtifactLayout, runner: R) -> Self {
        Self {
            settings,
            layout,
            runner,
            state: State::Pending,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Ordered steps for the configured strategy.
    pub fn steps(&self) -> Vec<Step<'_>> {
        let mut steps = vec![Step::Overlap(Side::Src), Step::Overlap(Side::Trg)];
        if let EmbeddingStrategy::Precomputed { toolkit_dir } = &self.settings.strategy {
            steps.extend(Side::BOTH.map(|side| Step::Embed {
                side,
                toolkit_dir: toolkit_dir.as_path(),
            }));
        }
        steps.push(Step::Align);
        steps
    }

    /// Ordered stages for the configured strategy.
    pub fn plan(&self) -> Vec<Stage> {
        self.steps().iter().map(Step::stage).collect()
    }

    /// Run every stage in order, stopping at the first failure.
    pub fn run(&mut self) -> Result<(), Error> {
        let commands: Vec<_> = self
            .steps()
            .iter()
            .map(|step| (step.stage(), self.command(step)))
            .collect();

        for (stage, (cmd, artifacts)) in commands {
            self.state = State::Running(stage);
            if let Err(e) = self.run_stage(stage, &cmd, &artifacts) {
                error!("[{}] aborting: {}", stage, e);
                self.state = State::Failed(stage);
                return Err(e);
            }
        }
        self.state = State::Done;
        info!("sentence alignment done");
        Ok(())
    }

    fn run_stage(
        &mut self,
        stage: Stage,
        cmd: &ToolCommand,
        artifacts: &[PathBuf],
    ) -> Result<(), Error> {
        for path in artifacts {
            match std::fs::remove_file(path) {
                Ok(()) => debug!("[{}] removed stale {:?}", stage, path),
                Err(e) if e.kind() == ErrorKind::NotFound => (),
                Err(e) => return Err(Error::Io(e)),
            }
        }

        info!("[{}] starting", stage);
        debug!("[{}] {}", stage, cmd);

        match self.runner.run(stage, cmd)? {
            Some(0) => (),
            code => return Err(Error::Subprocess { stage, code }),
        }

        for path in artifacts {
            if !path.is_file() {
                return Err(Error::MissingArtifact {
                    stage,
                    path: path.clone(),
                });
            }
        }

        info!("[{}] done", stage);
        Ok(())
    }

    /// Command line of a step, along with the files it must produce.
    pub fn command(&self, step: &Step) -> (ToolCommand, Vec<PathBuf>) {
        match *step {
            Step::Overlap(side) => {
                let output = self.layout.overlaps(side);
                let cmd = self
                    .helper(&self.settings.vecalign_dir.join(OVERLAP_SCRIPT))
                    .arg("-i")
                    .arg(self.layout.sentences(side))
                    .arg("-o")
                    .arg(&output)
                    .arg("-n")
                    .arg(self.settings.num_overlaps.to_string());
                (cmd, vec![output])
            }
            Step::Embed { side, toolkit_dir } => {
                let output = self.layout.embeddings(side);
                let cmd = self
                    .helper(&toolkit_dir.join(EMBED_SCRIPT))
                    .arg(self.layout.overlaps(side))
                    .arg(self.settings.langs.get(side))
                    .arg(&output);
                (cmd, vec![output])
            }
            Step::Align => (self.align_command(), Vec::new()),
        }
    }

    /// Overlap and embedding tools are chatty, only show them when debugging.
    fn helper(&self, program: &Path) -> ToolCommand {
        let stderr = if log_enabled!(Level::Debug) {
            Output::Inherit
        } else {
            Output::Discard
        };
        ToolCommand::new(program)
            .stdout(Output::Discard)
            .stderr(stderr)
    }

    fn align_command(&self) -> ToolCommand {
        let l = &self.layout;
        let mut cmd = ToolCommand::new(&self.settings.vecalign_dir.join(ALIGN_SCRIPT))
            .arg("--alignment_max_size")
            .arg(self.settings.alignment_max_size.to_string())
            .arg("--src")
            .arg(l.sentences(Side::Src))
            .arg("--tgt")
            .arg(l.sentences(Side::Trg));

        cmd = match &self.settings.strategy {
            EmbeddingStrategy::Precomputed { .. } => cmd
                .arg("--src_embed")
                .arg(l.overlaps(Side::Src))
                .arg(l.embeddings(Side::Src))
                .arg("--tgt_embed")
                .arg(l.overlaps(Side::Trg))
                .arg(l.embeddings(Side::Trg)),
            EmbeddingStrategy::Delegated { dim, batch_size } => cmd
                .arg("--src_embed")
                .arg(l.overlaps(Side::Src))
                .arg("--tgt_embed")
                .arg(l.overlaps(Side::Trg))
                .arg("--embeddings_dim")
                .arg(dim.to_string())
                .arg("--embeddings_batch_size")
                .arg(batch_size.to_string())
                .arg("--src_urls")
                .arg(l.urls(Side::Src))
                .arg("--tgt_urls")
                .arg(l.urls(Side::Trg))
                .arg("--urls_format"),
        };

        if let Some(threshold) = self.settings.threshold {
            cmd = cmd.arg("--threshold").arg(threshold.to_string());
        }
        cmd
    }
}

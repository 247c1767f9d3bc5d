/*! Run configuration

Validated counterparts of the [crate::cli] commands.
Every check happens here, before any input is read or any tool is spawned:

- at most one of the two inputs may be the console stream,
- input files and working directories must exist,
- the vecalign directory must hold the scripts we call,
- language codes must be valid language tags,
- the embedding toolkit location (`$LASER`) must be set when embeddings are precomputed.
!*/
use std::{
    env,
    path::{Path, PathBuf},
};

use log::debug;
use oxilangtag::LanguageTag;

use crate::cli;
use crate::error::Error;
use crate::io::reader::ContentMode;
use crate::io::InputSource;
use crate::pipelines::vecalign::{
    AlignerSettings, EmbeddingStrategy, ALIGN_SCRIPT, OVERLAP_SCRIPT,
};
use crate::side::PerSide;

/// Environment variable pointing to the embedding toolkit install root.
pub const LASER_ENV: &str = "LASER";

/// Inputs shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub manifest: InputSource,
    pub alignments: InputSource,
    pub content_mode: ContentMode,
}

impl Inputs {
    pub fn new(
        manifest: InputSource,
        alignments: InputSource,
        content_mode: ContentMode,
    ) -> Result<Self, Error> {
        if manifest.is_stdin() && alignments.is_stdin() {
            return Err(Error::Configuration(
                "you can only pipe either the manifest or the document aligner output, not both of them"
                    .to_string(),
            ));
        }

        Ok(Self {
            manifest: existing_input(manifest)?,
            alignments: existing_input(alignments)?,
            content_mode,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignConfig {
    pub inputs: Inputs,
    pub tmp_dir: PathBuf,
    pub aligner: AlignerSettings,
}

impl AlignConfig {
    /// Build from command line arguments, reading the embedding toolkit location from the environment.
    pub fn from_cli(opt: cli::Align) -> Result<Self, Error> {
        let toolkit_dir = env::var_os(LASER_ENV).map(PathBuf::from);
        Self::from_cli_with_toolkit(opt, toolkit_dir)
    }

    pub fn from_cli_with_toolkit(
        opt: cli::Align,
        toolkit_dir: Option<PathBuf>,
    ) -> Result<Self, Error> {
        let inputs = Inputs::new(
            opt.nda_input,
            opt.nda_output,
            opt.nda_input_is_base64.into(),
        )?;
        let tmp_dir = existing_dir(&opt.tmp_dir, "temporary directory")?;
        let vecalign_dir = existing_dir(&opt.vecalign_dir, "vecalign directory")?;
        check_vecalign_files(&vecalign_dir)?;

        let langs = PerSide::new(
            language(&opt.src_lang, "--src-lang")?,
            language(&opt.trg_lang, "--trg-lang")?,
        );

        positive(opt.num_overlaps, "--vecalign-num-overlaps")?;
        positive(opt.alignment_max_size, "--vecalign-alignment-max-size")?;

        let strategy = if opt.precompute_embeddings {
            let toolkit_dir = toolkit_dir.ok_or_else(|| {
                Error::Configuration(format!("envvar {} is not defined", LASER_ENV))
            })?;
            EmbeddingStrategy::Precomputed { toolkit_dir }
        } else {
            positive(opt.embeddings_dim, "--embeddings-dim")?;
            positive(opt.embeddings_batch_size, "--embeddings-batch-size")?;
            EmbeddingStrategy::Delegated {
                dim: opt.embeddings_dim,
                batch_size: opt.embeddings_batch_size,
            }
        };

        let config = Self {
            inputs,
            tmp_dir,
            aligner: AlignerSettings {
                vecalign_dir,
                langs,
                num_overlaps: opt.num_overlaps,
                alignment_max_size: opt.alignment_max_size,
                threshold: opt.threshold,
                strategy,
            },
        };
        debug!("align config\n{:#?}", config);
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub inputs: Inputs,
    pub dst: PathBuf,
    pub with_urls: bool,
}

impl ExtractConfig {
    pub fn from_cli(opt: cli::Extract) -> Result<Self, Error> {
        let config = Self {
            inputs: Inputs::new(
                opt.nda_input,
                opt.nda_output,
                opt.nda_input_is_base64.into(),
            )?,
            dst: existing_dir(&opt.dst, "destination directory")?,
            with_urls: opt.with_urls,
        };
        debug!("extract config\n{:#?}", config);
        Ok(config)
    }
}

fn existing_input(input: InputSource) -> Result<InputSource, Error> {
    match input {
        InputSource::Stdin => Ok(InputSource::Stdin),
        InputSource::File(path) => {
            if !path.is_file() {
                return Err(Error::Configuration(format!(
                    "file {:?} must exist",
                    path
                )));
            }
            Ok(InputSource::File(path.canonicalize()?))
        }
    }
}

fn existing_dir(path: &Path, what: &str) -> Result<PathBuf, Error> {
    if !path.is_dir() {
        return Err(Error::Configuration(format!(
            "{} {:?} does not exist",
            what, path
        )));
    }
    Ok(path.canonicalize()?)
}

fn check_vecalign_files(vecalign_dir: &Path) -> Result<(), Error> {
    for script in [OVERLAP_SCRIPT, ALIGN_SCRIPT] {
        if !vecalign_dir.join(script).is_file() {
            return Err(Error::Configuration(format!(
                "necessary vecalign file not found: {}",
                script
            )));
        }
    }
    Ok(())
}

fn language(tag: &str, flag: &str) -> Result<String, Error> {
    LanguageTag::parse(tag)
        .map(|t| t.into_inner().to_string())
        .map_err(|e| Error::Configuration(format!("{}: invalid language {:?}: {}", flag, tag, e)))
}

fn positive(value: usize, flag: &str) -> Result<(), Error> {
    if value == 0 {
        return Err(Error::Configuration(format!(
            "{} must be greater than 0",
            flag
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{AlignConfig, ExtractConfig, Inputs};
    use crate::cli;
    use crate::error::Error;
    use crate::io::reader::ContentMode;
    use crate::io::InputSource;
    use crate::pipelines::vecalign::EmbeddingStrategy;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let vecalign = dir.path().join("vecalign");
            std::fs::create_dir(&vecalign).unwrap();
            std::fs::write(vecalign.join("overlap.py"), "").unwrap();
            std::fs::write(vecalign.join("vecalign.py"), "").unwrap();
            std::fs::create_dir(dir.path().join("tmp")).unwrap();
            std::fs::write(dir.path().join("manifest.tsv"), "").unwrap();
            std::fs::write(dir.path().join("nda.out"), "").unwrap();
            Self { dir }
        }

        fn path(&self, p: &str) -> PathBuf {
            self.dir.path().join(p)
        }

        fn align(&self) -> cli::Align {
            cli::Align {
                nda_input: InputSource::File(self.path("manifest.tsv")),
                nda_output: InputSource::File(self.path("nda.out")),
                vecalign_dir: self.path("vecalign"),
                src_lang: "en".to_string(),
                trg_lang: "fr".to_string(),
                tmp_dir: self.path("tmp"),
                nda_input_is_base64: true,
                num_overlaps: 4,
                alignment_max_size: 4,
                embeddings_dim: 768,
                embeddings_batch_size: 32,
                threshold: None,
                precompute_embeddings: false,
            }
        }
    }

    fn configuration_error(r: Result<AlignConfig, Error>) -> String {
        match r {
            Err(Error::Configuration(msg)) => msg,
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn valid_delegated() {
        let f = Fixture::new();
        let c = AlignConfig::from_cli_with_toolkit(f.align(), None).unwrap();
        assert_eq!(c.inputs.content_mode, ContentMode::Base64);
        assert_eq!(
            c.aligner.strategy,
            EmbeddingStrategy::Delegated {
                dim: 768,
                batch_size: 32
            }
        );
        assert_eq!(c.aligner.langs.src, "en");
        assert!(c.tmp_dir.is_absolute());
    }

    #[test]
    fn both_inputs_on_stdin() {
        let r = Inputs::new(InputSource::Stdin, InputSource::Stdin, ContentMode::Path);
        assert!(matches!(r, Err(Error::Configuration(_))));

        let f = Fixture::new();
        let mut opt = f.align();
        opt.nda_input = InputSource::Stdin;
        opt.nda_output = InputSource::Stdin;
        assert!(configuration_error(AlignConfig::from_cli_with_toolkit(opt, None))
            .contains("not both"));
    }

    #[test]
    fn one_input_on_stdin() {
        let f = Fixture::new();
        let mut opt = f.align();
        opt.nda_input = InputSource::Stdin;
        let c = AlignConfig::from_cli_with_toolkit(opt, None).unwrap();
        assert!(c.inputs.manifest.is_stdin());
    }

    #[test]
    fn precomputed_needs_toolkit() {
        let f = Fixture::new();
        let mut opt = f.align();
        opt.precompute_embeddings = true;
        assert!(configuration_error(AlignConfig::from_cli_with_toolkit(opt, None))
            .contains("LASER"));

        let mut opt = f.align();
        opt.precompute_embeddings = true;
        let c = AlignConfig::from_cli_with_toolkit(opt, Some(PathBuf::from("/opt/laser")))
            .unwrap();
        assert_eq!(
            c.aligner.strategy,
            EmbeddingStrategy::Precomputed {
                toolkit_dir: PathBuf::from("/opt/laser")
            }
        );
    }

    #[test]
    fn missing_paths() {
        let f = Fixture::new();

        let mut opt = f.align();
        opt.nda_output = InputSource::File(f.path("nope"));
        configuration_error(AlignConfig::from_cli_with_toolkit(opt, None));

        let mut opt = f.align();
        opt.tmp_dir = f.path("nope");
        configuration_error(AlignConfig::from_cli_with_toolkit(opt, None));

        std::fs::remove_file(f.path("vecalign/overlap.py")).unwrap();
        assert!(configuration_error(AlignConfig::from_cli_with_toolkit(f.align(), None))
            .contains("overlap.py"));
    }

    #[test]
    fn invalid_values() {
        let f = Fixture::new();

        let mut opt = f.align();
        opt.src_lang = "not a language".to_string();
        configuration_error(AlignConfig::from_cli_with_toolkit(opt, None));

        let mut opt = f.align();
        opt.num_overlaps = 0;
        configuration_error(AlignConfig::from_cli_with_toolkit(opt, None));
    }

    #[test]
    fn extract() {
        let f = Fixture::new();
        let c = ExtractConfig::from_cli(cli::Extract {
            nda_input: InputSource::File(f.path("manifest.tsv")),
            nda_output: InputSource::Stdin,
            dst: f.path("tmp"),
            nda_input_is_base64: false,
            with_urls: true,
        })
        .unwrap();
        assert_eq!(c.inputs.content_mode, ContentMode::Path);
        assert!(c.with_urls);
        assert!(Path::new(&c.dst).is_dir());
    }
}

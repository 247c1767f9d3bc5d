//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use crate::io::InputSource;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "segalign",
    about = "sentence alignment of aligned document pairs."
)]
/// Holds every command that is callable by the `segalign` command.
pub enum Segalign {
    #[structopt(about = "Align sentences of aligned documents with vecalign")]
    Align(Align),
    #[structopt(about = "Only extract the sentences (and urls) of aligned documents")]
    Extract(Extract),
}

#[derive(Debug, StructOpt)]
/// Align command and parameters.
///
/// ```sh
/// segalign-align 0.1.0
/// Align sentences of aligned documents with vecalign
///
/// USAGE:
///     segalign align [FLAGS] [OPTIONS] <nda-input> <nda-output> <vecalign-dir> --src-lang <src-lang> --tmp-dir <tmp-dir> --trg-lang <trg-lang>
///
/// FLAGS:
///         --nda-input-is-base64      first manifest column holds base64 content instead of paths
///         --precompute-embeddings    compute overlap embeddings with LASER before aligning
///
/// ARGS:
///     <nda-input>       document manifest. '-' for reading from stdin
///     <nda-output>      document aligner output. '-' for reading from stdin
///     <vecalign-dir>    vecalign directory
/// ```
pub struct Align {
    #[structopt(help = "document manifest. '-' for reading from stdin")]
    pub nda_input: InputSource,
    #[structopt(help = "document aligner output. '-' for reading from stdin")]
    pub nda_output: InputSource,
    #[structopt(parse(from_os_str), help = "vecalign directory")]
    pub vecalign_dir: PathBuf,

    #[structopt(long = "src-lang", help = "language of the src documents")]
    pub src_lang: String,
    #[structopt(long = "trg-lang", help = "language of the trg documents")]
    pub trg_lang: String,
    #[structopt(
        parse(from_os_str),
        long = "tmp-dir",
        help = "directory where intermediate files are written"
    )]
    pub tmp_dir: PathBuf,
    #[structopt(
        long = "nda-input-is-base64",
        help = "first manifest column holds base64 content instead of paths"
    )]
    pub nda_input_is_base64: bool,

    #[structopt(
        long = "vecalign-num-overlaps",
        default_value = "4",
        help = "number of overlaps to apply to every sentence"
    )]
    pub num_overlaps: usize,
    #[structopt(
        long = "vecalign-alignment-max-size",
        default_value = "4",
        help = "max. size of alignments"
    )]
    pub alignment_max_size: usize,
    #[structopt(
        long = "embeddings-dim",
        default_value = "768",
        help = "dimension of the embeddings computed by vecalign"
    )]
    pub embeddings_dim: usize,
    #[structopt(
        long = "embeddings-batch-size",
        default_value = "32",
        help = "batch size used by vecalign when computing embeddings"
    )]
    pub embeddings_batch_size: usize,
    #[structopt(long = "threshold", help = "minimum score of the aligned sentences")]
    pub threshold: Option<f32>,
    #[structopt(
        long = "precompute-embeddings",
        help = "compute overlap embeddings with LASER before aligning (requires $LASER)"
    )]
    pub precompute_embeddings: bool,
}

#[derive(Debug, StructOpt)]
/// Extract command and parameters.
pub struct Extract {
    #[structopt(help = "document manifest. '-' for reading from stdin")]
    pub nda_input: InputSource,
    #[structopt(help = "document aligner output. '-' for reading from stdin")]
    pub nda_output: InputSource,
    #[structopt(parse(from_os_str), help = "destination directory")]
    pub dst: PathBuf,
    #[structopt(
        long = "nda-input-is-base64",
        help = "first manifest column holds base64 content instead of paths"
    )]
    pub nda_input_is_base64: bool,
    #[structopt(long = "with-urls", help = "also write urls.src/urls.trg")]
    pub with_urls: bool,
}

#[cfg(test)]
mod tests {
    use structopt::StructOpt;

    use super::Segalign;
    use crate::io::InputSource;

    #[test]
    fn align_defaults() {
        let opt = Segalign::from_iter_safe(&[
            "segalign",
            "align",
            "-",
            "nda.out",
            "vecalign",
            "--src-lang",
            "en",
            "--trg-lang",
            "fr",
            "--tmp-dir",
            "/tmp",
        ])
        .unwrap();
        match opt {
            Segalign::Align(a) => {
                assert_eq!(a.nda_input, InputSource::Stdin);
                assert_eq!(a.num_overlaps, 4);
                assert_eq!(a.alignment_max_size, 4);
                assert_eq!(a.embeddings_dim, 768);
                assert_eq!(a.embeddings_batch_size, 32);
                assert_eq!(a.threshold, None);
                assert!(!a.precompute_embeddings);
                assert!(!a.nda_input_is_base64);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn align_requires_langs() {
        let r = Segalign::from_iter_safe(&[
            "segalign", "align", "a", "b", "vecalign", "--tmp-dir", "/tmp",
        ]);
        assert!(r.is_err());
    }

    #[test]
    fn extract_flags() {
        let opt = Segalign::from_iter_safe(&[
            "segalign",
            "extract",
            "in.tsv",
            "-",
            "out",
            "--with-urls",
            "--nda-input-is-base64",
        ])
        .unwrap();
        match opt {
            Segalign::Extract(e) => {
                assert!(e.with_urls);
                assert!(e.nda_input_is_base64);
                assert_eq!(e.nda_output, InputSource::Stdin);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

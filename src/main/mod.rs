use std::path::PathBuf;

use clap::{Parser, Subcommand};
use popmunge::{
    commands::{
        fasta2bed, filter_singletons_vcf, link_unchanged, reduce_het, reduce_pi_dxy_fst,
        reheader_vcf,
    },
    io::TsvConfig,
    prelude::{CommandOutput, PopmungeError},
};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

const INFO: &str = "\
popmunge: population genetics data munging
usage: popmunge [--help] <subcommand>

Subcommands:

  fasta2bed:          convert FASTA 'pos=<chrom>:<pos>[+-]' headers into BED3 intervals.
  reheader:           strip '.bam' and directories from VCF sample names.
  filter-singletons:  remove an individual's singleton/doubleton sites from a VCF.
  het:                aggregate piawka heterozygosity into a per-population table.
  pi-dxy-fst:         aggregate piawka pi, Dxy and Fst into tables and pairwise matrices.

";

#[derive(Parser)]
#[clap(name = "popmunge")]
#[clap(about = INFO)]
struct Cli {
    /// increase logging verbosity (-d: info, -dd: debug, -ddd: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert FASTA header position descriptors into BED3 intervals.
    Fasta2bed {
        /// an input (possibly gzipped) FASTA file
        #[arg(required = true)]
        fasta: PathBuf,

        /// an optional output file (standard output will be used if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rewrite VCF sample names from BAM paths to bare sample names.
    Reheader {
        /// the input (possibly gzipped) VCF file
        #[arg(short, long, required = true)]
        vcf: PathBuf,

        /// the output VCF file (BGZF-compressed if it ends in '.gz')
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// if the sample names are already clean, do not link the output to the input
        #[arg(long)]
        no_link: bool,
    },
    /// Remove one individual's singleton/doubleton sites from its VCF.
    FilterSingletons {
        /// the input (possibly gzipped) VCF file
        #[arg(short, long, required = true)]
        vcf: PathBuf,

        /// the output VCF file (BGZF-compressed if it ends in '.gz')
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// a vcftools '--singletons' output file
        #[arg(short, long, required = true)]
        singletons: PathBuf,

        /// the name of the individual (the INDV column) whose sites are removed
        #[arg(short, long, required = true)]
        name: String,

        /// if there are no sites to remove, do not link the output (and any '.csi' index) to the input
        #[arg(long)]
        no_link: bool,
    },
    /// Aggregate piawka heterozygosity into genomic_het_table.tsv.
    Het {
        /// the piawka output file; the table is written to the same directory
        #[arg(required = true)]
        piawka: PathBuf,

        /// a population file (accepted for compatibility; currently unused)
        #[arg(short, long)]
        pop: Option<PathBuf>,

        /// number of decimals for floats (shortest exact form if not specified)
        #[arg(long)]
        precision: Option<usize>,
    },
    /// Aggregate piawka pi, Dxy and Fst into tables and pairwise matrices.
    PiDxyFst {
        /// the piawka output file; the tables are written to the same directory
        #[arg(required = true)]
        piawka: PathBuf,

        /// number of decimals for floats (shortest exact form if not specified)
        #[arg(long)]
        precision: Option<usize>,
    },
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Report on a command, and if it left its input unchanged, link the output
/// to the input unless linking is turned off.
fn finish_vcf_command(
    output: CommandOutput<bool>,
    vcf: &PathBuf,
    output_path: &PathBuf,
    link: bool,
    link_index: bool,
) -> Result<(), PopmungeError> {
    let (changed, report) = output.into_parts();
    report.emit();
    if changed || !link {
        return Ok(());
    }
    link_unchanged(vcf, output_path)?;
    if link_index {
        let index = suffixed(vcf, ".csi");
        if index.exists() {
            link_unchanged(&index, suffixed(output_path, ".csi"))?;
        } else {
            debug!("no index '{}' to link", index.display());
        }
    }
    Ok(())
}

fn suffixed(path: &PathBuf, suffix: &str) -> PathBuf {
    let mut path = path.clone().into_os_string();
    path.push(suffix);
    PathBuf::from(path)
}

fn run() -> Result<(), PopmungeError> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    info!("popmunge v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Some(Commands::Fasta2bed { fasta, output }) => {
            fasta2bed(fasta, output.as_ref())?.report().emit();
        }
        Some(Commands::Reheader {
            vcf,
            output,
            no_link,
        }) => {
            let result = reheader_vcf(vcf, output)?;
            finish_vcf_command(result, vcf, output, !*no_link, false)?;
        }
        Some(Commands::FilterSingletons {
            vcf,
            output,
            singletons,
            name,
            no_link,
        }) => {
            let result = filter_singletons_vcf(vcf, output, singletons, name)?;
            finish_vcf_command(result, vcf, output, !*no_link, true)?;
        }
        Some(Commands::Het {
            piawka,
            pop,
            precision,
        }) => {
            if let Some(pop) = pop {
                debug!("ignoring population file '{}'", pop.display());
            }
            let config = TsvConfig::with_precision(*precision);
            let result = reduce_het(piawka, &config)?;
            result.report().emit();
            info!("wrote '{}'", result.value().display());
        }
        Some(Commands::PiDxyFst { piawka, precision }) => {
            let config = TsvConfig::with_precision(*precision);
            reduce_pi_dxy_fst(piawka, &config)?.report().emit();
        }
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

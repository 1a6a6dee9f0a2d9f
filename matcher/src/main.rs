use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cvmatch::{load_jobs, load_resumes, run_match, MatchOptions};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cvmatch")]
#[command(about = "Rank resumes against job postings by TF-IDF cosine similarity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every resume against every job posting
    Rank {
        /// Job postings file (JSON array/object or JSONL)
        #[arg(long)]
        jobs: PathBuf,
        /// Directory of plain-text resumes (*.txt)
        #[arg(long)]
        resumes: PathBuf,
        /// Number of resumes to keep per job
        #[arg(long, default_value_t = cvmatch_core::DEFAULT_TOP_N)]
        top_n: usize,
        /// Only use the first N job postings
        #[arg(long)]
        limit: Option<usize>,
        /// Write the JSON report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Use tf = 1 + ln(count) instead of raw counts
        #[arg(long, default_value_t = false)]
        sublinear_tf: bool,
        /// Use ln(N/df) + 1 instead of the smoothed IDF
        #[arg(long, default_value_t = false)]
        no_smooth_idf: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { jobs, resumes, top_n, limit, output, sublinear_tf, no_smooth_idf } => {
            let mut job_docs = load_jobs(&jobs)?;
            if let Some(n) = limit {
                job_docs.truncate(n);
            }
            let resume_docs = load_resumes(&resumes)?;
            let options = MatchOptions { top_n, sublinear_tf, smooth_idf: !no_smooth_idf };
            let report = run_match(&job_docs, &resume_docs, &options)?;

            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(File::create(path).with_context(|| format!("creating {}", path.display()))?),
                None => Box::new(io::stdout().lock()),
            };
            let mut writer = BufWriter::new(writer);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
            writer.flush()?;
            if let Some(path) = output {
                tracing::info!(output = %path.display(), "report written");
            }
            Ok(())
        }
    }
}

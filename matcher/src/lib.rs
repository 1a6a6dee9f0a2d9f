use anyhow::{bail, Context, Result};
use cvmatch_core::{EnglishAnalyzer, MatchPipeline, VectorizerConfig};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct InputJob {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "jobpost", alias = "body")]
    text: String,
}

/// A loaded document: where it came from plus its raw text.
#[derive(Debug, Clone)]
pub struct SourceDoc {
    pub source: String,
    pub text: String,
}

/// Read job postings from a JSON array, a single JSON object, or JSONL.
pub fn load_jobs(path: &Path) -> Result<Vec<SourceDoc>> {
    let mut out = Vec::new();
    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        for (line_no, line) in BufReader::new(f).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let job: InputJob = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}: invalid job posting", path.display(), line_no + 1))?;
            out.push(to_source_doc(job, out.len()));
        }
    } else {
        let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parsing {}", path.display()))?;
        match json {
            serde_json::Value::Array(arr) => {
                for v in arr {
                    let job: InputJob = serde_json::from_value(v)?;
                    out.push(to_source_doc(job, out.len()));
                }
            }
            serde_json::Value::Object(_) => {
                let job: InputJob = serde_json::from_value(json)?;
                out.push(to_source_doc(job, 0));
            }
            _ => bail!("{}: expected a JSON array or object of job postings", path.display()),
        }
    }
    tracing::info!(num_jobs = out.len(), path = %path.display(), "loaded job postings");
    Ok(out)
}

fn to_source_doc(job: InputJob, ordinal: usize) -> SourceDoc {
    SourceDoc { source: job.id.unwrap_or_else(|| format!("job-{ordinal}")), text: job.text }
}

/// Read every `.txt` file under `dir`, ordered by path.
pub fn load_resumes(dir: &Path) -> Result<Vec<SourceDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
            files.push(p.to_path_buf());
        }
    }
    files.sort();

    let mut out = Vec::with_capacity(files.len());
    for file in files {
        let text = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
        let source = file.strip_prefix(dir).unwrap_or(&file).display().to_string();
        out.push(SourceDoc { source, text });
    }
    tracing::info!(num_resumes = out.len(), dir = %dir.display(), "loaded resumes");
    Ok(out)
}

#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub top_n: usize,
    pub sublinear_tf: bool,
    pub smooth_idf: bool,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub num_jobs: usize,
    pub num_resumes: usize,
    pub vocabulary_size: usize,
    pub matches: Vec<JobReport>,
}

#[derive(Debug, Serialize)]
pub struct JobReport {
    pub job: String,
    pub job_source: String,
    pub resumes: Vec<ResumeHit>,
}

#[derive(Debug, Serialize)]
pub struct ResumeHit {
    pub index: usize,
    pub source: String,
    pub score: f32,
}

pub fn run_match(jobs: &[SourceDoc], resumes: &[SourceDoc], options: &MatchOptions) -> Result<Report> {
    let config = VectorizerConfig { sublinear_tf: options.sublinear_tf, smooth_idf: options.smooth_idf, ..Default::default() };
    let pipeline = MatchPipeline::new(EnglishAnalyzer, config, options.top_n);

    let job_texts: Vec<&str> = jobs.iter().map(|d| d.text.as_str()).collect();
    let resume_texts: Vec<&str> = resumes.iter().map(|d| d.text.as_str()).collect();
    let result = pipeline.run(&job_texts, &resume_texts)?;

    let matches = result
        .ranking
        .with_scores(&result.similarity)
        .into_iter()
        .zip(jobs)
        .map(|((job, hits), doc)| JobReport {
            job: job.label(),
            job_source: doc.source.clone(),
            resumes: hits
                .into_iter()
                .map(|h| ResumeHit { index: h.cv_index, source: resumes[h.cv_index].source.clone(), score: h.score })
                .collect(),
        })
        .collect();

    Ok(Report {
        generated_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
        num_jobs: jobs.len(),
        num_resumes: resumes.len(),
        vocabulary_size: result.vocabulary_size,
        matches,
    })
}

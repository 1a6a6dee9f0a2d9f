use cvmatch::{load_jobs, load_resumes, run_match, MatchOptions};
use std::fs;
use tempfile::tempdir;

fn options(top_n: usize) -> MatchOptions {
    MatchOptions { top_n, sublinear_tf: false, smooth_idf: true }
}

#[test]
fn ranks_resumes_from_disk() {
    let dir = tempdir().unwrap();
    let jobs_path = dir.path().join("jobs.jsonl");
    fs::write(
        &jobs_path,
        "{\"id\": \"be-1\", \"jobpost\": \"Senior backend engineer, Python\"}\n\n{\"text\": \"Frontend designer, Figma\"}\n",
    )
    .unwrap();
    let cv_dir = dir.path().join("resumes");
    fs::create_dir_all(cv_dir.join("nested")).unwrap();
    fs::write(cv_dir.join("a.txt"), "Backend engineer with Python experience").unwrap();
    fs::write(cv_dir.join("nested/b.txt"), "Frontend designer who loves Figma").unwrap();
    fs::write(cv_dir.join("ignored.docx"), "binary").unwrap();

    let jobs = load_jobs(&jobs_path).unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].source, "be-1");
    assert_eq!(jobs[1].source, "job-1");

    let resumes = load_resumes(&cv_dir).unwrap();
    assert_eq!(resumes.len(), 2);

    let report = run_match(&jobs, &resumes, &options(1)).unwrap();
    assert_eq!(report.num_jobs, 2);
    assert_eq!(report.matches[0].job, "Job_1");
    assert_eq!(report.matches[0].resumes.len(), 1);
    assert_eq!(report.matches[0].resumes[0].source, "a.txt");
    assert_eq!(report.matches[1].resumes[0].index, 1);
    assert!(report.matches[1].resumes[0].score > 0.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["matches"][1]["job"], "Job_2");
}

#[test]
fn json_array_jobs_and_empty_inputs() {
    let dir = tempdir().unwrap();
    let jobs_path = dir.path().join("jobs.json");
    fs::write(&jobs_path, "[{\"body\": \"Data analyst SQL\"}]").unwrap();
    let jobs = load_jobs(&jobs_path).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].text, "Data analyst SQL");

    let empty_dir = dir.path().join("none");
    fs::create_dir_all(&empty_dir).unwrap();
    let resumes = load_resumes(&empty_dir).unwrap();
    assert!(resumes.is_empty());
    assert!(run_match(&[], &resumes, &options(10)).is_err());
    assert!(run_match(&jobs, &resumes, &options(0)).is_err());
}

#[test]
fn scalar_json_jobs_file_is_rejected() {
    let dir = tempdir().unwrap();
    let jobs_path = dir.path().join("jobs.json");
    fs::write(&jobs_path, "\"just a string\"").unwrap();
    let err = load_jobs(&jobs_path).unwrap_err();
    assert!(err.to_string().contains("jobs.json"));
}

use resume_etl::{CliConfig, EtlEngine, LocalStorage, ResumePipeline};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};
use zip::write::{FileOptions, ZipWriter};

const JANE: &str = "Jane Doe
jane.doe@example.com | (555) 123-4567

Skills
Python, SQL, Docker

Experience
Acme Corp, Data Engineer  Jan 2018 - Jan 2020
Led a team of 5 engineers. Increased revenue by 20%.

Education
BS in Computer Science, State University 2016
";

fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!("<w:document><w:body>{}</w:body></w:document>", body);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file::<_, ()>("word/document.xml", FileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

fn seed_input(dir: &Path) {
    std::fs::write(dir.join("a_jane.txt"), JANE).unwrap();
    std::fs::write(dir.join("b_legacy.doc"), b"\xd0\xcf\x11\xe0 binary word file").unwrap();
    std::fs::write(
        dir.join("c_john.docx"),
        build_docx(&[
            "John Smith",
            "john.smith@example.org",
            "Experience",
            "Senior Analyst, Initech 2010 - 2015",
            "Managed a team of 4 analysts.",
        ]),
    )
    .unwrap();
}

fn config(input_dir: &Path, output_dir: &Path) -> CliConfig {
    CliConfig {
        input_dir: input_dir.to_str().unwrap().to_string(),
        extensions: vec![],
        output_path: output_dir.to_str().unwrap().to_string(),
        workers: 2,
        skills_file: None,
        formats: vec!["json".to_string(), "csv".to_string()],
        archive: false,
        verbose: false,
        monitor: false,
        log_json: false,
    }
}

#[tokio::test]
async fn test_end_to_end_batch_run() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    seed_input(input_dir.path());

    let storage = LocalStorage::new(output_dir.path());
    let pipeline =
        ResumePipeline::new(storage, config(input_dir.path(), output_dir.path())).unwrap();
    let engine = EtlEngine::new_with_monitoring(pipeline, false);

    let output = assert_ok!(engine.run().await);
    assert!(output.contains("resumes.json"));
    assert!(output.contains("resumes.csv"));

    let json = std::fs::read(output_dir.path().join("resumes.json")).unwrap();
    let batch: serde_json::Value = serde_json::from_slice(&json).unwrap();

    assert_eq!(batch["parsed"], 2);
    assert_eq!(batch["failed"], 1);

    let documents = batch["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 3);

    // Input order is kept regardless of which worker finished first.
    assert!(documents[0]["path"].as_str().unwrap().ends_with("a_jane.txt"));
    assert!(documents[1]["path"].as_str().unwrap().ends_with("b_legacy.doc"));
    assert!(documents[2]["path"].as_str().unwrap().ends_with("c_john.docx"));

    let jane = &documents[0];
    assert_eq!(jane["status"], "parsed");
    assert_eq!(jane["record"]["name"], "Jane Doe");
    assert_eq!(jane["record"]["mobile_number"], "5551234567");
    assert_eq!(jane["record"]["skills"], serde_json::json!(["Python", "Sql", "Docker"]));
    assert_eq!(jane["experience_months"], 24);

    let legacy = &documents[1];
    assert_eq!(legacy["status"], "failed");
    assert!(legacy["error"].as_str().unwrap().contains("doc"));
    assert!(legacy.get("record").is_none());

    let john = &documents[2];
    assert_eq!(john["status"], "parsed");
    assert_eq!(john["record"]["name"], "John Smith");
    assert_eq!(john["record"]["email"], "john.smith@example.org");
    assert_eq!(john["experience_months"], 60);

    let teamwork = john["record"]["competencies"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["category"] == "teamwork")
        .unwrap();
    assert_eq!(
        teamwork["sentences"],
        serde_json::json!(["Managed a team of 4 analysts."])
    );

    let csv = std::fs::read_to_string(output_dir.path().join("resumes.csv")).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][1], "parsed");
    assert_eq!(&rows[0][2], "Jane Doe");
    assert_eq!(&rows[1][1], "failed");
    assert_eq!(&rows[2][7], "60");
}

#[tokio::test]
async fn test_archive_output() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    seed_input(input_dir.path());

    let mut config = config(input_dir.path(), output_dir.path());
    config.archive = true;
    config.formats = vec!["json".to_string()];

    let pipeline = ResumePipeline::new(LocalStorage::new(output_dir.path()), config).unwrap();
    let output = assert_ok!(EtlEngine::new(pipeline).run().await);
    assert!(output.ends_with("resumes.zip"));
    assert!(!output_dir.path().join("resumes.json").exists());

    let data = std::fs::read(output_dir.path().join("resumes.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    assert_eq!(archive.len(), 1);

    let mut content = String::new();
    archive
        .by_name("resumes.json")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert!(content.contains("Jane Doe"));
}

#[tokio::test]
async fn test_extension_filter_and_custom_skills() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    seed_input(input_dir.path());

    let skills_path = input_dir.path().join("skills.csv");
    std::fs::write(&skills_path, "docker\nstate university\n").unwrap();

    let mut config = config(input_dir.path(), output_dir.path());
    config.extensions = vec!["txt".to_string()];
    config.skills_file = Some(skills_path.to_str().unwrap().to_string());

    let pipeline = ResumePipeline::new(LocalStorage::new(output_dir.path()), config).unwrap();
    assert_ok!(EtlEngine::new(pipeline).run().await);

    let json = std::fs::read(output_dir.path().join("resumes.json")).unwrap();
    let batch: serde_json::Value = serde_json::from_slice(&json).unwrap();

    assert_eq!(batch["documents"].as_array().unwrap().len(), 1);
    assert_eq!(batch["failed"], 0);
    assert_eq!(
        batch["documents"][0]["record"]["skills"],
        serde_json::json!(["Docker", "State university"])
    );
}

#[tokio::test]
async fn test_missing_input_directory_fails_run() {
    let output_dir = TempDir::new().unwrap();
    let missing = output_dir.path().join("nope");

    let pipeline = ResumePipeline::new(
        LocalStorage::new(output_dir.path()),
        config(&missing, output_dir.path()),
    )
    .unwrap();

    assert_err!(EtlEngine::new(pipeline).run().await);
}

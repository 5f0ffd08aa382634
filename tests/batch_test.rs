//! Batch conversion tests.

use std::path::PathBuf;

use folio::{Capabilities, Config, Error, Pipeline, convert_batch};
use tempfile::TempDir;

fn pipeline() -> Pipeline {
    Pipeline::with_capabilities(Config::default(), Capabilities::none())
}

#[test]
fn test_one_good_one_missing() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.txt");
    std::fs::write(&good, "1화\n본문").unwrap();
    let missing = dir.path().join("missing.txt");
    let out = dir.path().join("out");

    let report = convert_batch(&pipeline(), &[good.clone(), missing.clone()], &out);

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.items[0].input, good);
    assert_eq!(report.items[1].input, missing);
    assert!(matches!(report.items[1].result, Err(Error::NotFound(_))));
    assert!(out.join("good.epub").is_file());
}

#[test]
fn test_order_preserved() {
    let dir = TempDir::new().unwrap();
    let inputs: Vec<PathBuf> = (0..12)
        .map(|i| {
            let path = dir.path().join(format!("book{i:02}.txt"));
            std::fs::write(&path, format!("Chapter 1\n내용 {i}")).unwrap();
            path
        })
        .collect();
    let out = dir.path().join("out");

    let report = convert_batch(&pipeline(), &inputs, &out);

    assert_eq!(report.succeeded(), 12);
    let reported: Vec<_> = report.items.iter().map(|item| item.input.clone()).collect();
    assert_eq!(reported, inputs);
    for item in &report.items {
        let written = item.result.as_ref().unwrap();
        assert_eq!(written.extension().unwrap(), "epub");
        assert!(written.is_file());
    }
}

#[test]
fn test_failures_do_not_abort_batch() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("notes.xyz");
    std::fs::write(&bad, "x").unwrap();
    let blank = dir.path().join("blank.txt");
    std::fs::write(&blank, "   ").unwrap();
    let good = dir.path().join("good.md");
    std::fs::write(&good, "# 시작\n본문").unwrap();

    let report = convert_batch(&pipeline(), &[bad, blank, good], dir.path());

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.failures().count(), 2);
}

#[test]
fn test_shared_stems_keep_every_output() {
    let dir = TempDir::new().unwrap();
    let txt = dir.path().join("novel.txt");
    std::fs::write(&txt, "1화\n텍스트 원고").unwrap();
    let md = dir.path().join("novel.md");
    std::fs::write(&md, "# 1화\n마크다운 원고").unwrap();
    let nested = dir.path().join("drafts");
    std::fs::create_dir(&nested).unwrap();
    let draft = nested.join("novel.txt");
    std::fs::write(&draft, "1화\n초고").unwrap();
    let out = dir.path().join("out");

    let report = convert_batch(&pipeline(), &[txt, md, draft], &out);

    assert_eq!(report.succeeded(), 3);
    let written: Vec<PathBuf> = report
        .items
        .iter()
        .map(|item| item.result.as_ref().unwrap().clone())
        .collect();
    assert_eq!(
        written,
        [
            out.join("novel.epub"),
            out.join("novel-2.epub"),
            out.join("novel-3.epub"),
        ]
    );
    let mut on_disk: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    on_disk.sort();
    assert_eq!(on_disk, ["novel-2.epub", "novel-3.epub", "novel.epub"]);
}

//! 端到端的发布计划测试
//!
//! 模拟两次连续的 CI 运行：第二次运行读取第一次运行发布的评论，不应重复报告。

use prscan::alerts::{AlertQueue, MemoryAlertSink};
use prscan::config::AppConfig;
use prscan::types::{comment_key, ExistingComment, Issue, IssueLevel, ScanPass, ScanRun};
use prscan::ReportingEngine;

fn first_run() -> ScanRun {
    let json = r#"{
        "passes": [
            {"label": "7.3", "file": "file-8.php", "issues": [
                {"message": "syntax error, unexpected \";\"", "level": "ERROR", "severity": 5, "line": 3}
            ]},
            {"label": "7.4", "file": "file-8.php", "issues": [
                {"message": "syntax error, unexpected \";\"", "level": "ERROR", "severity": 5, "line": 3}
            ]},
            {"label": "8.0", "file": "file-8.php", "issues": [
                {"message": "syntax error, unexpected ';'", "level": "ERROR", "severity": 5, "line": 3}
            ]}
        ],
        "issues": {
            "file-8.php": [
                {"message": "Extension 'mysql_' is deprecated since PHP 5.5", "level": "ERROR", "severity": 7, "line": 10, "source": "PHPCompatibility"},
                {"message": "json_encode() is discouraged. Use wp_json_encode() instead.", "level": "WARNING", "severity": 6, "line": 12}
            ]
        },
        "skipped_files": ["vendor/huge.php"]
    }"#;
    ScanRun::from_json("first-run", json).unwrap()
}

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.review.ignore = vec!["JSON_ENCODE() is discouraged.".to_string()];
    config
}

/// Feeds a plan's output back as the platform state the next run sees.
fn posted_state(run: &mut ScanRun, plan: &prscan::ReportPlan) {
    for comment in &plan.comments {
        run.existing_comments
            .entry(comment_key(&comment.file, comment.line))
            .or_default()
            .push(ExistingComment::new(comment.body.clone()));
    }
    if let Some(body) = &plan.skipped_files_comment {
        run.pr_comment_bodies.push(body.clone());
    }
}

#[test]
fn test_second_run_posts_nothing_new() {
    let engine = ReportingEngine::from_config(&config()).unwrap();
    let mut run = first_run();

    let mut alerts = AlertQueue::new();
    let first = engine.plan(&run, &mut alerts);
    assert_eq!(first.comments.len(), 3);
    assert_eq!(first.stats.ignored, 1);
    assert!(first.skipped_files_comment.is_some());

    posted_state(&mut run, &first);

    let second = engine.plan(&run, &mut alerts);
    assert!(second.is_empty(), "unexpected plan: {second:?}");
    assert_eq!(second.stats.already_reported, 3);
    assert_eq!(second.skipped_files.files(), vec!["vendor/huge.php"]);

    let mut sink = MemoryAlertSink::default();
    alerts.flush_to(&mut sink).unwrap();
    assert_eq!(
        sink.sent,
        vec![
            "Skipped 1 file(s) due to their length: vendor/huge.php".to_string(),
            "Posting 3 new review comment(s)".to_string(),
        ]
    );
}

#[test]
fn test_new_finding_on_reported_line_still_posted() {
    let engine = ReportingEngine::from_config(&config()).unwrap();
    let mut run = first_run();
    let first = engine.plan(&run, &mut AlertQueue::new());
    posted_state(&mut run, &first);

    run.issues
        .get_mut("file-8.php")
        .unwrap()
        .push(Issue::new("Unescaped output", IssueLevel::Error, 8, 10));

    let second = engine.plan(&run, &mut AlertQueue::new());
    assert_eq!(second.comments.len(), 1);
    assert_eq!(second.comments[0].line, 10);
    assert_eq!(second.comments[0].body, ":no_entry_sign: **Error**: Unescaped output");
}

#[test]
fn test_version_split_rendered_in_comments() {
    let engine = ReportingEngine::from_config(&AppConfig::default()).unwrap();
    let plan = engine.plan(&first_run(), &mut AlertQueue::new());

    let line3: Vec<&str> = plan
        .comments
        .iter()
        .filter(|c| c.line == 3)
        .map(|c| c.body.as_str())
        .collect();
    assert_eq!(
        line3,
        vec![
            ":no_entry_sign: **Error**: Issue PHP linting with 7.3, 7.4 turned up: <code>syntax error, unexpected &quot;;&quot;</code>",
            ":no_entry_sign: **Error**: Issue PHP linting with 8.0 turned up: <code>syntax error, unexpected &#39;;&#39;</code>",
        ]
    );
}

#[test]
fn test_plan_serializes_to_json() {
    let engine = ReportingEngine::from_config(&config()).unwrap();
    let plan = engine.plan(&first_run(), &mut AlertQueue::new());
    let value = serde_json::to_value(&plan).unwrap();
    assert_eq!(value["stats"]["to_post"], 3);
    assert_eq!(value["comments"][0]["file"], "file-8.php");
    assert_eq!(value["skipped_files"]["issues"]["max-lines"][0], "vendor/huge.php");
}

#[test]
fn test_passes_on_other_files_do_not_mix() {
    let mut run = ScanRun::default();
    for (label, file) in [("7.4", "a.php"), ("8.0", "b.php")] {
        run.passes.push(ScanPass {
            label: label.to_string(),
            file: file.to_string(),
            issues: vec![Issue::new("same", IssueLevel::Warning, 3, 1)],
        });
    }
    let engine = ReportingEngine::from_config(&AppConfig::default()).unwrap();
    let plan = engine.plan(&run, &mut AlertQueue::new());
    assert_eq!(plan.comments.len(), 2);
    assert!(plan.comments[0].body.contains("with 7.4 turned up"));
    assert!(plan.comments[1].body.contains("with 8.0 turned up"));
}

// tests/bump_test.rs
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serial_test::serial;
use tempfile::TempDir;
use weavegitops_tooling::bump::{execute, run, run_with, BumpStatus};
use weavegitops_tooling::config::{ReleaseConfig, Settings, CI_OUTPUT_ENV};
use weavegitops_tooling::targets::{default_targets, RewritePlan};
use weavegitops_tooling::{BumpKind, ReleaseError};

const CHART_DIR: &str = "charts/gitops-server";

/// A scratch project with Chart.yaml, values.yaml and package.json.
struct Project {
    dir: TempDir,
}

impl Project {
    fn new(chart: &str, values: Option<&str>, package: Option<&str>) -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let chart_dir = dir.path().join(CHART_DIR);
        fs::create_dir_all(&chart_dir).unwrap();
        fs::write(chart_dir.join("Chart.yaml"), chart).unwrap();
        if let Some(values) = values {
            fs::write(chart_dir.join("values.yaml"), values).unwrap();
        }
        if let Some(package) = package {
            fs::write(dir.path().join("package.json"), package).unwrap();
        }
        Project { dir }
    }

    /// Every file pinned at the same version.
    fn synced(version: &str) -> Self {
        Project::new(
            &format!("version: {version}\nappVersion: \"v{version}\"\n"),
            Some(&format!("image:\n  tag: \"v{version}\"\n")),
            Some(&format!("{{\"version\": \"{version}\"}}\n")),
        )
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).unwrap()
    }

    fn chart(&self) -> String {
        self.read("charts/gitops-server/Chart.yaml")
    }

    fn values(&self) -> String {
        self.read("charts/gitops-server/values.yaml")
    }

    fn package(&self) -> String {
        self.read("package.json")
    }
}

fn settings_with_output(path: &Path) -> Settings {
    Settings {
        ci_output: Some(path.to_path_buf()),
        ..Settings::default()
    }
}

#[test]
fn test_patch_updates_chart_values_package() {
    let project = Project::synced("0.39.0");

    let code = run_with(project.root(), "patch", &Settings::default());

    assert_eq!(code, 0);
    assert_eq!(project.chart(), "version: 0.39.1\nappVersion: \"v0.39.1\"\n");
    assert_eq!(project.values(), "image:\n  tag: \"v0.39.1\"\n");
    assert_eq!(project.package(), "{\"version\": \"0.39.1\"}\n");
}

#[test]
fn test_report_lists_updated_files_in_order() {
    let project = Project::synced("0.39.0");

    let report = execute(project.root(), BumpKind::Patch, &Settings::default()).unwrap();

    assert_eq!(report.status(), BumpStatus::Updated);
    assert_eq!(report.old_base, "0.39.0");
    assert_eq!(report.new_version, "0.39.1");
    assert_eq!(
        report.updated,
        vec![
            PathBuf::from("charts/gitops-server/Chart.yaml"),
            PathBuf::from("charts/gitops-server/values.yaml"),
            PathBuf::from("package.json"),
        ]
    );
    assert!(report.skipped.is_empty());
}

#[test]
fn test_rc_bump_from_rc_updates_all_files() {
    let project = Project::new(
        "version: 0.39.0-rc.2 # x\nappVersion: \"v0.39.0-rc.2\"\n",
        Some("image:\n  tag: \"v0.39.0-rc.2\"\n"),
        Some("{\"version\": \"0.39.0-rc.2\"}\n"),
    );

    let code = run_with(project.root(), "rc", &Settings::default());

    assert_eq!(code, 0);
    assert_eq!(
        project.chart(),
        "version: 0.39.0-rc.3 # x\nappVersion: \"v0.39.0-rc.3\"\n"
    );
    assert_eq!(project.values(), "image:\n  tag: \"v0.39.0-rc.3\"\n");
    assert_eq!(project.package(), "{\"version\": \"0.39.0-rc.3\"}\n");
}

#[test]
fn test_rc_bump_from_clean_produces_rc1() {
    let project = Project::synced("0.39.0");

    assert_eq!(run_with(project.root(), "rc", &Settings::default()), 0);

    assert!(project.chart().contains("version: 0.39.0-rc.1"));
    assert!(project.values().contains("tag: \"v0.39.0-rc.1\""));
}

#[test]
fn test_minor_rc_from_rc_produces_next_minor_rc1() {
    let project = Project::new(
        "version: 0.39.0-rc.2 # x\nappVersion: \"v0.39.0-rc.2\"\n",
        Some("image:\n  tag: \"v0.39.0-rc.2\"\n"),
        Some("{\"version\": \"0.39.0-rc.2\"}\n"),
    );

    assert_eq!(run_with(project.root(), "minor-rc", &Settings::default()), 0);

    assert_eq!(
        project.chart(),
        "version: 0.40.0-rc.1 # x\nappVersion: \"v0.40.0-rc.1\"\n"
    );
    assert_eq!(project.values(), "image:\n  tag: \"v0.40.0-rc.1\"\n");
    assert_eq!(project.package(), "{\"version\": \"0.40.0-rc.1\"}\n");
}

#[test]
fn test_minor_drops_rc_suffix() {
    let project = Project::new(
        "version: 0.39.0-rc.2 # x-release-please\nappVersion: \"v0.39.0-rc.2\" # x\n",
        None,
        None,
    );

    assert_eq!(run_with(project.root(), "minor", &Settings::default()), 0);

    assert_eq!(
        project.chart(),
        "version: 0.40.0 # x-release-please\nappVersion: \"v0.40.0\" # x\n"
    );
}

#[test]
fn test_fails_without_chart() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{\"version\": \"0.39.0\"}\n").unwrap();
    let output = dir.path().join("github_output.txt");

    let code = run_with(dir.path(), "patch", &settings_with_output(&output));

    assert_eq!(code, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        "{\"version\": \"0.39.0\"}\n"
    );
    assert!(!output.exists());
}

#[test]
fn test_out_of_sync_targets_are_skipped() {
    let chart = "version: 0.50.0\nappVersion: \"v0.50.0\"\n";
    let project = Project::new(
        chart,
        Some("image:\n  tag: \"v0.39.0\"\n"),
        Some("{\"version\": \"0.39.0\"}\n"),
    );

    // The chart says 0.50.0, so only files holding 0.50.0 can match.
    let report = execute(project.root(), BumpKind::Patch, &Settings::default()).unwrap();

    assert_eq!(report.new_version, "0.50.1");
    assert_eq!(report.updated, vec![PathBuf::from("charts/gitops-server/Chart.yaml")]);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(project.values(), "image:\n  tag: \"v0.39.0\"\n");
}

#[test]
fn test_stale_old_value_matches_no_target() {
    let project = Project::synced("0.50.0");
    let before = (project.chart(), project.values(), project.package());

    for target in default_targets(&ReleaseConfig::default()) {
        let plan = target.plan(project.root(), "0.39.0", "0.40.0").unwrap();
        assert_eq!(plan, RewritePlan::Unchanged, "{}", target.path.display());
    }

    assert_eq!((project.chart(), project.values(), project.package()), before);
}

#[test]
fn test_unreadable_target_aborts_before_any_write() {
    let project = Project::synced("0.39.0");
    fs::write(project.root().join("package.json"), b"{\"version\": \"0.39.0\"}\xff\n").unwrap();
    let before = (project.chart(), project.values());
    let output = project.root().join("github_output.txt");

    let err =
        execute(project.root(), BumpKind::Patch, &settings_with_output(&output)).unwrap_err();

    match err {
        ReleaseError::TargetRead { path, .. } => assert_eq!(path, PathBuf::from("package.json")),
        other => panic!("expected TargetRead, got {:?}", other),
    }
    assert_eq!((project.chart(), project.values()), before);
    assert!(!output.exists());
}

#[test]
fn test_unreadable_target_exits_one() {
    let project = Project::synced("0.39.0");
    fs::write(project.root().join("package.json"), b"\xff\xfe").unwrap();

    assert_eq!(run_with(project.root(), "minor", &Settings::default()), 1);
    assert_eq!(project.chart(), "version: 0.39.0\nappVersion: \"v0.39.0\"\n");
}

#[test]
fn test_nothing_matched_exits_one() {
    // Parseable version line, but a declaration the rewrite rules refuse.
    let chart = "version: 0.39.0 trailing\n";
    let project = Project::new(chart, Some("image:\n  tag: \"v0.38.0\"\n"), None);
    let output = project.root().join("github_output.txt");

    let code = run_with(project.root(), "patch", &settings_with_output(&output));

    assert_eq!(code, 1);
    assert_eq!(project.chart(), chart);
    assert_eq!(project.values(), "image:\n  tag: \"v0.38.0\"\n");
    assert!(!output.exists());
}

#[test]
fn test_invalid_version_is_fatal() {
    let project = Project::new("version: 1.2\n", None, None);
    let err = execute(project.root(), BumpKind::Patch, &Settings::default()).unwrap_err();
    assert!(matches!(err, ReleaseError::NoVersionLine(_)));
    assert_eq!(project.chart(), "version: 1.2\n");
}

#[test]
fn test_unknown_bump_is_fatal() {
    let project = Project::synced("0.39.0");
    assert_eq!(run_with(project.root(), "foo", &Settings::default()), 1);
    assert_eq!(project.package(), "{\"version\": \"0.39.0\"}\n");
}

#[test]
fn test_appends_ci_output_and_preserves_content() {
    let project = Project::synced("0.39.0");
    let output = project.root().join("github_output.txt");
    fs::write(&output, "previous=1\n").unwrap();

    let code = run_with(project.root(), "patch", &settings_with_output(&output));

    assert_eq!(code, 0);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "previous=1\nversion=0.39.1\n"
    );
}

#[test]
#[serial]
fn test_run_reads_ci_output_from_env() {
    let project = Project::new(
        "version: 0.39.0-rc.2\nappVersion: \"v0.39.0-rc.2\"\n",
        Some("image:\n  tag: \"v0.39.0-rc.2\"\n"),
        Some("{\"version\": \"0.39.0-rc.2\"}\n"),
    );
    let output = project.root().join("github_output.txt");

    let code = temp_env::with_var(CI_OUTPUT_ENV, Some(&output), || run(project.root(), "rc"));

    assert_eq!(code, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "version=0.39.0-rc.3\n");
}

#[test]
#[serial]
fn test_run_without_ci_output_env() {
    let project = Project::synced("1.2.3");

    let code = temp_env::with_var_unset(CI_OUTPUT_ENV, || run(project.root(), "major"));

    assert_eq!(code, 0);
    assert!(project.chart().contains("version: 2.0.0"));
    assert!(!project.root().join("github_output.txt").exists());
}

#[test]
#[serial]
fn test_run_honours_project_config() {
    let dir = TempDir::new().unwrap();
    let chart_dir = dir.path().join("charts/enterprise");
    fs::create_dir_all(&chart_dir).unwrap();
    fs::write(chart_dir.join("Chart.yaml"), "version: 1.0.0\n").unwrap();
    fs::write(
        dir.path().join("weavegitops.toml"),
        "[release]\nchart = \"enterprise\"\n",
    )
    .unwrap();

    let code = temp_env::with_var_unset(CI_OUTPUT_ENV, || run(dir.path(), "patch"));

    assert_eq!(code, 0);
    assert_eq!(
        fs::read_to_string(chart_dir.join("Chart.yaml")).unwrap(),
        "version: 1.0.1\n"
    );
}

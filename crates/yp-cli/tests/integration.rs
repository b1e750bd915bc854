#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SECRET_VARS: &[&str] = &[
    "ANTHROPIC_API_KEY",
    "GEMINI_API_KEY",
    "PERPLEXITY_API_KEY",
    "WHATSAPP_API_TOKEN",
    "WHATSAPP_PHONE_NUMBER_ID",
    "TOM_PHONE_MIKE",
    "TOM_PHONE_JAMES",
    "TOM_PHONE_ADAM",
    "TOM_PHONE_ANNIE",
    "CONVEX_URL",
];

fn yp(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("yp").unwrap();
    cmd.current_dir(dir.path()).env("YP_ROOT", dir.path());
    for var in SECRET_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_gaps(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("gaps.json");
    std::fs::write(&path, json).unwrap();
    path
}

const GAPS: &str = r#"{
  "gaps": [
    { "keyword": "silent basketball", "volume": 1000, "difficulty": 40, "intent": "informational",
      "cluster": "silent-basketball", "sport": "basketball", "source": "semrush" },
    { "keyword": "silent dribbling ball", "volume": 300, "difficulty": 20, "intent": "commercial",
      "cluster": "silent-basketball", "sport": "basketball", "source": "semrush" },
    { "keyword": "how to improve ball handling", "volume": 800, "difficulty": 35, "intent": "informational",
      "cluster": "ball-handling", "sport": "basketball", "source": "semrush" }
  ]
}"#;

// ---------------------------------------------------------------------------
// yp seo
// ---------------------------------------------------------------------------

#[test]
fn seo_seed_writes_sorted_tasks() {
    let dir = TempDir::new().unwrap();
    let gaps = write_gaps(&dir, GAPS);
    let out = dir.path().join("out/tasks.json");

    yp(&dir)
        .args(["seo", "seed", "--gaps"])
        .arg(&gaps)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tasks written to"));

    let tasks: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();

    // Absorbed keyword never becomes a task.
    assert!(tasks
        .iter()
        .all(|t| t["payload"]["keyword"] != "silent dribbling ball"));

    let first_spoke = tasks
        .iter()
        .find(|t| t["payload"]["type"] != "pillar")
        .unwrap();
    assert_eq!(first_spoke["payload"]["keyword"], "silent basketball");
    assert!(first_spoke["taskId"]
        .as_str()
        .unwrap()
        .starts_with("opp_silent_basketball_"));
    assert_eq!(first_spoke["priority"], 2);

    let qa = tasks
        .iter()
        .find(|t| t["payload"]["keyword"] == "how to improve ball handling")
        .unwrap();
    assert_eq!(qa["payload"]["type"], "qa");
}

#[test]
fn seo_seed_json_reports_summary() {
    let dir = TempDir::new().unwrap();
    let gaps = write_gaps(&dir, GAPS);

    let output = yp(&dir)
        .args(["--json", "seo", "seed", "--gaps"])
        .arg(&gaps)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["by_type"]["qa"], 1);
    // The silent-basketball pillar counts too.
    assert_eq!(report["summary"]["silent_basketball"], 2);
    assert!(report.get("upload").is_none());
    // Default output path hangs off the root.
    assert!(dir
        .path()
        .join("tools/machine-sprint/output/seo-tasks.json")
        .exists());
}

#[test]
fn seo_seed_missing_gap_file_fails() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["seo", "seed", "--gaps", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load gaps"));
}

#[test]
fn seo_seed_upload_needs_url() {
    let dir = TempDir::new().unwrap();
    let gaps = write_gaps(&dir, GAPS);
    yp(&dir)
        .args(["seo", "seed", "--upload", "--gaps"])
        .arg(&gaps)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONVEX_URL"));
}

#[test]
fn seo_seed_strict_tables_rejects_unknown_cluster() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".yp")).unwrap();
    std::fs::write(dir.path().join(".yp/config.yaml"), "seo:\n  strict_tables: true\n").unwrap();
    let gaps = write_gaps(
        &dir,
        r#"{ "gaps": [ { "keyword": "pickleball", "volume": 10, "difficulty": 1,
             "intent": "informational", "cluster": "racquet", "sport": "pickleball", "source": "x" } ] }"#,
    );

    yp(&dir)
        .args(["seo", "seed", "--gaps"])
        .arg(&gaps)
        .assert()
        .failure()
        .stderr(predicate::str::contains("racquet"));
}

#[test]
fn seo_score_primary_silent_basketball() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args([
            "seo",
            "score",
            "--keyword",
            "silent basketball",
            "--volume",
            "1000",
            "--difficulty",
            "40",
            "--intent",
            "informational",
            "--cluster",
            "silent-basketball",
            "--primary",
        ])
        .assert()
        .success()
        .stdout("1800\n");
}

#[test]
fn seo_score_warns_on_unknown_cluster() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args([
            "seo", "score", "--keyword", "x", "--volume", "100", "--difficulty", "0", "--cluster",
            "mystery",
        ])
        .assert()
        .success()
        .stdout("100\n")
        .stderr(predicate::str::contains("unknown cluster 'mystery'"));
}

#[test]
fn seo_validate_lists_table_misses() {
    let dir = TempDir::new().unwrap();
    write_gaps(
        &dir,
        r#"{ "gaps": [ { "keyword": "pickleball", "volume": 10, "difficulty": 1,
             "intent": "curious", "cluster": "shooting", "sport": "pickleball", "source": "x" } ] }"#,
    );
    yp(&dir)
        .args(["seo", "validate", "--gaps", "gaps.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown intent 'curious'"));
}

// ---------------------------------------------------------------------------
// yp tom
// ---------------------------------------------------------------------------

#[test]
fn tom_mode_prefers_technical() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["tom", "mode", "launch", "the", "build"])
        .assert()
        .success()
        .stdout("jarvis\n");
}

#[test]
fn tom_classify_fast_path() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["--json", "tom", "classify", "sketch a foam ball"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PRODUCT_VISUALIZATION\""));
}

#[test]
fn tom_classify_smart_without_key_falls_back() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["tom", "classify", "--user", "mike", "hey", "tom"])
        .assert()
        .success()
        .stdout("GENERAL_CHAT (0.50)\n");
}

#[test]
fn tom_prompt_names_user() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["tom", "prompt", "--user", "annie", "thanks", "for", "the", "help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CURRENT USER: ANNIE"));
}

#[test]
fn tom_route_disallowed_intent_is_not_routed() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["tom", "route", "--user", "mike", "can you search trends for NBA"])
        .assert()
        .success()
        .stdout("not routed (conversational reply)\n");
}

#[test]
fn tom_route_without_phone_reports_error_outcome() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["--json", "tom", "route", "--user", "adam", "what's trending in youth hoops"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tool\": \"TREND_SEARCH\""))
        .stdout(predicate::str::contains("\"type\": \"error\""));
}

// ---------------------------------------------------------------------------
// yp voice
// ---------------------------------------------------------------------------

#[test]
fn voice_list_shows_profiles() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["voice", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JAMES"))
        .stdout(predicate::str::contains("ADAM_COS"));
}

#[test]
fn voice_lint_fails_on_violations() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["voice", "lint", "--profile", "JAMES"])
        .write_stdin("This is totally amazing!!!!")
        .assert()
        .failure()
        .stdout(predicate::str::contains("amazing"))
        .stderr(predicate::str::contains("voice violation"));
}

#[test]
fn voice_lint_passes_clean_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("draft.md");
    std::fs::write(&file, "Start barefoot, then layer load.").unwrap();
    yp(&dir)
        .args(["voice", "lint", "--profile", "JAMES"])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn voice_fix_replaces_terms() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["voice", "fix", "--profile", "JAMES"])
        .write_stdin("Maybe try this Exercise in new shoes")
        .assert()
        .success()
        .stdout("try this drill in new footwear");
}

#[test]
fn voice_unknown_profile_fails() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["voice", "prompt", "--profile", "NOBODY", "--content-type", "spoke"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// yp config
// ---------------------------------------------------------------------------

#[test]
fn config_init_then_validate() {
    let dir = TempDir::new().unwrap();
    yp(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join(".yp/config.yaml").exists());
    yp(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_fails_on_errors() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".yp")).unwrap();
    std::fs::write(
        dir.path().join(".yp/config.yaml"),
        "tom:\n  request_timeout_secs: 0\n",
    )
    .unwrap();
    yp(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("request_timeout_secs"));
}

#[test]
fn config_show_json_has_defaults() {
    let dir = TempDir::new().unwrap();
    yp(&dir)
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"route_confidence_threshold\": 0.6"));
}

use anyhow::Result;
use diagram_check::core::report::{render_json, render_text};
use diagram_check::{
    CheckEngine, CheckKind, DiagramError, JsonFileSource, SuiteProvider, TomlConfig, ViewMode,
};
use std::path::Path;
use tempfile::TempDir;

fn demos_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos"))
}

#[tokio::test]
async fn test_demo_suite_runs_end_to_end() -> Result<()> {
    let suite_path = demos_dir().join("control_loop.toml");
    let config = TomlConfig::from_file(&suite_path)?;

    let source = JsonFileSource::relative_to(demos_dir(), config.model_path(), config.blocks_path());
    let engine = CheckEngine::from_source(&source, config.inline_blocks(), config.options())?;
    let report = engine.run().await;

    let checks: Vec<String> = report.verdicts.iter().map(|v| v.check.to_string()).collect();
    assert_eq!(
        checks,
        vec![
            "closed-loop",
            "duplicate-destination",
            "wire-types",
            "signature[Dynamics/effective]",
            "signature[ClosedSystem/effective]",
            "signature[ObservedSystem/effective]",
        ]
    );

    let failed: Vec<&CheckKind> = report.failures().map(|v| &v.check).collect();
    assert_eq!(
        failed,
        vec![&CheckKind::Signature {
            block: "ObservedSystem".to_string(),
            mode: ViewMode::Effective,
        }]
    );

    let text = render_text(&report);
    assert!(text.contains("[PASS] closed-loop"));
    assert!(text.contains("[FAIL] signature[ObservedSystem/effective]"));

    Ok(())
}

#[tokio::test]
async fn test_suite_in_temp_dir_with_inline_blocks() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("plant.json"),
        include_str!("../demos/dynamics.json"),
    )?;
    std::fs::write(
        temp_dir.path().join("suite.toml"),
        r#"
[suite]
name = "plant"
model = "plant.json"

[checks]
closed_loop = false

[matching]
mode = "basic"

[[blocks]]
ID = "Actuated"
Domain = ["U"]
Codomain = ["X"]

[[blocks]]
ID = "F"
Domain = ["Z"]
"#,
    )?;

    let config = TomlConfig::from_file(temp_dir.path().join("suite.toml"))?;
    let source = JsonFileSource::relative_to(temp_dir.path(), config.model_path(), None);
    let engine = CheckEngine::from_source(&source, config.inline_blocks(), config.options())?;

    let report = engine.run().await;

    assert!(report.all_passed());
    assert_eq!(report.verdicts.len(), 4);
    assert_eq!(report.basic.input_tags(), vec!["U"]);

    let json: serde_json::Value = serde_json::from_str(&render_json(&report)?)?;
    assert_eq!(json["model"]["processors"], 1);
    assert_eq!(json["verdicts"][2]["block"], "Actuated");
    assert_eq!(json["verdicts"][2]["mode"], "basic");

    Ok(())
}

#[test]
fn test_malformed_model_is_rejected_before_checks() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("broken.json"),
        r#"{"processors": [{"ID": "f", "Parent": "F", "Name": "Plant", "Ports": ["X"]}], "wires": []}"#,
    )?;

    let source = JsonFileSource::new(temp_dir.path().join("broken.json"), None);
    let result = CheckEngine::from_source(&source, &[], Default::default());

    assert!(matches!(result, Err(DiagramError::SerializationError(_))));
    Ok(())
}

#[tokio::test]
async fn test_shared_model_across_runs_is_stable() -> Result<()> {
    let source = JsonFileSource::new(demos_dir().join("dynamics.json"), None);
    let engine = CheckEngine::from_source(&source, &[], Default::default())?;

    let first = engine.run().await;
    let second = engine.run().await;

    assert_eq!(first.verdicts, second.verdicts);
    assert_eq!(first.effective, second.effective);
    assert_eq!(engine.model().processors().len(), 1);
    Ok(())
}

use mathseek_core::{SolveEnvelope, render_outcome};
use std::fs;
use std::path::Path;

#[test]
fn run_golden_tests() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    if !fixtures_dir.exists() {
        return;
    }

    let mut checked = 0;
    for entry in fs::read_dir(&fixtures_dir).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        if !name.ends_with(".json") || name.ends_with(".golden.json") {
            continue;
        }

        let raw = fs::read_to_string(&path).expect("Failed to read fixture");
        let envelope = SolveEnvelope::from_json(&raw).expect("Fixture is not an envelope");
        let tree = render_outcome(&envelope.outcome());
        let json_output = serde_json::to_string_pretty(&tree).expect("Failed to serialize tree");

        let golden_path = path.with_extension("golden.json");

        if std::env::var("UPDATE_GOLDEN").is_ok() {
            fs::write(&golden_path, &json_output).expect("Failed to update golden file");
        } else {
            let expected = fs::read_to_string(&golden_path)
                .expect("Failed to read golden file (run with UPDATE_GOLDEN=1 to create)");
            let expected: serde_json::Value =
                serde_json::from_str(&expected).expect("Golden file is not JSON");
            assert_eq!(
                serde_json::to_value(&tree).unwrap(),
                expected,
                "Golden test failed for {:?}",
                path
            );
        }
        checked += 1;
    }
    assert!(checked > 0, "No fixtures found in {:?}", fixtures_dir);
}

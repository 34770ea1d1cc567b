//! Viewer sessions driven through the terminal renderer.

use cedar_viewer::loader::{read_entities, read_schema, SampleData};
use cedar_viewer::{OutputFormat, TerminalRenderer};
use serde_json::Value;
use std::fs;
use viewer_projection::{project, AppState, Projection, View, Viewer};

fn json_viewer() -> Viewer<TerminalRenderer<Vec<u8>>> {
    let renderer = TerminalRenderer::new(OutputFormat::Json, Vec::new());
    Viewer::new(renderer)
}

/// Every JSON document the renderer wrote, in order.
fn documents(viewer: &Viewer<TerminalRenderer<Vec<u8>>>) -> Vec<Value> {
    serde_json::Deserializer::from_slice(viewer.renderer().get_ref())
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn sample_overview_counts() {
    let mut state = AppState::new();
    SampleData::bundled().unwrap().apply(&mut state);

    match project(&state).body {
        Projection::Overview(overview) => {
            assert_eq!(overview.total_entities, 13);
            assert_eq!(overview.total_types, 8);
            assert_eq!(overview.action_count, Some(5));
            assert_eq!(overview.per_type[0].entity_type, "HealthCareApp::Clinic");
        }
        other => panic!("expected overview, got {}", other.kind()),
    }
}

#[test]
fn sample_hierarchy_contains_cycle_marker() {
    let mut state = AppState::new().with_view(View::Hierarchy);
    SampleData::bundled().unwrap().apply(&mut state);

    let frame = project(&state);
    let Projection::Hierarchy(tree) = frame.body else {
        panic!("expected hierarchy");
    };
    let root_keys: Vec<&str> = tree.roots.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(
        root_keys,
        vec!["HealthCareApp::Clinic::northside", "HealthCareApp::Role::doctor", "HealthCareApp::Role::nurse"]
    );

    // The InfoType pair only reference each other, so it has no root.
    assert!(!tree.roots.iter().any(|r| r.key.contains("InfoType")));

    // Entities with several parents appear under each of them.
    let doctor = &tree.roots[1];
    assert_eq!(doctor.children[0].label, "HealthCareApp::User::dr-adams");

    let clinic = &tree.roots[0];
    let cardiology = &clinic.children[0];
    assert_eq!(cardiology.label, "HealthCareApp::Department::cardiology");
    let labels: Vec<&str> = cardiology.children.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["HealthCareApp::User::dr-adams", "HealthCareApp::Patient::p-1001"]
    );
}

#[test]
fn session_renders_json_frames_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.json");
    fs::write(
        &schema_path,
        r#"{"Docs": {"entityTypes": {"Folder": {}, "File": {"memberOfTypes": ["Folder"]}},
                     "actions": {"read": {"appliesTo": {"principalTypes": ["User"], "resourceTypes": ["File"]}}}}}"#,
    )
    .unwrap();
    let entities_path = dir.path().join("entities.json");
    fs::write(
        &entities_path,
        r#"[{"uid": {"type": "Docs::Folder", "id": "root"}},
            {"uid": {"type": "Docs::File", "id": "a.txt"}, "parents": [{"type": "Docs::Folder", "id": "root"}]}]"#,
    )
    .unwrap();

    let mut viewer = json_viewer();
    let schema = fs::read_to_string(&schema_path).unwrap();
    viewer.load_schema_file("schema.json", &schema).unwrap();
    viewer
        .load_entities(&fs::read_to_string(&entities_path).unwrap())
        .unwrap();
    assert!(viewer.load_entities("[1]").is_err());
    viewer.set_show_namespace_prefix(false);
    viewer.switch_view(View::Schema);

    let docs = documents(&viewer);
    assert_eq!(docs.len(), 5);
    assert_eq!(docs[0]["body"]["projection"], "overview");
    assert_eq!(docs[2]["code"], "NOT_A_RECORD");
    assert_eq!(docs[4]["namespace_toggle"], true);
    assert_eq!(docs[4]["body"]["format"], "structured");
    assert_eq!(docs[4]["body"]["actions"][0]["label"], "\"read\"");
    assert_eq!(docs[4]["body"]["entity_types"][1]["parents"][0], "Folder");

    // The rejected upload did not touch the dataset.
    assert_eq!(viewer.state().entities().len(), 2);
}

#[test]
fn file_loaders_match_upload_paths() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = dir.path().join("schema.cedarschema");
    fs::write(&schema_path, "entity Team;\nentity Person in [Team];").unwrap();
    let entities_path = dir.path().join("people.json");
    fs::write(
        &entities_path,
        r#"[{"uid": {"__entity": {"type": "Person", "id": "p"}}, "attrs": {"team": {"__entity": {"type": "Team", "id": "t"}}}}]"#,
    )
    .unwrap();

    let schema = read_schema(&schema_path).unwrap();
    let entities = read_entities(&entities_path).unwrap();

    let mut state = AppState::new();
    state.replace_schema(schema);
    state.replace_entities(entities);
    state.jump_to_entity_type("Person");

    match project(&state).body {
        Projection::TypeDetail(detail) => {
            assert_eq!(detail.cards[0].attributes[0].value, "🔗 Team::t");
            assert!(!project(&state).namespace_toggle);
        }
        other => panic!("expected type detail, got {}", other.kind()),
    }
}

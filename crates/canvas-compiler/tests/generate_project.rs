use std::fs;
use std::path::Path;

use canvas_compiler::{ArtifactKind, Compiler, CompilerConfig, CompilerError, ProjectFile, Warning};
use tempfile::TempDir;

const SIGNUP_PROJECT: &str = r#"{
  "name": "Signup Demo",
  "components": [
    {
      "id": "button-1",
      "type": "button",
      "position": { "x": 10, "y": 20 },
      "size": { "width": 100, "height": 40 },
      "properties": { "text": "Sign up", "backgroundColor": "green-500" }
    },
    {
      "id": "text-1",
      "type": "text",
      "position": { "x": 0, "y": 0 },
      "size": { "width": 120, "height": 40 },
      "properties": {}
    }
  ],
  "logicBlocks": [
    {
      "id": "input-1",
      "type": "input",
      "position": { "x": 0, "y": 0 },
      "data": { "label": "Input", "method": "post", "path": "/signup" },
      "connections": ["auth-1", "db-1"]
    },
    { "id": "auth-1", "type": "auth", "data": { "label": "Auth" }, "connections": [] },
    {
      "id": "db-1",
      "type": "database",
      "data": { "label": "Database", "query": "INSERT INTO users (email) VALUES ($1)" },
      "connections": []
    },
    { "id": "transform-1", "type": "transform", "data": { "label": "Transform" }, "connections": [] }
  ],
  "databaseTables": [
    {
      "id": "table-1",
      "name": "users",
      "fields": [
        { "id": "f1", "name": "email", "type": "string", "required": true, "unique": true }
      ],
      "relations": [
        { "id": "r1", "from": "users", "to": "posts", "type": "one-to-many" }
      ]
    }
  ]
}"#;

fn setup(project: &str) -> (TempDir, CompilerConfig) {
    let dir = TempDir::new().unwrap();
    let project_file = dir.path().join("project.json");
    fs::write(&project_file, project).unwrap();

    let config = CompilerConfig {
        project_file,
        out_dir: dir.path().join("out"),
        ..Default::default()
    };
    (dir, config)
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_compile_writes_project() {
    let (_dir, config) = setup(SIGNUP_PROJECT);
    let out_dir = config.out_dir.clone();

    let result = Compiler::new(config).compile().unwrap();

    assert_eq!(result.components, 2);
    assert_eq!(result.routes, 1);
    assert_eq!(result.tables, 1);

    for name in ["index.html", "server.js", "schema.sql", "package.json", ".env.example", ".gitignore", "README.md"] {
        assert!(out_dir.join(name).exists(), "missing {}", name);
    }

    let html = read(&out_dir, "index.html");
    assert!(html.contains("left: 10px; top: 20px; width: 100px; height: 40px;"));
    assert!(html.contains("bg-green-500"));
    assert!(html.contains(">Sign up</button>"));
    assert!(html.contains(">Text</div>"));

    let server = read(&out_dir, "server.js");
    assert!(server.contains("app.post('/signup', authenticateToken, async (req, res) => {"));
    assert!(server.contains("INSERT INTO users (email) VALUES ($1)"));
    assert!(!server.contains("transform"));

    let sql = read(&out_dir, "schema.sql");
    assert_eq!(sql.matches("CREATE TABLE").count(), 1);
    assert!(sql.contains("  email TEXT NOT NULL UNIQUE,"));
    assert!(!sql.contains("FOREIGN KEY"));

    let package = read(&out_dir, "package.json");
    assert!(package.contains("\"name\": \"signup-demo\""));
    assert!(package.contains("\"pg\""));
}

#[test]
fn test_compile_reports_warnings() {
    let (_dir, config) = setup(SIGNUP_PROJECT);
    let result = Compiler::new(config).compile().unwrap();

    assert!(result.warnings.contains(&Warning::InertTransform {
        block: "transform-1".to_string()
    }));
    assert!(result.warnings.contains(&Warning::RelationsNotEmitted {
        table: "users".to_string(),
        count: 1
    }));
}

#[test]
fn test_compile_is_deterministic() {
    let (_dir, config) = setup(SIGNUP_PROJECT);
    let out_dir = config.out_dir.clone();
    let compiler = Compiler::new(config);

    compiler.compile().unwrap();
    let first: Vec<String> = ["index.html", "server.js", "schema.sql"]
        .iter()
        .map(|name| read(&out_dir, name))
        .collect();

    compiler.compile().unwrap();
    let second: Vec<String> = ["index.html", "server.js", "schema.sql"]
        .iter()
        .map(|name| read(&out_dir, name))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_empty_project_gets_placeholder() {
    let (_dir, config) = setup("{}");
    let out_dir = config.out_dir.clone();

    let result = Compiler::new(config).compile().unwrap();

    assert_eq!(result.components, 0);
    assert!(read(&out_dir, "index.html").contains("Your canvas components will appear here!"));
    assert_eq!(read(&out_dir, "schema.sql"), "");
    assert!(!read(&out_dir, "package.json").contains("\"pg\""));
}

#[test]
fn test_generate_one_does_not_write() {
    let (_dir, config) = setup(SIGNUP_PROJECT);
    let out_dir = config.out_dir.clone();

    let sql = Compiler::new(config).generate_one(ArtifactKind::Database).unwrap();

    assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS users ("));
    assert!(!out_dir.exists());
}

#[test]
fn test_duplicate_ids_fail_before_writing() {
    let project = r#"{
      "components": [
        { "id": "a", "type": "text" },
        { "id": "a", "type": "card" }
      ]
    }"#;
    let (_dir, config) = setup(project);
    let out_dir = config.out_dir.clone();

    let err = Compiler::new(config).compile().unwrap_err();

    assert!(matches!(err, CompilerError::DuplicateComponentId { ref id } if id == "a"));
    assert!(!out_dir.exists());
}

#[test]
fn test_skip_validation() {
    let project = r#"{
      "databaseTables": [ { "id": "t", "name": "", "fields": [] } ]
    }"#;
    let (_dir, mut config) = setup(project);
    assert!(Compiler::new(config.clone()).compile().is_err());

    config.skip_validation = true;
    let result = Compiler::new(config).compile().unwrap();
    assert!(result.warnings.is_empty());
}

#[test]
fn test_malformed_project_reports_location() {
    let (_dir, config) = setup("{\n  \"name\": \"Broken\"\n  \"components\": []\n}");

    let err = Compiler::new(config).check().unwrap_err();

    match err {
        CompilerError::ProjectParseFailed { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unknown_types_load_and_degrade() {
    let project = r#"{
      "components": [
        { "id": "c1", "type": "carousel", "position": { "x": 5, "y": 5 } },
        { "id": "b1", "type": "button", "properties": { "text": false } }
      ],
      "logicBlocks": [
        { "id": "in", "type": "input", "data": { "method": "post", "path": "/hooks" }, "connections": ["hook"] },
        { "id": "hook", "type": "webhook", "data": { "url": "https://example.test" } }
      ]
    }"#;
    let (dir, config) = setup(project);
    let out_dir = config.out_dir.clone();
    let compiler = Compiler::new(config);

    let checked = compiler.check().unwrap();
    assert_eq!(checked.components, 2);
    assert_eq!(checked.routes, 1);
    assert_eq!(
        checked.warnings,
        vec![Warning::UnknownBlockKind {
            block: "hook".to_string(),
            kind: "webhook".to_string()
        }]
    );

    compiler.compile().unwrap();
    let html = read(&out_dir, "index.html");
    assert!(html.contains("border-dashed border-white/30 rounded-xl p-4 text-gray-600\">carousel</div>"));
    assert!(html.contains(">Button</button>"));

    let server = read(&out_dir, "server.js");
    assert!(server.contains("app.post('/hooks', async (req, res) => {"));
    assert!(!server.contains("webhook"));

    // Unknown types survive a load/save cycle.
    let copy = dir.path().join("copy.json");
    ProjectFile::load(&dir.path().join("project.json")).unwrap().save(&copy).unwrap();
    let saved = ProjectFile::load(&copy).unwrap();
    assert_eq!(saved.model.components[0].kind.as_str(), "carousel");
    assert_eq!(saved.model.logic_blocks[1].kind.as_str(), "webhook");
}

//! Output directory scaffolding.
//!
//! Besides the three artifacts, a generated project gets the files needed to
//! run the server module with npm: a package.json, an env template, a
//! .gitignore and a README.

use super::{ArtifactKind, GeneratedCode};

/// Generates package.json for the server module.
///
/// `pg` is only listed when the server talks to a database.
pub fn generate_package_json(name: &str, uses_db: bool) -> String {
    let mut deps = vec![
        ("cors", "^2.8.5"),
        ("express", "^4.19.2"),
        ("jsonwebtoken", "^9.0.2"),
    ];
    if uses_db {
        deps.push(("pg", "^8.11.0"));
    }

    let deps: Vec<String> = deps
        .iter()
        .map(|(name, version)| format!("    \"{}\": \"{}\"", name, version))
        .collect();

    format!(
        r#"{{
  "name": "{}",
  "version": "0.1.0",
  "private": true,
  "main": "{}",
  "scripts": {{
    "start": "node {}"
  }},
  "dependencies": {{
{}
  }}
}}
"#,
        to_package_name(name),
        ArtifactKind::Backend.file_name(),
        ArtifactKind::Backend.file_name(),
        deps.join(",\n")
    )
}

/// Generates the environment template the server module reads.
pub fn generate_env_example(secret_env: &str, uses_db: bool) -> String {
    let mut output = format!("{}=change-me\n", secret_env);
    if uses_db {
        output.push_str("DATABASE_URL=postgres://localhost:5432/app\n");
    }
    output
}

/// Generates .gitignore for the project.
pub fn generate_gitignore() -> &'static str {
    r#"node_modules/
.env
"#
}

/// Generates a README for the generated project.
pub fn generate_readme(name: &str, port: u16) -> String {
    format!(
        r#"# {name}

Generated by the canvas compiler. Regenerate instead of editing these files by hand.

## Files

- `{frontend}` - the page, open it directly in a browser
- `{backend}` - Express API server
- `{database}` - table definitions, apply with `psql -f {database}`

## Running the server

```bash
cp .env.example .env
npm install
npm start
```

The server listens on http://localhost:{port}.
"#,
        name = name,
        frontend = ArtifactKind::Frontend.file_name(),
        backend = ArtifactKind::Backend.file_name(),
        database = ArtifactKind::Database.file_name(),
        port = port
    )
}

/// All files of a generated project as (relative path, content) pairs.
pub fn project_files(
    name: &str,
    generated: &GeneratedCode,
    port: u16,
    secret_env: &str,
    uses_db: bool,
) -> Vec<(String, String)> {
    let mut files = generated.files();
    files.push(("package.json".to_string(), generate_package_json(name, uses_db)));
    files.push((".env.example".to_string(), generate_env_example(secret_env, uses_db)));
    files.push((".gitignore".to_string(), generate_gitignore().to_string()));
    files.push(("README.md".to_string(), generate_readme(name, port)));
    files
}

/// Turns a project title into a valid npm package name.
pub fn to_package_name(name: &str) -> String {
    let mut result = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
        } else if !result.is_empty() && !result.ends_with('-') {
            result.push('-');
        }
    }
    let trimmed = result.trim_end_matches('-');
    if trimmed.is_empty() {
        "canvas-app".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name() {
        assert_eq!(to_package_name("My Landing Page"), "my-landing-page");
        assert_eq!(to_package_name("  Shop!! 2.0 "), "shop-2-0");
        assert_eq!(to_package_name("***"), "canvas-app");
    }

    #[test]
    fn test_package_json_dependencies() {
        let without_db = generate_package_json("App", false);
        assert!(without_db.contains("\"express\""));
        assert!(without_db.contains("\"jsonwebtoken\""));
        assert!(!without_db.contains("\"pg\""));
        assert!(without_db.contains("\"start\": \"node server.js\""));

        let with_db = generate_package_json("App", true);
        assert!(with_db.contains("\"pg\": \"^8.11.0\""));
    }

    #[test]
    fn test_package_json_is_valid_json() {
        let json = generate_package_json("Todo App", true);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "todo-app");
        assert_eq!(value["dependencies"].as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_env_example() {
        assert_eq!(generate_env_example("JWT_SECRET", false), "JWT_SECRET=change-me\n");
        assert!(generate_env_example("JWT_SECRET", true).contains("DATABASE_URL="));
    }

    #[test]
    fn test_project_files() {
        let files = project_files("App", &GeneratedCode::default(), 3001, "JWT_SECRET", false);
        let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["index.html", "server.js", "schema.sql", "package.json", ".env.example", ".gitignore", "README.md"]
        );
        assert!(files[6].1.contains("http://localhost:3001"));
    }
}

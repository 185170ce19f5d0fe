//! Express server generation from the logic-block graph.
//!
//! Only `input` blocks produce routes. The effects of a route are the blocks
//! listed directly in that input block's `connections`; connections of those
//! blocks are not followed. Ids that match no block are skipped.

use crate::model::{BlockKind, LogicBlock};

const DEFAULT_METHOD: &str = "get";
const DEFAULT_PATH: &str = "/api/endpoint";
const DEFAULT_QUERY: &str = "SELECT * FROM users";

/// Backend generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOptions {
    /// Port passed to `app.listen`.
    pub port: u16,
    /// Environment variable holding the token verification secret.
    pub secret_env: String,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            port: 3001,
            secret_env: "JWT_SECRET".to_string(),
        }
    }
}

/// A route resolved from an `input` block and its directly attached effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    /// Id of the input block.
    pub block_id: &'a str,
    /// Lower-cased routing call name (`get`, `post`, ...).
    pub method: String,
    pub path: &'a str,
    /// Whether an `auth` block is attached.
    pub requires_auth: bool,
    /// Query of the first attached `database` block.
    pub query: Option<&'a str>,
    /// Whether a `response` block is attached. Recorded, not rendered.
    pub has_response: bool,
}

/// Resolves one route per `input` block, in block order.
pub fn resolve_routes(blocks: &[LogicBlock]) -> Vec<Route<'_>> {
    blocks
        .iter()
        .filter(|block| block.kind == BlockKind::Input)
        .map(|input| {
            let attached: Vec<&LogicBlock> = blocks
                .iter()
                .filter(|b| b.kind.is_effect() && input.is_connected_to(&b.id))
                .collect();

            let database = attached.iter().find(|b| b.kind == BlockKind::Database);

            Route {
                block_id: &input.id,
                method: input.data.method().unwrap_or(DEFAULT_METHOD).to_ascii_lowercase(),
                path: input.data.path().unwrap_or(DEFAULT_PATH),
                requires_auth: attached.iter().any(|b| b.kind == BlockKind::Auth),
                query: database.map(|b| b.data.query().unwrap_or(DEFAULT_QUERY)),
                has_response: attached.iter().any(|b| b.kind == BlockKind::Response),
            }
        })
        .collect()
}

/// Generates the server module with default options.
pub fn generate_backend(blocks: &[LogicBlock]) -> String {
    generate_backend_with(blocks, &BackendOptions::default())
}

/// Generates the server module.
pub fn generate_backend_with(blocks: &[LogicBlock], options: &BackendOptions) -> String {
    let routes = resolve_routes(blocks);
    let uses_db = routes.iter().any(|r| r.query.is_some());

    let mut output = String::new();

    // Imports
    output.push_str("const express = require('express');\n");
    output.push_str("const jwt = require('jsonwebtoken');\n");
    output.push_str("const cors = require('cors');\n");
    if uses_db {
        output.push_str("const { Pool } = require('pg');\n");
    }
    output.push('\n');

    output.push_str("const app = express();\n");
    if uses_db {
        output.push_str("const db = new Pool({ connectionString: process.env.DATABASE_URL });\n");
    }
    output.push('\n');

    output.push_str("app.use(cors());\n");
    output.push_str("app.use(express.json());\n\n");

    // Token verification middleware
    output.push_str("// Authentication middleware\n");
    output.push_str("const authenticateToken = (req, res, next) => {\n");
    output.push_str("  const authHeader = req.headers['authorization'];\n");
    output.push_str("  const token = authHeader && authHeader.split(' ')[1];\n\n");
    output.push_str("  if (!token) {\n");
    output.push_str("    return res.sendStatus(401);\n");
    output.push_str("  }\n\n");
    output.push_str(&format!(
        "  jwt.verify(token, process.env.{}, (err, user) => {{\n",
        options.secret_env
    ));
    output.push_str("    if (err) return res.sendStatus(403);\n");
    output.push_str("    req.user = user;\n");
    output.push_str("    next();\n");
    output.push_str("  });\n");
    output.push_str("};\n\n");

    for route in &routes {
        output.push_str(&generate_route(route));
        output.push('\n');
    }

    output.push_str(&format!("app.listen({}, () => {{\n", options.port));
    output.push_str(&format!("  console.log('Server running on port {}');\n", options.port));
    output.push_str("});\n");

    output
}

/// Generates one route registration with its handler.
fn generate_route(route: &Route<'_>) -> String {
    let mut output = String::new();

    let middleware = if route.requires_auth { "authenticateToken, " } else { "" };
    output.push_str(&format!(
        "app.{}('{}', {}async (req, res) => {{\n",
        route.method, route.path, middleware
    ));
    output.push_str("  try {\n");

    if route.requires_auth {
        output.push_str("    // Authentication already verified by middleware\n");
    }

    if let Some(query) = route.query {
        output.push_str("    // Database operation\n");
        output.push_str(&format!("    const result = await db.query('{}');\n", query));
    }

    output.push_str("    res.json({\n");
    output.push_str("      success: true,\n");
    if route.query.is_some() {
        output.push_str("      data: result.rows\n");
    } else {
        output.push_str("      message: \"Success\"\n");
    }
    output.push_str("    });\n");

    output.push_str("  } catch (error) {\n");
    output.push_str("    res.status(500).json({ error: error.message });\n");
    output.push_str("  }\n");
    output.push_str("});\n");

    output
}

//! HTML document generation from placed components.
//!
//! Every component becomes one absolutely positioned element. There is no
//! z-index: paint order is emission order, so later components sit on top of
//! earlier ones when they overlap. Property values are interpolated verbatim.

use crate::model::{ComponentKind, PlacedComponent, DEFAULT_IMAGE_SRC};

/// Title shared by the placeholder and the generated document.
pub const DOCUMENT_TITLE: &str = "Canvas Generated App";

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Canvas Generated App</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        body {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            font-family: 'Inter', sans-serif;
        }
        .glass {
            background: rgba(255, 255, 255, 0.1);
            backdrop-filter: blur(10px);
            border: 1px solid rgba(255, 255, 255, 0.2);
        }
        .hover-scale:hover {
            transform: scale(1.05);
            transition: transform 0.3s ease;
        }
    </style>
</head>
"#;

const PLACEHOLDER_BODY: &str = r#"<body class="min-h-screen flex items-center justify-center">
    <div class="text-center text-white">
        <h1 class="text-4xl font-bold mb-4">Canvas App</h1>
        <p class="text-xl opacity-90">Your canvas components will appear here!</p>
    </div>
</body>
</html>
"#;

const SCRIPT: &str = r#"    <script>
        // Add interactivity to canvas components
        document.addEventListener('DOMContentLoaded', function() {
            console.log('Canvas app loaded successfully');

            const buttons = document.querySelectorAll('button');
            buttons.forEach(button => {
                button.addEventListener('click', function() {
                    console.log('Button clicked:', this.textContent);
                });
            });

            const inputs = document.querySelectorAll('input');
            inputs.forEach(input => {
                input.addEventListener('input', function() {
                    console.log('Input changed:', this.value);
                });
            });
        });
    </script>
"#;

/// Indentation of component fragments inside the canvas container.
const FRAGMENT_INDENT: &str = "        ";

/// Generates a complete HTML document for the given components.
///
/// An empty slice produces a fixed placeholder page.
pub fn generate_frontend(components: &[PlacedComponent]) -> String {
    let mut output = String::from(HEAD);

    if components.is_empty() {
        output.push_str(PLACEHOLDER_BODY);
        return output;
    }

    output.push_str("<body class=\"min-h-screen relative\">\n");
    output.push_str("    <div class=\"relative min-h-screen\">\n");
    for component in components {
        output.push_str(FRAGMENT_INDENT);
        output.push_str(&render_component(component));
        output.push('\n');
    }
    output.push_str("    </div>\n");
    output.push_str(SCRIPT);
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    output
}

/// Inline style placing a component at its canvas position and size.
pub fn position_style(component: &PlacedComponent) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
        component.position.x, component.position.y, component.size.width, component.size.height
    )
}

/// Renders one component as a single-line markup fragment.
pub fn render_component(component: &PlacedComponent) -> String {
    let style = position_style(component);
    let props = &component.properties;

    match &component.kind {
        ComponentKind::Text => format!(
            r#"<div style="{}" class="text-{} text-{} glass p-3 rounded-xl hover-scale">{}</div>"#,
            style,
            props.font_size().unwrap_or("base"),
            props.color().unwrap_or("gray-800"),
            props.text().unwrap_or("Text"),
        ),
        ComponentKind::Button => format!(
            r#"<button style="{}" class="bg-{} text-white px-4 py-2 rounded-xl hover:opacity-90 shadow-lg font-medium transition-all duration-300 hover-scale" onclick="alert('Button clicked!')">{}</button>"#,
            style,
            props.background_color().unwrap_or("blue-500"),
            props.text().unwrap_or("Button"),
        ),
        ComponentKind::Input => format!(
            r#"<input style="{}" type="text" placeholder="{}" class="glass border border-white/30 px-3 py-2 rounded-xl focus:outline-none focus:ring-2 focus:ring-purple-500 text-gray-800" />"#,
            style,
            props.placeholder().unwrap_or("Enter text"),
        ),
        ComponentKind::Card => format!(
            r#"<div style="{}" class="glass rounded-2xl shadow-xl p-6 border border-white/30 hover-scale">{}</div>"#,
            style,
            props.text().unwrap_or("Card content"),
        ),
        ComponentKind::Image => format!(
            r#"<div style="{}" class="glass p-2 rounded-xl border border-white/30 hover-scale"><img src="{}" alt="{}" class="rounded-lg object-cover w-full h-full" /></div>"#,
            style,
            props.src().unwrap_or(DEFAULT_IMAGE_SRC),
            props.alt().unwrap_or("Image"),
        ),
        ComponentKind::Navbar | ComponentKind::Form | ComponentKind::Grid | ComponentKind::Other(_) => format!(
            r#"<div style="{}" class="glass border-2 border-dashed border-white/30 rounded-xl p-4 text-gray-600">{}</div>"#,
            style,
            component.kind.as_str(),
        ),
    }
}

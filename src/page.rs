//! Per-method documentation pages.
//!
//! Pages are Markdown with a YAML front matter block that links each page to
//! its operation in the OpenAPI document, so a documentation site can render
//! both from the same catalog.

use crate::{
    catalog::{Entry, Parameter},
    jsonrpc::{Request, Response},
    openapi,
    sample::Generator,
};
use std::fmt::Write as _;

/// Returns the file name of a method's page, such as `eth-getBalance.md`.
pub fn file_name(method: &str) -> String {
    format!("{}.md", method.replace('_', "-"))
}

/// Renders the documentation page for a method.
pub fn render(entry: Entry<'_>, generator: &Generator) -> Result<String, serde_json::Error> {
    let method = entry.method;
    let mut out = String::new();

    // Writing to a `String` cannot fail.
    let _ = writeln!(out, "---");
    let _ = writeln!(out, "title: {}", serde_json::to_string(&method.name)?);
    let _ = writeln!(
        out,
        "description: {}",
        serde_json::to_string(&method.description)?
    );
    let _ = writeln!(
        out,
        "openapi: {}",
        serde_json::to_string(&format!("POST {}", openapi::path(&method.name)))?
    );
    let _ = writeln!(out, "---\n");

    let _ = writeln!(out, "# {}\n", method.name);
    let _ = writeln!(out, "{}\n", method.description);
    let _ = writeln!(out, "- **Namespace:** {}", entry.namespace.name);
    let _ = writeln!(
        out,
        "- **Status:** {}",
        if method.implemented {
            "implemented"
        } else {
            "not implemented"
        }
    );
    if method.private {
        let _ = writeln!(
            out,
            "- **Private:** only exposed over authenticated or unsafe RPC endpoints"
        );
    }
    if let Some(issue) = &method.issue {
        let _ = writeln!(out, "\n> **Known issue:** {issue}");
    }

    let _ = writeln!(out, "\n## Parameters\n");
    if method.params.is_empty() {
        let _ = writeln!(out, "This method takes no parameters.");
    } else {
        let _ = writeln!(out, "| # | Name | Type | Description |");
        let _ = writeln!(out, "|---|------|------|-------------|");
        for (i, param) in method.params.iter().enumerate() {
            parameter_rows(&mut out, i + 1, param);
        }
    }

    if !method.examples.is_empty() {
        let _ = writeln!(out, "\n## Examples");
    }
    for example in &method.examples {
        let _ = writeln!(out, "\n### {}\n", example.name);
        let _ = writeln!(out, "Request:\n");
        let _ = writeln!(
            out,
            "```json\n{}\n```\n",
            serde_json::to_string_pretty(&Request::new(&method.name, &example.params))?
        );
        let _ = writeln!(out, "Response:\n");
        let _ = writeln!(
            out,
            "```json\n{}\n```",
            serde_json::to_string_pretty(&Response::new(&example.response))?
        );

        for language in generator.languages() {
            let source = (language.render)(&method.name, &example.params, generator.endpoint());
            let _ = writeln!(out, "\n#### {}\n", language.name);
            let _ = writeln!(out, "```{}\n{}\n```", fence(language.id), source.trim_end());
        }
    }

    Ok(out)
}

fn parameter_rows(out: &mut String, position: usize, param: &Parameter) {
    let _ = writeln!(
        out,
        "| {position} | `{}` | {} | {} |",
        param.name,
        param.kind,
        cell(&param.description),
    );
    for field in &param.fields {
        let _ = writeln!(
            out,
            "| | `{}.{}` | {} | {} |",
            param.name,
            field.name,
            field.kind,
            cell(&field.description),
        );
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Code fence info string for a sample language.
fn fence(language: &str) -> &str {
    match language {
        "curl" => "bash",
        other => other,
    }
}

//! cURL command line samples.

use super::{fill, json_pretty, quoted, Language};
use crate::catalog::Icon;
use serde_json::Value;

pub const LANGUAGE: Language = Language {
    id: "curl",
    name: "cURL",
    icon: Icon::Curl,
    render,
};

const TEMPLATE: &str = r#"curl -X POST -H "Content-Type: application/json" \
  -d '{
    "jsonrpc": "2.0",
    "id": 1,
    "method": {{method}},
    "params": {{params}}
  }' \
  {{endpoint}}

# Success:  {"jsonrpc":"2.0","id":1,"result":...}
# Failure:  {"jsonrpc":"2.0","id":1,"error":{"code":...,"message":"..."}}
"#;

fn render(method: &str, params: &[Value], endpoint: &str) -> String {
    // The request body is wrapped in single quotes, so any single quotes in
    // the method or parameters have to be spliced in as `'\''`.
    let method = shell_escape(&quoted(method));
    let params = shell_escape(&json_pretty(params, "    "));
    fill(
        TEMPLATE,
        &[
            ("method", method.as_str()),
            ("params", params.as_str()),
            ("endpoint", shell_word(endpoint).as_str()),
        ],
    )
}

fn shell_escape(s: &str) -> String {
    s.replace('\'', r"'\''")
}

fn shell_word(s: &str) -> String {
    let plain = s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || ":/._-?=&%@+~,".contains(c));
    if plain && !s.is_empty() {
        s.to_owned()
    } else {
        format!("'{}'", shell_escape(s))
    }
}

//! TypeScript samples, using `ethers` and plain `fetch`.

use super::{fill, json, quoted, Language};
use crate::catalog::Icon;
use serde_json::Value;

pub const LANGUAGE: Language = Language {
    id: "typescript",
    name: "TypeScript",
    icon: Icon::TypeScript,
    render,
};

const TEMPLATE: &str = r#"import { ethers } from "ethers";

const endpoint = {{endpoint}};

// Using ethers.js
const provider = new ethers.JsonRpcProvider(endpoint);
try {
  const result = await provider.send({{method}}, {{params}});
  console.log(result);
} catch (error) {
  console.error("RPC error:", error);
}

// Using fetch
const response = await fetch(endpoint, {
  method: "POST",
  headers: { "Content-Type": "application/json" },
  body: JSON.stringify({
    jsonrpc: "2.0",
    id: 1,
    method: {{method}},
    params: {{params}},
  }),
});
const data = await response.json();
if (data.error) {
  console.error(`RPC error ${data.error.code}: ${data.error.message}`);
} else {
  console.log(data.result);
}
"#;

fn render(method: &str, params: &[Value], endpoint: &str) -> String {
    fill(
        TEMPLATE,
        &[
            ("method", quoted(method).as_str()),
            ("params", json(params).as_str()),
            ("endpoint", quoted(endpoint).as_str()),
        ],
    )
}

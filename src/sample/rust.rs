//! Rust samples, using `reqwest` and `serde_json`.

use super::{fill, literal, Language, Syntax};
use crate::catalog::Icon;
use serde_json::{Number, Value};

pub const LANGUAGE: Language = Language {
    id: "rust",
    name: "Rust",
    icon: Icon::Rust,
    render,
};

const TEMPLATE: &str = r#"// [dependencies]
// reqwest = { version = "0.11", features = ["json"] }
// serde_json = "1"
// tokio = { version = "1", features = ["full"] }

use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let response = client
        .post({{endpoint}})
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": {{method}},
            "params": {{params}}
        }))
        .send()
        .await?
        .json::<Value>()
        .await?;

    match response.get("error") {
        Some(error) => eprintln!("RPC error: {error}"),
        None => println!("{:#}", response["result"]),
    }

    Ok(())
}
"#;

/// Rust string literals do not accept every JSON escape sequence, so strings
/// are written with Rust's own escaping.
const SYNTAX: Syntax = Syntax {
    null: "null",
    yes: "true",
    no: "false",
    string: debug_string,
    number: typed_number,
    comma: ",",
    colon: ":",
};

fn debug_string(s: &str) -> String {
    format!("{s:?}")
}

/// Integer literals inside `json!` are inferred as `i32`, so anything outside
/// that range needs an explicit suffix.
fn typed_number(number: &Number) -> String {
    match (number.as_i64(), number.as_u64()) {
        (Some(n), _) if i32::try_from(n).is_ok() => n.to_string(),
        (Some(n), _) => format!("{n}i64"),
        (None, Some(n)) => format!("{n}u64"),
        _ => number.to_string(),
    }
}

fn render(method: &str, params: &[Value], endpoint: &str) -> String {
    fill(
        TEMPLATE,
        &[
            ("method", debug_string(method).as_str()),
            (
                "params",
                literal(&Value::Array(params.to_vec()), &SYNTAX).as_str(),
            ),
            ("endpoint", debug_string(endpoint).as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_json_macro_request() {
        let sample = render(
            "eth_call",
            &[
                json!({
                    "to": "0x08d68b6d693a685126f823bc7787e4078b3d35e3",
                    "data": "0x70a08231",
                }),
                json!("latest"),
            ],
            "http://localhost:8545",
        );
        assert!(sample.contains(r#"        .post("http://localhost:8545")"#));
        assert!(sample.contains(r#"            "method": "eth_call","#));
        assert!(sample.contains(
            r#"            "params": [{"to":"0x08d68b6d693a685126f823bc7787e4078b3d35e3","data":"0x70a08231"},"latest"]"#
        ));
        assert!(sample.contains(r#"response.get("error")"#));
    }

    #[test]
    fn suffixes_integers_outside_i32() {
        assert_eq!(
            literal(
                &json!([u64::MAX, i64::MIN, 2147483648i64, -2147483648i64, 1, 0.5]),
                &SYNTAX
            ),
            "[18446744073709551615u64,-9223372036854775808i64,2147483648i64,-2147483648,1,0.5]",
        );

        let sample = render("eth_getBlockByNumber", &[json!(4294967296u64)], "http://localhost:8545");
        assert!(sample.contains(r#"            "params": [4294967296i64]"#));
    }

    #[test]
    fn escapes_strings_for_rust() {
        assert_eq!(
            literal(&json!(["a\u{8}b", "\"q\""]), &SYNTAX),
            r#"["a\u{8}b","\"q\""]"#
        );
    }
}

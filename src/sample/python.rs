//! Python samples, using `requests` and `web3.py`.

use super::{fill, literal, plain_number, quoted, Language, Syntax};
use crate::catalog::Icon;
use serde_json::Value;

pub const LANGUAGE: Language = Language {
    id: "python",
    name: "Python",
    icon: Icon::Python,
    render,
};

const TEMPLATE: &str = r#"import requests
from web3 import Web3

endpoint = {{endpoint}}

# Using requests
payload = {
    "jsonrpc": "2.0",
    "id": 1,
    "method": {{method}},
    "params": {{params}},
}

response = requests.post(endpoint, json=payload)
data = response.json()
if "error" in data:
    print(f"RPC error {data['error']['code']}: {data['error']['message']}")
else:
    print(data["result"])

# Using web3.py
w3 = Web3(Web3.HTTPProvider(endpoint))
print(w3.provider.make_request({{method}}, {{params}}))
"#;

/// JSON string escapes are all valid in Python string literals, but the
/// keyword literals differ.
const SYNTAX: Syntax = Syntax {
    null: "None",
    yes: "True",
    no: "False",
    string: quoted,
    number: plain_number,
    comma: ", ",
    colon: ": ",
};

fn render(method: &str, params: &[Value], endpoint: &str) -> String {
    fill(
        TEMPLATE,
        &[
            ("method", quoted(method).as_str()),
            (
                "params",
                literal(&Value::Array(params.to_vec()), &SYNTAX).as_str(),
            ),
            ("endpoint", quoted(endpoint).as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_python_literals() {
        let sample = render(
            "personal_unlockAccount",
            &[
                json!("0x0f54f47bf9b8e317b214ccd6a7c3e38b893cd7f0"),
                json!("secret passphrase"),
                json!(30),
            ],
            "http://localhost:8545",
        );
        assert!(sample.contains(
            r#"    "params": ["0x0f54f47bf9b8e317b214ccd6a7c3e38b893cd7f0", "secret passphrase", 30],"#
        ));
        assert!(sample.contains(r#"endpoint = "http://localhost:8545""#));
        assert!(sample.contains(r#"if "error" in data:"#));
    }

    #[test]
    fn converts_keywords() {
        let sample = render(
            "debug_traceTransaction",
            &[json!(null), json!({ "disableStack": true, "disableMemory": false })],
            "http://localhost:8545",
        );
        assert!(sample.contains(
            r#"make_request("debug_traceTransaction", [None, {"disableStack": True, "disableMemory": False}])"#
        ));
        assert!(!sample.contains("null"));
    }
}

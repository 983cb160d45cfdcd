//! Go samples, using only the standard library.

use super::{fill, json, quoted, Language};
use crate::catalog::Icon;
use serde_json::Value;

pub const LANGUAGE: Language = Language {
    id: "go",
    name: "Go",
    icon: Icon::Go,
    render,
};

const TEMPLATE: &str = r#"package main

import (
	"bytes"
	"encoding/json"
	"fmt"
	"io"
	"net/http"
)

type Request struct {
	JSONRPC string          `json:"jsonrpc"`
	ID      int             `json:"id"`
	Method  string          `json:"method"`
	Params  json.RawMessage `json:"params"`
}

type Response struct {
	Result json.RawMessage `json:"result"`
	Error  *struct {
		Code    int    `json:"code"`
		Message string `json:"message"`
	} `json:"error"`
}

func main() {
	request := Request{
		JSONRPC: "2.0",
		ID:      1,
		Method:  {{method}},
		Params:  json.RawMessage({{params}}),
	}

	body, err := json.Marshal(request)
	if err != nil {
		panic(err)
	}

	resp, err := http.Post({{endpoint}}, "application/json", bytes.NewReader(body))
	if err != nil {
		panic(err)
	}
	defer resp.Body.Close()

	data, err := io.ReadAll(resp.Body)
	if err != nil {
		panic(err)
	}

	var response Response
	if err := json.Unmarshal(data, &response); err != nil {
		panic(err)
	}
	if response.Error != nil {
		fmt.Printf("RPC error %d: %s\n", response.Error.Code, response.Error.Message)
		return
	}
	fmt.Println(string(response.Result))
}
"#;

fn render(method: &str, params: &[Value], endpoint: &str) -> String {
    fill(
        TEMPLATE,
        &[
            ("method", quoted(method).as_str()),
            ("params", raw_string(&json(params)).as_str()),
            ("endpoint", quoted(endpoint).as_str()),
        ],
    )
}

/// Go raw strings cannot contain backticks; JSON string literals are valid
/// interpreted Go strings, so fall back to those.
fn raw_string(s: &str) -> String {
    if s.contains('`') {
        quoted(s)
    } else {
        format!("`{s}`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embeds_params_as_raw_json() {
        let sample = render(
            "debug_traceTransaction",
            &[json!("0x4ed38df88f88..."), json!({ "tracer": "callTracer" })],
            "http://localhost:8545",
        );
        assert!(sample.contains(r#"		Method:  "debug_traceTransaction","#));
        assert!(sample.contains(
            r#"		Params:  json.RawMessage(`["0x4ed38df88f88...",{"tracer":"callTracer"}]`),"#
        ));
        assert!(sample.contains(r#"http.Post("http://localhost:8545", "#));
        assert!(sample.contains("response.Error.Message"));
    }

    #[test]
    fn falls_back_to_quoted_strings() {
        assert_eq!(raw_string("[]"), "`[]`");
        assert_eq!(raw_string(r#"["`"]"#), r#""[\"`\"]""#);
    }
}

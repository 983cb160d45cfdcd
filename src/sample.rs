//! Code sample generation.
//!
//! Samples are produced by a registry of languages, each with a pure render
//! function. Rendering has no hidden state, so identical inputs always produce
//! identical text.

mod csharp;
mod curl;
mod go;
mod python;
mod rust;
mod typescript;

use crate::catalog::Icon;
use serde_json::{Number, Value};
use std::fmt::{self, Debug, Formatter};

/// The illustrative endpoint used in generated samples.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8545";

/// A sample render function, taking the method name, its parameters and the
/// endpoint to show.
pub type Render = fn(method: &str, params: &[Value], endpoint: &str) -> String;

/// A sample language.
#[derive(Clone, Copy)]
pub struct Language {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: Icon,
    pub render: Render,
}

impl Debug for Language {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Language")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

/// The built-in languages, in display order.
pub const LANGUAGES: [Language; 6] = [
    curl::LANGUAGE,
    typescript::LANGUAGE,
    go::LANGUAGE,
    rust::LANGUAGE,
    python::LANGUAGE,
    csharp::LANGUAGE,
];

/// A code sample generator.
#[derive(Clone, Debug)]
pub struct Generator {
    endpoint: String,
    languages: Vec<Language>,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            languages: LANGUAGES.to_vec(),
        }
    }
}

impl Generator {
    /// Creates a generator with the built-in languages that shows a
    /// different endpoint in its samples.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Registers a language, replacing any existing language with the same
    /// ID in place.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        match self.languages.iter_mut().find(|l| l.id == language.id) {
            Some(existing) => *existing = language,
            None => self.languages.push(language),
        }
        self
    }

    /// Returns the endpoint shown in samples.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the registered languages, in display order.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Returns the language with the specified ID.
    pub fn language(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.id == id)
    }

    /// Renders a sample in a single language.
    pub fn render(&self, id: &str, method: &str, params: &[Value]) -> Option<String> {
        let language = self.language(id)?;
        Some((language.render)(method, params, &self.endpoint))
    }

    /// Renders samples in every registered language.
    pub fn generate(&self, method: &str, params: &[Value]) -> Samples {
        Samples(
            self.languages
                .iter()
                .map(|language| {
                    (
                        language.id,
                        (language.render)(method, params, &self.endpoint),
                    )
                })
                .collect(),
        )
    }
}

/// Renders samples in every built-in language.
pub fn generate(method: &str, params: &[Value]) -> Samples {
    Generator::default().generate(method, params)
}

/// Generated samples keyed by language ID, in display order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Samples(Vec<(&'static str, String)>);

impl Samples {
    /// Returns the sample for a language.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(language, _)| *language == id)
            .map(|(_, text)| text.as_str())
    }

    /// Iterates over `(language ID, sample)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Samples {
    type Item = (&'static str, String);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Substitutes `{{name}}` placeholders in a template in a single pass.
/// Substituted text is never rescanned and unknown placeholders are kept
/// verbatim.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let value = tail.find("}}").and_then(|end| {
            let name = &tail[..end];
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Compact JSON encoding of a parameter list.
fn json(params: &[Value]) -> String {
    Value::Array(params.to_vec()).to_string()
}

/// Pretty JSON encoding of a parameter list, with every line after the
/// first indented by `indent`.
fn json_pretty(params: &[Value], indent: &str) -> String {
    let pretty = format!("{:#}", Value::Array(params.to_vec()));
    pretty.replace('\n', &format!("\n{indent}"))
}

/// A JSON-quoted string, which is also a valid string literal in most
/// C-family languages.
fn quoted(s: &str) -> String {
    Value::from(s).to_string()
}

/// Rules for writing a JSON value as a literal in a language whose syntax
/// differs from JSON.
struct Syntax {
    null: &'static str,
    yes: &'static str,
    no: &'static str,
    string: fn(&str) -> String,
    number: fn(&Number) -> String,
    comma: &'static str,
    colon: &'static str,
}

/// A number written the way JSON writes it.
fn plain_number(number: &Number) -> String {
    number.to_string()
}

fn literal(value: &Value, syntax: &Syntax) -> String {
    let mut out = String::new();
    write_literal(&mut out, value, syntax);
    out
}

fn write_literal(out: &mut String, value: &Value, syntax: &Syntax) {
    match value {
        Value::Null => out.push_str(syntax.null),
        Value::Bool(true) => out.push_str(syntax.yes),
        Value::Bool(false) => out.push_str(syntax.no),
        Value::Number(number) => out.push_str(&(syntax.number)(number)),
        Value::String(string) => out.push_str(&(syntax.string)(string)),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(syntax.comma);
                }
                write_literal(out, item, syntax);
            }
            out.push(']');
        }
        Value::Object(members) => {
            out.push('{');
            for (i, (key, item)) in members.iter().enumerate() {
                if i > 0 {
                    out.push_str(syntax.comma);
                }
                out.push_str(&(syntax.string)(key));
                out.push_str(syntax.colon);
                write_literal(out, item, syntax);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use serde_json::json;

    /// Extracts the text between the first occurrence of `start` and the
    /// following occurrence of `end`.
    pub(super) fn between<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
        let from = text.find(start).unwrap() + start.len();
        let to = text[from..].find(end).unwrap() + from;
        &text[from..to]
    }

    /// Parses the request body out of a cURL sample, undoing the shell
    /// quoting.
    pub(super) fn curl_body(sample: &str) -> Value {
        let quoted = between(sample, "-d '", "' \\\n");
        serde_json::from_str(&quoted.replace(r"'\''", "'")).unwrap()
    }

    /// Parses the payload params out of a Python sample, turning Python's
    /// keyword literals outside of strings back into JSON.
    fn python_params(sample: &str) -> Value {
        let literal = between(sample, "    \"params\": ", ",\n");
        let mut json = String::new();
        let mut rest = literal;
        let mut in_string = false;
        while let Some(c) = rest.chars().next() {
            let keyword = [("None", "null"), ("True", "true"), ("False", "false")]
                .into_iter()
                .find(|(python, _)| !in_string && rest.starts_with(python));
            if let Some((python, keyword)) = keyword {
                json.push_str(keyword);
                rest = &rest[python.len()..];
                continue;
            }
            match c {
                '"' => in_string = !in_string,
                '\\' if in_string => {
                    json.push(c);
                    rest = &rest[1..];
                    let escaped = rest.chars().next().unwrap();
                    json.push(escaped);
                    rest = &rest[escaped.len_utf8()..];
                    continue;
                }
                _ => {}
            }
            json.push(c);
            rest = &rest[c.len_utf8()..];
        }
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn fills_placeholders_once() {
        assert_eq!(
            fill(
                "a {{x}} b {{y}} c {{z}} {{",
                &[("x", "{{y}}"), ("y", "2")]
            ),
            "a {{y}} b 2 c {{z}} {{",
        );
    }

    #[test]
    fn encodes_params() {
        let params = [json!({ "to": "0x08", "data": "0x70" }), json!(30), json!(true)];
        assert_eq!(json(&params), r#"[{"to":"0x08","data":"0x70"},30,true]"#);
        assert_eq!(json(&[]), "[]");
        assert_eq!(json_pretty(&[], "  "), "[]");
        assert_eq!(
            json_pretty(&[json!("latest")], "    "),
            "[\n      \"latest\"\n    ]"
        );
    }

    #[test]
    fn writes_literals() {
        let python = Syntax {
            null: "None",
            yes: "True",
            no: "False",
            string: quoted,
            number: plain_number,
            comma: ", ",
            colon: ": ",
        };
        assert_eq!(
            literal(&json!([null, true, false, 1.5, { "a": ["b"] }]), &python),
            r#"[None, True, False, 1.5, {"a": ["b"]}]"#,
        );
    }

    #[test]
    fn generates_every_language_in_order() {
        let samples = generate("eth_blockNumber", &[]);
        assert_eq!(
            samples.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            ["curl", "typescript", "go", "rust", "python", "csharp"],
        );
        for (id, text) in samples.iter() {
            assert!(text.contains("eth_blockNumber"), "{id}");
            assert!(text.contains("[]"), "{id}");
            assert!(text.contains(DEFAULT_ENDPOINT), "{id}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let catalog = Catalog::builtin();
        for entry in catalog.entries() {
            for example in &entry.method.examples {
                assert_eq!(
                    generate(&entry.method.name, &example.params),
                    generate(&entry.method.name, &example.params),
                );
            }
        }
    }

    #[test]
    fn embeds_catalog_params_as_json() {
        let catalog = Catalog::builtin();
        for entry in catalog.entries() {
            for example in &entry.method.examples {
                let name = &entry.method.name;
                let samples = generate(name, &example.params);
                let params = json(&example.params);
                for id in ["typescript", "go", "rust"] {
                    assert!(samples.get(id).unwrap().contains(&params), "{id} {name}");
                }

                let body = curl_body(samples.get("curl").unwrap());
                assert_eq!(body["method"], json!(name), "{name}");
                assert_eq!(body["params"], json!(example.params), "curl {name}");

                assert_eq!(
                    python_params(samples.get("python").unwrap()),
                    json!(example.params),
                    "python {name}",
                );

                let csharp = between(samples.get("csharp").unwrap(), "JsonNode.Parse(@\"", "\")");
                assert_eq!(
                    serde_json::from_str::<Vec<Value>>(&csharp.replace("\"\"", "\"")).unwrap(),
                    example.params,
                    "csharp {name}",
                );
            }
        }
    }

    #[test]
    fn reads_back_python_keywords_outside_strings() {
        let params = [
            json!(null),
            json!({ "disableStack": true, "note": "None of \"True\" or False" }),
            json!([false, "\\"]),
        ];
        let sample = generate("debug_traceCall", &params);
        assert_eq!(
            python_params(sample.get("python").unwrap()),
            json!(params)
        );
        assert_eq!(curl_body(sample.get("curl").unwrap())["params"], json!(params));
    }

    #[test]
    fn renders_single_language() {
        let generator = Generator::default();
        assert_eq!(
            generator.render("go", "net_version", &[]).as_deref(),
            generate("net_version", &[]).get("go"),
        );
        assert!(generator.render("cobol", "net_version", &[]).is_none());
    }

    #[test]
    fn registers_languages() {
        fn httpie(method: &str, params: &[Value], endpoint: &str) -> String {
            format!("http POST {endpoint} jsonrpc=2.0 id:=1 method={method} params:='{}'", json(params))
        }

        let generator = Generator::default().with_language(Language {
            id: "httpie",
            name: "HTTPie",
            icon: Icon::Curl,
            render: httpie,
        });
        assert_eq!(generator.languages().len(), 7);
        assert_eq!(
            generator.render("httpie", "eth_chainId", &[]).unwrap(),
            "http POST http://localhost:8545 jsonrpc=2.0 id:=1 method=eth_chainId params:='[]'",
        );

        let generator = generator.with_language(Language {
            id: "curl",
            ..LANGUAGES[0]
        });
        assert_eq!(generator.languages().len(), 7);
        assert_eq!(generator.languages()[0].id, "curl");
    }

    #[test]
    fn shows_custom_endpoint() {
        let generator = Generator::with_endpoint("https://rpc.example.org");
        assert_eq!(generator.endpoint(), "https://rpc.example.org");
        for (id, text) in generator.generate("eth_chainId", &[]).iter() {
            assert!(text.contains("https://rpc.example.org"), "{id}");
            assert!(!text.contains(DEFAULT_ENDPOINT), "{id}");
        }
    }
}

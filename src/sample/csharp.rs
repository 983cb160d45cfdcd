//! C# samples, using `HttpClient` and `System.Text.Json`.

use super::{fill, json, quoted, Language};
use crate::catalog::Icon;
use serde_json::Value;

pub const LANGUAGE: Language = Language {
    id: "csharp",
    name: "C#",
    icon: Icon::CSharp,
    render,
};

const TEMPLATE: &str = r#"using System;
using System.Net.Http;
using System.Text;
using System.Text.Json;
using System.Text.Json.Nodes;
using System.Threading.Tasks;

class Program
{
    static async Task Main()
    {
        var rpcUrl = {{endpoint}};

        var request = new JsonObject
        {
            ["jsonrpc"] = "2.0",
            ["id"] = 1,
            ["method"] = {{method}},
            ["params"] = JsonNode.Parse({{params}}),
        };

        using var http = new HttpClient();
        using var content = new StringContent(request.ToJsonString(), Encoding.UTF8, "application/json");

        try
        {
            var response = await http.PostAsync(rpcUrl, content);
            var responseBody = await response.Content.ReadAsStringAsync();

            if (!response.IsSuccessStatusCode)
            {
                Console.Error.WriteLine($"HTTP {(int)response.StatusCode}: {responseBody}");
                return;
            }

            using var doc = JsonDocument.Parse(responseBody);
            var root = doc.RootElement;

            if (root.TryGetProperty("error", out var error))
            {
                Console.Error.WriteLine($"RPC Error: {error}");
            }
            else if (root.TryGetProperty("result", out var result))
            {
                Console.WriteLine(result.ToString());
            }
            else
            {
                Console.Error.WriteLine("Unexpected RPC response format.");
            }
        }
        catch (Exception ex)
        {
            Console.Error.WriteLine($"Request failed: {ex.Message}");
        }
    }
}
"#;

fn render(method: &str, params: &[Value], endpoint: &str) -> String {
    fill(
        TEMPLATE,
        &[
            ("method", quoted(method).as_str()),
            ("params", verbatim(&json(params)).as_str()),
            ("endpoint", quoted(endpoint).as_str()),
        ],
    )
}

/// A C# verbatim string literal, where the only escape is a doubled quote.
fn verbatim(s: &str) -> String {
    format!("@\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_params_from_verbatim_string() {
        let sample = render(
            "eth_getUncleCountByBlockNumber",
            &[json!("latest")],
            "http://localhost:8545",
        );
        assert!(sample.contains(r#"["method"] = "eth_getUncleCountByBlockNumber","#));
        assert!(sample.contains(r#"["params"] = JsonNode.Parse(@"[""latest""]"),"#));
        assert!(sample.contains(r#"var rpcUrl = "http://localhost:8545";"#));
        assert!(sample.contains(r#"TryGetProperty("error", out var error)"#));
    }

    #[test]
    fn doubles_quotes() {
        assert_eq!(verbatim(r#"[{"a":1}]"#), r#"@"[{""a"":1}]""#);
        assert_eq!(verbatim("[]"), r#"@"[]""#);
    }
}

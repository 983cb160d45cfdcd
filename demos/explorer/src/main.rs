use clap::{Parser, Subcommand};
use rpcdocs::{
    filter::{Query, Selector},
    http::{reqwest::Url, Client},
    live, openapi, page,
    probe::Configuration,
    sample::DEFAULT_ENDPOINT,
    Catalog, Generator, Invoker,
};
use std::{error::Error, fs, num::NonZeroUsize, path::PathBuf};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "rpcdocs-explorer")]
#[command(about = "Browse, sample and try Ethereum JSON RPC methods")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List methods matching a search or namespace.
    List {
        /// Case-insensitive search over method names and descriptions
        #[arg(long, default_value = "")]
        search: String,

        /// Namespace ID, or "all"
        #[arg(long, default_value = "all")]
        namespace: Selector,

        /// Only list implemented methods
        #[arg(long)]
        implemented: bool,
    },

    /// Show a method's documentation and code samples.
    Show {
        method: String,

        /// Sample language ID; every language is shown when omitted
        #[arg(long)]
        language: Option<String>,
    },

    /// Execute one of a method's examples against a live endpoint.
    Exec {
        method: String,

        /// Example index
        #[arg(long, default_value = "0")]
        example: usize,

        /// RPC endpoint URL
        #[arg(long, env = "ETHRPC", default_value = "")]
        endpoint: String,
    },

    /// Probe a live endpoint for every catalog method.
    Probe {
        /// RPC endpoint URL
        #[arg(long, env = "ETHRPC", default_value = "")]
        endpoint: String,

        /// Maximum concurrent requests (0 = unlimited)
        #[arg(long, default_value = "10")]
        concurrency: usize,

        /// Example index to send for each method
        #[arg(long, default_value = "0")]
        example: usize,

        /// Print a Markdown report instead of a summary
        #[arg(long)]
        markdown: bool,
    },

    /// Print an OpenAPI document for the catalog.
    Openapi {
        /// Server URL shown in the document and its code samples
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        server: String,

        /// Only document implemented methods
        #[arg(long)]
        implemented: bool,
    },

    /// Write a Markdown documentation page for every method.
    Pages {
        /// Output directory
        #[arg(long, default_value = "pages")]
        out: PathBuf,

        /// Server URL shown in code samples
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        server: String,

        /// Only write pages for implemented methods
        #[arg(long)]
        implemented: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()?,
        )
        .init();

    let args = Args::parse();
    let catalog = Catalog::builtin();

    match args.command {
        Command::List {
            search,
            namespace,
            implemented,
        } => {
            let listing = catalog.filter(&Query {
                search,
                selector: namespace,
                implemented_only: implemented,
            });
            if listing.is_empty() {
                println!("No methods found.");
            }
            for entry in &listing.entries {
                let mut flags = Vec::new();
                if !entry.method.implemented {
                    flags.push("not implemented");
                }
                if entry.method.private {
                    flags.push("private");
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", flags.join(", "))
                };

                if listing.show_namespace {
                    println!(
                        "[{}] {}{flags}: {}",
                        entry.namespace.name, entry.method.name, entry.method.description,
                    );
                } else {
                    println!("{}{flags}: {}", entry.method.name, entry.method.description);
                }
            }
        }

        Command::Show { method, language } => {
            let entry = catalog
                .method(&method)
                .ok_or_else(|| format!("unknown method {method}"))?;
            let generator = Generator::default();

            println!("{} [{}]", entry.method.name, entry.namespace.name);
            println!("{}", entry.method.description);
            if let Some(issue) = &entry.method.issue {
                println!("Known issue: {issue}");
            }
            for param in &entry.method.params {
                println!("  {} ({}): {}", param.name, param.kind, param.description);
                for field in &param.fields {
                    println!("    .{} ({}): {}", field.name, field.kind, field.description);
                }
            }

            for (index, example) in entry.method.examples.iter().enumerate() {
                println!("\n#{index} {}", example.name);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&example.response_envelope())?
                );
                match &language {
                    Some(id) => {
                        let text = generator
                            .render(id, &entry.method.name, &example.params)
                            .ok_or_else(|| format!("unknown language {id}"))?;
                        println!("\n{text}");
                    }
                    None => {
                        for (id, text) in generator.generate(&entry.method.name, &example.params) {
                            println!("\n--- {id} ---\n{text}");
                        }
                    }
                }
            }
        }

        Command::Exec {
            method,
            example,
            endpoint,
        } => {
            let entry = catalog
                .method(&method)
                .ok_or_else(|| format!("unknown method {method}"))?;
            let params = match entry.method.examples.get(example) {
                Some(example) => example.params.as_slice(),
                None if entry.method.examples.is_empty() => &[][..],
                None => return Err(format!("{method} has no example #{example}").into()),
            };

            let client = client(&endpoint)?;
            let invoker = Invoker::new();
            let result = client.invoke(&invoker, &entry.method.name, params).await?;
            println!("{:#}", result.value());
        }

        Command::Probe {
            endpoint,
            concurrency,
            example,
            markdown,
        } => {
            let client = client(&endpoint)?;
            let report = client
                .probe(
                    catalog,
                    &Invoker::new(),
                    &Configuration {
                        max_concurrent_requests: NonZeroUsize::new(concurrency),
                        example,
                    },
                )
                .await?;

            if markdown {
                print!("{}", report.to_markdown());
            } else {
                for probe in &report.probes {
                    println!("{}: {:?}", probe.method, probe.status);
                }
                println!("{}", report.summary());
            }
        }

        Command::Openapi {
            server,
            implemented,
        } => {
            let listing = catalog.filter(&Query {
                implemented_only: implemented,
                ..Default::default()
            });
            let document = openapi::document(
                listing.entries,
                &Generator::with_endpoint(server),
                &openapi::Info::default(),
            )?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }

        Command::Pages {
            out,
            server,
            implemented,
        } => {
            let listing = catalog.filter(&Query {
                implemented_only: implemented,
                ..Default::default()
            });
            let generator = Generator::with_endpoint(server);
            fs::create_dir_all(&out)?;
            for entry in &listing.entries {
                let path = out.join(page::file_name(&entry.method.name));
                fs::write(&path, page::render(*entry, &generator)?)?;
                tracing::info!(path = %path.display(), "wrote page");
            }
        }
    }

    Ok(())
}

fn client(endpoint: &str) -> Result<Client, Box<dyn Error>> {
    if endpoint.is_empty() {
        return Err(live::Error::MissingEndpoint.into());
    }
    Ok(Client::new(endpoint.parse::<Url>()?))
}

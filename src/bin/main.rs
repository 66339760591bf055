//! Glowd CLI - RGB LED jacket backend
//!
//!   glowd serve                  → Start the HTTP server
//!   glowd extract <text>         → Run the extraction engine on text
//!
//! Configuration comes from a TOML file (default: config.toml) with
//! [server], [mastodon], and [bluesky] sections. The port can be
//! overridden on the command line.

use std::env;
use std::path::Path;

use anyhow::{anyhow, Context};
use glowd::logging::init_logging;
use glowd::server::AppState;
use glowd::{connect_all, extract_color, extract_effect, Config};
use serde_json::json;
use tracing::{info, warn};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("glowd {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("serve") => cmd_serve(&opts),
        Some("extract") => cmd_extract(&opts),
        Some(cmd) => Err(anyhow!("unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("{}", json!({"error": e.to_string()}));
        std::process::exit(1);
    }
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    text: Option<String>,
    config: Option<String>,
    port: Option<u16>,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        opts.config = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--port" | "-p" => {
                    if i + 1 < args.len() {
                        opts.port = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        // First positional is the command, the rest is text (joined)
        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }
        if !positional.is_empty() {
            opts.text = Some(positional.join(" "));
        }

        // Environment variables, lower priority than CLI args
        if opts.config.is_none() {
            opts.config = env::var("GLOWD_CONFIG").ok().filter(|s| !s.is_empty());
        }
        if opts.port.is_none() {
            opts.port = env::var("GLOWD_PORT").ok().and_then(|s| s.parse().ok());
        }

        opts
    }
}

fn print_usage() {
    println!(
        r#"glowd - RGB LED jacket backend

USAGE:
    glowd <command> [options]

COMMANDS:
    serve                   Start the HTTP server
    extract <text>          Extract color/effect from text, print JSON

OPTIONS:
    --config, -c <path>     Config file (default: config.toml, env: GLOWD_CONFIG)
    --port, -p <port>       Server port (overrides config, env: GLOWD_PORT)
    --help, -h              Print this help
    --version, -V           Print version

ENDPOINTS:
    GET /                   → {{message, version, available_platforms, active_platform}}
    GET /health             → {{status, service}}
    GET /api/v1/color       → {{color, effect, mention?, platform}}
    GET /api/v1/mentions    → {{mentions, count, platform}}
    GET /api/v1/platforms   → {{available_platforms, active_platform}}

EXAMPLES:
    glowd serve --config /etc/glowd/config.toml
    glowd serve --port 8080
    glowd extract "make it spring green with a fade"
"#
    );
}

fn cmd_serve(opts: &ParsedArgs) -> anyhow::Result<()> {
    let config_path = opts.config.clone().unwrap_or_else(|| "config.toml".into());
    let config = Config::load(Path::new(&config_path))
        .with_context(|| format!("loading {config_path}"))?;

    if config.server.api_key.is_some() {
        info!("API key loaded, authentication enabled");
    } else {
        warn!("no API key configured, authentication disabled");
    }

    let port = opts.port.unwrap_or(config.server.port);

    let rt = tokio::runtime::Runtime::new().context("creating runtime")?;
    rt.block_on(async {
        let platforms = connect_all(&config).await;
        info!(count = platforms.len(), "platforms available");

        let state = AppState::new(platforms, config.server.api_key.clone());
        glowd::serve(state, port).await
    })
}

fn cmd_extract(opts: &ParsedArgs) -> anyhow::Result<()> {
    let text = opts
        .text
        .as_deref()
        .ok_or_else(|| anyhow!("text required: glowd extract <text>"))?;

    let output = json!({
        "color": extract_color(text),
        "effect": extract_effect(text),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

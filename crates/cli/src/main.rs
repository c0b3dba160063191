#![forbid(unsafe_code)]

mod args;

use args::{OutputFormat, Parsed, RenderConfig, parse_args, usage};
use rdt_core::ids::ContainerId;
use rdt_core::widget::render;
use rdt_storage::SqliteRecordSource;
use std::io::Write as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn init_logging() {
    let filter = env_var("RDT_LOG")
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .compact()
        .init();
}

fn run(cfg: RenderConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = SqliteRecordSource::open(&cfg.db)?;
    let container = cfg.container.unwrap_or_else(ContainerId::generate);
    let output = render(&mut source, &cfg.widget, container)?;
    info!(
        container = output.container.as_str(),
        commands = output.commands.len(),
        "tree rendered"
    );

    let text = match cfg.format {
        OutputFormat::Script => output.script(),
        OutputFormat::Html => output.html(),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&serde_json::json!({
                "container": output.container,
                "commands": output.commands,
            }))?;
            text.push('\n');
            text
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = match parse_args(&args, env_var) {
        Ok(Parsed::Help) => {
            print!("{}", usage());
            return;
        }
        Ok(Parsed::Run(cfg)) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    init_logging();
    if let Err(e) = run(*cfg) {
        eprintln!("rdt_render: {e}");
        std::process::exit(2);
    }
}

#![forbid(unsafe_code)]

use rdt_core::ids::{ActionToken, ContainerId};
use rdt_core::source::{Filter, SourceConfig};
use rdt_core::widget::WidgetConfig;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Script,
    Html,
    Json,
}

#[derive(Debug)]
pub(crate) struct RenderConfig {
    pub(crate) db: PathBuf,
    pub(crate) widget: WidgetConfig,
    pub(crate) container: Option<ContainerId>,
    pub(crate) format: OutputFormat,
}

pub(crate) fn usage() -> &'static str {
    "rdt_render — render a navigation tree from a SQLite table\n\n\
USAGE:\n\
  rdt_render --db FILE --table NAME [--key COL] [--parent COL] [--label COL]\n\
             [--order COL] [--desc] [--where COL=VALUE]... [--collapsed]\n\
             [--select-action TOKEN] [--menu LABEL=TOKEN]...\n\
             [--container ID] [--tag NAME] [--format script|html|json]\n\n\
ENVIRONMENT:\n\
  RDT_DB, RDT_TABLE, RDT_KEY (default id), RDT_PARENT (default parent_id),\n\
  RDT_LABEL (default name), RDT_ORDER, RDT_SELECT_ACTION, RDT_LOG (default warn).\n\
  Flags override environment values.\n\n\
NOTES:\n\
  - Any structural problem (duplicate key, missing parent, cycle) aborts the\n\
    render with exit code 2 and prints nothing on stdout.\n\
  - Without --container a fresh tree_<uuid> id is generated.\n"
}

pub(crate) enum Parsed {
    Help,
    Run(Box<RenderConfig>),
}

/// Parses flags over environment defaults. `env` is injected so tests do not
/// depend on the process environment.
pub(crate) fn parse_args(
    args: &[String],
    env: impl Fn(&str) -> Option<String>,
) -> Result<Parsed, String> {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Parsed::Help);
    }

    let mut db: Option<PathBuf> = env("RDT_DB").map(PathBuf::from);
    let mut table: Option<String> = env("RDT_TABLE");
    let mut key = env("RDT_KEY").unwrap_or_else(|| "id".to_string());
    let mut parent = env("RDT_PARENT").unwrap_or_else(|| "parent_id".to_string());
    let mut label = env("RDT_LABEL").unwrap_or_else(|| "name".to_string());
    let mut order: Option<String> = env("RDT_ORDER");
    let mut select_action: Option<String> = env("RDT_SELECT_ACTION");
    let mut descending = false;
    let mut collapsed = false;
    let mut filters = Vec::new();
    let mut menu = Vec::new();
    let mut container: Option<ContainerId> = None;
    let mut tag: Option<String> = None;
    let mut format = OutputFormat::Script;

    let mut i = 0usize;
    while i < args.len() {
        let a = args[i].as_str();
        match a {
            "--db" => {
                i += 1;
                let v = args.get(i).ok_or("--db requires FILE")?;
                db = Some(PathBuf::from(v));
            }
            "--table" => {
                i += 1;
                table = Some(args.get(i).ok_or("--table requires NAME")?.clone());
            }
            "--key" => {
                i += 1;
                key = args.get(i).ok_or("--key requires COL")?.clone();
            }
            "--parent" => {
                i += 1;
                parent = args.get(i).ok_or("--parent requires COL")?.clone();
            }
            "--label" => {
                i += 1;
                label = args.get(i).ok_or("--label requires COL")?.clone();
            }
            "--order" => {
                i += 1;
                order = Some(args.get(i).ok_or("--order requires COL")?.clone());
            }
            "--desc" => descending = true,
            "--collapsed" => collapsed = true,
            "--where" => {
                i += 1;
                let v = args.get(i).ok_or("--where requires COL=VALUE")?;
                let (field, value) = v
                    .split_once('=')
                    .ok_or("--where must look like COL=VALUE")?;
                filters.push(Filter::equals(field.trim(), value));
            }
            "--select-action" => {
                i += 1;
                select_action = Some(args.get(i).ok_or("--select-action requires TOKEN")?.clone());
            }
            "--menu" => {
                i += 1;
                let v = args.get(i).ok_or("--menu requires LABEL=TOKEN")?;
                let (label, token) = v
                    .split_once('=')
                    .ok_or("--menu must look like LABEL=TOKEN")?;
                let token = ActionToken::new(token).map_err(|e| format!("--menu: {}", e.message()))?;
                menu.push((label.to_string(), token));
            }
            "--container" => {
                i += 1;
                let v = args.get(i).ok_or("--container requires ID")?;
                container = Some(
                    ContainerId::try_new(v.as_str())
                        .map_err(|e| format!("--container: {}", e.message()))?,
                );
            }
            "--tag" => {
                i += 1;
                tag = Some(args.get(i).ok_or("--tag requires NAME")?.clone());
            }
            "--format" => {
                i += 1;
                let v = args.get(i).ok_or("--format requires script|html|json")?;
                format = match v.as_str() {
                    "script" => OutputFormat::Script,
                    "html" => OutputFormat::Html,
                    "json" => OutputFormat::Json,
                    other => return Err(format!("unknown --format {other:?}")),
                };
            }
            other => return Err(format!("unknown argument {other:?}\n\n{}", usage())),
        }
        i += 1;
    }

    let db = db.ok_or("missing --db (or RDT_DB)")?;
    let table = table.ok_or("missing --table (or RDT_TABLE)")?;

    let mut source = SourceConfig::new(table, key, parent, label);
    if let Some(order) = order {
        source = source.order_by(order, descending);
    }
    source.filters = filters;

    let mut widget = WidgetConfig::new(source);
    if collapsed {
        widget.collapse();
    }
    if let Some(token) = select_action {
        let token = ActionToken::new(token).map_err(|e| format!("--select-action: {}", e.message()))?;
        widget.set_item_action(token);
    }
    for (label, token) in menu {
        widget.add_context_action(label, token);
    }
    if let Some(tag) = tag {
        widget
            .tag_name(&tag)
            .map_err(|e| format!("--tag: {}", e.message()))?;
    }

    Ok(Parsed::Run(Box::new(RenderConfig {
        db,
        widget,
        container,
        format,
    })))
}

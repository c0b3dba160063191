#![forbid(unsafe_code)]

use super::escape::js_string;
use super::types::Command;
use crate::ids::ContainerId;
use std::fmt::Write as _;

/// Client-side transport function that executes an action token.
pub const EXECUTE_FN: &str = "__adianti_ajax_exec";

/// Serializes `commands` into the client script that mounts the tree on the
/// element whose id is `container`.
///
/// Bindings inside the wrapper function are fixed names; the container id only
/// ever appears as a string literal, so any valid id yields a runnable script.
pub fn render_script(container: &ContainerId, commands: &[Command]) -> String {
    let tree = "tree";
    let mount = "mount";

    let mut out = String::new();
    out.push_str("(function () {\n");
    let _ = writeln!(
        out,
        "  const {mount} = document.getElementById({});",
        js_string(container.as_str())
    );
    let _ = writeln!(out, "  const {tree} = new VanillaTree({mount});");

    for command in commands {
        match command {
            Command::AddNode {
                id,
                label,
                parent_id,
                opened,
            } => {
                let _ = write!(out, "  {tree}.add({{label: {}", js_string(label));
                if let Some(parent_id) = parent_id {
                    let _ = write!(out, ", parent: {}", js_string(parent_id.as_str()));
                }
                let _ = writeln!(
                    out,
                    ", id: {}, opened: {opened}}});",
                    js_string(id.as_str())
                );
            }
            Command::BindSelect { action_id } => {
                let _ = writeln!(
                    out,
                    "  {mount}.addEventListener(\"vtree-select\", function (evt) {{\n    {EXECUTE_FN}({} + \"&key=\" + encodeURIComponent(evt.detail.id));\n  }});",
                    js_string(action_id.as_str())
                );
            }
            Command::BindContextMenu { entries } => {
                let _ = writeln!(out, "  {tree}.contextmenu = [");
                for entry in entries {
                    let _ = writeln!(
                        out,
                        "    {{label: {}, action: function (id) {{ {EXECUTE_FN}({} + \"&key=\" + encodeURIComponent(id)); }}}},",
                        js_string(&entry.label),
                        js_string(entry.action_id.as_str())
                    );
                }
                out.push_str("  ];\n");
            }
        }
    }

    out.push_str("})();\n");
    out
}

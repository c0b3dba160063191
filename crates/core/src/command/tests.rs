use super::*;
use crate::error::{TextField, TreeError};
use crate::ids::{ActionToken, ContainerId, NodeId};
use crate::tree::{Record, build};

fn id(value: &str) -> NodeId {
    NodeId::try_new(value).unwrap()
}

fn token(value: &str) -> ActionToken {
    ActionToken::new(value).unwrap()
}

fn sample_records() -> Vec<Record> {
    vec![
        Record::root("1", "Root"),
        Record::child("2", "1", "Child A"),
        Record::child("3", "1", "Child B"),
    ]
}

#[test]
fn emits_one_add_node_per_record() {
    let tree = build(&sample_records()).unwrap();
    let commands = emit(&tree, false).unwrap();
    assert_eq!(
        commands,
        vec![
            Command::AddNode {
                id: id("1"),
                label: "Root".to_string(),
                parent_id: None,
                opened: true,
            },
            Command::AddNode {
                id: id("2"),
                label: "Child A".to_string(),
                parent_id: Some(id("1")),
                opened: true,
            },
            Command::AddNode {
                id: id("3"),
                label: "Child B".to_string(),
                parent_id: Some(id("1")),
                opened: true,
            },
        ]
    );
    assert!(bind(&Bindings::new()).unwrap().is_empty());
}

#[test]
fn emission_keeps_record_order_even_when_children_come_first() {
    let records = vec![
        Record::child("c", "b", "leaf"),
        Record::child("b", "a", "mid"),
        Record::root("a", "top"),
    ];
    let tree = build(&records).unwrap();
    let keys: Vec<String> = emit(&tree, false)
        .unwrap()
        .into_iter()
        .map(|command| match command {
            Command::AddNode { id, .. } => id.into_string(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(keys, vec!["c", "b", "a"]);
}

#[test]
fn collapse_flag_applies_to_every_node() {
    let tree = build(&sample_records()).unwrap();
    let opened_flags = |collapsed| -> Vec<bool> {
        emit(&tree, collapsed)
            .unwrap()
            .into_iter()
            .map(|command| match command {
                Command::AddNode { opened, .. } => opened,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    };
    assert_eq!(opened_flags(true), vec![false, false, false]);
    assert_eq!(opened_flags(false), vec![true, true, true]);
}

#[test]
fn control_characters_in_labels_abort_emission() {
    let records = vec![
        Record::root("1", "fine\tlabel\r\n"),
        Record::child("2", "1", "bell\u{0007}"),
    ];
    let tree = build(&records).unwrap();
    assert_eq!(
        emit(&tree, false).unwrap_err(),
        TreeError::Escape {
            key: "2".to_string(),
            field: TextField::Label,
        }
    );
}

#[test]
fn js_string_round_trips_through_json_parser() {
    let samples = [
        "plain",
        "it's \"quoted\"",
        "back\\slash",
        "line\nbreak\r\ttab",
        "</script><script>alert(1)</script>",
        "a & b <c>",
        "sep\u{2028}para\u{2029}",
        "ünïcödé 日本",
        "'); evil(); ('",
    ];
    for sample in samples {
        let literal = js_string(sample);
        assert!(literal.starts_with('"') && literal.ends_with('"'));
        assert!(!literal.contains('\n'));
        assert!(!literal.contains('<'));
        assert!(!literal.contains('\u{2028}'));
        let parsed: String = serde_json::from_str(&literal).unwrap();
        assert_eq!(parsed, sample);
    }
}

#[test]
fn transport_safety_allows_only_whitespace_controls() {
    assert!(is_transport_safe("tab\tnl\ncr\r"));
    assert!(!is_transport_safe("nul\u{0000}"));
    assert!(!is_transport_safe("esc\u{001b}[31m"));
    assert!(!is_transport_safe("c1\u{0085}"));
}

#[test]
fn context_menu_binds_once_after_nodes() {
    let mut bindings = Bindings::new();
    assert!(bindings.add_menu_entry(MenuEntry::new("Delete", token("act123"))));
    assert!(!bindings.add_menu_entry(MenuEntry::new("Delete", token("act123"))));

    let first = bind(&bindings).unwrap();
    let second = bind(&bindings).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![Command::BindContextMenu {
            entries: vec![MenuEntry::new("Delete", token("act123"))],
        }]
    );
}

#[test]
fn menu_entries_keep_registration_order() {
    let mut bindings = Bindings::new();
    bindings.add_menu_entry(MenuEntry::new("Open", token("open")));
    bindings.add_menu_entry(MenuEntry::new("Rename", token("rename")));
    bindings.add_menu_entry(MenuEntry::new("Delete", token("delete")));
    bindings.set_select(token("select"));

    let commands = bind(&bindings).unwrap();
    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands[0],
        Command::BindSelect {
            action_id: token("select")
        }
    );
    let Command::BindContextMenu { entries } = &commands[1] else {
        panic!("expected context menu, got {:?}", commands[1]);
    };
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Open", "Rename", "Delete"]);

    assert_eq!(
        bindings.menu_token(1, &id("9")).as_deref(),
        Some("rename&key=9")
    );
    assert_eq!(
        bindings.select_token(&id("9")).as_deref(),
        Some("select&key=9")
    );
    assert_eq!(bindings.menu_token(3, &id("9")), None);
}

#[test]
fn unsafe_action_text_is_rejected() {
    assert_eq!(
        bind_select(&token("act\u{0000}")).unwrap_err(),
        TreeError::Escape {
            key: "select".to_string(),
            field: TextField::SelectAction,
        }
    );
    let entries = vec![
        MenuEntry::new("Ok", token("ok")),
        MenuEntry::new("Bad\u{001b}", token("bad")),
    ];
    assert_eq!(
        bind_context_menu(&entries).unwrap_err(),
        TreeError::Escape {
            key: "menu[1]".to_string(),
            field: TextField::MenuLabel,
        }
    );
    assert_eq!(bind_context_menu(&[]).unwrap(), None);
}

#[test]
fn script_embeds_commands_with_escaped_text() {
    let records = vec![
        Record::root("1", "Root"),
        Record::child("2", "1", "O'Brien \"</script>\""),
    ];
    let tree = build(&records).unwrap();
    let mut commands = emit(&tree, true).unwrap();
    let mut bindings = Bindings::new();
    bindings.set_select(token("class=Nodes&method=onSelect"));
    bindings.add_menu_entry(MenuEntry::new("Delete", token("act123")));
    commands.extend(bind(&bindings).unwrap());

    let container = ContainerId::try_new("tree-main").unwrap();
    let script = render_script(&container, &commands);

    assert!(script.contains("const mount = document.getElementById(\"tree-main\");"));
    assert!(script.contains("const tree = new VanillaTree(mount);"));
    assert!(script.contains("tree.add({label: \"Root\", id: \"1\", opened: false});"));
    assert!(script.contains(
        "tree.add({label: \"O'Brien \\\"\\u003c/script\\u003e\\\"\", parent: \"1\", id: \"2\", opened: false});"
    ));
    assert!(script.contains(
        "__adianti_ajax_exec(\"class=Nodes\\u0026method=onSelect\" + \"&key=\" + encodeURIComponent(evt.detail.id));"
    ));
    assert!(script.contains("{label: \"Delete\", action: function (id) {"));
    assert!(!script.contains("</script>"));

    let add_pos = script.find("tree.add(").unwrap();
    let menu_pos = script.find("tree.contextmenu").unwrap();
    assert!(add_pos < menu_pos);
}

#[test]
fn commands_serialize_as_tagged_json() {
    let command = Command::AddNode {
        id: id("2"),
        label: "Child".to_string(),
        parent_id: Some(id("1")),
        opened: true,
    };
    assert_eq!(
        serde_json::to_value(&command).unwrap(),
        serde_json::json!({"op": "add_node", "id": "2", "label": "Child", "parent_id": "1", "opened": true})
    );
    let root = Command::AddNode {
        id: id("1"),
        label: "Root".to_string(),
        parent_id: None,
        opened: false,
    };
    assert_eq!(
        serde_json::to_value(&root).unwrap(),
        serde_json::json!({"op": "add_node", "id": "1", "label": "Root", "opened": false})
    );
}

#[test]
fn script_bindings_do_not_depend_on_container_id() {
    let tree = build(&[Record::root("1", "Root")]).unwrap();
    let mut commands = emit(&tree, false).unwrap();
    commands.push(Command::BindSelect {
        action_id: token("act"),
    });

    for raw in ["class", "let", "document", "VanillaTree", "tree", "mount"] {
        let container = ContainerId::try_new(raw).unwrap();
        let script = render_script(&container, &commands);
        assert!(script.contains(&format!(
            "  const mount = document.getElementById(\"{raw}\");\n"
        )));
        assert!(script.contains("  const tree = new VanillaTree(mount);\n"));
        assert!(script.contains("  tree.add({label: \"Root\", id: \"1\", opened: true});\n"));
        assert!(script.contains("  mount.addEventListener(\"vtree-select\""));
        assert_eq!(script.matches(&format!("\"{raw}\"")).count(), 1);
    }
}

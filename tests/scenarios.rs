use nodeflow_history::{
    Action, Config, Edge, Editor, FontSize, Node, NodeDelta, Position, Snapshot, dangling_edges,
    parse_script, run_script,
};

fn two_nodes() -> Snapshot {
    Snapshot::new(
        vec![
            Node::new("n1", Position::new(0.0, 0.0)),
            Node::new("n2", Position::new(50.0, 50.0)),
        ],
        Vec::new(),
    )
}

fn selected_flags(editor: &Editor) -> Vec<bool> {
    editor.present().nodes.iter().map(|node| node.selected).collect()
}

#[test]
fn selection_is_an_undoable_step() {
    let mut editor = Editor::new(two_nodes(), &Config::default());
    assert!(!editor.can_undo());

    editor.select_node("n1");
    assert_eq!(selected_flags(&editor), vec![true, false]);
    assert!(editor.can_undo());

    editor.dispatch(Action::Undo);
    assert_eq!(selected_flags(&editor), vec![false, false]);
    assert!(!editor.can_undo());
    assert!(editor.can_redo());
}

#[test]
fn staged_attributes_apply_after_selecting() {
    let start = Snapshot::new(
        vec![Node::new("node-1", Position::default())
            .with_color("#fff")
            .with_font_size(FontSize::clamped(16))],
        Vec::new(),
    );
    let mut editor = Editor::new(start, &Config::default());

    editor.edit_pending_color("#ff0000");
    editor.edit_pending_font_size(20);
    editor.select_node("node-1");
    editor.commit_attributes();

    let node = &editor.present().nodes[0];
    assert_eq!(node.id, "node-1");
    assert_eq!(node.color.as_str(), "#ff0000");
    assert_eq!(node.font_size.get(), 20);
    assert!(node.selected);
    assert_eq!(editor.history().past.len(), 2);

    editor.undo();
    let node = &editor.present().nodes[0];
    assert_eq!(node.color.as_str(), "#fff");
    assert!(node.selected);
}

#[test]
fn removing_a_node_keeps_its_edges() {
    let start = Snapshot::new(
        vec![
            Node::new("n1", Position::default()),
            Node::new("n2", Position::default()),
        ],
        vec![Edge::new("e1", "n1", "n2")],
    );
    let mut editor = Editor::new(start, &Config::default());
    editor.apply_node_deltas(&[NodeDelta::Remove {
        id: "n1".to_string(),
    }]);

    let present = editor.present();
    assert_eq!(present.nodes.len(), 1);
    assert_eq!(present.edges, vec![Edge::new("e1", "n1", "n2")]);
    assert!(!present.contains_node(&present.edges[0].source));
    assert_eq!(dangling_edges(present).len(), 1);

    editor.prune_dangling_edges();
    assert!(editor.present().edges.is_empty());
    editor.undo();
    assert_eq!(editor.present().edges.len(), 1);
}

#[test]
fn commit_after_undo_discards_abandoned_future() {
    let mut editor = Editor::new(two_nodes(), &Config::default());
    editor.select_node("n1");
    editor.select_node("n2");
    editor.undo();
    assert!(editor.can_redo());

    editor.apply_node_deltas(&[NodeDelta::Move {
        id: "n2".to_string(),
        position: Position::new(1.0, 1.0),
    }]);
    assert!(!editor.can_redo());
    assert!(!editor.redo());
    assert_eq!(editor.history().past.len(), 2);
}

#[test]
fn redo_restores_the_exact_snapshot() {
    let mut editor = Editor::new(two_nodes(), &Config::default());
    editor.apply_node_deltas(&[NodeDelta::Move {
        id: "n1".to_string(),
        position: Position::new(0.1, 0.2),
    }]);
    let after_move = editor.present().clone();

    editor.undo();
    assert_ne!(editor.present(), &after_move);
    editor.redo();
    assert_eq!(editor.present(), &after_move);
}

#[test]
fn script_replays_a_full_session() {
    let mut config = Config::default();
    config.document.seed = Some(11);
    config.document.node_count = 3;
    let mut editor = Editor::from_config(&config);

    let script = "\
# recolor the first node
select node-1
color #00ff00
font 13
apply
# rewire
disconnect edge-1
connect edge-x node-3 node-1
remove node-2
undo
redo
";
    let commands = parse_script(script).unwrap();
    run_script(&mut editor, &commands);

    let present = editor.present();
    let first = present.node("node-1").unwrap();
    assert_eq!(first.color.as_str(), "#00ff00");
    assert_eq!(first.font_size.get(), 13);
    assert!(present.node("node-2").is_none());
    let edge_ids: Vec<&str> = present.edges.iter().map(|edge| edge.id.as_str()).collect();
    assert_eq!(edge_ids, vec!["edge-2", "edge-x"]);
    assert_eq!(dangling_edges(present).len(), 1);
    assert_eq!(editor.history().past.len(), 5);
    assert!(!editor.can_redo());
}

#[test]
fn fixture_session_replays() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("session.txt");
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let commands = parse_script(&input).expect("parse failed");

    let mut config = Config::default();
    config.document.seed = Some(5);
    let mut editor = Editor::from_config(&config);
    run_script(&mut editor, &commands);

    let present = editor.present();
    let first = present.node("node-1").unwrap();
    assert_eq!(first.color.as_str(), "#ff0000");
    assert_eq!(first.font_size.get(), 20);
    assert!(first.selected);
    assert_eq!(present.node("node-2").unwrap().position, Position::new(120.0, 40.0));
    assert!(present.node("node-3").is_none());
    assert_eq!(present.node("node-11").unwrap().label, "Scratch");

    let mut dangling: Vec<&str> = dangling_edges(present)
        .into_iter()
        .map(|edge| edge.id.as_str())
        .collect();
    dangling.sort();
    assert_eq!(dangling, vec!["edge-2", "edge-3"]);
    // select, apply, two moves (one undone), remove, add, connect
    assert_eq!(editor.history().past.len(), 6);
    assert!(!editor.can_redo());
}

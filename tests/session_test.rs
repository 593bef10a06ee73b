//! Edit session: structural edits, refusals and selection cursor policy.

use rstest::{fixture, rstest};

use treesketch::application::{EditSession, SessionOptions};
use treesketch::domain::style::THIN;
use treesketch::domain::{DomainError, Label, NodeId};
use treesketch::util::testing;

#[fixture]
fn session() -> EditSession {
    testing::init_test_setup();
    EditSession::new(Label::new("R").unwrap())
}

/// R / A (X) / B, returning (A, B, X)
fn populate(session: &mut EditSession) -> (NodeId, NodeId, NodeId) {
    let root = session.tree().root_id();
    let a = session.insert_child(root, "A").unwrap();
    let b = session.insert_child(root, "B").unwrap();
    let x = session.insert_child(a, "X").unwrap();
    (a, b, x)
}

#[rstest]
fn given_new_session_when_inspecting_then_cursor_on_root(session: EditSession) {
    assert_eq!(session.selected(), session.tree().root_id());
    assert_eq!(session.selected_node().label().as_str(), "R");
}

#[rstest]
fn given_padded_label_when_inserting_child_then_found_under_parent_trimmed(
    mut session: EditSession,
) {
    let root = session.tree().root_id();
    let id = session.insert_child(root, "  notes  ").unwrap();

    let node = session.find_by_id(id).unwrap();
    assert_eq!(node.label().as_str(), "notes");
    assert_eq!(session.tree().parent_id(id), Some(root));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn given_blank_label_when_inserting_then_refuses_without_change(
    mut session: EditSession,
    #[case] label: &str,
) {
    let root = session.tree().root_id();
    let (a, _, _) = populate(&mut session);
    let before = session.render(&THIN);

    assert_eq!(
        session.insert_child(root, label),
        Err(DomainError::EmptyLabel)
    );
    assert_eq!(
        session.insert_sibling(a, label),
        Err(DomainError::EmptyLabel)
    );
    assert_eq!(session.render(&THIN), before);
}

#[rstest]
fn given_children_when_inserting_then_insertion_order_kept(mut session: EditSession) {
    let root = session.tree().root_id();
    for label in ["one", "two", "three"] {
        session.insert_child(root, label).unwrap();
    }
    let labels: Vec<String> = session
        .tree()
        .child_ids(root)
        .into_iter()
        .map(|id| session.find_by_id(id).unwrap().label().to_string())
        .collect();
    assert_eq!(labels, vec!["one", "two", "three"]);
}

#[rstest]
fn given_root_when_inserting_sibling_then_refuses_and_render_unchanged(
    mut session: EditSession,
) {
    populate(&mut session);
    let root = session.tree().root_id();
    let before = session.render(&THIN);

    assert_eq!(
        session.insert_sibling(root, "other root"),
        Err(DomainError::RootHasNoSiblings)
    );
    assert_eq!(session.render(&THIN), before);
    assert_eq!(session.tree().len(), 4);
}

#[rstest]
fn given_middle_node_when_inserting_sibling_then_lands_directly_after(
    mut session: EditSession,
) {
    let (a, _, _) = populate(&mut session);
    session.insert_sibling(a, "A2").unwrap();

    assert_eq!(
        session.render(&THIN),
        vec!["R", "├── A", "│   └── X", "├── A2", "└── B"]
    );
}

#[rstest]
fn given_rename_when_label_valid_then_replaced_and_old_returned(mut session: EditSession) {
    let (a, _, _) = populate(&mut session);
    let old = session.rename(a, " Alpha ").unwrap();

    assert_eq!(old.as_str(), "A");
    assert_eq!(session.find_by_id(a).unwrap().label().as_str(), "Alpha");
}

#[rstest]
fn given_rename_when_label_empty_then_refuses_and_keeps_label(mut session: EditSession) {
    let (a, _, _) = populate(&mut session);
    assert_eq!(session.rename(a, "  "), Err(DomainError::EmptyLabel));
    assert_eq!(session.find_by_id(a).unwrap().label().as_str(), "A");
}

#[rstest]
fn given_unknown_id_when_selecting_then_cursor_unchanged(mut session: EditSession) {
    let (a, _, _) = populate(&mut session);
    session.select_node(a).unwrap();

    assert_eq!(
        session.select_node(NodeId::from(77)),
        Err(DomainError::NodeNotFound(NodeId::from(77)))
    );
    assert_eq!(session.selected(), a);
}

#[rstest]
fn given_default_options_when_inserting_then_cursor_stays(mut session: EditSession) {
    let root = session.tree().root_id();
    session.insert_child(root, "A").unwrap();
    assert_eq!(session.selected(), root);
}

#[rstest]
fn given_follow_insert_when_inserting_then_cursor_moves_to_new_node() {
    let mut session = EditSession::with_options(
        Label::new("R").unwrap(),
        SessionOptions {
            follow_insert: true,
        },
    );
    let root = session.tree().root_id();
    let a = session.insert_child(root, "A").unwrap();
    assert_eq!(session.selected(), a);

    let b = session.insert_sibling(a, "B").unwrap();
    assert_eq!(session.selected(), b);

    // refused insert keeps the cursor
    let _ = session.insert_child(b, " ");
    assert_eq!(session.selected(), b);
}

#[rstest]
fn given_subtree_when_deleting_then_removes_all_and_cursor_on_parent(
    mut session: EditSession,
) {
    let (a, _, x) = populate(&mut session);
    let root = session.tree().root_id();
    let y = session.insert_child(x, "Y").unwrap();
    let before = session.tree().len();
    let expected = session.tree().subtree_size(a);

    let removed = session.delete_subtree(a).unwrap();

    assert_eq!(removed, expected);
    assert_eq!(removed, 3);
    assert_eq!(session.tree().len(), before - removed);
    assert_eq!(session.selected(), root);
    for gone in [a, x, y] {
        assert!(session.find_by_id(gone).is_none());
    }
    let text = session.render(&THIN).join("\n");
    assert!(!text.contains('A') && !text.contains('X') && !text.contains('Y'));
}

#[rstest]
fn given_cursor_inside_deleted_subtree_when_deleting_then_redirected_to_parent(
    mut session: EditSession,
) {
    let (a, _, x) = populate(&mut session);
    let deep = session.insert_child(x, "deep").unwrap();
    session.select_node(deep).unwrap();

    session.delete_subtree(x).unwrap();

    assert_eq!(session.selected(), a);
    assert!(session.tree().contains(session.selected()));
}

#[rstest]
fn given_cursor_elsewhere_when_deleting_then_moves_to_former_parent(
    mut session: EditSession,
) {
    let (a, b, x) = populate(&mut session);
    session.select_node(b).unwrap();

    session.delete_subtree(x).unwrap();

    assert_eq!(session.selected(), a);
}

#[rstest]
fn given_root_when_deleting_then_refuses(mut session: EditSession) {
    populate(&mut session);
    let root = session.tree().root_id();
    assert_eq!(
        session.delete_subtree(root),
        Err(DomainError::CannotDeleteRoot)
    );
    assert_eq!(session.tree().len(), 4);
}

#[rstest]
fn given_stale_id_when_editing_then_not_found(mut session: EditSession) {
    let (a, _, _) = populate(&mut session);
    session.delete_subtree(a).unwrap();

    assert_eq!(
        session.insert_child(a, "z"),
        Err(DomainError::NodeNotFound(a))
    );
    assert_eq!(
        session.insert_sibling(a, "z"),
        Err(DomainError::NodeNotFound(a))
    );
    assert_eq!(session.rename(a, "z"), Err(DomainError::NodeNotFound(a)));
    assert_eq!(
        session.delete_subtree(a),
        Err(DomainError::NodeNotFound(a))
    );
}

#[rstest]
fn given_sample_tree_when_deleting_a_then_only_b_remains(mut session: EditSession) {
    let (a, _, _) = populate(&mut session);
    session.delete_subtree(a).unwrap();

    assert_eq!(session.render(&THIN), vec!["R", "└── B"]);
    assert_eq!(session.selected_node().label().as_str(), "R");
}

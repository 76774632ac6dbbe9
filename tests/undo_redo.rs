mod common;

use common::{FakeClient, annotating_module, eraser, ids, pen, run_gesture};
use egui::{Rect, pos2};
use pdf_ink::{InkModule, InputEvent};

fn module_with_strokes(count: usize) -> InkModule<FakeClient> {
    let mut module = annotating_module(FakeClient::single_page());
    for i in 0..count {
        let y = 10.0 + 10.0 * i as f32;
        run_gesture(&mut module, &[(10.0, y), (20.0, y)]);
    }
    module.client_mut().clear_records();
    module
}

fn visible_count(module: &InkModule<FakeClient>) -> usize {
    module
        .visible_strokes_input_positions()
        .values()
        .map(Vec::len)
        .sum()
}

#[test]
fn test_undo_everything_then_once_more() {
    let mut module = module_with_strokes(3);

    for remaining in (0..3).rev() {
        module.undo();
        assert_eq!(visible_count(&module), remaining);
    }

    module.client_mut().clear_records();
    module.undo();
    assert!(module.client().invalidations.is_empty());
    assert!(module.client().active_updates.is_empty());
    assert_eq!(module.stroke_count(), 3);
}

#[test]
fn test_redo_at_the_end_is_a_no_op() {
    let mut module = module_with_strokes(2);

    module.redo();
    assert_eq!(visible_count(&module), 2);
    assert!(module.client().invalidations.is_empty());

    module.undo();
    module.redo();
    module.client_mut().clear_records();
    module.redo();
    assert_eq!(visible_count(&module), 2);
    assert!(module.client().invalidations.is_empty());
    assert!(module.client().active_updates.is_empty());
}

#[test]
fn test_undo_and_redo_invalidate_stroke_bounds() {
    let mut module = module_with_strokes(1);
    // Canonical bounds (4, 4)..(16, 6) moved to the page origin at (5, 5).
    let bounds = Rect::from_min_max(pos2(9.0, 9.0), pos2(21.0, 11.0));

    module.undo();
    assert_eq!(module.client().invalidations, vec![bounds]);
    assert_eq!(module.client().active_updates, vec![(0, ids(&[0])[0], false)]);

    module.redo();
    assert_eq!(module.client().invalidations, vec![bounds, bounds]);
    assert_eq!(module.client().active_updates[1], (0, ids(&[0])[0], true));
}

#[test]
fn test_undo_on_hidden_page_skips_invalidation() {
    let mut module = module_with_strokes(1);
    module.client_mut().hidden_pages.push(0);

    module.undo();

    assert_eq!(visible_count(&module), 0);
    assert!(module.client().invalidations.is_empty());
    assert_eq!(module.client().active_updates.len(), 1);
}

#[test]
fn test_undo_of_erase_restores_stroke() {
    let mut module = module_with_strokes(1);
    module.set_tool(eraser(2.0));
    run_gesture(&mut module, &[(15.0, 10.0)]);
    assert_eq!(visible_count(&module), 0);

    module.undo();
    assert_eq!(visible_count(&module), 1);
    module.undo();
    assert_eq!(visible_count(&module), 0);
    module.redo();
    module.redo();
    assert_eq!(visible_count(&module), 0);
}

#[test]
fn test_new_stroke_discards_undone_strokes() {
    let mut module = module_with_strokes(3);
    module.undo();
    module.undo();

    run_gesture(&mut module, &[(40.0, 40.0)]);

    assert_eq!(
        module.client().discarded,
        vec![(0, ids(&[1])[0]), (0, ids(&[2])[0])]
    );
    // The freed ids are handed out again.
    assert_eq!(module.client().added.last().map(|(_, id, _)| *id), Some(ids(&[1])[0]));
    assert_eq!(module.stroke_count(), 2);
    assert!(!module.undo_redo_model().can_redo());

    module.redo();
    assert_eq!(visible_count(&module), 2);
}

#[test]
fn test_erase_gesture_discards_undone_strokes() {
    let mut module = module_with_strokes(2);
    module.undo();
    module.set_tool(eraser(2.0));

    run_gesture(&mut module, &[(50.0, 60.0)]);

    assert_eq!(module.client().discarded, vec![(0, ids(&[1])[0])]);
    assert_eq!(module.next_stroke_id(), ids(&[1])[0]);
    assert_eq!(module.stroke_count(), 1);
}

#[test]
fn test_discard_spans_pages() {
    let mut module = annotating_module(FakeClient::two_pages());
    run_gesture(&mut module, &[(10.0, 10.0)]);
    run_gesture(&mut module, &[(10.0, 120.0)]);
    run_gesture(&mut module, &[(20.0, 20.0)]);
    module.undo();
    module.undo();

    run_gesture(&mut module, &[(30.0, 30.0)]);

    let mut discarded = module.client().discarded.clone();
    discarded.sort();
    assert_eq!(discarded, vec![(0, ids(&[2])[0]), (1, ids(&[1])[0])]);
    let positions = module.strokes_input_positions();
    assert!(!positions.contains_key(&1));
    assert_eq!(positions[&0].len(), 2);
}

#[test]
fn test_undone_erase_is_not_discarded() {
    let mut module = module_with_strokes(1);
    module.set_tool(eraser(2.0));
    run_gesture(&mut module, &[(15.0, 10.0)]);
    module.undo();

    module.set_tool(pen(2.0));
    run_gesture(&mut module, &[(40.0, 40.0)]);

    assert!(module.client().discarded.is_empty());
    assert_eq!(visible_count(&module), 2);
}

#[test]
fn test_undo_during_gesture_is_ignored() {
    let mut module = module_with_strokes(1);
    module.handle_input_event(&InputEvent::down(pos2(30.0, 40.0), 0.0));

    module.undo();
    assert_eq!(visible_count(&module), 1);

    module.handle_input_event(&InputEvent::up(pos2(30.0, 40.0), 0.1));
    assert_eq!(visible_count(&module), 2);

    module.undo();
    assert_eq!(visible_count(&module), 1);
}

#[test]
fn test_ids_restart_at_zero_when_nothing_survives() {
    let mut module = module_with_strokes(2);
    module.undo();
    module.undo();

    run_gesture(&mut module, &[(40.0, 40.0)]);

    assert_eq!(
        module.client().discarded,
        vec![(0, ids(&[0])[0]), (0, ids(&[1])[0])]
    );
    assert_eq!(module.client().added.last().map(|(_, id, _)| *id), Some(ids(&[0])[0]));
    assert_eq!(module.stroke_count(), 1);
    assert_eq!(module.next_stroke_id(), ids(&[1])[0]);
}

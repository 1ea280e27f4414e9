mod support;

use std::sync::Arc;
use std::thread;

use penguin_explorer::ChartComposer;
use penguin_explorer::interaction::{
    Axis, BinderPhase, ReactiveBinder, Selection, SelectionBinder, SelectionChange,
};
use penguin_explorer::render::NullSurface;

fn binder() -> ReactiveBinder<NullSurface> {
    let composer = ChartComposer::with_default_config(support::shared_scenario_dataset());
    ReactiveBinder::new(composer, NullSurface::default()).expect("binder")
}

#[test]
fn startup_renders_the_default_selection() {
    let binder = binder();

    assert_eq!(binder.generation(), 0);
    assert_eq!(binder.phase(), BinderPhase::Idle);
    assert_eq!(
        binder.selection(),
        Selection::new("flipper_length_mm", "bill_length_mm")
    );
    binder.with_surface(|surface| {
        assert_eq!(surface.presented_generations, vec![0]);
        let frame = surface.last_frame.as_ref().expect("initial frame");
        let document = frame.document().expect("chart, not an error");
        assert_eq!(document.panel_count(), 2);
        assert_eq!(
            document.snapshot().plotted_records,
            support::COMPLETE_RECORDS
        );
    });
}

#[test]
fn each_change_replaces_the_surface_content() {
    let binder = binder();

    let generation = binder
        .dispatch(SelectionChange::x("body_mass_g"))
        .expect("dispatch");
    assert_eq!(generation, 1);
    let generation = binder
        .dispatch(SelectionChange::y("bill_depth_mm"))
        .expect("dispatch");
    assert_eq!(generation, 2);

    assert_eq!(binder.phase(), BinderPhase::Idle);
    binder.with_surface(|surface| {
        assert_eq!(surface.presented_generations, vec![0, 1, 2]);
        let frame = surface.last_frame.as_ref().expect("frame");
        assert_eq!(frame.selection, Selection::new("body_mass_g", "bill_depth_mm"));
        let scatter = &frame.document().expect("chart").spec().hconcat[0];
        assert_eq!(scatter.encoding.x.field.as_deref(), Some("body_mass_g"));
        assert_eq!(scatter.encoding.y.field.as_deref(), Some("bill_depth_mm"));
    });
}

#[test]
fn unknown_key_shows_an_error_and_the_next_valid_change_recovers() {
    let binder = binder();

    binder
        .dispatch(SelectionChange::x("wingspan_cm"))
        .expect("render failures are shown, not returned");
    binder.with_surface(|surface| {
        let frame = surface.last_frame.as_ref().expect("frame");
        assert!(frame.is_error());
        assert!(frame.html().contains("Chart unavailable"));
        assert!(frame.html().contains("wingspan_cm"));
    });
    assert_eq!(binder.phase(), BinderPhase::Idle);

    binder
        .dispatch(SelectionChange::x("bill_depth_mm"))
        .expect("dispatch");
    binder.with_surface(|surface| {
        let frame = surface.last_frame.as_ref().expect("frame");
        assert!(!frame.is_error());
        assert_eq!(frame.generation, 2);
    });
}

#[test]
fn dataset_is_shared_not_copied_across_renders() {
    let dataset = support::shared_scenario_dataset();
    let composer = ChartComposer::with_default_config(Arc::clone(&dataset));
    let binder = ReactiveBinder::new(composer, NullSurface::default()).expect("binder");
    for key in ["bill_length_mm", "bill_depth_mm", "body_mass_g"] {
        binder.dispatch(SelectionChange::y(key)).expect("dispatch");
    }

    assert_eq!(Arc::strong_count(&dataset), 2);
    assert!(std::ptr::eq(binder.composer().dataset(), dataset.as_ref()));
}

#[test]
fn concurrent_changes_settle_on_the_latest_selection() {
    let binder = Arc::new(binder());
    let keys = ["bill_length_mm", "bill_depth_mm", "body_mass_g", "flipper_length_mm"];

    let handles: Vec<_> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let binder = Arc::clone(&binder);
            let axis = if i % 2 == 0 { Axis::X } else { Axis::Y };
            let change = SelectionChange::new(axis, *key);
            thread::spawn(move || binder.dispatch(change).expect("dispatch"))
        })
        .collect();
    for handle in handles {
        handle.join().expect("dispatch thread");
    }

    assert_eq!(binder.generation(), keys.len() as u64);
    assert_eq!(binder.phase(), BinderPhase::Idle);
    let selection = binder.selection();
    binder.with_surface(|surface| {
        let generations = &surface.presented_generations;
        assert!(generations.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(generations.last().copied(), Some(keys.len() as u64));
        let frame = surface.last_frame.as_ref().expect("frame");
        assert_eq!(frame.selection, selection);
    });
}

#[test]
fn superseded_render_is_dropped_and_latest_rendered() {
    let mut machine = SelectionBinder::default();
    let composer = ChartComposer::with_default_config(support::shared_scenario_dataset());

    let first = machine
        .on_change(SelectionChange::x("body_mass_g"))
        .ticket
        .expect("ticket");
    let queued = machine.on_change(SelectionChange::x("bill_depth_mm"));
    assert!(queued.ticket.is_none());

    let stale = composer.compose(&first.selection.x, &first.selection.y);
    let completion = machine.complete(first, stale);
    assert!(completion.frame.is_none());

    let next = completion.next.expect("latest selection re-rendered");
    assert_eq!(next.selection.x, "bill_depth_mm");
    let result = composer.compose(&next.selection.x, &next.selection.y);
    let completion = machine.complete(next, result);

    let frame = completion.frame.expect("frame");
    assert_eq!(frame.generation, 2);
    assert!(completion.next.is_none());
    assert_eq!(machine.phase(), BinderPhase::Idle);
}

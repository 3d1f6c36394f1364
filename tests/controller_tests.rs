use glam::Vec3;
use model_carousel::{
    AssetRef, Catalog, CatalogEntry, Generation, LoadState, Notification, Transition, ViewerController,
    ViewerError,
};

fn catalog_of(names: &[&str]) -> Catalog {
    Catalog::new(
        names
            .iter()
            .map(|name| CatalogEntry::new(*name, AssetRef::new(format!("{name}.glb")), Vec3::new(0.0, 0.0, 3.0)))
            .collect(),
    )
    .unwrap()
}

fn five() -> ViewerController {
    ViewerController::new(catalog_of(&["A", "B", "C", "D", "E"]))
}

/// (active_index, is_asset_ready, generation)
fn snapshot(c: &ViewerController) -> (usize, bool, u64) {
    let s = c.state();
    (s.active_index, s.is_asset_ready(), s.generation.0)
}

fn load_current(c: &mut ViewerController) {
    let generation = c.state().generation;
    assert_eq!(c.notify_asset_loaded(generation), Notification::Accepted);
}

// ============================================================================
// Catalog construction
// ============================================================================

#[test]
fn test_empty_catalog_is_rejected() {
    assert_eq!(Catalog::new(vec![]).unwrap_err(), ViewerError::EmptyCatalog);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let entry = |name: &str| CatalogEntry::new(name, AssetRef::new("x.glb"), Vec3::ZERO);
    let err = Catalog::new(vec![entry("A"), entry("B"), entry("A")]).unwrap_err();
    assert_eq!(err, ViewerError::DuplicateEntry("A".into()));
}

// ============================================================================
// Transition properties
// ============================================================================

#[test]
fn test_documented_scenario() {
    let mut c = five();
    assert_eq!(snapshot(&c), (0, false, 0));

    c.notify_asset_loaded(Generation(0));
    assert_eq!(snapshot(&c), (0, true, 0));

    c.select_next();
    assert_eq!(snapshot(&c), (1, false, 1));

    c.notify_asset_loaded(Generation(1));
    assert_eq!(snapshot(&c), (1, true, 1));

    c.select_index(4).unwrap();
    assert_eq!(snapshot(&c), (4, false, 2));

    assert_eq!(c.select_previous(), Transition::Unchanged);
    assert_eq!(snapshot(&c), (4, false, 2));

    c.notify_asset_loaded(Generation(2));
    assert_eq!(snapshot(&c), (4, true, 2));

    c.select_previous();
    assert_eq!(snapshot(&c), (3, false, 3));
}

#[test]
fn test_next_then_previous_is_identity_for_every_index() {
    for start in 0..5 {
        let mut c = five();
        load_current(&mut c);
        if start != 0 {
            c.select_index(start).unwrap();
            load_current(&mut c);
        }

        assert!(c.select_next().is_changed());
        load_current(&mut c);
        assert!(c.select_previous().is_changed());
        load_current(&mut c);

        assert_eq!(c.state().active_index, start);
    }
}

#[test]
fn test_select_then_load_yields_ready_at_index() {
    for i in 1..5 {
        let mut c = five();
        load_current(&mut c);

        let request = c.select_index(i).unwrap().request().expect("selection accepted");
        assert_eq!(request.index, i);
        assert_eq!(c.notify_asset_loaded(request.generation), Notification::Accepted);

        assert!(c.state().is_asset_ready());
        assert_eq!(c.state().active_index, i);
    }
}

#[test]
fn test_transitions_while_loading_are_no_ops() {
    let mut c = five();
    let before = c.state();

    assert_eq!(c.select_next(), Transition::Unchanged);
    assert_eq!(c.select_previous(), Transition::Unchanged);
    assert_eq!(c.select_index(3), Ok(Transition::Unchanged));
    assert_eq!(c.retry(), Transition::Unchanged);

    assert_eq!(c.state(), before);
}

#[test]
fn test_generation_counts_accepted_transitions_only() {
    let mut c = five();
    let mut accepted = 0;

    for step in 0..20 {
        let transition = match step % 4 {
            0 => c.select_next(),
            1 => c.select_previous(),
            2 => c.select_index(step % 5).unwrap(),
            _ => c.select_index(c.state().active_index).unwrap(),
        };
        if transition.is_changed() {
            accepted += 1;
        }
        assert_eq!(c.state().generation, Generation(accepted));

        // Only load every other step so some calls land while loading
        if step % 2 == 1 {
            c.notify_asset_loaded(c.state().generation);
        }
    }
    assert!(accepted > 0);
}

#[test]
fn test_wraparound_at_both_ends() {
    let mut c = five();
    load_current(&mut c);
    c.select_previous();
    assert_eq!(c.state().active_index, 4);

    load_current(&mut c);
    c.select_next();
    assert_eq!(c.state().active_index, 0);
}

#[test]
fn test_single_entry_catalog_wraps_onto_itself() {
    let mut c = ViewerController::new(catalog_of(&["Only"]));
    load_current(&mut c);

    let request = c.select_next().request().unwrap();
    assert_eq!(request.index, 0);
    assert_eq!(request.generation, Generation(1));
}

// ============================================================================
// Selection preconditions
// ============================================================================

#[test]
fn test_selecting_active_index_is_a_no_op() {
    let mut c = five();
    load_current(&mut c);
    assert_eq!(c.select_index(0), Ok(Transition::Unchanged));
    assert!(c.state().is_asset_ready());
}

#[test]
fn test_out_of_range_selection_is_an_error() {
    let mut c = five();
    load_current(&mut c);
    let before = c.state();

    assert_eq!(
        c.select_index(5),
        Err(ViewerError::IndexOutOfRange { index: 5, len: 5 })
    );
    assert_eq!(c.state(), before);
}

// ============================================================================
// Stale callbacks and failure recovery
// ============================================================================

#[test]
fn test_stale_load_does_not_mark_newer_selection_ready() {
    let mut c = five();
    // Fail the first asset so navigation is allowed while its decode is "pending"
    c.notify_asset_failed(Generation(0), "slow disk");
    c.select_next();

    assert_eq!(c.notify_asset_loaded(Generation(0)), Notification::Stale);
    assert_eq!(snapshot(&c), (1, false, 1));
}

#[test]
fn test_stale_failure_is_ignored() {
    let mut c = five();
    load_current(&mut c);
    c.select_next();

    assert_eq!(c.notify_asset_failed(Generation(0), "late"), Notification::Stale);
    assert_eq!(c.state().load, LoadState::Loading);
    assert_eq!(c.failure(), None);
}

#[test]
fn test_failure_re_enables_navigation() {
    let mut c = five();
    assert_eq!(c.notify_asset_failed(Generation(0), "no such file"), Notification::Accepted);

    let state = c.state();
    assert_eq!(state.load, LoadState::Failed);
    assert!(!state.is_asset_ready());
    assert!(c.can_navigate());

    assert!(c.select_next().is_changed());
    assert_eq!(snapshot(&c), (1, false, 1));
}

#[test]
fn test_retry_reloads_same_index_with_new_generation() {
    let mut c = five();
    c.notify_asset_failed(Generation(0), "corrupt");

    let request = c.retry().request().expect("retry accepted after failure");
    assert_eq!(request.index, 0);
    assert_eq!(request.generation, Generation(1));
    assert_eq!(c.state().load, LoadState::Loading);
    assert_eq!(c.failure(), None);

    // A late outcome of the failed attempt cannot complete the retry
    assert_eq!(c.notify_asset_loaded(Generation(0)), Notification::Stale);
    assert_eq!(c.notify_asset_loaded(Generation(1)), Notification::Accepted);
}

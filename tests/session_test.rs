use std::time::Duration;

use terrascape::{
    data_structures::surface::{SurfaceId, SurfacesChanged},
    error::SceneError,
    flow::{ArSession, Tool, UiCommand, UiResponse},
    persistence::MemoryStore,
    placement::{ArmOutcome, TapOutcome},
};

use crate::common::test_utils::{FakeGraph, ScriptedHits, pose, surface, tap, test_context};

mod common;

const FRAME: Duration = Duration::from_millis(16);

type Session = ArSession<FakeGraph, MemoryStore>;

fn session() -> Session {
    let mut session = ArSession::new(test_context(), FakeGraph::new(), MemoryStore::new());
    session.subscribe();
    session
}

fn two_close_surfaces() -> SurfacesChanged {
    SurfacesChanged {
        added: vec![surface(1, 0.0, 0.0, 0.0), surface(2, 0.03, 0.0, 0.0)],
        ..Default::default()
    }
}

fn hits() -> ScriptedHits {
    let mut hits = ScriptedHits::new();
    hits.surface_at(10.0, 10.0, 1, pose(1.0, 0.0, 2.0))
        .surface_at(20.0, 20.0, 2, pose(1.01, 0.0, 2.0))
        .surface_at(30.0, 30.0, 1, pose(-2.0, 0.0, 1.0));
    hits
}

fn arm(session: &mut Session, key: &str) -> UiResponse {
    session
        .on_ui(UiCommand::ArmPlacement(Some(key.to_string())))
        .unwrap()
}

#[test]
fn should_place_save_and_restore_a_bench() {
    let mut session = session();
    let mut hits = hits();
    assert_eq!(session.on_surfaces_changed(&two_close_surfaces()), vec![SurfaceId(2)]);

    assert_eq!(arm(&mut session, "Bench_01"), UiResponse::Armed(ArmOutcome::Armed));
    let Some(TapOutcome::Placed(bench)) = session.on_frame(&hits, &tap(10.0, 10.0), FRAME) else {
        panic!("bench should be placed");
    };
    hits.entity_at(10.0, 10.0, bench);

    assert_eq!(session.on_ui(UiCommand::Save).unwrap(), UiResponse::Saved(1));

    arm(&mut session, "Tree_A");
    assert!(matches!(
        session.on_frame(&hits, &tap(30.0, 30.0), FRAME),
        Some(TapOutcome::Placed(_))
    ));
    assert_eq!(session.scene().len(), 2);

    let UiResponse::Loaded(report) = session.on_ui(UiCommand::Load).unwrap() else {
        panic!("load should report");
    };
    assert_eq!(report.loaded, 1);
    assert_eq!(session.scene().len(), 1);
    let restored = &session.scene().entities()[0];
    assert_eq!(restored.prefab_key(), "Bench_01");
    assert_eq!(restored.transform().position, pose(1.0, 0.0, 2.0).position);
    assert_eq!(session.graph().objects.len(), 1);
}

#[test]
fn should_not_place_on_duplicate_surface() {
    let mut session = session();
    session.on_surfaces_changed(&two_close_surfaces());

    arm(&mut session, "Bench_01");
    assert_eq!(
        session.on_frame(&hits(), &tap(20.0, 20.0), FRAME),
        Some(TapOutcome::PlacementMissed)
    );
    assert!(session.scene().is_empty());
}

#[test]
fn should_ignore_surface_changes_while_unsubscribed() {
    let mut session = session();
    session.unsubscribe();
    assert!(!session.is_subscribed());

    assert!(session.on_surfaces_changed(&two_close_surfaces()).is_empty());
    assert!(session.planes().is_empty());
}

#[test]
fn should_deactivate_merged_surface_while_hidden() {
    let mut session = session();
    session.on_surfaces_changed(&SurfacesChanged {
        added: vec![surface(1, 0.0, 0.0, 0.0), surface(2, 1.0, 0.0, 2.0)],
        ..Default::default()
    });
    session.on_ui(UiCommand::ShowSurfaces(false)).unwrap();

    let off = session.on_surfaces_changed(&SurfacesChanged {
        updated: vec![surface(2, 1.0, 0.0, 2.0).subsumed_into(SurfaceId(1))],
        ..Default::default()
    });
    assert_eq!(off, vec![SurfaceId(2)]);
    session.on_ui(UiCommand::ShowSurfaces(true)).unwrap();
    assert!(!session.planes().is_active(SurfaceId(2)));

    arm(&mut session, "Bench_01");
    assert_eq!(
        session.on_frame(&hits(), &tap(20.0, 20.0), FRAME),
        Some(TapOutcome::PlacementMissed)
    );
    assert!(session.scene().is_empty());
}

#[test]
fn should_fade_hidden_surfaces_but_keep_them_hittable() {
    let mut session = session();
    session.on_ui(UiCommand::ShowSurfaces(false)).unwrap();
    for _ in 0..120 {
        session.on_frame(&hits(), &[], FRAME);
    }
    assert!(session.planes().alpha() < 0.2);

    arm(&mut session, "Gazebo");
    assert!(matches!(
        session.on_frame(&hits(), &tap(10.0, 10.0), FRAME),
        Some(TapOutcome::Placed(_))
    ));
}

#[test]
fn should_delete_selection_from_ui() {
    let mut session = session();
    let mut hits = hits();
    assert_eq!(
        session.on_ui(UiCommand::DeleteSelected).unwrap(),
        UiResponse::Deleted(None)
    );

    arm(&mut session, "Bench_01");
    let Some(TapOutcome::Placed(bench)) = session.on_frame(&hits, &tap(10.0, 10.0), FRAME) else {
        panic!("bench should be placed");
    };
    hits.entity_at(10.0, 10.0, bench);
    session.on_frame(&hits, &tap(10.0, 10.0), FRAME);
    assert!(session.delete_affordance_visible());

    assert_eq!(
        session.on_ui(UiCommand::DeleteSelected).unwrap(),
        UiResponse::Deleted(Some(bench))
    );
    assert!(session.scene().is_empty());
    assert!(!session.delete_affordance_visible());
}

#[test]
fn should_switch_tools_and_drop_selection() {
    let mut session = session();
    let mut hits = hits();
    arm(&mut session, "Bench_01");
    let Some(TapOutcome::Placed(bench)) = session.on_frame(&hits, &tap(10.0, 10.0), FRAME) else {
        panic!("bench should be placed");
    };
    hits.entity_at(10.0, 10.0, bench);
    session.on_frame(&hits, &tap(10.0, 10.0), FRAME);

    session.on_ui(UiCommand::SelectTool(Tool::Measure)).unwrap();
    assert_eq!(session.tool(), Tool::Measure);
    assert_eq!(session.scene().selected(), None);

    assert_eq!(session.on_frame(&hits, &tap(30.0, 30.0), FRAME), None);
    assert_eq!(session.measure().points().len(), 1);
    assert_eq!(session.scene().len(), 1);

    session.on_ui(UiCommand::ResetMeasurement).unwrap();
    assert!(session.measure().points().is_empty());
    assert_eq!(session.graph().objects.len(), 1);
}

#[test]
fn should_fail_load_without_save_and_keep_scene() {
    let mut session = session();
    arm(&mut session, "Bench_01");
    session.on_frame(&hits(), &tap(10.0, 10.0), FRAME);

    let result = session.on_ui(UiCommand::Load);
    assert!(matches!(result, Err(SceneError::SnapshotMissing)));
    assert_eq!(session.scene().len(), 1);
}

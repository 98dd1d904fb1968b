//! The action service as the editor drives it.

use modelsync::actions::{ActionError, ActionService};
use modelsync::aggregator::Aggregator;
use modelsync::base::LanguageString;
use modelsync::diagram::{DiagramSync, EdgeKind};

use crate::helpers::canvas::Canvas;
use crate::helpers::fixtures::{SOURCE, at, class, class_profile, id, package, relationship};

fn service() -> ActionService {
    ActionService::new(package(vec![
        class("C1"),
        class("C2"),
        relationship("R", "C1", "C2"),
        class_profile("P", &["C1"]),
    ]))
}

#[test]
fn test_refused_action_becomes_notification() {
    let mut service = service();

    assert!(service.add_relation(&id("R")).is_none());
    assert!(service.add_node(&id("R"), at(0.0, 0.0)).is_none());

    let notifications = service.take_notifications();
    assert_eq!(notifications.len(), 2);
    assert!(matches!(
        notifications[0].error,
        ActionError::EndsNotInVisualModel { .. }
    ));
    assert!(matches!(notifications[1].error, ActionError::NotANode { .. }));
    assert!(service.notifications().is_empty());
}

#[test]
fn test_session_keeps_diagram_in_step() {
    let mut service = service();
    let mut sync = DiagramSync::new();
    let mut canvas = Canvas::default();

    service.add_node(&id("C1"), at(0.0, 0.0)).unwrap();
    service.add_node(&id("C2"), at(100.0, 0.0)).unwrap();
    service.add_node(&id("P"), at(0.0, 100.0)).unwrap();
    sync.sync(service.aggregator(), &mut canvas);

    assert_eq!(canvas.replaced, 1);
    assert_eq!(canvas.nodes.len(), 3);
    let kinds: Vec<EdgeKind> = canvas.edges.values().map(|edge| edge.kind).collect();
    assert_eq!(kinds, vec![EdgeKind::Relationship, EdgeKind::Profile]);

    service.delete_from_semantic_model(&id("C2")).unwrap();
    let diff = sync.sync(service.aggregator(), &mut canvas);

    assert_eq!(diff.removed_nodes.len(), 1);
    assert_eq!(diff.removed_edges.len(), 1);
    assert_eq!(canvas.replaced, 1);
    assert_eq!(canvas.nodes.len(), 2);
    assert_eq!(canvas.edges.len(), 1);
    assert_eq!(&canvas.nodes, &sync.content().nodes);
}

#[test]
fn test_new_view_becomes_active_on_request() {
    let mut service = service();
    service.add_node(&id("C1"), at(0.0, 0.0)).unwrap();

    let second = service.create_visual_model(LanguageString::new()).unwrap();
    assert_ne!(service.aggregator().active_visual_model_id(), Some(&second));

    service.change_active_visual_model(&second).unwrap();
    assert_eq!(
        service.aggregator().active_visual_model().map(|model| model.entity_count()),
        Some(0)
    );

    service.set_model_color(&id(SOURCE), "#123456").unwrap();
    assert_eq!(
        service
            .aggregator()
            .active_visual_model()
            .and_then(|model| model.get_model_color(&id(SOURCE))),
        Some("#123456")
    );
}

#[test]
fn test_closed_service_has_nothing_left() {
    let mut service = service();
    service.add_node(&id("C1"), at(0.0, 0.0)).unwrap();

    service.close();

    let aggregator: &Aggregator = service.aggregator();
    assert!(aggregator.get_entities().is_empty());
    assert!(aggregator.visual_models().is_empty());
    assert!(service.add_node(&id("C1"), at(0.0, 0.0)).is_none());
}

//! Workflow service over the in-memory repository

use flowdesk_application::{WorkflowService, WorkflowServiceInterface};
use flowdesk_domain::entities::{
    CanvasComponent, ConnectionAnchor, ConnectionAttributes, ConnectionComponent, LineAttributes,
    LineComponent, Point, RectangleAttributes, RectangleComponent,
};
use flowdesk_domain::{Error, Repository};
use flowdesk_providers::InMemoryRepository;
use std::sync::Arc;

fn rectangle(id: i64, label: &str) -> CanvasComponent {
    CanvasComponent::Rectangle(RectangleComponent {
        object_id: None,
        id,
        attributes: RectangleAttributes {
            label: Some(label.to_string()),
            background_color: "#ffffff".to_string(),
            width: 120.0,
            height: 60.0,
            start: Point::new(10.0, 20.0),
        },
    })
}

fn line(id: i64) -> CanvasComponent {
    CanvasComponent::Line(LineComponent {
        object_id: None,
        id,
        attributes: LineAttributes {
            start: Point::new(0.0, 0.0),
            end: Point::new(5.0, 5.0),
        },
    })
}

fn connection(id: i64, from: i64) -> CanvasComponent {
    CanvasComponent::Connection(ConnectionComponent {
        object_id: None,
        id,
        attributes: ConnectionAttributes {
            start: ConnectionAnchor {
                rectangle_id: from,
                rectangle_point_location: Point::new(1.0, 0.5),
            },
            end: None,
        },
    })
}

fn service() -> (WorkflowService, InMemoryRepository<CanvasComponent>) {
    let repository = InMemoryRepository::<CanvasComponent>::for_record();
    let service = WorkflowService::new(Arc::new(repository.clone()));
    (service, repository)
}

#[tokio::test]
async fn test_create_all_then_list() {
    let (service, repository) = service();

    let keys = service
        .create_all(vec![rectangle(1, "Start"), line(2), connection(3, 1)])
        .await
        .unwrap();
    assert_eq!(keys.len(), 3);
    assert_eq!(repository.len().await, 3);

    let listed = service.list().await.unwrap();
    let ids: Vec<i64> = listed.iter().map(CanvasComponent::id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(listed.iter().all(|component| component.object_id().is_some()));
    assert_eq!(listed[2].component_type(), "Connection");
}

#[tokio::test]
async fn test_update_all_rewrites_by_object_id() {
    let (service, _repository) = service();
    service.create_all(vec![rectangle(1, "Draft")]).await.unwrap();

    let mut stored = service.list().await.unwrap();
    if let CanvasComponent::Rectangle(rect) = &mut stored[0] {
        rect.attributes.label = Some("Final".to_string());
    }
    let updated = service.update_all(stored).await.unwrap();

    match &updated[0] {
        CanvasComponent::Rectangle(rect) => {
            assert_eq!(rect.attributes.label.as_deref(), Some("Final"));
        }
        other => panic!("unexpected component {other:?}"),
    }
    assert_eq!(service.list().await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_without_object_id_is_rejected() {
    let (service, _repository) = service();
    let err = service.update_all(vec![line(4)]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_delete_all_counts_existing_components() {
    let (service, repository) = service();
    let keys = service
        .create_all(vec![rectangle(1, "a"), rectangle(2, "b")])
        .await
        .unwrap();

    let mut ids: Vec<String> = keys
        .iter()
        .filter_map(|key| key.primary().as_str().map(str::to_string))
        .collect();
    ids.push("000000000000000000000000".to_string());

    assert_eq!(service.delete_all(ids).await.unwrap(), 2);
    assert!(repository.many_read(None).await.unwrap().is_empty());
}

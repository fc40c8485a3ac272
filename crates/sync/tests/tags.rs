//! Integration tests for the tag repository.

mod common;

use assert_matches::assert_matches;
use taskhub_core::error::SyncError;
use taskhub_core::models::{Color, TagInput};
use taskhub_core::resource::Resource;
use taskhub_db::stores::TagStore;
use taskhub_sync::TagRepository;

use common::{assert_quiet, memory_store, settled, tag, wait_for, FakeServer};

fn input(title: &str) -> TagInput {
    TagInput {
        title: title.to_string(),
        color: Color::from_rgba(0xFF, 0, 0, 0xFF),
    }
}

#[tokio::test]
async fn empty_project_reports_no_tag_found() {
    let repo = TagRepository::new(memory_store().await, FakeServer::new());

    let mut stream = repo.get_tags_by_project_id(99);

    assert_eq!(
        settled(&mut stream).await,
        Resource::Error("No tag found for project with ID: 99".into())
    );
}

#[tokio::test]
async fn failed_create_leaves_cache_and_stream_untouched() {
    let store = memory_store().await;
    let server = FakeServer::new();
    server.add_tag(tag(1, 10, "bug"));
    let repo = TagRepository::new(store.clone(), server.clone());
    let mut stream = repo.get_tags_by_project_id(10);
    assert!(settled(&mut stream).await.is_success());

    server.set_offline(true);
    let result = repo.create_tag(10, &input("feature")).await;

    assert_matches!(result, Err(SyncError::Server { status: 503, .. }));
    let cached = TagStore::list_by_project(&store, 10).await.unwrap();
    assert_eq!(cached, vec![tag(1, 10, "bug")]);
    assert_quiet(stream.next()).await;
}

#[tokio::test]
async fn created_tag_is_mirrored_with_its_color() {
    let store = memory_store().await;
    let repo = TagRepository::new(store.clone(), FakeServer::new());

    let created = repo.create_tag(10, &input("urgent")).await.unwrap();

    let cached = TagStore::find_by_id(&store, created.id).await.unwrap().unwrap();
    assert_eq!(cached.color, Color::from_rgba(0xFF, 0, 0, 0xFF));
}

#[tokio::test]
async fn empty_title_is_a_validation_error() {
    let server = FakeServer::new();
    let repo = TagRepository::new(memory_store().await, server.clone());

    assert_matches!(repo.create_tag(10, &input("")).await, Err(SyncError::Validation(_)));
    assert_eq!(server.calls(), 0);
}

#[tokio::test]
async fn task_tags_follow_attach_and_detach() {
    let store = memory_store().await;
    let server = FakeServer::new();
    server.add_tag(tag(1, 10, "bug"));
    let repo = TagRepository::new(store, server.clone());
    let mut stream = repo.get_tags_by_task_id(5);
    assert_eq!(
        settled(&mut stream).await.error_message(),
        Some("No tag found for task with ID: 5")
    );

    repo.add_tag_to_task(1, 5).await.unwrap();
    let attached = wait_for(&mut stream, Resource::is_success).await;
    assert_eq!(attached, Resource::Success(vec![tag(1, 10, "bug")]));

    repo.remove_tag_from_task(1, 5).await.unwrap();
    assert!(wait_for(&mut stream, Resource::is_error).await.is_error());
}

#[tokio::test]
async fn deleting_a_tag_detaches_it_from_tasks() {
    let store = memory_store().await;
    let server = FakeServer::new();
    server.add_tag(tag(1, 10, "bug"));
    let repo = TagRepository::new(store.clone(), server.clone());
    repo.add_tag_to_task(1, 5).await.unwrap();

    repo.delete_tag(1).await.unwrap();

    assert!(TagStore::list_by_task(&store, 5).await.unwrap().is_empty());
    assert!(TagStore::find_by_id(&store, 1).await.unwrap().is_none());
}

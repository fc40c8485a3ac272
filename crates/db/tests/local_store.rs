//! Integration tests for the local cache stores.
//!
//! Exercises the store layer against an in-memory SQLite database:
//! - Idempotent upserts and no-op deletes
//! - Cascade deletes across join tables
//! - Join-list replacement
//! - Durability across reopening a file-backed store

use chrono::{DateTime, TimeZone, Utc};
use taskhub_core::models::{
    Bookmark, Color, Comment, Media, MemberDetails, MemberRole, Project, Tag, Task, TaskStatus,
    TaskTag, User, Workspace,
};
use taskhub_core::roles::Role;
use taskhub_db::stores::{
    BookmarkStore, CommentStore, MediaStore, ProjectStore, TagStore, TaskStore,
    WorkspaceMemberStore, WorkspaceStore,
};
use taskhub_db::LocalStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

fn workspace(id: i64) -> Workspace {
    Workspace {
        id,
        title: format!("Workspace {id}"),
        owner_id: 1,
        created_at: at(1),
        updated_at: at(1),
    }
}

fn project(id: i64, workspace_id: i64) -> Project {
    Project {
        id,
        title: format!("Project {id}"),
        icon: "rocket".to_string(),
        workspace_id,
        created_at: at(1),
        updated_at: at(1),
    }
}

fn task(id: i64, project_id: i64, title: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        deadline: None,
        timer: None,
        status: TaskStatus::Pending,
        project_id,
        breadcrumb: "Acme / Website".to_string(),
        created_at: at(2),
        updated_at: at(2),
    }
}

fn tag(id: i64, project_id: i64) -> Tag {
    Tag {
        id,
        title: format!("tag-{id}"),
        color: Color::from_rgba(0x12, 0x34, 0x56, 0xFF),
        project_id,
        created_at: at(1),
        updated_at: at(1),
    }
}

fn user(id: i64) -> User {
    User {
        id,
        fullname: format!("User {id}"),
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        avatar: None,
        created_at: at(1),
        updated_at: at(1),
    }
}

// ---------------------------------------------------------------------------
// Upsert / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_is_idempotent() {
    let store = LocalStore::in_memory().await.unwrap();
    let row = task(1, 10, "Write docs");

    TaskStore::upsert(&store, &row).await.unwrap();
    TaskStore::upsert(&store, &row).await.unwrap();

    let tasks = TaskStore::list_by_project(&store, 10).await.unwrap();
    assert_eq!(tasks, vec![row]);
}

#[tokio::test]
async fn upsert_replaces_existing_row() {
    let store = LocalStore::in_memory().await.unwrap();
    TaskStore::upsert(&store, &task(1, 10, "Draft")).await.unwrap();

    let mut updated = task(1, 10, "Final");
    updated.status = TaskStatus::Done;
    updated.description = Some("ready".to_string());
    TaskStore::upsert(&store, &updated).await.unwrap();

    let found = TaskStore::find_by_id(&store, 1).await.unwrap();
    assert_eq!(found, Some(updated));
}

#[tokio::test]
async fn delete_of_absent_key_is_a_no_op() {
    let store = LocalStore::in_memory().await.unwrap();
    TaskStore::upsert(&store, &task(1, 10, "Keep")).await.unwrap();

    let removed = TaskStore::delete(&store, 42).await.unwrap();

    assert!(!removed);
    assert_eq!(TaskStore::list_by_project(&store, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn tag_color_survives_the_cache() {
    let store = LocalStore::in_memory().await.unwrap();
    let row = tag(3, 10);
    TagStore::upsert(&store, &row).await.unwrap();

    let found = TagStore::find_by_id(&store, 3).await.unwrap().unwrap();
    assert_eq!(found.color, Color(0x123456FF));
}

// ---------------------------------------------------------------------------
// Cascades
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_a_task_removes_its_join_rows() {
    let store = LocalStore::in_memory().await.unwrap();
    TaskStore::upsert(&store, &task(1, 10, "Doomed")).await.unwrap();
    TagStore::upsert(&store, &tag(5, 10)).await.unwrap();
    TagStore::attach(&store, &TaskTag { task_id: 1, tag_id: 5, created_at: None })
        .await
        .unwrap();
    BookmarkStore::upsert(&store, &Bookmark { user_id: 7, task_id: 1, created_at: at(3) })
        .await
        .unwrap();

    assert!(TaskStore::delete(&store, 1).await.unwrap());

    assert!(TagStore::list_by_task(&store, 1).await.unwrap().is_empty());
    assert!(!BookmarkStore::exists(&store, 7, 1).await.unwrap());
    // The tag itself belongs to the project and stays.
    assert!(TagStore::find_by_id(&store, 5).await.unwrap().is_some());
}

/// Workspace 1 > project 10 > tasks 100 and 200, with tag 5, bookmarks,
/// a comment, and an assignee hanging off them.
async fn seed_project_contents(store: &LocalStore) {
    WorkspaceStore::upsert(store, &workspace(1)).await.unwrap();
    ProjectStore::upsert(store, &project(10, 1)).await.unwrap();
    TaskStore::upsert_many(store, &[task(100, 10, "First"), task(200, 10, "Second")])
        .await
        .unwrap();
    TagStore::upsert(store, &tag(5, 10)).await.unwrap();
    TagStore::attach(store, &TaskTag { task_id: 100, tag_id: 5, created_at: None })
        .await
        .unwrap();
    // Tag 5 also labels a task from another project.
    TagStore::attach(store, &TaskTag { task_id: 900, tag_id: 5, created_at: None })
        .await
        .unwrap();
    BookmarkStore::upsert_many(
        store,
        &[
            Bookmark { user_id: 7, task_id: 100, created_at: at(3) },
            Bookmark { user_id: 7, task_id: 200, created_at: at(4) },
        ],
    )
    .await
    .unwrap();
    CommentStore::upsert(
        store,
        &Comment {
            id: 5,
            content: "Looks good".to_string(),
            author_id: 7,
            task_id: 100,
            edited: false,
            created_at: at(5),
            updated_at: at(5),
        },
    )
    .await
    .unwrap();
    TaskStore::replace_assigned(store, 100, &[user(8)]).await.unwrap();
}

async fn assert_project_contents_gone(store: &LocalStore) {
    assert!(TaskStore::find_by_id(store, 100).await.unwrap().is_none());
    assert!(TaskStore::find_by_id(store, 200).await.unwrap().is_none());
    assert!(TagStore::list_by_project(store, 10).await.unwrap().is_empty());
    assert!(TagStore::list_by_task(store, 900).await.unwrap().is_empty());
    assert!(!BookmarkStore::exists(store, 7, 100).await.unwrap());
    assert!(!BookmarkStore::exists(store, 7, 200).await.unwrap());
    assert!(BookmarkStore::missing_task_ids(store, 7).await.unwrap().is_empty());
    assert!(CommentStore::list_by_task(store, 100).await.unwrap().is_empty());
    assert!(TaskStore::list_assigned_users(store, 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_workspace_removes_its_hierarchy() {
    let store = LocalStore::in_memory().await.unwrap();
    seed_project_contents(&store).await;

    assert!(WorkspaceStore::delete(&store, 1).await.unwrap());

    assert!(WorkspaceStore::find_by_id(&store, 1).await.unwrap().is_none());
    assert!(WorkspaceStore::list_for_user(&store, 1).await.unwrap().is_empty());
    assert!(ProjectStore::list_by_workspace(&store, 1).await.unwrap().is_empty());
    assert_project_contents_gone(&store).await;
}

#[tokio::test]
async fn deleting_a_project_removes_task_details() {
    let store = LocalStore::in_memory().await.unwrap();
    seed_project_contents(&store).await;

    assert!(ProjectStore::delete(&store, 10).await.unwrap());

    assert!(ProjectStore::find_by_id(&store, 10).await.unwrap().is_none());
    assert_project_contents_gone(&store).await;
    assert!(WorkspaceStore::find_by_id(&store, 1).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Join lists
// ---------------------------------------------------------------------------

#[tokio::test]
async fn replacing_task_tags_drops_stale_associations() {
    let store = LocalStore::in_memory().await.unwrap();
    TagStore::replace_for_task(&store, 1, &[tag(5, 10), tag(6, 10)]).await.unwrap();
    TagStore::replace_for_task(&store, 1, &[tag(6, 10)]).await.unwrap();

    let tags = TagStore::list_by_task(&store, 1).await.unwrap();
    assert_eq!(tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![6]);
}

#[tokio::test]
async fn media_is_listed_through_the_join() {
    let store = LocalStore::in_memory().await.unwrap();
    let media = Media {
        id: 9,
        filename: "spec.pdf".to_string(),
        media_type: "application/pdf".to_string(),
        url: "https://cdn.example.com/spec.pdf".to_string(),
        created_at: at(1),
        updated_at: at(1),
    };
    MediaStore::replace_for_task(&store, 1, std::slice::from_ref(&media)).await.unwrap();

    assert_eq!(MediaStore::list_by_task(&store, 1).await.unwrap(), vec![media]);
    assert!(MediaStore::list_by_task(&store, 2).await.unwrap().is_empty());

    assert!(MediaStore::delete(&store, 9).await.unwrap());
    assert!(MediaStore::list_by_task(&store, 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn assigned_users_are_replaced_per_task() {
    let store = LocalStore::in_memory().await.unwrap();
    TaskStore::replace_assigned(&store, 1, &[user(2), user(3)]).await.unwrap();
    TaskStore::unassign(&store, 1, 2).await.unwrap();

    let users = TaskStore::list_assigned_users(&store, 1).await.unwrap();
    assert_eq!(users, vec![user(3)]);
}

#[tokio::test]
async fn members_join_user_and_role() {
    let store = LocalStore::in_memory().await.unwrap();
    let details = MemberDetails {
        workspace_id: 1,
        user_id: 2,
        member_role_id: 20,
        user: user(2),
        member_role: MemberRole {
            id: 20,
            role: Role::Collaborator,
            workspace_id: Some(1),
            project_id: None,
            task_id: None,
        },
    };
    WorkspaceMemberStore::replace_for_workspace(&store, 1, &[details]).await.unwrap();

    let members = WorkspaceMemberStore::list_members(&store, 1).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user, user(2));
    assert_eq!(members[0].member_role.role, Role::Collaborator);

    assert!(WorkspaceMemberStore::delete(&store, 1, 2).await.unwrap());
    assert!(WorkspaceMemberStore::list_members(&store, 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn bookmarked_tasks_skip_uncached_tasks() {
    let store = LocalStore::in_memory().await.unwrap();
    TaskStore::upsert(&store, &task(1, 10, "Cached")).await.unwrap();
    BookmarkStore::upsert_many(
        &store,
        &[
            Bookmark { user_id: 7, task_id: 1, created_at: at(3) },
            Bookmark { user_id: 7, task_id: 2, created_at: at(4) },
        ],
    )
    .await
    .unwrap();

    let tasks = TaskStore::list_bookmarked(&store, 7).await.unwrap();
    assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(BookmarkStore::missing_task_ids(&store, 7).await.unwrap(), vec![2]);
}

#[tokio::test]
async fn workspaces_are_listed_per_user() {
    let store = LocalStore::in_memory().await.unwrap();
    WorkspaceStore::upsert_many(&store, &[workspace(1), workspace(2), workspace(3)])
        .await
        .unwrap();
    WorkspaceStore::replace_for_user(&store, 3, &[workspace(2)]).await.unwrap();
    let membership = MemberDetails {
        workspace_id: 3,
        user_id: 4,
        member_role_id: 30,
        user: user(4),
        member_role: MemberRole {
            id: 30,
            role: Role::Reader,
            workspace_id: Some(3),
            project_id: None,
            task_id: None,
        },
    };
    WorkspaceMemberStore::replace_for_workspace(&store, 3, &[membership]).await.unwrap();

    let ids = |rows: Vec<Workspace>| rows.into_iter().map(|w| w.id).collect::<Vec<_>>();
    assert_eq!(ids(WorkspaceStore::list_for_user(&store, 1).await.unwrap()), vec![1, 2, 3]);
    assert_eq!(ids(WorkspaceStore::list_for_user(&store, 3).await.unwrap()), vec![2]);
    assert_eq!(ids(WorkspaceStore::list_for_user(&store, 4).await.unwrap()), vec![3]);
    assert!(WorkspaceStore::list_for_user(&store, 5).await.unwrap().is_empty());

    WorkspaceStore::replace_for_user(&store, 3, &[]).await.unwrap();
    assert!(WorkspaceStore::list_for_user(&store, 3).await.unwrap().is_empty());
    // The workspace row itself stays cached for its owner.
    assert!(WorkspaceStore::find_by_id(&store, 2).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Durability
// ---------------------------------------------------------------------------

#[tokio::test]
async fn writes_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("cache.db").display());

    {
        let store = LocalStore::connect(&url).await.unwrap();
        WorkspaceStore::upsert(&store, &workspace(4)).await.unwrap();
        store.pool().close().await;
    }

    let reopened = LocalStore::connect(&url).await.unwrap();
    let found = WorkspaceStore::find_by_id(&reopened, 4).await.unwrap();
    assert_eq!(found, Some(workspace(4)));
}

#[tokio::test]
async fn health_check_answers() {
    let store = LocalStore::in_memory().await.unwrap();
    taskhub_db::health_check(store.pool()).await.unwrap();
}

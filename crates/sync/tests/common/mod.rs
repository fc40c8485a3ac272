//! Shared fixtures for repository integration tests.
//!
//! [`FakeServer`] implements every remote API trait over in-memory state and
//! can be switched offline. Repositories are built over an in-memory
//! [`LocalStore`] so each test owns a private cache.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use taskhub_core::auth::AuthContext;
use taskhub_core::models::{
    Bookmark, Comment, CommentInput, Media, MemberDetails, MemberInput, MemberRole, MemberRoleInput,
    Project, ProjectInput, Tag, TagInput, Task, TaskAssigned, TaskInput, TaskStatus, TaskTag, User,
    Workspace, WorkspaceInput, WorkspaceMember,
};
use taskhub_core::resource::Resource;
use taskhub_core::roles::{Role, RoleScope};
use taskhub_core::types::DbId;
use taskhub_db::LocalStore;
use taskhub_remote::{
    BookmarkApi, CommentApi, MediaApi, MemberRoleApi, ProjectApi, RemoteError, TagApi, TaskApi,
    WorkspaceApi, WorkspaceMemberApi,
};
use taskhub_sync::ResourceStream;

/// The user every test signs in as.
pub const USER_ID: DbId = 7;

/// Upper bound for waiting on a stream state.
const WAIT: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn task(id: DbId, project_id: DbId, title: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        deadline: None,
        timer: None,
        status: TaskStatus::Pending,
        project_id,
        breadcrumb: "Acme / Website".to_string(),
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn tag(id: DbId, project_id: DbId, title: &str) -> Tag {
    Tag {
        id,
        title: title.to_string(),
        color: Default::default(),
        project_id,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn user(id: DbId) -> User {
    User {
        id,
        fullname: format!("User {id}"),
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        avatar: None,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn role(id: DbId, role: Role, scope: RoleScope) -> MemberRole {
    let (workspace_id, project_id, task_id) = match scope {
        RoleScope::Workspace(id) => (Some(id), None, None),
        RoleScope::Project(id) => (None, Some(id), None),
        RoleScope::Task(id) => (None, None, Some(id)),
    };
    MemberRole {
        id,
        role,
        workspace_id,
        project_id,
        task_id,
    }
}

pub async fn memory_store() -> LocalStore {
    LocalStore::in_memory().await.unwrap()
}

pub fn signed_in() -> AuthContext {
    AuthContext::with_session(USER_ID, "test-token")
}

/// Wait for the first state matching `pred`, failing the test on timeout or
/// end of stream.
pub async fn wait_for<T, P>(stream: &mut ResourceStream<T>, mut pred: P) -> Resource<T>
where
    T: Clone + PartialEq + Send + 'static,
    P: FnMut(&Resource<T>) -> bool,
{
    let result = tokio::time::timeout(WAIT, async {
        while let Some(resource) = stream.next().await {
            if pred(&resource) {
                return Some(resource);
            }
        }
        None
    })
    .await;

    match result {
        Ok(Some(resource)) => resource,
        Ok(None) => panic!("stream ended before the expected state"),
        Err(_) => panic!("timed out waiting for the expected state"),
    }
}

/// Wait for the first non-loading state.
pub async fn settled<T>(stream: &mut ResourceStream<T>) -> Resource<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    wait_for(stream, |r| !r.is_loading()).await
}

/// Assert that `future` does not complete within a short quiet period.
pub async fn assert_quiet<F: Future>(future: F) {
    assert!(
        tokio::time::timeout(Duration::from_millis(150), future).await.is_err(),
        "expected no further emission"
    );
}

// ---------------------------------------------------------------------------
// FakeServer
// ---------------------------------------------------------------------------

#[derive(Default)]
struct State {
    offline: bool,
    calls: usize,
    next_id: DbId,
    workspaces: Vec<Workspace>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    assigned: Vec<(DbId, User)>,
    tags: Vec<Tag>,
    task_tags: Vec<TaskTag>,
    comments: Vec<Comment>,
    media: Vec<(DbId, Media)>,
    bookmarks: Vec<Bookmark>,
    roles: HashMap<RoleScope, MemberRole>,
    members: Vec<MemberDetails>,
}

/// In-memory stand-in for the API server, acting as [`USER_ID`].
#[derive(Default)]
pub struct FakeServer {
    state: Mutex<State>,
}

fn offline() -> RemoteError {
    RemoteError::Server {
        status: 503,
        message: "Service unavailable".to_string(),
    }
}

fn not_found(what: &str) -> RemoteError {
    RemoteError::Server {
        status: 404,
        message: format!("{what} not found"),
    }
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        let server = Self::default();
        server.state.lock().unwrap().next_id = 1000;
        Arc::new(server)
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Number of API calls received, including rejected ones.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn add_workspace(&self, workspace: Workspace) {
        self.state.lock().unwrap().workspaces.push(workspace);
    }

    pub fn add_task(&self, task: Task) {
        self.state.lock().unwrap().tasks.push(task);
    }

    pub fn add_tag(&self, tag: Tag) {
        self.state.lock().unwrap().tags.push(tag);
    }

    pub fn add_bookmark(&self, task_id: DbId) {
        self.state.lock().unwrap().bookmarks.push(Bookmark {
            user_id: USER_ID,
            task_id,
            created_at: ts(),
        });
    }

    pub fn assign(&self, task_id: DbId, user: User) {
        self.state.lock().unwrap().assigned.push((task_id, user));
    }

    pub fn set_role(&self, scope: RoleScope, role: MemberRole) {
        self.state.lock().unwrap().roles.insert(scope, role);
    }

    pub fn add_member(&self, details: MemberDetails) {
        self.state.lock().unwrap().members.push(details);
    }

    /// Lock the state for one request, failing while offline.
    fn request(&self) -> Result<std::sync::MutexGuard<'_, State>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if state.offline {
            return Err(offline());
        }
        Ok(state)
    }
}

impl State {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl WorkspaceApi for FakeServer {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, RemoteError> {
        Ok(self.request()?.workspaces.clone())
    }

    async fn get_workspace(&self, id: DbId) -> Result<Workspace, RemoteError> {
        let state = self.request()?;
        state
            .workspaces
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| not_found("Workspace"))
    }

    async fn create_workspace(&self, input: &WorkspaceInput) -> Result<Workspace, RemoteError> {
        let mut state = self.request()?;
        let workspace = Workspace {
            id: state.next_id(),
            title: input.title.clone(),
            owner_id: USER_ID,
            created_at: ts(),
            updated_at: ts(),
        };
        state.workspaces.push(workspace.clone());
        Ok(workspace)
    }

    async fn update_workspace(&self, id: DbId, input: &WorkspaceInput) -> Result<Workspace, RemoteError> {
        let mut state = self.request()?;
        let workspace = state
            .workspaces
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| not_found("Workspace"))?;
        workspace.title = input.title.clone();
        Ok(workspace.clone())
    }

    async fn delete_workspace(&self, id: DbId) -> Result<Workspace, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .workspaces
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| not_found("Workspace"))?;
        Ok(state.workspaces.remove(index))
    }
}

#[async_trait]
impl ProjectApi for FakeServer {
    async fn list_projects(&self, workspace_id: DbId) -> Result<Vec<Project>, RemoteError> {
        let state = self.request()?;
        Ok(state
            .projects
            .iter()
            .filter(|p| p.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn get_project(&self, id: DbId) -> Result<Project, RemoteError> {
        let state = self.request()?;
        state
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| not_found("Project"))
    }

    async fn create_project(&self, workspace_id: DbId, input: &ProjectInput) -> Result<Project, RemoteError> {
        let mut state = self.request()?;
        let project = Project {
            id: state.next_id(),
            title: input.title.clone(),
            icon: input.icon.clone(),
            workspace_id,
            created_at: ts(),
            updated_at: ts(),
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: DbId, input: &ProjectInput) -> Result<Project, RemoteError> {
        let mut state = self.request()?;
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Project"))?;
        project.title = input.title.clone();
        project.icon = input.icon.clone();
        Ok(project.clone())
    }

    async fn delete_project(&self, id: DbId) -> Result<Project, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found("Project"))?;
        Ok(state.projects.remove(index))
    }
}

#[async_trait]
impl TaskApi for FakeServer {
    async fn list_tasks(&self, project_id: DbId) -> Result<Vec<Task>, RemoteError> {
        let state = self.request()?;
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn get_task(&self, id: DbId) -> Result<Task, RemoteError> {
        let state = self.request()?;
        state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| not_found("Task"))
    }

    async fn create_task(&self, project_id: DbId, input: &TaskInput) -> Result<Task, RemoteError> {
        let mut state = self.request()?;
        let mut task = task(state.next_id(), project_id, &input.title);
        task.description = input.description.clone();
        task.status = input.status;
        task.deadline = input.deadline;
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: DbId, input: &TaskInput) -> Result<Task, RemoteError> {
        let mut state = self.request()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Task"))?;
        task.title = input.title.clone();
        task.description = input.description.clone();
        task.status = input.status;
        task.deadline = input.deadline;
        Ok(task.clone())
    }

    async fn delete_task(&self, id: DbId) -> Result<Task, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found("Task"))?;
        Ok(state.tasks.remove(index))
    }

    async fn list_assigned_users(&self, task_id: DbId) -> Result<Vec<User>, RemoteError> {
        let state = self.request()?;
        Ok(state
            .assigned
            .iter()
            .filter(|(t, _)| *t == task_id)
            .map(|(_, u)| u.clone())
            .collect())
    }

    async fn assign_user(&self, task_id: DbId, user_id: DbId) -> Result<TaskAssigned, RemoteError> {
        let mut state = self.request()?;
        state.assigned.push((task_id, user(user_id)));
        Ok(TaskAssigned {
            task_id,
            user_id,
            created_at: Some(ts()),
        })
    }

    async fn unassign_user(&self, task_id: DbId, user_id: DbId) -> Result<TaskAssigned, RemoteError> {
        let mut state = self.request()?;
        state.assigned.retain(|(t, u)| !(*t == task_id && u.id == user_id));
        Ok(TaskAssigned {
            task_id,
            user_id,
            created_at: None,
        })
    }
}

#[async_trait]
impl TagApi for FakeServer {
    async fn list_project_tags(&self, project_id: DbId) -> Result<Vec<Tag>, RemoteError> {
        let state = self.request()?;
        Ok(state
            .tags
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn list_task_tags(&self, task_id: DbId) -> Result<Vec<Tag>, RemoteError> {
        let state = self.request()?;
        Ok(state
            .tags
            .iter()
            .filter(|tag| {
                state
                    .task_tags
                    .iter()
                    .any(|link| link.task_id == task_id && link.tag_id == tag.id)
            })
            .cloned()
            .collect())
    }

    async fn create_tag(&self, project_id: DbId, input: &TagInput) -> Result<Tag, RemoteError> {
        let mut state = self.request()?;
        let mut tag = tag(state.next_id(), project_id, &input.title);
        tag.color = input.color;
        state.tags.push(tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, id: DbId, input: &TagInput) -> Result<Tag, RemoteError> {
        let mut state = self.request()?;
        let tag = state
            .tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Tag"))?;
        tag.title = input.title.clone();
        tag.color = input.color;
        Ok(tag.clone())
    }

    async fn delete_tag(&self, id: DbId) -> Result<Tag, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .tags
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found("Tag"))?;
        state.task_tags.retain(|link| link.tag_id != id);
        Ok(state.tags.remove(index))
    }

    async fn add_tag_to_task(&self, tag_id: DbId, task_id: DbId) -> Result<TaskTag, RemoteError> {
        let mut state = self.request()?;
        let link = TaskTag {
            task_id,
            tag_id,
            created_at: Some(ts()),
        };
        state.task_tags.push(link.clone());
        Ok(link)
    }

    async fn remove_tag_from_task(&self, tag_id: DbId, task_id: DbId) -> Result<TaskTag, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .task_tags
            .iter()
            .position(|link| link.task_id == task_id && link.tag_id == tag_id)
            .ok_or_else(|| not_found("Task tag"))?;
        Ok(state.task_tags.remove(index))
    }
}

#[async_trait]
impl CommentApi for FakeServer {
    async fn list_comments(&self, task_id: DbId) -> Result<Vec<Comment>, RemoteError> {
        let state = self.request()?;
        Ok(state
            .comments
            .iter()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, task_id: DbId, input: &CommentInput) -> Result<Comment, RemoteError> {
        let mut state = self.request()?;
        let comment = Comment {
            id: state.next_id(),
            content: input.content.clone(),
            author_id: USER_ID,
            task_id,
            edited: false,
            created_at: ts(),
            updated_at: ts(),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, id: DbId, input: &CommentInput) -> Result<Comment, RemoteError> {
        let mut state = self.request()?;
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Comment"))?;
        comment.content = input.content.clone();
        comment.edited = true;
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: DbId) -> Result<Comment, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found("Comment"))?;
        Ok(state.comments.remove(index))
    }
}

#[async_trait]
impl MediaApi for FakeServer {
    async fn list_media(&self, task_id: DbId) -> Result<Vec<Media>, RemoteError> {
        let state = self.request()?;
        Ok(state
            .media
            .iter()
            .filter(|(t, _)| *t == task_id)
            .map(|(_, m)| m.clone())
            .collect())
    }

    async fn delete_media(&self, id: DbId) -> Result<Media, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .media
            .iter()
            .position(|(_, m)| m.id == id)
            .ok_or_else(|| not_found("Media"))?;
        Ok(state.media.remove(index).1)
    }
}

#[async_trait]
impl BookmarkApi for FakeServer {
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, RemoteError> {
        Ok(self.request()?.bookmarks.clone())
    }

    async fn get_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError> {
        let state = self.request()?;
        state
            .bookmarks
            .iter()
            .find(|b| b.task_id == task_id)
            .cloned()
            .ok_or_else(|| not_found("Bookmark"))
    }

    async fn create_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError> {
        let mut state = self.request()?;
        let bookmark = Bookmark {
            user_id: USER_ID,
            task_id,
            created_at: ts(),
        };
        state.bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }

    async fn delete_bookmark(&self, task_id: DbId) -> Result<Bookmark, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .bookmarks
            .iter()
            .position(|b| b.task_id == task_id)
            .ok_or_else(|| not_found("Bookmark"))?;
        Ok(state.bookmarks.remove(index))
    }
}

#[async_trait]
impl MemberRoleApi for FakeServer {
    async fn get_member_role(&self, scope: RoleScope) -> Result<MemberRole, RemoteError> {
        let state = self.request()?;
        state
            .roles
            .get(&scope)
            .cloned()
            .ok_or_else(|| not_found("Member role"))
    }
}

#[async_trait]
impl WorkspaceMemberApi for FakeServer {
    async fn list_members(&self, workspace_id: DbId) -> Result<Vec<MemberDetails>, RemoteError> {
        let state = self.request()?;
        Ok(state
            .members
            .iter()
            .filter(|m| m.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn add_member(&self, workspace_id: DbId, input: &MemberInput) -> Result<MemberDetails, RemoteError> {
        let mut state = self.request()?;
        let role_id = state.next_id();
        let details = MemberDetails {
            workspace_id,
            user_id: input.user_id,
            member_role_id: role_id,
            user: user(input.user_id),
            member_role: role(role_id, input.role, RoleScope::Workspace(workspace_id)),
        };
        state.members.push(details.clone());
        Ok(details)
    }

    async fn update_member_role(
        &self,
        workspace_id: DbId,
        user_id: DbId,
        input: &MemberRoleInput,
    ) -> Result<MemberDetails, RemoteError> {
        let mut state = self.request()?;
        let details = state
            .members
            .iter_mut()
            .find(|m| m.workspace_id == workspace_id && m.user_id == user_id)
            .ok_or_else(|| not_found("Member"))?;
        details.member_role.role = input.role;
        Ok(details.clone())
    }

    async fn remove_member(&self, workspace_id: DbId, user_id: DbId) -> Result<WorkspaceMember, RemoteError> {
        let mut state = self.request()?;
        let index = state
            .members
            .iter()
            .position(|m| m.workspace_id == workspace_id && m.user_id == user_id)
            .ok_or_else(|| not_found("Member"))?;
        Ok(state.members.remove(index).membership())
    }
}

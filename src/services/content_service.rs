//! 内容服务
//! 列表与详情按可访问性过滤；创建、更新与发布

use crate::{
    error::AppError,
    models::{
        content::{CreateContentRequest, UpdateContentRequest},
        Content, ContentStatus,
    },
    policy::{ContentPolicy, Policy, Resource},
    repository::{RbacState, Store},
    services::permission_service::{authorize, resolve_actor},
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct ContentService {
    store: Arc<Store>,
}

impl ContentService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 当前用户可访问的内容
    pub async fn list(&self, actor_id: Uuid) -> Result<Vec<Content>, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Content, "view_any", ContentPolicy::view_any(&actor))?;

        Ok(state
            .list_contents()
            .into_iter()
            .filter(|content| content.is_accessible_by(&actor))
            .collect())
    }

    /// 不可访问的内容按不存在处理
    pub async fn get(&self, actor_id: Uuid, id: Uuid) -> Result<Content, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        let content = find_content(&state, id)?;
        authorize(&actor, Resource::Content, "view", ContentPolicy::view(&actor, content))?;

        if !content.is_accessible_by(&actor) {
            return Err(AppError::not_found("Content not found"));
        }
        Ok(content.clone())
    }

    /// 新内容始终为草稿
    pub async fn create(&self, actor_id: Uuid, req: CreateContentRequest) -> Result<Content, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Content, "create", ContentPolicy::create(&actor))?;

        req.validate()?;
        if state.slug_taken(&req.slug, None) {
            return Err(AppError::field("slug", "The slug has already been taken."));
        }

        let now = Utc::now();
        let content = state.insert_content(Content {
            id: Uuid::new_v4(),
            title: req.title,
            slug: req.slug,
            body: req.body,
            status: ContentStatus::Draft,
            visibility: req.visibility,
            created_by: actor.id,
            updated_by: actor.id,
            published_at: None,
            created_at: now,
            updated_at: now,
        });

        tracing::info!(user_id = %actor.id, content_id = %content.id, "Content created");

        Ok(content)
    }

    pub async fn update(
        &self,
        actor_id: Uuid,
        id: Uuid,
        req: UpdateContentRequest,
    ) -> Result<Content, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let content = find_content(&state, id)?;
        authorize(&actor, Resource::Content, "update", ContentPolicy::update(&actor, content))?;

        req.validate()?;
        let content = state
            .content_mut(id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;
        if let Some(title) = req.title {
            content.title = title;
        }
        if let Some(body) = req.body {
            content.body = body;
        }
        if let Some(visibility) = req.visibility {
            content.visibility = visibility;
        }
        content.updated_by = actor.id;
        content.updated_at = Utc::now();

        tracing::info!(user_id = %actor.id, content_id = %content.id, "Content updated");

        Ok(content.clone())
    }

    /// 发布内容；已发布时保留原发布时间
    pub async fn publish(&self, actor_id: Uuid, id: Uuid) -> Result<Content, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let content = find_content(&state, id)?;
        authorize(&actor, Resource::Content, "publish", ContentPolicy::publish(&actor, content))?;

        let content = state
            .content_mut(id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;
        let now = Utc::now();
        if content.status != ContentStatus::Published {
            content.status = ContentStatus::Published;
            content.published_at = Some(now);
        }
        content.updated_by = actor.id;
        content.updated_at = now;

        tracing::info!(user_id = %actor.id, content_id = %content.id, "Content published");

        Ok(content.clone())
    }

    /// 归档后仅创建者可见；再次发布会重新记录发布时间
    pub async fn archive(&self, actor_id: Uuid, id: Uuid) -> Result<Content, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let content = find_content(&state, id)?;
        authorize(&actor, Resource::Content, "archive", ContentPolicy::archive(&actor, content))?;

        let content = state
            .content_mut(id)
            .ok_or_else(|| AppError::not_found("Content not found"))?;
        content.status = ContentStatus::Archived;
        content.updated_by = actor.id;
        content.updated_at = Utc::now();

        tracing::info!(user_id = %actor.id, content_id = %content.id, "Content archived");

        Ok(content.clone())
    }
}

fn find_content(state: &RbacState, id: Uuid) -> Result<&Content, AppError> {
    state
        .find_content(id)
        .ok_or_else(|| AppError::not_found("Content not found"))
}

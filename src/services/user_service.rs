//! 用户服务
//! 用户账号的增删改查；角色关联由用户角色服务维护

use crate::{
    error::AppError,
    models::{
        user::{CreateUserRequest, UpdateUserRequest},
        User,
    },
    policy::{Policy, Resource, UserPolicy},
    repository::Store,
    services::permission_service::{authorize, resolve_actor, resolve_target},
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct UserService {
    store: Arc<Store>,
}

impl UserService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self, actor_id: Uuid) -> Result<Vec<User>, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Users, "view_any", UserPolicy::view_any(&actor))?;

        Ok(state.list_users())
    }

    pub async fn get_user(&self, actor_id: Uuid, id: Uuid) -> Result<User, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        let target = resolve_target(&state, id)?;
        authorize(&actor, Resource::Users, "view", UserPolicy::view(&actor, &target))?;

        state
            .find_user(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// 新用户不持有任何角色
    pub async fn create_user(&self, actor_id: Uuid, req: CreateUserRequest) -> Result<User, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Users, "create", UserPolicy::create(&actor))?;

        req.validate()?;
        if state.email_taken(&req.email, None) {
            return Err(AppError::field("email", "The email has already been taken."));
        }

        let user = state.insert_user(User::new(Uuid::new_v4(), req.name, req.email));

        tracing::info!(user_id = %actor.id, target_user_id = %user.id, "User created");

        Ok(user)
    }

    pub async fn update_user(
        &self,
        actor_id: Uuid,
        id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<User, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let target = resolve_target(&state, id)?;
        authorize(&actor, Resource::Users, "update", UserPolicy::update(&actor, &target))?;

        req.validate()?;
        if let Some(email) = &req.email {
            if state.email_taken(email, Some(id)) {
                return Err(AppError::field("email", "The email has already been taken."));
            }
        }

        let user = state
            .user_mut(id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if let Some(name) = req.name {
            user.name = name;
        }
        if let Some(email) = req.email {
            user.email = email;
        }

        tracing::info!(user_id = %actor.id, target_user_id = %id, "User updated");

        Ok(user.clone())
    }

    /// 删除用户及其角色关联；其创建的内容保留原作者记录
    pub async fn delete_user(&self, actor_id: Uuid, id: Uuid) -> Result<User, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let target = resolve_target(&state, id)?;
        authorize(&actor, Resource::Users, "delete", UserPolicy::delete(&actor, &target))?;

        let user = state
            .delete_user(id)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        tracing::info!(user_id = %actor.id, target_user_id = %id, "User deleted");

        Ok(user)
    }
}

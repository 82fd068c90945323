//! 菜单服务
//! 菜单树按当前用户过滤后返回，支持创建与重新排序

use crate::{
    error::AppError,
    models::{
        menu::{CreateMenuRequest, ReorderMenusRequest},
        Actor, Menu,
    },
    policy::{MenuPolicy, Policy, Resource},
    repository::{RbacState, Store},
    services::{
        permission_service::{authorize, resolve_actor},
        visibility::{Tree, TreeNode},
    },
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct MenuService {
    store: Arc<Store>,
}

impl MenuService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 当前用户可见的菜单树
    ///
    /// 不可见节点连同其子树一起被移除
    pub async fn tree(&self, actor_id: Uuid) -> Result<Vec<TreeNode<Menu>>, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Menus, "view_any", MenuPolicy::view_any(&actor))?;

        let tree = Tree::build(state.list_menus())?;
        let visible = visible_tree(&state, &actor, &tree);

        tracing::debug!(
            user_id = %actor.id,
            total = tree.len(),
            visible = visible.len(),
            "Menu tree filtered"
        );

        Ok(visible.into_nested())
    }

    pub async fn create_menu(&self, actor_id: Uuid, req: CreateMenuRequest) -> Result<Menu, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Menus, "create", MenuPolicy::create(&actor))?;

        req.validate()?;
        if let Some(parent_id) = req.parent_id {
            if state.find_menu(parent_id).is_none() {
                return Err(AppError::field("parent_id", "The selected parent is invalid."));
            }
        }
        if let Some(content_id) = req.content_id {
            if state.find_content(content_id).is_none() {
                return Err(AppError::field("content_id", "The selected content is invalid."));
            }
        }
        if let Some(permission) = &req.required_permission {
            if state.find_permission_by_name(permission).is_none() {
                return Err(AppError::field(
                    "required_permission",
                    "The selected permission is invalid.",
                ));
            }
        }

        let now = Utc::now();
        let menu = state.insert_menu(Menu {
            id: Uuid::new_v4(),
            parent_id: req.parent_id,
            title: req.title,
            url: req.url,
            order: req.order,
            is_active: req.is_active,
            content_id: req.content_id,
            required_permission: req.required_permission,
            created_at: now,
            updated_at: now,
        });

        tracing::info!(user_id = %actor.id, menu_id = %menu.id, "Menu created");

        Ok(menu)
    }

    /// 批量调整父节点与顺序；结果必须仍是一棵合法的树，否则不做任何变更
    pub async fn reorder(
        &self,
        actor_id: Uuid,
        req: ReorderMenusRequest,
    ) -> Result<Vec<TreeNode<Menu>>, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Menus, "reorder", MenuPolicy::reorder(&actor))?;

        let mut menus: HashMap<Uuid, Menu> = state
            .list_menus()
            .into_iter()
            .map(|menu| (menu.id, menu))
            .collect();
        for (i, position) in req.items.iter().enumerate() {
            let menu = menus.get_mut(&position.id).ok_or_else(|| {
                AppError::field(format!("items.{}.id", i).as_str(), "The selected menu is invalid.")
            })?;
            menu.parent_id = position.parent_id;
            menu.order = position.order;
        }
        let tree = Tree::build(menus.into_values().collect())?;

        state.apply_menu_positions(&req.items);

        tracing::info!(user_id = %actor.id, count = req.items.len(), "Menus reordered");

        Ok(tree.into_nested())
    }
}

fn visible_tree(state: &RbacState, actor: &Actor, tree: &Tree<Menu>) -> Tree<Menu> {
    tree.filter(|menu| {
        let linked = menu.content_id.and_then(|id| state.find_content(id));
        menu.is_accessible_by(actor, linked)
    })
}

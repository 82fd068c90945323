//! User repository (用户与用户-角色关联)

use super::RbacState;
use crate::models::{user::RoleSummary, Actor, PermissionName, RoleName, User};
use std::collections::BTreeSet;
use uuid::Uuid;

impl RbacState {
    pub fn insert_user(&mut self, user: User) -> User {
        self.user_roles.entry(user.id).or_default();
        self.users.insert(user.id, user.clone());
        user
    }

    pub fn find_user(&self, id: Uuid) -> Option<&User> {
        self.users.get(&id)
    }

    /// 列出所有用户（按创建时间排序）
    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        users
    }

    /// 邮箱是否被其他用户占用（不区分大小写，更新时排除自身）
    pub fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id) != except)
    }

    pub fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// 删除用户及其角色关联
    pub fn delete_user(&mut self, id: Uuid) -> Option<User> {
        let user = self.users.remove(&id)?;
        self.user_roles.remove(&id);
        Some(user)
    }

    pub fn user_role_ids(&self, user_id: Uuid) -> BTreeSet<Uuid> {
        self.user_roles.get(&user_id).cloned().unwrap_or_default()
    }

    /// 覆盖用户的角色集合
    pub fn set_user_roles(&mut self, user_id: Uuid, role_ids: BTreeSet<Uuid>) {
        self.user_roles.insert(user_id, role_ids);
    }

    /// 用户持有的角色摘要（按名称排序）
    pub fn role_summaries(&self, user_id: Uuid) -> Vec<RoleSummary> {
        let mut roles: Vec<RoleSummary> = self
            .user_roles
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter_map(|rid| self.roles.get(rid))
            .map(|r| RoleSummary {
                id: r.id,
                name: r.name.clone(),
                display_name: r.display_name.clone(),
                is_system: r.is_system,
            })
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }

    /// 解析用户的角色与有效权限（所有角色权限的并集）
    pub fn resolve_actor(&self, user_id: Uuid) -> Option<Actor> {
        self.users.get(&user_id)?;

        let role_ids = self.user_roles.get(&user_id);
        let roles: Vec<RoleName> = role_ids
            .into_iter()
            .flatten()
            .filter_map(|rid| self.roles.get(rid))
            .map(|r| r.name.clone())
            .collect();
        let permissions: Vec<PermissionName> = role_ids
            .into_iter()
            .flatten()
            .filter_map(|rid| self.role_permissions.get(rid))
            .flatten()
            .filter_map(|pid| self.permissions.get(pid))
            .map(|p| p.name.clone())
            .collect();

        Some(Actor::new(user_id, roles, permissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Permission, Role};

    #[test]
    fn test_resolve_actor_unions_role_permissions() {
        let mut state = RbacState::default();
        let writer = state.insert_role(Role::new(RoleName::parse("writer").unwrap(), "Writer", false));
        let reviewer = state.insert_role(Role::new(RoleName::parse("reviewer").unwrap(), "Reviewer", false));
        let manage = state.insert_permission(Permission::new(PermissionName::CONTENT_MANAGE, "Manage content", None));
        let menus = state.insert_permission(Permission::new(PermissionName::MENUS_MANAGE, "Manage menus", None));
        assert!(state.set_role_permissions(writer.id, [manage.id].into_iter().collect()));
        assert!(state.set_role_permissions(reviewer.id, [manage.id, menus.id].into_iter().collect()));

        let user = state.insert_user(User::new(Uuid::new_v4(), "Bo", "bo@example.com"));
        state.set_user_roles(user.id, [writer.id, reviewer.id].into_iter().collect());

        let actor = state.resolve_actor(user.id).unwrap();
        assert!(actor.has_role(&writer.name));
        assert!(actor.has_role(&reviewer.name));
        assert!(actor.has_permission(&PermissionName::CONTENT_MANAGE));
        assert!(actor.has_permission(&PermissionName::MENUS_MANAGE));
        assert_eq!(actor.permissions().count(), 2);
    }

    #[test]
    fn test_delete_user_drops_role_links() {
        let mut state = RbacState::seeded(None);
        let editor = state.find_role_by_name(&RoleName::EDITOR).unwrap().id;
        let user = state.insert_user(User::new(Uuid::new_v4(), "Di", "di@example.com"));
        state.set_user_roles(user.id, [editor].into_iter().collect());

        assert!(state.delete_user(user.id).is_some());
        assert!(state.user_role_ids(user.id).is_empty());
        assert!(state.resolve_actor(user.id).is_none());
        assert!(state.find_role(editor).is_some());
    }

    #[test]
    fn test_email_taken_ignores_case() {
        let mut state = RbacState::default();
        let user = state.insert_user(User::new(Uuid::new_v4(), "Eve", "eve@example.com"));
        assert!(state.email_taken("EVE@example.com", None));
        assert!(!state.email_taken("eve@example.com", Some(user.id)));
    }

    #[test]
    fn test_resolve_unknown_user() {
        let state = RbacState::default();
        assert!(state.resolve_actor(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_user_without_roles_has_nothing() {
        let mut state = RbacState::default();
        let user = state.insert_user(User::new(Uuid::new_v4(), "Cy", "cy@example.com"));
        let actor = state.resolve_actor(user.id).unwrap();
        assert_eq!(actor.roles().count(), 0);
        assert_eq!(actor.permissions().count(), 0);
    }
}

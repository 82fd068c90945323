//! Role repository (角色与角色-权限关联)

use super::RbacState;
use crate::models::{
    role::RoleWithPermissions, PermissionName, Role, RoleName,
};
use chrono::Utc;
use std::collections::BTreeSet;
use uuid::Uuid;

impl RbacState {
    // ==================== Roles ====================

    /// 列出所有角色（按名称排序）
    pub fn list_roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.roles.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }

    pub fn find_role(&self, id: Uuid) -> Option<&Role> {
        self.roles.get(&id)
    }

    pub fn find_role_by_name(&self, name: &RoleName) -> Option<&Role> {
        self.roles.values().find(|r| &r.name == name)
    }

    /// 名称是否被其他角色占用（更新时排除自身）
    pub fn role_name_taken(&self, name: &RoleName, except: Option<Uuid>) -> bool {
        self.roles
            .values()
            .any(|r| &r.name == name && Some(r.id) != except)
    }

    /// 创建角色
    pub fn insert_role(&mut self, role: Role) -> Role {
        self.role_permissions.entry(role.id).or_default();
        self.roles.insert(role.id, role.clone());
        role
    }

    /// 更新角色
    pub fn update_role(
        &mut self,
        id: Uuid,
        name: RoleName,
        display_name: String,
        description: Option<String>,
    ) -> Option<Role> {
        let role = self.roles.get_mut(&id)?;
        role.name = name;
        role.display_name = display_name;
        role.description = description;
        role.updated_at = Utc::now();
        Some(role.clone())
    }

    /// 删除角色，同时删除其权限关联与用户关联
    pub fn delete_role(&mut self, id: Uuid) -> Option<Role> {
        let role = self.roles.remove(&id)?;
        self.role_permissions.remove(&id);
        for roles in self.user_roles.values_mut() {
            roles.remove(&id);
        }
        Some(role)
    }

    // ==================== Role permissions ====================

    pub fn role_permission_ids(&self, role_id: Uuid) -> BTreeSet<Uuid> {
        self.role_permissions
            .get(&role_id)
            .cloned()
            .unwrap_or_default()
    }

    /// 获取角色的权限名称（排序）
    pub fn role_permission_names(&self, role_id: Uuid) -> Vec<PermissionName> {
        let mut names: Vec<PermissionName> = self
            .role_permissions
            .get(&role_id)
            .into_iter()
            .flatten()
            .filter_map(|pid| self.permissions.get(pid))
            .map(|p| p.name.clone())
            .collect();
        names.sort();
        names
    }

    /// 覆盖角色的权限集合
    ///
    /// 系统角色的权限集合只在写入默认数据时确定，此处返回 `false` 且不做变更
    pub fn set_role_permissions(&mut self, role_id: Uuid, permission_ids: BTreeSet<Uuid>) -> bool {
        match self.roles.get_mut(&role_id) {
            Some(role) if !role.is_system => {
                role.updated_at = Utc::now();
                self.role_permissions.insert(role_id, permission_ids);
                true
            }
            _ => false,
        }
    }

    /// 持有该权限的角色（按名称排序）
    pub fn roles_holding(&self, permission_id: Uuid) -> Vec<&Role> {
        let mut roles: Vec<&Role> = self
            .role_permissions
            .iter()
            .filter(|(_, permissions)| permissions.contains(&permission_id))
            .filter_map(|(role_id, _)| self.roles.get(role_id))
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }

    pub fn role_with_permissions(&self, role: Role) -> RoleWithPermissions {
        let permissions = self.role_permission_names(role.id);
        RoleWithPermissions { role, permissions }
    }
}

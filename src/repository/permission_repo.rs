//! Permission repository

use super::RbacState;
use crate::models::{Permission, PermissionName};
use chrono::Utc;
use uuid::Uuid;

impl RbacState {
    /// 列出所有权限（按分组、名称排序）
    pub fn list_permissions(&self) -> Vec<Permission> {
        let mut permissions: Vec<Permission> = self.permissions.values().cloned().collect();
        permissions.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));
        permissions
    }

    pub fn find_permission(&self, id: Uuid) -> Option<&Permission> {
        self.permissions.get(&id)
    }

    pub fn find_permission_by_name(&self, name: &PermissionName) -> Option<&Permission> {
        self.permissions.values().find(|p| &p.name == name)
    }

    /// 名称是否被其他权限占用（更新时排除自身）
    pub fn permission_name_taken(&self, name: &PermissionName, except: Option<Uuid>) -> bool {
        self.permissions
            .values()
            .any(|p| &p.name == name && Some(p.id) != except)
    }

    pub fn insert_permission(&mut self, permission: Permission) -> Permission {
        self.permissions.insert(permission.id, permission.clone());
        permission
    }

    pub fn update_permission(
        &mut self,
        id: Uuid,
        name: PermissionName,
        display_name: String,
        description: Option<String>,
        group: String,
    ) -> Option<Permission> {
        let permission = self.permissions.get_mut(&id)?;
        permission.name = name;
        permission.display_name = display_name;
        permission.description = description;
        permission.group = group;
        permission.updated_at = Utc::now();
        Some(permission.clone())
    }

    /// 删除未被任何角色持有的权限；仍有关联时返回 `None` 且不做变更
    pub fn delete_permission(&mut self, id: Uuid) -> Option<Permission> {
        if self.permission_in_use(id) {
            return None;
        }
        self.permissions.remove(&id)
    }

    pub fn permission_in_use(&self, id: Uuid) -> bool {
        self.role_permissions
            .values()
            .any(|permissions| permissions.contains(&id))
    }
}

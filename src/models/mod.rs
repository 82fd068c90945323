//! 数据模型模块
//! 角色、权限、用户以及受控的内容与菜单

pub mod content;
pub mod menu;
pub mod permission;
pub mod role;
pub mod user;

pub use content::{Content, ContentStatus, Visibility};
pub use menu::Menu;
pub use permission::{Permission, PermissionName};
pub use role::{Role, RoleName};
pub use user::{Actor, User};

use thiserror::Error;

/// Rejection produced when a raw string does not form a valid role or permission name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name must not be empty")]
    Empty,

    #[error("`{value}` may only contain {allowed}")]
    Pattern {
        value: String,
        allowed: &'static str,
    },
}

//! Business logic services layer

pub mod catalog_service;
pub mod content_service;
pub mod menu_service;
pub mod permission_service;
pub mod role_service;
pub mod user_role_service;
pub mod user_service;
pub mod visibility;

pub use catalog_service::CatalogService;
pub use content_service::ContentService;
pub use menu_service::MenuService;
pub use permission_service::PermissionService;
pub use role_service::RoleService;
pub use user_role_service::UserRoleService;
pub use user_service::UserService;

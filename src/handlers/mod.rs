//! HTTP 处理器模块

pub mod content;
pub mod health;
pub mod me;
pub mod menu;
pub mod permission;
pub mod role;
pub mod user;
pub mod user_role;

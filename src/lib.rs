//! RBAC 管理服务库
//! 权限目录、角色-权限图、用户角色分配、鉴权与层级可见性过滤

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;

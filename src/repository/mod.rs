//! 数据访问层
//! 内存实体存储：读操作在读锁下获得一致快照，写操作持有写锁完成“鉴权 + 变更”

pub mod content_repo;
pub mod permission_repo;
pub mod role_repo;
pub mod seed;
pub mod user_repo;

use crate::models::{Content, Menu, Permission, Role, User};
use std::collections::{BTreeSet, HashMap};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// 全部实体及关联记录
#[derive(Debug, Default)]
pub struct RbacState {
    users: HashMap<Uuid, User>,
    roles: HashMap<Uuid, Role>,
    permissions: HashMap<Uuid, Permission>,
    /// role id -> permission ids
    role_permissions: HashMap<Uuid, BTreeSet<Uuid>>,
    /// user id -> role ids
    user_roles: HashMap<Uuid, BTreeSet<Uuid>>,
    contents: HashMap<Uuid, Content>,
    menus: HashMap<Uuid, Menu>,
}

/// 共享存储
#[derive(Debug, Default)]
pub struct Store {
    state: RwLock<RbacState>,
}

impl Store {
    pub fn new(state: RbacState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, RbacState> {
        self.state.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, RbacState> {
        self.state.write().await
    }
}

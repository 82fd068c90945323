//! Content and menu repository

use super::RbacState;
use crate::models::{menu::MenuPosition, Content, Menu};
use chrono::Utc;
use uuid::Uuid;

impl RbacState {
    // ==================== Content ====================

    /// 列出所有内容（按创建时间排序）
    pub fn list_contents(&self) -> Vec<Content> {
        let mut contents: Vec<Content> = self.contents.values().cloned().collect();
        contents.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        contents
    }

    pub fn find_content(&self, id: Uuid) -> Option<&Content> {
        self.contents.get(&id)
    }

    pub fn slug_taken(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.contents
            .values()
            .any(|c| c.slug == slug && Some(c.id) != except)
    }

    pub fn insert_content(&mut self, content: Content) -> Content {
        self.contents.insert(content.id, content.clone());
        content
    }

    pub fn content_mut(&mut self, id: Uuid) -> Option<&mut Content> {
        self.contents.get_mut(&id)
    }

    // ==================== Menus ====================

    /// 所有菜单的扁平列表
    pub fn list_menus(&self) -> Vec<Menu> {
        self.menus.values().cloned().collect()
    }

    pub fn find_menu(&self, id: Uuid) -> Option<&Menu> {
        self.menus.get(&id)
    }

    pub fn insert_menu(&mut self, menu: Menu) -> Menu {
        self.menus.insert(menu.id, menu.clone());
        menu
    }

    /// 应用新的位置（调用方已校验结果仍是一棵合法的树）
    pub fn apply_menu_positions(&mut self, positions: &[MenuPosition]) {
        let now = Utc::now();
        for position in positions {
            if let Some(menu) = self.menus.get_mut(&position.id) {
                menu.parent_id = position.parent_id;
                menu.order = position.order;
                menu.updated_at = now;
            }
        }
    }
}

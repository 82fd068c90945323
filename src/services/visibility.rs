//! 层级可见性过滤
//! 基于扁平数组索引的树，遍历全部使用显式栈，不依赖递归

use crate::{error::AppError, models::Menu};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// 树节点需要暴露的属性
pub trait TreeItem {
    fn id(&self) -> Uuid;
    fn parent_id(&self) -> Option<Uuid>;
    fn order(&self) -> i32;
}

impl TreeItem for Menu {
    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    fn order(&self) -> i32 {
        self.order
    }
}

/// 节点在 arena 中的下标
pub type NodeId = usize;

#[derive(Debug, Clone)]
struct Node<T> {
    item: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena 树：节点存放在一个 Vec 中，父子关系用下标表示
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
    roots: Vec<NodeId>,
}

/// 嵌套形式，用于 JSON 响应
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T: TreeItem> Tree<T> {
    /// 从扁平行构建树，每层按 (order, id) 排序
    ///
    /// 父节点不存在或存在环时返回校验错误
    pub fn build(items: Vec<T>) -> Result<Self, AppError> {
        let mut index: HashMap<Uuid, NodeId> = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.id(), i).is_some() {
                return Err(AppError::field("id", format!("Duplicate node {}.", item.id())));
            }
        }

        let mut parents: Vec<Option<NodeId>> = Vec::with_capacity(items.len());
        let mut children: Vec<Vec<NodeId>> = vec![Vec::new(); items.len()];
        let mut roots = Vec::new();

        for (i, item) in items.iter().enumerate() {
            match item.parent_id() {
                None => {
                    parents.push(None);
                    roots.push(i);
                }
                Some(parent_id) => {
                    let parent = *index.get(&parent_id).ok_or_else(|| {
                        AppError::field(
                            "parent_id",
                            format!("The selected parent {} is invalid.", parent_id),
                        )
                    })?;
                    parents.push(Some(parent));
                    children[parent].push(i);
                }
            }
        }

        let sort_key = |i: &NodeId| (items[*i].order(), items[*i].id());
        roots.sort_by_key(sort_key);
        for list in children.iter_mut() {
            list.sort_by_key(sort_key);
        }

        let nodes: Vec<Node<T>> = items
            .into_iter()
            .zip(parents)
            .zip(children)
            .map(|((item, parent), children)| Node {
                item,
                parent,
                children,
            })
            .collect();

        let tree = Self { nodes, roots };

        // 从根不可达的节点只可能位于环上
        let reachable = tree.preorder().count();
        if reachable != tree.nodes.len() {
            return Err(AppError::field(
                "parent_id",
                "The menu hierarchy contains a cycle.",
            ));
        }

        Ok(tree)
    }
}

impl<T> Tree<T> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> &T {
        &self.nodes[id].item
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// 全树先序遍历
    pub fn preorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        Preorder {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// 传递后代（不含自身），先序
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        Preorder {
            tree: self,
            stack: self.nodes[id].children.iter().rev().copied().collect(),
        }
    }

    /// 按节点逐个判定，保留可访问节点
    ///
    /// 不可访问的节点连同其子树被剪除；可访问节点的子节点列表替换为过滤结果，
    /// 没有可访问子节点时成为叶子。同层相对顺序不变。
    pub fn filter<F>(&self, mut keep: F) -> Tree<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut out = Tree {
            nodes: Vec::new(),
            roots: Vec::new(),
        };
        let mut stack: Vec<(NodeId, Option<NodeId>)> =
            self.roots.iter().rev().map(|&id| (id, None)).collect();

        while let Some((src, parent)) = stack.pop() {
            let node = &self.nodes[src];
            if !keep(&node.item) {
                continue;
            }

            let dst = out.nodes.len();
            out.nodes.push(Node {
                item: node.item.clone(),
                parent,
                children: Vec::new(),
            });
            match parent {
                Some(p) => out.nodes[p].children.push(dst),
                None => out.roots.push(dst),
            }

            stack.extend(node.children.iter().rev().map(|&child| (child, Some(dst))));
        }

        out
    }

    /// 转为嵌套结构
    pub fn into_nested(self) -> Vec<TreeNode<T>> {
        let order: Vec<NodeId> = self.preorder().collect();
        let roots = self.roots;
        let mut links: Vec<Vec<NodeId>> = Vec::with_capacity(self.nodes.len());
        let mut items: Vec<Option<T>> = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            links.push(node.children);
            items.push(Some(node.item));
        }

        // 逆先序：处理某节点时其子节点均已构建完成
        let mut built: Vec<Option<TreeNode<T>>> = (0..items.len()).map(|_| None).collect();
        for id in order.into_iter().rev() {
            let children = links[id]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            if let Some(item) = items[id].take() {
                built[id] = Some(TreeNode { item, children });
            }
        }

        roots.into_iter().filter_map(|id| built[id].take()).collect()
    }
}

struct Preorder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for Preorder<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[id].children.iter().rev().copied());
        Some(id)
    }
}

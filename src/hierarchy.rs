//! Path Hierarchy Module
//!
//! 按标题在主题树中查找或创建子节点，并沿模块路径段折叠下降。
//! 两行共享同一模块路径前缀时，对应的祖先节点被合并复用，
//! 不会产生重复的兄弟标题。

use crate::types::TopicNode;

/// 在 `parent` 的直接子节点中查找标题精确相等的节点；
/// 找不到则在末尾追加一个新的空节点。返回命中的（或新建的）节点。
///
/// 查找按文档顺序进行，命中第一个匹配。对同一 `(parent, title)`
/// 重复调用是幂等的：第二次返回第一次创建的同一节点。
pub fn find_or_create_child<'a>(parent: &'a mut TopicNode, title: &str) -> &'a mut TopicNode {
    match parent.children.iter().position(|child| child.title == title) {
        Some(index) => &mut parent.children[index],
        None => {
            parent.children.push(TopicNode::new(title));
            let last = parent.children.len() - 1;
            &mut parent.children[last]
        }
    }
}

/// 从 `root` 出发，依次对每个路径段调用 [`find_or_create_child`]，
/// 返回链条末端的节点。空的段序列返回 `root` 本身。
pub fn descend<'a, I, S>(root: &'a mut TopicNode, segments: I) -> &'a mut TopicNode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut current = root;
    for segment in segments {
        current = find_or_create_child(current, segment.as_ref());
    }
    current
}

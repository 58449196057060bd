//! 左倾红黑树（LLRB）
//!
//! 不变量：
//! - 按 key 的二叉搜索树有序
//! - 红链接只出现在左侧
//! - 任何节点都不会同时挂两条红链接
//! - 根到每个空链接路径上的黑链接数相同
//!
//! 插入与删除都采用递归形式：每层返回重新平衡后的子树根。

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

impl Color {
    fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    val: V,
    color: Color,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn red(key: K, val: V) -> Box<Self> {
        Box::new(Self {
            key,
            val,
            color: Color::Red,
            left: None,
            right: None,
        })
    }
}

#[derive(Debug)]
pub struct RedBlackTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut x = self.root.as_deref();
        while let Some(node) = x {
            match key.cmp(&node.key) {
                Ordering::Less => x = node.left.as_deref(),
                Ordering::Greater => x = node.right.as_deref(),
                Ordering::Equal => return Some(&node.val),
            }
        }
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// 插入或覆盖
    pub fn put(&mut self, key: K, val: V) {
        let (mut root, inserted) = put(self.root.take(), key, val);
        root.color = Color::Black;
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        debug_assert!(self.check_invariants());
    }

    /// 删除 key；不存在时什么也不做。返回是否删除了节点。
    pub fn delete(&mut self, key: &K) -> bool {
        if !self.contains(key) {
            return false;
        }
        let Some(mut root) = self.root.take() else {
            return false;
        };
        if !is_red(&root.left) && !is_red(&root.right) {
            root.color = Color::Red;
        }
        self.root = delete(root, key);
        if let Some(root) = self.root.as_mut() {
            root.color = Color::Black;
        }
        self.len -= 1;
        debug_assert!(self.check_invariants());
        true
    }

    pub fn min_key(&self) -> Option<&K> {
        let mut x = self.root.as_deref()?;
        while let Some(left) = x.left.as_deref() {
            x = left;
        }
        Some(&x.key)
    }

    pub fn max_key(&self) -> Option<&K> {
        let mut x = self.root.as_deref()?;
        while let Some(right) = x.right.as_deref() {
            x = right;
        }
        Some(&x.key)
    }

    /// 按 key 升序返回 `low <= key <= high` 的条目。
    ///
    /// 左子树只在当前 key 大于 `low` 时访问，右子树只在当前 key 小于 `high` 时访问。
    pub fn range(&self, low: &K, high: &K) -> Vec<(&K, &V)> {
        let mut out = Vec::new();
        collect_range(&self.root, low, high, &mut out);
        out
    }

    /// 按 key 升序遍历全部条目
    pub fn entries(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        collect_all(&self.root, &mut out);
        out
    }

    /// 高度（空树为 0）
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// BST 有序、无右倾红链、无连续红链、黑高一致
    pub fn check_invariants(&self) -> bool {
        is_bst(&self.root, None, None) && is_23(&self.root, true) && is_balanced(&self.root)
    }
}

fn is_red<K, V>(link: &Link<K, V>) -> bool {
    matches!(link, Some(node) if node.color == Color::Red)
}

fn is_red_left_left<K, V>(h: &Node<K, V>) -> bool {
    h.left.as_ref().is_some_and(|l| is_red(&l.left))
}

fn is_red_right_left<K, V>(h: &Node<K, V>) -> bool {
    h.right.as_ref().is_some_and(|r| is_red(&r.left))
}

fn put<K: Ord, V>(link: Link<K, V>, key: K, val: V) -> (Box<Node<K, V>>, bool) {
    let Some(mut h) = link else {
        return (Node::red(key, val), true);
    };
    let inserted = match key.cmp(&h.key) {
        Ordering::Less => {
            let (left, inserted) = put(h.left.take(), key, val);
            h.left = Some(left);
            inserted
        }
        Ordering::Greater => {
            let (right, inserted) = put(h.right.take(), key, val);
            h.right = Some(right);
            inserted
        }
        Ordering::Equal => {
            h.val = val;
            false
        }
    };
    (balance(h), inserted)
}

// 调用方保证 key 存在于以 h 为根的子树中。
fn delete<K: Ord, V>(mut h: Box<Node<K, V>>, key: &K) -> Link<K, V> {
    if *key < h.key {
        if !is_red(&h.left) && !is_red_left_left(&h) {
            h = move_red_left(h);
        }
        if let Some(left) = h.left.take() {
            h.left = delete(left, key);
        }
    } else {
        if is_red(&h.left) {
            h = rotate_right(h);
        }
        if *key == h.key && h.right.is_none() {
            return None;
        }
        if !is_red(&h.right) && !is_red_right_left(&h) {
            h = move_red_right(h);
        }
        if let Some(right) = h.right.take() {
            if *key == h.key {
                // 用右子树的最小节点（中序后继）替换当前节点
                let (rest, min) = delete_min(right);
                let Node {
                    key: succ_key,
                    val: succ_val,
                    ..
                } = *min;
                h.key = succ_key;
                h.val = succ_val;
                h.right = rest;
            } else {
                h.right = delete(right, key);
            }
        }
    }
    Some(balance(h))
}

/// 删除子树的最小节点，返回（新子树，被摘下的节点）
fn delete_min<K, V>(mut h: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    if h.left.is_none() {
        let rest = h.right.take();
        return (rest, h);
    }
    if !is_red(&h.left) && !is_red_left_left(&h) {
        h = move_red_left(h);
    }
    match h.left.take() {
        Some(left) => {
            let (rest, min) = delete_min(left);
            h.left = rest;
            (Some(balance(h)), min)
        }
        None => {
            let rest = h.right.take();
            (rest, h)
        }
    }
}

fn rotate_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    debug_assert!(is_red(&h.right));
    let Some(mut x) = h.right.take() else {
        return h;
    };
    h.right = x.left.take();
    x.color = h.color;
    h.color = Color::Red;
    x.left = Some(h);
    x
}

fn rotate_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    debug_assert!(is_red(&h.left));
    let Some(mut x) = h.left.take() else {
        return h;
    };
    h.left = x.right.take();
    x.color = h.color;
    h.color = Color::Red;
    x.right = Some(h);
    x
}

fn flip_colors<K, V>(h: &mut Node<K, V>) {
    h.color = h.color.flip();
    if let Some(left) = h.left.as_mut() {
        left.color = left.color.flip();
    }
    if let Some(right) = h.right.as_mut() {
        right.color = right.color.flip();
    }
}

// h 为红且 h.left、h.left.left 都为黑：让 h.left 或其子节点变红。
fn move_red_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if is_red_right_left(&h) {
        if let Some(right) = h.right.take() {
            h.right = Some(rotate_right(right));
        }
        h = rotate_left(h);
        flip_colors(&mut h);
    }
    h
}

// h 为红且 h.right、h.right.left 都为黑：让 h.right 或其子节点变红。
fn move_red_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if is_red_left_left(&h) {
        h = rotate_right(h);
        flip_colors(&mut h);
    }
    h
}

fn balance<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&h.right) && !is_red(&h.left) {
        h = rotate_left(h);
    }
    if is_red(&h.left) && is_red_left_left(&h) {
        h = rotate_right(h);
    }
    if is_red(&h.left) && is_red(&h.right) {
        flip_colors(&mut h);
    }
    h
}

fn collect_range<'a, K: Ord, V>(
    link: &'a Link<K, V>,
    low: &K,
    high: &K,
    out: &mut Vec<(&'a K, &'a V)>,
) {
    let Some(node) = link else { return };
    if node.key > *low {
        collect_range(&node.left, low, high, out);
    }
    if node.key >= *low && node.key <= *high {
        out.push((&node.key, &node.val));
    }
    if node.key < *high {
        collect_range(&node.right, low, high, out);
    }
}

fn collect_all<'a, K, V>(link: &'a Link<K, V>, out: &mut Vec<(&'a K, &'a V)>) {
    let Some(node) = link else { return };
    collect_all(&node.left, out);
    out.push((&node.key, &node.val));
    collect_all(&node.right, out);
}

fn height<K, V>(link: &Link<K, V>) -> usize {
    match link {
        None => 0,
        Some(node) => 1 + height(&node.left).max(height(&node.right)),
    }
}

fn is_bst<K: Ord, V>(link: &Link<K, V>, min: Option<&K>, max: Option<&K>) -> bool {
    let Some(node) = link else { return true };
    if min.is_some_and(|m| node.key <= *m) || max.is_some_and(|m| node.key >= *m) {
        return false;
    }
    is_bst(&node.left, min, Some(&node.key)) && is_bst(&node.right, Some(&node.key), max)
}

fn is_23<K, V>(link: &Link<K, V>, is_root: bool) -> bool {
    let Some(node) = link else { return true };
    if is_red(&node.right) {
        return false;
    }
    if !is_root && node.color == Color::Red && is_red(&node.left) {
        return false;
    }
    is_23(&node.left, false) && is_23(&node.right, false)
}

fn is_balanced<K, V>(root: &Link<K, V>) -> bool {
    let mut black = 0;
    let mut x = root.as_deref();
    while let Some(node) = x {
        if node.color == Color::Black {
            black += 1;
        }
        x = node.left.as_deref();
    }
    black_height_matches(root, black)
}

fn black_height_matches<K, V>(link: &Link<K, V>, mut black: usize) -> bool {
    let Some(node) = link else { return black == 0 };
    if node.color == Color::Black {
        let Some(rest) = black.checked_sub(1) else {
            return false;
        };
        black = rest;
    }
    black_height_matches(&node.left, black) && black_height_matches(&node.right, black)
}

use crate::naming::{classify, EntryKind};
use indexmap::IndexMap;
use std::{fmt, io::Read};

/// One named entry of a tree description.
///
/// The trailing separator of `name` decides whether the node is a directory
/// or a file, see [`classify`].
#[derive(Debug)]
pub struct Node {
    pub name: String,
    pub content: Content,
}
impl Node {
    pub fn new<N: Into<String>, C: Into<Content>>(name: N, content: C) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        classify(&self.name)
    }
}

/// What a node holds. Whether a given variant is valid depends on the
/// node's [`EntryKind`]; the check happens when the node is materialized.
#[derive(Default)]
pub enum Content {
    /// An empty file or an empty directory.
    #[default]
    Absent,
    /// Bytes written verbatim into a file.
    Text(Vec<u8>),
    /// A byte source copied into a file. Read exactly once.
    Readable(Box<dyn Read>),
    /// A directory holding exactly one node.
    Child(Box<Node>),
    /// A directory holding a collection of nodes.
    Collection(Tree),
}
impl Content {
    pub fn reader<R: Read + 'static>(reader: R) -> Self {
        Self::Readable(Box::new(reader))
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Absent => ContentKind::Absent,
            Self::Text(_) => ContentKind::Text,
            Self::Readable(_) => ContentKind::Readable,
            Self::Child(_) => ContentKind::Child,
            Self::Collection(_) => ContentKind::Collection,
        }
    }
}
impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "Absent"),
            Self::Text(bytes) => f
                .debug_tuple("Text")
                .field(&String::from_utf8_lossy(bytes))
                .finish(),
            Self::Readable(_) => write!(f, "Readable(..)"),
            Self::Child(node) => f.debug_tuple("Child").field(node).finish(),
            Self::Collection(tree) => f.debug_tuple("Collection").field(tree).finish(),
        }
    }
}
impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::Text(value.as_bytes().to_vec())
    }
}
impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Text(value.into_bytes())
    }
}
impl From<&[u8]> for Content {
    fn from(value: &[u8]) -> Self {
        Self::Text(value.to_vec())
    }
}
impl From<Vec<u8>> for Content {
    fn from(value: Vec<u8>) -> Self {
        Self::Text(value)
    }
}
impl From<Node> for Content {
    fn from(value: Node) -> Self {
        Self::Child(Box::new(value))
    }
}
impl From<Tree> for Content {
    fn from(value: Tree) -> Self {
        Self::Collection(value)
    }
}
impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// The variant of a [`Content`] without its payload, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Absent,
    Text,
    Readable,
    Child,
    Collection,
}
impl ContentKind {
    fn as_str(&self) -> &str {
        match self {
            Self::Absent => "absent",
            Self::Text => "text",
            Self::Readable => "byte-stream",
            Self::Child => "single node",
            Self::Collection => "collection of nodes",
        }
    }
}
impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A collection of named nodes, kept in insertion order.
///
/// Names are unique within one tree. Inserting a name that is already
/// present replaces its content (last declaration wins) and keeps the
/// position of the first declaration.
#[derive(Debug, Default)]
pub struct Tree(IndexMap<String, Content>);
impl Tree {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Adds `name`, returning the content it replaced if the name was already present.
    pub fn insert<N: Into<String>, C: Into<Content>>(
        &mut self,
        name: N,
        content: C,
    ) -> Option<Content> {
        let name = name.into();
        let replaced = self.0.insert(name, content.into());

        if replaced.is_some() {
            log::debug!("duplicate entry replaced its earlier declaration");
        }

        replaced
    }

    /// Builder form of [`Tree::insert`].
    pub fn with<N: Into<String>, C: Into<Content>>(mut self, name: N, content: C) -> Self {
        self.insert(name, content);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Content> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Content)> {
        self.0.iter().map(|(name, content)| (name.as_str(), content))
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.into_iter().collect()
    }
}
fn into_node((name, content): (String, Content)) -> Node {
    Node { name, content }
}
impl IntoIterator for Tree {
    type Item = Node;
    type IntoIter =
        std::iter::Map<indexmap::map::IntoIter<String, Content>, fn((String, Content)) -> Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0
            .into_iter()
            .map(into_node as fn((String, Content)) -> Node)
    }
}
impl<N: Into<String>, C: Into<Content>> FromIterator<(N, C)> for Tree {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        for (name, content) in iter {
            tree.insert(name, content);
        }
        tree
    }
}
impl FromIterator<Node> for Tree {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        iter.into_iter()
            .map(|node| (node.name, node.content))
            .collect()
    }
}
impl<N: Into<String>, C: Into<Content>, const M: usize> From<[(N, C); M]> for Tree {
    fn from(entries: [(N, C); M]) -> Self {
        entries.into_iter().collect()
    }
}
impl From<Vec<Node>> for Tree {
    fn from(nodes: Vec<Node>) -> Self {
        nodes.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_pick_expected_variant() {
        assert_eq!(Content::from("hi").kind(), ContentKind::Text);
        assert_eq!(Content::from(String::from("hi")).kind(), ContentKind::Text);
        assert_eq!(Content::from(&b"hi"[..]).kind(), ContentKind::Text);
        assert_eq!(Content::from(vec![0u8, 1]).kind(), ContentKind::Text);
        assert_eq!(Content::from(Node::new("a", "")).kind(), ContentKind::Child);
        assert_eq!(Content::from(Tree::new()).kind(), ContentKind::Collection);
        assert_eq!(Content::from(None::<&str>).kind(), ContentKind::Absent);
        assert_eq!(Content::from(Some("x")).kind(), ContentKind::Text);
        assert_eq!(Content::reader(&b"x"[..]).kind(), ContentKind::Readable);
        assert_eq!(Content::default().kind(), ContentKind::Absent);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let tree = Tree::new()
            .with("zeta.txt", "")
            .with("alpha/", None::<Tree>)
            .with("mid.txt", "");

        let names: Vec<&str> = tree.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta.txt", "alpha/", "mid.txt"]);
    }

    #[test]
    fn test_duplicate_name_last_declaration_wins_in_first_position() {
        let mut tree = Tree::new();
        assert!(tree.insert("a.txt", "first").is_none());
        tree.insert("b.txt", "");

        let replaced = tree.insert("a.txt", "second");
        assert!(matches!(replaced, Some(Content::Text(ref bytes)) if bytes == b"first"));

        let nodes = tree.into_nodes();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "a.txt");
        assert!(matches!(nodes[0].content, Content::Text(ref bytes) if bytes == b"second"));
    }

    #[test]
    fn test_tree_from_nodes_and_pairs() {
        let from_nodes = Tree::from(vec![Node::new("a/", None::<Tree>), Node::new("b", "x")]);
        assert_eq!(from_nodes.len(), 2);
        assert_eq!(from_nodes.get("b").map(Content::kind), Some(ContentKind::Text));

        let from_pairs = Tree::from([("one", "1"), ("two", "2")]);
        assert_eq!(from_pairs.len(), 2);
        assert!(from_pairs.get("three").is_none());
    }

    #[test]
    fn test_node_kind_follows_name() {
        assert_eq!(Node::new("dir/", None::<Tree>).kind(), EntryKind::Directory);
        assert_eq!(Node::new("file", "").kind(), EntryKind::File);
    }

    #[test]
    fn test_debug_does_not_consume_reader() {
        let content = Content::reader(&b"payload"[..]);

        assert_eq!(format!("{:?}", content), "Readable(..)");
        assert_eq!(format!("{:?}", Content::from("hi")), "Text(\"hi\")");
    }
}

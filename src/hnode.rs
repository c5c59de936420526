use std::collections::HashMap;

/// How a heterogeneous tree renders a `true` leaf.
pub const TRUE_STR: &str = "T";
/// How a heterogeneous tree renders a `false` leaf.
pub const FALSE_STR: &str = "F";

/// Style hint attached to a [`HNode::Leaf`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    TypeName,
    StringConst,
    OtherConst,
    External,
    UserType,
}

/// A heterogeneous tree node, the input shape of the pretty-printer.
///
/// Producers walking cyclic object graphs are responsible for emitting
/// [`HNode::AlreadySeen`] for back-edges instead of re-descending; see
/// [`TraversalState`].
#[derive(Clone, Debug)]
pub enum HNode {
    /// A scalar value rendered as a styled string.
    Leaf { s: String, color: Color },
    /// A homogeneous ordered list.
    Array { children: Vec<HNode> },
    /// A named aggregate with delimiters and either named or unnamed fields.
    Record(Record),
    /// A back-reference to a node already printed, identified by an opaque
    /// object id.
    AlreadySeen { heap_id: usize },
}

/// A named aggregate. At most one of `fields` and `unnamed_fields` is
/// non-empty.
#[derive(Clone, Debug, Default)]
pub struct Record {
    pub node_type: String,
    pub left: String,
    pub right: String,
    pub fields: Vec<Field>,
    pub unnamed_fields: Vec<HNode>,
}

#[derive(Clone, Debug)]
pub struct Field {
    pub name: String,
    pub val: HNode,
}

impl HNode {
    pub fn leaf(s: impl Into<String>, color: Color) -> HNode {
        HNode::Leaf {
            s: s.into(),
            color,
        }
    }

    /// Number of nodes in the tree: one per node plus its children, with
    /// record fields counting their values.
    pub fn count(&self) -> usize {
        match self {
            HNode::AlreadySeen { .. } | HNode::Leaf { .. } => 1,
            HNode::Array { children } => 1 + children.iter().map(HNode::count).sum::<usize>(),
            HNode::Record(record) => {
                1 + record
                    .fields
                    .iter()
                    .map(|f| f.val.count())
                    .sum::<usize>()
                    + record
                        .unnamed_fields
                        .iter()
                        .map(HNode::count)
                        .sum::<usize>()
            }
        }
    }
}

impl Record {
    /// A record with parenthesis delimiters and no fields yet.
    pub fn new(node_type: impl Into<String>) -> Record {
        Record {
            node_type: node_type.into(),
            left: "(".to_string(),
            right: ")".to_string(),
            fields: vec![],
            unnamed_fields: vec![],
        }
    }

    pub fn field(mut self, name: impl Into<String>, val: HNode) -> Record {
        self.fields.push(Field {
            name: name.into(),
            val,
        });
        self
    }
}

impl From<Record> for HNode {
    fn from(record: Record) -> HNode {
        HNode::Record(record)
    }
}

/// Identity bookkeeping for producers walking object graphs that may share
/// or cycle.
///
/// A producer pre-walks with `seen`/`ref_count` keyed by object identity and
/// emits [`HNode::AlreadySeen`] instead of re-descending; the encoder trusts
/// the resulting tree and performs no cycle detection of its own.
#[derive(Debug, Default)]
pub struct TraversalState {
    pub seen: HashMap<usize, bool>,
    pub ref_count: HashMap<usize, usize>,
}

impl TraversalState {
    pub fn new() -> TraversalState {
        TraversalState::default()
    }
}

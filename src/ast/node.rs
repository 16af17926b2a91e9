use crate::ast::{AggregateOp, Comparator, Literal, LogicalOp, Pattern};

/// Abstract Syntax Tree node of a parsed search query.
///
/// A tree is built once per [`parse`](crate::parse) call and is never mutated
/// afterwards. Every `Op` child is a complete node; parsing fails rather than
/// producing a partial tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Boolean combination of two sub-expressions
    ///
    /// Chains nest to the right: `a AND b OR c` is `And(a, Or(b, c))`.
    ///
    /// # Example
    /// ```text
    /// level:error AND type:upload
    /// ```
    Op {
        op: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Comparison of a document field against a value
    ///
    /// # Examples
    /// ```text
    /// user.name:Tobi
    /// level >= 5
    /// failed
    /// ```
    Field(Field),

    /// Comparison involving a `$$`-prefixed aggregate variable
    ///
    /// # Examples
    /// ```text
    /// $$companies.name:/^acme/i
    /// $$companies.vat != 0000
    /// ```
    Aggregate(AggregateExpr),
}

impl Node {
    /// Builds an `Op` node.
    pub fn op(op: LogicalOp, left: Node, right: Node) -> Self {
        Node::Op {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds an equality `Field` node.
    pub fn field(name: impl Into<String>, value: impl Into<Literal>) -> Self {
        Node::Field(Field {
            name: name.into(),
            value: value.into(),
            cmp: None,
        })
    }

    /// Builds a `Field` node with an explicit comparator.
    pub fn compare(name: impl Into<String>, cmp: Comparator, value: impl Into<Literal>) -> Self {
        Node::Field(Field {
            name: name.into(),
            value: value.into(),
            cmp: Some(cmp),
        })
    }

    /// Renders the tree as JSON in the `{"type": "field" | "op", ...}` shape.
    pub fn to_json(&self) -> serde_json::Value {
        crate::output::ast_to_json(self)
    }
}

/// A plain field comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field path, dots included (`user.name`)
    pub name: String,

    pub value: Literal,

    /// `None` means equality
    pub cmp: Option<Comparator>,
}

/// Leaf built for `$$`-prefixed names.
///
/// These compile to aggregation-expression operators instead of a
/// `{field: value}` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateExpr {
    /// `{ $regexMatch: { input, regex } }`
    RegexMatch { input: String, regex: Pattern },

    /// `{ $eq: [input, value] }` or the comparator form (`$ne`, `$gt`, ...)
    Compare {
        op: AggregateOp,
        input: String,
        value: Literal,
    },
}

impl AggregateExpr {
    /// The operator key this leaf compiles to (`$regexMatch`, `$eq`, `$ne`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            AggregateExpr::RegexMatch { .. } => "$regexMatch",
            AggregateExpr::Compare { op, .. } => op.key(),
        }
    }

    /// The `$$` variable this leaf reads.
    pub fn input(&self) -> &str {
        match self {
            AggregateExpr::RegexMatch { input, .. } | AggregateExpr::Compare { input, .. } => input,
        }
    }
}

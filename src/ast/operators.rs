/// Boolean combinators joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// Logical AND (`AND`, case-insensitive)
    And,
    /// Logical OR (`OR`, case-insensitive)
    Or,
}

impl LogicalOp {
    /// Maps a matched keyword to its operator.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("and") {
            Some(LogicalOp::And)
        } else if keyword.eq_ignore_ascii_case("or") {
            Some(LogicalOp::Or)
        } else {
            None
        }
    }

    /// Lowercase name used in the AST rendering (`and`, `or`).
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }

    /// Key of the compiled query object (`$and`, `$or`).
    pub fn key(&self) -> &'static str {
        match self {
            LogicalOp::And => "$and",
            LogicalOp::Or => "$or",
        }
    }
}

/// Field comparators.
///
/// Equality has no variant: a field written with `:`, `=` or `==` carries no
/// comparator at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Greater than (`>`)
    Gt,
    /// Less than (`<`)
    Lt,
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than or equal (`<=`)
    Lte,
    /// Not equal (`!=`)
    Ne,
}

impl Comparator {
    /// Maps a comparator token to its variant. Equality tokens are not
    /// comparators and yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ">" => Some(Comparator::Gt),
            "<" => Some(Comparator::Lt),
            ">=" => Some(Comparator::Gte),
            "<=" => Some(Comparator::Lte),
            "!=" => Some(Comparator::Ne),
            _ => None,
        }
    }

    /// Lowercase name (`gt`, `lt`, `gte`, `lte`, `ne`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Gt => "gt",
            Comparator::Lt => "lt",
            Comparator::Gte => "gte",
            Comparator::Lte => "lte",
            Comparator::Ne => "ne",
        }
    }

    /// Query operator key (`$gt`, `$lt`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Comparator::Gt => "$gt",
            Comparator::Lt => "$lt",
            Comparator::Gte => "$gte",
            Comparator::Lte => "$lte",
            Comparator::Ne => "$ne",
        }
    }
}

/// Operator of an aggregate-variable comparison: equality or one of the
/// explicit comparators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    /// `$eq`
    Eq,
    /// `$gt`, `$lt`, `$gte`, `$lte` or `$ne`
    Cmp(Comparator),
}

impl AggregateOp {
    pub fn key(&self) -> &'static str {
        match self {
            AggregateOp::Eq => "$eq",
            AggregateOp::Cmp(cmp) => cmp.key(),
        }
    }
}

impl From<Option<Comparator>> for AggregateOp {
    fn from(cmp: Option<Comparator>) -> Self {
        cmp.map_or(AggregateOp::Eq, AggregateOp::Cmp)
    }
}

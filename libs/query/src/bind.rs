/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Float(f64),
}

/// A complete SQL statement with its positional bind values.
///
/// `binds[0]` belongs to `$1`, `binds[1]` to `$2`, and so on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            binds: Vec::new(),
        }
    }

    pub fn bind(mut self, value: BindValue) -> Self {
        self.binds.push(value);
        self
    }
}

pub(crate) fn push_bind(binds: &mut Vec<BindValue>, value: BindValue) -> usize {
    binds.push(value);
    binds.len()
}

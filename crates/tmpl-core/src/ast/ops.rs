use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarKind {
    #[serde(rename = "var")]
    #[display("var")]
    Var,
    #[serde(rename = "let")]
    #[display("let")]
    Let,
    #[serde(rename = "const")]
    #[display("const")]
    Const,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    #[display("=")]
    Assign,
    #[serde(rename = "+=")]
    #[display("+=")]
    AddAssign,
    #[serde(rename = "-=")]
    #[display("-=")]
    SubAssign,
    #[serde(rename = "*=")]
    #[display("*=")]
    MulAssign,
    #[serde(rename = "/=")]
    #[display("/=")]
    DivAssign,
    #[serde(rename = "%=")]
    #[display("%=")]
    RemAssign,
    #[serde(rename = "|=")]
    #[display("|=")]
    BitOrAssign,
    #[serde(rename = "&=")]
    #[display("&=")]
    BitAndAssign,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    #[display("==")]
    Eq,
    #[serde(rename = "!=")]
    #[display("!=")]
    NotEq,
    #[serde(rename = "===")]
    #[display("===")]
    StrictEq,
    #[serde(rename = "!==")]
    #[display("!==")]
    StrictNotEq,
    #[serde(rename = "<")]
    #[display("<")]
    Lt,
    #[serde(rename = "<=")]
    #[display("<=")]
    LtEq,
    #[serde(rename = ">")]
    #[display(">")]
    Gt,
    #[serde(rename = ">=")]
    #[display(">=")]
    GtEq,
    #[serde(rename = "+")]
    #[display("+")]
    Add,
    #[serde(rename = "-")]
    #[display("-")]
    Sub,
    #[serde(rename = "*")]
    #[display("*")]
    Mul,
    #[serde(rename = "/")]
    #[display("/")]
    Div,
    #[serde(rename = "%")]
    #[display("%")]
    Rem,
    #[serde(rename = "|")]
    #[display("|")]
    BitOr,
    #[serde(rename = "^")]
    #[display("^")]
    BitXor,
    #[serde(rename = "&")]
    #[display("&")]
    BitAnd,
    #[serde(rename = "<<")]
    #[display("<<")]
    Shl,
    #[serde(rename = ">>")]
    #[display(">>")]
    Shr,
    #[serde(rename = ">>>")]
    #[display(">>>")]
    UShr,
    #[serde(rename = "in")]
    #[display("in")]
    In,
    #[serde(rename = "instanceof")]
    #[display("instanceof")]
    InstanceOf,
}

impl BinaryOperator {
    pub fn precedence(self) -> u8 {
        use BinaryOperator::*;
        match self {
            BitOr => 6,
            BitXor => 7,
            BitAnd => 8,
            Eq | NotEq | StrictEq | StrictNotEq => 9,
            Lt | LtEq | Gt | GtEq | In | InstanceOf => 10,
            Shl | Shr | UShr => 11,
            Add | Sub => 12,
            Mul | Div | Rem => 13,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "||")]
    #[display("||")]
    Or,
    #[serde(rename = "&&")]
    #[display("&&")]
    And,
}

impl LogicalOperator {
    pub fn precedence(self) -> u8 {
        match self {
            LogicalOperator::Or => 4,
            LogicalOperator::And => 5,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    #[display("-")]
    Minus,
    #[serde(rename = "+")]
    #[display("+")]
    Plus,
    #[serde(rename = "!")]
    #[display("!")]
    Not,
    #[serde(rename = "~")]
    #[display("~")]
    BitNot,
    #[serde(rename = "typeof")]
    #[display("typeof")]
    TypeOf,
    #[serde(rename = "void")]
    #[display("void")]
    Void,
    #[serde(rename = "delete")]
    #[display("delete")]
    Delete,
}

impl UnaryOperator {
    /// Keyword operators need a space before their operand.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            UnaryOperator::TypeOf | UnaryOperator::Void | UnaryOperator::Delete
        )
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    #[display("++")]
    Increment,
    #[serde(rename = "--")]
    #[display("--")]
    Decrement,
}

use once_cell::sync::Lazy;

/// Highest binary precedence level; an expression parse starts here.
pub const MAX_PRECEDENCE_LEVEL: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Multiply,
    Divide,
    Modulo,
    Plus,
    Minus,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    InstanceOf,
    Equal,
    NotEqual,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalOr,
    Assign,
    /// `op=`; the wrapped operator is applied before assigning.
    CompoundAssign(ArithmeticOperator),
}

/// Operators that have a compound assignment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Multiply,
    Divide,
    Modulo,
    Plus,
    Minus,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
}

impl ArithmeticOperator {
    pub fn as_binary(self) -> BinaryOperator {
        match self {
            ArithmeticOperator::Multiply => BinaryOperator::Multiply,
            ArithmeticOperator::Divide => BinaryOperator::Divide,
            ArithmeticOperator::Modulo => BinaryOperator::Modulo,
            ArithmeticOperator::Plus => BinaryOperator::Plus,
            ArithmeticOperator::Minus => BinaryOperator::Minus,
            ArithmeticOperator::ShiftLeft => BinaryOperator::ShiftLeft,
            ArithmeticOperator::ShiftRight => BinaryOperator::ShiftRight,
            ArithmeticOperator::UnsignedShiftRight => BinaryOperator::UnsignedShiftRight,
            ArithmeticOperator::BitwiseAnd => BinaryOperator::BitwiseAnd,
            ArithmeticOperator::BitwiseXor => BinaryOperator::BitwiseXor,
            ArithmeticOperator::BitwiseOr => BinaryOperator::BitwiseOr,
        }
    }
}

const ARITHMETIC: [ArithmeticOperator; 11] = [
    ArithmeticOperator::Multiply,
    ArithmeticOperator::Divide,
    ArithmeticOperator::Modulo,
    ArithmeticOperator::Plus,
    ArithmeticOperator::Minus,
    ArithmeticOperator::ShiftLeft,
    ArithmeticOperator::ShiftRight,
    ArithmeticOperator::UnsignedShiftRight,
    ArithmeticOperator::BitwiseAnd,
    ArithmeticOperator::BitwiseXor,
    ArithmeticOperator::BitwiseOr,
];

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::UnsignedShiftRight => ">>>",
            BinaryOperator::Less => "<",
            BinaryOperator::LessOrEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::InstanceOf => "instanceof",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::Assign => "=",
            BinaryOperator::CompoundAssign(op) => match op {
                ArithmeticOperator::Multiply => "*=",
                ArithmeticOperator::Divide => "/=",
                ArithmeticOperator::Modulo => "%=",
                ArithmeticOperator::Plus => "+=",
                ArithmeticOperator::Minus => "-=",
                ArithmeticOperator::ShiftLeft => "<<=",
                ArithmeticOperator::ShiftRight => ">>=",
                ArithmeticOperator::UnsignedShiftRight => ">>>=",
                ArithmeticOperator::BitwiseAnd => "&=",
                ArithmeticOperator::BitwiseXor => "^=",
                ArithmeticOperator::BitwiseOr => "|=",
            },
        }
    }

    /// 0 binds tightest (`*`), [`MAX_PRECEDENCE_LEVEL`] loosest (assignments).
    pub fn precedence_level(self) -> u8 {
        match self {
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 0,
            BinaryOperator::Plus | BinaryOperator::Minus => 1,
            BinaryOperator::ShiftLeft
            | BinaryOperator::ShiftRight
            | BinaryOperator::UnsignedShiftRight => 2,
            BinaryOperator::Less
            | BinaryOperator::LessOrEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterOrEqual
            | BinaryOperator::InstanceOf => 3,
            BinaryOperator::Equal | BinaryOperator::NotEqual => 4,
            BinaryOperator::BitwiseAnd => 5,
            BinaryOperator::BitwiseXor => 6,
            BinaryOperator::BitwiseOr => 7,
            BinaryOperator::LogicalAnd => 8,
            BinaryOperator::LogicalOr => 9,
            BinaryOperator::Assign | BinaryOperator::CompoundAssign(_) => MAX_PRECEDENCE_LEVEL,
        }
    }

    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOperator::Assign | BinaryOperator::CompoundAssign(_)
        )
    }

    /// Assignments group to the right, everything else to the left.
    pub fn is_right_associative(self) -> bool {
        self.is_assignment()
    }

    pub fn is_short_circuit(self) -> bool {
        matches!(self, BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Increment,
    Decrement,
    Plus,
    Minus,
    LogicalNot,
    BitwiseNot,
}

impl UnaryOperator {
    pub const ALL: [UnaryOperator; 6] = [
        UnaryOperator::Increment,
        UnaryOperator::Decrement,
        UnaryOperator::Plus,
        UnaryOperator::Minus,
        UnaryOperator::LogicalNot,
        UnaryOperator::BitwiseNot,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Increment => "++",
            UnaryOperator::Decrement => "--",
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

/// Every binary operator, longest symbol first so a scan in this order implements
/// longest-match (`>>>=` before `>>>` before `>>` before `>`).
pub static BINARY_OPERATORS: Lazy<Vec<BinaryOperator>> = Lazy::new(|| {
    let mut ops = vec![
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Modulo,
        BinaryOperator::Plus,
        BinaryOperator::Minus,
        BinaryOperator::ShiftLeft,
        BinaryOperator::ShiftRight,
        BinaryOperator::UnsignedShiftRight,
        BinaryOperator::Less,
        BinaryOperator::LessOrEqual,
        BinaryOperator::Greater,
        BinaryOperator::GreaterOrEqual,
        BinaryOperator::InstanceOf,
        BinaryOperator::Equal,
        BinaryOperator::NotEqual,
        BinaryOperator::BitwiseAnd,
        BinaryOperator::BitwiseXor,
        BinaryOperator::BitwiseOr,
        BinaryOperator::LogicalAnd,
        BinaryOperator::LogicalOr,
        BinaryOperator::Assign,
    ];
    ops.extend(ARITHMETIC.into_iter().map(BinaryOperator::CompoundAssign));
    ops.sort_by_key(|op| std::cmp::Reverse(op.symbol().len()));
    ops
});

pub static UNARY_OPERATOR_SYMBOLS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut symbols: Vec<_> = UnaryOperator::ALL.iter().map(|op| op.symbol()).collect();
    symbols.sort_by_key(|s| std::cmp::Reverse(s.len()));
    symbols
});

/// Binary operator whose symbol starts `text`, longest match first.
pub fn match_binary_operator(text: &str) -> Option<BinaryOperator> {
    BINARY_OPERATORS.iter().copied().find(|op| {
        let symbol = op.symbol();
        if !text.starts_with(symbol) {
            return false;
        }
        // `instanceofFoo` is an identifier.
        if *op == BinaryOperator::InstanceOf {
            return !text[symbol.len()..]
                .chars()
                .next()
                .is_some_and(crate::is_identifier_part);
        }
        true
    })
}

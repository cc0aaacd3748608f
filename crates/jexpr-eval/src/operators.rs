//! Semantics of unary and binary operators, casts and assignments.

use jexpr_syntax::{BinaryOperator, UnaryOperator};
use jexpr_types::{
    binary_numeric_promotion, format_type, is_castable, is_subtype, rate_type_match,
    unary_numeric_promotion, PrimitiveType, Thrown, Type, TypeStore, Value,
};

use crate::executable::{convert_for_assignment, java_string};
use crate::object_info::ObjectInfo;
use crate::toolbox::Toolbox;

#[derive(Debug)]
pub(crate) enum OperatorError {
    /// The operand types do not fit the operator.
    Semantic(String),
    Thrown(Thrown),
}

impl From<Thrown> for OperatorError {
    fn from(thrown: Thrown) -> Self {
        OperatorError::Thrown(thrown)
    }
}

type OperatorResult = Result<ObjectInfo, OperatorError>;

fn not_applicable(store: &TypeStore, symbol: &str, types: &[&Type]) -> OperatorError {
    let names: Vec<String> = types.iter().map(|ty| format_type(store, ty)).collect();
    OperatorError::Semantic(format!(
        "Operator '{symbol}' cannot be applied to {}",
        names.join(", ")
    ))
}

/// The primitive a value of type `ty` is, after unboxing.
fn primitive_of(store: &TypeStore, ty: &Type) -> Option<PrimitiveType> {
    match ty {
        Type::Primitive(p) => Some(*p),
        other => store.unboxed_type(other),
    }
}

fn unboxed(value: &Value, target: PrimitiveType) -> Result<Value, Thrown> {
    if value.is_null() {
        return Err(Thrown::null_pointer("Cannot unbox null value"));
    }
    value
        .convert_primitive(target)
        .ok_or_else(|| Thrown::class_cast(format!("{value:?} is not a {}", target.name())))
}

/// Computes a result from determinate operands. Exceptions only surface in evaluating modes;
/// otherwise the result is indeterminate.
fn with_value(
    tb: &Toolbox<'_>,
    ty: Type,
    operands: &[&ObjectInfo],
    compute: impl FnOnce() -> Result<Value, Thrown>,
) -> OperatorResult {
    if operands.iter().any(|op| op.value.is_indeterminate()) {
        return Ok(ObjectInfo::indeterminate(ty));
    }
    match compute() {
        Ok(value) => Ok(ObjectInfo::new(value, ty)),
        Err(_) if !tb.evaluates() => Ok(ObjectInfo::indeterminate(ty)),
        Err(thrown) => Err(thrown.into()),
    }
}

pub(crate) fn apply_unary(tb: &Toolbox<'_>, op: UnaryOperator, operand: &ObjectInfo) -> OperatorResult {
    let store = tb.store;
    let ty = tb.lookup_type(operand);
    match op {
        UnaryOperator::Plus | UnaryOperator::Minus => {
            let promoted = unary_numeric_promotion(store, &ty)
                .ok_or_else(|| not_applicable(store, op.symbol(), &[&ty]))?;
            with_value(tb, Type::Primitive(promoted), &[operand], || {
                let value = unboxed(&operand.value, promoted)?;
                Ok(if op == UnaryOperator::Plus {
                    value
                } else {
                    negate(value)
                })
            })
        }
        UnaryOperator::BitwiseNot => {
            let promoted = unary_numeric_promotion(store, &ty)
                .filter(|p| p.is_integral())
                .ok_or_else(|| not_applicable(store, op.symbol(), &[&ty]))?;
            with_value(tb, Type::Primitive(promoted), &[operand], || {
                Ok(match unboxed(&operand.value, promoted)? {
                    Value::Long(v) => Value::Long(!v),
                    other => Value::Int(!(other.as_i64().unwrap_or(0) as i32)),
                })
            })
        }
        UnaryOperator::LogicalNot => {
            if primitive_of(store, &ty) != Some(PrimitiveType::Boolean) {
                return Err(not_applicable(store, op.symbol(), &[&ty]));
            }
            with_value(tb, Type::boolean(), &[operand], || {
                Ok(Value::Boolean(!unboxed(&operand.value, PrimitiveType::Boolean)?.as_bool().unwrap_or(false)))
            })
        }
        UnaryOperator::Increment | UnaryOperator::Decrement => {
            let delta = if op == UnaryOperator::Increment { 1 } else { -1 };
            step(tb, operand, delta, op.symbol())
        }
    }
}

fn negate(value: Value) -> Value {
    match value {
        Value::Int(v) => Value::Int(v.wrapping_neg()),
        Value::Long(v) => Value::Long(v.wrapping_neg()),
        Value::Float(v) => Value::Float(-v),
        Value::Double(v) => Value::Double(-v),
        other => other,
    }
}

/// `++x` / `--x`: the new value in the operand's own type.
fn step(tb: &Toolbox<'_>, operand: &ObjectInfo, delta: i64, symbol: &str) -> OperatorResult {
    let store = tb.store;
    let ty = operand.static_type(store);
    let primitive = primitive_of(store, &ty)
        .filter(|p| p.is_numeric())
        .ok_or_else(|| not_applicable(store, symbol, &[&ty]))?;
    with_value(tb, ty.clone(), &[operand], || {
        let promoted = unboxed(&operand.value, primitive)?;
        let stepped = match promoted {
            Value::Float(v) => Value::Float(v + delta as f32),
            Value::Double(v) => Value::Double(v + delta as f64),
            Value::Long(v) => Value::Long(v.wrapping_add(delta)),
            other => Value::Long(other.as_i64().unwrap_or(0).wrapping_add(delta)),
        };
        unboxed(&stepped, primitive)
    })
}

/// Binary operators other than assignments and `instanceof`.
pub(crate) fn apply_binary(
    tb: &Toolbox<'_>,
    op: BinaryOperator,
    lhs: &ObjectInfo,
    rhs: &ObjectInfo,
) -> OperatorResult {
    let store = tb.store;
    let lhs_ty = tb.lookup_type(lhs);
    let rhs_ty = tb.lookup_type(rhs);
    let string = store.string_type();

    match op {
        BinaryOperator::Plus if lhs_ty == string || rhs_ty == string => {
            if lhs_ty == Type::Void || rhs_ty == Type::Void {
                return Err(not_applicable(store, op.symbol(), &[&lhs_ty, &rhs_ty]));
            }
            with_value(tb, string, &[lhs, rhs], || {
                let mut text = java_string(store, &lhs.value)?;
                text.push_str(&java_string(store, &rhs.value)?);
                Ok(Value::string(text))
            })
        }
        BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Modulo
        | BinaryOperator::Plus
        | BinaryOperator::Minus => {
            let promoted = binary_numeric_promotion(store, &lhs_ty, &rhs_ty)
                .ok_or_else(|| not_applicable(store, op.symbol(), &[&lhs_ty, &rhs_ty]))?;
            with_value(tb, Type::Primitive(promoted), &[lhs, rhs], || {
                arithmetic(op, promoted, &lhs.value, &rhs.value)
            })
        }
        BinaryOperator::ShiftLeft
        | BinaryOperator::ShiftRight
        | BinaryOperator::UnsignedShiftRight => {
            let left = unary_numeric_promotion(store, &lhs_ty).filter(|p| p.is_integral());
            let right = unary_numeric_promotion(store, &rhs_ty).filter(|p| p.is_integral());
            let (Some(left), Some(_)) = (left, right) else {
                return Err(not_applicable(store, op.symbol(), &[&lhs_ty, &rhs_ty]));
            };
            with_value(tb, Type::Primitive(left), &[lhs, rhs], || {
                shift(op, left, &lhs.value, &rhs.value)
            })
        }
        BinaryOperator::Less
        | BinaryOperator::LessOrEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterOrEqual => {
            let promoted = binary_numeric_promotion(store, &lhs_ty, &rhs_ty)
                .ok_or_else(|| not_applicable(store, op.symbol(), &[&lhs_ty, &rhs_ty]))?;
            with_value(tb, Type::boolean(), &[lhs, rhs], || {
                compare(op, promoted, &lhs.value, &rhs.value).map(Value::Boolean)
            })
        }
        BinaryOperator::Equal | BinaryOperator::NotEqual => {
            let equal = equality(store, &lhs_ty, &rhs_ty, op)?;
            with_value(tb, Type::boolean(), &[lhs, rhs], || {
                let same = equal(&lhs.value, &rhs.value)?;
                Ok(Value::Boolean(same == (op == BinaryOperator::Equal)))
            })
        }
        BinaryOperator::BitwiseAnd | BinaryOperator::BitwiseXor | BinaryOperator::BitwiseOr => {
            let both_boolean = primitive_of(store, &lhs_ty) == Some(PrimitiveType::Boolean)
                && primitive_of(store, &rhs_ty) == Some(PrimitiveType::Boolean);
            if both_boolean {
                return with_value(tb, Type::boolean(), &[lhs, rhs], || {
                    let a = unboxed(&lhs.value, PrimitiveType::Boolean)?.as_bool().unwrap_or(false);
                    let b = unboxed(&rhs.value, PrimitiveType::Boolean)?.as_bool().unwrap_or(false);
                    Ok(Value::Boolean(match op {
                        BinaryOperator::BitwiseAnd => a & b,
                        BinaryOperator::BitwiseXor => a ^ b,
                        _ => a | b,
                    }))
                });
            }
            let promoted = binary_numeric_promotion(store, &lhs_ty, &rhs_ty)
                .filter(|p| p.is_integral())
                .ok_or_else(|| not_applicable(store, op.symbol(), &[&lhs_ty, &rhs_ty]))?;
            with_value(tb, Type::Primitive(promoted), &[lhs, rhs], || {
                arithmetic(op, promoted, &lhs.value, &rhs.value)
            })
        }
        BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr => {
            let is_boolean = |ty: &Type| primitive_of(store, ty) == Some(PrimitiveType::Boolean);
            if !is_boolean(&lhs_ty) || !is_boolean(&rhs_ty) {
                return Err(not_applicable(store, op.symbol(), &[&lhs_ty, &rhs_ty]));
            }
            with_value(tb, Type::boolean(), &[lhs, rhs], || {
                let a = unboxed(&lhs.value, PrimitiveType::Boolean)?.as_bool().unwrap_or(false);
                let b = unboxed(&rhs.value, PrimitiveType::Boolean)?.as_bool().unwrap_or(false);
                Ok(Value::Boolean(if op == BinaryOperator::LogicalAnd {
                    a && b
                } else {
                    a || b
                }))
            })
        }
        BinaryOperator::InstanceOf | BinaryOperator::Assign | BinaryOperator::CompoundAssign(_) => {
            Err(OperatorError::Semantic(format!(
                "Operator '{}' needs special handling",
                op.symbol()
            )))
        }
    }
}

/// The value `lhs && rhs` / `lhs || rhs` has without looking at `rhs`, if any.
pub(crate) fn short_circuit_value(op: BinaryOperator, lhs: &ObjectInfo) -> Option<bool> {
    let value = lhs.value.as_bool()?;
    match op {
        BinaryOperator::LogicalAnd if !value => Some(false),
        BinaryOperator::LogicalOr if value => Some(true),
        _ => None,
    }
}

fn arithmetic(op: BinaryOperator, promoted: PrimitiveType, a: &Value, b: &Value) -> Result<Value, Thrown> {
    let a = unboxed(a, promoted)?;
    let b = unboxed(b, promoted)?;
    let division_by_zero = || Thrown::arithmetic("/ by zero");
    Ok(match (a, b) {
        (Value::Int(x), Value::Int(y)) => Value::Int(match op {
            BinaryOperator::Multiply => x.wrapping_mul(y),
            BinaryOperator::Divide if y == 0 => return Err(division_by_zero()),
            BinaryOperator::Divide => x.wrapping_div(y),
            BinaryOperator::Modulo if y == 0 => return Err(division_by_zero()),
            BinaryOperator::Modulo => x.wrapping_rem(y),
            BinaryOperator::Plus => x.wrapping_add(y),
            BinaryOperator::Minus => x.wrapping_sub(y),
            BinaryOperator::BitwiseAnd => x & y,
            BinaryOperator::BitwiseXor => x ^ y,
            _ => x | y,
        }),
        (Value::Long(x), Value::Long(y)) => Value::Long(match op {
            BinaryOperator::Multiply => x.wrapping_mul(y),
            BinaryOperator::Divide if y == 0 => return Err(division_by_zero()),
            BinaryOperator::Divide => x.wrapping_div(y),
            BinaryOperator::Modulo if y == 0 => return Err(division_by_zero()),
            BinaryOperator::Modulo => x.wrapping_rem(y),
            BinaryOperator::Plus => x.wrapping_add(y),
            BinaryOperator::Minus => x.wrapping_sub(y),
            BinaryOperator::BitwiseAnd => x & y,
            BinaryOperator::BitwiseXor => x ^ y,
            _ => x | y,
        }),
        (Value::Float(x), Value::Float(y)) => Value::Float(match op {
            BinaryOperator::Multiply => x * y,
            BinaryOperator::Divide => x / y,
            BinaryOperator::Modulo => x % y,
            BinaryOperator::Plus => x + y,
            _ => x - y,
        }),
        (Value::Double(x), Value::Double(y)) => Value::Double(match op {
            BinaryOperator::Multiply => x * y,
            BinaryOperator::Divide => x / y,
            BinaryOperator::Modulo => x % y,
            BinaryOperator::Plus => x + y,
            _ => x - y,
        }),
        (a, b) => {
            return Err(Thrown::illegal_argument(format!(
                "cannot apply '{}' to {a:?} and {b:?}",
                op.symbol()
            )))
        }
    })
}

fn shift(op: BinaryOperator, promoted: PrimitiveType, value: &Value, distance: &Value) -> Result<Value, Thrown> {
    let value = unboxed(value, promoted)?;
    let distance = unboxed(distance, PrimitiveType::Long)?.as_i64().unwrap_or(0);
    Ok(match value {
        Value::Long(x) => {
            let d = (distance & 0x3f) as u32;
            Value::Long(match op {
                BinaryOperator::ShiftLeft => x.wrapping_shl(d),
                BinaryOperator::ShiftRight => x.wrapping_shr(d),
                _ => ((x as u64) >> d) as i64,
            })
        }
        other => {
            let x = other.as_i64().unwrap_or(0) as i32;
            let d = (distance & 0x1f) as u32;
            Value::Int(match op {
                BinaryOperator::ShiftLeft => x.wrapping_shl(d),
                BinaryOperator::ShiftRight => x.wrapping_shr(d),
                _ => ((x as u32) >> d) as i32,
            })
        }
    })
}

fn compare(op: BinaryOperator, promoted: PrimitiveType, a: &Value, b: &Value) -> Result<bool, Thrown> {
    let a = unboxed(a, promoted)?;
    let b = unboxed(b, promoted)?;
    let ordering = if promoted.is_integral() {
        a.as_i64().partial_cmp(&b.as_i64())
    } else {
        a.as_f64().unwrap_or(f64::NAN).partial_cmp(&b.as_f64().unwrap_or(f64::NAN))
    };
    let Some(ordering) = ordering else {
        // NaN compares false with everything.
        return Ok(false);
    };
    Ok(match op {
        BinaryOperator::Less => ordering.is_lt(),
        BinaryOperator::LessOrEqual => ordering.is_le(),
        BinaryOperator::Greater => ordering.is_gt(),
        _ => ordering.is_ge(),
    })
}

type EqualityFn = Box<dyn Fn(&Value, &Value) -> Result<bool, Thrown>>;

/// How `==` compares operands of these types: numerically, as booleans, or by reference.
fn equality(store: &TypeStore, lhs: &Type, rhs: &Type, op: BinaryOperator) -> Result<EqualityFn, OperatorError> {
    let either_primitive = lhs.is_primitive() || rhs.is_primitive();
    if either_primitive {
        if let Some(promoted) = binary_numeric_promotion(store, lhs, rhs) {
            return Ok(Box::new(move |a, b| {
                let a = unboxed(a, promoted)?;
                let b = unboxed(b, promoted)?;
                Ok(if promoted.is_integral() {
                    a.as_i64() == b.as_i64()
                } else {
                    a.as_f64() == b.as_f64()
                })
            }));
        }
        let boolean = Some(PrimitiveType::Boolean);
        if primitive_of(store, lhs) == boolean && primitive_of(store, rhs) == boolean {
            return Ok(Box::new(|a, b| {
                Ok(unboxed(a, PrimitiveType::Boolean)? == unboxed(b, PrimitiveType::Boolean)?)
            }));
        }
        return Err(not_applicable(store, op.symbol(), &[lhs, rhs]));
    }
    if !is_castable(store, lhs, rhs) {
        return Err(not_applicable(store, op.symbol(), &[lhs, rhs]));
    }
    Ok(Box::new(|a, b| Ok(a.same_identity(b))))
}

/// `(target) operand`.
pub(crate) fn cast(tb: &Toolbox<'_>, target: &Type, operand: &ObjectInfo) -> OperatorResult {
    let store = tb.store;
    let from = tb.lookup_type(operand);
    if !is_castable(store, &from, target) {
        return Err(OperatorError::Semantic(format!(
            "Cannot cast {} to {}",
            format_type(store, &from),
            format_type(store, target)
        )));
    }
    with_value(tb, target.clone(), &[operand], || {
        let value = &operand.value;
        match target {
            Type::Primitive(p) => unboxed(value, *p),
            _ if value.is_null() => Ok(Value::Null),
            _ => {
                if let (Some(unboxed_target), Some(_)) = (store.unboxed_type(target), value.primitive_type()) {
                    return unboxed(value, unboxed_target);
                }
                let runtime = value.runtime_type(store).unwrap_or(Type::Unknown);
                if is_subtype(store, &runtime, &target.erasure()) {
                    Ok(value.clone())
                } else {
                    Err(Thrown::class_cast(format!(
                        "class {} cannot be cast to class {}",
                        format_type(store, &runtime),
                        format_type(store, target)
                    )))
                }
            }
        }
    })
}

/// `operand instanceof target`.
pub(crate) fn instance_of(tb: &Toolbox<'_>, operand: &ObjectInfo, target: &Type) -> OperatorResult {
    let store = tb.store;
    let from = tb.lookup_type(operand);
    if from.is_primitive() || target.is_primitive() || !is_castable(store, &from, target) {
        return Err(OperatorError::Semantic(format!(
            "Incompatible types: {} cannot be converted to {}",
            format_type(store, &from),
            format_type(store, target)
        )));
    }
    with_value(tb, Type::boolean(), &[operand], || {
        let is_instance = operand
            .value
            .runtime_type(store)
            .is_some_and(|runtime| is_subtype(store, &runtime, &target.erasure()));
        Ok(Value::Boolean(is_instance))
    })
}

/// The value stored when assigning `value` to a location of type `target`.
pub(crate) fn assignment_value(tb: &Toolbox<'_>, target: &Type, value: &ObjectInfo) -> Result<Value, OperatorError> {
    let store = tb.store;
    let from = tb.lookup_type(value);
    if !rate_type_match(store, &from, target).is_match() {
        return Err(OperatorError::Semantic(format!(
            "Cannot assign {} to {}",
            format_type(store, &from),
            format_type(store, target)
        )));
    }
    if value.value.is_indeterminate() {
        return Ok(Value::Indeterminate);
    }
    Ok(convert_for_assignment(&value.value, target)?)
}

/// `lhs op= rhs`: the operation followed by an implicit cast back to the type of `lhs`.
pub(crate) fn compound_value(
    tb: &Toolbox<'_>,
    op: BinaryOperator,
    lhs: &ObjectInfo,
    rhs: &ObjectInfo,
) -> Result<Value, OperatorError> {
    let target = lhs.static_type(tb.store);
    let combined = apply_binary(tb, op, lhs, rhs)?;
    if combined.value.is_indeterminate() {
        return Ok(Value::Indeterminate);
    }
    match primitive_of(tb.store, &target) {
        Some(p) => Ok(unboxed(&combined.value, p)?),
        None => Ok(combined.value),
    }
}

// Arithmetic built-ins
//
// Integer operands stay integral; any float operand makes the result a float.
use super::expect_args;
use crate::error::BoxError;
use crate::pipeline::{FnResult, Kwargs};
use serde_json::{Number, Value};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn from_value(function: &str, value: &Value) -> Result<Self, BoxError> {
        let n = value
            .as_number()
            .ok_or_else(|| format!("{function}: expected a number, got {value}"))?;
        match n.as_i64() {
            Some(i) => Ok(Num::Int(i)),
            None => n
                .as_f64()
                .map(Num::Float)
                .ok_or_else(|| format!("{function}: unsupported number {n}").into()),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }

    fn into_value(self, function: &str) -> FnResult {
        match self {
            Num::Int(i) => Ok(Value::from(i)),
            Num::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| format!("{function}: result {f} is not a finite number").into()),
        }
    }
}

fn combine(
    function: &str,
    a: Num,
    b: Num,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Num, BoxError> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => int_op(x, y)
            .map(Num::Int)
            .ok_or_else(|| format!("{function}: integer overflow").into()),
        _ => Ok(Num::Float(float_op(a.as_f64(), b.as_f64()))),
    }
}

fn numbers(function: &str, args: &[Value]) -> Result<Vec<Num>, BoxError> {
    args.iter().map(|arg| Num::from_value(function, arg)).collect()
}

fn fold(
    function: &str,
    args: &[Value],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> FnResult {
    let mut values = numbers(function, args)?.into_iter();
    let first = values
        .next()
        .ok_or_else(|| format!("{function} needs at least one argument"))?;
    values
        .try_fold(first, |acc, n| combine(function, acc, n, int_op, float_op))?
        .into_value(function)
}

/// Sum of all arguments
pub fn add(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    fold("add", &args, i64::checked_add, |x, y| x + y)
}

/// Product of all arguments
pub fn mul(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    fold("mul", &args, i64::checked_mul, |x, y| x * y)
}

pub fn sub(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("sub", &args, 2)?;
    fold("sub", &args, i64::checked_sub, |x, y| x - y)
}

/// True division, always a float
pub fn div(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("div", &args, 2)?;
    let values = numbers("div", &args)?;
    let divisor = values[1].as_f64();
    if divisor == 0.0 {
        return Err("div: division by zero".into());
    }
    Num::Float(values[0].as_f64() / divisor).into_value("div")
}

pub fn double(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("double", &args, 1)?;
    let x = Num::from_value("double", &args[0])?;
    combine("double", x, Num::Int(2), i64::checked_mul, |x, y| x * y)?.into_value("double")
}

pub fn neg(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("neg", &args, 1)?;
    match Num::from_value("neg", &args[0])? {
        Num::Int(i) => i
            .checked_neg()
            .map(Value::from)
            .ok_or_else(|| "neg: integer overflow".into()),
        Num::Float(f) => Num::Float(-f).into_value("neg"),
    }
}

/// Floor quotient and remainder as a two-element array
pub fn divmod(args: Vec<Value>, _kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("divmod", &args, 2)?;
    let values = numbers("divmod", &args)?;
    match (values[0], values[1]) {
        (_, Num::Int(0)) => Err("divmod: division by zero".into()),
        (Num::Int(a), Num::Int(b)) => {
            let mut q = a.checked_div(b).ok_or("divmod: integer overflow")?;
            let mut r = a % b;
            if r != 0 && ((r < 0) != (b < 0)) {
                q -= 1;
                r += b;
            }
            Ok(Value::Array(vec![Value::from(q), Value::from(r)]))
        }
        (a, b) => {
            let (a, b) = (a.as_f64(), b.as_f64());
            if b == 0.0 {
                return Err("divmod: division by zero".into());
            }
            let q = (a / b).floor();
            Ok(Value::Array(vec![
                Num::Float(q).into_value("divmod")?,
                Num::Float(a - q * b).into_value("divmod")?,
            ]))
        }
    }
}

/// Multiply by the `factor` keyword argument (default 1)
pub fn scale(args: Vec<Value>, kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("scale", &args, 1)?;
    let x = Num::from_value("scale", &args[0])?;
    let factor = match kwargs.and_then(|kw| kw.get("factor")) {
        Some(value) => Num::from_value("scale", value)?,
        None => Num::Int(1),
    };
    combine("scale", x, factor, i64::checked_mul, |x, y| x * y)?.into_value("scale")
}

/// Round to the `digits` keyword argument; without it the result is an integer
pub fn round(args: Vec<Value>, kwargs: Option<&Kwargs>) -> FnResult {
    expect_args("round", &args, 1)?;
    let digits = match kwargs.and_then(|kw| kw.get("digits")) {
        Some(value) => Some(
            value
                .as_i64()
                .ok_or_else(|| format!("round: 'digits' must be an integer, got {value}"))?,
        ),
        None => None,
    };

    let f = match Num::from_value("round", &args[0])? {
        Num::Int(i) => return round_int(i, digits),
        Num::Float(f) => f,
    };

    match digits {
        Some(digits) => {
            let exponent = digits.clamp(i32::MIN.into(), i32::MAX.into()) as i32;
            let scale = 10f64.powi(exponent);
            if scale == 0.0 {
                return Num::Float(0f64.copysign(f)).into_value("round");
            }
            if !scale.is_finite() {
                return Ok(Value::from(f));
            }
            let rounded = (f * scale).round() / scale;
            if !rounded.is_finite() {
                return Ok(Value::from(f));
            }
            Num::Float(rounded).into_value("round")
        }
        None => {
            let rounded = f.round();
            if !rounded.is_finite() || rounded.abs() >= i64::MAX as f64 {
                return Err(format!("round: {f} does not fit an integer").into());
            }
            Ok(Value::from(rounded as i64))
        }
    }
}

/// Integers only change under negative `digits`; halves round away from zero
fn round_int(i: i64, digits: Option<i64>) -> FnResult {
    let places = match digits {
        Some(d) if d < 0 => d.unsigned_abs(),
        _ => return Ok(Value::from(i)),
    };
    let step = match u32::try_from(places).ok().and_then(|p| 10i64.checked_pow(p)) {
        Some(step) => step,
        None => return Ok(Value::from(0)),
    };
    let r = i % step;
    let down = i - r;
    let rounded = if r.unsigned_abs() * 2 >= step.unsigned_abs() {
        if i < 0 {
            down.checked_sub(step)
        } else {
            down.checked_add(step)
        }
    } else {
        Some(down)
    };
    rounded
        .map(Value::from)
        .ok_or_else(|| "round: integer overflow".into())
}

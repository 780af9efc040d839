//! Built-in functions available to pipeline files

pub mod arith;
pub mod data;

use crate::pipeline::FunctionRegistry;

/// Register every built-in function
pub fn register_builtins(registry: &mut FunctionRegistry) {
    registry.register_fn("identity", data::identity);
    registry.register_fn("pack", data::pack);
    registry.register_fn("concat", data::concat);
    registry.register_fn("len", data::len);
    registry.register_fn("get", data::get);

    registry.register_fn("add", arith::add);
    registry.register_fn("sub", arith::sub);
    registry.register_fn("mul", arith::mul);
    registry.register_fn("div", arith::div);
    registry.register_fn("double", arith::double);
    registry.register_fn("neg", arith::neg);
    registry.register_fn("divmod", arith::divmod);
    registry.register_fn("scale", arith::scale);
    registry.register_fn("round", arith::round);
}

/// Check the number of positional arguments
pub(crate) fn expect_args(
    function: &str,
    args: &[serde_json::Value],
    count: usize,
) -> Result<(), crate::error::BoxError> {
    if args.len() != count {
        return Err(format!(
            "{function} takes {count} argument(s) but {} were given",
            args.len()
        )
        .into());
    }
    Ok(())
}

//! Inspection command handlers: check, contains, shape, instantiate

use std::path::Path;

use serde_json::json;

use super::{read_input, CommandContext};
use crate::cli::{CheckArgs, ContainsArgs, InstantiateArgs, OutputFormat, ShapeArgs};
use crate::detectors::fragment::{
    is_fragment, is_fragment_expression, is_range_contained_in_fragment_with,
};
use crate::detectors::shape::detect_shape;
use crate::error::Result;
use crate::extract::{instantiate, BindingSet, Bindings};
use crate::lang::Lang;

/// Run the check command - is the input a JSX fragment
pub fn run_check(args: &CheckArgs, ctx: &CommandContext) -> Result<String> {
    let text = read_input(&args.input)?;
    let result = if args.strict {
        is_fragment_expression(&text)
    } else {
        is_fragment(&text)
    };

    render(ctx, json!({ "isFragment": result }), result.to_string())
}

/// Run the contains command - does the range sit inside markup
pub fn run_contains(args: &ContainsArgs, ctx: &CommandContext) -> Result<String> {
    let source = read_input(&args.file)?;
    // stdin has no extension to go by
    let lang = if args.file == Path::new("-") {
        Lang::default()
    } else {
        Lang::from_path(&args.file)?
    };
    let result = is_range_contained_in_fragment_with(&source, args.start, args.end, lang);

    render(ctx, json!({ "contained": result }), result.to_string())
}

/// Run the shape command - function, class or neither
pub fn run_shape(args: &ShapeArgs, ctx: &CommandContext) -> Result<String> {
    let text = read_input(&args.input)?;
    let shape = detect_shape(&text);

    render(
        ctx,
        json!({ "shape": shape }),
        shape.map(|s| s.name()).unwrap_or("none").to_string(),
    )
}

/// Run the instantiate command - markup for a component with given bindings
pub fn run_instantiate(args: &InstantiateArgs, ctx: &CommandContext) -> Result<String> {
    let collect = |names: &[String]| names.iter().map(String::as_str).collect::<BindingSet>();
    let bindings = Bindings {
        argument_props: collect(&args.arguments),
        member_props: collect(&args.props),
        state: collect(&args.state),
        component_members: collect(&args.members),
    };
    let markup = instantiate(&args.name, &bindings);

    render(ctx, json!({ "instance": markup }), markup.clone())
}

fn render(ctx: &CommandContext, value: serde_json::Value, text: String) -> Result<String> {
    match ctx.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&value)?),
        OutputFormat::Text => Ok(text),
    }
}

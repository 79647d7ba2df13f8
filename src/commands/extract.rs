//! Extract command handler

use tracing::debug;

use super::{read_input, CommandContext};
use crate::cli::{ExtractArgs, OutputFormat};
use crate::error::Result;
use crate::extract::plan_extraction;

/// Run the extract command - build the component and its instantiation
pub fn run_extract(args: &ExtractArgs, ctx: &CommandContext) -> Result<String> {
    let selected = read_input(&args.input)?;
    let source = args.source.as_deref().unwrap_or(&args.target);

    let mut config = ctx.config.clone();
    if let Some(module_system) = args.module_system {
        config.module_system = module_system;
    }
    debug!(?config, "extracting");

    let plan = plan_extraction(&config, source, &args.target, &selected)?;

    match ctx.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => {
            let mut sections = vec![plan.component_text];
            if let Some(import) = plan.import_text {
                sections.push(import);
            }
            sections.push(plan.instance_text);
            Ok(sections.join("\n\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExtractConfig, ModuleSystem};
    use std::io::Write;
    use std::path::PathBuf;

    fn context(format: OutputFormat) -> CommandContext {
        CommandContext {
            format,
            config: ExtractConfig::default(),
        }
    }

    fn selection(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", text).unwrap();
        file
    }

    #[test]
    fn test_text_output() {
        let file = selection("<div>{foo}</div>");
        let args = ExtractArgs {
            input: file.path().to_path_buf(),
            target: PathBuf::from("/src/source.js"),
            source: None,
            module_system: None,
        };

        let output = run_extract(&args, &context(OutputFormat::Text)).unwrap();
        assert_eq!(
            output,
            "export function Source({\n  foo\n}) {\n  return <div>{foo}</div>;\n}\n\n<Source foo={foo} />"
        );
    }

    #[test]
    fn test_json_output_with_commonjs_override() {
        let file = selection("<p>{this.props.text}</p>");
        let args = ExtractArgs {
            input: file.path().to_path_buf(),
            target: PathBuf::from("/src/note.js"),
            source: Some(PathBuf::from("/src/app.js")),
            module_system: Some(ModuleSystem::Commonjs),
        };

        let output = run_extract(&args, &context(OutputFormat::Json)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["importText"], "const { Note } = require('./note');");
        assert_eq!(json["instanceText"], "<Note text={this.props.text} />");
        assert_eq!(
            json["selection"]["metadata"]["componentProperties"]["memberProps"][0],
            "text"
        );
        assert_eq!(json["selection"]["metadata"]["isFragment"], true);
    }
}

//! Extraction planning
//!
//! Produces every piece of text an editor needs to carry out an extraction:
//! the exported component for the target file, the import for the active file
//! when the two differ, and the markup replacing the selection.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use super::{instantiate, wrap_with_component, ProcessedSelection};
use crate::config::{ExtractConfig, ModuleSystem};
use crate::detectors::fragment::is_fragment;
use crate::error::{ExtractError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionPlan {
    /// File that receives the component
    pub target_path: PathBuf,
    /// Component definition, exported for the configured module system
    pub component_text: String,
    /// Import to prepend to the active file, if the target is another file
    pub import_text: Option<String>,
    /// Markup replacing the selection
    pub instance_text: String,
    /// Whether the editor should switch to the target afterwards
    pub open_target: bool,
    pub selection: ProcessedSelection,
}

/// Plan the extraction of `selected_text` from `source_path` into
/// `target_path`.
///
/// Selections that are not a JSX fragment are refused with
/// [`ExtractError::NotAFragment`].
pub fn plan_extraction(
    config: &ExtractConfig,
    source_path: &Path,
    target_path: &Path,
    selected_text: &str,
) -> Result<ExtractionPlan> {
    if !is_fragment(selected_text) {
        warn!(source = %source_path.display(), "selection is not a JSX fragment");
        return Err(ExtractError::NotAFragment);
    }

    let selection = wrap_with_component(target_path, selected_text)?;
    let name = selection.metadata.name.clone();

    let import_text = (source_path != target_path).then(|| {
        let specifier = module_specifier(source_path, target_path, config);
        import_statement(&name, &specifier, config.module_system)
    });

    info!(
        component = %name,
        target = %target_path.display(),
        "planned extraction"
    );

    Ok(ExtractionPlan {
        target_path: target_path.to_path_buf(),
        component_text: export_definition(&selection.text, &name, config.module_system),
        import_text,
        instance_text: instantiate(&name, &selection.metadata.component_properties),
        open_target: config.switch_to_target_on_extract,
        selection,
    })
}

/// Make `definition` visible to other modules
pub fn export_definition(definition: &str, name: &str, module_system: ModuleSystem) -> String {
    match module_system {
        ModuleSystem::Esm => format!("export {}", definition),
        ModuleSystem::Commonjs => format!("{}\nmodule.exports.{} = {};", definition, name, name),
    }
}

/// Statement importing `name` from `specifier`
pub fn import_statement(name: &str, specifier: &str, module_system: ModuleSystem) -> String {
    match module_system {
        ModuleSystem::Esm => format!("import {{ {} }} from '{}';", name, specifier),
        ModuleSystem::Commonjs => format!("const {{ {} }} = require('{}');", name, specifier),
    }
}

/// Relative specifier for `to_file` as seen from `from_file`.
///
/// The extension is dropped when it is one of the configured extensions.
pub fn module_specifier(from_file: &Path, to_file: &Path, config: &ExtractConfig) -> String {
    let from_dir: Vec<Component> = from_file
        .parent()
        .map(|dir| dir.components().collect())
        .unwrap_or_default();
    let to: Vec<Component> = to_file.components().collect();

    let common = from_dir
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from_dir.len() - common];
    if let Some((_, dirs)) = to[common..].split_last() {
        parts.extend(dirs.iter().map(|c| c.as_os_str().to_string_lossy().into_owned()));
    }

    let file_name = match to_file.extension().and_then(|e| e.to_str()) {
        Some(ext) if config.is_known_extension(ext) => to_file.file_stem(),
        _ => to_file.file_name(),
    };
    parts.push(
        file_name
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );

    let specifier = parts.join("/");
    if specifier.starts_with("../") {
        specifier
    } else {
        format!("./{}", specifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_definition() {
        assert_eq!(
            export_definition("function A({}) {}", "A", ModuleSystem::Esm),
            "export function A({}) {}"
        );
        assert_eq!(
            export_definition("function A({}) {}", "A", ModuleSystem::Commonjs),
            "function A({}) {}\nmodule.exports.A = A;"
        );
    }

    #[test]
    fn test_import_statement() {
        assert_eq!(
            import_statement("Card", "./card", ModuleSystem::Esm),
            "import { Card } from './card';"
        );
        assert_eq!(
            import_statement("Card", "./card", ModuleSystem::Commonjs),
            "const { Card } = require('./card');"
        );
    }

    #[test]
    fn test_module_specifier() {
        let config = ExtractConfig::default();
        assert_eq!(
            module_specifier(Path::new("/src/app.js"), Path::new("/src/card.js"), &config),
            "./card"
        );
        assert_eq!(
            module_specifier(Path::new("/folder/source.js"), Path::new("/target.js"), &config),
            "../target"
        );
        assert_eq!(
            module_specifier(
                Path::new("/src/app.js"),
                Path::new("/src/components/user-card.jsx"),
                &config
            ),
            "./components/user-card"
        );
        assert_eq!(
            module_specifier(Path::new("/src/app.js"), Path::new("/src/card.vue"), &config),
            "./card.vue"
        );
    }

    #[test]
    fn test_plan_into_other_file() {
        let plan = plan_extraction(
            &ExtractConfig::default(),
            Path::new("/src/app.js"),
            Path::new("/src/greeting.js"),
            "<h1>Hello {name}</h1>",
        )
        .unwrap();

        assert_eq!(
            plan.component_text,
            "export function Greeting({\n  name\n}) {\n  return <h1>Hello {name}</h1>;\n}"
        );
        assert_eq!(
            plan.import_text.as_deref(),
            Some("import { Greeting } from './greeting';")
        );
        assert_eq!(plan.instance_text, "<Greeting name={name} />");
        assert!(plan.open_target);
    }

    #[test]
    fn test_plan_into_same_file_has_no_import() {
        let path = Path::new("/src/source.js");
        let plan =
            plan_extraction(&ExtractConfig::default(), path, path, "<div>{this.state.foo}</div>")
                .unwrap();
        assert!(plan.import_text.is_none());
        assert_eq!(plan.instance_text, "<Source foo={this.state.foo} />");
    }

    #[test]
    fn test_plan_refuses_non_fragments() {
        let path = Path::new("/src/source.js");
        let result = plan_extraction(&ExtractConfig::default(), path, path, "'text'");
        assert!(matches!(result, Err(ExtractError::NotAFragment)));
    }
}

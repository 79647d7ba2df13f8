//! jsx-extract: turn a selected JSX fragment into a React component
//!
//! The selection is parsed with tree-sitter, every free reference inside it is
//! classified (local argument, `this.props` member, `this.state` member or
//! component member), and a function or class component is generated together
//! with the markup that instantiates it at the selection site.
//!
//! # Example
//!
//! ```
//! use jsx_extract::extract::{instantiate, wrap_with_component};
//! use std::path::Path;
//!
//! let selection = wrap_with_component(Path::new("src/user-card.js"), "<b>{user}</b>")?;
//! assert_eq!(selection.metadata.name, "UserCard");
//! assert_eq!(
//!     instantiate(&selection.metadata.name, &selection.metadata.component_properties),
//!     "<UserCard user={user} />"
//! );
//! # Ok::<(), jsx_extract::ExtractError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod detectors;
pub mod error;
pub mod extract;
pub mod lang;
pub mod syntax;
pub mod utils;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use config::{ExtractConfig, ModuleSystem};
pub use detectors::fragment::{is_fragment, is_range_contained_in_fragment};
pub use detectors::shape::{is_class_component, is_function_component, ComponentShape};
pub use error::{ExtractError, Result};
pub use extract::{
    instantiate, plan_extraction, wrap_with_component, Bindings, ExtractionPlan,
    ProcessedSelection, SelectionMetadata,
};
pub use lang::Lang;
pub use syntax::{Position, SyntaxTree};

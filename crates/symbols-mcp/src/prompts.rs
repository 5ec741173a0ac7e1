//! MCP Prompt templates
//!
//! Four fixed templates for common Symbols/DOMQL v3 tasks. Each is a pure
//! string interpolation over caller-supplied named arguments; a missing
//! required argument is an error naming the parameter, and optional
//! arguments carry defaults. Prompt names are converted into [`PromptKind`]
//! at the transport edge.

use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// Closed set of prompt templates the server can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Generate a single component from a description
    ComponentGenerator,
    /// Convert code from another framework
    MigrationAssistant,
    /// Scaffold a complete project
    ProjectScaffold,
    /// Review code for v3 compliance
    CodeReview,
}

impl PromptKind {
    /// All prompts, in listing order
    pub const ALL: [PromptKind; 4] = [
        PromptKind::ComponentGenerator,
        PromptKind::MigrationAssistant,
        PromptKind::ProjectScaffold,
        PromptKind::CodeReview,
    ];

    /// Parse a wire-level prompt name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "symbols_component_prompt" => Some(Self::ComponentGenerator),
            "symbols_migration_prompt" => Some(Self::MigrationAssistant),
            "symbols_project_prompt" => Some(Self::ProjectScaffold),
            "symbols_review_prompt" => Some(Self::CodeReview),
            _ => None,
        }
    }

    /// Wire-level prompt name
    pub fn name(self) -> &'static str {
        match self {
            Self::ComponentGenerator => "symbols_component_prompt",
            Self::MigrationAssistant => "symbols_migration_prompt",
            Self::ProjectScaffold => "symbols_project_prompt",
            Self::CodeReview => "symbols_review_prompt",
        }
    }

    /// One-line description shown in prompt listings
    pub fn description(self) -> &'static str {
        match self {
            Self::ComponentGenerator => {
                "Prompt template for generating a Symbols/DOMQL v3 component."
            }
            Self::MigrationAssistant => "Prompt template for migrating code to Symbols/DOMQL v3.",
            Self::ProjectScaffold => {
                "Prompt template for scaffolding a complete Symbols project."
            }
            Self::CodeReview => "Prompt template for reviewing Symbols/DOMQL code.",
        }
    }

    /// Declared arguments for this prompt
    pub fn arguments(self) -> Vec<PromptArgument> {
        match self {
            Self::ComponentGenerator => vec![
                PromptArgument::required("description", "What the component should do"),
                PromptArgument::optional(
                    "component_name",
                    "PascalCase component name (default MyComponent)",
                ),
            ],
            Self::MigrationAssistant => vec![PromptArgument::optional(
                "source_framework",
                "Framework the code migrates from (default React)",
            )],
            Self::ProjectScaffold => vec![PromptArgument::required(
                "description",
                "What the project should do",
            )],
            Self::CodeReview => vec![],
        }
    }

    /// Render the template against the supplied arguments
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgument`] when a required argument is absent
    /// or not a string.
    pub fn render(self, arguments: &Value) -> Result<String> {
        match self {
            Self::ComponentGenerator => {
                let description = self.require(arguments, "description")?;
                let component_name = string_arg(arguments, "component_name")
                    .unwrap_or("MyComponent");
                Ok(component_template(description, component_name))
            }
            Self::MigrationAssistant => {
                let source_framework =
                    string_arg(arguments, "source_framework").unwrap_or("React");
                Ok(migration_template(source_framework))
            }
            Self::ProjectScaffold => {
                let description = self.require(arguments, "description")?;
                Ok(project_template(description))
            }
            Self::CodeReview => Ok(REVIEW_TEMPLATE.to_string()),
        }
    }

    fn require<'a>(self, arguments: &'a Value, name: &str) -> Result<&'a str> {
        string_arg(arguments, name).ok_or_else(|| Error::MissingArgument {
            prompt: self.name().to_string(),
            argument: name.to_string(),
        })
    }
}

/// Look up a string argument by name
fn string_arg<'a>(arguments: &'a Value, name: &str) -> Option<&'a str> {
    arguments.get(name).and_then(Value::as_str)
}

/// Declared prompt parameter for MCP listings
#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl PromptArgument {
    fn required(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
        }
    }

    fn optional(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
        }
    }
}

/// Prompt definition for MCP protocol
#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

/// Get all available prompt definitions
pub fn get_prompt_definitions() -> Vec<PromptDefinition> {
    PromptKind::ALL
        .iter()
        .map(|kind| PromptDefinition {
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            arguments: kind.arguments(),
        })
        .collect()
}

fn component_template(description: &str, component_name: &str) -> String {
    format!(
        "Generate a Symbols/DOMQL v3 component with these requirements:

Component Name: {component_name}
Description: {description}

Follow these strict rules:
- Use DOMQL v3 syntax ONLY (extends, childExtends, flattened props, onX events)
- Components are plain objects with named exports: export const {component_name} = {{ ... }}
- Use design-system tokens for spacing (A, B, C), colors, typography
- NO imports between files - reference components by PascalCase key name
- All folders flat - no subfolders
- Include responsive breakpoints (@mobile, @tablet) where appropriate
- Follow modern UI/UX: visual hierarchy, minimal cognitive load, confident typography

Output ONLY the JavaScript code."
    )
}

fn migration_template(source_framework: &str) -> String {
    format!(
        "You are migrating {source_framework} code to Symbols/DOMQL v3.

Key conversion rules for {source_framework}:
- Components become plain objects (never functions)
- NO imports between project files
- All folders are flat - no subfolders
- Use extends/childExtends (v3 plural, never v2 singular)
- Flatten all props directly (no props: {{}} wrapper)
- Events use onX prefix (no on: {{}} wrapper)
- Use design-system tokens for spacing/colors
- State: state: {{ key: val }} + s.update({{ key: newVal }})
- Effects: onRender for mount, onStateUpdate for dependency changes
- Lists: children: (el, s) => s.items, childrenAs: 'state', childExtends: 'Item'

Provide the {source_framework} code to convert and I will output clean DOMQL v3."
    )
}

fn project_template(description: &str) -> String {
    format!(
        "Create a complete Symbols/DOMQL v3 project:

Project Description: {description}

Required structure (smbls/ folder):
- index.js (root export)
- config.js (platform config)
- vars.js (global constants)
- dependencies.js (external packages)
- components/ (PascalCase files, named exports)
- pages/ (dash-case files, camelCase exports, route mapping in index.js)
- functions/ (camelCase, called via el.call())
- designSystem/ (color, spacing, typography, theme, icons)
- state/ (default exports)

Rules:
- v3 syntax only - extends, childExtends, flattened props, onX events
- Design tokens for all spacing/colors (padding: 'A', not padding: '16px')
- Components are plain objects, never functions
- No imports between project files
- All folders completely flat

Generate all files with complete, production-ready code."
    )
}

const REVIEW_TEMPLATE: &str = "Review this Symbols/DOMQL code for v3 compliance and best practices.

Check for these violations:
1. v2 syntax: extend->extends, childExtend->childExtends, props:{}, on:{}
2. Imports between project files (FORBIDDEN)
3. Function-based components (must be plain objects)
4. Subfolders (must be flat)
5. Hardcoded pixels instead of design tokens
6. Wrong event handler signatures
7. Default exports for components (should be named)

Provide:
- Issues found with line references
- Corrected code for each issue
- Overall v3 compliance score (1-10)
- Improvement suggestions

Paste your code below:";

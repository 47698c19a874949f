//! Description-file template for newly created registry entries.

use anyhow::Result;

use super::frontmatter;
use super::types::{Frontmatter, Language, RegistryFile};

/// Options for a generated description file.
#[derive(Debug, Clone)]
pub struct ComponentTemplate {
    pub name: String,
    pub title: String,
    pub description: String,
    /// Full type tag; a bare kind gets the `registry:` prefix added.
    pub kind: String,
    pub language: Language,
    pub files: Vec<RegistryFile>,
    pub categories: Vec<String>,
}

impl ComponentTemplate {
    fn full_kind(&self) -> String {
        if self.kind.starts_with("registry:") {
            self.kind.clone()
        } else {
            format!("registry:{}", self.kind)
        }
    }
}

/// Generate a complete description file (front block + markdown body) for
/// a new registry entry.
pub fn generate_component_mdx(options: &ComponentTemplate) -> Result<String> {
    let kind = options.full_kind();
    let categories = if options.categories.is_empty() {
        vec![kind.trim_start_matches("registry:").to_string()]
    } else {
        options.categories.clone()
    };

    let fm = Frontmatter {
        name: Some(options.name.clone()),
        kind: kind.clone(),
        title: options.title.clone(),
        description: options.description.clone(),
        language: Some(options.language),
        files: options.files.clone(),
        categories,
        ..Default::default()
    };

    let mapping = match serde_yaml::to_value(&fm)? {
        serde_yaml::Value::Mapping(mapping) => mapping,
        _ => unreachable!("frontmatter serializes to a mapping"),
    };

    let body = template_body(&options.name, &options.title, &options.description, &kind, options.language);
    frontmatter::stringify_document(&mapping, &body)
}

fn template_body(
    name: &str,
    title: &str,
    description: &str,
    kind: &str,
    language: Language,
) -> String {
    let suffix = kind.trim_start_matches("registry:");

    if suffix == "ui" || suffix == "component" {
        format!(
            r#"
# {title}

{description}

## Usage

```{language}
import {{ {name} }} from "@/components/{suffix}/{name}";

export default function Example() {{
  return <{name} />;
}}
```

## Props

| Name | Type | Default | Description |
| ---- | ---- | ------- | ----------- |
| | | | |

## Examples

### Basic

```{language}
<{name} />
```
"#
        )
    } else if suffix == "hook" {
        format!(
            r#"
# {title}

{description}

## Usage

```{language}
import {{ {name} }} from "@/hooks/{name}";

export default function Example() {{
  const result = {name}();
  return <div>{{JSON.stringify(result)}}</div>;
}}
```

## Parameters

| Name | Type | Default | Description |
| ---- | ---- | ------- | ----------- |
| | | | |

## Examples

### Basic

```{language}
const result = {name}();
```
"#
        )
    } else {
        format!(
            r#"
# {title}

{description}

## Usage

```{language}
import {{ {name} }} from "@/{suffix}s/{name}";
```

## Examples

### Basic

```{language}
// Example usage
```
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::frontmatter::parse_document;

    fn template(kind: &str) -> ComponentTemplate {
        ComponentTemplate {
            name: "badge".to_string(),
            title: "Badge".to_string(),
            description: "A small badge.".to_string(),
            kind: kind.to_string(),
            language: Language::React,
            files: vec![RegistryFile {
                path: "src/registry/ui/badge.tsx".to_string(),
                kind: "registry:ui".to_string(),
                target: None,
            }],
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_generated_mdx_parses_back() {
        let text = generate_component_mdx(&template("ui")).unwrap();
        let doc = parse_document(&text).unwrap();
        let fm = crate::registry::frontmatter::typed_frontmatter(&doc.frontmatter).unwrap();
        assert_eq!(fm.kind, "registry:ui");
        assert_eq!(fm.title, "Badge");
        assert_eq!(fm.files.len(), 1);
        // Categories default to the component type
        assert_eq!(fm.categories, vec!["ui"]);
    }

    #[test]
    fn test_bare_kind_gets_prefixed() {
        let text = generate_component_mdx(&template("hook")).unwrap();
        assert!(text.contains("type: registry:hook"));
        assert!(text.contains("## Parameters"));
    }

    #[test]
    fn test_ui_body_has_usage_and_props() {
        let text = generate_component_mdx(&template("registry:ui")).unwrap();
        assert!(text.contains("## Usage"));
        assert!(text.contains("## Props"));
        assert!(text.contains("<badge />"));
    }

    #[test]
    fn test_generic_body_for_lib() {
        let text = generate_component_mdx(&template("lib")).unwrap();
        assert!(text.contains("@/libs/badge"));
        assert!(!text.contains("## Props"));
    }
}

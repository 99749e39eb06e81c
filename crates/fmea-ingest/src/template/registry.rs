//! Template registry.

use std::path::Path;

use fmea_model::{DocumentKind, TemplateSpec};
use serde::Deserialize;

use super::embedded::BUILTIN_TEMPLATES;
use crate::error::{IngestError, Result};

/// A template file holds one definition or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateFile {
    One(Box<TemplateSpec>),
    Many(Vec<TemplateSpec>),
}

/// Ordered set of validated templates, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    templates: Vec<TemplateSpec>,
}

impl TemplateRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the embedded templates.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::empty();
        for content in BUILTIN_TEMPLATES {
            registry.extend(Self::from_json_str(content)?)?;
        }
        Ok(registry)
    }

    /// Parses a JSON object or array of template definitions.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: TemplateFile =
            serde_json::from_str(content).map_err(|e| IngestError::TemplateParse {
                message: e.to_string(),
            })?;
        let templates = match file {
            TemplateFile::One(template) => vec![*template],
            TemplateFile::Many(templates) => templates,
        };
        let mut registry = Self::empty();
        for template in templates {
            registry.register(template)?;
        }
        Ok(registry)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let registry = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            templates = registry.len(),
            "loaded template definitions"
        );
        Ok(registry)
    }

    /// Adds a template, replacing one with the same id in place.
    pub fn register(&mut self, template: TemplateSpec) -> Result<()> {
        template.validate()?;
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => {
                tracing::debug!(template = %template.id, "replacing template definition");
                *existing = template;
            }
            None => self.templates.push(template),
        }
        Ok(())
    }

    /// Registers every template of `other`, overriding same-id entries.
    pub fn extend(&mut self, other: TemplateRegistry) -> Result<()> {
        for template in other.templates {
            self.register(template)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&TemplateSpec> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&TemplateSpec> {
        self.get(id).ok_or_else(|| IngestError::UnknownTemplate {
            id: id.to_string(),
        })
    }

    /// The layout used when nothing is detected: the first FMEA template.
    pub fn default_fmea(&self) -> Option<&TemplateSpec> {
        self.templates
            .iter()
            .find(|template| template.document == DocumentKind::Fmea)
    }

    pub fn templates(&self) -> &[TemplateSpec] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmea_model::fields;

    #[test]
    fn builtins_load_and_validate() {
        let registry = TemplateRegistry::builtin().unwrap();
        let ids: Vec<&str> = registry.templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            ["pfmea-aiag-vda-r1", "pfmea-aiag-vda-r2", "control-plan-rev04"]
        );
        assert_eq!(
            registry.default_fmea().map(|t| t.id.as_str()),
            Some("pfmea-aiag-vda-r1")
        );
    }

    #[test]
    fn fmea_builtins_carry_full_field_set() {
        let registry = TemplateRegistry::builtin().unwrap();
        for id in ["pfmea-aiag-vda-r1", "pfmea-aiag-vda-r2"] {
            let template = registry.require(id).unwrap();
            let names: Vec<&str> = template.field_names().collect();
            assert_eq!(names, fields::FMEA_FIELDS, "{id}");
        }
        let control_plan = registry.require("control-plan-rev04").unwrap();
        let names: Vec<&str> = control_plan.field_names().collect();
        assert_eq!(names, fields::CONTROL_PLAN_FIELDS);
    }

    #[test]
    fn positional_template_spans_columns_b_to_ag() {
        let registry = TemplateRegistry::builtin().unwrap();
        let template = registry.require("pfmea-aiag-vda-r1").unwrap();
        let first = &template.fields[0].source;
        let last = &template.fields[template.fields.len() - 1].source;
        assert_eq!(first, &fmea_model::ColumnSource::Index(1));
        assert_eq!(last, &fmea_model::ColumnSource::Index(32));
    }

    #[test]
    fn user_template_overrides_builtin() {
        let mut registry = TemplateRegistry::builtin().unwrap();
        let user = TemplateRegistry::from_json_str(
            r#"{
                "id": "control-plan-rev04",
                "document": "control_plan",
                "sheet": "CP",
                "header_rows": [0],
                "fields": [{"name": "product_characteristic", "source": {"index": 0}}],
                "anchor": "product_characteristic"
            }"#,
        )
        .unwrap();
        registry.extend(user).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.require("control-plan-rev04").unwrap().sheet, "CP");
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let err = TemplateRegistry::from_json_str("[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, IngestError::TemplateParse { .. }));

        let err = TemplateRegistry::from_json_str(
            r#"{"id": "x", "document": "fmea", "sheet": "00", "header_rows": [0],
                "fields": [{"name": "a", "source": {"index": 0}}], "anchor": "b"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::InvalidTemplate(_)));
    }

    #[test]
    fn unknown_template() {
        let registry = TemplateRegistry::builtin().unwrap();
        assert!(matches!(
            registry.require("nope"),
            Err(IngestError::UnknownTemplate { .. })
        ));
    }
}

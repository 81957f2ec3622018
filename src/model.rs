//! @ai:module:intent Named complex schemas built from @model and @property tags
//! @ai:module:layer domain
//! @ai:module:public_api Model
//! @ai:module:depends_on property, declaration, error
//! @ai:module:stateless true

use crate::config::SchemaConfig;
use crate::declaration::{Declaration, DeclarationKind, Tag, TagKind};
use crate::error::{Error, Result};
use crate::property::Property;
use indexmap::IndexSet;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// @ai:intent A schema definition: an identifier plus ordered properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    id: Option<String>,
    declaration: Option<String>,
    properties: Vec<Property>,
}

impl Model {
    /// @ai:intent Build a model from the first class declaration in a set
    /// @ai:post None when the set holds no class declaration
    pub fn from_declarations(declarations: &[Declaration], config: &SchemaConfig) -> Option<Self> {
        let class = declarations
            .iter()
            .find(|d| d.kind == DeclarationKind::Class);

        if class.is_none() {
            tracing::warn!(
                "No class declaration among {} declarations; no model built",
                declarations.len()
            );
        }

        class.map(|d| Self::from_declaration(d, config))
    }

    pub fn from_declaration(declaration: &Declaration, config: &SchemaConfig) -> Self {
        let mut model = Self::from_tags(&declaration.tags, config);
        model.declaration = Some(declaration.identity());
        tracing::debug!(
            "Parsed model {:?} from {} with {} properties",
            model.id,
            declaration.path,
            model.properties.len()
        );
        model
    }

    /// @ai:intent Populate a model from a tag sequence
    /// @ai:post id comes from the first @model tag; later ones are ignored
    /// @ai:effects pure
    pub fn from_tags(tags: &[Tag], config: &SchemaConfig) -> Self {
        let mut model = Self::default();

        for tag in tags {
            match tag.kind() {
                TagKind::Model => {
                    if model.id.is_none() {
                        model.id = Some(tag.text.trim().to_string());
                    }
                }
                TagKind::Property => model.properties.push(Property::from_tag(tag, config)),
                other => tracing::debug!("Ignoring {:?} tag on model", other),
            }
        }

        model
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// @ai:intent Check the model carries an identifier
    pub fn is_valid(&self) -> bool {
        self.id.is_some()
    }

    /// @ai:intent Distinct models referenced directly by this model's properties, in order
    pub fn properties_model_names(&self) -> Vec<&str> {
        let names: IndexSet<&str> = self
            .properties
            .iter()
            .filter_map(Property::model_name)
            .collect();
        names.into_iter().collect()
    }

    /// @ai:intent Every model reachable from this model's properties
    /// @ai:pre all_models is the complete model set of the document
    /// @ai:post each model is expanded at most once, so cyclic graphs terminate; missing models are skipped
    /// @ai:example A->B->C yields [B, C]; A->B->A yields [B, A]
    /// @ai:effects pure
    pub fn recursive_model_names(&self, all_models: &[Model]) -> Vec<String> {
        let mut names = IndexSet::new();
        let mut expanded = HashSet::new();
        if let Some(id) = &self.id {
            expanded.insert(id.clone());
        }

        self.collect_model_names(all_models, &mut names, &mut expanded);
        names.into_iter().collect()
    }

    fn collect_model_names(
        &self,
        all_models: &[Model],
        names: &mut IndexSet<String>,
        expanded: &mut HashSet<String>,
    ) {
        let direct = self.properties_model_names();
        names.extend(direct.iter().map(|n| n.to_string()));

        for name in direct {
            if !expanded.insert(name.to_string()) {
                continue;
            }
            if let Some(child) = all_models.iter().find(|m| m.id() == Some(name)) {
                child.collect_model_names(all_models, names, expanded);
            }
        }
    }

    fn required_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.is_required())
            .map(Property::name)
            .collect()
    }

    /// @ai:intent Legacy (v1) model form
    /// @ai:pre the model has an id
    /// @ai:effects pure
    pub fn to_legacy(&self) -> Result<Value> {
        let id = self.id.as_deref().ok_or_else(|| Error::MissingModelId {
            declaration: self.declaration.clone(),
        })?;
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name().to_string(), p.to_legacy()))
            .collect();

        Ok(json!({
            "id": id,
            "properties": properties,
            "required": self.required_names(),
        }))
    }

    /// @ai:intent OpenAPI v2 definition body; the id is the caller's definitions key
    /// @ai:effects pure
    pub fn to_v2(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name().to_string(), p.to_v2()))
            .collect();

        json!({
            "properties": properties,
            "required": self.required_names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prop(name: &str, ty: &str) -> Tag {
        Tag::new("property", "").with_name(name).with_types([ty])
    }

    fn model(id: &str, refs: &[&str]) -> Model {
        let mut tags = vec![Tag::new("model", id)];
        tags.extend(refs.iter().map(|r| prop(&r.to_lowercase(), r)));
        Model::from_tags(&tags, &SchemaConfig::default())
    }

    #[test]
    fn test_from_tags() {
        let tags = vec![
            Tag::new("model", "Widget"),
            prop("id(required)", "integer"),
            Tag::new("see", "Gadget"),
            prop("parts", "Array<Part>"),
            Tag::new("model", "Ignored"),
        ];

        let model = Model::from_tags(&tags, &SchemaConfig::default());

        assert!(model.is_valid());
        assert_eq!(model.id(), Some("Widget"));
        assert_eq!(model.properties().len(), 2);
        assert_eq!(model.properties_model_names(), vec!["Part"]);
    }

    #[test]
    fn test_from_declarations_picks_first_class() {
        let declarations = vec![
            Declaration::new("Widget#save", DeclarationKind::Method)
                .with_tag(Tag::new("model", "NotThis")),
            Declaration::new("Widget", DeclarationKind::Class).with_tag(Tag::new("model", "Widget")),
            Declaration::new("Other", DeclarationKind::Class).with_tag(Tag::new("model", "Other")),
        ];

        let model = Model::from_declarations(&declarations, &SchemaConfig::default()).unwrap();
        assert_eq!(model.id(), Some("Widget"));

        let methods = vec![Declaration::new("Widget#save", DeclarationKind::Method)];
        assert!(Model::from_declarations(&methods, &SchemaConfig::default()).is_none());
    }

    #[test]
    fn test_properties_model_names_are_distinct() {
        let tags = vec![
            Tag::new("model", "Order"),
            prop("billing", "Address"),
            prop("shipping", "Address"),
            prop("items", "Array<LineItem>"),
        ];
        let model = Model::from_tags(&tags, &SchemaConfig::default());
        assert_eq!(model.properties_model_names(), vec!["Address", "LineItem"]);
    }

    #[test]
    fn test_recursive_model_names_chain() {
        let all = vec![model("A", &["B"]), model("B", &["C"]), model("C", &[])];
        assert_eq!(all[0].recursive_model_names(&all), vec!["B", "C"]);
    }

    #[test]
    fn test_recursive_model_names_cycle_terminates() {
        let all = vec![model("A", &["B"]), model("B", &["A"])];
        assert_eq!(all[0].recursive_model_names(&all), vec!["B", "A"]);

        let self_ref = vec![model("Node", &["Node"])];
        assert_eq!(self_ref[0].recursive_model_names(&self_ref), vec!["Node"]);
    }

    #[test]
    fn test_recursive_model_names_skips_missing() {
        let all = vec![model("A", &["B", "Missing"]), model("B", &["C"])];
        assert_eq!(all[0].recursive_model_names(&all), vec!["B", "Missing", "C"]);
    }

    #[test]
    fn test_legacy_requires_id() {
        let model = Model::from_tags(&[prop("name", "string")], &SchemaConfig::default());

        assert!(!model.is_valid());
        assert!(matches!(
            model.to_legacy(),
            Err(Error::MissingModelId { declaration: None })
        ));
        assert_eq!(
            model.to_v2(),
            json!({ "properties": { "name": { "type": "string" } }, "required": [] })
        );
    }

    #[test]
    fn test_missing_id_names_declaration() {
        let declaration = Declaration::new("Gadget", DeclarationKind::Class)
            .with_tag(prop("name", "string"));
        let model = Model::from_declaration(&declaration, &SchemaConfig::default());

        let err = model.to_legacy().unwrap_err();
        assert!(matches!(
            &err,
            Error::MissingModelId { declaration: Some(d) } if d == "Gadget"
        ));
        assert_eq!(err.to_string(), "Model Gadget is missing @model tag");
    }

    #[test]
    fn test_legacy_form() {
        let tags = vec![
            Tag::new("model", "Widget"),
            prop("id(required)", "integer"),
            prop("owner", "Account"),
        ];
        let model = Model::from_tags(&tags, &SchemaConfig::default());

        assert_eq!(
            model.to_legacy().unwrap(),
            json!({
                "id": "Widget",
                "properties": {
                    "id": { "type": "integer", "description": null },
                    "owner": { "type": "Account", "description": null }
                },
                "required": ["id"]
            })
        );
        assert_eq!(
            model.to_v2(),
            json!({
                "properties": {
                    "id": { "type": "integer" },
                    "owner": { "$ref": "#/definitions/Account" }
                },
                "required": ["id"]
            })
        );
    }
}

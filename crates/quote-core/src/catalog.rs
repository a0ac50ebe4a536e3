//! # Service Catalog
//!
//! The ordered, operator-editable list of services a quote can bill for.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. No two entries share a `code`                                       │
//! │  2. Never empty (at least one entry)                                    │
//! │  3. `id` and `code` never change after creation                        │
//! │                                                                         │
//! │  Line items point at services by `code`. After ANY catalog change the  │
//! │  caller runs `reconcile()`, which moves orphaned line items to the      │
//! │  first entry:                                                           │
//! │                                                                         │
//! │   delete_service(web) ──► catalog: [design, photo]                      │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                        reconcile(items)                                 │
//! │                                │                                        │
//! │           item{service_code: "web"} ──► item{service_code: "design"}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{coerce_numeric, finite_or_zero};
use crate::types::{new_id, LineItem, ServiceDefinition, ServiceDraft, ServicePatch};
use crate::validation::{validate_label, validate_service_code};
use crate::MAX_CODE_LENGTH;

// =============================================================================
// Catalog
// =============================================================================

/// Result of a confirmed-or-declined delete.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The entry was removed.
    Deleted(ServiceDefinition),
    /// The caller declined the confirmation; nothing changed.
    Cancelled,
}

/// A non-empty list of services with unique codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    services: Vec<ServiceDefinition>,
}

impl Default for Catalog {
    /// The built-in catalog, used on first start and whenever a stored
    /// catalog has no usable entries.
    fn default() -> Self {
        Catalog {
            services: default_services(),
        }
    }
}

impl Catalog {
    /// Builds a catalog from explicit entries, enforcing both invariants.
    pub fn from_services(services: Vec<ServiceDefinition>) -> CoreResult<Self> {
        if services.is_empty() {
            return Err(ValidationError::required("services").into());
        }

        for (i, service) in services.iter().enumerate() {
            if services[..i].iter().any(|s| s.code == service.code) {
                return Err(ValidationError::Duplicate {
                    field: "code".to_string(),
                    value: service.code.clone(),
                }
                .into());
            }
        }

        Ok(Catalog { services })
    }

    /// All entries, in display order.
    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// The fallback entry orphaned line items are moved to.
    pub fn first(&self) -> &ServiceDefinition {
        &self.services[0]
    }

    pub fn get(&self, id: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.code == code)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.find_by_code(code).is_some()
    }

    /// Display label for a code, falling back to the code itself.
    pub fn label_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.find_by_code(code).map_or(code, |s| s.label.as_str())
    }

    // -------------------------------------------------------------------------
    // CRUD
    // -------------------------------------------------------------------------

    /// Adds a service from the "new service" draft.
    ///
    /// ## Behavior
    /// - Code = slug of `draft.code`, or of `draft.label` when no code given
    /// - Fails on blank label, empty resolved code, or an existing code
    /// - On failure nothing changes (draft included)
    /// - On success the draft is reset to empty
    ///
    /// ## User Workflow
    /// ```text
    /// label: "Motion Graphics", code: (blank)
    ///      │
    ///      ▼
    /// slugify ──► "motion-graphics"
    ///      │
    ///      ├── exists? → ValidationError::Duplicate
    ///      │
    ///      └── append, clear draft
    /// ```
    pub fn add(&mut self, draft: &mut ServiceDraft) -> CoreResult<ServiceDefinition> {
        validate_label(&draft.label)?;

        let source = draft
            .code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&draft.label);
        let code = slugify_code(source);
        validate_service_code(&code)?;

        if self.contains_code(&code) {
            return Err(ValidationError::Duplicate {
                field: "code".to_string(),
                value: code,
            }
            .into());
        }

        let service = ServiceDefinition {
            id: new_id(),
            code,
            label: draft.label.trim().to_string(),
            suggestion: draft.suggestion.trim().to_string(),
            default_hourly_cost: non_negative(draft.default_hourly_cost),
        };

        self.services.push(service.clone());
        *draft = ServiceDraft::default();
        Ok(service)
    }

    /// Merges `patch` into the entry with `id`.
    ///
    /// Returns `None` (and changes nothing) when the id is unknown.
    /// A blank label in the patch is ignored.
    pub fn update(&mut self, id: &str, patch: &ServicePatch) -> Option<&ServiceDefinition> {
        let service = self.services.iter_mut().find(|s| s.id == id)?;

        if let Some(label) = patch.label.as_deref().map(str::trim) {
            if !label.is_empty() {
                service.label = label.to_string();
            }
        }
        if let Some(suggestion) = &patch.suggestion {
            service.suggestion = suggestion.clone();
        }
        if let Some(cost) = patch.default_hourly_cost {
            service.default_hourly_cost = non_negative(cost);
        }

        Some(service)
    }

    /// Removes the entry with `id` once `confirm` approves it.
    ///
    /// ## Errors
    /// - [`CoreError::ServiceNotFound`] when the id is unknown
    /// - [`CoreError::LastService`] when it is the only entry
    ///
    /// `confirm` is only consulted when the delete is otherwise allowed.
    pub fn remove<F>(&mut self, id: &str, confirm: F) -> CoreResult<DeleteOutcome>
    where
        F: FnOnce(&ServiceDefinition) -> bool,
    {
        let index = self
            .services
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::ServiceNotFound(id.to_string()))?;

        if self.services.len() <= 1 {
            return Err(CoreError::LastService);
        }

        if !confirm(&self.services[index]) {
            return Ok(DeleteOutcome::Cancelled);
        }

        Ok(DeleteOutcome::Deleted(self.services.remove(index)))
    }

    // -------------------------------------------------------------------------
    // Line item consistency
    // -------------------------------------------------------------------------

    /// Points `item` at the service `code`.
    ///
    /// The item's hourly cost is reseeded from the service default. Its
    /// detail is replaced by the new suggestion only when still empty or
    /// equal to the previous service's suggestion (i.e. untouched).
    pub fn select_service(&self, item: &mut LineItem, code: &str) -> CoreResult<()> {
        let service = self
            .find_by_code(code)
            .ok_or_else(|| CoreError::ServiceCodeNotFound(code.to_string()))?;

        let untouched = item.detail.trim().is_empty()
            || self
                .find_by_code(&item.service_code)
                .is_some_and(|previous| previous.suggestion == item.detail);

        item.service_code = service.code.clone();
        item.hourly_cost = service.default_hourly_cost;
        if untouched {
            item.detail = service.suggestion.clone();
        }

        Ok(())
    }

    /// Reassigns every line item whose code no longer resolves to the first
    /// entry. Returns how many items were moved.
    ///
    /// Must run after every catalog mutation, including wholesale
    /// replacement.
    pub fn reconcile(&self, items: &mut [LineItem]) -> usize {
        let fallback = &self.first().code;
        let mut moved = 0;

        for item in items.iter_mut() {
            if !self.contains_code(&item.service_code) {
                item.service_code = fallback.clone();
                moved += 1;
            }
        }

        moved
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// Serializes the catalog as a JSON array for durable storage.
    pub fn to_snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// Snapshot Parsing
// =============================================================================

/// Rebuilds a catalog from a stored snapshot, never failing.
///
/// ## Recovery Rules
/// ```text
/// absent / not JSON / not an array   → default catalog
/// entry without code or label        → dropped
/// entry without id                   → fresh id
/// non-numeric defaultHourlyCost      → 0
/// repeated code                      → first occurrence wins
/// nothing usable left                → default catalog
/// ```
pub fn parse_catalog(raw: Option<&str>) -> Catalog {
    raw.and_then(usable_services)
        .map(|services| Catalog { services })
        .unwrap_or_default()
}

/// Strict variant of [`parse_catalog`] for operator-supplied imports.
///
/// Entries are cleaned with the same rules, but a document that is not a
/// JSON array or has no usable entry is rejected instead of silently
/// replaced by the defaults.
pub fn import_catalog(raw: &str) -> CoreResult<Catalog> {
    usable_services(raw)
        .map(|services| Catalog { services })
        .ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "catalog".to_string(),
                reason: "expected a JSON array with at least one entry having code and label"
                    .to_string(),
            }
            .into()
        })
}

fn usable_services(raw: &str) -> Option<Vec<ServiceDefinition>> {
    let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };

    let mut services: Vec<ServiceDefinition> = Vec::with_capacity(entries.len());
    for entry in &entries {
        let Some(service) = entry.as_object().and_then(service_from_object) else {
            continue;
        };
        if services.iter().all(|s| s.code != service.code) {
            services.push(service);
        }
    }

    (!services.is_empty()).then_some(services)
}

fn service_from_object(obj: &Map<String, Value>) -> Option<ServiceDefinition> {
    let code = non_blank_str(obj, "code")?;
    let label = non_blank_str(obj, "label")?;

    let id = non_blank_str(obj, "id").unwrap_or_else(new_id);
    let suggestion = obj
        .get("suggestion")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let default_hourly_cost = obj
        .get("defaultHourlyCost")
        .map(|v| non_negative(coerce_numeric(v)))
        .unwrap_or(0.0);

    Some(ServiceDefinition {
        id,
        code,
        label,
        suggestion,
        default_hourly_cost,
    })
}

fn non_blank_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Helpers
// =============================================================================

/// Derives a key-safe service code: lowercase, non-word characters
/// removed, runs of whitespace collapsed to a single `-`, underscores kept,
/// at most 32 characters.
///
/// ## Example
/// ```rust
/// use quote_core::catalog::slugify_code;
///
/// assert_eq!(slugify_code("  Motion   Graphics! "), "motion-graphics");
/// assert_eq!(slugify_code("Rock'n'Roll"), "rocknroll");
/// assert_eq!(slugify_code("!!!"), "");
/// ```
pub fn slugify_code(input: &str) -> String {
    let words: String = input
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect();

    // slug folds `_` into `-`, so each underscore-separated part goes alone
    let slug = words
        .split('_')
        .map(slug::slugify)
        .collect::<Vec<_>>()
        .join("_");

    let truncated: String = slug.chars().take(MAX_CODE_LENGTH).collect();
    truncated
        .trim_end_matches(|c| c == '-' || c == '_')
        .to_string()
}

fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

fn default_services() -> Vec<ServiceDefinition> {
    [
        (
            "design",
            "Graphic design",
            "Logo, visual identity and brand guidelines",
            25.0,
        ),
        (
            "web",
            "Web development",
            "Responsive website design and development",
            35.0,
        ),
        (
            "photo",
            "Photography",
            "Product photo session including retouching",
            30.0,
        ),
        (
            "video",
            "Video editing",
            "Editing, color grading and motion graphics",
            30.0,
        ),
        (
            "social",
            "Social media management",
            "Content calendar, post design and community management",
            20.0,
        ),
    ]
    .into_iter()
    .map(|(code, label, suggestion, cost)| ServiceDefinition {
        id: new_id(),
        code: code.to_string(),
        label: label.to_string(),
        suggestion: suggestion.to_string(),
        default_hourly_cost: cost,
    })
    .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(label: &str, code: Option<&str>, cost: f64) -> ServiceDraft {
        ServiceDraft {
            label: label.to_string(),
            code: code.map(str::to_string),
            suggestion: format!("{label} work"),
            default_hourly_cost: cost,
        }
    }

    fn two_service_catalog() -> Catalog {
        let keep = Catalog::default().services()[..2].to_vec();
        Catalog::from_services(keep).unwrap()
    }

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.first().code, "design");
        assert!(Catalog::from_services(catalog.services().to_vec()).is_ok());
    }

    #[test]
    fn test_from_services_rejects_empty_and_duplicates() {
        assert!(Catalog::from_services(vec![]).is_err());

        let first = Catalog::default().first().clone();
        let mut copy = first.clone();
        copy.id = new_id();
        assert!(Catalog::from_services(vec![first, copy]).is_err());
    }

    #[test]
    fn test_add_derives_code_from_label() {
        let mut catalog = Catalog::default();
        let mut input = draft("Motion Graphics", None, 45.0);

        let added = catalog.add(&mut input).unwrap();

        assert_eq!(added.code, "motion-graphics");
        assert_eq!(added.default_hourly_cost, 45.0);
        assert_eq!(catalog.len(), 6);
        assert_eq!(input, ServiceDraft::default());
    }

    #[test]
    fn test_add_uses_explicit_code() {
        let mut catalog = Catalog::default();
        let added = catalog.add(&mut draft("3D Renders", Some("Render 3D"), 50.0)).unwrap();
        assert_eq!(added.code, "render-3d");
    }

    #[test]
    fn test_add_duplicate_code_is_rejected_without_mutation() {
        let mut catalog = Catalog::default();
        let before = catalog.clone();

        for _ in 0..3 {
            let mut input = draft("Design", Some("design"), 10.0);
            let err = catalog.add(&mut input).unwrap_err();

            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::Duplicate { .. })
            ));
            assert_eq!(catalog, before);
            // Draft survives so the operator can fix it
            assert_eq!(input.label, "Design");
        }
    }

    #[test]
    fn test_add_rejects_blank_label_and_empty_code() {
        let mut catalog = Catalog::default();

        assert!(catalog.add(&mut draft("   ", None, 1.0)).is_err());
        assert!(catalog.add(&mut draft("!!!", None, 1.0)).is_err());
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_add_clamps_negative_cost() {
        let mut catalog = Catalog::default();
        let added = catalog.add(&mut draft("Audio", None, -10.0)).unwrap();
        assert_eq!(added.default_hourly_cost, 0.0);
    }

    #[test]
    fn test_update_merges_patch() {
        let mut catalog = Catalog::default();
        let id = catalog.first().id.clone();

        let patch = ServicePatch {
            label: Some("Branding".to_string()),
            default_hourly_cost: Some(60.0),
            ..Default::default()
        };
        let updated = catalog.update(&id, &patch).unwrap().clone();

        assert_eq!(updated.label, "Branding");
        assert_eq!(updated.default_hourly_cost, 60.0);
        assert_eq!(updated.code, "design");
        assert_eq!(updated.id, id);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut catalog = Catalog::default();
        let before = catalog.clone();

        assert!(catalog.update("missing", &ServicePatch::default()).is_none());
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_update_ignores_blank_label() {
        let mut catalog = Catalog::default();
        let id = catalog.first().id.clone();
        let patch = ServicePatch {
            label: Some("  ".to_string()),
            ..Default::default()
        };
        catalog.update(&id, &patch);
        assert_eq!(catalog.first().label, "Graphic design");
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut catalog = two_service_catalog();
        let id = catalog.services()[1].id.clone();

        let outcome = catalog.remove(&id, |_| false).unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(catalog.len(), 2);

        let outcome = catalog.remove(&id, |s| s.code == "web").unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted(ref s) if s.code == "web"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_remove_last_entry_is_rejected() {
        let mut catalog = two_service_catalog();
        let second = catalog.services()[1].id.clone();
        catalog.remove(&second, |_| true).unwrap();

        let only = catalog.first().id.clone();
        let before = catalog.clone();
        let mut asked = false;
        let err = catalog
            .remove(&only, |_| {
                asked = true;
                true
            })
            .unwrap_err();

        assert!(matches!(err, CoreError::LastService));
        assert!(!asked);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut catalog = Catalog::default();
        let err = catalog.remove("missing", |_| true).unwrap_err();
        assert!(matches!(err, CoreError::ServiceNotFound(_)));
    }

    #[test]
    fn test_select_service_reseeds_cost_only_for_that_item() {
        let mut catalog = Catalog::default();
        catalog
            .add(&mut draft("Illustration", Some("illustration"), 75.0))
            .unwrap();

        let mut items = vec![
            LineItem::from_service(catalog.first()),
            LineItem::from_service(catalog.first()),
        ];
        catalog.select_service(&mut items[0], "illustration").unwrap();

        assert_eq!(items[0].service_code, "illustration");
        assert_eq!(items[0].hourly_cost, 75.0);
        assert_eq!(items[1].hourly_cost, 25.0);
    }

    #[test]
    fn test_select_service_refreshes_untouched_detail_only() {
        let catalog = Catalog::default();
        let mut untouched = LineItem::from_service(catalog.first());
        let mut edited = LineItem::from_service(catalog.first());
        edited.detail = "Custom mascot".to_string();
        let mut empty = LineItem::from_service(catalog.first());
        empty.detail.clear();

        for item in [&mut untouched, &mut edited, &mut empty] {
            catalog.select_service(item, "photo").unwrap();
        }

        let photo = catalog.find_by_code("photo").unwrap();
        assert_eq!(untouched.detail, photo.suggestion);
        assert_eq!(edited.detail, "Custom mascot");
        assert_eq!(empty.detail, photo.suggestion);
    }

    #[test]
    fn test_select_unknown_service() {
        let catalog = Catalog::default();
        let mut item = LineItem::from_service(catalog.first());
        let before = item.clone();

        assert!(catalog.select_service(&mut item, "nope").is_err());
        assert_eq!(item, before);
    }

    #[test]
    fn test_reconcile_moves_orphans_to_new_first_entry() {
        let mut catalog = Catalog::default();
        let design_id = catalog.first().id.clone();

        let mut items = vec![
            LineItem::from_service(catalog.find_by_code("design").unwrap()),
            LineItem::from_service(catalog.find_by_code("video").unwrap()),
        ];

        catalog.remove(&design_id, |_| true).unwrap();
        let moved = catalog.reconcile(&mut items);

        assert_eq!(moved, 1);
        assert_eq!(items[0].service_code, "web");
        assert_eq!(items[1].service_code, "video");
    }

    #[test]
    fn test_parse_catalog_round_trips_snapshot() {
        let catalog = Catalog::default();
        let snapshot = catalog.to_snapshot().unwrap();
        assert_eq!(parse_catalog(Some(&snapshot)), catalog);
    }

    #[test]
    fn test_parse_catalog_falls_back_to_defaults() {
        let defaults: Vec<String> = Catalog::default()
            .services()
            .iter()
            .map(|s| s.code.clone())
            .collect();

        for raw in [None, Some("not json"), Some("{}"), Some("[]"), Some(r#"[{"label":"x"}]"#)] {
            let codes: Vec<String> = parse_catalog(raw)
                .services()
                .iter()
                .map(|s| s.code.clone())
                .collect();
            assert_eq!(codes, defaults, "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_catalog_validates_entries() {
        let raw = r#"[
            {"id": "1", "code": "web", "label": "Web", "defaultHourlyCost": "40"},
            {"code": "", "label": "Blank code"},
            {"code": "nolabel"},
            {"code": "seo", "label": "SEO", "defaultHourlyCost": "lots"},
            {"id": "9", "code": "web", "label": "Duplicate web"},
            {"code": "ads", "label": "Ads", "defaultHourlyCost": -15},
            42
        ]"#;
        let catalog = parse_catalog(Some(raw));

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find_by_code("ads").unwrap().default_hourly_cost, 0.0);
        assert_eq!(catalog.first().id, "1");
        assert_eq!(catalog.first().label, "Web");
        assert_eq!(catalog.first().default_hourly_cost, 40.0);

        let seo = catalog.find_by_code("seo").unwrap();
        assert_eq!(seo.default_hourly_cost, 0.0);
        assert_eq!(seo.suggestion, "");
        assert!(!seo.id.is_empty());
    }

    #[test]
    fn test_import_catalog_is_strict() {
        assert!(import_catalog("nope").is_err());
        assert!(import_catalog("[]").is_err());
        assert!(import_catalog(r#"[{"code":"x"}]"#).is_err());

        let imported =
            import_catalog(r#"[{"code":"seo","label":"SEO","defaultHourlyCost":15}]"#).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported.first().default_hourly_cost, 15.0);
    }

    #[test]
    fn test_label_for() {
        let catalog = Catalog::default();
        assert_eq!(catalog.label_for("web"), "Web development");
        assert_eq!(catalog.label_for("ghost"), "ghost");
    }

    #[test]
    fn test_slugify_code_removes_non_word_characters() {
        assert_eq!(slugify_code("Rock'n'Roll"), "rocknroll");
        assert_eq!(slugify_code("Photo/Video"), "photovideo");
        assert_eq!(slugify_code("3D_Render"), "3d_render");
        assert_eq!(slugify_code("Café  Lima"), "cafe-lima");
        assert_eq!(slugify_code("___"), "");
        assert!(validate_service_code(&slugify_code("3D_Render")).is_ok());
    }

    #[test]
    fn test_slugify_code_truncates() {
        let code = slugify_code(&"word ".repeat(20));
        assert!(code.len() <= MAX_CODE_LENGTH);
        assert!(!code.ends_with('-'));
        assert!(validate_service_code(&code).is_ok());
    }
}

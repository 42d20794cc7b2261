use contracts::domain::a002_component::aggregate::Component;
use contracts::domain::a005_compatibility_rule::aggregate::{
    resolve_tag_rules, CompatibilityRule, CompatibilityRuleDto,
};
use serde::Serialize;

use super::repository;
use crate::shared::error::{AppError, AppResult};

pub async fn list() -> AppResult<Vec<CompatibilityRule>> {
    Ok(repository::list_all().await?)
}

pub async fn get(id: &str) -> AppResult<CompatibilityRule> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Compatibility rule not found"))
}

pub async fn create(dto: &CompatibilityRuleDto) -> AppResult<CompatibilityRule> {
    ensure_categories_exist(&dto.source_category_id, &dto.target_category_id).await?;
    let mut rule = CompatibilityRule::new_for_insert(dto);
    rule.validate().map_err(AppError::Validation)?;
    rule.before_write();
    repository::insert(&rule).await?;
    tracing::info!("Created compatibility rule {}", rule.name);
    Ok(rule)
}

pub async fn update(id: &str, dto: &CompatibilityRuleDto) -> AppResult<CompatibilityRule> {
    ensure_categories_exist(&dto.source_category_id, &dto.target_category_id).await?;
    let mut rule = get(id).await?;
    rule.apply(dto);
    rule.validate().map_err(AppError::Validation)?;
    rule.before_write();
    repository::update(&rule).await?;
    Ok(rule)
}

/// Delete deactivates; evaluation only ever sees active rules.
pub async fn delete(id: &str) -> AppResult<()> {
    let mut rule = get(id).await?;
    rule.is_active = false;
    rule.before_write();
    repository::update(&rule).await?;
    Ok(())
}

async fn ensure_categories_exist(source: &str, target: &str) -> AppResult<()> {
    for category_id in [source, target] {
        if crate::domain::a001_category::repository::get_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(AppError::validation(format!(
                "Unknown category '{}'",
                category_id
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityVerdict {
    pub compatible: bool,
    pub reason: Option<String>,
}

/// Check one component pair by id. Used by the public check endpoint.
pub async fn check(component_a: &str, component_b: &str) -> AppResult<CompatibilityVerdict> {
    let a = crate::domain::a002_component::service::get(component_a).await?;
    let b = crate::domain::a002_component::service::get(component_b).await?;

    if has_hard_override(&a, &b) {
        return Ok(CompatibilityVerdict {
            compatible: false,
            reason: Some(format!(
                "{} is explicitly marked incompatible with {}",
                a.display_name(),
                b.display_name()
            )),
        });
    }

    let compatible = check_pair(&a, &b).await?;
    Ok(CompatibilityVerdict {
        compatible,
        reason: if compatible {
            None
        } else {
            Some("Tag rules mark this pair incompatible".to_string())
        },
    })
}

/// Hard overrides apply in either direction.
fn has_hard_override(a: &Component, b: &Component) -> bool {
    a.incompatible_with.iter().any(|id| *id == b.id)
        || b.incompatible_with.iter().any(|id| *id == a.id)
}

/// Resolve the compatibility of two loaded components: hard override
/// first, then the symmetric category-pair tag rules. Components
/// without a category are always compatible.
pub async fn check_pair(a: &Component, b: &Component) -> AppResult<bool> {
    if has_hard_override(a, b) {
        return Ok(false);
    }

    let (category_a, category_b) = match (&a.category_id, &b.category_id) {
        (Some(ca), Some(cb)) => (ca.clone(), cb.clone()),
        _ => return Ok(true),
    };

    let rules = repository::list_active().await?;
    let forward: Vec<&CompatibilityRule> = rules
        .iter()
        .filter(|r| r.covers(&category_a, &category_b))
        .collect();
    let reverse: Vec<&CompatibilityRule> = rules
        .iter()
        .filter(|r| r.covers(&category_b, &category_a))
        .collect();

    Ok(resolve_tag_rules(&forward, &reverse, &a.tags, &b.tags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_component::aggregate::ComponentDto;

    fn component(name: &str, category: Option<&str>, tags: &[&str]) -> Component {
        Component::new_for_insert(&ComponentDto {
            name: name.to_string(),
            category_id: category.map(|c| c.to_string()),
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..Default::default()
        })
    }

    // No store behind these tests; the override must decide before any
    // rule lookup happens.
    #[tokio::test]
    async fn hard_override_wins_in_both_directions() {
        let mut a = component("Ryzen 5 5600", Some("cat-cpu"), &["am4"]);
        let b = component("MSI B550", Some("cat-motherboard"), &["am4", "b550"]);
        a.incompatible_with = vec![b.id.clone()];

        assert!(!check_pair(&a, &b).await.unwrap());
        assert!(!check_pair(&b, &a).await.unwrap());
    }

    #[tokio::test]
    async fn uncategorized_pair_is_compatible() {
        let a = component("Mousepad XL", None, &[]);
        let b = component("Ryzen 5 5600", Some("cat-cpu"), &["am4"]);
        assert!(check_pair(&a, &b).await.unwrap());
    }
}

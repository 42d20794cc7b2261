use std::collections::HashMap;

use contracts::domain::a002_component::aggregate::Component;
use contracts::domain::a004_user_build::aggregate::{BuildType, UserBuild, UserBuildDto};
use serde::Serialize;

use super::repository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::load_app_settings;

/// Non-fatal issue found while assembling a build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildWarning {
    #[serde(rename = "componentA")]
    pub component_a: String,
    #[serde(rename = "componentB")]
    pub component_b: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssembledBuild {
    #[serde(flatten)]
    pub build: UserBuild,
    pub warnings: Vec<BuildWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct BuildListFilter {
    pub user_id: Option<String>,
    pub build_type: Option<BuildType>,
    pub is_public: Option<bool>,
}

pub async fn list(filter: &BuildListFilter) -> AppResult<Vec<UserBuild>> {
    let mut builds = match &filter.user_id {
        Some(user_id) => repository::list_by_user(user_id).await?,
        None => repository::list_all().await?,
    };
    if let Some(build_type) = filter.build_type {
        builds.retain(|b| b.build_type == build_type);
    }
    if let Some(is_public) = filter.is_public {
        builds.retain(|b| b.is_public == is_public);
    }
    Ok(builds)
}

pub async fn get(id: &str) -> AppResult<UserBuild> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Build not found"))
}

pub async fn create(dto: &UserBuildDto) -> AppResult<AssembledBuild> {
    let mut build = UserBuild::new_for_insert(dto);
    build.validate().map_err(AppError::Validation)?;
    let warnings = assemble(&mut build).await?;
    build.before_write();
    repository::insert(&build).await?;
    tracing::info!("Created user build {}", build.name);
    Ok(AssembledBuild { build, warnings })
}

pub async fn update(id: &str, dto: &UserBuildDto) -> AppResult<AssembledBuild> {
    let mut build = get(id).await?;
    build.apply(dto);
    build.validate().map_err(AppError::Validation)?;
    let warnings = assemble(&mut build).await?;
    build.before_write();
    repository::update(&build).await?;
    Ok(AssembledBuild { build, warnings })
}

pub async fn delete(id: &str) -> AppResult<()> {
    if !repository::delete(id).await? {
        return Err(AppError::not_found("Build not found"));
    }
    Ok(())
}

/// The build assembler. Verifies that every entry's component exists
/// and belongs to the declared category, that all required categories
/// are covered, recomputes the total, and collects pairwise
/// compatibility warnings. Incompatibilities never block saving.
async fn assemble(build: &mut UserBuild) -> AppResult<Vec<BuildWarning>> {
    let mut components: Vec<Component> = Vec::with_capacity(build.components.len());
    for entry in &build.components {
        let component = crate::domain::a002_component::repository::get_by_id(&entry.component_id)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!("Component '{}' not found", entry.component_id))
            })?;
        match &component.category_id {
            Some(category_id) if *category_id == entry.category_id => {}
            _ => {
                return Err(AppError::validation(format!(
                    "Component '{}' does not belong to the declared category",
                    component.display_name()
                )))
            }
        }
        components.push(component);
    }

    ensure_required_categories_covered(build).await?;

    let unit_prices: HashMap<String, f64> = components
        .iter()
        .map(|c| (c.id.clone(), c.build_context_price()))
        .collect();
    build.recompute_total(&unit_prices);

    let settings = load_app_settings().await?;
    if !settings.enable_compatibility_check {
        return Ok(vec![]);
    }

    let mut warnings = Vec::new();
    for i in 0..components.len() {
        for j in (i + 1)..components.len() {
            let a = &components[i];
            let b = &components[j];
            if !crate::domain::a005_compatibility_rule::service::check_pair(a, b).await? {
                warnings.push(BuildWarning {
                    component_a: a.display_name(),
                    component_b: b.display_name(),
                    message: format!(
                        "{} may not be compatible with {}",
                        a.display_name(),
                        b.display_name()
                    ),
                });
            }
        }
    }
    Ok(warnings)
}

async fn ensure_required_categories_covered(build: &UserBuild) -> AppResult<()> {
    let categories = crate::domain::a001_category::repository::list_all().await?;
    for category in categories.iter().filter(|c| c.is_active && c.required) {
        let covered = build
            .components
            .iter()
            .any(|entry| entry.category_id == category.id);
        if !covered {
            return Err(AppError::validation(format!(
                "Required category '{}' has no component selected",
                category.name
            )));
        }
    }
    Ok(())
}

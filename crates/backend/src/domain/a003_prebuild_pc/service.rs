use contracts::domain::a002_component::aggregate::Component;
use contracts::domain::a003_prebuild_pc::aggregate::{
    PreBuildPc, PreBuildPcDto, SlotKey, SlotRef,
};

use super::repository;
use crate::shared::error::{AppError, AppResult};

pub async fn list() -> AppResult<Vec<PreBuildPc>> {
    let mut builds = repository::list_active().await?;
    builds.sort_by_key(|pc| pc.sort_order);
    Ok(builds)
}

pub async fn get(id: &str) -> AppResult<PreBuildPc> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Pre-built PC not found"))
}

pub async fn create(dto: &PreBuildPcDto) -> AppResult<PreBuildPc> {
    let mut pc = PreBuildPc::new_for_insert(dto);
    apply_slot_assignments(&mut pc, dto).await?;
    pc.validate().map_err(AppError::Validation)?;
    pc.before_write();
    repository::insert(&pc).await?;
    tracing::info!("Created pre-built PC {}", pc.name);
    Ok(pc)
}

pub async fn update(id: &str, dto: &PreBuildPcDto) -> AppResult<PreBuildPc> {
    let mut pc = get(id).await?;
    pc.apply(dto);
    apply_slot_assignments(&mut pc, dto).await?;
    pc.validate().map_err(AppError::Validation)?;
    pc.before_write();
    repository::update(&pc).await?;
    Ok(pc)
}

/// Delete is a soft deactivate.
pub async fn delete(id: &str) -> AppResult<()> {
    let mut pc = get(id).await?;
    pc.is_active = false;
    pc.before_write();
    repository::update(&pc).await?;
    Ok(())
}

/// Resolve the dto's slot map (slot key -> component id) into slot
/// snapshots. Snapshots freeze name and build-context price at
/// assignment time; later component edits do not flow back.
async fn apply_slot_assignments(pc: &mut PreBuildPc, dto: &PreBuildPcDto) -> AppResult<()> {
    let assignments = match &dto.components {
        Some(assignments) => assignments,
        None => return Ok(()),
    };

    pc.components.clear();
    for (key, component_id) in assignments {
        let slot = SlotKey::parse(key)
            .ok_or_else(|| AppError::validation(format!("Unknown component slot '{}'", key)))?;
        if component_id.is_empty() {
            continue;
        }
        let component = crate::domain::a002_component::repository::get_by_id(component_id)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!("Component '{}' not found for slot '{}'", component_id, key))
            })?;
        pc.set_slot(slot, Some(snapshot_of(&component)));
    }
    Ok(())
}

fn snapshot_of(component: &Component) -> SlotRef {
    SlotRef {
        component_id: component.id.clone(),
        name: component.display_name(),
        price: component.build_context_price(),
    }
}

/// In-stock candidates for one slot's category, for the assembly picker.
pub async fn components_for_slot(category_id: &str) -> AppResult<Vec<Component>> {
    let mut components =
        crate::domain::a002_component::repository::list_in_stock_by_category(category_id).await?;
    components.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(components)
}

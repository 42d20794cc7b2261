use contracts::domain::a006_supplier::aggregate::{Supplier, SupplierDto};
use serde::{Deserialize, Serialize};

use super::repository;
use crate::shared::error::{AppError, AppResult};

pub async fn list() -> AppResult<Vec<Supplier>> {
    Ok(repository::list_all().await?)
}

pub async fn get(id: &str) -> AppResult<Supplier> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Supplier not found"))
}

pub async fn create(dto: &SupplierDto) -> AppResult<Supplier> {
    let mut supplier = Supplier::new_for_insert(dto);
    supplier.validate().map_err(AppError::Validation)?;
    supplier.before_write();
    repository::insert(&supplier).await?;
    tracing::info!("Created supplier {}", supplier.name);
    Ok(supplier)
}

pub async fn update(id: &str, dto: &SupplierDto) -> AppResult<Supplier> {
    let mut supplier = get(id).await?;
    supplier.apply(dto);
    supplier.validate().map_err(AppError::Validation)?;
    supplier.before_write();
    repository::update(&supplier).await?;
    Ok(supplier)
}

pub async fn delete(id: &str) -> AppResult<()> {
    if !repository::delete(id).await? {
        return Err(AppError::not_found("Supplier not found"));
    }
    Ok(())
}

pub async fn add_comment(id: &str, content: &str, author: &str) -> AppResult<Supplier> {
    if content.trim().is_empty() {
        return Err(AppError::validation("Comment content is required"));
    }
    let mut supplier = get(id).await?;
    supplier.add_comment(content.trim().to_string(), author.to_string());
    supplier.before_write();
    repository::update(&supplier).await?;
    Ok(supplier)
}

pub async fn add_rating(
    id: &str,
    rating: u8,
    comment: Option<String>,
    author: &str,
) -> AppResult<Supplier> {
    let mut supplier = get(id).await?;
    supplier.add_rating(rating, comment, author.to_string());
    supplier.validate().map_err(AppError::Validation)?;
    supplier.before_write();
    repository::update(&supplier).await?;
    Ok(supplier)
}

pub async fn set_product_price(id: &str, product_id: &str, price: f64) -> AppResult<Supplier> {
    if price < 0.0 {
        return Err(AppError::validation("Offer price cannot be negative"));
    }
    if crate::domain::a007_product::repository::get_by_id(product_id)
        .await?
        .is_none()
    {
        return Err(AppError::validation("Unknown product"));
    }
    let mut supplier = get(id).await?;
    supplier.set_product_price(product_id, price);
    supplier.before_write();
    repository::update(&supplier).await?;
    Ok(supplier)
}

/// One row of the supplier import CSV. Header:
/// name,contact,email,phone,website,location,address
#[derive(Debug, Deserialize)]
struct ImportRow {
    name: String,
    contact: String,
    email: Option<String>,
    phone: String,
    website: Option<String>,
    location: Option<String>,
    address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Bulk import from CSV. Invalid rows are skipped and reported, valid
/// rows land regardless.
pub async fn import_csv(data: &[u8]) -> AppResult<ImportReport> {
    let mut reader = csv::Reader::from_reader(data);
    let mut report = ImportReport {
        imported: 0,
        skipped: 0,
        errors: vec![],
    };

    for (index, record) in reader.deserialize::<ImportRow>().enumerate() {
        let line = index + 2; // header is line 1
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                report.skipped += 1;
                report.errors.push(format!("line {}: {}", line, err));
                continue;
            }
        };

        let dto = SupplierDto {
            id: None,
            name: row.name,
            contact: row.contact,
            email: row.email.filter(|e| !e.trim().is_empty()),
            phone: row.phone,
            website: row.website.filter(|w| !w.trim().is_empty()),
            location: row.location.filter(|l| !l.trim().is_empty()),
            address: row.address,
        };

        match create(&dto).await {
            Ok(_) => report.imported += 1,
            Err(err) => {
                report.skipped += 1;
                report.errors.push(format!("line {}: {}", line, err));
            }
        }
    }

    tracing::info!(
        "Supplier import finished: {} imported, {} skipped",
        report.imported,
        report.skipped
    );
    Ok(report)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Offer: this supplier sells the referenced product at `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierProduct {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub price: f64,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierComment {
    pub id: String,
    pub content: String,
    pub author: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRating {
    pub id: String,
    /// 1-5.
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub author: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub address: String,
    #[serde(default)]
    pub products: Vec<SupplierProduct>,
    #[serde(default)]
    pub comments: Vec<SupplierComment>,
    #[serde(default)]
    pub ratings: Vec<SupplierRating>,
    /// Derived: mean of ratings rounded to 1 decimal, 0 when empty.
    #[serde(rename = "averageRating", default)]
    pub average_rating: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierDto {
    pub id: Option<String>,
    pub name: String,
    pub contact: String,
    pub email: Option<String>,
    pub phone: String,
    pub website: Option<String>,
    pub location: Option<String>,
    pub address: String,
}

impl Supplier {
    pub fn new_for_insert(dto: &SupplierDto) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: dto.name.trim().to_string(),
            contact: dto.contact.trim().to_string(),
            email: dto.email.as_ref().map(|e| e.trim().to_lowercase()),
            phone: dto.phone.trim().to_string(),
            website: dto.website.clone(),
            location: dto.location.clone(),
            address: dto.address.trim().to_string(),
            products: vec![],
            comments: vec![],
            ratings: vec![],
            average_rating: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, dto: &SupplierDto) {
        self.name = dto.name.trim().to_string();
        self.contact = dto.contact.trim().to_string();
        if dto.email.is_some() {
            self.email = dto.email.as_ref().map(|e| e.trim().to_lowercase());
        }
        self.phone = dto.phone.trim().to_string();
        if dto.website.is_some() {
            self.website = dto.website.clone();
        }
        if dto.location.is_some() {
            self.location = dto.location.clone();
        }
        self.address = dto.address.trim().to_string();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Supplier name is required".into());
        }
        if self.contact.trim().is_empty() {
            return Err("Supplier contact is required".into());
        }
        if self.phone.trim().is_empty() {
            return Err("Supplier phone is required".into());
        }
        if self.address.trim().is_empty() {
            return Err("Supplier address is required".into());
        }
        if let Some(email) = &self.email {
            if !email.is_empty() && !email.contains('@') {
                return Err("Invalid supplier email".into());
            }
        }
        for rating in &self.ratings {
            if !(1..=5).contains(&rating.rating) {
                return Err("Rating must be between 1 and 5".into());
            }
        }
        Ok(())
    }

    /// Recompute the derived average. Called unconditionally before
    /// every persist.
    pub fn recompute_average_rating(&mut self) {
        if self.ratings.is_empty() {
            self.average_rating = 0.0;
        } else {
            let total: f64 = self.ratings.iter().map(|r| f64::from(r.rating)).sum();
            let mean = total / self.ratings.len() as f64;
            self.average_rating = (mean * 10.0).round() / 10.0;
        }
    }

    pub fn before_write(&mut self) {
        self.recompute_average_rating();
        self.updated_at = Utc::now();
    }

    pub fn add_comment(&mut self, content: String, author: String) {
        self.comments.push(SupplierComment {
            id: Uuid::new_v4().to_string(),
            content,
            author,
            created_at: Utc::now(),
        });
    }

    pub fn add_rating(&mut self, rating: u8, comment: Option<String>, author: String) {
        self.ratings.push(SupplierRating {
            id: Uuid::new_v4().to_string(),
            rating,
            comment,
            author,
            created_at: Utc::now(),
        });
    }

    /// Upsert a product offer; price changes refresh `last_updated`.
    pub fn set_product_price(&mut self, product_id: &str, price: f64) {
        match self.products.iter_mut().find(|p| p.product_id == product_id) {
            Some(offer) => {
                offer.price = price;
                offer.last_updated = Utc::now();
            }
            None => self.products.push(SupplierProduct {
                product_id: product_id.to_string(),
                price,
                last_updated: Utc::now(),
            }),
        }
    }

    pub fn offer_for(&self, product_id: &str) -> Option<&SupplierProduct> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier() -> Supplier {
        Supplier::new_for_insert(&SupplierDto {
            name: "Gulf Components".into(),
            contact: "Ali".into(),
            phone: "+971-50-0000000".into(),
            address: "Dubai".into(),
            ..Default::default()
        })
    }

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        let mut s = supplier();
        s.add_rating(5, None, "a".into());
        s.add_rating(4, None, "b".into());
        s.add_rating(4, None, "c".into());
        s.before_write();
        // mean 4.333... -> 4.3
        assert_eq!(s.average_rating, 4.3);
    }

    #[test]
    fn average_rating_zero_when_no_ratings() {
        let mut s = supplier();
        s.before_write();
        assert_eq!(s.average_rating, 0.0);
    }

    #[test]
    fn out_of_range_rating_rejected() {
        let mut s = supplier();
        s.add_rating(6, None, "a".into());
        assert!(s.validate().is_err());
    }

    #[test]
    fn set_product_price_upserts() {
        let mut s = supplier();
        s.set_product_price("prod-1", 100.0);
        s.set_product_price("prod-1", 90.0);
        s.set_product_price("prod-2", 50.0);
        assert_eq!(s.product_count(), 2);
        assert_eq!(s.offer_for("prod-1").unwrap().price, 90.0);
    }

    #[test]
    fn email_is_lowercased() {
        let s = Supplier::new_for_insert(&SupplierDto {
            name: "X".into(),
            contact: "Y".into(),
            phone: "1".into(),
            address: "Z".into(),
            email: Some("Sales@Example.COM".into()),
            ..Default::default()
        });
        assert_eq!(s.email.as_deref(), Some("sales@example.com"));
    }
}

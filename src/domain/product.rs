//! Product input accepted by the catalog.

use chrono::Utc;
use sea_orm::prelude::Decimal;
use sea_orm::{ActiveValue::NotSet, Set};
use validator::{Validate, ValidationError};

use crate::config::{MAX_PRICE, MIN_PRICE};
use crate::errors::AppResult;
use crate::infra::repositories::entities::product;

/// Fields of a product about to be created.
///
/// The store assigns the id; the registration timestamp is taken when the
/// active model is built.
#[derive(Debug, Clone, Validate)]
pub struct NewProduct {
    #[validate(
        length(min = 5, max = 20, message = "Name must be 5 to 20 characters"),
        custom(function = "first_letter_uppercase")
    )]
    pub name: String,

    #[validate(length(min = 1, max = 300, message = "Description must be 1 to 300 characters"))]
    pub description: String,

    #[validate(custom(function = "price_in_range"))]
    pub price: Decimal,

    #[validate(length(min = 1, max = 500, message = "Image URL must be 1 to 500 characters"))]
    pub image_url: String,

    #[validate(range(min = 0.0, message = "Stock cannot be negative"))]
    pub stock: f32,

    pub category_id: i32,
}

impl NewProduct {
    /// Validate, then build the active model to stage with `add`.
    pub fn try_into_active_model(self) -> AppResult<product::ActiveModel> {
        self.validate()?;

        Ok(product::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            description: Set(self.description),
            price: Set(self.price),
            image_url: Set(self.image_url),
            stock: Set(self.stock),
            registered_at: Set(Utc::now()),
            category_id: Set(self.category_id),
        })
    }
}

fn first_letter_uppercase(name: &str) -> Result<(), ValidationError> {
    match name.chars().next() {
        Some(first) if first.is_uppercase() => Ok(()),
        _ => Err(ValidationError::new("first_letter_uppercase")
            .with_message("First letter must be uppercase".into())),
    }
}

fn price_in_range(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::from(MIN_PRICE) || *price > Decimal::from(MAX_PRICE) {
        return Err(ValidationError::new("price_range")
            .with_message(format!("Price must be between {MIN_PRICE} and {MAX_PRICE}").into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn valid() -> NewProduct {
        NewProduct {
            name: "Coffee".to_string(),
            description: "Ground coffee, 500g".to_string(),
            price: Decimal::new(1990, 2),
            image_url: "coffee.jpg".to_string(),
            stock: 12.0,
            category_id: 1,
        }
    }

    #[test]
    fn test_valid_product() {
        let model = valid().try_into_active_model().unwrap();

        assert!(model.id.is_not_set());
        assert_eq!(model.price, Set(Decimal::new(1990, 2)));
        assert_eq!(model.category_id, Set(1));
    }

    #[test]
    fn test_lowercase_name_rejected() {
        let product = NewProduct {
            name: "coffee".to_string(),
            ..valid()
        };
        assert!(matches!(
            product.try_into_active_model(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_price_bounds() {
        let cheap = NewProduct {
            price: Decimal::new(99, 2),
            ..valid()
        };
        let dear = NewProduct {
            price: Decimal::from(10_001),
            ..valid()
        };
        let edge = NewProduct {
            price: Decimal::from(MAX_PRICE),
            ..valid()
        };

        assert!(cheap.validate().is_err());
        assert!(dear.validate().is_err());
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let product = NewProduct {
            stock: -1.0,
            ..valid()
        };
        assert!(product.validate().is_err());
    }
}

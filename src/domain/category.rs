//! Category input accepted by the catalog.

use sea_orm::{ActiveValue::NotSet, Set};
use validator::Validate;

use crate::errors::AppResult;
use crate::infra::repositories::entities::category;

/// Fields of a category about to be created.
///
/// The store assigns the id.
#[derive(Debug, Clone, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 80, message = "Name must be 1 to 80 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 300, message = "Image URL must be 1 to 300 characters"))]
    pub image_url: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
        }
    }

    /// Validate, then build the active model to stage with `add`.
    pub fn try_into_active_model(self) -> AppResult<category::ActiveModel> {
        self.validate()?;

        Ok(category::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            image_url: Set(self.image_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_valid_category_leaves_id_to_store() {
        let model = NewCategory::new("Drinks", "drinks.jpg")
            .try_into_active_model()
            .unwrap();

        assert!(model.id.is_not_set());
        assert_eq!(model.name, Set("Drinks".to_string()));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = NewCategory::new("", "drinks.jpg").try_into_active_model();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let result = NewCategory::new("x".repeat(81), "drinks.jpg").try_into_active_model();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

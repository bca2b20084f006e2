use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salad,
    Pizza,
    Soup,
    Dessert,
    Drinks,
    Popular,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Salad,
        Category::Pizza,
        Category::Soup,
        Category::Dessert,
        Category::Drinks,
        Category::Popular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salad => "salad",
            Category::Pizza => "pizza",
            Category::Soup => "soup",
            Category::Dessert => "dessert",
            Category::Drinks => "drinks",
            Category::Popular => "popular",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Salad => "Salad",
            Category::Pizza => "Pizza",
            Category::Soup => "Soup",
            Category::Dessert => "Dessert",
            Category::Drinks => "Drinks",
            Category::Popular => "Popular",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
}

/// Raw values of the add-menu form, exactly as the admin typed them.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct MenuForm {
    #[validate(length(min = 1, message = "Recipe name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[validate(custom(function = "validate_price"))]
    pub price: String,
    #[validate(length(min = 1, message = "Recipe details are required"))]
    pub recipe: String,
    #[validate(required(message = "Image is required"))]
    pub image: Option<ImageFile>,
}

/// The form as it is re-rendered to the client. The image never goes back.
#[derive(Debug, Clone, Serialize)]
pub struct MenuFormView {
    pub name: String,
    pub category: String,
    pub price: String,
    pub recipe: String,
    pub has_image: bool,
}

impl From<&MenuForm> for MenuFormView {
    fn from(form: &MenuForm) -> Self {
        Self {
            name: form.name.clone(),
            category: form.category.clone(),
            price: form.price.clone(),
            recipe: form.recipe.clone(),
            has_image: form.image.is_some(),
        }
    }
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Category is required".into());
        return Err(error);
    }
    value.parse::<Category>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("category");
        error.message = Some("Select a category".into());
        error
    })
}

fn validate_price(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Price is required".into());
        return Err(error);
    }
    parse_price(value).map(|_| ()).ok_or_else(|| {
        let mut error = ValidationError::new("price");
        error.message = Some("Price must be a number".into());
        error
    })
}

pub fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostedImage {
    pub success: bool,
    #[serde(default)]
    pub data: Option<HostedImageData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostedImageData {
    pub display_url: String,
}

impl HostedImage {
    /// The hosted URL, only when the host reported success.
    pub fn display_url(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.data
            .as_ref()
            .map(|d| d.display_url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub recipe: String,
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageFile {
        ImageFile {
            file_name: "pie.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn form() -> MenuForm {
        MenuForm {
            name: "Margherita".to_string(),
            category: "pizza".to_string(),
            price: "9.99".to_string(),
            recipe: "Tomato, mozzarella, basil".to_string(),
            image: Some(image()),
        }
    }

    #[test]
    fn complete_form_passes_validation() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = MenuForm::default().validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "category", "price", "recipe", "image"] {
            assert!(fields.keys().any(|k| k.to_string() == field), "missing {field}");
        }
    }

    #[test]
    fn missing_image_is_reported_with_its_message() {
        let mut f = form();
        f.image = None;
        let errors = f.validate().unwrap_err();
        let messages = crate::error::field_messages(&errors);
        assert_eq!(messages["image"][0], "Image is required");
        assert!(messages.get("name").is_none());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut f = form();
        f.category = "default".to_string();
        assert!(f.validate().is_err());
    }

    #[test]
    fn price_must_parse_completely() {
        assert_eq!(parse_price("12.50"), Some(12.5));
        assert_eq!(parse_price(" 7 "), Some(7.0));
        assert_eq!(parse_price("12abc"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
    }

    #[test]
    fn category_round_trips_through_its_name() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!(
            serde_json::to_value(Category::Drinks).unwrap(),
            serde_json::json!("drinks")
        );
    }

    #[test]
    fn failed_host_response_has_no_url() {
        let hosted: HostedImage = serde_json::from_str(
            r#"{"success":false,"data":{"display_url":"https://i.ibb.co/x.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(hosted.display_url(), None);

        let hosted: HostedImage =
            serde_json::from_str(r#"{"success":true,"data":{"display_url":"https://i.ibb.co/x.jpg"}}"#)
                .unwrap();
        assert_eq!(hosted.display_url(), Some("https://i.ibb.co/x.jpg"));
    }
}

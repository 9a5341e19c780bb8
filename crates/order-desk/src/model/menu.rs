use crate::menu_actor::MenuError;
use crate::model::Loose;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<MenuItemId> for u32 {
    fn from(id: MenuItemId) -> Self {
        id.0
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dish on the menu.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl ActorEntity for MenuItem`](#impl-ActorEntity-for-MenuItem) for details on:
/// - Creation and update parameters ([`MenuItemInput`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Menu fields as posted by the admin app. Used for both creation and partial updates:
/// absent fields are left alone on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Loose>,
    pub image: Option<String>,
}

impl MenuItemInput {
    pub fn named(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(Loose::Number(price)),
            ..Self::default()
        }
    }
}

impl MenuItem {
    /// Builds a new item, rejecting a blank name or a negative price.
    pub fn from_input(id: MenuItemId, input: MenuItemInput) -> Result<Self, MenuError> {
        let mut item = Self {
            id,
            name: String::new(),
            description: String::new(),
            price: 0.0,
            image: None,
        };
        item.apply(input)?;
        check_name(&item.name)?;
        Ok(item)
    }

    /// Merges the present fields of `input` into this item.
    ///
    /// Everything is validated before anything is written, so a rejected input leaves the
    /// item unchanged.
    pub fn apply(&mut self, input: MenuItemInput) -> Result<(), MenuError> {
        if let Some(name) = &input.name {
            check_name(name)?;
        }
        let price = input.price.as_ref().map(coerce_price).transpose()?;

        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(image) = input.image {
            self.image = Some(image.trim().to_string()).filter(|s| !s.is_empty());
        }
        Ok(())
    }
}

fn check_name(name: &str) -> Result<(), MenuError> {
    if name.trim().is_empty() {
        return Err(MenuError::validation("name", "is required"));
    }
    Ok(())
}

/// Anything that is not a number coerces to 0; negatives are refused.
fn coerce_price(raw: &Loose) -> Result<f64, MenuError> {
    let price = raw.number().unwrap_or(0.0);
    if price < 0.0 {
        return Err(MenuError::validation("price", "must not be negative"));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_coerces_non_numeric_price() {
        let input = MenuItemInput {
            price: Some(Loose::from("abc")),
            ..MenuItemInput::named("Filter Coffee", 0.0)
        };
        let item = MenuItem::from_input(MenuItemId(1), input).unwrap();
        assert_eq!(item.price, 0.0);
        assert_eq!(item.description, "");
        assert_eq!(item.image, None);
    }

    #[test]
    fn create_accepts_numeric_string_price() {
        let input = MenuItemInput {
            price: Some(Loose::from("45.50")),
            ..MenuItemInput::named("Vada", 0.0)
        };
        assert_eq!(MenuItem::from_input(MenuItemId(2), input).unwrap().price, 45.5);
    }

    #[test]
    fn create_requires_name() {
        let err =
            MenuItem::from_input(MenuItemId(1), MenuItemInput::named("  ", 10.0)).unwrap_err();
        assert!(matches!(err, MenuError::Validation { field: "name", .. }));
    }

    #[test]
    fn negative_price_rejected_without_partial_write() {
        let mut item =
            MenuItem::from_input(MenuItemId(1), MenuItemInput::named("Tea", 20.0)).unwrap();
        let err = item
            .apply(MenuItemInput {
                description: Some("masala".into()),
                price: Some(Loose::Number(-1.0)),
                ..MenuItemInput::default()
            })
            .unwrap_err();
        assert!(matches!(err, MenuError::Validation { field: "price", .. }));
        assert_eq!(item.description, "");
        assert_eq!(item.price, 20.0);
    }

    #[test]
    fn blank_image_clears_it() {
        let mut item = MenuItem::from_input(
            MenuItemId(1),
            MenuItemInput {
                image: Some("https://example.com/tea.jpg".into()),
                ..MenuItemInput::named("Tea", 20.0)
            },
        )
        .unwrap();
        assert!(item.image.is_some());

        item.apply(MenuItemInput {
            image: Some(String::new()),
            ..MenuItemInput::default()
        })
        .unwrap();
        assert_eq!(item.image, None);
    }
}

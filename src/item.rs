use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// A stored item, as it lives in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub quantity: i64,
}

/// Schema violation raised before anything reaches the collection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Item validation failed: {0}")]
pub struct SchemaError(String);

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<ValidationErrors> for SchemaError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, err.code),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        fields.sort();
        SchemaError(fields.join(", "))
    }
}

/// Candidate item submitted for insertion
///
/// Both fields are optional at the type level so that a missing field is
/// reported as a schema violation rather than a body parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewItem {
    #[validate(
        required(message = "name is required"),
        length(min = 3, message = "name must be at least 3 characters long")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "quantity is required"),
        range(min = 1, message = "quantity must be at least 1")
    )]
    pub quantity: Option<i64>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: Some(name.into()),
            quantity: Some(quantity),
        }
    }

    /// Validate and assign a fresh id
    pub fn into_item(self) -> Result<Item, SchemaError> {
        self.validate()?;

        let (Some(name), Some(quantity)) = (self.name, self.quantity) else {
            return Err(SchemaError::new("name and quantity are required"));
        };

        Ok(Item {
            id: ObjectId::new(),
            name,
            quantity,
        })
    }
}

/// Partial update: only the supplied fields are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItemPatch {
    #[validate(length(min = 3, message = "name must be at least 3 characters long"))]
    pub name: Option<String>,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: Option<i64>,
}

impl ItemPatch {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            name: None,
            quantity: Some(quantity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none()
    }

    pub fn check(&self) -> Result<(), SchemaError> {
        self.validate().map_err(SchemaError::from)
    }

    /// Merge into an existing item. Returns whether anything changed.
    pub fn apply(&self, item: &mut Item) -> bool {
        let mut changed = false;
        if let Some(name) = &self.name {
            changed |= item.name != *name;
            item.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            changed |= item.quantity != quantity;
            item.quantity = quantity;
        }
        changed
    }
}

/// Fixed batch inserted by the bulk endpoint
pub fn demo_batch() -> Vec<NewItem> {
    [
        ("Apple", 10),
        ("Banana", 20),
        ("Orange", 15),
        ("Mango", 8),
        ("Grapes", 25),
        ("Pineapple", 5),
        ("Strawberry", 30),
        ("Blueberry", 12),
        ("Watermelon", 3),
        ("Peach", 18),
    ]
    .into_iter()
    .map(|(name, quantity)| NewItem::new(name, quantity))
    .collect()
}

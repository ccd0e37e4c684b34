use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelflife_calendar::JalaliDate;
use shelflife_core::{DomainError, DomainResult, Entity, ItemId, ValueObject};

/// Name of a food item.
///
/// Unique across the inventory (case-sensitive, exact match) and used as the
/// key by every mutating operation. Stored exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ValueObject for ItemName {}

impl ItemName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

/// A tracked food entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    id: ItemId,
    name: ItemName,
    expiry_date: JalaliDate,
}

impl FoodItem {
    pub fn new(id: ItemId, name: ItemName, expiry_date: JalaliDate) -> Self {
        Self {
            id,
            name,
            expiry_date,
        }
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn expiry_date(&self) -> JalaliDate {
        self.expiry_date
    }

    pub fn expiry_gregorian(&self) -> NaiveDate {
        self.expiry_date.to_gregorian()
    }

    pub fn set_name(&mut self, name: ItemName) {
        self.name = name;
    }

    pub fn set_expiry_date(&mut self, expiry_date: JalaliDate) {
        self.expiry_date = expiry_date;
    }
}

impl Entity for FoodItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn parse_expiry(raw: &str) -> DomainResult<JalaliDate> {
    if raw.trim().is_empty() {
        return Err(DomainError::validation("expiry date cannot be empty"));
    }
    Ok(raw.parse::<JalaliDate>()?)
}

/// Input: add a new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub name: ItemName,
    pub expiry_date: JalaliDate,
}

impl AddItem {
    /// Validate raw user input before it reaches the store.
    pub fn parse(name: &str, expiry_date: &str) -> DomainResult<Self> {
        Ok(Self {
            name: ItemName::new(name)?,
            expiry_date: parse_expiry(expiry_date)?,
        })
    }
}

/// Input: rename the item currently called `current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameItem {
    pub current: ItemName,
    pub new_name: ItemName,
}

impl RenameItem {
    pub fn parse(current: &str, new_name: &str) -> DomainResult<Self> {
        let current = ItemName::new(current)?;
        let new_name = ItemName::new(new_name)
            .map_err(|_| DomainError::validation("new name cannot be empty"))?;
        Ok(Self { current, new_name })
    }
}

/// Input: replace the expiry date of the item called `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateExpiry {
    pub name: ItemName,
    pub expiry_date: JalaliDate,
}

impl UpdateExpiry {
    pub fn parse(name: &str, expiry_date: &str) -> DomainResult<Self> {
        Ok(Self {
            name: ItemName::new(name)?,
            expiry_date: parse_expiry(expiry_date)?,
        })
    }
}

/// Input: remove the item called `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItem {
    pub name: ItemName,
}

impl DeleteItem {
    pub fn parse(name: &str) -> DomainResult<Self> {
        Ok(Self {
            name: ItemName::new(name)?,
        })
    }
}

//! Ordered item storage owned by exactly one room or character.

use super::Item;
use crate::error::{ErrorSeverity, GameError};

/// The on-use effect an inventory is configured with.
///
/// The engine interprets the handler when the player activates the cursored
/// item; the handler decides where the removed item ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseHandler {
    /// Room floor: the item moves into the player's inventory.
    PickUp,
    /// Player pack: weapons and armor are equipped, potions drunk, keys turned.
    Activate,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    /// Using from an empty inventory. Callers must disable "use" when empty.
    #[error("cannot use an item from an empty inventory")]
    Empty,

    #[error("item '{0}' is not in the inventory")]
    NotFound(String),

    #[error("item '{0}' cannot be used")]
    NotUseable(String),

    #[error("inventory has no on-use handler")]
    NoHandler,
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Empty => ErrorSeverity::Fatal,
            Self::NotFound(_) => ErrorSeverity::Validation,
            Self::NotUseable(_) => ErrorSeverity::Recoverable,
            Self::NoHandler => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "INVENTORY_EMPTY",
            Self::NotFound(_) => "INVENTORY_NOT_FOUND",
            Self::NotUseable(_) => "INVENTORY_NOT_USEABLE",
            Self::NoHandler => "INVENTORY_NO_HANDLER",
        }
    }
}

/// Items in insertion order plus the owner's on-use handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
    handler: Option<UseHandler>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(handler: UseHandler) -> Self {
        Self {
            items: Vec::new(),
            handler: Some(handler),
        }
    }

    pub fn handler(&self) -> Option<UseHandler> {
        self.handler
    }

    pub(crate) fn set_handler(&mut self, handler: Option<UseHandler>) {
        self.handler = handler;
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
    }

    /// Removes the first item equal to `item`.
    pub fn remove(&mut self, item: &Item) -> Result<Item, InventoryError> {
        let index = self
            .items
            .iter()
            .position(|candidate| candidate == item)
            .ok_or_else(|| InventoryError::NotFound(item.name().to_owned()))?;
        Ok(self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps a display cursor onto a valid index. A stale cursor (past the
    /// end after an external removal) falls back to the first item.
    pub fn resolve_cursor(&self, cursor: usize) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else if cursor < self.items.len() {
            Some(cursor)
        } else {
            Some(0)
        }
    }

    /// Removes the cursored item so it can be re-housed by the caller.
    ///
    /// Non-useable items stay where they are.
    pub fn take_current(&mut self, cursor: usize) -> Result<Item, InventoryError> {
        let index = self.resolve_cursor(cursor).ok_or(InventoryError::Empty)?;
        let item = &self.items[index];
        if !item.is_useable() {
            return Err(InventoryError::NotUseable(item.name().to_owned()));
        }
        Ok(self.items.remove(index))
    }

    /// Invokes `on_use` exactly once with the cursored item, which is no
    /// longer in this inventory afterwards.
    pub fn use_current<R>(
        &mut self,
        cursor: usize,
        on_use: impl FnOnce(Item) -> R,
    ) -> Result<R, InventoryError> {
        let item = self.take_current(cursor)?;
        Ok(on_use(item))
    }

    /// Empties the inventory, returning everything it held in order.
    pub fn take_all(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Armor, Key, Potion, Weapon};

    fn stocked() -> Inventory {
        let mut inventory = Inventory::with_handler(UseHandler::Activate);
        inventory.add(Weapon::fixed("Stick", 10).into());
        inventory.add(Armor::new("Shield", 3).into());
        inventory.add(Potion::new("Blood Vial", 20).into());
        inventory
    }

    #[test]
    fn use_invokes_callback_once_and_removes_item() {
        let mut inventory = stocked();
        let mut calls = Vec::new();

        let returned = inventory
            .use_current(1, |item| {
                calls.push(item.clone());
                item.name().len()
            })
            .unwrap();

        assert_eq!(returned, "Shield".len());
        assert_eq!(calls, vec![Item::Armor(Armor::new("Shield", 3))]);
        assert!(!inventory.contains(&Armor::new("Shield", 3).into()));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn stale_cursor_falls_back_to_first_item() {
        let mut inventory = stocked();
        let used = inventory.use_current(42, |item| item).unwrap();
        assert_eq!(used, Weapon::fixed("Stick", 10).into());
    }

    #[test]
    fn empty_use_is_a_fatal_precondition_violation() {
        let mut inventory = Inventory::new();
        let mut called = false;
        let err = inventory.use_current(0, |_| called = true).unwrap_err();
        assert_eq!(err, InventoryError::Empty);
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(!called);
    }

    #[test]
    fn spent_key_is_left_in_place() {
        let mut key = Key::new("Gate Key");
        key.use_key();
        let mut inventory = Inventory::new();
        inventory.add(key.into());

        let err = inventory.use_current(0, |_| ()).unwrap_err();
        assert_eq!(err, InventoryError::NotUseable("Gate Key".into()));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut inventory = Inventory::new();
        let tonic: Item = Potion::new("Tonic", 5).into();
        inventory.add(tonic.clone());
        inventory.add(tonic.clone());

        assert_eq!(inventory.remove(&tonic), Ok(tonic.clone()));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.remove(&tonic), Ok(tonic.clone()));
        assert_eq!(
            inventory.remove(&tonic),
            Err(InventoryError::NotFound("Tonic".into()))
        );
    }

    #[test]
    fn take_all_preserves_order_and_clears() {
        let mut inventory = stocked();
        let names: Vec<String> = inventory
            .take_all()
            .iter()
            .map(|item| item.name().to_owned())
            .collect();
        assert_eq!(names, ["Stick", "Shield", "Blood Vial"]);
        assert!(inventory.is_empty());
    }
}

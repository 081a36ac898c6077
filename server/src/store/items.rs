use tokio::sync::Mutex;

use shared::types::{CreateItemData, Item, UpdateItemData};

/// The one process-wide item collection.
///
/// A single mutex guards the records and the id counter together, so every
/// read-modify-write (including id assignment on create) happens under one
/// lock acquisition. Critical sections hold no I/O and no awaits.
pub struct ItemStore {
    inner: Mutex<ItemsInner>,
}

struct ItemsInner {
    /// Records in insertion order.
    items: Vec<Item>,
    /// Next id to hand out. Monotonically increasing and never reused:
    /// deleting an item does not free its id, so a later create can never
    /// collide with a surviving record.
    next_id: i64,
}

impl ItemStore {
    /// An empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ItemsInner {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// The fixed startup collection: two items with ids 1 and 2.
    pub fn seeded() -> Self {
        let items = vec![
            Item {
                id: 1,
                name: Some("Item1".to_string()),
                description: Some("Description of Item1".to_string()),
            },
            Item {
                id: 2,
                name: Some("Item2".to_string()),
                description: Some("Description of Item2".to_string()),
            },
        ];
        let next_id = items.len() as i64 + 1;

        Self {
            inner: Mutex::new(ItemsInner { items, next_id }),
        }
    }

    /// Every record, in insertion order.
    pub async fn list(&self) -> Vec<Item> {
        self.inner.lock().await.items.clone()
    }

    /// The record with a matching id, if any.
    pub async fn get(&self, item_id: i64) -> Option<Item> {
        self.inner
            .lock()
            .await
            .items
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
    }

    /// Appends a new record and returns it with its assigned id. Never
    /// fails: fields absent from `data` are stored as `None`.
    pub async fn create(&self, data: CreateItemData) -> Item {
        let mut inner = self.inner.lock().await;

        let item = Item {
            id: inner.next_id,
            name: data.name,
            description: data.description,
        };
        inner.next_id += 1;
        inner.items.push(item.clone());

        item
    }

    /// Partial in-place update. Only the fields whose key appeared in the
    /// body change; a key carrying `null` clears the stored value. The id
    /// and the record's position are preserved. `None` when no record
    /// matches.
    pub async fn update(&self, item_id: i64, data: UpdateItemData) -> Option<Item> {
        let mut inner = self.inner.lock().await;
        let item = inner.items.iter_mut().find(|item| item.id == item_id)?;

        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(description) = data.description {
            item.description = description;
        }

        Some(item.clone())
    }

    /// Removes the record with the id. Returns whether anything was
    /// removed; deleting an absent id is a silent no-op.
    pub async fn delete(&self, item_id: i64) -> bool {
        let mut inner = self.inner.lock().await;
        let before = inner.items.len();
        inner.items.retain(|item| item.id != item_id);
        inner.items.len() < before
    }

    pub async fn count(&self) -> usize {
        self.inner.lock().await.items.len()
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

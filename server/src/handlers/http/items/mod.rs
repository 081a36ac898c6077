pub mod items;

// Re-export main handlers
#[allow(unused_imports)]
pub use items::{
    extract_item_id, handle_create_item, handle_delete_item, handle_get_item, handle_list_items,
    handle_update_item,
};

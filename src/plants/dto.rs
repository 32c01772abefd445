use serde::Deserialize;

/// Partial update of a plant. Only `is_in_stock` is writable; any other key
/// in the body is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PlantPatch {
    pub is_in_stock: Option<bool>,
}

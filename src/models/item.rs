use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

/// An inventory record in the `inventory` collection.
///
/// `_id` is assigned by the storage layer on insert and rendered as a hex
/// string in JSON responses. `image` holds the public URL of the uploaded
/// file, or the empty string when no image was supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub quantity: i64,
    #[serde(default)]
    pub image: String,
}

/// Payload for `PUT /api/items/:id`. The image is never updated after
/// creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItem {
    pub name: String,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_item_serializes_id_as_hex_string() {
        let id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let item = Item {
            id,
            name: "Widget".to_string(),
            quantity: 5,
            image: String::new(),
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["_id"], "507f1f77bcf86cd799439011");
        assert_eq!(value["name"], "Widget");
        assert_eq!(value["quantity"], 5);
        assert_eq!(value["image"], "");
    }

    #[test]
    fn test_item_deserializes_from_bson_document() {
        let id = ObjectId::new();
        let document = doc! {
            "_id": id,
            "name": "Gadget",
            "quantity": 3_i64,
            "image": "https://bucket.s3.us-east-1.amazonaws.com/1_gadget.png",
        };

        let item: Item = mongodb::bson::from_document(document).unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.name, "Gadget");
        assert_eq!(item.quantity, 3);
        assert_eq!(
            item.image,
            "https://bucket.s3.us-east-1.amazonaws.com/1_gadget.png"
        );
    }

    #[test]
    fn test_item_image_defaults_to_empty() {
        let document = doc! {
            "_id": ObjectId::new(),
            "name": "Bare",
            "quantity": 0_i64,
        };

        let item: Item = mongodb::bson::from_document(document).unwrap();
        assert_eq!(item.image, "");
    }
}

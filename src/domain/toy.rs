//! The toy record and the request shapes accepted for it.
//!
//! Request bodies are deserialized into permissive `*Request` shapes and then
//! validated into the typed values the store works with (`NewToy`, `ToyPatch`).
//! Nothing reaches the store before validation succeeds.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use utoipa::ToSchema;

/// A stored toy, as returned by the list endpoints.
///
/// Documents written before request validation existed may hold numeric
/// strings or lack attributes, so reads decode leniently (see [`stored`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Toy {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String, example = "6571f0c2a1b2c3d4e5f60718")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "stored::text")]
    pub picture_url: String,
    #[serde(default, deserialize_with = "stored::text")]
    pub name: String,
    #[serde(default, deserialize_with = "stored::text")]
    pub seller_name: String,
    #[serde(default, deserialize_with = "stored::text")]
    pub seller_email: String,
    #[serde(default, deserialize_with = "stored::text")]
    pub sub_category: String,
    #[serde(default, deserialize_with = "stored::number")]
    pub price: f64,
    #[serde(default, deserialize_with = "stored::number")]
    pub rating: f64,
    #[serde(default, deserialize_with = "stored::number")]
    pub available_quantity: f64,
    #[serde(default, deserialize_with = "stored::text")]
    pub detail_description: String,
}

/// Single-item projection served by `GET /toys/:id` (no `subCategory`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToyDetail {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String, example = "6571f0c2a1b2c3d4e5f60718")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "stored::text")]
    pub picture_url: String,
    #[serde(default, deserialize_with = "stored::text")]
    pub name: String,
    #[serde(default, deserialize_with = "stored::text")]
    pub seller_name: String,
    #[serde(default, deserialize_with = "stored::text")]
    pub seller_email: String,
    #[serde(default, deserialize_with = "stored::number")]
    pub price: f64,
    #[serde(default, deserialize_with = "stored::number")]
    pub rating: f64,
    #[serde(default, deserialize_with = "stored::number")]
    pub available_quantity: f64,
    #[serde(default, deserialize_with = "stored::text")]
    pub detail_description: String,
}

/// Lenient decoders for stored attributes. A malformed value in one document
/// must not fail a whole listing: missing or `null` attributes decode to their
/// default, numeric strings are parsed, and anything unusable becomes `0`.
mod stored {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        struct NumberVisitor;

        impl<'de> Visitor<'de> for NumberVisitor {
            type Value = f64;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
                Ok(v as f64)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
                Ok(v as f64)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
                Ok(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
                Ok(v.trim().parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<f64, E> {
                Ok(0.0)
            }

            fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
                Ok(0.0)
            }

            fn visit_none<E: de::Error>(self) -> Result<f64, E> {
                Ok(0.0)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<f64, D::Error> {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = String;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
                Ok(v)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_unit<E: de::Error>(self) -> Result<String, E> {
                Ok(String::new())
            }

            fn visit_none<E: de::Error>(self) -> Result<String, E> {
                Ok(String::new())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}

/// Fields kept by the detail projection, in storage (camelCase) naming.
pub const DETAIL_FIELDS: &[&str] = &[
    "pictureUrl",
    "name",
    "sellerName",
    "sellerEmail",
    "price",
    "rating",
    "availableQuantity",
    "detailDescription",
];

impl From<&Toy> for ToyDetail {
    fn from(toy: &Toy) -> Self {
        Self {
            id: toy.id,
            picture_url: toy.picture_url.clone(),
            name: toy.name.clone(),
            seller_name: toy.seller_name.clone(),
            seller_email: toy.seller_email.clone(),
            price: toy.price,
            rating: toy.rating,
            available_quantity: toy.available_quantity,
            detail_description: toy.detail_description.clone(),
        }
    }
}

/// A validated toy ready for insertion. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewToy {
    pub picture_url: String,
    pub name: String,
    pub seller_name: String,
    pub seller_email: String,
    pub sub_category: String,
    pub price: f64,
    pub rating: f64,
    pub available_quantity: f64,
    pub detail_description: String,
}

impl NewToy {
    pub fn with_id(self, id: ObjectId) -> Toy {
        Toy {
            id,
            picture_url: self.picture_url,
            name: self.name,
            seller_name: self.seller_name,
            seller_email: self.seller_email,
            sub_category: self.sub_category,
            price: self.price,
            rating: self.rating,
            available_quantity: self.available_quantity,
            detail_description: self.detail_description,
        }
    }
}

/// Partial update. Only these three attributes are mutable after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToyPatch {
    pub price: Option<f64>,
    pub available_quantity: Option<f64>,
    pub detail_description: Option<String>,
}

impl ToyPatch {
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.available_quantity.is_none()
            && self.detail_description.is_none()
    }

    /// Applies the patch in place; returns true if any stored value changed.
    pub fn apply_to(&self, toy: &mut Toy) -> bool {
        let mut changed = false;
        if let Some(price) = self.price {
            changed |= toy.price != price;
            toy.price = price;
        }
        if let Some(quantity) = self.available_quantity {
            changed |= toy.available_quantity != quantity;
            toy.available_quantity = quantity;
        }
        if let Some(description) = &self.detail_description {
            changed |= &toy.detail_description != description;
            toy.detail_description = description.clone();
        }
        changed
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Invalid toy payload: `{field}` must be a number")]
    NotANumber { field: &'static str },
    #[error("Invalid toy payload: {0}")]
    Malformed(String),
    #[error("No updatable fields supplied.")]
    NothingToUpdate,
}

/// Body of `POST /toys`. Every attribute is optional here so that a missing
/// field is reported as such instead of as a JSON shape error.
///
/// Numeric attributes accept JSON numbers or numeric strings (`"12.5"`).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateToyRequest {
    pub picture_url: Option<String>,
    pub name: Option<String>,
    pub seller_name: Option<String>,
    pub seller_email: Option<String>,
    pub sub_category: Option<String>,
    #[schema(value_type = f64)]
    pub price: Option<JsonValue>,
    #[schema(value_type = f64)]
    pub rating: Option<JsonValue>,
    #[schema(value_type = f64)]
    pub available_quantity: Option<JsonValue>,
    pub detail_description: Option<String>,
}

impl CreateToyRequest {
    /// Every attribute must be present and truthy: non-empty strings and
    /// non-zero numbers. Wrong JSON types are rejected before presence.
    pub fn validate(self) -> Result<NewToy, ValidationError> {
        let price = coerce_number(self.price.as_ref(), "price")?;
        let rating = coerce_number(self.rating.as_ref(), "rating")?;
        let available_quantity =
            coerce_number(self.available_quantity.as_ref(), "availableQuantity")?;

        Ok(NewToy {
            picture_url: required_text(self.picture_url)?,
            name: required_text(self.name)?,
            seller_name: required_text(self.seller_name)?,
            seller_email: required_text(self.seller_email)?,
            sub_category: required_text(self.sub_category)?,
            price: required_number(price)?,
            rating: required_number(rating)?,
            available_quantity: required_number(available_quantity)?,
            detail_description: required_text(self.detail_description)?,
        })
    }
}

/// Body of `PUT /toys/:id`. Any other field in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateToyRequest {
    #[schema(value_type = Option<f64>)]
    pub price: Option<JsonValue>,
    #[schema(value_type = Option<f64>)]
    pub available_quantity: Option<JsonValue>,
    pub detail_description: Option<String>,
}

impl UpdateToyRequest {
    pub fn into_patch(self) -> Result<ToyPatch, ValidationError> {
        let patch = ToyPatch {
            price: coerce_number(self.price.as_ref(), "price")?,
            available_quantity: coerce_number(
                self.available_quantity.as_ref(),
                "availableQuantity",
            )?,
            detail_description: self.detail_description,
        };
        if patch.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(patch)
    }
}

/// Parses a path segment as a store identifier (24 hex characters).
pub fn parse_toy_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw).ok()
}

fn required_text(value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ValidationError::MissingFields),
    }
}

fn required_number(value: Option<f64>) -> Result<f64, ValidationError> {
    match value {
        Some(n) if n != 0.0 => Ok(n),
        _ => Err(ValidationError::MissingFields),
    }
}

/// `null`, absent and blank strings count as "not supplied".
fn coerce_number(
    value: Option<&JsonValue>,
    field: &'static str,
) -> Result<Option<f64>, ValidationError> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or(ValidationError::NotANumber { field }),
        Some(JsonValue::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or(ValidationError::NotANumber { field })
        }
        Some(_) => Err(ValidationError::NotANumber { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_request() -> CreateToyRequest {
        serde_json::from_value(json!({
            "pictureUrl": "https://img.example.com/robot.png",
            "name": "Robot",
            "sellerName": "Ada",
            "sellerEmail": "seller@example.com",
            "subCategory": "robots",
            "price": 19.99,
            "rating": 4.5,
            "availableQuantity": 3,
            "detailDescription": "A small robot"
        }))
        .unwrap()
    }

    #[test]
    fn complete_request_validates() {
        let toy = full_request().validate().unwrap();
        assert_eq!(toy.name, "Robot");
        assert_eq!(toy.available_quantity, 3.0);
    }

    #[test]
    fn missing_or_falsy_fields_are_rejected() {
        let mut req = full_request();
        req.price = None;
        assert_eq!(req.validate(), Err(ValidationError::MissingFields));

        let mut req = full_request();
        req.name = Some(String::new());
        assert_eq!(req.validate(), Err(ValidationError::MissingFields));

        let mut req = full_request();
        req.available_quantity = Some(json!(0));
        assert_eq!(req.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut req = full_request();
        req.price = Some(json!("12.50"));
        assert_eq!(req.validate().unwrap().price, 12.5);
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let mut req = full_request();
        req.rating = Some(json!("five"));
        assert_eq!(
            req.validate(),
            Err(ValidationError::NotANumber { field: "rating" })
        );

        let mut req = full_request();
        req.price = Some(json!({ "amount": 3 }));
        assert_eq!(
            req.validate(),
            Err(ValidationError::NotANumber { field: "price" })
        );
    }

    #[test]
    fn update_keeps_only_supplied_fields() {
        let req: UpdateToyRequest =
            serde_json::from_value(json!({ "price": 7, "name": "ignored" })).unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.price, Some(7.0));
        assert!(patch.available_quantity.is_none());
        assert!(patch.detail_description.is_none());
    }

    #[test]
    fn empty_update_is_rejected() {
        let req: UpdateToyRequest = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert_eq!(req.into_patch(), Err(ValidationError::NothingToUpdate));
    }

    #[test]
    fn patch_reports_whether_anything_changed() {
        let mut toy = full_request()
            .validate()
            .unwrap()
            .with_id(ObjectId::new());
        let same = ToyPatch {
            price: Some(toy.price),
            ..ToyPatch::default()
        };
        assert!(!same.apply_to(&mut toy));

        let cheaper = ToyPatch {
            price: Some(1.0),
            ..ToyPatch::default()
        };
        assert!(cheaper.apply_to(&mut toy));
        assert_eq!(toy.price, 1.0);
        assert_eq!(toy.name, "Robot");
    }

    #[test]
    fn toy_ids_must_be_24_hex_chars() {
        assert!(parse_toy_id("6571f0c2a1b2c3d4e5f60718").is_some());
        assert!(parse_toy_id("not-an-id").is_none());
        assert!(parse_toy_id("6571f0c2a1b2c3d4e5f6071").is_none());
        assert!(parse_toy_id("zz71f0c2a1b2c3d4e5f60718").is_none());
    }

    #[test]
    fn stored_documents_with_loose_values_still_decode() {
        use mongodb::bson::{doc, from_document};

        let id = ObjectId::parse_str("6571f0c2a1b2c3d4e5f60718").unwrap();
        let document = doc! {
            "_id": id,
            "pictureUrl": "https://img.example.com/kite.png",
            "name": "Kite",
            "sellerName": null,
            "sellerEmail": "seller@example.com",
            "price": "12",
            "rating": "4.5",
            "availableQuantity": 3_i32,
            "detailDescription": "Flies high"
        };

        let toy: Toy = from_document(document.clone()).unwrap();
        assert_eq!(toy.id, id);
        assert_eq!(toy.price, 12.0);
        assert_eq!(toy.rating, 4.5);
        assert_eq!(toy.available_quantity, 3.0);
        assert_eq!(toy.seller_name, "");
        assert_eq!(toy.sub_category, "");

        let detail: ToyDetail = from_document(document).unwrap();
        assert_eq!(detail.price, 12.0);
    }

    #[test]
    fn unparseable_stored_numbers_decode_as_zero() {
        use mongodb::bson::{doc, from_document};

        let toy: Toy = from_document(doc! {
            "_id": ObjectId::new(),
            "name": "Mystery",
            "price": "a lot",
        })
        .unwrap();
        assert_eq!(toy.price, 0.0);
        assert_eq!(toy.detail_description, "");
    }

    #[test]
    fn toy_serializes_id_as_hex() {
        let id = ObjectId::parse_str("6571f0c2a1b2c3d4e5f60718").unwrap();
        let toy = full_request().validate().unwrap().with_id(id);
        let json = serde_json::to_value(&toy).unwrap();
        assert_eq!(json["_id"], "6571f0c2a1b2c3d4e5f60718");
        assert_eq!(json["sellerEmail"], "seller@example.com");
        assert!(json.get("subCategory").is_some());

        let detail = serde_json::to_value(ToyDetail::from(&toy)).unwrap();
        assert!(detail.get("subCategory").is_none());
    }
}

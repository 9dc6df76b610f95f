//! Envelope-aware (de)serialization.
//!
//! The Alfresco v1 REST API nests returned values inside an extra object layer:
//!
//! - singletons: `{"entry": {...}}`
//! - collections: `{"list": {"pagination": {...}, "entries": [...]}}`
//!
//! A type declares which layer it travels in by implementing [`Shape`] with a
//! [`WrapSpec`]. Wrapped structs are usually marked with [`wrapped_shape!`],
//! which layers the envelope around the struct's derived (structural) serde
//! impls. Because the envelope lives in the type's own `Deserialize` impl, any
//! field, `Vec` or `Option` whose declared type is wrapped is unwrapped
//! automatically when the outer value is decoded.
//!
//! The wrapper field must be the first field of its enclosing object and no
//! other field may follow it.
//!
//! [`wrapped_shape!`]: crate::wrapped_shape

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::error::Category;
use serde_json::{Map, Value};
use tracing::debug;

use crate::CodecError;

// ---------------------------------------------------------------------------
// Wrapping metadata
// ---------------------------------------------------------------------------

/// How a shape is enveloped on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapSpec {
    /// Single entity nested under an `entry` field.
    Entry,
    /// Collection nested under a `list` field whose object holds `entries`.
    List,
}

impl WrapSpec {
    /// Name of the wrapper field on the wire.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::List => "list",
        }
    }
}

impl fmt::Display for WrapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A type the envelope codec can decode at the top level.
///
/// Unwrapped shapes only need an empty `impl Shape for X {}`; the defaults
/// delegate to the type's own serde impls. Wrapped shapes override
/// [`Shape::WRAP_SPEC`] and the two structural hooks so that the codec can
/// reach the un-enveloped representation.
pub trait Shape: Serialize + DeserializeOwned {
    /// Wrapping used for this shape, `None` when it travels bare.
    const WRAP_SPEC: Option<WrapSpec> = None;

    /// Name used in error messages.
    fn shape_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Decodes the shape from its un-enveloped JSON representation.
    fn decode_structural<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Self as Deserialize<'de>>::deserialize(deserializer)
    }

    /// Encodes the shape into its un-enveloped JSON representation.
    fn encode_structural<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        <Self as Serialize>::serialize(self, serializer)
    }
}

macro_rules! bare_shapes {
    ($($ty:ty),* $(,)?) => {
        $(impl Shape for $ty {})*
    };
}

bare_shapes!(String, bool, i32, i64, u32, u64, f64, Value);

impl<T: Shape> Shape for Vec<T> {}

impl<T: Shape> Shape for Option<T> {}

/// Marks a struct as enveloped.
///
/// The struct must derive `Serialize` and `Deserialize` with
/// `#[serde(remote = "Self")]`; those derived functions become the structural
/// codec and this macro provides the public serde impls that add or strip the
/// wrapper layer.
///
/// ```ignore
/// #[derive(Debug, Serialize, Deserialize)]
/// #[serde(remote = "Self", rename_all = "camelCase")]
/// pub struct Ticket {
///     pub id: String,
///     pub user_id: String,
/// }
///
/// codec::wrapped_shape!(Ticket => Entry);
/// ```
#[macro_export]
macro_rules! wrapped_shape {
    ($ty:ident => $wrap:ident) => {
        impl $crate::envelope::Shape for $ty {
            const WRAP_SPEC: ::core::option::Option<$crate::envelope::WrapSpec> =
                ::core::option::Option::Some($crate::envelope::WrapSpec::$wrap);

            fn shape_name() -> &'static str {
                ::core::stringify!($ty)
            }

            fn decode_structural<'de, D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $ty::deserialize(deserializer)
            }

            fn encode_structural<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $ty::serialize(self, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $crate::envelope::deserialize_wrapped::<Self, D>(deserializer)
            }
        }

        impl $crate::__private::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::envelope::serialize_wrapped(self, serializer)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Top-level decode / encode
// ---------------------------------------------------------------------------

/// Decodes raw response bytes into `T`.
///
/// The bytes are streamed straight into `T`, so every occurrence of a field
/// is seen, including duplicated wrapper keys that a parsed value tree would
/// collapse. Envelope violations of `T` itself come back as
/// [`CodecError::MissingWrapper`] / [`CodecError::UnexpectedField`].
pub fn decode_slice<T: Shape>(bytes: &[u8]) -> Result<T, CodecError> {
    let shape = T::shape_name();
    let violation = Cell::new(None);
    let mut de = serde_json::Deserializer::from_slice(bytes);

    let decoded = match T::WRAP_SPEC {
        Some(wrap) => de.deserialize_any(EnvelopeVisitor::<T> {
            wrap,
            violation: Some(&violation),
            marker: PhantomData,
        }),
        None => T::decode_structural(&mut de),
    };

    decoded
        .and_then(|value| de.end().map(|()| value))
        .map_err(|source| match violation.take() {
            Some(err) => err,
            None if source.classify() == Category::Data => {
                CodecError::ShapeMismatch { shape, source }
            }
            None => CodecError::Json(source),
        })
}

/// Decodes a parsed JSON value into `T`, stripping the envelope if `T` has one.
///
/// Use [`decode_slice`] for raw bytes: a [`Value`] object keeps only the last
/// of several equally named fields.
pub fn decode<T: Shape>(value: Value) -> Result<T, CodecError> {
    let shape = T::shape_name();
    let inner = match T::WRAP_SPEC {
        Some(wrap) => unwrap_value(value, wrap, shape)?,
        None => value,
    };
    T::decode_structural(inner).map_err(|source| CodecError::ShapeMismatch { shape, source })
}

/// Encodes `value` into a JSON tree, adding one wrapper layer if `T` has one.
pub fn encode<T: Shape>(value: &T) -> Result<Value, CodecError> {
    let shape = T::shape_name();
    let inner = value
        .encode_structural(serde_json::value::Serializer)
        .map_err(|source| CodecError::ShapeMismatch { shape, source })?;

    Ok(match T::WRAP_SPEC {
        Some(wrap) => {
            let mut map = Map::with_capacity(1);
            map.insert(wrap.field_name().to_owned(), inner);
            Value::Object(map)
        }
        None => inner,
    })
}

/// Encodes `value` into a compact JSON byte vector.
pub fn encode_vec<T: Shape>(value: &T) -> Result<Vec<u8>, CodecError> {
    let tree = encode(value)?;
    Ok(serde_json::to_vec(&tree)?)
}

fn unwrap_value(value: Value, wrap: WrapSpec, shape: &'static str) -> Result<Value, CodecError> {
    let Value::Object(map) = value else {
        return Err(CodecError::MissingWrapper { shape, wrap });
    };

    let mut fields = map.into_iter();
    match fields.next() {
        Some((name, inner)) if name == wrap.field_name() => {
            if let Some((field, _)) = fields.next() {
                return Err(CodecError::UnexpectedField { shape, wrap, field });
            }
            debug!(shape, wrapper = wrap.field_name(), "stripped envelope");
            Ok(inner)
        }
        _ => Err(CodecError::MissingWrapper { shape, wrap }),
    }
}

// ---------------------------------------------------------------------------
// Streaming decode / encode used by the serde impls of wrapped shapes
// ---------------------------------------------------------------------------

/// Deserializes `T`, expecting its envelope if `T` declares one.
///
/// This is what the `Deserialize` impl generated by [`wrapped_shape!`] calls,
/// so it runs wherever a wrapped type appears: at the top level, inside a
/// `Vec`, or as a struct field.
///
/// [`wrapped_shape!`]: crate::wrapped_shape
pub fn deserialize_wrapped<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Shape,
    D: Deserializer<'de>,
{
    match T::WRAP_SPEC {
        Some(wrap) => deserializer.deserialize_map(EnvelopeVisitor::<T> {
            wrap,
            violation: None,
            marker: PhantomData,
        }),
        None => T::decode_structural(deserializer),
    }
}

/// Serializes `value`, adding its envelope if `T` declares one.
pub fn serialize_wrapped<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Shape,
    S: Serializer,
{
    match T::WRAP_SPEC {
        Some(wrap) => {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(wrap.field_name(), &StructuralRef(value))?;
            map.end()
        }
        None => value.encode_structural(serializer),
    }
}

struct EnvelopeVisitor<'a, T> {
    wrap: WrapSpec,
    /// Set at the top level to hand the typed violation back to [`decode_slice`].
    violation: Option<&'a Cell<Option<CodecError>>>,
    marker: PhantomData<T>,
}

impl<T: Shape> EnvelopeVisitor<'_, T> {
    fn reject<E: de::Error>(&self, err: CodecError) -> E {
        let reported = E::custom(&err);
        if let Some(slot) = self.violation {
            slot.set(Some(err));
        }
        reported
    }

    fn missing<E: de::Error>(&self) -> E {
        self.reject(CodecError::MissingWrapper {
            shape: T::shape_name(),
            wrap: self.wrap,
        })
    }
}

impl<'de, T: Shape> Visitor<'de> for EnvelopeVisitor<'_, T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "an object wrapping {} in a '{}' property",
            T::shape_name(),
            self.wrap.field_name()
        )
    }

    fn visit_map<A>(self, mut map: A) -> Result<T, A::Error>
    where
        A: MapAccess<'de>,
    {
        let shape = T::shape_name();
        let wrap = self.wrap;

        match map.next_key::<String>()? {
            Some(name) if name == wrap.field_name() => {}
            _ => return Err(self.missing()),
        }

        let value = map.next_value_seed(Structural::<T>(PhantomData))?;

        if let Some(field) = map.next_key::<String>()? {
            return Err(self.reject(CodecError::UnexpectedField { shape, wrap, field }));
        }
        debug!(shape, wrapper = wrap.field_name(), "stripped envelope");
        Ok(value)
    }

    // Only reached through `deserialize_any` at the top level.

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<T, E> {
        Err(self.missing())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<T, E> {
        Err(self.missing())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<T, E> {
        Err(self.missing())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<T, E> {
        Err(self.missing())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<T, E> {
        Err(self.missing())
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Err(self.missing())
    }

    fn visit_seq<A>(self, _: A) -> Result<T, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(self.missing())
    }
}

struct Structural<T>(PhantomData<T>);

impl<'de, T: Shape> DeserializeSeed<'de> for Structural<T> {
    type Value = T;

    fn deserialize<D>(self, deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::decode_structural(deserializer)
    }
}

struct StructuralRef<'a, T>(&'a T);

impl<T: Shape> Serialize for StructuralRef<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.encode_structural(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(remote = "Self", rename_all = "camelCase")]
    struct Ticket {
        id: String,
        user_id: Option<String>,
    }

    crate::wrapped_shape!(Ticket => Entry);

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(remote = "Self")]
    struct TicketList {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pagination: Option<Value>,
        entries: Vec<Ticket>,
    }

    crate::wrapped_shape!(TicketList => List);

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Credentials {
        user_id: String,
        password: String,
    }

    impl Shape for Credentials {}

    fn ticket(id: &str, user: &str) -> Ticket {
        Ticket {
            id: id.to_owned(),
            user_id: Some(user.to_owned()),
        }
    }

    #[test]
    fn wrap_spec_field_names() {
        assert_eq!(WrapSpec::Entry.field_name(), "entry");
        assert_eq!(WrapSpec::List.field_name(), "list");
        assert_eq!(WrapSpec::List.to_string(), "list");
    }

    #[test]
    fn shape_names() {
        assert_eq!(Ticket::shape_name(), "Ticket");
        assert_eq!(TicketList::shape_name(), "TicketList");
        assert!(Credentials::shape_name().ends_with("Credentials"));
    }

    #[test]
    fn entry_is_stripped() {
        let decoded: Ticket =
            decode(json!({"entry": {"id": "1234", "userId": "dummyUser"}})).unwrap();
        assert_eq!(decoded, ticket("1234", "dummyUser"));
    }

    #[test]
    fn bare_entity_without_entry_is_rejected() {
        let err = decode::<Ticket>(json!({"id": "1234", "userId": "dummyUser"})).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingWrapper {
                shape: "Ticket",
                wrap: WrapSpec::Entry
            }
        ));
    }

    #[test]
    fn wrong_wrapper_name_is_rejected() {
        let err = decode::<Ticket>(json!({"notEntry": {"id": "1234"}})).unwrap_err();
        assert!(matches!(err, CodecError::MissingWrapper { .. }));
        assert!(err.to_string().contains("'entry'"));
    }

    #[test]
    fn wrapper_must_come_first() {
        let err = decode::<Ticket>(json!({"extra": 1, "entry": {"id": "1234"}})).unwrap_err();
        assert!(matches!(err, CodecError::MissingWrapper { .. }));
    }

    #[test]
    fn sibling_after_wrapper_is_rejected() {
        let err = decode::<Ticket>(json!({"entry": {"id": "1234"}, "extra": 1})).unwrap_err();
        match err {
            CodecError::UnexpectedField { shape, field, .. } => {
                assert_eq!(shape, "Ticket");
                assert_eq!(field, "extra");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_is_missing_wrapper() {
        let err = decode::<Ticket>(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, CodecError::MissingWrapper { .. }));
        let err = decode::<Ticket>(Value::Null).unwrap_err();
        assert!(matches!(err, CodecError::MissingWrapper { .. }));
    }

    #[test]
    fn malformed_inner_value_is_shape_mismatch() {
        let err = decode::<Ticket>(json!({"entry": {"userId": "dummyUser"}})).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { shape: "Ticket", .. }));
    }

    #[test]
    fn unwrapped_shape_passes_through() {
        let creds = Credentials {
            user_id: "admin".to_owned(),
            password: "secret".to_owned(),
        };
        let value = encode(&creds).unwrap();
        assert_eq!(value, json!({"userId": "admin", "password": "secret"}));
        assert_eq!(decode::<Credentials>(value).unwrap(), creds);
    }

    #[test]
    fn list_entries_are_unwrapped_per_element() {
        let list: TicketList = decode(json!({
            "list": {
                "entries": [
                    {"entry": {"id": "1234", "userId": "dummyUser1"}},
                    {"entry": {"id": "9876", "userId": "dummyUser2"}}
                ]
            }
        }))
        .unwrap();
        assert_eq!(
            list.entries,
            vec![ticket("1234", "dummyUser1"), ticket("9876", "dummyUser2")]
        );
        assert_eq!(list.pagination, None);
    }

    #[test]
    fn list_with_zero_entries() {
        let list: TicketList = decode(json!({"list": {"entries": []}})).unwrap();
        assert!(list.entries.is_empty());
    }

    #[test]
    fn list_without_entries_is_shape_mismatch() {
        let err = decode::<TicketList>(json!({"list": {"pagination": {}}})).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { .. }));
    }

    #[test]
    fn list_element_with_sibling_fails_whole_decode() {
        let err = decode::<TicketList>(json!({
            "list": {"entries": [{"entry": {"id": "1"}, "superfluous": "value"}]}
        }))
        .unwrap_err();
        match err {
            CodecError::ShapeMismatch { shape, source } => {
                assert_eq!(shape, "TicketList");
                assert!(source.to_string().contains("superfluous"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn top_level_array_of_entries() {
        let raw = concat!(
            r#"[{"entry":{"id":"1234","userId":"dummyUser1"}},"#,
            r#"{"entry":{"id":"9876","userId":"dummyUser2"}}]"#,
        );
        let tickets: Vec<Ticket> = decode_slice(raw.as_bytes()).unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[1].id, "9876");
    }

    #[test]
    fn encode_adds_single_wrapper_layer() {
        let value = encode(&ticket("1234", "dummyUser")).unwrap();
        assert_eq!(value, json!({"entry": {"id": "1234", "userId": "dummyUser"}}));

        let list = TicketList {
            pagination: None,
            entries: vec![ticket("1", "a")],
        };
        let value = encode(&list).unwrap();
        assert_eq!(
            value,
            json!({"list": {"entries": [{"entry": {"id": "1", "userId": "a"}}]}})
        );
    }

    #[test]
    fn encoded_ticket_decodes_back() {
        let original = ticket("42", "someone");
        let bytes = encode_vec(&original).unwrap();
        assert_eq!(decode_slice::<Ticket>(&bytes).unwrap(), original);
    }

    #[test]
    fn serde_json_round_trip_uses_envelope() {
        let original = ticket("7", "seven");
        let text = serde_json::to_string(&original).unwrap();
        assert_eq!(text, r#"{"entry":{"id":"7","userId":"seven"}}"#);
        let back: Ticket = serde_json::from_str(&text).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn malformed_bytes_are_json_errors() {
        let err = decode_slice::<Ticket>(b"{\"entry\":").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
        assert_eq!(err.shape(), None);

        let err = decode_slice::<Ticket>(br#"{"entry":{"id":"1"}} trailing"#).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn duplicated_wrapper_in_bytes_is_rejected() {
        let err = decode_slice::<Ticket>(br#"{"entry":{"id":"first"},"entry":{"id":"second"}}"#)
            .unwrap_err();
        match err {
            CodecError::UnexpectedField { shape, wrap, field } => {
                assert_eq!(shape, "Ticket");
                assert_eq!(wrap, WrapSpec::Entry);
                assert_eq!(field, "entry");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicated_wrapper_in_list_element_is_rejected() {
        let err = decode_slice::<TicketList>(
            br#"{"list":{"entries":[{"entry":{"id":"1"},"entry":{"id":"2"}}]}}"#,
        )
        .unwrap_err();
        match err {
            CodecError::ShapeMismatch { shape, source } => {
                assert_eq!(shape, "TicketList");
                assert!(source.to_string().contains("extra field entry"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicated_list_wrapper_is_rejected() {
        let err = decode_slice::<TicketList>(br#"{"list":{"entries":[]},"list":{"entries":[]}}"#)
            .unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedField { ref field, .. } if field == "list"));
    }

    #[test]
    fn byte_decode_reports_typed_envelope_errors() {
        let err = decode_slice::<Ticket>(br#"{"extra":1,"entry":{"id":"1"}}"#).unwrap_err();
        assert!(matches!(err, CodecError::MissingWrapper { shape: "Ticket", .. }));

        let err = decode_slice::<Ticket>(br#"{"entry":{"id":"1"},"extra":1}"#).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedField { ref field, .. } if field == "extra"));

        let err = decode_slice::<Ticket>(br#"{"entry":{"userId":"u"}}"#).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { shape: "Ticket", .. }));
    }

    #[test]
    fn byte_decode_of_non_object_is_missing_wrapper() {
        for raw in [&b"[1,2]"[..], b"null", b"\"entry\"", b"42", b"-1", b"1.5", b"true", b"{}"] {
            let err = decode_slice::<Ticket>(raw).unwrap_err();
            assert!(
                matches!(err, CodecError::MissingWrapper { shape: "Ticket", .. }),
                "{}: {err}",
                String::from_utf8_lossy(raw)
            );
        }
    }
}

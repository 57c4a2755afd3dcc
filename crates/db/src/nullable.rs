//! Value-or-NULL wrapper for optional columns.
//!
//! [`NullableDataType`] is what every nullable column of a Model decodes
//! into. It converts to and from SQL NULL through sqlx, and its JSON form
//! keeps the validity flag next to the payload:
//!
//! ```json
//! { "valid": true,  "data": 42 }
//! { "valid": false, "data": null }
//! ```

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type, ValueRef};

/// A column value paired with a validity flag. Invalid means SQL NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullableDataType<T>(Option<T>);

impl<T> NullableDataType<T> {
    /// A valid (non-NULL) value.
    pub const fn new(value: T) -> Self {
        Self(Some(value))
    }

    /// An invalid value, stored as SQL NULL.
    pub const fn null() -> Self {
        Self(None)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// The payload, present only when valid.
    pub fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for NullableDataType<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Option<T>> for NullableDataType<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<T> for NullableDataType<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

impl<T: Serialize> Serialize for NullableDataType<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NullableDataType", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("data", &self.0)?;
        state.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NullableDataType<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr<U> {
            valid: bool,
            data: Option<U>,
        }

        let repr = Repr::<T>::deserialize(deserializer)?;
        match (repr.valid, repr.data) {
            (true, Some(data)) => Ok(Self::new(data)),
            (true, None) => Err(D::Error::custom("valid nullable value is missing its data")),
            (false, _) => Ok(Self::null()),
        }
    }
}

// ---------------------------------------------------------------------------
// Postgres scan/bind
// ---------------------------------------------------------------------------

impl<T: Type<Postgres>> Type<Postgres> for NullableDataType<T> {
    fn type_info() -> PgTypeInfo {
        T::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        T::compatible(ty)
    }
}

impl<'q, T: Encode<'q, Postgres>> Encode<'q, Postgres> for NullableDataType<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match &self.0 {
            Some(value) => value.encode_by_ref(buf),
            None => Ok(IsNull::Yes),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        self.0.as_ref().and_then(|value| value.produces())
    }

    fn size_hint(&self) -> usize {
        self.0.as_ref().map_or(0, |value| value.size_hint())
    }
}

impl<'r, T: Decode<'r, Postgres>> Decode<'r, Postgres> for NullableDataType<T> {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            Ok(Self::null())
        } else {
            T::decode(value).map(Self::new)
        }
    }
}

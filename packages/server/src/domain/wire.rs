//! Serde helpers for the JSON shape existing clients expect.
//!
//! Optional fields are never omitted: a missing user id is written as `0`
//! and a missing nickname as `""`.

/// `Option<UserId>` written as a plain integer, `0` meaning `None`
pub mod zero_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::UserId;

    pub fn serialize<S: Serializer>(value: &Option<UserId>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(value.map(|id| id.value()).unwrap_or(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<UserId>, D::Error> {
        let raw = u64::deserialize(d)?;
        Ok((raw != 0).then(|| UserId::new(raw)))
    }
}

/// `Option<Nickname>` written as a plain string, `""` meaning `None`
pub mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::Nickname;

    pub fn serialize<S: Serializer>(value: &Option<Nickname>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_ref().map(Nickname::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Nickname>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(Nickname::new(&raw).ok())
    }
}

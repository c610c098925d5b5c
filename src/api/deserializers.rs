use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;

/// Deserialize a field that can be either a single item or a vector of items.
///
/// The wire schema does not distinguish "exactly one" from "a list of one":
/// a pod with a single subpod arrives as one object, not a one-element array.
pub fn single_or_vec<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    struct SingleOrVec<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for SingleOrVec<T>
    where
        T: Deserialize<'de>,
    {
        type Value = Vec<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("single item or array of items")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            // A single object is wrapped into a one-element vector
            let item = T::deserialize(de::value::MapAccessDeserializer::new(map))?;
            Ok(vec![item])
        }
    }

    deserializer.deserialize_any(SingleOrVec(PhantomData))
}

/// Deserialize a comma-joined attribute (`timedout`, `datatypes`) into a list
/// of names. An empty string means "no entries", not a single empty name.
pub fn comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Ok(raw.split(',').map(|name| name.trim().to_string()).collect())
}

/// Deserialize a boolean attribute that may arrive as a native boolean or as
/// the strings `"true"`/`"false"`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Flag(bool),
        Text(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Flag(flag) => Ok(flag),
        BoolOrString::Text(text) => text.parse().map_err(de::Error::custom),
    }
}

/// Deserialize the `error` attribute. On failed queries the server replaces
/// the boolean with an object carrying `code`/`msg`; its presence means true.
pub fn error_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorFlag {
        Flag(bool),
        Text(String),
        Object(serde_json::Map<String, serde_json::Value>),
    }

    match ErrorFlag::deserialize(deserializer)? {
        ErrorFlag::Flag(flag) => Ok(flag),
        ErrorFlag::Text(text) => text.parse().map_err(de::Error::custom),
        ErrorFlag::Object(_) => Ok(true),
    }
}

/// Deserialize a count attribute that may arrive as a number or as its string
/// form.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::Text(text) => text.parse().map_err(de::Error::custom),
    }
}

/// Signed variant of [`lenient_u32`] for position-like attributes.
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::Text(text) => text.parse().map_err(de::Error::custom),
    }
}

/// Deserialize a timing attribute that may arrive as a number or a string.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::Text(text) => text.parse().map_err(de::Error::custom),
    }
}

/// Optional variant of [`lenient_f64`]; combine with `#[serde(default)]`.
pub fn opt_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeNumber {
        Null,
        Number(f64),
        Text(String),
    }

    match MaybeNumber::deserialize(deserializer)? {
        MaybeNumber::Null => Ok(None),
        MaybeNumber::Number(number) => Ok(Some(number)),
        MaybeNumber::Text(text) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Deserialize a `cell` payload, stripping the CDATA wrapper it is shipped in.
pub fn cdata<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(strip_cdata(&raw).to_string())
}

pub fn strip_cdata(raw: &str) -> &str {
    raw.strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .unwrap_or(raw)
}

/// Inverse of [`strip_cdata`], byte-for-byte.
pub fn to_cdata(data: &str) -> String {
    format!("<![CDATA[{data}]]>")
}

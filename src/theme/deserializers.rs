use gpui::{AbsoluteLength, Pixels, SharedString, px, rems};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de::Error};
use smallvec::SmallVec;

use super::ThemeVariant;

pub fn de_string_or_non_empty_list<'de, D>(
    deserializer: D,
) -> Result<SmallVec<[SharedString; 1]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(SharedString),
        Many(SmallVec<[SharedString; 1]>),
    }

    let value = StringOrVec::deserialize(deserializer)?;

    match value {
        StringOrVec::One(string) => Ok(SmallVec::from_buf([string])),
        StringOrVec::Many(vec) => {
            if vec.len() == 0 {
                return Err(D::Error::custom("list can't be empty."));
            }

            Ok(vec)
        }
    }
}

pub fn de_variants<'de, D>(deserializer: D) -> Result<SmallVec<[ThemeVariant; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SmallVec::deserialize(deserializer)?;

    if value.len() == 0 {
        return Err(D::Error::custom(
            "at least one theme variant needs to be provided.",
        ));
    }

    Ok(value)
}

pub fn de_pixels<'de, D>(deserializer: D) -> Result<Pixels, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::String(string) => {
            let string = match string.strip_suffix("px") {
                Some(string) => string,
                None => return Err(D::Error::custom("expected string to end with 'px'")),
            };

            match string.parse::<f32>() {
                Ok(pixels) => Ok(px(pixels)),
                Err(_) => Err(D::Error::custom("could not convert string into pixels")),
            }
        }

        StringOrFloat::Float(pixels) => Ok(px(pixels)),
    }
}

pub fn de_abs_length<'de, D>(deserializer: D) -> Result<AbsoluteLength, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match StringOrFloat::deserialize(deserializer)? {
        StringOrFloat::Float(num) => return Ok(AbsoluteLength::Pixels(px(num))),

        StringOrFloat::String(string) => {
            if let Some(string) = string.strip_suffix("rem")
                && let Ok(value) = string.parse::<f32>()
            {
                return Ok(AbsoluteLength::Rems(rems(value)));
            } else if let Some(string) = string.strip_suffix("px")
                && let Ok(value) = string.parse::<f32>()
            {
                return Ok(AbsoluteLength::Pixels(px(value)));
            }
        }
    }

    Err(serde::de::Error::custom(
        "expected f32 or string containing a f32 ending with 'rem' or 'px'",
    ))
}

/// Deserializes the spacing scale, a map of numeric step keys to pixel values.
pub fn de_spacing<'de, D>(deserializer: D) -> Result<IndexMap<u8, Pixels>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Px(#[serde(deserialize_with = "de_pixels")] Pixels);

    let map = IndexMap::<u8, Px>::deserialize(deserializer)?;

    Ok(map.into_iter().map(|(step, value)| (step, value.0)).collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrFloat {
    String(String),
    Float(f32),
}

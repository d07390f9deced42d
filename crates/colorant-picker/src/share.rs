//! Share links.
//!
//! A palette is shared as a small JSON payload, `{ "p": ..., "s": [a, b], "pt": pattern }`,
//! compressed with LZ-String's URI-safe encoding and appended to [`SHARE_BASE_URL`], so links
//! open on the web picker too. `p` is either a catalog dye id or an inline custom color, so
//! palettes built on a custom color can be opened by someone who never defined it.

use colorant_harmony::{Catalog, Dye, HarmonyPattern, Palette, Rgb255};
use indoc::formatdoc;
use serde::{Deserialize, Serialize};

use crate::color_input::MAX_COLOR_NAME_LENGTH;
use crate::lz_string::{compress_to_encoded_uri_component, decompress_from_encoded_uri_component};
use crate::{Error, Result};

pub const SHARE_BASE_URL: &str = "https://colorant-picker.pl4rd.com/share";

pub const MAX_PAYLOAD_LENGTH: usize = 2048;
pub const MAX_JSON_LENGTH: usize = 10000;
pub const MAX_DYE_ID_LENGTH: usize = 100;
pub const MAX_PATTERN_LENGTH: usize = 50;

/// Query parameters the web picker reads payloads from.
const PAYLOAD_PARAMS: [&str; 2] = ["palette", "custom-palette"];

/// Ids of custom primaries restored from a link are this plus the hex digits.
const SHARED_CUSTOM_ID_PREFIX: &str = "shared-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharedKind {
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SharedPrimary {
    Id(String),
    Custom {
        #[serde(rename = "type")]
        kind: SharedKind,
        name: String,
        rgb: Rgb255,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    pub p: SharedPrimary,
    pub s: [String; 2],
    pub pt: String,
}

impl SharePayload {
    pub fn from_palette(palette: &Palette) -> Self {
        let primary = &palette.primary;
        let p = if primary.is_custom() {
            SharedPrimary::Custom {
                kind: SharedKind::Custom,
                name: primary.name.clone(),
                rgb: primary.rgb255(),
            }
        } else {
            SharedPrimary::Id(primary.id.clone())
        };

        SharePayload {
            p,
            s: [palette.suggested[0].id.clone(), palette.suggested[1].id.clone()],
            pt: palette.pattern.as_str().to_owned(),
        }
    }

    fn validate(&self) -> Result<()> {
        match &self.p {
            SharedPrimary::Id(id) => check_length("primary dye id", id, MAX_DYE_ID_LENGTH)?,
            SharedPrimary::Custom { name, .. } => {
                check_length("custom color name", name, MAX_COLOR_NAME_LENGTH)?
            }
        }

        for id in &self.s {
            check_length("suggested dye id", id, MAX_DYE_ID_LENGTH)?;
        }

        check_length("pattern", &self.pt, MAX_PATTERN_LENGTH)?;
        self.pattern()?;

        Ok(())
    }

    pub fn pattern(&self) -> Result<HarmonyPattern> {
        self.pt
            .parse()
            .map_err(|_| Error::InvalidShare(format!("unknown pattern `{}`", self.pt)))
    }
}

fn check_length(what: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();

    if length == 0 || length > max {
        return Err(Error::InvalidShare(format!(
            "{} must be between 1 and {} characters",
            what, max
        )));
    }

    Ok(())
}

pub fn encode(payload: &SharePayload) -> Result<String> {
    let json = serde_json::to_string(payload)?;
    Ok(compress_to_encoded_uri_component(&json))
}

pub fn share_url(palette: &Palette) -> Result<String> {
    let encoded = encode(&SharePayload::from_palette(palette))?;
    Ok(format!("{}/{}", SHARE_BASE_URL, encoded))
}

/// Decodes and validates an encoded payload.
pub fn decode(encoded: &str) -> Result<SharePayload> {
    if encoded.is_empty() || encoded.chars().count() > MAX_PAYLOAD_LENGTH {
        return Err(Error::InvalidShare(format!(
            "payload must be between 1 and {} characters",
            MAX_PAYLOAD_LENGTH
        )));
    }

    let json = decompress_from_encoded_uri_component(encoded)
        .filter(|json| !json.is_empty())
        .ok_or_else(|| Error::InvalidShare("payload could not be decompressed".to_owned()))?;

    if json.encode_utf16().count() > MAX_JSON_LENGTH {
        return Err(Error::InvalidShare("payload is too large".to_owned()));
    }

    let payload: SharePayload =
        serde_json::from_str(&json).map_err(|e| Error::InvalidShare(e.to_string()))?;
    payload.validate()?;

    Ok(payload)
}

/// Accepts a share link, a link carrying a `palette` or `custom-palette` query parameter, or a
/// bare payload.
pub fn payload_from_link(link: &str) -> Result<SharePayload> {
    let link = link.trim();

    if let Some((_, query)) = link.split_once('?') {
        let param = query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            PAYLOAD_PARAMS.contains(&key).then_some(value)
        });

        if let Some(encoded) = param {
            return decode(encoded);
        }
    }

    let link = link.trim_end_matches('/');
    let encoded = link.rsplit('/').next().unwrap_or(link);

    decode(encoded)
}

/// Resolves the payload's dye ids against `catalog`.
pub fn restore(payload: &SharePayload, catalog: &Catalog) -> Result<Palette> {
    let lookup = |id: &str| {
        catalog
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownDye(id.to_owned()))
    };

    let primary = match &payload.p {
        SharedPrimary::Id(id) => lookup(id)?,
        SharedPrimary::Custom { name, rgb, .. } => {
            let hex = colorant_harmony::color::to_hex(rgb.to_srgb());
            let id = format!("{}{}", SHARED_CUSTOM_ID_PREFIX, hex.trim_start_matches('#'));
            Dye::custom(&id, name.clone(), rgb.to_srgb())
        }
    };
    let suggested = [lookup(&payload.s[0])?, lookup(&payload.s[1])?];

    Ok(Palette::new(primary, suggested, payload.pattern()?))
}

/// Text for posting a palette alongside its link.
pub fn share_text(palette: &Palette, url: &str) -> String {
    formatdoc! {"
        Main: {main}
        Sub: {sub} / Accent: {accent}
        Pattern: {pattern}

        #ColorantPicker #FFXIV
        {url}",
        main = palette.primary.name,
        sub = palette.sub().dye.name,
        accent = palette.accent().dye.name,
        pattern = palette.pattern.label(),
        url = url,
    }
}

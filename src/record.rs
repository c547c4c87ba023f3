use serde::{Deserialize, Serialize};

use crate::{DirectoryError, Result};

/// A profile row as the data source returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawProfile {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: Option<String>,
}

impl RawProfile {
    pub fn new<I, N>(id: I, name: N) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

/// A user entry as exposed to consumers of the directory.
///
/// The display name is never empty, carries no surrounding whitespace
/// and never ends with an asterisk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub display_name: String,
}

impl UserRecord {
    /// Normalize a raw row.
    ///
    /// Returns `Ok(None)` when nothing usable remains of the name,
    /// and an error when the row carries no name at all.
    pub fn from_raw(raw: RawProfile) -> Result<Option<Self>> {
        let name = raw.name.ok_or_else(|| {
            DirectoryError::Unexpected(format!(
                "profile {} has no name",
                raw.id
            ))
        })?;

        let display_name = normalize_display_name(&name);
        if display_name.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            id: raw.id,
            display_name,
        }))
    }
}

/// Strip the trailing run of `*` markers and surrounding whitespace.
///
/// Whitespace between markers is stripped together with them,
/// so `"Ana * "` becomes `"Ana"` and a second pass changes nothing.
pub fn normalize_display_name(raw: &str) -> String {
    raw.trim_end_matches(|c: char| c == '*' || c.is_whitespace())
        .trim_start()
        .to_string()
}

/// Normalize rows in order, dropping those left without a name.
///
/// A single malformed row fails the whole batch.
pub fn normalize_profiles(rows: Vec<RawProfile>) -> Result<Vec<UserRecord>> {
    let mut records = Vec::with_capacity(rows.len());
    for raw in rows {
        if let Some(record) = UserRecord::from_raw(raw)? {
            records.push(record);
        }
    }
    Ok(records)
}

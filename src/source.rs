use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::record::RawProfile;
use crate::{DirectoryError, Result, NAME_COLUMN, PROFILES_TABLE};

/// Structured error reported by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ErrorDescriptor {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorDescriptor {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(code) = &self.code {
            write!(f, " (code {})", code)?;
        }
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

/// The `{data, error}` envelope every data-source call answers with.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Response<T> {
    pub data: Option<T>,
    pub error: Option<ErrorDescriptor>,
}

impl<T> Response<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ErrorDescriptor) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Unwrap the envelope. A reported error wins over any data;
    /// an envelope with neither is a broken reply.
    pub fn into_result(self) -> Result<T> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(DirectoryError::Source(error)),
            (Some(data), None) => Ok(data),
            (None, None) => Err(DirectoryError::Unexpected(
                "reply carried neither data nor error".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

/// What to read from a table: which columns, in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub order: Option<Order>,
}

impl Query {
    /// Every profile's id and name, sorted by name.
    pub fn profiles() -> Self {
        Self {
            table: PROFILES_TABLE,
            columns: &["id", NAME_COLUMN],
            order: Some(Order {
                column: NAME_COLUMN,
                ascending: true,
            }),
        }
    }

    /// Projection in `a,b,c` form.
    pub fn select_clause(&self) -> String {
        self.columns.join(",")
    }

    /// Ordering in `column.asc` / `column.desc` form.
    pub fn order_clause(&self) -> Option<String> {
        self.order.map(|order| {
            let direction = if order.ascending { "asc" } else { "desc" };
            format!("{}.{}", order.column, direction)
        })
    }
}

/// Read access to the profile table.
///
/// `Err` stands for a call that failed outright (the "thrown" case);
/// a structured failure the store reports comes back inside the envelope.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn select(&self, query: &Query) -> Result<Response<Vec<RawProfile>>>;
}

/// Invocation of named backend actions.
#[async_trait]
pub trait ActionInvoker: Send + Sync {
    async fn invoke(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<Response<serde_json::Value>>;
}

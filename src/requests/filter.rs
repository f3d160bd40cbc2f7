//! Row matching by cell content.

use super::Request;
use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Column of the requests page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Header {
    RequestId,
    Description,
    Requester,
    Status,
    RequestState,
    LastMessage,
}

impl Header {
    pub fn as_str(&self) -> &'static str {
        match self {
            Header::RequestId => "Request ID",
            Header::Description => "Description",
            Header::Requester => "Requester",
            Header::Status => "Status",
            Header::RequestState => "Request State",
            Header::LastMessage => "Last Message",
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Header {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Request ID" => Ok(Header::RequestId),
            "Description" => Ok(Header::Description),
            "Requester" => Ok(Header::Requester),
            "Status" => Ok(Header::Status),
            "Request State" => Ok(Header::RequestState),
            "Last Message" => Ok(Header::LastMessage),
            other => Err(ValidationError::custom(format!(
                "Unknown request column '{}'",
                other
            ))),
        }
    }
}

/// `header: value` pairs a row must match.
///
/// Exact matching compares whole cell text; partial matching accepts a cell
/// that contains the value. A filter without cells matches no row.
///
/// ```rust
/// use console_acceptance::requests::{CellFilter, Header, Request};
///
/// let row = Request::new("svc-rhel7-large", "Administrator");
/// assert!(CellFilter::new().cell(Header::Description, "svc-rhel7-large").matches(&row));
/// assert!(CellFilter::new().cell(Header::Description, "rhel7").partial().matches(&row));
/// assert!(!CellFilter::new().matches(&row));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellFilter {
    cells: Vec<(Header, String)>,
    partial: bool,
}

impl CellFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on a single description, the usual way to find an order's request.
    pub fn description(value: impl Into<String>) -> Self {
        Self::new().cell(Header::Description, value)
    }

    pub fn cell(mut self, header: Header, value: impl Into<String>) -> Self {
        self.cells.push((header, value.into()));
        self
    }

    /// Match by substring instead of whole cell text.
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn cells(&self) -> &[(Header, String)] {
        &self.cells
    }

    pub fn matches(&self, row: &Request) -> bool {
        !self.cells.is_empty()
            && self.cells.iter().all(|(header, value)| {
                let text = row.cell(*header);
                if self.partial {
                    text.contains(value.as_str())
                } else {
                    text == *value
                }
            })
    }
}

impl fmt::Display for CellFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self
            .cells
            .iter()
            .map(|(header, value)| format!("{}={:?}", header, value))
            .collect();
        write!(f, "{{{}}}", cells.join(", "))?;
        if self.partial {
            write!(f, " (partial)")?;
        }
        Ok(())
    }
}

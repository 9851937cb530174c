use crate::errors::ValidationError;
use crate::models::{Lead, LeadFilterQuery, LeadStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LeadStatus),
}

/// Admin-side narrowing of the full lead list.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    status: StatusFilter,
    term: Option<String>,
}

impl LeadFilter {
    pub fn from_query(query: &LeadFilterQuery) -> Result<Self, ValidationError> {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => StatusFilter::All,
            Some(raw) => StatusFilter::Only(
                raw.parse().map_err(|_| ValidationError::UnknownStatus(raw.to_string()))?,
            ),
        };
        let term = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        Ok(Self { status, term })
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        if let StatusFilter::Only(status) = self.status {
            if lead.status != status {
                return false;
            }
        }

        let Some(term) = &self.term else {
            return true;
        };
        [
            Some(lead.client_name.as_str()),
            Some(lead.company_name.as_str()),
            Some(lead.email.as_str()),
            Some(lead.phone.as_str()),
            lead.hunter.name(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term.as_str()))
    }

    pub fn apply(&self, leads: Vec<Lead>) -> Vec<Lead> {
        leads.into_iter().filter(|lead| self.matches(lead)).collect()
    }
}

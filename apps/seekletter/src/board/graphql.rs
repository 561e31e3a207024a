//! The saved-jobs GraphQL operation: request payload and response shape.

use serde::{Deserialize, Serialize};

use crate::models::JobRecord;

pub const SAVED_JOBS_OPERATION: &str = "GetSavedJobs";

pub const SAVED_JOBS_QUERY: &str = r#"
query GetSavedJobs($first: Int, $locale: Locale!, $timezone: Timezone!) {
  viewer {
    id
    savedJobs(first: $first) {
      edges {
        node {
          id
          isActive
          isExternal
          createdAt {
            shortAbsoluteLabel(timezone: $timezone, locale: $locale)
          }
          job {
            id
            title
            location {
              label(locale: $locale, type: SHORT)
            }
            abstract
            createdAt {
              label(context: JOB_POSTED, length: SHORT, timezone: $timezone, locale: $locale)
            }
            advertiser {
              name(locale: $locale)
            }
            salary {
              label
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a> {
    pub operation_name: &'a str,
    pub variables: SavedJobsVariables<'a>,
    pub query: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SavedJobsVariables<'a> {
    pub first: u32,
    pub locale: &'a str,
    pub timezone: &'a str,
}

impl<'a> GraphQlRequest<'a> {
    pub fn saved_jobs(first: u32, locale: &'a str, timezone: &'a str) -> Self {
        Self {
            operation_name: SAVED_JOBS_OPERATION,
            variables: SavedJobsVariables {
                first,
                locale,
                timezone,
            },
            query: SAVED_JOBS_QUERY,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SavedJobsData {
    pub viewer: Option<Viewer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub saved_jobs: Option<SavedJobConnection>,
}

#[derive(Debug, Deserialize)]
pub struct SavedJobConnection {
    #[serde(default)]
    pub edges: Vec<SavedJobEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedJobEdge {
    pub node: SavedJobNode,
}

/// A bookmark wrapping the advertised job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobNode {
    pub id: Option<String>,
    pub is_active: Option<bool>,
    pub is_external: Option<bool>,
    pub job: JobNode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobNode {
    pub id: String,
    pub title: String,
    pub location: Option<Label>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub created_at: Option<Label>,
    pub advertiser: Option<Advertiser>,
    pub salary: Option<Label>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Advertiser {
    pub name: Option<String>,
}

fn label_of(label: &Option<Label>) -> Option<String> {
    label.as_ref().and_then(|l| l.label.clone())
}

impl JobNode {
    pub fn company(&self) -> String {
        self.advertiser
            .as_ref()
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| "Unknown Employer".to_string())
    }

    pub fn location_label(&self) -> Option<String> {
        label_of(&self.location)
    }

    pub fn salary_label(&self) -> Option<String> {
        label_of(&self.salary)
    }

    pub fn posted_label(&self) -> Option<String> {
        label_of(&self.created_at)
    }

    pub fn abstract_text(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or_default()
    }

    /// Combines the listing with its scraped description.
    pub fn into_record(self, description: String) -> JobRecord {
        JobRecord {
            company: self.company(),
            location: self.location_label(),
            salary: self.salary_label(),
            posted: self.posted_label(),
            teaser: self.abstract_text().to_string(),
            id: self.id,
            title: self.title,
            description,
        }
    }
}

//! Organization enrichment and name search endpoints.

use serde::{Deserialize, Serialize};

use om_core::entities::{Candidate, OrganizationRecord};

use crate::api::{HttpDirectoryApi, OrganizationQuery};
use crate::error::DirectoryError;
use crate::http::{check_response, read_json};

#[derive(Deserialize)]
struct EnrichResponse {
    organization: Option<ApiOrganization>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organizations: Vec<ApiOrganization>,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    q_organization_name: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    organization_locations: Vec<&'a str>,
    page: u32,
    per_page: u32,
}

/// Organization as the directory returns it. Lists may arrive as `null`.
#[derive(Deserialize)]
struct ApiOrganization {
    #[serde(default)]
    id: String,
    name: Option<String>,
    primary_domain: Option<String>,
    website_url: Option<String>,
    industry: Option<String>,
    estimated_num_employees: Option<u64>,
    annual_revenue: Option<f64>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    linkedin_url: Option<String>,
    short_description: Option<String>,
    founded_year: Option<i32>,
    keywords: Option<Vec<String>>,
    technology_names: Option<Vec<String>>,
}

impl ApiOrganization {
    fn domain(&self) -> Option<String> {
        self.primary_domain
            .clone()
            .filter(|d| !d.is_empty())
            .or_else(|| self.website_url.as_deref().and_then(domain_from_website))
    }

    fn into_record(self) -> OrganizationRecord {
        let primary_domain = self.domain();
        OrganizationRecord {
            external_id: self.id,
            name: self.name.unwrap_or_default(),
            primary_domain,
            industry: self.industry,
            employee_count: self.estimated_num_employees,
            annual_revenue: self.annual_revenue,
            city: self.city,
            state: self.state,
            country: self.country,
            linkedin_url: self.linkedin_url,
            short_description: self.short_description,
            founded_year: self.founded_year,
            keywords: self.keywords.unwrap_or_default(),
            technologies: self.technology_names.unwrap_or_default(),
        }
        .bounded()
    }

    fn into_candidate(self) -> Candidate {
        let primary_domain = self.domain();
        Candidate {
            external_id: self.id,
            name: self.name.unwrap_or_default(),
            primary_domain,
            industry: self.industry,
            employee_count: self.estimated_num_employees,
            city: self.city,
            state: self.state,
            country: self.country,
            linkedin_url: self.linkedin_url,
            founded_year: self.founded_year,
        }
    }
}

/// Reduce a website URL to its bare host (`https://www.acme.com/about` → `acme.com`).
fn domain_from_website(url: &str) -> Option<String> {
    let rest = url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host = rest.split(['/', '?', '#']).next()?.trim_start_matches("www.");
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

impl HttpDirectoryApi {
    /// `GET organizations/enrich?domain=…`
    pub(crate) async fn enrich_by_domain(
        &self,
        domain: &str,
    ) -> Result<OrganizationRecord, DirectoryError> {
        let url = format!(
            "{}?domain={}",
            self.url("organizations/enrich"),
            urlencoding::encode(domain)
        );
        let resp = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: EnrichResponse = read_json(resp).await?;
        data.organization
            .map(ApiOrganization::into_record)
            .ok_or(DirectoryError::NotFound { status: 200 })
    }

    /// `POST mixed_companies/search`
    pub(crate) async fn search_by_name(
        &self,
        query: &OrganizationQuery<'_>,
    ) -> Result<Vec<Candidate>, DirectoryError> {
        let body = SearchRequest {
            q_organization_name: query.name,
            organization_locations: query.region.into_iter().collect(),
            page: 1,
            per_page: query.per_page,
        };
        let resp = self
            .http
            .post(self.url("mixed_companies/search"))
            .header("X-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: SearchResponse = read_json(resp).await?;
        Ok(data
            .organizations
            .into_iter()
            .map(ApiOrganization::into_candidate)
            .collect())
    }
}

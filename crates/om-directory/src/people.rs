//! Decision-maker search endpoint.

use serde::{Deserialize, Serialize};

use om_core::entities::DecisionMaker;

use crate::api::{HttpDirectoryApi, PeopleQuery};
use crate::error::DirectoryError;
use crate::http::{check_response, read_json};

#[derive(Serialize)]
struct PeopleRequest<'a> {
    organization_ids: [&'a str; 1],
    person_titles: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    person_locations: Vec<&'a str>,
    page: u32,
    per_page: u32,
}

#[derive(Deserialize)]
struct PeopleResponse {
    #[serde(default)]
    people: Vec<ApiPerson>,
}

#[derive(Deserialize)]
struct ApiPerson {
    #[serde(default)]
    id: String,
    name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    title: Option<String>,
    seniority: Option<String>,
    linkedin_url: Option<String>,
    email: Option<String>,
    city: Option<String>,
    country: Option<String>,
}

impl ApiPerson {
    fn into_decision_maker(self) -> DecisionMaker {
        let name = self.name.filter(|n| !n.is_empty()).unwrap_or_else(|| {
            [self.first_name.as_deref(), self.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ")
        });
        DecisionMaker {
            external_id: self.id,
            name,
            title: self.title,
            seniority: self.seniority,
            linkedin_url: self.linkedin_url,
            // Locked addresses come back as placeholders.
            email: self.email.filter(|e| !e.starts_with("email_not_unlocked")),
            city: self.city,
            country: self.country,
        }
    }
}

impl HttpDirectoryApi {
    /// `POST mixed_people/search`
    pub(crate) async fn search_people_at(
        &self,
        query: &PeopleQuery<'_>,
    ) -> Result<Vec<DecisionMaker>, DirectoryError> {
        let body = PeopleRequest {
            organization_ids: [query.organization_id],
            person_titles: query.titles,
            person_locations: query.region.into_iter().collect(),
            page: 1,
            per_page: query.per_page,
        };
        let resp = self
            .http
            .post(self.url("mixed_people/search"))
            .header("X-Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: PeopleResponse = read_json(resp).await?;
        Ok(data
            .people
            .into_iter()
            .map(ApiPerson::into_decision_maker)
            .collect())
    }
}

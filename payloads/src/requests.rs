use crate::{
    Address, BuilderId, CountryId, Logo, MediaAttachment, ReferenceId, StateId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The field set a form submits to create or replace a record.
///
/// Implementors report their display name (checked for duplicates) and the
/// required text fields, so that a form can reject a submission before any
/// request is made.
pub trait Draft: Serialize {
    fn display_name(&self) -> &str;

    /// `(label, value)` pairs that must be non-blank.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCountry {
    pub country: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
}

impl Draft for NewCountry {
    fn display_name(&self) -> &str {
        &self.country
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Country name", self.country.as_str()),
            ("Country code", self.country_code.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewState {
    pub state: String,
    #[serde(rename = "stateCode")]
    pub state_code: String,
    #[serde(rename = "countryId")]
    pub country_id: CountryId,
}

impl Draft for NewState {
    fn display_name(&self) -> &str {
        &self.state
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("State name", self.state.as_str()),
            ("State code", self.state_code.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDistrict {
    pub district: String,
    #[serde(rename = "districtCode")]
    pub district_code: String,
    #[serde(rename = "stateId")]
    pub state_id: StateId,
}

impl Draft for NewDistrict {
    fn display_name(&self) -> &str {
        &self.district
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("District name", self.district.as_str()),
            ("District code", self.district_code.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReferenceItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl Draft for NewReferenceItem {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("Name", self.name.as_str())]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBranch {
    pub branch_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_content_type: Option<String>,
}

impl NewBranch {
    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo.data);
        self.logo_content_type = Some(logo.content_type);
        self
    }
}

impl Draft for NewBranch {
    fn display_name(&self) -> &str {
        &self.branch_name
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("Branch name", self.branch_name.as_str())]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBuilder {
    pub name: String,
    pub head_office: String,
    #[serde(rename = "websiteURL")]
    pub website_url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_content_type: Option<String>,
    pub business_nature_ids: Vec<ReferenceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl NewBuilder {
    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo.data);
        self.logo_content_type = Some(logo.content_type);
        self
    }
}

impl Draft for NewBuilder {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Builder name", self.name.as_str()),
            ("Head office", self.head_office.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub builder_id: BuilderId,
    pub project_name: String,
    pub plc_ids: Vec<ReferenceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rera_authority_id: Option<ReferenceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rera_number: Option<String>,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_unit_id: Option<ReferenceId>,
    pub media: Vec<MediaAttachment>,
}

impl Draft for NewProject {
    fn display_name(&self) -> &str {
        &self.project_name
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("Project name", self.project_name.as_str())]
    }
}

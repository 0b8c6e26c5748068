pub mod api_client;
pub mod requests;
pub mod responses;
pub mod session;

pub use api_client::{APIClient, ClientError};
pub use session::Session;

use base64::Engine;
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A record held in a resource collection.
///
/// The id type keeps collections of different entities from being mixed up
/// and is what mutation endpoints take as their trailing path segment.
pub trait Record: DeserializeOwned + Clone + 'static {
    type Id: Clone + PartialEq + std::fmt::Debug + std::fmt::Display + 'static;

    fn id(&self) -> &Self::Id;

    /// The label shown in tables and dropdowns, and the field checked for
    /// duplicates before submission.
    fn display_name(&self) -> &str;
}

macro_rules! id_type {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug,
                Clone,
                Copy,
                PartialEq,
                Eq,
                Hash,
                PartialOrd,
                Ord,
                Serialize,
                Deserialize,
                Display,
            )]
            #[serde(transparent)]
            pub struct $name(pub i64);
        )*
    };
}

id_type!(
    CountryId,
    StateId,
    DistrictId,
    /// Id of any reference-list item (business nature, room type, ...).
    ReferenceId,
    BranchId,
    BuilderId,
    ProjectId,
    MediaId,
    UserId,
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    #[serde(rename = "country")]
    pub name: String,
    #[serde(rename = "countryCode", default)]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    #[serde(rename = "state")]
    pub name: String,
    #[serde(rename = "stateCode", default)]
    pub code: String,
    #[serde(rename = "countryId")]
    pub country_id: CountryId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: DistrictId,
    #[serde(rename = "district")]
    pub name: String,
    #[serde(rename = "districtCode", default)]
    pub code: String,
    #[serde(rename = "stateId")]
    pub state_id: StateId,
}

/// An entry of one of the flat lookup lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: ReferenceId,
    #[serde(alias = "label")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

/// The independent lookup lists. They share one record shape and differ only
/// in their endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    BusinessNature,
    PropertyNature,
    RoomType,
    ParkingType,
    OwnershipType,
    MeasurementUnit,
    Plc,
    ReraAuthority,
    ShopCategory,
    DocumentName,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 10] = [
        Self::BusinessNature,
        Self::PropertyNature,
        Self::RoomType,
        Self::ParkingType,
        Self::OwnershipType,
        Self::MeasurementUnit,
        Self::Plc,
        Self::ReraAuthority,
        Self::ShopCategory,
        Self::DocumentName,
    ];

    /// First path segment of every endpoint for this list.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::BusinessNature => "businessNature",
            Self::PropertyNature => "propertyNature",
            Self::RoomType => "roomType",
            Self::ParkingType => "parkingType",
            Self::OwnershipType => "ownershipType",
            Self::MeasurementUnit => "measurementUnit",
            Self::Plc => "plc",
            Self::ReraAuthority => "reraAuthority",
            Self::ShopCategory => "shopCategory",
            Self::DocumentName => "documentName",
        }
    }

    /// Singular name used in `save{..}`, `update{..}` and friends.
    pub fn singular(&self) -> &'static str {
        match self {
            Self::BusinessNature => "BusinessNature",
            Self::PropertyNature => "PropertyNature",
            Self::RoomType => "RoomType",
            Self::ParkingType => "ParkingType",
            Self::OwnershipType => "OwnershipType",
            Self::MeasurementUnit => "MeasurementUnit",
            Self::Plc => "Plc",
            Self::ReraAuthority => "ReraAuthority",
            Self::ShopCategory => "ShopCategory",
            Self::DocumentName => "DocumentName",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::BusinessNature => "BusinessNatures",
            Self::PropertyNature => "PropertyNatures",
            Self::RoomType => "RoomTypes",
            Self::ParkingType => "ParkingTypes",
            Self::OwnershipType => "OwnershipTypes",
            Self::MeasurementUnit => "MeasurementUnits",
            Self::Plc => "Plcs",
            Self::ReraAuthority => "ReraAuthorities",
            Self::ShopCategory => "ShopCategories",
            Self::DocumentName => "DocumentNames",
        }
    }

    /// Human readable label for headings and messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BusinessNature => "Business nature",
            Self::PropertyNature => "Property nature",
            Self::RoomType => "Room type",
            Self::ParkingType => "Parking type",
            Self::OwnershipType => "Ownership type",
            Self::MeasurementUnit => "Measurement unit",
            Self::Plc => "PLC",
            Self::ReraAuthority => "RERA authority",
            Self::ShopCategory => "Shop category",
            Self::DocumentName => "Document name",
        }
    }
}

/// Postal address embedded in branches, builders and projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub district_id: Option<DistrictId>,
    pub state_id: Option<StateId>,
    pub country_id: Option<CountryId>,
}

/// An image as it travels on the wire: base64 text plus its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub data: String,
    pub content_type: String,
}

impl Logo {
    pub fn from_bytes(bytes: &[u8], content_type: impl Into<String>) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            content_type: content_type.into(),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(&self.data)
    }

    /// A `data:` URL usable directly as an image source.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: BranchId,
    #[serde(rename = "branchName")]
    pub name: String,
    #[serde(rename = "branchCode", default)]
    pub code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub logo_content_type: Option<String>,
}

impl Branch {
    pub fn logo(&self) -> Option<Logo> {
        logo_from_parts(&self.logo, &self.logo_content_type)
    }
}

/// A builder, also called a realtor in the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    pub id: BuilderId,
    pub name: String,
    #[serde(default)]
    pub head_office: String,
    #[serde(rename = "websiteURL", default)]
    pub website_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub logo_content_type: Option<String>,
    #[serde(default)]
    pub business_nature_ids: Vec<ReferenceId>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl Builder {
    pub fn logo(&self) -> Option<Logo> {
        logo_from_parts(&self.logo, &self.logo_content_type)
    }
}

fn logo_from_parts(
    data: &Option<String>,
    content_type: &Option<String>,
) -> Option<Logo> {
    match (data, content_type) {
        (Some(data), Some(content_type)) if !data.is_empty() => Some(Logo {
            data: data.clone(),
            content_type: content_type.clone(),
        }),
        _ => None,
    }
}

/// A file attached to a project. Either carries its bytes inline or points
/// at a url the server resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MediaId>,
    pub label: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

pub enum MediaSource<'a> {
    Inline(&'a str),
    Remote(&'a str),
    Missing,
}

impl MediaAttachment {
    pub fn inline(
        label: impl Into<String>,
        content_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self {
            id: None,
            label: label.into(),
            content_type: content_type.into(),
            data: Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
            url: None,
        }
    }

    /// Inline data wins over a url when a server echoes both.
    pub fn source(&self) -> MediaSource<'_> {
        match (&self.data, &self.url) {
            (Some(data), _) if !data.is_empty() => MediaSource::Inline(data),
            (_, Some(url)) if !url.is_empty() => MediaSource::Remote(url),
            _ => MediaSource::Missing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub builder_id: BuilderId,
    #[serde(rename = "projectName")]
    pub name: String,
    #[serde(default)]
    pub plc_ids: Vec<ReferenceId>,
    #[serde(default)]
    pub rera_authority_id: Option<ReferenceId>,
    #[serde(default)]
    pub rera_number: Option<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub area: Option<Decimal>,
    #[serde(default)]
    pub measurement_unit_id: Option<ReferenceId>,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
}

impl Record for Country {
    type Id = CountryId;

    fn id(&self) -> &CountryId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for State {
    type Id = StateId;

    fn id(&self) -> &StateId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for District {
    type Id = DistrictId;

    fn id(&self) -> &DistrictId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for ReferenceItem {
    type Id = ReferenceId;

    fn id(&self) -> &ReferenceId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Branch {
    type Id = BranchId;

    fn id(&self) -> &BranchId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Builder {
    type Id = BuilderId;

    fn id(&self) -> &BuilderId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Project {
    type Id = ProjectId;

    fn id(&self) -> &ProjectId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

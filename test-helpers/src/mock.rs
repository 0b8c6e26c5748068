//! Reference data for tests and the dev-server.
//!
//! Two countries with states and districts under them, enough to exercise
//! the cascading selection, plus a pair of business natures.

use crate::MockBackend;
use payloads::{CountryId, DistrictId, ReferenceId, StateId};
use serde_json::json;

pub struct GeographyDataset {
    pub india: CountryId,
    pub usa: CountryId,
    pub maharashtra: StateId,
    pub karnataka: StateId,
    pub california: StateId,
    pub pune: DistrictId,
    pub mumbai: DistrictId,
    pub bengaluru: DistrictId,
    pub los_angeles: DistrictId,
    pub freehold: ReferenceId,
    pub leasehold: ReferenceId,
}

impl GeographyDataset {
    pub fn seed(backend: &MockBackend) -> Self {
        let country = |id: i64, name: &str, code: &str| {
            CountryId(backend.insert(
                "country",
                json!({ "id": id, "country": name, "countryCode": code }),
            ))
        };
        let india = country(1, "India", "+91");
        let usa = country(2, "USA", "+1");

        let state = |id: i64, name: &str, code: &str, country: CountryId| {
            StateId(backend.insert(
                "state",
                json!({
                    "id": id,
                    "state": name,
                    "stateCode": code,
                    "countryId": country,
                }),
            ))
        };
        let maharashtra = state(10, "Maharashtra", "MH", india);
        let karnataka = state(11, "Karnataka", "KA", india);
        let california = state(20, "California", "CA", usa);

        let district = |id: i64, name: &str, code: &str, state: StateId| {
            DistrictId(backend.insert(
                "district",
                json!({
                    "id": id,
                    "district": name,
                    "districtCode": code,
                    "stateId": state,
                }),
            ))
        };
        let pune = district(100, "Pune", "PN", maharashtra);
        let mumbai = district(101, "Mumbai", "MB", maharashtra);
        let bengaluru = district(110, "Bengaluru", "BLR", karnataka);
        let los_angeles = district(200, "Los Angeles", "LA", california);

        let freehold = ReferenceId(backend.insert(
            "businessNature",
            json!({ "id": 500, "name": "Freehold", "code": 1 }),
        ));
        let leasehold = ReferenceId(backend.insert(
            "businessNature",
            json!({ "id": 501, "name": "Leasehold", "code": 2 }),
        ));

        Self {
            india,
            usa,
            maharashtra,
            karnataka,
            california,
            pune,
            mumbai,
            bengaluru,
            los_angeles,
            freehold,
            leasehold,
        }
    }

    pub fn print_summary(&self) {
        tracing::info!("📊 Seeded reference data:");
        tracing::info!(
            "   India ({}) with Maharashtra ({}) and Karnataka ({})",
            self.india,
            self.maharashtra,
            self.karnataka
        );
        tracing::info!(
            "   USA ({}) with California ({})",
            self.usa,
            self.california
        );
        tracing::info!(
            "   Districts: Pune ({}), Mumbai ({}), Bengaluru ({}), Los Angeles ({})",
            self.pune,
            self.mumbai,
            self.bengaluru,
            self.los_angeles
        );
        tracing::info!(
            "   Business natures: Freehold ({}), Leasehold ({})",
            self.freehold,
            self.leasehold
        );
    }
}

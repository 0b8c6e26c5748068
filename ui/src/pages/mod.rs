pub mod countries;
pub mod home;
pub mod locations;

pub use countries::CountriesPage;
pub use home::HomePage;
pub use locations::LocationsPage;

pub mod geography_select;

pub use geography_select::GeographySelect;

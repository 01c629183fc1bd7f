pub mod geofeed;
pub mod validation;

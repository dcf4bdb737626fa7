pub mod geolocation;
pub mod ip_resolver;
pub mod isp_hints;

pub use geolocation::{GeoLocator, IpApiClient};
pub use ip_resolver::resolve_client_ip;
pub use isp_hints::derive_location_hints;

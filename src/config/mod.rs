pub mod api_spec;
pub mod settings;

pub use api_spec::{catalog_from_value, load_catalog, parse_catalog, SpecFormat};
pub use settings::{Connection, ConnectionSettings, Protocol};

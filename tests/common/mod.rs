// Common test utilities shared across test files

use restgate::{config::SpecFormat, domain::ApiCatalog};

/// Specification mirroring the gateway reference fixture
#[allow(dead_code)]
pub const FIXTURE_SPEC: &str = r#"{
    "resources": {
        "resource_name": {
            "get": {
                "query_parameters": {
                    "PARAM1": {"name": "PARAM1", "in": "body", "required": "true", "type": "string"},
                    "PARAM2": {"name": "PARAM2", "in": "body", "required": "true", "type": "integer"},
                    "PARAM3": {"name": "PARAM3", "in": "body", "required": "false", "type": "boolean"}
                },
                "paths": [
                    "/R1/{p1}/",
                    "/R1/{p1}/R2/{p2}/",
                    "/R2/{p2}/R1/{p1}/",
                    "/R1/{p1}/R3/{p3}/R2/{p2}/",
                    "/R1/{p1}/R2/{p2}/R2"
                ],
                "path_parameters": {
                    "/R1/{p1}/": {
                        "p1": {"in": "path", "name": "p1", "required": "true", "type": "string"}
                    },
                    "/R1/{p1}/R2/{p2}/": {
                        "p1": {"in": "path", "name": "p1", "required": "true", "type": "string"},
                        "p2": {"in": "path", "name": "p2", "required": "true", "type": "string"}
                    },
                    "/R2/{p2}/R1/{p1}/": {
                        "p1": {"in": "path", "name": "p1", "required": "true", "type": "string"},
                        "p2": {"in": "path", "name": "p2", "required": "true", "type": "string"}
                    },
                    "/R1/{p1}/R3/{p3}/R2/{p2}/": {
                        "p1": {"in": "path", "name": "p1", "required": "true", "type": "string"},
                        "p2": {"in": "path", "name": "p2", "required": "true", "type": "string"},
                        "p3": {"in": "path", "name": "p3", "required": "true", "type": "string"}
                    },
                    "/R1/{p1}/R2/{p2}/R2": {
                        "p1": {"in": "path", "name": "p1", "required": "true", "type": "string"},
                        "p2": {"in": "path", "name": "p2", "required": "true", "type": "string"}
                    }
                }
            },
            "post": {
                "query_parameters": {
                    "PARAM1": {"in": "body", "required": "true", "type": "string"}
                },
                "path_parameters": {
                    "/R1/{p1}/": {"p1": {"in": "path", "required": "true", "type": "string"}},
                    "/R1/{p1}/R2/": {"p1": {"in": "path", "required": "true", "type": "string"}}
                }
            }
        },
        "zone": {
            "get": {
                "query_parameters": {},
                "path_parameters": {
                    "/zone/{zone}/": {"zone": {"in": "path", "required": "true", "type": "string"}},
                    "/zone/{zone}/zone/": {"zone": {"in": "path", "required": "true", "type": "string"}}
                }
            },
            "post": {
                "query_parameters": {
                    "name": {"in": "body", "required": "true", "type": "string"}
                },
                "path_parameters": {
                    "/zone/{zone}/zone/": {"zone": {"in": "path", "required": "true", "type": "string"}}
                }
            },
            "delete": {
                "path_parameters": {
                    "/zone/{zone}/": {"zone": {"in": "path", "required": "true", "type": "string"}}
                }
            }
        }
    }
}"#;

#[allow(dead_code)]
pub fn fixture_catalog() -> ApiCatalog {
    restgate::config::parse_catalog(FIXTURE_SPEC, SpecFormat::Json).unwrap()
}

#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    use confique::Config;
    use serde::{Deserialize, Serialize};

    #[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct TestSettings {
        /// Help text for foobar.
        pub foobar: String,

        /// Help text for foobar_int.
        pub foobar_int: i64,

        pub foobar_bool: bool,

        /// Help text for foobar_map.
        pub foobar_map: HashMap<String, Vec<String>>,

        /// Help text for foobar_slice.
        pub foobar_slice: Vec<String>,

        /// Database hostname.
        pub foo_parse: String,

        /// Floats have no setting kind.
        pub ratio: f64,

        /// Optionals are skipped.
        pub nickname: Option<String>,

        /// Nested sections are skipped.
        #[config(nested)]
        pub nested: TestNested,
    }

    #[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct TestNested {
        /// Nesting depth.
        pub level: i64,
    }

    impl TestSettings {
        pub fn sample() -> Self {
            TestSettings {
                foobar: "default_value_for_foobar".into(),
                foobar_int: 42,
                foobar_bool: true,
                foobar_map: HashMap::from([
                    ("foo".to_string(), vec!["bar".to_string()]),
                    (
                        "foo1".to_string(),
                        vec!["bar1".to_string(), "bar2".to_string()],
                    ),
                ]),
                foobar_slice: vec!["item1".into(), "item2".into()],
                foo_parse: String::new(),
                ratio: 0.5,
                nickname: None,
                nested: TestNested { level: 1 },
            }
        }
    }

    // -- Fixture for narrow integer fields --------------------------------------

    #[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct PortConfig {
        /// Host to bind.
        pub host: String,

        /// The port number.
        pub port: u16,
    }

    // -- Fixture for fields whose serialized value hides the type ---------------

    #[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct MixedShapes {
        /// Service name.
        pub name: String,

        /// Integer sequence; empty, so it serializes like a string list.
        pub ports: Vec<i64>,

        /// Integer-valued map; empty, so it serializes like a string map.
        pub limits: HashMap<String, u32>,

        /// Optional alias, set.
        pub alias: Option<String>,
    }

    impl MixedShapes {
        pub fn sample() -> Self {
            MixedShapes {
                name: "a".into(),
                ports: Vec::new(),
                limits: HashMap::new(),
                alias: Some("primary".into()),
            }
        }
    }

    #[test]
    fn sample_serializes_to_table() {
        let value = toml::Value::try_from(TestSettings::sample()).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table["foobar_int"].as_integer(), Some(42));
        assert!(table.get("nickname").is_none());
        assert!(table["nested"].is_table());
    }
}

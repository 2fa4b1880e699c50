//! Scenario F: a symbolic import that never resolves to a registered
//! symbol surfaces as `UndefinedReference`, checked before emit conflicts
//! or symbol collisions (`spec.md` §8, §4.8 ordering).

mod common;

use std::path::PathBuf;

use pg_sourcerer::engine::{EngineError, TypeHintRegistry};
use pg_sourcerer::inflect::InflectionConfig;
use pg_sourcerer::{generate, GenerateConfig};

use common::{as_plugin, printer, users_catalog, DanglingRefPlugin};

#[test]
fn a_symbolic_import_with_no_matching_provider_is_undefined_reference() {
	let config = GenerateConfig {
		catalog: users_catalog(),
		plugins: vec![as_plugin(DanglingRefPlugin)],
		schemas: vec!["public".to_string()],
		output_root: PathBuf::from("out"),
		inflection: InflectionConfig::default(),
		type_hints: TypeHintRegistry::new(),
		role: "anon".to_string(),
		precedence: None,
	};

	let err = generate(config, printer).expect_err("a dangling symbolic import must fail validation");
	match err {
		EngineError::UndefinedReference { references } => {
			assert_eq!(references.len(), 1);
			assert_eq!(references[0].capability, "nonexistent");
			assert_eq!(references[0].entity, "Missing");
		}
		other => panic!("expected UndefinedReference, got {other:?}"),
	}
}

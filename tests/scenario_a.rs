//! Scenario A: a single table with one plugin. (`spec.md` §8.)

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use pg_sourcerer::engine::TypeHintRegistry;
use pg_sourcerer::inflect::InflectionConfig;
use pg_sourcerer::{generate, GenerateConfig};

use common::{as_plugin, printer, users_catalog, TypesPlugin};

#[test]
fn single_table_emits_one_file_with_the_expected_row_shape() {
	let config = GenerateConfig {
		catalog: users_catalog(),
		plugins: vec![as_plugin(TypesPlugin)],
		schemas: vec!["public".to_string()],
		output_root: PathBuf::from("out"),
		inflection: InflectionConfig::default(),
		type_hints: TypeHintRegistry::new(),
		role: "anon".to_string(),
		precedence: None,
	};

	let emissions = generate(config, printer).expect("generation succeeds");

	assert_eq!(emissions.len(), 1);
	let content = emissions.get("User.ts").expect("User.ts was emitted");
	assert!(content.contains("id: string;"), "id is NOT NULL so the row shape marks it required: {content}");
	assert!(content.contains("name?: string | null;"), "name is nullable so the row shape marks it optional: {content}");
}

#[test]
fn repeated_generation_is_byte_identical() {
	let run = |plugins: Vec<Arc<dyn pg_sourcerer::engine::Plugin>>| {
		let config = GenerateConfig {
			catalog: users_catalog(),
			plugins,
			schemas: vec!["public".to_string()],
			output_root: PathBuf::from("out"),
			inflection: InflectionConfig::default(),
			type_hints: TypeHintRegistry::new(),
			role: "anon".to_string(),
			precedence: None,
		};
		generate(config, printer).expect("generation succeeds")
	};

	let first = run(vec![as_plugin(TypesPlugin)]);
	let second = run(vec![as_plugin(TypesPlugin)]);
	assert_eq!(first, second, "identical inputs must produce byte-identical output (invariant 1)");
}

//! Scenario B: a second plugin symbolically imports the first plugin's
//! emission across files (`spec.md` §8, §4.3).

mod common;

use std::path::PathBuf;

use pg_sourcerer::engine::TypeHintRegistry;
use pg_sourcerer::inflect::InflectionConfig;
use pg_sourcerer::{generate, GenerateConfig};

use common::{as_plugin, printer, users_catalog, TypesPlugin, ZodPlugin};

#[test]
fn zod_plugin_imports_the_type_the_types_plugin_emitted() {
	let config = GenerateConfig {
		catalog: users_catalog(),
		plugins: vec![as_plugin(TypesPlugin), as_plugin(ZodPlugin)],
		schemas: vec!["public".to_string()],
		output_root: PathBuf::from("out"),
		inflection: InflectionConfig::default(),
		type_hints: TypeHintRegistry::new(),
		role: "anon".to_string(),
		precedence: None,
	};

	let emissions = generate(config, printer).expect("generation succeeds");

	assert!(emissions.contains_key("User.ts"));
	let zod_file = emissions.get("schemas/zod/User.ts").expect("zod file was emitted");
	assert!(zod_file.contains("import type { User } from '../User.js';"), "unexpected zod file contents: {zod_file}");
	assert!(zod_file.contains("export const UserSchema = z.object({});"));
}

#[test]
fn plugin_order_in_the_config_does_not_affect_resolution_order() {
	let run = |plugins| {
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

	let forwards = run(vec![as_plugin(TypesPlugin), as_plugin(ZodPlugin)]);
	let backwards = run(vec![as_plugin(ZodPlugin), as_plugin(TypesPlugin)]);
	assert_eq!(forwards, backwards);
}

//! Resolves the compiled version configuration.
//!
//! Emits exactly one `ndcompat_gate` cfg and writes the declared versions to
//! `$OUT_DIR/build_config.rs`. A build that selects no feature version gets
//! `ndcompat_feature_unset`, which the library turns into a compile error.

use std::path::{Path, PathBuf};
use std::{env, fs};

use ndcompat_abi::{ABI_1, ABI_2_0, API_1_19, API_1_20, API_1_22, API_1_23, API_1_25, API_2_0, AbiVersion, FeatureVersion, GatePath};

const FEATURE_ENV: &str = "NDCOMPAT_FEATURE_VERSION";
const ABI_ENV: &str = "NDCOMPAT_ABI_VERSION";

const FEATURE_LEVELS: &[(&str, FeatureVersion)] = &[
	("CARGO_FEATURE_API_1_19", API_1_19),
	("CARGO_FEATURE_API_1_20", API_1_20),
	("CARGO_FEATURE_API_1_22", API_1_22),
	("CARGO_FEATURE_API_1_23", API_1_23),
	("CARGO_FEATURE_API_1_25", API_1_25),
	("CARGO_FEATURE_API_2_0", API_2_0),
];

fn main() {
	println!("cargo::rustc-check-cfg=cfg(ndcompat_gate, values(\"current\", \"legacy\", \"dual\"))");
	println!("cargo::rustc-check-cfg=cfg(ndcompat_feature_unset)");
	println!("cargo::rerun-if-env-changed={FEATURE_ENV}");
	println!("cargo::rerun-if-env-changed={ABI_ENV}");
	println!("cargo::rerun-if-changed=build.rs");

	let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
	let out_file = out_dir.join("build_config.rs");

	let abi = env_override(ABI_ENV).map(AbiVersion::new).unwrap_or(if env::var_os("CARGO_FEATURE_ABI_2").is_some() { ABI_2_0 } else { ABI_1 });

	let feature = env_override(FEATURE_ENV).map(FeatureVersion::new).or_else(|| {
		FEATURE_LEVELS
			.iter()
			.filter(|(var, _)| env::var_os(var).is_some())
			.map(|(_, level)| *level)
			.max()
	});

	let Some(feature) = feature else {
		println!("cargo::rustc-cfg=ndcompat_feature_unset");
		write_config(&out_file, FeatureVersion::new(0), abi);
		return;
	};

	let abi = ndcompat_abi::declared_abi(feature, abi);
	let gate = GatePath::resolve(feature, abi);
	println!("cargo::rustc-cfg=ndcompat_gate=\"{}\"", gate.cfg_value());
	write_config(&out_file, feature, abi);
}

fn env_override(name: &str) -> Option<u32> {
	let raw = env::var(name).ok()?;
	match ndcompat_abi::parse_raw(&raw) {
		Ok(value) => Some(value),
		Err(e) => panic!("{name}: {e}"),
	}
}

fn write_config(path: &Path, feature: FeatureVersion, abi: AbiVersion) {
	let source = format!(
		"/// Feature version the crate was compiled to target.\n\
		 pub const FEATURE_VERSION: FeatureVersion = FeatureVersion::new(0x{:08x});\n\
		 /// ABI version the crate was compiled to assume.\n\
		 pub const ABI_VERSION: AbiVersion = AbiVersion::new(0x{:08x});\n",
		feature.get(),
		abi.get(),
	);
	fs::write(path, source).expect("failed to write build_config.rs");
}

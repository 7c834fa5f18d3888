use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::version::{ABI_1, API_1_19, API_1_25};

#[rstest]
#[case::native_current(API_2_0, ABI_2_0, GatePath::Current)]
#[case::current_feature_ignores_legacy_abi(API_2_0, ABI_1, GatePath::Current)]
#[case::legacy_build(API_1_19, ABI_1, GatePath::Legacy)]
#[case::flexible_build(API_1_19, ABI_2_0, GatePath::Dual)]
#[case::newest_legacy_feature(API_1_25, ABI_2_0, GatePath::Dual)]
fn resolves_documented_configurations(#[case] feature: FeatureVersion, #[case] abi: AbiVersion, #[case] expected: GatePath) {
	assert_eq!(GatePath::resolve(feature, abi), expected);
}

#[test]
fn only_dual_defers_to_runtime() {
	for path in GatePath::ALL {
		assert_eq!(path.static_generation().is_none(), path.is_dual(), "{path}");
	}
}

#[test]
fn cfg_values_are_distinct() {
	let values = GatePath::ALL.map(GatePath::cfg_value);
	assert_ne!(values[0], values[1]);
	assert_ne!(values[1], values[2]);
	assert_ne!(values[0], values[2]);
}

proptest! {
	#[test]
	fn exactly_one_path_matches(feature in any::<u32>(), abi in any::<u32>()) {
		let feature = FeatureVersion::new(feature);
		let abi = AbiVersion::new(abi);
		let chosen = GatePath::resolve(feature, abi);

		let matches = GatePath::ALL
			.iter()
			.filter(|path| match path {
				GatePath::Current => feature >= API_2_0,
				GatePath::Legacy => feature < API_2_0 && abi < ABI_2_0,
				GatePath::Dual => feature < API_2_0 && abi >= ABI_2_0,
			})
			.collect::<Vec<_>>();

		prop_assert_eq!(matches.len(), 1);
		prop_assert_eq!(*matches[0], chosen);
	}

	#[test]
	fn static_paths_agree_with_feature_classification(feature in any::<u32>(), abi in any::<u32>()) {
		let feature = FeatureVersion::new(feature);
		if let Some(generation) = GatePath::resolve(feature, AbiVersion::new(abi)).static_generation() {
			prop_assert_eq!(Generation::of(feature), generation);
		}
	}
}

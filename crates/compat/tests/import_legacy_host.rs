mod common;

use std::ffi::c_void;
use std::ptr;

use ndcompat::abi::{API_1_25, DescrProto};
use ndcompat::{BuildConfig, DescrFlags, GatePath, Generation, ImportError, TypeNum};

#[test]
fn legacy_host_resolves_legacy_values() {
	common::init_tracing();
	let result = ndcompat::import_api(&common::legacy_host());

	if ndcompat::GATE == GatePath::Current {
		let err = result.expect_err("current-only build needs the 2.0 API");
		assert!(matches!(err, ImportError::FeatureVersionTooNew { runtime, .. } if runtime == API_1_25));
		assert!(ndcompat::api().is_none());
		return;
	}

	let api = result.expect("legacy host is compatible");
	assert_eq!(api.generation(), Generation::Legacy);
	assert_eq!(api.default_int(), TypeNum::Long);
	assert_eq!(api.ravel_axis(), 32);
	assert_eq!(api.max_args(), 32);
	assert_eq!(api.max_dims(), 32);

	let expected_runtime = match ndcompat::GATE {
		GatePath::Legacy => BuildConfig::COMPILED.feature,
		GatePath::Current | GatePath::Dual => API_1_25,
	};
	assert_eq!(api.runtime_version(), expected_runtime);

	let descr = DescrProto {
		flags: (DescrFlags::ITEM_REFCOUNT | DescrFlags::NEEDS_PYAPI).bits() as _,
		..DescrProto::default()
	};
	let flags = unsafe { api.descr_flag_set(ptr::from_ref(&descr).cast::<c_void>()) };
	assert_eq!(flags, DescrFlags::ITEM_REFCOUNT | DescrFlags::NEEDS_PYAPI);
	assert_eq!(unsafe { api.descr_flags(ptr::null()) }, 0);
}

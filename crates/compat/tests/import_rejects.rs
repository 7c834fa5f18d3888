mod common;

use ndcompat::table::{ABI_VERSION_SLOT, FEATURE_VERSION_SLOT};
use ndcompat::{ImportError, LoaderConfig, SharedLibrary, StaticTable};

fn assert_not_imported() {
	assert!(!ndcompat::is_imported());
	assert!(ndcompat::api().is_none());
}

#[test]
fn failed_imports_publish_nothing_and_can_be_retried() {
	common::init_tracing();

	// SAFETY: a null table is rejected before any slot is read.
	let null = unsafe { StaticTable::new(std::ptr::null()) };
	assert!(matches!(ndcompat::import_api(&null), Err(ImportError::NullTable)));
	assert_not_imported();

	// SAFETY: the table is leaked; empty slots are rejected before being called.
	let no_abi = unsafe { StaticTable::new(common::leak_table(None, Some(common::api_2_0))) };
	assert!(matches!(
		ndcompat::import_api(&no_abi),
		Err(ImportError::MissingSlot { slot: ABI_VERSION_SLOT, .. })
	));
	assert_not_imported();

	let no_feature = unsafe { StaticTable::new(common::leak_table(Some(common::abi_2), None)) };
	assert!(matches!(
		ndcompat::import_api(&no_feature),
		Err(ImportError::MissingSlot { slot: FEATURE_VERSION_SLOT, .. })
	));
	assert_not_imported();

	let dir = tempfile::tempdir().expect("tempdir");
	let loader = SharedLibrary::new(LoaderConfig::default().with_search_path(dir.path()));
	assert!(matches!(ndcompat::import_api(&loader), Err(ImportError::LibraryNotFound { .. })));
	assert_not_imported();

	let api = ndcompat::import_api(&common::compatible_host()).expect("compatible host");
	assert_eq!(api.gate(), ndcompat::GATE);
	assert!(ndcompat::is_imported());
}

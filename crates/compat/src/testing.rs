//! Fake host tables for unit tests.

use std::ffi::{c_uint, c_void};
use std::ptr;

use crate::table::{ABI_VERSION_SLOT, ApiTable, FEATURE_VERSION_SLOT, MIN_TABLE_LEN, VersionFn};

/// Version slot returning a fixed value.
pub(crate) unsafe extern "C" fn constant<const N: u32>() -> c_uint {
	N
}

/// Builds a table with the given version slots and leaks it for the rest of the test run.
pub(crate) fn leak_slots(abi: VersionFn, feature: Option<VersionFn>) -> *const *const c_void {
	let mut slots = vec![ptr::null::<c_void>(); MIN_TABLE_LEN];
	slots[ABI_VERSION_SLOT] = abi as *const c_void;
	if let Some(feature) = feature {
		slots[FEATURE_VERSION_SLOT] = feature as *const c_void;
	}
	Box::leak(slots.into_boxed_slice()).as_ptr()
}

pub(crate) fn host(abi: VersionFn, feature: VersionFn) -> ApiTable {
	unsafe { ApiTable::from_raw(leak_slots(abi, Some(feature))) }.expect("fake host table is valid")
}

/// A 1.x host exposing the 1.19 API.
pub(crate) fn legacy_host() -> ApiTable {
	host(constant::<0x0100_0009>, constant::<0x0000_000d>)
}

/// A 2.x host exposing the 2.0 API.
pub(crate) fn current_host() -> ApiTable {
	host(constant::<0x0200_0000>, constant::<0x0000_0012>)
}

//! Fake hosts built through the public table API.

#![allow(dead_code)]

use std::ffi::{c_uint, c_void};
use std::ptr;

use ndcompat::table::{ABI_VERSION_SLOT, FEATURE_VERSION_SLOT, MIN_TABLE_LEN, VersionFn};
use ndcompat::{GatePath, StaticTable};

pub unsafe extern "C" fn abi_1() -> c_uint {
	0x0100_0009
}

pub unsafe extern "C" fn abi_2() -> c_uint {
	0x0200_0000
}

pub unsafe extern "C" fn api_1_25() -> c_uint {
	0x11
}

pub unsafe extern "C" fn api_2_0() -> c_uint {
	0x12
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

/// Builds a slot array that lives for the rest of the process.
pub fn leak_table(abi: Option<VersionFn>, feature: Option<VersionFn>) -> *const *const c_void {
	let mut slots = vec![ptr::null::<c_void>(); MIN_TABLE_LEN];
	if let Some(abi) = abi {
		slots[ABI_VERSION_SLOT] = abi as *const c_void;
	}
	if let Some(feature) = feature {
		slots[FEATURE_VERSION_SLOT] = feature as *const c_void;
	}
	Box::leak(slots.into_boxed_slice()).as_ptr()
}

pub fn static_host(abi: VersionFn, feature: VersionFn) -> StaticTable {
	// SAFETY: the table is leaked and both version slots are filled.
	unsafe { StaticTable::new(leak_table(Some(abi), Some(feature))) }
}

/// A 1.x host exposing the 1.25 API.
pub fn legacy_host() -> StaticTable {
	static_host(abi_1, api_1_25)
}

/// A 2.x host exposing the 2.0 API.
pub fn current_host() -> StaticTable {
	static_host(abi_2, api_2_0)
}

/// A host this build accepts.
pub fn compatible_host() -> StaticTable {
	match ndcompat::GATE {
		GatePath::Legacy => legacy_host(),
		GatePath::Current | GatePath::Dual => current_host(),
	}
}

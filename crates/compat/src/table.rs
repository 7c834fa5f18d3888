//! Handle to the host's C API table.
//!
//! The table is an array of untyped pointers (`void **`). Only the two
//! version slots are read here; their indices are part of the host ABI and are
//! identical across generations.

use std::ffi::{c_uint, c_void};
use std::fmt;
use std::ptr::NonNull;

use libloading::Library;
use ndcompat_abi::{AbiVersion, FeatureVersion};
use tracing::trace;

use crate::error::{ImportError, Result};

/// Slot holding `GetNDArrayCVersion() -> c_uint`.
pub const ABI_VERSION_SLOT: usize = 0;
/// Slot holding `GetNDArrayCFeatureVersion() -> c_uint`.
pub const FEATURE_VERSION_SLOT: usize = 211;
/// Minimum number of slots a table must expose.
pub const MIN_TABLE_LEN: usize = FEATURE_VERSION_SLOT + 1;

const REQUIRED_SLOTS: [(usize, &str); 2] = [
	(ABI_VERSION_SLOT, "GetNDArrayCVersion"),
	(FEATURE_VERSION_SLOT, "GetNDArrayCFeatureVersion"),
];

/// Signature of both version slots.
pub type VersionFn = unsafe extern "C" fn() -> c_uint;

/// Validated pointer to a host API table.
///
/// Optionally owns the library the table lives in so it stays mapped for as
/// long as the handle exists.
pub struct ApiTable {
	slots: NonNull<*const c_void>,
	_library: Option<Library>,
}

// The host table is immutable after import and the version functions are
// plain reads, so the handle can be shared freely.
unsafe impl Send for ApiTable {}
unsafe impl Sync for ApiTable {}

impl ApiTable {
	/// Wraps a raw table pointer after checking the version slots.
	///
	/// # Safety
	///
	/// A non-null `table` must point to at least [`MIN_TABLE_LEN`] readable
	/// slots that stay valid and unmodified for the lifetime of the handle, and
	/// the version slots must hold functions of type [`VersionFn`].
	pub unsafe fn from_raw(table: *const *const c_void) -> Result<Self> {
		let slots = NonNull::new(table.cast_mut()).ok_or(ImportError::NullTable)?;
		for (slot, name) in REQUIRED_SLOTS {
			// SAFETY: the caller guarantees MIN_TABLE_LEN readable slots.
			let entry = unsafe { *slots.as_ptr().add(slot) };
			if entry.is_null() {
				return Err(ImportError::MissingSlot { slot, name });
			}
		}
		trace!(table = ?slots, "api_table.validated");
		Ok(Self { slots, _library: None })
	}

	/// Ties the lifetime of `library` to this table.
	pub(crate) fn with_library(mut self, library: Library) -> Self {
		self._library = Some(library);
		self
	}

	/// Raw table pointer, for handing to code that indexes slots itself.
	pub fn as_ptr(&self) -> *const *const c_void {
		self.slots.as_ptr()
	}

	/// Calls `GetNDArrayCVersion`.
	pub fn abi_version(&self) -> AbiVersion {
		// SAFETY: slot validated non-null in `from_raw`, signature per its contract.
		AbiVersion::new(unsafe { self.version_fn(ABI_VERSION_SLOT)() })
	}

	/// Calls `GetNDArrayCFeatureVersion`.
	pub fn feature_version(&self) -> FeatureVersion {
		// SAFETY: slot validated non-null in `from_raw`, signature per its contract.
		FeatureVersion::new(unsafe { self.version_fn(FEATURE_VERSION_SLOT)() })
	}

	/// # Safety
	///
	/// `slot` must be one of [`REQUIRED_SLOTS`].
	unsafe fn version_fn(&self, slot: usize) -> VersionFn {
		let entry = unsafe { *self.slots.as_ptr().add(slot) };
		unsafe { std::mem::transmute::<*const c_void, VersionFn>(entry) }
	}
}

impl fmt::Debug for ApiTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ApiTable")
			.field("slots", &self.slots)
			.field("owns_library", &self._library.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::ptr;

	use ndcompat_abi::{ABI_2_0, API_2_0};

	use super::*;
	use crate::testing::{constant, leak_slots};

	#[test]
	fn null_table_is_rejected() {
		let err = unsafe { ApiTable::from_raw(ptr::null()) }.unwrap_err();
		assert!(matches!(err, ImportError::NullTable));
	}

	#[test]
	fn empty_version_slot_is_rejected() {
		let slots = leak_slots(constant::<0x0200_0000>, None);
		let err = unsafe { ApiTable::from_raw(slots) }.unwrap_err();
		assert!(matches!(
			err,
			ImportError::MissingSlot { slot: FEATURE_VERSION_SLOT, name: "GetNDArrayCFeatureVersion" }
		));
	}

	#[test]
	fn reads_both_version_slots() {
		let slots = leak_slots(constant::<0x0200_0000>, Some(constant::<0x12> as VersionFn));
		let table = unsafe { ApiTable::from_raw(slots) }.expect("valid table");
		assert_eq!(table.abi_version(), ABI_2_0);
		assert_eq!(table.feature_version(), API_2_0);
		assert_eq!(table.as_ptr(), slots);
	}
}

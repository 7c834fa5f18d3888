//! Where the host API table comes from.

use std::ffi::c_void;

use crate::error::Result;
use crate::table::ApiTable;

/// Produces the host API table on import.
///
/// Called at most once per successful import; a source is free to do
/// expensive work such as opening a shared library.
pub trait ApiSource {
	/// Acquires and validates the host table.
	fn acquire(&self) -> Result<ApiTable>;
}

impl<F> ApiSource for F
where
	F: Fn() -> Result<ApiTable>,
{
	fn acquire(&self) -> Result<ApiTable> {
		self()
	}
}

/// A table pointer the consumer already holds, e.g. handed over by an
/// embedding runtime or exported by a statically linked host.
#[derive(Debug, Clone, Copy)]
pub struct StaticTable {
	table: *const *const c_void,
}

// Only the pointer value is shared; `StaticTable::new` makes the caller vouch
// for the table's immutability.
unsafe impl Send for StaticTable {}
unsafe impl Sync for StaticTable {}

impl StaticTable {
	/// Wraps a table pointer.
	///
	/// # Safety
	///
	/// Same contract as [`ApiTable::from_raw`], and the table must stay valid
	/// for the rest of the process.
	pub const unsafe fn new(table: *const *const c_void) -> Self {
		Self { table }
	}
}

impl ApiSource for StaticTable {
	fn acquire(&self) -> Result<ApiTable> {
		// SAFETY: upheld by the caller of `StaticTable::new`.
		unsafe { ApiTable::from_raw(self.table) }
	}
}

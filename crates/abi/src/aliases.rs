//! Old names for symbols that were renamed when the current generation split
//! them from their legacy meaning.
//!
//! Only meaningful for builds that can only ever see a legacy host; `ndcompat`
//! re-exports them at its root on the legacy-only path.

/// Old name of [`NTYPES_LEGACY`](crate::types::NTYPES_LEGACY).
pub const NTYPES: usize = crate::types::NTYPES_LEGACY;

/// Old name of the descriptor type. A legacy host only has the
/// [`DescrProto`](crate::layout::DescrProto) layout.
pub type Descr = crate::layout::DescrProto;

#[cfg(test)]
mod tests {
	use std::ffi::c_void;

	use super::*;
	use crate::generation::Generation;
	use crate::layout::{DescrProto, DescrRef};
	use crate::types::NTYPES_LEGACY;

	#[test]
	fn ntypes_alias_matches_canonical_name() {
		assert_eq!(NTYPES, NTYPES_LEGACY);
	}

	#[test]
	fn descr_alias_decodes_like_descr_proto() {
		let aliased = Descr { flags: 0x40, ..Descr::default() };
		let canonical = DescrProto { flags: 0x40, ..DescrProto::default() };

		let read = |ptr: *const c_void| unsafe { DescrRef::from_raw(ptr, Generation::Legacy) }.map(|d| d.flags());
		assert_eq!(read((&raw const aliased).cast()), read((&raw const canonical).cast()));
		assert_eq!(size_of::<Descr>(), size_of::<DescrProto>());
	}
}

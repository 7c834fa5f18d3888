//! Descriptor layouts of both generations.
//!
//! The 2.0 ABI widened `flags` from a `char` to a `u64` and moved it behind
//! `type_num`; the byte that used to hold the flags survives as padding. Code
//! compiled against one layout reads garbage on the other, so raw descriptor
//! pointers only become readable through [`DescrRef`], which carries the
//! generation tag alongside the reference.

use std::ffi::{c_char, c_int, c_void};
use std::mem::offset_of;
use std::ptr;

use bitflags::bitflags;

use crate::generation::Generation;

/// Object header preceding every host object.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ObjectHead {
	/// Reference count.
	pub ob_refcnt: isize,
	/// Pointer to the type object.
	pub ob_type: *mut c_void,
}

impl Default for ObjectHead {
	fn default() -> Self {
		Self {
			ob_refcnt: 0,
			ob_type: ptr::null_mut(),
		}
	}
}

/// Descriptor layout of 1.x hosts.
///
/// 2.x hosts keep accepting this layout for statically defined legacy dtypes
/// under this name.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub struct DescrProto {
	pub ob_base: ObjectHead,
	pub typeobj: *mut c_void,
	pub kind: c_char,
	pub type_: c_char,
	pub byteorder: c_char,
	/// Item flags, one byte wide in this layout.
	pub flags: c_char,
	pub type_num: c_int,
	pub elsize: c_int,
	pub alignment: c_int,
	pub subarray: *mut c_void,
	pub fields: *mut c_void,
	pub names: *mut c_void,
	pub f: *mut c_void,
	pub metadata: *mut c_void,
	pub c_metadata: *mut c_void,
	pub hash: isize,
}

impl DescrProto {
	/// Byte offset of `flags`.
	pub const FLAGS_OFFSET: usize = offset_of!(DescrProto, flags);
}

impl Default for DescrProto {
	fn default() -> Self {
		Self {
			ob_base: ObjectHead::default(),
			typeobj: ptr::null_mut(),
			kind: 0,
			type_: 0,
			byteorder: 0,
			flags: 0,
			type_num: 0,
			elsize: 0,
			alignment: 0,
			subarray: ptr::null_mut(),
			fields: ptr::null_mut(),
			names: ptr::null_mut(),
			f: ptr::null_mut(),
			metadata: ptr::null_mut(),
			c_metadata: ptr::null_mut(),
			hash: 0,
		}
	}
}

/// Descriptor layout of 2.x hosts.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub struct Descr {
	pub ob_base: ObjectHead,
	pub typeobj: *mut c_void,
	pub kind: c_char,
	pub type_: c_char,
	pub byteorder: c_char,
	/// Former position of the one-byte flags; unused.
	pub former_flags: c_char,
	pub type_num: c_int,
	/// Item flags, widened to 64 bits.
	pub flags: u64,
	pub elsize: isize,
	pub alignment: isize,
	pub metadata: *mut c_void,
	pub hash: isize,
	pub reserved_null: [*mut c_void; 2],
}

impl Descr {
	/// Byte offset of `flags`.
	pub const FLAGS_OFFSET: usize = offset_of!(Descr, flags);
}

impl Default for Descr {
	fn default() -> Self {
		Self {
			ob_base: ObjectHead::default(),
			typeobj: ptr::null_mut(),
			kind: 0,
			type_: 0,
			byteorder: 0,
			former_flags: 0,
			type_num: 0,
			flags: 0,
			elsize: 0,
			alignment: 0,
			metadata: ptr::null_mut(),
			hash: 0,
			reserved_null: [ptr::null_mut(); 2],
		}
	}
}

bitflags! {
	/// Item flags stored in a descriptor.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct DescrFlags: u64 {
		/// Items hold references that must be counted.
		const ITEM_REFCOUNT = 0x01;
		/// Same bit as `ITEM_REFCOUNT`, older name.
		const ITEM_HASOBJECT = 0x01;
		/// Pickle as a list.
		const LIST_PICKLE = 0x02;
		/// Items are pointers.
		const ITEM_IS_POINTER = 0x04;
		/// Memory must be initialized before use.
		const NEEDS_INIT = 0x08;
		/// Operations need the interpreter API.
		const NEEDS_PYAPI = 0x10;
		/// Use `getitem` when extracting elements.
		const USE_GETITEM = 0x20;
		/// Use `setitem` when storing elements.
		const USE_SETITEM = 0x40;
		/// Struct fields are aligned.
		const ALIGNED_STRUCT = 0x80;
	}
}

/// A descriptor reference tagged with the layout it was read as.
#[derive(Debug, Clone, Copy)]
pub enum DescrRef<'a> {
	/// A descriptor in the 1.x layout.
	Legacy(&'a DescrProto),
	/// A descriptor in the 2.x layout.
	Current(&'a Descr),
}

impl<'a> DescrRef<'a> {
	/// Reinterprets a raw descriptor pointer as the layout of `generation`.
	///
	/// Returns `None` for a null pointer.
	///
	/// # Safety
	///
	/// A non-null `ptr` must point to a live descriptor laid out for `generation`
	/// that outlives `'a`.
	pub unsafe fn from_raw(ptr: *const c_void, generation: Generation) -> Option<Self> {
		if ptr.is_null() {
			return None;
		}
		// SAFETY: non-null and, per the caller contract, a descriptor in this layout.
		Some(match generation {
			Generation::Legacy => Self::Legacy(unsafe { &*ptr.cast::<DescrProto>() }),
			Generation::Current => Self::Current(unsafe { &*ptr.cast::<Descr>() }),
		})
	}

	/// Layout this reference was decoded as.
	pub fn generation(&self) -> Generation {
		match self {
			Self::Legacy(_) => Generation::Legacy,
			Self::Current(_) => Generation::Current,
		}
	}

	/// Returns the item flags.
	///
	/// Only the low byte carries flags on either generation; the wider field of
	/// the current layout is truncated to match.
	pub fn flags(&self) -> u64 {
		let byte = match self {
			Self::Legacy(descr) => descr.flags as u8,
			Self::Current(descr) => descr.flags as u8,
		};
		u64::from(byte)
	}

	/// Returns the item flags as [`DescrFlags`], keeping unknown bits.
	pub fn flag_set(&self) -> DescrFlags {
		DescrFlags::from_bits_retain(self.flags())
	}

	/// Returns the raw type number.
	pub fn type_num(&self) -> c_int {
		match self {
			Self::Legacy(descr) => descr.type_num,
			Self::Current(descr) => descr.type_num,
		}
	}
}

#[cfg(test)]
mod tests;

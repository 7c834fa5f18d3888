use std::ffi::c_char;

use super::*;
use crate::types::TypeNum;

fn legacy_descr(flags: u8) -> DescrProto {
	DescrProto {
		flags: flags as c_char,
		type_num: TypeNum::Double.as_raw(),
		elsize: 8,
		alignment: 8,
		..DescrProto::default()
	}
}

fn current_descr(flags: u64) -> Descr {
	Descr {
		flags,
		type_num: TypeNum::Double.as_raw(),
		elsize: 8,
		alignment: 8,
		..Descr::default()
	}
}

#[test]
fn null_pointer_has_no_descriptor() {
	let decoded = unsafe { DescrRef::from_raw(ptr::null(), Generation::Current) };
	assert!(decoded.is_none());
}

#[test]
fn legacy_flags_decode_from_legacy_layout() {
	let descr = legacy_descr(0x91);
	let decoded = unsafe { DescrRef::from_raw((&raw const descr).cast(), Generation::Legacy) }.expect("non-null");

	assert_eq!(decoded.generation(), Generation::Legacy);
	assert_eq!(decoded.flags(), 0x91);
	assert_eq!(decoded.type_num(), TypeNum::Double.as_raw());
}

#[test]
fn current_flags_truncate_to_low_byte() {
	let descr = current_descr(0x0001_0000_0000_0018);
	let decoded = unsafe { DescrRef::from_raw((&raw const descr).cast(), Generation::Current) }.expect("non-null");

	assert_eq!(decoded.generation(), Generation::Current);
	assert_eq!(decoded.flags(), 0x18);
	assert_eq!(decoded.flag_set(), DescrFlags::NEEDS_INIT | DescrFlags::NEEDS_PYAPI);
}

#[test]
fn flag_set_keeps_every_bit() {
	let descr = legacy_descr(0xff);
	let decoded = unsafe { DescrRef::from_raw((&raw const descr).cast(), Generation::Legacy) }.expect("non-null");
	assert_eq!(decoded.flag_set(), DescrFlags::all());
	assert!(decoded.flag_set().contains(DescrFlags::ITEM_HASOBJECT));
}

#[test]
fn flags_live_at_different_offsets() {
	assert_ne!(DescrProto::FLAGS_OFFSET, Descr::FLAGS_OFFSET);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn offsets_match_host_headers_on_64_bit() {
	assert_eq!(DescrProto::FLAGS_OFFSET, 27);
	assert_eq!(Descr::FLAGS_OFFSET, 32);
	assert_eq!(size_of::<DescrProto>(), 96);
	assert_eq!(size_of::<Descr>(), 88);
}

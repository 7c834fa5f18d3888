use std::ffi::c_long;

/// Number of built-in type numbers shared by both generations.
pub const NTYPES_LEGACY: usize = 24;

/// Built-in type numbers.
///
/// Discriminants are the host's type numbers and are identical across
/// generations; only which of them is the default integer changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum TypeNum {
	Bool = 0,
	Byte = 1,
	UByte = 2,
	Short = 3,
	UShort = 4,
	Int = 5,
	UInt = 6,
	Long = 7,
	ULong = 8,
	LongLong = 9,
	ULongLong = 10,
	Float = 11,
	Double = 12,
	LongDouble = 13,
	CFloat = 14,
	CDouble = 15,
	CLongDouble = 16,
	Object = 17,
	String = 18,
	Unicode = 19,
	Void = 20,
	DateTime = 21,
	TimeDelta = 22,
	Half = 23,
}

impl TypeNum {
	/// The pointer-sized signed integer type on this platform.
	///
	/// `Long` wherever C `long` is pointer-sized, otherwise `LongLong` (64-bit Windows).
	pub const fn intp() -> Self {
		if size_of::<c_long>() == size_of::<isize>() { Self::Long } else { Self::LongLong }
	}

	/// Returns the raw type number.
	pub const fn as_raw(self) -> i32 {
		self as i32
	}

	/// Maps a raw type number back to a built-in type.
	pub const fn from_raw(raw: i32) -> Option<Self> {
		Some(match raw {
			0 => Self::Bool,
			1 => Self::Byte,
			2 => Self::UByte,
			3 => Self::Short,
			4 => Self::UShort,
			5 => Self::Int,
			6 => Self::UInt,
			7 => Self::Long,
			8 => Self::ULong,
			9 => Self::LongLong,
			10 => Self::ULongLong,
			11 => Self::Float,
			12 => Self::Double,
			13 => Self::LongDouble,
			14 => Self::CFloat,
			15 => Self::CDouble,
			16 => Self::CLongDouble,
			17 => Self::Object,
			18 => Self::String,
			19 => Self::Unicode,
			20 => Self::Void,
			21 => Self::DateTime,
			22 => Self::TimeDelta,
			23 => Self::Half,
			_ => return None,
		})
	}
}

use crate::keys::KeyTrait;
use crate::partials::vector_partial::VectorPartial;

/// Owns variable sized key data.
///
/// Strings are stored as their UTF-8 bytes with nothing appended, so `"app"` is a strict prefix
/// of `"apple"` and the tree keeps both. Integers are stored big-endian (with the sign bit flipped
/// for signed types) so that byte order matches numeric order.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct VectorKey {
    data: Box<[u8]>,
}

impl VectorKey {
    pub fn new_from_str(s: &str) -> Self {
        Self::new_from_slice(s.as_bytes())
    }

    pub fn new_from_vec(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for VectorKey {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl KeyTrait for VectorKey {
    type PartialType = VectorPartial;

    fn new_from_slice(data: &[u8]) -> Self {
        Self {
            data: Box::from(data),
        }
    }

    fn to_partial(&self, at_depth: usize) -> VectorPartial {
        VectorPartial::from_slice(&self.data[at_depth..])
    }
}

impl From<&VectorKey> for VectorKey {
    fn from(key: &VectorKey) -> Self {
        key.clone()
    }
}
impl From<String> for VectorKey {
    fn from(data: String) -> Self {
        Self::new_from_vec(data.into_bytes())
    }
}
impl From<&String> for VectorKey {
    fn from(data: &String) -> Self {
        Self::new_from_str(data)
    }
}
impl From<&str> for VectorKey {
    fn from(data: &str) -> Self {
        Self::new_from_str(data)
    }
}
impl From<&[u8]> for VectorKey {
    fn from(data: &[u8]) -> Self {
        Self::new_from_slice(data)
    }
}
impl From<Vec<u8>> for VectorKey {
    fn from(data: Vec<u8>) -> Self {
        Self::new_from_vec(data)
    }
}
impl<const N: usize> From<[u8; N]> for VectorKey {
    fn from(data: [u8; N]) -> Self {
        Self::new_from_slice(&data)
    }
}
impl<const N: usize> From<&[u8; N]> for VectorKey {
    fn from(data: &[u8; N]) -> Self {
        Self::new_from_slice(data)
    }
}

macro_rules! impl_from_unsigned {
    ( $($t:ty),* ) => {
    $(
    impl From< $t > for VectorKey
    {
        fn from(data: $t) -> Self {
            VectorKey::new_from_slice(&data.to_be_bytes())
        }
    }
    impl From< &$t > for VectorKey
    {
        fn from(data: &$t) -> Self {
            (*data).into()
        }
    }
    ) *
    }
}
impl_from_unsigned!(u8, u16, u32, u64, usize, u128);

macro_rules! impl_from_signed {
    ( $t:ty, $tu:ty ) => {
        impl From<$t> for VectorKey {
            fn from(val: $t) -> Self {
                let flipped = (val as $tu) ^ (1 << (<$tu>::BITS - 1));
                VectorKey::new_from_slice(&flipped.to_be_bytes())
            }
        }

        impl From<&$t> for VectorKey {
            fn from(val: &$t) -> Self {
                (*val).into()
            }
        }
    };
}

impl_from_signed!(i8, u8);
impl_from_signed!(i16, u16);
impl_from_signed!(i32, u32);
impl_from_signed!(i64, u64);
impl_from_signed!(i128, u128);
impl_from_signed!(isize, usize);

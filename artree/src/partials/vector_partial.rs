use crate::partials::Partial;

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct VectorPartial {
    data: Box<[u8]>,
}

impl VectorPartial {
    pub fn from_slice(src: &[u8]) -> Self {
        Self {
            data: Box::from(src),
        }
    }
}

impl From<&[u8]> for VectorPartial {
    fn from(src: &[u8]) -> Self {
        Self::from_slice(src)
    }
}

impl AsRef<[u8]> for VectorPartial {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Partial for VectorPartial {
    fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.data.len());
        VectorPartial::from_slice(&self.data[..length])
    }

    fn partial_after(&self, start: usize) -> Self {
        assert!(start <= self.data.len());
        VectorPartial::from_slice(&self.data[start..])
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> u8 {
        self.data[pos]
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.data.len()
    }
}

use crate::error::ContractError;

/// Sequential big-endian reader over a borrowed byte buffer.
///
/// Every read either consumes exactly the requested width or fails with
/// [`ContractError::TruncatedInput`] without moving the offset. A cursor must
/// be closed with [`ByteCursor::finish`], which rejects unconsumed bytes.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn read_u8(&mut self) -> Result<u8, ContractError> {
        Ok(self.read_const_bytes::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ContractError> {
        self.read_const_bytes().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, ContractError> {
        self.read_const_bytes().map(u32::from_be_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64, ContractError> {
        self.read_const_bytes().map(u64::from_be_bytes)
    }

    pub fn read_fixed_bytes(&mut self, len: usize) -> Result<&'a [u8], ContractError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(ContractError::TruncatedInput {
                needed: len,
                remaining,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_const_bytes<const N: usize>(&mut self) -> Result<[u8; N], ContractError> {
        let mut bytes: [u8; N] = [0; N];
        bytes.copy_from_slice(self.read_fixed_bytes(N)?);
        Ok(bytes)
    }

    /// Closes the cursor, failing if any input was left unread.
    pub fn finish(self) -> Result<(), ContractError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(ContractError::TrailingBytes(n)),
        }
    }
}

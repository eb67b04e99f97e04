//! GRD1 binary persistence format — fixed little-endian layout.
//!
//! Wire format layout:
//! ```text
//! [GRD1][version:4][record_count:4]      — signature + u32 version + u32 count
//! [subject_count:4]                      — i32, grades per record
//! [grades:8 × subject_count × count]     — IEEE 754 doubles, row-major
//! ```
//!
//! Record ids are not persisted; the reader assigns sequential ids 1..=N.
//! Every multi-byte field is little-endian regardless of host, so a blob
//! written on one platform decodes identically on any other.

use crate::errors::{GradebookError, Result};

pub const MAGIC: &[u8; 4] = b"GRD1";
pub const FORMAT_VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 16; // 4 (magic) + 4 (version) + 4 (count) + 4 (subjects)

/// Encode the file header.
pub fn encode_header(buf: &mut Vec<u8>, record_count: u32, subject_count: i32) {
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&record_count.to_le_bytes());
    buf.extend_from_slice(&subject_count.to_le_bytes());
}

/// Encode a single grade as little-endian IEEE 754.
pub fn encode_grade(buf: &mut Vec<u8>, grade: f64) {
    buf.extend_from_slice(&grade.to_le_bytes());
}

/// A cursor for reading wire-format bytes.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            return Err(GradebookError::Format(format!(
                "truncated stream at offset {}, need {} bytes",
                self.pos, n
            )));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.read_bytes(8)?;
        Ok(f64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Validate the header, returning (record_count, subject_count).
    pub fn read_header(&mut self) -> Result<(u32, i32)> {
        let magic = self.read_bytes(4)?;
        if magic != MAGIC {
            return Err(GradebookError::Format(format!(
                "bad signature: {:?}",
                magic
            )));
        }
        let version = self.read_u32()?;
        if version != FORMAT_VERSION {
            return Err(GradebookError::Format(format!(
                "unsupported version: {version}"
            )));
        }
        let record_count = self.read_u32()?;
        let subject_count = self.read_i32()?;
        if subject_count < 0 {
            return Err(GradebookError::Format(format!(
                "negative subject count: {subject_count}"
            )));
        }
        Ok((record_count, subject_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode_decode() {
        let mut buf = Vec::new();
        encode_header(&mut buf, 3, 4);
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(&buf[0..4], MAGIC);

        let mut reader = WireReader::new(&buf);
        let (record_count, subject_count) = reader.read_header().unwrap();
        assert_eq!(record_count, 3);
        assert_eq!(subject_count, 4);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_grade_encode_decode() {
        let mut buf = Vec::new();
        encode_grade(&mut buf, 4.5);
        assert_eq!(buf.len(), 8);

        let mut reader = WireReader::new(&buf);
        let decoded = reader.read_f64().unwrap();
        assert_eq!(decoded, 4.5);
    }

    #[test]
    fn test_grade_bit_exact() {
        // Values with no exact binary representation must still round-trip.
        let mut buf = Vec::new();
        let grade = 3.3;
        encode_grade(&mut buf, grade);
        let decoded = WireReader::new(&buf).read_f64().unwrap();
        assert_eq!(decoded.to_bits(), grade.to_bits());
    }

    #[test]
    fn test_little_endian_layout() {
        let mut buf = Vec::new();
        encode_header(&mut buf, 1, 2);
        // version = 1 LE
        assert_eq!(&buf[4..8], &[1, 0, 0, 0]);
        // record_count = 1 LE
        assert_eq!(&buf[8..12], &[1, 0, 0, 0]);
        // subject_count = 2 LE
        assert_eq!(&buf[12..16], &[2, 0, 0, 0]);
    }

    #[test]
    fn test_bad_signature() {
        let mut buf = Vec::new();
        encode_header(&mut buf, 1, 1);
        buf[0..4].copy_from_slice(b"XXXX");
        let mut reader = WireReader::new(&buf);
        assert!(matches!(
            reader.read_header(),
            Err(GradebookError::Format(_))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut buf = Vec::new();
        encode_header(&mut buf, 1, 1);
        buf[4..8].copy_from_slice(&2u32.to_le_bytes());
        let mut reader = WireReader::new(&buf);
        assert!(matches!(
            reader.read_header(),
            Err(GradebookError::Format(_))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let buf = b"GRD1\x01\x00";
        let mut reader = WireReader::new(buf);
        assert!(reader.read_header().is_err());
    }

    #[test]
    fn test_negative_subject_count_rejected() {
        let mut buf = Vec::new();
        encode_header(&mut buf, 1, -3);
        let mut reader = WireReader::new(&buf);
        assert!(reader.read_header().is_err());
    }
}

use crate::error::DecodeError;
use mpr_model::PixelRepresentation;

/// Parameters describing how to interpret a slice's raw pixel byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct DecodeParams {
    pub rows: u16,
    pub columns: u16,
    pub bits_allocated: u16,
    pub high_bit: u16,
    pub pixel_representation: PixelRepresentation,
}

/// Unpacks little-endian monochrome pixel bytes into raw integer samples (not yet rescaled).
///
/// Grounded on `dicom-pixel-data::raw_decoder`'s bit-masking dispatch, narrowed to the
/// 8-and-16-bit-allocated cases CT/MR monochrome series use.
pub fn decode_raw(data: &[u8], params: &DecodeParams) -> Result<Vec<i32>, DecodeError> {
    let num_pixels = params.rows as usize * params.columns as usize;
    let nbytes = num_pixels * params.bits_allocated as usize / 8;
    if nbytes != data.len() {
        return Err(DecodeError::ExpectedByteMismatch(nbytes, data.len()));
    }

    match params.bits_allocated {
        8 => {
            let mask = u8_mask(params.high_bit as u8)?;
            let values = data
                .iter()
                .map(|&b| match params.pixel_representation {
                    PixelRepresentation::Unsigned => (b & mask) as i32,
                    PixelRepresentation::Signed => (i8::from_le_bytes([b & mask])) as i32,
                })
                .collect();
            Ok(values)
        }
        16 => {
            let mask = u16_mask(params.high_bit)?;
            let values = data
                .chunks_exact(2)
                .map(|chunk| {
                    let raw = u16::from_le_bytes([chunk[0], chunk[1]]) & mask;
                    match params.pixel_representation {
                        PixelRepresentation::Unsigned => raw as i32,
                        PixelRepresentation::Signed => raw as i16 as i32,
                    }
                })
                .collect();
            Ok(values)
        }
        other => Err(DecodeError::UnsupportedNumberOfBits(other)),
    }
}

fn u8_mask(high_bit: u8) -> Result<u8, DecodeError> {
    if high_bit >= 8 {
        return Err(DecodeError::U8MaskHighBitOutOfBound(high_bit));
    }
    let mut mask = 0u8;
    for i in 0..=high_bit {
        mask |= 1 << i;
    }
    Ok(mask)
}

fn u16_mask(high_bit: u16) -> Result<u16, DecodeError> {
    if high_bit >= 16 {
        return Err(DecodeError::U16MaskHighBitOutOfBound(high_bit));
    }
    let mut mask = 0u16;
    for i in 0..=high_bit {
        mask |= 1 << i;
    }
    Ok(mask)
}

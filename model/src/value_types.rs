use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unknown value [{0}] for PixelRepresentation")]
    UnknownPixelRepresentation(u16),
}

/// DICOM photometric interpretation, trimmed to the values a CT/MR grayscale series uses.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PhotometricInterpretation {
    Monochrome1,
    Monochrome2,
    Other(String),
}

impl PhotometricInterpretation {
    pub fn is_monochrome(&self) -> bool {
        matches!(self, Self::Monochrome1 | Self::Monochrome2)
    }
}

impl From<&str> for PhotometricInterpretation {
    fn from(value: &str) -> Self {
        match value {
            "MONOCHROME1" => Self::Monochrome1,
            "MONOCHROME2" => Self::Monochrome2,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelRepresentation {
    Unsigned,
    Signed,
}

impl TryFrom<u16> for PixelRepresentation {
    type Error = ConvertError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unsigned),
            1 => Ok(Self::Signed),
            other => Err(ConvertError::UnknownPixelRepresentation(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_photometric_interpretations() {
        assert_eq!(
            PhotometricInterpretation::from("MONOCHROME2"),
            PhotometricInterpretation::Monochrome2
        );
        assert!(PhotometricInterpretation::from("MONOCHROME1").is_monochrome());
    }

    #[test]
    fn unknown_photometric_interpretation_is_preserved() {
        assert_eq!(
            PhotometricInterpretation::from("RGB"),
            PhotometricInterpretation::Other("RGB".to_string())
        );
    }

    #[test]
    fn pixel_representation_from_u16() {
        assert_eq!(PixelRepresentation::try_from(0).unwrap(), PixelRepresentation::Unsigned);
        assert_eq!(PixelRepresentation::try_from(1).unwrap(), PixelRepresentation::Signed);
        assert!(PixelRepresentation::try_from(2).is_err());
    }
}

//! Tests for error formatting, sources and resource classification

#[cfg(test)]
mod tests {
    use fractomosaic::MosaicError;
    use fractomosaic::io::error::{computation_error, file_system, image_load, invalid_parameter};
    use image::ImageError;
    use std::error::Error;
    use std::path::{Path, PathBuf};

    fn decode_error() -> ImageError {
        ImageError::IoError(std::io::Error::other("truncated stream"))
    }

    // Tests helper constructors populate every field
    // Verified by swapping value and reason in invalid_parameter
    #[test]
    fn test_invalid_parameter_fields() {
        let err = invalid_parameter("min_size", &0, &"must be at least 1");
        assert!(matches!(
            &err,
            MosaicError::InvalidParameter { parameter: "min_size", value, reason }
                if value == "0" && reason == "must be at least 1"
        ));
    }

    // Tests display messages name the failing path or parameter
    // Verified by omitting the path from the message
    #[test]
    fn test_display_messages() {
        let empty = MosaicError::EmptyLibrary {
            path: PathBuf::from("tiles"),
        };
        assert!(empty.to_string().contains("'tiles'"));

        let param = invalid_parameter("threshold", &-1.0, &"negative");
        assert_eq!(
            param.to_string(),
            "Invalid parameter 'threshold' = '-1': negative"
        );

        let computation = computation_error("average color", &"no pixels");
        assert_eq!(
            computation.to_string(),
            "Computation error in average color: no pixels"
        );

        let load = image_load(Path::new("a.png"), decode_error());
        assert!(load.to_string().starts_with("Failed to load image 'a.png'"));
    }

    // Tests underlying errors are exposed through source()
    // Verified by returning None for file system errors
    #[test]
    fn test_error_sources() {
        let io = file_system(
            Path::new("tiles"),
            "list directory",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(io.source().is_some());
        assert!(io.to_string().contains("list directory"));

        let load = image_load(Path::new("a.png"), decode_error());
        assert!(load.source().is_some());

        let empty = MosaicError::EmptyLibrary {
            path: PathBuf::from("tiles"),
        };
        assert!(empty.source().is_none());
    }

    // Tests which errors count as unavailable resources
    // Verified by including parameter errors in the group
    #[test]
    fn test_resource_unavailable() {
        assert!(image_load(Path::new("a.png"), decode_error()).is_resource_unavailable());
        assert!(
            MosaicError::ImageExport {
                path: PathBuf::from("out.xyz"),
                source: decode_error(),
            }
            .is_resource_unavailable()
        );
        assert!(!computation_error("resize", &"zero size").is_resource_unavailable());
        assert!(!invalid_parameter("seed", &1, &"bad").is_resource_unavailable());
    }
}

use std::fmt;

/// Camera angle named in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Pitch,
    Yaw,
    FieldOfView,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Pitch => "pitch",
            Quantity::Yaw => "yaw",
            Quantity::FieldOfView => "field of view",
        };
        f.write_str(name)
    }
}

/// Errors from the strict camera setters.
///
/// The default setters never fail; they clamp instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("{quantity} of {value} degrees is outside [{min}, {max}]")]
    OutOfRange {
        quantity: Quantity,
        value: f32,
        min: f32,
        max: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_quantity_and_bounds() {
        let err = CameraError::OutOfRange {
            quantity: Quantity::FieldOfView,
            value: 120.0,
            min: 1.0,
            max: 90.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("field of view"));
        assert!(msg.contains("120"));
        assert!(msg.contains("[1, 90]"));
    }
}

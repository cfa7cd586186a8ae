use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// A single LIDAR return: horizontal position plus the measured value
/// (typically elevation).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.value.is_finite()
    }
}

impl FromStr for Point {
    type Err = LoadError;

    /// Parses an `x,y,value` record.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parse_error = |message: String| LoadError::Parse {
            line: line.to_string(),
            message,
        };

        let tokens: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if tokens.len() != 3 {
            return Err(parse_error(format!(
                "expected 3 fields, found {}",
                tokens.len()
            )));
        }

        let mut fields = [0.0; 3];
        for (field, token) in fields.iter_mut().zip(&tokens) {
            *field = token
                .parse::<f64>()
                .map_err(|_| parse_error(format!("`{}` is not a number", token)))?;
            if !field.is_finite() {
                return Err(parse_error(format!("`{}` is not a finite number", token)));
            }
        }

        Ok(Point::new(fields[0], fields[1], fields[2]))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.value)
    }
}

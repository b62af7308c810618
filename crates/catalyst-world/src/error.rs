use std::fmt;

use catalyst_tiles::RegistryError;

#[derive(Debug)]
pub enum GenError {
    Registry(RegistryError),
    InvalidLayers(String),
    EmptyWorld,
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::Registry(e) => write!(f, "tile registry: {}", e),
            GenError::InvalidLayers(msg) => write!(f, "invalid layer table: {}", msg),
            GenError::EmptyWorld => write!(f, "world has no cells"),
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegistryError> for GenError {
    fn from(e: RegistryError) -> Self {
        GenError::Registry(e)
    }
}

//! hookflow-conf: configuración de ejecución compartida por el engine.
//!
//! El engine sólo lee de aquí el namespace, los patrones de filtrado y el
//! selector de etiquetas. La construcción de credenciales reales queda fuera:
//! `ConnectionSettings` sólo transporta la ruta y los nombres.

pub mod config;
pub mod env;
pub mod error;
pub mod labels;

pub use config::{Config, ConnectionSettings};
pub use env::init_dotenv;
pub use error::ConfigError;
pub use labels::{parse_labels, Labels};
